// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_marshal::{Database, TableOptions};
use tessera_testing::{create_scalar_column, create_vector_column, ensure_table, init_tracing};
use tessera_type::{DataType, GeoPoint, Value};

fn sample(db: &Database) -> tessera_marshal::Table {
	let table = ensure_table(db, TableOptions::array("Sample"));
	for ty in DataType::ALL.iter().filter(|ty| **ty != DataType::Void) {
		create_scalar_column(&table, &format!("s{}", ty.id().0), ty.name());
		create_vector_column(&table, &format!("v{}", ty.id().0), ty.name());
	}
	table
}

fn write_then_read(ty: DataType, vector: bool, value: Value) {
	init_tracing();
	let db = Database::memory();
	let table = sample(&db);
	let row = table.insert(Value::Void).unwrap().id;
	let column = format!("{}{}", if vector { "v" } else { "s" }, ty.id().0);

	table.set_value(&column, row, value.clone()).unwrap();
	assert_eq!(table.get_value(&column, row).unwrap(), value, "{} {}", column, ty);
}

#[test]
fn test_integers_at_their_bounds() {
	let bounds: [(DataType, i64, i64); 9] = [
		(DataType::Int8, i8::MIN as i64, i8::MAX as i64),
		(DataType::UInt8, 0, u8::MAX as i64),
		(DataType::Int16, i16::MIN as i64, i16::MAX as i64),
		(DataType::UInt16, 0, u16::MAX as i64),
		(DataType::Int32, i32::MIN as i64, i32::MAX as i64),
		(DataType::UInt32, 0, u32::MAX as i64),
		(DataType::Int64, i64::MIN, i64::MAX),
		(DataType::UInt64, 0, i64::MAX),
		(DataType::Time, i64::MIN, i64::MAX),
	];
	for (ty, min, max) in bounds {
		write_then_read(ty, false, Value::Int(min));
		write_then_read(ty, false, Value::Int(max));
		write_then_read(ty, true, Value::IntVector(vec![min, 0, max]));
	}
}

#[test]
fn test_floats_bit_exact() {
	for v in [0.0, -0.0, f64::MIN_POSITIVE, f64::MAX, f64::NEG_INFINITY, 0.1 + 0.2] {
		let db = Database::memory();
		let table = sample(&db);
		let row = table.insert(Value::Void).unwrap().id;
		let column = format!("s{}", DataType::Float.id().0);
		table.set_value(&column, row, v).unwrap();
		let Value::Float(read) = table.get_value(&column, row).unwrap() else {
			panic!("expected a float");
		};
		assert_eq!(read.to_bits(), v.to_bits());
	}
	write_then_read(DataType::Float, true, Value::FloatVector(vec![1.5, -2.25]));
}

#[test]
fn test_bool() {
	write_then_read(DataType::Bool, false, Value::Bool(true));
	write_then_read(DataType::Bool, false, Value::Bool(false));
	write_then_read(DataType::Bool, true, Value::BoolVector(vec![true, false, true]));
}

#[test]
fn test_text_kinds() {
	for ty in [DataType::ShortText, DataType::Text, DataType::LongText] {
		write_then_read(ty, false, Value::text("héllo"));
		write_then_read(ty, false, Value::Text(vec![0, 255, 1]));
		write_then_read(ty, false, Value::text(""));
		write_then_read(ty, true, Value::text_vector(["a", "", "bc"]));
	}
	write_then_read(DataType::ShortText, false, Value::Text(vec![b'x'; DataType::MAX_SHORT_TEXT]));
}

#[test]
fn test_geo_points() {
	let corner = GeoPoint::new(GeoPoint::MAX_LATITUDE, -GeoPoint::MAX_LONGITUDE);
	for ty in [DataType::TokyoGeoPoint, DataType::Wgs84GeoPoint] {
		write_then_read(ty, false, Value::GeoPoint(corner));
		write_then_read(ty, true, Value::GeoPointVector(vec![corner, GeoPoint::new(0, 0)]));
	}
}

#[test]
fn test_empty_vectors() {
	write_then_read(DataType::Int32, true, Value::IntVector(vec![]));
	write_then_read(DataType::ShortText, true, Value::TextVector(vec![]));
}

#[test]
fn test_unset_reads_default() {
	let db = Database::memory();
	let table = sample(&db);
	let row = table.insert(Value::Void).unwrap().id;
	assert_eq!(table.get_value(&format!("s{}", DataType::Int32.id().0), row).unwrap(), Value::Int(0));
	assert_eq!(table.get_value(&format!("s{}", DataType::ShortText.id().0), row).unwrap(), Value::text(""));
	assert_eq!(table.get_value(&format!("v{}", DataType::Int32.id().0), row).unwrap(), Value::IntVector(vec![]));
}

#[test]
fn test_table_value_slot() {
	init_tracing();
	let db = Database::memory();
	let table = ensure_table(&db, TableOptions::hash("Prices", "ShortText").value_type("Int16"));
	let row = table.insert("pen").unwrap().id;
	table.set_value("_value", row, Value::Int(-300)).unwrap();
	assert_eq!(table.get_value("_value", row).unwrap(), Value::Int(-300));
	assert_eq!(table.get_value("_key", row).unwrap(), Value::text("pen"));
	assert_eq!(table.get_value("_id", row).unwrap(), Value::Int(row.0 as i64));
}
