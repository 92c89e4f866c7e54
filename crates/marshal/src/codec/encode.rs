// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_engine::Bulk;
use tessera_type::{DataType, TypedValue, TypedVector, Value};

use super::narrow;

/// Writes an already validated value into `bulk`, retyping it first.
pub fn encode_typed(value: &TypedValue, bulk: &mut Bulk) {
	bulk.reset(value.data_type().id(), value.is_vector());
	match value {
		TypedValue::Void => {}
		TypedValue::Bool(v) => bulk.push_bytes(&[*v as u8]),
		TypedValue::Int8(v) => bulk.push_bytes(&v.to_le_bytes()),
		TypedValue::UInt8(v) => bulk.push_bytes(&v.to_le_bytes()),
		TypedValue::Int16(v) => bulk.push_bytes(&v.to_le_bytes()),
		TypedValue::UInt16(v) => bulk.push_bytes(&v.to_le_bytes()),
		TypedValue::Int32(v) => bulk.push_bytes(&v.to_le_bytes()),
		TypedValue::UInt32(v) => bulk.push_bytes(&v.to_le_bytes()),
		TypedValue::Int64(v) | TypedValue::Time(v) => bulk.push_bytes(&v.to_le_bytes()),
		TypedValue::UInt64(v) => bulk.push_bytes(&v.to_le_bytes()),
		TypedValue::Float(v) => bulk.push_bytes(&v.to_le_bytes()),
		TypedValue::ShortText(v) | TypedValue::Text(v) | TypedValue::LongText(v) => bulk.push_bytes(v),
		TypedValue::TokyoGeoPoint(p) | TypedValue::Wgs84GeoPoint(p) => bulk.push_bytes(&p.to_le_bytes()),
		TypedValue::Vector(v) => encode_vector(v, bulk),
	}
}

fn encode_vector(vector: &TypedVector, bulk: &mut Bulk) {
	macro_rules! fixed {
		($items:expr) => {
			for item in $items {
				bulk.push_bytes(&item.to_le_bytes());
			}
		};
	}

	match vector {
		TypedVector::Bool(items) => {
			for item in items {
				bulk.push_bytes(&[*item as u8]);
			}
		}
		TypedVector::Int8(items) => fixed!(items),
		TypedVector::UInt8(items) => fixed!(items),
		TypedVector::Int16(items) => fixed!(items),
		TypedVector::UInt16(items) => fixed!(items),
		TypedVector::Int32(items) => fixed!(items),
		TypedVector::UInt32(items) => fixed!(items),
		TypedVector::Int64(items) | TypedVector::Time(items) => fixed!(items),
		TypedVector::UInt64(items) => fixed!(items),
		TypedVector::Float(items) => fixed!(items),
		TypedVector::TokyoGeoPoint(items) | TypedVector::Wgs84GeoPoint(items) => fixed!(items),
		TypedVector::ShortText(items) | TypedVector::Text(items) | TypedVector::LongText(items) => {
			for item in items {
				bulk.push_section(item);
			}
		}
	}
}

/// Validates `value` against `data_type` and encodes it. Nothing is encoded
/// when validation fails.
pub fn encode(data_type: DataType, vector: bool, value: &Value) -> crate::Result<Bulk> {
	let typed = narrow(data_type, vector, value)?;
	let mut bulk = Bulk::new(data_type.id(), vector);
	encode_typed(&typed, &mut bulk);
	Ok(bulk)
}

#[cfg(test)]
mod tests {
	use tessera_type::{DataType, GeoPoint, Value};

	use super::encode;

	#[test]
	fn test_little_endian_int() {
		let bulk = encode(DataType::Int32, false, &Value::Int(0x0102_0304)).unwrap();
		assert_eq!(bulk.as_bytes(), &[4, 3, 2, 1]);
		assert_eq!(bulk.domain(), DataType::Int32.id());
		assert!(!bulk.is_vector());
	}

	#[test]
	fn test_narrow_width() {
		assert_eq!(encode(DataType::Int8, false, &Value::Int(-1)).unwrap().as_bytes(), &[0xff]);
		assert_eq!(encode(DataType::UInt16, false, &Value::Int(258)).unwrap().as_bytes(), &[2, 1]);
	}

	#[test]
	fn test_bool() {
		assert_eq!(encode(DataType::Bool, false, &Value::Bool(true)).unwrap().as_bytes(), &[1]);
		assert_eq!(encode(DataType::Bool, true, &Value::BoolVector(vec![false, true])).unwrap().as_bytes(), &[0, 1]);
	}

	#[test]
	fn test_geo_point() {
		let bulk = encode(DataType::Wgs84GeoPoint, false, &Value::geo_point(1, -1)).unwrap();
		assert_eq!(bulk.as_bytes(), &GeoPoint::new(1, -1).to_le_bytes());
	}

	#[test]
	fn test_text_vector_sections() {
		let bulk = encode(DataType::ShortText, true, &Value::text_vector(["ab", "", "c"])).unwrap();
		assert_eq!(bulk.as_bytes(), b"abc");
		assert_eq!(bulk.section_count(), 3);
		assert_eq!(bulk.section(1), Some(&b""[..]));
		assert_eq!(bulk.section(2), Some(&b"c"[..]));
	}

	#[test]
	fn test_void() {
		let bulk = encode(DataType::Void, false, &Value::Void).unwrap();
		assert!(bulk.is_empty());
	}

	#[test]
	fn test_invalid_encodes_nothing() {
		assert!(encode(DataType::UInt8, true, &Value::IntVector(vec![1, 2, 256])).is_err());
	}
}
