// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use num_traits::NumCast;
use tessera_type::{
	DataType, GeoPoint, TypedValue, TypedVector, Value, err,
	error::diagnostic::codec,
	return_error, return_internal_error,
};

fn fits<T: NumCast>(value: i64) -> bool {
	<T as NumCast>::from(value).is_some()
}

fn check_int(data_type: DataType, value: i64) -> crate::Result<()> {
	let ok = match data_type {
		DataType::Int8 => fits::<i8>(value),
		DataType::UInt8 => fits::<u8>(value),
		DataType::Int16 => fits::<i16>(value),
		DataType::UInt16 => fits::<u16>(value),
		DataType::Int32 => fits::<i32>(value),
		DataType::UInt32 => fits::<u32>(value),
		DataType::UInt64 => fits::<u64>(value),
		DataType::Int64 | DataType::Time => true,
		_ => return_error!(codec::type_mismatch(data_type, false, "Int")),
	};
	if ok {
		Ok(())
	} else {
		err!(codec::integer_out_of_range(data_type, value))
	}
}

fn check_float(data_type: DataType, value: f64) -> crate::Result<()> {
	if value.is_nan() {
		err!(codec::float_nan(data_type))
	} else {
		Ok(())
	}
}

fn check_text(data_type: DataType, bytes: &[u8]) -> crate::Result<()> {
	match data_type.max_text_len() {
		Some(max) if bytes.len() > max => err!(codec::text_too_long(data_type, bytes.len(), max)),
		_ => Ok(()),
	}
}

fn check_geo_point(data_type: DataType, point: &GeoPoint) -> crate::Result<()> {
	if point.is_valid() {
		Ok(())
	} else {
		err!(codec::geo_point_out_of_range(data_type, *point))
	}
}

fn each<T>(items: &[T], check: impl Fn(&T) -> crate::Result<()>) -> crate::Result<()> {
	for (index, item) in items.iter().enumerate() {
		if let Err(e) = check(item) {
			return_error!(codec::vector_element_invalid(index, e.diagnostic()));
		}
	}
	Ok(())
}

/// Checks that `value` can be stored into a slot of `data_type`, as a vector
/// when `vector` is set. Nothing is allocated or written.
pub fn validate(data_type: DataType, vector: bool, value: &Value) -> crate::Result<()> {
	let ty = data_type;
	match (vector, value) {
		(false, Value::Void) if ty == DataType::Void => Ok(()),
		(false, Value::Bool(_)) if ty == DataType::Bool => Ok(()),
		(false, Value::Int(v)) if ty.is_integer() => check_int(ty, *v),
		(false, Value::Float(v)) if ty == DataType::Float => check_float(ty, *v),
		(false, Value::GeoPoint(p)) if ty.is_geo_point() => check_geo_point(ty, p),
		(false, Value::Text(bytes)) if ty.is_text() => check_text(ty, bytes),
		(true, Value::BoolVector(_)) if ty == DataType::Bool => Ok(()),
		(true, Value::IntVector(items)) if ty.is_integer() => each(items, |v| check_int(ty, *v)),
		(true, Value::FloatVector(items)) if ty == DataType::Float => each(items, |v| check_float(ty, *v)),
		(true, Value::GeoPointVector(items)) if ty.is_geo_point() => each(items, |p| check_geo_point(ty, p)),
		(true, Value::TextVector(items)) if ty.is_text() => each(items, |b| check_text(ty, b)),
		_ => err!(codec::type_mismatch(ty, vector, value.kind_name())),
	}
}

fn narrow_int(data_type: DataType, v: i64) -> crate::Result<TypedValue> {
	Ok(match data_type {
		DataType::Int8 => TypedValue::Int8(v as i8),
		DataType::UInt8 => TypedValue::UInt8(v as u8),
		DataType::Int16 => TypedValue::Int16(v as i16),
		DataType::UInt16 => TypedValue::UInt16(v as u16),
		DataType::Int32 => TypedValue::Int32(v as i32),
		DataType::UInt32 => TypedValue::UInt32(v as u32),
		DataType::Int64 => TypedValue::Int64(v),
		DataType::UInt64 => TypedValue::UInt64(v as u64),
		DataType::Time => TypedValue::Time(v),
		other => return_internal_error!("{} is not an integer type", other),
	})
}

fn narrow_int_vector(data_type: DataType, items: &[i64]) -> crate::Result<TypedVector> {
	Ok(match data_type {
		DataType::Int8 => TypedVector::Int8(items.iter().map(|v| *v as i8).collect()),
		DataType::UInt8 => TypedVector::UInt8(items.iter().map(|v| *v as u8).collect()),
		DataType::Int16 => TypedVector::Int16(items.iter().map(|v| *v as i16).collect()),
		DataType::UInt16 => TypedVector::UInt16(items.iter().map(|v| *v as u16).collect()),
		DataType::Int32 => TypedVector::Int32(items.iter().map(|v| *v as i32).collect()),
		DataType::UInt32 => TypedVector::UInt32(items.iter().map(|v| *v as u32).collect()),
		DataType::Int64 => TypedVector::Int64(items.to_vec()),
		DataType::UInt64 => TypedVector::UInt64(items.iter().map(|v| *v as u64).collect()),
		DataType::Time => TypedVector::Time(items.to_vec()),
		other => return_internal_error!("{} is not an integer type", other),
	})
}

fn text(data_type: DataType, bytes: &[u8]) -> TypedValue {
	match data_type {
		DataType::ShortText => TypedValue::ShortText(bytes.to_vec()),
		DataType::Text => TypedValue::Text(bytes.to_vec()),
		_ => TypedValue::LongText(bytes.to_vec()),
	}
}

fn text_vector(data_type: DataType, items: &[Vec<u8>]) -> TypedVector {
	match data_type {
		DataType::ShortText => TypedVector::ShortText(items.to_vec()),
		DataType::Text => TypedVector::Text(items.to_vec()),
		_ => TypedVector::LongText(items.to_vec()),
	}
}

/// Validates `value` and narrows it to the exact representation of
/// `data_type`.
pub fn narrow(data_type: DataType, vector: bool, value: &Value) -> crate::Result<TypedValue> {
	validate(data_type, vector, value)?;

	Ok(match value {
		Value::Void => TypedValue::Void,
		Value::Bool(b) => TypedValue::Bool(*b),
		Value::Int(v) => narrow_int(data_type, *v)?,
		Value::Float(v) => TypedValue::Float(*v),
		Value::GeoPoint(p) if data_type == DataType::TokyoGeoPoint => TypedValue::TokyoGeoPoint(*p),
		Value::GeoPoint(p) => TypedValue::Wgs84GeoPoint(*p),
		Value::Text(bytes) => text(data_type, bytes),
		Value::BoolVector(items) => TypedValue::Vector(TypedVector::Bool(items.clone())),
		Value::IntVector(items) => TypedValue::Vector(narrow_int_vector(data_type, items)?),
		Value::FloatVector(items) => TypedValue::Vector(TypedVector::Float(items.clone())),
		Value::GeoPointVector(items) if data_type == DataType::TokyoGeoPoint => {
			TypedValue::Vector(TypedVector::TokyoGeoPoint(items.clone()))
		}
		Value::GeoPointVector(items) => TypedValue::Vector(TypedVector::Wgs84GeoPoint(items.clone())),
		Value::TextVector(items) => TypedValue::Vector(text_vector(data_type, items)),
		Value::Nested(_) => return_error!(codec::type_mismatch(data_type, vector, value.kind_name())),
	})
}
