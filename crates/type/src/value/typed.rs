// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{DataType, GeoPoint};

/// A validated value narrowed to exactly one engine data type.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedValue {
	Void,
	Bool(bool),
	Int8(i8),
	UInt8(u8),
	Int16(i16),
	UInt16(u16),
	Int32(i32),
	UInt32(u32),
	Int64(i64),
	UInt64(u64),
	Float(f64),
	Time(i64),
	ShortText(Vec<u8>),
	Text(Vec<u8>),
	LongText(Vec<u8>),
	TokyoGeoPoint(GeoPoint),
	Wgs84GeoPoint(GeoPoint),
	Vector(TypedVector),
}

/// A validated one-dimensional vector of a single data type.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedVector {
	Bool(Vec<bool>),
	Int8(Vec<i8>),
	UInt8(Vec<u8>),
	Int16(Vec<i16>),
	UInt16(Vec<u16>),
	Int32(Vec<i32>),
	UInt32(Vec<u32>),
	Int64(Vec<i64>),
	UInt64(Vec<u64>),
	Float(Vec<f64>),
	Time(Vec<i64>),
	ShortText(Vec<Vec<u8>>),
	Text(Vec<Vec<u8>>),
	LongText(Vec<Vec<u8>>),
	TokyoGeoPoint(Vec<GeoPoint>),
	Wgs84GeoPoint(Vec<GeoPoint>),
}

impl TypedValue {
	pub fn data_type(&self) -> DataType {
		match self {
			TypedValue::Void => DataType::Void,
			TypedValue::Bool(_) => DataType::Bool,
			TypedValue::Int8(_) => DataType::Int8,
			TypedValue::UInt8(_) => DataType::UInt8,
			TypedValue::Int16(_) => DataType::Int16,
			TypedValue::UInt16(_) => DataType::UInt16,
			TypedValue::Int32(_) => DataType::Int32,
			TypedValue::UInt32(_) => DataType::UInt32,
			TypedValue::Int64(_) => DataType::Int64,
			TypedValue::UInt64(_) => DataType::UInt64,
			TypedValue::Float(_) => DataType::Float,
			TypedValue::Time(_) => DataType::Time,
			TypedValue::ShortText(_) => DataType::ShortText,
			TypedValue::Text(_) => DataType::Text,
			TypedValue::LongText(_) => DataType::LongText,
			TypedValue::TokyoGeoPoint(_) => DataType::TokyoGeoPoint,
			TypedValue::Wgs84GeoPoint(_) => DataType::Wgs84GeoPoint,
			TypedValue::Vector(v) => v.data_type(),
		}
	}

	pub fn is_vector(&self) -> bool {
		matches!(self, TypedValue::Vector(_))
	}
}

impl TypedVector {
	pub fn data_type(&self) -> DataType {
		match self {
			TypedVector::Bool(_) => DataType::Bool,
			TypedVector::Int8(_) => DataType::Int8,
			TypedVector::UInt8(_) => DataType::UInt8,
			TypedVector::Int16(_) => DataType::Int16,
			TypedVector::UInt16(_) => DataType::UInt16,
			TypedVector::Int32(_) => DataType::Int32,
			TypedVector::UInt32(_) => DataType::UInt32,
			TypedVector::Int64(_) => DataType::Int64,
			TypedVector::UInt64(_) => DataType::UInt64,
			TypedVector::Float(_) => DataType::Float,
			TypedVector::Time(_) => DataType::Time,
			TypedVector::ShortText(_) => DataType::ShortText,
			TypedVector::Text(_) => DataType::Text,
			TypedVector::LongText(_) => DataType::LongText,
			TypedVector::TokyoGeoPoint(_) => DataType::TokyoGeoPoint,
			TypedVector::Wgs84GeoPoint(_) => DataType::Wgs84GeoPoint,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			TypedVector::Bool(v) => v.len(),
			TypedVector::Int8(v) => v.len(),
			TypedVector::UInt8(v) => v.len(),
			TypedVector::Int16(v) => v.len(),
			TypedVector::UInt16(v) => v.len(),
			TypedVector::Int32(v) => v.len(),
			TypedVector::UInt32(v) => v.len(),
			TypedVector::Int64(v) | TypedVector::Time(v) => v.len(),
			TypedVector::UInt64(v) => v.len(),
			TypedVector::Float(v) => v.len(),
			TypedVector::ShortText(v) | TypedVector::Text(v) | TypedVector::LongText(v) => v.len(),
			TypedVector::TokyoGeoPoint(v) | TypedVector::Wgs84GeoPoint(v) => v.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_data_type() {
		assert_eq!(TypedValue::UInt16(7).data_type(), DataType::UInt16);
		assert_eq!(TypedValue::Time(7).data_type(), DataType::Time);
		assert_eq!(TypedValue::Vector(TypedVector::ShortText(vec![])).data_type(), DataType::ShortText);
	}

	#[test]
	fn test_vector_len() {
		let vector = TypedVector::Wgs84GeoPoint(vec![GeoPoint::default(); 3]);
		assert_eq!(vector.len(), 3);
		assert!(!vector.is_empty());
		assert!(TypedVector::Time(vec![]).is_empty());
	}
}
