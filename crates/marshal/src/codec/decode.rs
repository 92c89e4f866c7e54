// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_engine::Bulk;
use tessera_type::{DataType, GeoPoint, TypedValue, TypedVector, Value, err, error, error::diagnostic::codec};

fn exact<const N: usize>(data_type: DataType, bytes: &[u8]) -> crate::Result<[u8; N]> {
	bytes.try_into().map_err(|_| error!(codec::malformed_value(data_type, bytes.len())))
}

fn chunks<const N: usize>(data_type: DataType, bytes: &[u8]) -> crate::Result<impl Iterator<Item = [u8; N]> + '_> {
	if bytes.len() % N != 0 {
		return err!(codec::malformed_value(data_type, bytes.len()));
	}
	Ok(bytes.chunks_exact(N).map(|chunk| {
		let mut out = [0u8; N];
		out.copy_from_slice(chunk);
		out
	}))
}

/// Decodes one fixed or text value stored as `data_type`.
pub fn decode_scalar(data_type: DataType, bytes: &[u8]) -> crate::Result<TypedValue> {
	let ty = data_type;
	Ok(match ty {
		DataType::Void => TypedValue::Void,
		DataType::Bool => TypedValue::Bool(exact::<1>(ty, bytes)?[0] != 0),
		DataType::Int8 => TypedValue::Int8(i8::from_le_bytes(exact(ty, bytes)?)),
		DataType::UInt8 => TypedValue::UInt8(u8::from_le_bytes(exact(ty, bytes)?)),
		DataType::Int16 => TypedValue::Int16(i16::from_le_bytes(exact(ty, bytes)?)),
		DataType::UInt16 => TypedValue::UInt16(u16::from_le_bytes(exact(ty, bytes)?)),
		DataType::Int32 => TypedValue::Int32(i32::from_le_bytes(exact(ty, bytes)?)),
		DataType::UInt32 => TypedValue::UInt32(u32::from_le_bytes(exact(ty, bytes)?)),
		DataType::Int64 => TypedValue::Int64(i64::from_le_bytes(exact(ty, bytes)?)),
		DataType::UInt64 => TypedValue::UInt64(u64::from_le_bytes(exact(ty, bytes)?)),
		DataType::Float => TypedValue::Float(f64::from_le_bytes(exact(ty, bytes)?)),
		DataType::Time => TypedValue::Time(i64::from_le_bytes(exact(ty, bytes)?)),
		DataType::ShortText => TypedValue::ShortText(bytes.to_vec()),
		DataType::Text => TypedValue::Text(bytes.to_vec()),
		DataType::LongText => TypedValue::LongText(bytes.to_vec()),
		DataType::TokyoGeoPoint => TypedValue::TokyoGeoPoint(GeoPoint::from_le_bytes(exact(ty, bytes)?)),
		DataType::Wgs84GeoPoint => TypedValue::Wgs84GeoPoint(GeoPoint::from_le_bytes(exact(ty, bytes)?)),
	})
}

fn texts(bulk: &Bulk) -> Vec<Vec<u8>> {
	(0..bulk.section_count()).filter_map(|i| bulk.section(i)).map(<[u8]>::to_vec).collect()
}

/// Decodes the contents of `bulk` as `data_type`.
pub fn decode_typed(data_type: DataType, vector: bool, bulk: &Bulk) -> crate::Result<TypedValue> {
	let bytes = bulk.as_bytes();
	if !vector {
		return decode_scalar(data_type, bytes);
	}

	let ty = data_type;
	let vector = match ty {
		DataType::Void => return err!(codec::type_mismatch(ty, true, "Void")),
		DataType::Bool => TypedVector::Bool(bytes.iter().map(|b| *b != 0).collect()),
		DataType::Int8 => TypedVector::Int8(chunks(ty, bytes)?.map(i8::from_le_bytes).collect()),
		DataType::UInt8 => TypedVector::UInt8(bytes.to_vec()),
		DataType::Int16 => TypedVector::Int16(chunks(ty, bytes)?.map(i16::from_le_bytes).collect()),
		DataType::UInt16 => TypedVector::UInt16(chunks(ty, bytes)?.map(u16::from_le_bytes).collect()),
		DataType::Int32 => TypedVector::Int32(chunks(ty, bytes)?.map(i32::from_le_bytes).collect()),
		DataType::UInt32 => TypedVector::UInt32(chunks(ty, bytes)?.map(u32::from_le_bytes).collect()),
		DataType::Int64 => TypedVector::Int64(chunks(ty, bytes)?.map(i64::from_le_bytes).collect()),
		DataType::UInt64 => TypedVector::UInt64(chunks(ty, bytes)?.map(u64::from_le_bytes).collect()),
		DataType::Float => TypedVector::Float(chunks(ty, bytes)?.map(f64::from_le_bytes).collect()),
		DataType::Time => TypedVector::Time(chunks(ty, bytes)?.map(i64::from_le_bytes).collect()),
		DataType::ShortText => TypedVector::ShortText(texts(bulk)),
		DataType::Text => TypedVector::Text(texts(bulk)),
		DataType::LongText => TypedVector::LongText(texts(bulk)),
		DataType::TokyoGeoPoint => TypedVector::TokyoGeoPoint(chunks(ty, bytes)?.map(GeoPoint::from_le_bytes).collect()),
		DataType::Wgs84GeoPoint => TypedVector::Wgs84GeoPoint(chunks(ty, bytes)?.map(GeoPoint::from_le_bytes).collect()),
	};
	Ok(TypedValue::Vector(vector))
}

pub(crate) fn host_int(value: u64) -> crate::Result<i64> {
	i64::try_from(value).map_err(|_| error!(codec::exceeds_host_integer(DataType::UInt64, value)))
}

/// Widens a narrowed value back to its host representation.
pub fn widen(value: TypedValue) -> crate::Result<Value> {
	Ok(match value {
		TypedValue::Void => Value::Void,
		TypedValue::Bool(v) => Value::Bool(v),
		TypedValue::Int8(v) => Value::Int(v.into()),
		TypedValue::UInt8(v) => Value::Int(v.into()),
		TypedValue::Int16(v) => Value::Int(v.into()),
		TypedValue::UInt16(v) => Value::Int(v.into()),
		TypedValue::Int32(v) => Value::Int(v.into()),
		TypedValue::UInt32(v) => Value::Int(v.into()),
		TypedValue::Int64(v) | TypedValue::Time(v) => Value::Int(v),
		TypedValue::UInt64(v) => Value::Int(host_int(v)?),
		TypedValue::Float(v) => Value::Float(v),
		TypedValue::ShortText(v) | TypedValue::Text(v) | TypedValue::LongText(v) => Value::Text(v),
		TypedValue::TokyoGeoPoint(p) | TypedValue::Wgs84GeoPoint(p) => Value::GeoPoint(p),
		TypedValue::Vector(v) => widen_vector(v)?,
	})
}

fn widen_ints<T: Into<i64>>(items: Vec<T>) -> Value {
	Value::IntVector(items.into_iter().map(Into::into).collect())
}

fn widen_vector(vector: TypedVector) -> crate::Result<Value> {
	Ok(match vector {
		TypedVector::Bool(items) => Value::BoolVector(items),
		TypedVector::Int8(items) => widen_ints(items),
		TypedVector::UInt8(items) => widen_ints(items),
		TypedVector::Int16(items) => widen_ints(items),
		TypedVector::UInt16(items) => widen_ints(items),
		TypedVector::Int32(items) => widen_ints(items),
		TypedVector::UInt32(items) => widen_ints(items),
		TypedVector::Int64(items) | TypedVector::Time(items) => Value::IntVector(items),
		TypedVector::UInt64(items) => {
			Value::IntVector(items.into_iter().map(host_int).collect::<crate::Result<Vec<_>>>()?)
		}
		TypedVector::Float(items) => Value::FloatVector(items),
		TypedVector::ShortText(items) | TypedVector::Text(items) | TypedVector::LongText(items) => {
			Value::TextVector(items)
		}
		TypedVector::TokyoGeoPoint(items) | TypedVector::Wgs84GeoPoint(items) => Value::GeoPointVector(items),
	})
}

/// Decodes `bulk` as `data_type` and widens the result to a host value.
pub fn decode(data_type: DataType, vector: bool, bulk: &Bulk) -> crate::Result<Value> {
	widen(decode_typed(data_type, vector, bulk)?)
}

#[cfg(test)]
mod tests {
	use tessera_engine::Bulk;
	use tessera_type::{DataType, ErrorKind, GeoPoint, Value};

	use super::decode;
	use crate::codec::encode;

	fn round_trip(ty: DataType, vector: bool, value: Value) {
		let bulk = encode(ty, vector, &value).unwrap();
		assert_eq!(decode(ty, vector, &bulk).unwrap(), value, "{} round trip", ty);
	}

	mod round_trip {
		use super::*;

		#[test]
		fn test_integer_extremes() {
			round_trip(DataType::Int8, false, Value::Int(i8::MIN as i64));
			round_trip(DataType::UInt8, false, Value::Int(u8::MAX as i64));
			round_trip(DataType::Int16, false, Value::Int(i16::MIN as i64));
			round_trip(DataType::UInt16, false, Value::Int(u16::MAX as i64));
			round_trip(DataType::Int32, false, Value::Int(i32::MIN as i64));
			round_trip(DataType::UInt32, false, Value::Int(u32::MAX as i64));
			round_trip(DataType::Int64, false, Value::Int(i64::MIN));
			round_trip(DataType::UInt64, false, Value::Int(i64::MAX));
			round_trip(DataType::Time, false, Value::Int(-1_234_567));
		}

		#[test]
		fn test_float_bits() {
			round_trip(DataType::Float, false, Value::Float(-0.0));
			round_trip(DataType::Float, false, Value::Float(f64::INFINITY));
			round_trip(DataType::Float, false, Value::Float(1.0 / 3.0));
		}

		#[test]
		fn test_text_preserves_bytes() {
			round_trip(DataType::ShortText, false, Value::Text(vec![0xff, 0x00, 0xfe]));
			round_trip(DataType::LongText, false, Value::text(""));
		}

		#[test]
		fn test_vectors() {
			round_trip(DataType::Int16, true, Value::IntVector(vec![-1, 0, 32767]));
			round_trip(DataType::Bool, true, Value::BoolVector(vec![true, false]));
			round_trip(DataType::Text, true, Value::text_vector(["x", "", "yz"]));
			round_trip(DataType::TokyoGeoPoint, true, Value::GeoPointVector(vec![GeoPoint::new(1, 2), GeoPoint::new(-3, 4)]));
			round_trip(DataType::Float, true, Value::FloatVector(vec![]));
		}
	}

	#[test]
	fn test_uint64_beyond_host_range() {
		let bulk = Bulk::from_bytes(DataType::UInt64.id(), &u64::MAX.to_le_bytes());
		let err = decode(DataType::UInt64, false, &bulk).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidArgument);
		assert_eq!(err.code, "CODEC_008");
	}

	#[test]
	fn test_malformed_length() {
		let bulk = Bulk::from_bytes(DataType::Int32.id(), &[1, 2, 3]);
		assert_eq!(decode(DataType::Int32, false, &bulk).unwrap_err().code, "CODEC_007");

		let mut bulk = Bulk::new(DataType::Int32.id(), true);
		bulk.push_bytes(&[1, 2, 3, 4, 5]);
		assert_eq!(decode(DataType::Int32, true, &bulk).unwrap_err().code, "CODEC_007");
	}
}
