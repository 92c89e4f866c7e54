// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{ObjectId, error::diagnostic::argument};

/// The builtin scalar kinds an engine column, key or value can carry.
///
/// The discriminants are the engine's builtin object ids. Ids 1 and 2 are
/// reserved for the database and generic object headers and never name a
/// scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum DataType {
	Void = 0,
	Bool = 3,
	Int8 = 4,
	UInt8 = 5,
	Int16 = 6,
	UInt16 = 7,
	Int32 = 8,
	UInt32 = 9,
	Int64 = 10,
	UInt64 = 11,
	Float = 12,
	/// Microseconds since the Unix epoch.
	Time = 13,
	ShortText = 14,
	Text = 15,
	LongText = 16,
	TokyoGeoPoint = 17,
	Wgs84GeoPoint = 18,
}

impl DataType {
	pub const ALL: [DataType; 17] = [
		DataType::Void,
		DataType::Bool,
		DataType::Int8,
		DataType::UInt8,
		DataType::Int16,
		DataType::UInt16,
		DataType::Int32,
		DataType::UInt32,
		DataType::Int64,
		DataType::UInt64,
		DataType::Float,
		DataType::Time,
		DataType::ShortText,
		DataType::Text,
		DataType::LongText,
		DataType::TokyoGeoPoint,
		DataType::Wgs84GeoPoint,
	];

	pub const MAX_SHORT_TEXT: usize = 4095;
	pub const MAX_TEXT: usize = 65535;
	pub const MAX_LONG_TEXT: usize = 2_147_483_647;

	pub fn id(&self) -> ObjectId {
		ObjectId(*self as u32)
	}

	pub fn from_id(id: ObjectId) -> Option<DataType> {
		Self::ALL.iter().copied().find(|ty| ty.id() == id)
	}

	/// Element stride in bytes, `None` for variable-length text.
	pub fn fixed_size(&self) -> Option<usize> {
		match self {
			DataType::Void => Some(0),
			DataType::Bool | DataType::Int8 | DataType::UInt8 => Some(1),
			DataType::Int16 | DataType::UInt16 => Some(2),
			DataType::Int32 | DataType::UInt32 => Some(4),
			DataType::Int64 | DataType::UInt64 | DataType::Float | DataType::Time => Some(8),
			DataType::TokyoGeoPoint | DataType::Wgs84GeoPoint => Some(8),
			DataType::ShortText | DataType::Text | DataType::LongText => None,
		}
	}

	pub fn max_text_len(&self) -> Option<usize> {
		match self {
			DataType::ShortText => Some(Self::MAX_SHORT_TEXT),
			DataType::Text => Some(Self::MAX_TEXT),
			DataType::LongText => Some(Self::MAX_LONG_TEXT),
			_ => None,
		}
	}

	pub fn is_text(&self) -> bool {
		matches!(self, DataType::ShortText | DataType::Text | DataType::LongText)
	}

	pub fn is_geo_point(&self) -> bool {
		matches!(self, DataType::TokyoGeoPoint | DataType::Wgs84GeoPoint)
	}

	pub fn is_integer(&self) -> bool {
		matches!(
			self,
			DataType::Int8
				| DataType::UInt8 | DataType::Int16
				| DataType::UInt16 | DataType::Int32
				| DataType::UInt32 | DataType::Int64
				| DataType::UInt64 | DataType::Time
		)
	}

	pub fn name(&self) -> &'static str {
		match self {
			DataType::Void => "Void",
			DataType::Bool => "Bool",
			DataType::Int8 => "Int8",
			DataType::UInt8 => "UInt8",
			DataType::Int16 => "Int16",
			DataType::UInt16 => "UInt16",
			DataType::Int32 => "Int32",
			DataType::UInt32 => "UInt32",
			DataType::Int64 => "Int64",
			DataType::UInt64 => "UInt64",
			DataType::Float => "Float",
			DataType::Time => "Time",
			DataType::ShortText => "ShortText",
			DataType::Text => "Text",
			DataType::LongText => "LongText",
			DataType::TokyoGeoPoint => "TokyoGeoPoint",
			DataType::Wgs84GeoPoint => "WGS84GeoPoint",
		}
	}
}

impl Display for DataType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for DataType {
	type Err = crate::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match Self::ALL.iter().find(|ty| ty.name() == s) {
			Some(ty) => Ok(*ty),
			None => Err(crate::error!(argument::unknown_type_name(s))),
		}
	}
}
