// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

mod typed;

pub use typed::{TypedValue, TypedVector};

use crate::GeoPoint;

/// A host-side value. Integers are carried wide and narrowed to the declared
/// column width only after validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
	/// No value; the key of a key-less table.
	Void,
	Bool(bool),
	/// Any integer or time kind, signed 64-bit.
	Int(i64),
	Float(f64),
	GeoPoint(GeoPoint),
	/// Raw text bytes. The engine does not require UTF-8.
	Text(Vec<u8>),
	BoolVector(Vec<bool>),
	IntVector(Vec<i64>),
	FloatVector(Vec<f64>),
	GeoPointVector(Vec<GeoPoint>),
	TextVector(Vec<Vec<u8>>),
	/// One level of a multi-dimensional read; each element is itself a vector
	/// or another nested level.
	Nested(Vec<Value>),
}

impl Value {
	pub fn bool(v: impl Into<bool>) -> Self {
		Value::Bool(v.into())
	}

	pub fn int(v: impl Into<i64>) -> Self {
		Value::Int(v.into())
	}

	pub fn float(v: impl Into<f64>) -> Self {
		Value::Float(v.into())
	}

	pub fn geo_point(latitude: i32, longitude: i32) -> Self {
		Value::GeoPoint(GeoPoint::new(latitude, longitude))
	}

	pub fn text(v: impl AsRef<[u8]>) -> Self {
		Value::Text(v.as_ref().to_vec())
	}

	pub fn text_vector<I, T>(items: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: AsRef<[u8]>,
	{
		Value::TextVector(items.into_iter().map(|t| t.as_ref().to_vec()).collect())
	}

	pub fn is_vector(&self) -> bool {
		matches!(
			self,
			Value::BoolVector(_)
				| Value::IntVector(_) | Value::FloatVector(_)
				| Value::GeoPointVector(_)
				| Value::TextVector(_) | Value::Nested(_)
		)
	}

	/// Name of the variant, used in mismatch diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Value::Void => "Void",
			Value::Bool(_) => "Bool",
			Value::Int(_) => "Int",
			Value::Float(_) => "Float",
			Value::GeoPoint(_) => "GeoPoint",
			Value::Text(_) => "Text",
			Value::BoolVector(_) => "[]Bool",
			Value::IntVector(_) => "[]Int",
			Value::FloatVector(_) => "[]Float",
			Value::GeoPointVector(_) => "[]GeoPoint",
			Value::TextVector(_) => "[]Text",
			Value::Nested(_) => "nested vector",
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int(v as i64)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float(v)
	}
}

impl From<GeoPoint> for Value {
	fn from(v: GeoPoint) -> Self {
		Value::GeoPoint(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Text(v.as_bytes().to_vec())
	}
}

impl From<Vec<i64>> for Value {
	fn from(v: Vec<i64>) -> Self {
		Value::IntVector(v)
	}
}
