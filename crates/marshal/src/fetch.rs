// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Debug, Formatter};

use tessera_engine::{Bulk, Context};
use tessera_type::{
	DataType, GeoPoint, RowId, Value, err,
	error::diagnostic::{argument, codec},
	return_error,
};
use tracing::{instrument, trace, warn};

use crate::{
	scratch::{FlatValues, ScratchSet, Span},
	source::{Hop, SourceChain},
};

fn read(ctx: &Context, hop: &Hop, row: RowId, bulk: &mut Bulk) -> crate::Result<()> {
	match ctx.get_value(hop.target(), row, bulk) {
		Ok(()) => Ok(()),
		Err(e) => {
			warn!(hop = hop.name(), row = %row, error = %e, "engine read failed");
			Err(e.into())
		}
	}
}

/// Reads the value of `chain` at `row` of its root table into `scratch`.
///
/// Starting from `[row]`, every non-terminal hop maps its input ids to the
/// row ids it stores; vector hops record where each input's ids begin and
/// end. The terminal hop's values are staged flat, and the recorded
/// boundaries are then rewritten into span levels. Any failure aborts the
/// read and nothing from it is returned.
#[instrument(name = "marshal::fetch::fan_out", level = "trace", skip(chain, scratch), fields(path = %chain.path()))]
pub(crate) fn fan_out<'a>(chain: &SourceChain, scratch: &'a mut ScratchSet, row: RowId) -> crate::Result<Fetched<'a>> {
	let root = chain.root();
	let ctx = root.context();
	if !ctx.exists(root.id(), row)? {
		return_error!(argument::row_not_found(root.name(), row));
	}

	scratch.rewind();
	let hops = chain.hops();
	let last = hops.len() - 1;

	for (h, hop) in hops.iter().enumerate() {
		let ScratchSet {
			data_type,
			bulk,
			ids,
			bounds,
			flat,
			..
		} = &mut *scratch;

		let (head, tail) = ids.split_at_mut(h + 1);
		if h == 0 {
			head[0].try_reserve(1)?;
			head[0].push(row);
		}
		let inputs = &head[h];

		let boundaries = &mut bounds[h];
		if hop.is_vector() {
			boundaries.try_reserve(inputs.len() + 1)?;
			boundaries.push(0);
		}

		if h == last {
			for id in inputs {
				read(ctx, hop, *id, bulk)?;
				flat.append(*data_type, bulk)?;
				if hop.is_vector() {
					boundaries.push(flat.len() as u32);
				}
			}
		} else {
			let outputs = &mut tail[0];
			for id in inputs {
				read(ctx, hop, *id, bulk)?;
				if bulk.len() % 4 != 0 {
					return err!(codec::malformed_value(DataType::UInt32, bulk.len()));
				}
				let count = bulk.len() / 4;
				outputs.try_reserve(count)?;
				outputs.extend((0..count).filter_map(|i| bulk.u32_at(i)).map(RowId));
				if hop.is_vector() {
					boundaries.push(outputs.len() as u32);
				}
			}
		}
		trace!(hop = hop.name(), inputs = inputs.len(), "read hop");
	}

	scratch.fill()?;
	Ok(Fetched {
		scratch,
	})
}

/// The result of one read, borrowed from the column that produced it.
/// The next read on that column needs the borrow back.
pub struct Fetched<'a> {
	scratch: &'a ScratchSet,
}

impl<'a> Fetched<'a> {
	/// Stamp of the read that produced this view.
	pub fn generation(&self) -> u64 {
		self.scratch.generation
	}

	pub fn data_type(&self) -> DataType {
		self.scratch.data_type
	}

	pub fn dimension(&self) -> usize {
		self.scratch.levels.len()
	}

	pub fn root(&self) -> ValueRef<'a> {
		let scratch = self.scratch;
		match scratch.levels.first().and_then(|level| level.first()) {
			Some(span) => ValueRef::Vector(VectorRef {
				scratch,
				level: 0,
				span: *span,
			}),
			None => ValueRef::Scalar(scalar_at(scratch, 0)),
		}
	}

	pub fn to_value(&self) -> Value {
		self.root().to_value()
	}
}

impl Debug for Fetched<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Fetched").field("generation", &self.generation()).field("root", &self.root()).finish()
	}
}

fn scalar_at(scratch: &ScratchSet, index: usize) -> ScalarRef<'_> {
	let found = match &scratch.flat {
		FlatValues::Void(_) => None,
		FlatValues::Bool(v) => v.get(index).map(|b| ScalarRef::Bool(*b)),
		FlatValues::Int(v) => v.get(index).map(|i| ScalarRef::Int(*i)),
		FlatValues::Float(v) => v.get(index).map(|x| ScalarRef::Float(*x)),
		FlatValues::GeoPoint(v) => v.get(index).map(|p| ScalarRef::GeoPoint(*p)),
		FlatValues::Text {
			body,
			spans,
		} => spans.get(index).and_then(|s| body.get(s.range())).map(ScalarRef::Text),
	};
	found.unwrap_or(ScalarRef::Void)
}

#[derive(Debug, Clone, Copy)]
pub enum ValueRef<'a> {
	Scalar(ScalarRef<'a>),
	Vector(VectorRef<'a>),
}

impl<'a> ValueRef<'a> {
	pub fn as_scalar(&self) -> Option<ScalarRef<'a>> {
		match self {
			ValueRef::Scalar(s) => Some(*s),
			ValueRef::Vector(_) => None,
		}
	}

	pub fn as_vector(&self) -> Option<VectorRef<'a>> {
		match self {
			ValueRef::Scalar(_) => None,
			ValueRef::Vector(v) => Some(*v),
		}
	}

	pub fn to_value(&self) -> Value {
		match self {
			ValueRef::Scalar(s) => s.to_value(),
			ValueRef::Vector(v) => v.to_value(),
		}
	}
}

/// One terminal value, borrowed from the read buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarRef<'a> {
	Void,
	Bool(bool),
	Int(i64),
	Float(f64),
	GeoPoint(GeoPoint),
	Text(&'a [u8]),
}

impl ScalarRef<'_> {
	pub fn to_value(&self) -> Value {
		match self {
			ScalarRef::Void => Value::Void,
			ScalarRef::Bool(b) => Value::Bool(*b),
			ScalarRef::Int(i) => Value::Int(*i),
			ScalarRef::Float(f) => Value::Float(*f),
			ScalarRef::GeoPoint(p) => Value::GeoPoint(*p),
			ScalarRef::Text(t) => Value::Text(t.to_vec()),
		}
	}
}

/// One vector level of a read. Elements are nested vectors above the
/// innermost level and terminal values at it.
#[derive(Clone, Copy)]
pub struct VectorRef<'a> {
	scratch: &'a ScratchSet,
	level: usize,
	span: Span,
}

impl<'a> VectorRef<'a> {
	pub fn len(&self) -> usize {
		self.span.len as usize
	}

	pub fn is_empty(&self) -> bool {
		self.span.len == 0
	}

	pub fn is_innermost(&self) -> bool {
		self.level + 1 == self.scratch.levels.len()
	}

	pub fn get(&self, index: usize) -> Option<ValueRef<'a>> {
		if index >= self.len() {
			return None;
		}
		let at = self.span.start as usize + index;
		if self.is_innermost() {
			return Some(ValueRef::Scalar(scalar_at(self.scratch, at)));
		}
		let span = *self.scratch.levels.get(self.level + 1)?.get(at)?;
		Some(ValueRef::Vector(VectorRef {
			scratch: self.scratch,
			level: self.level + 1,
			span,
		}))
	}

	pub fn iter(&self) -> impl Iterator<Item = ValueRef<'a>> + 'a {
		let this = *self;
		(0..self.len()).filter_map(move |i| this.get(i))
	}

	fn innermost<T>(&self, values: &'a [T]) -> Option<&'a [T]> {
		if self.is_innermost() {
			values.get(self.span.range())
		} else {
			None
		}
	}

	pub fn as_bools(&self) -> Option<&'a [bool]> {
		match &self.scratch.flat {
			FlatValues::Bool(v) => self.innermost(v),
			_ => None,
		}
	}

	pub fn as_ints(&self) -> Option<&'a [i64]> {
		match &self.scratch.flat {
			FlatValues::Int(v) => self.innermost(v),
			_ => None,
		}
	}

	pub fn as_floats(&self) -> Option<&'a [f64]> {
		match &self.scratch.flat {
			FlatValues::Float(v) => self.innermost(v),
			_ => None,
		}
	}

	pub fn as_geo_points(&self) -> Option<&'a [GeoPoint]> {
		match &self.scratch.flat {
			FlatValues::GeoPoint(v) => self.innermost(v),
			_ => None,
		}
	}

	/// Copies up to `out.len()` elements of an innermost vector and returns
	/// the full element count.
	pub fn copy_into<T: Element>(&self, out: &mut [T]) -> crate::Result<usize> {
		let Some(items) = T::slice(self) else {
			return err!(codec::type_mismatch(self.scratch.data_type, true, T::KIND));
		};
		let n = items.len().min(out.len());
		out[..n].copy_from_slice(&items[..n]);
		Ok(items.len())
	}

	pub fn to_value(&self) -> Value {
		if !self.is_innermost() {
			return Value::Nested(self.iter().map(|v| v.to_value()).collect());
		}
		let range = self.span.range();
		match &self.scratch.flat {
			FlatValues::Void(_) => Value::Nested(range.map(|_| Value::Void).collect()),
			FlatValues::Bool(v) => Value::BoolVector(v[range].to_vec()),
			FlatValues::Int(v) => Value::IntVector(v[range].to_vec()),
			FlatValues::Float(v) => Value::FloatVector(v[range].to_vec()),
			FlatValues::GeoPoint(v) => Value::GeoPointVector(v[range].to_vec()),
			FlatValues::Text {
				body,
				spans,
			} => Value::TextVector(spans[range].iter().map(|s| body[s.range()].to_vec()).collect()),
		}
	}
}

impl Debug for VectorRef<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

/// A fixed-size element type that reads can be copied into.
pub trait Element: Copy {
	const KIND: &'static str;

	fn from_scalar(scalar: ScalarRef<'_>) -> Option<Self>;

	fn slice<'a>(vector: &VectorRef<'a>) -> Option<&'a [Self]>;
}

impl Element for bool {
	const KIND: &'static str = "Bool";

	fn from_scalar(scalar: ScalarRef<'_>) -> Option<Self> {
		match scalar {
			ScalarRef::Bool(b) => Some(b),
			_ => None,
		}
	}

	fn slice<'a>(vector: &VectorRef<'a>) -> Option<&'a [Self]> {
		vector.as_bools()
	}
}

impl Element for i64 {
	const KIND: &'static str = "Int";

	fn from_scalar(scalar: ScalarRef<'_>) -> Option<Self> {
		match scalar {
			ScalarRef::Int(i) => Some(i),
			_ => None,
		}
	}

	fn slice<'a>(vector: &VectorRef<'a>) -> Option<&'a [Self]> {
		vector.as_ints()
	}
}

impl Element for f64 {
	const KIND: &'static str = "Float";

	fn from_scalar(scalar: ScalarRef<'_>) -> Option<Self> {
		match scalar {
			ScalarRef::Float(f) => Some(f),
			_ => None,
		}
	}

	fn slice<'a>(vector: &VectorRef<'a>) -> Option<&'a [Self]> {
		vector.as_floats()
	}
}

impl Element for GeoPoint {
	const KIND: &'static str = "GeoPoint";

	fn from_scalar(scalar: ScalarRef<'_>) -> Option<Self> {
		match scalar {
			ScalarRef::GeoPoint(p) => Some(p),
			_ => None,
		}
	}

	fn slice<'a>(vector: &VectorRef<'a>) -> Option<&'a [Self]> {
		vector.as_geo_points()
	}
}
