// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::Range;

use smallvec::SmallVec;
use tessera_engine::Bulk;
use tessera_type::{DataType, GeoPoint, RowId, Value, err, error::diagnostic::codec, return_internal_error};

use crate::{
	MarshalConfig,
	codec::{decode_scalar, widen},
	source::SourceChain,
};

/// A run of consecutive entries in the next level down, or in the flat
/// terminal values at the innermost level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
	pub start: u32,
	pub len: u32,
}

impl Span {
	pub fn range(&self) -> Range<usize> {
		let start = self.start as usize;
		start..start + self.len as usize
	}
}

/// Terminal values of one read, widened to their host representation.
#[derive(Debug)]
pub(crate) enum FlatValues {
	Void(usize),
	Bool(Vec<bool>),
	Int(Vec<i64>),
	Float(Vec<f64>),
	GeoPoint(Vec<GeoPoint>),
	Text {
		body: Vec<u8>,
		spans: Vec<Span>,
	},
}

impl FlatValues {
	fn for_type(data_type: DataType, capacity: usize, text_capacity: usize) -> Self {
		match data_type {
			DataType::Void => FlatValues::Void(0),
			DataType::Bool => FlatValues::Bool(Vec::with_capacity(capacity)),
			DataType::Float => FlatValues::Float(Vec::with_capacity(capacity)),
			ty if ty.is_geo_point() => FlatValues::GeoPoint(Vec::with_capacity(capacity)),
			ty if ty.is_text() => FlatValues::Text {
				body: Vec::with_capacity(text_capacity),
				spans: Vec::with_capacity(capacity),
			},
			_ => FlatValues::Int(Vec::with_capacity(capacity)),
		}
	}

	fn clear(&mut self) {
		match self {
			FlatValues::Void(n) => *n = 0,
			FlatValues::Bool(v) => v.clear(),
			FlatValues::Int(v) => v.clear(),
			FlatValues::Float(v) => v.clear(),
			FlatValues::GeoPoint(v) => v.clear(),
			FlatValues::Text {
				body,
				spans,
			} => {
				body.clear();
				spans.clear();
			}
		}
	}

	pub(crate) fn len(&self) -> usize {
		match self {
			FlatValues::Void(n) => *n,
			FlatValues::Bool(v) => v.len(),
			FlatValues::Int(v) => v.len(),
			FlatValues::Float(v) => v.len(),
			FlatValues::GeoPoint(v) => v.len(),
			FlatValues::Text {
				spans,
				..
			} => spans.len(),
		}
	}

	/// Makes room for `elements` more values and `bytes` more text.
	fn reserve(&mut self, elements: usize, bytes: usize) -> crate::Result<()> {
		match self {
			FlatValues::Void(_) => {}
			FlatValues::Bool(v) => v.try_reserve(elements)?,
			FlatValues::Int(v) => v.try_reserve(elements)?,
			FlatValues::Float(v) => v.try_reserve(elements)?,
			FlatValues::GeoPoint(v) => v.try_reserve(elements)?,
			FlatValues::Text {
				body,
				spans,
			} => {
				body.try_reserve(bytes)?;
				spans.try_reserve(elements)?;
			}
		}
		Ok(())
	}

	fn push(&mut self, data_type: DataType, bytes: &[u8]) -> crate::Result<()> {
		if let FlatValues::Text {
			body,
			spans,
		} = self
		{
			spans.push(Span {
				start: body.len() as u32,
				len: bytes.len() as u32,
			});
			body.extend_from_slice(bytes);
			return Ok(());
		}

		match (self, widen(decode_scalar(data_type, bytes)?)?) {
			(FlatValues::Void(n), Value::Void) => *n += 1,
			(FlatValues::Bool(v), Value::Bool(b)) => v.push(b),
			(FlatValues::Int(v), Value::Int(i)) => v.push(i),
			(FlatValues::Float(v), Value::Float(f)) => v.push(f),
			(FlatValues::GeoPoint(v), Value::GeoPoint(p)) => v.push(p),
			(_, value) => return_internal_error!("staged {} values cannot hold {}", data_type, value.kind_name()),
		}
		Ok(())
	}

	/// Appends every element of `bulk`, returning how many were appended.
	pub(crate) fn append(&mut self, data_type: DataType, bulk: &Bulk) -> crate::Result<usize> {
		if !bulk.is_vector() {
			self.reserve(1, bulk.len())?;
			self.push(data_type, bulk.as_bytes())?;
			return Ok(1);
		}

		match data_type.fixed_size() {
			Some(stride) if stride > 0 => {
				let count = bulk.len() / stride;
				if count * stride != bulk.len() {
					return err!(codec::malformed_value(data_type, bulk.len()));
				}
				self.reserve(count, 0)?;
				for chunk in bulk.as_bytes().chunks_exact(stride) {
					self.push(data_type, chunk)?;
				}
				Ok(count)
			}
			Some(_) => Ok(0),
			None => {
				let count = bulk.section_count();
				self.reserve(count, bulk.len())?;
				for index in 0..count {
					let bytes = bulk.section(index).unwrap_or_default();
					self.push(data_type, bytes)?;
				}
				Ok(count)
			}
		}
	}
}

/// Reusable buffers of one opened column.
///
/// `ids[h]` holds the input row ids of hop `h`, `bounds[h]` the per-input
/// boundaries a vector hop produced, and `levels` one span list per vector
/// hop. Everything is rewound, not released, at the start of each read.
#[derive(Debug)]
pub(crate) struct ScratchSet {
	pub(crate) generation: u64,
	pub(crate) data_type: DataType,
	pub(crate) bulk: Bulk,
	pub(crate) ids: SmallVec<[Vec<RowId>; 4]>,
	pub(crate) bounds: SmallVec<[Vec<u32>; 4]>,
	pub(crate) levels: SmallVec<[Vec<Span>; 4]>,
	pub(crate) flat: FlatValues,
}

impl ScratchSet {
	pub(crate) fn new(chain: &SourceChain, config: &MarshalConfig) -> Self {
		let capacity = config.scratch_capacity;
		let hops = chain.hops().len();
		let data_type = chain.data_type();

		Self {
			generation: 0,
			data_type,
			bulk: Bulk::with_capacity(data_type.id(), chain.dimension() > 0, capacity * 8),
			ids: (0..hops).map(|_| Vec::with_capacity(capacity)).collect(),
			bounds: chain
				.hops()
				.iter()
				.map(|h| if h.is_vector() { Vec::with_capacity(capacity + 1) } else { Vec::new() })
				.collect(),
			levels: (0..chain.dimension()).map(|_| Vec::with_capacity(capacity)).collect(),
			flat: FlatValues::for_type(data_type, capacity, config.text_capacity),
		}
	}

	/// Clears every buffer and starts a new generation.
	pub(crate) fn rewind(&mut self) {
		self.generation += 1;
		self.bulk.rewind();
		self.ids.iter_mut().for_each(Vec::clear);
		self.bounds.iter_mut().for_each(Vec::clear);
		self.levels.iter_mut().for_each(Vec::clear);
		self.flat.clear();
	}

	/// Rewrites the recorded boundaries into span levels, outermost first.
	pub(crate) fn fill(&mut self) -> crate::Result<()> {
		let mut level = 0;
		for bounds in self.bounds.iter().filter(|b| !b.is_empty()) {
			let Some(spans) = self.levels.get_mut(level) else {
				return_internal_error!("vector level {} has no span buffer", level);
			};
			spans.try_reserve(bounds.len().saturating_sub(1))?;
			spans.extend(bounds.windows(2).map(|w| Span {
				start: w[0],
				len: w[1] - w[0],
			}));
			level += 1;
		}
		Ok(())
	}
}
