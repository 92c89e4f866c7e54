// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_engine::ObjectHandle;
use tessera_type::{
	DataType, RowId, Value, err,
	error::diagnostic::{argument, codec},
	return_error,
};
use tracing::{debug, instrument, warn};

use crate::{
	MarshalConfig,
	codec::encode,
	fetch::{Element, Fetched, ScalarRef, ValueRef, fan_out},
	resolve::FieldType,
	scratch::ScratchSet,
	source::{SourceChain, open_field_path},
};

/// An opened field path together with the buffers its reads go through.
///
/// A column is used from one thread at a time; each read reuses the buffers
/// of the previous one, so the view returned by [`Column::get`] borrows the
/// column until it is dropped.
#[derive(Debug)]
pub struct Column {
	chain: SourceChain,
	scratch: ScratchSet,
}

impl Column {
	pub(crate) fn open(table: &ObjectHandle, path: &str, config: &MarshalConfig) -> crate::Result<Self> {
		let chain = open_field_path(table, path, config)?;
		let scratch = ScratchSet::new(&chain, config);
		debug!(
			table = %table.name(),
			path,
			data_type = %chain.data_type(),
			dimension = chain.dimension(),
			writable = chain.is_writable(),
			"opened column"
		);
		Ok(Self {
			chain,
			scratch,
		})
	}

	pub fn path(&self) -> &str {
		self.chain.path()
	}

	pub fn chain(&self) -> &SourceChain {
		&self.chain
	}

	pub fn data_type(&self) -> DataType {
		self.chain.data_type()
	}

	pub fn dimension(&self) -> usize {
		self.chain.dimension()
	}

	pub fn is_writable(&self) -> bool {
		self.chain.is_writable()
	}

	pub fn field_type(&self) -> FieldType {
		self.chain.field_type()
	}

	/// Generation of the most recent read, zero before the first.
	pub fn generation(&self) -> u64 {
		self.scratch.generation
	}

	/// Validates `value` in full and stores it at `row`.
	#[instrument(name = "marshal::column::set", level = "debug", skip(self, value), fields(path = %self.path()))]
	pub fn set(&self, row: RowId, value: &Value) -> crate::Result<()> {
		if !self.chain.is_writable() {
			return_error!(argument::read_only_field(self.path()));
		}

		let hop = self.chain.terminal();
		let bulk = encode(self.chain.data_type(), hop.is_vector(), value)?;

		let root = self.chain.root();
		let ctx = root.context();
		if !ctx.exists(root.id(), row)? {
			return_error!(argument::row_not_found(root.name(), row));
		}

		if let Err(e) = ctx.set_value(hop.target(), row, &bulk) {
			warn!(row = %row, error = %e, "engine write failed");
			return Err(e.into());
		}
		Ok(())
	}

	/// Reads the value at `row`. The view stays valid until the next read.
	pub fn get(&mut self, row: RowId) -> crate::Result<Fetched<'_>> {
		fan_out(&self.chain, &mut self.scratch, row)
	}

	/// Reads the value at `row` into an owned [`Value`]. Nested vectors become
	/// [`Value::Nested`].
	pub fn get_value(&mut self, row: RowId) -> crate::Result<Value> {
		Ok(self.get(row)?.to_value())
	}

	/// Copies up to `out.len()` elements of the value at `row` into `out` and
	/// returns the actual element count. A scalar counts as one element.
	pub fn get_into<T: Element>(&mut self, row: RowId, out: &mut [T]) -> crate::Result<usize> {
		if self.dimension() > 1 {
			return_error!(argument::dimension_mismatch(self.path(), 1, self.dimension()));
		}
		let data_type = self.data_type();

		let fetched = self.get(row)?;
		match fetched.root() {
			ValueRef::Scalar(scalar) => {
				let Some(value) = T::from_scalar(scalar) else {
					return err!(codec::type_mismatch(data_type, false, T::KIND));
				};
				if let Some(slot) = out.first_mut() {
					*slot = value;
				}
				Ok(1)
			}
			ValueRef::Vector(vector) => vector.copy_into(out),
		}
	}

	/// Copies up to `out.len()` bytes of the text at `row` into `out` and
	/// returns the full byte length.
	pub fn get_text_into(&mut self, row: RowId, out: &mut [u8]) -> crate::Result<usize> {
		let data_type = self.data_type();
		let vector = self.dimension() > 0;

		let fetched = self.get(row)?;
		let Some(ScalarRef::Text(text)) = fetched.root().as_scalar() else {
			return err!(codec::type_mismatch(data_type, vector, "Text"));
		};
		let n = text.len().min(out.len());
		out[..n].copy_from_slice(&text[..n]);
		Ok(text.len())
	}
}
