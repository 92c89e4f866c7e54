// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_engine::{AccessorKind, ObjectHandle, Target};
use tessera_type::{
	DataType, ObjectId, RowId, Value,
	error::diagnostic::argument,
	return_error,
};
use tracing::{debug, instrument, warn};

use crate::{
	Column, ColumnOptions, MarshalConfig, codec,
	insert::{RowInsertion, add_row},
	resolve::{FieldType, resolve_key_type, resolve_value_type},
	source::open_field_path,
};

/// An opened table with its resolved key and value types.
#[derive(Debug, Clone)]
pub struct Table {
	handle: ObjectHandle,
	key_type: FieldType,
	value_type: FieldType,
	config: MarshalConfig,
}

impl Table {
	pub(crate) fn open(handle: ObjectHandle, config: MarshalConfig) -> crate::Result<Self> {
		let key_type = resolve_key_type(&handle, &config)?;
		let value_type = resolve_value_type(&handle, &config)?;
		debug!(
			table = %handle.name(),
			key_type = %key_type.data_type,
			value_type = %value_type.data_type,
			"opened table"
		);
		Ok(Self {
			handle,
			key_type,
			value_type,
			config,
		})
	}

	pub fn name(&self) -> &str {
		self.handle.name()
	}

	pub fn id(&self) -> ObjectId {
		self.handle.id()
	}

	pub fn handle(&self) -> &ObjectHandle {
		&self.handle
	}

	pub fn key_type(&self) -> &FieldType {
		&self.key_type
	}

	pub fn value_type(&self) -> &FieldType {
		&self.value_type
	}

	/// Finds the row with `key`, adding it when absent.
	pub fn insert(&self, key: impl Into<Value>) -> crate::Result<RowInsertion> {
		add_row(&self.handle, self.key_type.data_type, &key.into())
	}

	pub fn exists(&self, row: RowId) -> crate::Result<bool> {
		Ok(self.handle.context().exists(self.id(), row)?)
	}

	pub fn open_column(&self, path: &str) -> crate::Result<Column> {
		Column::open(&self.handle, path, &self.config)
	}

	/// Resolves the shape of `path` without allocating read buffers.
	pub fn resolve_field(&self, path: &str) -> crate::Result<FieldType> {
		Ok(open_field_path(&self.handle, path, &self.config)?.field_type())
	}

	#[instrument(name = "marshal::table::create_column", level = "debug", skip(self, options), fields(table = %self.name(), column = %options.name))]
	pub fn create_column(&self, options: &ColumnOptions) -> crate::Result<Column> {
		let ctx = self.handle.context();
		let spec = options.to_spec(ctx, self.id(), self.name())?;
		ctx.create_column(self.id(), &spec)?;
		self.open_column(&options.name)
	}

	/// Writes through a transient column handle.
	pub fn set_value(&self, path: &str, row: RowId, value: impl Into<Value>) -> crate::Result<()> {
		self.open_column(path)?.set(row, &value.into())
	}

	/// Reads through a transient column handle.
	pub fn get_value(&self, path: &str, row: RowId) -> crate::Result<Value> {
		self.open_column(path)?.get_value(row)
	}

	/// Stores a reference to the row of the referenced table identified by
	/// `key`, adding that row when absent. Vector columns take a vector of
	/// keys. References into key-less tables take existing row ids.
	#[instrument(name = "marshal::table::set_reference", level = "debug", skip(self, key), fields(table = %self.name()))]
	pub fn set_reference(&self, column: &str, row: RowId, key: &Value) -> crate::Result<()> {
		let ctx = self.handle.context();
		let Some(source) = ctx.column(self.id(), column)? else {
			return_error!(argument::unknown_field(column, column, self.name()));
		};
		let writable = matches!(
			source.target,
			Target::Column(_)
				| Target::Accessor {
					kind: AccessorKind::Value,
					..
				}
		);
		if !writable {
			return_error!(argument::read_only_field(column));
		}
		if DataType::from_id(source.range).is_some() {
			return_error!(argument::not_a_reference(column, column));
		}

		let referenced = ObjectHandle::open(ctx, source.range)?;
		let key_type = match resolve_key_type(&referenced, &self.config)?.data_type {
			DataType::Void => DataType::UInt32,
			data_type => data_type,
		};
		let bulk = codec::encode(key_type, source.vector, key)?;

		if !self.exists(row)? {
			return_error!(argument::row_not_found(self.name(), row));
		}
		if let Err(e) = ctx.set_value(source.target, row, &bulk) {
			warn!(column, row = %row, error = %e, "engine write failed");
			return Err(e.into());
		}
		Ok(())
	}
}
