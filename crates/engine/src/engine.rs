// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::rc::Rc;

use tessera_type::{ObjectId, RowId};

use crate::{Bulk, EngineResult, Header, Source, TableKind, Target};

/// Shared handle to an engine session. Not `Send`: a session and every handle
/// derived from it belong to one thread.
pub type Context = Rc<dyn Engine>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
	pub name: String,
	pub kind: TableKind,
	pub key_type: ObjectId,
	pub value_type: ObjectId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
	pub name: String,
	pub vector: bool,
	pub value_type: ObjectId,
}

/// The primitives the marshalling layer needs from a document store.
///
/// Lookups return `Ok(None)` when an object is absent and the engine has no
/// more specific error to report.
pub trait Engine {
	/// Resolves a table name, or a `Table.column` name, to its id.
	fn lookup(&self, name: &str) -> EngineResult<Option<ObjectId>>;

	fn header(&self, id: ObjectId) -> EngineResult<Option<Header>>;

	fn name(&self, id: ObjectId) -> EngineResult<Option<String>>;

	/// Resolves a column or one of the `_key`, `_value`, `_id` pseudo columns
	/// of `table`.
	fn column(&self, table: ObjectId, name: &str) -> EngineResult<Option<Source>>;

	fn exists(&self, table: ObjectId, row: RowId) -> EngineResult<bool>;

	/// Finds the row with `key`, creating it when absent. Returns the row id
	/// and whether it was created.
	fn add(&self, table: ObjectId, key: &Bulk) -> EngineResult<(RowId, bool)>;

	fn set_value(&self, target: Target, row: RowId, value: &Bulk) -> EngineResult<()>;

	/// Reads into `out`, rewinding it first. Unset slots read as zero for
	/// fixed-size values and empty otherwise.
	fn get_value(&self, target: Target, row: RowId, out: &mut Bulk) -> EngineResult<()>;

	fn create_table(&self, spec: &TableSpec) -> EngineResult<ObjectId>;

	fn create_column(&self, table: ObjectId, spec: &ColumnSpec) -> EngineResult<ObjectId>;

	/// Increments the reference count of an object.
	fn link(&self, id: ObjectId);

	/// Decrements the reference count of an object.
	fn unlink(&self, id: ObjectId);
}
