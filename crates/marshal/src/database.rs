// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::rc::Rc;

use tessera_engine::{Context, MemoryEngine, MemoryEngineConfig, ObjectHandle};
use tessera_type::{RowId, Value};
use tracing::{debug, instrument};

use crate::{Column, MarshalConfig, RowInsertion, Table, TableOptions};

/// Entry point: an engine session plus the configuration handed to every
/// table and column opened through it.
#[derive(Clone)]
pub struct Database {
	ctx: Context,
	config: MarshalConfig,
}

impl Database {
	/// An empty in-memory database with default configuration.
	pub fn memory() -> Self {
		Self::memory_with(MarshalConfig::default(), MemoryEngineConfig::default())
	}

	pub fn memory_with(config: MarshalConfig, engine: MemoryEngineConfig) -> Self {
		Self::with_engine(Rc::new(MemoryEngine::new(engine))).with_config(config)
	}

	/// Wraps an existing engine session.
	pub fn with_engine(ctx: Context) -> Self {
		debug!("opened database");
		Self {
			ctx,
			config: MarshalConfig::default(),
		}
	}

	pub fn with_config(mut self, config: MarshalConfig) -> Self {
		self.config = config;
		self
	}

	pub fn context(&self) -> &Context {
		&self.ctx
	}

	pub fn config(&self) -> &MarshalConfig {
		&self.config
	}

	/// Opens the table `name`: `NotFound` when absent, `InvalidArgument` when
	/// the name belongs to something else.
	pub fn open_table(&self, name: &str) -> crate::Result<Table> {
		let handle = ObjectHandle::open_table(&self.ctx, name)?;
		Table::open(handle, self.config.clone())
	}

	#[instrument(name = "marshal::database::create_table", level = "debug", skip(self, options), fields(name = %options.name))]
	pub fn create_table(&self, options: &TableOptions) -> crate::Result<Table> {
		let spec = options.to_spec(&self.ctx)?;
		let id = self.ctx.create_table(&spec)?;
		let handle = ObjectHandle::open(&self.ctx, id)?;
		Table::open(handle, self.config.clone())
	}

	/// Finds or adds the row with `key` in the table `table`.
	pub fn insert_row(&self, table: &str, key: impl Into<Value>) -> crate::Result<RowInsertion> {
		self.open_table(table)?.insert(key)
	}

	/// Opens the field `path` of the table `table`.
	pub fn find_column(&self, table: &str, path: &str) -> crate::Result<Column> {
		self.open_table(table)?.open_column(path)
	}

	pub fn set_value(&self, table: &str, path: &str, row: RowId, value: impl Into<Value>) -> crate::Result<()> {
		self.open_table(table)?.set_value(path, row, value)
	}

	pub fn get_value(&self, table: &str, path: &str, row: RowId) -> crate::Result<Value> {
		self.open_table(table)?.get_value(path, row)
	}
}

impl std::fmt::Debug for Database {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Database").field("config", &self.config).finish_non_exhaustive()
	}
}
