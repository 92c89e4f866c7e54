// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{cell::RefCell, collections::HashMap};

use indexmap::IndexMap;
use tessera_type::{DataType, ObjectId, RowId};
use tracing::{debug, instrument, trace};

use crate::{
	AccessorKind, Bulk, ColumnKind, ColumnSpec, Engine, EngineError, EngineResult, Header, ObjectKind, Source,
	TableKind, TableSpec, Target,
};

mod column;
mod table;

use column::{Cell, ColumnStore};
use table::TableStore;

#[derive(Debug, Clone)]
pub struct MemoryEngineConfig {
	/// Rows preallocated for each new table.
	pub initial_rows: usize,
}

impl Default for MemoryEngineConfig {
	fn default() -> Self {
		Self {
			initial_rows: 0,
		}
	}
}

impl MemoryEngineConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn initial_rows(mut self, rows: usize) -> Self {
		self.initial_rows = rows;
		self
	}
}

enum Object {
	Table(TableStore),
	Column(ColumnStore),
}

struct State {
	objects: IndexMap<ObjectId, Object>,
	names: IndexMap<String, ObjectId>,
	refs: HashMap<ObjectId, usize>,
	next_id: u32,
}

/// An [`Engine`] keeping every table and column in process memory.
pub struct MemoryEngine {
	config: MemoryEngineConfig,
	state: RefCell<State>,
}

impl Default for MemoryEngine {
	fn default() -> Self {
		Self::new(MemoryEngineConfig::default())
	}
}

impl MemoryEngine {
	pub fn new(config: MemoryEngineConfig) -> Self {
		Self {
			config,
			state: RefCell::new(State {
				objects: IndexMap::new(),
				names: IndexMap::new(),
				refs: HashMap::new(),
				next_id: ObjectId::FIRST_USER.0,
			}),
		}
	}

	/// Outstanding references taken through [`Engine::link`].
	pub fn ref_count(&self, id: ObjectId) -> usize {
		self.state.borrow().refs.get(&id).copied().unwrap_or(0)
	}

	pub fn table_names(&self) -> Vec<String> {
		let state = self.state.borrow();
		state.objects
			.values()
			.filter_map(|o| match o {
				Object::Table(t) => Some(t.name.clone()),
				Object::Column(_) => None,
			})
			.collect()
	}
}

fn slot_stride(range: ObjectId) -> Option<usize> {
	match DataType::from_id(range) {
		Some(ty) => ty.fixed_size(),
		None => Some(4),
	}
}

fn validate_name(name: &str) -> EngineResult<()> {
	let reason = if name.is_empty() {
		Some("name is empty")
	} else if name.starts_with('_') {
		Some("names starting with `_` are reserved")
	} else if name.contains('.') {
		Some("name contains `.`")
	} else if name.parse::<DataType>().is_ok() {
		Some("name is a builtin type")
	} else {
		None
	};

	match reason {
		Some(reason) => Err(EngineError::InvalidName {
			name: name.to_string(),
			reason,
		}),
		None => Ok(()),
	}
}

fn decode_ids(target: &str, value: &Bulk) -> EngineResult<Vec<RowId>> {
	if value.len() % 4 != 0 {
		return Err(EngineError::MalformedValue {
			target: target.to_string(),
			reason: format!("{} bytes is not a whole number of row ids", value.len()),
		});
	}
	Ok((0..value.len() / 4).filter_map(|i| value.u32_at(i)).map(RowId).collect())
}

impl State {
	fn table(&self, id: ObjectId) -> EngineResult<&TableStore> {
		match self.objects.get(&id) {
			Some(Object::Table(table)) => Ok(table),
			Some(Object::Column(column)) => Err(EngineError::NotATable {
				name: column.full_name.clone(),
			}),
			None => Err(EngineError::NoSuchObject(id)),
		}
	}

	fn table_mut(&mut self, id: ObjectId) -> EngineResult<&mut TableStore> {
		match self.objects.get_mut(&id) {
			Some(Object::Table(table)) => Ok(table),
			Some(Object::Column(column)) => Err(EngineError::NotATable {
				name: column.full_name.clone(),
			}),
			None => Err(EngineError::NoSuchObject(id)),
		}
	}

	fn column(&self, id: ObjectId) -> EngineResult<&ColumnStore> {
		match self.objects.get(&id) {
			Some(Object::Column(column)) => Ok(column),
			_ => Err(EngineError::NoSuchObject(id)),
		}
	}

	fn column_mut(&mut self, id: ObjectId) -> EngineResult<&mut ColumnStore> {
		match self.objects.get_mut(&id) {
			Some(Object::Column(column)) => Ok(column),
			_ => Err(EngineError::NoSuchObject(id)),
		}
	}

	fn require_row(&self, table: ObjectId, row: RowId) -> EngineResult<()> {
		let store = self.table(table)?;
		if store.exists(row) {
			Ok(())
		} else {
			Err(EngineError::NoSuchRow {
				table: store.name.clone(),
				row,
			})
		}
	}

	/// Converts `value` into row ids of `table`. Values already in the
	/// table's domain are taken as ids; keys are found or added, following
	/// key references into deeper tables.
	fn cast_to_ids(&mut self, table_id: ObjectId, value: &Bulk) -> EngineResult<Vec<RowId>> {
		let (name, kind, key_type, key_stride) = {
			let table = self.table(table_id)?;
			(table.name.clone(), table.kind, table.key_type, table.key_stride)
		};

		let takes_ids =
			value.domain() == table_id || (!kind.is_keyed() && value.domain() == DataType::UInt32.id());
		if takes_ids {
			let ids = decode_ids(&name, value)?;
			for id in &ids {
				self.require_row(table_id, *id)?;
			}
			return Ok(ids);
		}

		if !kind.is_keyed() {
			return Err(EngineError::DomainMismatch {
				target: name,
				expected: table_id,
				actual: value.domain(),
			});
		}

		let keys: Vec<Vec<u8>> = match DataType::from_id(key_type) {
			Some(_) => {
				if value.domain() != key_type {
					return Err(EngineError::DomainMismatch {
						target: name,
						expected: key_type,
						actual: value.domain(),
					});
				}
				match (value.is_vector(), key_stride) {
					(false, _) => vec![value.as_bytes().to_vec()],
					(true, Some(stride)) if stride > 0 => {
						value.as_bytes().chunks(stride).map(|c| c.to_vec()).collect()
					}
					(true, _) => {
						(0..value.section_count())
							.filter_map(|i| value.section(i))
							.map(|s| s.to_vec())
							.collect()
					}
				}
			}
			None => self
				.cast_to_ids(key_type, value)?
				.into_iter()
				.map(|id| id.0.to_le_bytes().to_vec())
				.collect(),
		};

		let table = self.table_mut(table_id)?;
		let mut ids = Vec::with_capacity(keys.len());
		for key in keys {
			let (id, inserted) = table.add(&key);
			if inserted {
				trace!(table = %table.name, row = %id, "added referenced row");
			}
			ids.push(id);
		}
		Ok(ids)
	}

	/// Checks `value` against a slot declared as `range` and produces the
	/// stored cell.
	fn coerce(&mut self, target: &str, range: ObjectId, vector: bool, value: &Bulk) -> EngineResult<Cell> {
		if value.is_vector() != vector {
			return Err(EngineError::MalformedValue {
				target: target.to_string(),
				reason: if vector {
					"expected a vector".to_string()
				} else {
					"expected a scalar".to_string()
				},
			});
		}

		match DataType::from_id(range) {
			Some(ty) => {
				if value.domain() != range {
					return Err(EngineError::DomainMismatch {
						target: target.to_string(),
						expected: range,
						actual: value.domain(),
					});
				}
				if let Some(stride) = ty.fixed_size() {
					let whole = if vector {
						stride > 0 && value.len() % stride == 0
					} else {
						value.len() == stride
					};
					if !whole {
						return Err(EngineError::MalformedValue {
							target: target.to_string(),
							reason: format!("{} bytes do not match {}", value.len(), ty),
						});
					}
				}
				Ok(Cell::from_bulk(value))
			}
			None => {
				let ids = self.cast_to_ids(range, value)?;
				if !vector && ids.len() != 1 {
					return Err(EngineError::MalformedValue {
						target: target.to_string(),
						reason: format!("expected one reference, got {}", ids.len()),
					});
				}
				Ok(Cell::from_ids(&ids))
			}
		}
	}

	fn key_bytes(&mut self, table_id: ObjectId, key: &Bulk) -> EngineResult<Vec<u8>> {
		let table = self.table(table_id)?;
		let name = table.name.clone();
		let key_type = table.key_type;

		if !table.kind.is_keyed() {
			if key.domain() != DataType::Void.id() || !key.is_empty() {
				return Err(EngineError::DomainMismatch {
					target: name,
					expected: DataType::Void.id(),
					actual: key.domain(),
				});
			}
			return Ok(Vec::new());
		}

		if key.is_vector() {
			return Err(EngineError::MalformedValue {
				target: name,
				reason: "keys are scalars".to_string(),
			});
		}

		match DataType::from_id(key_type) {
			Some(ty) => {
				if key.domain() != key_type {
					return Err(EngineError::DomainMismatch {
						target: name,
						expected: key_type,
						actual: key.domain(),
					});
				}
				let fits = match ty.fixed_size() {
					Some(stride) => key.len() == stride,
					None => key.len() <= DataType::MAX_SHORT_TEXT,
				};
				if !fits {
					return Err(EngineError::MalformedValue {
						target: name,
						reason: format!("{} bytes is not a valid {} key", key.len(), ty),
					});
				}
				Ok(key.as_bytes().to_vec())
			}
			None => {
				let ids = self.cast_to_ids(key_type, key)?;
				match ids.as_slice() {
					[id] => Ok(id.0.to_le_bytes().to_vec()),
					_ => Err(EngineError::MalformedValue {
						target: name,
						reason: format!("expected one key reference, got {}", ids.len()),
					}),
				}
			}
		}
	}

	fn check_key_type(&self, kind: TableKind, key_type: ObjectId) -> EngineResult<()> {
		let unsupported = || EngineError::UnsupportedType {
			usage: "table key",
			type_id: key_type,
		};

		if !kind.is_keyed() {
			return if key_type == DataType::Void.id() {
				Ok(())
			} else {
				Err(EngineError::UnsupportedType {
					usage: "key of a key-less table",
					type_id: key_type,
				})
			};
		}

		match DataType::from_id(key_type) {
			Some(DataType::ShortText) => Ok(()),
			Some(_) if kind == TableKind::DoubleArray => Err(unsupported()),
			Some(DataType::Void) | Some(DataType::Text) | Some(DataType::LongText) => Err(unsupported()),
			Some(_) => Ok(()),
			None if key_type.is_builtin() => Err(unsupported()),
			None if kind == TableKind::DoubleArray => Err(unsupported()),
			None => {
				self.table(key_type)?;
				Ok(())
			}
		}
	}

	fn check_value_type(&self, usage: &'static str, value_type: ObjectId, allow_void: bool, allow_text: bool) -> EngineResult<()> {
		let unsupported = || EngineError::UnsupportedType {
			usage,
			type_id: value_type,
		};
		match DataType::from_id(value_type) {
			Some(DataType::Void) if allow_void => Ok(()),
			Some(DataType::Void) => Err(unsupported()),
			Some(ty) if ty.is_text() && !allow_text => Err(unsupported()),
			Some(_) => Ok(()),
			None if value_type.is_builtin() => Err(unsupported()),
			None => {
				self.table(value_type)?;
				Ok(())
			}
		}
	}

	fn allocate_id(&mut self) -> ObjectId {
		let id = ObjectId(self.next_id);
		self.next_id += 1;
		id
	}
}

impl Engine for MemoryEngine {
	fn lookup(&self, name: &str) -> EngineResult<Option<ObjectId>> {
		if let Ok(ty) = name.parse::<DataType>() {
			return Ok(Some(ty.id()));
		}
		Ok(self.state.borrow().names.get(name).copied())
	}

	fn header(&self, id: ObjectId) -> EngineResult<Option<Header>> {
		if DataType::from_id(id).is_some() {
			return Ok(Some(Header {
				id,
				kind: ObjectKind::Type,
				domain: DataType::Void.id(),
				range: DataType::Void.id(),
			}));
		}

		let state = self.state.borrow();
		Ok(state.objects.get(&id).map(|object| match object {
			Object::Table(table) => Header {
				id,
				kind: ObjectKind::Table(table.kind),
				domain: table.key_type,
				range: table.value_type,
			},
			Object::Column(column) => Header {
				id,
				kind: ObjectKind::Column(column.kind),
				domain: column.table,
				range: column.range,
			},
		}))
	}

	fn name(&self, id: ObjectId) -> EngineResult<Option<String>> {
		if let Some(ty) = DataType::from_id(id) {
			return Ok(Some(ty.name().to_string()));
		}
		let state = self.state.borrow();
		Ok(state.objects.get(&id).map(|object| match object {
			Object::Table(table) => table.name.clone(),
			Object::Column(column) => column.full_name.clone(),
		}))
	}

	fn column(&self, table: ObjectId, name: &str) -> EngineResult<Option<Source>> {
		let state = self.state.borrow();
		let store = state.table(table)?;

		if let Some(kind) = AccessorKind::from_name(name) {
			let range = match kind {
				AccessorKind::Key if !store.kind.is_keyed() => return Ok(None),
				AccessorKind::Key => store.key_type,
				AccessorKind::Value if store.value_type == DataType::Void.id() => return Ok(None),
				AccessorKind::Value => store.value_type,
				AccessorKind::Id => DataType::UInt32.id(),
			};
			return Ok(Some(Source {
				target: Target::Accessor {
					table,
					kind,
				},
				table,
				range,
				vector: false,
			}));
		}

		let Some(id) = store.columns.get(name).copied() else {
			return Ok(None);
		};
		let column = state.column(id)?;
		Ok(Some(Source {
			target: Target::Column(id),
			table,
			range: column.range,
			vector: column.is_vector(),
		}))
	}

	fn exists(&self, table: ObjectId, row: RowId) -> EngineResult<bool> {
		Ok(self.state.borrow().table(table)?.exists(row))
	}

	#[instrument(name = "engine::memory::add", level = "trace", skip(self, key))]
	fn add(&self, table: ObjectId, key: &Bulk) -> EngineResult<(RowId, bool)> {
		let mut state = self.state.borrow_mut();
		let bytes = state.key_bytes(table, key)?;
		let store = state.table_mut(table)?;
		let (row, inserted) = store.add(&bytes);
		trace!(table = %store.name, row = %row, inserted, "add");
		Ok((row, inserted))
	}

	fn set_value(&self, target: Target, row: RowId, value: &Bulk) -> EngineResult<()> {
		let mut state = self.state.borrow_mut();
		match target {
			Target::Column(id) => {
				let (table, range, vector, name) = {
					let column = state.column(id)?;
					(column.table, column.range, column.is_vector(), column.full_name.clone())
				};
				state.require_row(table, row)?;
				let cell = state.coerce(&name, range, vector, value)?;
				state.column_mut(id)?.set(row, cell);
				trace!(column = %name, row = %row, "set value");
				Ok(())
			}
			Target::Accessor {
				table,
				kind: AccessorKind::Value,
			} => {
				let (range, name) = {
					let store = state.table(table)?;
					(store.value_type, format!("{}._value", store.name))
				};
				if range == DataType::Void.id() {
					return Err(EngineError::ReadOnly {
						target: name,
					});
				}
				state.require_row(table, row)?;
				let cell = state.coerce(&name, range, false, value)?;
				if !state.table_mut(table)?.set_value(row, &cell.data) {
					return Err(EngineError::MalformedValue {
						target: name,
						reason: format!("{} bytes do not fit the value slot", cell.data.len()),
					});
				}
				Ok(())
			}
			Target::Accessor {
				table,
				kind,
			} => {
				let store = state.table(table)?;
				Err(EngineError::ReadOnly {
					target: format!("{}.{}", store.name, kind.name()),
				})
			}
		}
	}

	fn get_value(&self, target: Target, row: RowId, out: &mut Bulk) -> EngineResult<()> {
		let state = self.state.borrow();
		match target {
			Target::Column(id) => {
				let column = state.column(id)?;
				out.reset(column.range, column.is_vector());
				match column.get(row) {
					Some(cell) => out.set_raw(&cell.data, &cell.sections),
					None => {
						if let (false, Some(stride)) = (column.is_vector(), column.stride) {
							out.push_bytes(&vec![0u8; stride]);
						}
					}
				}
			}
			Target::Accessor {
				table,
				kind: AccessorKind::Key,
			} => {
				let store = state.table(table)?;
				out.reset(store.key_type, false);
				match store.key(row) {
					Some(key) => out.push_bytes(key),
					None => {
						if let Some(stride) = store.key_stride {
							out.push_bytes(&vec![0u8; stride]);
						}
					}
				}
			}
			Target::Accessor {
				table,
				kind: AccessorKind::Value,
			} => {
				let store = state.table(table)?;
				out.reset(store.value_type, false);
				match store.value(row) {
					Some(value) => out.push_bytes(value),
					None => out.push_bytes(&vec![0u8; store.value_stride]),
				}
			}
			Target::Accessor {
				table,
				kind: AccessorKind::Id,
			} => {
				let store = state.table(table)?;
				out.reset(DataType::UInt32.id(), false);
				out.push_u32(if store.exists(row) {
					row.0
				} else {
					RowId::NIL.0
				});
			}
		}
		Ok(())
	}

	#[instrument(name = "engine::memory::create_table", level = "debug", skip(self, spec), fields(name = %spec.name))]
	fn create_table(&self, spec: &TableSpec) -> EngineResult<ObjectId> {
		validate_name(&spec.name)?;
		let mut state = self.state.borrow_mut();
		if state.names.contains_key(&spec.name) {
			return Err(EngineError::AlreadyExists {
				name: spec.name.clone(),
			});
		}
		state.check_key_type(spec.kind, spec.key_type)?;
		state.check_value_type("table value", spec.value_type, true, false)?;

		let key_stride = if spec.kind.is_keyed() {
			slot_stride(spec.key_type)
		} else {
			Some(0)
		};
		let value_stride = slot_stride(spec.value_type).unwrap_or(0);

		let id = state.allocate_id();
		state.objects.insert(
			id,
			Object::Table(TableStore::new(
				spec.name.clone(),
				spec.kind,
				spec.key_type,
				spec.value_type,
				key_stride,
				value_stride,
				self.config.initial_rows,
			)),
		);
		state.names.insert(spec.name.clone(), id);
		debug!(name = %spec.name, id = %id, kind = ?spec.kind, "created table");
		Ok(id)
	}

	#[instrument(name = "engine::memory::create_column", level = "debug", skip(self, spec), fields(name = %spec.name))]
	fn create_column(&self, table: ObjectId, spec: &ColumnSpec) -> EngineResult<ObjectId> {
		validate_name(&spec.name)?;
		let mut state = self.state.borrow_mut();
		let table_name = {
			let store = state.table(table)?;
			if store.columns.contains_key(&spec.name) {
				return Err(EngineError::AlreadyExists {
					name: format!("{}.{}", store.name, spec.name),
				});
			}
			store.name.clone()
		};
		state.check_value_type("column value", spec.value_type, false, true)?;

		let kind = if spec.vector {
			ColumnKind::Vector
		} else if DataType::from_id(spec.value_type).is_some_and(|ty| ty.is_text()) {
			ColumnKind::VarSize
		} else {
			ColumnKind::FixSize
		};

		let full_name = format!("{}.{}", table_name, spec.name);
		let id = state.allocate_id();
		state.objects.insert(
			id,
			Object::Column(ColumnStore::new(
				full_name.clone(),
				table,
				kind,
				spec.value_type,
				slot_stride(spec.value_type),
			)),
		);
		state.names.insert(full_name.clone(), id);
		state.table_mut(table)?.columns.insert(spec.name.clone(), id);
		debug!(name = %full_name, id = %id, kind = ?kind, "created column");
		Ok(id)
	}

	fn link(&self, id: ObjectId) {
		if id.is_builtin() {
			return;
		}
		*self.state.borrow_mut().refs.entry(id).or_insert(0) += 1;
	}

	fn unlink(&self, id: ObjectId) {
		if id.is_builtin() {
			return;
		}
		let mut state = self.state.borrow_mut();
		if let Some(count) = state.refs.get_mut(&id) {
			*count = count.saturating_sub(1);
			if *count == 0 {
				state.refs.remove(&id);
			}
		}
	}
}
