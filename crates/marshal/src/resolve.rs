// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_engine::{ColumnKind, Context, Header, ObjectHandle, ObjectKind};
use tessera_type::{
	DataType, ObjectId,
	error::diagnostic::argument,
	return_error,
};
use tracing::instrument;

use crate::MarshalConfig;

/// The resolved shape of a table key, a table value or a column.
#[derive(Debug, Clone)]
pub struct FieldType {
	/// Terminal scalar kind, never a table reference.
	pub data_type: DataType,
	/// Number of vector levels; zero for scalars.
	pub dimension: usize,
	/// The table the field references, if it is a reference.
	pub referenced_table: Option<ObjectHandle>,
}

impl FieldType {
	pub fn scalar(data_type: DataType) -> Self {
		Self {
			data_type,
			dimension: 0,
			referenced_table: None,
		}
	}

	pub fn is_vector(&self) -> bool {
		self.dimension > 0
	}

	pub fn is_reference(&self) -> bool {
		self.referenced_table.is_some()
	}
}

impl PartialEq for FieldType {
	fn eq(&self, other: &Self) -> bool {
		self.data_type == other.data_type
			&& self.dimension == other.dimension
			&& self.referenced_table.as_ref().map(ObjectHandle::id)
				== other.referenced_table.as_ref().map(ObjectHandle::id)
	}
}

/// Follows `id` through table keys until a builtin type is reached.
/// Returns the builtin type and the first table passed through.
fn resolve_domain(
	ctx: &Context,
	mut id: ObjectId,
	config: &MarshalConfig,
) -> crate::Result<(DataType, Option<ObjectHandle>)> {
	let mut first: Option<ObjectHandle> = None;
	let mut depth = 0;

	loop {
		if let Some(data_type) = DataType::from_id(id) {
			return Ok((data_type, first));
		}

		depth += 1;
		if depth > config.max_key_chain {
			let name = first.as_ref().map(|t| t.name().to_string()).unwrap_or_else(|| id.to_string());
			return_error!(argument::key_chain_too_deep(&name, config.max_key_chain));
		}

		let table = ObjectHandle::open(ctx, id)?;
		let Some(kind) = table.table_kind() else {
			return_error!(argument::not_a_table(table.name()));
		};
		if !kind.is_keyed() {
			// references into key-less tables hold bare row ids
			return Ok((DataType::UInt32, Some(first.unwrap_or(table))));
		}

		id = table.header().domain;
		first.get_or_insert(table);
	}
}

/// Resolves the key type of `table`. Key-less tables resolve to `Void`.
#[instrument(name = "marshal::resolve::key_type", level = "trace", skip(table, config), fields(table = %table.name()))]
pub fn resolve_key_type(table: &ObjectHandle, config: &MarshalConfig) -> crate::Result<FieldType> {
	let Some(kind) = table.table_kind() else {
		return_error!(argument::not_a_table(table.name()));
	};
	if !kind.is_keyed() {
		return Ok(FieldType::scalar(DataType::Void));
	}

	let (data_type, referenced_table) = resolve_domain(table.context(), table.header().domain, config)?;
	Ok(FieldType {
		data_type,
		dimension: 0,
		referenced_table,
	})
}

/// Resolves the value type of a table or a data column.
#[instrument(name = "marshal::resolve::value_type", level = "trace", skip(object, config), fields(object = %object.name()))]
pub fn resolve_value_type(object: &ObjectHandle, config: &MarshalConfig) -> crate::Result<FieldType> {
	let Header {
		kind,
		range,
		..
	} = object.header().clone();

	let dimension = match kind {
		ObjectKind::Table(_) | ObjectKind::Column(ColumnKind::FixSize) | ObjectKind::Column(ColumnKind::VarSize) => 0,
		ObjectKind::Column(ColumnKind::Vector) => 1,
		ObjectKind::Type => return_error!(argument::not_a_table_or_column(object.name())),
	};

	resolve_range(object.context(), range, dimension, config)
}

/// Resolves a declared range: a builtin type as is, a table to that table's
/// key type.
pub(crate) fn resolve_range(
	ctx: &Context,
	range: ObjectId,
	dimension: usize,
	config: &MarshalConfig,
) -> crate::Result<FieldType> {
	if let Some(data_type) = DataType::from_id(range) {
		return Ok(FieldType {
			data_type,
			dimension,
			referenced_table: None,
		});
	}

	let table = ObjectHandle::open(ctx, range)?;
	let key = resolve_key_type(&table, config)?;
	let data_type = if key.data_type == DataType::Void {
		DataType::UInt32
	} else {
		key.data_type
	};

	Ok(FieldType {
		data_type,
		dimension,
		referenced_table: Some(table),
	})
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use tessera_engine::{ColumnSpec, Context, MemoryEngine, ObjectHandle, TableKind, TableSpec};
	use tessera_type::{DataType, ErrorKind, ObjectId};

	use super::*;

	fn engine() -> (Rc<MemoryEngine>, Context) {
		let engine = Rc::new(MemoryEngine::default());
		let ctx: Context = engine.clone();
		(engine, ctx)
	}

	fn table(ctx: &Context, name: &str, kind: TableKind, key: ObjectId, value: ObjectId) -> ObjectId {
		ctx.create_table(&TableSpec {
			name: name.to_string(),
			kind,
			key_type: key,
			value_type: value,
		})
		.unwrap()
	}

	fn column(ctx: &Context, table: ObjectId, name: &str, vector: bool, value: ObjectId) -> ObjectId {
		ctx.create_column(
			table,
			&ColumnSpec {
				name: name.to_string(),
				vector,
				value_type: value,
			},
		)
		.unwrap()
	}

	mod key_type {
		use super::*;

		#[test]
		fn test_builtin() {
			let (_engine, ctx) = engine();
			table(&ctx, "Users", TableKind::Hash, DataType::ShortText.id(), DataType::Void.id());
			let users = ObjectHandle::open_table(&ctx, "Users").unwrap();
			let ty = resolve_key_type(&users, &MarshalConfig::default()).unwrap();
			assert_eq!(ty, FieldType::scalar(DataType::ShortText));
		}

		#[test]
		fn test_keyless_is_void() {
			let (_engine, ctx) = engine();
			table(&ctx, "Log", TableKind::Array, DataType::Void.id(), DataType::Void.id());
			let log = ObjectHandle::open_table(&ctx, "Log").unwrap();
			assert_eq!(resolve_key_type(&log, &MarshalConfig::default()).unwrap().data_type, DataType::Void);
		}

		#[test]
		fn test_through_reference() {
			let (_engine, ctx) = engine();
			let people = table(&ctx, "People", TableKind::Hash, DataType::Int32.id(), DataType::Void.id());
			table(&ctx, "Staff", TableKind::Patricia, people, DataType::Void.id());
			let staff = ObjectHandle::open_table(&ctx, "Staff").unwrap();
			let ty = resolve_key_type(&staff, &MarshalConfig::default()).unwrap();
			assert_eq!(ty.data_type, DataType::Int32);
			assert_eq!(ty.referenced_table.unwrap().name(), "People");
		}

		#[test]
		fn test_chain_limit() {
			let (_engine, ctx) = engine();
			let a = table(&ctx, "A", TableKind::Hash, DataType::Int32.id(), DataType::Void.id());
			let b = table(&ctx, "B", TableKind::Hash, a, DataType::Void.id());
			table(&ctx, "C", TableKind::Hash, b, DataType::Void.id());
			let c = ObjectHandle::open_table(&ctx, "C").unwrap();

			let err = resolve_key_type(&c, &MarshalConfig::default().max_key_chain(1)).unwrap_err();
			assert_eq!(err.kind(), ErrorKind::InvalidArgument);
			assert!(resolve_key_type(&c, &MarshalConfig::default().max_key_chain(2)).is_ok());
		}

		#[test]
		fn test_column_rejected() {
			let (_engine, ctx) = engine();
			let users = table(&ctx, "Users", TableKind::Hash, DataType::ShortText.id(), DataType::Void.id());
			column(&ctx, users, "age", false, DataType::Int32.id());
			let age = ObjectHandle::open_by_name(&ctx, "Users.age").unwrap();
			let err = resolve_key_type(&age, &MarshalConfig::default()).unwrap_err();
			assert_eq!(err.kind(), ErrorKind::InvalidArgument);
		}
	}

	mod value_type {
		use super::*;

		#[test]
		fn test_scalar_column() {
			let (_engine, ctx) = engine();
			let users = table(&ctx, "Users", TableKind::Hash, DataType::ShortText.id(), DataType::Float.id());
			column(&ctx, users, "age", false, DataType::UInt8.id());
			let age = ObjectHandle::open_by_name(&ctx, "Users.age").unwrap();
			assert_eq!(resolve_value_type(&age, &MarshalConfig::default()).unwrap(), FieldType::scalar(DataType::UInt8));

			let table = ObjectHandle::open_table(&ctx, "Users").unwrap();
			assert_eq!(resolve_value_type(&table, &MarshalConfig::default()).unwrap(), FieldType::scalar(DataType::Float));
		}

		#[test]
		fn test_vector_column() {
			let (_engine, ctx) = engine();
			let users = table(&ctx, "Users", TableKind::Hash, DataType::ShortText.id(), DataType::Void.id());
			column(&ctx, users, "scores", true, DataType::Int16.id());
			let scores = ObjectHandle::open_by_name(&ctx, "Users.scores").unwrap();
			let ty = resolve_value_type(&scores, &MarshalConfig::default()).unwrap();
			assert_eq!(ty.data_type, DataType::Int16);
			assert_eq!(ty.dimension, 1);
			assert!(ty.is_vector());
		}

		#[test]
		fn test_reference_resolves_key() {
			let (_engine, ctx) = engine();
			let countries = table(&ctx, "Countries", TableKind::Hash, DataType::Int32.id(), DataType::Void.id());
			let users = table(&ctx, "Users", TableKind::Hash, DataType::ShortText.id(), DataType::Void.id());
			column(&ctx, users, "country", false, countries);
			let country = ObjectHandle::open_by_name(&ctx, "Users.country").unwrap();
			let ty = resolve_value_type(&country, &MarshalConfig::default()).unwrap();
			assert_eq!(ty.data_type, DataType::Int32);
			assert!(ty.is_reference());
			assert_eq!(ty.referenced_table.unwrap().id(), countries);
		}

		#[test]
		fn test_reference_to_keyless_is_row_id() {
			let (_engine, ctx) = engine();
			let log = table(&ctx, "Log", TableKind::Array, DataType::Void.id(), DataType::Void.id());
			let users = table(&ctx, "Users", TableKind::Hash, DataType::ShortText.id(), DataType::Void.id());
			column(&ctx, users, "events", true, log);
			let events = ObjectHandle::open_by_name(&ctx, "Users.events").unwrap();
			let ty = resolve_value_type(&events, &MarshalConfig::default()).unwrap();
			assert_eq!(ty.data_type, DataType::UInt32);
			assert_eq!(ty.dimension, 1);
		}

		#[test]
		fn test_builtin_type_rejected() {
			let (_engine, ctx) = engine();
			let int32 = ObjectHandle::open(&ctx, DataType::Int32.id()).unwrap();
			let err = resolve_value_type(&int32, &MarshalConfig::default()).unwrap_err();
			assert_eq!(err.kind(), ErrorKind::InvalidArgument);
		}

		#[test]
		fn test_releases_transient_handles() {
			let (engine, ctx) = engine();
			let countries = table(&ctx, "Countries", TableKind::Hash, DataType::Int32.id(), DataType::Void.id());
			let users = table(&ctx, "Users", TableKind::Hash, DataType::ShortText.id(), DataType::Void.id());
			column(&ctx, users, "country", false, countries);
			let country = ObjectHandle::open_by_name(&ctx, "Users.country").unwrap();
			let ty = resolve_value_type(&country, &MarshalConfig::default()).unwrap();
			assert_eq!(engine.ref_count(countries), 1);
			drop(ty);
			assert_eq!(engine.ref_count(countries), 0);
		}
	}
}
