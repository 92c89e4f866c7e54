// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_engine::ObjectHandle;
use tessera_type::{
	DataType, RowId, Value, err,
	error::diagnostic::{codec, object},
	return_error,
};
use tracing::{instrument, trace, warn};

use crate::{MarshalConfig, codec::encode, resolve::resolve_key_type};

/// Outcome of an insert-or-find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowInsertion {
	pub id: RowId,
	/// `false` when the key already existed and `id` is the existing row.
	pub inserted: bool,
}

/// Finds the row of `table` with `key`, adding it when absent.
///
/// `key_type` must be the resolved key type of `table`; key-less tables take
/// [`DataType::Void`] with [`Value::Void`] and always add a row. The key type
/// and the key are validated before the engine is touched.
pub fn insert(table: &ObjectHandle, key_type: DataType, key: &Value) -> crate::Result<RowInsertion> {
	let resolved = resolve_key_type(table, &MarshalConfig::default())?.data_type;
	if resolved != key_type {
		return err!(codec::type_mismatch(resolved, false, key_type.name()));
	}
	add_row(table, key_type, key)
}

/// [`insert`] for callers that already hold the resolved key type.
#[instrument(name = "marshal::insert", level = "debug", skip(table, key), fields(table = %table.name()))]
pub(crate) fn add_row(table: &ObjectHandle, key_type: DataType, key: &Value) -> crate::Result<RowInsertion> {
	let bulk = encode(key_type, false, key)?;

	let (id, inserted) = match table.context().add(table.id(), &bulk) {
		Ok(result) => result,
		Err(e) => {
			warn!(error = %e, "add failed");
			return Err(e.into());
		}
	};
	if id.is_nil() {
		return_error!(object::insert_failed(table.name()));
	}

	trace!(row = %id, inserted, "insert");
	Ok(RowInsertion {
		id,
		inserted,
	})
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use tessera_engine::{Context, Engine, MemoryEngine, ObjectHandle, TableKind, TableSpec};
	use tessera_type::{DataType, ErrorKind, ObjectId, Value};

	use super::*;

	fn table(kind: TableKind, key: ObjectId) -> (Rc<MemoryEngine>, ObjectHandle) {
		let engine = Rc::new(MemoryEngine::default());
		let ctx: Context = engine.clone();
		ctx.create_table(&TableSpec {
			name: "Things".to_string(),
			kind,
			key_type: key,
			value_type: DataType::Void.id(),
		})
		.unwrap();
		let handle = ObjectHandle::open_table(&ctx, "Things").unwrap();
		(engine, handle)
	}

	mod insert {
		use super::*;

		#[test]
		fn test_idempotent() {
			let (_engine, things) = table(TableKind::Hash, DataType::Int32.id());
			let first = insert(&things, DataType::Int32, &Value::Int(7)).unwrap();
			assert!(first.inserted);
			let again = insert(&things, DataType::Int32, &Value::Int(7)).unwrap();
			assert!(!again.inserted);
			assert_eq!(first.id, again.id);
		}

		#[test]
		fn test_distinct_keys() {
			let (_engine, things) = table(TableKind::Patricia, DataType::ShortText.id());
			let a = insert(&things, DataType::ShortText, &Value::text("a")).unwrap();
			let b = insert(&things, DataType::ShortText, &Value::text("b")).unwrap();
			assert_ne!(a.id, b.id);
		}

		#[test]
		fn test_keyless_appends() {
			let (_engine, things) = table(TableKind::Array, DataType::Void.id());
			let a = insert(&things, DataType::Void, &Value::Void).unwrap();
			let b = insert(&things, DataType::Void, &Value::Void).unwrap();
			assert!(a.inserted && b.inserted);
			assert_ne!(a.id, b.id);
		}

		#[test]
		fn test_wrong_tag() {
			let (engine, things) = table(TableKind::Hash, DataType::Int32.id());
			let err = insert(&things, DataType::Int32, &Value::text("7")).unwrap_err();
			assert_eq!(err.kind(), ErrorKind::InvalidArgument);
			assert!(!engine.exists(things.id(), tessera_type::RowId(1)).unwrap());
		}

		#[test]
		fn test_out_of_range() {
			let (_engine, things) = table(TableKind::Hash, DataType::Int8.id());
			let err = insert(&things, DataType::Int8, &Value::Int(128)).unwrap_err();
			assert_eq!(err.kind(), ErrorKind::InvalidArgument);
		}

		#[test]
		fn test_key_type_must_match_table() {
			let (engine, things) = table(TableKind::Hash, DataType::UInt32.id());
			let err = insert(&things, DataType::Int8, &Value::Int(5)).unwrap_err();
			assert_eq!(err.kind(), ErrorKind::InvalidArgument);
			assert_eq!(err.code, "CODEC_001");
			let err = insert(&things, DataType::ShortText, &Value::text("abcd")).unwrap_err();
			assert_eq!(err.kind(), ErrorKind::InvalidArgument);
			assert!(!engine.exists(things.id(), tessera_type::RowId(1)).unwrap());
		}

		#[test]
		fn test_keyless_rejects_key() {
			let (_engine, things) = table(TableKind::Array, DataType::Void.id());
			assert!(insert(&things, DataType::Void, &Value::Int(1)).is_err());
		}
	}
}
