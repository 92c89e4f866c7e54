// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_marshal::{Database, TableOptions, insert};
use tessera_testing::{ensure_table, library};
use tessera_type::{DataType, ErrorKind, RowId, Value};

#[test]
fn test_insert_is_idempotent() {
	let lib = library();
	let first = lib.author.insert("alice").unwrap();
	assert!(first.inserted);
	assert!(!first.id.is_nil());

	let again = lib.author.insert("alice").unwrap();
	assert!(!again.inserted);
	assert_eq!(again.id, first.id);
}

#[test]
fn test_insert_numeric_key() {
	let lib = library();
	let a = lib.book.insert(Value::Int(1)).unwrap();
	let b = lib.book.insert(Value::Int(2)).unwrap();
	assert_ne!(a.id, b.id);
	assert_eq!(lib.book.insert(Value::Int(1)).unwrap().id, a.id);
}

#[test]
fn test_keyless_always_inserts() {
	let lib = library();
	let a = lib.review.insert(Value::Void).unwrap();
	let b = lib.review.insert(Value::Void).unwrap();
	assert!(a.inserted && b.inserted);
	assert_ne!(a.id, b.id);
}

#[test]
fn test_rejects_before_touching_engine() {
	let lib = library();

	let err = lib.author.insert(Value::Int(5)).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidArgument);

	let err = lib.book.insert(Value::Int(-1)).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidArgument);

	let err = lib.author.insert(Value::Text(vec![b'a'; DataType::MAX_SHORT_TEXT + 1])).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidArgument);

	assert!(!lib.author.exists(RowId(1)).unwrap());
	assert!(!lib.book.exists(RowId(1)).unwrap());
}

#[test]
fn test_key_through_reference() {
	let db = Database::memory();
	let people = ensure_table(&db, TableOptions::hash("People", "Int32"));
	let staff = ensure_table(&db, TableOptions::patricia("Staff", "People"));
	assert_eq!(staff.key_type().data_type, DataType::Int32);

	let hired = staff.insert(Value::Int(42)).unwrap();
	assert!(hired.inserted);
	assert!(people.exists(RowId(1)).unwrap());
	assert_eq!(staff.get_value("_key", hired.id).unwrap(), Value::Int(42));
	assert!(!staff.insert(Value::Int(42)).unwrap().inserted);
}

#[test]
fn test_free_insert_checks_key_type() {
	let lib = library();
	let err = insert(lib.book.handle(), DataType::Int8, &Value::Int(5)).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidArgument);
	let err = insert(lib.book.handle(), DataType::ShortText, &Value::text("abcd")).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidArgument);
	assert!(!lib.book.exists(RowId(1)).unwrap());

	let row = insert(lib.book.handle(), DataType::UInt32, &Value::Int(5)).unwrap();
	assert!(row.inserted);
}
