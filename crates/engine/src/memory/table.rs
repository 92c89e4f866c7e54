// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use indexmap::IndexMap;
use tessera_type::{ObjectId, RowId};

use crate::TableKind;

pub(crate) struct TableStore {
	pub(crate) name: String,
	pub(crate) kind: TableKind,
	pub(crate) key_type: ObjectId,
	pub(crate) value_type: ObjectId,
	pub(crate) key_stride: Option<usize>,
	pub(crate) value_stride: usize,
	pub(crate) columns: IndexMap<String, ObjectId>,
	keys: HashMap<Vec<u8>, RowId>,
	row_keys: Vec<Vec<u8>>,
	values: Vec<u8>,
}

impl TableStore {
	pub(crate) fn new(
		name: String,
		kind: TableKind,
		key_type: ObjectId,
		value_type: ObjectId,
		key_stride: Option<usize>,
		value_stride: usize,
		initial_rows: usize,
	) -> Self {
		Self {
			name,
			kind,
			key_type,
			value_type,
			key_stride,
			value_stride,
			columns: IndexMap::new(),
			keys: HashMap::with_capacity(if kind.is_keyed() {
				initial_rows
			} else {
				0
			}),
			row_keys: Vec::with_capacity(initial_rows),
			values: Vec::with_capacity(initial_rows * value_stride),
		}
	}

	pub(crate) fn rows(&self) -> usize {
		self.row_keys.len()
	}

	pub(crate) fn exists(&self, row: RowId) -> bool {
		!row.is_nil() && row.index() <= self.rows()
	}

	/// Finds `key` or appends a new row for it. Key-less tables always append.
	pub(crate) fn add(&mut self, key: &[u8]) -> (RowId, bool) {
		if self.kind.is_keyed() {
			if let Some(row) = self.keys.get(key) {
				return (*row, false);
			}
		}

		let row = RowId(self.row_keys.len() as u32 + 1);
		if self.kind.is_keyed() {
			self.keys.insert(key.to_vec(), row);
			self.row_keys.push(key.to_vec());
		} else {
			self.row_keys.push(Vec::new());
		}
		self.values.resize(self.values.len() + self.value_stride, 0);
		(row, true)
	}

	pub(crate) fn key(&self, row: RowId) -> Option<&[u8]> {
		if !self.exists(row) {
			return None;
		}
		self.row_keys.get(row.index() - 1).map(|k| k.as_slice())
	}

	pub(crate) fn value(&self, row: RowId) -> Option<&[u8]> {
		if !self.exists(row) {
			return None;
		}
		let start = (row.index() - 1) * self.value_stride;
		self.values.get(start..start + self.value_stride)
	}

	pub(crate) fn set_value(&mut self, row: RowId, bytes: &[u8]) -> bool {
		if !self.exists(row) || bytes.len() != self.value_stride {
			return false;
		}
		let start = (row.index() - 1) * self.value_stride;
		self.values[start..start + self.value_stride].copy_from_slice(bytes);
		true
	}
}

#[cfg(test)]
mod tests {
	use tessera_type::DataType;

	use super::*;

	fn keyed() -> TableStore {
		TableStore::new(
			"Users".to_string(),
			TableKind::Hash,
			DataType::ShortText.id(),
			DataType::Int32.id(),
			None,
			4,
			0,
		)
	}

	#[test]
	fn test_add_or_find() {
		let mut table = keyed();
		assert_eq!(table.add(b"alice"), (RowId(1), true));
		assert_eq!(table.add(b"bob"), (RowId(2), true));
		assert_eq!(table.add(b"alice"), (RowId(1), false));
		assert_eq!(table.rows(), 2);
		assert_eq!(table.key(RowId(2)), Some(&b"bob"[..]));
	}

	#[test]
	fn test_array_always_appends() {
		let mut table = TableStore::new(
			"Log".to_string(),
			TableKind::Array,
			DataType::Void.id(),
			DataType::Void.id(),
			Some(0),
			0,
			4,
		);
		assert_eq!(table.add(&[]), (RowId(1), true));
		assert_eq!(table.add(&[]), (RowId(2), true));
	}

	#[test]
	fn test_value_slot() {
		let mut table = keyed();
		let (row, _) = table.add(b"alice");
		assert_eq!(table.value(row), Some(&[0u8, 0, 0, 0][..]));
		assert!(table.set_value(row, &7i32.to_le_bytes()));
		assert_eq!(table.value(row), Some(&7i32.to_le_bytes()[..]));
		assert!(!table.set_value(RowId(5), &7i32.to_le_bytes()));
		assert!(!table.set_value(row, &[1, 2]));
	}

	#[test]
	fn test_nil_row_does_not_exist() {
		let table = keyed();
		assert!(!table.exists(RowId::NIL));
		assert_eq!(table.key(RowId::NIL), None);
	}
}
