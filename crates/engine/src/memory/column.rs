// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::{ObjectId, RowId};

use crate::{Bulk, ColumnKind, Section};

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Cell {
	pub(crate) data: Vec<u8>,
	pub(crate) sections: Vec<Section>,
}

impl Cell {
	pub(crate) fn from_bulk(bulk: &Bulk) -> Self {
		Self {
			data: bulk.as_bytes().to_vec(),
			sections: bulk.sections().to_vec(),
		}
	}

	pub(crate) fn from_ids(ids: &[RowId]) -> Self {
		let mut data = Vec::with_capacity(ids.len() * 4);
		for id in ids {
			data.extend_from_slice(&id.0.to_le_bytes());
		}
		Self {
			data,
			sections: Vec::new(),
		}
	}
}

pub(crate) struct ColumnStore {
	pub(crate) full_name: String,
	pub(crate) table: ObjectId,
	pub(crate) kind: ColumnKind,
	pub(crate) range: ObjectId,
	/// Stride of one element, `None` for text. References store 4-byte row ids.
	pub(crate) stride: Option<usize>,
	cells: Vec<Option<Cell>>,
}

impl ColumnStore {
	pub(crate) fn new(
		full_name: String,
		table: ObjectId,
		kind: ColumnKind,
		range: ObjectId,
		stride: Option<usize>,
	) -> Self {
		Self {
			full_name,
			table,
			kind,
			range,
			stride,
			cells: Vec::new(),
		}
	}

	pub(crate) fn is_vector(&self) -> bool {
		self.kind == ColumnKind::Vector
	}

	pub(crate) fn get(&self, row: RowId) -> Option<&Cell> {
		self.cells.get(row.index()).and_then(|c| c.as_ref())
	}

	pub(crate) fn set(&mut self, row: RowId, cell: Cell) {
		let index = row.index();
		if self.cells.len() <= index {
			self.cells.resize(index + 1, None);
		}
		self.cells[index] = Some(cell);
	}
}

#[cfg(test)]
mod tests {
	use tessera_type::DataType;

	use super::*;

	#[test]
	fn test_set_grows_sparse() {
		let mut column = ColumnStore::new(
			"Users.age".to_string(),
			ObjectId(256),
			ColumnKind::FixSize,
			DataType::Int32.id(),
			Some(4),
		);
		assert!(column.get(RowId(3)).is_none());
		column.set(
			RowId(3),
			Cell {
				data: 5i32.to_le_bytes().to_vec(),
				sections: vec![],
			},
		);
		assert!(column.get(RowId(1)).is_none());
		assert_eq!(column.get(RowId(3)).unwrap().data, 5i32.to_le_bytes().to_vec());
	}

	#[test]
	fn test_cell_from_ids() {
		let cell = Cell::from_ids(&[RowId(1), RowId(258)]);
		assert_eq!(cell.data, vec![1, 0, 0, 0, 2, 1, 0, 0]);
	}
}
