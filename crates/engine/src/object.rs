// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::{DataType, ObjectId};

/// Key organisation of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
	/// Key-less; rows are addressed by id only.
	Array,
	Hash,
	Patricia,
	/// Double-array trie, text keys only.
	DoubleArray,
}

impl TableKind {
	pub fn is_keyed(&self) -> bool {
		!matches!(self, TableKind::Array)
	}
}

/// Storage layout of a data column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
	FixSize,
	VarSize,
	Vector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
	Key,
	Value,
	Id,
}

impl AccessorKind {
	pub fn name(&self) -> &'static str {
		match self {
			AccessorKind::Key => "_key",
			AccessorKind::Value => "_value",
			AccessorKind::Id => "_id",
		}
	}

	pub fn from_name(name: &str) -> Option<AccessorKind> {
		match name {
			"_key" => Some(AccessorKind::Key),
			"_value" => Some(AccessorKind::Value),
			"_id" => Some(AccessorKind::Id),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
	Type,
	Table(TableKind),
	Column(ColumnKind),
}

/// The declared shape of an engine object.
///
/// For tables `domain` is the key type and `range` the value type. For columns
/// `domain` is the owning table and `range` the value type. Either may name
/// another table, making the slot a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
	pub id: ObjectId,
	pub kind: ObjectKind,
	pub domain: ObjectId,
	pub range: ObjectId,
}

impl Header {
	pub fn is_table(&self) -> bool {
		matches!(self.kind, ObjectKind::Table(_))
	}

	pub fn is_column(&self) -> bool {
		matches!(self.kind, ObjectKind::Column(_))
	}

	pub fn table_kind(&self) -> Option<TableKind> {
		match self.kind {
			ObjectKind::Table(kind) => Some(kind),
			_ => None,
		}
	}

	pub fn column_kind(&self) -> Option<ColumnKind> {
		match self.kind {
			ObjectKind::Column(kind) => Some(kind),
			_ => None,
		}
	}
}

/// Where a value is read from or written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
	Column(ObjectId),
	Accessor {
		table: ObjectId,
		kind: AccessorKind,
	},
}

impl Target {
	/// The engine object backing this target: the column itself, or the
	/// table an accessor reads from.
	pub fn object(&self) -> ObjectId {
		match self {
			Target::Column(id) => *id,
			Target::Accessor {
				table,
				..
			} => *table,
		}
	}

	pub fn accessor(&self) -> Option<AccessorKind> {
		match self {
			Target::Column(_) => None,
			Target::Accessor {
				kind,
				..
			} => Some(*kind),
		}
	}
}

/// A resolved column or pseudo column of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
	pub target: Target,
	pub table: ObjectId,
	pub range: ObjectId,
	pub vector: bool,
}

impl Source {
	/// The builtin type of the values, `None` when the range names a table.
	pub fn data_type(&self) -> Option<DataType> {
		DataType::from_id(self.range)
	}
}
