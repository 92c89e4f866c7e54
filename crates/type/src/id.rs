// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Identifier of an engine object. Builtin data types occupy the low ids, user
/// tables and columns are numbered from [`ObjectId::FIRST_USER`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
	pub const FIRST_USER: ObjectId = ObjectId(256);

	pub fn is_builtin(&self) -> bool {
		self.0 < Self::FIRST_USER.0
	}
}

impl Display for ObjectId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.0)
	}
}

impl From<u32> for ObjectId {
	fn from(value: u32) -> Self {
		ObjectId(value)
	}
}

/// Opaque 32-bit handle into a table's row space. Row ids start at 1;
/// [`RowId::NIL`] signals a missing row or a failed insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(pub u32);

impl RowId {
	pub const NIL: RowId = RowId(0);

	pub fn is_nil(&self) -> bool {
		self.0 == 0
	}

	pub fn index(&self) -> usize {
		self.0 as usize
	}
}

impl Display for RowId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

impl From<u32> for RowId {
	fn from(value: u32) -> Self {
		RowId(value)
	}
}
