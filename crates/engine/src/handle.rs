// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Debug, Formatter};

use tessera_type::{
	ObjectId,
	error::diagnostic::{argument, object},
	return_error,
};

use crate::{Context, Header, TableKind};

/// A counted reference to an engine table or column. The reference is taken
/// when the handle is opened or cloned and released on drop.
pub struct ObjectHandle {
	ctx: Context,
	header: Header,
	name: String,
}

impl ObjectHandle {
	/// Opens the object with `id`. An id the engine cannot resolve without
	/// reporting an error is an unknown error.
	pub fn open(ctx: &Context, id: ObjectId) -> crate::Result<Self> {
		let Some(header) = ctx.header(id)? else {
			return_error!(object::object_vanished(id));
		};
		let name = ctx.name(id)?.unwrap_or_else(|| id.to_string());
		ctx.link(id);
		Ok(Self {
			ctx: ctx.clone(),
			header,
			name,
		})
	}

	pub fn open_by_name(ctx: &Context, name: &str) -> crate::Result<Self> {
		let Some(id) = ctx.lookup(name)? else {
			return_error!(object::object_not_found(name));
		};
		Self::open(ctx, id)
	}

	pub fn open_table(ctx: &Context, name: &str) -> crate::Result<Self> {
		let handle = Self::open_by_name(ctx, name)?;
		if !handle.is_table() {
			return_error!(argument::not_a_table(name));
		}
		Ok(handle)
	}

	pub fn id(&self) -> ObjectId {
		self.header.id
	}

	pub fn header(&self) -> &Header {
		&self.header
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn context(&self) -> &Context {
		&self.ctx
	}

	pub fn is_table(&self) -> bool {
		self.header.is_table()
	}

	pub fn table_kind(&self) -> Option<TableKind> {
		self.header.table_kind()
	}
}

impl Clone for ObjectHandle {
	fn clone(&self) -> Self {
		self.ctx.link(self.header.id);
		Self {
			ctx: self.ctx.clone(),
			header: self.header.clone(),
			name: self.name.clone(),
		}
	}
}

impl Drop for ObjectHandle {
	fn drop(&mut self) {
		self.ctx.unlink(self.header.id);
	}
}

impl Debug for ObjectHandle {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ObjectHandle").field("name", &self.name).field("header", &self.header).finish()
	}
}

impl PartialEq for ObjectHandle {
	fn eq(&self, other: &Self) -> bool {
		self.header.id == other.header.id
	}
}
