// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use smallvec::SmallVec;
use tessera_engine::{AccessorKind, ObjectHandle, Source, Target};
use tessera_type::{
	DataType,
	error::diagnostic::argument,
	return_error, return_internal_error,
};
use tracing::{instrument, trace};

use crate::{MarshalConfig, resolve::FieldType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopKind {
	Column,
	Value,
	Key,
	Id,
}

impl HopKind {
	fn of(target: &Target) -> Self {
		match target.accessor() {
			None => HopKind::Column,
			Some(AccessorKind::Value) => HopKind::Value,
			Some(AccessorKind::Key) => HopKind::Key,
			Some(AccessorKind::Id) => HopKind::Id,
		}
	}
}

impl Display for HopKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			HopKind::Column => f.write_str("column"),
			HopKind::Value => f.write_str("_value"),
			HopKind::Key => f.write_str("_key"),
			HopKind::Id => f.write_str("_id"),
		}
	}
}

/// One resolved segment of a field path.
#[derive(Debug)]
pub struct Hop {
	name: String,
	kind: HopKind,
	source: Source,
	/// The table this hop reads from.
	owner: ObjectHandle,
	/// The column object, for ordinary column hops.
	column: Option<ObjectHandle>,
	/// The table the stored values reference.
	referenced: Option<ObjectHandle>,
	implicit: bool,
}

impl Hop {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn kind(&self) -> HopKind {
		self.kind
	}

	pub fn source(&self) -> &Source {
		&self.source
	}

	pub fn target(&self) -> Target {
		self.source.target
	}

	pub fn owner(&self) -> &ObjectHandle {
		&self.owner
	}

	pub fn column(&self) -> Option<&ObjectHandle> {
		self.column.as_ref()
	}

	pub fn referenced_table(&self) -> Option<&ObjectHandle> {
		self.referenced.as_ref()
	}

	pub fn is_vector(&self) -> bool {
		self.source.vector
	}

	pub fn is_reference(&self) -> bool {
		self.referenced.is_some()
	}

	/// Whether the hop was appended to read through a reference to its key.
	pub fn is_implicit(&self) -> bool {
		self.implicit
	}
}

/// The ordered hops of a dotted field path, starting at a root table.
///
/// Every non-terminal hop stores row ids of the next hop's owner. The
/// terminal hop stores values of [`SourceChain::data_type`], or bare row ids
/// when it references a key-less table.
#[derive(Debug)]
pub struct SourceChain {
	root: ObjectHandle,
	path: String,
	hops: SmallVec<[Hop; 4]>,
	dimension: usize,
	data_type: DataType,
	writable: bool,
}

impl SourceChain {
	pub fn root(&self) -> &ObjectHandle {
		&self.root
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn hops(&self) -> &[Hop] {
		&self.hops
	}

	pub fn terminal(&self) -> &Hop {
		// a chain always has at least one hop
		&self.hops[self.hops.len() - 1]
	}

	/// Number of vector hops along the chain.
	pub fn dimension(&self) -> usize {
		self.dimension
	}

	pub fn data_type(&self) -> DataType {
		self.data_type
	}

	/// Only a single plain column or `_value` hop can be written.
	pub fn is_writable(&self) -> bool {
		self.writable
	}

	/// Shape of the field as seen by a caller. The referenced table is the
	/// one referenced by the last hop named in the path.
	pub fn field_type(&self) -> FieldType {
		let referenced_table = self.hops.iter().rev().find(|h| !h.implicit).and_then(|h| h.referenced.clone());
		FieldType {
			data_type: self.data_type,
			dimension: self.dimension,
			referenced_table,
		}
	}
}

fn open_hop(owner: &ObjectHandle, name: &str, source: Source, implicit: bool) -> crate::Result<Hop> {
	let ctx = owner.context();
	let kind = HopKind::of(&source.target);

	let column = match source.target {
		Target::Column(id) => Some(ObjectHandle::open(ctx, id)?),
		Target::Accessor {
			..
		} => None,
	};

	let referenced = if DataType::from_id(source.range).is_some() {
		None
	} else {
		let table = ObjectHandle::open(ctx, source.range)?;
		if !table.is_table() {
			return_error!(argument::not_a_table(table.name()));
		}
		Some(table)
	};

	Ok(Hop {
		name: name.to_string(),
		kind,
		source,
		owner: owner.clone(),
		column,
		referenced,
		implicit,
	})
}

/// Resolves `path` against the table `root` into a [`SourceChain`].
///
/// Each `.`-separated token names a column or pseudo column of the current
/// owner; a token may only follow a hop that references a table. Once the
/// tokens are consumed, `_key` hops are appended for as long as the terminal
/// references a keyed table.
#[instrument(name = "marshal::source::open", level = "debug", skip(root, config), fields(root = %root.name()))]
pub fn open_field_path(root: &ObjectHandle, path: &str, config: &MarshalConfig) -> crate::Result<SourceChain> {
	if !root.is_table() {
		return_error!(argument::not_a_table(root.name()));
	}
	if path.is_empty() {
		return_error!(argument::empty_path());
	}

	let ctx = root.context();
	let mut hops: SmallVec<[Hop; 4]> = SmallVec::new();
	let mut owner = root.clone();

	for token in path.split('.') {
		if token.is_empty() {
			return_error!(argument::empty_path_segment(path));
		}
		if let Some(previous) = hops.last() {
			match previous.referenced.clone() {
				Some(next) => owner = next,
				None => return_error!(argument::not_a_reference(path, &previous.name)),
			}
		}

		let Some(source) = ctx.column(owner.id(), token)? else {
			return_error!(argument::unknown_field(path, token, owner.name()));
		};
		let hop = open_hop(&owner, token, source, false)?;
		trace!(token, kind = %hop.kind, vector = hop.is_vector(), reference = hop.is_reference(), "hop");
		hops.push(hop);
	}

	let mut appended = 0;
	while let Some(next) = hops.last().and_then(|h| h.referenced.clone()) {
		if !next.table_kind().is_some_and(|k| k.is_keyed()) {
			break;
		}
		appended += 1;
		if appended > config.max_key_chain {
			return_error!(argument::key_chain_too_deep(next.name(), config.max_key_chain));
		}

		let name = AccessorKind::Key.name();
		let Some(source) = ctx.column(next.id(), name)? else {
			return_error!(argument::unknown_field(path, name, next.name()));
		};
		let hop = open_hop(&next, name, source, true)?;
		trace!(table = %next.name(), "implicit key hop");
		hops.push(hop);
	}

	let Some(terminal) = hops.last() else {
		return_internal_error!("field path `{}` produced no hops", path);
	};
	let data_type = if terminal.is_reference() {
		DataType::UInt32
	} else {
		match terminal.source.data_type() {
			Some(data_type) => data_type,
			None => return_internal_error!("terminal hop of `{}` has no builtin type", path),
		}
	};

	let dimension = hops.iter().filter(|h| h.is_vector()).count();
	let writable = hops.len() == 1 && matches!(hops[0].kind, HopKind::Column | HopKind::Value);

	Ok(SourceChain {
		root: root.clone(),
		path: path.to_string(),
		hops,
		dimension,
		data_type,
		writable,
	})
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use tessera_engine::{ColumnSpec, Context, MemoryEngine, ObjectHandle, TableKind, TableSpec};
	use tessera_type::{DataType, ErrorKind, ObjectId};

	use super::*;

	struct Schema {
		engine: Rc<MemoryEngine>,
		ctx: Context,
		countries: ObjectId,
		users: ObjectId,
	}

	fn schema() -> Schema {
		let engine = Rc::new(MemoryEngine::default());
		let ctx: Context = engine.clone();
		let table = |name: &str, kind, key: ObjectId, value: ObjectId| {
			ctx.create_table(&TableSpec {
				name: name.to_string(),
				kind,
				key_type: key,
				value_type: value,
			})
			.unwrap()
		};
		let column = |table: ObjectId, name: &str, vector: bool, value: ObjectId| {
			ctx.create_column(
				table,
				&ColumnSpec {
					name: name.to_string(),
					vector,
					value_type: value,
				},
			)
			.unwrap()
		};

		let log = table("Log", TableKind::Array, DataType::Void.id(), DataType::Void.id());
		let countries = table("Countries", TableKind::Hash, DataType::ShortText.id(), DataType::Void.id());
		column(countries, "population", false, DataType::Int64.id());
		let users = table("Users", TableKind::Patricia, DataType::ShortText.id(), DataType::Int32.id());
		column(users, "age", false, DataType::UInt8.id());
		column(users, "country", false, countries);
		column(users, "visited", true, countries);
		column(users, "events", true, log);
		column(users, "tags", true, DataType::ShortText.id());
		column(users, "friends", true, users);

		Schema {
			engine,
			ctx,
			countries,
			users,
		}
	}

	fn open(schema: &Schema, path: &str) -> crate::Result<SourceChain> {
		let root = ObjectHandle::open_table(&schema.ctx, "Users")?;
		open_field_path(&root, path, &MarshalConfig::default())
	}

	mod open {
		use super::*;

		#[test]
		fn test_plain_column() {
			let schema = schema();
			let chain = open(&schema, "age").unwrap();
			assert_eq!(chain.hops().len(), 1);
			assert_eq!(chain.data_type(), DataType::UInt8);
			assert_eq!(chain.dimension(), 0);
			assert!(chain.is_writable());
			assert_eq!(chain.terminal().kind(), HopKind::Column);
		}

		#[test]
		fn test_value_accessor_writable() {
			let schema = schema();
			let chain = open(&schema, "_value").unwrap();
			assert_eq!(chain.data_type(), DataType::Int32);
			assert!(chain.is_writable());
		}

		#[test]
		fn test_key_and_id_read_only() {
			let schema = schema();
			assert!(!open(&schema, "_key").unwrap().is_writable());
			assert!(!open(&schema, "_id").unwrap().is_writable());
			assert_eq!(open(&schema, "_id").unwrap().data_type(), DataType::UInt32);
		}

		#[test]
		fn test_reference_appends_key() {
			let schema = schema();
			let chain = open(&schema, "country").unwrap();
			assert_eq!(chain.hops().len(), 2);
			assert!(chain.hops()[1].is_implicit());
			assert_eq!(chain.hops()[1].kind(), HopKind::Key);
			assert_eq!(chain.data_type(), DataType::ShortText);
			assert!(!chain.is_writable());

			let ty = chain.field_type();
			assert_eq!(ty.referenced_table.unwrap().id(), schema.countries);
		}

		#[test]
		fn test_dereference() {
			let schema = schema();
			let chain = open(&schema, "country.population").unwrap();
			assert_eq!(chain.hops().len(), 2);
			assert!(!chain.hops()[1].is_implicit());
			assert_eq!(chain.data_type(), DataType::Int64);
			assert!(!chain.is_writable());
			assert!(chain.field_type().referenced_table.is_none());
		}

		#[test]
		fn test_vector_dimensions() {
			let schema = schema();
			assert_eq!(open(&schema, "tags").unwrap().dimension(), 1);
			assert_eq!(open(&schema, "visited").unwrap().dimension(), 1);
			assert_eq!(open(&schema, "friends.visited").unwrap().dimension(), 2);
			assert_eq!(open(&schema, "friends.friends.tags").unwrap().dimension(), 3);
		}

		#[test]
		fn test_keyless_reference_is_row_id() {
			let schema = schema();
			let chain = open(&schema, "events").unwrap();
			assert_eq!(chain.hops().len(), 1);
			assert_eq!(chain.data_type(), DataType::UInt32);
			assert!(chain.is_writable());
		}

		#[test]
		fn test_handles_released_on_drop() {
			let schema = schema();
			let chain = open(&schema, "country.population").unwrap();
			assert!(schema.engine.ref_count(schema.countries) > 0);
			assert!(schema.engine.ref_count(schema.users) > 0);
			drop(chain);
			assert_eq!(schema.engine.ref_count(schema.countries), 0);
			assert_eq!(schema.engine.ref_count(schema.users), 0);
		}
	}

	mod errors {
		use super::*;

		fn kind(schema: &Schema, path: &str) -> ErrorKind {
			open(schema, path).unwrap_err().kind()
		}

		#[test]
		fn test_empty_path() {
			let schema = schema();
			assert_eq!(kind(&schema, ""), ErrorKind::InvalidArgument);
			assert_eq!(kind(&schema, "country."), ErrorKind::InvalidArgument);
			assert_eq!(kind(&schema, ".age"), ErrorKind::InvalidArgument);
		}

		#[test]
		fn test_unknown_field() {
			let schema = schema();
			let err = open(&schema, "country.nonexistent").unwrap_err();
			assert_eq!(err.kind(), ErrorKind::InvalidArgument);
			assert_eq!(err.code, "ARG_004");
		}

		#[test]
		fn test_token_after_scalar() {
			let schema = schema();
			let err = open(&schema, "age.years").unwrap_err();
			assert_eq!(err.code, "ARG_005");
		}

		#[test]
		fn test_key_on_keyless_table() {
			let schema = schema();
			assert_eq!(kind(&schema, "events._key"), ErrorKind::InvalidArgument);
		}

		#[test]
		fn test_value_on_void_table() {
			let schema = schema();
			assert_eq!(kind(&schema, "country._value"), ErrorKind::InvalidArgument);
		}
	}
}
