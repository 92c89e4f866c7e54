// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_engine::{ColumnSpec, Context, TableKind, TableSpec};
use tessera_type::{
	DataType, ObjectId,
	error::diagnostic::{argument, object},
	return_error,
};

const VECTOR_PREFIX: &str = "[]";

/// Description of a table to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
	pub name: String,
	pub kind: TableKind,
	/// Builtin type name or table name; must be absent for key-less tables.
	pub key_type: Option<String>,
	/// Builtin type name or table name; absent means `Void`.
	pub value_type: Option<String>,
}

impl TableOptions {
	pub fn array(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			kind: TableKind::Array,
			key_type: None,
			value_type: None,
		}
	}

	pub fn hash(name: impl Into<String>, key_type: impl Into<String>) -> Self {
		Self::keyed(name, TableKind::Hash, key_type)
	}

	pub fn patricia(name: impl Into<String>, key_type: impl Into<String>) -> Self {
		Self::keyed(name, TableKind::Patricia, key_type)
	}

	/// Double-array tries only take `ShortText` keys.
	pub fn double_array(name: impl Into<String>) -> Self {
		Self::keyed(name, TableKind::DoubleArray, DataType::ShortText.name())
	}

	fn keyed(name: impl Into<String>, kind: TableKind, key_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			kind,
			key_type: Some(key_type.into()),
			value_type: None,
		}
	}

	pub fn value_type(mut self, value_type: impl Into<String>) -> Self {
		self.value_type = Some(value_type.into());
		self
	}

	/// Checks the options against the existing schema and resolves the type
	/// names, before anything is created.
	pub(crate) fn to_spec(&self, ctx: &Context) -> crate::Result<TableSpec> {
		check_name("table", &self.name)?;
		if ctx.lookup(&self.name)?.is_some() {
			return_error!(object::already_exists("table", &self.name));
		}

		let key_type = match (self.kind.is_keyed(), &self.key_type) {
			(false, None) => DataType::Void.id(),
			(false, Some(name)) => return_error!(argument::unsupported_type("the key of a key-less table", name)),
			(true, None) => return_error!(argument::unsupported_type("a table key", "Void")),
			(true, Some(name)) => {
				let id = resolve_type_name(ctx, name)?;
				let allowed = match DataType::from_id(id) {
					Some(DataType::ShortText) => true,
					Some(_) if self.kind == TableKind::DoubleArray => false,
					Some(ty) => ty != DataType::Void && ty.fixed_size().is_some(),
					None => self.kind != TableKind::DoubleArray,
				};
				if !allowed {
					return_error!(argument::unsupported_type("a table key", name));
				}
				id
			}
		};

		let value_type = match &self.value_type {
			None => DataType::Void.id(),
			Some(name) => {
				let id = resolve_type_name(ctx, name)?;
				if DataType::from_id(id).is_some_and(|ty| ty.is_text()) {
					return_error!(argument::unsupported_type("a table value", name));
				}
				id
			}
		};

		Ok(TableSpec {
			name: self.name.clone(),
			kind: self.kind,
			key_type,
			value_type,
		})
	}
}

/// Description of a column to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOptions {
	pub name: String,
	pub vector: bool,
	/// Builtin type name or table name.
	pub value_type: String,
}

impl ColumnOptions {
	pub fn scalar(name: impl Into<String>, value_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			vector: false,
			value_type: value_type.into(),
		}
	}

	pub fn vector(name: impl Into<String>, value_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			vector: true,
			value_type: value_type.into(),
		}
	}

	/// Reads a type such as `Int32` or `[]Int32`, the prefix selecting a vector.
	pub fn parse(name: impl Into<String>, value_type: &str) -> Self {
		match value_type.strip_prefix(VECTOR_PREFIX) {
			Some(element) => Self::vector(name, element),
			None => Self::scalar(name, value_type),
		}
	}

	pub(crate) fn to_spec(&self, ctx: &Context, table: ObjectId, table_name: &str) -> crate::Result<ColumnSpec> {
		check_name("column", &self.name)?;
		let full_name = format!("{}.{}", table_name, self.name);
		if ctx.column(table, &self.name)?.is_some() {
			return_error!(object::already_exists("column", &full_name));
		}

		let value_type = resolve_type_name(ctx, &self.value_type)?;
		if value_type == DataType::Void.id() {
			return_error!(argument::unsupported_type("a column value", &self.value_type));
		}

		Ok(ColumnSpec {
			name: self.name.clone(),
			vector: self.vector,
			value_type,
		})
	}
}

fn check_name(what: &str, name: &str) -> crate::Result<()> {
	let reason = if name.is_empty() {
		"name is empty"
	} else if name.starts_with('_') {
		"names starting with `_` are reserved"
	} else if name.contains('.') {
		"name contains `.`"
	} else if name.parse::<DataType>().is_ok() {
		"name is a builtin type"
	} else {
		return Ok(());
	};
	return_error!(argument::invalid_name(what, name, reason))
}

/// Resolves a builtin type name, or the name of an existing table.
pub(crate) fn resolve_type_name(ctx: &Context, name: &str) -> crate::Result<ObjectId> {
	if let Ok(ty) = name.parse::<DataType>() {
		return Ok(ty.id());
	}
	let Some(id) = ctx.lookup(name)? else {
		return_error!(argument::unknown_type_name(name));
	};
	match ctx.header(id)? {
		Some(header) if header.is_table() => Ok(id),
		Some(_) => return_error!(argument::not_a_table(name)),
		None => return_error!(object::object_vanished(id)),
	}
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use tessera_engine::{Context, MemoryEngine, TableKind};
	use tessera_type::{DataType, ErrorKind};

	use super::*;

	fn ctx() -> Context {
		Rc::new(MemoryEngine::default())
	}

	mod parse {
		use super::*;

		#[test]
		fn test_vector_prefix() {
			assert_eq!(ColumnOptions::parse("tags", "[]ShortText"), ColumnOptions::vector("tags", "ShortText"));
			assert_eq!(ColumnOptions::parse("age", "UInt8"), ColumnOptions::scalar("age", "UInt8"));
		}
	}

	mod table_spec {
		use super::*;

		#[test]
		fn test_ok() {
			let spec = TableOptions::hash("Users", "ShortText").value_type("Int32").to_spec(&ctx()).unwrap();
			assert_eq!(spec.kind, TableKind::Hash);
			assert_eq!(spec.key_type, DataType::ShortText.id());
			assert_eq!(spec.value_type, DataType::Int32.id());
		}

		#[test]
		fn test_keyless_rejects_key() {
			let mut options = TableOptions::array("Log");
			options.key_type = Some("Int32".to_string());
			assert_eq!(options.to_spec(&ctx()).unwrap_err().kind(), ErrorKind::InvalidArgument);
		}

		#[test]
		fn test_keyed_requires_key() {
			let mut options = TableOptions::hash("Users", "Int32");
			options.key_type = None;
			assert!(options.to_spec(&ctx()).is_err());
		}

		#[test]
		fn test_key_rules() {
			let ctx = ctx();
			assert!(TableOptions::double_array("Words").to_spec(&ctx).is_ok());
			assert!(TableOptions::keyed("Words", TableKind::DoubleArray, "Int32").to_spec(&ctx).is_err());
			assert!(TableOptions::hash("Docs", "Text").to_spec(&ctx).is_err());
			assert!(TableOptions::hash("Points", "WGS84GeoPoint").to_spec(&ctx).is_ok());
		}

		#[test]
		fn test_text_value_rejected() {
			assert!(TableOptions::hash("Users", "Int32").value_type("ShortText").to_spec(&ctx()).is_err());
		}

		#[test]
		fn test_unknown_type() {
			let err = TableOptions::hash("Users", "Int33").to_spec(&ctx()).unwrap_err();
			assert_eq!(err.code, "ARG_001");
		}

		#[test]
		fn test_invalid_names() {
			let ctx = ctx();
			for name in ["", "_hidden", "a.b", "Int32"] {
				let err = TableOptions::array(name).to_spec(&ctx).unwrap_err();
				assert_eq!(err.code, "ARG_008", "{}", name);
			}
		}

		#[test]
		fn test_duplicate() {
			let ctx = ctx();
			let spec = TableOptions::array("Log").to_spec(&ctx).unwrap();
			ctx.create_table(&spec).unwrap();
			let err = TableOptions::array("Log").to_spec(&ctx).unwrap_err();
			assert_eq!(err.code, "OBJECT_003");
		}

		#[test]
		fn test_table_reference() {
			let ctx = ctx();
			let people = ctx.create_table(&TableOptions::hash("People", "Int32").to_spec(&ctx).unwrap()).unwrap();
			let spec = TableOptions::patricia("Staff", "People").to_spec(&ctx).unwrap();
			assert_eq!(spec.key_type, people);
		}
	}

	mod column_spec {
		use super::*;

		#[test]
		fn test_ok() {
			let ctx = ctx();
			let users = ctx.create_table(&TableOptions::hash("Users", "ShortText").to_spec(&ctx).unwrap()).unwrap();
			let spec = ColumnOptions::parse("scores", "[]Int16").to_spec(&ctx, users, "Users").unwrap();
			assert!(spec.vector);
			assert_eq!(spec.value_type, DataType::Int16.id());
		}

		#[test]
		fn test_column_not_a_type() {
			let ctx = ctx();
			let users = ctx.create_table(&TableOptions::hash("Users", "ShortText").to_spec(&ctx).unwrap()).unwrap();
			let age = ColumnOptions::scalar("age", "Int32").to_spec(&ctx, users, "Users").unwrap();
			ctx.create_column(users, &age).unwrap();

			let err = ColumnOptions::scalar("other", "Users.age").to_spec(&ctx, users, "Users").unwrap_err();
			assert_eq!(err.code, "ARG_011");
			let err = ColumnOptions::scalar("age", "Int32").to_spec(&ctx, users, "Users").unwrap_err();
			assert_eq!(err.code, "OBJECT_003");
		}

		#[test]
		fn test_void_rejected() {
			let ctx = ctx();
			let users = ctx.create_table(&TableOptions::hash("Users", "ShortText").to_spec(&ctx).unwrap()).unwrap();
			assert!(ColumnOptions::scalar("nothing", "Void").to_spec(&ctx, users, "Users").is_err());
		}
	}
}
