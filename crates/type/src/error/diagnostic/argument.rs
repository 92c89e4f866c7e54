// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{ErrorKind, RowId, error::diagnostic::Diagnostic};

pub fn unknown_type_name(name: &str) -> Diagnostic {
	Diagnostic {
		code: "ARG_001".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("unknown type name: `{}`", name),
		label: None,
		help: Some("use a builtin type name such as Int32, ShortText or WGS84GeoPoint, or the name of an existing table".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn empty_path() -> Diagnostic {
	Diagnostic {
		code: "ARG_002".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: "field path is empty".to_string(),
		label: None,
		help: Some("name a column, `_key`, `_value` or `_id`".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn empty_path_segment(path: &str) -> Diagnostic {
	Diagnostic {
		code: "ARG_003".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("field path `{}` contains an empty segment", path),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn unknown_field(path: &str, token: &str, owner: &str) -> Diagnostic {
	Diagnostic {
		code: "ARG_004".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("`{}` in field path `{}` is not a column of `{}`", token, path, owner),
		label: Some("unresolved field".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn not_a_reference(path: &str, token: &str) -> Diagnostic {
	Diagnostic {
		code: "ARG_005".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("cannot resolve `{}` in field path `{}`: the preceding field is not a table reference", token, path),
		label: None,
		help: Some("only reference columns can be followed with `.`".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn read_only_field(path: &str) -> Diagnostic {
	Diagnostic {
		code: "ARG_006".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("field `{}` is read-only", path),
		label: None,
		help: Some("only single-hop plain columns and `_value` accept writes".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn row_not_found(table: &str, row: RowId) -> Diagnostic {
	Diagnostic {
		code: "ARG_007".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("row {} does not exist in table `{}`", row, table),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn invalid_name(what: &str, name: &str, reason: &str) -> Diagnostic {
	Diagnostic {
		code: "ARG_008".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("invalid {} name `{}`: {}", what, name, reason),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn key_chain_too_deep(name: &str, limit: usize) -> Diagnostic {
	Diagnostic {
		code: "ARG_009".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("resolving `{}` followed more than {} table references", name, limit),
		label: None,
		help: Some("raise `max_key_chain` in the marshal configuration if the schema is this deep".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn unsupported_type(context: &str, type_name: &str) -> Diagnostic {
	Diagnostic {
		code: "ARG_010".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("type `{}` cannot be used as {}", type_name, context),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn not_a_table(name: &str) -> Diagnostic {
	Diagnostic {
		code: "ARG_011".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("object `{}` is not a table", name),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn not_a_table_or_column(name: &str) -> Diagnostic {
	Diagnostic {
		code: "ARG_012".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("object `{}` is neither a table nor a data column", name),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn dimension_mismatch(path: &str, expected: usize, actual: usize) -> Diagnostic {
	Diagnostic {
		code: "ARG_013".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("field `{}` has {} vector dimension(s), at most {} supported here", path, actual, expected),
		label: None,
		help: Some("use `Column::get` to traverse nested vectors".to_string()),
		notes: vec![],
		cause: None,
	}
}
