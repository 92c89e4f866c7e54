// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{ErrorKind, ObjectId, error::diagnostic::Diagnostic};

pub fn object_not_found(name: &str) -> Diagnostic {
	Diagnostic {
		code: "OBJECT_001".to_string(),
		kind: ErrorKind::NotFound,
		message: format!("object `{}` not found", name),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn object_vanished(id: ObjectId) -> Diagnostic {
	Diagnostic {
		code: "OBJECT_002".to_string(),
		kind: ErrorKind::Unknown,
		message: format!("engine returned no object for id {}", id),
		label: None,
		help: None,
		notes: vec!["the engine reported no error code for this lookup".to_string()],
		cause: None,
	}
}

pub fn already_exists(what: &str, name: &str) -> Diagnostic {
	Diagnostic {
		code: "OBJECT_003".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("{} `{}` already exists", what, name),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn insert_failed(table: &str) -> Diagnostic {
	Diagnostic {
		code: "OBJECT_004".to_string(),
		kind: ErrorKind::Unknown,
		message: format!("engine returned a nil row id when inserting into `{}`", table),
		label: None,
		help: None,
		notes: vec!["the engine reported no error code for this insertion".to_string()],
		cause: None,
	}
}
