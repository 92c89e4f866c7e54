// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::collections::TryReserveError;

use crate::{ErrorKind, error::diagnostic::Diagnostic};

/// Creates an internal error diagnostic with source location.
pub fn internal_with_context(reason: impl Into<String>, file: &str, line: u32, module_path: &str) -> Diagnostic {
	let reason = reason.into();
	Diagnostic {
		code: "INTERNAL_ERROR".to_string(),
		kind: ErrorKind::Unknown,
		message: format!("internal error: {}", reason),
		label: Some(format!("internal invariant violated at {}:{}", file, line)),
		help: Some("this indicates a bug in the marshalling layer, please report it".to_string()),
		notes: vec![format!("module: {}", module_path)],
		cause: None,
	}
}

pub fn internal(reason: impl Into<String>) -> Diagnostic {
	internal_with_context(reason, "unknown", 0, "unknown")
}

pub fn out_of_memory(err: TryReserveError) -> Diagnostic {
	Diagnostic {
		code: "MEMORY_001".to_string(),
		kind: ErrorKind::NoMemory,
		message: format!("scratch buffer could not grow: {}", err),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

#[cfg(test)]
mod tests {
	#[test]
	fn test_internal_error_literal() {
		let diagnostic = crate::internal_error!("simple error message");
		assert_eq!(diagnostic.code, "INTERNAL_ERROR");
		assert!(diagnostic.message.contains("simple error message"));
		assert!(diagnostic.label.as_ref().unwrap().contains("internal.rs"));
	}

	#[test]
	fn test_internal_error_format() {
		let diagnostic = crate::internal_error!("hop {} of {}", 2, 3);
		assert!(diagnostic.message.contains("hop 2 of 3"));
	}
}
