// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_type::{Diagnostic, ErrorKind, IntoDiagnostic, ObjectId, RowId};

/// Return codes reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ReturnCode {
	UnknownError = -1,
	OperationNotPermitted = -2,
	NoSuchObject = -3,
	ObjectExists = -17,
	InvalidArgument = -22,
	InvalidFormat = -54,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
	#[error("object {0} does not exist")]
	NoSuchObject(ObjectId),

	#[error("object `{name}` already exists")]
	AlreadyExists {
		name: String,
	},

	#[error("invalid name `{name}`: {reason}")]
	InvalidName {
		name: String,
		reason: &'static str,
	},

	#[error("`{name}` is not a table")]
	NotATable {
		name: String,
	},

	#[error("row {row} does not exist in `{table}`")]
	NoSuchRow {
		table: String,
		row: RowId,
	},

	#[error("cannot store a value of domain {actual} into `{target}`, expected domain {expected}")]
	DomainMismatch {
		target: String,
		expected: ObjectId,
		actual: ObjectId,
	},

	#[error("malformed value for `{target}`: {reason}")]
	MalformedValue {
		target: String,
		reason: String,
	},

	#[error("`{target}` is read-only")]
	ReadOnly {
		target: String,
	},

	#[error("type {type_id} is not supported as {usage}")]
	UnsupportedType {
		usage: &'static str,
		type_id: ObjectId,
	},
}

impl EngineError {
	pub fn rc(&self) -> ReturnCode {
		match self {
			EngineError::NoSuchObject(_) => ReturnCode::NoSuchObject,
			EngineError::AlreadyExists {
				..
			} => ReturnCode::ObjectExists,
			EngineError::InvalidName {
				..
			}
			| EngineError::NotATable {
				..
			}
			| EngineError::NoSuchRow {
				..
			}
			| EngineError::DomainMismatch {
				..
			}
			| EngineError::UnsupportedType {
				..
			} => ReturnCode::InvalidArgument,
			EngineError::MalformedValue {
				..
			} => ReturnCode::InvalidFormat,
			EngineError::ReadOnly {
				..
			} => ReturnCode::OperationNotPermitted,
		}
	}
}

impl IntoDiagnostic for EngineError {
	fn into_diagnostic(self) -> Diagnostic {
		let rc = self.rc();
		let code = match &self {
			EngineError::NoSuchObject(_) => "ENGINE_001",
			EngineError::AlreadyExists {
				..
			} => "ENGINE_002",
			EngineError::InvalidName {
				..
			} => "ENGINE_003",
			EngineError::NotATable {
				..
			} => "ENGINE_004",
			EngineError::NoSuchRow {
				..
			} => "ENGINE_005",
			EngineError::DomainMismatch {
				..
			} => "ENGINE_006",
			EngineError::MalformedValue {
				..
			} => "ENGINE_007",
			EngineError::ReadOnly {
				..
			} => "ENGINE_008",
			EngineError::UnsupportedType {
				..
			} => "ENGINE_009",
		};

		Diagnostic {
			code: code.to_string(),
			kind: ErrorKind::Engine(rc as i32),
			message: self.to_string(),
			label: Some(format!("engine returned {:?}", rc)),
			help: None,
			notes: vec![],
			cause: None,
		}
	}
}

impl From<EngineError> for tessera_type::Error {
	fn from(err: EngineError) -> Self {
		tessera_type::error!(err.into_diagnostic())
	}
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_engine_error_keeps_return_code() {
		let err: tessera_type::Error = EngineError::ReadOnly {
			target: "Books._key".to_string(),
		}
		.into();
		assert_eq!(err.kind(), ErrorKind::Engine(ReturnCode::OperationNotPermitted as i32));
		assert_eq!(err.code, "ENGINE_008");
		assert!(err.message.contains("Books._key"));
	}

	#[test]
	fn test_no_such_row_is_invalid_argument_code() {
		let err = EngineError::NoSuchRow {
			table: "Books".to_string(),
			row: RowId(9),
		};
		assert_eq!(err.rc(), ReturnCode::InvalidArgument);
	}
}
