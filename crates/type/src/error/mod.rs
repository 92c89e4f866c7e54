// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	collections::TryReserveError,
	fmt::{Display, Formatter},
	ops::{Deref, DerefMut},
};

use serde::{Deserialize, Serialize};

pub mod diagnostic;
mod r#macro;

pub use diagnostic::Diagnostic;

/// Coarse classification of a failure, independent of the concrete engine
/// return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
	/// Null or malformed input, type mismatch, out-of-range value or malformed path.
	InvalidArgument,
	/// A named engine object does not exist.
	NotFound,
	/// The engine reported no object and no error code.
	Unknown,
	/// A buffer could not grow.
	NoMemory,
	/// Failure reported by the engine itself, carrying its return code.
	Engine(i32),
}

impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorKind::InvalidArgument => f.write_str("invalid argument"),
			ErrorKind::NotFound => f.write_str("not found"),
			ErrorKind::Unknown => f.write_str("unknown error"),
			ErrorKind::NoMemory => f.write_str("no memory"),
			ErrorKind::Engine(rc) => write!(f, "engine error ({})", rc),
		}
	}
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Diagnostic);

impl Error {
	pub fn kind(&self) -> ErrorKind {
		self.0.kind
	}

	pub fn diagnostic(self) -> Diagnostic {
		self.0
	}
}

impl Deref for Error {
	type Target = Diagnostic;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DerefMut for Error {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0.render())
	}
}

impl std::error::Error for Error {}

impl From<Diagnostic> for Error {
	fn from(diagnostic: Diagnostic) -> Self {
		Error(diagnostic)
	}
}

impl From<TryReserveError> for Error {
	fn from(err: TryReserveError) -> Self {
		crate::error!(diagnostic::internal::out_of_memory(err))
	}
}
