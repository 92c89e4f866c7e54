// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::ErrorKind;

pub mod argument;
pub mod codec;
pub mod internal;
pub mod object;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub kind: ErrorKind,
	pub message: String,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
	pub cause: Option<Box<Diagnostic>>,
}

impl Diagnostic {
	pub fn with_cause(mut self, cause: Diagnostic) -> Self {
		self.cause = Some(Box::new(cause));
		self
	}

	pub fn with_note(mut self, note: impl Into<String>) -> Self {
		self.notes.push(note.into());
		self
	}

	/// Renders the diagnostic and its cause chain as plain text.
	pub fn render(&self) -> String {
		let mut out = String::new();
		let mut current = Some(self);
		let mut depth = 0usize;
		while let Some(diagnostic) = current {
			let indent = "  ".repeat(depth);
			let _ = writeln!(out, "{}[{}] {}", indent, diagnostic.code, diagnostic.message);
			if let Some(label) = &diagnostic.label {
				let _ = writeln!(out, "{}  label: {}", indent, label);
			}
			if let Some(help) = &diagnostic.help {
				let _ = writeln!(out, "{}  help: {}", indent, help);
			}
			for note in &diagnostic.notes {
				let _ = writeln!(out, "{}  note: {}", indent, note);
			}
			current = diagnostic.cause.as_deref();
			depth += 1;
		}
		while out.ends_with('\n') {
			out.pop();
		}
		out
	}
}
