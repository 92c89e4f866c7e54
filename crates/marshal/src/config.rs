// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Tuning for opened tables and columns.
#[derive(Debug, Clone)]
pub struct MarshalConfig {
	/// Initial element capacity of each per-hop scratch buffer.
	pub scratch_capacity: usize,
	/// Initial capacity in bytes of the text body buffer.
	pub text_capacity: usize,
	/// Upper bound on the number of table references followed while
	/// resolving a key or value type.
	pub max_key_chain: usize,
}

impl Default for MarshalConfig {
	fn default() -> Self {
		Self {
			scratch_capacity: 16,
			text_capacity: 256,
			max_key_chain: 32,
		}
	}
}

impl MarshalConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn scratch_capacity(mut self, capacity: usize) -> Self {
		self.scratch_capacity = capacity;
		self
	}

	pub fn text_capacity(mut self, capacity: usize) -> Self {
		self.text_capacity = capacity;
		self
	}

	pub fn max_key_chain(mut self, depth: usize) -> Self {
		self.max_key_chain = depth;
		self
	}
}
