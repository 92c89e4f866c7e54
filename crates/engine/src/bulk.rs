// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::TryReserveError;

use tessera_type::ObjectId;

/// Byte range of one element inside a text vector body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Section {
	pub offset: u32,
	pub length: u32,
}

impl Section {
	pub fn range(&self) -> std::ops::Range<usize> {
		let start = self.offset as usize;
		start..start + self.length as usize
	}
}

/// The engine's value container.
///
/// Fixed-size values are stored little-endian back to back. Text vectors keep
/// their bodies concatenated in `data` with one [`Section`] per element. A bulk
/// is rewound between uses so its allocation is reused.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bulk {
	domain: ObjectId,
	vector: bool,
	data: Vec<u8>,
	sections: Vec<Section>,
}

impl Bulk {
	pub fn new(domain: ObjectId, vector: bool) -> Self {
		Self {
			domain,
			vector,
			data: Vec::new(),
			sections: Vec::new(),
		}
	}

	pub fn with_capacity(domain: ObjectId, vector: bool, bytes: usize) -> Self {
		Self {
			domain,
			vector,
			data: Vec::with_capacity(bytes),
			sections: Vec::new(),
		}
	}

	pub fn from_bytes(domain: ObjectId, bytes: &[u8]) -> Self {
		Self {
			domain,
			vector: false,
			data: bytes.to_vec(),
			sections: Vec::new(),
		}
	}

	pub fn domain(&self) -> ObjectId {
		self.domain
	}

	pub fn is_vector(&self) -> bool {
		self.vector
	}

	/// Clears contents and retypes the bulk without releasing its allocation.
	pub fn reset(&mut self, domain: ObjectId, vector: bool) {
		self.domain = domain;
		self.vector = vector;
		self.rewind();
	}

	pub fn rewind(&mut self) {
		self.data.clear();
		self.sections.clear();
	}

	pub fn try_reserve(&mut self, bytes: usize) -> Result<(), TryReserveError> {
		self.data.try_reserve(bytes)
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.data
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty() && self.sections.is_empty()
	}

	pub fn push_bytes(&mut self, bytes: &[u8]) {
		self.data.extend_from_slice(bytes);
	}

	/// Appends one variable-length element.
	pub fn push_section(&mut self, bytes: &[u8]) {
		let offset = self.data.len() as u32;
		self.data.extend_from_slice(bytes);
		self.sections.push(Section {
			offset,
			length: bytes.len() as u32,
		});
	}

	pub fn sections(&self) -> &[Section] {
		&self.sections
	}

	pub fn section(&self, index: usize) -> Option<&[u8]> {
		self.sections.get(index).and_then(|s| self.data.get(s.range()))
	}

	pub fn section_count(&self) -> usize {
		self.sections.len()
	}

	/// Number of elements: sections for variable-length vectors, otherwise
	/// byte length divided by `stride`.
	pub fn element_count(&self, stride: Option<usize>) -> usize {
		match stride {
			Some(0) => 0,
			Some(stride) => self.data.len() / stride,
			None if self.vector => self.sections.len(),
			None => 1,
		}
	}

	pub fn push_u32(&mut self, value: u32) {
		self.data.extend_from_slice(&value.to_le_bytes());
	}

	/// Reads the `index`-th little-endian u32, the encoding of row ids.
	pub fn u32_at(&self, index: usize) -> Option<u32> {
		let start = index * 4;
		let bytes = self.data.get(start..start + 4)?;
		Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
	}

	pub(crate) fn set_raw(&mut self, data: &[u8], sections: &[Section]) {
		self.data.clear();
		self.data.extend_from_slice(data);
		self.sections.clear();
		self.sections.extend_from_slice(sections);
	}
}
