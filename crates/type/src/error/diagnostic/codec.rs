// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{DataType, ErrorKind, GeoPoint, error::diagnostic::Diagnostic};

fn describe(data_type: DataType, vector: bool) -> String {
	if vector {
		format!("[]{}", data_type)
	} else {
		data_type.to_string()
	}
}

pub fn type_mismatch(expected: DataType, vector: bool, actual: &str) -> Diagnostic {
	Diagnostic {
		code: "CODEC_001".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("expected a value of type {}, found {}", describe(expected, vector), actual),
		label: Some("type mismatch".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn integer_out_of_range(data_type: DataType, value: i64) -> Diagnostic {
	Diagnostic {
		code: "CODEC_002".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("{} does not fit into {}", value, data_type),
		label: Some("value out of range".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn float_nan(data_type: DataType) -> Diagnostic {
	Diagnostic {
		code: "CODEC_003".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("NaN is not a valid {}", data_type),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn text_too_long(data_type: DataType, actual: usize, max: usize) -> Diagnostic {
	Diagnostic {
		code: "CODEC_004".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("{} value exceeds maximum byte length: {} bytes (max: {} bytes)", data_type, actual, max),
		label: Some("value out of range".to_string()),
		help: Some("use a wider text type or shorten the value".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn geo_point_out_of_range(data_type: DataType, point: GeoPoint) -> Diagnostic {
	Diagnostic {
		code: "CODEC_005".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("{} is not a valid {}", point, data_type),
		label: Some("value out of range".to_string()),
		help: None,
		notes: vec![format!(
			"latitude must lie within ±{} and longitude within ±{} milliseconds of arc",
			GeoPoint::MAX_LATITUDE,
			GeoPoint::MAX_LONGITUDE
		)],
		cause: None,
	}
}

pub fn vector_element_invalid(index: usize, cause: Diagnostic) -> Diagnostic {
	Diagnostic {
		code: "CODEC_006".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("vector element {} is invalid", index),
		label: None,
		help: None,
		notes: vec!["no element of the vector was written".to_string()],
		cause: Some(Box::new(cause)),
	}
}

pub fn malformed_value(data_type: DataType, len: usize) -> Diagnostic {
	Diagnostic {
		code: "CODEC_007".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("{} bytes do not form a whole number of {} values", len, data_type),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn exceeds_host_integer(data_type: DataType, value: u64) -> Diagnostic {
	Diagnostic {
		code: "CODEC_008".to_string(),
		kind: ErrorKind::InvalidArgument,
		message: format!("stored {} value {} exceeds the signed 64-bit host range", data_type, value),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}
