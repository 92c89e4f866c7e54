// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use data_type::DataType;
pub use error::{Diagnostic, Error, ErrorKind, IntoDiagnostic};
pub use geo::GeoPoint;
pub use id::{ObjectId, RowId};
pub use value::{TypedValue, TypedVector, Value};

mod data_type;
pub mod error;
mod geo;
mod id;
pub mod value;

pub type Result<T> = std::result::Result<T, Error>;
