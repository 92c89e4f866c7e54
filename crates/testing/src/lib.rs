// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared helpers for tests: subscriber setup and schema fixtures.

pub use fixture::{Library, library};
pub use schema::{create_scalar_column, create_vector_column, ensure_table};
pub use trace::init_tracing;

mod fixture;
mod schema;
mod trace;
