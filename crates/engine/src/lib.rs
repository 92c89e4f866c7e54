// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

//! The storage collaborator: the object model the marshalling layer talks to,
//! plus an in-memory implementation of it.

pub use bulk::{Bulk, Section};
pub use engine::{ColumnSpec, Context, Engine, TableSpec};
pub use error::{EngineError, EngineResult, ReturnCode};
pub use handle::ObjectHandle;
pub use memory::{MemoryEngine, MemoryEngineConfig};
pub use object::{AccessorKind, ColumnKind, Header, ObjectKind, Source, TableKind, Target};

mod bulk;
mod engine;
mod error;
mod handle;
mod memory;
mod object;

pub type Result<T> = std::result::Result<T, tessera_type::Error>;
