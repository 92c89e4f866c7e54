// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Typed access to the values of an embedded document store.
//!
//! A [`Database`] opens [`Table`]s; a table resolves dotted field paths into
//! [`Column`]s whose reads follow references across tables and return
//! nested vectors as a tree of spans over reused buffers.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use column::Column;
pub use config::MarshalConfig;
pub use database::Database;
pub use fetch::{Element, Fetched, ScalarRef, ValueRef, VectorRef};
pub use insert::{RowInsertion, insert};
pub use options::{ColumnOptions, TableOptions};
pub use resolve::{FieldType, resolve_key_type, resolve_value_type};
pub use scratch::Span;
pub use source::{Hop, HopKind, SourceChain, open_field_path};
pub use table::Table;

pub mod codec;
mod column;
mod config;
mod database;
mod fetch;
mod insert;
mod options;
mod resolve;
mod scratch;
mod source;
mod table;

pub type Result<T> = std::result::Result<T, tessera_type::Error>;
