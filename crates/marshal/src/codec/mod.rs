// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Conversion between host [`Value`](tessera_type::Value)s and the engine's
//! [`Bulk`](tessera_engine::Bulk) encoding.
//!
//! Writes go `Value -> validate -> TypedValue -> Bulk`; reads go the other way.
//! Validation of a whole value, every vector element included, completes
//! before anything is encoded.

mod decode;
mod encode;
mod validate;

pub use decode::{decode, decode_scalar, decode_typed, widen};
pub use encode::{encode, encode_typed};
pub use validate::{narrow, validate};
