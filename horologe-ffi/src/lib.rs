// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! C FFI bindings for **horologe**, the multi-calendar clock engine.
//!
//! This crate exposes a flat C-compatible API for building unit systems,
//! decomposing a scalar time into calendar fields, and formatting the result
//! as clock text.

mod clock;
mod error;

pub use clock::*;
pub use error::*;

/// Returns the horologe-ffi ABI version (semver-encoded: major*10000 + minor*100 + patch).
#[allow(clippy::erasing_op, clippy::identity_op)]
#[no_mangle]
pub extern "C" fn horologe_ffi_version() -> u32 {
    0 * 10000 + 1 * 100 + 0 // 0.1.0
}
