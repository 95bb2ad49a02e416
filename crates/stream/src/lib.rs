// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

//! Streaming access to query results.
//!
//! A [`QueryStream`] wraps the cursor an engine hands out for a running
//! query and yields [`QueryEntry`] snapshots one at a time. The cursor is
//! released exactly once across every way a stream can end: exhaustion,
//! engine failure, explicit close, cancellation, or drop.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use entry::QueryEntry;
pub use quarry_type::{Error, Result};
pub use stream::QueryStream;

mod entry;
mod stream;
