// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use cancel::{CancellationSignal, Subscription};
pub use guard::CursorGuard;
pub use memory::{MemoryCursor, MemoryRow};

pub mod interface;

mod cancel;
mod guard;
mod memory;
