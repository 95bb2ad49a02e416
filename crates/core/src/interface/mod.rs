// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

//! Traits and raw types at the engine boundary.

pub use cursor::{AdvanceResult, QueryCursor, RawFields};
pub use render::RenderKey;

mod cursor;
mod render;
