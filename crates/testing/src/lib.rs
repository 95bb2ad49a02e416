// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

//! Test support: scripted cursors and stub renderers.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use cursor::{CursorProbe, ScriptedCursor, ScriptedRow};
pub use render::StubRenderer;

mod cursor;
mod render;
