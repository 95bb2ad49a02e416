// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use error::{Error, Result};
pub use sequence::DocSequence;
pub use status::StatusCode;

mod error;
mod sequence;
mod status;
