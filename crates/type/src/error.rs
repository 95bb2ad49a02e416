// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

//! Error taxonomy for the result streaming layer.

use crate::StatusCode;

/// Errors surfaced while driving a query result stream.
///
/// Clean exhaustion is not an error; streams report it as `Ok(None)`.
/// The enum is `Clone` so a cached failure can be handed out again on
/// every later access to the same lazy view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// The engine reported a failing status while stepping the cursor.
	#[error("engine reported status {status} while advancing the cursor")]
	Engine {
		status: StatusCode,
	},

	/// A lazily rendered view could not be produced.
	#[error("failed to render key as text: {reason}")]
	Render {
		reason: String,
	},

	/// The requested operation is not supported by the underlying cursor.
	#[error("operation '{operation}' is not supported")]
	Unsupported {
		operation: &'static str,
	},
}

pub type Result<T> = std::result::Result<T, Error>;
