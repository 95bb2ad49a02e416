// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

use quarry_type::{DocSequence, Result, StatusCode};

/// Raw outcome of a single cursor step, exactly as the engine reports it.
///
/// The pair is deliberately untranslated: `moved` says whether the cursor
/// now sits on a row, `status` carries the engine's status word.
/// Interpreting the combination (clean exhaustion vs. failure) is the
/// stream's job, not the adapter's.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AdvanceResult {
	pub moved: bool,
	pub status: StatusCode,
}

impl AdvanceResult {
	/// The cursor moved onto a row.
	pub const fn row() -> Self {
		Self {
			moved: true,
			status: StatusCode::SUCCESS,
		}
	}

	/// The cursor did not move; the results are cleanly exhausted.
	pub const fn end() -> Self {
		Self {
			moved: false,
			status: StatusCode::SUCCESS,
		}
	}

	/// The cursor did not move because the engine failed.
	pub const fn fail(status: StatusCode) -> Self {
		Self {
			moved: false,
			status,
		}
	}
}

/// Borrowed view of the fields a cursor exposes while positioned on a row.
///
/// The borrows are valid only until the next `advance` call or until the
/// cursor is released; anything kept longer must be copied out first.
#[derive(Debug, Copy, Clone)]
pub struct RawFields<'c> {
	pub doc_id: &'c [u8],
	pub key: &'c [u8],
	pub value: &'c [u8],
	pub sequence: DocSequence,
}

/// Engine-side query cursor.
///
/// Implementations wrap whatever handle the engine hands out for a running
/// query. The contract mirrors the engine's surface directly: step the
/// cursor, look at the row it sits on, free the handle.
pub trait QueryCursor: Send {
	/// Step the cursor forward one row.
	fn advance(&mut self) -> AdvanceResult;

	/// Fields of the row the cursor is currently positioned on.
	///
	/// Only meaningful after an `advance` that reported `moved`.
	fn fields(&self) -> RawFields<'_>;

	/// Free the engine-side handle.
	///
	/// Called at most once; the owning guard enforces that.
	fn release(&mut self) -> Result<()>;
}
