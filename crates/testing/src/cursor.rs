// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};

use quarry_core::interface::{AdvanceResult, QueryCursor, RawFields};
use quarry_type::{DocSequence, Error, Result, StatusCode};

/// Call counters shared between a [`ScriptedCursor`] and the test driving
/// it.
///
/// Grab the handle with [`ScriptedCursor::probe`] before moving the cursor
/// into the code under test.
#[derive(Debug, Default)]
pub struct CursorProbe {
	advances: AtomicUsize,
	releases: AtomicUsize,
}

impl CursorProbe {
	pub fn advances(&self) -> usize {
		self.advances.load(Ordering::SeqCst)
	}

	pub fn releases(&self) -> usize {
		self.releases.load(Ordering::SeqCst)
	}
}

/// One scripted result row.
#[derive(Debug, Clone)]
pub struct ScriptedRow {
	pub doc_id: Vec<u8>,
	pub key: Vec<u8>,
	pub value: Vec<u8>,
	pub sequence: DocSequence,
}

impl ScriptedRow {
	pub fn new(doc_id: &str, key: &str, value: &str, sequence: u64) -> Self {
		Self {
			doc_id: doc_id.as_bytes().to_vec(),
			key: key.as_bytes().to_vec(),
			value: value.as_bytes().to_vec(),
			sequence: DocSequence(sequence),
		}
	}
}

/// Cursor driven by a prepared script.
///
/// Yields the scripted rows in order, then reports the configured terminal
/// outcome (clean exhaustion unless overridden). Every advance and release
/// call is counted on the probe, and release can be scripted to fail for
/// exercising cleanup handling.
#[derive(Debug)]
pub struct ScriptedCursor {
	rows: Vec<ScriptedRow>,
	terminal: AdvanceResult,
	release_failure: Option<StatusCode>,
	next: usize,
	current: Option<usize>,
	probe: Arc<CursorProbe>,
}

impl ScriptedCursor {
	pub fn new(rows: Vec<ScriptedRow>) -> Self {
		Self {
			rows,
			terminal: AdvanceResult::end(),
			release_failure: None,
			next: 0,
			current: None,
			probe: Arc::new(CursorProbe::default()),
		}
	}

	/// Replace the clean-exhaustion terminal with a failing one.
	pub fn with_terminal(mut self, terminal: AdvanceResult) -> Self {
		self.terminal = terminal;
		self
	}

	/// Make `release` report the given status as an error.
	pub fn with_failing_release(mut self, status: StatusCode) -> Self {
		self.release_failure = Some(status);
		self
	}

	/// Shared handle to the call counters.
	pub fn probe(&self) -> Arc<CursorProbe> {
		Arc::clone(&self.probe)
	}
}

impl QueryCursor for ScriptedCursor {
	fn advance(&mut self) -> AdvanceResult {
		self.probe.advances.fetch_add(1, Ordering::SeqCst);
		if self.next < self.rows.len() {
			self.current = Some(self.next);
			self.next += 1;
			AdvanceResult::row()
		} else {
			self.current = None;
			self.terminal
		}
	}

	fn fields(&self) -> RawFields<'_> {
		let row = self
			.current
			.and_then(|index| self.rows.get(index))
			.expect("fields() requires a prior advance that moved the cursor");
		RawFields {
			doc_id: &row.doc_id,
			key: &row.key,
			value: &row.value,
			sequence: row.sequence,
		}
	}

	fn release(&mut self) -> Result<()> {
		self.probe.releases.fetch_add(1, Ordering::SeqCst);
		match self.release_failure {
			Some(status) => Err(Error::Engine {
				status,
			}),
			None => Ok(()),
		}
	}
}
