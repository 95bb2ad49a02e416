// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

use quarry_type::{DocSequence, Result};

use crate::interface::{AdvanceResult, QueryCursor, RawFields};

/// A single pre-materialized result row.
#[derive(Debug, Clone)]
pub struct MemoryRow {
	pub doc_id: Vec<u8>,
	pub key: Vec<u8>,
	pub value: Vec<u8>,
	pub sequence: DocSequence,
}

impl MemoryRow {
	pub fn new(doc_id: impl Into<Vec<u8>>, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>, sequence: u64) -> Self {
		Self {
			doc_id: doc_id.into(),
			key: key.into(),
			value: value.into(),
			sequence: DocSequence(sequence),
		}
	}
}

/// In-process cursor over pre-materialized rows.
///
/// The loopback backend: it exercises the full cursor contract without an
/// engine behind it. Rows come out in order, then the cursor reports clean
/// exhaustion for every further step.
#[derive(Debug)]
pub struct MemoryCursor {
	rows: Vec<MemoryRow>,
	next: usize,
	current: Option<usize>,
	released: bool,
}

impl MemoryCursor {
	pub fn new(rows: Vec<MemoryRow>) -> Self {
		Self {
			rows,
			next: 0,
			current: None,
			released: false,
		}
	}

	pub fn is_released(&self) -> bool {
		self.released
	}
}

impl QueryCursor for MemoryCursor {
	fn advance(&mut self) -> AdvanceResult {
		if self.next < self.rows.len() {
			self.current = Some(self.next);
			self.next += 1;
			AdvanceResult::row()
		} else {
			self.current = None;
			AdvanceResult::end()
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
		self.released = true;
		Ok(())
	}
}
