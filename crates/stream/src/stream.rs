// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

use std::sync::Arc;

use quarry_core::{
	CancellationSignal, CursorGuard, Subscription,
	interface::{QueryCursor, RenderKey},
};
use quarry_type::{Error, Result, StatusCode};
use tracing::debug;

use crate::entry::QueryEntry;

/// Outcome of one engine step, captured while the claim lock is held.
enum Step {
	Entry(QueryEntry),
	End,
	Fail(StatusCode),
}

/// Forward-only stream over the results of a single query run.
///
/// The stream owns the engine cursor through a [`CursorGuard`] and releases
/// it exactly once, on whichever comes first: clean exhaustion, an engine
/// failure, an explicit [`close`](QueryStream::close), the cancellation
/// signal firing, or the stream being dropped. After any of those, further
/// advances report exhaustion without touching the engine.
pub struct QueryStream<C: QueryCursor> {
	guard: Arc<CursorGuard<C>>,
	renderer: Arc<dyn RenderKey>,
	current: Option<Arc<QueryEntry>>,
	// Held so the observer is unregistered when the stream goes away.
	_subscription: Subscription,
}

impl<C: QueryCursor> QueryStream<C> {
	/// Attach a stream to a live cursor.
	///
	/// Registers a release observer on `signal`. If the signal has
	/// already fired, the stream declines to take ownership and hands
	/// the cursor back untouched; freeing it stays the caller's job.
	/// If the signal fires between that check and the registration, the
	/// observer runs during registration and the stream starts out
	/// exhausted with the cursor already released.
	pub fn attach(
		cursor: C,
		renderer: Arc<dyn RenderKey>,
		signal: &CancellationSignal,
	) -> std::result::Result<Self, C>
	where
		C: 'static,
	{
		if signal.is_fired() {
			return Err(cursor);
		}

		let guard = Arc::new(CursorGuard::new(cursor));

		// The observer captures the guard, never the stream, so firing
		// from another thread only races the single-claim slot.
		let observer = Arc::clone(&guard);
		let subscription = signal.subscribe(move || {
			if observer.release() {
				debug!("query cursor released by cancellation");
			}
		});

		Ok(Self {
			guard,
			renderer,
			current: None,
			_subscription: subscription,
		})
	}

	/// Step to the next result.
	///
	/// Returns `Ok(Some(entry))` while rows remain, `Ok(None)` once the
	/// results are exhausted (by the engine, by [`close`](Self::close) or
	/// by cancellation), and `Err` if the engine reports a failing
	/// status. The cursor is released before any terminal outcome is
	/// returned, so neither an error nor exhaustion can leak the handle.
	pub fn advance(&mut self) -> Result<Option<Arc<QueryEntry>>> {
		let step = self.guard.with_cursor(|cursor| {
			let outcome = cursor.advance();
			if outcome.moved {
				Step::Entry(QueryEntry::snapshot(cursor.fields(), Arc::clone(&self.renderer)))
			} else if outcome.status.is_success() {
				Step::End
			} else {
				Step::Fail(outcome.status)
			}
		});

		match step {
			// Already released by close, cancellation or an earlier
			// terminal step.
			None => {
				self.current = None;
				Ok(None)
			}
			Some(Step::Entry(entry)) => {
				let entry = Arc::new(entry);
				self.current = Some(Arc::clone(&entry));
				Ok(Some(entry))
			}
			Some(Step::End) => {
				self.finish();
				Ok(None)
			}
			Some(Step::Fail(status)) => {
				self.finish();
				Err(Error::Engine {
					status,
				})
			}
		}
	}

	/// The most recently produced entry.
	///
	/// `None` before the first advance and once the stream has finished
	/// for any reason, cancellation included.
	pub fn current(&self) -> Option<Arc<QueryEntry>> {
		if self.guard.is_released() {
			return None;
		}
		self.current.clone()
	}

	/// Release the cursor now.
	///
	/// Idempotent; later advances report exhaustion.
	pub fn close(&mut self) {
		self.finish();
	}

	/// Whether the cursor has been released.
	pub fn is_finished(&self) -> bool {
		self.guard.is_released()
	}

	/// Rewinding is not supported by engine cursors.
	///
	/// Always fails loudly; re-reading results takes a fresh query run.
	pub fn reset(&mut self) -> Result<()> {
		Err(Error::Unsupported {
			operation: "reset",
		})
	}

	fn finish(&mut self) {
		self.guard.release();
		self.current = None;
	}
}

impl<C: QueryCursor> Iterator for QueryStream<C> {
	type Item = Result<Arc<QueryEntry>>;

	fn next(&mut self) -> Option<Self::Item> {
		match self.advance() {
			Ok(Some(entry)) => Some(Ok(entry)),
			Ok(None) => None,
			Err(e) => Some(Err(e)),
		}
	}
}
