// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

use parking_lot::Mutex;
use tracing::{error, trace};

use crate::interface::QueryCursor;

/// Single-claim slot owning an engine cursor.
///
/// Every termination path (exhaustion, engine failure, explicit close,
/// cancellation, drop) funnels through [`CursorGuard::release`]. Whoever
/// takes the cursor out of the slot performs the engine free; everyone else
/// finds the slot empty and does nothing. The engine is therefore asked to
/// free the handle at most once, no matter how the paths interleave.
pub struct CursorGuard<C: QueryCursor> {
	slot: Mutex<Option<C>>,
}

impl<C: QueryCursor> CursorGuard<C> {
	pub fn new(cursor: C) -> Self {
		Self {
			slot: Mutex::new(Some(cursor)),
		}
	}

	/// Run `f` against the live cursor.
	///
	/// Holds the claim lock for the duration of `f`, so a concurrent
	/// release waits until the step completes instead of freeing a
	/// cursor mid-call. Returns `None` if the cursor was already
	/// released.
	pub fn with_cursor<R>(&self, f: impl FnOnce(&mut C) -> R) -> Option<R> {
		let mut slot = self.slot.lock();
		slot.as_mut().map(f)
	}

	/// Claim the cursor and free the engine handle.
	///
	/// Returns `true` if this call performed the release, `false` if
	/// another path already did. The engine free runs after the claim
	/// lock is dropped. A failing free is logged and swallowed; cleanup
	/// is not allowed to raise.
	pub fn release(&self) -> bool {
		let claimed = self.slot.lock().take();
		match claimed {
			Some(mut cursor) => {
				match cursor.release() {
					Ok(()) => trace!("query cursor released"),
					Err(e) => error!("query cursor release failed: {}", e),
				}
				true
			}
			None => false,
		}
	}

	/// Whether the cursor has already been released.
	pub fn is_released(&self) -> bool {
		self.slot.lock().is_none()
	}
}

impl<C: QueryCursor> Drop for CursorGuard<C> {
	fn drop(&mut self) {
		self.release();
	}
}
