// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

//! One-shot cancellation signal with observer registration.

use std::{
	collections::HashMap,
	sync::{
		Arc, Weak,
		atomic::{AtomicBool, AtomicU64, Ordering},
	},
};

use parking_lot::Mutex;

type Observer = Box<dyn FnOnce() + Send>;

struct SignalInner {
	fired: AtomicBool,
	next_id: AtomicU64,
	observers: Mutex<HashMap<u64, Observer>>,
}

/// One-shot cancellation signal shared across threads.
///
/// Cloning hands out another handle to the same signal. Observers register
/// through [`CancellationSignal::subscribe`] and run exactly once when the
/// signal fires; an observer that registers after the firing runs
/// immediately instead. Dropping the returned [`Subscription`] removes an
/// observer that has not fired yet.
#[derive(Clone)]
pub struct CancellationSignal {
	inner: Arc<SignalInner>,
}

impl CancellationSignal {
	pub fn new() -> Self {
		Self {
			inner: Arc::new(SignalInner {
				fired: AtomicBool::new(false),
				next_id: AtomicU64::new(0),
				observers: Mutex::new(HashMap::new()),
			}),
		}
	}

	/// Fire the signal.
	///
	/// Only the first call drains and runs the observers; later calls are
	/// no-ops. Callbacks run after the registry lock is dropped, so an
	/// observer is free to subscribe or drop subscriptions on the same
	/// signal from inside its callback.
	pub fn fire(&self) {
		if self.inner.fired.swap(true, Ordering::SeqCst) {
			return;
		}
		let drained: Vec<Observer> = {
			let mut observers = self.inner.observers.lock();
			observers.drain().map(|(_, observer)| observer).collect()
		};
		for observer in drained {
			observer();
		}
	}

	/// Whether the signal has fired.
	pub fn is_fired(&self) -> bool {
		self.inner.fired.load(Ordering::SeqCst)
	}

	/// Register an observer.
	///
	/// The fired flag is re-checked under the registry lock; that closes
	/// the race where the signal fires between the caller's own check
	/// and the registration. A subscriber that loses that race has its
	/// callback run right here, once the lock is dropped, and gets back
	/// an inert subscription.
	pub fn subscribe(&self, observer: impl FnOnce() + Send + 'static) -> Subscription {
		let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
		let run_now: Option<Observer> = {
			let mut observers = self.inner.observers.lock();
			if self.inner.fired.load(Ordering::SeqCst) {
				Some(Box::new(observer))
			} else {
				observers.insert(id, Box::new(observer));
				None
			}
		};
		if let Some(observer) = run_now {
			observer();
		}
		Subscription {
			id,
			signal: Arc::downgrade(&self.inner),
		}
	}
}

impl Default for CancellationSignal {
	fn default() -> Self {
		Self::new()
	}
}

/// Token proving an observer registration on a [`CancellationSignal`].
///
/// Dropping the token removes the observer if it has not fired yet, so a
/// callback never outlives the interest of whoever registered it.
pub struct Subscription {
	id: u64,
	signal: Weak<SignalInner>,
}

impl Drop for Subscription {
	fn drop(&mut self) {
		let Some(inner) = self.signal.upgrade() else {
			return;
		};
		let removed = inner.observers.lock().remove(&self.id);
		// The observer may own resources of its own; destroy it outside
		// the registry lock.
		drop(removed);
	}
}

#[cfg(test)]
mod tests {
	use std::{
		sync::atomic::AtomicUsize,
		thread,
	};

	use super::*;

	#[test]
	fn test_fire_runs_observer_once() {
		let signal = CancellationSignal::new();
		let count = Arc::new(AtomicUsize::new(0));

		let observed = Arc::clone(&count);
		let _subscription = signal.subscribe(move || {
			observed.fetch_add(1, Ordering::SeqCst);
		});

		signal.fire();
		signal.fire();
		assert_eq!(count.load(Ordering::SeqCst), 1);
		assert!(signal.is_fired());
	}

	#[test]
	fn test_subscribe_after_fire_runs_immediately() {
		let signal = CancellationSignal::new();
		signal.fire();

		let count = Arc::new(AtomicUsize::new(0));
		let observed = Arc::clone(&count);
		let _subscription = signal.subscribe(move || {
			observed.fetch_add(1, Ordering::SeqCst);
		});

		assert_eq!(count.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn test_dropped_subscription_never_fires() {
		let signal = CancellationSignal::new();
		let count = Arc::new(AtomicUsize::new(0));

		let observed = Arc::clone(&count);
		let subscription = signal.subscribe(move || {
			observed.fetch_add(1, Ordering::SeqCst);
		});
		drop(subscription);

		signal.fire();
		assert_eq!(count.load(Ordering::SeqCst), 0);
	}

	#[test]
	fn test_clone_shares_state() {
		let signal = CancellationSignal::new();
		let other = signal.clone();
		other.fire();
		assert!(signal.is_fired());
	}

	#[test]
	fn test_subscription_outliving_signal_is_inert() {
		let signal = CancellationSignal::new();
		let subscription = signal.subscribe(|| {});
		drop(signal);
		drop(subscription);
	}

	#[test]
	fn test_every_subscriber_runs_exactly_once_under_race() {
		let signal = CancellationSignal::new();
		let count = Arc::new(AtomicUsize::new(0));

		let firing = {
			let signal = signal.clone();
			thread::spawn(move || signal.fire())
		};

		// Whichever side of the race each registration lands on, the
		// callback must run exactly once: drained by fire, or run
		// immediately by subscribe.
		let mut subscriptions = Vec::new();
		for _ in 0..100 {
			let observed = Arc::clone(&count);
			subscriptions.push(signal.subscribe(move || {
				observed.fetch_add(1, Ordering::SeqCst);
			}));
		}

		firing.join().unwrap();
		assert_eq!(count.load(Ordering::SeqCst), 100);
	}

	#[test]
	fn test_observer_may_touch_the_signal() {
		let signal = CancellationSignal::new();
		let count = Arc::new(AtomicUsize::new(0));

		let reentrant = signal.clone();
		let observed = Arc::clone(&count);
		let _subscription = signal.subscribe(move || {
			// Runs outside the registry lock, so this must not
			// deadlock.
			assert!(reentrant.is_fired());
			observed.fetch_add(1, Ordering::SeqCst);
		});

		signal.fire();
		assert_eq!(count.load(Ordering::SeqCst), 1);
	}
}
