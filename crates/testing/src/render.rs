// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

use std::sync::atomic::{AtomicUsize, Ordering};

use quarry_core::interface::RenderKey;
use quarry_type::{Error, Result};

/// Counting [`RenderKey`] stub.
///
/// Renders keys as JSON string literals, or fails every call when built
/// with [`StubRenderer::failing`]. Each call is counted either way, which
/// is how tests pin down the at-most-once caching contract.
#[derive(Debug, Default)]
pub struct StubRenderer {
	calls: AtomicUsize,
	fail: bool,
}

impl StubRenderer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn failing() -> Self {
		Self {
			calls: AtomicUsize::new(0),
			fail: true,
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

impl RenderKey for StubRenderer {
	fn render_key(&self, key: &[u8]) -> Result<String> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if self.fail {
			return Err(Error::Render {
				reason: "stub renderer configured to fail".to_string(),
			});
		}
		serde_json::to_string(&String::from_utf8_lossy(key)).map_err(|e| Error::Render {
			reason: e.to_string(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_renders_json_string_literal() {
		let renderer = StubRenderer::new();
		assert_eq!(renderer.render_key(b"plain").unwrap(), "\"plain\"");
		assert_eq!(renderer.render_key(b"with \"quotes\"").unwrap(), "\"with \\\"quotes\\\"\"");
		assert_eq!(renderer.calls(), 2);
	}

	#[test]
	fn test_failing_renderer_counts_calls() {
		let renderer = StubRenderer::failing();
		assert!(renderer.render_key(b"anything").is_err());
		assert!(renderer.render_key(b"anything").is_err());
		assert_eq!(renderer.calls(), 2);
	}
}
