// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

use quarry_type::Result;

/// Collaborator that renders raw encoded key bytes into portable text.
///
/// Rendering can fail on malformed input. The failure is reported rather
/// than panicked so entry accessors can cache it and raise it again on
/// every later access.
pub trait RenderKey: Send + Sync {
	fn render_key(&self, key: &[u8]) -> Result<String>;
}
