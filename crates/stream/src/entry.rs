// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

use std::{
	fmt,
	fmt::{Debug, Formatter},
	sync::{Arc, OnceLock},
};

use quarry_core::interface::{RawFields, RenderKey};
use quarry_type::{DocSequence, Result};

/// Immutable snapshot of a single query result row.
///
/// The raw buffers are copied out of the cursor before it moves on, so an
/// entry stays valid for as long as anyone holds it, independent of the
/// stream that produced it. Derived views are computed on first access and
/// cached; a failed key render is cached too, so the renderer runs at most
/// once per entry no matter how often the view is read.
pub struct QueryEntry {
	sequence: DocSequence,
	doc_id: Vec<u8>,
	key: Vec<u8>,
	value: Vec<u8>,
	renderer: Arc<dyn RenderKey>,
	doc_id_text: OnceLock<String>,
	key_text: OnceLock<Result<String>>,
	value_text: OnceLock<String>,
}

impl QueryEntry {
	pub(crate) fn snapshot(fields: RawFields<'_>, renderer: Arc<dyn RenderKey>) -> Self {
		Self {
			sequence: fields.sequence,
			doc_id: fields.doc_id.to_vec(),
			key: fields.key.to_vec(),
			value: fields.value.to_vec(),
			renderer,
			doc_id_text: OnceLock::new(),
			key_text: OnceLock::new(),
			value_text: OnceLock::new(),
		}
	}

	/// Sequence number of the document within this query run.
	pub fn sequence(&self) -> DocSequence {
		self.sequence
	}

	/// Raw encoded key bytes, exactly as the engine produced them.
	pub fn raw_key(&self) -> &[u8] {
		&self.key
	}

	/// Raw value bytes, exactly as the engine produced them.
	pub fn raw_value(&self) -> &[u8] {
		&self.value
	}

	/// Document identifier as text, converted once and cached.
	pub fn doc_id(&self) -> &str {
		self.doc_id_text.get_or_init(|| String::from_utf8_lossy(&self.doc_id).into_owned())
	}

	/// Key rendered as portable text.
	///
	/// The first access runs the renderer; the outcome, failure included,
	/// is cached and every later access sees the same result. Concurrent
	/// first accesses are safe and still run the renderer only once.
	pub fn key_text(&self) -> Result<&str> {
		match self.key_text.get_or_init(|| self.renderer.render_key(&self.key)) {
			Ok(text) => Ok(text.as_str()),
			Err(e) => Err(e.clone()),
		}
	}

	/// Value as text, converted once and cached.
	pub fn value_text(&self) -> &str {
		self.value_text.get_or_init(|| String::from_utf8_lossy(&self.value).into_owned())
	}
}

impl Debug for QueryEntry {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("QueryEntry")
			.field("sequence", &self.sequence)
			.field("doc_id", &String::from_utf8_lossy(&self.doc_id))
			.field("key_len", &self.key.len())
			.field("value_len", &self.value.len())
			.finish()
	}
}
