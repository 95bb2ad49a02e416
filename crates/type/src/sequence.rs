// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

use std::{
	fmt,
	fmt::{Display, Formatter},
	num::ParseIntError,
	str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Visitor};

/// Sequence number of a document within a single query run.
///
/// Monotonically non-decreasing along the run; not globally ordered.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash)]
pub struct DocSequence(pub u64);

impl FromStr for DocSequence {
	type Err = ParseIntError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(DocSequence(u64::from_str(s)?))
	}
}

impl Display for DocSequence {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

impl PartialEq<i32> for DocSequence {
	fn eq(&self, other: &i32) -> bool {
		self.0 == *other as u64
	}
}

impl PartialEq<DocSequence> for i32 {
	fn eq(&self, other: &DocSequence) -> bool {
		*self as u64 == other.0
	}
}

impl PartialEq<u64> for DocSequence {
	fn eq(&self, other: &u64) -> bool {
		self.0.eq(other)
	}
}

impl From<DocSequence> for u64 {
	fn from(value: DocSequence) -> Self {
		value.0
	}
}

impl From<u64> for DocSequence {
	fn from(value: u64) -> Self {
		Self(value)
	}
}

impl Serialize for DocSequence {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_u64(self.0)
	}
}

impl<'de> Deserialize<'de> for DocSequence {
	fn deserialize<D>(deserializer: D) -> Result<DocSequence, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct U64Visitor;

		impl Visitor<'_> for U64Visitor {
			type Value = DocSequence;

			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				formatter.write_str("an unsigned 64-bit number")
			}

			fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
				Ok(DocSequence(value))
			}
		}

		deserializer.deserialize_u64(U64Visitor)
	}
}
