// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 QuarryDB

use std::{
	fmt,
	fmt::{Display, Formatter},
	num::ParseIntError,
	str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Visitor};

/// Raw status word the engine reports alongside a cursor step.
///
/// [`StatusCode::SUCCESS`] is the neutral code: a step that did not move the
/// cursor but carries it means the results are cleanly exhausted. Any other
/// code on a non-moving step is a genuine engine failure.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash)]
pub struct StatusCode(pub i32);

impl StatusCode {
	/// The neutral code. Nothing went wrong.
	pub const SUCCESS: StatusCode = StatusCode(0);

	pub fn is_success(&self) -> bool {
		self.0 == 0
	}
}

impl FromStr for StatusCode {
	type Err = ParseIntError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(StatusCode(i32::from_str(s)?))
	}
}

impl Display for StatusCode {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

impl PartialEq<i32> for StatusCode {
	fn eq(&self, other: &i32) -> bool {
		self.0 == *other
	}
}

impl PartialEq<StatusCode> for i32 {
	fn eq(&self, other: &StatusCode) -> bool {
		*self == other.0
	}
}

impl From<StatusCode> for i32 {
	fn from(value: StatusCode) -> Self {
		value.0
	}
}

impl From<i32> for StatusCode {
	fn from(value: i32) -> Self {
		Self(value)
	}
}

impl Serialize for StatusCode {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_i32(self.0)
	}
}

impl<'de> Deserialize<'de> for StatusCode {
	fn deserialize<D>(deserializer: D) -> Result<StatusCode, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct I32Visitor;

		impl Visitor<'_> for I32Visitor {
			type Value = StatusCode;

			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				formatter.write_str("a signed 32-bit number")
			}

			fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
				Ok(StatusCode(value as i32))
			}

			fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
				Ok(StatusCode(value as i32))
			}
		}

		deserializer.deserialize_i32(I32Visitor)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_success_is_zero() {
		assert!(StatusCode::SUCCESS.is_success());
		assert_eq!(StatusCode::SUCCESS, 0);
		assert!(!StatusCode(7).is_success());
	}

	#[test]
	fn test_display() {
		assert_eq!(StatusCode(13).to_string(), "13");
		assert_eq!(StatusCode(-2).to_string(), "-2");
	}

	#[test]
	fn test_from_str() {
		assert_eq!("5".parse::<StatusCode>().unwrap(), StatusCode(5));
		assert!("not a number".parse::<StatusCode>().is_err());
	}

	#[test]
	fn test_serde_round_trip() {
		let json = serde_json::to_string(&StatusCode(21)).unwrap();
		assert_eq!(json, "21");
		let back: StatusCode = serde_json::from_str(&json).unwrap();
		assert_eq!(back, StatusCode(21));
	}

	#[test]
	fn test_serde_negative() {
		let back: StatusCode = serde_json::from_str("-9").unwrap();
		assert_eq!(back, StatusCode(-9));
	}
}
