// Copyright 2021 The Recsig Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Compact wire encoding of a recoverable signature: one header byte
//! carrying the "v" version, followed by r and s as fixed-width
//! big-endian scalars. The layout is a compatibility contract with any
//! verifier and is bit-for-bit fixed.

use crate::error::Error;
use crate::util::{from_hex, to_hex};
use serde::{de, ser};
use std::fmt;

/// Total size of a compact signature in bytes.
pub const COMPACT_SIGNATURE_SIZE: usize = 65;

/// A 65-byte compact recoverable signature: `v ‖ r ‖ s`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CompactSignature([u8; COMPACT_SIGNATURE_SIZE]);

impl CompactSignature {
	/// Builds a compact signature from a header byte and the fixed-width
	/// r and s components.
	pub fn from_parts(header: u8, r: &[u8; 32], s: &[u8; 32]) -> CompactSignature {
		let mut bytes = [0; COMPACT_SIGNATURE_SIZE];
		bytes[0] = header;
		bytes[1..33].copy_from_slice(r);
		bytes[33..65].copy_from_slice(s);
		CompactSignature(bytes)
	}

	/// Parses a compact signature, rejecting any buffer that is not
	/// exactly 65 bytes before looking at its contents.
	pub fn from_slice(bytes: &[u8]) -> Result<CompactSignature, Error> {
		if bytes.len() != COMPACT_SIGNATURE_SIZE {
			return Err(Error::SignatureLength(bytes.len()));
		}
		let mut sig = [0; COMPACT_SIGNATURE_SIZE];
		sig.copy_from_slice(bytes);
		Ok(CompactSignature(sig))
	}

	/// The header ("v") byte.
	pub fn header(&self) -> u8 {
		self.0[0]
	}

	/// The r component, as 32 big-endian bytes.
	pub fn r_bytes(&self) -> [u8; 32] {
		let mut r = [0; 32];
		r.copy_from_slice(&self.0[1..33]);
		r
	}

	/// The s component, as 32 big-endian bytes.
	pub fn s_bytes(&self) -> [u8; 32] {
		let mut s = [0; 32];
		s.copy_from_slice(&self.0[33..65]);
		s
	}

	/// Hex encoding of the full 65 bytes.
	pub fn to_hex(&self) -> String {
		to_hex(&self.0)
	}

	/// Parses a compact signature from its hex encoding.
	pub fn from_hex(hex: &str) -> Result<CompactSignature, Error> {
		let bytes = from_hex(hex).map_err(Error::Hex)?;
		CompactSignature::from_slice(&bytes)
	}
}

impl AsRef<[u8]> for CompactSignature {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl fmt::Debug for CompactSignature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "CompactSignature({})", self.to_hex())
	}
}

impl ser::Serialize for CompactSignature {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: ser::Serializer,
	{
		serializer.serialize_str(&self.to_hex())
	}
}

impl<'de> de::Deserialize<'de> for CompactSignature {
	fn deserialize<D>(deserializer: D) -> Result<CompactSignature, D::Error>
	where
		D: de::Deserializer<'de>,
	{
		deserializer.deserialize_str(CompactSignatureVisitor)
	}
}

struct CompactSignatureVisitor;

impl<'de> de::Visitor<'de> for CompactSignatureVisitor {
	type Value = CompactSignature;

	fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
		formatter.write_str("a hex encoded compact signature")
	}

	fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		CompactSignature::from_hex(s).map_err(|e| E::custom(e.to_string()))
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn sample() -> CompactSignature {
		let mut r = [0u8; 32];
		let mut s = [0u8; 32];
		r[31] = 1;
		s[0] = 0x7f;
		CompactSignature::from_parts(28, &r, &s)
	}

	#[test]
	fn parts_round_trip() {
		let sig = sample();
		assert_eq!(sig.header(), 28);
		assert_eq!(sig.r_bytes()[31], 1);
		assert_eq!(sig.s_bytes()[0], 0x7f);
		let parsed = CompactSignature::from_slice(sig.as_ref()).unwrap();
		assert_eq!(parsed, sig);
	}

	#[test]
	fn length_is_checked_before_parsing() {
		assert_eq!(
			CompactSignature::from_slice(&[0u8; 64]),
			Err(Error::SignatureLength(64))
		);
		assert_eq!(
			CompactSignature::from_slice(&[0u8; 66]),
			Err(Error::SignatureLength(66))
		);
		assert_eq!(
			CompactSignature::from_slice(&[]),
			Err(Error::SignatureLength(0))
		);
	}

	#[test]
	fn ser_compact_signature() {
		let sig = sample();
		let json = serde_json::to_string(&sig).unwrap();
		assert_eq!(json, format!("\"{}\"", sig.to_hex()));
		let parsed: CompactSignature = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed, sig);
	}

	#[test]
	fn hex_round_trip() {
		let sig = sample();
		assert_eq!(CompactSignature::from_hex(&sig.to_hex()), Ok(sig));
		assert!(CompactSignature::from_hex("abcd").is_err());
	}
}
