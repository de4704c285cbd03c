// Copyright 2020 The Recsig Developers
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

//! Implements hex-encoding from bytes to string and decoding of strings
//! to bytes.

use std::fmt::Write;

/// Encode the provided bytes into a hex string
pub fn to_hex(bytes: &[u8]) -> String {
	let mut s = String::with_capacity(bytes.len() * 2);
	for byte in bytes {
		write!(&mut s, "{:02x}", byte).expect("Unable to write");
	}
	s
}

/// Decode a hex string into bytes. An optional 0x prefix is accepted.
pub fn from_hex(hex: &str) -> Result<Vec<u8>, String> {
	let hex = hex.trim();
	let hex = if hex.starts_with("0x") || hex.starts_with("0X") {
		&hex[2..]
	} else {
		hex
	};
	if hex.len() % 2 != 0 {
		return Err(format!("odd length hex string: {}", hex.len()));
	}
	(0..hex.len())
		.step_by(2)
		.map(|i| {
			u8::from_str_radix(&hex[i..i + 2], 16)
				.map_err(|_| format!("invalid hex character at {}", i))
		})
		.collect()
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_to_hex() {
		assert_eq!(to_hex(&[0, 0, 0, 0]), "00000000");
		assert_eq!(to_hex(&[10, 11, 12, 13]), "0a0b0c0d");
		assert_eq!(to_hex(&[0, 0, 0, 255]), "000000ff");
		assert_eq!(to_hex(&[]), "");
	}

	#[test]
	fn test_from_hex() {
		assert_eq!(from_hex(""), Ok(vec![]));
		assert_eq!(from_hex("00000000"), Ok(vec![0, 0, 0, 0]));
		assert_eq!(from_hex("0a0b0c0d"), Ok(vec![10, 11, 12, 13]));
		assert_eq!(from_hex("000000FF"), Ok(vec![0, 0, 0, 255]));
		assert_eq!(from_hex("0x000000ff"), Ok(vec![0, 0, 0, 255]));
		assert!(from_hex("abc").is_err());
		assert!(from_hex("0xzzzz").is_err());
	}

	#[test]
	fn test_round_trip() {
		let bytes = vec![7, 0, 128, 255, 32];
		assert_eq!(from_hex(&to_hex(&bytes)), Ok(bytes));
	}
}
