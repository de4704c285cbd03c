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

//! Compact signing: a raw ECDSA signature over the digest plus a search
//! for the recovery id under which recovery reproduces the signer's
//! public key.

use zeroize::Zeroizing;

use crate::compact::CompactSignature;
use crate::error::Error;
use crate::recovery::{recover_public_key, RecoveryId};
use crate::util::{from_hex, static_curve_instance, to_hex};
use crate::version::V_BASE;

/// Normalizes caller-supplied private key material: raw 32-byte scalar
/// bytes, or (at 64 bytes and over) its hex encoding.
fn normalize_private_key(private_key: &[u8]) -> Result<Zeroizing<[u8; 32]>, Error> {
	let mut secret = Zeroizing::new([0u8; 32]);
	if private_key.len() >= 64 {
		let hex = std::str::from_utf8(private_key).map_err(|_| Error::InvalidPrivateKey)?;
		let bytes = Zeroizing::new(from_hex(hex).map_err(Error::Hex)?);
		if bytes.len() != 32 {
			return Err(Error::InvalidPrivateKey);
		}
		secret.copy_from_slice(&bytes);
	} else if private_key.len() == 32 {
		secret.copy_from_slice(private_key);
	} else {
		return Err(Error::InvalidPrivateKey);
	}
	Ok(secret)
}

/// Signs an already-hashed message and packs the result into the
/// 65-byte compact form, searching recovery ids 0..=3 in order for the
/// first one under which [`recover_public_key`] reproduces
/// `expected_public_key` (supplied as uncompressed hex).
///
/// The private key is accepted as raw bytes or as a hex string and must
/// be consistent with `expected_public_key`; the signature is produced
/// by the backend primitive, which also owns nonce generation.
pub fn sign_compact(
	digest: &[u8],
	private_key: &[u8],
	expected_public_key: &str,
) -> Result<CompactSignature, Error> {
	let curve = static_curve_instance();

	let secret = normalize_private_key(private_key)?;
	let key = curve.signing_key(&secret).ok_or(Error::InvalidPrivateKey)?;

	// The caller's view of the key pair has to agree with the secret
	// scalar before anything gets signed with it.
	let derived = to_hex(&curve.public_from_signing_key(&key, false));
	if !derived.eq_ignore_ascii_case(expected_public_key) {
		return Err(Error::KeyMismatch);
	}

	let (r, s) = curve.sign_ecdsa(&key, digest).ok_or(Error::Signing)?;

	for id in 0..4u8 {
		let candidate = CompactSignature::from_parts(V_BASE as u8 + id, &r, &s);
		let recovery_id = RecoveryId::from_i32(i32::from(id))?;
		// A miss here is an expected dead end in the search, not a
		// failure of the call
		match recover_public_key(digest, candidate.as_ref(), recovery_id, false) {
			Ok(ref recovered) if recovered.eq_ignore_ascii_case(expected_public_key) => {
				debug!("sign_compact: recovery id {} matches", id);
				return Ok(candidate);
			}
			_ => {}
		}
	}

	Err(Error::RecoveryIdExhausted)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn private_key_raw_and_hex_agree() {
		let mut raw = [0u8; 32];
		raw[31] = 1;
		let from_raw = normalize_private_key(&raw).unwrap();

		let hex = "0000000000000000000000000000000000000000000000000000000000000001";
		let from_hex_str = normalize_private_key(hex.as_bytes()).unwrap();
		assert_eq!(*from_raw, *from_hex_str);

		let prefixed = format!("0x{}", hex);
		let from_prefixed = normalize_private_key(prefixed.as_bytes()).unwrap();
		assert_eq!(*from_raw, *from_prefixed);
	}

	#[test]
	fn private_key_odd_sizes_rejected() {
		assert!(normalize_private_key(&[1u8; 31]).is_err());
		assert!(normalize_private_key(&[1u8; 33]).is_err());
		// 64 bytes and over must decode as hex
		assert!(normalize_private_key(&[0xffu8; 64]).is_err());
	}
}
