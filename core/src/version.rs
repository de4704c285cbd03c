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

//! Wire-level "v" byte normalisation: maps the legacy 27/28 convention,
//! the raw 0/1 convention emitted by some hardware signers, and the
//! replay-protected convention down to a recovery id before dispatching
//! to recovery.

use crate::compact::COMPACT_SIGNATURE_SIZE;
use crate::error::Error;
use crate::recovery::{recover_public_key, RecoveryId};

/// Header byte offset of the legacy (pre replay protection) convention.
pub const V_BASE: u64 = 27;

/// Caller context describing which "v" convention a signature header
/// byte uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainContext {
	/// Legacy encoding, v = 27 + recovery id.
	Legacy,
	/// Replay protected encoding, v = 35 + 2·chain_id + recovery id.
	ReplayProtected {
		/// Chain id the signature commits to.
		chain_id: u64,
	},
}

impl ChainContext {
	/// The header byte base under this convention.
	pub fn v_base(&self) -> u64 {
		match self {
			ChainContext::Legacy => V_BASE,
			ChainContext::ReplayProtected { chain_id } => 35 + 2 * chain_id,
		}
	}
}

/// Recovers the public key from a compact signature whose header byte
/// carries a wire-level "v" under the given convention, returning the
/// uncompressed hex encoding.
pub fn recover_compact(
	digest: &[u8],
	signature: &[u8],
	context: ChainContext,
) -> Result<String, Error> {
	if signature.len() != COMPACT_SIGNATURE_SIZE {
		return Err(Error::SignatureLength(signature.len()));
	}

	let mut version = u64::from(signature[0]);

	// 0 and 1 show up in place of 27 and 28 in some hardware wallet
	// signings
	if version < V_BASE {
		version += V_BASE;
	}

	let v_base = context.v_base();
	if version < v_base {
		return Err(Error::Version(signature[0]));
	}

	// Bound the id explicitly; a header byte past base + 3 encodes no
	// candidate point
	let recovery_id = RecoveryId::from_i32((version - v_base) as i32)?;
	trace!(
		"recover_compact: version {} -> recovery id {}",
		version,
		recovery_id.to_i32()
	);

	recover_public_key(digest, signature, recovery_id, false)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn v_base_per_context() {
		assert_eq!(ChainContext::Legacy.v_base(), 27);
		assert_eq!(ChainContext::ReplayProtected { chain_id: 0 }.v_base(), 35);
		assert_eq!(ChainContext::ReplayProtected { chain_id: 1 }.v_base(), 37);
		assert_eq!(
			ChainContext::ReplayProtected { chain_id: 61 }.v_base(),
			157
		);
	}

	#[test]
	fn version_below_base_is_rejected() {
		let mut sig = [1u8; COMPACT_SIGNATURE_SIZE];
		sig[0] = 30;
		assert_eq!(
			recover_compact(&[0u8; 32], &sig, ChainContext::ReplayProtected { chain_id: 1 }),
			Err(Error::Version(30))
		);
	}

	#[test]
	fn out_of_range_recovery_id_is_rejected() {
		let mut sig = [1u8; COMPACT_SIGNATURE_SIZE];
		// legacy base 27, so 32 would decode to recovery id 5
		sig[0] = 32;
		assert_eq!(
			recover_compact(&[0u8; 32], &sig, ChainContext::Legacy),
			Err(Error::InvalidRecoveryId(5))
		);
	}

	#[test]
	fn length_is_checked_first() {
		assert_eq!(
			recover_compact(&[0u8; 32], &[0u8; 64], ChainContext::Legacy),
			Err(Error::SignatureLength(64))
		);
	}
}
