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

//! Public key recovery from a compact signature: reconstructs the
//! ephemeral point selected by the recovery id and evaluates
//! Q = r⁻¹·(s·R − e·G) as a combined double scalar multiplication.

use crate::compact::CompactSignature;
use crate::error::Error;
use crate::util::curve::{Curve, Scalar};
use crate::util::{static_curve_instance, to_hex};

/// A tag used for disambiguating which of the candidate ephemeral
/// points was used when the signature was produced
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct RecoveryId(i32);

impl RecoveryId {
	/// Allows library users to create valid recovery IDs from i32.
	pub fn from_i32(id: i32) -> Result<RecoveryId, Error> {
		match id {
			0 | 1 | 2 | 3 => Ok(RecoveryId(id)),
			_ => Err(Error::InvalidRecoveryId(id)),
		}
	}

	/// Allows library users to convert recovery IDs to i32.
	pub fn to_i32(self) -> i32 {
		self.0
	}

	/// Whether the ephemeral x coordinate wrapped past the group order
	/// (bit 1 of the id).
	fn x_overflowed(self) -> bool {
		self.0 & 2 != 0
	}

	/// Parity of the ephemeral y coordinate (bit 0 of the id).
	fn y_is_odd(self) -> bool {
		self.0 & 1 != 0
	}
}

/// Interprets the digest as a big-endian integer truncated to the curve
/// bit length (most significant bits kept), reduced mod the group
/// order.
fn digest_scalar(curve: &Curve, digest: &[u8]) -> Scalar {
	let mut padded = [0u8; 32];
	if digest.len() >= 32 {
		padded.copy_from_slice(&digest[..32]);
	} else {
		padded[32 - digest.len()..].copy_from_slice(digest);
	}
	curve.scalar_reduce(&padded)
}

/// Recovers the public key that produced `signature` over `digest`,
/// assuming the given recovery id, and returns its hex encoding in the
/// requested point format. The header byte of the signature is ignored;
/// only r and s are read.
///
/// A wrong recovery id is an expected outcome of a search, not an
/// exceptional condition, so every failure surfaces as an [`Error`] the
/// caller can branch on.
pub fn recover_public_key(
	digest: &[u8],
	signature: &[u8],
	recovery_id: RecoveryId,
	compressed: bool,
) -> Result<String, Error> {
	let curve = static_curve_instance();
	let signature = CompactSignature::from_slice(signature)?;

	let r_bytes = signature.r_bytes();
	let r = curve
		.scalar_from_bytes(&r_bytes)
		.ok_or(Error::InvalidScalar)?;
	let s = curve
		.scalar_from_bytes(&signature.s_bytes())
		.ok_or(Error::InvalidScalar)?;

	// Candidate x is r, or r + n for the rare signature whose ephemeral
	// x wrapped around the group order. A candidate at or past the
	// field prime means the wrapped case does not apply here.
	let x = curve
		.recovery_x(&r_bytes, recovery_id.x_overflowed())
		.ok_or(Error::XOutOfRange)?;
	let big_r = curve
		.point_from_x(&x, recovery_id.y_is_odd())
		.ok_or(Error::InvalidPoint)?;

	let e = digest_scalar(&curve, digest);
	let r_inv = curve.scalar_invert(&r).ok_or(Error::NotInvertible)?;
	let s_over_r = r_inv * s;
	let e_over_r = -(r_inv * e);

	// Q = r⁻¹·(s·R − e·G), evaluated as e_over_r·G + s_over_r·R in one
	// combined multiplication
	let q = curve.lincomb(&e_over_r, &big_r, &s_over_r);
	if curve.is_infinity(&q) {
		return Err(Error::PointAtInfinity);
	}

	Ok(to_hex(&curve.serialize_point(&q, compressed)))
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn recovery_id_bounds() {
		for id in 0..4 {
			assert_eq!(RecoveryId::from_i32(id).unwrap().to_i32(), id);
		}
		assert_eq!(RecoveryId::from_i32(-1), Err(Error::InvalidRecoveryId(-1)));
		assert_eq!(RecoveryId::from_i32(4), Err(Error::InvalidRecoveryId(4)));
	}

	#[test]
	fn recovery_id_bits() {
		assert!(!RecoveryId(0).x_overflowed() && !RecoveryId(0).y_is_odd());
		assert!(!RecoveryId(1).x_overflowed() && RecoveryId(1).y_is_odd());
		assert!(RecoveryId(2).x_overflowed() && !RecoveryId(2).y_is_odd());
		assert!(RecoveryId(3).x_overflowed() && RecoveryId(3).y_is_odd());
	}

	#[test]
	fn digest_scalar_truncates_to_curve_width() {
		let curve = static_curve_instance();

		// short digests are left padded
		let short = digest_scalar(&curve, &[1u8]);
		let mut one = [0u8; 32];
		one[31] = 1;
		assert_eq!(short, curve.scalar_reduce(&one));

		// over-long digests keep their most significant 32 bytes
		let mut long = [0u8; 40];
		long[..32].copy_from_slice(&[0xab; 32]);
		assert_eq!(
			digest_scalar(&curve, &long),
			curve.scalar_reduce(&[0xab; 32])
		);
	}
}
