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

//! Thin adapter over the k256 secp256k1 backend, plus a globally
//! accessible static instance of it to avoid repeated initialisation.
//! All scalar and point operations used by the signature code go through
//! here; nothing above this layer performs arithmetic below the
//! scalar/point level.

use std::sync::Arc;

use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{Signature as EcdsaSignature, SigningKey};
use k256::elliptic_curve::bigint::{CheckedAdd, Encoding, U256};
use k256::elliptic_curve::ops::{LinearCombination, Reduce};
use k256::elliptic_curve::point::DecompressPoint;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::subtle::Choice;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, Secp256k1};

pub use k256::{AffinePoint, ProjectivePoint, Scalar};

/// Order n of the secp256k1 group.
pub const CURVE_ORDER: U256 = <Secp256k1 as k256::elliptic_curve::Curve>::ORDER;

/// Prime p of the secp256k1 base field.
pub const FIELD_PRIME: U256 =
	U256::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F");

/// Handle to the secp256k1 arithmetic backend.
pub struct Curve {
	generator: ProjectivePoint,
}

impl Curve {
	/// Builds the backend handle, running a sanity check of the
	/// underlying arithmetic. A backend that cannot reproduce the curve
	/// generator is unusable, so failure here is fatal.
	pub fn bootstrap() -> Curve {
		let curve = Curve {
			generator: ProjectivePoint::GENERATOR,
		};
		// reconstructing the generator from its own x coordinate must
		// give G back
		let encoded = curve.serialize_point(&curve.generator, true);
		let mut x = [0u8; 32];
		x.copy_from_slice(&encoded[1..33]);
		let check = curve
			.point_from_x(&x, encoded[0] == 3)
			.map(ProjectivePoint::from);
		assert!(
			check == Some(curve.generator) && !curve.is_infinity(&curve.generator),
			"secp256k1 backend failed its bootstrap self-check"
		);
		curve
	}

	/// The curve generator point G.
	pub fn generator(&self) -> ProjectivePoint {
		self.generator
	}

	/// Parses a canonical scalar (big-endian, below the group order)
	/// from 32 bytes.
	pub fn scalar_from_bytes(&self, bytes: &[u8; 32]) -> Option<Scalar> {
		Scalar::from_repr(FieldBytes::from(*bytes)).into()
	}

	/// Interprets 32 big-endian bytes as an integer reduced mod the
	/// group order.
	pub fn scalar_reduce(&self, bytes: &[u8; 32]) -> Scalar {
		<Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(*bytes))
	}

	/// Modular inverse over the group order. None for the zero scalar.
	pub fn scalar_invert(&self, scalar: &Scalar) -> Option<Scalar> {
		scalar.invert().into()
	}

	/// Candidate x coordinate for an ephemeral point: r, or r + n when
	/// `overflow` asks for the wrapped case. None once the candidate
	/// leaves the base field.
	pub fn recovery_x(&self, r: &[u8; 32], overflow: bool) -> Option<[u8; 32]> {
		let r = U256::from_be_bytes(*r);
		let x = if overflow {
			Option::<U256>::from(r.checked_add(&CURVE_ORDER))?
		} else {
			r
		};
		if x >= FIELD_PRIME {
			return None;
		}
		Some(x.to_be_bytes())
	}

	/// Reconstructs the curve point with the given x coordinate and y
	/// parity. None if x is not the abscissa of a curve point.
	pub fn point_from_x(&self, x: &[u8; 32], y_is_odd: bool) -> Option<AffinePoint> {
		AffinePoint::decompress(&FieldBytes::from(*x), Choice::from(y_is_odd as u8)).into()
	}

	/// Combined double scalar multiplication gk·G + pk·P in a single
	/// pass.
	pub fn lincomb(&self, gk: &Scalar, point: &AffinePoint, pk: &Scalar) -> ProjectivePoint {
		ProjectivePoint::lincomb(&self.generator, gk, &ProjectivePoint::from(*point), pk)
	}

	/// Whether the point is the point at infinity.
	pub fn is_infinity(&self, point: &ProjectivePoint) -> bool {
		*point == ProjectivePoint::IDENTITY
	}

	/// SEC1 serialization of a point, compressed (33 bytes) or
	/// uncompressed (65 bytes).
	pub fn serialize_point(&self, point: &ProjectivePoint, compressed: bool) -> Vec<u8> {
		point
			.to_affine()
			.to_encoded_point(compressed)
			.as_bytes()
			.to_vec()
	}

	/// Builds a signing key from 32 secret bytes. None if the bytes are
	/// zero or not below the group order.
	pub fn signing_key(&self, secret: &[u8; 32]) -> Option<SigningKey> {
		SigningKey::from_bytes(&FieldBytes::from(*secret)).ok()
	}

	/// SEC1 serialization of the public key behind a signing key.
	pub fn public_from_signing_key(&self, key: &SigningKey, compressed: bool) -> Vec<u8> {
		key.verifying_key()
			.to_encoded_point(compressed)
			.as_bytes()
			.to_vec()
	}

	/// Raw ECDSA (r, s) over an already-hashed message, as fixed-width
	/// 32-byte big-endian buffers. Nonce generation is delegated to the
	/// backend (deterministic per RFC6979).
	pub fn sign_ecdsa(&self, key: &SigningKey, digest: &[u8]) -> Option<([u8; 32], [u8; 32])> {
		let sig: EcdsaSignature = key.sign_prehash(digest).ok()?;
		let (r, s) = sig.split_scalars();
		Some((r.to_bytes().into(), s.to_bytes().into()))
	}
}

lazy_static! {
	/// Static reference to the curve backend, bootstrapped exactly once
	/// on first access no matter how many threads race here
	pub static ref CURVE: Arc<Curve> = Arc::new(Curve::bootstrap());
}

/// Returns the static curve instance.
pub fn static_curve_instance() -> Arc<Curve> {
	CURVE.clone()
}

/// Forces the one-time backend bootstrap. Idempotent; every caller
/// observes a fully initialised backend once this returns.
pub fn ensure_ready() {
	let _ = static_curve_instance();
}

#[cfg(test)]
mod test {
	use super::*;
	use std::convert::TryInto;

	#[test]
	fn static_instance_is_shared() {
		ensure_ready();
		let a = static_curve_instance();
		let b = static_curve_instance();
		assert!(Arc::ptr_eq(&a, &b));
	}

	#[test]
	fn generator_round_trips_through_compression() {
		let curve = static_curve_instance();
		let encoded = curve.serialize_point(&curve.generator(), true);
		assert_eq!(encoded.len(), 33);
		let x: [u8; 32] = encoded[1..33].try_into().unwrap();
		let point = curve.point_from_x(&x, encoded[0] == 3).unwrap();
		assert_eq!(ProjectivePoint::from(point), curve.generator());
	}

	#[test]
	fn x_candidates_stay_in_field() {
		let curve = static_curve_instance();
		// r close to the field prime leaves no room for the wrapped case
		let r = FIELD_PRIME.to_be_bytes();
		assert!(curve.recovery_x(&r, false).is_none());
		assert!(curve.recovery_x(&r, true).is_none());
	}

	#[test]
	fn scalar_zero_has_no_inverse() {
		let curve = static_curve_instance();
		let zero = curve.scalar_from_bytes(&[0u8; 32]).unwrap();
		assert!(curve.scalar_invert(&zero).is_none());
	}
}
