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

//! Signature recovery specific errors

/// Recoverable signature error definition. Every failure mode here is
/// either a caller input problem or an expected dead end in a search;
/// none of them is fatal.
#[derive(Clone, Debug, Eq, thiserror::Error, PartialEq, Serialize, Deserialize)]
pub enum Error {
	/// Signature buffer is not the compact 65-byte form
	#[error("Invalid signature length {0}")]
	SignatureLength(usize),
	/// Recovery id outside 0..=3
	#[error("Invalid recovery id {0}")]
	InvalidRecoveryId(i32),
	/// r or s does not parse as a canonical scalar
	#[error("Invalid signature scalar")]
	InvalidScalar,
	/// Candidate x coordinate fell outside the base field
	#[error("X coordinate out of range")]
	XOutOfRange,
	/// x is not the abscissa of a point on the curve
	#[error("Invalid curve point")]
	InvalidPoint,
	/// r has no inverse mod the group order
	#[error("Signature r component is not invertible")]
	NotInvertible,
	/// Recovered the point at infinity
	#[error("Recovered point at infinity")]
	PointAtInfinity,
	/// Version byte below the applicable base
	#[error("Version byte {0} out of range")]
	Version(u8),
	/// Malformed private key material
	#[error("Invalid private key")]
	InvalidPrivateKey,
	/// Derived public key does not match the caller-supplied one
	#[error("Private key does not match expected public key")]
	KeyMismatch,
	/// No recovery id reproduces the expected public key
	#[error("No recovery id matches the expected public key")]
	RecoveryIdExhausted,
	/// Signing primitive failure
	#[error("Signing failed")]
	Signing,
	/// Hex conversion error
	#[error("Hex error {0}")]
	Hex(String),
}
