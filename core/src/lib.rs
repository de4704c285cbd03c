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

//! Recoverable ECDSA signatures over secp256k1: compact signing with a
//! recovery id search, public key recovery from a signature and digest
//! alone, and normalisation of the legacy wire-level "v" byte used by
//! account-based chains.

#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![warn(missing_docs)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub use recsig_util as util;

pub mod compact;
mod error;
pub mod recovery;
pub mod sign;
pub mod version;

pub use crate::compact::{CompactSignature, COMPACT_SIGNATURE_SIZE};
pub use crate::error::Error;
pub use crate::recovery::{recover_public_key, RecoveryId};
pub use crate::sign::sign_compact;
pub use crate::version::{recover_compact, ChainContext};
