// SPDX-License-Identifier: Apache-2.0
//! lockstep-checksum: cross-participant determinism checks.
//!
//! Each participant sums a per-body value over the canonically ordered body
//! list once per tick and renders the sum as a decimal string. The strings
//! are exchanged out of band and compared through a [`ChecksumLedger`].
//!
//! The body list must arrive in the canonical order fixed upstream; the sum
//! is a plain ordered fold over it.
//!
//! [`contact_digest`] hashes contact sequences byte-for-byte for finer
//! comparisons when a tick checksum diverges.
#![forbid(unsafe_code)]

mod digest;
mod extractor;
mod ledger;

pub use digest::{contact_digest, digest_hex, manifold_digest, Digest};
pub use extractor::{accumulate, compute_checksum, ChecksumBody, WorldChecksumExtractor};
pub use ledger::{ChecksumError, ChecksumLedger};
