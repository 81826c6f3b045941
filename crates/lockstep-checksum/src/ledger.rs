// SPDX-License-Identifier: Apache-2.0
use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, warn};

/// Failed comparison against a remote participant's checksum.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChecksumError {
    /// Both sides computed tick `tick` and disagree.
    #[error("checksum mismatch at tick {tick}: local {local}, remote {remote}")]
    Mismatch {
        /// Simulation tick.
        tick: u64,
        /// Locally recorded checksum.
        local: String,
        /// Checksum reported by the peer.
        remote: String,
    },
    /// No local checksum is recorded for the tick (not simulated yet, or pruned).
    #[error("no local checksum recorded for tick {tick}")]
    UnknownTick {
        /// Simulation tick.
        tick: u64,
    },
}

/// Local checksums by tick, awaiting comparison with remote reports.
///
/// ```
/// use lockstep_checksum::{ChecksumError, ChecksumLedger};
///
/// let mut ledger = ChecksumLedger::new();
/// ledger.record(7, "1.500000000");
/// assert!(ledger.verify(7, "1.500000000").is_ok());
/// assert!(matches!(ledger.verify(7, "1.5"), Err(ChecksumError::Mismatch { tick: 7, .. })));
/// assert!(matches!(ledger.verify(8, "0"), Err(ChecksumError::UnknownTick { tick: 8 })));
/// ```
#[derive(Debug, Default, Clone)]
pub struct ChecksumLedger {
    ticks: BTreeMap<u64, String>,
}

impl ChecksumLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the local checksum for `tick`, replacing any earlier value
    /// (a re-simulated tick after rollback supersedes the first run).
    pub fn record(&mut self, tick: u64, checksum: &str) {
        if let Some(previous) = self.ticks.insert(tick, checksum.to_owned()) {
            debug!(tick, %previous, checksum, "re-recorded tick checksum");
        }
    }

    /// Local checksum for `tick`.
    pub fn local(&self, tick: u64) -> Option<&str> {
        self.ticks.get(&tick).map(String::as_str)
    }

    /// Compares a peer's checksum with the local one.
    pub fn verify(&self, tick: u64, remote: &str) -> Result<(), ChecksumError> {
        let Some(local) = self.ticks.get(&tick) else {
            return Err(ChecksumError::UnknownTick { tick });
        };
        if local == remote {
            return Ok(());
        }
        warn!(tick, %local, remote, "lockstep desync");
        Err(ChecksumError::Mismatch {
            tick,
            local: local.clone(),
            remote: remote.to_owned(),
        })
    }

    /// Forgets every tick before `tick` (confirmed by all peers).
    pub fn prune_before(&mut self, tick: u64) {
        self.ticks.retain(|&t, _| t >= tick);
    }

    /// Drops every tick from `tick` onward, for rollback.
    pub fn rewind_to(&mut self, tick: u64) {
        self.ticks.retain(|&t, _| t < tick);
    }

    /// Earliest recorded tick.
    pub fn first_tick(&self) -> Option<u64> {
        self.ticks.keys().next().copied()
    }

    /// Number of recorded ticks.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// `true` when nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}
