// SPDX-License-Identifier: Apache-2.0
//! Narrow-phase tuning and its storage port.
//!
//! [`NarrowPhaseConfig`] holds the heuristic constants of the box-box test and
//! the sphere-triangle routine selection. Values persist as JSON through a
//! [`ConfigStore`]; fixed-point fields encode as raw integers so a stored
//! config reloads bit-exactly on every participant.

use lockstep_math::Fx;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Key under which [`ConfigService::load_narrow_phase`] stores its value.
pub const NARROW_PHASE_KEY: &str = "narrow_phase";

/// Which sphere-triangle routine the dispatcher runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SphereTriangleMode {
    /// Voronoi-region closest point; normal from the triangle winding.
    #[default]
    Closest,
    /// Plane test with edge-normal containment and edge fallbacks; two-sided.
    Defensive,
}

/// Tunable narrow-phase constants.
///
/// The biases are heuristics that pick between nearly tied axes; they do not
/// affect whether a pair collides, only which manifold is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrowPhaseConfig {
    /// Added to every `|R|` entry of the box-box test so near-parallel edge
    /// pairs never produce a zero-length axis.
    pub parallel_bias: Fx,
    /// B's face axis replaces A's only when it is shallower by more than this.
    pub anti_b_bias: Fx,
    /// An edge axis replaces the best face axis only when it is shallower by
    /// more than this.
    pub anti_edge_bias: Fx,
    /// Sphere-triangle routine.
    pub sphere_triangle_mode: SphereTriangleMode,
}

impl Default for NarrowPhaseConfig {
    fn default() -> Self {
        Self {
            parallel_bias: Fx::from_ratio(1, 10_000),
            anti_b_bias: Fx::from_ratio(1, 100),
            anti_edge_bias: Fx::from_ratio(1, 50),
            sphere_triangle_mode: SphereTriangleMode::Closest,
        }
    }
}

impl NarrowPhaseConfig {
    /// Rejects negative biases.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("parallel_bias", self.parallel_bias),
            ("anti_b_bias", self.anti_b_bias),
            ("anti_edge_bias", self.anti_edge_bias),
        ];
        for (name, value) in fields {
            if value < Fx::ZERO {
                return Err(ConfigError::Invalid(format!("{name} must be non-negative, got {value}")));
            }
        }
        Ok(())
    }
}

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw config blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// A decoded value failed validation.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Serializes config values and delegates storage to a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Consume the service and return the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: ConfigStore> ConfigService<S> {
    /// Load and deserialize a config value for `key`. Returns `Ok(None)` if missing.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        match self.store.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Serialize and persist a config value for `key`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }

    /// Loads and validates the narrow-phase config, falling back to defaults
    /// when nothing is stored.
    pub fn load_narrow_phase(&self) -> Result<NarrowPhaseConfig, ConfigError> {
        let config = self
            .load::<NarrowPhaseConfig>(NARROW_PHASE_KEY)?
            .unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Validates and persists the narrow-phase config.
    pub fn save_narrow_phase(&self, config: &NarrowPhaseConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.save(NARROW_PHASE_KEY, config)
    }
}
