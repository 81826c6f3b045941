// SPDX-License-Identifier: Apache-2.0
//! lockstep-collide: deterministic narrow-phase collision detection.
//!
//! Every routine in this crate runs on [`lockstep_math::Fx`] fixed-point
//! arithmetic, so identical inputs yield bit-identical contacts on every
//! participant of a lockstep session.
//!
//! * [`NarrowPhase::collide`] is the entry point: it selects one routine per
//!   unordered pair of [`ShapeKind`]s and orients the result from A to B.
//! * Box-box pairs produce a [`Manifold`] of up to four [`ContactRecord`]s
//!   with stable [`FeatureId`]s for solver warm-starting.
//! * Every other supported pair produces a single [`Contact`].
//!
//! Degenerate geometry (zero-length axes, coincident points) resolves through
//! epsilon branches; no routine returns an error.
#![forbid(unsafe_code)]

mod config;
mod contact;
mod dispatch;
pub mod pairs;
mod pose;
mod segment;
mod shape;

pub use config::{
    ConfigError, ConfigService, ConfigStore, NarrowPhaseConfig, SphereTriangleMode,
    NARROW_PHASE_KEY,
};
pub use contact::{
    Contact, ContactBuffer, ContactBufferError, ContactRecord, FeatureId, Manifold, SatFeature,
    CONTACT_CAPACITY, FALLBACK_NORMAL,
};
pub use dispatch::{Collision, NarrowPhase, PairKind};
pub use pose::Pose;
pub use segment::{ClosestPoints, Segment};
pub use shape::{BoxShape, CapsuleShape, Shape, ShapeKind, SphereShape, SupportCenter, TriangleShape};
