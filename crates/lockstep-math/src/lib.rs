// SPDX-License-Identifier: Apache-2.0
//! lockstep-math: deterministic fixed-point arithmetic for lockstep physics.
//!
//! Every participant in a lockstep session must compute bit-identical results
//! from identical inputs. This crate provides the numeric substrate that makes
//! that possible without relying on any platform floating-point unit:
//!
//! - [`Fx`]: Q32.32 fixed-point scalar stored in an `i64`.
//! - [`Vec3`]: three-component vector over [`Fx`].
//! - [`Mat3`]: column-major 3×3 matrix used for orientations.
//!
//! Determinism contract:
//! - All arithmetic is integer arithmetic; rounding is round-to-nearest,
//!   ties-to-even, and overflow saturates.
//! - Transcendentals (`sqrt`, `sin`, `cos`) are evaluated with fixed
//!   iteration counts in integer space.
//! - `f32` conversions exist only for boundary crossings (authoring, tests,
//!   diagnostics) and are themselves bit-exact.
#![forbid(unsafe_code)]

mod fixed_q32_32;
mod fx;
mod mat3;
mod trig;
mod vec3;

pub use fx::Fx;
pub use mat3::Mat3;
pub use vec3::Vec3;
