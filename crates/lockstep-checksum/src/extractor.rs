// SPDX-License-Identifier: Apache-2.0
use std::fmt::Write as _;

use lockstep_collide::Pose;
use lockstep_math::{Fx, Vec3};
use tracing::trace;

/// Deterministic per-body contribution to the tick checksum.
pub trait ChecksumBody {
    /// Value summed into the accumulator.
    fn checksum(&self) -> Fx;
}

impl ChecksumBody for Pose {
    /// Sum of the position components and all nine orientation entries.
    fn checksum(&self) -> Fx {
        let mut sum = component_sum(&self.position);
        for col in 0..3 {
            sum += component_sum(&self.orientation.col(col));
        }
        sum
    }
}

impl ChecksumBody for Fx {
    fn checksum(&self) -> Fx {
        *self
    }
}

impl<B: ChecksumBody + ?Sized> ChecksumBody for &B {
    fn checksum(&self) -> Fx {
        (**self).checksum()
    }
}

fn component_sum(v: &Vec3) -> Fx {
    v.x + v.y + v.z
}

/// Ordered fixed-point sum of every body's checksum.
pub fn accumulate<B: ChecksumBody>(bodies: &[B]) -> Fx {
    bodies
        .iter()
        .fold(Fx::ZERO, |sum, body| sum + body.checksum())
}

/// [`accumulate`] rendered through `Fx`'s exact decimal `Display`.
///
/// ```
/// use lockstep_checksum::compute_checksum;
/// use lockstep_math::Fx;
///
/// assert_eq!(compute_checksum(&[Fx::ONE, Fx::HALF]), "1.500000000");
/// assert_eq!(compute_checksum::<Fx>(&[]), "0.000000000");
/// ```
pub fn compute_checksum<B: ChecksumBody>(bodies: &[B]) -> String {
    accumulate(bodies).to_string()
}

/// Renders tick checksums into one reused buffer.
#[derive(Debug, Default, Clone)]
pub struct WorldChecksumExtractor {
    buffer: String,
}

impl WorldChecksumExtractor {
    /// Creates an extractor with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checksum of `bodies`; the returned slice is valid until the next call.
    pub fn extract<B: ChecksumBody>(&mut self, bodies: &[B]) -> &str {
        let sum = accumulate(bodies);
        self.buffer.clear();
        write!(self.buffer, "{sum}").ok();
        trace!(bodies = bodies.len(), checksum = %self.buffer, "extracted checksum");
        &self.buffer
    }

    /// Last rendered checksum.
    pub fn last(&self) -> &str {
        &self.buffer
    }
}
