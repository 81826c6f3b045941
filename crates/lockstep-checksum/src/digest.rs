// SPDX-License-Identifier: Apache-2.0
//! Byte-level digests of contact results.
//!
//! Values are hashed as raw little-endian integers (`Fx` raw `i64`, feature
//! ids as `i32`), never through a float or text form.

use blake3::Hasher;
use lockstep_collide::{ContactBuffer, Manifold, SatFeature};
use lockstep_math::Vec3;

/// blake3 output.
pub type Digest = [u8; 32];

/// Digest of a contact sequence, order included.
pub fn contact_digest(contacts: &ContactBuffer) -> Digest {
    let mut hasher = Hasher::new();
    hash_contacts(&mut hasher, contacts);
    *hasher.finalize().as_bytes()
}

/// Digest of a manifold: its normal, winning feature, and contacts.
pub fn manifold_digest(manifold: &Manifold) -> Digest {
    let mut hasher = Hasher::new();
    hash_vec(&mut hasher, &manifold.normal);
    let feature: [u8; 3] = match manifold.feature {
        SatFeature::FaceA { axis } => [0, axis_byte(axis), 0],
        SatFeature::FaceB { axis } => [1, axis_byte(axis), 0],
        SatFeature::Edge { a_axis, b_axis } => [2, axis_byte(a_axis), axis_byte(b_axis)],
    };
    hasher.update(&feature);
    hash_contacts(&mut hasher, &manifold.contacts);
    *hasher.finalize().as_bytes()
}

/// Lowercase hex rendering for logs and test fixtures.
pub fn digest_hex(digest: &Digest) -> String {
    hex::encode(digest)
}

fn hash_contacts(hasher: &mut Hasher, contacts: &ContactBuffer) {
    let len = u32::try_from(contacts.len()).unwrap_or(u32::MAX);
    hasher.update(&len.to_le_bytes());
    for record in contacts {
        hash_vec(hasher, &record.position);
        hasher.update(&record.depth.raw().to_le_bytes());
        hasher.update(&record.id.raw().to_le_bytes());
    }
}

fn hash_vec(hasher: &mut Hasher, v: &Vec3) {
    for c in v.to_array() {
        hasher.update(&c.raw().to_le_bytes());
    }
}

fn axis_byte(axis: usize) -> u8 {
    u8::try_from(axis).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockstep_collide::{ContactRecord, FeatureId};
    use lockstep_math::Fx;

    fn buffer(ids: &[i32]) -> ContactBuffer {
        let mut buf = ContactBuffer::new();
        for &id in ids {
            let position = Vec3::from_ints(id, 0, 0);
            buf.push(ContactRecord::new(position, Fx::NEG_ONE, FeatureId::from_raw(id)))
                .unwrap();
        }
        buf
    }

    #[test]
    fn order_matters() {
        assert_eq!(contact_digest(&buffer(&[1, 2])), contact_digest(&buffer(&[1, 2])));
        assert_ne!(contact_digest(&buffer(&[1, 2])), contact_digest(&buffer(&[2, 1])));
    }

    #[test]
    fn empty_buffer_digest_is_the_length_prefix_hash() {
        let expected = blake3::hash(&0_u32.to_le_bytes());
        assert_eq!(&contact_digest(&ContactBuffer::new()), expected.as_bytes());
    }

    #[test]
    fn hex_is_64_lowercase_chars() {
        let hex = digest_hex(&contact_digest(&buffer(&[3])));
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn manifold_digest_includes_the_feature() {
        let contacts = buffer(&[1]);
        let face = Manifold {
            normal: Vec3::UNIT_X,
            contacts,
            feature: SatFeature::FaceA { axis: 0 },
        };
        let other = Manifold {
            feature: SatFeature::FaceB { axis: 0 },
            ..face
        };
        assert_ne!(manifold_digest(&face), manifold_digest(&other));
    }
}
