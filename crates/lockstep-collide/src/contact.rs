// SPDX-License-Identifier: Apache-2.0
//! Contact records, the fixed-capacity contact buffer, and pair results.

use core::fmt;

use lockstep_math::{Fx, Vec3};
use lockstep_pool::PoolItem;
use thiserror::Error;

/// Maximum number of records a [`ContactBuffer`] holds.
pub const CONTACT_CAPACITY: usize = 8;

/// Direction reported when a contact normal is undefined (coincident centers
/// or closest points).
pub const FALLBACK_NORMAL: Vec3 = Vec3::UNIT_Z;

/// Stable contact identity derived from integer feature indices.
///
/// Ids are a fixed polynomial over small integers in wrapping `i32`
/// arithmetic. They never depend on positions or depths, so the same pair of
/// features yields the same id on every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureId(i32);

impl FeatureId {
    const SEED: i32 = 17;
    const FACTOR: i32 = 31;

    /// Wraps a raw id.
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw integer value.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Folds one more part into the id.
    pub const fn combine(self, part: i32) -> Self {
        Self(self.0.wrapping_mul(Self::FACTOR).wrapping_add(part))
    }

    /// Builds an id from an ordered list of parts.
    pub const fn from_parts(parts: &[i32]) -> Self {
        let mut id = Self(Self::SEED);
        let mut i = 0;
        while i < parts.len() {
            id = id.combine(parts[i]);
            i += 1;
        }
        id
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// One point of a contact manifold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ContactRecord {
    /// World-space contact position.
    pub position: Vec3,
    /// Signed separation along the manifold normal; `<= 0` while penetrating.
    pub depth: Fx,
    /// Stable feature identity.
    pub id: FeatureId,
}

impl ContactRecord {
    /// Creates a record.
    pub const fn new(position: Vec3, depth: Fx, id: FeatureId) -> Self {
        Self {
            position,
            depth,
            id,
        }
    }
}

/// Errors from [`ContactBuffer`] mutation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ContactBufferError {
    /// The buffer already holds [`CONTACT_CAPACITY`] records.
    #[error("contact buffer is full ({capacity} records)")]
    Full {
        /// Buffer capacity.
        capacity: usize,
    },
    /// Index past the current length.
    #[error("contact index {index} out of bounds (len {len})")]
    OutOfBounds {
        /// Requested index.
        index: usize,
        /// Current length.
        len: usize,
    },
}

/// Insertion-ordered, fixed-capacity list of [`ContactRecord`]s.
///
/// Storage is an inline array plus a length counter, so buffers live on the
/// stack and never allocate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ContactBuffer {
    records: [ContactRecord; CONTACT_CAPACITY],
    len: usize,
}

impl ContactBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// `true` when no records are stored.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `true` when another push would fail.
    pub const fn is_full(&self) -> bool {
        self.len == CONTACT_CAPACITY
    }

    /// Appends a record.
    ///
    /// # Errors
    /// [`ContactBufferError::Full`] when the buffer is at capacity.
    pub fn push(&mut self, record: ContactRecord) -> Result<(), ContactBufferError> {
        if self.is_full() {
            return Err(ContactBufferError::Full {
                capacity: CONTACT_CAPACITY,
            });
        }
        self.records[self.len] = record;
        self.len += 1;
        Ok(())
    }

    /// Record at `index`.
    pub fn get(&self, index: usize) -> Option<&ContactRecord> {
        self.as_slice().get(index)
    }

    /// Replaces the record at `index`.
    ///
    /// # Errors
    /// [`ContactBufferError::OutOfBounds`] when `index >= len`.
    pub fn set(&mut self, index: usize, record: ContactRecord) -> Result<(), ContactBufferError> {
        let len = self.len;
        let slot = self
            .records
            .get_mut(..len)
            .and_then(|live| live.get_mut(index))
            .ok_or(ContactBufferError::OutOfBounds { index, len })?;
        *slot = record;
        Ok(())
    }

    /// Removes the record at `index`, shifting later records down.
    ///
    /// # Errors
    /// [`ContactBufferError::OutOfBounds`] when `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<ContactRecord, ContactBufferError> {
        if index >= self.len {
            return Err(ContactBufferError::OutOfBounds {
                index,
                len: self.len,
            });
        }
        let removed = self.records[index];
        self.records.copy_within(index + 1..self.len, index);
        self.len -= 1;
        self.records[self.len] = ContactRecord::default();
        Ok(removed)
    }

    /// Index of the first record with `id`.
    pub fn find_by_id(&self, id: FeatureId) -> Option<usize> {
        self.iter().position(|r| r.id == id)
    }

    /// Removes the first record with `id`.
    pub fn remove_by_id(&mut self, id: FeatureId) -> Option<ContactRecord> {
        let index = self.find_by_id(id)?;
        self.remove_at(index).ok()
    }

    /// Live records in insertion order.
    pub fn as_slice(&self) -> &[ContactRecord] {
        &self.records[..self.len]
    }

    /// Iterates live records in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, ContactRecord> {
        self.as_slice().iter()
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.records = [ContactRecord::default(); CONTACT_CAPACITY];
        self.len = 0;
    }

    /// Most penetrating record (lowest depth; ties keep the earliest).
    pub fn deepest(&self) -> Option<&ContactRecord> {
        self.iter()
            .reduce(|best, r| if r.depth < best.depth { r } else { best })
    }
}

impl<'a> IntoIterator for &'a ContactBuffer {
    type Item = &'a ContactRecord;
    type IntoIter = core::slice::Iter<'a, ContactRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PoolItem for ContactBuffer {
    fn cleanup(&mut self) {
        self.clear();
    }
}

/// Single contact point for sphere, capsule, and triangle pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contact {
    /// Deepest point of A inside B (on A's surface).
    pub point_a: Vec3,
    /// Deepest point of B inside A (on B's surface).
    pub point_b: Vec3,
    /// Midpoint of `point_a` and `point_b`.
    pub point: Vec3,
    /// Unit normal pointing from A toward B.
    pub normal: Vec3,
    /// Overlap distance along `normal`; non-negative while touching.
    pub penetration: Fx,
}

impl Contact {
    /// Creates a contact; `point` is derived as the midpoint.
    pub fn new(point_a: Vec3, point_b: Vec3, normal: Vec3, penetration: Fx) -> Self {
        Self {
            point_a,
            point_b,
            point: (point_a + point_b) * Fx::HALF,
            normal,
            penetration,
        }
    }

    /// The same contact seen from B's side.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            point_a: self.point_b,
            point_b: self.point_a,
            point: self.point,
            normal: -self.normal,
            penetration: self.penetration,
        }
    }
}

/// Which separating axis produced a box-box manifold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SatFeature {
    /// Face normal `axis` of box A.
    FaceA {
        /// Local axis index of A.
        axis: usize,
    },
    /// Face normal `axis` of box B.
    FaceB {
        /// Local axis index of B.
        axis: usize,
    },
    /// Cross product of A's edge direction `a_axis` and B's `b_axis`.
    Edge {
        /// Local axis index of A's edge.
        a_axis: usize,
        /// Local axis index of B's edge.
        b_axis: usize,
    },
}

/// Multi-point box-box result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Manifold {
    /// Unit normal pointing from A toward B.
    pub normal: Vec3,
    /// Up to four contact points.
    pub contacts: ContactBuffer,
    /// Axis that won the separating-axis test.
    pub feature: SatFeature,
}

impl Manifold {
    /// Most penetrating contact.
    pub fn deepest(&self) -> Option<&ContactRecord> {
        self.contacts.deepest()
    }

    /// Penetration of the deepest contact as a positive distance.
    pub fn penetration(&self) -> Fx {
        self.deepest().map_or(Fx::ZERO, |r| -r.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: i32, depth: i32) -> ContactRecord {
        ContactRecord::new(Vec3::from_ints(id, 0, 0), Fx::from_int(depth), FeatureId::from_raw(id))
    }

    #[test]
    fn push_rejects_overflow() {
        let mut buf = ContactBuffer::new();
        for i in 0..8 {
            buf.push(rec(i, 0)).unwrap();
        }
        assert!(buf.is_full());
        assert_eq!(buf.push(rec(9, 0)), Err(ContactBufferError::Full { capacity: 8 }));
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn remove_preserves_order() {
        let mut buf = ContactBuffer::new();
        for i in 0..4 {
            buf.push(rec(i, -i)).unwrap();
        }
        assert_eq!(buf.remove_at(1).unwrap().id.raw(), 1);
        let ids: Vec<i32> = buf.iter().map(|r| r.id.raw()).collect();
        assert_eq!(ids, vec![0, 2, 3]);
        assert_eq!(buf.remove_by_id(FeatureId::from_raw(3)).map(|r| r.id.raw()), Some(3));
        assert_eq!(buf.remove_by_id(FeatureId::from_raw(3)), None);
        assert!(matches!(
            buf.remove_at(5),
            Err(ContactBufferError::OutOfBounds { index: 5, len: 2 })
        ));
    }

    #[test]
    fn set_and_get_are_bounded_by_len() {
        let mut buf = ContactBuffer::new();
        buf.push(rec(1, 0)).unwrap();
        buf.set(0, rec(7, -2)).unwrap();
        assert_eq!(buf.get(0).map(|r| r.id.raw()), Some(7));
        assert!(buf.get(1).is_none());
        assert!(buf.set(1, rec(2, 0)).is_err());
        assert_eq!(buf.find_by_id(FeatureId::from_raw(7)), Some(0));
    }

    #[test]
    fn deepest_prefers_earliest_on_ties() {
        let mut buf = ContactBuffer::new();
        buf.push(rec(1, -1)).unwrap();
        buf.push(rec(2, -3)).unwrap();
        buf.push(rec(3, -3)).unwrap();
        assert_eq!(buf.deepest().map(|r| r.id.raw()), Some(2));
        buf.cleanup();
        assert!(buf.is_empty());
        assert_eq!(buf, ContactBuffer::new());
    }

    #[test]
    fn feature_ids_are_order_sensitive_polynomials() {
        let a = FeatureId::from_parts(&[0, 1, 2]);
        assert_eq!(a.raw(), ((17 * 31) * 31 + 1) * 31 + 2);
        assert_ne!(a, FeatureId::from_parts(&[0, 2, 1]));
        assert_eq!(FeatureId::from_parts(&[]).raw(), 17);
    }

    #[test]
    fn flipped_contact_swaps_roles() {
        let c = Contact::new(Vec3::from_ints(1, 0, 0), Vec3::from_ints(0, 0, 0), Vec3::UNIT_X, Fx::ONE);
        let f = c.flipped();
        assert_eq!(f.normal, -Vec3::UNIT_X);
        assert_eq!(f.point_a, c.point_b);
        assert_eq!(f.point, c.point);
        assert_eq!(f.flipped(), c);
    }
}
