//! Tag Sets
//!
//! A sorted, de-duplicated collection of [`CacheTag`]s.

use std::ops::{BitOr, BitOrAssign};

use serde::Serialize;
use smallvec::SmallVec;

use super::CacheTag;

/// A sorted, de-duplicated set of cache tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet {
    tags: SmallVec<[CacheTag; 8]>,
}

impl TagSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the set contains `tag`.
    pub fn contains(&self, tag: &CacheTag) -> bool {
        self.tags.binary_search(tag).is_ok()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Insert a tag, keeping order. Returns `false` when already present.
    pub fn insert(&mut self, tag: CacheTag) -> bool {
        match self.tags.binary_search(&tag) {
            Ok(_) => false,
            Err(position) => {
                self.tags.insert(position, tag);

                true
            }
        }
    }

    /// Iterate tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &CacheTag> {
        self.tags.iter()
    }

    /// Consume into a vector in sorted order.
    pub fn into_vec(self) -> Vec<CacheTag> {
        self.tags.into_vec()
    }
}

impl Extend<CacheTag> for TagSet {
    fn extend<I: IntoIterator<Item = CacheTag>>(&mut self, iter: I) {
        for tag in iter {
            self.insert(tag);
        }
    }
}

impl FromIterator<CacheTag> for TagSet {
    fn from_iter<I: IntoIterator<Item = CacheTag>>(iter: I) -> Self {
        let mut tags: SmallVec<[CacheTag; 8]> = iter.into_iter().collect();

        tags.sort();
        tags.dedup();

        Self { tags }
    }
}

impl IntoIterator for TagSet {
    type Item = CacheTag;
    type IntoIter = smallvec::IntoIter<[CacheTag; 8]>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.into_iter()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a CacheTag;
    type IntoIter = std::slice::Iter<'a, CacheTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl BitOr for TagSet {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self::Output {
        self.extend(rhs);
        self
    }
}

impl BitOrAssign for TagSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.extend(rhs);
    }
}
