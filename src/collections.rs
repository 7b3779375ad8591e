//! Collections
//!
//! A sorted, de-duplicated set of collection identifiers used to match cart
//! products against the collections a promotion tracks.

use std::{cmp::Ordering, string::ToString};

use smallvec::SmallVec;

/// A set of collection identifiers (e.g. `gid://shopify/Collection/477972005161`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSet {
    ids: SmallVec<[String; 4]>,
}

impl CollectionSet {
    /// Create a new collection set from owned identifiers.
    #[must_use]
    pub fn new(ids: SmallVec<[String; 4]>) -> Self {
        let mut set = Self { ids };

        set.ids.sort();
        set.ids.dedup();

        set
    }

    /// Create a new collection set from string slices.
    pub fn from_strs(ids: &[&str]) -> Self {
        Self::new(ids.iter().map(ToString::to_string).collect())
    }

    /// Check whether the set contains a collection.
    pub fn contains(&self, id: &str) -> bool {
        self.ids
            .binary_search_by(|probe| probe.as_str().cmp(id))
            .is_ok()
    }

    /// Check whether the two sets share at least one collection.
    pub fn intersects(&self, other: &Self) -> bool {
        // Both sides are sorted, so walk them together.
        let mut left = self.ids.iter();
        let mut right = other.ids.iter();
        let mut left_id = left.next();
        let mut right_id = right.next();

        while let (Some(left_ref), Some(right_ref)) = (left_id, right_id) {
            match left_ref.cmp(right_ref) {
                Ordering::Equal => return true,
                Ordering::Less => left_id = left.next(),
                Ordering::Greater => right_id = right.next(),
            }
        }

        false
    }

    /// Iterate over the identifiers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Number of collections in the set.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<'s> FromIterator<&'s str> for CollectionSet {
    fn from_iter<I: IntoIterator<Item = &'s str>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(ToString::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sorts_and_dedups() {
        let set = CollectionSet::from_strs(&["self", "cueca", "self"]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["cueca", "self"]);
    }

    #[test]
    fn contains_finds_members() {
        let set = CollectionSet::from_strs(&["basic", "amazonia"]);

        assert!(set.contains("basic"));
        assert!(set.contains("amazonia"));
        assert!(!set.contains("cueca"));
    }

    #[test]
    fn intersects_detects_shared_collections() {
        let product = CollectionSet::from_strs(&["amazonia", "basic", "summer"]);
        let basic = CollectionSet::from_strs(&["basic"]);
        let cueca = CollectionSet::from_strs(&["cueca"]);

        assert!(product.intersects(&basic));
        assert!(basic.intersects(&product));
        assert!(!product.intersects(&cueca));
        assert!(!product.intersects(&CollectionSet::default()));
    }

    #[test]
    fn default_set_is_empty() {
        let set = CollectionSet::default();

        assert!(set.is_empty());
        assert!(!set.contains("basic"));
    }

    #[test]
    fn collects_from_str_iterator() {
        let set: CollectionSet = ["b", "a", "b"].into_iter().collect();

        assert_eq!(set, CollectionSet::from_strs(&["a", "b"]));
    }
}
