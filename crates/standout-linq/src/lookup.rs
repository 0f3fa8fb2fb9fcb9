//! Immutable one-to-many index built by [`Sequence::to_lookup`].

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::Index;

use tracing::debug;

use crate::grouping::{Buckets, Grouping};
use crate::sequence::{Element, IntoSequence, Sequence};

/// A key to sequence multi-map.
///
/// Keys iterate in the order they were first seen in the source. Looking up
/// a key that is not present yields an empty sequence rather than `None`.
///
/// ```
/// use standout_linq::Sequence;
///
/// let words = Sequence::from_vec(vec!["apple", "avocado", "banana"]);
/// let by_initial = words.to_lookup(|w| w.chars().next());
///
/// assert_eq!(by_initial.len(), 2);
/// assert_eq!(by_initial.get(&Some('a')).to_vec(), vec!["apple", "avocado"]);
/// assert_eq!(by_initial[&Some('z')].count(), 0);
/// ```
pub struct Lookup<K, T> {
    groups: Vec<(K, Sequence<T>)>,
    index: HashMap<K, usize>,
    empty: Sequence<T>,
}

impl<K, T> Lookup<K, T>
where
    K: Hash + Eq + Clone,
    T: Element,
{
    pub(crate) fn from_buckets(buckets: Buckets<K, T>) -> Self {
        let groups: Vec<(K, Sequence<T>)> = buckets
            .into_ordered()
            .into_iter()
            .map(|(key, bucket)| (key, Sequence::from_shared(bucket)))
            .collect();
        let index = groups
            .iter()
            .enumerate()
            .map(|(position, (key, _))| (key.clone(), position))
            .collect();
        debug!(keys = groups.len(), "built lookup");
        Lookup {
            groups,
            index,
            empty: Sequence::empty(),
        }
    }

    /// The elements stored under `key`, or an empty sequence.
    pub fn get(&self, key: &K) -> Sequence<T> {
        self[key].clone()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if the lookup holds no keys.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns `true` if some element was stored under `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in first-encounter order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(key, _)| key)
    }

    /// Groupings in first-encounter key order.
    pub fn iter(&self) -> impl Iterator<Item = Grouping<K, T>> + '_ {
        self.groups
            .iter()
            .map(|(key, elements)| Grouping::new(key.clone(), elements.clone()))
    }
}

impl<K, T> Index<&K> for Lookup<K, T>
where
    K: Hash + Eq,
{
    type Output = Sequence<T>;

    fn index(&self, key: &K) -> &Sequence<T> {
        match self.index.get(key) {
            Some(&position) => &self.groups[position].1,
            None => &self.empty,
        }
    }
}

impl<K, T> IntoSequence for &Lookup<K, T>
where
    K: Element + Hash + Eq,
    T: Element,
{
    type Item = Grouping<K, T>;

    fn into_sequence(self) -> Sequence<Grouping<K, T>> {
        self.iter().collect()
    }
}

impl<K: fmt::Debug, T> fmt::Debug for Lookup<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookup")
            .field("keys", &self.groups.iter().map(|(key, _)| key).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup() -> Lookup<usize, &'static str> {
        let words = vec!["one", "two", "three", "four", "five", "six"];
        Lookup::from_buckets(Buckets::collect(words, |w| w.len(), |w| w))
    }

    #[test]
    fn keys_in_first_encounter_order() {
        let lookup = lookup();
        assert_eq!(lookup.keys().copied().collect::<Vec<_>>(), vec![3, 5, 4]);
        assert_eq!(lookup.len(), 3);
        assert!(!lookup.is_empty());
    }

    #[test]
    fn get_returns_bucket_in_source_order() {
        let lookup = lookup();
        assert_eq!(lookup.get(&3).to_vec(), vec!["one", "two", "six"]);
        assert_eq!(lookup[&4].to_vec(), vec!["four", "five"]);
    }

    #[test]
    fn missing_key_is_empty() {
        let lookup = lookup();
        assert!(!lookup.contains_key(&9));
        assert!(lookup.get(&9).to_vec().is_empty());
        assert!(lookup.contains_key(&5));
    }

    #[test]
    fn iterates_groupings() {
        let lookup = lookup();
        let sizes: Vec<(usize, usize)> = lookup
            .iter()
            .map(|g| (*g.key(), g.elements().count()))
            .collect();
        assert_eq!(sizes, vec![(3, 3), (5, 1), (4, 2)]);
        assert_eq!((&lookup).into_sequence().count(), 3);
    }
}
