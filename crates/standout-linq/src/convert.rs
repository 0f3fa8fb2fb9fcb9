//! Conversions out of a sequence and side-effecting actions.
//!
//! All of these are terminal: they traverse the sequence immediately.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::error::{Result, SeqError};
use crate::grouping::Buckets;
use crate::lookup::Lookup;
use crate::sequence::{Element, Sequence};

impl<T: Element> Sequence<T> {
    /// Collects the elements in order.
    pub fn to_vec(&self) -> Vec<T> {
        self.cursor().collect()
    }

    /// Builds a map from `key` to element.
    ///
    /// Returns `None` if two elements produce the same key; use
    /// [`try_to_dictionary`](Self::try_to_dictionary) to learn which one.
    ///
    /// ```
    /// use standout_linq::Sequence;
    ///
    /// let names = Sequence::from_vec(vec!["ann", "bob"]);
    /// let by_initial = names.to_dictionary(|n| n.as_bytes()[0]).unwrap();
    /// assert_eq!(by_initial[&b'b'], "bob");
    ///
    /// assert!(Sequence::from_vec(vec![1, 1]).to_dictionary(|n| *n).is_none());
    /// ```
    pub fn to_dictionary<K, F>(&self, key: F) -> Option<HashMap<K, T>>
    where
        K: Hash + Eq,
        F: FnMut(&T) -> K,
    {
        self.try_to_dictionary(key).ok()
    }

    /// Builds a map from `key` to the projected element, or `None` on a
    /// duplicate key.
    pub fn to_dictionary_with<K, E, F, G>(&self, key: F, element: G) -> Option<HashMap<K, E>>
    where
        K: Hash + Eq,
        F: FnMut(&T) -> K,
        G: FnMut(T) -> E,
    {
        self.collect_dictionary(key, element).ok()
    }

    /// Builds a map from `key` to element.
    ///
    /// # Errors
    ///
    /// [`SeqError::DuplicateKey`] carrying the position of the first element
    /// whose key was already present. Traversal stops there.
    pub fn try_to_dictionary<K, F>(&self, key: F) -> Result<HashMap<K, T>>
    where
        K: Hash + Eq,
        F: FnMut(&T) -> K,
    {
        self.collect_dictionary(key, |item| item)
    }

    fn collect_dictionary<K, E, F, G>(&self, mut key: F, mut element: G) -> Result<HashMap<K, E>>
    where
        K: Hash + Eq,
        F: FnMut(&T) -> K,
        G: FnMut(T) -> E,
    {
        let mut map = HashMap::new();
        for (index, item) in self.cursor().enumerate() {
            let k = key(&item);
            if map.contains_key(&k) {
                debug!(index, "duplicate key while building dictionary");
                return Err(SeqError::DuplicateKey { index });
            }
            map.insert(k, element(item));
        }
        Ok(map)
    }

    /// Groups the elements into a [`Lookup`] keyed by `key`.
    pub fn to_lookup<K, F>(&self, key: F) -> Lookup<K, T>
    where
        K: Hash + Eq + Clone,
        F: Fn(&T) -> K,
    {
        Lookup::from_buckets(Buckets::collect(self.cursor(), key, |item| item))
    }

    /// Groups projected elements into a [`Lookup`] keyed by `key`.
    pub fn to_lookup_with<K, E, F, G>(&self, key: F, element: G) -> Lookup<K, E>
    where
        K: Hash + Eq + Clone,
        E: Element,
        F: Fn(&T) -> K,
        G: Fn(T) -> E,
    {
        Lookup::from_buckets(Buckets::collect(self.cursor(), key, element))
    }

    /// Runs `action` on every element.
    pub fn each<F>(&self, action: F)
    where
        F: FnMut(T),
    {
        self.cursor().for_each(action);
    }

    /// Runs `action` on every element and its position.
    pub fn each_indexed<F>(&self, mut action: F)
    where
        F: FnMut(T, usize),
    {
        for (index, item) in self.cursor().enumerate() {
            action(item, index);
        }
    }

    /// Traverses the sequence for its side effects, discarding the elements.
    pub fn force(&self) {
        self.cursor().for_each(drop);
    }
}
