//! Grouping engine.
//!
//! [`Buckets`] is the keyed bucketing helper shared by `group_by`, the join
//! operators and [`Lookup`](crate::Lookup): one full pass over a source,
//! remembering the order in which distinct keys were first seen and the
//! source order of elements within each key.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tracing::trace;

use crate::sequence::{Element, Sequence};

/// A key paired with the elements that produced it.
#[derive(Debug, Clone)]
pub struct Grouping<K, T> {
    key: K,
    elements: Sequence<T>,
}

impl<K, T: Element> Grouping<K, T> {
    /// Creates a grouping.
    pub fn new(key: K, elements: Sequence<T>) -> Self {
        Grouping { key, elements }
    }

    /// The group's key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The group's elements.
    pub fn elements(&self) -> &Sequence<T> {
        &self.elements
    }

    /// Splits the grouping into its key and elements.
    pub fn into_parts(self) -> (K, Sequence<T>) {
        (self.key, self.elements)
    }
}

impl<K, T: Element> IntoIterator for &Grouping<K, T> {
    type Item = T;
    type IntoIter = crate::Cursor<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.cursor()
    }
}

pub(crate) struct Buckets<K, V> {
    order: Vec<K>,
    groups: HashMap<K, Vec<V>>,
}

impl<K, V> Buckets<K, V>
where
    K: Hash + Eq + Clone,
{
    pub(crate) fn collect<T, I, F, G>(items: I, key: F, element: G) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> K,
        G: Fn(T) -> V,
    {
        let mut order = Vec::new();
        let mut groups: HashMap<K, Vec<V>> = HashMap::new();
        for item in items {
            let k = key(&item);
            match groups.get_mut(&k) {
                Some(bucket) => bucket.push(element(item)),
                None => {
                    order.push(k.clone());
                    groups.insert(k, vec![element(item)]);
                }
            }
        }
        trace!(keys = order.len(), "bucketed source");
        Buckets { order, groups }
    }

    /// Buckets keyed for lookup, each frozen into a shared snapshot.
    pub(crate) fn into_shared(self) -> HashMap<K, Arc<[V]>> {
        self.groups
            .into_iter()
            .map(|(k, bucket)| (k, Arc::from(bucket)))
            .collect()
    }

    /// Buckets in first-encounter key order.
    pub(crate) fn into_ordered(mut self) -> Vec<(K, Arc<[V]>)> {
        let mut ordered = Vec::with_capacity(self.order.len());
        for k in self.order {
            if let Some(bucket) = self.groups.remove(&k) {
                ordered.push((k, Arc::from(bucket)));
            }
        }
        ordered
    }
}

impl<T: Element> Sequence<T> {
    /// Groups elements by key.
    ///
    /// Groups come out in the order their keys were first seen; elements keep
    /// their relative order within a group.
    ///
    /// ```
    /// use standout_linq::Sequence;
    ///
    /// let groups = Sequence::from_vec(vec![1, 2, 3, 4, 5]).group_by(|n| n % 2);
    /// let summary: Vec<(i32, Vec<i32>)> = groups
    ///     .select(|g| (*g.key(), g.elements().to_vec()))
    ///     .to_vec();
    /// assert_eq!(summary, vec![(1, vec![1, 3, 5]), (0, vec![2, 4])]);
    /// ```
    pub fn group_by<K, F>(&self, key: F) -> Sequence<Grouping<K, T>>
    where
        K: Element + Hash + Eq,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.group_by_element_result(key, |item| item, Grouping::new)
    }

    /// Groups projected elements by key.
    pub fn group_by_element<K, E, F, G>(&self, key: F, element: G) -> Sequence<Grouping<K, E>>
    where
        K: Element + Hash + Eq,
        E: Element,
        F: Fn(&T) -> K + Send + Sync + 'static,
        G: Fn(T) -> E + Send + Sync + 'static,
    {
        self.group_by_element_result(key, element, Grouping::new)
    }

    /// Groups elements by key and projects each group into a result.
    pub fn group_by_result<K, R, F, H>(&self, key: F, result: H) -> Sequence<R>
    where
        K: Element + Hash + Eq,
        R: Element,
        F: Fn(&T) -> K + Send + Sync + 'static,
        H: Fn(K, Sequence<T>) -> R + Send + Sync + 'static,
    {
        self.group_by_element_result(key, |item| item, result)
    }

    /// Groups projected elements by key and projects each group into a
    /// result.
    pub fn group_by_element_result<K, E, R, F, G, H>(
        &self,
        key: F,
        element: G,
        result: H,
    ) -> Sequence<R>
    where
        K: Element + Hash + Eq,
        E: Element,
        R: Element,
        F: Fn(&T) -> K + Send + Sync + 'static,
        G: Fn(T) -> E + Send + Sync + 'static,
        H: Fn(K, Sequence<E>) -> R + Send + Sync + 'static,
    {
        let key = Arc::new(key);
        let element = Arc::new(element);
        let result = Arc::new(result);
        self.derive(move |cursor| {
            let buckets = Buckets::collect(cursor, |item| key(item), |item| element(item));
            let result = Arc::clone(&result);
            buckets
                .into_ordered()
                .into_iter()
                .map(move |(k, bucket)| result(k, Sequence::from_shared(bucket)))
        })
    }
}
