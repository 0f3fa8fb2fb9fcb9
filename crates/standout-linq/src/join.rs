//! Join operators.
//!
//! Both joins bucket the whole inner sequence by key when a traversal starts,
//! so the inner side must be finite. The outer side streams.

use std::hash::Hash;
use std::sync::Arc;

use crate::grouping::Buckets;
use crate::sequence::{replay, Element, IntoSequence, Sequence};

impl<T: Element> Sequence<T> {
    /// Inner join on matching keys.
    ///
    /// Each outer element yields one result per matching inner element, in
    /// the order the inner elements were encountered. Outer elements without
    /// a match yield nothing.
    ///
    /// ```
    /// use standout_linq::Sequence;
    ///
    /// let people = Sequence::from_vec(vec![(1, "Ann"), (2, "Bob")]);
    /// let pets = vec![(1, "Rex"), (1, "Tom"), (3, "Kit")];
    /// let owned = people.join(pets, |p| p.0, |q| q.0, |p, q| format!("{}:{}", p.1, q.1));
    /// assert_eq!(owned.to_vec(), vec!["Ann:Rex", "Ann:Tom"]);
    /// ```
    pub fn join<S, K, R, F, G, H>(
        &self,
        inner: S,
        outer_key: F,
        inner_key: G,
        result: H,
    ) -> Sequence<R>
    where
        S: IntoSequence,
        K: Hash + Eq + Clone + 'static,
        R: Element,
        F: Fn(&T) -> K + Send + Sync + 'static,
        G: Fn(&S::Item) -> K + Send + Sync + 'static,
        H: Fn(T, S::Item) -> R + Send + Sync + 'static,
    {
        let inner = inner.into_sequence();
        let outer_key = Arc::new(outer_key);
        let inner_key = Arc::new(inner_key);
        let result = Arc::new(result);
        self.derive(move |cursor| {
            let buckets = Buckets::collect(inner.cursor(), |item| inner_key(item), |item| item)
                .into_shared();
            let outer_key = Arc::clone(&outer_key);
            let result = Arc::clone(&result);
            cursor.flat_map(move |outer| {
                let result = Arc::clone(&result);
                buckets
                    .get(&outer_key(&outer))
                    .cloned()
                    .into_iter()
                    .flat_map(replay)
                    .map(move |matched| result(outer.clone(), matched))
            })
        })
    }

    /// Correlates each outer element with the (possibly empty) sequence of
    /// inner elements sharing its key.
    ///
    /// Every outer element yields exactly one result.
    pub fn group_join<S, K, R, F, G, H>(
        &self,
        inner: S,
        outer_key: F,
        inner_key: G,
        result: H,
    ) -> Sequence<R>
    where
        S: IntoSequence,
        K: Hash + Eq + Clone + 'static,
        R: Element,
        F: Fn(&T) -> K + Send + Sync + 'static,
        G: Fn(&S::Item) -> K + Send + Sync + 'static,
        H: Fn(T, Sequence<S::Item>) -> R + Send + Sync + 'static,
    {
        let inner = inner.into_sequence();
        let outer_key = Arc::new(outer_key);
        let inner_key = Arc::new(inner_key);
        let result = Arc::new(result);
        self.derive(move |cursor| {
            let buckets = Buckets::collect(inner.cursor(), |item| inner_key(item), |item| item)
                .into_shared();
            let outer_key = Arc::clone(&outer_key);
            let result = Arc::clone(&result);
            cursor.map(move |outer| {
                let matches = match buckets.get(&outer_key(&outer)) {
                    Some(bucket) => Sequence::from_shared(Arc::clone(bucket)),
                    None => Sequence::empty(),
                };
                result(outer, matches)
            })
        })
    }
}
