//! Quantifiers and set operators.
//!
//! Key-based variants track seen keys in a `HashSet` per cursor. The
//! `_with` variants take an equality comparer and scan the elements already
//! yielded, so they cost O(n²) but need nothing beyond the comparer.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use crate::sequence::{Element, IntoSequence, Sequence};

impl<T: Element> Sequence<T> {
    /// True when every element satisfies `predicate`. An empty sequence
    /// satisfies any predicate.
    pub fn all<F>(&self, predicate: F) -> bool
    where
        F: FnMut(T) -> bool,
    {
        self.cursor().all(predicate)
    }

    /// True when the sequence has at least one element. Pulls at most one.
    pub fn any(&self) -> bool {
        self.cursor().next().is_some()
    }

    /// True when some element satisfies `predicate`. Stops at the first
    /// match.
    pub fn any_where<F>(&self, predicate: F) -> bool
    where
        F: FnMut(T) -> bool,
    {
        self.cursor().any(predicate)
    }

    /// This sequence followed by `second`.
    ///
    /// The second cursor is not created until the first is exhausted.
    pub fn concat(&self, second: impl IntoSequence<Item = T>) -> Sequence<T> {
        let second = second.into_sequence();
        self.derive(move |cursor| cursor.chain(second.deferred()))
    }

    /// True when some element equals `value` under `comparer`.
    pub fn contains<F>(&self, value: &T, mut comparer: F) -> bool
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.cursor().any(|item| comparer(&item, value))
    }

    /// [`contains`](Self::contains) using `PartialEq`.
    pub fn contains_value(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.contains(value, |a, b| a == b)
    }

    /// This sequence, or a single `default` when it is empty.
    ///
    /// Emptiness is decided by the first pull, not when the cursor is made.
    pub fn default_if_empty(&self, default: T) -> Sequence<T> {
        self.derive(move |mut cursor| {
            let mut fallback = Some(default.clone());
            std::iter::from_fn(move || match cursor.next() {
                Some(item) => {
                    fallback = None;
                    Some(item)
                }
                None => fallback.take(),
            })
        })
    }

    /// Removes repeated elements, keeping first occurrences in order.
    ///
    /// ```
    /// use standout_linq::Sequence;
    ///
    /// let seq = Sequence::from_vec(vec![3, 1, 3, 2, 1]).distinct();
    /// assert_eq!(seq.to_vec(), vec![3, 1, 2]);
    /// ```
    pub fn distinct(&self) -> Sequence<T>
    where
        T: Hash + Eq,
    {
        self.distinct_by(|item| item.clone())
    }

    /// Removes elements whose key was already seen.
    pub fn distinct_by<K, F>(&self, key: F) -> Sequence<T>
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.except(Sequence::<T>::empty(), key)
    }

    /// Removes elements equal, under `comparer`, to one already yielded.
    pub fn distinct_with<F>(&self, comparer: F) -> Sequence<T>
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.except_with(Sequence::<T>::empty(), comparer)
    }

    /// Elements of this sequence whose key does not appear in `second`.
    ///
    /// The result is also free of repeated keys. `second` is read in full
    /// when a traversal starts.
    pub fn except<K, F>(&self, second: impl IntoSequence<Item = T>, key: F) -> Sequence<T>
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        let second = second.into_sequence();
        let key = Arc::new(key);
        self.derive(move |cursor| {
            let mut seen: HashSet<K> = second.cursor().map(|item| key(&item)).collect();
            let key = Arc::clone(&key);
            cursor.filter(move |item| seen.insert(key(item)))
        })
    }

    /// [`except`](Self::except) with an equality comparer.
    pub fn except_with<F>(&self, second: impl IntoSequence<Item = T>, comparer: F) -> Sequence<T>
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        let second = second.into_sequence();
        let comparer = Arc::new(comparer);
        self.derive(move |cursor| {
            let mut seen = second.to_vec();
            let comparer = Arc::clone(&comparer);
            cursor.filter(move |item| {
                if seen.iter().any(|other| comparer(item, other)) {
                    return false;
                }
                seen.push(item.clone());
                true
            })
        })
    }

    /// Distinct elements of this sequence whose key also appears in
    /// `second`, in this sequence's order.
    pub fn intersect<K, F>(&self, second: impl IntoSequence<Item = T>, key: F) -> Sequence<T>
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        let second = second.into_sequence();
        let key = Arc::new(key);
        self.derive(move |cursor| {
            let mut pending: HashSet<K> = second.cursor().map(|item| key(&item)).collect();
            let key = Arc::clone(&key);
            // Removing a key once it matched keeps later duplicates out.
            cursor.filter(move |item| pending.remove(&key(item)))
        })
    }

    /// [`intersect`](Self::intersect) with an equality comparer.
    pub fn intersect_with<F>(
        &self,
        second: impl IntoSequence<Item = T>,
        comparer: F,
    ) -> Sequence<T>
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        let second = second.into_sequence();
        let comparer = Arc::new(comparer);
        self.derive(move |cursor| {
            let candidates = second.to_vec();
            let mut yielded: Vec<T> = Vec::new();
            let comparer = Arc::clone(&comparer);
            cursor.filter(move |item| {
                let matches = |other: &T| comparer(item, other);
                if yielded.iter().any(matches) || !candidates.iter().any(matches) {
                    return false;
                }
                yielded.push(item.clone());
                true
            })
        })
    }

    /// True when both sequences have the same length and pairwise equal
    /// elements under `comparer`.
    pub fn sequence_equal<F>(&self, second: impl IntoSequence<Item = T>, mut comparer: F) -> bool
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut first = self.cursor();
        let mut second = second.into_sequence().cursor();
        loop {
            match (first.next(), second.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if comparer(&a, &b) => continue,
                _ => return false,
            }
        }
    }

    /// [`sequence_equal`](Self::sequence_equal) using `PartialEq`.
    pub fn sequence_equal_values(&self, second: impl IntoSequence<Item = T>) -> bool
    where
        T: PartialEq,
    {
        self.sequence_equal(second, |a, b| a == b)
    }

    /// Elements of both sequences with repeated keys removed, first
    /// occurrences kept.
    ///
    /// ```
    /// use standout_linq::Sequence;
    ///
    /// let seq = Sequence::from_vec(vec![1, 2, 2]).union(vec![2, 3, 4], |n| *n);
    /// assert_eq!(seq.to_vec(), vec![1, 2, 3, 4]);
    /// ```
    pub fn union<K, F>(&self, second: impl IntoSequence<Item = T>, key: F) -> Sequence<T>
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.concat(second).distinct_by(key)
    }

    /// [`union`](Self::union) with an equality comparer.
    pub fn union_with<F>(&self, second: impl IntoSequence<Item = T>, comparer: F) -> Sequence<T>
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.concat(second).distinct_with(comparer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn seq(items: &[i32]) -> Sequence<i32> {
        Sequence::from_vec(items.to_vec())
    }

    #[test]
    fn all_is_vacuously_true() {
        assert!(Sequence::<i32>::empty().all(|_| false));
        assert!(seq(&[2, 4]).all(|n| n % 2 == 0));
        assert!(!seq(&[2, 3]).all(|n| n % 2 == 0));
    }

    #[test]
    fn any_short_circuits() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&pulls);
        let source = Sequence::infinity_from(0).select(move |n| {
            counter.fetch_add(1, Ordering::SeqCst);
            n
        });
        assert!(source.any());
        assert!(source.any_where(|n| n == 4));
        assert_eq!(pulls.load(Ordering::SeqCst), 6);
        assert!(!Sequence::<u8>::empty().any());
    }

    fn counted(items: &[i32]) -> (Sequence<i32>, Arc<AtomicUsize>) {
        let pulls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&pulls);
        let source = seq(items).select(move |n| {
            counter.fetch_add(1, Ordering::SeqCst);
            n
        });
        (source, pulls)
    }

    #[test]
    fn all_stops_at_first_failure() {
        let (source, pulls) = counted(&[1, 2, 3, 4, 5]);
        assert!(!source.all(|n| n < 2));
        assert_eq!(pulls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn sequence_equal_stops_at_first_mismatch() {
        let (source, pulls) = counted(&[1, 9, 3, 4, 5]);
        assert!(!source.sequence_equal_values(vec![1, 2, 3, 4, 5]));
        assert_eq!(pulls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn default_if_empty_waits_for_first_pull() {
        let (source, pulls) = counted(&[4, 5]);
        let mut cursor = source.default_if_empty(0).cursor();
        assert_eq!(pulls.load(Ordering::SeqCst), 0);
        assert_eq!(cursor.next(), Some(4));
        assert_eq!(pulls.load(Ordering::SeqCst), 1);
        assert_eq!(cursor.next(), Some(5));
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn concat_appends() {
        assert_eq!(seq(&[1, 2]).concat(vec![3]).to_vec(), vec![1, 2, 3]);
        assert_eq!(seq(&[]).concat(seq(&[])).to_vec(), Vec::<i32>::new());
    }

    #[test]
    fn contains_with_comparer() {
        let words = Sequence::from_vec(vec!["Apple", "pear"]);
        assert!(words.contains(&"PEAR", |a, b| a.eq_ignore_ascii_case(b)));
        assert!(!words.contains_value(&"PEAR"));
        assert!(words.contains_value(&"pear"));
    }

    #[test]
    fn default_if_empty_only_when_empty() {
        assert_eq!(seq(&[]).default_if_empty(7).to_vec(), vec![7]);
        assert_eq!(seq(&[1, 2]).default_if_empty(7).to_vec(), vec![1, 2]);
    }

    #[test]
    fn distinct_variants() {
        assert_eq!(seq(&[3, 1, 3, 2, 1]).distinct().to_vec(), vec![3, 1, 2]);
        assert_eq!(seq(&[1, -1, 2, -2]).distinct_by(|n| n.abs()).to_vec(), vec![1, 2]);
        assert_eq!(
            seq(&[10, 11, 20, 25]).distinct_with(|a, b| a / 10 == b / 10).to_vec(),
            vec![10, 20]
        );
    }

    #[test]
    fn except_deduplicates_first() {
        assert_eq!(seq(&[1, 2, 2, 3, 4]).except(vec![3], |n| *n).to_vec(), vec![1, 2, 4]);
        assert_eq!(
            seq(&[1, 2, 2, 3]).except_with(vec![1], |a, b| a == b).to_vec(),
            vec![2, 3]
        );
    }

    #[test]
    fn intersect_yields_distinct_matches() {
        assert_eq!(seq(&[4, 1, 4, 2, 3]).intersect(vec![4, 3, 9], |n| *n).to_vec(), vec![4, 3]);
        assert_eq!(
            seq(&[4, 1, 4, 2]).intersect_with(vec![2, 4], |a, b| a == b).to_vec(),
            vec![4, 2]
        );
    }

    #[test]
    fn sequence_equal_checks_length() {
        assert!(seq(&[1, 2]).sequence_equal_values(vec![1, 2]));
        assert!(!seq(&[1, 2]).sequence_equal_values(vec![1, 2, 3]));
        assert!(!seq(&[1, 2, 3]).sequence_equal_values(vec![1, 2]));
        assert!(seq(&[1, -2]).sequence_equal(vec![-1, 2], |a, b| a.abs() == b.abs()));
    }

    #[test]
    fn union_dedups_across_inputs() {
        assert_eq!(seq(&[1, 2, 2]).union(vec![2, 3, 4], |n| *n).to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(
            seq(&[1, 1]).union_with(vec![2, 1], |a, b| a == b).to_vec(),
            vec![1, 2]
        );
    }
}
