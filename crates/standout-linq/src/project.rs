//! Projection and filtering operators.
//!
//! All of these stream: each pull on the result pulls just enough of the
//! upstream to produce one element.

use std::any::Any;
use std::borrow::Borrow;
use std::sync::Arc;

use crate::sequence::{Element, IntoSequence, Sequence};

/// A type-erased element, narrowed back with [`Sequence::of_type`].
pub type Dynamic = Arc<dyn Any + Send + Sync>;

impl<T: Element> Sequence<T> {
    /// Projects each element into a new form.
    pub fn select<U, F>(&self, selector: F) -> Sequence<U>
    where
        U: Element,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let selector = Arc::new(selector);
        self.derive(move |cursor| {
            let selector = Arc::clone(&selector);
            cursor.map(move |item| selector(item))
        })
    }

    /// Projects each element, passing its zero-based position at this stage.
    pub fn select_indexed<U, F>(&self, selector: F) -> Sequence<U>
    where
        U: Element,
        F: Fn(T, usize) -> U + Send + Sync + 'static,
    {
        let selector = Arc::new(selector);
        self.derive(move |cursor| {
            let selector = Arc::clone(&selector);
            cursor
                .enumerate()
                .map(move |(index, item)| selector(item, index))
        })
    }

    /// Maps each element to a collection and flattens the results.
    ///
    /// Each inner collection is drained before the next outer element is
    /// pulled. Empty inner collections contribute nothing.
    ///
    /// ```
    /// use standout_linq::Sequence;
    ///
    /// let words = Sequence::from_vec(vec!["ab", "", "c"]);
    /// let chars = words.select_many(|w| w.chars().collect::<Vec<_>>());
    /// assert_eq!(chars.to_vec(), vec!['a', 'b', 'c']);
    /// ```
    pub fn select_many<U, I, F>(&self, selector: F) -> Sequence<U>
    where
        U: Element,
        I: IntoIterator<Item = U>,
        I::IntoIter: 'static,
        F: Fn(T) -> I + Send + Sync + 'static,
    {
        self.select_many_indexed(move |item, _| selector(item))
    }

    /// [`select_many`](Self::select_many) with the outer element's index.
    pub fn select_many_indexed<U, I, F>(&self, selector: F) -> Sequence<U>
    where
        U: Element,
        I: IntoIterator<Item = U>,
        I::IntoIter: 'static,
        F: Fn(T, usize) -> I + Send + Sync + 'static,
    {
        let selector = Arc::new(selector);
        self.derive(move |cursor| {
            let selector = Arc::clone(&selector);
            cursor
                .enumerate()
                .flat_map(move |(index, item)| selector(item, index).into_iter())
        })
    }

    /// Flattens like [`select_many`](Self::select_many), then combines each
    /// inner element with its outer element.
    pub fn select_many_with<C, I, R, F, G>(&self, selector: F, result: G) -> Sequence<R>
    where
        C: Element,
        R: Element,
        I: IntoIterator<Item = C>,
        I::IntoIter: 'static,
        F: Fn(T) -> I + Send + Sync + 'static,
        G: Fn(T, C) -> R + Send + Sync + 'static,
    {
        self.select_many_indexed_with(move |item, _| selector(item), result)
    }

    /// [`select_many_with`](Self::select_many_with) with the outer element's
    /// index passed to the collection selector.
    pub fn select_many_indexed_with<C, I, R, F, G>(&self, selector: F, result: G) -> Sequence<R>
    where
        C: Element,
        R: Element,
        I: IntoIterator<Item = C>,
        I::IntoIter: 'static,
        F: Fn(T, usize) -> I + Send + Sync + 'static,
        G: Fn(T, C) -> R + Send + Sync + 'static,
    {
        let selector = Arc::new(selector);
        let result = Arc::new(result);
        self.derive(move |cursor| {
            let selector = Arc::clone(&selector);
            let result = Arc::clone(&result);
            cursor.enumerate().flat_map(move |(index, outer)| {
                let result = Arc::clone(&result);
                selector(outer.clone(), index)
                    .into_iter()
                    .map(move |inner| result(outer.clone(), inner))
            })
        })
    }

    /// Keeps the elements matching `predicate`.
    pub fn where_<F>(&self, predicate: F) -> Sequence<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        self.derive(move |cursor| {
            let predicate = Arc::clone(&predicate);
            cursor.filter(move |item| predicate(item))
        })
    }

    /// Keeps the elements matching `predicate`, which also receives the
    /// element's position in the upstream sequence.
    pub fn where_indexed<F>(&self, predicate: F) -> Sequence<T>
    where
        F: Fn(&T, usize) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        self.derive(move |cursor| {
            let predicate = Arc::clone(&predicate);
            cursor
                .enumerate()
                .filter(move |(index, item)| predicate(item, *index))
                .map(|(_, item)| item)
        })
    }

    /// Running fold without a seed.
    ///
    /// The first output is the first element itself; each later output
    /// combines the previous output with the next element.
    ///
    /// ```
    /// use standout_linq::Sequence;
    ///
    /// let totals = Sequence::range(1, 4).scan(|acc, n| acc + n);
    /// assert_eq!(totals.to_vec(), vec![1, 3, 6, 10]);
    /// ```
    pub fn scan<F>(&self, accumulator: F) -> Sequence<T>
    where
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        let accumulator = Arc::new(accumulator);
        self.derive(move |cursor| {
            let accumulator = Arc::clone(&accumulator);
            let mut state: Option<T> = None;
            cursor.map(move |item| {
                let next = match state.take() {
                    None => item,
                    Some(previous) => accumulator(previous, item),
                };
                state = Some(next.clone());
                next
            })
        })
    }

    /// Running fold starting from `seed`. Yields one accumulator per
    /// upstream element.
    ///
    /// The seed itself is not yielded, so the output has the same length as
    /// the input and each pull advances the upstream by one element. Prepend
    /// the seed with [`concat`](Self::concat) when it is wanted first.
    ///
    /// ```
    /// use standout_linq::Sequence;
    ///
    /// let totals = Sequence::from_vec(vec![1, 2, 3]).scan_seed(100, |a, n| a + n);
    /// assert_eq!(totals.to_vec(), vec![101, 103, 106]);
    /// ```
    pub fn scan_seed<A, F>(&self, seed: A, accumulator: F) -> Sequence<A>
    where
        A: Element,
        F: Fn(A, T) -> A + Send + Sync + 'static,
    {
        let accumulator = Arc::new(accumulator);
        self.derive(move |cursor| {
            let accumulator = Arc::clone(&accumulator);
            cursor.scan(seed.clone(), move |state, item| {
                *state = accumulator(state.clone(), item);
                Some(state.clone())
            })
        })
    }

    /// [`scan_seed`](Self::scan_seed) followed by a projection of each
    /// accumulator.
    pub fn scan_seed_with<A, R, F, G>(&self, seed: A, accumulator: F, result: G) -> Sequence<R>
    where
        A: Element,
        R: Element,
        F: Fn(A, T) -> A + Send + Sync + 'static,
        G: Fn(A) -> R + Send + Sync + 'static,
    {
        self.scan_seed(seed, accumulator).select(result)
    }

    /// Combines elements pairwise with `second`, stopping as soon as either
    /// side is exhausted.
    pub fn zip<S, R, F>(&self, second: S, result: F) -> Sequence<R>
    where
        S: IntoSequence,
        R: Element,
        F: Fn(T, S::Item) -> R + Send + Sync + 'static,
    {
        let second = second.into_sequence();
        let result = Arc::new(result);
        self.derive(move |cursor| {
            let result = Arc::clone(&result);
            cursor
                .zip(second.cursor())
                .map(move |(first, other)| result(first, other))
        })
    }

    /// Keeps the elements whose runtime type is `U`, narrowed to `U`.
    /// Elements of any other type are skipped.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use standout_linq::{Dynamic, Sequence};
    ///
    /// let mixed: Vec<Dynamic> = vec![Arc::new(1i32), Arc::new("two"), Arc::new(3i32)];
    /// let ints = Sequence::from_vec(mixed).of_type::<i32>();
    /// assert_eq!(ints.to_vec(), vec![1, 3]);
    /// ```
    pub fn of_type<U>(&self) -> Sequence<U>
    where
        T: Borrow<dyn Any + Send + Sync>,
        U: Element,
    {
        self.derive(|cursor| {
            cursor.filter_map(|item| {
                let any: &(dyn Any + Send + Sync) = item.borrow();
                any.downcast_ref::<U>().cloned()
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers() -> Sequence<i32> {
        Sequence::from_vec(vec![1, 2, 3, 4, 5])
    }

    #[test]
    fn select_maps() {
        assert_eq!(numbers().select(|n| n * 2).to_vec(), vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn select_index_counts_this_stage() {
        let indexed = numbers()
            .where_(|n| n % 2 == 1)
            .select_indexed(|n, i| (n, i));
        assert_eq!(indexed.to_vec(), vec![(1, 0), (3, 1), (5, 2)]);
    }

    #[test]
    fn where_index_counts_upstream_position() {
        let kept = numbers().where_indexed(|_, i| i % 2 == 0);
        assert_eq!(kept.to_vec(), vec![1, 3, 5]);
    }

    #[test]
    fn select_many_is_depth_first() {
        let pairs = Sequence::from_vec(vec![1, 2]).select_many(|n| vec![n * 10, n * 10 + 1]);
        assert_eq!(pairs.to_vec(), vec![10, 11, 20, 21]);
    }

    #[test]
    fn select_many_skips_empty_inner() {
        let flat = numbers().select_many(|n| if n == 3 { vec![] } else { vec![n] });
        assert_eq!(flat.to_vec(), vec![1, 2, 4, 5]);
    }

    #[test]
    fn select_many_accepts_sequences() {
        let flat = Sequence::from_vec(vec![2, 3]).select_many(|n| Sequence::repeat_n(n, n as usize));
        assert_eq!(flat.to_vec(), vec![2, 2, 3, 3, 3]);
    }

    #[test]
    fn select_many_indexed_passes_outer_index() {
        let flat = Sequence::from_vec(vec!["x", "y"]).select_many_indexed(|s, i| vec![s; i + 1]);
        assert_eq!(flat.to_vec(), vec!["x", "y", "y"]);
    }

    #[test]
    fn select_many_with_result() {
        let tagged = Sequence::from_vec(vec!["a", "b"])
            .select_many_indexed_with(|_, i| 0..=i, |s, n| format!("{s}{n}"));
        assert_eq!(tagged.to_vec(), vec!["a0", "b0", "b1"]);

        let plain = Sequence::from_vec(vec![1, 2]).select_many_with(|n| vec![n; 2], |a, b| a + b);
        assert_eq!(plain.to_vec(), vec![2, 2, 4, 4]);
    }

    #[test]
    fn scan_unseeded() {
        assert_eq!(numbers().scan(|a, b| a + b).to_vec(), vec![1, 3, 6, 10, 15]);
        assert!(Sequence::<i32>::empty().scan(|a, b| a + b).to_vec().is_empty());
    }

    #[test]
    fn scan_seeded() {
        let totals = numbers().scan_seed(100, |acc, n| acc + n);
        assert_eq!(totals.to_vec(), vec![101, 103, 106, 110, 115]);

        let labels = numbers()
            .take(2)
            .scan_seed_with(String::new(), |acc, n| format!("{acc}{n}"), |s| s.len());
        assert_eq!(labels.to_vec(), vec![1, 2]);
    }

    #[test]
    fn scan_restarts_per_traversal() {
        let totals = numbers().scan(|a, b| a + b);
        assert_eq!(totals.to_vec(), totals.to_vec());
    }

    #[test]
    fn zip_stops_at_shorter() {
        let zipped = numbers().zip(vec!["a", "b"], |n, s| format!("{n}{s}"));
        assert_eq!(zipped.to_vec(), vec!["1a", "2b"]);

        let zipped = Sequence::from_vec(vec![1]).zip(Sequence::infinity_from(10), |a, b| a + b);
        assert_eq!(zipped.to_vec(), vec![11]);
    }

    #[test]
    fn of_type_skips_mismatches() {
        let mixed: Vec<Dynamic> = vec![
            Arc::new(1u8),
            Arc::new(String::from("x")),
            Arc::new(2u8),
            Arc::new(3u16),
        ];
        let seq = Sequence::from_vec(mixed);
        assert_eq!(seq.of_type::<u8>().to_vec(), vec![1, 2]);
        assert_eq!(seq.of_type::<String>().to_vec(), vec!["x".to_string()]);
        assert!(seq.of_type::<i64>().to_vec().is_empty());
    }
}
