//! Aggregate operators. Each consumes the whole sequence in one pass.

use crate::numeric::Numeric;
use crate::sequence::{Element, Sequence};

impl<T: Element> Sequence<T> {
    /// Folds the sequence using its first element as the seed.
    ///
    /// Returns `None` for an empty sequence.
    pub fn aggregate<F>(&self, accumulator: F) -> Option<T>
    where
        F: FnMut(T, T) -> T,
    {
        self.cursor().reduce(accumulator)
    }

    /// Folds the sequence starting from `seed`.
    ///
    /// ```
    /// use standout_linq::Sequence;
    ///
    /// let csv = Sequence::from_vec(vec!["a", "b"]).aggregate_seed(String::new(), |acc, s| {
    ///     if acc.is_empty() { s.to_string() } else { format!("{acc},{s}") }
    /// });
    /// assert_eq!(csv, "a,b");
    /// ```
    pub fn aggregate_seed<A, F>(&self, seed: A, accumulator: F) -> A
    where
        F: FnMut(A, T) -> A,
    {
        self.cursor().fold(seed, accumulator)
    }

    /// [`aggregate_seed`](Self::aggregate_seed), then projects the final
    /// accumulator.
    pub fn aggregate_seed_with<A, R, F, G>(&self, seed: A, accumulator: F, result: G) -> R
    where
        F: FnMut(A, T) -> A,
        G: FnOnce(A) -> R,
    {
        result(self.aggregate_seed(seed, accumulator))
    }

    /// Arithmetic mean of the selected values, computed in `f64`.
    ///
    /// An empty sequence has no mean and returns `f64::NAN`.
    pub fn average<N, F>(&self, mut selector: F) -> f64
    where
        N: Numeric,
        F: FnMut(&T) -> N,
    {
        let (total, count) = self
            .cursor()
            .fold((0.0_f64, 0_usize), |(total, count), item| {
                (total + selector(&item).to_f64(), count + 1)
            });
        if count == 0 {
            return f64::NAN;
        }
        total / count as f64
    }

    /// Number of elements.
    pub fn count(&self) -> usize {
        self.cursor().count()
    }

    /// Number of elements satisfying `predicate`.
    pub fn count_where<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.cursor().filter(|item| predicate(item)).count()
    }

    /// Largest selected value, or `None` if the sequence is empty.
    ///
    /// The first of several equal maxima wins. A value that cannot be
    /// compared with the current maximum (NaN) never replaces it.
    pub fn max<V, F>(&self, selector: F) -> Option<V>
    where
        V: PartialOrd,
        F: FnMut(&T) -> V,
    {
        self.extremum(selector, |candidate, current| candidate > current)
    }

    /// Smallest selected value, or `None` if the sequence is empty.
    ///
    /// Ties and incomparable values behave as in [`max`](Self::max).
    pub fn min<V, F>(&self, selector: F) -> Option<V>
    where
        V: PartialOrd,
        F: FnMut(&T) -> V,
    {
        self.extremum(selector, |candidate, current| candidate < current)
    }

    fn extremum<V, F, B>(&self, mut selector: F, beats: B) -> Option<V>
    where
        F: FnMut(&T) -> V,
        B: Fn(&V, &V) -> bool,
    {
        let mut best: Option<V> = None;
        for item in self.cursor() {
            let candidate = selector(&item);
            let replace = match &best {
                Some(current) => beats(&candidate, current),
                None => true,
            };
            if replace {
                best = Some(candidate);
            }
        }
        best
    }

    /// Sum of the selected values, starting from zero.
    pub fn sum<N, F>(&self, mut selector: F) -> N
    where
        N: Numeric,
        F: FnMut(&T) -> N,
    {
        self.cursor().fold(N::zero(), |mut total, item| {
            total += selector(&item);
            total
        })
    }
}
