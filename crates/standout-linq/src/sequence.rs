//! The lazy sequence core.
//!
//! A [`Sequence`] is a shareable handle to a cursor factory: a closure that,
//! each time it is invoked, returns a fresh [`Cursor`] positioned before the
//! first element. Operators never touch elements themselves; they capture the
//! upstream sequence and their parameters in a new factory, so nothing runs
//! until a terminal operator pulls from a cursor.

use std::fmt;
use std::iter::{Fuse, FusedIterator};
use std::sync::Arc;

/// Bound shared by every element type a [`Sequence`] can carry.
///
/// Elements are yielded by value, so they are cloned out of any buffer an
/// operator captures. `Send + Sync` lets a sequence be shared between threads
/// that each drive their own cursor.
pub trait Element: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Element for T {}

/// A single-traversal pull handle produced by [`Sequence::cursor`].
///
/// Once a cursor reports exhaustion it keeps returning `None`.
pub struct Cursor<T> {
    inner: Fuse<Box<dyn Iterator<Item = T>>>,
}

impl<T> Cursor<T> {
    /// Wraps any iterator as a cursor.
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = T> + 'static,
    {
        let boxed: Box<dyn Iterator<Item = T>> = Box::new(iter);
        Cursor {
            inner: boxed.fuse(),
        }
    }
}

impl<T> Iterator for Cursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> FusedIterator for Cursor<T> {}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").finish_non_exhaustive()
    }
}

type Factory<T> = dyn Fn() -> Cursor<T> + Send + Sync;

/// A deferred, repeatable stream of elements.
///
/// Cloning a sequence is cheap and shares the same factory. Every traversal
/// (`to_vec`, `count`, a `for` loop) starts from the beginning of the source.
///
/// # Example
///
/// ```
/// use standout_linq::Sequence;
///
/// let evens = Sequence::from_vec(vec![1, 2, 3, 4, 5, 6])
///     .where_(|n| n % 2 == 0)
///     .select(|n| n * 10);
///
/// assert_eq!(evens.to_vec(), vec![20, 40, 60]);
/// assert_eq!(evens.count(), 3);
/// ```
pub struct Sequence<T> {
    factory: Arc<Factory<T>>,
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Sequence {
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence").finish_non_exhaustive()
    }
}

impl<T: Element> Sequence<T> {
    /// Wraps a cursor factory.
    ///
    /// The factory is invoked once per traversal and must return a fresh
    /// iterator each time.
    ///
    /// ```
    /// use standout_linq::Sequence;
    ///
    /// let squares = Sequence::from_cursor_factory(|| (1..=4).map(|n| n * n));
    /// assert_eq!(squares.to_vec(), vec![1, 4, 9, 16]);
    /// ```
    pub fn from_cursor_factory<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Sequence {
            factory: Arc::new(move || Cursor::new(factory().into_iter())),
        }
    }

    /// Wraps a factory of `next()`-style generators.
    ///
    /// Each traversal calls `factory` to obtain a generator, then pulls from it
    /// until it returns `None`.
    pub fn from_fn<F, G>(factory: F) -> Self
    where
        F: Fn() -> G + Send + Sync + 'static,
        G: FnMut() -> Option<T> + 'static,
    {
        Self::from_cursor_factory(move || std::iter::from_fn(factory()))
    }

    /// Wraps a finite collection. The items are moved into a shared snapshot.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self::from_shared(items.into())
    }

    pub(crate) fn from_shared(items: Arc<[T]>) -> Self {
        Self::from_cursor_factory(move || replay(Arc::clone(&items)))
    }

    /// Starts a new traversal.
    pub fn cursor(&self) -> Cursor<T> {
        (self.factory)()
    }

    /// Alias for [`cursor`](Self::cursor).
    pub fn iter(&self) -> Cursor<T> {
        self.cursor()
    }

    /// Builds a derived sequence whose cursors are produced by `build` from a
    /// fresh upstream cursor.
    pub(crate) fn derive<U, I, F>(&self, build: F) -> Sequence<U>
    where
        U: Element,
        I: Iterator<Item = U> + 'static,
        F: Fn(Cursor<T>) -> I + Send + Sync + 'static,
    {
        let source = self.clone();
        Sequence::from_cursor_factory(move || build(source.cursor()))
    }

    /// Yields this sequence's elements, creating the cursor only on the first
    /// pull.
    pub(crate) fn deferred(&self) -> impl Iterator<Item = T> + 'static {
        std::iter::once(self.clone()).flat_map(|sequence| sequence.cursor())
    }
}

/// Iterates a shared snapshot by cloning each element out of it.
pub(crate) fn replay<T: Clone + 'static>(items: Arc<[T]>) -> impl Iterator<Item = T> + 'static {
    (0..items.len()).map(move |i| items[i].clone())
}

impl<T: Element> Default for Sequence<T> {
    fn default() -> Self {
        Sequence::empty()
    }
}

impl<T: Element> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Sequence::from_vec(items)
    }
}

impl<T: Element> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sequence::from_vec(iter.into_iter().collect())
    }
}

impl<T: Element> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Cursor<T> {
        self.cursor()
    }
}

impl<T: Element> IntoIterator for &Sequence<T> {
    type Item = T;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Cursor<T> {
        self.cursor()
    }
}

/// Conversion into a [`Sequence`].
///
/// Operators that combine two sequences accept anything implementing this
/// trait, so plain vectors and arrays can be passed directly.
pub trait IntoSequence {
    /// Element type of the resulting sequence.
    type Item: Element;

    /// Converts `self` into a sequence.
    fn into_sequence(self) -> Sequence<Self::Item>;
}

impl<T: Element> IntoSequence for Sequence<T> {
    type Item = T;

    fn into_sequence(self) -> Sequence<T> {
        self
    }
}

impl<T: Element> IntoSequence for &Sequence<T> {
    type Item = T;

    fn into_sequence(self) -> Sequence<T> {
        self.clone()
    }
}

impl<T: Element> IntoSequence for Vec<T> {
    type Item = T;

    fn into_sequence(self) -> Sequence<T> {
        Sequence::from_vec(self)
    }
}

impl<T: Element, const N: usize> IntoSequence for [T; N] {
    type Item = T;

    fn into_sequence(self) -> Sequence<T> {
        Sequence::from_vec(Vec::from(self))
    }
}

impl<T: Element> IntoSequence for &[T] {
    type Item = T;

    fn into_sequence(self) -> Sequence<T> {
        Sequence::from_vec(self.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counted(pulls: &Arc<AtomicUsize>) -> Sequence<i32> {
        let pulls = Arc::clone(pulls);
        Sequence::from_cursor_factory(move || {
            let pulls = Arc::clone(&pulls);
            (1..=5).inspect(move |_| {
                pulls.fetch_add(1, Ordering::SeqCst);
            })
        })
    }

    #[test]
    fn from_vec_replays_in_order() {
        let seq = Sequence::from_vec(vec![1, 2, 3]);
        assert_eq!(seq.cursor().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(seq.cursor().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn cursor_stays_exhausted() {
        let seq = Sequence::from_vec(vec![1]);
        let mut cursor = seq.cursor();
        assert_eq!(cursor.next(), Some(1));
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn factory_runs_per_traversal() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let seq = counted(&pulls);
        assert_eq!(pulls.load(Ordering::SeqCst), 0);

        assert_eq!(seq.cursor().count(), 5);
        assert_eq!(seq.cursor().count(), 5);
        assert_eq!(pulls.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn from_fn_wraps_generator() {
        let seq = Sequence::from_fn(|| {
            let mut n = 0;
            move || {
                n += 1;
                (n <= 3).then_some(n)
            }
        });
        assert_eq!(seq.to_vec(), vec![1, 2, 3]);
        assert_eq!(seq.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn deferred_creates_cursor_on_first_pull() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let seq = counted(&pulls);
        let mut deferred = seq.deferred();
        assert_eq!(pulls.load(Ordering::SeqCst), 0);
        assert_eq!(deferred.next(), Some(1));
        assert_eq!(pulls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn into_sequence_conversions() {
        assert_eq!(vec![1, 2].into_sequence().to_vec(), vec![1, 2]);
        assert_eq!([3, 4].into_sequence().to_vec(), vec![3, 4]);
        assert_eq!((&[5, 6][..]).into_sequence().to_vec(), vec![5, 6]);

        let seq: Sequence<i32> = (7..9).collect();
        assert_eq!((&seq).into_sequence().to_vec(), vec![7, 8]);
    }

    #[test]
    fn for_loop_over_reference() {
        let seq = Sequence::from_vec(vec!["a", "b"]);
        let mut out = String::new();
        for s in &seq {
            out.push_str(s);
        }
        assert_eq!(out, "ab");
    }
}
