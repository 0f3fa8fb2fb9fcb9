//! Ordering engine.
//!
//! Provides [`Dir`] for sort direction and [`OrderedSequence`], a sequence
//! that remembers its sort keys so further tie-breakers can be appended.
//!
//! Every traversal of an ordered sequence materializes the whole upstream and
//! sorts it with a stable sort, so elements equal under every key keep their
//! source order. Sorting an infinite sequence never yields.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::sequence::{Cursor, Element, IntoSequence, Sequence};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A three-way comparison between two elements.
pub(crate) type Comparer<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Builds a comparer from a key selector and direction.
///
/// Keys that cannot be compared (NaN) compare as equal.
pub(crate) fn key_comparer<T, K, F>(key: F, dir: Dir) -> Comparer<T>
where
    T: 'static,
    K: PartialOrd,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    Arc::new(move |a: &T, b: &T| {
        key(a)
            .partial_cmp(&key(b))
            .map_or(Ordering::Equal, |ordering| dir.apply(ordering))
    })
}

/// Compares two items using a list of comparers.
///
/// Uses the first comparer as the primary sort key, the second to break ties,
/// etc. If all comparers report equal, returns `Equal`.
pub(crate) fn compare_by_comparers<T>(a: &T, b: &T, comparers: &[Comparer<T>]) -> Ordering {
    for comparer in comparers {
        let ordering = comparer(a, b);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// A sequence sorted by one or more keys.
///
/// Dereferences to the sorted [`Sequence`], so every operator is available;
/// [`then_by`](Self::then_by) and friends add tie-breakers, and
/// [`where_`](Self::where_) keeps the result ordered.
///
/// ```
/// use standout_linq::Sequence;
///
/// let points = Sequence::from_vec(vec![(1, 2), (1, 1), (0, 9)]);
/// let sorted = points.order_by(|p| p.0).then_by(|p| p.1);
/// assert_eq!(sorted.to_vec(), vec![(0, 9), (1, 1), (1, 2)]);
/// ```
pub struct OrderedSequence<T> {
    source: Sequence<T>,
    comparers: Vec<Comparer<T>>,
    sorted: Sequence<T>,
}

impl<T: Element> OrderedSequence<T> {
    fn new(source: Sequence<T>, comparers: Vec<Comparer<T>>) -> Self {
        let keys: Arc<[Comparer<T>]> = comparers.clone().into();
        let sorted = source.derive(move |cursor| {
            let mut buffer: Vec<T> = cursor.collect();
            debug!(len = buffer.len(), keys = keys.len(), "sorting sequence");
            buffer.sort_by(|a, b| compare_by_comparers(a, b, &keys));
            trace!("sort complete");
            buffer.into_iter()
        });
        OrderedSequence {
            source,
            comparers,
            sorted,
        }
    }

    fn with_comparer(&self, comparer: Comparer<T>) -> Self {
        let mut comparers = self.comparers.clone();
        comparers.push(comparer);
        OrderedSequence::new(self.source.clone(), comparers)
    }

    /// Adds an ascending tie-breaker.
    pub fn then_by<K, F>(&self, key: F) -> OrderedSequence<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.then_by_dir(key, Dir::Asc)
    }

    /// Adds a descending tie-breaker.
    pub fn then_by_descending<K, F>(&self, key: F) -> OrderedSequence<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.then_by_dir(key, Dir::Desc)
    }

    /// Adds a tie-breaker with the given direction.
    pub fn then_by_dir<K, F>(&self, key: F, dir: Dir) -> OrderedSequence<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.with_comparer(key_comparer(key, dir))
    }

    /// Keeps the elements matching `predicate`. The result is still ordered
    /// and accepts further tie-breakers.
    pub fn where_<F>(&self, predicate: F) -> OrderedSequence<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        // Filtering commutes with a stable sort, so filter before sorting.
        OrderedSequence::new(self.source.where_(predicate), self.comparers.clone())
    }

    /// Keeps the elements matching `predicate`, which receives each element's
    /// position in the sorted order. The result is still ordered.
    pub fn where_indexed<F>(&self, predicate: F) -> OrderedSequence<T>
    where
        F: Fn(&T, usize) -> bool + Send + Sync + 'static,
    {
        OrderedSequence::new(self.sorted.where_indexed(predicate), self.comparers.clone())
    }

    /// Number of sort keys, primary key included.
    pub fn key_count(&self) -> usize {
        self.comparers.len()
    }

    /// The sorted sequence.
    pub fn as_sequence(&self) -> &Sequence<T> {
        &self.sorted
    }
}

impl<T> Clone for OrderedSequence<T> {
    fn clone(&self) -> Self {
        OrderedSequence {
            source: self.source.clone(),
            comparers: self.comparers.clone(),
            sorted: self.sorted.clone(),
        }
    }
}

impl<T> fmt::Debug for OrderedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedSequence")
            .field("keys", &self.comparers.len())
            .finish_non_exhaustive()
    }
}

impl<T> Deref for OrderedSequence<T> {
    type Target = Sequence<T>;

    fn deref(&self) -> &Sequence<T> {
        &self.sorted
    }
}

impl<T> From<OrderedSequence<T>> for Sequence<T> {
    fn from(ordered: OrderedSequence<T>) -> Self {
        ordered.sorted
    }
}

impl<T: Element> IntoSequence for OrderedSequence<T> {
    type Item = T;

    fn into_sequence(self) -> Sequence<T> {
        self.sorted
    }
}

impl<T: Element> IntoSequence for &OrderedSequence<T> {
    type Item = T;

    fn into_sequence(self) -> Sequence<T> {
        self.sorted.clone()
    }
}

impl<T: Element> IntoIterator for OrderedSequence<T> {
    type Item = T;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Cursor<T> {
        self.sorted.cursor()
    }
}

impl<T: Element> IntoIterator for &OrderedSequence<T> {
    type Item = T;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Cursor<T> {
        self.sorted.cursor()
    }
}

impl<T: Element> Sequence<T> {
    /// Sorts by `key`, ascending.
    pub fn order_by<K, F>(&self, key: F) -> OrderedSequence<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.order_by_dir(key, Dir::Asc)
    }

    /// Sorts by `key`, descending.
    pub fn order_by_descending<K, F>(&self, key: F) -> OrderedSequence<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.order_by_dir(key, Dir::Desc)
    }

    /// Sorts by `key` in the given direction.
    pub fn order_by_dir<K, F>(&self, key: F, dir: Dir) -> OrderedSequence<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        OrderedSequence::new(self.clone(), vec![key_comparer(key, dir)])
    }

    /// The elements in reverse order. Materializes the upstream per
    /// traversal.
    pub fn reverse(&self) -> Sequence<T> {
        self.derive(|cursor| cursor.collect::<Vec<_>>().into_iter().rev())
    }
}
