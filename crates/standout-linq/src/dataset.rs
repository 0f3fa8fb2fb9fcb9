//! In-memory query backend.
//!
//! [`Dataset`] accumulates a query (predicates, sort keys, offset, limit)
//! against a fixed record snapshot and executes it on demand. It is the
//! reference [`QuerySource`]: anything that can run such a query and hand
//! back the results can feed the sequence operators.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::ordering::{compare_by_comparers, key_comparer, Comparer, Dir};
use crate::sequence::{Element, IntoSequence, Sequence};

/// A backend that executes a query and exposes the results as a sequence.
pub trait QuerySource {
    /// Record type produced by the query.
    type Item: Element;

    /// Executes the query. The returned sequence is finite and replays the
    /// fetched results.
    fn to_sequence(&self) -> Sequence<Self::Item>;
}

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A query over an in-memory record set.
///
/// Builder calls return a new `Dataset`; the records themselves are shared,
/// not copied.
///
/// # Example
///
/// ```
/// use standout_linq::{Dataset, QuerySource};
///
/// let ages = Dataset::new(vec![41, 17, 33, 25, 62])
///     .where_(|age| *age >= 18)
///     .order_by_descending(|age| *age)
///     .skip(1)
///     .take(2);
///
/// assert_eq!(ages.to_vec(), vec![41, 33]);
/// assert_eq!(ages.to_sequence().select(|a| a / 10).to_vec(), vec![4, 3]);
/// ```
pub struct Dataset<T> {
    records: Arc<[T]>,
    predicates: Vec<Predicate<T>>,
    dirs: Vec<Dir>,
    comparers: Vec<Comparer<T>>,
    offset: usize,
    limit: usize,
}

impl<T: Element> Dataset<T> {
    /// Creates a query matching every record, in stored order.
    pub fn new(records: Vec<T>) -> Self {
        Dataset {
            records: records.into(),
            predicates: Vec::new(),
            dirs: Vec::new(),
            comparers: Vec::new(),
            offset: 0,
            limit: 0,
        }
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Adds a predicate. A record must satisfy every predicate.
    pub fn where_<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Arc::new(predicate));
        self
    }

    /// Adds an ascending sort key. Earlier keys take precedence.
    pub fn order_by<K, F>(self, key: F) -> Self
    where
        K: PartialOrd,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.order_by_dir(key, Dir::Asc)
    }

    /// Adds a descending sort key.
    pub fn order_by_descending<K, F>(self, key: F) -> Self
    where
        K: PartialOrd,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.order_by_dir(key, Dir::Desc)
    }

    /// Adds a sort key with the given direction.
    pub fn order_by_dir<K, F>(mut self, key: F, dir: Dir) -> Self
    where
        K: PartialOrd,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.dirs.push(dir);
        self.comparers.push(key_comparer(key, dir));
        self
    }

    /// Sets the number of results to skip.
    pub fn skip(mut self, count: usize) -> Self {
        self.offset = count;
        self
    }

    /// Sets the maximum number of results. Zero means no limit.
    pub fn take(mut self, count: usize) -> Self {
        self.limit = count;
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Number of predicates added with `where_`.
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    /// Number of sort keys.
    pub fn sort_count(&self) -> usize {
        self.comparers.len()
    }

    /// Directions of the sort keys, primary first.
    pub fn sort_dirs(&self) -> Vec<Dir> {
        self.dirs.clone()
    }

    /// Records skipped after sorting.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The limit, where `0` means unlimited.
    pub fn limit(&self) -> usize {
        self.limit
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests a single record against every predicate.
    pub fn matches(&self, record: &T) -> bool {
        self.predicates.iter().all(|predicate| predicate(record))
    }

    /// Runs the query: filter, stable sort, then offset and limit.
    pub fn to_vec(&self) -> Vec<T> {
        let mut results: Vec<T> = self
            .records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();
        let matched = results.len();

        if !self.comparers.is_empty() {
            results.sort_by(|a, b| compare_by_comparers(a, b, &self.comparers));
        }

        if self.offset > 0 {
            if self.offset >= results.len() {
                results.clear();
            } else {
                results.drain(..self.offset);
            }
        }

        if self.limit > 0 {
            results.truncate(self.limit);
        }

        debug!(
            records = self.records.len(),
            matched,
            returned = results.len(),
            "executed dataset query"
        );
        results
    }
}

impl<T: Element> QuerySource for Dataset<T> {
    type Item = T;

    fn to_sequence(&self) -> Sequence<T> {
        Sequence::from_vec(self.to_vec())
    }
}

impl<T: Element> IntoSequence for &Dataset<T> {
    type Item = T;

    fn into_sequence(self) -> Sequence<T> {
        self.to_sequence()
    }
}

impl<T> Clone for Dataset<T> {
    fn clone(&self) -> Self {
        Dataset {
            records: Arc::clone(&self.records),
            predicates: self.predicates.clone(),
            dirs: self.dirs.clone(),
            comparers: self.comparers.clone(),
            offset: self.offset,
            limit: self.limit,
        }
    }
}

impl<T> fmt::Debug for Dataset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("records", &self.records.len())
            .field("predicates", &self.predicates.len())
            .field("dirs", &self.dirs)
            .field("offset", &self.offset)
            .field("limit", &self.limit)
            .finish()
    }
}
