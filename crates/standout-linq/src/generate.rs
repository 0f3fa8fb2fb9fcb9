//! Generation operators: sequences built from scratch.

use rand::Rng;
use tracing::warn;

use crate::numeric::Numeric;
use crate::sequence::{Element, IntoSequence, Sequence};

impl<T: Element> Sequence<T> {
    /// A sequence whose cursor is exhausted immediately.
    pub fn empty() -> Self {
        Sequence::from_cursor_factory(std::iter::empty)
    }

    /// An infinite sequence of elements picked uniformly at random from
    /// `source`.
    ///
    /// Each traversal snapshots `source` once. An empty snapshot yields an
    /// empty traversal. Pair with [`take`](Self::take) or another bounding
    /// operator.
    pub fn choice(source: impl IntoSequence<Item = T>) -> Self {
        let source = source.into_sequence();
        Sequence::from_fn(move || {
            let items = source.to_vec();
            if items.is_empty() {
                warn!("choice over an empty source");
            }
            let mut rng = rand::thread_rng();
            move || {
                if items.is_empty() {
                    return None;
                }
                let index = rng.gen_range(0..items.len());
                Some(items[index].clone())
            }
        })
    }

    /// An infinite sequence repeating `source` in order.
    ///
    /// An empty source yields an empty traversal rather than looping forever.
    ///
    /// ```
    /// use standout_linq::Sequence;
    ///
    /// let abc = Sequence::cycle(vec!['a', 'b', 'c']).take(5);
    /// assert_eq!(abc.to_vec(), vec!['a', 'b', 'c', 'a', 'b']);
    /// ```
    pub fn cycle(source: impl IntoSequence<Item = T>) -> Self {
        let source = source.into_sequence();
        Sequence::from_cursor_factory(move || {
            let items = source.to_vec();
            if items.is_empty() {
                warn!("cycle over an empty source");
            }
            items.into_iter().cycle()
        })
    }

    /// An infinite sequence of `value`.
    pub fn repeat(value: T) -> Self {
        Sequence::from_cursor_factory(move || std::iter::repeat(value.clone()))
    }

    /// A sequence of `value` repeated `count` times.
    pub fn repeat_n(value: T, count: usize) -> Self {
        Sequence::repeat(value).take(count)
    }

    /// A sequence containing only `value`.
    pub fn return_(value: T) -> Self {
        Sequence::repeat(value).take(1)
    }
}

impl<N: Numeric> Sequence<N> {
    /// An infinite arithmetic progression starting at `start`, increasing by
    /// `step`.
    ///
    /// The step is only applied when the next value is pulled, so the
    /// progression never computes past the last value a consumer asks for.
    pub fn infinity(start: N, step: N) -> Self {
        Sequence::progression(start, move |value| value + step)
    }

    /// [`infinity`](Self::infinity) with a step of one.
    pub fn infinity_from(start: N) -> Self {
        Sequence::infinity(start, N::one())
    }

    /// An infinite arithmetic progression starting at `start`, decreasing by
    /// `step`.
    pub fn negative_infinity(start: N, step: N) -> Self {
        Sequence::progression(start, move |value| value - step)
    }

    /// [`negative_infinity`](Self::negative_infinity) with a step of one.
    pub fn negative_infinity_from(start: N) -> Self {
        Sequence::negative_infinity(start, N::one())
    }

    /// `count` consecutive values counting up from `start`.
    ///
    /// ```
    /// use standout_linq::Sequence;
    ///
    /// assert_eq!(Sequence::range(3, 4).to_vec(), vec![3, 4, 5, 6]);
    /// ```
    pub fn range(start: N, count: usize) -> Self {
        Sequence::infinity_from(start).take(count)
    }

    /// `count` values counting up from `start` by `step`.
    pub fn range_by(start: N, step: N, count: usize) -> Self {
        Sequence::infinity(start, step).take(count)
    }

    /// `count` consecutive values counting down from `start`.
    pub fn range_down(start: N, count: usize) -> Self {
        Sequence::negative_infinity_from(start).take(count)
    }

    /// `count` values counting down from `start` by `step`.
    pub fn range_down_by(start: N, step: N, count: usize) -> Self {
        Sequence::negative_infinity(start, step).take(count)
    }

    fn progression<F>(start: N, advance: F) -> Self
    where
        F: Fn(N) -> N + Copy + Send + Sync + 'static,
    {
        Sequence::from_fn(move || {
            let mut current: Option<N> = None;
            move || {
                let value = match current {
                    None => start,
                    Some(previous) => advance(previous),
                };
                current = Some(value);
                Some(value)
            }
        })
    }
}
