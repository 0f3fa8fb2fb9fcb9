//! Element access and paging.
//!
//! Element access operators are terminal and pull only as far as they must:
//! `first` stops at the first match, `single` at the second. `skip` and
//! `take` families are lazy.

use std::sync::Arc;

use crate::error::{Result, SeqError};
use crate::sequence::{Element, Sequence};

impl<T: Element> Sequence<T> {
    /// The element at zero-based `index`, or `None` past the end.
    pub fn element_at(&self, index: usize) -> Option<T> {
        self.cursor().nth(index)
    }

    /// The element at `index`, or `default` past the end.
    pub fn element_at_or_default(&self, index: usize, default: T) -> T {
        self.element_at(index).unwrap_or(default)
    }

    /// The first element. Pulls at most one.
    pub fn first(&self) -> Option<T> {
        self.cursor().next()
    }

    /// The first element matching `predicate`.
    pub fn first_where<F>(&self, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.cursor().find(|item| predicate(item))
    }

    /// The first element, or `default` when empty.
    pub fn first_or_default(&self, default: T) -> T {
        self.first().unwrap_or(default)
    }

    /// The first element matching `predicate`, or `default`.
    pub fn first_or_default_where<F>(&self, predicate: F, default: T) -> T
    where
        F: FnMut(&T) -> bool,
    {
        self.first_where(predicate).unwrap_or(default)
    }

    /// The final element. Traverses the whole sequence.
    pub fn last(&self) -> Option<T> {
        self.cursor().last()
    }

    /// The final element matching `predicate`.
    pub fn last_where<F>(&self, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.cursor().filter(|item| predicate(item)).last()
    }

    /// The final element, or `default` when empty.
    pub fn last_or_default(&self, default: T) -> T {
        self.last().unwrap_or(default)
    }

    /// The final element matching `predicate`, or `default`.
    pub fn last_or_default_where<F>(&self, predicate: F, default: T) -> T
    where
        F: FnMut(&T) -> bool,
    {
        self.last_where(predicate).unwrap_or(default)
    }

    /// The only element.
    ///
    /// Returns `None` both when the sequence is empty and when it holds more
    /// than one element; use [`try_single`](Self::try_single) to tell the two
    /// apart.
    pub fn single(&self) -> Option<T> {
        self.try_single().ok()
    }

    /// The only element matching `predicate`, under the same rules as
    /// [`single`](Self::single).
    pub fn single_where<F>(&self, predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.try_single_where(predicate).ok()
    }

    /// The only element, or `default` when there are none or several.
    pub fn single_or_default(&self, default: T) -> T {
        self.single().unwrap_or(default)
    }

    /// The only element matching `predicate`, or `default` when none or
    /// several match.
    pub fn single_or_default_where<F>(&self, predicate: F, default: T) -> T
    where
        F: FnMut(&T) -> bool,
    {
        self.single_where(predicate).unwrap_or(default)
    }

    /// The only element.
    ///
    /// # Errors
    ///
    /// [`SeqError::NotFound`] for an empty sequence, [`SeqError::Ambiguous`]
    /// as soon as a second element is seen.
    ///
    /// ```
    /// use standout_linq::{SeqError, Sequence};
    ///
    /// assert_eq!(Sequence::return_(4).try_single(), Ok(4));
    /// assert_eq!(Sequence::<i32>::empty().try_single(), Err(SeqError::NotFound));
    /// assert_eq!(Sequence::infinity_from(0).try_single(), Err(SeqError::Ambiguous));
    /// ```
    pub fn try_single(&self) -> Result<T> {
        self.try_single_where(|_| true)
    }

    /// The only element matching `predicate`.
    ///
    /// # Errors
    ///
    /// As for [`try_single`](Self::try_single), counting matches only.
    pub fn try_single_where<F>(&self, mut predicate: F) -> Result<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut matches = self.cursor().filter(|item| predicate(item));
        let found = matches.next().ok_or(SeqError::NotFound)?;
        match matches.next() {
            Some(_) => Err(SeqError::Ambiguous),
            None => Ok(found),
        }
    }

    /// Bypasses the first `count` elements.
    pub fn skip(&self, count: usize) -> Sequence<T> {
        self.derive(move |cursor| cursor.skip(count))
    }

    /// Bypasses elements while `predicate` holds, then yields the rest.
    pub fn skip_while<F>(&self, predicate: F) -> Sequence<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.skip_while_indexed(move |item, _| predicate(item))
    }

    /// [`skip_while`](Self::skip_while) with the element's position.
    pub fn skip_while_indexed<F>(&self, predicate: F) -> Sequence<T>
    where
        F: Fn(&T, usize) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        self.derive(move |cursor| {
            let predicate = Arc::clone(&predicate);
            cursor
                .enumerate()
                .skip_while(move |(index, item)| predicate(item, *index))
                .map(|(_, item)| item)
        })
    }

    /// Yields at most `count` elements.
    ///
    /// Once `count` elements have been yielded the upstream is never pulled
    /// again, so `take` safely bounds infinite sequences.
    pub fn take(&self, count: usize) -> Sequence<T> {
        self.derive(move |cursor| cursor.take(count))
    }

    /// Yields elements while `predicate` holds and stops at the first
    /// failure.
    pub fn take_while<F>(&self, predicate: F) -> Sequence<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.take_while_indexed(move |item, _| predicate(item))
    }

    /// [`take_while`](Self::take_while) with the element's position.
    pub fn take_while_indexed<F>(&self, predicate: F) -> Sequence<T>
    where
        F: Fn(&T, usize) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        self.derive(move |cursor| {
            let predicate = Arc::clone(&predicate);
            cursor
                .enumerate()
                .take_while(move |(index, item)| predicate(item, *index))
                .map(|(_, item)| item)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn letters() -> Sequence<char> {
        Sequence::from_vec(vec!['a', 'b', 'c', 'd'])
    }

    #[test]
    fn element_at_bounds() {
        assert_eq!(letters().element_at(2), Some('c'));
        assert_eq!(letters().element_at(4), None);
        assert_eq!(letters().element_at_or_default(9, '?'), '?');
    }

    #[test]
    fn first_and_last() {
        assert_eq!(letters().first(), Some('a'));
        assert_eq!(letters().last(), Some('d'));
        assert_eq!(letters().first_where(|c| *c > 'a'), Some('b'));
        assert_eq!(letters().last_where(|c| *c < 'd'), Some('c'));
        assert_eq!(Sequence::<char>::empty().first_or_default('x'), 'x');
        assert_eq!(Sequence::<char>::empty().last_or_default('y'), 'y');
        assert_eq!(letters().first_or_default_where(|c| *c == 'z', '-'), '-');
        assert_eq!(letters().last_or_default_where(|c| *c == 'b', '-'), 'b');
    }

    #[test]
    fn first_of_infinite() {
        assert_eq!(Sequence::infinity_from(5).first_where(|n| n % 4 == 0), Some(8));
    }

    #[test]
    fn single_conflates_absence() {
        assert_eq!(Sequence::return_(1).single(), Some(1));
        assert_eq!(Sequence::<i32>::empty().single(), None);
        assert_eq!(letters().single(), None);
        assert_eq!(letters().single_where(|c| *c == 'c'), Some('c'));
        assert_eq!(letters().single_or_default('?'), '?');
        assert_eq!(letters().single_or_default_where(|c| *c == 'd', '?'), 'd');
    }

    #[test]
    fn try_single_distinguishes() {
        assert_eq!(letters().try_single_where(|c| *c == 'z'), Err(SeqError::NotFound));
        assert_eq!(letters().try_single_where(|c| *c != 'a'), Err(SeqError::Ambiguous));
        assert_eq!(letters().try_single_where(|c| *c == 'a'), Ok('a'));
    }

    #[test]
    fn skip_family() {
        assert_eq!(letters().skip(2).to_vec(), vec!['c', 'd']);
        assert!(letters().skip(10).to_vec().is_empty());
        assert_eq!(letters().skip_while(|c| *c < 'c').to_vec(), vec!['c', 'd']);
        assert_eq!(
            Sequence::from_vec(vec![5, 1, 7]).skip_while_indexed(|n, i| *n > i as i32 * 2).to_vec(),
            vec![1, 7]
        );
    }

    #[test]
    fn take_family() {
        assert_eq!(letters().take(2).to_vec(), vec!['a', 'b']);
        assert_eq!(letters().take(0).to_vec(), Vec::<char>::new());
        assert_eq!(Sequence::infinity_from(1).take_while(|n| *n < 4).to_vec(), vec![1, 2, 3]);
        assert_eq!(letters().take_while_indexed(|_, i| i < 3).to_vec(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn take_stops_pulling() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&pulls);
        let source = Sequence::infinity_from(0u32).select(move |n| {
            counter.fetch_add(1, Ordering::SeqCst);
            n
        });
        assert_eq!(source.take(3).to_vec(), vec![0, 1, 2]);
        assert_eq!(pulls.load(Ordering::SeqCst), 3);
    }
}
