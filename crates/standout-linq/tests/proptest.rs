//! Property-based tests for the sequence operators using proptest.

use std::collections::HashSet;

use proptest::prelude::*;
use standout_linq::{Dataset, Sequence};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Row {
    group: u8,
    rank: i32,
}

fn row_strategy() -> impl Strategy<Value = Row> {
    (0u8..4, -50i32..50).prop_map(|(group, rank)| Row { group, rank })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// A sequence replays the same elements on every traversal.
    #[test]
    fn traversal_is_repeatable(items in prop::collection::vec(any::<i32>(), 0..50)) {
        let seq = Sequence::from_vec(items.clone());
        prop_assert_eq!(seq.to_vec(), items.clone());
        prop_assert_eq!(seq.count(), items.len());
    }

    /// Filtering never grows the sequence and keeps only matches.
    #[test]
    fn where_never_grows(items in prop::collection::vec(any::<i64>(), 0..100), threshold in any::<i64>()) {
        let kept = Sequence::from_vec(items.clone()).where_(move |n| *n > threshold).to_vec();
        prop_assert!(kept.len() <= items.len());
        prop_assert!(kept.iter().all(|n| *n > threshold));
    }

    /// skip(n) followed by take(m) matches slicing.
    #[test]
    fn skip_take_matches_slicing(
        items in prop::collection::vec(any::<u16>(), 0..60),
        skip in 0usize..80,
        take in 0usize..80,
    ) {
        let paged = Sequence::from_vec(items.clone()).skip(skip).take(take).to_vec();
        let expected: Vec<u16> = items.iter().copied().skip(skip).take(take).collect();
        prop_assert_eq!(paged, expected);
    }

    /// distinct yields each value once, in first-occurrence order.
    #[test]
    fn distinct_keeps_first_occurrences(items in prop::collection::vec(0u8..10, 0..60)) {
        let distinct = Sequence::from_vec(items.clone()).distinct().to_vec();

        let mut seen = HashSet::new();
        let expected: Vec<u8> = items.into_iter().filter(|n| seen.insert(*n)).collect();
        prop_assert_eq!(distinct, expected);
    }

    /// order_by agrees with a stable sort of the same data.
    #[test]
    fn order_by_matches_stable_sort(rows in prop::collection::vec(row_strategy(), 0..40)) {
        let sorted = Sequence::from_vec(rows.clone())
            .order_by(|r| r.group)
            .then_by_descending(|r| r.rank)
            .to_vec();

        let mut expected = rows;
        expected.sort_by(|a, b| a.group.cmp(&b.group).then(b.rank.cmp(&a.rank)));
        prop_assert_eq!(sorted, expected);
    }

    /// Every element lands in exactly one group, and groups partition the input.
    #[test]
    fn group_by_partitions(rows in prop::collection::vec(row_strategy(), 0..40)) {
        let groups = Sequence::from_vec(rows.clone()).group_by(|r| r.group).to_vec();
        let total: usize = groups.iter().map(|g| g.elements().count()).sum();
        prop_assert_eq!(total, rows.len());
        for group in &groups {
            prop_assert!(group.elements().all(|r| r.group == *group.key()));
        }
    }

    /// union contains exactly the distinct values of both inputs.
    #[test]
    fn union_is_set_union(
        a in prop::collection::vec(0u8..20, 0..30),
        b in prop::collection::vec(0u8..20, 0..30),
    ) {
        let union = Sequence::from_vec(a.clone()).union(b.clone(), |n| *n).to_vec();
        let expected: HashSet<u8> = a.into_iter().chain(b).collect();
        prop_assert_eq!(union.len(), expected.len());
        prop_assert_eq!(union.into_iter().collect::<HashSet<_>>(), expected);
    }

    /// sum agrees with the standard library fold.
    #[test]
    fn sum_matches_iterator_sum(items in prop::collection::vec(-1000i64..1000, 0..50)) {
        let total = Sequence::from_vec(items.clone()).sum(|n| *n);
        prop_assert_eq!(total, items.iter().sum::<i64>());
    }

    /// Dataset execution equals the same pipeline over sequence operators.
    #[test]
    fn dataset_matches_operators(
        rows in prop::collection::vec(row_strategy(), 0..40),
        offset in 0usize..10,
        limit in 1usize..10,
    ) {
        let queried = Dataset::new(rows.clone())
            .where_(|r| r.rank >= 0)
            .order_by(|r| r.rank)
            .skip(offset)
            .take(limit)
            .to_vec();

        let composed = Sequence::from_vec(rows)
            .where_(|r| r.rank >= 0)
            .order_by(|r| r.rank)
            .skip(offset)
            .take(limit)
            .to_vec();
        prop_assert_eq!(queried, composed);
    }
}
