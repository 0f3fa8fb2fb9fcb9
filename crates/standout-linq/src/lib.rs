//! Linq - Lazy, composable query operators over any sequence of values.
//!
//! Linq provides a fluent API for building deferred pipelines over finite
//! or infinite sources. It supports:
//!
//! - Generation: ranges, arithmetic progressions, repetition, cycling, random choice
//! - Projection and filtering, with indexed variants
//! - Inner and grouped joins, grouping, and keyed lookups
//! - Set algebra by key or by equality comparer
//! - Stable multi-key ordering with tie-breakers
//! - Aggregates, element access, and paging
//!
//! # Quick Start
//!
//! ```rust
//! use standout_linq::Sequence;
//!
//! #[derive(Debug, Clone)]
//! struct Book {
//!     title: &'static str,
//!     author: &'static str,
//!     year: u32,
//! }
//!
//! let books = Sequence::from_vec(vec![
//!     Book { title: "Dune", author: "Herbert", year: 1965 },
//!     Book { title: "Emma", author: "Austen", year: 1815 },
//!     Book { title: "Persuasion", author: "Austen", year: 1817 },
//! ]);
//!
//! // Nothing runs until a terminal operator pulls.
//! let austen = books
//!     .where_(|b| b.author == "Austen")
//!     .order_by_descending(|b| b.year)
//!     .select(|b| b.title);
//!
//! assert_eq!(austen.to_vec(), vec!["Persuasion", "Emma"]);
//! assert_eq!(books.count(), 3);
//! ```
//!
//! # Evaluation Model
//!
//! A [`Sequence`] wraps a cursor factory. Every traversal calls the factory
//! for a fresh [`Cursor`], so re-iterating a sequence always starts over:
//!
//! ```text
//! source ─► op ─► op ─► terminal (to_vec, count, first, ...)
//!            ▲           │
//!            └── pull ───┘
//! ```
//!
//! Most operators stream. The exceptions buffer per traversal:
//!
//! | Operator | Buffers |
//! |----------|---------|
//! | `order_by`, `reverse` | the whole upstream |
//! | `group_by`, `to_lookup` | the whole upstream |
//! | `join`, `group_join` | the inner sequence |
//! | `except`, `intersect` | the second sequence, plus seen keys |
//! | `distinct`, `union` | seen keys |
//!
//! Buffering operators never finish on an infinite source; bound it first
//! with `take` or `take_while`.

mod aggregate;
mod convert;
mod dataset;
mod error;
mod generate;
mod grouping;
mod join;
mod lookup;
mod numeric;
mod ordering;
mod paging;
mod project;
mod sequence;
mod set;
mod tap;

// Re-export public API
pub use dataset::{Dataset, QuerySource};
pub use error::{Result, SeqError};
pub use grouping::Grouping;
pub use lookup::Lookup;
pub use numeric::Numeric;
pub use ordering::{Dir, OrderedSequence};
pub use project::Dynamic;
pub use sequence::{Cursor, Element, IntoSequence, Sequence};
