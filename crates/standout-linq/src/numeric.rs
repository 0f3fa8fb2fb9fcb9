//! Minimal arithmetic capability for numeric generators and aggregates.
//!
//! [`Numeric`] is what `sum`, `average` and the arithmetic progressions
//! (`infinity`, `range`, ...) need from an element type: addition,
//! subtraction, conversion to `f64` for averaging, and construction from a
//! small integer literal for the implicit zero and unit step.

use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Arithmetic interface implemented for all primitive integer and float types.
///
/// # Example
///
/// ```
/// use standout_linq::Numeric;
///
/// assert_eq!(u8::zero(), 0);
/// assert_eq!(i64::one(), 1);
/// assert_eq!(3u16.to_f64(), 3.0);
/// ```
pub trait Numeric:
    Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + AddAssign
    + SubAssign
    + Send
    + Sync
    + 'static
{
    /// Builds a value from a small non-negative integer literal.
    fn from_i8(n: i8) -> Self;

    /// Converts the value to `f64`.
    fn to_f64(self) -> f64;

    /// The additive identity.
    fn zero() -> Self {
        Self::from_i8(0)
    }

    /// The default step of arithmetic progressions.
    fn one() -> Self {
        Self::from_i8(1)
    }
}

macro_rules! impl_numeric {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Numeric for $ty {
                fn from_i8(n: i8) -> Self {
                    n as $ty
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
