// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! By-value saturating arithmetic.
//!
//! Linear expressions and constraint checks add and multiply values that may
//! sit at the numeric limits of the type (an unbounded side of a linear
//! constraint is stored as `T::max_value()`). These traits clamp instead of
//! wrapping.

use core::ops::{Add, Mul, Neg, Sub};

macro_rules! saturating_binary {
    ($trait_name:ident, $method:ident, $src:ident, $($t:ty),+) => {
        $(
            impl $trait_name for $t {
                #[inline(always)]
                fn $method(self, rhs: Self) -> Self {
                    <$t>::$src(self, rhs)
                }
            }
        )+
    };
}

/// Saturating addition by value.
///
/// ```rust
/// # use lotplan_core::num::ops::saturating_arithmetic::SaturatingAddVal;
/// assert_eq!(i64::MAX.saturating_add_val(1), i64::MAX);
/// assert_eq!(3_i64.saturating_add_val(4), 7);
/// ```
pub trait SaturatingAddVal: Sized + Add<Self, Output = Self> {
    fn saturating_add_val(self, rhs: Self) -> Self;
}

/// Saturating subtraction by value.
///
/// ```rust
/// # use lotplan_core::num::ops::saturating_arithmetic::SaturatingSubVal;
/// assert_eq!(i64::MIN.saturating_sub_val(1), i64::MIN);
/// ```
pub trait SaturatingSubVal: Sized + Sub<Self, Output = Self> {
    fn saturating_sub_val(self, rhs: Self) -> Self;
}

/// Saturating multiplication by value.
///
/// ```rust
/// # use lotplan_core::num::ops::saturating_arithmetic::SaturatingMulVal;
/// assert_eq!(i64::MAX.saturating_mul_val(-2), i64::MIN);
/// ```
pub trait SaturatingMulVal: Sized + Mul<Self, Output = Self> {
    fn saturating_mul_val(self, rhs: Self) -> Self;
}

/// Saturating negation by value. `MIN` maps to `MAX`.
pub trait SaturatingNegVal: Sized + Neg<Output = Self> {
    fn saturating_neg_val(self) -> Self;
}

saturating_binary!(SaturatingAddVal, saturating_add_val, saturating_add, u8, u16, u32, u64, usize);
saturating_binary!(SaturatingAddVal, saturating_add_val, saturating_add, i8, i16, i32, i64, isize);
saturating_binary!(SaturatingSubVal, saturating_sub_val, saturating_sub, u8, u16, u32, u64, usize);
saturating_binary!(SaturatingSubVal, saturating_sub_val, saturating_sub, i8, i16, i32, i64, isize);
saturating_binary!(SaturatingMulVal, saturating_mul_val, saturating_mul, u8, u16, u32, u64, usize);
saturating_binary!(SaturatingMulVal, saturating_mul_val, saturating_mul, i8, i16, i32, i64, isize);

macro_rules! saturating_neg {
    ($($t:ty),+) => {
        $(
            impl SaturatingNegVal for $t {
                #[inline(always)]
                fn saturating_neg_val(self) -> Self {
                    <$t>::saturating_neg(self)
                }
            }
        )+
    };
}

saturating_neg!(i8, i16, i32, i64, isize);
