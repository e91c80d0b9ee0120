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

use num_traits::PrimInt;

/// A closed integer range `[lower, upper]`.
///
/// `Bounds` describes the domain of an integer variable. Unlike
/// `ClosedOpenInterval` it may be empty (`lower > upper`), which is how an
/// inconsistent domain is represented before it is reported as a model
/// defect.
///
/// # Examples
///
/// ```rust
/// # use lotplan_core::math::bounds::Bounds;
/// let b = Bounds::new(0_i64, 60);
/// assert!(b.contains(60));
/// assert!(!b.is_fixed());
/// assert!(Bounds::new(5_i64, 4).is_empty());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds<T> {
    lower: T,
    upper: T,
}

impl<T> Bounds<T>
where
    T: PrimInt,
{
    #[inline]
    pub const fn new(lower: T, upper: T) -> Self {
        Self { lower, upper }
    }

    /// A single-value domain.
    #[inline]
    pub const fn fixed(value: T) -> Self {
        Self {
            lower: value,
            upper: value,
        }
    }

    #[inline]
    pub const fn lower(&self) -> T {
        self.lower
    }

    #[inline]
    pub const fn upper(&self) -> T {
        self.upper
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.lower == self.upper
    }

    #[inline]
    pub fn contains(&self, value: T) -> bool {
        self.lower <= value && value <= self.upper
    }
}

impl<T> std::fmt::Debug for Bounds<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}, {:?}]", self.lower, self.upper)
    }
}

impl<T> std::fmt::Display for Bounds<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
