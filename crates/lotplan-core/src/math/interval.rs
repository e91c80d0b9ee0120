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

/// A half-open interval `[start, end)` over the integers.
///
/// Used for the extent of a placed rectangle along one axis. An interval with
/// `start == end` is empty: it contains no point and overlaps nothing, which
/// is what makes a zero-width rectangle compatible with every other one.
///
/// # Invariants
///
/// `start <= end`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClosedOpenInterval<T> {
    start: T,
    end: T,
}

impl<T> ClosedOpenInterval<T>
where
    T: PrimInt,
{
    /// Creates a new interval.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    ///
    /// ```rust
    /// # use lotplan_core::math::interval::ClosedOpenInterval;
    /// let iv = ClosedOpenInterval::new(10_i64, 17);
    /// assert_eq!(iv.len(), 7);
    /// ```
    #[inline]
    pub fn new(start: T, end: T) -> Self {
        assert!(
            start <= end,
            "called `ClosedOpenInterval::new` with start greater than end"
        );
        Self { start, end }
    }

    /// Creates a new interval, or `None` if `start > end`.
    #[inline]
    pub fn try_new(start: T, end: T) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Creates the interval `[start, start + len)`, or `None` if `len` is
    /// negative or the end overflows.
    ///
    /// ```rust
    /// # use lotplan_core::math::interval::ClosedOpenInterval;
    /// let iv = ClosedOpenInterval::from_start_len(40_i64, 5).unwrap();
    /// assert_eq!(iv.end(), 45);
    /// assert!(ClosedOpenInterval::from_start_len(0_i64, -1).is_none());
    /// ```
    #[inline]
    pub fn from_start_len(start: T, len: T) -> Option<Self> {
        if len < T::zero() {
            return None;
        }
        let end = start.checked_add(&len)?;
        Some(Self { start, end })
    }

    #[inline]
    pub const fn start(&self) -> T {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> T {
        self.end
    }

    #[inline]
    pub fn len(&self) -> T {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `other` lies within `self`. An empty `other` is
    /// contained when its position lies within `[start, end]`.
    #[inline]
    pub fn contains_interval(&self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns `true` if the two intervals share at least one point.
    ///
    /// ```rust
    /// # use lotplan_core::math::interval::ClosedOpenInterval;
    /// let a = ClosedOpenInterval::new(0_i64, 5);
    /// assert!(a.overlaps(ClosedOpenInterval::new(4, 6)));
    /// assert!(!a.overlaps(ClosedOpenInterval::new(5, 6)));
    /// assert!(!a.overlaps(ClosedOpenInterval::new(2, 2)));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start < other.end
            && other.start < self.end
    }
}

impl<T> std::fmt::Debug for ClosedOpenInterval<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}, {:?})", self.start, self.end)
    }
}

impl<T> std::fmt::Display for ClosedOpenInterval<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl<T> From<ClosedOpenInterval<T>> for std::ops::Range<T> {
    fn from(iv: ClosedOpenInterval<T>) -> Self {
        iv.start..iv.end
    }
}
