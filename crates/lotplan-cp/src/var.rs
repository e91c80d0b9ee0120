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

//! Variable handles and their stored data.
//!
//! `IntVar` and `IntervalVar` are `Copy` handles returned by the builder.
//! They carry only an index; the domain and name live in the model.

use crate::index::{IntervalIndex, VarIndex};
use lotplan_core::math::bounds::Bounds;

/// Handle to a bounded integer variable.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct IntVar(VarIndex);

impl IntVar {
    #[inline(always)]
    pub const fn new(index: VarIndex) -> Self {
        Self(index)
    }

    #[inline(always)]
    pub const fn index(&self) -> VarIndex {
        self.0
    }
}

impl std::fmt::Display for IntVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IntVar({})", self.0.get())
    }
}

/// Handle to an interval token binding `start + size == end` on one axis.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct IntervalVar(IntervalIndex);

impl IntervalVar {
    #[inline(always)]
    pub const fn new(index: IntervalIndex) -> Self {
        Self(index)
    }

    #[inline(always)]
    pub const fn index(&self) -> IntervalIndex {
        self.0
    }
}

impl std::fmt::Display for IntervalVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IntervalVar({})", self.0.get())
    }
}

/// The initial domain and the name of an integer variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntVarData<T> {
    bounds: Bounds<T>,
    name: String,
}

impl<T> IntVarData<T>
where
    T: Copy,
{
    #[inline]
    pub fn new(bounds: Bounds<T>, name: String) -> Self {
        Self { bounds, name }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds<T> {
        self.bounds
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The three variables an interval token binds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalVarData {
    start: IntVar,
    size: IntVar,
    end: IntVar,
    name: String,
}

impl IntervalVarData {
    #[inline]
    pub fn new(start: IntVar, size: IntVar, end: IntVar, name: String) -> Self {
        Self {
            start,
            size,
            end,
            name,
        }
    }

    #[inline]
    pub fn start(&self) -> IntVar {
        self.start
    }

    #[inline]
    pub fn size(&self) -> IntVar {
        self.size
    }

    #[inline]
    pub fn end(&self) -> IntVar {
        self.end
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for IntervalVarData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(start: {}, size: {}, end: {})",
            self.name, self.start, self.size, self.end
        )
    }
}
