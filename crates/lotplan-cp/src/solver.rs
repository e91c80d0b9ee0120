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

//! # Solver Capability Boundary
//!
//! `ConstraintSolver` is the seam between the declarative model and a
//! concrete search engine. Model builders depend only on this trait;
//! engines implement it.
//!
//! `SolverParameters` carries the limits a caller may impose. The default
//! mirrors the reference configuration of a five second budget.

use crate::{model::CpModel, response::SolverResponse};
use lotplan_core::num::SolverNumeric;
use std::time::Duration;

/// The default wall-clock budget.
pub const DEFAULT_MAX_TIME: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverParameters {
    max_time: Option<Duration>,
    log_search_progress: bool,
}

impl Default for SolverParameters {
    fn default() -> Self {
        Self {
            max_time: Some(DEFAULT_MAX_TIME),
            log_search_progress: false,
        }
    }
}

impl SolverParameters {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.max_time = Some(limit);
        self
    }

    /// Removes the wall-clock budget; the engine runs until it proves
    /// optimality or infeasibility.
    #[inline]
    pub fn without_time_limit(mut self) -> Self {
        self.max_time = None;
        self
    }

    #[inline]
    pub fn with_log_search_progress(mut self, enabled: bool) -> Self {
        self.log_search_progress = enabled;
        self
    }

    #[inline]
    pub fn max_time(&self) -> Option<Duration> {
        self.max_time
    }

    #[inline]
    pub fn log_search_progress(&self) -> bool {
        self.log_search_progress
    }
}

impl std::fmt::Display for SolverParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let time = self
            .max_time
            .map_or_else(|| "none".to_string(), |d| format!("{:.2?}", d));
        write!(
            f,
            "SolverParameters(max_time: {}, log: {})",
            time, self.log_search_progress
        )
    }
}

/// A search engine able to solve a `CpModel`.
pub trait ConstraintSolver<T>
where
    T: SolverNumeric,
{
    /// Returns the name of the solver.
    fn name(&self) -> &str;

    /// Solves the model under the given limits. Never panics on an invalid
    /// model; such models yield a `ModelInvalid` response.
    fn solve(&mut self, model: &CpModel<T>, parameters: &SolverParameters) -> SolverResponse<T>;
}

impl<T> std::fmt::Debug for dyn ConstraintSolver<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConstraintSolver({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = SolverParameters::default();
        assert_eq!(p.max_time(), Some(Duration::from_secs(5)));
        assert!(!p.log_search_progress());
    }

    #[test]
    fn test_builder_chain() {
        let p = SolverParameters::new()
            .without_time_limit()
            .with_log_search_progress(true);
        assert_eq!(p.max_time(), None);
        assert!(p.log_search_progress());
        assert_eq!(p.to_string(), "SolverParameters(max_time: none, log: true)");
    }

    #[test]
    fn test_time_limit_display() {
        let p = SolverParameters::new().with_time_limit(Duration::from_millis(1500));
        assert_eq!(p.to_string(), "SolverParameters(max_time: 1.50s, log: false)");
    }
}
