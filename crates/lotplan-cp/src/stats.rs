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

use lotplan_core::num::ops::saturating_arithmetic::SaturatingAddVal;
use std::time::Duration;

/// Counters collected during one solve.
///
/// Engines fill what they can observe; a counter an engine does not track
/// stays at zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchStatistics {
    /// Engine variables created while loading the model.
    pub variables_created: u64,
    /// Engine constraints posted while loading the model.
    pub constraints_posted: u64,
    /// Auxiliary boolean literals created for disjunctions.
    pub literals_created: u64,
    /// Solutions reported back to the caller.
    pub solutions_found: u64,
    /// Wall-clock time spent translating the model.
    pub time_loading: Duration,
    /// Wall-clock time spent in the solver, loading included.
    pub time_total: Duration,
}

impl SearchStatistics {
    #[inline]
    pub fn on_variable_created(&mut self) {
        self.variables_created = self.variables_created.saturating_add_val(1);
    }

    #[inline]
    pub fn on_constraint_posted(&mut self) {
        self.constraints_posted = self.constraints_posted.saturating_add_val(1);
    }

    #[inline]
    pub fn on_literal_created(&mut self) {
        self.literals_created = self.literals_created.saturating_add_val(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add_val(1);
    }

    #[inline]
    pub fn set_loading_time(&mut self, duration: Duration) {
        self.time_loading = duration;
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Variables created:    {}", self.variables_created)?;
        writeln!(f, "  Constraints posted:   {}", self.constraints_posted)?;
        writeln!(f, "  Literals created:     {}", self.literals_created)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Loading time:         {:.2?}", self.time_loading)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = SearchStatistics::default();
        stats.on_variable_created();
        stats.on_variable_created();
        stats.on_constraint_posted();
        stats.on_literal_created();
        stats.on_solution_found();
        assert_eq!(stats.variables_created, 2);
        assert_eq!(stats.constraints_posted, 1);
        assert_eq!(stats.literals_created, 1);
        assert_eq!(stats.solutions_found, 1);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = SearchStatistics {
            constraints_posted: u64::MAX,
            ..Default::default()
        };
        stats.on_constraint_posted();
        assert_eq!(stats.constraints_posted, u64::MAX);
    }

    #[test]
    fn test_display_lists_counters() {
        let text = format!("{}", SearchStatistics::default());
        assert!(text.starts_with("Search Statistics:"));
        assert!(text.contains("Constraints posted:"));
    }
}
