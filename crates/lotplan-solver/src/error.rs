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


use thiserror::Error;

/// Why a `CpModel` could not be loaded into the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// The engine works on 32-bit integers; a bound or coefficient of the
    /// model does not fit.
    #[error("{what} value {value} does not fit the engine's 32-bit integer range")]
    ValueOutOfRange { what: &'static str, value: i64 },

    /// Posting a constraint emptied a domain at the root.
    #[error("constraint {constraint} ({kind}) is infeasible at the root")]
    RootInfeasible { constraint: usize, kind: &'static str },
}

impl TranslationError {
    /// Returns `true` if the error means the model has no solution, as
    /// opposed to being out of the engine's reach.
    #[inline]
    pub fn is_infeasibility(&self) -> bool {
        matches!(self, TranslationError::RootInfeasible { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = TranslationError::ValueOutOfRange {
            what: "upper bound",
            value: 1 << 40,
        };
        assert_eq!(
            e.to_string(),
            "upper bound value 1099511627776 does not fit the engine's 32-bit integer range"
        );
        assert!(!e.is_infeasibility());

        let e = TranslationError::RootInfeasible {
            constraint: 3,
            kind: "Linear",
        };
        assert_eq!(e.to_string(), "constraint 3 (Linear) is infeasible at the root");
        assert!(e.is_infeasibility());
    }
}
