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

use std::path::PathBuf;

/// A rejected `LotConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("at least one building is required")]
    NoBuildings,
    #[error("at least one parking lot is required")]
    NoParkingLots,
    #[error("the time limit must be a positive number of seconds, got {0}")]
    InvalidTimeLimit(f64),
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config JSON")]
    Parse(#[from] serde_json::Error),
}

/// Why no layout could be produced.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid configuration")]
    Config(#[from] ConfigError),
    #[error("no layout satisfies the constraints")]
    Infeasible,
    #[error("no layout found within the search limits ({0})")]
    NoSolutionFound(String),
    #[error("the constraint model is invalid: {0}")]
    InvalidModel(String),
}
