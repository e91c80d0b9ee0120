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

use crate::render::RenderError;
use lotplan_layout::{
    error::{ConfigError, LayoutError},
    verify::PlanViolation,
};
use std::path::PathBuf;

/// Everything that makes the binary exit with a failure code.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("could not load the lot configuration")]
    Config(#[from] ConfigError),
    #[error("planning failed")]
    Layout(#[from] LayoutError),
    #[error("the plan breaks a layout rule")]
    Verify(#[from] PlanViolation),
    #[error("could not render the plan")]
    Render(#[from] RenderError),
    #[error("could not serialize the plan")]
    Json(#[from] serde_json::Error),
    #[error("could not create {}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
