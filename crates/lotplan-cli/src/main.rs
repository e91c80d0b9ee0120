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

//! `lotplan`: plans buildings, parking lots and a park on a rectangular lot
//! and reports the total building area.

mod args;
mod error;
mod render;

use crate::{
    args::Args,
    error::CliError,
    render::{AsciiRenderer, Renderer, SvgRenderer},
};
use clap::Parser;
use lotplan_layout::{pipeline::plan_lot, verify::verify_plan};
use lotplan_solver::PumpkinSolver;
use std::{
    error::Error,
    fs::File,
    io::{BufWriter, Write},
    process::ExitCode,
};

fn init_logging(log_search: bool) {
    let default_filter = if log_search { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = args.lot_config()?;
    let parameters = args.solver_parameters(&config);
    log::debug!("{} with {}", config, parameters);

    let mut solver = PumpkinSolver::new();
    let outcome = plan_lot(&config, &mut solver, &parameters)?;
    let plan = outcome.plan();

    println!("Yield: {}", plan.lot_yield);
    println!("Status: {}", plan.status);
    if !outcome.is_proven() {
        println!("Note: the search stopped early, this layout is not proven optimal.");
    }

    if args.verify {
        verify_plan(plan, &config)?;
        println!("Verified: the plan satisfies every layout rule.");
    }

    let stdout = std::io::stdout();
    if args.ascii {
        AsciiRenderer.render(plan, &mut stdout.lock())?;
    }
    if args.json {
        let mut out = stdout.lock();
        writeln!(out, "{}", plan.to_json()?).map_err(render::RenderError::from)?;
    }
    if let Some(path) = &args.svg {
        let file = File::create(path).map_err(|source| CliError::Output {
            path: path.clone(),
            source,
        })?;
        let mut out = BufWriter::new(file);
        SvgRenderer::new(args.scale).render(plan, &mut out)?;
        out.flush().map_err(render::RenderError::from)?;
        log::info!("wrote SVG plan to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_search);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
