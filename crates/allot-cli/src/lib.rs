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

//! Allot CLI - Command-line front end for the investment selection solver
//!
//! Loads an instance (a text file or the built-in reference portfolio), runs
//! the sequential or the parallel exhaustive solver, and prints the selection
//! report followed by the solver statistics.

use allot_model::{
    loading::ProblemLoader,
    model::{Catalog, Problem},
    reference::reference_problem,
    report::{CurrencyFormat, Report},
};
use allot_search::{
    engine::ExhaustiveSolver,
    monitor::{
        composite::CompositeMonitor, log::LogMonitor, time_limit::TimeLimitMonitor,
    },
    parallel::ParallelSolver,
    result::SolverOutcome,
};
use clap::Parser;
use std::{ffi::OsString, fmt::Write, path::PathBuf, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod error;

pub use error::{CliError, CliResult};

/// Allot command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "allot")]
#[command(about = "Select the investment options with the highest expected return", long_about = None)]
#[command(version)]
pub struct Args {
    /// Instance file; the built-in reference portfolio is used when omitted
    #[arg(short, long, env = "ALLOT_INPUT")]
    pub input: Option<PathBuf>,

    /// Number of worker threads; 1 runs the sequential solver
    #[arg(
        short,
        long,
        env = "ALLOT_THREADS",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub threads: u32,

    /// Number of leading decisions enumerated to form parallel work units
    #[arg(long, env = "ALLOT_SPLIT_DEPTH", default_value_t = 8)]
    pub split_depth: usize,

    /// Abort the search after this many seconds
    #[arg(long, env = "ALLOT_TIME_LIMIT")]
    pub time_limit: Option<u64>,

    /// Skip subtrees whose best possible return is below the best found
    #[arg(long, env = "ALLOT_BOUND_PRUNING")]
    pub bound_pruning: bool,

    /// Log search progress (sequential solver only)
    #[arg(long, env = "ALLOT_PROGRESS")]
    pub progress: bool,

    /// Default log filter when RUST_LOG is not set
    #[arg(long, env = "ALLOT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Currency symbol used in the report
    #[arg(long, env = "ALLOT_CURRENCY_SYMBOL", default_value = "R$")]
    pub currency_symbol: String,

    /// Factor applied to catalog amounts before printing
    #[arg(long, env = "ALLOT_CURRENCY_SCALE", default_value_t = 10_000.0)]
    pub currency_scale: f64,
}

/// Run using the current process arguments.
pub fn run() -> CliResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::parse_from(args);

    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .try_init();

    let problem = load_problem(&args)?;
    let outcome = solve(&args, &problem);
    print!("{}", render(&args, problem.catalog(), &outcome));
    Ok(())
}

/// Loads the instance named by `--input`, or the reference portfolio.
pub fn load_problem(args: &Args) -> CliResult<Problem<i64>> {
    let problem = match &args.input {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading instance");
            ProblemLoader::<i64>::new().from_path(path)?
        }
        None => {
            tracing::info!("using the built-in reference instance");
            reference_problem()?
        }
    };

    tracing::info!(
        items = problem.catalog().len(),
        budget = problem.constraints().budget(),
        "instance loaded"
    );
    Ok(problem)
}

/// Runs the solver selected by `args`.
pub fn solve(args: &Args, problem: &Problem<i64>) -> SolverOutcome<i64> {
    let time_limit = args.time_limit.map(Duration::from_secs);

    if args.threads <= 1 {
        let mut monitor = CompositeMonitor::<i64>::with_capacity(2);
        if let Some(limit) = time_limit {
            monitor.add_monitor(TimeLimitMonitor::<i64>::with_default_check_interval(limit));
        }
        if args.progress {
            monitor.add_monitor(LogMonitor::<i64>::default());
        }

        return ExhaustiveSolver::new()
            .with_bound_pruning(args.bound_pruning)
            .solve(problem.catalog(), problem.constraints(), monitor);
    }

    let mut solver = ParallelSolver::new()
        .with_num_threads(args.threads as usize)
        .with_split_depth(args.split_depth)
        .with_bound_pruning(args.bound_pruning);
    if let Some(limit) = time_limit {
        solver = solver.with_time_limit(limit);
    }
    tracing::info!(solver = %solver, "starting parallel search");
    solver.solve(problem.catalog(), problem.constraints())
}

/// Formats the report (or the infeasibility notice) and the statistics.
pub fn render(args: &Args, catalog: &Catalog<i64>, outcome: &SolverOutcome<i64>) -> String {
    let mut out = String::new();
    let currency = CurrencyFormat::new(args.currency_symbol.as_str(), args.currency_scale, 2);

    // Writing into a `String` cannot fail.
    let _ = match outcome.solution() {
        Some(solution) => {
            if !outcome.is_optimal() {
                let _ = writeln!(out, "Search aborted; best selection found so far:\n");
            }
            write!(
                out,
                "{}",
                Report::new(catalog, solution).with_currency(currency)
            )
        }
        None => writeln!(out, "No feasible selection satisfies the constraints."),
    };
    let _ = write!(out, "\n{}", outcome);
    out
}
