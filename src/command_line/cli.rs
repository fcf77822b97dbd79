//! Defines the command-line interface for the solver binary.
//!
//! The binary takes a single path to a DIMACS `.cnf` file, solves it, and
//! prints exactly one JSON object on stdout. Everything else (usage, errors,
//! log output) goes to stderr.

use clap::Parser;
use dpll_sat::sat::cnf::Cnf;
use dpll_sat::sat::dimacs::parse_file;
use dpll_sat::sat::dpll::Dpll;
use dpll_sat::sat::error::Result;
use dpll_sat::sat::solver::{Solutions, Solver};
use itertools::Itertools;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// A DPLL SAT solver for DIMACS CNF files.
#[derive(Parser, Debug)]
#[command(name = "dpll_sat", version, about = "A DPLL SAT solver")]
pub(crate) struct Cli {
    /// Path to the DIMACS .cnf file to solve.
    pub(crate) path: PathBuf,
}

/// The single-line JSON report printed on stdout.
#[derive(Serialize, Debug)]
struct Report {
    #[serde(rename = "Instance")]
    instance: String,
    #[serde(rename = "Time")]
    time: f64,
    #[serde(rename = "Result")]
    result: &'static str,
    #[serde(rename = "Decisions")]
    decisions: usize,
    #[serde(rename = "Propagations")]
    propagations: usize,
    #[serde(rename = "Solution", skip_serializing_if = "Option::is_none")]
    solution: Option<String>,
}

/// Parses the file, solves it, and prints the report.
pub(crate) fn run(cli: &Cli) -> Result<()> {
    let cnf: Cnf = parse_file(&cli.path)?;
    tracing::info!(
        variables = cnf.num_vars,
        clauses = cnf.len(),
        "solving {}",
        cli.path.display()
    );

    let mut solver: Dpll = Solver::new(cnf);

    let started = Instant::now();
    let solutions = solver.solve();
    let elapsed = started.elapsed();
    let stats = solver.stats();

    let report = Report {
        instance: instance_name(&cli.path),
        time: (elapsed.as_secs_f64() * 100.0).round() / 100.0,
        result: if solutions.is_some() { "SAT" } else { "UNSAT" },
        decisions: stats.decisions,
        propagations: stats.propagations,
        solution: solutions.as_ref().map(format_solution),
    };

    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

/// The file name component of the instance path, used as its display name.
fn instance_name(path: &PathBuf) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| {
            name.to_string_lossy().into_owned()
        })
}

/// Renders a model as `"v1 true v2 false ..."` in ascending order of the
/// original variable identifiers.
fn format_solution(solutions: &Solutions) -> String {
    solutions
        .iter()
        .map(|lit| {
            let value = if lit > 0 { "true" } else { "false" };
            format!("{} {value}", lit.unsigned_abs())
        })
        .join(" ")
}
