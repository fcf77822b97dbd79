//! Errors produced while reading problem input.
//!
//! Satisfiability outcomes are never errors; a solve returns `Option` over a
//! model. Everything here describes input that could not be turned into a
//! clause database in the first place, and is terminal for the invocation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading and parsing a DIMACS CNF problem.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be opened.
    #[error("cannot open '{path}': {source}")]
    FileOpen {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// Reading from the input failed mid-parse.
    #[error("cannot read CNF input: {0}")]
    Io(#[from] io::Error),

    /// Clause data appeared before any `p cnf` problem line, or the input
    /// ended without one.
    #[error("DIMACS input has no 'p cnf' problem line")]
    MissingProblemLine,

    /// The problem line names a format other than `cnf`.
    #[error("unsupported DIMACS format '{0}', expected 'cnf'")]
    UnsupportedFormat(String),

    /// The problem line is present but cannot be parsed.
    #[error("malformed problem line: {0}")]
    MalformedProblemLine(String),

    /// The problem line declares a zero variable or clause count.
    #[error("problem line counts must be positive: {num_vars} variables, {num_clauses} clauses")]
    NonPositiveCounts {
        /// Declared variable count.
        num_vars: usize,
        /// Declared clause count.
        num_clauses: usize,
    },

    /// A clause token is not a signed integer literal.
    #[error("invalid literal token '{0}'")]
    InvalidLiteral(String),

    /// The input ended inside a clause, before its terminating `0`.
    #[error("last clause is not terminated by 0")]
    UnterminatedClause,

    /// The number of clauses read differs from the declared count.
    #[error("expected {expected} clauses but found {found}")]
    ClauseCountMismatch {
        /// Count declared on the problem line.
        expected: usize,
        /// Count actually read.
        found: usize,
    },

    /// The result report could not be serialized.
    #[error("cannot serialize result: {0}")]
    Report(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
