#![deny(missing_docs)]
//! This crate implements a classical DPLL (Davis-Putnam-Logemann-Loveland)
//! decision procedure for propositional satisfiability. The search is a plain
//! recursive backtracking procedure over partial assignments, with unit
//! propagation driven by a two-watched-literals index, pure-literal
//! elimination and a MOMS branching heuristic.

/// The `sat` module implements the solver core: the clause database, the
/// watched-literals propagation engine and the recursive search driver.
pub mod sat;
