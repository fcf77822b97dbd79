#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The clause database and the variable remapper.
//!
//! Input clauses may mention arbitrary positive variable identifiers.
//! Construction assigns dense internal indices `1..=N` in order of first
//! occurrence so every downstream structure can be a flat array, then drops
//! tautological clauses. Empty clauses are kept; propagation reports them as
//! immediate conflicts. The database is never mutated after construction.

use crate::sat::clause::Clause;
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::literal::{Literal, PackedLiteral, Variable};
use crate::sat::solver::Solutions;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt::Display;
use std::num::NonZeroI32;
use std::ops::Index;

/// A boolean formula in conjunctive normal form over dense internal
/// variables, with the mapping back to the caller's identifiers.
///
/// # Type Parameters
///
/// * `L`: The literal representation. Defaults to `PackedLiteral`.
/// * `S`: The literal storage within each clause. Defaults to `SmallVec<[L; 8]>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf<L: Literal = PackedLiteral, S: LiteralStorage<L> = SmallVec<[L; 8]>> {
    /// The stored clauses, tautology-free, over internal variables.
    pub clauses: Vec<Clause<L, S>>,
    /// Number of distinct variables; internal indices run `1..=num_vars`.
    pub num_vars: usize,
    /// Maps internal index back to the original identifier. Slot `0` is
    /// unused.
    pub idx_to_var: Vec<Variable>,
    /// Maps original identifier to internal index. Inverse of `idx_to_var`.
    var_to_idx: FxHashMap<Variable, Variable>,
}

impl<L: Literal, S: LiteralStorage<L>> Cnf<L, S> {
    /// Creates a database from an iterator of clauses, each an iterator of
    /// DIMACS literals (nonzero signed integers).
    ///
    /// Variables are renumbered densely by first occurrence; the renumbering
    /// covers every clause, including tautological ones, so a variable that
    /// only occurs in a dropped clause still appears in the solution.
    pub fn new<J: IntoIterator<Item = i32>, I: IntoIterator<Item = J>>(clauses_iter: I) -> Self {
        let mut idx_to_var: Vec<Variable> = vec![0];
        let mut var_to_idx: FxHashMap<Variable, Variable> = FxHashMap::default();

        let clauses = clauses_iter
            .into_iter()
            .map(|clause| {
                clause
                    .into_iter()
                    .map(|lit| {
                        let var = lit.unsigned_abs();
                        let idx = *var_to_idx.entry(var).or_insert_with(|| {
                            idx_to_var.push(var);
                            #[allow(clippy::cast_possible_truncation)]
                            {
                                (idx_to_var.len() - 1) as Variable
                            }
                        });
                        L::new(idx, lit.is_positive())
                    })
                    .collect::<Clause<L, S>>()
            })
            .filter(|clause| !clause.is_tautology())
            .collect_vec();

        Self {
            clauses,
            num_vars: idx_to_var.len() - 1,
            idx_to_var,
            var_to_idx,
        }
    }

    /// The internal index of an original variable identifier, if it occurs
    /// in the formula.
    #[must_use]
    pub fn internal_index(&self, var: Variable) -> Option<Variable> {
        self.var_to_idx.get(&var).copied()
    }

    /// The original identifier of an internal variable index.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not in `1..=num_vars`.
    #[must_use]
    pub fn original_var(&self, idx: Variable) -> Variable {
        self.idx_to_var[idx as usize]
    }

    /// Number of stored clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// `true` when no clauses are stored. An empty formula is trivially
    /// satisfiable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Iterates over the stored clauses.
    pub fn iter(&self) -> impl Iterator<Item = &Clause<L, S>> {
        self.clauses.iter()
    }

    /// Checks a solution, given in original variable identifiers, against
    /// every stored clause.
    ///
    /// Returns `true` when each clause contains at least one literal the
    /// solution makes true.
    #[must_use]
    pub fn verify(&self, solutions: &Solutions) -> bool {
        self.iter().all(|clause| {
            clause.iter().any(|&lit| {
                let original = self.original_var(lit.variable());
                #[allow(clippy::cast_possible_wrap)]
                let signed = if lit.polarity() {
                    original as i32
                } else {
                    -(original as i32)
                };
                NonZeroI32::new(signed).is_some_and(|lit| solutions.check(lit))
            })
        })
    }
}

impl<L: Literal, S: LiteralStorage<L>> Index<usize> for Cnf<L, S> {
    type Output = Clause<L, S>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl<L: Literal, S: LiteralStorage<L>> From<Vec<Vec<i32>>> for Cnf<L, S> {
    fn from(clauses: Vec<Vec<i32>>) -> Self {
        Self::new(clauses)
    }
}

impl<L: Literal, S: LiteralStorage<L>> Display for Cnf<L, S> {
    /// Renders the stored formula in DIMACS CNF format over the original
    /// variable identifiers.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            for &lit in clause.iter() {
                let original = self.original_var(lit.variable());
                #[allow(clippy::cast_possible_wrap)]
                let signed = if lit.polarity() {
                    original as i32
                } else {
                    -(original as i32)
                };
                write!(f, "{signed} ")?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}
