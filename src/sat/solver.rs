//! The `Solver` trait together with solution and statistics types.

use crate::sat::clause_storage::LiteralStorage;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, PackedLiteral};
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::Display;
use std::num::NonZeroI32;

/// A satisfying assignment, stored as signed DIMACS literals over the
/// original (pre-remap) variable identifiers, sorted ascending by variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solutions(Vec<i32>);

impl Solutions {
    /// Creates a solution set from signed literals, sorting by variable.
    #[must_use]
    pub fn new(literals: &[i32]) -> Self {
        let mut literals = literals.to_vec();
        literals.sort_unstable_by_key(|lit| lit.unsigned_abs());
        Self(literals)
    }

    /// `true` when the given literal is made true by this assignment.
    ///
    /// A literal whose variable does not occur in the solution evaluates
    /// to false here; the solver assigns every variable before reporting.
    #[must_use]
    pub fn check(&self, lit: NonZeroI32) -> bool {
        let lit = lit.get();
        self.0
            .binary_search_by_key(&lit.unsigned_abs(), |l| l.unsigned_abs())
            .is_ok_and(|idx| self.0[idx] == lit)
    }

    /// Iterates over the signed literals in ascending variable order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }

    /// Number of assigned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no variables are assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Solutions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

/// Counters describing the work a solve performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// Branch variables picked by the search driver.
    pub decisions: usize,
    /// Forced assignments made by unit propagation.
    pub propagations: usize,
}

/// Common interface of the solvers in this crate.
pub trait Solver<L: Literal = PackedLiteral, S: LiteralStorage<L> = SmallVec<[L; 8]>> {
    /// Creates a solver over the given formula.
    fn new(cnf: Cnf<L, S>) -> Self;

    /// Runs the search. `Some` holds a verified satisfying assignment in
    /// original variable identifiers; `None` means unsatisfiable.
    fn solve(&mut self) -> Option<Solutions>;

    /// The model from the current assignment state. Meaningful after
    /// `solve` has returned `Some`.
    fn solutions(&self) -> Solutions;

    /// Work counters for the last solve.
    fn stats(&self) -> SolutionStats;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solutions_sorted_by_variable() {
        let solutions = Solutions::new(&[9, -3, 1]);
        assert_eq!(solutions.iter().collect::<Vec<_>>(), vec![1, -3, 9]);
    }

    #[test]
    fn test_solutions_check() {
        let solutions = Solutions::new(&[1, -2, 3]);
        assert!(solutions.check(NonZeroI32::new(1).unwrap()));
        assert!(solutions.check(NonZeroI32::new(-2).unwrap()));
        assert!(!solutions.check(NonZeroI32::new(2).unwrap()));
        assert!(!solutions.check(NonZeroI32::new(-1).unwrap()));
        assert!(!solutions.check(NonZeroI32::new(7).unwrap()));
    }

    #[test]
    fn test_solutions_display() {
        let solutions = Solutions::new(&[-2, 1]);
        assert_eq!(solutions.to_string(), "1 -2");
    }
}
