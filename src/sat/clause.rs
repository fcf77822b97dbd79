#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Contains details of a clause, a disjunction of literals.
//!
//! A clause such as `x1 OR !x2 OR x3` is stored as a deduplicated list of
//! literals. Clauses are built once, when the database is constructed, and
//! never mutated afterwards; the watched-literals index points into them by
//! position.

use crate::sat::assignment::Assignment;
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::literal::{Literal, PackedLiteral};
use itertools::Itertools;
use smallvec::SmallVec;
use std::collections::HashSet;
use std::marker::PhantomData;
use std::ops::Index;

/// A disjunction of literals.
///
/// # Type Parameters
///
/// * `L`: The literal representation. Defaults to `PackedLiteral`.
/// * `S`: The literal storage. Defaults to `SmallVec<[L; 8]>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clause<L: Literal = PackedLiteral, S: LiteralStorage<L> = SmallVec<[L; 8]>> {
    /// The literals forming the clause, deduplicated at construction.
    pub literals: S,
    marker: PhantomData<L>,
}

impl<L: Literal, S: LiteralStorage<L>> Clause<L, S> {
    /// Creates a clause from a slice of literals, dropping duplicates.
    ///
    /// Duplicate literals carry no logical content, and removing them up
    /// front lets the watched slots assume two distinct positions in any
    /// clause of length two or more.
    #[must_use]
    pub fn new(literals: &[L]) -> Self {
        literals.iter().copied().collect()
    }

    /// Number of literals in the clause.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// `true` when the clause has no literals. An empty clause is a
    /// contradiction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// `true` when the clause has exactly one literal.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// `true` when the clause contains both a literal and its negation.
    /// Such a clause is always true and carries no constraint.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.len());
        for &lit in self.literals.iter() {
            if seen.contains(&lit.negated()) {
                return true;
            }
            seen.insert(lit);
        }
        false
    }

    /// Iterates over the literals.
    pub fn iter(&self) -> impl Iterator<Item = &L> {
        self.literals.iter()
    }

    /// `true` when at least one literal evaluates to true under `assignment`.
    pub fn is_satisfied<A: Assignment>(&self, assignment: &A) -> bool {
        self.iter()
            .any(|&lit| assignment.literal_value(lit) == Some(true))
    }

    /// `true` when every literal evaluates to false under `assignment`.
    pub fn is_falsified<A: Assignment>(&self, assignment: &A) -> bool {
        self.iter()
            .all(|&lit| assignment.literal_value(lit) == Some(false))
    }

    /// Number of literals whose variable is unassigned under `assignment`.
    pub fn unassigned_count<A: Assignment>(&self, assignment: &A) -> usize {
        self.iter()
            .filter(|&&lit| assignment.literal_value(lit).is_none())
            .count()
    }
}

impl<L: Literal, S: LiteralStorage<L>> Index<usize> for Clause<L, S> {
    type Output = L;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl<L: Literal, S: LiteralStorage<L>> AsRef<[L]> for Clause<L, S> {
    fn as_ref(&self) -> &[L] {
        self.literals.as_ref()
    }
}

impl<L: Literal, S: LiteralStorage<L>> FromIterator<L> for Clause<L, S> {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self {
            literals: iter.into_iter().unique().collect(),
            marker: PhantomData,
        }
    }
}

impl<L: Literal, S: LiteralStorage<L>> FromIterator<i32> for Clause<L, S> {
    /// Creates a clause from DIMACS literals, deduplicating as it goes.
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        iter.into_iter().map(L::from_i32).collect()
    }
}

impl<L: Literal, S: LiteralStorage<L>> From<Vec<i32>> for Clause<L, S> {
    fn from(literals: Vec<i32>) -> Self {
        literals.into_iter().collect()
    }
}

impl<L: Literal, S: LiteralStorage<L>> From<&Clause<L, S>> for Vec<L> {
    fn from(clause: &Clause<L, S>) -> Self {
        clause.literals.iter().copied().collect_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::assignment::{Assignment, VecAssignment};

    #[test]
    fn test_new_from_i32_vec_and_len() {
        let clause: Clause = Clause::from(vec![1, 2, 3]);
        assert_eq!(clause.len(), 3);

        let expected = PackedLiteral::new(1, true);
        assert!(clause.iter().any(|&l| l == expected));
    }

    #[test]
    fn test_duplicates_removed() {
        let clause: Clause = Clause::from(vec![1, 1, -2, -2, 3]);
        assert_eq!(clause.len(), 3);
    }

    #[test]
    fn test_is_tautology() {
        let tautology: Clause = Clause::from(vec![1, -1]);
        assert!(tautology.is_tautology());

        let plain: Clause = Clause::from(vec![1, 2]);
        assert!(!plain.is_tautology());
    }

    #[test]
    fn test_is_unit_and_empty() {
        let unit: Clause = Clause::from(vec![1]);
        assert!(unit.is_unit());
        assert!(!unit.is_empty());

        let empty: Clause = Clause::default();
        assert!(empty.is_empty());
        assert!(!empty.is_unit());
    }

    #[test]
    fn test_evaluation_queries() {
        let clause: Clause = Clause::from(vec![1, -2, 3]);
        let mut assignment = VecAssignment::new(3);

        assert_eq!(clause.unassigned_count(&assignment), 3);
        assert!(!clause.is_satisfied(&assignment));
        assert!(!clause.is_falsified(&assignment));

        assignment.set(2, true);
        assert!(!clause.is_satisfied(&assignment));
        assert_eq!(clause.unassigned_count(&assignment), 2);

        assignment.set(1, true);
        assert!(clause.is_satisfied(&assignment));

        assignment.set(1, false);
        assignment.set(3, false);
        assert!(clause.is_falsified(&assignment));
    }
}
