#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Branching heuristics: which unassigned variable to try next, and with
//! which polarity first.

use crate::sat::assignment::Assignment;
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};

/// A branching heuristic.
///
/// Any implementation that returns an unassigned variable (or `None` when no
/// candidate exists) is sound; the choice only affects how much of the
/// search tree is explored.
pub trait VariableSelection: Clone + std::fmt::Debug {
    /// Creates a selector for a formula with `num_vars` variables.
    fn new(num_vars: usize) -> Self;

    /// Picks the next branch variable, or `None` when no branching is
    /// possible.
    fn pick<L: Literal, S: LiteralStorage<L>, A: Assignment>(
        &self,
        cnf: &Cnf<L, S>,
        assignment: &A,
    ) -> Option<Variable>;

    /// The polarity to try first for `var`.
    fn polarity<L: Literal, S: LiteralStorage<L>, A: Assignment>(
        &self,
        var: Variable,
        cnf: &Cnf<L, S>,
        assignment: &A,
    ) -> bool;
}

/// Maximum Occurrences in clauses of Minimum Size.
///
/// Among the unsatisfied clauses with the fewest unassigned literals, each
/// unassigned variable is scored `(p * n) * 2 + p + n` from its positive and
/// negative occurrence counts in those clauses; the highest score wins, ties
/// going to the lowest internal index. The polarity tried first is the one
/// that immediately satisfies more unsatisfied clauses, ties going to true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Moms;

impl VariableSelection for Moms {
    fn new(_num_vars: usize) -> Self {
        Self
    }

    fn pick<L: Literal, S: LiteralStorage<L>, A: Assignment>(
        &self,
        cnf: &Cnf<L, S>,
        assignment: &A,
    ) -> Option<Variable> {
        let min_undef = cnf
            .iter()
            .filter(|clause| !clause.is_satisfied(assignment))
            .map(|clause| clause.unassigned_count(assignment))
            .filter(|&count| count > 0)
            .min();

        let Some(min_undef) = min_undef else {
            // No open clause constrains anything; fall back to the lowest
            // unassigned variable if one remains.
            return assignment.unassigned().next();
        };

        let mut positive = vec![0_usize; cnf.num_vars + 1];
        let mut negative = vec![0_usize; cnf.num_vars + 1];

        for clause in cnf.iter().filter(|clause| {
            !clause.is_satisfied(assignment) && clause.unassigned_count(assignment) == min_undef
        }) {
            for &lit in clause.iter() {
                if assignment.literal_value(lit).is_some() {
                    continue;
                }
                let var = lit.variable() as usize;
                if lit.polarity() {
                    positive[var] += 1;
                } else {
                    negative[var] += 1;
                }
            }
        }

        let mut best: Option<(usize, Variable)> = None;
        #[allow(clippy::cast_possible_truncation)]
        for var in 1..=cnf.num_vars {
            let (p, n) = (positive[var], negative[var]);
            if p == 0 && n == 0 {
                continue;
            }
            let score = p * n * 2 + p + n;
            if best.is_none_or(|(best_score, _)| score > best_score) {
                best = Some((score, var as Variable));
            }
        }

        best.map(|(_, var)| var)
    }

    fn polarity<L: Literal, S: LiteralStorage<L>, A: Assignment>(
        &self,
        var: Variable,
        cnf: &Cnf<L, S>,
        assignment: &A,
    ) -> bool {
        let mut by_true = 0_usize;
        let mut by_false = 0_usize;

        for clause in cnf.iter().filter(|c| !c.is_satisfied(assignment)) {
            if clause.iter().any(|&l| l.variable() == var && l.polarity()) {
                by_true += 1;
            }
            if clause.iter().any(|&l| l.variable() == var && !l.polarity()) {
                by_false += 1;
            }
        }

        by_true >= by_false
    }
}

/// Picks the lowest-index unassigned variable and tries true first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstUnassigned;

impl VariableSelection for FirstUnassigned {
    fn new(_num_vars: usize) -> Self {
        Self
    }

    fn pick<L: Literal, S: LiteralStorage<L>, A: Assignment>(
        &self,
        _cnf: &Cnf<L, S>,
        assignment: &A,
    ) -> Option<Variable> {
        assignment.unassigned().next()
    }

    fn polarity<L: Literal, S: LiteralStorage<L>, A: Assignment>(
        &self,
        _var: Variable,
        _cnf: &Cnf<L, S>,
        _assignment: &A,
    ) -> bool {
        true
    }
}
