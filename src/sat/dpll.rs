//! The recursive DPLL (Davis-Putnam-Logemann-Loveland) search driver.
//!
//! Each recursion frame snapshots the assignment vector, runs unit
//! propagation and pure-literal elimination, checks for satisfaction or a
//! falsified clause, and otherwise branches on a heuristically chosen
//! variable, trying the preferred polarity first. On every failing path the
//! snapshot is restored, so a frame returns with the exact assignment it was
//! entered with. Watch lists are deliberately not restored: which literals a
//! clause watches stays valid under any assignment.

use crate::sat::assignment::{Assignment, VecAssignment};
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, PackedLiteral};
use crate::sat::preprocessing::PureLiteralElimination;
use crate::sat::propagation::{Propagation, Propagator};
use crate::sat::solver::{SolutionStats, Solutions, Solver};
use crate::sat::variable_selection::{Moms, VariableSelection};
use smallvec::SmallVec;

/// A DPLL SAT solver.
///
/// Generic over the literal representation, clause storage, assignment
/// backing and branching heuristic; the defaults are the configuration the
/// binary uses.
#[derive(Debug, Clone)]
pub struct Dpll<
    L: Literal = PackedLiteral,
    S: LiteralStorage<L> = SmallVec<[L; 8]>,
    A: Assignment = VecAssignment,
    V: VariableSelection = Moms,
> {
    /// The formula being solved.
    pub cnf: Cnf<L, S>,
    /// The current partial assignment over internal variables.
    pub assignment: A,
    /// The branching heuristic.
    pub selector: V,
    /// The unit propagation engine and its watch index.
    pub propagator: Propagator<L, S>,
    decisions: usize,
}

impl<L: Literal, S: LiteralStorage<L>, A: Assignment, V: VariableSelection> Solver<L, S>
    for Dpll<L, S, A, V>
{
    fn new(cnf: Cnf<L, S>) -> Self {
        let propagator = Propagator::new(&cnf);
        let assignment = A::new(cnf.num_vars);
        let selector = V::new(cnf.num_vars);

        Self {
            cnf,
            assignment,
            selector,
            propagator,
            decisions: 0,
        }
    }

    /// Runs the search to completion.
    ///
    /// On success any still-unassigned variable is given an arbitrary value
    /// and the full formula is re-checked against the final assignment; a
    /// model that fails that check is discarded and reported as
    /// unsatisfiable, so a spurious success can never escape.
    fn solve(&mut self) -> Option<Solutions> {
        if self.search() && self.complete_and_verify() {
            Some(self.solutions())
        } else {
            None
        }
    }

    /// The model from the current assignment, remapped to the caller's
    /// variable identifiers and ordered by them.
    fn solutions(&self) -> Solutions {
        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let literals = (1..=self.cnf.num_vars)
            .map(|idx| {
                let original = self.cnf.original_var(idx as u32) as i32;
                match self.assignment.var_value(idx as u32) {
                    Some(false) => -original,
                    // Unassigned variables only remain after an unsatisfiable
                    // search; any value works for the `Display` path.
                    Some(true) | None => original,
                }
            })
            .collect::<Vec<_>>();
        Solutions::new(&literals)
    }

    fn stats(&self) -> SolutionStats {
        SolutionStats {
            decisions: self.decisions,
            propagations: self.propagator.num_propagations(),
        }
    }
}

impl<L: Literal, S: LiteralStorage<L>, A: Assignment, V: VariableSelection> Dpll<L, S, A, V> {
    /// One recursion frame of the search. Returns `true` when the formula is
    /// satisfiable from the current assignment; on `false` the assignment is
    /// restored to its state at frame entry.
    fn search(&mut self) -> bool {
        let snapshot = self.assignment.clone();

        if self.propagate() == Propagation::Conflict {
            self.assignment = snapshot;
            return false;
        }

        if self.assign_pure_literals() == Propagation::Conflict {
            self.assignment = snapshot;
            return false;
        }

        if self.is_sat() {
            return true;
        }

        if self.is_unsat() {
            self.assignment = snapshot;
            return false;
        }

        let Some(var) = self.selector.pick(&self.cnf, &self.assignment) else {
            self.assignment = snapshot;
            return false;
        };
        self.decisions += 1;

        let first = self.selector.polarity(var, &self.cnf, &self.assignment);
        tracing::debug!(var, polarity = first, "branching");

        self.assignment.set(var, first);
        if self.search() {
            return true;
        }

        self.assignment.clone_from(&snapshot);
        self.assignment.set(var, !first);
        if self.search() {
            return true;
        }

        self.assignment = snapshot;
        false
    }

    fn propagate(&mut self) -> Propagation {
        self.propagator.propagate(&mut self.assignment, &self.cnf)
    }

    /// Assigns every pure literal, then propagates once to compound the
    /// consequences. Without pure assignments this is a no-op.
    fn assign_pure_literals(&mut self) -> Propagation {
        let pures = PureLiteralElimination::find_pures(&self.cnf, &self.assignment);
        if pures.is_empty() {
            return Propagation::Stable;
        }

        tracing::trace!(count = pures.len(), "assigning pure literals");
        for lit in pures {
            self.assignment.assign(lit);
        }
        self.propagate()
    }

    /// `true` when every clause has at least one true literal.
    fn is_sat(&self) -> bool {
        self.cnf
            .iter()
            .all(|clause| clause.is_satisfied(&self.assignment))
    }

    /// `true` when some clause has every literal false.
    fn is_unsat(&self) -> bool {
        self.cnf
            .iter()
            .any(|clause| clause.is_falsified(&self.assignment))
    }

    /// Assigns true to every remaining unassigned variable, then re-checks
    /// the whole formula against the final assignment.
    fn complete_and_verify(&mut self) -> bool {
        let free: Vec<_> = self.assignment.unassigned().collect();
        for var in free {
            self.assignment.set(var, true);
        }

        if self.is_sat() {
            true
        } else {
            tracing::warn!("model failed re-verification, reporting unsatisfiable");
            false
        }
    }
}
