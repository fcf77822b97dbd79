#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Worklist-driven unit propagation.
//!
//! Propagation runs at the top of every search frame. The worklist is seeded
//! from the variables already assigned by the frames above plus any unit
//! clauses, then literals are processed in FIFO order: when a literal
//! becomes true its negation becomes false, and only the clauses watching
//! that negation are inspected. Each inspection either leaves the watch in
//! place, moves it to a non-false literal, forces the clause's remaining
//! literal, or reports a conflict.

use crate::sat::assignment::Assignment;
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use crate::sat::watch::WatchedLiterals;
use bit_vec::BitVec;
use std::collections::VecDeque;
use std::marker::PhantomData;

/// Upper bound on watch-list inspections in a single propagation run. A
/// correct run never comes close; hitting the bound is reported as a
/// conflict so the search backtracks instead of reporting an unsound model.
pub const PROPAGATION_LIMIT: usize = 1_000_000;

/// Outcome of a propagation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// A fixpoint was reached without falsifying any clause.
    Stable,
    /// Some clause is falsified under the current assignment, or the
    /// iteration bound was hit.
    Conflict,
}

/// Unit propagation over a two-watched-literals index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Propagator<L: Literal, S: LiteralStorage<L>> {
    watches: WatchedLiterals<L>,
    num_propagations: usize,
    marker: PhantomData<S>,
}

impl<L: Literal, S: LiteralStorage<L>> Propagator<L, S> {
    /// Creates a propagator and its watch index for a clause database.
    #[must_use]
    pub fn new(cnf: &Cnf<L, S>) -> Self {
        Self {
            watches: WatchedLiterals::new(cnf),
            num_propagations: 0,
            marker: PhantomData,
        }
    }

    /// Total forced assignments made across all runs.
    #[must_use]
    pub const fn num_propagations(&self) -> usize {
        self.num_propagations
    }

    /// Runs propagation to a fixpoint or a conflict.
    ///
    /// Seeding queues the true literal of every assigned variable exactly
    /// once, in ascending variable order, then applies unit clauses: an
    /// unassigned unit is forced and queued, a contradicted unit is a
    /// conflict, and an empty clause is a conflict outright.
    pub fn propagate<A: Assignment>(&mut self, assignment: &mut A, cnf: &Cnf<L, S>) -> Propagation {
        let num_vars = cnf.num_vars;
        let mut queue: VecDeque<L> = VecDeque::with_capacity(num_vars);
        let mut enqueued = BitVec::from_elem(num_vars + 1, false);

        let push = |queue: &mut VecDeque<L>, enqueued: &mut BitVec, lit: L| {
            let var = lit.variable() as usize;
            if !enqueued.get(var).unwrap_or(false) {
                enqueued.set(var, true);
                queue.push_back(lit);
            }
        };

        #[allow(clippy::cast_possible_truncation)]
        for var in 1..=num_vars as Variable {
            if let Some(value) = assignment.var_value(var) {
                push(&mut queue, &mut enqueued, L::new(var, value));
            }
        }

        for (idx, clause) in cnf.iter().enumerate() {
            match clause.len() {
                0 => {
                    tracing::trace!(clause = idx, "empty clause");
                    return Propagation::Conflict;
                }
                1 => {
                    let lit = clause[0];
                    match assignment.literal_value(lit) {
                        Some(false) => {
                            tracing::trace!(clause = idx, "contradicted unit clause");
                            return Propagation::Conflict;
                        }
                        Some(true) => {}
                        None => {
                            assignment.assign(lit);
                            self.num_propagations += 1;
                            push(&mut queue, &mut enqueued, lit);
                        }
                    }
                }
                _ => {}
            }
        }

        let mut iterations = 0_usize;
        while let Some(lit) = queue.pop_front() {
            let falsified = lit.negated();
            let mut slot = 0;

            while slot < self.watches.watchers(falsified).len() {
                iterations += 1;
                if iterations > PROPAGATION_LIMIT {
                    tracing::warn!("propagation iteration limit hit, treating as conflict");
                    return Propagation::Conflict;
                }

                let clause_idx = self.watches.watchers(falsified)[slot];
                let clause = &cnf[clause_idx];

                if clause.is_satisfied(assignment) {
                    slot += 1;
                    continue;
                }

                if self
                    .watches
                    .find_new_watch(clause_idx, falsified, cnf, assignment)
                {
                    // The old entry was swap-removed, so this slot now holds
                    // a different clause.
                    continue;
                }

                let (first, second) = self.watches.clause_watches(clause_idx);
                let other = if first == falsified { second } else { first };
                match assignment.literal_value(other) {
                    Some(true) => slot += 1,
                    Some(false) => {
                        tracing::trace!(clause = clause_idx, "conflict");
                        return Propagation::Conflict;
                    }
                    None => {
                        assignment.assign(other);
                        self.num_propagations += 1;
                        push(&mut queue, &mut enqueued, other);
                        slot += 1;
                    }
                }
            }
        }

        Propagation::Stable
    }
}
