#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The two-watched-literals index.
//!
//! Every clause watches two of its literal positions; every literal keys a
//! list of the clauses currently watching it. When a variable is assigned,
//! only the clauses watching the newly falsified literal need inspection.
//!
//! The index survives backtracking untouched. A watch move performed during
//! propagation stays valid under any later assignment because it records
//! which literals are watched, never their current values.

use crate::sat::assignment::Assignment;
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use smallvec::SmallVec;

/// Per-literal watch lists plus the two watched literals of each clause.
///
/// Watch lists are keyed by `Literal::index()`, which splits each variable
/// into its positive and negative literal. List entries are clause indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatchedLiterals<L: Literal> {
    watches: Vec<SmallVec<[usize; 4]>>,
    clause_watches: Vec<(L, L)>,
}

impl<L: Literal> WatchedLiterals<L> {
    /// Builds the index for a clause database.
    ///
    /// A clause of length two or more watches its first two literals. A unit
    /// clause watches its only literal in both slots and contributes one
    /// list entry per slot. An empty clause watches nothing.
    #[must_use]
    pub fn new<S: LiteralStorage<L>>(cnf: &Cnf<L, S>) -> Self {
        let mut index = Self {
            watches: vec![SmallVec::new(); (cnf.num_vars + 1) * 2],
            clause_watches: Vec::with_capacity(cnf.len()),
        };

        for (i, clause) in cnf.iter().enumerate() {
            if clause.is_empty() {
                index.clause_watches.push((L::default(), L::default()));
                continue;
            }
            let first = clause[0];
            let second = if clause.is_unit() { clause[0] } else { clause[1] };
            index.clause_watches.push((first, second));
            index.add_watch(first, i);
            index.add_watch(second, i);
        }

        index
    }

    /// The clauses currently watching `lit`.
    #[must_use]
    pub fn watchers(&self, lit: L) -> &[usize] {
        &self.watches[lit.index()]
    }

    /// The two literals clause `clause_idx` currently watches.
    ///
    /// # Panics
    ///
    /// Panics if `clause_idx` is out of bounds.
    #[must_use]
    pub fn clause_watches(&self, clause_idx: usize) -> (L, L) {
        self.clause_watches[clause_idx]
    }

    /// Appends `clause_idx` to the watch list of `lit`.
    fn add_watch(&mut self, lit: L, clause_idx: usize) {
        self.watches[lit.index()].push(clause_idx);
    }

    /// Removes `clause_idx` from the watch list of `lit` by swapping with
    /// the last entry.
    fn remove_watch(&mut self, lit: L, clause_idx: usize) {
        let list = &mut self.watches[lit.index()];
        if let Some(pos) = list.iter().position(|&i| i == clause_idx) {
            list.swap_remove(pos);
        }
    }

    /// Tries to move the watch of clause `clause_idx` away from `false_lit`.
    ///
    /// Candidates are literals of the clause other than `false_lit` and the
    /// other watched literal. Two passes over the clause: a literal that is
    /// already true is preferred (the clause is then satisfied early), then
    /// any unassigned literal. On success the watch pair and both affected
    /// lists are updated and `true` is returned; `false` means every other
    /// literal of the clause is false.
    pub fn find_new_watch<S: LiteralStorage<L>, A: Assignment>(
        &mut self,
        clause_idx: usize,
        false_lit: L,
        cnf: &Cnf<L, S>,
        assignment: &A,
    ) -> bool {
        let (first, second) = self.clause_watches[clause_idx];
        let other = if first == false_lit { second } else { first };
        let clause = &cnf[clause_idx];

        for wanted in [Some(true), None] {
            for &lit in clause.iter() {
                if lit == false_lit || lit == other {
                    continue;
                }
                if assignment.literal_value(lit) == wanted {
                    self.clause_watches[clause_idx] = if first == false_lit {
                        (lit, second)
                    } else {
                        (first, lit)
                    };
                    self.add_watch(lit, clause_idx);
                    self.remove_watch(false_lit, clause_idx);
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::assignment::VecAssignment;
    use crate::sat::literal::PackedLiteral;

    type TestCnf = Cnf<PackedLiteral>;

    fn lit(value: i32) -> PackedLiteral {
        PackedLiteral::from_i32(value)
    }

    #[test]
    fn test_initial_watches() {
        let cnf: TestCnf = Cnf::new(vec![vec![1, 2, -3], vec![-1, 4]]);
        let index = WatchedLiterals::new(&cnf);

        assert!(index.watchers(lit(1)).contains(&0));
        assert!(index.watchers(lit(2)).contains(&0));
        assert!(!index.watchers(lit(-3)).contains(&0));

        assert!(index.watchers(lit(-1)).contains(&1));
        assert!(index.watchers(lit(4)).contains(&1));

        assert_eq!(index.clause_watches(0), (lit(1), lit(2)));
    }

    #[test]
    fn test_unit_clause_watches_both_slots() {
        let cnf: TestCnf = Cnf::new(vec![vec![1]]);
        let index = WatchedLiterals::new(&cnf);

        assert_eq!(index.clause_watches(0), (lit(1), lit(1)));
        assert_eq!(index.watchers(lit(1)), &[0, 0]);
    }

    #[test]
    fn test_empty_clause_watches_nothing() {
        let cnf: TestCnf = Cnf::new(vec![vec![1, 2], Vec::new()]);
        let index = WatchedLiterals::new(&cnf);
        assert_eq!(index.watchers(lit(1)), &[0]);
    }

    #[test]
    fn test_find_new_watch_moves_lists() {
        let cnf: TestCnf = Cnf::new(vec![vec![1, 2, 3, 4]]);
        let mut index = WatchedLiterals::new(&cnf);
        let mut assignment = VecAssignment::new(4);
        assignment.set(1, false);

        assert!(index.find_new_watch(0, lit(1), &cnf, &assignment));
        assert!(!index.watchers(lit(1)).contains(&0));
        assert!(index.watchers(lit(3)).contains(&0));
        assert_eq!(index.clause_watches(0), (lit(3), lit(2)));
    }

    #[test]
    fn test_find_new_watch_prefers_true_literal() {
        let cnf: TestCnf = Cnf::new(vec![vec![1, 2, 3, 4]]);
        let mut index = WatchedLiterals::new(&cnf);
        let mut assignment = VecAssignment::new(4);
        assignment.set(1, false);
        assignment.set(4, true);

        assert!(index.find_new_watch(0, lit(1), &cnf, &assignment));
        // 3 is unassigned but 4 is already true, so 4 wins.
        assert_eq!(index.clause_watches(0), (lit(4), lit(2)));
    }

    #[test]
    fn test_find_new_watch_fails_when_rest_false() {
        let cnf: TestCnf = Cnf::new(vec![vec![1, 2, 3]]);
        let mut index = WatchedLiterals::new(&cnf);
        let mut assignment = VecAssignment::new(3);
        assignment.set(1, false);
        assignment.set(3, false);

        assert!(!index.find_new_watch(0, lit(1), &cnf, &assignment));
        assert_eq!(index.clause_watches(0), (lit(1), lit(2)));
    }
}
