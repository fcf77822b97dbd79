//! Pure-literal elimination.
//!
//! A variable that occurs with only one polarity among the clauses not yet
//! satisfied can be assigned the value that satisfies those occurrences:
//! doing so removes clauses without falsifying any, so the rule is sound.

use crate::sat::assignment::Assignment;
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use bit_vec::BitVec;

/// Finds pure literals under the current partial assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PureLiteralElimination;

impl PureLiteralElimination {
    /// Returns, in ascending variable order, one satisfying literal for
    /// every unassigned variable that occurs with a single polarity in the
    /// currently unsatisfied clauses.
    ///
    /// Variables that no unsatisfied clause mentions are not reported; they
    /// are unconstrained rather than pure.
    pub fn find_pures<L: Literal, S: LiteralStorage<L>, A: Assignment>(
        cnf: &Cnf<L, S>,
        assignment: &A,
    ) -> Vec<L> {
        let mut positive = BitVec::from_elem(cnf.num_vars + 1, false);
        let mut negative = BitVec::from_elem(cnf.num_vars + 1, false);

        for clause in cnf.iter().filter(|c| !c.is_satisfied(assignment)) {
            for &lit in clause.iter() {
                if assignment.literal_value(lit).is_some() {
                    continue;
                }
                let var = lit.variable() as usize;
                if lit.polarity() {
                    positive.set(var, true);
                } else {
                    negative.set(var, true);
                }
            }
        }

        #[allow(clippy::cast_possible_truncation)]
        (1..=cnf.num_vars)
            .filter_map(|var| {
                let pos = positive.get(var).unwrap_or(false);
                let neg = negative.get(var).unwrap_or(false);
                match (pos, neg) {
                    (true, false) => Some(L::new(var as Variable, true)),
                    (false, true) => Some(L::new(var as Variable, false)),
                    _ => None,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::assignment::VecAssignment;
    use crate::sat::literal::PackedLiteral;

    type TestCnf = Cnf<PackedLiteral>;

    fn pures(cnf: &TestCnf, assignment: &VecAssignment) -> Vec<i32> {
        PureLiteralElimination::find_pures(cnf, assignment)
            .into_iter()
            .map(Literal::to_i32)
            .collect()
    }

    #[test]
    fn test_single_polarity_found() {
        let cnf: TestCnf = Cnf::new(vec![vec![1, 2], vec![-1, 2], vec![-2, 3]]);
        let assignment = VecAssignment::new(cnf.num_vars);

        // 1 occurs both ways, 2 occurs both ways, 3 only positively.
        assert_eq!(pures(&cnf, &assignment), vec![3]);
    }

    #[test]
    fn test_negative_pure() {
        let cnf: TestCnf = Cnf::new(vec![vec![-1, 2], vec![-1, -2]]);
        let assignment = VecAssignment::new(cnf.num_vars);

        assert_eq!(pures(&cnf, &assignment), vec![-1]);
    }

    #[test]
    fn test_satisfied_clauses_ignored() {
        let cnf: TestCnf = Cnf::new(vec![vec![1, 2], vec![-2, 3]]);
        let mut assignment = VecAssignment::new(cnf.num_vars);
        assignment.set(3, true);

        // With the second clause satisfied, 2 only occurs positively.
        assert_eq!(pures(&cnf, &assignment), vec![1, 2]);
    }

    #[test]
    fn test_assigned_variables_skipped() {
        let cnf: TestCnf = Cnf::new(vec![vec![1, 2], vec![1, 3]]);
        let mut assignment = VecAssignment::new(cnf.num_vars);
        assignment.set(1, false);

        assert_eq!(pures(&cnf, &assignment), vec![2, 3]);
    }

    #[test]
    fn test_no_unsatisfied_clauses() {
        let cnf: TestCnf = Cnf::new(vec![vec![1]]);
        let mut assignment = VecAssignment::new(cnf.num_vars);
        assignment.set(1, true);

        assert!(pures(&cnf, &assignment).is_empty());
    }
}
