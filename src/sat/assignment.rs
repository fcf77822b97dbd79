#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Tracks the truth value assigned to each variable.
//!
//! The assignment vector is the single source of truth for the current
//! partial assignment. The search driver saves a full copy on entry to each
//! recursion frame and restores it on failure, so no undo log is kept here.

use crate::sat::literal::{Literal, Variable};
use std::fmt::Debug;
use std::ops::{Index, IndexMut};

/// Represents the assignment state of a propositional variable.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    /// The variable has not been assigned a truth value.
    #[default]
    Unassigned,
    /// The variable has been assigned a specific truth value.
    Assigned(bool),
}

impl VarState {
    /// `true` if the variable carries a truth value.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    /// `true` if the variable carries no truth value.
    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        !self.is_assigned()
    }

    /// `true` if the variable is assigned true.
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::Assigned(true))
    }

    /// `true` if the variable is assigned false.
    #[must_use]
    pub const fn is_false(self) -> bool {
        matches!(self, Self::Assigned(false))
    }
}

impl From<VarState> for Option<bool> {
    fn from(state: VarState) -> Self {
        match state {
            VarState::Assigned(b) => Some(b),
            VarState::Unassigned => None,
        }
    }
}

impl From<Option<bool>> for VarState {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unassigned, VarState::Assigned)
    }
}

/// Interface for managing variable assignments.
///
/// Variables are the dense internal indices `1..=N` produced by the clause
/// database; index `0` is never used.
pub trait Assignment:
    Index<usize, Output = VarState> + IndexMut<usize, Output = VarState> + Debug + Clone
{
    /// Creates an assignment manager for variables `1..=n_vars`, all
    /// initially unassigned.
    fn new(n_vars: usize) -> Self;

    /// The number of variables managed.
    fn num_vars(&self) -> usize;

    /// Sets the truth value of a variable.
    fn set(&mut self, var: Variable, value: bool);

    /// Returns a variable to the unassigned state.
    fn unassign(&mut self, var: Variable);

    /// Resets every variable to unassigned.
    fn reset(&mut self);

    /// Assigns the truth value that makes the given literal true.
    fn assign(&mut self, lit: impl Literal) {
        self.set(lit.variable(), lit.polarity());
    }

    /// `true` if the variable carries a truth value.
    fn is_assigned(&self, var: Variable) -> bool {
        self[var as usize].is_assigned()
    }

    /// The truth value of a variable, if assigned.
    fn var_value(&self, var: Variable) -> Option<bool> {
        self[var as usize].into()
    }

    /// The truth value of a literal under the current assignment: `None`
    /// when the variable is unassigned, otherwise whether the polarity
    /// matches the assigned value.
    fn literal_value(&self, lit: impl Literal) -> Option<bool> {
        self.var_value(lit.variable()).map(|b| b == lit.polarity())
    }

    /// `true` when every managed variable is assigned.
    fn all_assigned(&self) -> bool;

    /// Iterates over unassigned variables in ascending order.
    fn unassigned(&self) -> impl Iterator<Item = Variable> + '_ {
        (1..=self.num_vars()).filter_map(move |i| {
            #[allow(clippy::cast_possible_truncation)]
            let var = i as Variable;
            self[i].is_unassigned().then_some(var)
        })
    }
}

/// Dense assignment vector indexed directly by variable.
///
/// Slot `0` exists but is never read or written; it keeps indexing aligned
/// with the `1..=N` variable range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VecAssignment {
    states: Vec<VarState>,
}

impl Index<usize> for VecAssignment {
    type Output = VarState;

    fn index(&self, index: usize) -> &Self::Output {
        &self.states[index]
    }
}

impl IndexMut<usize> for VecAssignment {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.states[index]
    }
}

impl Assignment for VecAssignment {
    fn new(n_vars: usize) -> Self {
        Self {
            states: vec![VarState::Unassigned; n_vars + 1],
        }
    }

    fn num_vars(&self) -> usize {
        self.states.len() - 1
    }

    fn set(&mut self, var: Variable, value: bool) {
        self[var as usize] = VarState::Assigned(value);
    }

    fn unassign(&mut self, var: Variable) {
        self[var as usize] = VarState::Unassigned;
    }

    fn reset(&mut self) {
        self.states.fill(VarState::Unassigned);
    }

    fn all_assigned(&self) -> bool {
        self.states[1..].iter().all(|v| v.is_assigned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::PackedLiteral;
    use itertools::Itertools;

    #[test]
    fn test_var_state() {
        assert!(VarState::Unassigned.is_unassigned());
        assert!(!VarState::Unassigned.is_assigned());
        assert!(!VarState::Unassigned.is_true());
        assert!(!VarState::Unassigned.is_false());

        assert!(VarState::Assigned(true).is_assigned());
        assert!(VarState::Assigned(true).is_true());
        assert!(!VarState::Assigned(true).is_false());

        assert!(VarState::Assigned(false).is_assigned());
        assert!(VarState::Assigned(false).is_false());
    }

    #[test]
    fn test_assignment_ops() {
        let mut a = VecAssignment::new(4);
        assert_eq!(a.num_vars(), 4);

        a.set(1, true);
        a.set(2, false);
        a.set(3, true);

        assert!(a.is_assigned(1));
        assert!(!a.is_assigned(4));

        assert_eq!(a.var_value(1), Some(true));
        assert_eq!(a.var_value(2), Some(false));
        assert_eq!(a.var_value(4), None);

        assert_eq!(a.literal_value(PackedLiteral::new(1, true)), Some(true));
        assert_eq!(a.literal_value(PackedLiteral::new(1, false)), Some(false));
        assert_eq!(a.literal_value(PackedLiteral::new(2, false)), Some(true));
        assert_eq!(a.literal_value(PackedLiteral::new(4, true)), None);

        a.unassign(1);
        assert_eq!(a.var_value(1), None);

        assert_eq!(a.unassigned().collect_vec(), vec![1, 4]);
        assert!(!a.all_assigned());

        a.set(1, true);
        a.set(4, false);
        assert!(a.all_assigned());

        a.reset();
        assert_eq!(a.unassigned().count(), 4);
    }

    #[test]
    fn test_assign_literal() {
        let mut a = VecAssignment::new(2);
        a.assign(PackedLiteral::new(1, false));
        a.assign(PackedLiteral::new(2, true));
        assert_eq!(a.var_value(1), Some(false));
        assert_eq!(a.var_value(2), Some(true));
    }

    #[test]
    fn test_snapshot_restore_by_clone() {
        let mut a = VecAssignment::new(3);
        a.set(1, true);
        let snapshot = a.clone();

        a.set(2, false);
        a.set(3, true);
        assert!(a.all_assigned());

        a = snapshot;
        assert_eq!(a.var_value(1), Some(true));
        assert_eq!(a.var_value(2), None);
        assert_eq!(a.var_value(3), None);
    }
}
