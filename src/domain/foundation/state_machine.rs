//! Forward-only lifecycles over status enums.

use std::fmt;

use super::ValidationError;

/// A status enum whose allowed moves form a fixed graph.
pub trait StateMachine: Copy + PartialEq + fmt::Display + 'static {
    /// Field name reported when a move is refused.
    const FIELD: &'static str;

    /// Statuses reachable in one step.
    fn successors(self) -> &'static [Self];

    fn can_transition_to(self, target: Self) -> bool {
        self.successors().contains(&target)
    }

    /// Returns `target` when the graph allows the move.
    fn transition_to(self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(target) {
            return Ok(target);
        }
        Err(ValidationError::invalid_format(
            Self::FIELD,
            format!("cannot move from '{}' to '{}'", self, target),
        ))
    }

    fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }
}
