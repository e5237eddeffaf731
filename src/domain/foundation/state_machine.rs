//! State machine trait for tagged state enums.
//!
//! Gives every lifecycle enum the same shape: an explicit transition table
//! plus a checked `transition_to`.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for DeliveryStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Queued, Sent) | (Queued, Failed))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Queued => vec![Sent, Failed],
///             Sent | Failed => vec![],
///         }
///     }
/// }
///
/// let next = DeliveryStatus::Queued.transition_to(DeliveryStatus::Sent)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum DeliveryStatus {
        Queued,
        Sent,
        Failed,
    }

    impl StateMachine for DeliveryStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            use DeliveryStatus::*;
            matches!((self, target), (Queued, Sent) | (Queued, Failed))
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use DeliveryStatus::*;
            match self {
                Queued => vec![Sent, Failed],
                Sent | Failed => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let result = DeliveryStatus::Queued.transition_to(DeliveryStatus::Sent);
        assert_eq!(result, Ok(DeliveryStatus::Sent));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let result = DeliveryStatus::Sent.transition_to(DeliveryStatus::Queued);
        assert!(result.is_err());
    }

    #[test]
    fn terminal_states_have_no_outgoing_transitions() {
        assert!(DeliveryStatus::Sent.is_terminal());
        assert!(DeliveryStatus::Failed.is_terminal());
        assert!(!DeliveryStatus::Queued.is_terminal());
    }
}
