//! Dialogue state of one user, as a tagged state with a transition table.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::field::FieldId;
use super::form::FormKind;
use crate::domain::foundation::StateMachine;

/// Where a user currently is in the guided dialogue.
///
/// ```text
/// Idle ──start(X)──► Collecting{X, first}
/// Collecting{X, f} ──valid──► Collecting{X, next(f)}
/// Collecting{X, last} ──valid──► AwaitingDecision{X}
/// AwaitingDecision{X} ──result──► Idle
/// any non-Idle ──cancel / expire──► Idle
/// any non-Idle ──start(Y)──► Collecting{Y, first}   (supersede)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum IntakeState {
    #[default]
    Idle,
    Collecting { form: FormKind, field: FieldId },
    AwaitingDecision { form: FormKind },
}

impl IntakeState {
    /// State a fresh run of `form` begins in.
    pub fn start_of(form: FormKind) -> Self {
        IntakeState::Collecting {
            form,
            field: form.first_field(),
        }
    }

    pub fn form(&self) -> Option<FormKind> {
        match self {
            IntakeState::Idle => None,
            IntakeState::Collecting { form, .. } | IntakeState::AwaitingDecision { form } => {
                Some(*form)
            }
        }
    }

    /// Field currently awaiting an answer.
    pub fn current_field(&self) -> Option<FieldId> {
        match self {
            IntakeState::Collecting { field, .. } => Some(*field),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, IntakeState::Idle)
    }

    /// The state reached by a valid answer to the current field.
    pub fn after_valid_answer(&self) -> Option<Self> {
        match self {
            IntakeState::Collecting { form, field } => Some(match form.next_field(*field) {
                Some(next) => IntakeState::Collecting {
                    form: *form,
                    field: next,
                },
                None => IntakeState::AwaitingDecision { form: *form },
            }),
            _ => None,
        }
    }
}

impl fmt::Display for IntakeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeState::Idle => write!(f, "idle"),
            IntakeState::Collecting { form, field } => write!(f, "{}:{}", form, field),
            IntakeState::AwaitingDecision { form } => write!(f, "{}:awaiting_decision", form),
        }
    }
}

impl StateMachine for IntakeState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use IntakeState::*;

        let is_fresh_start = matches!(target, Collecting { form, field } if *field == form.first_field());

        match (self, target) {
            // Start, or supersede the running form with a new one
            (_, Collecting { .. }) if is_fresh_start => true,

            // Advance to the next field of the same form
            (Collecting { form, field }, Collecting { form: next_form, field: next_field }) => {
                form == next_form && form.next_field(*field) == Some(*next_field)
            }

            // Last answer collected
            (Collecting { form, field }, AwaitingDecision { form: target_form }) => {
                form == target_form && form.is_last(*field)
            }

            // Completion, cancellation or expiry
            (Collecting { .. } | AwaitingDecision { .. }, Idle) => true,

            _ => false,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        let mut targets: Vec<Self> = FormKind::all()
            .iter()
            .map(|form| IntakeState::start_of(*form))
            .collect();

        if !self.is_idle() {
            if let Some(next) = self.after_valid_answer() {
                if !targets.contains(&next) {
                    targets.push(next);
                }
            }
            targets.push(IntakeState::Idle);
        }

        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_can_only_start_forms() {
        let idle = IntakeState::Idle;
        assert!(idle.can_transition_to(&IntakeState::start_of(FormKind::Loan)));
        assert!(!idle.can_transition_to(&IntakeState::Collecting {
            form: FormKind::Loan,
            field: FieldId::CreditScore,
        }));
        assert!(!idle.can_transition_to(&IntakeState::AwaitingDecision {
            form: FormKind::Loan
        }));
        assert!(!idle.can_transition_to(&IntakeState::Idle));
    }

    #[test]
    fn collecting_advances_one_field_at_a_time() {
        let state = IntakeState::start_of(FormKind::Loan);
        let next = state.after_valid_answer().unwrap();
        assert_eq!(
            next,
            IntakeState::Collecting {
                form: FormKind::Loan,
                field: FieldId::SelfEmployed,
            }
        );
        assert!(state.can_transition_to(&next));

        let skipping = IntakeState::Collecting {
            form: FormKind::Loan,
            field: FieldId::Dependents,
        };
        assert!(!state.can_transition_to(&skipping));
    }

    #[test]
    fn last_field_moves_to_awaiting_decision() {
        let state = IntakeState::Collecting {
            form: FormKind::Fraud,
            field: FieldId::SchemeSource,
        };
        let next = state.after_valid_answer().unwrap();
        assert_eq!(next, IntakeState::AwaitingDecision { form: FormKind::Fraud });
        assert!(state.transition_to(next).is_ok());
    }

    #[test]
    fn awaiting_decision_cannot_take_answers() {
        let state = IntakeState::AwaitingDecision { form: FormKind::Loan };
        assert_eq!(state.current_field(), None);
        assert_eq!(state.after_valid_answer(), None);
    }

    #[test]
    fn any_active_state_can_cancel_or_supersede() {
        let states = [
            IntakeState::start_of(FormKind::Loan),
            IntakeState::Collecting {
                form: FormKind::Loan,
                field: FieldId::BankAssets,
            },
            IntakeState::AwaitingDecision { form: FormKind::Loan },
        ];
        for state in states {
            assert!(state.can_transition_to(&IntakeState::Idle));
            assert!(state.can_transition_to(&IntakeState::start_of(FormKind::Fraud)));
            assert!(state.can_transition_to(&IntakeState::start_of(FormKind::Loan)));
        }
    }

    #[test]
    fn cross_form_field_jump_is_rejected() {
        let state = IntakeState::start_of(FormKind::Loan);
        let target = IntakeState::Collecting {
            form: FormKind::Fraud,
            field: FieldId::SchemeDescription,
        };
        assert!(state.transition_to(target).is_err());
    }

    #[test]
    fn valid_transitions_agree_with_can_transition_to() {
        let states = [
            IntakeState::Idle,
            IntakeState::start_of(FormKind::Onboarding),
            IntakeState::Collecting {
                form: FormKind::Onboarding,
                field: FieldId::Location,
            },
            IntakeState::AwaitingDecision { form: FormKind::Onboarding },
        ];
        for state in states {
            for target in state.valid_transitions() {
                assert!(state.can_transition_to(&target), "{} -> {}", state, target);
            }
            assert!(!state.is_terminal());
        }
    }
}
