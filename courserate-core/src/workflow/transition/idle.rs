//! Idle state transitions.

use super::TransitionResult;
use crate::workflow::effect::{Effect, LogLevel};
use crate::workflow::event::Event;
use crate::workflow::state::SubmissionState;

/// Handle transitions from the Idle state.
///
/// Idle is the rest state before the user picks an input strategy. The only
/// event that moves the workflow forward is `SubmissionStarted`.
pub fn handle(state: SubmissionState, event: Event) -> TransitionResult {
    match (&state, event) {
        (SubmissionState::Idle, Event::SubmissionStarted { method }) => TransitionResult::new(
            SubmissionState::Collecting { method },
            vec![Effect::Log {
                level: LogLevel::Info,
                message: format!("Submission started via {}", method),
            }],
        ),

        // Cancel with nothing in flight is a harmless no-op
        (SubmissionState::Idle, Event::CancelRequested) => TransitionResult::new(
            state,
            vec![Effect::Log {
                level: LogLevel::Info,
                message: "Nothing to cancel".to_string(),
            }],
        ),

        // Catch-all for unhandled events - log warning and return state unchanged
        (_, event) => TransitionResult::new(
            state.clone(),
            vec![Effect::Log {
                level: LogLevel::Warn,
                message: format!("Unhandled event {:?} in state {:?}", event, state),
            }],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::InputMethod;

    #[test]
    fn test_idle_to_collecting_on_start() {
        let result = handle(
            SubmissionState::Idle,
            Event::SubmissionStarted {
                method: InputMethod::Conversational,
            },
        );

        assert!(matches!(
            result.state,
            SubmissionState::Collecting {
                method: InputMethod::Conversational
            }
        ));
    }

    #[test]
    fn test_cancel_while_idle_is_noop() {
        let result = handle(SubmissionState::Idle, Event::CancelRequested);

        assert_eq!(result.state, SubmissionState::Idle);
        assert!(matches!(
            &result.effects[0],
            Effect::Log {
                level: LogLevel::Info,
                ..
            }
        ));
    }

    #[test]
    fn test_approval_while_idle_is_rejected() {
        let result = handle(SubmissionState::Idle, Event::ApprovalGranted);

        assert_eq!(result.state, SubmissionState::Idle);
        assert!(matches!(
            &result.effects[0],
            Effect::Log {
                level: LogLevel::Warn,
                ..
            }
        ));
    }
}
