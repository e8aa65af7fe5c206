//! Terminal state (Committed/Cancelled) transitions.

use super::TransitionResult;
use crate::workflow::effect::{Effect, LogLevel};
use crate::workflow::event::Event;
use crate::workflow::state::SubmissionState;

/// Handle transitions from terminal states.
///
/// A terminated submission never becomes active again. The only state change
/// left is recording the committed review id, which arrives as the result
/// event of the commit effect.
pub fn handle(state: SubmissionState, event: Event) -> TransitionResult {
    match (&state, event) {
        // Commit result arrives right after the approval transition
        (SubmissionState::Committed { review_id: None }, Event::ReviewCommitted { id }) => {
            TransitionResult::new(
                SubmissionState::Committed {
                    review_id: Some(id),
                },
                vec![Effect::Log {
                    level: LogLevel::Info,
                    message: format!("Review {} published to the feed", id),
                }],
            )
        }

        (SubmissionState::Committed { review_id: Some(_) }, Event::ReviewCommitted { id }) => {
            TransitionResult::new(
                state,
                vec![Effect::Log {
                    level: LogLevel::Info,
                    message: format!("Ignoring duplicate commit result for review {}", id),
                }],
            )
        }

        // Cancellation is idempotent; repeating it changes nothing
        (SubmissionState::Cancelled { .. }, Event::CancelRequested) => TransitionResult::new(
            state,
            vec![Effect::Log {
                level: LogLevel::Info,
                message: "Submission already cancelled".to_string(),
            }],
        ),

        (SubmissionState::Committed { .. }, Event::CancelRequested) => TransitionResult::new(
            state,
            vec![Effect::Log {
                level: LogLevel::Info,
                message: "Submission already committed; nothing to cancel".to_string(),
            }],
        ),

        (_, Event::SubmissionStarted { .. }) => TransitionResult::new(
            state,
            vec![Effect::Log {
                level: LogLevel::Warn,
                message: "Terminated submission cannot be reused; start a new one".to_string(),
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
    use crate::review::ReviewId;
    use crate::workflow::state::CancellationReason;

    #[test]
    fn test_commit_result_fills_review_id() {
        let result = handle(
            SubmissionState::Committed { review_id: None },
            Event::ReviewCommitted { id: ReviewId(42) },
        );

        assert_eq!(
            result.state,
            SubmissionState::Committed {
                review_id: Some(ReviewId(42))
            }
        );
    }

    #[test]
    fn test_duplicate_commit_result_is_ignored() {
        let state = SubmissionState::Committed {
            review_id: Some(ReviewId(42)),
        };

        let result = handle(state.clone(), Event::ReviewCommitted { id: ReviewId(43) });

        assert_eq!(result.state, state);
    }

    #[test]
    fn test_cancel_after_cancel_is_idempotent() {
        let state = SubmissionState::Cancelled {
            reason: CancellationReason::UserRequested,
        };

        let result = handle(state.clone(), Event::CancelRequested);

        assert_eq!(result.state, state);
        assert!(!result.effects.iter().any(|e| matches!(
            e,
            Effect::Log {
                level: LogLevel::Warn,
                ..
            }
        )));
    }

    #[test]
    fn test_approval_after_commit_is_rejected() {
        let state = SubmissionState::Committed {
            review_id: Some(ReviewId(1)),
        };

        let result = handle(state.clone(), Event::ApprovalGranted);

        assert_eq!(result.state, state);
        assert!(!result
            .effects
            .iter()
            .any(|e| matches!(e, Effect::CommitReview { .. })));
    }
}
