//! Summarizing state transitions.

use super::TransitionResult;
use crate::workflow::effect::{Effect, LogLevel};
use crate::workflow::event::Event;
use crate::workflow::state::{CancellationReason, SubmissionState};

/// Handle transitions from the Summarizing state.
///
/// The summarizer adapter call is outstanding. Its result always arrives as
/// `SummaryReady` (the fallback path has no failure outcome), so this state
/// is never a dead end. Approval is not yet possible here.
pub fn handle(state: SubmissionState, event: Event) -> TransitionResult {
    match (&state, event) {
        // Summary arrived (generated or fallback) -> present for approval
        (SubmissionState::Summarizing { draft, .. }, Event::SummaryReady { result }) => {
            let origin = if result.is_generated() {
                "generated"
            } else {
                "fallback"
            };
            TransitionResult::new(
                SubmissionState::AwaitingApproval {
                    draft: draft.clone(),
                    summary: result,
                },
                vec![Effect::Log {
                    level: LogLevel::Info,
                    message: format!("Summary ready ({}), awaiting approval", origin),
                }],
            )
        }

        // Approval is disabled until the summary is presented
        (SubmissionState::Summarizing { .. }, Event::ApprovalGranted) => TransitionResult::new(
            state,
            vec![Effect::Log {
                level: LogLevel::Warn,
                message: "Approval rejected while summary generation is in progress".to_string(),
            }],
        ),

        (SubmissionState::Summarizing { .. }, Event::CancelRequested) => TransitionResult::new(
            SubmissionState::Cancelled {
                reason: CancellationReason::UserRequested,
            },
            vec![Effect::Log {
                level: LogLevel::Info,
                message: "Submission cancelled while generating summary; draft discarded"
                    .to_string(),
            }],
        ),

        (SubmissionState::Summarizing { .. }, Event::SubmissionStarted { .. }) => {
            TransitionResult::new(
                state,
                vec![Effect::Log {
                    level: LogLevel::Warn,
                    message: "Submission already in progress; ignoring new start".to_string(),
                }],
            )
        }

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
