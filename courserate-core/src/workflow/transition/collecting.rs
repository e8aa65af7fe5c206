//! Collecting state transitions.

use super::TransitionResult;
use crate::workflow::effect::{Effect, LogLevel};
use crate::workflow::event::Event;
use crate::workflow::state::{CancellationReason, SubmissionState};

/// Handle transitions from the Collecting state.
///
/// A draft producer is gathering input. It emits exactly one of a completed
/// draft or a close; the user can also cancel from outside the producer.
pub fn handle(state: SubmissionState, event: Event) -> TransitionResult {
    match (&state, event) {
        // Producer finished -> hand the draft to the summarizer
        (SubmissionState::Collecting { .. }, Event::DraftCompleted { draft, transcript }) => {
            TransitionResult::new(
                SubmissionState::Summarizing {
                    draft: draft.clone(),
                    transcript: transcript.clone(),
                },
                vec![Effect::RequestSummary { draft, transcript }],
            )
        }

        // Producer closed before emitting -> cancelled, no side effects
        (SubmissionState::Collecting { .. }, Event::ProducerClosed) => TransitionResult::new(
            SubmissionState::Cancelled {
                reason: CancellationReason::ProducerClosed,
            },
            vec![Effect::Log {
                level: LogLevel::Info,
                message: "Input collection closed before a draft was produced".to_string(),
            }],
        ),

        (SubmissionState::Collecting { .. }, Event::CancelRequested) => TransitionResult::new(
            SubmissionState::Cancelled {
                reason: CancellationReason::UserRequested,
            },
            vec![Effect::Log {
                level: LogLevel::Info,
                message: "Submission cancelled during input collection".to_string(),
            }],
        ),

        // One submission at a time; a fresh machine handles the next one
        (SubmissionState::Collecting { .. }, Event::SubmissionStarted { .. }) => {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::InputMethod;
    use crate::review::ReviewDraft;
    use crate::transcript::{ConversationTranscript, TranscriptTurn};

    fn collecting() -> SubmissionState {
        SubmissionState::Collecting {
            method: InputMethod::Conversational,
        }
    }

    fn draft() -> ReviewDraft {
        ReviewDraft {
            course: Some("EECS4101".to_string()),
            quality: 4.0,
            difficulty: 4.0,
            for_credit: None,
            attendance: None,
            would_take_again: None,
            grade: None,
            textbook: None,
            comment: "solid course".to_string(),
            tags: vec![],
        }
    }

    #[test]
    fn test_draft_completed_starts_summarization() {
        let transcript =
            ConversationTranscript::from_turns(vec![TranscriptTurn::user("solid course")]);

        let result = handle(
            collecting(),
            Event::DraftCompleted {
                draft: draft(),
                transcript: transcript.clone(),
            },
        );

        assert!(matches!(result.state, SubmissionState::Summarizing { .. }));
        assert_eq!(result.effects.len(), 1);
        let Effect::RequestSummary {
            draft: effect_draft,
            transcript: effect_transcript,
        } = &result.effects[0]
        else {
            panic!("Expected RequestSummary, got {:?}", result.effects[0]);
        };
        assert_eq!(effect_draft.comment, "solid course");
        assert_eq!(effect_transcript, &transcript);
    }

    #[test]
    fn test_producer_closed_cancels_without_side_effects() {
        let result = handle(collecting(), Event::ProducerClosed);

        assert!(matches!(
            result.state,
            SubmissionState::Cancelled {
                reason: CancellationReason::ProducerClosed
            }
        ));
        assert!(!result
            .effects
            .iter()
            .any(|e| matches!(e, Effect::CommitReview { .. } | Effect::RequestSummary { .. })));
    }

    #[test]
    fn test_cancel_while_collecting() {
        let result = handle(collecting(), Event::CancelRequested);

        assert!(matches!(
            result.state,
            SubmissionState::Cancelled {
                reason: CancellationReason::UserRequested
            }
        ));
    }

    #[test]
    fn test_approval_while_collecting_is_rejected() {
        let result = handle(collecting(), Event::ApprovalGranted);

        assert_eq!(result.state, collecting());
        assert!(matches!(
            &result.effects[0],
            Effect::Log {
                level: LogLevel::Warn,
                ..
            }
        ));
    }
}
