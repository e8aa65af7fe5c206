//! AwaitingApproval state transitions.

use super::TransitionResult;
use crate::workflow::effect::{Effect, LogLevel};
use crate::workflow::event::Event;
use crate::workflow::state::{CancellationReason, SubmissionState};

/// Handle transitions from the AwaitingApproval state.
///
/// The summary is on screen; the user either posts or discards. Commit is
/// the only path that mutates the store, and it operates on a copy of the
/// draft with the summary text as its comment.
pub fn handle(state: SubmissionState, event: Event) -> TransitionResult {
    match (&state, event) {
        (SubmissionState::AwaitingApproval { draft, summary }, Event::ApprovalGranted) => {
            let approved = draft.clone().with_comment(summary.text());
            if approved.comment.trim().is_empty() {
                // An empty review is not publishable; stay here so the user
                // can cancel instead.
                return TransitionResult::new(
                    state.clone(),
                    vec![Effect::Log {
                        level: LogLevel::Warn,
                        message: "Approval rejected: review comment is empty".to_string(),
                    }],
                );
            }
            TransitionResult::new(
                SubmissionState::Committed { review_id: None },
                vec![Effect::CommitReview { review: approved }],
            )
        }

        (SubmissionState::AwaitingApproval { .. }, Event::CancelRequested) => {
            TransitionResult::new(
                SubmissionState::Cancelled {
                    reason: CancellationReason::UserRequested,
                },
                vec![Effect::Log {
                    level: LogLevel::Info,
                    message: "Submission discarded without publishing".to_string(),
                }],
            )
        }

        // Duplicate adapter result; the first one already moved us here
        (SubmissionState::AwaitingApproval { .. }, Event::SummaryReady { .. }) => {
            TransitionResult::new(
                state,
                vec![Effect::Log {
                    level: LogLevel::Info,
                    message: "Ignoring duplicate SummaryReady while awaiting approval".to_string(),
                }],
            )
        }

        (SubmissionState::AwaitingApproval { .. }, Event::SubmissionStarted { .. }) => {
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
    use crate::review::ReviewDraft;
    use crate::summarizer::SummaryResult;

    fn draft(comment: &str) -> ReviewDraft {
        ReviewDraft {
            course: Some("3101".to_string()),
            quality: 5.0,
            difficulty: 5.0,
            for_credit: Some(true),
            attendance: None,
            would_take_again: Some(true),
            grade: Some("B".to_string()),
            textbook: None,
            comment: comment.to_string(),
            tags: vec!["TOUGH GRADER".to_string()],
        }
    }

    fn awaiting(comment: &str, summary: SummaryResult) -> SubmissionState {
        SubmissionState::AwaitingApproval {
            draft: draft(comment),
            summary,
        }
    }

    #[test]
    fn test_approval_commits_summary_text_on_a_copy() {
        let state = awaiting(
            "original",
            SummaryResult::Generated("short summary".to_string()),
        );

        let result = handle(state, Event::ApprovalGranted);

        assert!(matches!(
            result.state,
            SubmissionState::Committed { review_id: None }
        ));
        assert_eq!(result.effects.len(), 1);
        let Effect::CommitReview { review } = &result.effects[0] else {
            panic!("Expected CommitReview, got {:?}", result.effects[0]);
        };
        assert_eq!(review.comment, "short summary");
        assert_eq!(review.course.as_deref(), Some("3101"));
        assert_eq!(review.grade.as_deref(), Some("B"));
        assert_eq!(review.tags, vec!["TOUGH GRADER".to_string()]);
    }

    #[test]
    fn test_approval_with_fallback_preserves_comment_exactly() {
        let state = awaiting(
            "the course was hard but fair",
            SummaryResult::Fallback("the course was hard but fair".to_string()),
        );

        let result = handle(state, Event::ApprovalGranted);

        let Effect::CommitReview { review } = &result.effects[0] else {
            panic!("Expected CommitReview, got {:?}", result.effects[0]);
        };
        assert_eq!(review.comment, "the course was hard but fair");
    }

    #[test]
    fn test_approval_rejected_for_empty_comment() {
        let state = awaiting("", SummaryResult::Fallback(String::new()));

        let result = handle(state.clone(), Event::ApprovalGranted);

        assert_eq!(result.state, state);
        assert!(!result
            .effects
            .iter()
            .any(|e| matches!(e, Effect::CommitReview { .. })));
        assert!(matches!(
            &result.effects[0],
            Effect::Log {
                level: LogLevel::Warn,
                ..
            }
        ));
    }

    #[test]
    fn test_cancel_discards_without_commit() {
        let state = awaiting(
            "original",
            SummaryResult::Generated("short summary".to_string()),
        );

        let result = handle(state, Event::CancelRequested);

        assert!(matches!(
            result.state,
            SubmissionState::Cancelled {
                reason: CancellationReason::UserRequested
            }
        ));
        assert!(!result
            .effects
            .iter()
            .any(|e| matches!(e, Effect::CommitReview { .. })));
    }

    #[test]
    fn test_duplicate_summary_ready_is_ignored() {
        let state = awaiting(
            "original",
            SummaryResult::Generated("first summary".to_string()),
        );

        let result = handle(
            state.clone(),
            Event::SummaryReady {
                result: SummaryResult::Generated("second summary".to_string()),
            },
        );

        // The presented summary must not change under the user's cursor
        assert_eq!(result.state, state);
    }
}
