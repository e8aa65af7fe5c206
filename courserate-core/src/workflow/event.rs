//! Events that trigger submission state transitions.
//!
//! Events represent things that happened - user actions, producer outcomes,
//! summarizer and store results. They are inputs to the pure transition
//! function.

use crate::producer::InputMethod;
use crate::review::{ReviewDraft, ReviewId};
use crate::summarizer::SummaryResult;
use crate::transcript::ConversationTranscript;

/// All events that can trigger submission state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // =========================================================================
    // User Actions
    // =========================================================================
    /// User picked an input strategy; a fresh submission begins.
    SubmissionStarted { method: InputMethod },

    /// Explicit user approval of the presented summary.
    ApprovalGranted,

    /// Explicit user cancellation. Permitted in every non-terminal state.
    CancelRequested,

    // =========================================================================
    // Producer Outcomes
    // =========================================================================
    /// The draft producer emitted a completed draft plus its transcript
    /// (empty for the direct form).
    DraftCompleted {
        draft: ReviewDraft,
        transcript: ConversationTranscript,
    },

    /// The draft producer was closed before emitting a draft.
    ProducerClosed,

    // =========================================================================
    // Adapter and Store Results
    // =========================================================================
    /// The summarizer adapter returned. Both generated and fallback results
    /// are forward progress; there is no failure variant.
    SummaryReady { result: SummaryResult },

    /// The store accepted the finalized review.
    ReviewCommitted { id: ReviewId },
}

impl Event {
    /// Returns a summary of the event suitable for logging.
    ///
    /// Avoids logging review comments and transcript text.
    pub fn log_summary(&self) -> String {
        match self {
            Event::SubmissionStarted { method } => {
                format!("SubmissionStarted {{ method: {} }}", method)
            }
            Event::ApprovalGranted => "ApprovalGranted".to_string(),
            Event::CancelRequested => "CancelRequested".to_string(),
            Event::DraftCompleted { draft, transcript } => {
                format!(
                    "DraftCompleted {{ course: {:?}, comment_len: {}, turns: {} }}",
                    draft.course,
                    draft.comment.len(),
                    transcript.len()
                )
            }
            Event::ProducerClosed => "ProducerClosed".to_string(),
            Event::SummaryReady { result } => {
                format!(
                    "SummaryReady {{ generated: {}, len: {} }}",
                    result.is_generated(),
                    result.text().len()
                )
            }
            Event::ReviewCommitted { id } => format!("ReviewCommitted {{ id: {} }}", id),
        }
    }
}
