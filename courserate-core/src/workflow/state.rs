//! State types for the submission workflow.
//!
//! Following the principle of "make illegal states unrepresentable", every
//! legal point in a submission's lifecycle is one enum variant; there are no
//! loose flags to fall out of sync.

use std::fmt;

use crate::producer::InputMethod;
use crate::review::{ReviewDraft, ReviewId};
use crate::summarizer::SummaryResult;
use crate::transcript::ConversationTranscript;

/// Reason why a submission ended without publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationReason {
    /// User explicitly cancelled.
    UserRequested,
    /// The draft producer was closed before emitting a draft.
    ProducerClosed,
}

impl fmt::Display for CancellationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserRequested => write!(f, "cancelled by user"),
            Self::ProducerClosed => write!(f, "input collection closed"),
        }
    }
}

/// The explicit state machine for a single review submission.
///
/// `Committed` and `Cancelled` are terminal; a new submission starts a fresh
/// machine instead of reusing a terminated one.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    /// No submission in flight.
    Idle,

    /// A draft producer is collecting input.
    Collecting { method: InputMethod },

    /// Waiting for the summarizer adapter to return.
    ///
    /// Nothing from the draft comment is presented while here; the
    /// user-visible state is "generating".
    Summarizing {
        draft: ReviewDraft,
        transcript: ConversationTranscript,
    },

    /// Draft and summary are ready for the user's decision.
    ///
    /// The draft keeps its original comment. The summary replaces it only on
    /// a copy at commit time, so cancellation discards nothing the user
    /// wrote.
    AwaitingApproval {
        draft: ReviewDraft,
        summary: SummaryResult,
    },

    /// The review was committed to the shared store (terminal).
    ///
    /// `review_id` is filled by the commit result event inside the same
    /// processing pass; it is `None` only between the approval transition
    /// and effect execution.
    Committed { review_id: Option<ReviewId> },

    /// The submission was discarded (terminal).
    Cancelled { reason: CancellationReason },
}

impl SubmissionState {
    /// Returns true for the two terminal states.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Committed { .. } | Self::Cancelled { .. })
    }

    /// True while the summarizer adapter call is outstanding.
    pub fn is_summarizing(&self) -> bool {
        matches!(self, Self::Summarizing { .. })
    }

    /// True when the workflow can accept an approval.
    pub fn can_approve(&self) -> bool {
        matches!(self, Self::AwaitingApproval { .. })
    }

    /// Short label for progress display and logging.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Collecting { .. } => "collecting",
            Self::Summarizing { .. } => "generating summary",
            Self::AwaitingApproval { .. } => "awaiting approval",
            Self::Committed { .. } => "committed",
            Self::Cancelled { .. } => "cancelled",
        }
    }
}

impl Default for SubmissionState {
    fn default() -> Self {
        Self::Idle
    }
}
