//! Draft producer contract.
//!
//! A producer collects unstructured input from the user (a guided
//! conversation or a direct form) and emits exactly one outcome before
//! terminating. The workflow never cares which strategy produced the draft.

use std::fmt;

use crate::review::ReviewDraft;
use crate::transcript::ConversationTranscript;

/// How the user chose to enter their review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMethod {
    /// Guided conversational collection; yields a transcript.
    Conversational,
    /// Direct form entry; the transcript is empty.
    DirectForm,
}

impl fmt::Display for InputMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conversational => write!(f, "conversation"),
            Self::DirectForm => write!(f, "direct form"),
        }
    }
}

/// The single outcome a draft producer emits.
#[derive(Debug, Clone, PartialEq)]
pub enum ProducerOutcome {
    /// Input collection finished with a usable draft.
    Completed {
        draft: ReviewDraft,
        transcript: ConversationTranscript,
    },
    /// The user abandoned input collection before a draft existed.
    Cancelled,
}
