//! Effects (side effects as data).
//!
//! Effects describe what should happen as a result of a state transition.
//! They are pure data - the interpreter executes them against the summarizer
//! adapter and the shared store. This separation enables testing the
//! transition logic without any I/O.

use crate::review::ReviewDraft;
use crate::transcript::ConversationTranscript;

/// All effects that can be produced by submission transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask the summarizer adapter to condense the draft.
    ///
    /// Always produces a `SummaryReady` result event: the adapter's fallback
    /// path guarantees there is no failure outcome to handle.
    RequestSummary {
        draft: ReviewDraft,
        transcript: ConversationTranscript,
    },

    /// Finalize the approved draft and append it to the shared store.
    ///
    /// `review` is a copy of the draft whose comment is already the approved
    /// summary text; the original draft was never mutated.
    CommitReview { review: ReviewDraft },

    /// Log a message.
    Log { level: LogLevel, message: String },
}

/// Log level for logging effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}
