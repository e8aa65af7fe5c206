//! Pure state transition function.
//!
//! The transition function is the core of the workflow. It takes the current
//! state and an event, and returns the new state and a list of effects. This
//! function has NO side effects - it is pure and deterministic.
//!
//! Each state has its own handler module with co-located tests:
//! - `idle`: before a submission starts
//! - `collecting`: a producer is gathering input
//! - `summarizing`: the summarizer adapter call is outstanding
//! - `awaiting_approval`: the user decides to post or discard
//! - `terminal`: Committed/Cancelled states

mod awaiting_approval;
mod collecting;
mod idle;
mod summarizing;
mod terminal;

use super::effect::Effect;
use super::event::Event;
use super::state::SubmissionState;

/// Result of a state transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub state: SubmissionState,
    /// Effects to execute.
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SubmissionState, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }

    pub fn no_change(state: SubmissionState) -> Self {
        Self {
            state,
            effects: vec![],
        }
    }
}

/// Pure state transition function.
///
/// Given the current state and an event, returns the new state and effects
/// to execute. Invalid transitions are rejected as no-ops with a log effect
/// rather than left undefined.
pub fn transition(state: SubmissionState, event: Event) -> TransitionResult {
    match &state {
        SubmissionState::Idle => idle::handle(state, event),
        SubmissionState::Collecting { .. } => collecting::handle(state, event),
        SubmissionState::Summarizing { .. } => summarizing::handle(state, event),
        SubmissionState::AwaitingApproval { .. } => awaiting_approval::handle(state, event),
        SubmissionState::Committed { .. } | SubmissionState::Cancelled { .. } => {
            terminal::handle(state, event)
        }
    }
}
