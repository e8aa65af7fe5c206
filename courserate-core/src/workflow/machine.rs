//! Workflow driver for a single review submission.
//!
//! `ReviewWorkflow` owns the current state and funnels events through the
//! pure transition function and the effect interpreter. Result events from
//! effects are fed back in until the state settles, so a single user action
//! (e.g. approval) carries the workflow all the way through finalization.

use tracing::info;

use super::event::Event;
use super::interpreter::{execute_effects, InterpreterContext};
use super::state::SubmissionState;
use super::transition::{transition, TransitionResult};
use crate::producer::ProducerOutcome;
use crate::review::ReviewId;

/// A single submission's workflow instance.
///
/// Terminated instances are not reusable; start a fresh instance per
/// submission. At most one instance should be active per session.
pub struct ReviewWorkflow {
    state: SubmissionState,
}

impl Default for ReviewWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewWorkflow {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Process an event: transition the state and execute effects.
    ///
    /// This is the main entry point for driving a submission. It:
    /// 1. Runs the pure transition function
    /// 2. Executes effects via the interpreter
    /// 3. Feeds result events back through the transition
    /// 4. Returns the settled state
    pub async fn process_event(
        &mut self,
        event: Event,
        ctx: &InterpreterContext,
    ) -> &SubmissionState {
        let mut events_to_process = vec![event];

        while let Some(event) = events_to_process.pop() {
            info!(
                "Processing event {} in state {}",
                event.log_summary(),
                self.state.describe()
            );

            let TransitionResult { state, effects } = transition(self.state.clone(), event);
            self.state = state;

            if !effects.is_empty() {
                let result_events = execute_effects(ctx, effects).await;

                // Queue result events in order (the stack pops in reverse)
                for result_event in result_events.into_iter().rev() {
                    events_to_process.push(result_event);
                }
            }
        }

        &self.state
    }

    /// The committed review's id, once the workflow has settled in
    /// `Committed`.
    pub fn committed_review_id(&self) -> Option<ReviewId> {
        match &self.state {
            SubmissionState::Committed { review_id } => *review_id,
            _ => None,
        }
    }
}

/// Convert a producer outcome into the event that continues the workflow.
pub fn producer_outcome_event(outcome: ProducerOutcome) -> Event {
    match outcome {
        ProducerOutcome::Completed { draft, transcript } => {
            Event::DraftCompleted { draft, transcript }
        }
        ProducerOutcome::Cancelled => Event::ProducerClosed,
    }
}
