//! Effect interpreter that executes effects against real collaborators.
//!
//! The interpreter is the boundary between the pure state machine and the
//! impure world. It takes effects (descriptions of what to do), executes
//! them against the summarizer adapter and the shared store, and returns
//! result events. Every effect here is total: the summarizer's fallback path
//! and the in-memory store leave no failure outcome to report.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::effect::{Effect, LogLevel};
use super::event::Event;
use crate::review::finalize;
use crate::store::ReviewStore;
use crate::summarizer::Summarizer;

/// Context needed by the interpreter to execute effects.
pub struct InterpreterContext {
    pub summarizer: Arc<Summarizer>,
    pub store: Arc<ReviewStore>,
}

/// Execute a list of effects and collect result events.
///
/// Effects are executed sequentially, in the order the transition emitted
/// them.
pub async fn execute_effects(ctx: &InterpreterContext, effects: Vec<Effect>) -> Vec<Event> {
    let mut result_events = Vec::new();

    for effect in effects {
        result_events.extend(execute_effect(ctx, effect).await);
    }

    result_events
}

/// Execute a single effect.
async fn execute_effect(ctx: &InterpreterContext, effect: Effect) -> Vec<Event> {
    match effect {
        Effect::RequestSummary { draft, transcript } => {
            let result = ctx.summarizer.summarize(&draft, &transcript).await;
            vec![Event::SummaryReady { result }]
        }

        Effect::CommitReview { review } => {
            let published = finalize(review);
            let id = published.id;
            ctx.store.append(published).await;
            vec![Event::ReviewCommitted { id }]
        }

        Effect::Log { level, message } => {
            match level {
                LogLevel::Debug => debug!("{}", message),
                LogLevel::Info => info!("{}", message),
                LogLevel::Warn => warn!("{}", message),
                LogLevel::Error => error!("{}", message),
            }
            vec![]
        }
    }
}
