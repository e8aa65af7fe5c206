//! Summarizer adapter with a guaranteed fallback path.
//!
//! Summarization is an enhancement, not a dependency of correctness. Every
//! failure mode of the backend (unconfigured, no user turns, transport
//! error, timeout, empty response) lands on the draft's own comment, so
//! `summarize` has no error outcome at all.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::review::{create_summary_prompt, summary_system_prompt, ReviewDraft};
use crate::transcript::ConversationTranscript;

/// Bound on the external summarization call.
pub const DEFAULT_SUMMARY_TIMEOUT: Duration = Duration::from_secs(30);

/// Text-condensation capability behind the summarizer.
#[async_trait]
pub trait SummaryBackend: Send + Sync {
    /// Produce a completion for the given system instruction and user
    /// content.
    async fn complete(&self, system_prompt: &str, user_content: &str) -> anyhow::Result<String>;
}

/// Outcome of a summarization request.
///
/// Both variants are forward progress; callers may distinguish them for
/// logging but must treat both as usable summary text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryResult {
    /// The backend produced a summary.
    Generated(String),
    /// The draft's own comment, used when the backend could not deliver.
    Fallback(String),
}

impl SummaryResult {
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) | Self::Fallback(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Generated(text) | Self::Fallback(text) => text,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

/// Wraps an optional backend behind the always-succeeding `summarize`.
pub struct Summarizer {
    backend: Option<Arc<dyn SummaryBackend>>,
    timeout: Duration,
}

impl Summarizer {
    pub fn new(backend: Option<Arc<dyn SummaryBackend>>) -> Self {
        Self {
            backend,
            timeout: DEFAULT_SUMMARY_TIMEOUT,
        }
    }

    /// A summarizer with no backend; every request takes the fallback path.
    pub fn unconfigured() -> Self {
        Self::new(None)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Condense the conversation into a short review summary.
    ///
    /// Falls back to the draft's own comment whenever the backend is not
    /// configured, the transcript carries no user turns, or the call fails,
    /// times out, or returns nothing usable. Never calls the backend in the
    /// first two cases.
    pub async fn summarize(
        &self,
        draft: &ReviewDraft,
        transcript: &ConversationTranscript,
    ) -> SummaryResult {
        let Some(backend) = &self.backend else {
            info!("Summarization backend not configured, using draft comment");
            return SummaryResult::Fallback(draft.comment.clone());
        };

        if !transcript.has_user_content() {
            info!("Transcript has no user turns, using draft comment");
            return SummaryResult::Fallback(draft.comment.clone());
        }

        let user_prompt = create_summary_prompt(draft.course.as_deref(), transcript);
        let call = backend.complete(summary_system_prompt(), &user_prompt);

        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    warn!("Summarization backend returned empty content, using draft comment");
                    SummaryResult::Fallback(draft.comment.clone())
                } else {
                    SummaryResult::Generated(trimmed.to_string())
                }
            }
            Ok(Err(error)) => {
                warn!("Summarization failed: {:#}, using draft comment", error);
                SummaryResult::Fallback(draft.comment.clone())
            }
            Err(_) => {
                warn!(
                    "Summarization timed out after {:?}, using draft comment",
                    self.timeout
                );
                SummaryResult::Fallback(draft.comment.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::Attendance;
    use crate::transcript::TranscriptTurn;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn sample_draft() -> ReviewDraft {
        ReviewDraft {
            course: Some("3101".to_string()),
            quality: 4.0,
            difficulty: 5.0,
            for_credit: Some(true),
            attendance: Some(Attendance::Mandatory),
            would_take_again: Some(false),
            grade: None,
            textbook: None,
            comment: "the original comment".to_string(),
            tags: vec![],
        }
    }

    fn transcript_with_user_turn() -> ConversationTranscript {
        ConversationTranscript::from_turns(vec![
            TranscriptTurn::system("How was the course?"),
            TranscriptTurn::user("the course was hard but fair"),
        ])
    }

    /// Backend that records its prompts and counts calls.
    struct RecordingBackend {
        reply: anyhow::Result<String>,
        calls: AtomicUsize,
        last_prompts: Mutex<Option<(String, String)>>,
    }

    impl RecordingBackend {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
                last_prompts: Mutex::new(None),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(anyhow!("{}", message.to_string())),
                calls: AtomicUsize::new(0),
                last_prompts: Mutex::new(None),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SummaryBackend for RecordingBackend {
        async fn complete(
            &self,
            system_prompt: &str,
            user_content: &str,
        ) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompts.lock().unwrap() =
                Some((system_prompt.to_string(), user_content.to_string()));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(error) => Err(anyhow!("{}", error)),
            }
        }
    }

    /// Backend that never answers within any reasonable time.
    struct HangingBackend;

    #[async_trait]
    impl SummaryBackend for HangingBackend {
        async fn complete(&self, _system: &str, _user: &str) -> anyhow::Result<String> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("too late".to_string())
        }
    }

    #[tokio::test]
    async fn test_fallback_when_unconfigured() {
        let summarizer = Summarizer::unconfigured();
        let draft = sample_draft();

        let result = summarizer.summarize(&draft, &transcript_with_user_turn()).await;

        assert_eq!(result, SummaryResult::Fallback("the original comment".to_string()));
    }

    #[tokio::test]
    async fn test_no_call_attempted_for_empty_transcript() {
        let backend = Arc::new(RecordingBackend::replying("should not be used"));
        let summarizer = Summarizer::new(Some(backend.clone()));
        let draft = sample_draft();

        let result = summarizer
            .summarize(&draft, &ConversationTranscript::new())
            .await;

        assert_eq!(result, SummaryResult::Fallback("the original comment".to_string()));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generated_on_success_is_trimmed() {
        let backend = Arc::new(RecordingBackend::replying("  A short, fair summary.  "));
        let summarizer = Summarizer::new(Some(backend.clone()));
        let draft = sample_draft();

        let result = summarizer.summarize(&draft, &transcript_with_user_turn()).await;

        assert_eq!(
            result,
            SummaryResult::Generated("A short, fair summary.".to_string())
        );
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fallback_on_backend_failure() {
        let backend = Arc::new(RecordingBackend::failing("connection refused"));
        let summarizer = Summarizer::new(Some(backend.clone()));
        let draft = sample_draft();

        let result = summarizer.summarize(&draft, &transcript_with_user_turn()).await;

        assert_eq!(result, SummaryResult::Fallback("the original comment".to_string()));
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fallback_on_whitespace_response() {
        let backend = Arc::new(RecordingBackend::replying("   \n  "));
        let summarizer = Summarizer::new(Some(backend));
        let draft = sample_draft();

        let result = summarizer.summarize(&draft, &transcript_with_user_turn()).await;

        assert_eq!(result, SummaryResult::Fallback("the original comment".to_string()));
    }

    #[tokio::test]
    async fn test_fallback_on_timeout() {
        let summarizer = Summarizer::new(Some(Arc::new(HangingBackend)))
            .with_timeout(Duration::from_millis(20));
        let draft = sample_draft();

        let result = summarizer.summarize(&draft, &transcript_with_user_turn()).await;

        assert_eq!(result, SummaryResult::Fallback("the original comment".to_string()));
    }

    #[tokio::test]
    async fn test_prompt_carries_only_user_turns() {
        let backend = Arc::new(RecordingBackend::replying("A summary."));
        let summarizer = Summarizer::new(Some(backend.clone()));
        let draft = sample_draft();

        summarizer.summarize(&draft, &transcript_with_user_turn()).await;

        let prompts = backend.last_prompts.lock().unwrap();
        let (system, user) = prompts.as_ref().unwrap();
        assert!(system.contains("2-3 sentences"));
        assert!(user.contains("about 3101"));
        assert!(user.contains("the course was hard but fair"));
        assert!(!user.contains("How was the course?"));
    }

    #[test]
    fn test_summary_result_accessors() {
        let generated = SummaryResult::Generated("short".to_string());
        assert!(generated.is_generated());
        assert_eq!(generated.text(), "short");

        let fallback = SummaryResult::Fallback("original".to_string());
        assert!(!fallback.is_generated());
        assert_eq!(fallback.into_text(), "original");
    }
}
