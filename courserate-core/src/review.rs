//! Review records and commit-time stamping.
//!
//! A `ReviewDraft` is the unfinalized shape a draft producer emits; it has no
//! identity until it is committed. `finalize` converts an approved draft into
//! an immutable `PublishedReview`, assigning the id and date stamp.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::transcript::ConversationTranscript;

/// Newtype for a published review's identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ReviewId(pub u64);

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ReviewId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Whether class attendance was mandatory for the reviewed course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attendance {
    Mandatory,
    Optional,
}

impl Attendance {
    /// Parse from a user-supplied label.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mandatory" => Some(Self::Mandatory),
            "optional" => Some(Self::Optional),
            _ => None,
        }
    }
}

impl fmt::Display for Attendance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mandatory => write!(f, "Mandatory"),
            Self::Optional => write!(f, "Optional"),
        }
    }
}

/// An unfinalized review as produced by a draft producer.
///
/// Tri-state fields (`for_credit`, `would_take_again`, ...) are `None` when
/// the producer could not collect an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub course: Option<String>,
    pub quality: f32,
    pub difficulty: f32,
    pub for_credit: Option<bool>,
    pub attendance: Option<Attendance>,
    pub would_take_again: Option<bool>,
    pub grade: Option<String>,
    pub textbook: Option<bool>,
    pub comment: String,
    pub tags: Vec<String>,
}

impl ReviewDraft {
    /// Returns a copy with the comment replaced.
    ///
    /// Used when an approved summary stands in for the original text; the
    /// original draft is left untouched so cancellation loses nothing.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// A committed review, owned by the shared store.
///
/// Immutable in identity and content once created; only the vote counters
/// change afterwards, and only through the store's vote operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedReview {
    pub id: ReviewId,
    pub course: Option<String>,
    pub date: String,
    pub quality: f32,
    pub difficulty: f32,
    pub for_credit: Option<bool>,
    pub attendance: Option<Attendance>,
    pub would_take_again: Option<bool>,
    pub grade: Option<String>,
    pub textbook: Option<bool>,
    pub comment: String,
    pub helpful_count: u32,
    pub not_helpful_count: u32,
    pub tags: Vec<String>,
}

/// Process-wide id source. Wall-clock ids can collide under rapid successive
/// commits; a monotonic counter cannot.
static NEXT_REVIEW_ID: AtomicU64 = AtomicU64::new(1);

fn next_review_id() -> ReviewId {
    ReviewId(NEXT_REVIEW_ID.fetch_add(1, Ordering::Relaxed))
}

/// Convert an approved draft into a published review stamped with today's
/// date.
pub fn finalize(draft: ReviewDraft) -> PublishedReview {
    finalize_on(draft, chrono::Local::now().date_naive())
}

/// Commit-time stamping with an explicit date, for seeding and deterministic
/// tests.
pub fn finalize_on(draft: ReviewDraft, date: NaiveDate) -> PublishedReview {
    PublishedReview {
        id: next_review_id(),
        date: format_review_date(date),
        helpful_count: 0,
        not_helpful_count: 0,
        course: draft.course,
        quality: draft.quality,
        difficulty: draft.difficulty,
        for_credit: draft.for_credit,
        attendance: draft.attendance,
        would_take_again: draft.would_take_again,
        grade: draft.grade,
        textbook: draft.textbook,
        comment: draft.comment,
        tags: draft.tags,
    }
}

/// Formats a date the way the feed displays it, e.g. `"Mar 27th, 2025"`.
pub fn format_review_date(date: NaiveDate) -> String {
    let day = date.day();
    format!(
        "{} {}{}, {}",
        date.format("%b"),
        day,
        ordinal_suffix(day),
        date.year()
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    // 11th-13th, despite ending in 1-3
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// System instruction for the summarization capability.
pub fn summary_system_prompt() -> &'static str {
    "Create a concise, anonymous course review summary (2-3 sentences) based \
     on the conversation. Make it professional, clear, and helpful for other \
     students."
}

/// Build the summarization user prompt from the course label and the
/// user-authored transcript turns. System turns never reach the prompt.
pub fn create_summary_prompt(course: Option<&str>, transcript: &ConversationTranscript) -> String {
    format!(
        "Based on this conversation about {}, create a brief summary review:\n\n{}",
        course.unwrap_or("the course"),
        transcript.user_content()
    )
}
