//! Conversation transcripts captured during guided input collection.
//!
//! A transcript is only ever summarization input; it is never persisted with
//! a published review.

use serde::{Deserialize, Serialize};

/// Who authored a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    System,
    User,
}

/// A single turn of the collection conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl TranscriptTurn {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::System,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }
}

/// Ordered turns of the collection conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTranscript {
    turns: Vec<TranscriptTurn>,
}

impl ConversationTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_turns(turns: Vec<TranscriptTurn>) -> Self {
        Self { turns }
    }

    pub fn push(&mut self, turn: TranscriptTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[TranscriptTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Concatenates the user-authored turns, space separated.
    ///
    /// System turns are excluded: only what the reviewer actually said may
    /// reach the summarization prompt.
    pub fn user_content(&self) -> String {
        self.turns
            .iter()
            .filter(|turn| turn.speaker == Speaker::User)
            .map(|turn| turn.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// True when at least one user turn carries non-whitespace text.
    pub fn has_user_content(&self) -> bool {
        self.turns
            .iter()
            .any(|turn| turn.speaker == Speaker::User && !turn.text.trim().is_empty())
    }
}
