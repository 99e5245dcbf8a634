//! Conversation thread entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::{ChatMessage, QueryAnswer};

/// Title given to a thread before its first question arrives
pub const DEFAULT_THREAD_TITLE: &str = "New Conversation";

/// A conversation: an ordered sequence of question/answer messages.
///
/// Insertion order is conversation order. Derived metadata (`last_message`,
/// `updated_at`, title) is maintained by the mutation methods; callers must
/// not bypass them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatThread {
    pub id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ChatThread {
    /// Creates an empty thread with a fresh id and the default title
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: DEFAULT_THREAD_TITLE.to_string(),
            messages: Vec::new(),
            last_message: None,
            updated_at: Some(Utc::now()),
        }
    }

    /// Creates an empty thread with a known id (history regrouping)
    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            messages: Vec::new(),
            last_message: None,
            updated_at: None,
        }
    }

    /// Appends a question and updates thread metadata.
    ///
    /// The first question of a fresh thread becomes its title.
    pub fn push_question(&mut self, message: ChatMessage) {
        self.last_message = Some(message.question.clone());
        self.updated_at = Some(Utc::now());
        self.messages.push(message);

        if self.messages.len() == 1 && self.title == DEFAULT_THREAD_TITLE {
            self.title = self.messages[0].question.clone();
        }
    }

    /// Attaches a terminal answer to the most recent pending message.
    ///
    /// Scans from the end; returns false when no message is pending, in
    /// which case the answer is dropped.
    pub fn attach_to_last_pending(&mut self, answer: QueryAnswer) -> bool {
        match self.messages.iter_mut().rev().find(|m| m.is_pending()) {
            Some(message) => {
                message.result = Some(answer);
                true
            }
            None => false,
        }
    }

    /// Whether any message is still awaiting its answer
    pub fn has_pending_message(&self) -> bool {
        self.messages.iter().any(|m| m.is_pending())
    }
}

impl Default for ChatThread {
    fn default() -> Self {
        Self::new()
    }
}
