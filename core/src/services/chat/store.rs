//! In-memory thread collection
//!
//! Single-writer state: every mutation goes through these methods so the
//! derived fields (title, last_message, updated_at, active pointer) stay
//! consistent with the message lists.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::entities::{ChatMessage, ChatThread, QueryAnswer};

/// Ordered collection of threads plus the active-thread pointer.
///
/// The active pointer, when set, always references an existing thread.
#[derive(Debug, Default)]
pub struct ThreadStore {
    threads: Vec<ChatThread>,
    active_thread_id: Option<String>,
}

impl ThreadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new thread at the front of the list and makes it active
    pub fn create_thread(&mut self) -> String {
        let thread = ChatThread::new();
        let id = thread.id.clone();
        self.threads.insert(0, thread);
        self.active_thread_id = Some(id.clone());
        tracing::debug!(thread_id = %id, event = "thread_created", "Created new conversation");
        id
    }

    /// Makes a thread active; unknown ids are ignored
    pub fn select_thread(&mut self, thread_id: &str) {
        if self.threads.iter().any(|t| t.id == thread_id) {
            self.active_thread_id = Some(thread_id.to_string());
        }
    }

    /// Renames a thread in place; blank titles are ignored
    pub fn rename_thread(&mut self, thread_id: &str, title: &str) {
        let title = title.trim();
        if title.is_empty() {
            return;
        }
        if let Some(thread) = self.threads.iter_mut().find(|t| t.id == thread_id) {
            thread.title = title.to_string();
        }
    }

    /// Removes a thread locally and re-targets the active pointer.
    ///
    /// Callers must only invoke this after the remote delete succeeded.
    /// Returns false when the id is unknown.
    pub fn remove_thread(&mut self, thread_id: &str) -> bool {
        let index = match self.threads.iter().position(|t| t.id == thread_id) {
            Some(index) => index,
            None => return false,
        };
        self.threads.remove(index);

        if self.active_thread_id.as_deref() == Some(thread_id) {
            self.active_thread_id = self.threads.first().map(|t| t.id.clone());
        }
        true
    }

    /// Appends a question to its thread, updating thread metadata
    pub fn append_question(&mut self, message: ChatMessage) {
        if let Some(thread) = self.threads.iter_mut().find(|t| t.id == message.thread_id) {
            thread.push_question(message);
        }
    }

    /// Attaches a terminal answer to the active thread's most recent
    /// pending message. Returns false (and drops the answer) when the
    /// active thread has no pending message.
    pub fn attach_result(&mut self, answer: QueryAnswer) -> bool {
        let active_id = match &self.active_thread_id {
            Some(id) => id.clone(),
            None => return false,
        };
        match self.threads.iter_mut().find(|t| t.id == active_id) {
            Some(thread) => thread.attach_to_last_pending(answer),
            None => false,
        }
    }

    /// Rebuilds the collection from a flat history dump.
    ///
    /// Messages are grouped by thread id (messages without one get a
    /// synthetic thread each), titled by their first message, stamped with
    /// their newest message's timestamp, and sorted newest-first. The
    /// newest thread becomes active only when nothing is active yet.
    pub fn load_history(&mut self, history: Vec<ChatMessage>) {
        let mut grouped: HashMap<String, ChatThread> = HashMap::new();
        let mut stamps: HashMap<String, DateTime<Utc>> = HashMap::new();

        for message in history {
            let thread_id = if message.thread_id.is_empty() {
                Uuid::new_v4().to_string()
            } else {
                message.thread_id.clone()
            };

            let thread = grouped
                .entry(thread_id.clone())
                .or_insert_with(|| ChatThread::with_id(&thread_id, &message.question));

            if let Some(created_at) = message.created_at {
                let newest = stamps.entry(thread_id).or_insert(created_at);
                if created_at >= *newest {
                    *newest = created_at;
                    thread.last_message = Some(message.question.clone());
                    thread.updated_at = Some(created_at);
                }
            }

            thread.messages.push(message);
        }

        let mut threads: Vec<ChatThread> = grouped.into_values().collect();
        threads.sort_by_key(|t| std::cmp::Reverse(t.updated_at.unwrap_or(DateTime::UNIX_EPOCH)));
        self.threads = threads;

        // Keep the current selection when it survived the reload; otherwise
        // the newest thread becomes active (the pointer may never dangle).
        let active_exists = self
            .active_thread_id
            .as_deref()
            .map(|id| self.threads.iter().any(|t| t.id == id))
            .unwrap_or(false);
        if !active_exists {
            self.active_thread_id = self.threads.first().map(|t| t.id.clone());
        }
        tracing::debug!(
            threads = self.threads.len(),
            event = "history_loaded",
            "Rebuilt thread collection from history"
        );
    }

    pub fn threads(&self) -> &[ChatThread] {
        &self.threads
    }

    pub fn active_thread_id(&self) -> Option<&str> {
        self.active_thread_id.as_deref()
    }

    pub fn active_thread(&self) -> Option<&ChatThread> {
        let id = self.active_thread_id.as_deref()?;
        self.threads.iter().find(|t| t.id == id)
    }

    pub fn thread(&self, thread_id: &str) -> Option<&ChatThread> {
        self.threads.iter().find(|t| t.id == thread_id)
    }
}
