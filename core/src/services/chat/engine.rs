//! Chat engine: orchestrates submission, polling, and thread state
//!
//! The engine owns the thread store and the polling session. All mutation
//! happens through `&mut self`, which also makes the one-question-at-a-time
//! invariant structural: a second submission cannot race the first.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::ChatMessage;
use crate::errors::{ChatError, DomainResult};

use super::polling::IntervalPolling;
use super::store::ThreadStore;
use super::traits::{QueryGateway, ResultStrategy};
use super::types::QuestionRequest;

/// Identity the engine submits questions under
#[derive(Debug, Clone)]
pub struct ChatIdentity {
    pub user_id: i64,
    pub tenant_id: String,
    /// Module scope string attached to submissions, when restricted
    pub permission_scope: Option<String>,
}

/// In-flight polling session. Its existence implies a task id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingSession {
    pub task_id: String,
}

/// Drives the question/answer protocol and keeps the conversation state.
pub struct ChatEngine<G: QueryGateway, S: ResultStrategy> {
    gateway: Arc<G>,
    strategy: S,
    identity: ChatIdentity,
    store: ThreadStore,
    session: Option<PollingSession>,
    is_loading: bool,
    error: Option<String>,
}

impl<G: QueryGateway> ChatEngine<G, IntervalPolling<G>> {
    /// Engine with the default interval-polling delivery
    pub fn new(gateway: Arc<G>, identity: ChatIdentity, poll_interval: Duration) -> Self {
        let strategy = IntervalPolling::new(Arc::clone(&gateway), poll_interval);
        Self::with_strategy(gateway, strategy, identity)
    }
}

impl<G: QueryGateway, S: ResultStrategy> ChatEngine<G, S> {
    /// Engine with a custom result-delivery strategy
    pub fn with_strategy(gateway: Arc<G>, strategy: S, identity: ChatIdentity) -> Self {
        Self {
            gateway,
            strategy,
            identity,
            store: ThreadStore::new(),
            session: None,
            is_loading: false,
            error: None,
        }
    }

    /// Submit a question on the active thread.
    ///
    /// Appends the question as a pending message once the backend has
    /// acknowledged it with a task id, and opens a polling session.
    /// Refused while a previous question is still in flight.
    pub async fn submit(&mut self, question: &str) -> DomainResult<String> {
        if self.is_loading {
            return Err(ChatError::Busy.into());
        }
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatError::EmptyQuestion.into());
        }
        let thread_id = match self.store.active_thread_id() {
            Some(id) => id.to_string(),
            None => return Err(ChatError::NoActiveThread.into()),
        };
        if self.identity.tenant_id.is_empty() {
            return Err(ChatError::MissingTenant.into());
        }

        let message = ChatMessage::new(
            question,
            &self.identity.tenant_id,
            self.identity.user_id,
            &thread_id,
        );
        let request = QuestionRequest {
            tenant_id: self.identity.tenant_id.clone(),
            question: question.to_string(),
            user_id: self.identity.user_id,
            thread_id: thread_id.clone(),
            parent_id: message.parent_id.clone(),
            permission_db: self.identity.permission_scope.clone(),
        };

        self.is_loading = true;
        self.error = None;

        let task_id = match self.strategy.submit(&request).await {
            Ok(task_id) => task_id,
            Err(error) => {
                self.is_loading = false;
                self.error = Some(error.to_string());
                return Err(error);
            }
        };

        tracing::info!(
            task_id = %task_id,
            thread_id = %thread_id,
            event = "question_submitted",
            "Question acknowledged by the backend"
        );

        self.session = Some(PollingSession {
            task_id: task_id.clone(),
        });
        self.store.append_question(message);

        Ok(task_id)
    }

    /// Wait for the open session's terminal result and attach it to the
    /// most recent pending message of the active thread.
    pub async fn await_answer(&mut self) -> DomainResult<()> {
        let task_id = match &self.session {
            Some(session) => session.task_id.clone(),
            None => return Err(ChatError::NoActiveSession.into()),
        };

        let outcome = self.strategy.wait_for_result(&task_id).await;

        // A session replaced or cleared while waiting means this result is
        // stale; drop it rather than attach it to the wrong message.
        if self.session.as_ref().map(|s| s.task_id.as_str()) != Some(task_id.as_str()) {
            tracing::warn!(
                task_id = %task_id,
                event = "stale_result_dropped",
                "Ignoring result for a superseded polling session"
            );
            return Ok(());
        }
        self.session = None;
        self.is_loading = false;

        match outcome {
            Ok(answer) => {
                if !self.store.attach_result(answer) {
                    // No pending message to receive it; defensive no-op
                    tracing::warn!(
                        task_id = %task_id,
                        event = "result_dropped",
                        "No pending message in the active thread"
                    );
                }
                Ok(())
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Submit a question and wait for its answer
    pub async fn ask(&mut self, question: &str) -> DomainResult<()> {
        self.submit(question).await?;
        self.await_answer().await
    }

    /// Fetch history and rebuild the thread collection
    pub async fn load_history(&mut self) -> DomainResult<()> {
        self.is_loading = true;
        self.error = None;
        let result = self
            .gateway
            .chat_history(self.identity.user_id, &self.identity.tenant_id)
            .await;
        self.is_loading = false;

        match result {
            Ok(history) => {
                self.store.load_history(history);
                Ok(())
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Delete a thread: remote first, local removal only on success.
    ///
    /// Destructive — callers are expected to have confirmed with the user.
    /// On failure the thread stays and the error is surfaced.
    pub async fn delete_thread(&mut self, thread_id: &str) -> DomainResult<()> {
        if self.identity.tenant_id.is_empty() {
            return Err(ChatError::MissingTenant.into());
        }

        match self
            .gateway
            .delete_thread(thread_id, &self.identity.tenant_id)
            .await
        {
            Ok(()) => {
                self.store.remove_thread(thread_id);
                self.error = None;
                tracing::info!(
                    thread_id = %thread_id,
                    event = "thread_deleted",
                    "Thread removed"
                );
                Ok(())
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Create a new conversation and make it active
    pub fn create_thread(&mut self) -> String {
        self.store.create_thread()
    }

    /// Switch the active conversation; unknown ids are ignored
    pub fn select_thread(&mut self, thread_id: &str) {
        self.store.select_thread(thread_id);
    }

    /// Rename a conversation; blank titles are ignored
    pub fn rename_thread(&mut self, thread_id: &str, title: &str) {
        self.store.rename_thread(thread_id, title);
    }

    pub fn store(&self) -> &ThreadStore {
        &self.store
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn polling_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&PollingSession> {
        self.session.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Clear the surfaced error (banner dismissed)
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
