//! Gateway and delivery-strategy traits for the chat service

use async_trait::async_trait;

use crate::domain::entities::{ChatMessage, QueryAnswer};
use crate::errors::DomainResult;

use super::types::{PollReply, QuestionRequest};

/// Remote endpoints the chat service talks to
#[async_trait]
pub trait QueryGateway: Send + Sync {
    /// Submit a question; the backend acknowledges with an opaque task id
    async fn submit_question(&self, request: &QuestionRequest) -> DomainResult<String>;

    /// Check the status of a submitted task
    async fn fetch_result(&self, task_id: &str) -> DomainResult<PollReply>;

    /// Flat message history for a user within a tenant
    async fn chat_history(&self, user_id: i64, tenant_id: &str) -> DomainResult<Vec<ChatMessage>>;

    /// Delete a thread server-side
    async fn delete_thread(&self, thread_id: &str, tenant_id: &str) -> DomainResult<()>;
}

/// How terminal results are delivered after submission.
///
/// The engine only needs "submit" and "wait for the terminal result"; the
/// interval-polling implementation can be replaced by a push subscription
/// without changing the engine.
#[async_trait]
pub trait ResultStrategy: Send + Sync {
    /// Submit a question, returning its task id
    async fn submit(&self, request: &QuestionRequest) -> DomainResult<String>;

    /// Wait until the task reaches a terminal state and return its payload
    async fn wait_for_result(&self, task_id: &str) -> DomainResult<QueryAnswer>;
}
