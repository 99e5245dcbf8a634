//! Wire-facing types for the query protocol

use serde::{Deserialize, Serialize};

use crate::domain::entities::QueryAnswer;

/// Body of a question submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub tenant_id: String,
    pub question: String,
    pub user_id: i64,
    pub thread_id: String,
    /// Client-generated correlation id
    pub parent_id: String,
    /// Module scope the user may query, when restricted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_db: Option<String>,
}

/// Status reported by a result poll.
///
/// Anything that is not a terminal status means "keep polling"; that case
/// is an explicit variant instead of being inferred from absence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Completed,
    Error,
    #[default]
    #[serde(other)]
    Pending,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Error)
    }
}

/// One poll response for a task
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PollReply {
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub result: Option<QueryAnswer>,
    /// Error detail some terminal replies carry instead of a result
    #[serde(default)]
    pub error: Option<String>,
}

impl PollReply {
    /// Terminal reply carrying an answer
    pub fn completed(result: QueryAnswer) -> Self {
        Self {
            status: TaskStatus::Completed,
            result: Some(result),
            error: None,
        }
    }

    /// Terminal reply synthesized from a failure message
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: TaskStatus::Completed,
            result: Some(QueryAnswer::from_error(message.clone())),
            error: Some(message),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Terminal payload with missing pieces normalized to safe defaults
    pub fn into_answer(self) -> QueryAnswer {
        match self.result {
            Some(answer) => answer,
            None => match self.error {
                Some(message) => QueryAnswer::from_error(message),
                None if self.status == TaskStatus::Error => {
                    QueryAnswer::from_error("Query failed")
                }
                None => QueryAnswer::default(),
            },
        }
    }
}
