//! Chat message entity and query answer payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tabular result of an executed query.
///
/// Every field defaults so that partially-populated server payloads
/// deserialize to safe values instead of failing or leaving holes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Result rows as returned by the backend
    #[serde(default)]
    pub results: Vec<serde_json::Value>,

    /// Column names, in display order
    #[serde(default)]
    pub columns: Vec<String>,

    /// Number of rows the query produced
    #[serde(default)]
    pub row_count: u64,

    /// Whether the query executed successfully
    #[serde(default)]
    pub success: bool,

    /// Execution error, when `success` is false
    #[serde(default)]
    pub error: Option<String>,
}

/// Terminal answer to a submitted question
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryAnswer {
    /// SQL the backend generated for the question
    #[serde(default)]
    pub sql: String,

    /// Execution result
    #[serde(default)]
    pub result: ResultSet,

    /// Follow-up question suggestions
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl QueryAnswer {
    /// Build a terminal answer carrying only an error message.
    ///
    /// Used when a poll fails at the transport level: the failure is shown
    /// inside the conversation instead of being thrown at the UI.
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            sql: String::new(),
            result: ResultSet {
                success: false,
                error: Some(message.into()),
                ..ResultSet::default()
            },
            suggestions: Vec::new(),
        }
    }
}

/// One question/answer pair within a thread.
///
/// A message is "pending" while `result` is `None`: the question has been
/// submitted but its answer has not arrived yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub question: String,
    pub tenant_id: String,
    pub user_id: i64,
    #[serde(default)]
    pub thread_id: String,
    #[serde(default)]
    pub parent_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<QueryAnswer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ChatMessage {
    /// Creates a new pending message with a fresh correlation id
    pub fn new(
        question: impl Into<String>,
        tenant_id: impl Into<String>,
        user_id: i64,
        thread_id: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            tenant_id: tenant_id.into(),
            user_id,
            thread_id: thread_id.into(),
            parent_id: Uuid::new_v4().to_string(),
            result: None,
            created_at: Some(Utc::now()),
        }
    }

    /// Whether the answer has not arrived yet
    pub fn is_pending(&self) -> bool {
        self.result.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_is_pending() {
        let message = ChatMessage::new("show total sales", "acme", 7, "t1");
        assert!(message.is_pending());
        assert!(!message.parent_id.is_empty());
        assert_eq!(message.thread_id, "t1");
    }

    #[test]
    fn test_missing_answer_fields_normalize() {
        // A completed payload with most fields absent
        let answer: QueryAnswer = serde_json::from_str(r#"{"sql": "SELECT 1"}"#).unwrap();
        assert_eq!(answer.sql, "SELECT 1");
        assert!(answer.result.results.is_empty());
        assert!(answer.result.columns.is_empty());
        assert_eq!(answer.result.row_count, 0);
        assert!(!answer.result.success);
        assert!(answer.result.error.is_none());
        assert!(answer.suggestions.is_empty());
    }

    #[test]
    fn test_error_answer() {
        let answer = QueryAnswer::from_error("backend unavailable");
        assert!(!answer.result.success);
        assert_eq!(answer.result.error.as_deref(), Some("backend unavailable"));
        assert!(answer.sql.is_empty());
    }

    #[test]
    fn test_history_record_deserializes() {
        let json = r#"{
            "question": "top customers",
            "tenant_id": "acme",
            "user_id": 3,
            "thread_id": "t9",
            "parent_id": "p1",
            "created_at": "2025-06-01T10:00:00Z"
        }"#;
        let message: ChatMessage = serde_json::from_str(json).unwrap();
        assert!(message.is_pending());
        assert!(message.created_at.is_some());
    }
}
