//! Query endpoints: submit, poll, history, thread deletion

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use dc_core::domain::entities::ChatMessage;
use dc_core::errors::{ChatError, DomainResult};
use dc_core::services::chat::{PollReply, QueryGateway, QuestionRequest};

use crate::http::ApiClient;

#[derive(Debug, Deserialize)]
struct TaskAck {
    task_id: String,
}

#[derive(Debug, Serialize)]
struct HistoryRequest<'a> {
    user_id: i64,
    tenant_id: &'a str,
}

#[derive(Debug, Serialize)]
struct DeleteThreadRequest<'a> {
    thread_id: &'a str,
    tenant_id: &'a str,
}

/// [`QueryGateway`] over the DataChat HTTP API
pub struct HttpQueryGateway {
    client: Arc<ApiClient>,
}

impl HttpQueryGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QueryGateway for HttpQueryGateway {
    async fn submit_question(&self, request: &QuestionRequest) -> DomainResult<String> {
        let ack: TaskAck = self
            .client
            .post("/query", request)
            .await
            .map_err(|error| ChatError::SubmitFailed {
                detail: error.to_string(),
            })?;
        Ok(ack.task_id)
    }

    async fn fetch_result(&self, task_id: &str) -> DomainResult<PollReply> {
        // A failed status check is reported as a terminal reply carrying the
        // error, so it lands inside the conversation instead of aborting it.
        match self.client.get(&format!("/result/{}", task_id)).await {
            Ok(reply) => Ok(reply),
            Err(error) => {
                tracing::warn!(
                    task_id = task_id,
                    error = %error,
                    event = "poll_request_failed",
                    "Result poll failed; synthesizing terminal reply"
                );
                Ok(PollReply::failed(error.to_string()))
            }
        }
    }

    async fn chat_history(&self, user_id: i64, tenant_id: &str) -> DomainResult<Vec<ChatMessage>> {
        self.client
            .post("/chat-history", &HistoryRequest { user_id, tenant_id })
            .await
            .map_err(|error| {
                ChatError::HistoryFailed {
                    detail: error.to_string(),
                }
                .into()
            })
    }

    async fn delete_thread(&self, thread_id: &str, tenant_id: &str) -> DomainResult<()> {
        self.client
            .delete_with_body::<serde_json::Value, _>(
                "/delete-thread",
                &DeleteThreadRequest {
                    thread_id,
                    tenant_id,
                },
            )
            .await
            .map(|_| ())
            .map_err(|error| {
                ChatError::DeleteFailed {
                    detail: error.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_ack_shape() {
        let ack: TaskAck = serde_json::from_str(r#"{"task_id": "abc123"}"#).unwrap();
        assert_eq!(ack.task_id, "abc123");
    }

    #[test]
    fn test_request_bodies_match_wire_contract() {
        let json = serde_json::to_value(HistoryRequest {
            user_id: 7,
            tenant_id: "acme",
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"user_id": 7, "tenant_id": "acme"}));

        let json = serde_json::to_value(DeleteThreadRequest {
            thread_id: "t1",
            tenant_id: "acme",
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"thread_id": "t1", "tenant_id": "acme"})
        );
    }
}
