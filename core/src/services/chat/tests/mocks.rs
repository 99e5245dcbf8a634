//! Mock implementations for testing the chat service

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::entities::ChatMessage;
use crate::errors::{ChatError, DomainResult};
use crate::services::chat::traits::QueryGateway;
use crate::services::chat::types::{PollReply, QuestionRequest};

/// Mock query gateway with scripted poll replies
pub struct MockQueryGateway {
    pub submitted: Mutex<Vec<QuestionRequest>>,
    pub replies: Mutex<VecDeque<PollReply>>,
    pub history: Mutex<Vec<ChatMessage>>,
    pub deleted: Mutex<Vec<String>>,
    pub poll_count: AtomicUsize,
    pub fail_submit: bool,
    pub fail_poll: bool,
    pub fail_delete: bool,
}

impl MockQueryGateway {
    pub fn new() -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
            history: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            poll_count: AtomicUsize::new(0),
            fail_submit: false,
            fail_poll: false,
            fail_delete: false,
        }
    }

    pub fn with_replies(replies: Vec<PollReply>) -> Self {
        let gateway = Self::new();
        *gateway.replies.lock().unwrap() = replies.into();
        gateway
    }

    pub fn submitted_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn polls(&self) -> usize {
        self.poll_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryGateway for MockQueryGateway {
    async fn submit_question(&self, request: &QuestionRequest) -> DomainResult<String> {
        if self.fail_submit {
            return Err(ChatError::SubmitFailed {
                detail: "Error: 500".to_string(),
            }
            .into());
        }
        self.submitted.lock().unwrap().push(request.clone());
        Ok(format!("task-{}", self.submitted_count()))
    }

    async fn fetch_result(&self, _task_id: &str) -> DomainResult<PollReply> {
        self.poll_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_poll {
            return Err(ChatError::PollFailed {
                detail: "connection reset".to_string(),
            }
            .into());
        }
        Ok(self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }

    async fn chat_history(
        &self,
        _user_id: i64,
        _tenant_id: &str,
    ) -> DomainResult<Vec<ChatMessage>> {
        Ok(self.history.lock().unwrap().clone())
    }

    async fn delete_thread(&self, thread_id: &str, _tenant_id: &str) -> DomainResult<()> {
        if self.fail_delete {
            return Err(ChatError::DeleteFailed {
                detail: "Failed to delete thread: 500".to_string(),
            }
            .into());
        }
        self.deleted.lock().unwrap().push(thread_id.to_string());
        Ok(())
    }
}
