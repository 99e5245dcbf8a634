//! Interval-based result delivery

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::QueryAnswer;
use crate::errors::DomainResult;

use super::traits::{QueryGateway, ResultStrategy};
use super::types::QuestionRequest;

/// Polls a task on a fixed interval until it reaches a terminal state.
///
/// The spacing is constant — no adaptive backoff — and there is no poll-count
/// ceiling; adding one would be an enhancement, not a requirement. Status
/// checks are idempotent server-side, so a poll outliving its interval slot
/// is harmless. Dropping the returned future stops the loop; no poll fires
/// after cancellation.
pub struct IntervalPolling<G: QueryGateway> {
    gateway: Arc<G>,
    interval: Duration,
}

impl<G: QueryGateway> IntervalPolling<G> {
    pub fn new(gateway: Arc<G>, interval: Duration) -> Self {
        Self { gateway, interval }
    }
}

#[async_trait]
impl<G: QueryGateway> ResultStrategy for IntervalPolling<G> {
    async fn submit(&self, request: &QuestionRequest) -> DomainResult<String> {
        self.gateway.submit_question(request).await
    }

    async fn wait_for_result(&self, task_id: &str) -> DomainResult<QueryAnswer> {
        let mut ticker = tokio::time::interval(self.interval);
        // The first tick of a tokio interval completes immediately; consume
        // it so the first poll happens one full interval after submission.
        ticker.tick().await;

        let mut polls: u64 = 0;
        loop {
            ticker.tick().await;
            polls += 1;

            let reply = self.gateway.fetch_result(task_id).await?;
            if reply.is_terminal() {
                tracing::debug!(
                    task_id = task_id,
                    polls = polls,
                    status = ?reply.status,
                    event = "polling_finished",
                    "Task reached a terminal state"
                );
                return Ok(reply.into_answer());
            }
        }
    }
}
