use super::error::CompletionError;
use crate::domain::avatar::TalkStatus;
use crate::infrastructure::repositories::{DidTalksRepository, TalkDetails};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A talk that reached `done` with a usable result
#[derive(Debug, Clone)]
pub struct CompletedTalk {
    pub result_url: String,
    pub talk: TalkDetails,
}

/// Blocking completion strategy: re-query the talk until it is done or the
/// deadline passes. There is no cancellation beyond the deadline.
pub struct TalkPoller {
    talks: Arc<DidTalksRepository>,
    interval: Duration,
    timeout: Duration,
}

impl TalkPoller {
    pub fn new(talks: Arc<DidTalksRepository>, interval: Duration, timeout: Duration) -> Self {
        Self {
            talks,
            interval,
            timeout,
        }
    }

    pub async fn wait_for_completion(&self, talk_id: &str) -> Result<CompletedTalk, CompletionError> {
        let start = Instant::now();
        tracing::info!(
            talk_id = talk_id,
            interval_secs = self.interval.as_secs_f64(),
            timeout_secs = self.timeout.as_secs_f64(),
            "Polling talk status"
        );

        loop {
            // A status request that never answers still ends at the deadline
            let remaining = self.timeout.saturating_sub(start.elapsed());
            let talk = match tokio::time::timeout(remaining, self.talks.get_talk(talk_id)).await {
                Ok(result) => result?,
                Err(_) => return Err(self.timed_out(talk_id)),
            };
            tracing::info!(talk_id = talk_id, status = %talk.status, "Talk status");

            match talk.status {
                TalkStatus::Done => {
                    let result_url = talk
                        .result_url
                        .clone()
                        .ok_or_else(|| CompletionError::MissingResultUrl(talk_id.to_string()))?;
                    return Ok(CompletedTalk { result_url, talk });
                }
                TalkStatus::Failed => {
                    return Err(CompletionError::JobFailed {
                        talk_id: talk_id.to_string(),
                        details: talk.raw,
                    });
                }
                TalkStatus::Created | TalkStatus::Processing => {}
            }

            let remaining = self.timeout.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                return Err(self.timed_out(talk_id));
            }

            tokio::time::sleep(self.interval.min(remaining)).await;
        }
    }

    fn timed_out(&self, talk_id: &str) -> CompletionError {
        tracing::error!(talk_id = talk_id, "Polling timed out");
        CompletionError::Timeout {
            talk_id: talk_id.to_string(),
            timeout: self.timeout,
        }
    }
}
