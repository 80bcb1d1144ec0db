// src/fill/settle.rs
//! Pauses between write steps so host frameworks can process each event.

use std::time::Duration;

use async_trait::async_trait;

use super::WriteStep;

#[async_trait]
pub trait Settle: Send + Sync {
    /// Called once after each completed step.
    async fn settle(&self, after: WriteStep);

    /// Longest single wait this strategy can impose.
    fn max_wait(&self) -> Duration;
}

/// Sleep for a fixed interval after every step.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    interval: Duration,
}

impl FixedDelay {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

#[async_trait]
impl Settle for FixedDelay {
    async fn settle(&self, _after: WriteStep) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }

    fn max_wait(&self) -> Duration {
        self.interval
    }
}
