use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::executor::handlers::HandlerError;

/// Cancellation token plus optional run deadline, checked between nodes and raced
/// against blocking handler work.
pub(crate) struct Interrupt {
    cancel: CancellationToken,
    deadline: Option<Instant>,
    timeout: Option<Duration>,
}

impl Interrupt {
    pub(crate) fn new(cancel: CancellationToken, timeout: Option<Duration>) -> Self {
        Self {
            cancel,
            deadline: timeout.map(|t| Instant::now() + t),
            timeout,
        }
    }

    pub(crate) fn check(&self) -> Option<HandlerError> {
        if self.cancel.is_cancelled() {
            return Some(HandlerError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(self.timed_out()),
            _ => None,
        }
    }

    pub(crate) async fn guard<T, F>(&self, fut: F) -> Result<T, HandlerError>
    where
        F: Future<Output = T>,
    {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(HandlerError::Cancelled),
            _ = deadline => Err(self.timed_out()),
            out = fut => Ok(out),
        }
    }

    fn timed_out(&self) -> HandlerError {
        let ms = self.timeout.map(|t| t.as_millis() as u64).unwrap_or_default();
        HandlerError::TimedOut(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn guard_passes_through_completed_work() {
        let interrupt = Interrupt::new(CancellationToken::new(), None);
        assert_eq!(interrupt.guard(async { 7 }).await.unwrap(), 7);
        assert!(interrupt.check().is_none());
    }

    #[tokio::test]
    async fn guard_observes_cancellation() {
        let token = CancellationToken::new();
        let interrupt = Interrupt::new(token.clone(), None);
        token.cancel();
        let err = interrupt
            .guard(std::future::pending::<()>())
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::Cancelled));
        assert!(matches!(interrupt.check(), Some(HandlerError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn guard_enforces_deadline() {
        let interrupt = Interrupt::new(CancellationToken::new(), Some(Duration::from_millis(250)));
        let err = interrupt
            .guard(tokio::time::sleep(Duration::from_secs(60)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "execution timed out after 250ms");
    }
}
