//! Cancellable pacing for algorithm steps.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Outcome of a [`StepClock::wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full duration elapsed
    Completed,
    /// Cancellation was observed before the duration elapsed
    Cancelled,
}

/// Cooperative cancellation flag shared between a run and its owner.
///
/// Cloning hands out another observer of the same flag. Once cancelled, a
/// token stays cancelled.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Create a fresh, uncancelled token.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self { tx: Arc::new(tx), rx }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        let _ = self.tx.send_replace(true);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancellation is requested; immediately if it already
    /// was.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Paces one run: suspends between steps, cut short by cancellation.
#[derive(Debug, Clone)]
pub struct StepClock {
    token: CancelToken,
}

impl StepClock {
    /// Create a clock observing the given token.
    pub fn new(token: CancelToken) -> Self {
        Self { token }
    }

    /// Suspend for `duration`, or until cancellation, whichever comes
    /// first.
    ///
    /// The token is checked before the timer is armed, and the timer is
    /// dropped on either exit; nothing stays scheduled after return.
    pub async fn wait(&self, duration: Duration) -> WaitOutcome {
        if self.token.is_cancelled() {
            return WaitOutcome::Cancelled;
        }
        tokio::select! {
            _ = self.token.cancelled() => WaitOutcome::Cancelled,
            _ = tokio::time::sleep(duration) => WaitOutcome::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn wait_runs_to_completion() {
        let clock = StepClock::new(CancelToken::new());
        let outcome = clock.wait(Duration::from_millis(10)).await;
        assert_eq!(outcome, WaitOutcome::Completed);
    }

    #[tokio::test]
    async fn cancellation_cuts_a_wait_short() {
        let token = CancelToken::new();
        let clock = StepClock::new(token.clone());

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let started = Instant::now();
        let outcome = clock.wait(Duration::from_secs(30)).await;
        assert_eq!(outcome, WaitOutcome::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn cancelled_token_resolves_immediately() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel(); // idempotent
        assert!(token.is_cancelled());

        let clock = StepClock::new(token);
        let outcome = clock.wait(Duration::from_secs(30)).await;
        assert_eq!(outcome, WaitOutcome::Cancelled);
    }
}
