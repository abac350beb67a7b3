//! Timeouts and cancellation for outbound service calls.

use std::{future::Future, time::Duration};

use thiserror::Error;
use tokio::sync::watch;

/// Timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Limits applied to every service call a facade makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallPolicy {
    /// Longest a single call may take.
    pub timeout: Duration,
}

impl CallPolicy {
    /// Policy with the given timeout.
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }
}

/// Outcome of a guarded call that didn't produce a value.
#[derive(Debug, Error)]
pub enum CallError<E> {
    /// The service answered with an error.
    #[error(transparent)]
    Service(E),

    /// No answer within the policy timeout.
    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    /// The caller gave up before an answer arrived.
    #[error("cancelled")]
    Cancelled,
}

/// Trigger side of a cancellation pair.
#[derive(Debug)]
pub struct Canceller(watch::Sender<bool>);

impl Canceller {
    /// Cancel every call waiting on a paired [`CancelSignal`].
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

/// Observer side of a cancellation pair. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CancelSignal(watch::Receiver<bool>);

impl CancelSignal {
    /// A signal that never fires.
    #[must_use]
    pub fn never() -> Self {
        let (_, receiver) = watch::channel(false);

        Self(receiver)
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolves once cancellation is requested. Pends forever if the
    /// [`Canceller`] is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut receiver = self.0.clone();

        if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Create a linked [`Canceller`] and [`CancelSignal`].
#[must_use]
pub fn cancellation() -> (Canceller, CancelSignal) {
    let (sender, receiver) = watch::channel(false);

    (Canceller(sender), CancelSignal(receiver))
}

/// Run `call` under `policy`, giving up early if `cancel` fires.
///
/// # Errors
///
/// Returns [`CallError::Service`] when the call itself fails,
/// [`CallError::TimedOut`] when it outlives the policy timeout and
/// [`CallError::Cancelled`] when cancellation wins the race.
pub async fn guarded<T, E, F>(
    policy: CallPolicy,
    cancel: &CancelSignal,
    call: F,
) -> Result<T, CallError<E>>
where
    F: Future<Output = Result<T, E>>,
{
    if cancel.is_cancelled() {
        return Err(CallError::Cancelled);
    }

    tokio::select! {
        biased;

        () = cancel.cancelled() => Err(CallError::Cancelled),
        result = tokio::time::timeout(policy.timeout, call) => match result {
            Ok(answer) => answer.map_err(CallError::Service),
            Err(_elapsed) => Err(CallError::TimedOut(policy.timeout)),
        },
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Error, PartialEq)]
    #[error("boom")]
    struct Boom;

    #[tokio::test]
    async fn answer_passes_through() -> TestResult {
        let value = guarded(CallPolicy::default(), &CancelSignal::never(), async {
            Ok::<_, Boom>(7)
        })
        .await?;

        assert_eq!(value, 7);

        Ok(())
    }

    #[tokio::test]
    async fn service_error_is_wrapped() {
        let result = guarded(CallPolicy::default(), &CancelSignal::never(), async {
            Err::<(), _>(Boom)
        })
        .await;

        assert!(matches!(result, Err(CallError::Service(Boom))));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_call_times_out() {
        let policy = CallPolicy::with_timeout(Duration::from_millis(50));

        let result = guarded(policy, &CancelSignal::never(), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, Boom>(())
        })
        .await;

        assert!(matches!(result, Err(CallError::TimedOut(timeout)) if timeout == policy.timeout));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_wins_over_slow_call() {
        let (canceller, signal) = cancellation();

        let call = guarded(CallPolicy::default(), &signal, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, Boom>(())
        });

        let (result, ()) = tokio::join!(call, async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        assert!(matches!(result, Err(CallError::Cancelled)));
    }

    #[tokio::test]
    async fn already_cancelled_never_starts() {
        let (canceller, signal) = cancellation();

        canceller.cancel();

        let result = guarded(CallPolicy::default(), &signal, async {
            Ok::<_, Boom>(())
        })
        .await;

        assert!(matches!(result, Err(CallError::Cancelled)));
        assert!(signal.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_canceller_never_cancels() -> TestResult {
        let (canceller, signal) = cancellation();

        drop(canceller);

        let value = guarded(CallPolicy::default(), &signal, async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok::<_, Boom>("done")
        })
        .await?;

        assert_eq!(value, "done");

        Ok(())
    }
}
