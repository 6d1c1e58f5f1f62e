//! Waiting for a submitted transaction to seal.

use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{trace, warn};

use super::types::{AccessError, TransactionResult, TransactionStatus};
use super::AccessApi;
use crate::config::{DEFAULT_POLL_INTERVAL, DEFAULT_SEAL_TIMEOUT};
use crate::types::Identifier;

/// How often to poll and when to give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_SEAL_TIMEOUT,
        }
    }
}

impl PollOptions {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Polls `get_transaction_result` until the status is terminal.
///
/// Returns the final result, which may be [`TransactionStatus::Expired`].
/// Fails with [`AccessError::Timeout`] carrying the last status seen once
/// `timeout` has elapsed. Transport errors end the wait immediately.
pub async fn wait_for_seal<A: AccessApi + ?Sized>(
    api: &A,
    id: &Identifier,
    options: &PollOptions,
) -> Result<TransactionResult, AccessError> {
    let started = Instant::now();
    let mut last_status = TransactionStatus::Unknown;

    loop {
        let result = api.get_transaction_result(id).await?;
        if result.status != last_status {
            trace!(%id, status = %result.status, "transaction status changed");
        }
        if result.status.is_terminal() {
            return Ok(result);
        }
        last_status = result.status;

        let waited = started.elapsed();
        if waited >= options.timeout {
            warn!(%id, %last_status, ?waited, "gave up waiting for seal");
            return Err(AccessError::Timeout {
                id: *id,
                waited,
                last_status,
            });
        }
        // Never sleep past the deadline.
        sleep(options.interval.min(options.timeout - waited)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Account;
    use crate::types::Address;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Replays a fixed sequence of statuses, repeating the last one.
    struct Scripted {
        statuses: Mutex<Vec<TransactionStatus>>,
        polls: AtomicUsize,
    }

    impl Scripted {
        fn new(statuses: &[TransactionStatus]) -> Self {
            Self {
                statuses: Mutex::new(statuses.iter().rev().copied().collect()),
                polls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AccessApi for Scripted {
        async fn submit(&self, _envelope: &[u8]) -> Result<Identifier, AccessError> {
            Ok(Identifier::default())
        }

        async fn get_transaction_result(
            &self,
            _id: &Identifier,
        ) -> Result<TransactionResult, AccessError> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            let mut statuses = self
                .statuses
                .lock()
                .map_err(|_| AccessError::Transport("poisoned".into()))?;
            let status = if statuses.len() > 1 {
                statuses.pop().unwrap_or_default()
            } else {
                statuses.last().copied().unwrap_or_default()
            };
            Ok(TransactionResult {
                status,
                ..Default::default()
            })
        }

        async fn get_account(&self, address: &Address) -> Result<Account, AccessError> {
            Err(AccessError::NotFound(address.to_string()))
        }
    }

    struct Down;

    #[async_trait]
    impl AccessApi for Down {
        async fn submit(&self, _envelope: &[u8]) -> Result<Identifier, AccessError> {
            Err(AccessError::Transport("connection refused".into()))
        }

        async fn get_transaction_result(
            &self,
            _id: &Identifier,
        ) -> Result<TransactionResult, AccessError> {
            Err(AccessError::Transport("connection refused".into()))
        }

        async fn get_account(&self, _address: &Address) -> Result<Account, AccessError> {
            Err(AccessError::Transport("connection refused".into()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn returns_once_sealed() {
        use TransactionStatus::*;
        let api = Scripted::new(&[Pending, Finalized, Executed, Sealed]);
        let result = wait_for_seal(&api, &Identifier::default(), &PollOptions::default())
            .await
            .unwrap();
        assert_eq!(result.status, Sealed);
        assert_eq!(api.polls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_is_returned_not_raised() {
        let api = Scripted::new(&[TransactionStatus::Pending, TransactionStatus::Expired]);
        let result = wait_for_seal(&api, &Identifier::default(), &PollOptions::default())
            .await
            .unwrap();
        assert_eq!(result.status, TransactionStatus::Expired);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_with_last_status() {
        let api = Scripted::new(&[TransactionStatus::Pending, TransactionStatus::Executed]);
        let options = PollOptions::default()
            .with_interval(Duration::from_millis(500))
            .with_timeout(Duration::from_secs(2));

        let err = wait_for_seal(&api, &Identifier::default(), &options)
            .await
            .unwrap_err();
        match err {
            AccessError::Timeout {
                last_status,
                waited,
                ..
            } => {
                assert_eq!(last_status, TransactionStatus::Executed);
                assert!(waited >= Duration::from_secs(2));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        assert!(api.polls.load(Ordering::SeqCst) >= 4);
    }

    #[tokio::test(start_paused = true)]
    async fn long_interval_does_not_overrun_the_deadline() {
        let api = Scripted::new(&[TransactionStatus::Pending]);
        let options = PollOptions::default()
            .with_interval(Duration::from_secs(3))
            .with_timeout(Duration::from_secs(2));

        let err = wait_for_seal(&api, &Identifier::default(), &options)
            .await
            .unwrap_err();
        match err {
            AccessError::Timeout { waited, .. } => {
                assert!(waited >= Duration::from_secs(2));
                assert!(waited < Duration::from_secs(3), "waited {waited:?}");
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        // One poll at the start, one at the deadline.
        assert_eq!(api.polls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_errors_end_the_wait() {
        let err = wait_for_seal(&Down, &Identifier::default(), &PollOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::Transport(_)));
    }
}
