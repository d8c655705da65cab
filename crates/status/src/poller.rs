use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use fwdeck_client::DeviceEndpoint;
use fwdeck_protocol::AggregateStatus;

/// Consecutive poll failures after which a snapshot counts as stale.
pub const STALE_AFTER_FAILURES: u32 = 5;

/// The latest known view of the server's status document.
///
/// A fetch failure never discards the last good document: consumers must
/// read a stale snapshot as "unknown, not failed".
#[derive(Debug, Clone, Default)]
pub struct StatusSnapshot {
    /// Last successfully decoded document, if any poll has succeeded.
    pub status: Option<Arc<AggregateStatus>>,
    /// Failed polls since the last success.
    pub consecutive_failures: u32,
    /// When the last successful poll completed.
    pub last_success: Option<Instant>,
}

impl StatusSnapshot {
    /// Whether the snapshot should be treated as unknown: either no poll
    /// has ever succeeded, or too many have failed since the last one.
    pub fn is_stale(&self) -> bool {
        self.status.is_none() || self.consecutive_failures >= STALE_AFTER_FAILURES
    }
}

/// Owns the background poll task. Dropping the poller (or calling
/// [`StatusPoller::stop`]) cancels the task; no snapshot is published
/// after cancellation.
pub struct StatusPoller {
    rx: watch::Receiver<StatusSnapshot>,
    cancel: CancellationToken,
}

impl StatusPoller {
    /// Spawn the poll loop against an endpoint at a fixed interval.
    ///
    /// The first poll fires immediately; subsequent polls at `interval`.
    pub fn spawn(endpoint: Arc<dyn DeviceEndpoint>, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(StatusSnapshot::default());
        let cancel = CancellationToken::new();

        tokio::spawn(poll_loop(endpoint, interval, tx, cancel.clone()));

        Self { rx, cancel }
    }

    /// A receiver for snapshot updates. Each consumer surface holds its
    /// own clone and awaits changes independently.
    pub fn subscribe(&self) -> watch::Receiver<StatusSnapshot> {
        self.rx.clone()
    }

    /// The most recent snapshot.
    pub fn latest(&self) -> StatusSnapshot {
        self.rx.borrow().clone()
    }

    /// Stop the poll loop. Idempotent.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_loop(
    endpoint: Arc<dyn DeviceEndpoint>,
    interval: Duration,
    tx: watch::Sender<StatusSnapshot>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("status poller cancelled");
                break;
            }
            _ = ticker.tick() => {
                match endpoint.fetch_status().await {
                    Ok(status) => {
                        tx.send_replace(StatusSnapshot {
                            status: Some(Arc::new(status)),
                            consecutive_failures: 0,
                            last_success: Some(Instant::now()),
                        });
                    }
                    Err(e) => {
                        // Keep the last good document; only bump the counter.
                        tx.send_modify(|snapshot| snapshot.consecutive_failures += 1);
                        warn!(error = %e, "status poll failed");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    use fwdeck_client::ClientError;
    use fwdeck_protocol::Target;

    use super::*;

    /// Endpoint replaying a scripted sequence of poll results; once the
    /// script runs out it keeps serving the last scripted document.
    struct ScriptedEndpoint {
        script: Mutex<Vec<Result<AggregateStatus, ClientError>>>,
        fallback: AggregateStatus,
    }

    impl ScriptedEndpoint {
        fn new(script: Vec<Result<AggregateStatus, ClientError>>) -> Self {
            Self {
                script: Mutex::new(script),
                fallback: AggregateStatus::default(),
            }
        }
    }

    impl DeviceEndpoint for ScriptedEndpoint {
        fn fetch_status(
            &self,
        ) -> Pin<Box<dyn Future<Output = Result<AggregateStatus, ClientError>> + Send + '_>>
        {
            let mut script = self.script.lock().unwrap();
            let next = if script.is_empty() {
                Ok(self.fallback.clone())
            } else {
                script.remove(0)
            };
            Box::pin(async move { next })
        }

        fn put_json(
            &self,
            _path: &str,
            _body: serde_json::Value,
        ) -> Pin<Box<dyn Future<Output = Result<(), ClientError>> + Send + '_>> {
            Box::pin(async { Ok(()) })
        }

        fn upload_artifacts(
            &self,
            _parts: Vec<fwdeck_client::UploadPart>,
        ) -> Pin<Box<dyn Future<Output = Result<(), ClientError>> + Send + '_>> {
            Box::pin(async { Ok(()) })
        }
    }

    fn copying_doc(target: Target, progress: u8) -> AggregateStatus {
        let mut doc = AggregateStatus::default();
        doc.copy_progress.target = Some(target);
        doc.copy_progress.copying = true;
        doc.copy_progress.progress = progress;
        doc
    }

    fn server_error() -> ClientError {
        ClientError::Status {
            status: 500,
            body: "internal error".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_first_poll_immediately() {
        let endpoint = Arc::new(ScriptedEndpoint::new(vec![Ok(copying_doc(Target::Sd, 10))]));
        let poller = StatusPoller::spawn(endpoint, Duration::from_millis(1000));
        let mut rx = poller.subscribe();

        rx.changed().await.unwrap();
        let snapshot = rx.borrow().clone();
        let status = snapshot.status.as_ref().unwrap();
        assert!(status.copy_progress.is_for(Target::Sd));
        assert_eq!(snapshot.consecutive_failures, 0);
        assert!(!snapshot.is_stale());
    }

    #[tokio::test(start_paused = true)]
    async fn failure_retains_last_good_snapshot() {
        let endpoint = Arc::new(ScriptedEndpoint::new(vec![
            Ok(copying_doc(Target::Emmc, 40)),
            Err(server_error()),
            Err(server_error()),
        ]));
        let poller = StatusPoller::spawn(endpoint, Duration::from_millis(1000));
        let mut rx = poller.subscribe();

        rx.changed().await.unwrap(); // first good poll
        rx.changed().await.unwrap(); // first failure
        rx.changed().await.unwrap(); // second failure

        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.consecutive_failures, 2);
        // The last good document is still there, progress and all.
        assert_eq!(snapshot.status.as_ref().unwrap().copy_progress.progress, 40);
        assert!(!snapshot.is_stale());
    }

    #[tokio::test(start_paused = true)]
    async fn recovery_resets_failure_count() {
        let endpoint = Arc::new(ScriptedEndpoint::new(vec![
            Ok(copying_doc(Target::Emmc, 40)),
            Err(server_error()),
            Ok(copying_doc(Target::Emmc, 80)),
        ]));
        let poller = StatusPoller::spawn(endpoint, Duration::from_millis(1000));
        let mut rx = poller.subscribe();

        for _ in 0..3 {
            rx.changed().await.unwrap();
        }
        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.consecutive_failures, 0);
        assert_eq!(snapshot.status.unwrap().copy_progress.progress, 80);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_after_enough_failures() {
        let mut script = vec![Ok(AggregateStatus::default())];
        script.extend((0..STALE_AFTER_FAILURES).map(|_| Err(server_error())));
        let endpoint = Arc::new(ScriptedEndpoint::new(script));
        // Fallback after the script would be Ok, so stop watching before that.
        let poller = StatusPoller::spawn(endpoint, Duration::from_millis(1000));
        let mut rx = poller.subscribe();

        for _ in 0..=STALE_AFTER_FAILURES {
            rx.changed().await.unwrap();
        }
        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.consecutive_failures, STALE_AFTER_FAILURES);
        assert!(snapshot.is_stale());
        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn never_polled_is_stale() {
        assert!(StatusSnapshot::default().is_stale());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_updates() {
        let endpoint = Arc::new(ScriptedEndpoint::new(vec![Ok(AggregateStatus::default())]));
        let poller = StatusPoller::spawn(endpoint, Duration::from_millis(1000));
        let mut rx = poller.subscribe();

        rx.changed().await.unwrap();
        poller.stop();
        // Give the loop time to observe cancellation and exit.
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert!(!rx.has_changed().unwrap_or(false));
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_poll_loop() {
        let endpoint = Arc::new(ScriptedEndpoint::new(vec![Ok(AggregateStatus::default())]));
        let poller = StatusPoller::spawn(endpoint, Duration::from_millis(1000));
        let mut rx = poller.subscribe();

        rx.changed().await.unwrap();
        drop(poller);
        tokio::time::sleep(Duration::from_millis(5000)).await;
        // Sender side is gone once the task exits.
        assert!(rx.has_changed().is_err() || !rx.has_changed().unwrap());
    }
}
