//! Ordered submission of one update request.
//!
//! The server binds progress reporting to whichever target was set last
//! and checksum verification to whichever checksum list was set last, so
//! both must be established — and acknowledged — before the payload
//! arrives. Each step waits for the previous acknowledgment; the first
//! failure aborts the remainder.

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use fwdeck_client::{api, DeviceEndpoint};
use fwdeck_protocol::{AggregateStatus, ReleaseSelection, Target};

use crate::activity::TargetActivity;
use crate::artifacts::{ArtifactSet, UpdateRequest};
use crate::error::UpdateError;

/// Step-by-step feedback from a running submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateEvent {
    Started { target: Target },
    ChecksumsComputed { target: Target, count: usize },
    ChecksumsSubmitted { target: Target },
    TargetSubmitted { target: Target },
    PayloadUploaded { target: Target },
    ReleaseRequested { target: Target, repo: String, tag: String },
    Completed { target: Target },
    Failed { target: Target, error: String },
}

/// Submits update requests in the server's required order.
pub struct UploadSequencer {
    events_tx: mpsc::Sender<UpdateEvent>,
    events_rx: Option<mpsc::Receiver<UpdateEvent>>,
}

impl Default for UploadSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadSequencer {
    pub fn new() -> Self {
        let (events_tx, events_rx) = mpsc::channel(64);
        Self {
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Takes the event receiver. Can only be called once. Delivery is
    /// best-effort: with no subscriber draining the channel, events are
    /// dropped once it fills.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<UpdateEvent>> {
        self.events_rx.take()
    }

    /// Whether a new submission may start, given the latest snapshot.
    ///
    /// The shared progress record can only track one operation; while the
    /// server reports any copy in flight the entry point stays closed.
    pub fn can_submit(status: &AggregateStatus) -> bool {
        !status.copy_progress.busy()
    }

    /// Submit one request for one target.
    ///
    /// `status` is the latest polled snapshot, used for the concurrency
    /// guard. `activity` is flipped to `Submitting` before the first
    /// request and settles to `ServerConfirmed` or `Failed` — a started
    /// submission cannot be cancelled, only observed.
    pub async fn submit(
        &self,
        endpoint: &dyn DeviceEndpoint,
        status: &AggregateStatus,
        target: Target,
        request: UpdateRequest,
        activity: &mut TargetActivity,
    ) -> Result<(), UpdateError> {
        if !Self::can_submit(status) {
            return Err(UpdateError::Busy);
        }

        activity.begin_submit();
        self.emit(UpdateEvent::Started { target });

        let result = match request {
            UpdateRequest::FileSystem(artifacts) => {
                self.submit_files(endpoint, target, artifacts).await
            }
            UpdateRequest::RepositoryRelease { repo, tag } => {
                self.submit_release(endpoint, target, repo, tag).await
            }
        };

        match result {
            Ok(()) => {
                activity.confirm();
                info!(%target, "update submission acknowledged");
                self.emit(UpdateEvent::Completed { target });
                Ok(())
            }
            Err(e) => {
                activity.fail();
                error!(%target, error = %e, "update submission failed");
                self.emit(UpdateEvent::Failed {
                    target,
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// File-system update: checksums, target, then the payload — strictly
    /// in that order, each step acknowledged before the next.
    async fn submit_files(
        &self,
        endpoint: &dyn DeviceEndpoint,
        target: Target,
        artifacts: ArtifactSet,
    ) -> Result<(), UpdateError> {
        // 1. Hash the whole batch before anything goes out. Images can be
        //    large, so hashing runs on the blocking pool.
        let (artifacts, checksums) = tokio::task::spawn_blocking(move || {
            let checksums = fwdeck_checksum::digest_batch(
                artifacts
                    .ordered()
                    .into_iter()
                    .map(|a| (a.file_name.as_str(), a.data.as_slice())),
            );
            (artifacts, checksums)
        })
        .await
        .map_err(|e| UpdateError::Upload(format!("hashing task failed: {e}")))?;

        debug!(%target, files = checksums.len(), "checksums computed");
        self.emit(UpdateEvent::ChecksumsComputed {
            target,
            count: checksums.len(),
        });

        // 2. Checksum list first: the server verifies against whatever
        //    list it holds when the payload lands.
        api::set_checksums(endpoint, &checksums).await?;
        self.emit(UpdateEvent::ChecksumsSubmitted { target });

        // 3. Then the target, so the shared progress slot points at this
        //    operation before copying can start.
        api::set_target(endpoint, target).await?;
        self.emit(UpdateEvent::TargetSubmitted { target });

        // 4. Only now the payload.
        endpoint.upload_artifacts(artifacts.into_parts()).await?;
        self.emit(UpdateEvent::PayloadUploaded { target });

        Ok(())
    }

    /// Repository update: the server fetches and verifies the artifact
    /// itself, so there is no local checksum step.
    async fn submit_release(
        &self,
        endpoint: &dyn DeviceEndpoint,
        target: Target,
        repo: String,
        tag: String,
    ) -> Result<(), UpdateError> {
        if repo.is_empty() || tag.is_empty() {
            return Err(UpdateError::EmptySelection);
        }

        api::set_target(endpoint, target).await?;
        self.emit(UpdateEvent::TargetSubmitted { target });

        let selection = ReleaseSelection {
            repo: repo.clone(),
            tag: tag.clone(),
        };
        api::set_release(endpoint, &selection).await?;
        self.emit(UpdateEvent::ReleaseRequested { target, repo, tag });

        Ok(())
    }

    /// Events are best-effort feedback: when nothing is draining the
    /// channel they are dropped, never allowed to stall a submission
    /// between acknowledged steps.
    fn emit(&self, event: UpdateEvent) {
        if let Err(e) = self.events_tx.try_send(event) {
            debug!(error = %e, "dropping update event");
        }
    }
}
