//! Per-target local submission state.
//!
//! The server only reports its own side of an operation through the
//! polled document; the moments between "operator confirmed" and "first
//! poll reflects it" are covered by this explicit little machine instead
//! of loose optimistic booleans.

use fwdeck_protocol::{AggregateStatus, Target};

/// Local lifecycle of one target's submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing in flight locally.
    #[default]
    Idle,
    /// Requests are being issued; the optimistic "uploading" window.
    Submitting,
    /// Every request was acknowledged; the server owns the rest.
    ServerConfirmed,
    /// A request failed; remaining steps were aborted.
    Failed,
}

/// Local flags the reducer layers over the polled snapshot for one target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetActivity {
    state: SubmissionState,
    success_dismissed: bool,
}

impl TargetActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Mark submission as started. Set before the first request goes out
    /// so the operator sees feedback ahead of the next poll.
    pub fn begin_submit(&mut self) {
        self.state = SubmissionState::Submitting;
    }

    /// All requests acknowledged.
    pub fn confirm(&mut self) {
        self.state = SubmissionState::ServerConfirmed;
    }

    /// A request failed; the submission is over.
    pub fn fail(&mut self) {
        self.state = SubmissionState::Failed;
    }

    /// Operator dismissed the local failure notice.
    pub fn acknowledge_failure(&mut self) {
        if self.state == SubmissionState::Failed {
            self.state = SubmissionState::Idle;
        }
    }

    /// Operator dismissed the success notice. The one-shot stays dismissed
    /// until the polled `success` flag drops and rises again.
    pub fn dismiss_success(&mut self) {
        self.success_dismissed = true;
    }

    pub fn uploading(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn submitted(&self) -> bool {
        self.state == SubmissionState::ServerConfirmed
    }

    pub fn failed(&self) -> bool {
        self.state == SubmissionState::Failed
    }

    pub fn success_dismissed(&self) -> bool {
        self.success_dismissed
    }

    /// Fold a fresh poll into the local state:
    /// - once the server reports a terminal outcome (success or copy
    ///   error) for this target, the confirmed submission is complete;
    /// - when the success flag drops, the one-shot success re-arms.
    pub fn observe(&mut self, status: &AggregateStatus, target: Target) {
        let cp = &status.copy_progress;
        if cp.is_for(target)
            && (cp.success || cp.copy_error)
            && self.state == SubmissionState::ServerConfirmed
        {
            self.state = SubmissionState::Idle;
        }
        if !(cp.is_for(target) && cp.success) {
            self.success_dismissed = false;
        }
    }
}
