//! Per-target phase derivation.
//!
//! The server never sends an explicit state machine; each surface derives
//! its phase from the shared snapshot plus its own local activity. The
//! precedence order below is load-bearing: the shared progress record is
//! a single slot, so every rule that reads it must first check the record
//! actually belongs to this target. That filter is what keeps two targets
//! from ever displaying the same copy as their own.

use fwdeck_protocol::{AggregateStatus, Target};

use crate::activity::TargetActivity;

/// Message shown for both local submission failures and server-reported
/// copy errors. Deliberately the same: the operator's remedy is identical.
const ERROR_REASON: &str = "an error occurred, please try again";

/// One target's user-facing phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetPhase {
    Idle,
    /// Local requests in flight, ahead of any server confirmation.
    Uploading,
    /// Submission acknowledged; the server has not yet reported copying.
    AwaitingServerCopy,
    /// The server is copying this target's files into place.
    CopyingToTarget { file_name: String, progress: u8 },
    /// The server is writing the recovery flash, stage by stage.
    CopyingToFlash { stage: String, file_num: u32 },
    /// The server is fetching a repository release for this target.
    DownloadingFromRepository,
    Error { reason: String },
    Success,
}

/// Derive a target's phase. First matching rule wins.
pub fn reduce(status: &AggregateStatus, target: Target, activity: &TargetActivity) -> TargetPhase {
    let cp = &status.copy_progress;

    // 1. Local optimistic window: requests are going out right now.
    if activity.uploading() {
        return TargetPhase::Uploading;
    }

    // 2. Server-side release download, scoped by the shared target slot.
    if status.github_repos.downloading && cp.is_for(target) {
        return TargetPhase::DownloadingFromRepository;
    }

    // 3. Flash writes report through their own flags, flash target only.
    if cp.flash_copying && target == Target::Flash {
        return TargetPhase::CopyingToFlash {
            stage: cp.flash_copy_stage.clone(),
            file_num: cp.flash_copying_file_num,
        };
    }

    // 4. Ordinary copy: ours only if the slot points at us and our own
    //    submission completed.
    if cp.copying && cp.is_for(target) && activity.submitted() {
        return TargetPhase::CopyingToTarget {
            file_name: cp.file_name.clone(),
            progress: cp.progress,
        };
    }

    // 5. Local and server failures collapse into one error phase.
    if (activity.failed() || cp.copy_error) && cp.is_for(target) {
        return TargetPhase::Error {
            reason: ERROR_REASON.to_string(),
        };
    }

    // 6. One-shot success, until dismissed.
    if cp.success && cp.is_for(target) && !activity.success_dismissed() {
        return TargetPhase::Success;
    }

    // Submission confirmed but the server has not picked it up yet.
    if activity.submitted() {
        return TargetPhase::AwaitingServerCopy;
    }

    TargetPhase::Idle
}
