//! One target's card: local activity plus maintenance flags.

use fwdeck_protocol::{AggregateStatus, InstalledImage, Target};
use fwdeck_update::{reduce, TargetActivity, TargetPhase, TwoPhaseFlag};

/// What changed on a card when one poll was folded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardUpdate {
    /// The phase before this poll; compare with the card's current phase
    /// to detect transitions.
    pub previous_phase: TargetPhase,
    /// A backup the server was running has just finished.
    pub backup_finished: bool,
    /// A restore the server was running has just finished.
    pub restore_finished: bool,
}

/// Per-target console state layered over the polled document.
#[derive(Debug)]
pub struct TargetCard {
    target: Target,
    activity: TargetActivity,
    backup: TwoPhaseFlag,
    restore: TwoPhaseFlag,
    refresh: TwoPhaseFlag,
    phase: TargetPhase,
}

impl TargetCard {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            activity: TargetActivity::new(),
            backup: TwoPhaseFlag::new(),
            restore: TwoPhaseFlag::new(),
            refresh: TwoPhaseFlag::new(),
            phase: TargetPhase::Idle,
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// The phase derived from the most recent poll.
    pub fn phase(&self) -> &TargetPhase {
        &self.phase
    }

    /// Fold a fresh poll into this card.
    pub fn observe(&mut self, status: &AggregateStatus) -> CardUpdate {
        self.activity.observe(status, self.target);

        let slot = status.installed_images.get(self.target);
        let backup_finished = self.backup.observe(slot.backup);
        let restore_finished = self.restore.observe(slot.restore);
        self.refresh.observe(slot.loading);

        let previous_phase = std::mem::replace(
            &mut self.phase,
            reduce(status, self.target, &self.activity),
        );

        CardUpdate {
            previous_phase,
            backup_finished,
            restore_finished,
        }
    }

    /// The installed-image slot this card presents.
    pub fn image<'a>(&self, status: &'a AggregateStatus) -> &'a InstalledImage {
        status.installed_images.get(self.target)
    }

    pub fn activity_mut(&mut self) -> &mut TargetActivity {
        &mut self.activity
    }

    pub fn activity(&self) -> &TargetActivity {
        &self.activity
    }

    pub fn request_backup(&mut self) {
        self.backup.request();
    }

    pub fn request_restore(&mut self) {
        self.restore.request();
    }

    pub fn request_refresh(&mut self) {
        self.refresh.request();
    }

    pub fn backing_up(&self) -> bool {
        self.backup.active()
    }

    pub fn restoring(&self) -> bool {
        self.restore.active()
    }

    pub fn refreshing(&self) -> bool {
        self.refresh.active()
    }

    /// Any maintenance operation in flight on this card.
    pub fn maintenance_active(&self) -> bool {
        self.backing_up() || self.restoring() || self.refreshing()
    }
}
