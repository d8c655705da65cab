//! The whole console: five target cards, board-level state, notices.

use tracing::info;

use fwdeck_protocol::{AggregateStatus, Restrictions, Target};
use fwdeck_update::{TargetPhase, TwoPhaseFlag};

use crate::card::TargetCard;
use crate::notices::{NoticeQueue, Severity};

/// Actions a target card may offer, subject to server restrictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Refresh,
    UpdateFromFiles,
    UpdateFromRepo,
    BackUp,
    Restore,
}

/// The five target cards, one slot per target like the polled document.
#[derive(Debug)]
struct Cards {
    emmc: TargetCard,
    sd: TargetCard,
    backup: TargetCard,
    flash: TargetCard,
    runtime: TargetCard,
}

impl Cards {
    fn new() -> Self {
        Self {
            emmc: TargetCard::new(Target::Emmc),
            sd: TargetCard::new(Target::Sd),
            backup: TargetCard::new(Target::Backup),
            flash: TargetCard::new(Target::Flash),
            runtime: TargetCard::new(Target::Runtime),
        }
    }

    fn get(&self, target: Target) -> &TargetCard {
        match target {
            Target::Emmc => &self.emmc,
            Target::Sd => &self.sd,
            Target::Backup => &self.backup,
            Target::Flash => &self.flash,
            Target::Runtime => &self.runtime,
        }
    }

    fn get_mut(&mut self, target: Target) -> &mut TargetCard {
        match target {
            Target::Emmc => &mut self.emmc,
            Target::Sd => &mut self.sd,
            Target::Backup => &mut self.backup,
            Target::Flash => &mut self.flash,
            Target::Runtime => &mut self.runtime,
        }
    }
}

/// Top-level console state, fed one polled document at a time.
#[derive(Debug)]
pub struct Console {
    cards: Cards,
    reboot: TwoPhaseFlag,
    notices: NoticeQueue,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        Self {
            cards: Cards::new(),
            reboot: TwoPhaseFlag::new(),
            notices: NoticeQueue::new(),
        }
    }

    pub fn card(&self, target: Target) -> &TargetCard {
        self.cards.get(target)
    }

    pub fn card_mut(&mut self, target: Target) -> &mut TargetCard {
        self.cards.get_mut(target)
    }

    /// Cards in presentation order.
    pub fn cards(&self) -> impl Iterator<Item = &TargetCard> {
        Target::ALL.into_iter().map(|t| self.cards.get(t))
    }

    pub fn notices(&self) -> &NoticeQueue {
        &self.notices
    }

    /// Fold a fresh poll into every card and the board-level flags,
    /// raising a notice for each card that just reached an outcome.
    pub fn observe(&mut self, status: &AggregateStatus) {
        for target in Target::ALL {
            let card = self.cards.get_mut(target);
            let update = card.observe(status);
            let current = card.phase().clone();

            if update.previous_phase != current {
                match &current {
                    TargetPhase::Success => {
                        info!(%target, "update completed");
                        self.notices.push(
                            Severity::Success,
                            format!("{target} update completed"),
                            Some(target),
                        );
                    }
                    TargetPhase::Error { reason } => {
                        self.notices
                            .push(Severity::Error, reason.clone(), Some(target));
                    }
                    _ => {}
                }
            }

            if update.backup_finished {
                self.push_maintenance_outcome(target, "backup", status.copy_progress.backup_success);
            }
            if update.restore_finished {
                self.push_maintenance_outcome(
                    target,
                    "restore",
                    status.copy_progress.restore_success,
                );
            }
        }
        self.reboot.observe(status.reboot_board.is_rebooting);
    }

    fn push_maintenance_outcome(&mut self, target: Target, operation: &str, succeeded: bool) {
        if succeeded {
            self.notices.push(
                Severity::Success,
                format!("{target} {operation} completed"),
                None,
            );
        } else {
            self.notices.push(
                Severity::Error,
                format!("{target} {operation} failed"),
                None,
            );
        }
    }

    /// Dismiss a notice; outcome notices also acknowledge the outcome on
    /// their card so it does not immediately re-raise.
    pub fn dismiss_notice(&mut self, id: u64) {
        if let Some(notice) = self.notices.dismiss(id)
            && let Some(target) = notice.target
        {
            let activity = self.card_mut(target).activity_mut();
            match notice.severity {
                Severity::Success => activity.dismiss_success(),
                Severity::Error => activity.acknowledge_failure(),
                Severity::Info => {}
            }
        }
    }

    /// Whether the update dialog may be opened for any target right now.
    /// The shared progress record tracks one operation, so the entry
    /// point closes while anything is copying.
    pub fn can_open_update(&self, status: &AggregateStatus) -> bool {
        !status.copy_progress.busy()
    }

    /// The actions a card offers, filtered by server restrictions.
    pub fn available_actions(&self, target: Target, restrictions: &Restrictions) -> Vec<CardAction> {
        let mut actions = vec![CardAction::Refresh];

        // The backup slot is written by backing up, never updated directly.
        if target != Target::Backup {
            let upload_allowed = !restrictions.allow_only_emmc_upload || target == Target::Emmc;
            if upload_allowed {
                actions.push(CardAction::UpdateFromFiles);
            }
            if restrictions.allow_images_from_repo {
                actions.push(CardAction::UpdateFromRepo);
            }
        }

        // Backup and restore operate on the primary boot image.
        if target == Target::Emmc {
            actions.push(CardAction::BackUp);
            actions.push(CardAction::Restore);
        }

        actions
    }

    pub fn request_reboot(&mut self) {
        self.reboot.request();
    }

    pub fn rebooting(&self) -> bool {
        self.reboot.active()
    }

    pub fn can_reboot(&self, restrictions: &Restrictions) -> bool {
        restrictions.allow_reboot && !self.rebooting()
    }
}
