//! Two-phase tracking for fire-and-forget maintenance triggers.
//!
//! Backup, restore, refresh and reboot are all `PUT true` triggers: the
//! acknowledgment only says the request landed, and the server reports
//! actual progress through its own flag in the next polls. An operation
//! is "busy" from the moment it is requested locally until the server's
//! flag has been seen to clear, covering the gap before the first poll
//! reflects it.

/// Locally-requested / server-active pair for one trigger operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TwoPhaseFlag {
    requested: bool,
    server_active: bool,
}

impl TwoPhaseFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// The trigger was just sent; hold busy until the server reports it.
    pub fn request(&mut self) {
        self.requested = true;
    }

    /// Fold the server's flag from a fresh poll. Once the server reports
    /// the operation running, the local request has been handed over.
    ///
    /// Returns `true` on the completion edge: the server was seen running
    /// the operation and has now stopped.
    pub fn observe(&mut self, server_flag: bool) -> bool {
        if server_flag {
            self.requested = false;
            self.server_active = true;
            false
        } else {
            std::mem::replace(&mut self.server_active, false)
        }
    }

    /// Busy from local request through server completion.
    pub fn active(&self) -> bool {
        self.requested || self.server_active
    }

    /// Drop local state, e.g. when the trigger request itself failed.
    pub fn reset(&mut self) {
        self.requested = false;
        self.server_active = false;
    }
}
