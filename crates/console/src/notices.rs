//! Operator notices.
//!
//! A flat queue of dismissible messages. Ids are monotonic per queue so a
//! dismissal always names exactly one notice, even after the queue has
//! churned.

use fwdeck_protocol::Target;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// One dismissible message, optionally tied to a target's outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub severity: Severity,
    pub text: String,
    /// Set when dismissing this notice should also acknowledge the
    /// outcome on the target it reports.
    pub target: Option<Target>,
}

/// Ordered queue of active notices, oldest first.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    next_id: u64,
    notices: Vec<Notice>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        severity: Severity,
        text: impl Into<String>,
        target: Option<Target>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.notices.push(Notice {
            id,
            severity,
            text: text.into(),
            target,
        });
        id
    }

    /// Remove a notice by id, returning it so the caller can react to
    /// what was dismissed. Unknown ids are a no-op.
    pub fn dismiss(&mut self, id: u64) -> Option<Notice> {
        let index = self.notices.iter().position(|n| n.id == id)?;
        Some(self.notices.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
