//! Status polling for the firmware console.
//!
//! The server offers no push channel; all reconciliation is driven by a
//! fixed-interval `GET` of the aggregate status document. The poller
//! publishes each successfully decoded document as an immutable snapshot;
//! consumers reduce it into per-target display state and never block on
//! the poll loop.

mod poller;

pub use poller::{StatusPoller, StatusSnapshot, STALE_AFTER_FAILURES};
