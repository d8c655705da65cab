//! Update orchestration for the firmware console.
//!
//! This crate owns the only real coordination logic in the system:
//!
//! 1. **Sequencer** — submits one update request through the fixed,
//!    ordered chain of server calls (checksums, target, payload — or
//!    target, release selection), aborting on the first failure.
//! 2. **Activity machine** — the explicit per-target local state
//!    (`Idle → Submitting → ServerConfirmed | Failed`) layered over the
//!    polled document, replacing ad hoc optimistic booleans.
//! 3. **Reducer** — a pure function deriving each target's display phase
//!    from the shared snapshot plus local activity, in a strict
//!    precedence order.
//!
//! The server's progress record is a single shared slot: only one
//! operation can be meaningfully tracked at a time, and every consumer
//! must filter it by target before believing it.

pub mod actions;
pub mod activity;
pub mod artifacts;
pub mod error;
pub mod reducer;
pub mod selection;
pub mod sequencer;

pub use actions::TwoPhaseFlag;
pub use activity::{SubmissionState, TargetActivity};
pub use artifacts::{ArtifactSet, LocalArtifact, UpdateRequest, REQUIRED_ARTIFACTS};
pub use error::UpdateError;
pub use reducer::{reduce, TargetPhase};
pub use selection::{ReleasePicker, FLASH_REPO};
pub use sequencer::{UpdateEvent, UploadSequencer};
