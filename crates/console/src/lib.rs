//! Console state for the firmware update surface.
//!
//! Pure state: nothing here performs I/O. The embedding surface feeds
//! polled documents in through [`Console::observe`], reads phases and
//! notices out, and drives the client crates for actual requests.

pub mod card;
pub mod console;
pub mod format;
pub mod notices;

pub use card::{CardUpdate, TargetCard};
pub use console::{CardAction, Console};
pub use format::{format_timestamp, identical_primary_images, image_error};
pub use notices::{Notice, NoticeQueue, Severity};
