//! Wire types for the device-management server's status document.
//!
//! The server exposes a single aggregate JSON document that the console
//! polls at a fixed interval. Everything here decodes **tolerantly**: any
//! missing or malformed optional field falls back to a neutral default
//! rather than failing the whole document, because a partial status must
//! render as "unknown", never as an error.

pub mod progress;
pub mod repos;
pub mod status;
pub mod types;

pub use progress::{ChecksumEntry, CopyProgress};
pub use repos::{GithubRepos, ReleaseSelection, RepoInfo};
pub use status::AggregateStatus;
pub use types::{
    ImageInfo, InstalledImage, InstalledImages, RebootBoard, Restrictions, Target, UnknownTarget,
};
