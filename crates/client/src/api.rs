//! Typed wrappers for every write operation the adapter accepts.
//!
//! Paths and bodies match the odin-control parameter tree: operation
//! triggers are `PUT true` against the parameter's path, state writes put
//! the new value itself.

use serde_json::json;

use fwdeck_protocol::{ChecksumEntry, ReleaseSelection, Target};

use crate::endpoint::DeviceEndpoint;
use crate::error::ClientError;

/// Replace the server's checksum list for the next upload.
pub async fn set_checksums(
    endpoint: &dyn DeviceEndpoint,
    checksums: &[ChecksumEntry],
) -> Result<(), ClientError> {
    let body = serde_json::to_value(checksums)?;
    endpoint.put_json("copy_progress/checksums", body).await
}

/// Point the shared progress record at a target.
///
/// The server binds all subsequent progress reporting and checksum
/// verification to the most recently set target, so this must land before
/// the payload does.
pub async fn set_target(endpoint: &dyn DeviceEndpoint, target: Target) -> Result<(), ClientError> {
    endpoint
        .put_json("copy_progress/target", json!(target.as_str()))
        .await
}

/// Ask the server to fetch and install a tagged release.
pub async fn set_release(
    endpoint: &dyn DeviceEndpoint,
    selection: &ReleaseSelection,
) -> Result<(), ClientError> {
    let body = serde_json::to_value(selection)?;
    endpoint
        .put_json("github_repos/release_to_retrieve", body)
        .await
}

/// Re-read one target's image metadata.
pub async fn refresh(endpoint: &dyn DeviceEndpoint, target: Target) -> Result<(), ClientError> {
    endpoint
        .put_json(&format!("installed_images/{target}/refresh"), json!(true))
        .await
}

/// Re-read every target's image metadata.
pub async fn refresh_all(endpoint: &dyn DeviceEndpoint) -> Result<(), ClientError> {
    endpoint
        .put_json("installed_images/refresh_all_image_info", json!(true))
        .await
}

/// Copy a target's image to the backup slot.
pub async fn backup(endpoint: &dyn DeviceEndpoint, target: Target) -> Result<(), ClientError> {
    endpoint
        .put_json(&format!("installed_images/{target}/backup"), json!(true))
        .await
}

/// Restore a target's image from the backup slot.
pub async fn restore(endpoint: &dyn DeviceEndpoint, target: Target) -> Result<(), ClientError> {
    endpoint
        .put_json(&format!("installed_images/{target}/restore"), json!(true))
        .await
}

/// Reboot the board.
pub async fn reboot(endpoint: &dyn DeviceEndpoint) -> Result<(), ClientError> {
    endpoint.put_json("reboot_board/reboot", json!(true)).await
}
