//! SHA-256 checksums for firmware upload artifacts.
//!
//! The server verifies each uploaded file against a checksum list the
//! client submits *before* the payload, correlating entries to files both
//! positionally and by name. Batch hashing therefore preserves input order
//! exactly, and a batch always completes as a whole before the upload
//! sequencer moves on.

use sha2::{Digest, Sha256};

use fwdeck_protocol::ChecksumEntry;

/// Lower-case hex SHA-256 digest of the full content.
pub fn digest(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Hash one named artifact into a wire-ready [`ChecksumEntry`].
pub fn digest_named(file_name: &str, data: &[u8]) -> ChecksumEntry {
    ChecksumEntry {
        file_name: file_name.to_string(),
        checksum: digest(data),
    }
}

/// Hash an ordered batch of named buffers, preserving input order.
pub fn digest_batch<'a, I>(files: I) -> Vec<ChecksumEntry>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    files
        .into_iter()
        .map(|(name, data)| digest_named(name, data))
        .collect()
}
