use serde::{Deserialize, Deserializer, Serialize};

use crate::types::Target;

/// Client-computed integrity checksum for one uploaded artifact.
///
/// The server correlates checksums to uploaded files both positionally and
/// by name. The name field is spelled camelCase, unlike the rest of the
/// document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksumEntry {
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// Lower-case hex SHA-256 digest of the file's full content.
    pub checksum: String,
}

/// The shared, single-slot progress record for the operation in flight.
///
/// There is exactly one of these in the status document, whichever target
/// the operation belongs to. Consumers MUST compare their own target with
/// [`CopyProgress::target`] before treating any other field as their own,
/// otherwise they will display a foreign operation's progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyProgress {
    /// Which target the rest of this record describes. Decoded leniently:
    /// an absent, empty, or unknown identifier reads as `None`.
    #[serde(deserialize_with = "lenient_target")]
    pub target: Option<Target>,
    pub copying: bool,
    pub flash_copying: bool,
    pub flash_copy_stage: String,
    /// 1-based index of the flash file being copied (of 3).
    pub flash_copying_file_num: u32,
    pub file_name: String,
    /// Percent complete, 0–100.
    pub progress: u8,
    pub copy_error: bool,
    pub success: bool,
    pub backup_success: bool,
    pub restore_success: bool,
    pub checksums: Vec<ChecksumEntry>,
}

impl CopyProgress {
    /// Whether the shared record currently describes the given target.
    pub fn is_for(&self, target: Target) -> bool {
        self.target == Some(target)
    }

    /// Whether any copy operation is in flight, regardless of target.
    pub fn busy(&self) -> bool {
        self.copying || self.flash_copying
    }
}

fn lenient_target<'de, D>(deserializer: D) -> Result<Option<Target>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_entry_wire_names() {
        let entry = ChecksumEntry {
            file_name: "BOOT.BIN".into(),
            checksum: "ab".repeat(32),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"fileName\":\"BOOT.BIN\""));
        assert!(!json.contains("file_name"));
    }

    #[test]
    fn copy_progress_full_document() {
        let json = r#"{
            "target": "sd",
            "copying": true,
            "flash_copying": false,
            "flash_copy_stage": "",
            "flash_copying_file_num": 0,
            "file_name": "image.ub",
            "progress": 42,
            "copy_error": false,
            "success": false,
            "backup_success": false,
            "restore_success": false,
            "checksums": [{"fileName": "image.ub", "checksum": "00"}]
        }"#;
        let cp: CopyProgress = serde_json::from_str(json).unwrap();
        assert_eq!(cp.target, Some(Target::Sd));
        assert!(cp.copying);
        assert_eq!(cp.progress, 42);
        assert_eq!(cp.checksums[0].file_name, "image.ub");
        assert!(cp.is_for(Target::Sd));
        assert!(!cp.is_for(Target::Emmc));
        assert!(cp.busy());
    }

    #[test]
    fn copy_progress_defaults_on_empty_doc() {
        let cp: CopyProgress = serde_json::from_str("{}").unwrap();
        assert_eq!(cp.target, None);
        assert!(!cp.busy());
        assert!(cp.checksums.is_empty());
        assert_eq!(cp.progress, 0);
    }

    #[test]
    fn empty_target_reads_as_none() {
        let cp: CopyProgress = serde_json::from_str(r#"{"target": ""}"#).unwrap();
        assert_eq!(cp.target, None);
    }

    #[test]
    fn unknown_target_reads_as_none() {
        let cp: CopyProgress = serde_json::from_str(r#"{"target": "nvme"}"#).unwrap();
        assert_eq!(cp.target, None);
        assert!(!cp.is_for(Target::Emmc));
    }

    #[test]
    fn null_target_reads_as_none() {
        let cp: CopyProgress = serde_json::from_str(r#"{"target": null}"#).unwrap();
        assert_eq!(cp.target, None);
    }

    #[test]
    fn flash_fields_decode() {
        let json = r#"{
            "target": "flash",
            "flash_copying": true,
            "flash_copy_stage": "writing kernel",
            "flash_copying_file_num": 2,
            "progress": 60
        }"#;
        let cp: CopyProgress = serde_json::from_str(json).unwrap();
        assert!(cp.flash_copying);
        assert!(cp.busy());
        assert_eq!(cp.flash_copy_stage, "writing kernel");
        assert_eq!(cp.flash_copying_file_num, 2);
    }
}
