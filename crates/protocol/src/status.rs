use serde::{Deserialize, Serialize};

use crate::progress::CopyProgress;
use crate::repos::GithubRepos;
use crate::types::{InstalledImages, RebootBoard, Restrictions};

/// The single aggregate document the console polls from the server.
///
/// Every field is defaulted so a partial or older-server document still
/// decodes; readers treat missing state as idle, not as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateStatus {
    pub installed_images: InstalledImages,
    pub copy_progress: CopyProgress,
    pub reboot_board: RebootBoard,
    pub github_repos: GithubRepos,
    pub restrictions: Restrictions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Target;

    #[test]
    fn decodes_empty_document() {
        let status: AggregateStatus = serde_json::from_str("{}").unwrap();
        assert_eq!(status.copy_progress.target, None);
        assert!(!status.reboot_board.is_rebooting);
        assert!(status.github_repos.repo_info.is_empty());
    }

    #[test]
    fn decodes_representative_document() {
        let json = r#"{
            "installed_images": {
                "emmc": {
                    "info": {"app_name": "detector", "app_version": "2.1", "platform": "zynqmp",
                             "time": 1690000000, "last_refresh": 1690000500,
                             "error_occurred": false, "error_message": ""},
                    "loading": false, "backup": false, "restore": false
                },
                "sd": {"info": {"app_name": "detector", "app_version": "2.0"}}
            },
            "copy_progress": {"target": "emmc", "copying": true, "progress": 10,
                              "file_name": "BOOT.BIN"},
            "reboot_board": {"is_rebooting": false},
            "github_repos": {"repo_info": [{"name": "loki", "tags": ["v2.1"]}],
                             "downloading": false},
            "restrictions": {"allow_reboot": true, "allow_images_from_repo": true,
                             "allow_only_emmc_upload": false}
        }"#;
        let status: AggregateStatus = serde_json::from_str(json).unwrap();
        assert_eq!(
            status.installed_images.get(Target::Emmc).info.app_version,
            "2.1"
        );
        assert_eq!(status.installed_images.get(Target::Sd).info.app_version, "2.0");
        // Slots absent from the document read as defaults.
        assert!(status.installed_images.get(Target::Flash).info.app_name.is_empty());
        assert!(status.copy_progress.is_for(Target::Emmc));
        assert!(status.restrictions.allow_reboot);
        assert_eq!(status.github_repos.repo_info[0].name, "loki");
    }

    #[test]
    fn unknown_extra_fields_are_ignored() {
        let json = r#"{"loki_update_version": "0.1.0", "server_uptime": 12.5}"#;
        let status: AggregateStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status, AggregateStatus::default());
    }
}
