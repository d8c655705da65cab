use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named storage location holding a firmware image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Emmc,
    Sd,
    Backup,
    Flash,
    Runtime,
}

impl Target {
    /// All targets, in the order the console presents them.
    pub const ALL: [Target; 5] = [
        Target::Emmc,
        Target::Runtime,
        Target::Flash,
        Target::Backup,
        Target::Sd,
    ];

    /// The wire identifier for this target.
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Emmc => "emmc",
            Target::Sd => "sd",
            Target::Backup => "backup",
            Target::Flash => "flash",
            Target::Runtime => "runtime",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a target identifier the console does not know.
#[derive(Debug, thiserror::Error)]
#[error("unknown target identifier: {0}")]
pub struct UnknownTarget(pub String);

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emmc" => Ok(Target::Emmc),
            "sd" => Ok(Target::Sd),
            "backup" => Ok(Target::Backup),
            "flash" => Ok(Target::Flash),
            "runtime" => Ok(Target::Runtime),
            other => Err(UnknownTarget(other.to_string())),
        }
    }
}

/// Metadata the server reports for one installed image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageInfo {
    pub app_name: String,
    pub app_version: String,
    pub platform: String,
    /// Image creation time, unix seconds.
    pub time: i64,
    /// When the server last re-read this image's metadata, unix seconds.
    pub last_refresh: i64,
    pub error_occurred: bool,
    pub error_message: String,
}

/// One target's installed image plus the server-side operation flags.
///
/// Replaced wholesale on every poll; the console never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstalledImage {
    pub info: ImageInfo,
    pub loading: bool,
    pub backup: bool,
    pub restore: bool,
}

/// The five installed-image slots keyed by target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstalledImages {
    pub emmc: InstalledImage,
    pub sd: InstalledImage,
    pub backup: InstalledImage,
    pub flash: InstalledImage,
    pub runtime: InstalledImage,
}

impl InstalledImages {
    /// Look up the slot for a target.
    pub fn get(&self, target: Target) -> &InstalledImage {
        match target {
            Target::Emmc => &self.emmc,
            Target::Sd => &self.sd,
            Target::Backup => &self.backup,
            Target::Flash => &self.flash,
            Target::Runtime => &self.runtime,
        }
    }
}

/// Board reboot state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebootBoard {
    pub is_rebooting: bool,
}

/// Capability flags advertised by the server.
///
/// Advisory only — they control which actions the console *offers*; the
/// server remains the authority on what it accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Restrictions {
    pub allow_reboot: bool,
    pub allow_images_from_repo: bool,
    pub allow_only_emmc_upload: bool,
}
