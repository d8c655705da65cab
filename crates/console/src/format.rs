//! Display formatting for polled image metadata.

use chrono::DateTime;

use fwdeck_protocol::{ImageInfo, InstalledImages};

/// Render a unix-seconds timestamp as `DD/MM/YYYY HH:mm:ss`.
///
/// The server reports zero for images it has never stamped; those and
/// out-of-range values render as `None` rather than an epoch date.
pub fn format_timestamp(secs: i64) -> Option<String> {
    if secs <= 0 {
        return None;
    }
    let dt = DateTime::from_timestamp(secs, 0)?;
    Some(dt.format("%d/%m/%Y %H:%M:%S").to_string())
}

/// The error text to show in place of an image's metadata when the
/// server's last read of it failed.
pub fn image_error(info: &ImageInfo) -> Option<&str> {
    info.error_occurred.then_some(info.error_message.as_str())
}

/// Whether the image the board is running matches the one installed on
/// emmc. After an emmc update the two differ until the board reboots,
/// which is the console's cue to suggest one.
pub fn identical_primary_images(images: &InstalledImages) -> bool {
    let emmc = &images.emmc.info;
    let runtime = &images.runtime.info;
    !emmc.app_name.is_empty()
        && emmc.app_name == runtime.app_name
        && emmc.app_version == runtime.app_version
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_day_first_with_seconds() {
        // 2023-07-22 06:26:40 UTC
        assert_eq!(
            format_timestamp(1690000000).as_deref(),
            Some("22/07/2023 06:26:40")
        );
    }

    #[test]
    fn zero_and_negative_are_unstamped() {
        assert_eq!(format_timestamp(0), None);
        assert_eq!(format_timestamp(-1), None);
    }

    #[test]
    fn matching_images_detected() {
        let mut images = InstalledImages::default();
        images.emmc.info.app_name = "detector".into();
        images.emmc.info.app_version = "2.1".into();
        images.runtime.info.app_name = "detector".into();
        images.runtime.info.app_version = "2.1".into();
        assert!(identical_primary_images(&images));

        images.runtime.info.app_version = "2.0".into();
        assert!(!identical_primary_images(&images));
    }

    #[test]
    fn image_error_only_when_flagged() {
        let mut info = ImageInfo::default();
        assert_eq!(image_error(&info), None);

        info.error_occurred = true;
        info.error_message = "mount failed".into();
        assert_eq!(image_error(&info), Some("mount failed"));
    }

    #[test]
    fn empty_metadata_never_matches() {
        // Both slots blank must not read as "in sync".
        assert!(!identical_primary_images(&InstalledImages::default()));
    }
}
