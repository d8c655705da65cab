//! Local update artifacts and the request they form.

use std::path::Path;

use fwdeck_client::UploadPart;

use crate::error::UpdateError;

/// A file-system update always carries exactly three artifacts: the boot
/// loader binary, the boot script, and the combined kernel/OS image.
pub const REQUIRED_ARTIFACTS: usize = 3;

/// One selected local file, fully read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalArtifact {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl LocalArtifact {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }

    /// Read one selected file fully into memory, named after its final
    /// path component.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, UpdateError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                UpdateError::InvalidArtifacts(format!("no usable file name: {}", path.display()))
            })?
            .to_string();
        let data = tokio::fs::read(path).await?;
        Ok(Self { file_name, data })
    }
}

/// The three artifacts of a file-system update, in upload order:
/// boot loader, boot script, system image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    boot_loader: LocalArtifact,
    boot_script: LocalArtifact,
    system_image: LocalArtifact,
}

impl ArtifactSet {
    /// Assemble a set from the three artifacts.
    pub fn new(
        boot_loader: LocalArtifact,
        boot_script: LocalArtifact,
        system_image: LocalArtifact,
    ) -> Self {
        Self {
            boot_loader,
            boot_script,
            system_image,
        }
    }

    /// Assemble a set from selected files in presentation order
    /// (boot loader, boot script, system image). Submission is only
    /// enabled once exactly three files are selected; anything else is
    /// rejected here as well.
    pub fn from_files(files: Vec<LocalArtifact>) -> Result<Self, UpdateError> {
        let [boot_loader, boot_script, system_image]: [LocalArtifact; REQUIRED_ARTIFACTS] =
            files.try_into().map_err(|files: Vec<LocalArtifact>| {
                UpdateError::InvalidArtifacts(format!(
                    "expected {REQUIRED_ARTIFACTS} files, got {}",
                    files.len()
                ))
            })?;
        Ok(Self::new(boot_loader, boot_script, system_image))
    }

    /// The artifacts in upload order.
    pub fn ordered(&self) -> [&LocalArtifact; REQUIRED_ARTIFACTS] {
        [&self.boot_loader, &self.boot_script, &self.system_image]
    }

    /// Consume the set into multipart upload parts, preserving order.
    pub fn into_parts(self) -> Vec<UploadPart> {
        vec![
            UploadPart {
                file_name: self.boot_loader.file_name,
                data: self.boot_loader.data,
            },
            UploadPart {
                file_name: self.boot_script.file_name,
                data: self.boot_script.data,
            },
            UploadPart {
                file_name: self.system_image.file_name,
                data: self.system_image.data,
            },
        ]
    }
}

/// One update submission: either local artifacts to upload, or a tagged
/// release for the server to fetch from its repository catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateRequest {
    FileSystem(ArtifactSet),
    RepositoryRelease { repo: String, tag: String },
}
