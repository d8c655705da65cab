//! Repository release selection.
//!
//! The server publishes a catalog of repositories and their release tags
//! in the polled document. Picking a release is a two-step choice, repo
//! then tag, with one carve-out: the recovery flash only ever boots the
//! base platform image, so for the flash target the repository is fixed
//! and the picker only offers its tags.

use fwdeck_protocol::{GithubRepos, Target};

use crate::artifacts::UpdateRequest;
use crate::error::UpdateError;

/// The only repository whose releases may be written to the recovery flash.
pub const FLASH_REPO: &str = "loki";

/// Tracks one in-progress repo/tag choice against the server's catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePicker {
    target: Target,
    repos: Vec<RepoChoice>,
    selected_repo: Option<String>,
    selected_tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RepoChoice {
    name: String,
    tags: Vec<String>,
}

impl ReleasePicker {
    /// Build a picker for `target` from the latest polled catalog.
    ///
    /// For the flash target the catalog is narrowed to [`FLASH_REPO`] and
    /// that repository is pre-selected; the operator only picks a tag.
    pub fn new(target: Target, catalog: &GithubRepos) -> Self {
        let repos: Vec<RepoChoice> = catalog
            .repo_info
            .iter()
            .filter(|r| target != Target::Flash || r.name == FLASH_REPO)
            .map(|r| RepoChoice {
                name: r.name.clone(),
                tags: r.tags.clone(),
            })
            .collect();

        let selected_repo = if target == Target::Flash {
            repos.first().map(|r| r.name.clone())
        } else {
            None
        };

        Self {
            target,
            repos,
            selected_repo,
            selected_tag: None,
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Repository names the operator may choose from.
    pub fn available_repos(&self) -> Vec<&str> {
        self.repos.iter().map(|r| r.name.as_str()).collect()
    }

    /// Whether the repository choice is fixed rather than operator-picked.
    pub fn repo_locked(&self) -> bool {
        self.target == Target::Flash
    }

    pub fn selected_repo(&self) -> Option<&str> {
        self.selected_repo.as_deref()
    }

    pub fn selected_tag(&self) -> Option<&str> {
        self.selected_tag.as_deref()
    }

    /// Choose a repository. Resets any previously chosen tag, since tags
    /// belong to a repository. Unknown names and attempts to move off the
    /// locked flash repository are ignored.
    pub fn select_repo(&mut self, name: &str) {
        if self.repo_locked() && self.selected_repo.as_deref() != Some(name) {
            return;
        }
        if self.repos.iter().any(|r| r.name == name) {
            self.selected_repo = Some(name.to_string());
            self.selected_tag = None;
        }
    }

    /// Tags of the selected repository; empty until a repo is chosen.
    pub fn available_tags(&self) -> &[String] {
        self.selected_repo
            .as_deref()
            .and_then(|name| self.repos.iter().find(|r| r.name == name))
            .map(|r| r.tags.as_slice())
            .unwrap_or(&[])
    }

    /// Choose a tag of the selected repository. Tags not in the catalog
    /// for that repository are ignored.
    pub fn select_tag(&mut self, tag: &str) {
        if self.available_tags().iter().any(|t| t == tag) {
            self.selected_tag = Some(tag.to_string());
        }
    }

    /// Submission is possible once both repo and tag are chosen.
    pub fn can_submit(&self) -> bool {
        self.selected_repo.is_some() && self.selected_tag.is_some()
    }

    /// Turn the completed choice into an update request.
    pub fn request(&self) -> Result<UpdateRequest, UpdateError> {
        match (&self.selected_repo, &self.selected_tag) {
            (Some(repo), Some(tag)) => Ok(UpdateRequest::RepositoryRelease {
                repo: repo.clone(),
                tag: tag.clone(),
            }),
            _ => Err(UpdateError::EmptySelection),
        }
    }
}
