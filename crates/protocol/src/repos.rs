use serde::{Deserialize, Serialize};

/// One catalog entry for repository-based updates: a source repository
/// and the release tags the server can fetch from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoInfo {
    pub name: String,
    pub tags: Vec<String>,
}

/// The repository catalog plus the server-side download flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubRepos {
    pub repo_info: Vec<RepoInfo>,
    pub downloading: bool,
}

impl GithubRepos {
    /// Look up a catalog entry by repository name.
    pub fn find(&self, name: &str) -> Option<&RepoInfo> {
        self.repo_info.iter().find(|r| r.name == name)
    }
}

/// Body of `PUT github_repos/release_to_retrieve`: which tagged release
/// the server should fetch and install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSelection {
    pub repo: String,
    pub tag: String,
}
