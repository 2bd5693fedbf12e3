use async_trait::async_trait;

use crate::error::Result;
use crate::types::{PrDetail, PrFile, PrSummary, RepoIdentity};

/// Read-only data access boundary. All operations take the repository
/// identity resolved at startup; none of them mutate remote state.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Open pull requests, newest first, bounded to one page.
    async fn list_open_prs(&self, repo: &RepoIdentity) -> Result<Vec<PrSummary>>;

    /// One pull request hydrated with reviewers and commits. Changed
    /// files come from `list_pr_files`.
    async fn get_pr(&self, repo: &RepoIdentity, number: u64) -> Result<PrDetail>;

    /// Per-file change stats for a pull request.
    async fn list_pr_files(&self, repo: &RepoIdentity, number: u64) -> Result<Vec<PrFile>>;
}
