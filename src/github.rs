use async_trait::async_trait;
use octocrab::models::IssueState as OctoIssueState;
use octocrab::Octocrab;

use crate::error::{ProwError, Result};
use crate::gateway::Gateway;
use crate::types::{PrCommit, PrDetail, PrFile, PrState, PrSummary, RepoIdentity, Reviewer};

pub struct GitHub {
    client: Octocrab,
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub").finish_non_exhaustive()
    }
}

impl From<octocrab::Error> for ProwError {
    fn from(err: octocrab::Error) -> Self {
        ProwError::Api(err.to_string())
    }
}

impl GitHub {
    pub fn new(token: String) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token)
            .build()
            .map_err(|e| ProwError::Auth(e.to_string()))?;

        Ok(Self { client })
    }

    /// Commits on a pull request. The typed endpoint lacks co-author
    /// info, so this goes through the raw API like the file listing.
    async fn list_pr_commits(&self, repo: &RepoIdentity, number: u64) -> Result<Vec<PrCommit>> {
        let url = format!(
            "/repos/{}/{}/pulls/{}/commits?per_page=100",
            repo.owner, repo.name, number
        );
        let response: serde_json::Value = self.client.get(&url, None::<&()>).await?;

        let commits = response
            .as_array()
            .map(|commits| {
                commits
                    .iter()
                    .filter_map(|c| {
                        let message = c.get("commit")?.get("message")?.as_str()?;
                        let mut parts = message.splitn(2, '\n');
                        let headline = parts.next().unwrap_or("").to_string();
                        let body = parts.next().unwrap_or("").trim().to_string();

                        let author = c
                            .get("author")
                            .and_then(|a| a.get("login"))
                            .and_then(|l| l.as_str())
                            .or_else(|| {
                                c.get("commit")
                                    .and_then(|commit| commit.get("author"))
                                    .and_then(|a| a.get("name"))
                                    .and_then(|n| n.as_str())
                            })
                            .unwrap_or("unknown")
                            .to_string();

                        let committed_at = c
                            .get("commit")
                            .and_then(|commit| commit.get("committer"))
                            .and_then(|a| a.get("date"))
                            .and_then(|d| d.as_str())
                            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
                            .map(|d| d.with_timezone(&chrono::Utc))
                            .unwrap_or_else(chrono::Utc::now);

                        Some(PrCommit {
                            headline,
                            body,
                            authors: vec![author],
                            committed_at,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(commits)
    }
}

fn pr_state(merged_at: Option<chrono::DateTime<chrono::Utc>>, state: Option<OctoIssueState>) -> PrState {
    match merged_at {
        Some(_) => PrState::Merged,
        None => match state {
            Some(OctoIssueState::Closed) => PrState::Closed,
            _ => PrState::Open,
        },
    }
}

#[async_trait]
impl Gateway for GitHub {
    async fn list_open_prs(&self, repo: &RepoIdentity) -> Result<Vec<PrSummary>> {
        let prs = self
            .client
            .pulls(&repo.owner, &repo.name)
            .list()
            .state(octocrab::params::State::Open)
            .sort(octocrab::params::pulls::Sort::Created)
            .direction(octocrab::params::Direction::Descending)
            .per_page(50)
            .send()
            .await?;

        let summaries = prs
            .items
            .into_iter()
            .map(|pr| PrSummary {
                number: pr.number,
                title: pr.title.unwrap_or_default(),
                url: pr.html_url.map(|u| u.to_string()).unwrap_or_default(),
                author: pr
                    .user
                    .map(|u| u.login)
                    .unwrap_or_else(|| "unknown".to_string()),
                created_at: pr.created_at.unwrap_or_else(chrono::Utc::now),
                base_branch: pr.base.ref_field,
            })
            .collect();

        Ok(summaries)
    }

    async fn get_pr(&self, repo: &RepoIdentity, number: u64) -> Result<PrDetail> {
        let pr = self.client.pulls(&repo.owner, &repo.name).get(number).await?;

        let state = pr_state(pr.merged_at, pr.state);

        let reviewers = pr
            .requested_reviewers
            .unwrap_or_default()
            .into_iter()
            .map(|user| Reviewer { login: user.login })
            .collect();

        let commits = self.list_pr_commits(repo, number).await?;

        Ok(PrDetail {
            number: pr.number,
            title: pr.title.unwrap_or_default(),
            url: pr.html_url.map(|u| u.to_string()).unwrap_or_default(),
            body: pr.body,
            state,
            author: pr
                .user
                .map(|u| u.login)
                .unwrap_or_else(|| "unknown".to_string()),
            base_branch: pr.base.ref_field,
            head_branch: pr.head.ref_field,
            created_at: pr.created_at.unwrap_or_else(chrono::Utc::now),
            reviewers,
            commits,
            files: Vec::new(),
        })
    }

    async fn list_pr_files(&self, repo: &RepoIdentity, number: u64) -> Result<Vec<PrFile>> {
        let url = format!(
            "/repos/{}/{}/pulls/{}/files?per_page=100",
            repo.owner, repo.name, number
        );
        let response: serde_json::Value = self.client.get(&url, None::<&()>).await?;

        let files = response
            .as_array()
            .map(|files| {
                files
                    .iter()
                    .filter_map(|f| {
                        Some(PrFile {
                            path: f.get("filename")?.as_str()?.to_string(),
                            additions: f.get("additions").and_then(|a| a.as_u64()).unwrap_or(0),
                            deletions: f.get("deletions").and_then(|d| d.as_u64()).unwrap_or(0),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(files)
    }
}
