use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// The repository being browsed, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoIdentity {
    pub owner: String,
    pub name: String,
    pub full_name: String,
}

impl RepoIdentity {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        let owner = owner.into();
        let name = name.into();
        let full_name = format!("{}/{}", owner, name);
        Self {
            owner,
            name,
            full_name,
        }
    }
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrState {
    Open,
    Closed,
    Merged,
}

impl fmt::Display for PrState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrState::Open => write!(f, "Open"),
            PrState::Closed => write!(f, "Closed"),
            PrState::Merged => write!(f, "Merged"),
        }
    }
}

/// One row of the pull request list.
#[derive(Debug, Clone, PartialEq)]
pub struct PrSummary {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub base_branch: String,
}

/// A reviewer whose review was requested on a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reviewer {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrCommit {
    pub headline: String,
    pub body: String,
    pub authors: Vec<String>,
    pub committed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrFile {
    pub path: String,
    pub additions: u64,
    pub deletions: u64,
}

/// The fully hydrated pull request shown in the detail view.
/// At most one of these is alive at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct PrDetail {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub body: Option<String>,
    pub state: PrState,
    pub author: String,
    pub base_branch: String,
    pub head_branch: String,
    pub created_at: DateTime<Utc>,
    pub reviewers: Vec<Reviewer>,
    pub commits: Vec<PrCommit>,
    pub files: Vec<PrFile>,
}

/// Recent dates render as a relative phrase, older ones as DD-MM-YYYY.
/// The cutoff is 3 days.
pub fn format_created_at(now: DateTime<Utc>, created: DateTime<Utc>) -> String {
    let age = now.signed_duration_since(created);

    if age >= Duration::days(3) {
        return created.format("%d-%m-%Y").to_string();
    }

    if age.num_minutes() < 1 {
        return "just now".to_string();
    }
    if age.num_hours() < 1 {
        let m = age.num_minutes();
        return format!("{} minute{} ago", m, if m == 1 { "" } else { "s" });
    }
    if age.num_days() < 1 {
        let h = age.num_hours();
        return format!("{} hour{} ago", h, if h == 1 { "" } else { "s" });
    }
    let d = age.num_days();
    format!("{} day{} ago", d, if d == 1 { "" } else { "s" })
}
