use serde::Deserialize;

use crate::error::{ProwError, Result};
use crate::types::RepoIdentity;

/// Resolve the repository to browse. An explicit `--repo OWNER/NAME`
/// wins; otherwise ask `gh` about the current directory, then fall back
/// to parsing the origin remote URL. Failure here is fatal — the event
/// loop never starts without an identity.
pub fn resolve(flag: Option<&str>) -> Result<RepoIdentity> {
    if let Some(spec) = flag {
        return parse_spec(spec);
    }

    if let Some(repo) = from_gh() {
        return Ok(repo);
    }

    if let Some(repo) = from_git_remote() {
        return Ok(repo);
    }

    Err(ProwError::Startup(
        "could not resolve a repository; run inside a clone or pass --repo OWNER/NAME".to_string(),
    ))
}

fn parse_spec(spec: &str) -> Result<RepoIdentity> {
    let mut parts = spec.splitn(2, '/');
    match (parts.next(), parts.next()) {
        (Some(owner), Some(name)) if !owner.is_empty() && !name.is_empty() => {
            Ok(RepoIdentity::new(owner, name))
        }
        _ => Err(ProwError::Startup(format!(
            "invalid repository '{}', expected OWNER/NAME",
            spec
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct GhRepoView {
    name: String,
    owner: GhOwner,
}

#[derive(Debug, Deserialize)]
struct GhOwner {
    login: String,
}

/// `gh repo view` resolves the repo the way the GitHub CLI does,
/// including remotes that are not named "origin".
fn from_gh() -> Option<RepoIdentity> {
    let output = std::process::Command::new("gh")
        .args(["repo", "view", "--json", "name,owner"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let view: GhRepoView = serde_json::from_slice(&output.stdout).ok()?;
    Some(RepoIdentity::new(view.owner.login, view.name))
}

fn from_git_remote() -> Option<RepoIdentity> {
    let output = std::process::Command::new("git")
        .args(["remote", "get-url", "origin"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    parse_remote_url(&url)
}

/// Extract owner/name from SSH (git@host:...), HTTPS, or ssh:// URLs.
fn parse_remote_url(url: &str) -> Option<RepoIdentity> {
    let path = if let Some(rest) = url.strip_prefix("git@") {
        // SSH: git@host:owner/repo.git
        rest.split_once(':')?.1
    } else if url.starts_with("https://") || url.starts_with("http://") {
        // HTTPS: https://host/owner/repo.git
        let without_scheme = url.split("://").nth(1)?;
        without_scheme.split_once('/')?.1
    } else if url.starts_with("ssh://") {
        // SSH: ssh://git@host[:port]/owner/repo.git
        let without_scheme = url.split("://").nth(1)?;
        without_scheme.split_once('/')?.1
    } else {
        return None;
    };

    let path = path.strip_suffix(".git").unwrap_or(path);
    let mut parts = path.splitn(2, '/');
    match (parts.next(), parts.next()) {
        (Some(owner), Some(name)) if !owner.is_empty() && !name.is_empty() => {
            Some(RepoIdentity::new(owner, name))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_spec_owner_name() {
        let repo = parse_spec("octocat/hello-world").unwrap();
        assert_eq!(repo.owner, "octocat");
        assert_eq!(repo.name, "hello-world");
        assert_eq!(repo.full_name, "octocat/hello-world");
    }

    #[test]
    fn parse_spec_rejects_bare_name() {
        assert!(parse_spec("hello-world").is_err());
        assert!(parse_spec("owner/").is_err());
        assert!(parse_spec("/name").is_err());
    }

    #[test]
    fn remote_url_ssh() {
        let repo = parse_remote_url("git@github.com:octocat/hello.git").unwrap();
        assert_eq!(repo.full_name, "octocat/hello");
    }

    #[test]
    fn remote_url_https() {
        let repo = parse_remote_url("https://github.com/octocat/hello.git").unwrap();
        assert_eq!(repo.full_name, "octocat/hello");
    }

    #[test]
    fn remote_url_https_without_suffix() {
        let repo = parse_remote_url("https://github.com/octocat/hello").unwrap();
        assert_eq!(repo.full_name, "octocat/hello");
    }

    #[test]
    fn remote_url_ssh_scheme_with_port() {
        let repo = parse_remote_url("ssh://git@github.com:2222/octocat/hello.git");
        // Port and host live before the first '/', the path after it.
        assert_eq!(repo.unwrap().full_name, "octocat/hello");
    }

    #[test]
    fn remote_url_invalid() {
        assert!(parse_remote_url("not-a-url").is_none());
    }

    #[test]
    fn gh_view_json_shape() {
        let json = r#"{"name":"hello","owner":{"login":"octocat"}}"#;
        let view: GhRepoView = serde_json::from_str(json).unwrap();
        assert_eq!(view.owner.login, "octocat");
        assert_eq!(view.name, "hello");
    }
}
