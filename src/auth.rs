use crate::error::{ProwError, Result};

/// GitHub token: `GITHUB_TOKEN` env var, falling back to the `gh` CLI's
/// stored credentials. No interactive flow — absence is fatal at
/// startup.
pub fn resolve_token() -> Result<String> {
    if let Ok(token) = std::env::var("GITHUB_TOKEN") {
        if !token.is_empty() {
            return Ok(token);
        }
    }

    if let Some(token) = try_cli_token("gh auth token") {
        return Ok(token);
    }

    Err(ProwError::Auth(
        "no GitHub token found; set GITHUB_TOKEN or run `gh auth login`".to_string(),
    ))
}

/// Try to run a CLI command and capture stdout as a token
fn try_cli_token(command: &str) -> Option<String> {
    let output = std::process::Command::new("sh")
        .args(["-c", command])
        .output()
        .ok()?;

    if output.status.success() {
        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !token.is_empty() {
            return Some(token);
        }
    }
    None
}
