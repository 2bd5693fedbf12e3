use std::process::Command;

use crate::error::{ProwError, Result};
use crate::types::RepoIdentity;

/// Build the `gh pr diff` invocation for a pull request.
fn diff_command(repo: &RepoIdentity, number: u64) -> Command {
    let mut cmd = Command::new("gh");
    cmd.args(["pr", "diff", &number.to_string(), "-R", &repo.full_name]);
    cmd
}

/// Show a pull request's diff with the terminal handed over to the
/// child process. Must be called with raw mode disabled and the
/// alternate screen left; blocks until the child exits.
pub fn show_diff(repo: &RepoIdentity, number: u64) -> Result<()> {
    let status = diff_command(repo, number).status()?;
    if !status.success() {
        return Err(ProwError::Process(format!(
            "gh pr diff exited with {}",
            status
        )));
    }
    Ok(())
}
