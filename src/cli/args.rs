use std::path::PathBuf;

use clap::Parser;

/// Synchronize a build workspace with a revision of an SVN repository.
#[derive(Debug, Parser)]
#[command(version)]
pub struct CliArgs {
    /// Base URL of the remote repository
    #[arg(long, env = "SVNSYNC_URL")]
    pub url: String,
    /// Branch path appended to the repository URL on first checkout
    #[arg(long, env = "SVNSYNC_BRANCH", default_value = "trunk")]
    pub branch: String,
    /// Revision to bring the workspace to
    #[arg(long, env = "SVNSYNC_REVISION")]
    pub revision: String,
    /// Directory where the working copy lives or will be created
    #[arg(long, env = "SVNSYNC_WORKSPACE")]
    pub workspace: PathBuf,
    /// Private key material for ssh-based repository access
    #[arg(long, env = "SVNSYNC_SSH_KEY", hide_env_values = true)]
    pub ssh_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn parses_pipeline_parameters() {
        let args = CliArgs::parse_from([
            "svnsync",
            "--url",
            "https://svn.example.com/repo",
            "--revision",
            "42",
            "--workspace",
            "/ws",
        ]);

        assert_eq!(args.url, "https://svn.example.com/repo");
        assert_eq!(args.branch, "trunk");
        assert_eq!(args.revision, "42");
        assert_eq!(args.workspace, PathBuf::from("/ws"));
        assert_eq!(args.ssh_key, None);
    }

    #[test]
    fn accepts_branch_and_key_overrides() {
        let args = CliArgs::parse_from([
            "svnsync",
            "--url",
            "https://svn.example.com/repo",
            "--branch",
            "branches/release-1.2",
            "--revision",
            "42",
            "--workspace",
            "/ws",
            "--ssh-key",
            "fake key material",
        ]);

        assert_eq!(args.branch, "branches/release-1.2");
        assert_eq!(args.ssh_key.as_deref(), Some("fake key material"));
    }
}
