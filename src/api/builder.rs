use std::path::PathBuf;

use anyhow::Context;
use home::home_dir;

use crate::{sync::SyncRequest, Svnsync};

const DEFAULT_BRANCH: &str = "trunk";
const DEFAULT_SVN_PROGRAM: &str = "svn";

#[derive(Default)]
pub struct SvnsyncBuilder {
    repository_url: Option<String>,
    branch: Option<String>,
    revision: Option<String>,
    workspace: Option<PathBuf>,
    ssh_key: Option<String>,
    ssh_dir: Option<PathBuf>,
    svn_program: Option<String>,
}

impl SvnsyncBuilder {
    /// Base location of the remote repository. Required.
    pub fn repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }

    /// Path segment appended to the repository url on first checkout.
    ///
    /// Defaults to `trunk`.
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Revision the workspace converges to. Required.
    pub fn revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    /// Directory where the working copy lives or will be created. Required.
    pub fn workspace(mut self, path: impl Into<PathBuf>) -> Self {
        self.workspace = Some(path.into());
        self
    }

    /// Private key material for ssh-based repository access.
    pub fn ssh_key(mut self, key: impl Into<String>) -> Self {
        self.ssh_key = Some(key.into());
        self
    }

    /// Directory the credentials are provisioned into.
    ///
    /// Defaults to `$HOME/.ssh`.
    pub fn ssh_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.ssh_dir = Some(path.into());
        self
    }

    /// Name or path of the svn client binary.
    ///
    /// Defaults to `svn`.
    pub fn svn_program(mut self, program: impl Into<String>) -> Self {
        self.svn_program = Some(program.into());
        self
    }

    pub fn try_build(self) -> anyhow::Result<Svnsync> {
        let Self {
            repository_url,
            branch,
            revision,
            workspace,
            ssh_key,
            ssh_dir,
            svn_program,
        } = self;

        let repository_url = repository_url.context("repository url is required")?;
        let revision = revision.context("revision is required")?;
        let workspace = workspace.context("workspace path is required")?;

        let branch = branch.unwrap_or_else(|| DEFAULT_BRANCH.to_owned());

        let ssh_dir = match ssh_dir {
            Some(ssh_dir) => ssh_dir,
            None => default_ssh_directory()?,
        };

        let svn_program = svn_program.unwrap_or_else(|| DEFAULT_SVN_PROGRAM.to_owned());

        Ok(Svnsync {
            request: SyncRequest {
                repository_url,
                branch,
                revision,
                workspace,
            },
            ssh_key,
            ssh_dir,
            svn_program,
        })
    }
}

fn default_ssh_directory() -> anyhow::Result<PathBuf> {
    let mut ssh_dir =
        home_dir().context("Could not find home dir. Please define $HOME env variable.")?;
    ssh_dir.push(".ssh");
    Ok(ssh_dir)
}
