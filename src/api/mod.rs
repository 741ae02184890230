use std::path::PathBuf;

use crate::{auth, sync, sync::SyncRequest};

mod builder;

pub use builder::SvnsyncBuilder;

/// One configured synchronization run.
pub struct Svnsync {
    request: SyncRequest,
    ssh_key: Option<String>,
    ssh_dir: PathBuf,
    svn_program: String,
}

impl Svnsync {
    pub fn builder() -> SvnsyncBuilder {
        SvnsyncBuilder::default()
    }

    /// Provisions transport credentials, then brings the workspace to the
    /// requested revision. The order is fixed: the svn client may consult
    /// the key mid-operation, so it has to be on disk before the first
    /// command starts.
    pub fn sync(&self) -> anyhow::Result<()> {
        auth::provision_ssh_key(self.ssh_key.as_deref(), &self.ssh_dir)?;
        sync::synchronize(&self.request, &self.svn_program)?;
        Ok(())
    }
}
