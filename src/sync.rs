//! Brings a build workspace to a requested SVN revision.
//!
//! The engine inspects the working copy metadata to decide between a fresh
//! checkout and an incremental update, builds the matching `svn` command
//! line, and runs it in the workspace directory. The external client owns
//! all transport and repository state; we only classify and orchestrate.

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use log::{debug, info};
use thiserror::Error;

/// Name of the metadata directory the svn client keeps inside a working copy.
const METADATA_DIR: &str = ".svn";

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Error creating workspace directory {path}: {source}")]
    WorkspaceCreation { path: PathBuf, source: io::Error },
    #[error("Error inspecting working copy metadata at {path}: {source}")]
    WorkspaceInspection { path: PathBuf, source: io::Error },
    #[error("Failed to start {program}: {source}")]
    CommandStart { program: String, source: io::Error },
    #[error("{program} exited with {status}")]
    CommandFailed { program: String, status: ExitStatus },
}

/// Immutable description of one synchronization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    pub repository_url: String,
    pub branch: String,
    pub revision: String,
    pub workspace: PathBuf,
}

impl SyncRequest {
    /// Checkout source, formed by joining the repository url and the branch
    /// with a single slash.
    pub fn checkout_url(&self) -> String {
        format!(
            "{}/{}",
            self.repository_url.trim_end_matches('/'),
            self.branch
        )
    }
}

/// Classification of the workspace, derived from on-disk state on every run
/// and never cached. The metadata directory is the durable state and belongs
/// to the svn client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceState {
    /// No usable working copy, a checkout is needed.
    Fresh,
    /// A working copy exists and can be updated in place.
    Existing,
}

/// The single svn invocation selected for this run. A tagged union rather
/// than a command list, so exactly one of checkout and update can exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncCommand {
    Checkout { url: String, revision: String },
    Update { revision: String },
}

impl SyncCommand {
    pub fn select(state: WorkspaceState, request: &SyncRequest) -> SyncCommand {
        match state {
            WorkspaceState::Fresh => SyncCommand::Checkout {
                url: request.checkout_url(),
                revision: request.revision.clone(),
            },
            WorkspaceState::Existing => SyncCommand::Update {
                revision: request.revision.clone(),
            },
        }
    }

    /// Argument tokens passed to the svn client, program name excluded.
    pub fn args(&self) -> Vec<String> {
        match self {
            SyncCommand::Checkout { url, revision } => vec![
                "checkout".to_owned(),
                "--revision".to_owned(),
                revision.clone(),
                url.clone(),
                ".".to_owned(),
            ],
            SyncCommand::Update { revision } => vec![
                "update".to_owned(),
                "--revision".to_owned(),
                revision.clone(),
            ],
        }
    }
}

/// Decides whether the workspace holds a usable working copy.
///
/// A missing metadata directory is fresh, and so is an empty one, which a
/// previously interrupted checkout can leave behind. Any other read failure
/// (permission denied in particular) is surfaced instead of guessed around,
/// since a checkout into a foreign non-empty directory would fail with a far
/// less useful message.
pub fn classify_workspace(workspace: &Path) -> Result<WorkspaceState, SyncError> {
    let metadata_dir = workspace.join(METADATA_DIR);
    let mut entries = match fs::read_dir(&metadata_dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Ok(WorkspaceState::Fresh)
        }
        Err(error) => {
            return Err(SyncError::WorkspaceInspection {
                path: metadata_dir,
                source: error,
            })
        }
    };
    if entries.next().is_some() {
        Ok(WorkspaceState::Existing)
    } else {
        Ok(WorkspaceState::Fresh)
    }
}

/// Brings `request.workspace` to `request.revision` with a single svn
/// invocation. The workspace directory is created first if missing; state
/// classification happens strictly after that and the selected command runs
/// strictly after classification. No retries and no fallback to the other
/// command variant, the first failure is final.
pub fn synchronize(request: &SyncRequest, program: &str) -> Result<(), SyncError> {
    fs::create_dir_all(&request.workspace).map_err(|source| SyncError::WorkspaceCreation {
        path: request.workspace.clone(),
        source,
    })?;

    let state = classify_workspace(&request.workspace)?;
    debug!(
        "Workspace {} classified as {:?}",
        request.workspace.display(),
        state
    );

    let command = SyncCommand::select(state, request);
    execute(&command, program, &request.workspace)
}

/// Runs the selected command in the workspace directory with inherited
/// stdout/stderr, so downstream log consumers see the raw client output.
fn execute(command: &SyncCommand, program: &str, workspace: &Path) -> Result<(), SyncError> {
    let args = command.args();
    info!("$ {} {}", program, args.join(" "));

    let status = Command::new(program)
        .args(&args)
        .current_dir(workspace)
        .status()
        .map_err(|source| SyncError::CommandStart {
            program: program.to_owned(),
            source,
        })?;

    if !status.success() {
        return Err(SyncError::CommandFailed {
            program: program.to_owned(),
            status,
        });
    }
    Ok(())
}
