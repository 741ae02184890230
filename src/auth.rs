//! Provisions ssh credentials for the svn client's transport layer.
//!
//! Builds run non-interactively in throwaway environments, so the written
//! client configuration disables strict host key checking. That is a
//! deliberate relaxation for first contact with hosts no known_hosts file
//! covers; it is not a sensible default outside ephemeral builders.

use std::{
    fs::{self, OpenOptions, Permissions},
    io::{self, Write},
    os::unix::fs::{OpenOptionsExt, PermissionsExt},
    path::{Path, PathBuf},
};

use log::{debug, info};
use thiserror::Error;

/// Mode of the credentials directory, owner only.
pub const SSH_DIR_MODE: u32 = 0o700;
/// Mode of the private key and config files, owner read/write only.
pub const KEY_FILE_MODE: u32 = 0o600;

const CONFIG_FILE_NAME: &str = "config";
const KEY_FILE_NAME: &str = "id_rsa";
const CLIENT_CONFIG: &str = "StrictHostKeyChecking no\n";

#[derive(Error, Debug)]
#[error("Error provisioning ssh credentials at {path}: {source}")]
pub struct ProvisionError {
    path: PathBuf,
    source: io::Error,
}

/// Writes the private key material and client configuration into `ssh_dir`,
/// creating the directory if needed. With no key material this is a no-op:
/// the build either targets an anonymous repository or the image already
/// carries credentials.
///
/// Must complete before any svn command runs, since the client consults the
/// key mid-operation. Every filesystem failure here is fatal.
pub fn provision_ssh_key(key: Option<&str>, ssh_dir: &Path) -> Result<(), ProvisionError> {
    let Some(key) = key.filter(|key| !key.is_empty()) else {
        debug!("No private key material provided, skipping credential provisioning");
        return Ok(());
    };

    match ssh_key::PrivateKey::from_openssh(key) {
        Ok(parsed) => debug!("Provisioning {} private key", parsed.algorithm()),
        Err(error) => debug!("Key material is not OpenSSH-encoded ({error}), writing verbatim"),
    }

    fs::create_dir_all(ssh_dir)
        .and_then(|()| fs::set_permissions(ssh_dir, Permissions::from_mode(SSH_DIR_MODE)))
        .map_err(|source| ProvisionError {
            path: ssh_dir.to_path_buf(),
            source,
        })?;

    write_private(&ssh_dir.join(CONFIG_FILE_NAME), CLIENT_CONFIG)?;
    write_private(&ssh_dir.join(KEY_FILE_NAME), key)?;

    info!("Provisioned ssh credentials in {}", ssh_dir.display());
    Ok(())
}

fn write_private(path: &Path, contents: &str) -> Result<(), ProvisionError> {
    fn write(path: &Path, contents: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(KEY_FILE_MODE)
            .open(path)?;
        file.write_all(contents.as_bytes())?;
        // mode() only applies on creation, enforce it for pre-existing files
        fs::set_permissions(path, Permissions::from_mode(KEY_FILE_MODE))
    }

    write(path, contents).map_err(|source| ProvisionError {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn mode_of(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn absent_key_writes_nothing() {
        let root = TempDir::new().unwrap();
        let ssh_dir = root.path().join("ssh");

        provision_ssh_key(None, &ssh_dir).unwrap();

        assert!(!ssh_dir.exists());
    }

    #[test]
    fn empty_key_writes_nothing() {
        let root = TempDir::new().unwrap();
        let ssh_dir = root.path().join("ssh");

        provision_ssh_key(Some(""), &ssh_dir).unwrap();

        assert!(!ssh_dir.exists());
    }

    #[test]
    fn key_material_lands_with_restrictive_modes() {
        let root = TempDir::new().unwrap();
        let ssh_dir = root.path().join("ssh");

        provision_ssh_key(Some("fake key material"), &ssh_dir).unwrap();

        assert_eq!(mode_of(&ssh_dir), SSH_DIR_MODE);
        assert_eq!(mode_of(&ssh_dir.join("id_rsa")), KEY_FILE_MODE);
        assert_eq!(mode_of(&ssh_dir.join("config")), KEY_FILE_MODE);
        assert_eq!(
            fs::read_to_string(ssh_dir.join("id_rsa")).unwrap(),
            "fake key material"
        );
    }

    #[test]
    fn client_config_disables_host_key_checking() {
        let root = TempDir::new().unwrap();
        let ssh_dir = root.path().join("ssh");

        provision_ssh_key(Some("fake key material"), &ssh_dir).unwrap();

        assert_eq!(
            fs::read_to_string(ssh_dir.join("config")).unwrap(),
            "StrictHostKeyChecking no\n"
        );
    }

    #[test]
    fn reprovisioning_overwrites_the_previous_key() {
        let root = TempDir::new().unwrap();
        let ssh_dir = root.path().join("ssh");

        provision_ssh_key(Some("old key"), &ssh_dir).unwrap();
        provision_ssh_key(Some("new key"), &ssh_dir).unwrap();

        assert_eq!(
            fs::read_to_string(ssh_dir.join("id_rsa")).unwrap(),
            "new key"
        );
        assert_eq!(mode_of(&ssh_dir.join("id_rsa")), KEY_FILE_MODE);
    }
}
