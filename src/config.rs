use std::{collections::HashMap, path::PathBuf};

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Ambient settings of the tool itself, as opposed to the pipeline
/// parameters passed on the command line.
pub struct SvnsyncConfig {
    pub svn_program: Option<String>,
    pub ssh_dir: Option<PathBuf>,
}

impl SvnsyncConfig {
    pub fn load() -> anyhow::Result<Self> {
        let raw_config = RawConfig::load(None)?;

        Ok(Self {
            svn_program: raw_config.svn.program,
            ssh_dir: raw_config.ssh.dir,
        })
    }
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct RawConfig {
    #[serde(default)]
    svn: SvnConfig,
    #[serde(default)]
    ssh: SshConfig,
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct SvnConfig {
    program: Option<String>,
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct SshConfig {
    dir: Option<PathBuf>,
}

impl RawConfig {
    fn load(env: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                Environment::with_prefix("SVNSYNC")
                    .separator("_")
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }
}
