use std::{fs, io, path::Path};

use log::debug;
use serde::Deserialize;

const CONFIG_PREFIX: &str = "xsbridge";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[clap(rename_all = "lower")]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum ConfigError {
    #[error("I/O Error")]
    Io(#[from] io::Error),

    #[error("Configuration File Format Error")]
    Toml(#[from] toml::de::Error),

    #[error("Couldn't find the configuration directory")]
    Xdg(#[from] xdg::BaseDirectoriesError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl Config {
    pub(crate) fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub(crate) fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                debug!("Using configuration file {}", path.display());
                Self::from_toml(&content)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No configuration file at {}", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn load() -> Result<Self, ConfigError> {
        let dirs = xdg::BaseDirectories::with_prefix(CONFIG_PREFIX)?;

        match dirs.find_config_file(CONFIG_FILE_NAME) {
            Some(path) => Self::from_path(&path),
            None => {
                debug!("No configuration file found, using defaults.");
                Ok(Self::default())
            }
        }
    }
}
