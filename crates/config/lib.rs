use log::info;
use serde::Deserialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_FILENAME: &str = ".bike-dash.yml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Shown in the dashboard header.
    pub title: String,
    /// Daily dataset csv.
    pub source: PathBuf,
    /// table | polar | csv | json
    pub output: String,
    /// Where the csv output writes one file per table.
    pub report_dir: PathBuf,
    /// Unknown month keys fail the run instead of being dropped.
    pub strict_months: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            title: "Putry Bike Rental".to_string(),
            source: PathBuf::from("dashboard/days_df.csv"),
            output: "table".to_string(),
            report_dir: PathBuf::from("report"),
            strict_months: false,
        }
    }
}

impl Config {
    /// Load `filename`; a missing file gives the defaults.
    pub fn new<P: AsRef<Path>>(filename: P) -> Result<Config, ConfigError> {
        let path = filename.as_ref();
        let reader = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("config {:?} not found, using defaults", path);
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: Config = serde_yaml::from_reader(reader)?;
        info!("config loaded: {:?}", path);
        Ok(config)
    }

    pub fn from_str(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }
}
