use crate::configuration::constants::common::{DEFAULT_ATTACHMENT_TYPE, ENV_PREFIX};
use crate::error::Result;
use crate::model::Label;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use log::LevelFilter;
use mime::Mime;
use serde_derive::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EnvironmentEntry {
    pub name: String,
    pub value: String,
}

/// Recorder settings, read from a YAML/JSON/TOML file and `ALLURE_*` variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    #[serde(with = "crate::configuration::deserialize::level_filter")]
    pub log_level: LevelFilter,
    pub log_output_file: Option<PathBuf>,
    /// Labels added to every case when it starts.
    pub labels: Vec<Label>,
    /// Environment parameters added to every case when it starts.
    pub environment: Vec<EnvironmentEntry>,
    /// Media type of attachments recorded from raw bytes.
    #[serde(with = "crate::configuration::deserialize::media_type")]
    pub attachment_media_type: Mime,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            log_output_file: None,
            labels: Vec::new(),
            environment: Vec::new(),
            attachment_media_type: DEFAULT_ATTACHMENT_TYPE
                .parse()
                .unwrap_or(mime::TEXT_PLAIN),
        }
    }
}

impl Settings {
    pub fn from_file(file: PathBuf) -> Result<Self> {
        Self::build(Config::builder().add_source(File::from(file)))
    }

    pub fn from_content(content: &str, format: FileFormat) -> Result<Self> {
        Self::build(Config::builder().add_source(File::from_str(content, format)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;
        let settings = config.try_deserialize()?;
        debug!("Loaded settings {:#?}", settings);
        Ok(settings)
    }
}
