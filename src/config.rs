use std::{path::Path, time::Duration};

use serde::Deserialize;
use tracing::warn;

use crate::{cli::Cli, error::Error, utils::get_config_dir};

const CONFIG: &str = include_str!("../.config/config.json5");

const CONFIG_FILES: [(&str, config::FileFormat); 4] = [
  ("config.json5", config::FileFormat::Json5),
  ("config.json", config::FileFormat::Json),
  ("config.yaml", config::FileFormat::Yaml),
  ("config.toml", config::FileFormat::Toml),
];

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
  pub api_url: String,
  #[serde(default)]
  pub api_token: Option<String>,
  pub request_timeout_secs: u64,
  pub notification_ticks: u16,
}

impl Config {
  pub fn new() -> Result<Self, Error> {
    Self::load(&get_config_dir(), true)
  }

  /// Embedded defaults, then any config file in `config_dir`, then `OTA_DASHBOARD_*` variables.
  pub fn load(config_dir: &Path, with_env: bool) -> Result<Self, Error> {
    let mut builder = config::Config::builder().add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

    let mut found_config = false;
    for (file, format) in &CONFIG_FILES {
      let path = config_dir.join(file);
      if path.exists() {
        found_config = true;
      }
      builder = builder.add_source(config::File::from(path).format(*format).required(false));
    }
    if !found_config {
      warn!("No configuration file found in {}, using defaults", config_dir.display());
    }

    if with_env {
      builder = builder.add_source(config::Environment::with_prefix(&crate::utils::PROJECT_NAME));
    }

    Ok(builder.build()?.try_deserialize()?)
  }

  /// Command line flags win over every other source.
  pub fn with_overrides(mut self, cli: &Cli) -> Self {
    if let Some(api_url) = &cli.api_url {
      self.api_url = api_url.clone();
    }
    if let Some(api_token) = &cli.api_token {
      self.api_token = Some(api_token.clone());
    }
    self
  }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }
}
