use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Http(#[from] reqwest::Error),
  #[error(transparent)]
  Url(#[from] url::ParseError),
  #[error("{message}")]
  Api { status: StatusCode, message: String },
  #[error("Unexpected response from server: {0}")]
  Decode(#[from] serde_json::Error),
  #[error(transparent)]
  Config(#[from] config::ConfigError),
}
