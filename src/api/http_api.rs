use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::types::{Branch, DeleteResult, OtaApi, RuntimeVersion, Update};
use crate::error::Error;

/// `OtaApi` backed by the update server's dashboard REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpOtaApi {
  client: Client,
  base_url: Url,
  token: Option<String>,
}

impl HttpOtaApi {
  pub fn new(base_url: Url, token: Option<String>, timeout: Duration) -> Result<Self, Error> {
    let client = Client::builder()
      .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
      .timeout(timeout)
      .build()?;
    Ok(HttpOtaApi { client, base_url, token: token.filter(|token| !token.is_empty()) })
  }

  pub fn from_url(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, Error> {
    Self::new(Url::parse(base_url)?, token, timeout)
  }

  /// Appends percent-encoded path segments to the base URL.
  fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|_| Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  async fn request<T: DeserializeOwned>(&self, method: Method, url: Url) -> Result<T, Error> {
    debug!("{} {}", method, url);
    let mut request = self.client.request(method, url);
    if let Some(token) = &self.token {
      request = request.bearer_auth(token);
    }
    let response = request.send().await?;
    handle_response(response).await
  }

  /// Listing endpoints answer `null` instead of `[]` when there is nothing to list.
  async fn list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, Error> {
    let items: Option<Vec<T>> = self.request(Method::GET, url).await?;
    Ok(items.unwrap_or_default())
  }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
  let status = response.status();
  let text = response.text().await?;
  if status.is_success() {
    return serde_json::from_str(&text).map_err(Error::from);
  }
  Err(Error::Api { status, message: error_message(status, &text) })
}

fn error_message(status: StatusCode, body: &str) -> String {
  if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str::<serde_json::Value>(body) {
    for key in ["error", "message"] {
      if let Some(serde_json::Value::String(message)) = fields.get(key) {
        if !message.trim().is_empty() {
          return message.trim().to_string();
        }
      }
    }
  }
  let body = body.trim();
  if body.is_empty() { status.to_string() } else { body.to_string() }
}

#[async_trait]
impl OtaApi for HttpOtaApi {
  async fn branches(&self) -> Result<Vec<Branch>, Error> {
    self.list(self.endpoint(&["api", "branches"])?).await
  }

  async fn runtime_versions(&self, branch: &str) -> Result<Vec<RuntimeVersion>, Error> {
    self.list(self.endpoint(&["api", "branch", branch, "runtimeVersions"])?).await
  }

  async fn updates(&self, branch: &str, runtime_version: &str) -> Result<Vec<Update>, Error> {
    self.list(self.endpoint(&["api", "branch", branch, "runtimeVersion", runtime_version, "updates"])?).await
  }

  async fn delete_runtime_version(&self, branch: &str, runtime_version: &str) -> Result<DeleteResult, Error> {
    let url = self.endpoint(&["api", "branch", branch, "runtimeVersion", runtime_version])?;
    let result: DeleteResult = self.request(Method::DELETE, url).await?;
    info!(
      "Deleted {} of {} updates for runtime version {} on branch {}",
      result.deleted_count, result.total_count, runtime_version, branch
    );
    Ok(result)
  }
}
