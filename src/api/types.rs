use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{components::traits::managed_item::ManagedItem, error::Error};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
  #[serde(alias = "branchName")]
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub release_channel: Option<String>,
}

impl Branch {
  pub fn new(name: String) -> Self {
    Branch { name, release_channel: None }
  }
}

impl ManagedItem for Branch {
  fn key(&self) -> &str {
    &self.name
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeVersion {
  pub runtime_version: String,
  pub created_at: DateTime<Utc>,
  pub last_updated_at: DateTime<Utc>,
  pub number_of_updates: u64,
}

impl ManagedItem for RuntimeVersion {
  fn key(&self) -> &str {
    &self.runtime_version
  }
}

/// Target platform of an update. Values the dashboard has no icon for are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
  Ios,
  Android,
  Other(String),
}

impl Platform {
  pub fn as_str(&self) -> &str {
    match self {
      Platform::Ios => "ios",
      Platform::Android => "android",
      Platform::Other(other) => other,
    }
  }
}

impl From<&str> for Platform {
  fn from(value: &str) -> Self {
    match value {
      "ios" => Platform::Ios,
      "android" => Platform::Android,
      other => Platform::Other(other.to_string()),
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Serialize for Platform {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for Platform {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(Platform::from(value.as_str()))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Update {
  #[serde(deserialize_with = "string_or_number")]
  pub update_id: String,
  #[serde(rename = "updateUUID")]
  pub update_uuid: String,
  pub platform: Platform,
  #[serde(default)]
  pub commit_hash: String,
  pub created_at: DateTime<Utc>,
}

impl ManagedItem for Update {
  fn key(&self) -> &str {
    &self.update_uuid
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
  pub deleted_count: u64,
  pub total_count: u64,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Id {
    Text(String),
    Number(serde_json::Number),
  }

  Ok(match Id::deserialize(deserializer)? {
    Id::Text(text) => text,
    Id::Number(number) => number.to_string(),
  })
}

/// The REST surface of the update server that the dashboard reads from.
#[async_trait]
pub trait OtaApi: Send + Sync {
  async fn branches(&self) -> Result<Vec<Branch>, Error>;
  async fn runtime_versions(&self, branch: &str) -> Result<Vec<RuntimeVersion>, Error>;
  async fn updates(&self, branch: &str, runtime_version: &str) -> Result<Vec<Update>, Error>;
  /// Deletes every update of a runtime version, reporting how many were removed.
  async fn delete_runtime_version(&self, branch: &str, runtime_version: &str) -> Result<DeleteResult, Error>;
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn test_branch_accepts_branch_name_alias() {
    let branch: Branch = serde_json::from_str(r#"{"branchName": "main", "releaseChannel": "production"}"#).unwrap();

    assert_eq!(branch, Branch { name: "main".to_string(), release_channel: Some("production".to_string()) });
  }

  #[test]
  fn test_runtime_version_decodes_camel_case() {
    let json = r#"{
      "runtimeVersion": "1.0.0",
      "createdAt": "2024-03-05T14:07:09Z",
      "lastUpdatedAt": "2024-03-06T08:00:00Z",
      "numberOfUpdates": 5
    }"#;
    let runtime_version: RuntimeVersion = serde_json::from_str(json).unwrap();

    assert_eq!(runtime_version.runtime_version, "1.0.0");
    assert_eq!(runtime_version.number_of_updates, 5);
    assert!(runtime_version.last_updated_at >= runtime_version.created_at);
  }

  #[test]
  fn test_update_accepts_numeric_id_and_unknown_platform() {
    let json = r#"{
      "updateId": 1700000000,
      "updateUUID": "5f1c2b7e-9a2d-4c41-8d7e-3a0f1b2c3d4e",
      "platform": "windows",
      "commitHash": "abcdef1234",
      "createdAt": "2024-03-05T14:07:09Z"
    }"#;
    let update: Update = serde_json::from_str(json).unwrap();

    assert_eq!(update.update_id, "1700000000");
    assert_eq!(update.platform, Platform::Other("windows".to_string()));
  }

  #[test]
  fn test_platform_round_trips_known_tags() {
    assert_eq!(Platform::from("ios"), Platform::Ios);
    assert_eq!(Platform::from("android"), Platform::Android);
    assert_eq!(serde_json::to_string(&Platform::Ios).unwrap(), r#""ios""#);
  }

  #[test]
  fn test_delete_result_decodes_counts() {
    let result: DeleteResult = serde_json::from_str(r#"{"deletedCount": 5, "totalCount": 5}"#).unwrap();

    assert_eq!(result, DeleteResult { deleted_count: 5, total_count: 5 });
  }
}
