use std::{
  collections::HashMap,
  sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;

use super::{Branch, DeleteResult, OtaApi, Platform, RuntimeVersion, Update};
use crate::error::Error;

/// In-memory update server. Deleting a runtime version removes it together with its updates.
#[derive(Debug, Default)]
pub struct MockOtaApi {
  state: Mutex<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
  branches: Vec<Branch>,
  runtime_versions: HashMap<String, Vec<RuntimeVersion>>,
  updates: HashMap<(String, String), Vec<Update>>,
  fail_fetches: Option<String>,
  fail_deletes: Option<String>,
}

pub fn timestamp(value: &str) -> DateTime<Utc> {
  value.parse().unwrap()
}

pub fn runtime_version(label: &str, number_of_updates: u64) -> RuntimeVersion {
  RuntimeVersion {
    runtime_version: label.to_string(),
    created_at: timestamp("2024-03-05T14:07:09Z"),
    last_updated_at: timestamp("2024-03-06T08:00:00Z"),
    number_of_updates,
  }
}

pub fn update(id: usize, platform: &str) -> Update {
  Update {
    update_id: id.to_string(),
    update_uuid: format!("00000000-0000-4000-8000-{id:012}"),
    platform: Platform::from(platform),
    commit_hash: "abcdef1234".to_string(),
    created_at: timestamp("2024-03-05T14:07:09Z"),
  }
}

impl MockOtaApi {
  /// Branch `main` with runtime versions `1.0.0` (2 updates) and `1.1.0` (5 updates), plus an empty `staging`.
  pub fn new() -> Self {
    let api = MockOtaApi::default();
    {
      let mut state = api.lock();
      state.branches = vec![Branch::new("main".to_string()), Branch::new("staging".to_string())];
      state.runtime_versions.insert("main".to_string(), vec![runtime_version("1.0.0", 2), runtime_version("1.1.0", 5)]);
      state.runtime_versions.insert("staging".to_string(), vec![]);
      state.updates.insert(("main".to_string(), "1.0.0".to_string()), (0..2).map(|i| update(i, "ios")).collect());
      state.updates.insert(("main".to_string(), "1.1.0".to_string()), (2..7).map(|i| update(i, "android")).collect());
    }
    api
  }

  fn lock(&self) -> MutexGuard<'_, MockState> {
    self.state.lock().unwrap()
  }

  pub fn set_number_of_updates(&self, branch: &str, label: &str, number_of_updates: u64) {
    let mut state = self.lock();
    if let Some(runtime_versions) = state.runtime_versions.get_mut(branch) {
      for runtime_version in runtime_versions.iter_mut().filter(|rv| rv.runtime_version == label) {
        runtime_version.number_of_updates = number_of_updates;
      }
    }
  }

  pub fn set_updates(&self, branch: &str, label: &str, updates: Vec<Update>) {
    self.lock().updates.insert((branch.to_string(), label.to_string()), updates);
  }

  pub fn fail_fetches_with(&self, message: Option<&str>) {
    self.lock().fail_fetches = message.map(String::from);
  }

  pub fn fail_deletes_with(&self, message: Option<&str>) {
    self.lock().fail_deletes = message.map(String::from);
  }

  fn check_fetch(&self) -> Result<(), Error> {
    match &self.lock().fail_fetches {
      Some(message) => Err(Error::Api { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.clone() }),
      None => Ok(()),
    }
  }
}

#[async_trait]
impl OtaApi for MockOtaApi {
  async fn branches(&self) -> Result<Vec<Branch>, Error> {
    self.check_fetch()?;
    Ok(self.lock().branches.clone())
  }

  async fn runtime_versions(&self, branch: &str) -> Result<Vec<RuntimeVersion>, Error> {
    self.check_fetch()?;
    Ok(self.lock().runtime_versions.get(branch).cloned().unwrap_or_default())
  }

  async fn updates(&self, branch: &str, runtime_version: &str) -> Result<Vec<Update>, Error> {
    self.check_fetch()?;
    Ok(self.lock().updates.get(&(branch.to_string(), runtime_version.to_string())).cloned().unwrap_or_default())
  }

  async fn delete_runtime_version(&self, branch: &str, runtime_version: &str) -> Result<DeleteResult, Error> {
    let mut state = self.lock();
    if let Some(message) = &state.fail_deletes {
      return Err(Error::Api { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.clone() });
    }
    if let Some(runtime_versions) = state.runtime_versions.get_mut(branch) {
      runtime_versions.retain(|rv| rv.runtime_version != runtime_version);
    }
    let removed = state.updates.remove(&(branch.to_string(), runtime_version.to_string())).unwrap_or_default();
    let count = removed.len() as u64;
    Ok(DeleteResult { deleted_count: count, total_count: count })
  }
}
