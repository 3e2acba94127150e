use std::sync::Arc;

use async_trait::async_trait;

use crate::{
  api::{OtaApi, RuntimeVersion},
  components::traits::list_data_source::ListDataSource,
  error::Error,
  navigation::Scope,
};

#[derive(Default)]
pub struct RuntimeVersionDataSource;

#[async_trait]
impl ListDataSource<RuntimeVersion> for RuntimeVersionDataSource {
  fn accepts(&self, scope: &Scope) -> bool {
    matches!(scope, Scope::RuntimeVersions { .. })
  }

  async fn fetch_items(&self, api: Arc<dyn OtaApi>, scope: &Scope) -> Result<Vec<RuntimeVersion>, Error> {
    match scope.branch() {
      Some(branch) => api.runtime_versions(branch).await,
      None => Ok(Vec::new()),
    }
  }
}
