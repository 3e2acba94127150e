use std::sync::Arc;

use async_trait::async_trait;

use crate::{
  api::{OtaApi, Update},
  components::traits::list_data_source::ListDataSource,
  error::Error,
  navigation::Scope,
};

#[derive(Default)]
pub struct UpdateDataSource;

#[async_trait]
impl ListDataSource<Update> for UpdateDataSource {
  fn accepts(&self, scope: &Scope) -> bool {
    matches!(scope, Scope::Updates { .. })
  }

  async fn fetch_items(&self, api: Arc<dyn OtaApi>, scope: &Scope) -> Result<Vec<Update>, Error> {
    match scope {
      Scope::Updates { branch, runtime_version } => api.updates(branch, runtime_version).await,
      _ => Ok(Vec::new()),
    }
  }
}
