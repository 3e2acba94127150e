use std::sync::Arc;

use async_trait::async_trait;

use crate::{
  api::{Branch, OtaApi},
  components::traits::list_data_source::ListDataSource,
  error::Error,
  navigation::Scope,
};

#[derive(Default)]
pub struct BranchDataSource;

#[async_trait]
impl ListDataSource<Branch> for BranchDataSource {
  fn accepts(&self, scope: &Scope) -> bool {
    matches!(scope, Scope::Branches)
  }

  async fn fetch_items(&self, api: Arc<dyn OtaApi>, _scope: &Scope) -> Result<Vec<Branch>, Error> {
    api.branches().await
  }
}
