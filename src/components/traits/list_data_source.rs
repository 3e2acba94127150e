use std::sync::Arc;

use async_trait::async_trait;

use super::managed_item::ManagedItem;
use crate::{api::OtaApi, error::Error, navigation::Scope};

/// Defines the contract for fetching the records (`ManagedItem`s) shown for a scope.
#[async_trait]
pub trait ListDataSource<T: ManagedItem>: Send + Sync + 'static {
  /// Whether this source lists records for the given scope.
  fn accepts(&self, scope: &Scope) -> bool;

  /// Fetches the records of a scope from the update server.
  async fn fetch_items(&self, api: Arc<dyn OtaApi>, scope: &Scope) -> Result<Vec<T>, Error>;
}
