/// A record that can be listed by the generic list component.
pub trait ManagedItem: Clone + Send + Sync + 'static {
  /// Identifies the record within its scope, used to keep the selection across refreshes.
  fn key(&self) -> &str;
}
