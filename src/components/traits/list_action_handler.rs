use crossterm::event::KeyEvent;

use super::managed_item::ManagedItem;
use crate::{
  action::Action,
  components::shared::{delete_dialog::DeleteTarget, table::Column},
  navigation::Scope,
};

/// Defines the contract for the parts of a list that depend on the record type:
/// its columns, where its rows lead and which keys it reacts to.
pub trait ListActionHandler<T: ManagedItem>: Send + Sync + 'static {
  /// Title of the table block.
  fn title(&self) -> &'static str;

  /// Column configuration handed to the table renderer.
  fn columns(&self) -> Vec<Column<T>>;

  /// Scope opened when the selected record is activated, if the record can be drilled into.
  fn drill_down(&self, _scope: &Scope, _item: &T) -> Option<Scope> {
    None
  }

  /// Records whose deletion must be confirmed return the target the confirmation is about.
  fn delete_target(&self, _scope: &Scope, _item: &T) -> Option<DeleteTarget> {
    None
  }

  /// Maps a key event to an Action specific to this list type.
  /// Navigation keys are handled by the generic component before this is called.
  fn handle_key_event(&self, key: KeyEvent, selected_item: Option<&T>) -> Option<Action>;

  /// Provides the list of keybinding instructions for the footer.
  fn get_instructions(&self, selected_item: Option<&T>) -> Vec<&'static str>;
}
