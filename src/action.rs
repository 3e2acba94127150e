use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
  api::DeleteResult,
  components::shared::{delete_dialog::DeleteTarget, notifications::Notification},
  navigation::Scope,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
  CancelDelete,
  ConfirmDelete,
  DeleteFailed { target: DeleteTarget, message: String },
  DeleteSucceeded { target: DeleteTarget, result: DeleteResult },
  EndConfirmMode,
  Error(String),
  ItemsLoaded(Scope),
  Navigate(Scope),
  Notify(Notification),
  OpenSelected,
  GoUp,
  GoHome,
  Quit,
  Refresh,
  Render,
  RequestDelete,
  Resize(u16, u16),
  Resume,
  SelectNext,
  SelectPrevious,
  StartConfirmMode,
  Suspend,
  Tick,
  ToggleDialogFocus,
}
