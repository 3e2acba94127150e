mod update_action_handler;
mod update_data_source;

pub use update_action_handler::UpdateActionHandler;
pub use update_data_source::UpdateDataSource;

use crate::{api::Update, components::shared::generic_list::GenericListComponent};

pub type UpdateListComponent = GenericListComponent<Update, UpdateDataSource, UpdateActionHandler>;
