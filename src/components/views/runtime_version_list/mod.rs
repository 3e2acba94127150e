mod runtime_version_action_handler;
mod runtime_version_data_source;

pub use runtime_version_action_handler::RuntimeVersionActionHandler;
pub use runtime_version_data_source::RuntimeVersionDataSource;

use crate::{api::RuntimeVersion, components::shared::generic_list::GenericListComponent};

pub type RuntimeVersionListComponent =
  GenericListComponent<RuntimeVersion, RuntimeVersionDataSource, RuntimeVersionActionHandler>;
