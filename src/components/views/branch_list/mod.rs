mod branch_action_handler;
mod branch_data_source;

pub use branch_action_handler::BranchActionHandler;
pub use branch_data_source::BranchDataSource;

use crate::{api::Branch, components::shared::generic_list::GenericListComponent};

pub type BranchListComponent = GenericListComponent<Branch, BranchDataSource, BranchActionHandler>;
