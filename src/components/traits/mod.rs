pub mod list_action_handler;
pub mod list_data_source;
pub mod managed_item;
