pub mod breadcrumbs;
pub mod delete_dialog;
pub mod format;
pub mod generic_list;
pub mod instruction_footer;
pub mod notifications;
pub mod scope_cache;
pub mod table;
