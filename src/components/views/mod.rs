pub mod branch_list;
pub mod runtime_version_list;
pub mod update_list;

pub use branch_list::BranchListComponent;
pub use runtime_version_list::RuntimeVersionListComponent;
pub use update_list::UpdateListComponent;
