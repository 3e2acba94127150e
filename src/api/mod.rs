pub mod http_api;
#[cfg(test)]
pub mod mock_api;
pub mod types;

pub use http_api::HttpOtaApi;
pub use types::{Branch, DeleteResult, OtaApi, Platform, RuntimeVersion, Update};
