pub mod url_utils;
pub mod error;
pub mod headers;
pub mod canonicalizer;
pub mod models;
pub mod config;
pub mod handlers;
pub mod cache;

pub use url_utils::*;
pub use error::*;
pub use headers::*;
pub use canonicalizer::*;
pub use models::*;
pub use config::*;
pub use handlers::*;
pub use cache::*;
