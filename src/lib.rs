pub mod cache;
pub mod config;
pub mod error;
pub mod hn;
pub mod http;

pub use config::Config;
pub use error::RestError;
