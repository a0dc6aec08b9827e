pub mod batch;
pub mod client;
pub mod error;
pub mod mock;
pub mod pagination;
pub mod transport;
pub mod types;

pub use client::HnClient;
pub use error::HnError;
pub use transport::{ReqwestTransport, Transport};
pub use types::{Item, ItemId, StoryType, User, UserView};
