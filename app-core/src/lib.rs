//! app-core: shared infrastructure for the invoicing application.
pub mod config;
pub mod context;
pub mod error;
pub mod notify;
pub mod observability;
pub mod store;

pub use context::UserContext;
pub use error::AppError;

pub use async_trait;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;
