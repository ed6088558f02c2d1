pub mod config;
pub mod error;
pub mod message;
pub mod request;
pub mod stats;

pub use config::Config;
pub use error::{Error, Result};
pub use message::{Inbound, Outbound};
pub use request::{Request, RequestId};
pub use stats::ResourceStats;
