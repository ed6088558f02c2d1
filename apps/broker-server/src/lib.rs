pub mod cli;
pub mod config;
pub mod shutdown;
pub mod tracing_init;

pub use cli::Cli;
