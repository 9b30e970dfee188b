//! marknote's internals, exposed for the CLI, integration tests and xtask.
pub mod cli;
pub mod config;
pub mod error;
#[cfg(feature = "serve")]
pub mod server;
pub mod site;
pub mod source;
