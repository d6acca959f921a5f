//! Core: configuration, shared state, server bootstrap
//!
//! - [`Config`] - environment-driven settings
//! - [`ServerState`] - database handle, JWT service and config
//! - [`Server`] - binds the listener and serves the router

pub mod config;
pub mod server;
pub mod state;

pub use config::{Config, ConfigError};
pub use server::{Server, ServerError};
pub use state::ServerState;
