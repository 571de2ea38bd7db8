//! PCForge - PC build recommendation client library
//!
//! This library provides the core functionality for the PCForge CLI:
//! session lifecycle management, credential storage, the backend API
//! client, and the build workflow orchestration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `token`: Durable storage cell for the bearer credential
//! - `session`: Session decode, expiry handling, and auto-invalidation
//! - `api`: HTTP client for the recommendation backend
//! - `workflow`: Recommendation/save/rate/delete orchestration and policies
//! - `notify`: User-facing notices
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use pcforge::{ApiClient, BuildWorkflow, Config, SessionManager};
//! use pcforge::notify::TerminalNotifier;
//! use pcforge::token::KeyringTokenStore;
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! config.validate()?;
//!
//! let notifier = Arc::new(TerminalNotifier::new());
//! let store = Arc::new(KeyringTokenStore::new("pcforge", "session"));
//! let session = SessionManager::new(store, notifier.clone());
//! let api = ApiClient::new(&config.api)?;
//! let _workflow = BuildWorkflow::new(api, session, notifier);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod notify;
pub mod session;
pub mod token;
pub mod workflow;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use error::{PcforgeError, Result};
pub use session::{Session, SessionManager, SessionState};
pub use workflow::{BuildQuery, BuildWorkflow, UseCase};

#[cfg(test)]
pub mod test_utils;
