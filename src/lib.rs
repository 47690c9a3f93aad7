//! Glicko Rating - Glicko-2 skill ratings with staged updates
//!
//! This crate computes Glicko-2 rating, deviation and volatility updates for
//! a single entity per rating period, keeping results pending until they are
//! explicitly committed.

pub mod config;
pub mod error;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{GlickoError, Result};
pub use types::*;

// Re-export key components
pub use config::GlickoConfig;
pub use rating::{Rating, Workspace};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
