//! Configuration management for the rating engine
//!
//! This module holds the Glicko-2 system parameters and the settings of the
//! driver binary, loaded from TOML files or environment variables.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use rating::{GlickoConfig, GLICKO2_SCALE};
