//! Glicko-2 rating engine
//!
//! This module provides the staged Glicko-2 rating, the pure helper functions
//! it is built on, and reusable scratch storage for batch updates.

pub mod functions;
pub mod glicko2;
pub mod workspace;

// Re-export commonly used types
pub use functions::{converge_volatility, expected_score, g};
pub use glicko2::{Glicko2Parameters, Rating, MAX_PARAMETER};
pub use workspace::Workspace;
