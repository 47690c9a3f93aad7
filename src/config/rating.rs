//! Rating system configuration

use crate::error::GlickoError;
use serde::{Deserialize, Serialize};

/// Conversion factor between the Glicko-1 display scale and the Glicko-2
/// computation scale (`400 / ln 10`).
pub const GLICKO2_SCALE: f64 = 173.7178;

/// Parameters of the Glicko-2 system
///
/// Every [`crate::rating::Rating`] carries a copy of the configuration it was
/// built with, so ratings created from different configurations can coexist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlickoConfig {
    /// Rating of an unrated player, also the centre of the display scale
    pub default_rating: f64,
    /// Deviation of an unrated player in display units
    pub default_deviation: f64,
    /// Volatility of an unrated player
    pub default_volatility: f64,
    /// System constant tau, limits how far volatility moves per period
    pub system_constant: f64,
    /// Convergence tolerance epsilon of the volatility solver
    pub convergence_tolerance: f64,
    /// Upper bound on solver iterations before giving up
    pub max_iterations: usize,
}

impl Default for GlickoConfig {
    fn default() -> Self {
        Self {
            default_rating: 1500.0,
            default_deviation: 350.0,
            default_volatility: 0.06,
            system_constant: 0.5,
            convergence_tolerance: 0.000_001,
            max_iterations: 1000,
        }
    }
}

impl GlickoConfig {
    /// Low end of the recommended tau range (volatility barely moves)
    pub fn conservative() -> Self {
        Self {
            system_constant: 0.3,
            ..Self::default()
        }
    }

    /// High end of the recommended tau range (volatility reacts quickly)
    pub fn aggressive() -> Self {
        Self {
            system_constant: 1.2,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.default_rating.is_finite() {
            return Err(GlickoError::ConfigurationError {
                message: "Default rating must be finite".to_string(),
            }
            .into());
        }

        if !(self.default_deviation.is_finite() && self.default_deviation > 0.0) {
            return Err(GlickoError::ConfigurationError {
                message: "Default deviation must be positive".to_string(),
            }
            .into());
        }

        if !(self.default_volatility.is_finite() && self.default_volatility > 0.0) {
            return Err(GlickoError::ConfigurationError {
                message: "Default volatility must be positive".to_string(),
            }
            .into());
        }

        if !(self.system_constant.is_finite() && self.system_constant > 0.0) {
            return Err(GlickoError::ConfigurationError {
                message: "System constant must be positive".to_string(),
            }
            .into());
        }

        if !(self.convergence_tolerance.is_finite() && self.convergence_tolerance > 0.0) {
            return Err(GlickoError::ConfigurationError {
                message: "Convergence tolerance must be positive".to_string(),
            }
            .into());
        }

        if self.max_iterations == 0 {
            return Err(GlickoError::ConfigurationError {
                message: "Max iterations must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
