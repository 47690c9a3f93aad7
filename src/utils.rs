//! Utility functions for converting between rating scales

use crate::config::GLICKO2_SCALE;

/// Convert a display-scale rating into the Glicko-2 `mu` around `center`
pub fn to_internal_rating(rating: f64, center: f64) -> f64 {
    (rating - center) / GLICKO2_SCALE
}

/// Convert a Glicko-2 `mu` back into a display-scale rating around `center`
pub fn to_external_rating(mu: f64, center: f64) -> f64 {
    mu * GLICKO2_SCALE + center
}

/// Convert a display-scale deviation into the Glicko-2 `phi`
pub fn to_internal_deviation(deviation: f64) -> f64 {
    deviation / GLICKO2_SCALE
}

/// Convert a Glicko-2 `phi` back into a display-scale deviation
pub fn to_external_deviation(phi: f64) -> f64 {
    phi * GLICKO2_SCALE
}

/// 95% confidence interval of a display-scale rating
pub fn confidence_interval(rating: f64, deviation: f64) -> (f64, f64) {
    (rating - 1.96 * deviation, rating + 1.96 * deviation)
}
