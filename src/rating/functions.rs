//! Pure Glicko-2 helper functions
//!
//! Everything here works on the internal (Glicko-2) scale. See steps 3 to 5
//! of Glickman's "Example of the Glicko-2 system" for the formulas.

use crate::config::GlickoConfig;
use crate::error::GlickoError;
use std::f64::consts::PI;
use tracing::{debug, trace};

/// Expected scores are kept this far away from 0 and 1 so that `1/v` never
/// collapses to zero for lopsided but valid pairings.
pub const EXPECTED_SCORE_FLOOR: f64 = 1e-12;

/// Weight applied to an opponent with deviation `phi`.
///
/// Decreases monotonically from 1 as the opponent grows less certain.
pub fn g(phi: f64) -> f64 {
    let scaled = phi / PI;
    1.0 / (1.0 + 3.0 * scaled * scaled).sqrt()
}

/// Expected score of a player rated `mu` against an opponent rated
/// `opponent_mu` whose weight is `g`.
pub fn expected_score(g: f64, opponent_mu: f64, mu: f64) -> f64 {
    let e = 1.0 / (1.0 + (-g * (mu - opponent_mu)).exp());
    e.clamp(EXPECTED_SCORE_FLOOR, 1.0 - EXPECTED_SCORE_FLOOR)
}

/// Inputs of the volatility equation that stay fixed while solving it
#[derive(Debug, Clone, Copy)]
struct VolatilityEquation {
    delta_sq: f64,
    phi_sq: f64,
    variance: f64,
    a: f64,
    tau_sq: f64,
}

impl VolatilityEquation {
    /// `f(x)` from step 5.1; its root is `ln(sigma'^2)`.
    fn f(&self, x: f64) -> f64 {
        let ex = x.exp();
        let num = ex * (self.delta_sq - self.phi_sq - self.variance - ex);
        let den = self.phi_sq + self.variance + ex;
        num / (2.0 * den * den) - (x - self.a) / self.tau_sq
    }
}

fn convergence_failed(iterations: usize, reason: &str) -> anyhow::Error {
    GlickoError::ConvergenceFailed {
        iterations,
        reason: reason.to_string(),
    }
    .into()
}

/// Solve for the new log-squared volatility.
///
/// `delta` is the estimated improvement, `variance` the estimated variance
/// `v`, and `phi`/`sigma` the player's current deviation and volatility.
/// Returns `A` with `sigma' = exp(A / 2)`.
pub fn converge_volatility(
    delta: f64,
    variance: f64,
    phi: f64,
    sigma: f64,
    config: &GlickoConfig,
) -> crate::error::Result<f64> {
    let tau = config.system_constant;
    let equation = VolatilityEquation {
        delta_sq: delta * delta,
        phi_sq: phi * phi,
        variance,
        a: 2.0 * sigma.ln(),
        tau_sq: tau * tau,
    };

    // Bracket the root
    let mut a = equation.a;
    let b_test = equation.delta_sq - equation.phi_sq - variance;
    let mut b = if b_test > 0.0 {
        b_test.ln()
    } else {
        let mut k = 1;
        let mut b = equation.a - tau;
        while equation.f(b) < 0.0 {
            if k >= config.max_iterations {
                return Err(convergence_failed(k, "no lower bracket found"));
            }
            k += 1;
            b -= tau;
        }
        b
    };

    // Illinois iteration
    let mut f_a = equation.f(a);
    let mut f_b = equation.f(b);
    let mut iterations = 0;
    while (b - a).abs() > config.convergence_tolerance {
        if iterations >= config.max_iterations {
            return Err(convergence_failed(iterations, "iteration limit reached"));
        }
        iterations += 1;

        let c = a + (a - b) * f_a / (f_b - f_a);
        if !c.is_finite() {
            return Err(convergence_failed(iterations, "non-finite secant step"));
        }
        let f_c = equation.f(c);
        trace!(iterations, a, b, c, f_c, "volatility iteration");

        if f_c == 0.0 {
            debug!(iterations, root = c, "volatility hit exact root");
            return Ok(c);
        }

        if f_c * f_b < 0.0 {
            a = b;
            f_a = f_b;
        } else {
            f_a /= 2.0;
        }

        b = c;
        f_b = f_c;
    }

    debug!(iterations, root = a, "volatility converged");
    Ok(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_g_matches_reference() {
        // Values from Glickman's worked example
        assert_relative_eq!(g(30.0 / 173.7178), 0.9955, epsilon = 1e-4);
        assert_relative_eq!(g(100.0 / 173.7178), 0.9531, epsilon = 1e-4);
        assert_relative_eq!(g(300.0 / 173.7178), 0.7242, epsilon = 1e-4);
        assert_eq!(g(0.0), 1.0);
    }

    #[test]
    fn test_g_decreases_with_deviation() {
        assert!(g(0.5) > g(1.0));
        assert!(g(1.0) > g(2.0));
        assert!(g(1e6) < 1e-5);
    }

    #[test]
    fn test_expected_score_matches_reference() {
        let mu = 0.0;
        let e = expected_score(g(30.0 / 173.7178), -100.0 / 173.7178, mu);
        assert_relative_eq!(e, 0.639, epsilon = 1e-3);
        let e = expected_score(g(100.0 / 173.7178), 50.0 / 173.7178, mu);
        assert_relative_eq!(e, 0.432, epsilon = 1e-3);
        let e = expected_score(g(300.0 / 173.7178), 200.0 / 173.7178, mu);
        assert_relative_eq!(e, 0.303, epsilon = 1e-3);
    }

    #[test]
    fn test_expected_score_is_even_for_equal_ratings() {
        assert_eq!(expected_score(g(1.0), 0.3, 0.3), 0.5);
    }

    #[test]
    fn test_expected_score_is_clamped() {
        let e = expected_score(1.0, -1000.0, 1000.0);
        assert_eq!(e, 1.0 - EXPECTED_SCORE_FLOOR);
        let e = expected_score(1.0, 1000.0, -1000.0);
        assert_eq!(e, EXPECTED_SCORE_FLOOR);
    }

    #[test]
    fn test_converge_volatility_reference() {
        let config = GlickoConfig::default();
        let a = converge_volatility(-0.4834, 1.7785, 1.1513, 0.06, &config).unwrap();
        let sigma = (a / 2.0).exp();
        assert_relative_eq!(sigma, 0.05999, epsilon = 1e-5);
    }

    #[test]
    fn test_converge_volatility_lower_bracket_search() {
        // delta^2 <= phi^2 + v takes the stepping branch
        let config = GlickoConfig::default();
        let a = converge_volatility(0.0, 100.0, 10.0, 0.06, &config).unwrap();
        assert!(a.is_finite());
        assert!(a <= (0.06f64 * 0.06).ln());
    }

    #[test]
    fn test_converge_volatility_exact_root_terminates() {
        // The secant step lands on an exact zero of f for these inputs
        let config = GlickoConfig::default();
        let a = converge_volatility(50.0, 1e-8, 1.0, 0.06, &config).unwrap();
        assert!(a.is_finite());
    }

    #[test]
    fn test_converge_volatility_iteration_limit() {
        let config = GlickoConfig {
            max_iterations: 1,
            ..GlickoConfig::default()
        };
        let err = converge_volatility(1000.0, 1e-3, 0.01, 0.06, &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GlickoError>(),
            Some(GlickoError::ConvergenceFailed { iterations: 1, .. })
        ));
    }
}
