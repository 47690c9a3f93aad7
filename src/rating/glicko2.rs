//! Glicko-2 rating with staged updates
//!
//! A [`Rating`] keeps the parameters it was last committed with and, after an
//! update or decay, a pending set of parameters. Accessors always report the
//! committed values; [`Rating::commit`] promotes the pending ones.
//!
//! ```
//! use glicko_rating::rating::Rating;
//!
//! let mut player = Rating::new(1500.0, 200.0, 0.06).unwrap();
//! let opponents = [
//!     Rating::new(1400.0, 30.0, 0.06).unwrap(),
//!     Rating::new(1550.0, 100.0, 0.06).unwrap(),
//!     Rating::new(1700.0, 300.0, 0.06).unwrap(),
//! ];
//!
//! player.update_batch(&opponents, &[1.0, 0.0, 0.0]).unwrap();
//! assert_eq!(player.rating(), 1500.0);
//!
//! player.commit();
//! assert!((player.rating() - 1464.06).abs() < 0.01);
//! assert!((player.deviation() - 151.52).abs() < 0.01);
//! ```

use crate::config::GlickoConfig;
use crate::error::GlickoError;
use crate::rating::functions::{converge_volatility, expected_score, g};
use crate::rating::workspace::Workspace;
use crate::utils::{
    confidence_interval, to_external_deviation, to_external_rating, to_internal_deviation,
    to_internal_rating,
};
use std::fmt;
use tracing::{debug, warn};

/// Rating parameters on the internal Glicko-2 scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glicko2Parameters {
    /// Rating, `mu`
    pub mu: f64,
    /// Rating deviation, `phi`
    pub phi: f64,
    /// Volatility, `sigma`
    pub sigma: f64,
}

/// Largest accepted display-scale deviation and volatility. Squares and
/// fourth powers of larger values overflow inside the volatility solve.
pub const MAX_PARAMETER: f64 = 1e50;

/// A single entity's Glicko-2 rating
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    config: GlickoConfig,
    current: Glicko2Parameters,
    pending: Option<Glicko2Parameters>,
}

impl Default for Rating {
    fn default() -> Self {
        let config = GlickoConfig::default();
        Self {
            config,
            current: Glicko2Parameters {
                mu: 0.0,
                phi: to_internal_deviation(config.default_deviation),
                sigma: config.default_volatility,
            },
            pending: None,
        }
    }
}

fn validate_parameters(rating: f64, deviation: f64, volatility: f64) -> crate::error::Result<()> {
    if !rating.is_finite() {
        return Err(GlickoError::InvalidRating {
            reason: format!("rating must be finite, got {}", rating),
        }
        .into());
    }

    if !(deviation > 0.0 && deviation <= MAX_PARAMETER) {
        return Err(GlickoError::InvalidRating {
            reason: format!(
                "deviation must be in (0, {:e}], got {}",
                MAX_PARAMETER, deviation
            ),
        }
        .into());
    }

    if !(volatility > 0.0 && volatility <= MAX_PARAMETER) {
        return Err(GlickoError::InvalidRating {
            reason: format!(
                "volatility must be in (0, {:e}], got {}",
                MAX_PARAMETER, volatility
            ),
        }
        .into());
    }

    Ok(())
}

fn validate_score(score: f64) -> crate::error::Result<()> {
    if (0.0..=1.0).contains(&score) {
        Ok(())
    } else {
        Err(GlickoError::InvalidScore { score }.into())
    }
}

impl Rating {
    /// Create a rating from display-scale rating and deviation using the
    /// default system configuration. Volatility is never rescaled.
    pub fn new(rating: f64, deviation: f64, volatility: f64) -> crate::error::Result<Self> {
        Self::with_config(GlickoConfig::default(), rating, deviation, volatility)
    }

    /// Create a rating under a specific system configuration
    pub fn with_config(
        config: GlickoConfig,
        rating: f64,
        deviation: f64,
        volatility: f64,
    ) -> crate::error::Result<Self> {
        config.validate()?;
        validate_parameters(rating, deviation, volatility)?;

        Ok(Self {
            config,
            current: Glicko2Parameters {
                mu: to_internal_rating(rating, config.default_rating),
                phi: to_internal_deviation(deviation),
                sigma: volatility,
            },
            pending: None,
        })
    }

    /// Create an unrated entity seeded from the configuration defaults
    pub fn unrated(config: GlickoConfig) -> crate::error::Result<Self> {
        Self::with_config(
            config,
            config.default_rating,
            config.default_deviation,
            config.default_volatility,
        )
    }

    /// Configuration this rating was built with
    pub fn config(&self) -> &GlickoConfig {
        &self.config
    }

    /// Committed rating on the display scale
    pub fn rating(&self) -> f64 {
        to_external_rating(self.current.mu, self.config.default_rating)
    }

    /// Committed deviation on the display scale
    pub fn deviation(&self) -> f64 {
        to_external_deviation(self.current.phi)
    }

    /// Committed rating on the Glicko-2 scale
    pub fn rating_internal(&self) -> f64 {
        self.current.mu
    }

    /// Committed deviation on the Glicko-2 scale
    pub fn deviation_internal(&self) -> f64 {
        self.current.phi
    }

    /// Committed volatility
    pub fn volatility(&self) -> f64 {
        self.current.sigma
    }

    /// Committed parameters on the Glicko-2 scale
    pub fn parameters(&self) -> &Glicko2Parameters {
        &self.current
    }

    /// Parameters computed by the last update or decay, if not yet committed
    pub fn pending(&self) -> Option<&Glicko2Parameters> {
        self.pending.as_ref()
    }

    /// 95% confidence interval of the committed rating on the display scale
    pub fn confidence_interval(&self) -> (f64, f64) {
        confidence_interval(self.rating(), self.deviation())
    }

    /// Probability that this entity beats `opponent`
    pub fn expected_score(&self, opponent: &Rating) -> f64 {
        expected_score(
            g(opponent.current.phi),
            opponent.current.mu,
            self.current.mu,
        )
    }

    /// Compute pending parameters from one rating period of games.
    ///
    /// `scores[j]` is the result against `opponents[j]`: 1 for a win, 0.5 for
    /// a draw and 0 for a loss. Any earlier pending parameters are dropped
    /// first, so a failed update leaves nothing to commit.
    ///
    /// # Panics
    /// Panics if `opponents` is empty or `scores` has a different length.
    pub fn update_batch(&mut self, opponents: &[Rating], scores: &[f64]) -> crate::error::Result<()> {
        let mut workspace = Workspace::with_capacity(opponents.len());
        self.update_batch_with(&mut workspace, opponents, scores)
    }

    /// Same as [`Rating::update_batch`], reusing `workspace` for the
    /// per-opponent tables.
    pub fn update_batch_with(
        &mut self,
        workspace: &mut Workspace,
        opponents: &[Rating],
        scores: &[f64],
    ) -> crate::error::Result<()> {
        assert!(!opponents.is_empty(), "batch update needs at least one opponent");
        assert_eq!(
            opponents.len(),
            scores.len(),
            "batch update needs exactly one score per opponent"
        );
        self.pending = None;
        for &score in scores {
            validate_score(score)?;
        }

        let (g_table, e_table) = workspace.tabulate(self.current.mu, opponents);

        let inv_v: f64 = g_table
            .iter()
            .zip(e_table)
            .map(|(&g, &e)| g * g * e * (1.0 - e))
            .sum();
        let v = 1.0 / inv_v;

        let d_inner: f64 = g_table
            .iter()
            .zip(e_table)
            .zip(scores)
            .map(|((&g, &e), &score)| g * (score - e))
            .sum();
        let d = v * d_inner;

        self.stage_update(inv_v, v, d_inner, d)
    }

    /// Compute pending parameters from a single game against `opponent`.
    ///
    /// Like [`Rating::update_batch`], this drops earlier pending parameters
    /// before validating anything.
    pub fn update_single(&mut self, opponent: &Rating, score: f64) -> crate::error::Result<()> {
        self.pending = None;
        validate_score(score)?;

        let g = g(opponent.current.phi);
        let e = expected_score(g, opponent.current.mu, self.current.mu);

        let inv_v = g * g * e * (1.0 - e);
        let v = 1.0 / inv_v;

        let d_inner = g * (score - e);
        let d = v * d_inner;

        self.stage_update(inv_v, v, d_inner, d)
    }

    fn stage_update(&mut self, inv_v: f64, v: f64, d_inner: f64, d: f64) -> crate::error::Result<()> {
        if !(inv_v.is_finite() && inv_v > 0.0 && v.is_finite()) {
            warn!(inv_v, "rejecting update with degenerate variance");
            return Err(GlickoError::DegenerateMatch {
                reason: format!("estimated variance is undefined (1/v = {})", inv_v),
            }
            .into());
        }

        let Glicko2Parameters { mu, phi, sigma } = self.current;

        let sigma_prime = (converge_volatility(d, v, phi, sigma, &self.config)? / 2.0).exp();
        // 1/sqrt(1/r^2 + 1/v) rearranged so a tiny r cannot divide by zero
        let r = phi.hypot(sigma_prime);
        let phi_prime = r / (1.0 + inv_v * r * r).sqrt();
        let mu_prime = mu + phi_prime * phi_prime * d_inner;

        let pending = Glicko2Parameters {
            mu: mu_prime,
            phi: phi_prime,
            sigma: sigma_prime,
        };
        debug!(?pending, "staged rating update");
        self.pending = Some(pending);
        Ok(())
    }

    /// Stage the deviation growth of a period without games.
    ///
    /// Rating and volatility are carried forward unchanged.
    pub fn decay(&mut self) {
        let Glicko2Parameters { mu, phi, sigma } = self.current;
        let pending = Glicko2Parameters {
            mu,
            phi: phi.hypot(sigma),
            sigma,
        };
        debug!(?pending, "staged deviation decay");
        self.pending = Some(pending);
    }

    /// Promote the pending parameters to the committed ones.
    ///
    /// Returns `false` and leaves the rating untouched when there is nothing
    /// pending, e.g. when commit is called twice for the same update or the
    /// last update returned an error.
    pub fn commit(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                self.current = pending;
                true
            }
            None => {
                warn!("commit called without a pending update");
                false
            }
        }
    }

    /// Drop the pending parameters without applying them
    pub fn discard(&mut self) {
        self.pending = None;
    }
}

impl fmt::Display for Rating {
    /// Renders the committed display-scale values as `[rating:deviation]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(
                f,
                "[{:.*}:{:.*}]",
                precision,
                self.rating(),
                precision,
                self.deviation()
            ),
            None => write!(f, "[{}:{}]", self.rating(), self.deviation()),
        }
    }
}
