//! Common types used throughout the rating engine

use crate::config::GlickoConfig;
use crate::rating::Rating;
use serde::{Deserialize, Serialize};

/// Result of a single game from the rated entity's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Score used by the rating update
    pub fn score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Draw => 0.5,
            Outcome::Loss => 0.0,
        }
    }
}

impl From<Outcome> for f64 {
    fn from(outcome: Outcome) -> Self {
        outcome.score()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "Win"),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::Loss => write!(f, "Loss"),
        }
    }
}

/// Display-scale view of a rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSnapshot {
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
}

impl Default for RatingSnapshot {
    fn default() -> Self {
        let config = GlickoConfig::default();
        Self {
            rating: config.default_rating,
            deviation: config.default_deviation,
            volatility: config.default_volatility,
        }
    }
}

impl RatingSnapshot {
    /// Build a rating from this snapshot under `config`
    pub fn to_rating(&self, config: GlickoConfig) -> crate::error::Result<Rating> {
        Rating::with_config(config, self.rating, self.deviation, self.volatility)
    }
}

impl From<&Rating> for RatingSnapshot {
    fn from(rating: &Rating) -> Self {
        Self {
            rating: rating.rating(),
            deviation: rating.deviation(),
            volatility: rating.volatility(),
        }
    }
}

/// One game of a rating period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub opponent: RatingSnapshot,
    pub score: f64,
}

/// All games an entity played during one rating period
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingPeriod {
    pub player: RatingSnapshot,
    #[serde(default)]
    pub games: Vec<GameRecord>,
}

impl RatingPeriod {
    /// Apply this period to the player and return the committed rating.
    ///
    /// A period without games decays the player's deviation.
    pub fn evaluate(&self, config: GlickoConfig) -> crate::error::Result<Rating> {
        let mut player = self.player.to_rating(config)?;

        if self.games.is_empty() {
            player.decay();
        } else {
            let opponents = self
                .games
                .iter()
                .map(|game| game.opponent.to_rating(config))
                .collect::<crate::error::Result<Vec<_>>>()?;
            let scores: Vec<f64> = self.games.iter().map(|game| game.score).collect();
            player.update_batch(&opponents, &scores)?;
        }

        player.commit();
        Ok(player)
    }
}
