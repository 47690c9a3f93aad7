//! Test fixtures shared by the integration tests

use glicko_rating::Rating;

/// The player from Glickman's worked example
pub fn reference_player() -> Rating {
    Rating::new(1500.0, 200.0, 0.06).unwrap()
}

/// The three opponents from Glickman's worked example
pub fn reference_opponents() -> Vec<Rating> {
    vec![
        Rating::new(1400.0, 30.0, 0.06).unwrap(),
        Rating::new(1550.0, 100.0, 0.06).unwrap(),
        Rating::new(1700.0, 300.0, 0.06).unwrap(),
    ]
}

/// Results of the worked example, in opponent order
pub const REFERENCE_SCORES: [f64; 3] = [1.0, 0.0, 0.0];

/// A spread of opponents for longer batches
pub fn opponent_field(count: usize) -> Vec<Rating> {
    (0..count)
        .map(|i| {
            let rating = 1200.0 + (i % 13) as f64 * 50.0;
            let deviation = 40.0 + (i % 7) as f64 * 40.0;
            Rating::new(rating, deviation, 0.06).unwrap()
        })
        .collect()
}

/// Alternating win/draw/loss scores for `count` games
pub fn mixed_scores(count: usize) -> Vec<f64> {
    (0..count).map(|i| [1.0, 0.5, 0.0][i % 3]).collect()
}
