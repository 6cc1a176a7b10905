//! Score validation and the weighted composite score
//!
//! Every rating is a real number in `[0, 10]`. The composite score is a fixed
//! weighted sum and is always recomputed from the stored ratings.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Weight applied to the taste rating
pub const TASTE_WEIGHT: f64 = 0.4;
/// Weight applied to the price rating
pub const PRICE_WEIGHT: f64 = 0.3;
/// Weight applied to the speed (serving time) rating
pub const SPEED_WEIGHT: f64 = 0.3;

/// Lowest accepted rating (inclusive)
pub const MIN_SCORE: f64 = 0.0;
/// Highest accepted rating (inclusive)
pub const MAX_SCORE: f64 = 10.0;

/// Composite score: `0.4 * taste + 0.3 * price + 0.3 * speed`
pub fn composite_score(taste: f64, price: f64, speed: f64) -> f64 {
    TASTE_WEIGHT * taste + PRICE_WEIGHT * price + SPEED_WEIGHT * speed
}

/// Whether `value` is a finite number within `[MIN_SCORE, MAX_SCORE]`
pub fn is_valid_score(value: f64) -> bool {
    value.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&value)
}

/// Parse one form field into a rating
///
/// Surrounding whitespace is ignored. Non-numeric text, NaN, infinities and
/// values outside `[0, 10]` are rejected with [`Error::Validation`].
pub fn parse_score(field: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let value: f64 = trimmed.parse().map_err(|_| {
        Error::Validation(format!("{} must be a number between 0 and 10, got {:?}", field, raw))
    })?;
    check_score(field, value)
}

fn check_score(field: &str, value: f64) -> Result<f64> {
    if is_valid_score(value) {
        Ok(value)
    } else {
        Err(Error::Validation(format!(
            "{} must be between {} and {}, got {}",
            field, MIN_SCORE, MAX_SCORE, value
        )))
    }
}

/// A validated (taste, price, speed) triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub taste: f64,
    pub price: f64,
    pub speed: f64,
}

impl Scores {
    /// Build from numeric ratings, rejecting any out-of-range value
    pub fn new(taste: f64, price: f64, speed: f64) -> Result<Self> {
        Ok(Self {
            taste: check_score("taste", taste)?,
            price: check_score("price", price)?,
            speed: check_score("speed", speed)?,
        })
    }

    /// Build from raw form text
    pub fn parse(taste: &str, price: &str, speed: &str) -> Result<Self> {
        Ok(Self {
            taste: parse_score("taste", taste)?,
            price: parse_score("price", price)?,
            speed: parse_score("speed", speed)?,
        })
    }

    pub fn composite(&self) -> f64 {
        composite_score(self.taste, self.price, self.speed)
    }
}
