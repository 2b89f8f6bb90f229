use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{check_fraction, Error, Result};

const ENV_MIN_SUPPORT: &str = "BASKET_MIN_SUPPORT";
const ENV_MIN_CONFIDENCE: &str = "BASKET_MIN_CONFIDENCE";

pub const DEFAULT_MIN_SUPPORT: f64 = 0.05;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.3;

/// Thresholds for the sales-pattern query.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct MinerConfig {
    /// Fraction of all orders a pair must appear in.
    #[serde(default = "default_min_support")]
    pub min_support: f64,
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

fn default_min_support() -> f64 {
    DEFAULT_MIN_SUPPORT
}

fn default_min_confidence() -> f64 {
    DEFAULT_MIN_CONFIDENCE
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            min_support: DEFAULT_MIN_SUPPORT,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl MinerConfig {
    pub fn new(min_support: f64, min_confidence: f64) -> Result<Self> {
        let config = Self {
            min_support,
            min_confidence,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads thresholds from the environment, falling back to the defaults
    /// for unset or blank variables.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            min_support: read_fraction(ENV_MIN_SUPPORT, DEFAULT_MIN_SUPPORT)?,
            min_confidence: read_fraction(ENV_MIN_CONFIDENCE, DEFAULT_MIN_CONFIDENCE)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_fraction("min_support", self.min_support)?;
        check_fraction("min_confidence", self.min_confidence)?;
        Ok(())
    }

    /// Absolute order count for `min_support`, at least 1 when any order exists.
    pub fn min_support_count(&self, total_orders: usize) -> usize {
        min_support_count(self.min_support, total_orders)
    }
}

pub(crate) fn min_support_count(min_support: f64, total_orders: usize) -> usize {
    if total_orders == 0 {
        return 0;
    }
    let count = (min_support * total_orders as f64).floor() as usize;
    count.max(1)
}

fn read_fraction(key: &str, default: f64) -> Result<f64> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse::<f64>().map_err(|e| {
            Error::InvalidConfiguration(format!("{key}={raw:?} is not a number: {e}"))
        }),
        Ok(_) => {
            log::warn!("{key} is set but blank, using default {default}");
            Ok(default)
        }
        Err(_) => Ok(default),
    }
}
