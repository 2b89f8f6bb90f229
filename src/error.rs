use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid threshold {name}: {value} (expected a finite fraction in [0, 1])")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("Configuration error: {0}")]
    InvalidConfiguration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Accepts finite fractions in `[0, 1]`.
pub(crate) fn check_fraction(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::InvalidThreshold { name, value })
    }
}
