use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::analytics::sales_analytics as compute_sales_analytics;
use crate::config::MinerConfig;
use crate::error::Error;
use crate::order::load_orders;
use crate::report::sales_patterns as compute_sales_patterns;

fn to_py_err(err: Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Frequent pairs and recommendation rules as a JSON string.
#[pyfunction]
#[pyo3(text_signature = "(orders_json, min_support=0.05, min_confidence=0.3, /)")]
pub fn sales_patterns(
    orders_json: &str,
    min_support: Option<f64>,
    min_confidence: Option<f64>,
) -> PyResult<String> {
    let defaults = MinerConfig::default();
    let config = MinerConfig::new(
        min_support.unwrap_or(defaults.min_support),
        min_confidence.unwrap_or(defaults.min_confidence),
    )
    .map_err(to_py_err)?;
    let orders = load_orders(orders_json.as_bytes()).map_err(to_py_err)?;
    let report = compute_sales_patterns(&orders, &config).map_err(to_py_err)?;
    serde_json::to_string(&report).map_err(|e| to_py_err(e.into()))
}

/// Per-item and per-day sales totals as a JSON string.
#[pyfunction]
#[pyo3(text_signature = "(orders_json, /)")]
pub fn sales_analytics(orders_json: &str) -> PyResult<String> {
    let orders = load_orders(orders_json.as_bytes()).map_err(to_py_err)?;
    serde_json::to_string(&compute_sales_analytics(&orders)).map_err(|e| to_py_err(e.into()))
}

#[pymodule]
fn basket_miner(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(sales_patterns, m)?)?;
    m.add_function(wrap_pyfunction!(sales_analytics, m)?)?;
    Ok(())
}
