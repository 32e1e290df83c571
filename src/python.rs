//! Python bindings.
//!
//! Exposes decoding and both projections to Python. Records and views cross
//! the boundary as JSON strings.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::decode::{decode_all, decode_str};
use crate::logging::structured::LogContext;

fn to_py_err(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Decode a check definition and return the canonical record as JSON.
#[pyfunction]
fn decode_check_definition(document: &str) -> PyResult<String> {
    crate::init_logger();

    let definition = decode_str(document).map_err(to_py_err)?;
    serde_json::to_string(&definition).map_err(to_py_err)
}

/// Decode a definition (or array of definitions) and return the health views.
///
/// # Arguments
/// * `document` - JSON text
/// * `node` - Node that owns the checks
#[pyfunction]
fn health_checks(document: &str, node: &str) -> PyResult<Vec<String>> {
    crate::init_logger();

    let value: serde_json::Value = serde_json::from_str(document).map_err(to_py_err)?;
    let definitions = decode_all(&value, &LogContext::new("python")).map_err(to_py_err)?;

    definitions
        .iter()
        .map(|d| serde_json::to_string(&d.health_check(node)).map_err(to_py_err))
        .collect()
}

/// Decode a definition (or array of definitions) and return the check specs.
#[pyfunction]
fn check_types(document: &str) -> PyResult<Vec<String>> {
    crate::init_logger();

    let value: serde_json::Value = serde_json::from_str(document).map_err(to_py_err)?;
    let definitions = decode_all(&value, &LogContext::new("python")).map_err(to_py_err)?;

    definitions
        .iter()
        .map(|d| serde_json::to_string(&d.check_type()).map_err(to_py_err))
        .collect()
}

/// Python module definition
#[pymodule]
fn checkdef_core(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(decode_check_definition, m)?)?;
    m.add_function(wrap_pyfunction!(health_checks, m)?)?;
    m.add_function(wrap_pyfunction!(check_types, m)?)?;
    Ok(())
}
