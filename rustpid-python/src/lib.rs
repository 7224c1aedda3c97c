//! rustpid-python: PyO3 Python bindings for rustpid.
#![allow(
    clippy::doc_markdown,
    clippy::needless_pass_by_value,
    clippy::uninlined_format_args
)]
//!
//! Exposes the particle classifier to the Python analysis code that owns the
//! centroid DataFrame. Coordinates cross the boundary as numpy float64 arrays;
//! labels come back as a list of class names (`None` for unclassified rows)
//! ready to be assigned to the `Particle Label` column. Existing labels can be
//! passed back in to serve as references.

use numpy::{PyArray2, PyReadonlyArray1};
use pyo3::prelude::*;
use rustpid_core::{
    CentroidTable, ClassifierConfig, Error, ParticleClass, ParticleClassifier, ReferenceMode,
    RelativePositions, Thresholds, VisitOrder,
};

fn value_error(context: &str, err: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(format!("{context}: {err}"))
}

fn column<'a>(context: &str, name: &str, array: &'a PyReadonlyArray1<f64>) -> PyResult<&'a [f64]> {
    array
        .as_slice()
        .map_err(|e| value_error(context, Error::InvalidInput(format!("{name}: {e}"))))
}

fn table_from_numpy(
    context: &str,
    xpos: &PyReadonlyArray1<f64>,
    ypos: &PyReadonlyArray1<f64>,
    labels: Option<&[Option<ParticleClass>]>,
) -> PyResult<CentroidTable> {
    let x = column(context, "xpos", xpos)?;
    let y = column(context, "ypos", ypos)?;
    match labels {
        Some(labels) => CentroidTable::from_labeled_columns(x, y, labels),
        None => CentroidTable::from_columns(x, y),
    }
    .map_err(|e| value_error(context, e))
}

fn parse_labels(labels: &[Option<String>]) -> PyResult<Vec<Option<ParticleClass>>> {
    labels
        .iter()
        .map(|label| label.as_deref().map(str::parse::<ParticleClass>).transpose())
        .collect::<Result<_, Error>>()
        .map_err(|e| value_error("classify_centroids", e))
}

fn parse_reference_mode(mode: &str) -> PyResult<ReferenceMode> {
    match mode.to_lowercase().as_str() {
        "any" => Ok(ReferenceMode::AnyNeighbor),
        "last" => Ok(ReferenceMode::LastNeighbor),
        _ => Err(value_error(
            "classify_centroids",
            format!("Unknown reference_mode: {mode}. Use 'any' or 'last'"),
        )),
    }
}

/// Classify centroids and return one label per row.
///
/// When `labels` is given (one class name or `None` per row), those labels
/// are kept instead of cleared and act as references for the Triton and
/// Deuteron rules.
#[pyfunction]
#[pyo3(signature = (
    xpos,
    ypos,
    order=None,
    reference_mode="any",
    proton_max_y=Thresholds::DEFAULT_PROTON_MAX_Y,
    alpha_max_x=Thresholds::DEFAULT_ALPHA_MAX_X,
    alpha_min_y=Thresholds::DEFAULT_ALPHA_MIN_Y,
    labels=None
))]
#[allow(clippy::too_many_arguments)]
fn classify_centroids(
    xpos: PyReadonlyArray1<f64>,
    ypos: PyReadonlyArray1<f64>,
    order: Option<Vec<usize>>,
    reference_mode: &str,
    proton_max_y: f64,
    alpha_max_x: f64,
    alpha_min_y: f64,
    labels: Option<Vec<Option<String>>>,
) -> PyResult<Vec<Option<&'static str>>> {
    let existing = labels.as_deref().map(parse_labels).transpose()?;
    let mut table = table_from_numpy("classify_centroids", &xpos, &ypos, existing.as_deref())?;

    let config = ClassifierConfig::new()
        .with_proton_max_y(proton_max_y)
        .with_alpha_max_x(alpha_max_x)
        .with_alpha_min_y(alpha_min_y)
        .with_reference_mode(parse_reference_mode(reference_mode)?)
        .with_visit_order(order.map_or(VisitOrder::RowIndex, VisitOrder::Explicit))
        .with_reset_labels(existing.is_none());

    let mut classifier = ParticleClassifier::new(config);
    let labeled = classifier
        .classify(&mut table)
        .map_err(|e| value_error("classify_centroids", e))?;

    Ok(labeled
        .iter()
        .map(|row| row.label.map(|class| class.label()))
        .collect())
}

/// Compute the (Xrel, Yrel) relative-position matrices.
#[pyfunction]
fn relative_positions<'py>(
    py: Python<'py>,
    xpos: PyReadonlyArray1<f64>,
    ypos: PyReadonlyArray1<f64>,
) -> PyResult<(Bound<'py, PyArray2<f64>>, Bound<'py, PyArray2<f64>>)> {
    let table = table_from_numpy("relative_positions", &xpos, &ypos, None)?;
    let relative = RelativePositions::compute(&table);
    Ok((
        PyArray2::from_owned_array(py, relative.x().to_owned()),
        PyArray2::from_owned_array(py, relative.y().to_owned()),
    ))
}

/// Python module for rustpid.
#[pymodule]
fn rustpid(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(classify_centroids, m)?)?;
    m.add_function(wrap_pyfunction!(relative_positions, m)?)?;
    m.add("PARTICLE_LABELS", ParticleClass::ALL.map(ParticleClass::label))?;
    Ok(())
}
