//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data
use crate::error::{
    ConfigurationError,
    NetworkError,
    PreconditionViolation,
    Result,
};


/// Check whether the given layer sizes describe a valid network.
#[inline(always)]
pub(crate) fn layer_sizes(sizes: &[usize]) -> Result<()> {
    if sizes.len() < 2 {
        let got = sizes.len();
        return Err(ConfigurationError::TooFewLayers { got }.into());
    }

    if let Some(index) = sizes.iter().position(|&size| size == 0) {
        return Err(ConfigurationError::EmptyLayer { index }.into());
    }
    Ok(())
}


/// Check that a hyper-parameter is neither `NaN` nor infinite.
#[inline(always)]
pub(crate) fn finite(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ConfigurationError::NonFiniteParameter { name, value }.into());
    }
    Ok(())
}


/// Check the length of a single vector.
#[inline(always)]
pub(crate) fn length(what: &'static str, expected: usize, got: usize)
    -> Result<()>
{
    if expected != got {
        return Err(NetworkError::shape(what, expected, got));
    }
    Ok(())
}


/// Check whether a labelled sample fits the network.
///
/// `n_features` is the input layer size
/// and `n_class` is the output layer size.
#[inline(always)]
pub(crate) fn sample<T: AsRef<[f64]>>(
    inputs: &[T],
    labels: &[usize],
    n_features: usize,
    n_class: usize,
) -> Result<()>
{
    if inputs.len() != labels.len() {
        return Err(PreconditionViolation::LengthMismatch {
            inputs: inputs.len(),
            labels: labels.len(),
        }.into());
    }

    for (index, (x, &label)) in inputs.iter().zip(labels).enumerate() {
        length("input", n_features, x.as_ref().len())?;
        if label >= n_class {
            return Err(PreconditionViolation::LabelOutOfRange {
                index,
                label,
                n_class,
            }.into());
        }
    }
    Ok(())
}
