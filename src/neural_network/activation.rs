//! Sigmoid activation and its derivative.
//!
//! Both functions act elementwise and return a vector
//! of the same length as the input.

/// Evaluates the logistic function `1 / (1 + exp(-x))` at a single point.
///
/// For negative `x` the equivalent form `exp(x) / (1 + exp(x))` is used
/// so that `exp` is never evaluated at a large positive argument.
#[inline(always)]
pub fn logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}


/// Applies [`logistic`] to every entry of `x`.
#[inline]
pub fn sigmoid<T: AsRef<[f64]>>(x: T) -> Vec<f64> {
    let x = x.as_ref();
    x.iter()
        .map(|xi| logistic(*xi))
        .collect()
}


/// Computes `sigmoid(x) * (1 - sigmoid(x))` for every entry of `x`.
#[inline]
pub fn sigmoid_diff<T: AsRef<[f64]>>(x: T) -> Vec<f64> {
    let x = x.as_ref();
    x.iter()
        .map(|xi| {
            let s = logistic(*xi);
            s * (1.0 - s)
        })
        .collect()
}
