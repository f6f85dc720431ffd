//! Error types returned by this crate.
use thiserror::Error;


/// Result type alias used throughout this crate.
pub type Result<T> = std::result::Result<T, NetworkError>;


/// Errors reported by [`Network`](crate::Network) and its helpers.
///
/// A failing call never leaves the network half-updated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// The network could not be configured.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A vector does not have the length the network expects.
    #[error("shape mismatch for {what}: expected length {expected}, got {got}")]
    ShapeMismatch {
        /// What was being checked, e.g. `"input"`.
        what: &'static str,
        /// The length the network expects.
        expected: usize,
        /// The length that was given.
        got: usize,
    },

    /// A call was made in a state where it is not allowed.
    #[error("precondition violated: {0}")]
    Precondition(#[from] PreconditionViolation),
}


impl NetworkError {
    pub(crate) fn shape(what: &'static str, expected: usize, got: usize)
        -> Self
    {
        Self::ShapeMismatch { what, expected, got }
    }
}


/// Reasons a network cannot be constructed or reconfigured.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Fewer than two layer sizes were given.
    #[error("a network needs at least 2 layers, got {got}")]
    TooFewLayers {
        /// The number of layer sizes given.
        got: usize,
    },

    /// A layer size of zero was given.
    #[error("layer {index} has no neurons")]
    EmptyLayer {
        /// The index of the empty layer.
        index: usize,
    },

    /// A hyper-parameter is `NaN` or infinite.
    #[error("`{name}` must be finite, got {value}")]
    NonFiniteParameter {
        /// The parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A JSON configuration could not be parsed.
    #[error("invalid configuration JSON: {0}")]
    InvalidJson(String),
}


/// Calls that were rejected because of the network's current state
/// or because of their arguments.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreconditionViolation {
    /// The network was updated or pruned after the forward pass.
    #[error(
        "forward pass belongs to generation {pass}, \
        but the network is at generation {network}"
    )]
    StaleForwardPass {
        /// Generation recorded in the forward pass.
        pass: u64,
        /// Current generation of the network.
        network: u64,
    },

    /// The forward pass was computed by another network.
    #[error("forward pass was computed by another network")]
    ForeignForwardPass,

    /// Dropout would leave a layer without neurons.
    #[error("cannot drop {requested} neurons from layer {layer} of size {size}")]
    DropTooMany {
        /// The layer index.
        layer: usize,
        /// The current size of the layer.
        size: usize,
        /// The number of neurons requested to drop.
        requested: usize,
    },

    /// A class label is not an index of the output layer.
    #[error("label {label} at example {index} is out of range for {n_class} classes")]
    LabelOutOfRange {
        /// The example index.
        index: usize,
        /// The offending label.
        label: usize,
        /// The output layer size.
        n_class: usize,
    },

    /// Inputs and labels have different lengths.
    #[error("{inputs} inputs but {labels} labels")]
    LengthMismatch {
        /// The number of inputs.
        inputs: usize,
        /// The number of labels.
        labels: usize,
    },

    /// Training for a positive number of epochs needs at least one example.
    #[error("cannot train for {epochs} epochs on an empty training set")]
    EmptyTrainingSet {
        /// The requested epochs.
        epochs: usize,
    },

    /// Evaluating on zero examples has no accuracy.
    #[error("cannot evaluate on 0 examples")]
    EmptyEvaluation,

    /// Fewer examples are available than were requested.
    #[error("requested {requested} examples, but only {available} are available")]
    NotEnoughExamples {
        /// The requested count.
        requested: usize,
        /// The number of available examples.
        available: usize,
    },
}
