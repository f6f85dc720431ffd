#![warn(missing_docs)]

//!
//! A crate that provides a small feed-forward neural network
//! with sigmoid activations.
//!
//! - Training is stochastic:
//!     each step draws one labelled example at random,
//!     runs a forward pass,
//!     and backpropagates the one-hot vector of its label.
//!     Updates add `step_constant * delta` and
//!     a regularization term `lambda / n * w` to each weight.
//!
//! - Evaluation reports the fraction of examples
//!     whose arg-max output equals the label.
//!
//! - Dropout here is structural:
//!     [`Network::dropout`] permanently removes neurons
//!     from a hidden layer and reshapes the next layer's weights.
//!
//! ```
//! use mininet::prelude::*;
//!
//! let inputs = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
//! let labels = vec![1, 0];
//!
//! let mut network = NetworkBuilder::new(2)
//!     .append(4)
//!     .append(2)
//!     .lambda(0.01)
//!     .seed(0)
//!     .build()
//!     .unwrap();
//! network.train(&inputs, &labels, 100).unwrap();
//!
//! let accuracy = network.test(&inputs, &labels, 2).unwrap();
//! println!("accuracy: {accuracy}");
//! println!("{}", network.snapshot());
//! ```

pub mod error;
pub(crate) mod common;
pub mod neural_network;
pub mod prelude;


pub use error::{
    NetworkError,
    ConfigurationError,
    PreconditionViolation,
    Result,
};

pub use neural_network::{
    Network,
    NetworkBuilder,
    NetworkConfig,
    NetworkSnapshot,
    ForwardPass,
    Layer,
    sigmoid,
    sigmoid_diff,
};
