//! Layered sigmoid perceptron module.

/// Defines the sigmoid activation
pub mod activation;
/// Defines a fully connected layer
pub mod layer;
/// Defines the cache shared by the forward and backward passes
pub mod forward_pass;
/// Defines the network, its training and pruning
pub mod network;
/// Defines a read-only view of a network
pub mod snapshot;
/// Defines serializable hyper-parameters
pub mod config;
/// Defines a builder for networks
pub mod builder;

pub use activation::{sigmoid, sigmoid_diff};
pub use layer::Layer;
pub use forward_pass::ForwardPass;
pub use network::Network;
pub use snapshot::NetworkSnapshot;
pub use config::NetworkConfig;
pub use builder::NetworkBuilder;
