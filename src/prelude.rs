//! Exports the network, its builder, and the error types.
//! 
pub use crate::neural_network::{
    // Network
    Network,
    NetworkBuilder,
    NetworkConfig,


    // Views ------------------------------------
    NetworkSnapshot,
    ForwardPass,
    Layer,
};


pub use crate::error::{
    NetworkError,
    ConfigurationError,
    PreconditionViolation,
};
