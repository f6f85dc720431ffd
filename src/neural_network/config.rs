use serde::{Serialize, Deserialize};

use crate::error::{ConfigurationError, Result};
use super::network::Network;

/// Learning rate used when none is given.
pub const STEP_CONSTANT: f64 = 0.12;
/// Regularization strength used when none is given.
pub const LAMBDA: f64 = 1.0;
const INPUTS: usize = 4;
const OUTPUTS: usize = 3;


/// Hyper-parameters of a [`Network`].
///
/// Every field is optional in JSON; missing fields take the defaults
/// `layer_sizes = [4, 3]`, `step_constant = 0.12`, `lambda = 1.0`
/// and no seed.
/// ```
/// use mininet::NetworkConfig;
///
/// let config = NetworkConfig::from_json(
///     r#"{ "layer_sizes": [4, 6, 3], "seed": 7 }"#
/// ).unwrap();
/// assert_eq!(config.step_constant, 0.12);
///
/// let network = config.build().unwrap();
/// assert_eq!(network.layer_sizes(), vec![4, 6, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Neuron count of every layer, the input layer first.
    pub layer_sizes: Vec<usize>,
    /// Learning rate.
    pub step_constant: f64,
    /// Regularization strength.
    pub lambda: f64,
    /// Seed of the random source. `None` seeds from the operating system.
    pub seed: Option<u64>,
}


impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            layer_sizes: vec![INPUTS, OUTPUTS],
            step_constant: STEP_CONSTANT,
            lambda: LAMBDA,
            seed: None,
        }
    }
}


impl NetworkConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ConfigurationError::InvalidJson(e.to_string()).into())
    }


    /// Serialize this configuration as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ConfigurationError::InvalidJson(e.to_string()).into())
    }


    /// Construct a network with these hyper-parameters.
    pub fn build(&self) -> Result<Network> {
        let sizes = &self.layer_sizes[..];
        match self.seed {
            Some(seed) => Network::with_seed(
                sizes, self.step_constant, self.lambda, seed
            ),
            None => Network::new(sizes, self.step_constant, self.lambda),
        }
    }
}
