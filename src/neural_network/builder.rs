use crate::error::Result;
use super::{
    config::*,
    network::Network,
};


/// A builder that makes [`Network`].
/// ```
/// use mininet::NetworkBuilder;
///
/// let network = NetworkBuilder::new(4)
///     .append(8)
///     .append(3)
///     .step_constant(0.1)
///     .lambda(0.5)
///     .seed(1234)
///     .build()
///     .unwrap();
///
/// assert_eq!(network.layer_sizes(), vec![4, 8, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    config: NetworkConfig,
}


impl NetworkBuilder {
    /// Start a network whose input layer has `input_size` neurons.
    /// Call [`NetworkBuilder::append`] at least once
    /// to add the output layer.
    #[inline(always)]
    pub fn new(input_size: usize) -> Self {
        let config = NetworkConfig {
            layer_sizes: vec![input_size],
            ..NetworkConfig::default()
        };
        Self { config }
    }


    /// Append a new layer of `size` neurons to the current network.
    #[inline(always)]
    pub fn append(mut self, size: usize) -> Self {
        self.config.layer_sizes.push(size);
        self
    }


    /// Set the learning rate. Default is `0.12`.
    #[inline(always)]
    pub fn step_constant(mut self, step_constant: f64) -> Self {
        self.config.step_constant = step_constant;
        self
    }


    /// Set the regularization strength. Default is `1.0`.
    #[inline(always)]
    pub fn lambda(mut self, lambda: f64) -> Self {
        self.config.lambda = lambda;
        self
    }


    /// Seed the random source used for initialization,
    /// example sampling, and dropout.
    #[inline(always)]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }


    /// Returns the configuration collected so far.
    #[inline(always)]
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }


    /// Construct the network.
    #[inline]
    pub fn build(self) -> Result<Network> {
        self.config.build()
    }
}


impl From<NetworkConfig> for NetworkBuilder {
    fn from(config: NetworkConfig) -> Self {
        Self { config }
    }
}
