use serde::{Serialize, Deserialize};
use std::fmt;

use super::layer::Layer;


/// A read-only copy of a network's shape and parameters.
///
/// `weights[i]` and `biases[i]` belong to layer `i + 1`,
/// since the input layer carries no parameters.
/// The `Display` implementation prints the layer sizes,
/// then every weight row, then the biases of each layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// Neuron count of every layer, the input layer included.
    pub layer_sizes: Vec<usize>,
    /// Incoming weight vectors of each parameterized layer.
    pub weights: Vec<Vec<Vec<f64>>>,
    /// Biases of each parameterized layer.
    pub biases: Vec<Vec<f64>>,
}


impl NetworkSnapshot {
    pub(crate) fn new(layer_sizes: Vec<usize>, layers: &[Layer]) -> Self {
        let weights = layers.iter()
            .map(|layer| layer.weights().to_vec())
            .collect();
        let biases = layers.iter()
            .map(|layer| layer.biases().to_vec())
            .collect();

        Self { layer_sizes, weights, biases }
    }


    /// Returns the total number of weights and biases.
    pub fn n_params(&self) -> usize {
        let n_weights = self.weights.iter()
            .flatten()
            .map(Vec::len)
            .sum::<usize>();
        let n_biases = self.biases.iter()
            .map(Vec::len)
            .sum::<usize>();
        n_weights + n_biases
    }
}


fn join(values: &[f64]) -> String {
    values.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}


impl fmt::Display for NetworkSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sizes = self.layer_sizes.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f, "LAYER SIZES:")?;
        writeln!(f, "{sizes}\n")?;

        writeln!(f, "WEIGHTS:")?;
        for row in self.weights.iter().flatten() {
            writeln!(f, "{}", join(row))?;
        }
        writeln!(f)?;

        writeln!(f, "BIASES:")?;
        for biases in &self.biases {
            writeln!(f, "{}", join(biases))?;
        }
        Ok(())
    }
}
