use super::activation::sigmoid;


/// The values cached by one forward pass.
///
/// `Network::forward` returns a `ForwardPass` and
/// `Network::backward` consumes it,
/// so a cache can be used by exactly one backward pass.
/// The backward pass rejects a pass that was computed
/// by another network, or before the network last changed
/// its parameters (`Network::backward`) or shape (`Network::dropout`).
#[derive(Debug, PartialEq)]
pub struct ForwardPass {
    /// `z[0]` is the raw input and
    /// `z[l]` is the pre-activation `W_l a_{l-1} + b_l` of layer `l`.
    pub(super) z: Vec<Vec<f64>>,
    /// `sigmoid(z[L])`.
    pub(super) output: Vec<f64>,
    /// Id of the network that computed this pass.
    pub(super) network: u64,
    pub(super) generation: u64,
}


impl ForwardPass {
    /// Returns the activation vector of the output layer.
    #[inline(always)]
    pub fn output(&self) -> &[f64] {
        &self.output[..]
    }


    /// Consumes the pass and returns the output activation.
    #[inline(always)]
    pub fn into_output(self) -> Vec<f64> {
        self.output
    }


    /// Returns the pre-activation of layer `l`.
    /// For `l = 0` this is the raw input.
    #[inline(always)]
    pub fn pre_activation(&self, l: usize) -> Option<&[f64]> {
        self.z.get(l).map(|z| &z[..])
    }


    /// Returns the number of cached layers, the input layer included.
    #[inline(always)]
    pub fn n_layers(&self) -> usize {
        self.z.len()
    }


    /// Returns the activation fed into layer `l + 1`.
    /// The input layer is never passed through the sigmoid.
    #[inline(always)]
    pub(super) fn activation(&self, l: usize) -> Vec<f64> {
        if l == 0 {
            self.z[0].clone()
        } else {
            sigmoid(&self.z[l])
        }
    }
}
