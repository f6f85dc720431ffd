use colored::Colorize;
use fixedbitset::FixedBitSet;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rand::seq::index;
use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

use std::sync::atomic::{AtomicU64, Ordering};

use crate::common::{checker, utils};
use crate::error::{PreconditionViolation, Result};

use super::{
    activation::*,
    forward_pass::ForwardPass,
    layer::Layer,
    snapshot::NetworkSnapshot,
};

const WIDTH: usize = 7;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);


/// Returns an id that no other network in this process has.
#[inline(always)]
fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}


/// A layered perceptron with sigmoid activations.
/// ```text
///           O
///   O                 O
///           O
///   O                 O
///           O
///   O                 O
///           O
///  L0      L1  ...    LL
/// ```
/// Layer `L0` is the input layer. It only has a size.
/// Every other layer `Ll` computes `sigmoid(W_l a + b_l)`
/// for the activation `a` of the previous layer
/// (the raw input for `l = 1`).
///
/// Layers are numbered as above in every method of this struct,
/// so `0` is the input layer and `n_layers() - 1` is the output layer.
///
/// # Example
/// ```
/// use mininet::Network;
///
/// let inputs = vec![
///     vec![1.0, 0.0, 0.0, 0.0],
///     vec![0.0, 1.0, 0.0, 0.0],
///     vec![0.0, 0.0, 1.0, 0.0],
///     vec![0.0, 0.0, 0.0, 1.0],
/// ];
/// let labels = vec![0, 1, 2, 0];
///
/// let mut network = Network::with_seed(&[4, 5, 3], 0.12, 1.0, 1234)
///     .unwrap();
/// network.train(&inputs, &labels, 20).unwrap();
/// network.dropout(1, 2).unwrap();
///
/// let accuracy = network.test(&inputs, &labels, 4).unwrap();
/// assert!((0.0..=1.0).contains(&accuracy));
/// assert_eq!(network.layer_sizes(), vec![4, 3, 3]);
/// ```
///
/// Cloning a network gives the clone a new identity,
/// so forward passes of the original are rejected by the clone.
#[derive(Debug)]
pub struct Network {
    id: u64,
    input_size: usize,
    layers: Vec<Layer>,
    step_constant: f64,
    lambda: f64,
    training_set_size: usize,
    generation: u64,
    rng: StdRng,
}


impl Network {
    /// Construct a new network with randomly initialized parameters.
    ///
    /// `layer_sizes[0]` is the input size and
    /// the last entry is the number of classes.
    /// The random source is seeded from the operating system.
    /// Use [`Network::with_seed`] for reproducible runs.
    #[inline]
    pub fn new(layer_sizes: &[usize], step_constant: f64, lambda: f64)
        -> Result<Self>
    {
        let mut rng = StdRng::from_entropy();
        Self::with_rng(layer_sizes, step_constant, lambda, &mut rng)
    }


    /// Same as [`Network::new`], with a seeded random source.
    #[inline]
    pub fn with_seed(
        layer_sizes: &[usize],
        step_constant: f64,
        lambda: f64,
        seed: u64,
    ) -> Result<Self>
    {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::with_rng(layer_sizes, step_constant, lambda, &mut rng)
    }


    /// Same as [`Network::new`], with the given random source.
    ///
    /// `rng` draws the initial parameters and then one `u64`
    /// that seeds the network's own [`StdRng`],
    /// which [`Network::train`] and [`Network::dropout`] sample from.
    /// A deterministic `rng` therefore gives a deterministic network.
    pub fn with_rng<R>(
        layer_sizes: &[usize],
        step_constant: f64,
        lambda: f64,
        rng: &mut R,
    ) -> Result<Self>
        where R: Rng + ?Sized,
    {
        checker::layer_sizes(layer_sizes)?;
        checker::finite("step_constant", step_constant)?;
        checker::finite("lambda", lambda)?;

        let layers = layer_sizes.windows(2)
            .map(|pair| Layer::random(pair[0], pair[1], &mut *rng))
            .collect::<Vec<_>>();
        let own = StdRng::seed_from_u64(rng.gen());

        debug!(?layer_sizes, step_constant, lambda, "constructed network");
        Ok(Self::assemble(layer_sizes[0], layers, step_constant, lambda, own))
    }


    /// Construct a network from hand-made layers.
    ///
    /// `layers[0]` must take `input_size` inputs and
    /// every following layer must take as many inputs
    /// as its predecessor has neurons.
    ///
    /// The random source used by `train` and `dropout`
    /// is seeded from the operating system.
    /// Use [`Network::from_layers_with_seed`] for reproducible runs.
    pub fn from_layers(
        input_size: usize,
        layers: Vec<Layer>,
        step_constant: f64,
        lambda: f64,
    ) -> Result<Self>
    {
        let rng = StdRng::from_entropy();
        Self::from_layers_with_rng(input_size, layers, step_constant, lambda, rng)
    }


    /// Same as [`Network::from_layers`], with a seeded random source.
    pub fn from_layers_with_seed(
        input_size: usize,
        layers: Vec<Layer>,
        step_constant: f64,
        lambda: f64,
        seed: u64,
    ) -> Result<Self>
    {
        let rng = StdRng::seed_from_u64(seed);
        Self::from_layers_with_rng(input_size, layers, step_constant, lambda, rng)
    }


    fn from_layers_with_rng(
        input_size: usize,
        layers: Vec<Layer>,
        step_constant: f64,
        lambda: f64,
        rng: StdRng,
    ) -> Result<Self>
    {
        let mut sizes = Vec::with_capacity(layers.len() + 1);
        sizes.push(input_size);
        for layer in &layers {
            let previous = sizes[sizes.len() - 1];
            checker::length("layer inputs", previous, layer.input_size())?;
            sizes.push(layer.size());
        }
        checker::layer_sizes(&sizes[..])?;
        checker::finite("step_constant", step_constant)?;
        checker::finite("lambda", lambda)?;

        Ok(Self::assemble(input_size, layers, step_constant, lambda, rng))
    }


    fn assemble(
        input_size: usize,
        layers: Vec<Layer>,
        step_constant: f64,
        lambda: f64,
        rng: StdRng,
    ) -> Self
    {
        Self {
            id: next_id(),
            input_size,
            layers,
            step_constant,
            lambda,
            training_set_size: 0,
            generation: 0,
            rng,
        }
    }


    /// Replace the random source used by `train` and `dropout`.
    #[inline(always)]
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }


    /// Set the learning rate.
    pub fn set_step_constant(&mut self, step_constant: f64) -> Result<()> {
        checker::finite("step_constant", step_constant)?;
        self.step_constant = step_constant;
        Ok(())
    }


    /// Set the regularization strength.
    pub fn set_lambda(&mut self, lambda: f64) -> Result<()> {
        checker::finite("lambda", lambda)?;
        self.lambda = lambda;
        Ok(())
    }


    /// Returns the learning rate.
    #[inline(always)]
    pub fn step_constant(&self) -> f64 {
        self.step_constant
    }


    /// Returns the regularization strength.
    #[inline(always)]
    pub fn lambda(&self) -> f64 {
        self.lambda
    }


    /// Returns the training set size of the most recent call to `train`,
    /// or `0` if the network has never been trained.
    #[inline(always)]
    pub fn training_set_size(&self) -> usize {
        self.training_set_size
    }


    /// Returns the size of the input layer.
    #[inline(always)]
    pub fn input_size(&self) -> usize {
        self.input_size
    }


    /// Returns the size of the output layer.
    #[inline(always)]
    pub fn output_size(&self) -> usize {
        self.output_layer().size()
    }


    /// Returns the number of layers, the input layer included.
    #[inline(always)]
    pub fn n_layers(&self) -> usize {
        self.layers.len() + 1
    }


    /// Returns the neuron count of every layer, the input layer included.
    pub fn layer_sizes(&self) -> Vec<usize> {
        std::iter::once(self.input_size)
            .chain(self.layers.iter().map(Layer::size))
            .collect()
    }


    /// Returns layer `l`.
    /// The input layer has no parameters, so `layer(0)` is `None`.
    #[inline(always)]
    pub fn layer(&self, l: usize) -> Option<&Layer> {
        l.checked_sub(1).and_then(|i| self.layers.get(i))
    }


    /// Returns every layer that carries parameters,
    /// i.e., layers `1, 2, ..., n_layers() - 1`.
    #[inline(always)]
    pub fn layers(&self) -> &[Layer] {
        &self.layers[..]
    }


    /// Returns a copy of the sizes and parameters of this network.
    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot::new(self.layer_sizes(), &self.layers[..])
    }


    #[inline(always)]
    fn output_layer(&self) -> &Layer {
        // `checker::layer_sizes` guarantees at least one parameterized layer.
        &self.layers[self.layers.len() - 1]
    }


    /// Feeds `input` forward and returns the cached pre-activations.
    /// Pass the result to [`Network::backward`] to update the network.
    pub fn forward<T: AsRef<[f64]>>(&self, input: T) -> Result<ForwardPass> {
        let input = input.as_ref();
        checker::length("input", self.input_size, input.len())?;

        let mut z = Vec::with_capacity(self.n_layers());
        z.push(input.to_vec());

        let mut alpha = input.to_vec();
        for layer in &self.layers {
            let u = layer.affine(&alpha);
            alpha = sigmoid(&u);
            z.push(u);
        }

        Ok(ForwardPass {
            z,
            output: alpha,
            network: self.id,
            generation: self.generation,
        })
    }


    /// Evaluate the given input and return the output activation.
    #[inline]
    pub fn run<T: AsRef<[f64]>>(&self, input: T) -> Result<Vec<f64>> {
        self.forward(input).map(ForwardPass::into_output)
    }


    /// Backpropagates `target` through the network
    /// and updates every weight and bias in place.
    ///
    /// The error signal of the output layer is
    /// `t * (1 - a) - a * (1 - t)` and the update is added,
    /// together with the term `lambda / n * w` for each weight,
    /// where `n` is the training set size of the latest `train` call.
    /// Before any call to `train`, the latter term is skipped.
    ///
    /// `pass` must come from the latest [`Network::forward`] call
    /// on this network since its parameters or shape last changed.
    /// Any other pass is rejected, because every successful
    /// `backward` and `dropout` invalidates the outstanding passes.
    pub fn backward<T: AsRef<[f64]>>(&mut self, pass: ForwardPass, target: T)
        -> Result<()>
    {
        let target = target.as_ref();
        self.check_pass(&pass)?;
        checker::length("target", self.output_size(), target.len())?;

        let n_layers = self.layers.len();

        // `deltas[i]` is the error signal of layer `i + 1`.
        let mut deltas = Vec::with_capacity(n_layers);
        let delta = pass.output.iter()
            .zip(target)
            .map(|(a, t)| t * (1.0 - a) - a * (1.0 - t))
            .collect::<Vec<f64>>();
        deltas.push(delta);

        for l in (1..n_layers).rev() {
            let downstream = &deltas[deltas.len() - 1];
            let sum = self.layers[l].back_project(downstream);
            let delta = utils::hadamard_product(sigmoid_diff(&pass.z[l]), &sum);
            deltas.push(delta);
        }
        deltas.reverse();

        let decay = if self.training_set_size == 0 {
            0.0
        } else {
            self.lambda / self.training_set_size as f64
        };
        let rate = self.step_constant;
        self.layers.iter_mut()
            .zip(&deltas)
            .enumerate()
            .for_each(|(l, (layer, delta))| {
                let input = pass.activation(l);
                layer.update(rate, decay, delta, &input);
            });
        self.generation += 1;
        Ok(())
    }


    fn check_pass(&self, pass: &ForwardPass) -> Result<()> {
        if pass.network != self.id {
            return Err(PreconditionViolation::ForeignForwardPass.into());
        }
        if pass.generation != self.generation {
            return Err(PreconditionViolation::StaleForwardPass {
                pass: pass.generation,
                network: self.generation,
            }.into());
        }
        checker::length("forward pass", self.n_layers(), pass.n_layers())?;
        for (size, z) in self.layer_sizes().into_iter().zip(&pass.z) {
            checker::length("forward pass layer", size, z.len())?;
        }
        Ok(())
    }


    /// Trains the network by single-example stochastic updates.
    ///
    /// Each of the `epochs` iterations draws one example uniformly
    /// at random (with replacement), runs a forward pass,
    /// and backpropagates the one-hot vector of its label.
    ///
    /// Every example is validated before the first update,
    /// so a failing call leaves the network untouched.
    pub fn train<T: AsRef<[f64]>>(
        &mut self,
        inputs: &[T],
        labels: &[usize],
        epochs: usize,
    ) -> Result<()>
    {
        let n_class = self.output_size();
        checker::sample(inputs, labels, self.input_size, n_class)?;
        let n_examples = inputs.len();
        if n_examples == 0 && epochs > 0 {
            return Err(PreconditionViolation::EmptyTrainingSet { epochs }.into());
        }

        self.training_set_size = n_examples;
        info!(n_examples, epochs, "start training");
        for epoch in 0..epochs {
            let i = self.rng.gen_range(0..n_examples);
            trace!(epoch, example = i, "training step");

            let pass = self.forward(&inputs[i])?;
            let target = utils::vectorize(labels[i], n_class);
            self.backward(pass, target)?;
        }
        info!(epochs, "finished training");
        Ok(())
    }


    /// Returns the fraction of the first `count` examples
    /// whose label equals the arg-max of the output activation.
    /// Ties are broken by the smallest index.
    pub fn test<T>(&self, inputs: &[T], labels: &[usize], count: usize)
        -> Result<f64>
        where T: AsRef<[f64]> + Sync,
    {
        if count == 0 {
            return Err(PreconditionViolation::EmptyEvaluation.into());
        }
        let available = inputs.len().min(labels.len());
        if count > available {
            return Err(PreconditionViolation::NotEnoughExamples {
                requested: count,
                available,
            }.into());
        }

        let hits = inputs[..count].par_iter()
            .zip(&labels[..count])
            .map(|(x, &y)| {
                let output = self.run(x)?;
                Ok(utils::argmax(&output) == Some(y))
            })
            .collect::<Result<Vec<bool>>>()?
            .into_iter()
            .filter(|hit| *hit)
            .count();

        Ok(hits as f64 / count as f64)
    }


    /// Permanently removes `n_drop` randomly chosen neurons
    /// from the hidden layer `layer`.
    ///
    /// The incoming weight vectors of layer `layer + 1` lose
    /// the entries of the removed neurons,
    /// so every row still matches the size of its previous layer.
    /// Asking to prune the input or output layer is a no-op.
    ///
    /// Every [`ForwardPass`] computed before a successful pruning
    /// is rejected by [`Network::backward`].
    pub fn dropout(&mut self, layer: usize, n_drop: usize) -> Result<()> {
        let last = self.layers.len();
        if layer == 0 || layer >= last {
            warn!(layer, n_drop, "dropout ignored for the input/output layer");
            return Ok(());
        }
        if n_drop == 0 {
            return Ok(());
        }

        let size = self.layers[layer - 1].size();
        if n_drop >= size {
            return Err(PreconditionViolation::DropTooMany {
                layer,
                size,
                requested: n_drop,
            }.into());
        }

        let mut dropped = FixedBitSet::with_capacity(size);
        dropped.extend(index::sample(&mut self.rng, size, n_drop).iter());

        self.layers[layer - 1].retain_neurons(&dropped);
        self.layers[layer].retain_inputs(&dropped);
        self.generation += 1;

        info!(
            layer,
            n_drop,
            size = self.layers[layer - 1].size(),
            dropped = ?dropped.ones().collect::<Vec<_>>(),
            "pruned neurons"
        );
        Ok(())
    }


    /// Prints stats of this network.
    pub fn stats(&self) {
        println!("{}", "Stats".bold());
        println!("----------------");
        println!(
            "\t[{: >9}] [size: {: >WIDTH$}]",
            "Input".bold().red(),
            self.input_size,
        );
        for (l, layer) in self.layers.iter().enumerate() {
            let (nrow, ncol) = layer.shape();
            let n_params = layer.n_params();
            println!(
                "\t[Layer {k: >3}] \
                [input: {ncol: >WIDTH$}]\t\
                [output: {nrow: >WIDTH$}]\t\
                [params: {n_params: >WIDTH$}]",
                k = l + 1
            );
        }
        println!(
            "\t[{}: {}] [{}: {}]",
            "step".bold().blue(),
            self.step_constant,
            "lambda".bold().blue(),
            self.lambda,
        );
        println!("----------------");
    }
}


impl From<&Network> for NetworkSnapshot {
    fn from(network: &Network) -> Self {
        network.snapshot()
    }
}


impl Clone for Network {
    fn clone(&self) -> Self {
        Self {
            id: next_id(),
            input_size: self.input_size,
            layers: self.layers.clone(),
            step_constant: self.step_constant,
            lambda: self.lambda,
            training_set_size: self.training_set_size,
            generation: self.generation,
            rng: self.rng.clone(),
        }
    }
}
