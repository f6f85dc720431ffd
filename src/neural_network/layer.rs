use fixedbitset::FixedBitSet;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::common::utils;
use crate::error::{NetworkError, Result};


/// One fully connected layer of sigmoid neurons.
///
/// The `j`-th row of `weights` is the incoming weight vector
/// of neuron `j`, so every row has the length of the previous layer.
/// ```text
///  prev          this
///   O ---w[0]---> O   b[0]
///   O ---w[1]---> O   b[1]
///   O
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    nrow: usize,
    ncol: usize,
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
}


impl Layer {
    /// Allocates a layer of `size` neurons fed by `previous_size` inputs.
    /// Every weight and bias is zero.
    #[inline(always)]
    pub fn zeros(previous_size: usize, size: usize) -> Self {
        Self {
            nrow: size,
            ncol: previous_size,
            weights: vec![vec![0.0; previous_size]; size],
            biases: vec![0.0; size],
        }
    }


    /// Allocates a layer of `size` neurons fed by `previous_size` inputs.
    /// Weights and biases are drawn from the standard normal distribution.
    #[inline(always)]
    pub fn random<R>(previous_size: usize, size: usize, rng: &mut R) -> Self
        where R: Rng + ?Sized,
    {
        let mut draw = || -> f64 { StandardNormal.sample(&mut *rng) };
        let weights = (0..size).map(|_|
                (0..previous_size)
                    .map(|_| draw())
                    .collect::<Vec<f64>>()
            )
            .collect::<Vec<_>>();
        let biases = (0..size)
            .map(|_| draw())
            .collect::<Vec<f64>>();

        Self { nrow: size, ncol: previous_size, weights, biases, }
    }


    /// Builds a layer from caller-supplied parameters.
    ///
    /// Fails if the layer has no neurons,
    /// if `weights` and `biases` disagree on the neuron count,
    /// or if the weight rows have different lengths.
    pub fn from_parts(weights: Vec<Vec<f64>>, biases: Vec<f64>)
        -> Result<Self>
    {
        if weights.is_empty() {
            return Err(NetworkError::shape("layer neurons", 1, 0));
        }
        if weights.len() != biases.len() {
            return Err(
                NetworkError::shape("biases", weights.len(), biases.len())
            );
        }
        let ncol = weights[0].len();
        if let Some(row) = weights.iter().find(|row| row.len() != ncol) {
            return Err(NetworkError::shape("weight row", ncol, row.len()));
        }

        Ok(Self { nrow: weights.len(), ncol, weights, biases, })
    }


    /// Returns the number of neurons in this layer.
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.nrow
    }


    /// Returns the number of inputs each neuron receives,
    /// i.e., the size of the previous layer.
    #[inline(always)]
    pub fn input_size(&self) -> usize {
        self.ncol
    }


    /// Returns `(size, input_size)`.
    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrow, self.ncol)
    }


    /// Returns the incoming weight vectors, one row per neuron.
    #[inline(always)]
    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights[..]
    }


    /// Returns the biases, one per neuron.
    #[inline(always)]
    pub fn biases(&self) -> &[f64] {
        &self.biases[..]
    }


    /// Returns the number of trainable parameters.
    #[inline(always)]
    pub fn n_params(&self) -> usize {
        self.nrow * (self.ncol + 1)
    }


    /// Computes the pre-activation `u = Wx + b`.
    #[inline(always)]
    pub(crate) fn affine<T: AsRef<[f64]>>(&self, x: T) -> Vec<f64> {
        let x = x.as_ref();
        assert_eq!(self.ncol, x.len());

        self.weights.par_iter()
            .zip(&self.biases)
            .map(|(w, b)| utils::inner_product(w, x) + b)
            .collect::<Vec<f64>>()
    }


    /// Computes `W^T delta`, the error reaching each input of this layer.
    #[inline(always)]
    pub(crate) fn back_project(&self, delta: &[f64]) -> Vec<f64> {
        assert_eq!(self.nrow, delta.len());

        let mut sum = vec![0.0; self.ncol];
        self.weights.iter()
            .zip(delta)
            .for_each(|(row, d)| {
                sum.iter_mut()
                    .zip(row)
                    .for_each(|(s, w)| { *s += w * d; });
            });
        sum
    }


    /// Applies one additive update step.
    ///
    /// - `b[j] += rate * delta[j]`
    /// - `w[j][i] += rate * delta[j] * input[i] + decay * w[j][i]`
    #[inline(always)]
    pub(crate) fn update(
        &mut self,
        rate: f64,
        decay: f64,
        delta: &[f64],
        input: &[f64],
    )
    {
        assert_eq!(self.nrow, delta.len());
        assert_eq!(self.ncol, input.len());

        self.biases.iter_mut()
            .zip(delta)
            .for_each(|(b, d)| { *b += rate * d; });

        self.weights.iter_mut()
            .zip(delta)
            .for_each(|(row, d)| {
                let scaled = rate * d;
                row.iter_mut()
                    .zip(input)
                    .for_each(|(w, x)| { *w += scaled * x + decay * *w; });
            });
    }


    /// Replaces this layer's neurons with the ones not marked in `dropped`.
    /// The relative order of the kept neurons is preserved.
    pub(crate) fn retain_neurons(&mut self, dropped: &FixedBitSet) {
        let nrow = self.nrow - dropped.count_ones(..);

        let mut weights = Vec::with_capacity(nrow);
        let mut biases = Vec::with_capacity(nrow);
        for (j, (row, b)) in self.weights.iter().zip(&self.biases).enumerate() {
            if dropped.contains(j) { continue; }
            weights.push(row.clone());
            biases.push(*b);
        }
        assert_eq!(weights.len(), nrow);

        self.weights = weights;
        self.biases = biases;
        self.nrow = nrow;
    }


    /// Removes the input positions marked in `dropped`
    /// from every incoming weight vector.
    /// The relative order of the kept positions is preserved.
    pub(crate) fn retain_inputs(&mut self, dropped: &FixedBitSet) {
        let ncol = self.ncol - dropped.count_ones(..);

        let weights = self.weights.iter()
            .map(|row| {
                let new_row = row.iter()
                    .enumerate()
                    .filter_map(|(k, w)| (!dropped.contains(k)).then_some(*w))
                    .collect::<Vec<f64>>();
                assert_eq!(new_row.len(), ncol);
                new_row
            })
            .collect::<Vec<_>>();

        self.weights = weights;
        self.ncol = ncol;
    }
}
