//! Trains a network to output its one-hot input index
//! modulo the number of classes.
//!
//! ```text
//! cargo run --example modulo [config.json]
//! ```
//! `RUST_LOG=mininet=debug` shows the training events.
use mininet::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use std::env;
use std::fs;

const TRAIN_DATA_SIZE: usize = 100;
const TEST_DATA_SIZE: usize = 100;
const TRAINING_EPOCHS: usize = 20;
const DATA_SEED: u64 = 20191020;


fn generate_data(
    rng: &mut StdRng,
    n_examples: usize,
    n_inputs: usize,
    n_class: usize,
) -> (Vec<Vec<f64>>, Vec<usize>)
{
    (0..n_examples)
        .map(|_| {
            let ans = rng.gen_range(0..n_inputs);
            let mut x = vec![0.0; n_inputs];
            x[ans] = 1.0;
            (x, ans % n_class)
        })
        .unzip()
}


fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match env::args().nth(1) {
        Some(path) => NetworkConfig::from_json(&fs::read_to_string(path)?)?,
        None => NetworkConfig::default(),
    };
    let mut network = config.build()?;
    network.stats();

    let n_inputs = network.input_size();
    let n_class = network.output_size();
    let mut rng = StdRng::seed_from_u64(DATA_SEED);
    let (x_train, y_train) = generate_data(
        &mut rng, TRAIN_DATA_SIZE, n_inputs, n_class
    );
    let (x_test, y_test) = generate_data(
        &mut rng, TEST_DATA_SIZE, n_inputs, n_class
    );

    let before = network.test(&x_test, &y_test, TEST_DATA_SIZE)?;
    println!("Percent of success BEFORE training: {}%\n", before * 100.0);
    println!("Initial weights and biases:");
    println!("{}", network.snapshot());

    network.train(&x_train, &y_train, TRAINING_EPOCHS)?;

    let after = network.test(&x_test, &y_test, TEST_DATA_SIZE)?;
    println!("Percent of success AFTER training: {}%\n", after * 100.0);
    println!("New weights and biases after training:");
    println!("{}", network.snapshot());

    // Prune half of the first hidden layer, if there is one.
    if network.n_layers() > 2 {
        let size = network.layer_sizes()[1];
        network.dropout(1, size / 2)?;

        let pruned = network.test(&x_test, &y_test, TEST_DATA_SIZE)?;
        println!("Percent of success AFTER dropout: {}%\n", pruned * 100.0);
        network.stats();
    }
    Ok(())
}
