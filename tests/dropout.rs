use mininet::prelude::*;


/// Tests for `Network::dropout`.
#[cfg(test)]
pub mod dropout_tests {
    use super::*;

    fn seeded(sizes: &[usize], seed: u64) -> Network {
        Network::with_seed(sizes, 0.12, 1.0, seed).unwrap()
    }

    /// Returns the original neuron index of every row of `pruned`.
    fn kept_positions(original: &Layer, pruned: &Layer) -> Vec<usize> {
        pruned.weights().iter()
            .zip(pruned.biases())
            .map(|(row, b)| {
                original.weights().iter()
                    .zip(original.biases())
                    .position(|(r, ob)| r == row && ob == b)
                    .expect("pruned neuron must come from the original layer")
            })
            .collect()
    }

    #[test]
    fn dropping_zero_neurons_is_a_no_op() {
        let mut network = seeded(&[3, 6, 4], 1);
        let before = network.snapshot();

        network.dropout(1, 0).unwrap();
        assert_eq!(network.snapshot(), before);

        // A pass computed before the call is still valid.
        let pass = network.forward([1.0, 0.0, 0.0]).unwrap();
        network.dropout(1, 0).unwrap();
        network.backward(pass, [1.0, 0.0, 0.0, 0.0]).unwrap();
    }

    #[test]
    fn input_and_output_layers_are_never_pruned() {
        let mut network = seeded(&[3, 6, 4], 2);
        let before = network.snapshot();

        for n in [0, 1, 2, 3, 4, 100] {
            network.dropout(0, n).unwrap();
            network.dropout(2, n).unwrap();
            network.dropout(7, n).unwrap();
        }
        assert_eq!(network.snapshot(), before);

        let mut single = seeded(&[2, 2], 3);
        let before = single.snapshot();
        single.dropout(1, 1).unwrap();
        assert_eq!(single.snapshot(), before);
    }

    #[test]
    fn dropping_a_whole_layer_is_rejected() {
        let mut network = seeded(&[3, 4, 2], 4);
        let before = network.snapshot();

        for n in [4, 5] {
            assert_eq!(
                network.dropout(1, n).unwrap_err(),
                NetworkError::from(PreconditionViolation::DropTooMany {
                    layer: 1,
                    size: 4,
                    requested: n,
                })
            );
        }
        assert_eq!(network.snapshot(), before);
    }

    #[test]
    fn pruning_keeps_surviving_parameters() {
        let (size, n_drop) = (6, 2);
        let mut network = seeded(&[3, size, 4], 5);
        let original = network.clone();

        network.dropout(1, n_drop).unwrap();
        assert_eq!(network.layer_sizes(), vec![3, size - n_drop, 4]);

        let old_hidden = original.layer(1).unwrap();
        let new_hidden = network.layer(1).unwrap();
        assert_eq!(new_hidden.shape(), (size - n_drop, 3));

        let kept = kept_positions(old_hidden, new_hidden);
        assert_eq!(kept.len(), size - n_drop);
        assert!(kept.windows(2).all(|w| w[0] < w[1]), "order must be kept");

        let old_output = original.layer(2).unwrap();
        let new_output = network.layer(2).unwrap();
        assert_eq!(new_output.shape(), (4, size - n_drop));
        assert_eq!(new_output.biases(), old_output.biases());
        for (new_row, old_row) in new_output.weights().iter()
            .zip(old_output.weights())
        {
            let expected = kept.iter()
                .map(|&k| old_row[k])
                .collect::<Vec<_>>();
            assert_eq!(new_row, &expected);
        }

        assert_eq!(network.layer(0), original.layer(0));
    }

    #[test]
    fn pruning_middle_of_deep_network() {
        let mut network = seeded(&[2, 5, 7, 3], 6);
        let original = network.clone();

        network.dropout(2, 3).unwrap();
        assert_eq!(network.layer_sizes(), vec![2, 5, 4, 3]);
        assert_eq!(network.layer(1), original.layer(1));

        let kept = kept_positions(
            original.layer(2).unwrap(),
            network.layer(2).unwrap(),
        );
        let old_rows = original.layer(3).unwrap().weights();
        let new_rows = network.layer(3).unwrap().weights();
        for (new_row, old_row) in new_rows.iter().zip(old_rows) {
            assert_eq!(new_row.len(), 4);
            for (p, &k) in kept.iter().enumerate() {
                assert_eq!(new_row[p], old_row[k]);
            }
        }
    }

    #[test]
    fn repeated_pruning_preserves_shape_invariant() {
        let mut network = seeded(&[4, 10, 8, 3], 7);

        network.dropout(1, 3).unwrap();
        network.dropout(2, 2).unwrap();
        network.dropout(1, 6).unwrap();
        assert_eq!(network.layer_sizes(), vec![4, 1, 6, 3]);

        let sizes = network.layer_sizes();
        for l in 1..network.n_layers() {
            let layer = network.layer(l).unwrap();
            assert!(layer.weights().iter().all(|w| w.len() == sizes[l - 1]));
            assert_eq!(layer.biases().len(), sizes[l]);
        }
    }

    #[test]
    fn stale_forward_pass_is_rejected() {
        let mut network = seeded(&[3, 5, 2], 8);
        let pass = network.forward([0.5, -0.5, 1.0]).unwrap();

        network.dropout(1, 2).unwrap();
        let after_dropout = network.snapshot();

        assert!(matches!(
            network.backward(pass, [1.0, 0.0]),
            Err(NetworkError::Precondition(
                PreconditionViolation::StaleForwardPass { pass: 0, network: 1 }
            ))
        ));
        assert_eq!(network.snapshot(), after_dropout);

        let fresh = network.forward([0.5, -0.5, 1.0]).unwrap();
        network.backward(fresh, [1.0, 0.0]).unwrap();
    }

    #[test]
    fn forward_pass_is_spent_by_backward() {
        let mut network = seeded(&[2, 3, 2], 11);
        let first = network.forward([1.0, 0.0]).unwrap();
        let second = network.forward([1.0, 0.0]).unwrap();
        assert_eq!(first, second);

        network.backward(first, [1.0, 0.0]).unwrap();
        let updated = network.snapshot();

        // Same generation tag as `first`, computed from the old weights.
        assert_eq!(
            network.backward(second, [1.0, 0.0]).unwrap_err(),
            NetworkError::from(
                PreconditionViolation::StaleForwardPass { pass: 0, network: 1 }
            )
        );
        assert_eq!(network.snapshot(), updated);
    }

    #[test]
    fn interleaved_forward_passes_are_rejected() {
        let mut network = seeded(&[2, 3, 2], 12);
        let p1 = network.forward([1.0, 0.0]).unwrap();
        let p2 = network.forward([0.0, 1.0]).unwrap();

        network.backward(p2, [0.0, 1.0]).unwrap();
        let updated = network.snapshot();

        assert!(matches!(
            network.backward(p1, [1.0, 0.0]),
            Err(NetworkError::Precondition(
                PreconditionViolation::StaleForwardPass { pass: 0, network: 1 }
            ))
        ));
        assert_eq!(network.snapshot(), updated);

        let p3 = network.forward([1.0, 0.0]).unwrap();
        network.backward(p3, [1.0, 0.0]).unwrap();
        let p4 = network.forward([1.0, 0.0]).unwrap();
        assert!(network.dropout(1, 1).is_ok());
        assert_eq!(
            network.backward(p4, [1.0, 0.0]).unwrap_err(),
            NetworkError::from(
                PreconditionViolation::StaleForwardPass { pass: 2, network: 3 }
            )
        );
    }

    #[test]
    fn forward_pass_of_same_shaped_network_is_rejected() {
        let other = seeded(&[2, 3, 2], 1);
        let mut network = seeded(&[2, 3, 2], 2);
        let before = network.snapshot();

        let pass = other.forward([1.0, 0.0]).unwrap();
        assert_eq!(
            network.backward(pass, [1.0, 0.0]).unwrap_err(),
            NetworkError::from(PreconditionViolation::ForeignForwardPass)
        );
        assert_eq!(network.snapshot(), before);

        // A clone is a different network as well.
        let mut twin = network.clone();
        let pass = network.forward([1.0, 0.0]).unwrap();
        assert_eq!(
            twin.backward(pass, [1.0, 0.0]).unwrap_err(),
            NetworkError::from(PreconditionViolation::ForeignForwardPass)
        );
        assert_eq!(twin.snapshot(), before);
    }

    #[test]
    fn pruned_network_still_trains() {
        let inputs = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        let labels = vec![0, 1, 0];

        let mut network = Network::with_seed(&[3, 6, 2], 0.12, 0.01, 9)
            .unwrap();
        network.train(&inputs, &labels, 30).unwrap();
        network.dropout(1, 4).unwrap();
        network.train(&inputs, &labels, 30).unwrap();

        assert_eq!(network.run(&inputs[0]).unwrap().len(), 2);
        let accuracy = network.test(&inputs, &labels, 3).unwrap();
        assert!((0.0..=1.0).contains(&accuracy));
    }

    #[test]
    fn pruning_is_reproducible_with_a_seed() {
        let prune = |seed: u64| {
            let mut network = seeded(&[3, 8, 2], 10);
            network.reseed(seed);
            network.dropout(1, 5).unwrap();
            network.snapshot()
        };
        assert_eq!(prune(42), prune(42));
    }
}
