//! This file provides small vector helpers
//! shared by the forward and backward passes.


/// Returns the inner product of `v1` and `v2`.
#[inline(always)]
pub(crate) fn inner_product(v1: &[f64], v2: &[f64]) -> f64 {
    debug_assert_eq!(v1.len(), v2.len());
    v1.iter()
        .zip(v2)
        .map(|(a, b)| a * b)
        .sum::<f64>()
}


/// Multiplies `v1` by `v2` entrywise, reusing the storage of `v1`.
#[inline(always)]
pub(crate) fn hadamard_product(mut v1: Vec<f64>, v2: &[f64]) -> Vec<f64> {
    assert_eq!(v1.len(), v2.len());

    v1.iter_mut()
        .zip(v2)
        .for_each(|(a, b)| { *a *= b; });
    v1
}


/// Returns the index of the largest entry.
/// Ties are broken by the first occurrence.
/// Returns `None` for an empty slice.
#[inline(always)]
pub(crate) fn argmax(v: &[f64]) -> Option<usize> {
    let (first, rest) = v.split_first()?;
    let mut best = (0, *first);
    for (i, vi) in rest.iter().enumerate() {
        if best.1 < *vi {
            best = (i + 1, *vi);
        }
    }
    Some(best.0)
}


/// Convert a class label into a one-hot vector of length `n_class`.
#[inline(always)]
pub(crate) fn vectorize(label: usize, n_class: usize) -> Vec<f64> {
    assert!(label < n_class);
    let mut vec = vec![0.0; n_class];

    vec[label] = 1.0;
    vec
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_product_of_small_vectors() {
        assert_eq!(inner_product(&[1.0, 2.0, 3.0], &[4.0, -5.0, 6.0]), 12.0);
        assert_eq!(inner_product(&[], &[]), 0.0);
    }

    #[test]
    fn hadamard_product_multiplies_entrywise() {
        let v = hadamard_product(vec![1.0, 2.0, 3.0], &[0.5, 0.0, -1.0]);
        assert_eq!(v, vec![0.5, 0.0, -3.0]);
    }

    #[test]
    fn argmax_breaks_ties_by_first_occurrence() {
        assert_eq!(argmax(&[0.1, 0.7, 0.7, 0.2]), Some(1));
        assert_eq!(argmax(&[0.5, 0.5]), Some(0));
        assert_eq!(argmax(&[-1.0, -3.0, 2.0]), Some(2));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn vectorize_sets_one_entry() {
        assert_eq!(vectorize(2, 4), vec![0.0, 0.0, 1.0, 0.0]);
        assert_eq!(vectorize(0, 1), vec![1.0]);
    }
}
