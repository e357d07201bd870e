//! Nearest-neighbor search.

use crate::calc::metric;
use crate::data::DataFrame;

/// Nearest-neighbor by Euclidean distance.
///
/// Rows are scanned in order; on ties the first row wins.
/// # Returns
/// (index, distance)
pub fn nearest_neighbor(from: &[f64], to: &DataFrame) -> (usize, f64) {
    assert_eq!(from.len(), to.ncols());

    let mut min_dist = std::f64::MAX;
    let mut min_idx: usize = 0;
    for (idx_to, row_to) in to.iter_rows().enumerate() {
        let dist = metric::sq_euclidean(from, row_to);
        if dist < min_dist {
            min_dist = dist;
            min_idx = idx_to
        }
    }
    (min_idx, min_dist.sqrt())
}

/// Nearest-neighbors for multiple starting points, by Euclidean distance.
/// # Returns
/// Vec(index, distance), one per row of `from`
pub fn nearest_neighbors(from: &DataFrame, to: &DataFrame) -> Vec<(usize, f64)> {
    assert_eq!(from.ncols(), to.ncols());
    from.iter_rows()
        .map(|row| nearest_neighbor(row, to))
        .collect()
}

#[cfg(test)]
mod test {
    use crate::calc::nn;
    use crate::data::DataFrame;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn nn_simple() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let from = [0.0, 0.0, 0.0];
        let mut to = DataFrame::empty(&["A", "B", "C"]);

        for _i in 0..100 {
            to.push_row(&[
                rng.gen_range(0.5..1.0),
                rng.gen_range(0.5..1.0),
                rng.gen_range(0.5..1.0),
            ]);
        }
        to.push_row(&[0.0, 0.0, 0.2]);

        let (idx, dist) = nn::nearest_neighbor(&from, &to);
        assert_eq!(idx, 100);
        assert!((dist - 0.2).abs() < 1e-12);
    }

    #[test]
    fn ties_resolve_to_first_row() {
        let to = DataFrame::from_rows(
            &["A", "B"],
            &[vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, 0.0]],
        );
        let (idx, _) = nn::nearest_neighbor(&[0.0, 0.0], &to);
        assert_eq!(idx, 0);
    }

    #[test]
    fn nns_simple() {
        let from = DataFrame::from_rows(&["A"], &[vec![0.1], vec![0.9], vec![0.4]]);
        let to = DataFrame::from_rows(&["A"], &[vec![0.0], vec![1.0]]);

        let result = nn::nearest_neighbors(&from, &to);
        let indices: Vec<_> = result.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 0]);
    }
}
