//! Distances between prototype and sample vectors.

/// Squared Euclidean distance. Both slices must have the same length.
#[inline]
pub fn sq_euclidean(from: &[f64], to: &[f64]) -> f64 {
    debug_assert_eq!(from.len(), to.len());
    from.iter().zip(to).map(|(a, b)| (a - b) * (a - b)).sum()
}

/// Euclidean distance.
#[inline]
pub fn euclidean(from: &[f64], to: &[f64]) -> f64 {
    sq_euclidean(from, to).sqrt()
}

#[cfg(test)]
mod test {
    use crate::calc::metric::{euclidean, sq_euclidean};
    use approx::assert_abs_diff_eq;

    #[test]
    fn distance() {
        let a = [0.0, 0.0, 0.0];
        let b = [2.0, 2.0, 2.0];
        assert_abs_diff_eq!(sq_euclidean(&a, &b), 12.0);
        assert_abs_diff_eq!(euclidean(&a, &b), 12f64.sqrt());
        assert_eq!(euclidean(&b, &b), 0.0);
    }

    #[test]
    fn symmetric() {
        let a = [0.3, -1.0];
        let b = [1.3, 2.0];
        assert_eq!(sq_euclidean(&a, &b), sq_euclidean(&b, &a));
        assert_abs_diff_eq!(euclidean(&a, &b), 10f64.sqrt(), epsilon = 1e-12);
    }
}
