//! Map size heuristic.

use crate::error::{Error, Result};

/// Side length of a square map for `sample_count` training samples:
/// `ceil(sqrt(5 * sqrt(n)))`, i.e. roughly `5 * sqrt(n)` units in total.
pub fn grid_side(sample_count: usize) -> Result<usize> {
    if sample_count == 0 {
        return Err(Error::InsufficientData(
            "cannot size a map for zero samples".to_string(),
        ));
    }
    let units = 5.0 * (sample_count as f64).sqrt();
    Ok(units.sqrt().ceil() as usize)
}

#[cfg(test)]
mod test {
    use crate::calc::size::grid_side;
    use crate::Error;

    #[test]
    fn known_sizes() {
        assert_eq!(grid_side(1).unwrap(), 3);
        assert_eq!(grid_side(50).unwrap(), 6);
        assert_eq!(grid_side(150).unwrap(), 8);
        assert_eq!(grid_side(10_000).unwrap(), 23);
    }

    #[test]
    fn monotonic() {
        let mut last = 0;
        for n in 1..5000 {
            let side = grid_side(n).unwrap();
            assert!(side >= last);
            last = side;
        }
    }

    #[test]
    fn zero_samples() {
        assert!(matches!(grid_side(0), Err(Error::InsufficientData(_))));
    }
}
