//! Geometry of the hexagonal lattice.
//!
//! Units are addressed by (row, col). Odd rows are shifted right by half a unit,
//! and rows are `sqrt(3) / 2` apart, so that all six neighbors of a unit lie at
//! plotting distance 1.

/// Vertical distance between two consecutive rows.
pub fn row_height() -> f64 {
    3f64.sqrt() / 2.0
}

/// Maps lattice indices to 2-D plotting coordinates (x, y).
pub fn to_plot_coordinates(row: usize, col: usize) -> (f64, f64) {
    let shift = if row % 2 == 1 { 0.5 } else { 0.0 };
    (col as f64 + shift, row as f64 * row_height())
}

/// Squared Euclidean distance between two units in plotting space.
pub fn plot_distance_sq(from: (usize, usize), to: (usize, usize)) -> f64 {
    let (x1, y1) = to_plot_coordinates(from.0, from.1);
    let (x2, y2) = to_plot_coordinates(to.0, to.1);
    (x1 - x2).powi(2) + (y1 - y2).powi(2)
}

/// Adjacent units of (row, col) on a `nrows` x `ncols` lattice, up to six.
pub fn neighbors(row: usize, col: usize, nrows: usize, ncols: usize) -> Vec<(usize, usize)> {
    let (row, col) = (row as i64, col as i64);
    // columns of the adjacent units in the rows above and below
    let (left, right) = if row % 2 == 1 {
        (col, col + 1)
    } else {
        (col - 1, col)
    };
    let candidates = [
        (row, col - 1),
        (row, col + 1),
        (row - 1, left),
        (row - 1, right),
        (row + 1, left),
        (row + 1, right),
    ];
    candidates
        .iter()
        .filter(|(r, c)| *r >= 0 && *c >= 0 && *r < nrows as i64 && *c < ncols as i64)
        .map(|(r, c)| (*r as usize, *c as usize))
        .collect()
}

#[cfg(test)]
mod test {
    use crate::calc::hex;
    use approx::assert_abs_diff_eq;

    #[test]
    fn same_row_one_apart() {
        for row in 0..4 {
            let (x1, y1) = hex::to_plot_coordinates(row, 2);
            let (x2, y2) = hex::to_plot_coordinates(row, 3);
            assert_abs_diff_eq!(x2 - x1, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(y2, y1, epsilon = 1e-12);
        }
    }

    #[test]
    fn consecutive_rows() {
        for row in 0..4 {
            let (x1, y1) = hex::to_plot_coordinates(row, 1);
            let (x2, y2) = hex::to_plot_coordinates(row + 1, 1);
            assert_abs_diff_eq!(y2 - y1, 3f64.sqrt() / 2.0, epsilon = 1e-12);
            assert_abs_diff_eq!((x2 - x1).abs(), 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn neighbors_are_isotropic() {
        let (nrows, ncols) = (6, 6);
        for row in 0..nrows {
            for col in 0..ncols {
                for n in hex::neighbors(row, col, nrows, ncols) {
                    assert_abs_diff_eq!(
                        hex::plot_distance_sq((row, col), n),
                        1.0,
                        epsilon = 1e-9
                    );
                }
            }
        }
    }

    #[test]
    fn neighbors_match_unit_distance() {
        let (nrows, ncols) = (5, 4);
        for row in 0..nrows {
            for col in 0..ncols {
                let mut expected = vec![];
                for r in 0..nrows {
                    for c in 0..ncols {
                        let d = hex::plot_distance_sq((row, col), (r, c));
                        if (d - 1.0).abs() < 1e-9 {
                            expected.push((r, c));
                        }
                    }
                }
                let mut found = hex::neighbors(row, col, nrows, ncols);
                found.sort();
                assert_eq!(found, expected);
            }
        }
    }

    #[test]
    fn neighbor_counts() {
        assert_eq!(hex::neighbors(2, 2, 5, 5).len(), 6);
        assert_eq!(hex::neighbors(0, 0, 5, 5).len(), 2);
        assert_eq!(hex::neighbors(1, 4, 5, 5).len(), 3);
        assert!(hex::neighbors(0, 0, 1, 1).is_empty());
    }
}
