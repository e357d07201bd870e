//! Numeric layout of a trained map, for renderers.
//!
//! Nothing is drawn here. A [`MapLayout`] holds unit positions on the hexagonal
//! plotting plane, the U-matrix, and where every training sample lands.

use crate::data::{DataFrame, Quality};
use crate::error::{Error, Result};
use crate::map::som::Som;
use serde::Serialize;
use std::collections::BTreeMap;

/// One map unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitInfo {
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub x: f64,
    pub y: f64,
    /// Mean distance to the prototypes of adjacent units.
    pub u_distance: f64,
    /// `u_distance` divided by the largest value of the map, in [0, 1].
    pub u_scaled: f64,
    /// Number of training samples of each class won by this unit.
    pub hits: BTreeMap<Quality, usize>,
}

/// Winning unit of one training sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleHit {
    pub sample: usize,
    pub label: Quality,
    pub row: usize,
    pub col: usize,
    pub x: f64,
    pub y: f64,
}

/// Everything a collaborator needs to draw a trained map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayout {
    pub nrows: usize,
    pub ncols: usize,
    pub units: Vec<UnitInfo>,
    pub samples: Vec<SampleHit>,
}

impl MapLayout {
    /// Builds the layout of `som` for normalized `samples` with index-aligned `labels`.
    pub fn build(som: &Som, samples: &DataFrame, labels: &[Quality]) -> Result<Self> {
        if labels.len() != samples.nrows() {
            return Err(Error::DimensionMismatch {
                expected: samples.nrows(),
                actual: labels.len(),
            });
        }
        let umatrix = som.neighbor_distance_matrix()?;
        let winners = som.winners(samples)?;

        let u_max = umatrix.data().iter().cloned().fold(0.0, f64::max);
        let mut units: Vec<_> = (0..som.nrows() * som.ncols())
            .map(|index| {
                let (row, col) = som.to_row_col(index);
                let (x, y) = som.to_plot_coordinates(row, col);
                let u_distance = *umatrix.get(row, col);
                UnitInfo {
                    index,
                    row,
                    col,
                    x,
                    y,
                    u_distance,
                    u_scaled: if u_max > 0.0 { u_distance / u_max } else { 0.0 },
                    hits: Quality::ALL.iter().map(|q| (*q, 0)).collect(),
                }
            })
            .collect();

        let samples = winners
            .iter()
            .zip(labels)
            .enumerate()
            .map(|(sample, ((row, col), label))| {
                let unit = &mut units[som.to_index(*row, *col)];
                *unit.hits.entry(*label).or_insert(0) += 1;
                SampleHit {
                    sample,
                    label: *label,
                    row: *row,
                    col: *col,
                    x: unit.x,
                    y: unit.y,
                }
            })
            .collect();

        Ok(MapLayout {
            nrows: som.nrows(),
            ncols: som.ncols(),
            units,
            samples,
        })
    }
}

#[cfg(test)]
mod test {
    use crate::data::{DataFrame, Quality};
    use crate::map::layout::MapLayout;
    use crate::map::som::Som;
    use approx::assert_abs_diff_eq;

    fn som() -> Som {
        let weights = DataFrame::from_rows(
            &["A"],
            &[vec![0.0], vec![1.0], vec![0.0], vec![3.0]],
        );
        Som::with_weights(2, 2, weights).unwrap()
    }

    #[test]
    fn layout() {
        let samples = DataFrame::from_rows(&["A"], &[vec![0.1], vec![2.8], vec![2.9]]);
        let labels = [Quality::Good, Quality::Excellent, Quality::Excellent];
        let layout = MapLayout::build(&som(), &samples, &labels).unwrap();

        assert_eq!((layout.nrows, layout.ncols), (2, 2));
        assert_eq!(layout.units.len(), 4);
        assert_eq!(layout.samples.len(), 3);

        let top = layout.units.iter().map(|u| u.u_scaled).fold(0.0, f64::max);
        assert_abs_diff_eq!(top, 1.0, epsilon = 1e-12);

        let last = &layout.units[3];
        assert_eq!((last.row, last.col), (1, 1));
        assert_abs_diff_eq!(last.x, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(last.y, 3f64.sqrt() / 2.0, epsilon = 1e-12);
        assert_eq!(last.hits[&Quality::Excellent], 2);
        assert_eq!(last.hits[&Quality::Good], 0);
        assert_eq!(layout.units[0].hits[&Quality::Good], 1);

        assert_eq!((layout.samples[1].row, layout.samples[1].col), (1, 1));
    }

    #[test]
    fn labels_must_align() {
        let samples = DataFrame::from_rows(&["A"], &[vec![0.1], vec![2.8]]);
        assert!(MapLayout::build(&som(), &samples, &[Quality::Good]).is_err());
    }

    #[test]
    fn serializes() {
        let samples = DataFrame::from_rows(&["A"], &[vec![0.1]]);
        let layout = MapLayout::build(&som(), &samples, &[Quality::Good]).unwrap();
        let json = serde_json::to_string(&layout).unwrap();
        assert!(json.contains("\"good\":1"));
        assert!(json.contains("\"u_scaled\""));
    }
}
