//! Min-max normalization and de-normalization of data.

use crate::data::DataFrame;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Linear transform `value * scale + offset` of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTransform {
    scale: f64,
    offset: f64,
}

impl LinearTransform {
    pub fn transform(&self, value: f64) -> f64 {
        value * self.scale + self.offset
    }
}

/// Per-column (min, max) learned from a training table.
///
/// Immutable after fitting; every table or sample projected into a map goes
/// through the same bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    columns: Vec<(f64, f64)>,
}

impl Bounds {
    /// Learns per-column minimum and maximum.
    pub fn fit(data: &DataFrame) -> Result<Self> {
        if data.nrows() == 0 {
            return Err(Error::InsufficientData(
                "cannot fit normalization bounds on an empty table".to_string(),
            ));
        }
        Ok(Self::from_ranges(data.ranges()))
    }

    /// Creates bounds from explicit (min, max) pairs.
    pub fn from_ranges(columns: Vec<(f64, f64)>) -> Self {
        Bounds { columns }
    }

    /// The (min, max) pair of every column.
    pub fn ranges(&self) -> &[(f64, f64)] {
        &self.columns
    }

    /// Number of columns the bounds were fitted on.
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Forward transforms, one per column. Constant columns map to 0.
    pub fn transforms(&self) -> Vec<LinearTransform> {
        self.columns
            .iter()
            .map(|(min, max)| {
                let range = max - min;
                if range > 0.0 {
                    LinearTransform {
                        scale: 1.0 / range,
                        offset: -min / range,
                    }
                } else {
                    LinearTransform {
                        scale: 0.0,
                        offset: 0.0,
                    }
                }
            })
            .collect()
    }

    /// Inverse transforms, one per column. Constant columns map back to their single value.
    pub fn inverse_transforms(&self) -> Vec<LinearTransform> {
        self.columns
            .iter()
            .map(|(min, max)| LinearTransform {
                scale: max - min,
                offset: *min,
            })
            .collect()
    }

    /// Rescales every column of `data` into [0, 1] (for values inside the fitted range).
    pub fn transform(&self, data: &DataFrame) -> Result<DataFrame> {
        self.check(data.ncols())?;
        let transforms = self.transforms();
        let mut df = DataFrame::empty(&data.names_ref_vec());
        for row in data.iter_rows() {
            df.push_row_iter(transforms.iter().zip(row).map(|(tr, v)| tr.transform(*v)));
        }
        Ok(df)
    }

    /// Rescales a single sample.
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        self.check(row.len())?;
        Ok(self
            .transforms()
            .iter()
            .zip(row)
            .map(|(tr, v)| tr.transform(*v))
            .collect())
    }

    /// Maps a normalized sample back to the original value ranges.
    pub fn inverse_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        self.check(row.len())?;
        Ok(self
            .inverse_transforms()
            .iter()
            .zip(row)
            .map(|(tr, v)| tr.transform(*v))
            .collect())
    }

    /// Maps a normalized table back to the original value ranges.
    pub fn inverse(&self, data: &DataFrame) -> Result<DataFrame> {
        self.check(data.ncols())?;
        let inverse = self.inverse_transforms();
        let mut df = DataFrame::empty(&data.names_ref_vec());
        for row in data.iter_rows() {
            df.push_row_iter(inverse.iter().zip(row).map(|(tr, v)| tr.transform(*v)));
        }
        Ok(df)
    }

    fn check(&self, ncols: usize) -> Result<()> {
        if ncols != self.columns.len() {
            return Err(Error::DimensionMismatch {
                expected: self.columns.len(),
                actual: ncols,
            });
        }
        Ok(())
    }
}
