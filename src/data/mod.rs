//! Data structures like tables, column schemas and sample labels.

mod label;
mod schema;

pub use label::Quality;
pub use schema::{ColumnRole, Schema, SchemaLayout};

use num_traits::Float;
use std::slice::{Chunks, ChunksMut};

/// A data frame with all columns of the same Float type.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame<T = f64>
where
    T: Float,
{
    ncols: usize,
    nrows: usize,
    names: Vec<String>,
    data: Vec<T>,
}

impl<T> DataFrame<T>
where
    T: Float,
{
    /// Creates an empty data frame, with the given columns and zero rows.
    pub fn empty(columns: &[&str]) -> Self {
        DataFrame {
            names: columns.iter().map(|s| s.to_string()).collect(),
            ncols: columns.len(),
            nrows: 0,
            data: vec![],
        }
    }

    /// Creates a data frame of zeros with columns named by their index.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        DataFrame {
            names: (0..ncols).map(|i| i.to_string()).collect(),
            ncols,
            nrows,
            data: vec![T::zero(); nrows * ncols],
        }
    }

    /// Creates a data frame from a vector of rows.
    pub fn from_rows(columns: &[&str], rows: &[Vec<T>]) -> Self {
        let mut df = Self::empty(columns);
        for row in rows {
            df.push_row(row);
        }
        df
    }

    /// Number of columns in the data frame.
    pub fn ncols(&self) -> usize {
        self.ncols
    }
    /// Number of rows in the data frame.
    pub fn nrows(&self) -> usize {
        self.nrows
    }
    /// A reference to the raw data: a flat vector of values in row-first order.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns a reference to the data frame's column names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Column names as a vector of `&str`, as accepted by the constructors.
    pub fn names_ref_vec(&self) -> Vec<&str> {
        self.names.iter().map(|n| &n[..]).collect()
    }

    /// Appends a row to the end of the data frame, from a slice.
    pub fn push_row(&mut self, row: &[T]) {
        assert_eq!(row.len(), self.ncols);
        self.data.extend_from_slice(row);
        self.nrows += 1;
    }
    /// Appends a row to the end of the data frame, from an iterator.
    pub fn push_row_iter(&mut self, row: impl Iterator<Item = T>) {
        let len = self.data.len();
        self.data.extend(row);
        assert_eq!(self.data.len() - len, self.ncols);
        self.nrows += 1;
    }
    /// Returns a reference to the value at (row, column).
    pub fn get(&self, row: usize, col: usize) -> &T {
        let idx = self.index(row, col);
        &self.data[idx]
    }
    /// Sets the value at (row, column), consuming the value.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        let idx = self.index(row, col);
        self.data[idx] = value
    }

    /// Returns a row as a slice reference.
    pub fn get_row(&self, row: usize) -> &[T] {
        let idx = self.index(row, 0);
        &self.data[idx..idx + self.ncols]
    }
    /// Returns a row as a mutable slice reference.
    pub fn get_row_mut(&mut self, row: usize) -> &mut [T] {
        let idx = self.index(row, 0);
        &mut self.data[idx..idx + self.ncols]
    }

    /// Returns the raw data index for (row, col).
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.ncols + col
    }

    /// An iterator over rows.
    pub fn iter_rows(&self) -> Chunks<T> {
        self.data.chunks(self.ncols.max(1))
    }
    /// A mutable iterator over rows.
    pub fn iter_rows_mut(&mut self) -> ChunksMut<T> {
        self.data.chunks_mut(self.ncols.max(1))
    }

    /// Copies a column's values into a new vector.
    pub fn copy_column(&self, column: usize) -> Vec<T> {
        self.iter_rows().map(|row| row[column]).collect()
    }

    /// Returns a new data frame with `other`'s columns appended to the right.
    ///
    /// Both frames must have the same number of rows.
    pub fn hstack(&self, other: &DataFrame<T>) -> Self {
        assert_eq!(self.nrows, other.nrows);
        let mut names = self.names_ref_vec();
        names.extend(other.names_ref_vec());
        let mut df = Self::empty(&names);
        for (left, right) in self.iter_rows().zip(other.iter_rows()) {
            df.push_row_iter(left.iter().chain(right).copied());
        }
        df
    }

    /// Returns ranges of columns as (min, max).
    pub fn ranges(&self) -> Vec<(T, T)> {
        let mut min = vec![T::max_value(); self.ncols];
        let mut max = vec![T::min_value(); self.ncols];
        for row in self.iter_rows() {
            for (col, v) in row.iter().enumerate() {
                if *v < min[col] {
                    min[col] = *v;
                }
                if *v > max[col] {
                    max[col] = *v;
                }
            }
        }
        min.into_iter().zip(max).collect()
    }

    /// Returns means of columns.
    pub fn means(&self) -> Vec<T> {
        let mut means = vec![T::zero(); self.ncols];
        if self.nrows == 0 {
            return means;
        }
        let nrows = T::from(self.nrows).unwrap_or_else(T::one);
        for row in self.iter_rows() {
            for (col, v) in row.iter().enumerate() {
                means[col] = means[col] + *v;
            }
        }
        for m in means.iter_mut() {
            *m = *m / nrows;
        }
        means
    }
}
