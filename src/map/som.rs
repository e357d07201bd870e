//! Self-organizing map on a hexagonal lattice. Core types.

use crate::calc::hex;
use crate::calc::metric;
use crate::calc::neighborhood::Neighborhood;
use crate::calc::nn;
use crate::data::DataFrame;
use crate::error::{Error, Result};
use crate::ParseEnumError;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lower bound for the neighborhood radius during training.
pub const MIN_RADIUS: f64 = 0.05;

/// Decay functions for learning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecayFunction {
    /// Linear decay from start to end value.
    Linear,
    /// Exponential decay from start to end value.
    Exponential,
    /// `start / (1 + t / (T / 2))`, reaching a third of the start value at the end.
    Asymptotic,
}

impl FromStr for DecayFunction {
    type Err = ParseEnumError;
    /// Parse a string to a `DecayFunction`.
    ///
    /// Accepts `"lin" | "linear" | "exp" | "exponential" | "asymptotic"`.
    fn from_str(str: &str) -> std::result::Result<Self, Self::Err> {
        match str {
            "lin" | "linear" => Ok(DecayFunction::Linear),
            "exp" | "exponential" => Ok(DecayFunction::Exponential),
            "asymptotic" => Ok(DecayFunction::Asymptotic),
            _ => Err(ParseEnumError(format!(
                "Not a decay function: {}. Must be one of (linear|exponential|asymptotic)",
                str
            ))),
        }
    }
}

/// Decay parameters for learning parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayParam {
    start: f64,
    end: f64,
    function: DecayFunction,
}

impl DecayParam {
    /// Creates a linearly decaying learning parameter from start and end value.
    pub fn lin(start: f64, end: f64) -> Self {
        DecayParam {
            start,
            end,
            function: DecayFunction::Linear,
        }
    }
    /// Creates a exponentially decaying learning parameter from start and end value.
    pub fn exp(start: f64, end: f64) -> Self {
        DecayParam {
            start,
            end,
            function: DecayFunction::Exponential,
        }
    }
    /// Creates an asymptotically decaying learning parameter.
    pub fn asymptotic(start: f64) -> Self {
        DecayParam {
            start,
            end: start / 3.0,
            function: DecayFunction::Asymptotic,
        }
    }
    /// Creates a decaying parameter with the given function.
    ///
    /// `end` is ignored by [`DecayFunction::Asymptotic`].
    pub fn new(start: f64, end: f64, function: DecayFunction) -> Self {
        match function {
            DecayFunction::Linear => Self::lin(start, end),
            DecayFunction::Exponential => Self::exp(start, end),
            DecayFunction::Asymptotic => Self::asymptotic(start),
        }
    }
    /// The value at the first epoch.
    pub fn start(&self) -> f64 {
        self.start
    }
    /// Get the parameter's value for the given training epoch.
    pub fn get(&self, epoch: u32, max_epochs: u32) -> f64 {
        if max_epochs == 0 {
            return self.start;
        }
        let t = epoch as f64;
        let max = max_epochs as f64;
        match self.function {
            DecayFunction::Linear => self.start + (t / max) * (self.end - self.start),
            DecayFunction::Exponential => {
                let rate = (1.0 / -max) * (self.end / self.start).ln();
                self.start * (-rate * t).exp()
            }
            DecayFunction::Asymptotic => self.start / (1.0 + t / (max / 2.0)),
        }
    }
}

/// Order in which samples are presented within an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleOrder {
    /// Table order, every epoch.
    Sequential,
    /// A fresh random permutation per epoch, drawn from the map's seeded generator.
    Shuffled,
}

impl Default for SampleOrder {
    fn default() -> Self {
        SampleOrder::Sequential
    }
}

impl FromStr for SampleOrder {
    type Err = ParseEnumError;
    /// Parse a string to a `SampleOrder`.
    ///
    /// Accepts `"sequential" | "shuffled"`.
    fn from_str(str: &str) -> std::result::Result<Self, Self::Err> {
        match str {
            "sequential" => Ok(SampleOrder::Sequential),
            "shuffled" => Ok(SampleOrder::Shuffled),
            _ => Err(ParseEnumError(format!(
                "Not a sample order: {}. Must be one of (sequential|shuffled)",
                str
            ))),
        }
    }
}

/// SOM training parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TrainParams {
    epochs: u32,
    neighborhood: Neighborhood,
    alpha: DecayParam,
    radius: DecayParam,
    order: SampleOrder,
}

impl TrainParams {
    /// Gaussian neighborhood, sequential order, and asymptotic decay of
    /// learning rate and radius from the given start values.
    pub fn new(epochs: u32, learning_rate: f64, sigma: f64) -> Self {
        TrainParams {
            epochs,
            neighborhood: Neighborhood::Gauss,
            alpha: DecayParam::asymptotic(learning_rate),
            radius: DecayParam::asymptotic(sigma),
            order: SampleOrder::Sequential,
        }
    }
    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }
    pub fn with_alpha(mut self, alpha: DecayParam) -> Self {
        self.alpha = alpha;
        self
    }
    pub fn with_radius(mut self, radius: DecayParam) -> Self {
        self.radius = radius;
        self
    }
    pub fn with_order(mut self, order: SampleOrder) -> Self {
        self.order = order;
        self
    }
    pub fn epochs(&self) -> u32 {
        self.epochs
    }
    pub fn order(&self) -> SampleOrder {
        self.order
    }
}

/// Progress information passed to the callback of
/// [`Som::train_with_progress`](struct.Som.html#method.train_with_progress) after every epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochReport {
    /// Zero-based index of the finished epoch.
    pub epoch: u32,
    pub epochs: u32,
    pub alpha: f64,
    pub radius: f64,
}

/// Lifecycle of a [`Som`](struct.Som.html).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SomState {
    /// No prototype grid allocated.
    Uninitialized,
    /// Grid allocated, not trained yet.
    Ready,
    /// Trained at least once.
    Trained,
}

/// SOM core type.
///
/// A single instance must not be trained or queried from several threads at once.
pub struct Som {
    dims: usize,
    nrows: usize,
    ncols: usize,
    weights: DataFrame,
    distances_sq: DataFrame,
    state: SomState,
    epochs_trained: u32,
    rng: ChaCha8Rng,
}

impl Default for Som {
    fn default() -> Self {
        Self::new()
    }
}

impl Som {
    /// Creates an uninitialized SOM.
    pub fn new() -> Self {
        Som {
            dims: 0,
            nrows: 0,
            ncols: 0,
            weights: DataFrame::empty(&[]),
            distances_sq: DataFrame::empty(&[]),
            state: SomState::Uninitialized,
            epochs_trained: 0,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Creates a SOM from given prototype vectors, one row per unit in row-major order.
    pub fn with_weights(nrows: usize, ncols: usize, weights: DataFrame) -> Result<Self> {
        Self::check_size(nrows, ncols, weights.ncols())?;
        if weights.nrows() != nrows * ncols {
            return Err(Error::DimensionMismatch {
                expected: nrows * ncols,
                actual: weights.nrows(),
            });
        }
        let mut som = Self::new();
        som.dims = weights.ncols();
        som.nrows = nrows;
        som.ncols = ncols;
        som.weights = weights;
        som.distances_sq = Self::calc_distance_matrix(nrows, ncols);
        som.state = SomState::Ready;
        Ok(som)
    }

    /// Allocates the prototype grid with random values in [0, 1).
    ///
    /// Discards any previous training.
    pub fn initialize(
        &mut self,
        nrows: usize,
        ncols: usize,
        dims: usize,
        seed: Option<u64>,
    ) -> Result<()> {
        Self::check_size(nrows, ncols, dims)?;
        self.rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut weights = DataFrame::zeros(nrows * ncols, dims);
        for row in weights.iter_rows_mut() {
            for v in row.iter_mut() {
                *v = self.rng.gen_range(0.0..1.0);
            }
        }
        self.dims = dims;
        self.nrows = nrows;
        self.ncols = ncols;
        self.weights = weights;
        self.distances_sq = Self::calc_distance_matrix(nrows, ncols);
        self.state = SomState::Ready;
        self.epochs_trained = 0;
        Ok(())
    }

    fn check_size(nrows: usize, ncols: usize, dims: usize) -> Result<()> {
        if nrows == 0 || ncols == 0 || dims == 0 {
            return Err(Error::Config(format!(
                "SOM needs at least one unit and one dimension, got {}x{} units with {} dimensions",
                nrows, ncols, dims
            )));
        }
        Ok(())
    }

    /// Pre-calculates the unit-to-unit squared distance matrix in plotting space.
    fn calc_distance_matrix(nrows: usize, ncols: usize) -> DataFrame {
        let units = nrows * ncols;
        let mut df = DataFrame::zeros(units, units);
        for idx1 in 0..units {
            for idx2 in 0..units {
                let from = (idx1 / ncols, idx1 % ncols);
                let to = (idx2 / ncols, idx2 % ncols);
                df.set(idx1, idx2, hex::plot_distance_sq(from, to));
            }
        }
        df
    }

    /// The current lifecycle state.
    pub fn state(&self) -> SomState {
        self.state
    }
    /// Total number of epochs trained since initialization.
    pub fn epochs_trained(&self) -> u32 {
        self.epochs_trained
    }
    /// Returns (row, col) for a given unit index.
    pub fn to_row_col(&self, index: usize) -> (usize, usize) {
        (index / self.ncols, index % self.ncols)
    }
    /// Returns the unit index for (row, col).
    pub fn to_index(&self, row: usize, col: usize) -> usize {
        row * self.ncols + col
    }
    /// Returns a reference to the units weights data frame.
    pub fn weights(&self) -> &DataFrame {
        &self.weights
    }
    /// Returns a reference to the weights of the unit at (row, col).
    pub fn weights_at(&self, row: usize, col: usize) -> &[f64] {
        self.weights.get_row(self.to_index(row, col))
    }
    /// The number of columns (width) of the SOM.
    pub fn ncols(&self) -> usize {
        self.ncols
    }
    /// The number of rows (height) of the SOM.
    pub fn nrows(&self) -> usize {
        self.nrows
    }
    /// The length of the prototype vectors.
    pub fn dims(&self) -> usize {
        self.dims
    }
    /// The size of the SOM as (rows, cols).
    pub fn size(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Maps unit indices to 2-D plotting coordinates on the hexagonal layout.
    pub fn to_plot_coordinates(&self, row: usize, col: usize) -> (f64, f64) {
        hex::to_plot_coordinates(row, col)
    }

    fn check_ready(&self) -> Result<()> {
        if self.state == SomState::Uninitialized {
            return Err(Error::EngineNotInitialized);
        }
        Ok(())
    }

    fn check_dims(&self, ncols: usize) -> Result<()> {
        if ncols != self.dims {
            return Err(Error::DimensionMismatch {
                expected: self.dims,
                actual: ncols,
            });
        }
        Ok(())
    }

    /// Trains the SOM on all rows of `samples`, blocking until all epochs are done.
    ///
    /// Training again continues from the current prototypes.
    pub fn train(&mut self, samples: &DataFrame, params: &TrainParams) -> Result<()> {
        self.train_with_progress(samples, params, |_| {})
    }

    /// Like [`train`](#method.train), calling `progress` once after every epoch.
    pub fn train_with_progress<F>(
        &mut self,
        samples: &DataFrame,
        params: &TrainParams,
        mut progress: F,
    ) -> Result<()>
    where
        F: FnMut(&EpochReport),
    {
        self.check_ready()?;
        self.check_dims(samples.ncols())?;
        if samples.nrows() == 0 {
            return Err(Error::InsufficientData(
                "no samples to train on".to_string(),
            ));
        }

        info!(
            "Training {}x{} SOM: {} samples, {} dimensions, {} epochs",
            self.nrows,
            self.ncols,
            samples.nrows(),
            self.dims,
            params.epochs
        );

        let mut indices: Vec<_> = (0..samples.nrows()).collect();
        for epoch in 0..params.epochs {
            let alpha = params.alpha.get(epoch, params.epochs);
            let radius = params.radius.get(epoch, params.epochs).max(MIN_RADIUS);
            if params.order == SampleOrder::Shuffled {
                indices.shuffle(&mut self.rng);
            }
            for idx in indices.iter() {
                self.train_sample(samples.get_row(*idx), alpha, radius, params.neighborhood);
            }
            debug!(
                "Epoch {}/{}: alpha = {:.5}, radius = {:.5}",
                epoch + 1,
                params.epochs,
                alpha,
                radius
            );
            progress(&EpochReport {
                epoch,
                epochs: params.epochs,
                alpha,
                radius,
            });
        }
        self.epochs_trained += params.epochs;
        self.state = SomState::Trained;

        info!(
            "Training completed. Quantization error = {:.6}",
            self.quantization_error(samples)?
        );
        Ok(())
    }

    /// Trains the SOM for a single sample.
    fn train_sample(&mut self, sample: &[f64], alpha: f64, radius: f64, neigh: Neighborhood) {
        let (nearest, _) = nn::nearest_neighbor(sample, &self.weights);

        let radius_inf_sq = (1.0 / radius).powi(2);
        let search_rad_sq = (radius * neigh.radius()).powi(2);

        let distances = self.distances_sq.get_row(nearest);
        for (index, dist_sq) in distances.iter().enumerate() {
            if *dist_sq <= search_rad_sq {
                let weight = neigh.weight(radius_inf_sq * dist_sq);
                if weight > 0.0 {
                    let unit = self.weights.get_row_mut(index);
                    for (w, s) in unit.iter_mut().zip(sample) {
                        *w += weight * alpha * (s - *w);
                    }
                }
            }
        }
    }

    /// Returns (row, col) of the unit nearest to `sample` by Euclidean distance.
    ///
    /// Ties resolve to the first unit in row-major order.
    pub fn winner(&self, sample: &[f64]) -> Result<(usize, usize)> {
        self.check_ready()?;
        self.check_dims(sample.len())?;
        let (index, _) = nn::nearest_neighbor(sample, &self.weights);
        Ok(self.to_row_col(index))
    }

    /// Winning units for every row of `samples`.
    pub fn winners(&self, samples: &DataFrame) -> Result<Vec<(usize, usize)>> {
        self.check_ready()?;
        self.check_dims(samples.ncols())?;
        Ok(nn::nearest_neighbors(samples, &self.weights)
            .into_iter()
            .map(|(index, _)| self.to_row_col(index))
            .collect())
    }

    /// Mean distance between each sample and its winning unit.
    pub fn quantization_error(&self, samples: &DataFrame) -> Result<f64> {
        self.check_ready()?;
        self.check_dims(samples.ncols())?;
        if samples.nrows() == 0 {
            return Ok(0.0);
        }
        let total: f64 = nn::nearest_neighbors(samples, &self.weights)
            .iter()
            .map(|(_, dist)| dist)
            .sum();
        Ok(total / samples.nrows() as f64)
    }

    /// The U-matrix: for every unit, the mean Euclidean distance between its
    /// prototype and those of its lattice neighbors. Shape `nrows x ncols`.
    pub fn neighbor_distance_matrix(&self) -> Result<DataFrame> {
        self.check_ready()?;
        let mut umatrix = DataFrame::zeros(self.nrows, self.ncols);
        for row in 0..self.nrows {
            for col in 0..self.ncols {
                let neighbors = hex::neighbors(row, col, self.nrows, self.ncols);
                if neighbors.is_empty() {
                    continue;
                }
                let own = self.weights_at(row, col);
                let sum: f64 = neighbors
                    .iter()
                    .map(|(r, c)| metric::euclidean(own, self.weights_at(*r, *c)))
                    .sum();
                umatrix.set(row, col, sum / neighbors.len() as f64);
            }
        }
        Ok(umatrix)
    }
}

#[cfg(test)]
mod test {
    use crate::calc::hex;
    use crate::calc::neighborhood::Neighborhood;
    use crate::data::DataFrame;
    use crate::map::som::{DecayParam, SampleOrder, Som, SomState, TrainParams};
    use crate::Error;
    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn clusters(seed: u64, per_cluster: usize) -> DataFrame {
        let centers = [[0.1, 0.1], [0.9, 0.1], [0.1, 0.9], [0.9, 0.9]];
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut data = DataFrame::empty(&["A", "B"]);
        for center in centers.iter() {
            for _ in 0..per_cluster {
                data.push_row(&[
                    center[0] + rng.gen_range(-0.03..0.03),
                    center[1] + rng.gen_range(-0.03..0.03),
                ]);
            }
        }
        data
    }

    #[test]
    fn create_som() {
        let mut som = Som::new();
        assert_eq!(som.state(), SomState::Uninitialized);
        som.initialize(3, 3, 3, Some(1)).unwrap();
        assert_eq!(som.state(), SomState::Ready);
        // (0, 0) to (2, 2): dx = 2, dy = 2 * sqrt(3) / 2
        assert_abs_diff_eq!(*som.distances_sq.get(0, 8), 4.0 + 3.0, epsilon = 1e-9);
        assert!(som.weights().data().iter().all(|v| *v >= 0.0 && *v < 1.0));
    }

    #[test]
    fn create_large_som() {
        let mut som = Som::new();
        som.initialize(20, 30, 12, None).unwrap();

        assert_eq!(som.ncols(), 30);
        assert_eq!(som.nrows(), 20);
        assert_eq!(som.weights.ncols(), 12);
        assert_eq!(som.weights.nrows(), 20 * 30);
    }

    #[test]
    fn same_seed_same_weights() {
        let mut a = Som::new();
        let mut b = Som::new();
        a.initialize(4, 4, 3, Some(42)).unwrap();
        b.initialize(4, 4, 3, Some(42)).unwrap();
        assert_eq!(a.weights(), b.weights());
    }

    #[test]
    fn uninitialized() {
        let mut som = Som::new();
        let data = DataFrame::from_rows(&["A"], &[vec![0.5]]);
        assert!(matches!(som.winner(&[0.5]), Err(Error::EngineNotInitialized)));
        assert!(matches!(
            som.train(&data, &TrainParams::new(10, 0.5, 1.0)),
            Err(Error::EngineNotInitialized)
        ));
        assert!(som.neighbor_distance_matrix().is_err());
    }

    #[test]
    fn invalid_size() {
        let mut som = Som::new();
        assert!(som.initialize(0, 3, 2, None).is_err());
        assert_eq!(som.state(), SomState::Uninitialized);
    }

    #[test]
    fn winner_on_hand_built_grid() {
        let weights = DataFrame::from_rows(
            &["A", "B"],
            &[
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![0.0, 1.0],
                vec![1.0, 1.0],
            ],
        );
        let som = Som::with_weights(2, 2, weights).unwrap();

        assert_eq!(som.winner(&[0.9, 0.1]).unwrap(), (0, 1));
        assert_eq!(som.winner(&[0.2, 0.8]).unwrap(), (1, 0));
        assert_eq!(som.winner(&[1.2, 1.1]).unwrap(), (1, 1));
        // equidistant to all four units
        assert_eq!(som.winner(&[0.5, 0.5]).unwrap(), (0, 0));
        // equidistant to (0, 1) and (1, 1)
        assert_eq!(som.winner(&[1.0, 0.5]).unwrap(), (0, 1));
    }

    #[test]
    fn winner_dimension_mismatch() {
        let mut som = Som::new();
        som.initialize(2, 2, 3, Some(0)).unwrap();
        assert!(matches!(
            som.winner(&[0.1, 0.2]),
            Err(Error::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn train_step() {
        let mut som = Som::new();
        som.initialize(4, 4, 3, Some(5)).unwrap();
        let before = som.weights().clone();

        som.train_sample(&[1.0, 1.0, 1.0], 0.5, 1.0, Neighborhood::Gauss);

        let (idx, _) = crate::calc::nn::nearest_neighbor(&[1.0, 1.0, 1.0], &before);
        let dist_before: f64 = before.get_row(idx).iter().map(|v| (1.0 - v).powi(2)).sum();
        let dist_after: f64 = som
            .weights()
            .get_row(idx)
            .iter()
            .map(|v| (1.0 - v).powi(2))
            .sum();
        assert_abs_diff_eq!(dist_after, dist_before * 0.25, epsilon = 1e-12);
    }

    #[test]
    fn clusters_converge() {
        let data = clusters(11, 10);
        let mut som = Som::new();
        som.initialize(3, 3, 2, Some(17)).unwrap();
        som.train(&data, &TrainParams::new(500, 0.5, 1.5)).unwrap();

        assert_eq!(som.state(), SomState::Trained);
        assert_eq!(som.epochs_trained(), 500);

        let winners = som.winners(&data).unwrap();
        for (i, row) in data.iter_rows().enumerate() {
            assert_eq!(som.winner(row).unwrap(), winners[i]);
            assert_eq!(som.winner(row).unwrap(), som.winner(row).unwrap());
        }

        let mut centers: Vec<_> = (0..4).map(|c| winners[c * 10]).collect();
        centers.sort();
        centers.dedup();
        assert_eq!(centers.len(), 4);

        assert!(som.quantization_error(&data).unwrap() < 0.25);
    }

    #[test]
    fn retrain_continues() {
        let data = clusters(2, 5);
        let mut som = Som::new();
        som.initialize(3, 3, 2, Some(3)).unwrap();
        let params = TrainParams::new(100, 0.5, 1.5).with_order(SampleOrder::Shuffled);
        som.train(&data, &params).unwrap();
        let trained = som.weights().clone();
        som.train(&data, &params).unwrap();

        assert_eq!(som.epochs_trained(), 200);
        assert_ne!(&trained, som.weights());
    }

    #[test]
    fn progress_per_epoch() {
        let data = clusters(4, 3);
        let mut som = Som::new();
        som.initialize(2, 3, 2, Some(9)).unwrap();
        let mut reports = vec![];
        som.train_with_progress(&data, &TrainParams::new(25, 0.5, 1.0), |r| {
            reports.push(*r)
        })
        .unwrap();

        assert_eq!(reports.len(), 25);
        assert_eq!(reports[24].epoch, 24);
        for pair in reports.windows(2) {
            assert!(pair[1].alpha <= pair[0].alpha);
            assert!(pair[1].radius <= pair[0].radius);
            assert!(pair[1].radius > 0.0);
        }
    }

    #[test]
    fn empty_samples() {
        let mut som = Som::new();
        som.initialize(2, 2, 1, None).unwrap();
        assert!(matches!(
            som.train(&DataFrame::empty(&["A"]), &TrainParams::new(10, 0.5, 1.0)),
            Err(Error::InsufficientData(_))
        ));
    }

    #[test]
    fn umatrix() {
        let weights = DataFrame::from_rows(
            &["A"],
            &[vec![0.0], vec![1.0], vec![0.0], vec![3.0]],
        );
        let som = Som::with_weights(2, 2, weights).unwrap();
        let umatrix = som.neighbor_distance_matrix().unwrap();

        assert_eq!((umatrix.nrows(), umatrix.ncols()), (2, 2));
        // (0,0) touches (0,1) and (1,0)
        assert_abs_diff_eq!(*umatrix.get(0, 0), 0.5, epsilon = 1e-12);
        // (0,1) touches (0,0), (1,0) and (1,1)
        assert_abs_diff_eq!(*umatrix.get(0, 1), (1.0 + 1.0 + 2.0) / 3.0, epsilon = 1e-12);
        // (1,1) touches (1,0) and (0,1)
        assert_abs_diff_eq!(*umatrix.get(1, 1), (3.0 + 2.0) / 2.0, epsilon = 1e-12);
        assert_eq!(hex::neighbors(1, 1, 2, 2).len(), 2);
    }

    #[test]
    fn linear_decay() {
        let decay = DecayParam::lin(1.0, 0.1);

        assert!((decay.get(0, 100) - 1.0).abs() < 0.0001);
        assert!((decay.get(100, 100) - 0.1).abs() < 0.0001);
    }
    #[test]
    fn exponential_decay() {
        let decay = DecayParam::exp(1.0, 0.01);

        assert!((decay.get(0, 100) - 1.0).abs() < 0.0001);
        assert!((decay.get(100, 100) - 0.01).abs() < 0.0001);
    }
    #[test]
    fn asymptotic_decay() {
        let decay = DecayParam::asymptotic(1.5);

        assert!((decay.get(0, 100) - 1.5).abs() < 0.0001);
        assert!((decay.get(50, 100) - 0.75).abs() < 0.0001);
        assert!((decay.get(100, 100) - 0.5).abs() < 0.0001);
    }
}
