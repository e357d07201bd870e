//! Configuration for map training, table ingestion and regression.

use crate::calc::neighborhood::Neighborhood;
use crate::data::Schema;
use crate::error::{Error, Result};
use crate::map::som::{DecayFunction, DecayParam, SampleOrder, TrainParams};
use crate::regress::RegressionMode;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::ops::RangeInclusive;
use std::path::Path;

/// Accepted number of training epochs.
pub const EPOCHS_RANGE: RangeInclusive<u32> = 100..=100_000;
/// Accepted start learning rate.
pub const LEARNING_RATE_RANGE: RangeInclusive<f64> = 0.05..=1.0;

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Map training configuration.
    pub som: SomConfig,

    /// Input table configuration.
    pub data: DataConfig,

    /// When the settling-speed regression is fitted.
    pub regression: RegressionMode,
}

/// Self-Organizing Map configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SomConfig {
    /// Number of training epochs.
    /// Default: 1000.
    pub epochs: u32,

    /// Start learning rate.
    /// Default: 0.5.
    pub learning_rate: f64,

    /// Start neighborhood radius, in lattice units.
    /// Default: 1.5.
    pub sigma: f64,

    /// Final learning rate and radius as fractions of their start values,
    /// for linear and exponential decay.
    /// Default: 0.01.
    pub end_fraction: f64,

    /// Decay of learning rate and radius over the epochs.
    /// Default: asymptotic.
    pub decay: DecayFunction,

    /// Neighborhood function.
    /// Default: gauss.
    pub neighborhood: Neighborhood,

    /// Sample order within an epoch.
    /// Default: sequential.
    pub order: SampleOrder,

    /// Random seed for reproducible initialization and shuffling.
    /// Default: None (random).
    pub seed: Option<u64>,

    /// Explicit map size as [rows, cols], overriding the size heuristic.
    /// Default: None.
    pub size: Option<[usize; 2]>,

    /// Train the map on the target column as well as the features.
    /// Default: false.
    pub include_target: bool,
}

impl Default for SomConfig {
    fn default() -> Self {
        SomConfig {
            epochs: 1000,
            learning_rate: 0.5,
            sigma: 1.5,
            end_fraction: 0.01,
            decay: DecayFunction::Asymptotic,
            neighborhood: Neighborhood::Gauss,
            order: SampleOrder::Sequential,
            seed: None,
            size: None,
            include_target: false,
        }
    }
}

impl SomConfig {
    /// Training parameters described by this configuration.
    pub fn train_params(&self) -> TrainParams {
        let decay = |start: f64| DecayParam::new(start, start * self.end_fraction, self.decay);
        TrainParams::new(self.epochs, self.learning_rate, self.sigma)
            .with_alpha(decay(self.learning_rate))
            .with_radius(decay(self.sigma))
            .with_neighborhood(self.neighborhood)
            .with_order(self.order)
    }
}

/// Input table configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Field delimiter.
    /// Default: ','.
    pub delimiter: char,

    /// Discard the first row and take column names from the second.
    /// Default: true.
    pub promote_header: bool,

    /// Column roles, left to right.
    /// Default: "features,label,target".
    pub schema: Schema,

    /// Expected header of the label column, if it should be checked.
    pub label_column: Option<String>,

    /// Expected header of the target column, if it should be checked.
    pub target_column: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            delimiter: ',',
            promote_header: true,
            schema: Schema::default(),
            label_column: None,
            target_column: None,
        }
    }
}

impl Config {
    /// Reads a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Checks values against the accepted ranges.
    pub fn validate(&self) -> Result<()> {
        let som = &self.som;
        if !EPOCHS_RANGE.contains(&som.epochs) {
            return Err(Error::Config(format!(
                "epochs must be in [{}, {}], got {}",
                EPOCHS_RANGE.start(),
                EPOCHS_RANGE.end(),
                som.epochs
            )));
        }
        if !LEARNING_RATE_RANGE.contains(&som.learning_rate) {
            return Err(Error::Config(format!(
                "learning rate must be in [{}, {}], got {}",
                LEARNING_RATE_RANGE.start(),
                LEARNING_RATE_RANGE.end(),
                som.learning_rate
            )));
        }
        if !(som.sigma > 0.0) {
            return Err(Error::Config(format!(
                "sigma must be positive, got {}",
                som.sigma
            )));
        }
        if som.decay != DecayFunction::Asymptotic
            && !(som.end_fraction > 0.0 && som.end_fraction <= 1.0)
        {
            return Err(Error::Config(format!(
                "end fraction must be in (0, 1], got {}",
                som.end_fraction
            )));
        }
        if let Some([rows, cols]) = som.size {
            if rows == 0 || cols == 0 {
                return Err(Error::Config(format!(
                    "map size must be positive, got {}x{}",
                    rows, cols
                )));
            }
        }
        if !self.data.delimiter.is_ascii() {
            return Err(Error::Config(format!(
                "delimiter must be an ASCII character, got '{}'",
                self.data.delimiter
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::config::Config;
    use crate::data::ColumnRole;
    use crate::map::som::{DecayFunction, SampleOrder};
    use crate::regress::RegressionMode;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.som.epochs, 1000);
        assert_eq!(config.som.learning_rate, 0.5);
        assert_eq!(config.regression, RegressionMode::FitOnce);
        assert!(config.data.promote_header);
    }

    #[test]
    fn bounds() {
        let mut config = Config::default();
        config.som.epochs = 99;
        assert!(config.validate().is_err());
        config.som.epochs = 100_000;
        assert!(config.validate().is_ok());

        config.som.learning_rate = 0.04;
        assert!(config.validate().is_err());
        config.som.learning_rate = 1.0;
        assert!(config.validate().is_ok());

        config.som.sigma = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json() {
        let json = r#"{
            "som": { "epochs": 2000, "order": "shuffled", "seed": 7, "decay": "linear" },
            "data": { "delimiter": ";", "schema": "features,target,label", "label_column": "Type" },
            "regression": "refit_per_query"
        }"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.som.epochs, 2000);
        assert_eq!(config.som.learning_rate, 0.5);
        assert_eq!(config.som.order, SampleOrder::Shuffled);
        assert_eq!(config.som.decay, DecayFunction::Linear);
        assert_eq!(config.som.seed, Some(7));
        assert_eq!(config.data.delimiter, ';');
        assert_eq!(
            config.data.schema.roles(),
            &[ColumnRole::Features, ColumnRole::Target, ColumnRole::Label]
        );
        assert_eq!(config.data.label_column.as_deref(), Some("Type"));
        assert_eq!(config.regression, RegressionMode::RefitPerQuery);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn train_params() {
        let mut config = Config::default();
        config.som.epochs = 300;
        config.som.order = SampleOrder::Shuffled;
        let params = config.som.train_params();
        assert_eq!(params.epochs(), 300);
        assert_eq!(params.order(), SampleOrder::Shuffled);
    }

    #[test]
    fn bad_schema_in_json() {
        let json = r#"{ "data": { "schema": "features,label" } }"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }
}
