//! Pre- and post-processing of experiment tables, map creation, training and queries.

use crate::calc::norm::Bounds;
use crate::calc::size::grid_side;
use crate::config::Config;
use crate::data::{DataFrame, Quality, Schema, SchemaLayout};
use crate::error::{Error, Result};
use crate::map::layout::MapLayout;
use crate::map::som::{EpochReport, Som, SomState, TrainParams};
use crate::regress::{self, Estimate, LinearRegression, RegressionMode};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::Path;

/// Csv file options
#[derive(Clone, Debug)]
pub struct CsvOptions {
    delimiter: u8,
    promote_header: bool,
}

/// Builder for [`Processor`](struct.Processor.html).
pub struct ProcessorBuilder {
    schema: Schema,
    label_column: Option<String>,
    target_column: Option<String>,
    include_target: bool,
    size: Option<(usize, usize)>,
    seed: Option<u64>,
    regression: RegressionMode,
    csv_options: CsvOptions,
}

impl ProcessorBuilder {
    /// Creates a `ProcessorBuilder` for tables following `schema`.
    pub fn new(schema: &Schema) -> Self {
        ProcessorBuilder {
            schema: schema.clone(),
            label_column: None,
            target_column: None,
            include_target: false,
            size: None,
            seed: None,
            regression: RegressionMode::FitOnce,
            csv_options: CsvOptions {
                delimiter: b',',
                promote_header: true,
            },
        }
    }
    /// Creates a `ProcessorBuilder` from the table, map and regression settings of a [`Config`].
    pub fn from_config(config: &Config) -> Self {
        let mut builder = Self::new(&config.data.schema)
            .with_delimiter(config.data.delimiter as u8)
            .with_header_promotion(config.data.promote_header)
            .with_include_target(config.som.include_target)
            .with_regression(config.regression);
        builder.label_column = config.data.label_column.clone();
        builder.target_column = config.data.target_column.clone();
        builder.seed = config.som.seed;
        builder.size = config.som.size.map(|[rows, cols]| (rows, cols));
        builder
    }
    /// Sets the delimiter for CSV files. Default ','.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.csv_options.delimiter = delimiter;
        self
    }
    /// Whether the first row is a title row, with column names in the second. Default true.
    pub fn with_header_promotion(mut self, promote: bool) -> Self {
        self.csv_options.promote_header = promote;
        self
    }
    /// Requires the label column to have the given header.
    pub fn with_label_column(mut self, name: &str) -> Self {
        self.label_column = Some(name.to_string());
        self
    }
    /// Requires the target column to have the given header.
    pub fn with_target_column(mut self, name: &str) -> Self {
        self.target_column = Some(name.to_string());
        self
    }
    /// Trains the map on the target column in addition to the features. Default false.
    pub fn with_include_target(mut self, include: bool) -> Self {
        self.include_target = include;
        self
    }
    /// Sets an explicit map size instead of sizing from the sample count.
    pub fn with_size(mut self, nrows: usize, ncols: usize) -> Self {
        self.size = Some((nrows, ncols));
        self
    }
    /// Seeds map initialization and sample shuffling.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    /// Sets when the regression model is fitted. Default fit once.
    pub fn with_regression(mut self, mode: RegressionMode) -> Self {
        self.regression = mode;
        self
    }
    /// Builds a [`Processor`](struct.Processor.html) from the given data file.
    pub fn build_from_file<P: AsRef<Path>>(self, path: P) -> Result<Processor> {
        let file = File::open(path)?;
        self.build_from_reader(file)
    }
    /// Builds a [`Processor`](struct.Processor.html) from CSV data.
    pub fn build_from_reader<R: Read>(self, reader: R) -> Result<Processor> {
        Processor::new(self, reader)
    }
}

/// Answer to a single-sample query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Predicted target value.
    pub value: f64,
    /// R² of the regression on the training table.
    pub r2: f64,
    /// Winning unit of the sample.
    pub row: usize,
    pub col: usize,
    /// Plotting coordinates of the winning unit.
    pub x: f64,
    pub y: f64,
}

/// Central type for map setup and processing: one training session.
///
/// Holds the ingested table, the fitted normalization bounds and the map.
/// Failed operations leave previously computed state untouched.
pub struct Processor {
    feature_names: Vec<String>,
    label_name: String,
    target_name: String,
    features: DataFrame,
    labels: Vec<Quality>,
    targets: Vec<f64>,
    data: DataFrame,
    bounds: Bounds,
    som: Som,
    include_target: bool,
    regression: RegressionMode,
    model: Option<LinearRegression>,
    csv_options: CsvOptions,
}

impl Processor {
    fn new<R: Read>(builder: ProcessorBuilder, reader: R) -> Result<Self> {
        let table = Self::read_table(&builder, reader)?;

        let (nrows, ncols) = match builder.size {
            Some(size) => size,
            None => {
                let side = grid_side(table.features.nrows())?;
                (side, side)
            }
        };
        if table.features.nrows() == 0 {
            return Err(Error::InsufficientData(
                "the table has no data rows".to_string(),
            ));
        }

        let map_input = if builder.include_target {
            let target = DataFrame::from_rows(
                &[&table.target_name[..]],
                &table.targets.iter().map(|t| vec![*t]).collect::<Vec<_>>(),
            );
            table.features.hstack(&target)
        } else {
            table.features.clone()
        };
        let bounds = Bounds::fit(&map_input)?;
        let data = bounds.transform(&map_input)?;

        let mut som = Som::new();
        som.initialize(nrows, ncols, data.ncols(), builder.seed)?;

        info!(
            "Read {} samples with {} features, map size {}x{}",
            data.nrows(),
            table.features.ncols(),
            nrows,
            ncols
        );

        Ok(Processor {
            feature_names: table.features.names().to_vec(),
            label_name: table.label_name,
            target_name: table.target_name,
            features: table.features,
            labels: table.labels,
            targets: table.targets,
            data,
            bounds,
            som,
            include_target: builder.include_target,
            regression: builder.regression,
            model: None,
            csv_options: builder.csv_options,
        })
    }

    fn read_table<R: Read>(builder: &ProcessorBuilder, reader: R) -> Result<Table> {
        let mut reader = ReaderBuilder::new()
            .delimiter(builder.csv_options.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);
        let mut records = reader.records();

        if builder.csv_options.promote_header {
            // title row
            records.next().transpose()?;
        }
        let header: StringRecord = records.next().transpose()?.ok_or_else(|| {
            Error::DatasetMalformed("the table has no header row".to_string())
        })?;

        let layout = builder.schema.resolve(header.len())?;
        Self::check_name(&header, layout.label, &builder.label_column, "label")?;
        Self::check_name(&header, layout.target, &builder.target_column, "target")?;

        let feature_names: Vec<_> = layout.features.clone().map(|i| &header[i]).collect();
        let mut table = Table {
            features: DataFrame::empty(&feature_names),
            labels: vec![],
            targets: vec![],
            label_name: header[layout.label].to_string(),
            target_name: header[layout.target].to_string(),
        };

        let mut row = vec![0.0; layout.features.len()];
        for record in records {
            let rec = record?;
            if rec.iter().all(|field| field.is_empty()) {
                continue;
            }
            let line = rec.position().map(|p| p.line()).unwrap_or(0);
            if rec.len() != header.len() {
                return Err(Error::DatasetMalformed(format!(
                    "line {} has {} fields, expected {}",
                    line,
                    rec.len(),
                    header.len()
                )));
            }
            Self::parse_record(&rec, &header, &layout, line, &mut row, &mut table)?;
        }
        Ok(table)
    }

    fn parse_record(
        rec: &StringRecord,
        header: &StringRecord,
        layout: &SchemaLayout,
        line: u64,
        row: &mut [f64],
        table: &mut Table,
    ) -> Result<()> {
        for (value, col) in row.iter_mut().zip(layout.features.clone()) {
            *value = parse_number(&rec[col], &header[col], line)?;
        }
        let label = rec[layout.label].parse::<Quality>().map_err(|err| {
            Error::DatasetMalformed(format!(
                "line {}, column '{}': {}",
                line, &header[layout.label], err
            ))
        })?;
        let target = parse_number(&rec[layout.target], &header[layout.target], line)?;

        table.features.push_row(row);
        table.labels.push(label);
        table.targets.push(target);
        Ok(())
    }

    fn check_name(
        header: &StringRecord,
        index: usize,
        expected: &Option<String>,
        role: &str,
    ) -> Result<()> {
        if let Some(name) = expected {
            if &header[index] != name {
                return Err(Error::DatasetMalformed(format!(
                    "expected {} column '{}' at position {}, found '{}'",
                    role,
                    name,
                    index + 1,
                    &header[index]
                )));
            }
        }
        Ok(())
    }

    /// Raw feature values, one row per sample.
    pub fn features(&self) -> &DataFrame {
        &self.features
    }
    /// Names of the feature columns.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
    /// Header of the label column.
    pub fn label_name(&self) -> &str {
        &self.label_name
    }
    /// Header of the target column.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }
    /// Quality labels, index-aligned with the samples.
    pub fn labels(&self) -> &[Quality] {
        &self.labels
    }
    /// Target values, index-aligned with the samples.
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }
    /// Return a reference to the normalized map training data.
    pub fn data(&self) -> &DataFrame {
        &self.data
    }
    /// Normalization bounds fitted on the training table.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }
    /// The map.
    pub fn som(&self) -> &Som {
        &self.som
    }
    /// Map size as (rows, cols).
    pub fn grid_size(&self) -> (usize, usize) {
        self.som.size()
    }

    /// Trains the map on the normalized table.
    pub fn train(&mut self, params: &TrainParams) -> Result<()> {
        self.som.train(&self.data, params)
    }

    /// Like [`train`](#method.train), calling `progress` once after every epoch.
    pub fn train_with_progress<F>(&mut self, params: &TrainParams, progress: F) -> Result<()>
    where
        F: FnMut(&EpochReport),
    {
        self.som.train_with_progress(&self.data, params, progress)
    }

    /// Predicts the target for a raw feature vector and locates the sample on the map.
    pub fn predict(&mut self, sample: &[f64]) -> Result<Prediction> {
        if sample.len() != self.features.ncols() {
            return Err(Error::DimensionMismatch {
                expected: self.features.ncols(),
                actual: sample.len(),
            });
        }
        if self.som.state() == SomState::Uninitialized {
            return Err(Error::EngineNotInitialized);
        }

        let Estimate { value, r2 } = match self.regression {
            RegressionMode::RefitPerQuery => {
                regress::fit_predict(&self.features, &self.targets, sample)?
            }
            RegressionMode::FitOnce => {
                let model = match self.model.take() {
                    Some(model) => model,
                    None => LinearRegression::fit(&self.features, &self.targets)?,
                };
                let model = self.model.insert(model);
                regress::estimate(model, &self.features, &self.targets, sample)?
            }
        };

        let mut map_input = sample.to_vec();
        if self.include_target {
            map_input.push(value);
        }
        let normalized = self.bounds.transform_row(&map_input)?;
        let (row, col) = self.som.winner(&normalized)?;
        let (x, y) = self.som.to_plot_coordinates(row, col);

        Ok(Prediction {
            value,
            r2,
            row,
            col,
            x,
            y,
        })
    }

    /// Winning unit of every training sample.
    pub fn winners(&self) -> Result<Vec<(usize, usize)>> {
        self.som.winners(&self.data)
    }

    /// Map geometry, U-matrix and sample positions for rendering.
    pub fn layout(&self) -> Result<MapLayout> {
        MapLayout::build(&self.som, &self.data, &self.labels)
    }

    /// Writes the [`layout`](#method.layout) as pretty-printed JSON.
    pub fn write_layout_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &self.layout()?)?;
        Ok(())
    }

    /// Writes map units with de-normalized prototypes to a CSV file.
    pub fn write_som_units<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let umatrix = self.som.neighbor_distance_matrix()?;
        let prototypes = self.bounds.inverse(self.som.weights())?;

        let mut names: Vec<String> = ["index", "row", "col", "x", "y", "u_distance"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        names.extend(self.feature_names.iter().cloned());
        if self.include_target {
            names.push(self.target_name.clone());
        }

        let mut writer = WriterBuilder::new()
            .delimiter(self.csv_options.delimiter)
            .from_path(path)?;
        writer.write_record(&names)?;

        for (index, proto) in prototypes.iter_rows().enumerate() {
            let (r, c) = self.som.to_row_col(index);
            let (x, y) = self.som.to_plot_coordinates(r, c);
            let mut row = vec![
                index.to_string(),
                r.to_string(),
                c.to_string(),
                x.to_string(),
                y.to_string(),
                umatrix.get(r, c).to_string(),
            ];
            row.extend(proto.iter().map(|v| v.to_string()));
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the raw table, amended by the winning unit index, row and column, to a CSV file.
    pub fn write_data_nearest<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let winners = self.winners()?;

        let mut names = self.feature_names.clone();
        names.push(self.label_name.clone());
        names.push(self.target_name.clone());
        names.extend(
            ["som_index", "som_row", "som_col"]
                .iter()
                .map(|s| s.to_string()),
        );

        let mut writer = WriterBuilder::new()
            .delimiter(self.csv_options.delimiter)
            .from_path(path)?;
        writer.write_record(&names)?;

        for (index, features) in self.features.iter_rows().enumerate() {
            let (r, c) = winners[index];
            let mut row: Vec<String> = features.iter().map(|v| v.to_string()).collect();
            row.push(self.labels[index].tag().to_string());
            row.push(self.targets[index].to_string());
            row.push(self.som.to_index(r, c).to_string());
            row.push(r.to_string());
            row.push(c.to_string());
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Columns of an ingested table, split by role.
struct Table {
    features: DataFrame,
    labels: Vec<Quality>,
    targets: Vec<f64>,
    label_name: String,
    target_name: String,
}

/// Parses a finite number, accepting a decimal comma.
fn parse_number(field: &str, column: &str, line: u64) -> Result<f64> {
    if field.is_empty() {
        return Err(Error::DatasetMalformed(format!(
            "line {}, column '{}': missing value",
            line, column
        )));
    }
    let value = field
        .parse::<f64>()
        .or_else(|_| field.replace(',', ".").parse::<f64>())
        .map_err(|_| {
            Error::DatasetMalformed(format!(
                "line {}, column '{}': '{}' is not a number",
                line, column, field
            ))
        })?;
    if !value.is_finite() {
        return Err(Error::DatasetMalformed(format!(
            "line {}, column '{}': '{}' is not a finite number",
            line, column, field
        )));
    }
    Ok(value)
}
