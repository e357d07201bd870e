//! Command-line interface for flocculation maps.
use crate::config::Config;
use crate::error::{Error, Result};
use crate::map::som::SampleOrder;
use crate::regress::RegressionMode;
use structopt::StructOpt;

/// Raw command line arguments.
#[derive(StructOpt)]
#[structopt(name = "flocsom", about = "Self-organizing maps for flocculation experiments")]
pub struct Cli {
    /// Path to the experiment table (CSV).
    #[structopt(short, long)]
    file: String,
    /// JSON configuration file. Command line options override its values.
    #[structopt(short, long)]
    config: Option<String>,
    /// Number of training epochs, 100 to 100000. Optional, default: 1000.
    #[structopt(short, long)]
    epochs: Option<u32>,
    /// Start learning rate, 0.05 to 1.0. Optional, default: 0.5.
    #[structopt(short, long)]
    alpha: Option<f64>,
    /// Start neighborhood radius. Optional, default: 1.5.
    #[structopt(long)]
    sigma: Option<f64>,
    /// Decay of learning rate and radius (lin|exp|asymptotic). Optional, default: 'asymptotic'.
    #[structopt(short, long)]
    decay: Option<String>,
    /// Neighborhood function (gauss|bubble). Optional, default: 'gauss'.
    #[structopt(short = "g", long)]
    neigh: Option<String>,
    /// Map size: rows, cols. Optional, default: derived from the number of samples.
    #[structopt(short, long, number_of_values = 2)]
    size: Vec<usize>,
    /// Random seed for reproducible maps.
    #[structopt(long)]
    seed: Option<u64>,
    /// Present samples in random order in each epoch.
    #[structopt(long)]
    shuffle: bool,
    /// Train the map on the target column as well.
    #[structopt(long = "include-target")]
    include_target: bool,
    /// Refit the regression for every query.
    #[structopt(long)]
    refit: bool,
    /// Column roles, e.g. 'features,target,label'. Optional, default: 'features,label,target'.
    #[structopt(long)]
    schema: Option<String>,
    /// Field delimiter. Optional, default: ','.
    #[structopt(long)]
    delimiter: Option<char>,
    /// The first row holds column names (no title row).
    #[structopt(long = "no-title")]
    no_title: bool,
    /// Samples to predict, features in quotes: `"0.5 120 12" "1.0 100 14"`
    #[structopt(short, long)]
    query: Vec<String>,
    /// Output base path, with base file name. Optional, default: no file output.
    #[structopt(short, long)]
    output: Option<String>,
    /// Log progress and regression scores.
    #[structopt(short, long)]
    verbose: bool,
}

impl Cli {
    /// Whether verbose logging was requested.
    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

/// Parsed command line arguments.
#[derive(Debug)]
pub struct CliParsed {
    pub file: String,
    pub config: Config,
    pub queries: Vec<Vec<f64>>,
    pub output: Option<String>,
    pub verbose: bool,
}

impl CliParsed {
    /// Parse arguments from a [`Cli`](struct.Cli.html), merged over the configuration file if any.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        Self::apply(&cli, &mut config)?;
        config.validate()?;

        Ok(CliParsed {
            queries: cli
                .query
                .iter()
                .map(|q| Self::parse_query(q))
                .collect::<Result<_>>()?,
            file: cli.file,
            config,
            output: cli.output,
            verbose: cli.verbose,
        })
    }

    fn apply(cli: &Cli, config: &mut Config) -> Result<()> {
        let som = &mut config.som;
        if let Some(epochs) = cli.epochs {
            som.epochs = epochs;
        }
        if let Some(alpha) = cli.alpha {
            som.learning_rate = alpha;
        }
        if let Some(sigma) = cli.sigma {
            som.sigma = sigma;
        }
        if let Some(decay) = &cli.decay {
            som.decay = decay.parse()?;
        }
        if let Some(neigh) = &cli.neigh {
            som.neighborhood = neigh.parse()?;
        }
        match cli.size.len() {
            0 => {}
            2 => som.size = Some([cli.size[0], cli.size[1]]),
            _ => {
                return Err(Error::Config(
                    "two values required for size: rows, cols".to_string(),
                ))
            }
        }
        if cli.seed.is_some() {
            som.seed = cli.seed;
        }
        if cli.shuffle {
            som.order = SampleOrder::Shuffled;
        }
        if cli.include_target {
            som.include_target = true;
        }

        let data = &mut config.data;
        if let Some(schema) = &cli.schema {
            data.schema = schema.parse()?;
        }
        if let Some(delimiter) = cli.delimiter {
            data.delimiter = delimiter;
        }
        if cli.no_title {
            data.promote_header = false;
        }

        if cli.refit {
            config.regression = RegressionMode::RefitPerQuery;
        }
        Ok(())
    }

    fn parse_query(query: &str) -> Result<Vec<f64>> {
        query
            .split_whitespace()
            .map(|v| {
                v.parse()
                    .map_err(|_| Error::Config(format!("Unable to parse value {} in query", v)))
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use crate::cli::{Cli, CliParsed};
    use crate::map::som::{DecayFunction, SampleOrder};
    use crate::regress::RegressionMode;
    use structopt::StructOpt;

    fn parse(args: &[&str]) -> crate::Result<CliParsed> {
        let cli = Cli::from_iter_safe(args.iter().copied()).unwrap();
        CliParsed::from_cli(cli)
    }

    #[test]
    fn defaults() {
        let parsed = parse(&["flocsom", "--file", "data.csv"]).unwrap();
        assert_eq!(parsed.file, "data.csv");
        assert_eq!(parsed.config.som.epochs, 1000);
        assert!(parsed.queries.is_empty());
        assert!(!parsed.verbose);
    }

    #[test]
    fn overrides() {
        let parsed = parse(&[
            "flocsom", "-f", "data.csv", "-e", "2000", "-a", "0.3", "--decay", "lin",
            "--size", "4", "5", "--shuffle", "--refit", "--schema", "features,target,label",
            "--query", "1 2.5 3", "--query", "4 5 6",
        ])
        .unwrap();
        let som = &parsed.config.som;
        assert_eq!(som.epochs, 2000);
        assert_eq!(som.learning_rate, 0.3);
        assert_eq!(som.decay, DecayFunction::Linear);
        assert_eq!(som.size, Some([4, 5]));
        assert_eq!(som.order, SampleOrder::Shuffled);
        assert_eq!(parsed.config.regression, RegressionMode::RefitPerQuery);
        assert_eq!(parsed.queries, vec![vec![1.0, 2.5, 3.0], vec![4.0, 5.0, 6.0]]);
    }

    #[test]
    fn out_of_bounds() {
        assert!(parse(&["flocsom", "-f", "x.csv", "-e", "50"]).is_err());
        assert!(parse(&["flocsom", "-f", "x.csv", "-a", "1.5"]).is_err());
        assert!(parse(&["flocsom", "-f", "x.csv", "-d", "sometimes"]).is_err());
        assert!(parse(&["flocsom", "-f", "x.csv", "-q", "1 two 3"]).is_err());
    }
}
