use flocsom::cli::{Cli, CliParsed};
use flocsom::proc::ProcessorBuilder;
use flocsom::Result;
use log::{error, info};
use structopt::StructOpt;

fn main() {
    let args = Cli::from_args();
    let verbose = args.verbose();

    let filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if let Err(e) = CliParsed::from_cli(args).and_then(run) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(parsed: CliParsed) -> Result<()> {
    let config = &parsed.config;
    let mut proc = ProcessorBuilder::from_config(config).build_from_file(&parsed.file)?;

    let params = config.som.train_params();
    proc.train(&params)?;

    let (nrows, ncols) = proc.grid_size();
    let qe = proc.som().quantization_error(proc.data())?;
    println!("Map: {} x {} units, quantization error {:.6}", nrows, ncols, qe);

    for query in &parsed.queries {
        let prediction = proc.predict(query)?;
        println!(
            "Predicted {} = {:.6} (R2 = {:.6}), unit ({}, {}) at ({:.3}, {:.3})",
            proc.target_name(),
            prediction.value,
            prediction.r2,
            prediction.row,
            prediction.col,
            prediction.x,
            prediction.y
        );
    }

    if let Some(out) = &parsed.output {
        let units_file = format!("{}-units.csv", out);
        let nearest_file = format!("{}-nearest.csv", out);
        let layout_file = format!("{}-layout.json", out);

        proc.write_som_units(&units_file)?;
        proc.write_data_nearest(&nearest_file)?;
        proc.write_layout_json(&layout_file)?;

        info!(
            "Wrote {}, {} and {}",
            units_file, nearest_file, layout_file
        );
    }
    Ok(())
}
