use crate::cli::SimulateArgs;
use crate::config::PartialRunConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use itcsim::{
    engine::{progress::ProgressReporter, state::TitrationResult},
    workflows,
};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct PointRecord {
    protein: f64,
    ligand: f64,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let partial_config = PartialRunConfig::from_file(&args.config)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    info!("Loading titration points from {:?}", &args.input);
    let (protein, ligand) = read_points(&args.input)?;
    if protein.is_empty() {
        return Err(CliError::Argument(format!(
            "No titration points found in '{}'",
            args.input.display()
        )));
    }

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Simulating {} titration points on a {} lattice of {} sites ({} model)...",
        protein.len(),
        if config.lattice.cyclic { "cyclic" } else { "linear" },
        config.lattice.sites,
        config.model.kind
    );
    let result = workflows::titration::run(&config, &protein, &ligand, &reporter)?;

    write_results(&args.output, &result)?;
    info!(points = result.len(), "Wrote predicted heats to {:?}", &args.output);
    println!("✓ Predicted heats written to: {}", args.output.display());
    Ok(())
}

fn read_points(path: &Path) -> Result<(Vec<f64>, Vec<f64>)> {
    let parsing_error = |e: csv::Error| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(parsing_error)?;

    let mut protein = Vec::new();
    let mut ligand = Vec::new();
    for record in reader.deserialize::<PointRecord>() {
        let record = record.map_err(parsing_error)?;
        protein.push(record.protein);
        ligand.push(record.ligand);
    }
    Ok((protein, ligand))
}

fn write_results(path: &Path, result: &TitrationResult) -> Result<()> {
    let writing_error = |e: csv::Error| CliError::FileWriting {
        path: path.to_path_buf(),
        source: e.into(),
    };

    let mut writer = csv::Writer::from_path(path).map_err(writing_error)?;
    for point in &result.points {
        writer.serialize(point).map_err(writing_error)?;
    }
    writer.flush().map_err(|e| CliError::FileWriting {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    Ok(())
}
