use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "itcsim - Predicts isothermal titration calorimetry heats for cooperative ligand binding to a lattice of sites.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict the heat of every point of a titration.
    Simulate(SimulateArgs),
    /// List the available energy models and their parameter layouts.
    Models,
}

/// Arguments for the `simulate` subcommand.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    // --- Core Arguments ---
    /// Path to the run configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Path to a CSV file of titration points with `protein` and `ligand` columns (molar).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the CSV file of predicted heats.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    // --- Overrides ---
    /// Override the experiment temperature in kelvin.
    #[arg(short = 't', long, value_name = "KELVIN")]
    pub temperature: Option<f64>,

    /// Override the number of binding sites.
    #[arg(short = 'n', long, value_name = "INT")]
    pub sites: Option<usize>,

    /// Override the lattice topology from the config file.
    #[command(flatten)]
    pub topology: Topology,
}

/// Mutually exclusive flags selecting the lattice topology.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct Topology {
    /// Treat the sites as a ring, with the last site adjacent to the first.
    #[arg(long)]
    pub cyclic: bool,
    /// Treat the sites as an open chain.
    #[arg(long)]
    pub linear: bool,
}

impl Topology {
    /// The topology requested on the command line, if any.
    pub fn cyclic(&self) -> Option<bool> {
        match (self.cyclic, self.linear) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn simulate_parses_required_paths_and_overrides() {
        let cli = parse(&[
            "itcsim", "-vv", "simulate", "-c", "run.toml", "-i", "points.csv", "-o", "heats.csv",
            "--temperature", "310.15", "--sites", "12", "--linear",
        ]);

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Simulate(args) => {
                assert_eq!(args.config, PathBuf::from("run.toml"));
                assert_eq!(args.temperature, Some(310.15));
                assert_eq!(args.sites, Some(12));
                assert_eq!(args.topology.cyclic(), Some(false));
            }
            other => panic!("expected simulate, got {other:?}"),
        }
    }

    #[test]
    fn topology_flags_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "itcsim", "simulate", "-c", "a", "-i", "b", "-o", "c", "--cyclic", "--linear",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["itcsim", "-q", "-v", "models"]).is_err());
        assert!(parse(&["itcsim", "-q", "models"]).quiet);
    }
}
