use crate::cli::SimulateArgs;
use crate::error::{CliError, Result};
use itcsim::core::energy::ModelKind;
use itcsim::engine::config as core_config;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialLatticeConfig {
    sites: Option<usize>,
    cyclic: Option<bool>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialModelConfig {
    kind: ModelKind,
    parameters: Vec<f64>,
    heat_capacities: Option<Vec<f64>>,
    reference_temperature: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialExperimentConfig {
    temperature: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialSolverConfig {
    max_iterations: Option<usize>,
    tolerance: Option<f64>,
}

impl From<PartialSolverConfig> for core_config::SolverConfig {
    fn from(p: PartialSolverConfig) -> Self {
        let defaults = core_config::SolverConfig::default();
        Self {
            max_iterations: p.max_iterations.unwrap_or(defaults.max_iterations),
            tolerance: p.tolerance.unwrap_or(defaults.tolerance),
        }
    }
}

/// A run configuration as written in a TOML file; every section but `[model]` may be
/// left out and supplied on the command line instead.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialRunConfig {
    lattice: Option<PartialLatticeConfig>,
    model: Option<PartialModelConfig>,
    experiment: Option<PartialExperimentConfig>,
    solver: Option<PartialSolverConfig>,
}

impl PartialRunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading run configuration from file: {:?}", path);
        let parsing_error = |source: anyhow::Error| CliError::FileParsing {
            path: path.to_path_buf(),
            source,
        };
        let content = std::fs::read_to_string(path).map_err(|e| parsing_error(e.into()))?;
        toml::from_str(&content).map_err(|e| parsing_error(e.into()))
    }

    pub fn merge_with_cli(self, args: &SimulateArgs) -> Result<core_config::TitrationConfig> {
        let lattice = self.lattice.unwrap_or_default();
        let experiment = self.experiment.unwrap_or_default();
        let model = self
            .model
            .ok_or_else(|| CliError::Config("`[model]` section is required.".to_string()))?;

        let sites = args.sites.or(lattice.sites).ok_or_else(|| {
            CliError::Config(
                "`lattice.sites` is required either in the config file or via --sites.".to_string(),
            )
        })?;
        let cyclic = args.topology.cyclic().or(lattice.cyclic).unwrap_or(true);
        let temperature = args
            .temperature
            .or(experiment.temperature)
            .ok_or_else(|| {
                CliError::Config(
                    "`experiment.temperature` is required either in the config file or via --temperature."
                        .to_string(),
                )
            })?;

        let mut builder = core_config::TitrationConfigBuilder::new()
            .sites(sites)
            .cyclic(cyclic)
            .model_kind(model.kind)
            .parameters(model.parameters)
            .temperature(temperature)
            .solver(self.solver.unwrap_or_default().into());

        if let Some(heat_capacities) = model.heat_capacities {
            builder = builder.heat_capacities(heat_capacities);
        }
        if let Some(reference) = model.reference_temperature {
            builder = builder.reference_temperature(reference);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }
}
