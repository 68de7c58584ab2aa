use crate::core::energy::ModelKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for parameter {parameter}: {value}")]
    InvalidValue { parameter: &'static str, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeConfig {
    pub sites: usize,
    pub cyclic: bool,
}

/// Heat capacity changes and the temperature at which the model parameters were measured.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrapolationConfig {
    pub heat_capacities: Vec<f64>,
    pub reference_temperature: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub kind: ModelKind,
    pub parameters: Vec<f64>,
    pub extrapolation: Option<ExtrapolationConfig>,
}

/// Root search settings for the free ligand solve.
///
/// `tolerance` is an absolute bracket width in molar units. The default of zero leaves
/// convergence to the relative machine-precision test, which resolves free ligand
/// concentrations of any magnitude.
///
/// Strongly cooperative models can put the root many decades below `Ltot` (around 1e-39 M
/// for a steep `jump` model near saturation). Bisection then needs roughly one iteration
/// per halving of the bracket, so 100 iterations may not be enough; raise
/// `max_iterations` when such runs report non-convergence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitrationConfig {
    pub lattice: LatticeConfig,
    pub model: ModelConfig,
    pub temperature: f64,
    pub solver: SolverConfig,
}

#[derive(Default)]
pub struct TitrationConfigBuilder {
    sites: Option<usize>,
    cyclic: Option<bool>,
    model_kind: Option<ModelKind>,
    parameters: Option<Vec<f64>>,
    heat_capacities: Option<Vec<f64>>,
    reference_temperature: Option<f64>,
    temperature: Option<f64>,
    solver: Option<SolverConfig>,
}

impl TitrationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sites(mut self, sites: usize) -> Self {
        self.sites = Some(sites);
        self
    }
    pub fn cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = Some(cyclic);
        self
    }
    pub fn model_kind(mut self, kind: ModelKind) -> Self {
        self.model_kind = Some(kind);
        self
    }
    pub fn parameters(mut self, parameters: Vec<f64>) -> Self {
        self.parameters = Some(parameters);
        self
    }
    pub fn heat_capacities(mut self, heat_capacities: Vec<f64>) -> Self {
        self.heat_capacities = Some(heat_capacities);
        self
    }
    pub fn reference_temperature(mut self, temperature: f64) -> Self {
        self.reference_temperature = Some(temperature);
        self
    }
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
    pub fn solver(mut self, solver: SolverConfig) -> Self {
        self.solver = Some(solver);
        self
    }

    pub fn build(self) -> Result<TitrationConfig, ConfigError> {
        let lattice = LatticeConfig {
            sites: self.sites.ok_or(ConfigError::MissingParameter("sites"))?,
            cyclic: self.cyclic.ok_or(ConfigError::MissingParameter("cyclic"))?,
        };

        let extrapolation = match (self.heat_capacities, self.reference_temperature) {
            (Some(heat_capacities), Some(reference_temperature)) => Some(ExtrapolationConfig {
                heat_capacities,
                reference_temperature,
            }),
            (Some(_), None) => return Err(ConfigError::MissingParameter("reference_temperature")),
            (None, Some(_)) => return Err(ConfigError::MissingParameter("heat_capacities")),
            (None, None) => None,
        };
        let model = ModelConfig {
            kind: self
                .model_kind
                .ok_or(ConfigError::MissingParameter("model_kind"))?,
            parameters: self
                .parameters
                .ok_or(ConfigError::MissingParameter("parameters"))?,
            extrapolation,
        };

        let temperature = self
            .temperature
            .ok_or(ConfigError::MissingParameter("temperature"))?;
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(ConfigError::InvalidValue {
                parameter: "temperature",
                value: temperature,
            });
        }

        let solver = self.solver.unwrap_or_default();
        if solver.max_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "max_iterations",
                value: 0.0,
            });
        }
        if !(solver.tolerance.is_finite() && solver.tolerance >= 0.0) {
            return Err(ConfigError::InvalidValue {
                parameter: "tolerance",
                value: solver.tolerance,
            });
        }

        Ok(TitrationConfig {
            lattice,
            model,
            temperature,
            solver,
        })
    }
}
