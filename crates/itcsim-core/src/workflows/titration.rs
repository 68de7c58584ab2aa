use crate::core::energy::EnergyModel;
use crate::core::thermo::extrapolate_parameters;
use crate::engine::config::TitrationConfig;
use crate::engine::error::EngineError;
use crate::engine::model::{BindingModel, ensure_same_length};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::solver::BrentSolver;
use crate::engine::state::TitrationResult;
use tracing::{info, instrument};

/// Predicts the heat of a whole titration described by `config`.
///
/// Builds the lattice, moves the model parameters to the experiment temperature when a
/// reference temperature is configured, assigns configuration energies once and then
/// solves every `(protein[i], ligand[i])` point.
#[instrument(skip_all, name = "titration_workflow")]
pub fn run(
    config: &TitrationConfig,
    protein: &[f64],
    ligand: &[f64],
    reporter: &ProgressReporter,
) -> Result<TitrationResult, EngineError> {
    ensure_same_length(protein, ligand)?;

    // === Phase 1: Lattice and energies ===
    let model = reporter.phase("Preparation", || -> Result<BindingModel, EngineError> {
        info!(
            sites = config.lattice.sites,
            cyclic = config.lattice.cyclic,
            configurations = 1u64 << config.lattice.sites.min(63),
            "Enumerating lattice configurations."
        );
        let mut model = BindingModel::new(config.lattice.sites, config.lattice.cyclic)?;

        let parameters = match &config.model.extrapolation {
            Some(extrapolation) => {
                info!(
                    model = %config.model.kind,
                    from = extrapolation.reference_temperature,
                    to = config.temperature,
                    "Extrapolating model parameters."
                );
                extrapolate_parameters(
                    config.model.kind,
                    &config.model.parameters,
                    &extrapolation.heat_capacities,
                    config.temperature,
                    extrapolation.reference_temperature,
                )?
            }
            None => config.model.parameters.clone(),
        };

        let energy_model = EnergyModel::from_parameters(config.model.kind, &parameters)?;
        model.apply_energy_model(&energy_model);
        Ok(model)
    })?;

    // === Phase 2: Titration points ===
    let solver = BrentSolver::from(&config.solver);
    let result = reporter.phase("Titration", || {
        info!(points = protein.len(), "Solving titration points.");
        model.run_titration_with_progress(config.temperature, protein, ligand, &solver, reporter)
    })?;

    info!(points = result.len(), "Titration finished.");
    reporter.report(Progress::Message(format!(
        "Predicted heats for {} titration points",
        result.len()
    )));
    Ok(result)
}
