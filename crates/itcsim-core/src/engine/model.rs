use super::error::EngineError;
use super::heat::predicted_heat;
use super::partition::{PartitionError, fractional_saturation, set_probabilities};
use super::progress::{Progress, ProgressReporter};
use super::solver::{Conditions, RootSolver, SolverError, solve_free_ligand};
use super::state::{TitrationPoint, TitrationResult};
use crate::core::energy::{ConfigurationEnergies, EnergyModel, ModelKind};
use crate::core::lattice::{Lattice, LatticeError};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

/// A lattice together with the energies of its configurations under one energy model.
///
/// The lattice is built once and reused: applying another model only rewrites the energy
/// table. Dropping the model releases both.
#[derive(Debug, Clone)]
pub struct BindingModel {
    lattice: Lattice,
    energies: ConfigurationEnergies,
    model_kind: Option<ModelKind>,
}

impl BindingModel {
    pub fn new(size: usize, cyclic: bool) -> Result<Self, LatticeError> {
        Ok(Self::from_lattice(Lattice::new(size, cyclic)?))
    }

    pub fn from_lattice(lattice: Lattice) -> Self {
        Self {
            lattice,
            energies: ConfigurationEnergies::default(),
            model_kind: None,
        }
    }

    #[inline]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    #[inline]
    pub fn energies(&self) -> &ConfigurationEnergies {
        &self.energies
    }

    /// The kind of the most recently applied energy model, if any.
    #[inline]
    pub fn model_kind(&self) -> Option<ModelKind> {
        self.model_kind
    }

    pub fn apply_energy_model(&mut self, model: &EnergyModel) {
        model.assign_energies_into(&self.lattice, &mut self.energies);
        self.model_kind = Some(model.kind());
        debug!(
            model = %model.kind(),
            configurations = self.energies.len(),
            "Assigned configuration energies."
        );
    }

    /// Configuration probabilities at a fixed free ligand concentration.
    pub fn probabilities(
        &self,
        free_ligand: f64,
        temperature: f64,
    ) -> Result<Vec<f64>, PartitionError> {
        let mut probabilities = Vec::with_capacity(self.lattice.len());
        set_probabilities(
            &self.lattice,
            &self.energies,
            free_ligand,
            temperature,
            &mut probabilities,
        )?;
        Ok(probabilities)
    }

    /// Solves one titration point, using `scratch` for the probability vector.
    pub fn solve_point<S>(
        &self,
        conditions: &Conditions,
        solver: &S,
        scratch: &mut Vec<f64>,
    ) -> Result<TitrationPoint, SolverError>
    where
        S: RootSolver + ?Sized,
    {
        let free_ligand =
            solve_free_ligand(&self.lattice, &self.energies, conditions, solver, scratch)?;
        let point = TitrationPoint {
            protein: conditions.protein,
            ligand: conditions.ligand,
            free_ligand,
            heat: predicted_heat(scratch, self.energies.enthalpies()),
            saturation: fractional_saturation(&self.lattice, scratch),
        };
        trace!(
            protein = point.protein,
            ligand = point.ligand,
            free_ligand = point.free_ligand,
            heat = point.heat,
            "Solved titration point."
        );
        Ok(point)
    }

    /// Predicts the heat of every `(protein[i], ligand[i])` point at `temperature`.
    ///
    /// The first failing point aborts the run and no partial result is returned.
    pub fn run_titration<S>(
        &self,
        temperature: f64,
        protein: &[f64],
        ligand: &[f64],
        solver: &S,
    ) -> Result<TitrationResult, EngineError>
    where
        S: RootSolver + Sync + ?Sized,
    {
        self.run_titration_with_progress(
            temperature,
            protein,
            ligand,
            solver,
            &ProgressReporter::new(),
        )
    }

    pub(crate) fn run_titration_with_progress<S>(
        &self,
        temperature: f64,
        protein: &[f64],
        ligand: &[f64],
        solver: &S,
        reporter: &ProgressReporter,
    ) -> Result<TitrationResult, EngineError>
    where
        S: RootSolver + Sync + ?Sized,
    {
        ensure_same_length(protein, ligand)?;
        if self.energies.len() != self.lattice.len() {
            return Err(EngineError::EnergiesNotAssigned);
        }

        debug!(
            points = protein.len(),
            sites = self.lattice.size(),
            cyclic = self.lattice.is_cyclic(),
            temperature,
            "Running titration."
        );
        reporter.report(Progress::TaskStart {
            total_steps: protein.len() as u64,
        });

        let solve = |scratch: &mut Vec<f64>, index: usize, p: f64, l: f64| {
            let conditions = Conditions {
                temperature,
                protein: p,
                ligand: l,
            };
            let point = self
                .solve_point(&conditions, solver, scratch)
                .map_err(|source| EngineError::TitrationPoint { index, source });
            reporter.report(Progress::TaskIncrement);
            point
        };

        #[cfg(not(feature = "parallel"))]
        let points = {
            let mut scratch = Vec::with_capacity(self.lattice.len());
            protein
                .iter()
                .zip(ligand)
                .enumerate()
                .map(|(index, (&p, &l))| solve(&mut scratch, index, p, l))
                .collect::<Result<Vec<_>, _>>()
        };

        // Every point is evaluated; collecting in order afterwards keeps the error of the
        // lowest failing index.
        #[cfg(feature = "parallel")]
        let points = protein
            .par_iter()
            .zip(ligand.par_iter())
            .enumerate()
            .map_init(Vec::new, |scratch, (index, (&p, &l))| solve(scratch, index, p, l))
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<Result<Vec<_>, _>>();

        // The phase ends whether or not every point was solved.
        reporter.report(Progress::TaskFinish);
        Ok(TitrationResult { points: points? })
    }
}

pub(crate) fn ensure_same_length(protein: &[f64], ligand: &[f64]) -> Result<(), EngineError> {
    if protein.len() != ligand.len() {
        return Err(EngineError::LengthMismatch {
            protein: protein.len(),
            ligand: ligand.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::solver::BrentSolver;
    use std::sync::{Arc, Mutex};

    const T: f64 = 298.15;

    fn simple_model(size: usize, cyclic: bool) -> BindingModel {
        let mut model = BindingModel::new(size, cyclic).unwrap();
        let energy = EnergyModel::from_parameters(ModelKind::Simple, &[-30000.0, -8000.0]).unwrap();
        model.apply_energy_model(&energy);
        model
    }

    #[test]
    fn new_model_has_no_energies_until_a_model_is_applied() {
        let model = BindingModel::new(3, true).unwrap();
        assert_eq!(model.model_kind(), None);
        assert!(model.energies().is_empty());

        let result = model.run_titration(T, &[1e-6], &[1e-6], &BrentSolver::default());
        assert!(matches!(result, Err(EngineError::EnergiesNotAssigned)));
    }

    #[test]
    fn apply_energy_model_replaces_the_previous_energies() {
        let mut model = simple_model(3, true);
        let nn = EnergyModel::from_parameters(
            ModelKind::NearestNeighbor,
            &[-1.0, -2.0, -3.0, -4.0, -5.0, -6.0, -7.0, -8.0],
        )
        .unwrap();
        model.apply_energy_model(&nn);

        assert_eq!(model.model_kind(), Some(ModelKind::NearestNeighbor));
        assert_eq!(model.energies(), &nn.assign_energies(model.lattice()));
    }

    #[test]
    fn run_titration_rejects_mismatched_lengths() {
        let model = simple_model(2, false);
        let result = model.run_titration(T, &[1e-6, 1e-6], &[1e-6], &BrentSolver::default());
        assert!(matches!(
            result,
            Err(EngineError::LengthMismatch {
                protein: 2,
                ligand: 1
            })
        ));
    }

    #[test]
    fn run_titration_returns_one_point_per_pair() {
        let model = simple_model(4, true);
        let protein = [1e-6; 5];
        let ligand = [0.0, 1e-6, 2e-6, 4e-6, 8e-6];
        let result = model
            .run_titration(T, &protein, &ligand, &BrentSolver::default())
            .unwrap();

        assert_eq!(result.len(), ligand.len());
        for (point, &l) in result.points.iter().zip(&ligand) {
            assert_eq!(point.ligand, l);
            assert!((0.0..=l).contains(&point.free_ligand));
            assert!((0.0..=1.0).contains(&point.saturation));
        }
        assert_eq!(result.points[0].heat, 0.0);
    }

    #[test]
    fn run_titration_aborts_at_the_first_failing_point() {
        let model = simple_model(2, true);
        let protein = [1e-6, 1e-6, -1e-6, f64::NAN];
        let ligand = [1e-6, 2e-6, 3e-6, 4e-6];
        let result = model.run_titration(T, &protein, &ligand, &BrentSolver::default());

        match result {
            Err(EngineError::TitrationPoint { index, source }) => {
                assert_eq!(index, 2);
                assert!(matches!(source, SolverError::InvalidConditions { .. }));
            }
            other => panic!("expected a titration point failure, got {other:?}"),
        }
    }

    #[test]
    fn failing_titration_still_finishes_the_progress_phase() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(match event {
                Progress::TaskStart { .. } => "start",
                Progress::TaskIncrement => "increment",
                Progress::TaskFinish => "finish",
                _ => "other",
            });
        }));

        let model = simple_model(2, true);
        let result = model.run_titration_with_progress(
            T,
            &[1e-6, -1e-6],
            &[1e-6, 1e-6],
            &BrentSolver::default(),
            &reporter,
        );

        assert!(matches!(
            result,
            Err(EngineError::TitrationPoint { index: 1, .. })
        ));
        let events = events.lock().unwrap();
        assert_eq!(events.first(), Some(&"start"));
        assert_eq!(events.last(), Some(&"finish"));
    }

    #[test]
    fn empty_titration_yields_an_empty_result() {
        let model = simple_model(2, true);
        let result = model
            .run_titration(T, &[], &[], &BrentSolver::default())
            .unwrap();
        assert!(result.is_empty());
    }
}
