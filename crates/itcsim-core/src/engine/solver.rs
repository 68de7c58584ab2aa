use super::config::SolverConfig;
use super::partition::{PartitionError, bound_per_lattice, set_probabilities};
use crate::core::energy::ConfigurationEnergies;
use crate::core::lattice::Lattice;
use argmin::core::{CostFunction, Error, Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::brent::BrentRoot;
use std::cell::RefCell;
use tracing::trace;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum SolverError {
    #[error(
        "Root is not bracketed: f({lower}) = {f_lower} and f({upper}) = {f_upper} have the same sign"
    )]
    NoSignChange {
        lower: f64,
        upper: f64,
        f_lower: f64,
        f_upper: f64,
    },

    #[error("Root search did not converge within {iterations} iterations")]
    NonConvergence { iterations: u64 },

    #[error("Objective evaluation failed: {source}")]
    Objective {
        #[from]
        source: PartitionError,
    },

    #[error("Objective is not finite at x = {at}")]
    NonFiniteObjective { at: f64 },

    #[error(
        "Total concentrations must be non-negative and finite (protein {protein} M, ligand {ligand} M)"
    )]
    InvalidConditions { protein: f64, ligand: f64 },

    #[error("Root finder failed: {0}")]
    Backend(String),
}

/// A bracketed, derivative-free scalar root finder.
pub trait RootSolver {
    /// Finds `x` in `[lower, upper]` with `f(x) = 0`, given that `f` changes sign over the
    /// interval. An exact zero at either end is returned as is.
    fn find_root<F>(&self, f: F, lower: f64, upper: f64) -> Result<f64, SolverError>
    where
        F: FnMut(f64) -> Result<f64, SolverError>;
}

/// Brent's method as implemented by argmin's `BrentRoot`.
///
/// `tolerance` is the absolute width below which the bracket counts as converged; the
/// solver always adds a relative term of a few machine epsilons on top of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrentSolver {
    pub tolerance: f64,
    pub max_iterations: u64,
}

impl Default for BrentSolver {
    fn default() -> Self {
        Self::from(&SolverConfig::default())
    }
}

impl From<&SolverConfig> for BrentSolver {
    fn from(config: &SolverConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            max_iterations: config.max_iterations as u64,
        }
    }
}

fn finite(at: f64, value: f64) -> Result<f64, SolverError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SolverError::NonFiniteObjective { at })
    }
}

/// Adapts a fallible scalar closure to argmin's cost function interface.
struct Objective<F> {
    f: RefCell<F>,
}

impl<F> CostFunction for Objective<F>
where
    F: FnMut(f64) -> Result<f64, SolverError>,
{
    type Param = f64;
    type Output = f64;

    fn cost(&self, x: &Self::Param) -> Result<Self::Output, Error> {
        let mut f = self.f.borrow_mut();
        let value = (*f)(*x)?;
        Ok(finite(*x, value)?)
    }
}

/// Recovers the objective's own error from argmin's error wrapper.
fn from_argmin(error: Error) -> SolverError {
    match error.downcast::<SolverError>() {
        Ok(source) => source,
        Err(other) => SolverError::Backend(other.to_string()),
    }
}

impl RootSolver for BrentSolver {
    fn find_root<F>(&self, mut f: F, lower: f64, upper: f64) -> Result<f64, SolverError>
    where
        F: FnMut(f64) -> Result<f64, SolverError>,
    {
        // Endpoints are checked here so exact zeros and missing brackets keep their values
        let f_lower = finite(lower, f(lower)?)?;
        if f_lower == 0.0 {
            return Ok(lower);
        }
        let f_upper = finite(upper, f(upper)?)?;
        if f_upper == 0.0 {
            return Ok(upper);
        }
        if f_lower.signum() == f_upper.signum() {
            return Err(SolverError::NoSignChange {
                lower,
                upper,
                f_lower,
                f_upper,
            });
        }

        let objective = Objective { f: RefCell::new(f) };
        let result = Executor::new(objective, BrentRoot::new(lower, upper, self.tolerance))
            .configure(|state| state.param(upper).max_iters(self.max_iterations))
            .run()
            .map_err(from_argmin)?;

        let state = result.state();
        if matches!(
            state.get_termination_status(),
            TerminationStatus::Terminated(TerminationReason::MaxItersReached)
        ) {
            return Err(SolverError::NonConvergence {
                iterations: self.max_iterations,
            });
        }

        let root = state
            .get_param()
            .copied()
            .ok_or_else(|| SolverError::Backend("Brent search returned no estimate".to_string()))?;
        trace!(iterations = state.get_iter(), root, "Brent converged");
        Ok(root)
    }
}

/// The fixed conditions of one titration point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    pub temperature: f64,
    pub protein: f64,
    pub ligand: f64,
}

/// Ligand mass balance residual `Ltot - (Ptot * <n>(L) + L)` at trial free ligand `L`.
///
/// `probabilities` is overwritten with the distribution at `L`.
pub fn mass_balance_residual(
    lattice: &Lattice,
    energies: &ConfigurationEnergies,
    conditions: &Conditions,
    free_ligand: f64,
    probabilities: &mut Vec<f64>,
) -> Result<f64, PartitionError> {
    set_probabilities(
        lattice,
        energies,
        free_ligand,
        conditions.temperature,
        probabilities,
    )?;
    let bound = conditions.protein * bound_per_lattice(lattice, probabilities);
    Ok(conditions.ligand - (bound + free_ligand))
}

/// Solves ligand mass balance for the free ligand concentration in `[0, Ltot]`.
///
/// On success `probabilities` holds the distribution at the returned concentration.
pub fn solve_free_ligand<S>(
    lattice: &Lattice,
    energies: &ConfigurationEnergies,
    conditions: &Conditions,
    solver: &S,
    probabilities: &mut Vec<f64>,
) -> Result<f64, SolverError>
where
    S: RootSolver + ?Sized,
{
    let Conditions {
        protein, ligand, ..
    } = *conditions;
    if !(protein.is_finite() && protein >= 0.0 && ligand.is_finite() && ligand >= 0.0) {
        return Err(SolverError::InvalidConditions { protein, ligand });
    }

    let free_ligand = solver.find_root(
        |l| {
            mass_balance_residual(lattice, energies, conditions, l, probabilities)
                .map_err(SolverError::from)
        },
        0.0,
        ligand,
    )?;

    set_probabilities(
        lattice,
        energies,
        free_ligand,
        conditions.temperature,
        probabilities,
    )?;
    Ok(free_ligand)
}
