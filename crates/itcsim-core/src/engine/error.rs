use thiserror::Error;

use super::config::ConfigError;
use super::partition::PartitionError;
use super::solver::SolverError;
use crate::core::energy::EnergyModelError;
use crate::core::lattice::LatticeError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Lattice construction failed: {source}")]
    Lattice {
        #[from]
        source: LatticeError,
    },

    #[error("Energy model error: {source}")]
    EnergyModel {
        #[from]
        source: EnergyModelError,
    },

    #[error("Probability calculation failed: {source}")]
    Partition {
        #[from]
        source: PartitionError,
    },

    #[error("Free ligand solve failed: {source}")]
    Solver {
        #[from]
        source: SolverError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("No energy model has been applied to the lattice")]
    EnergiesNotAssigned,

    #[error("Protein and ligand sequences differ in length ({protein} vs {ligand} points)")]
    LengthMismatch { protein: usize, ligand: usize },

    #[error("Titration point {index} failed: {source}")]
    TitrationPoint {
        index: usize,
        #[source]
        source: SolverError,
    },
}
