use crate::core::energy::ConfigurationEnergies;
use crate::core::lattice::Lattice;
use crate::core::thermo::thermal_energy;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PartitionError {
    #[error("Partition function is zero or not finite at free ligand {free_ligand} M and {temperature} K")]
    DegenerateNormalization { free_ligand: f64, temperature: f64 },

    #[error("Temperature must be positive and finite (got {0} K)")]
    InvalidTemperature(f64),

    #[error("Free ligand concentration must be non-negative and finite (got {0} M)")]
    InvalidFreeLigand(f64),

    #[error("Energy table holds {found} configurations but the lattice has {expected}")]
    EnergyTableMismatch { expected: usize, found: usize },
}

/// Fills `probabilities` with the normalized Boltzmann weight of every configuration.
///
/// The weight of configuration `i` is `exp(-G_i / RT) * L^n_i`. Weights are built in log
/// space and shifted by their maximum before exponentiation, so large binding free
/// energies or concentrations do not overflow. At zero free ligand only the empty
/// configuration carries weight.
pub fn set_probabilities(
    lattice: &Lattice,
    energies: &ConfigurationEnergies,
    free_ligand: f64,
    temperature: f64,
    probabilities: &mut Vec<f64>,
) -> Result<(), PartitionError> {
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(PartitionError::InvalidTemperature(temperature));
    }
    if !(free_ligand.is_finite() && free_ligand >= 0.0) {
        return Err(PartitionError::InvalidFreeLigand(free_ligand));
    }
    if energies.len() != lattice.len() {
        return Err(PartitionError::EnergyTableMismatch {
            expected: lattice.len(),
            found: energies.len(),
        });
    }

    let rt = thermal_energy(temperature);
    let log_ligand = free_ligand.ln();

    probabilities.clear();
    probabilities.reserve(lattice.len());
    for (&g, &n) in energies.free_energies().iter().zip(lattice.occupancy()) {
        // 0^0 = 1: the empty configuration is independent of the ligand
        let ligand_term = if n == 0 { 0.0 } else { n as f64 * log_ligand };
        probabilities.push(-g / rt + ligand_term);
    }

    let degenerate = || PartitionError::DegenerateNormalization {
        free_ligand,
        temperature,
    };

    let max = probabilities
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return Err(degenerate());
    }

    let mut total = 0.0;
    for weight in probabilities.iter_mut() {
        *weight = (*weight - max).exp();
        total += *weight;
    }
    if !(total.is_finite() && total > 0.0) {
        return Err(degenerate());
    }

    for weight in probabilities.iter_mut() {
        *weight /= total;
    }
    Ok(())
}

/// Mean number of bound ligands per lattice, `Σ p_i n_i`.
pub fn bound_per_lattice(lattice: &Lattice, probabilities: &[f64]) -> f64 {
    probabilities
        .iter()
        .zip(lattice.occupancy())
        .map(|(&p, &n)| p * n as f64)
        .sum()
}

/// Total probability of the configurations with exactly `bound` ligands.
pub fn occupation(lattice: &Lattice, probabilities: &[f64], bound: u32) -> f64 {
    probabilities
        .iter()
        .zip(lattice.occupancy())
        .filter(|&(_, &n)| n == bound)
        .map(|(&p, _)| p)
        .sum()
}

/// Mean fraction of occupied sites.
pub fn fractional_saturation(lattice: &Lattice, probabilities: &[f64]) -> f64 {
    bound_per_lattice(lattice, probabilities) / lattice.size() as f64
}
