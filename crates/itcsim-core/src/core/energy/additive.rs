use super::{ConfigurationScorer, EnergyTerm};
use crate::core::lattice::Configuration;

/// Independent sites: every occupied site contributes the same binding energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simple {
    pub bind: EnergyTerm,
}

impl Simple {
    pub(crate) fn from_parameters(p: &[f64]) -> Self {
        Self {
            bind: EnergyTerm::new(p[0], p[1]),
        }
    }
}

impl ConfigurationScorer for Simple {
    fn score(&self, configuration: &Configuration<'_>) -> EnergyTerm {
        configuration.occupied_sites().map(|_| self.bind).sum()
    }
}

/// Intrinsic energy plus one coupling term per neighbour direction.
///
/// Each occupied site adds `intrinsic`, then for each of its two neighbours adds
/// `occupied_neighbor` or `unoccupied_neighbor`. Neighbours missing at the ends of a
/// linear lattice add nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Additive {
    pub intrinsic: EnergyTerm,
    pub unoccupied_neighbor: EnergyTerm,
    pub occupied_neighbor: EnergyTerm,
}

impl Additive {
    pub(crate) fn from_parameters(p: &[f64]) -> Self {
        Self {
            intrinsic: EnergyTerm::new(p[0], p[3]),
            unoccupied_neighbor: EnergyTerm::new(p[1], p[4]),
            occupied_neighbor: EnergyTerm::new(p[2], p[5]),
        }
    }
}

impl ConfigurationScorer for Additive {
    fn score(&self, configuration: &Configuration<'_>) -> EnergyTerm {
        let mut total = EnergyTerm::default();
        for site in configuration.occupied_sites() {
            total += self.intrinsic;
            for offset in [1, -1] {
                match configuration.neighbor(site, offset) {
                    Some(true) => total += self.occupied_neighbor,
                    Some(false) => total += self.unoccupied_neighbor,
                    None => {}
                }
            }
        }
        total
    }
}

/// Additive coupling to occupied sites one and two positions away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jump {
    pub bind: EnergyTerm,
    pub near: EnergyTerm,
    pub far: EnergyTerm,
}

impl Jump {
    pub(crate) fn from_parameters(p: &[f64]) -> Self {
        Self {
            bind: EnergyTerm::new(p[0], p[3]),
            near: EnergyTerm::new(p[1], p[4]),
            far: EnergyTerm::new(p[2], p[5]),
        }
    }
}

impl ConfigurationScorer for Jump {
    fn score(&self, configuration: &Configuration<'_>) -> EnergyTerm {
        let mut total = EnergyTerm::default();
        for site in configuration.occupied_sites() {
            total += self.bind;
            for offset in [1, -1] {
                if configuration.is_neighbor_occupied(site, offset) {
                    total += self.near;
                }
            }
            for offset in [2, -2] {
                if configuration.is_neighbor_occupied(site, offset) {
                    total += self.far;
                }
            }
        }
        total
    }
}
