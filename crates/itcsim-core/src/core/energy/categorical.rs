use super::{ConfigurationScorer, EnergyTerm};
use crate::core::lattice::Configuration;

#[inline]
fn flanking(configuration: &Configuration<'_>, site: usize) -> (bool, bool) {
    (
        configuration.is_neighbor_occupied(site, -1),
        configuration.is_neighbor_occupied(site, 1),
    )
}

/// Each occupied site takes exactly one of three energies, chosen by how many of its
/// neighbours are occupied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreeState {
    pub isolated: EnergyTerm,
    pub one_neighbor: EnergyTerm,
    pub two_neighbors: EnergyTerm,
}

impl ThreeState {
    pub(crate) fn from_parameters(p: &[f64]) -> Self {
        Self {
            isolated: EnergyTerm::new(p[0], p[3]),
            one_neighbor: EnergyTerm::new(p[1], p[4]),
            two_neighbors: EnergyTerm::new(p[2], p[5]),
        }
    }
}

impl ConfigurationScorer for ThreeState {
    fn score(&self, configuration: &Configuration<'_>) -> EnergyTerm {
        configuration
            .occupied_sites()
            .map(|site| match flanking(configuration, site) {
                (true, true) => self.two_neighbors,
                (true, false) | (false, true) => self.one_neighbor,
                (false, false) => self.isolated,
            })
            .sum()
    }
}

/// The additive simplification of the Saroff-Kiefer model.
///
/// The third parameter pair only keeps the eight-value layout aligned with the
/// multiplicative models; it never enters the score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hybrid {
    pub isolated: EnergyTerm,
    pub one_neighbor: EnergyTerm,
    pub unused: EnergyTerm,
    pub two_neighbors: EnergyTerm,
}

impl Hybrid {
    pub(crate) fn from_parameters(p: &[f64]) -> Self {
        Self {
            isolated: EnergyTerm::new(p[0], p[4]),
            one_neighbor: EnergyTerm::new(p[1], p[5]),
            unused: EnergyTerm::new(p[2], p[6]),
            two_neighbors: EnergyTerm::new(p[3], p[7]),
        }
    }
}

impl ConfigurationScorer for Hybrid {
    fn score(&self, configuration: &Configuration<'_>) -> EnergyTerm {
        let mut total = EnergyTerm::default();
        for site in configuration.occupied_sites() {
            let (left, right) = flanking(configuration, site);
            if left && right {
                total += self.two_neighbors;
            } else if left || right {
                total += self.one_neighbor;
            } else {
                total += self.isolated;
            }
        }
        total
    }
}

/// Four categories from the joint occupancy of the left (`j-1`) and right (`j+1`)
/// neighbours. Left-only and right-only are scored separately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestNeighbor {
    pub none: EnergyTerm,
    pub left: EnergyTerm,
    pub right: EnergyTerm,
    pub both: EnergyTerm,
}

impl NearestNeighbor {
    pub(crate) fn from_parameters(p: &[f64]) -> Self {
        Self {
            none: EnergyTerm::new(p[0], p[4]),
            left: EnergyTerm::new(p[1], p[5]),
            right: EnergyTerm::new(p[2], p[6]),
            both: EnergyTerm::new(p[3], p[7]),
        }
    }
}

impl ConfigurationScorer for NearestNeighbor {
    fn score(&self, configuration: &Configuration<'_>) -> EnergyTerm {
        configuration
            .occupied_sites()
            .map(|site| match flanking(configuration, site) {
                (false, false) => self.none,
                (true, false) => self.left,
                (false, true) => self.right,
                (true, true) => self.both,
            })
            .sum()
    }
}
