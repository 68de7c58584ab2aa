use super::{ConfigurationScorer, EnergyTerm};
use crate::core::lattice::Configuration;

/// Two alternating intrinsic site classes with additive nearest-neighbour coupling.
///
/// Even-indexed sites are class A, odd-indexed sites class B. The coupling term is added
/// once per occupied neighbour, so a site flanked on both sides receives it twice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteType {
    pub site_a: EnergyTerm,
    pub site_b: EnergyTerm,
    pub coupling: EnergyTerm,
}

impl SiteType {
    pub(crate) fn from_parameters(p: &[f64]) -> Self {
        Self {
            site_a: EnergyTerm::new(p[0], p[3]),
            site_b: EnergyTerm::new(p[1], p[4]),
            coupling: EnergyTerm::new(p[2], p[5]),
        }
    }

    #[inline]
    fn intrinsic(&self, site: usize) -> EnergyTerm {
        if site % 2 == 0 {
            self.site_a
        } else {
            self.site_b
        }
    }
}

impl ConfigurationScorer for SiteType {
    fn score(&self, configuration: &Configuration<'_>) -> EnergyTerm {
        let mut total = EnergyTerm::default();
        for site in configuration.occupied_sites() {
            total += self.intrinsic(site);
            for offset in [1, -1] {
                if configuration.is_neighbor_occupied(site, offset) {
                    total += self.coupling;
                }
            }
        }
        total
    }
}
