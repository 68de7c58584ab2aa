use super::{ConfigurationScorer, EnergyTerm};
use crate::core::lattice::Configuration;

/// A pair of multiplicative factors, one applied to the free energy and one to the enthalpy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouplingFactor {
    pub free_energy: f64,
    pub enthalpy: f64,
}

impl CouplingFactor {
    pub fn new(free_energy: f64, enthalpy: f64) -> Self {
        Self {
            free_energy,
            enthalpy,
        }
    }

    #[inline]
    fn apply(&self, term: &mut EnergyTerm) {
        term.free_energy *= self.free_energy;
        term.enthalpy *= self.enthalpy;
    }
}

/// Per-site product of coupling factors for occupied sites at distance one, two and three.
///
/// The site term starts at `bind` and is multiplied once per occupied neighbour in each
/// direction, so a site flanked on both sides at distance one picks up `near` twice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jump2 {
    pub bind: EnergyTerm,
    pub near: CouplingFactor,
    pub far: CouplingFactor,
    pub farthest: CouplingFactor,
}

impl Jump2 {
    pub(crate) fn from_parameters(p: &[f64]) -> Self {
        Self {
            bind: EnergyTerm::new(p[0], p[4]),
            near: CouplingFactor::new(p[1], p[5]),
            far: CouplingFactor::new(p[2], p[6]),
            farthest: CouplingFactor::new(p[3], p[7]),
        }
    }
}

impl ConfigurationScorer for Jump2 {
    fn score(&self, configuration: &Configuration<'_>) -> EnergyTerm {
        let couplings = [
            (1, &self.near),
            (-1, &self.near),
            (2, &self.far),
            (-2, &self.far),
            (3, &self.farthest),
            (-3, &self.farthest),
        ];

        let mut total = EnergyTerm::default();
        for site in configuration.occupied_sites() {
            let mut term = self.bind;
            for (offset, factor) in couplings {
                if configuration.is_neighbor_occupied(site, offset) {
                    factor.apply(&mut term);
                }
            }
            total += term;
        }
        total
    }
}

/// Saroff-Kiefer coupling: a base binding energy scaled by one factor per neighbour.
///
/// A site with both neighbours occupied is scaled once by `both_occupied`. Otherwise the
/// right and then the left neighbour each contribute `occupied` or `unoccupied`.
/// Interior sites are scored first. The two end sites only contribute on a ring, where
/// their missing neighbour is the site at the opposite end; on a chain they are skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaroffKiefer {
    pub bind: EnergyTerm,
    pub unoccupied: CouplingFactor,
    pub occupied: CouplingFactor,
    pub both_occupied: CouplingFactor,
}

impl SaroffKiefer {
    pub(crate) fn from_parameters(p: &[f64]) -> Self {
        Self {
            bind: EnergyTerm::new(p[0], p[4]),
            unoccupied: CouplingFactor::new(p[1], p[5]),
            occupied: CouplingFactor::new(p[2], p[6]),
            both_occupied: CouplingFactor::new(p[3], p[7]),
        }
    }

    fn site_term(&self, configuration: &Configuration<'_>, site: usize) -> EnergyTerm {
        let right = configuration.is_neighbor_occupied(site, 1);
        let left = configuration.is_neighbor_occupied(site, -1);

        let mut term = self.bind;
        if right && left {
            self.both_occupied.apply(&mut term);
        } else {
            for occupied in [right, left] {
                if occupied {
                    self.occupied.apply(&mut term);
                } else {
                    self.unoccupied.apply(&mut term);
                }
            }
        }
        term
    }
}

impl ConfigurationScorer for SaroffKiefer {
    fn score(&self, configuration: &Configuration<'_>) -> EnergyTerm {
        let size = configuration.size();
        let mut total = EnergyTerm::default();

        for site in 1..size.saturating_sub(1) {
            if configuration.is_occupied(site) {
                total += self.site_term(configuration, site);
            }
        }

        if configuration.is_cyclic() {
            let last = size - 1;
            let ends: &[usize] = if last == 0 { &[0] } else { &[0, last] };
            for &site in ends {
                if configuration.is_occupied(site) {
                    total += self.site_term(configuration, site);
                }
            }
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lattice::Lattice;

    fn score_of(scorer: &impl ConfigurationScorer, lattice: &Lattice, index: usize) -> EnergyTerm {
        scorer.score(&lattice.configuration(index).unwrap())
    }

    #[test]
    fn jump2_multiplies_each_satisfied_distance() {
        let lattice = Lattice::new(7, true).unwrap();
        let model = Jump2::from_parameters(&[1.0, 2.0, 3.0, 5.0, 1.0, 7.0, 11.0, 13.0]);

        // A lone site keeps its base energy
        assert_eq!(score_of(&model, &lattice, 0b1000000), EnergyTerm::new(1.0, 1.0));
        // 1100000: each site sees one occupied neighbour at distance one
        assert_eq!(score_of(&model, &lattice, 0b1100000), EnergyTerm::new(4.0, 14.0));
        // 1001000: sites three apart in one direction, four in the other
        assert_eq!(score_of(&model, &lattice, 0b1001000), EnergyTerm::new(10.0, 26.0));
    }

    #[test]
    fn jump2_counts_a_neighbor_twice_when_both_directions_reach_it() {
        let lattice = Lattice::new(2, true).unwrap();
        let model = Jump2::from_parameters(&[1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);

        // On a two-site ring the other site is both the left and the right neighbour.
        // Distances two and three wrap around as well; their factors are one here.
        assert_eq!(score_of(&model, &lattice, 0b11).free_energy, 2.0 * 4.0);
    }

    #[test]
    fn jump2_without_neighbors_beyond_chain_ends() {
        let lattice = Lattice::new(4, false).unwrap();
        let model = Jump2::from_parameters(&[1.0, 2.0, 3.0, 5.0, 0.0, 0.0, 0.0, 0.0]);

        // 1001: three apart on a chain
        assert_eq!(score_of(&model, &lattice, 0b1001).free_energy, 10.0);
        // 1000: alone
        assert_eq!(score_of(&model, &lattice, 0b1000).free_energy, 1.0);
    }

    #[test]
    fn saroff_kiefer_scales_interior_sites() {
        let lattice = Lattice::new(5, false).unwrap();
        let model = SaroffKiefer::from_parameters(&[-10.0, 2.0, 3.0, 5.0, -1.0, 7.0, 11.0, 13.0]);

        // 00100: both neighbours unoccupied
        assert_eq!(score_of(&model, &lattice, 0b00100), EnergyTerm::new(-40.0, -49.0));
        // 01100: site 1 has an occupied right neighbour, site 2 an occupied left one
        assert_eq!(
            score_of(&model, &lattice, 0b01100),
            EnergyTerm::new(-60.0 * 2.0, -77.0 * 2.0)
        );
        // 01110: the middle site uses the both-occupied factor alone
        assert_eq!(
            score_of(&model, &lattice, 0b01110),
            EnergyTerm::new(-60.0 * 2.0 - 50.0, -77.0 * 2.0 - 13.0)
        );
    }

    #[test]
    fn saroff_kiefer_skips_chain_ends() {
        let lattice = Lattice::new(4, false).unwrap();
        let model = SaroffKiefer::from_parameters(&[-10.0, 2.0, 3.0, 5.0, -1.0, 7.0, 11.0, 13.0]);

        assert_eq!(score_of(&model, &lattice, 0b1001), EnergyTerm::default());
        // 1100: only site 1 is interior
        assert_eq!(score_of(&model, &lattice, 0b1100), EnergyTerm::new(-60.0, -77.0));
    }

    #[test]
    fn saroff_kiefer_wraps_chain_ends_on_a_ring() {
        let lattice = Lattice::new(4, true).unwrap();
        let model = SaroffKiefer::from_parameters(&[-10.0, 2.0, 3.0, 5.0, -1.0, 7.0, 11.0, 13.0]);

        // 1001: the two ends are adjacent through the wraparound
        assert_eq!(
            score_of(&model, &lattice, 0b1001),
            EnergyTerm::new(-60.0 * 2.0, -77.0 * 2.0)
        );
        // 1111: every site uses the both-occupied factor
        assert_eq!(
            score_of(&model, &lattice, 0b1111),
            EnergyTerm::new(-200.0, -52.0)
        );
    }

    #[test]
    fn saroff_kiefer_scores_a_single_site_ring_once() {
        let lattice = Lattice::new(1, true).unwrap();
        let model = SaroffKiefer::from_parameters(&[-10.0, 2.0, 3.0, 5.0, -1.0, 7.0, 11.0, 13.0]);

        assert_eq!(score_of(&model, &lattice, 1), EnergyTerm::new(-50.0, -13.0));
    }
}
