use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Free energy and enthalpy of one configuration, or one site's share of it (J/mol).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyTerm {
    pub free_energy: f64,
    pub enthalpy: f64,
}

impl EnergyTerm {
    pub fn new(free_energy: f64, enthalpy: f64) -> Self {
        Self {
            free_energy,
            enthalpy,
        }
    }
}

impl Add for EnergyTerm {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            free_energy: self.free_energy + rhs.free_energy,
            enthalpy: self.enthalpy + rhs.enthalpy,
        }
    }
}

impl AddAssign for EnergyTerm {
    fn add_assign(&mut self, rhs: Self) {
        self.free_energy += rhs.free_energy;
        self.enthalpy += rhs.enthalpy;
    }
}

impl Sum for EnergyTerm {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, term| acc + term)
    }
}
