//! # Energy Module
//!
//! Assigns a binding free energy and enthalpy to every configuration of a [`Lattice`].
//!
//! ## Overview
//!
//! Each energy model is a scoring rule over the occupancy pattern of a configuration:
//! every occupied site contributes a term that depends on the model's parameters and on
//! the occupancy of its lattice neighbours. The models form a closed family selected by
//! [`ModelKind`]; a validated parameter vector turns a kind into an [`EnergyModel`], which
//! then fills a [`ConfigurationEnergies`] table for a whole lattice.
//!
//! ## Parameter Layout
//!
//! Parameter vectors are positional. Every model takes a block of free energies followed
//! by the matching block of enthalpies, so the `k`-th free energy pairs with the
//! `k`-th enthalpy. [`ModelKind::parameter_names`] documents the exact order.
//!
//! ## Variants
//!
//! - [`additive`] - purely additive rules: [`Simple`], [`Additive`] and [`Jump`]
//! - [`categorical`] - one category per neighbour pattern: [`ThreeState`], [`Hybrid`]
//!   and [`NearestNeighbor`]
//! - [`multiplicative`] - per-site products of coupling factors: [`Jump2`] and
//!   [`SaroffKiefer`]
//! - [`site_type`] - alternating intrinsic site classes: [`SiteType`]

pub mod additive;
pub mod categorical;
pub mod multiplicative;
pub mod site_type;
pub mod term;

pub use additive::{Additive, Jump, Simple};
pub use categorical::{Hybrid, NearestNeighbor, ThreeState};
pub use multiplicative::{Jump2, SaroffKiefer};
pub use site_type::SiteType;
pub use term::EnergyTerm;

use crate::core::lattice::{Configuration, Lattice};
use phf::{Map, phf_map};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EnergyModelError {
    #[error("Unknown energy model '{0}'")]
    UnknownModel(String),

    #[error("Model '{model}' expects {expected} parameters but {found} were supplied")]
    ArityMismatch {
        model: ModelKind,
        expected: usize,
        found: usize,
    },

    #[error("Parameter {index} ('{name}') of model '{model}' is not a finite number")]
    NonFiniteParameter {
        model: ModelKind,
        index: usize,
        name: &'static str,
    },

    #[error("Model '{model}' expects {expected} heat capacities but {found} were supplied")]
    HeatCapacityMismatch {
        model: ModelKind,
        expected: usize,
        found: usize,
    },

    #[error("Model '{0}' uses multiplicative coupling factors and cannot be extrapolated in temperature")]
    NotExtrapolatable(ModelKind),

    #[error("Temperatures must be positive and finite (got {temperature} K, reference {reference} K)")]
    InvalidTemperature { temperature: f64, reference: f64 },
}

/// Scores a single lattice configuration.
pub trait ConfigurationScorer {
    fn score(&self, configuration: &Configuration<'_>) -> EnergyTerm;
}

/// Deserializes from any spelling [`FromStr`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ModelKind {
    Additive,
    Simple,
    ThreeState,
    Jump,
    Jump2,
    SaroffKiefer,
    Hybrid,
    NearestNeighbor,
    SiteType,
}

static MODEL_NAMES: Map<&'static str, ModelKind> = phf_map! {
    "additive" => ModelKind::Additive,
    "simple" => ModelKind::Simple,
    "three-state" => ModelKind::ThreeState,
    "ian" => ModelKind::ThreeState,
    "ik" => ModelKind::ThreeState,
    "jump" => ModelKind::Jump,
    "jump2" => ModelKind::Jump2,
    "saroff-kiefer" => ModelKind::SaroffKiefer,
    "sk" => ModelKind::SaroffKiefer,
    "hybrid" => ModelKind::Hybrid,
    "nearest-neighbor" => ModelKind::NearestNeighbor,
    "nn" => ModelKind::NearestNeighbor,
    "site-type" => ModelKind::SiteType,
    "ab" => ModelKind::SiteType,
};

impl ModelKind {
    pub const ALL: [ModelKind; 9] = [
        ModelKind::Additive,
        ModelKind::Simple,
        ModelKind::ThreeState,
        ModelKind::Jump,
        ModelKind::Jump2,
        ModelKind::SaroffKiefer,
        ModelKind::Hybrid,
        ModelKind::NearestNeighbor,
        ModelKind::SiteType,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Additive => "additive",
            ModelKind::Simple => "simple",
            ModelKind::ThreeState => "three-state",
            ModelKind::Jump => "jump",
            ModelKind::Jump2 => "jump2",
            ModelKind::SaroffKiefer => "saroff-kiefer",
            ModelKind::Hybrid => "hybrid",
            ModelKind::NearestNeighbor => "nearest-neighbor",
            ModelKind::SiteType => "site-type",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ModelKind::Additive => {
                "Intrinsic energy plus one coupling term per neighbour (occupied or unoccupied)"
            }
            ModelKind::Simple => "Independent, non-cooperative sites",
            ModelKind::ThreeState => "One energy per site for zero, one or two occupied neighbours",
            ModelKind::Jump => "Additive coupling to occupied neighbours at distance one and two",
            ModelKind::Jump2 => {
                "Multiplicative coupling to occupied neighbours at distance one, two and three"
            }
            ModelKind::SaroffKiefer => {
                "Saroff-Kiefer multiplicative coupling with special-cased lattice ends"
            }
            ModelKind::Hybrid => "One energy per site for zero, one or two occupied neighbours",
            ModelKind::NearestNeighbor => {
                "One energy per site for each left/right neighbour occupancy pattern"
            }
            ModelKind::SiteType => {
                "Alternating A/B intrinsic sites with additive nearest-neighbour coupling"
            }
        }
    }

    /// Positional names of the model's parameters.
    pub fn parameter_names(&self) -> &'static [&'static str] {
        match self {
            ModelKind::Additive => &["Ga", "Gb", "Gc", "Ha", "Hb", "Hc"],
            ModelKind::Simple => &["Gbind", "Hbind"],
            ModelKind::ThreeState => &["Gbind", "Gone", "Gtwo", "Hnone", "Hone", "Htwo"],
            ModelKind::Jump => &["Gbind", "Gnear", "Gfar", "Hnone", "Hnear", "Hfar"],
            ModelKind::Jump2 | ModelKind::SaroffKiefer => {
                &["Gbind", "Ga", "Gb", "Gc", "Hnone", "Ha", "Hb", "Hc"]
            }
            ModelKind::Hybrid => &["Ga", "Gb", "Gc", "Gd", "Ha", "Hb", "Hc", "Hd"],
            ModelKind::NearestNeighbor => &[
                "Gnone", "Gleft", "Gright", "Gboth", "Hnone", "Hleft", "Hright", "Hboth",
            ],
            ModelKind::SiteType => &["GA", "GB", "GC", "HA", "HB", "HC"],
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.parameter_names().len()
    }

    /// Whether the parameters are plain energies that follow the van't Hoff relations.
    ///
    /// The multiplicative models scale a base energy by dimensionless factors, which have
    /// no heat capacity of their own.
    pub fn supports_extrapolation(&self) -> bool {
        !matches!(self, ModelKind::Jump2 | ModelKind::SaroffKiefer)
    }

    pub fn validate(&self, parameters: &[f64]) -> Result<(), EnergyModelError> {
        if parameters.len() != self.arity() {
            return Err(EnergyModelError::ArityMismatch {
                model: *self,
                expected: self.arity(),
                found: parameters.len(),
            });
        }
        if let Some(index) = parameters.iter().position(|p| !p.is_finite()) {
            return Err(EnergyModelError::NonFiniteParameter {
                model: *self,
                index,
                name: self.parameter_names()[index],
            });
        }
        Ok(())
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = EnergyModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('_', "-");
        MODEL_NAMES
            .get(key.as_str())
            .copied()
            .ok_or_else(|| EnergyModelError::UnknownModel(s.to_string()))
    }
}

impl TryFrom<String> for ModelKind {
    type Error = EnergyModelError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// An energy model bound to a validated parameter vector.
#[derive(Debug, Clone, PartialEq)]
pub enum EnergyModel {
    Additive(Additive),
    Simple(Simple),
    ThreeState(ThreeState),
    Jump(Jump),
    Jump2(Jump2),
    SaroffKiefer(SaroffKiefer),
    Hybrid(Hybrid),
    NearestNeighbor(NearestNeighbor),
    SiteType(SiteType),
}

impl EnergyModel {
    pub fn from_parameters(kind: ModelKind, parameters: &[f64]) -> Result<Self, EnergyModelError> {
        kind.validate(parameters)?;
        let p = parameters;
        Ok(match kind {
            ModelKind::Additive => Self::Additive(Additive::from_parameters(p)),
            ModelKind::Simple => Self::Simple(Simple::from_parameters(p)),
            ModelKind::ThreeState => Self::ThreeState(ThreeState::from_parameters(p)),
            ModelKind::Jump => Self::Jump(Jump::from_parameters(p)),
            ModelKind::Jump2 => Self::Jump2(Jump2::from_parameters(p)),
            ModelKind::SaroffKiefer => Self::SaroffKiefer(SaroffKiefer::from_parameters(p)),
            ModelKind::Hybrid => Self::Hybrid(Hybrid::from_parameters(p)),
            ModelKind::NearestNeighbor => {
                Self::NearestNeighbor(NearestNeighbor::from_parameters(p))
            }
            ModelKind::SiteType => Self::SiteType(SiteType::from_parameters(p)),
        })
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Self::Additive(_) => ModelKind::Additive,
            Self::Simple(_) => ModelKind::Simple,
            Self::ThreeState(_) => ModelKind::ThreeState,
            Self::Jump(_) => ModelKind::Jump,
            Self::Jump2(_) => ModelKind::Jump2,
            Self::SaroffKiefer(_) => ModelKind::SaroffKiefer,
            Self::Hybrid(_) => ModelKind::Hybrid,
            Self::NearestNeighbor(_) => ModelKind::NearestNeighbor,
            Self::SiteType(_) => ModelKind::SiteType,
        }
    }

    fn scorer(&self) -> &dyn ConfigurationScorer {
        match self {
            Self::Additive(m) => m,
            Self::Simple(m) => m,
            Self::ThreeState(m) => m,
            Self::Jump(m) => m,
            Self::Jump2(m) => m,
            Self::SaroffKiefer(m) => m,
            Self::Hybrid(m) => m,
            Self::NearestNeighbor(m) => m,
            Self::SiteType(m) => m,
        }
    }

    pub fn assign_energies(&self, lattice: &Lattice) -> ConfigurationEnergies {
        let mut energies = ConfigurationEnergies::default();
        self.assign_energies_into(lattice, &mut energies);
        energies
    }

    /// Overwrites `energies` with the score of every configuration, reusing its storage.
    pub fn assign_energies_into(&self, lattice: &Lattice, energies: &mut ConfigurationEnergies) {
        energies.free_energies.clear();
        energies.enthalpies.clear();
        energies.free_energies.reserve(lattice.len());
        energies.enthalpies.reserve(lattice.len());

        for configuration in lattice.configurations() {
            let term = self.score(&configuration);
            energies.free_energies.push(term.free_energy);
            energies.enthalpies.push(term.enthalpy);
        }
    }
}

impl ConfigurationScorer for EnergyModel {
    #[inline]
    fn score(&self, configuration: &Configuration<'_>) -> EnergyTerm {
        self.scorer().score(configuration)
    }
}

/// Per-configuration free energies and enthalpies, indexed like the lattice configurations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationEnergies {
    free_energies: Vec<f64>,
    enthalpies: Vec<f64>,
}

impl ConfigurationEnergies {
    #[inline]
    pub fn free_energies(&self) -> &[f64] {
        &self.free_energies
    }

    #[inline]
    pub fn enthalpies(&self) -> &[f64] {
        &self.enthalpies
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.free_energies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.free_energies.is_empty()
    }

    pub fn term(&self, index: usize) -> Option<EnergyTerm> {
        Some(EnergyTerm::new(
            *self.free_energies.get(index)?,
            *self.enthalpies.get(index)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_parameters(kind: ModelKind) -> Vec<f64> {
        (0..kind.arity()).map(|i| -1000.0 - 250.0 * i as f64).collect()
    }

    #[test]
    fn every_kind_round_trips_through_its_name() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.name().parse::<ModelKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn from_str_accepts_aliases_and_loose_spelling() {
        assert_eq!("SK".parse::<ModelKind>().unwrap(), ModelKind::SaroffKiefer);
        assert_eq!("ian".parse::<ModelKind>().unwrap(), ModelKind::ThreeState);
        assert_eq!("nearest_neighbor".parse::<ModelKind>().unwrap(), ModelKind::NearestNeighbor);
        assert_eq!(" ab ".parse::<ModelKind>().unwrap(), ModelKind::SiteType);
    }

    #[test]
    fn from_str_rejects_unknown_names() {
        let result = "potts".parse::<ModelKind>();
        assert_eq!(result, Err(EnergyModelError::UnknownModel("potts".to_string())));
    }

    #[test]
    fn deserialization_shares_the_name_table() {
        use serde::de::IntoDeserializer;
        use serde::de::value::{Error, StrDeserializer};

        let kind = |name: &'static str| {
            let deserializer: StrDeserializer<'_, Error> = name.into_deserializer();
            ModelKind::deserialize(deserializer)
        };
        assert_eq!(kind("SK").unwrap(), ModelKind::SaroffKiefer);
        assert_eq!(kind("nearest_neighbor").unwrap(), ModelKind::NearestNeighbor);
        assert_eq!(kind("jump2").unwrap(), ModelKind::Jump2);
        let message = kind("potts").unwrap_err().to_string();
        assert!(message.contains("potts"), "{message}");
    }

    #[test]
    fn every_layout_pairs_free_energies_with_enthalpies() {
        for kind in ModelKind::ALL {
            let names = kind.parameter_names();
            assert_eq!(names.len() % 2, 0, "{kind} has an odd parameter count");
            let (free, enthalpic) = names.split_at(names.len() / 2);
            assert!(free.iter().all(|n| n.starts_with('G')), "{kind}: {free:?}");
            assert!(enthalpic.iter().all(|n| n.starts_with('H')), "{kind}: {enthalpic:?}");
        }
    }

    #[test]
    fn from_parameters_rejects_wrong_arity_for_every_kind() {
        for kind in ModelKind::ALL {
            for found in [0, kind.arity() - 1, kind.arity() + 1] {
                let parameters = vec![0.0; found];
                let result = EnergyModel::from_parameters(kind, &parameters);
                assert_eq!(
                    result,
                    Err(EnergyModelError::ArityMismatch {
                        model: kind,
                        expected: kind.arity(),
                        found
                    })
                );
            }
        }
    }

    #[test]
    fn from_parameters_rejects_non_finite_values() {
        let result = EnergyModel::from_parameters(ModelKind::Simple, &[-5000.0, f64::NAN]);
        assert_eq!(
            result,
            Err(EnergyModelError::NonFiniteParameter {
                model: ModelKind::Simple,
                index: 1,
                name: "Hbind"
            })
        );
    }

    #[test]
    fn from_parameters_builds_the_requested_kind() {
        for kind in ModelKind::ALL {
            let model = EnergyModel::from_parameters(kind, &sample_parameters(kind)).unwrap();
            assert_eq!(model.kind(), kind);
        }
    }

    #[test]
    fn assign_energies_covers_every_configuration() {
        let lattice = Lattice::new(5, true).unwrap();
        for kind in ModelKind::ALL {
            let model = EnergyModel::from_parameters(kind, &sample_parameters(kind)).unwrap();
            let energies = model.assign_energies(&lattice);
            assert_eq!(energies.len(), lattice.len());
            assert_eq!(energies.enthalpies().len(), lattice.len());
            assert_eq!(energies.term(0), Some(EnergyTerm::default()));
            assert!(energies.free_energies().iter().all(|g| g.is_finite()));
        }
    }

    #[test]
    fn assign_energies_into_overwrites_previous_contents() {
        let small = Lattice::new(2, false).unwrap();
        let large = Lattice::new(4, false).unwrap();
        let model = EnergyModel::from_parameters(ModelKind::Simple, &[-1.0, -2.0]).unwrap();

        let mut energies = model.assign_energies(&large);
        model.assign_energies_into(&small, &mut energies);
        assert_eq!(energies.len(), 4);
        assert_eq!(energies.free_energies(), &[0.0, -1.0, -1.0, -2.0]);
        assert_eq!(energies.enthalpies(), &[0.0, -2.0, -2.0, -4.0]);
    }

    #[test]
    fn topology_changes_energies_of_end_site_configurations() {
        let ring = Lattice::new(4, true).unwrap();
        let chain = Lattice::new(4, false).unwrap();

        for kind in ModelKind::ALL {
            if kind == ModelKind::Simple {
                continue;
            }
            let model = EnergyModel::from_parameters(kind, &sample_parameters(kind)).unwrap();
            let cyclic = model.assign_energies(&ring);
            let linear = model.assign_energies(&chain);

            let differs = (0..ring.len()).any(|i| {
                let c = ring.configuration(i).unwrap();
                let end_occupied = c.is_occupied(0) || c.is_occupied(3);
                end_occupied && cyclic.free_energies()[i] != linear.free_energies()[i]
            });
            assert!(differs, "{kind} is insensitive to topology");
        }
    }
}
