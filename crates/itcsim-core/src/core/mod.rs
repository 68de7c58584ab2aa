//! # Core Module
//!
//! Stateless building blocks of the binding engine: the configuration lattice, the energy
//! models that score it, and the thermodynamic helpers shared by both.
//!
//! ## Overview
//!
//! A binding macromolecule is modelled as a ring or chain of identical binding sites. The
//! [`lattice`] enumerates every occupancy pattern of those sites once, and the [`energy`]
//! models turn a parameter vector into a free energy and an enthalpy for each pattern.
//! Nothing in this layer knows about concentrations or titrations; that belongs to the
//! [`engine`](crate::engine).
//!
//! ## Architecture
//!
//! - **Configuration Lattice** ([`lattice`]) - The `2^N` occupancy table and its
//!   topology-aware neighbour lookup
//! - **Energy Models** ([`energy`]) - The closed family of scoring rules and their
//!   positional parameter layouts
//! - **Thermodynamics** ([`thermo`]) - Gas constant and integrated van't Hoff relations
//!   for moving parameters between temperatures
//!
//! ## Conventions
//!
//! - Energies are molar, in J/mol; temperatures in kelvin.
//! - Configuration `i` is the big-endian binary expansion of `i`, site 0 first.
//! - Neighbours past the ends of a linear lattice do not exist; on a ring they wrap.

pub mod energy;
pub mod lattice;
pub mod thermo;
