//! # itcsim Core Library
//!
//! A forward model for isothermal titration calorimetry of cooperative ligand binding to
//! a ring or chain of binding sites, built on an exact enumeration of lattice
//! configurations.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture so that each concern can be
//! tested on its own.
//!
//! - **[`core`]: The Foundation.** The configuration lattice, the family of energy models
//!   that score it, and the thermodynamic relations used to move parameters between
//!   temperatures. Everything here is stateless.
//!
//! - **[`engine`]: The Logic Core.** Boltzmann populations, the mass balance solve for
//!   the free ligand concentration, heat integration and the `BindingModel` that owns a
//!   lattice with its energies and drives a titration.
//!
//! - **[`workflows`]: The Public API.** Complete calculations from a single configuration
//!   value, with progress reporting, for callers that do not need the lower layers.

pub mod core;
pub mod engine;
pub mod workflows;
