//! # Engine Module
//!
//! Turns configuration energies into measurable quantities: Boltzmann populations at a
//! given free ligand concentration, the self-consistent free ligand of a titration point,
//! and the heat predicted for it.
//!
//! ## Overview
//!
//! A [`BindingModel`](model::BindingModel) owns a lattice and the energy table of the
//! model most recently applied to it. For each titration point the engine searches the
//! free ligand concentration that satisfies ligand mass balance, using the population
//! calculation as the objective of a bracketed root search, and then averages the
//! configuration enthalpies over the converged populations.
//!
//! ## Architecture
//!
//! - **Populations** ([`partition`]) - Normalized Boltzmann probabilities and the
//!   occupancy observables derived from them
//! - **Mass Balance** ([`solver`]) - The pluggable root finder and the free ligand solve
//! - **Heat** ([`heat`]) - Probability-weighted enthalpy of a solved point
//! - **Binding Model** ([`model`]) - Lattice and energy ownership, titration driver
//! - **Results** ([`state`]) - Per-point and per-run titration results
//! - **Configuration** ([`config`]) - Run parameters and their builder
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - The aggregated engine error type
//!
//! ## Key Capabilities
//!
//! - **Overflow-free populations** computed in log space with a maximum shift
//! - **Brent root finding** (argmin's `BrentRoot`) with a configurable tolerance and iteration budget
//! - **Parallel titrations** across points behind the `parallel` feature
//! - **All-or-nothing runs** that report the lowest failing point

pub mod config;
pub mod error;
pub mod heat;
pub mod model;
pub mod partition;
pub mod progress;
pub mod solver;
pub mod state;
