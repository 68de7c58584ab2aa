//! # Workflows Module
//!
//! High-level entry points that run a complete forward calculation from a
//! [`TitrationConfig`](crate::engine::config::TitrationConfig).
//!
//! ## Overview
//!
//! A workflow wires the [`core`](crate::core) and [`engine`](crate::engine) layers
//! together: it builds the lattice, prepares the model parameters for the experiment
//! temperature, assigns the configuration energies and solves every titration point,
//! reporting progress as it goes.
//!
//! ## Architecture
//!
//! - **Titration Workflow** ([`titration`]) - Predicted heats for a sequence of total
//!   protein and ligand concentrations.

pub mod titration;
