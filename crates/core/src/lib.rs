//! Ideal Gas Vessel Simulation Core Library
//!
//! Pure ideal-gas-law formulas (PV = nRT) and a stateful pressure vessel
//! whose setters re-solve one dependent variable on every change. Intended
//! for scripting simple simulations such as filling a tank in discrete steps.
//!
//! ## Layout
//! - [`physics::ideal_gas`]: stateless solvers and physical constants
//! - [`vessel`]: the validated [`Vessel`] state container
//! - [`scenario`]: step-wise pressurization runs
//! - [`core_types::units`]: typed SI quantities used for display

// Core types and utilities
pub mod core_types;

pub mod physics;
pub mod scenario;
pub mod vessel;

// Re-export core types
pub use core_types::{Celsius, CubicMeters, GaugePascals, Kelvin, Moles, Pascals};

pub use physics::ideal_gas;
pub use scenario::PressurizeScenario;
pub use vessel::{AbsoluteDisplay, PhysicalState, Quantity, Vessel, VesselError};
