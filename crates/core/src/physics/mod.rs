//! Physics formulas

pub mod ideal_gas;

pub use ideal_gas::{celsius_to_kelvin, kelvin_to_celsius, FormulaDemonstration};
