//! Ideal Gas Law (PV = nRT)
//!
//! Stateless formulas relating pressure, volume, amount of substance and
//! absolute temperature. Each solver takes the other three quantities and
//! returns the fourth; none of them validates its inputs. A zero volume,
//! temperature or molar amount in a denominator yields an infinite or NaN
//! result, which callers are expected to avoid (see [`crate::vessel::Vessel`]
//! for the validated, stateful front end).
//!
//! # Units
//! - Pressure: Pa (absolute)
//! - Volume: m³
//! - Temperature: K
//! - Amount of substance: mol
//!
//! # References
//! - CODATA 2018: molar gas constant R = 8.314462618... J/(mol·K) (exact)
//! - IUPAC STP molar volume at 273.15 K and 101.325 kPa: 22.413969545014 L/mol

use serde::{Deserialize, Serialize};

/// Universal (molar) gas constant, J/(mol·K)
pub const R: f64 = 8.31446261815324;

/// Standard atmospheric pressure, Pa
pub const STANDARD_PRESSURE: f64 = 101325.0;

/// Molar volume of an ideal gas at STP, L/mol
pub const MOLAR_VOLUME_LITERS: f64 = 22.413969545014;

/// Moles of ideal gas per cubic meter at STP
pub const MOLES_PER_CUBIC_METER: f64 = 1000.0 / MOLAR_VOLUME_LITERS;

/// Celsius to Kelvin conversion offset (0°C = 273.15 K)
pub const CELSIUS_KELVIN_OFFSET: f64 = 273.15;

/// Convert a Celsius temperature to Kelvin
#[inline]
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + CELSIUS_KELVIN_OFFSET
}

/// Convert a Kelvin temperature to Celsius
#[inline]
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - CELSIUS_KELVIN_OFFSET
}

/// Solve for pressure: P = nRT / V
///
/// # Arguments
/// * `volume` - Volume (m³)
/// * `moles` - Amount of substance (mol)
/// * `temperature_k` - Absolute temperature (K)
///
/// # Returns
/// Absolute pressure (Pa)
#[inline]
pub fn pressure(volume: f64, moles: f64, temperature_k: f64) -> f64 {
    let nrt = moles * R * temperature_k;
    nrt / volume
}

/// Solve for temperature: T = PV / nR
///
/// # Arguments
/// * `pressure_pa` - Absolute pressure (Pa)
/// * `volume` - Volume (m³)
/// * `moles` - Amount of substance (mol)
///
/// # Returns
/// Absolute temperature (K)
#[inline]
pub fn temperature(pressure_pa: f64, volume: f64, moles: f64) -> f64 {
    let pv = pressure_pa * volume;
    let nr = moles * R;
    pv / nr
}

/// Solve for amount of substance: n = PV / RT
///
/// # Arguments
/// * `pressure_pa` - Absolute pressure (Pa)
/// * `volume` - Volume (m³)
/// * `temperature_k` - Absolute temperature (K)
///
/// # Returns
/// Amount of substance (mol)
#[inline]
pub fn moles(pressure_pa: f64, volume: f64, temperature_k: f64) -> f64 {
    let pv = pressure_pa * volume;
    let rt = R * temperature_k;
    pv / rt
}

/// Inputs and solver outputs for one cubic meter of gas at STP
///
/// Each output should reproduce the corresponding input, which makes this a
/// quick sanity check of the three solvers against each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormulaDemonstration {
    /// Input volume (m³)
    pub volume: f64,
    /// Input temperature (K)
    pub temperature: f64,
    /// Input amount of substance (mol)
    pub moles: f64,
    /// Input pressure (Pa)
    pub pressure: f64,
    /// `pressure(volume, moles, temperature)`
    pub solved_pressure: f64,
    /// `temperature(pressure, volume, moles)`
    pub solved_temperature: f64,
    /// `moles(pressure, volume, temperature)`
    pub solved_moles: f64,
}

/// Evaluate every solver on 1 m³ of gas at 0°C and standard pressure
pub fn demonstration() -> FormulaDemonstration {
    let volume = 1.0;
    let temperature_k = celsius_to_kelvin(0.0);
    let n = MOLES_PER_CUBIC_METER;
    let p = STANDARD_PRESSURE;

    FormulaDemonstration {
        volume,
        temperature: temperature_k,
        moles: n,
        pressure: p,
        solved_pressure: pressure(volume, n, temperature_k),
        solved_temperature: temperature(p, volume, n),
        solved_moles: moles(p, volume, temperature_k),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_celsius_kelvin_round_trip() {
        for c in [-273.15, -40.0, 0.0, 21.0, 100.0, 1.0e6] {
            assert_relative_eq!(kelvin_to_celsius(celsius_to_kelvin(c)), c, epsilon = 1e-9);
        }
        assert_eq!(celsius_to_kelvin(0.0), 273.15);
        assert_eq!(kelvin_to_celsius(273.15), 0.0);
    }

    #[test]
    fn test_moles_at_standard_conditions() {
        let n = moles(STANDARD_PRESSURE, 1.0, celsius_to_kelvin(0.0));
        assert_relative_eq!(n, 44.61503340547032, max_relative = 1e-12);
    }

    #[test]
    fn test_molar_volume_matches_gas_constant() {
        // R is exact and STP molar volume is derived from it, so the two agree
        assert_relative_eq!(
            MOLES_PER_CUBIC_METER,
            moles(STANDARD_PRESSURE, 1.0, 273.15),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_solvers_are_mutually_consistent() {
        let (v, n, t) = (2.5, 17.0, 310.0);
        let p = pressure(v, n, t);
        assert_relative_eq!(temperature(p, v, n), t, max_relative = 1e-12);
        assert_relative_eq!(moles(p, v, t), n, max_relative = 1e-12);
        assert_relative_eq!(p * v, n * R * t, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_pressure_gives_zero_moles() {
        for (v, t) in [(1.0, 273.15), (0.001, 1.0), (500.0, 5000.0)] {
            assert_eq!(moles(0.0, v, t), 0.0);
        }
    }

    #[test]
    fn test_zero_volume_is_unguarded() {
        assert!(pressure(0.0, 1.0, 300.0).is_infinite());
        assert!(temperature(0.0, 1.0, 0.0).is_nan());
    }

    #[test]
    fn test_demonstration_reproduces_inputs() {
        let demo = demonstration();
        assert_relative_eq!(demo.solved_pressure, demo.pressure, max_relative = 1e-9);
        assert_relative_eq!(demo.solved_temperature, demo.temperature, max_relative = 1e-9);
        assert_relative_eq!(demo.solved_moles, demo.moles, max_relative = 1e-9);
    }
}
