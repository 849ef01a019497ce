//! Semantic unit types for the SI quantities a gas vessel deals in
//!
//! Newtype wrappers keep pascals, cubic meters, kelvin and moles from being
//! mixed up at call sites, and give each quantity an operator-facing
//! `Display` with an explicit unit label.
//!
//! # Design Philosophy
//! - Every quantity is f64; the gas law is evaluated at full precision
//! - Absolute quantities assert their physical floor in `new`
//! - Gauge pressure (`GaugePascals`) may take any sign
//! - Total ordering via `Ord` (NaN sorts greater than all values)
//! - Serde support for serialization
//!
//! # Usage
//! ```
//! use vessel_sim_core::core_types::units::{Celsius, Kelvin};
//!
//! let temp = Celsius::new(25.0);
//! let kelvin: Kelvin = temp.into();
//! assert!((*kelvin - 298.15).abs() < 0.01);
//!
//! let t1 = Celsius::new(100.0);
//! let t2 = Celsius::new(200.0);
//! assert_eq!(t1.min(t2), Celsius::new(100.0));
//! ```

use crate::physics::ideal_gas::{CELSIUS_KELVIN_OFFSET, STANDARD_PRESSURE};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Implements `Eq`, `Ord`, `Deref<Target = f64>` and `From` conversions to f64
/// for a transparent f64 newtype.
macro_rules! impl_f64_quantity {
    ($name:ident) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                f64_total_cmp(self.0, other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl PartialEq<f64> for $name {
            fn eq(&self, other: &f64) -> bool {
                self.0 == *other
            }
        }

        impl PartialOrd<f64> for $name {
            fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
                self.0.partial_cmp(other)
            }
        }
    };
}

// ============================================================================
// TEMPERATURE TYPES
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f64);

impl_f64_quantity!(Celsius);

impl Celsius {
    /// Create a new Celsius temperature. Asserts value >= absolute zero (-273.15°C).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= -CELSIUS_KELVIN_OFFSET,
            "Celsius::new: value is below absolute zero (-273.15°C)"
        );
        Celsius(value)
    }

    /// Convert to Kelvin
    #[inline]
    #[must_use]
    pub fn to_kelvin(self) -> Kelvin {
        Kelvin(self.0 + CELSIUS_KELVIN_OFFSET)
    }
}

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Kelvin {
        c.to_kelvin()
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°C", self.0)
    }
}

/// Temperature in Kelvin (absolute scale)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kelvin(f64);

impl_f64_quantity!(Kelvin);

impl Kelvin {
    /// Create a new Kelvin temperature. Asserts value >= absolute zero (0 K).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Kelvin::new: value is below absolute zero (0 K)");
        Kelvin(value)
    }

    /// Convert to Celsius
    #[inline]
    #[must_use]
    pub fn to_celsius(self) -> Celsius {
        Celsius::new(self.0 - CELSIUS_KELVIN_OFFSET)
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Celsius {
        k.to_celsius()
    }
}

impl fmt::Display for Kelvin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} K", self.0)
    }
}

// ============================================================================
// PRESSURE TYPES
// ============================================================================

/// Absolute pressure in pascals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Pascals(f64);

impl_f64_quantity!(Pascals);

impl Pascals {
    /// Standard atmospheric pressure (101325 Pa)
    pub const ATMOSPHERIC: Pascals = Pascals(STANDARD_PRESSURE);

    /// Create an absolute pressure. Asserts value >= 0 (vacuum).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Pascals::new: absolute pressure is negative");
        Pascals(value)
    }

    /// Pressure relative to standard atmosphere
    #[inline]
    #[must_use]
    pub fn to_gauge(self) -> GaugePascals {
        GaugePascals(self.0 - Self::ATMOSPHERIC.0)
    }
}

impl fmt::Display for Pascals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} Pa", self.0)
    }
}

/// Gauge pressure in pascals (absolute minus standard atmosphere, any sign)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct GaugePascals(f64);

impl_f64_quantity!(GaugePascals);

impl fmt::Display for GaugePascals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} Pa(g)", self.0)
    }
}

// ============================================================================
// VOLUME AND AMOUNT OF SUBSTANCE
// ============================================================================

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct CubicMeters(f64);

impl_f64_quantity!(CubicMeters);

impl CubicMeters {
    /// Create a volume. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "CubicMeters::new: volume is negative");
        CubicMeters(value)
    }
}

impl fmt::Display for CubicMeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} m³", self.0)
    }
}

/// Amount of substance in moles
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Moles(f64);

impl_f64_quantity!(Moles);

impl Moles {
    /// Create an amount of substance. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Moles::new: amount of substance is negative");
        Moles(value)
    }
}

impl fmt::Display for Moles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} mol", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celsius_to_kelvin() {
        let c = Celsius(25.0);
        let k = c.to_kelvin();
        assert!((k.0 - 298.15).abs() < 0.01);
    }

    #[test]
    fn test_kelvin_to_celsius() {
        let k = Kelvin(273.15);
        let c = k.to_celsius();
        assert!((c.0 - 0.0).abs() < 0.01);
    }

    #[test]
    #[should_panic(expected = "Celsius::new: value is below absolute zero")]
    fn test_celsius_new_panics_below_absolute_zero() {
        let _ = Celsius::new(-300.0);
    }

    #[test]
    #[should_panic(expected = "Kelvin::new: value is below absolute zero")]
    fn test_kelvin_new_panics_on_negative() {
        let _ = Kelvin::new(-1.0);
    }

    #[test]
    fn test_gauge_pressure() {
        assert_eq!(Pascals::new(201325.0).to_gauge(), 100000.0);
        assert_eq!(Pascals::ATMOSPHERIC.to_gauge(), 0.0);
        assert_eq!(Pascals::new(0.0).to_gauge(), -101325.0);
    }

    #[test]
    fn test_total_ordering_puts_nan_last() {
        let mut values = vec![Kelvin(f64::NAN), Kelvin(300.0), Kelvin(1.0)];
        values.sort();
        assert_eq!(values[0], Kelvin(1.0));
        assert_eq!(values[1], Kelvin(300.0));
        assert!(values[2].is_nan());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Celsius::new(21.0).to_string(), "21.00°C");
        assert_eq!(Kelvin::new(273.15).to_string(), "273.15 K");
        assert_eq!(Pascals::new(101325.0).to_string(), "101325.0 Pa");
        assert_eq!(Pascals::new(101300.0).to_gauge().to_string(), "-25.0 Pa(g)");
        assert_eq!(CubicMeters::new(1.5).to_string(), "1.500 m³");
        assert_eq!(Moles::new(2.0).to_string(), "2.0000 mol");
    }
}
