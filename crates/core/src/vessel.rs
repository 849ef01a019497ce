//! Pressure vessel holding an ideal gas
//!
//! A [`Vessel`] owns a [`PhysicalState`] and exposes one mutator per state
//! variable. Each mutator stores the new value and re-solves exactly one other
//! variable through [`crate::physics::ideal_gas`], holding the remaining two
//! fixed, so that `P·V = n·R·T` holds after every call:
//!
//! | Mutator                   | Re-solved | Held fixed |
//! |---------------------------|-----------|------------|
//! | `set_volume`              | pressure  | n, T       |
//! | `set_pressure`            | moles     | V, T       |
//! | `set_temperature_celsius` | pressure  | V, n       |
//! | `set_moles`               | pressure  | V, T       |
//! | `transfer`                | pressure  | V, T       |
//!
//! Inputs are validated before anything is stored; a rejected call leaves the
//! vessel exactly as it was.

use crate::core_types::units::{Celsius, CubicMeters, Kelvin, Moles, Pascals};
use crate::physics::ideal_gas::{self, R, STANDARD_PRESSURE};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Snapshot of the four ideal-gas state variables
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhysicalState {
    /// Absolute pressure (Pa)
    pub pressure: f64,
    /// Occupied volume (m³)
    pub volume: f64,
    /// Absolute temperature (K)
    pub temperature: f64,
    /// Amount of substance (mol)
    pub moles: f64,
}

impl PhysicalState {
    /// Relative disagreement between `P·V` and `n·R·T`
    ///
    /// Zero for an exactly consistent state (including an empty vessel).
    pub fn residual(&self) -> f64 {
        let pv = self.pressure * self.volume;
        let nrt = self.moles * R * self.temperature;
        let scale = pv.abs().max(nrt.abs());
        if scale == 0.0 {
            return 0.0;
        }
        (pv - nrt).abs() / scale
    }
}

/// State variable named in a [`VesselError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quantity {
    Pressure,
    Volume,
    Temperature,
    Moles,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::Pressure => "pressure",
            Quantity::Volume => "volume",
            Quantity::Temperature => "temperature",
            Quantity::Moles => "moles",
        };
        f.write_str(name)
    }
}

/// Errors raised when a mutation would store a physically invalid state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VesselError {
    /// Volume <= 0, temperature <= 0 K, or a non-finite input.
    /// Temperatures are reported in Kelvin.
    InvalidPhysicalQuantity { quantity: Quantity, value: f64 },
    /// The operation would leave a negative amount of gas in the vessel
    NegativeMoles { moles: f64 },
}

impl fmt::Display for VesselError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VesselError::InvalidPhysicalQuantity { quantity, value } => {
                write!(f, "Invalid {quantity}: {value}")
            }
            VesselError::NegativeMoles { moles } => {
                write!(f, "Operation would leave negative moles: {moles}")
            }
        }
    }
}

impl std::error::Error for VesselError {}

pub(crate) fn reject(err: VesselError) -> VesselError {
    warn!(%err, "vessel mutation rejected");
    err
}

fn require_finite(quantity: Quantity, value: f64) -> Result<(), VesselError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(reject(VesselError::InvalidPhysicalQuantity { quantity, value }))
    }
}

fn require_positive(quantity: Quantity, value: f64) -> Result<(), VesselError> {
    require_finite(quantity, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(reject(VesselError::InvalidPhysicalQuantity { quantity, value }))
    }
}

fn require_non_negative_moles(moles: f64) -> Result<(), VesselError> {
    require_finite(Quantity::Moles, moles)?;
    if moles < 0.0 {
        return Err(reject(VesselError::NegativeMoles { moles }));
    }
    Ok(())
}

/// Rigid container of ideal gas whose setters keep `PV = nRT` satisfied
///
/// Temperature is stored in Kelvin; the setter takes Celsius while
/// [`Vessel::temperature`] returns Kelvin.
///
/// # Example
/// ```
/// use vessel_sim_core::Vessel;
///
/// let mut vessel = Vessel::new(1.0, 0.0).unwrap();
/// assert_eq!(vessel.pressure(), 101325.0);
///
/// vessel.set_temperature_celsius(100.0).unwrap();
/// assert!(vessel.pressure() > 101325.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vessel {
    state: PhysicalState,
}

impl Vessel {
    /// Create a vessel at standard atmospheric pressure
    ///
    /// The amount of gas is derived from the volume, temperature and
    /// [`STANDARD_PRESSURE`].
    ///
    /// # Errors
    /// `InvalidPhysicalQuantity` if `volume` <= 0 m³ or `temperature_c` is at or
    /// below absolute zero.
    pub fn new(volume: f64, temperature_c: f64) -> Result<Self, VesselError> {
        require_positive(Quantity::Volume, volume)?;
        let temperature = ideal_gas::celsius_to_kelvin(temperature_c);
        require_positive(Quantity::Temperature, temperature)?;

        let mut vessel = Vessel {
            state: PhysicalState {
                pressure: 0.0,
                volume,
                temperature,
                moles: 0.0,
            },
        };
        vessel.set_pressure(STANDARD_PRESSURE)?;
        debug!(volume, temperature, moles = vessel.state.moles, "vessel created");
        Ok(vessel)
    }

    /// Copy of the current state
    pub fn state(&self) -> PhysicalState {
        self.state
    }

    /// Volume (m³)
    pub fn volume(&self) -> f64 {
        self.state.volume
    }

    /// Set the volume and re-solve pressure; moles and temperature are held.
    ///
    /// # Errors
    /// `InvalidPhysicalQuantity` if `volume` is not a finite positive value or
    /// the re-solved pressure overflows.
    pub fn set_volume(&mut self, volume: f64) -> Result<(), VesselError> {
        require_positive(Quantity::Volume, volume)?;
        self.resolve_pressure(volume, self.state.temperature, self.state.moles)
    }

    /// Absolute pressure (Pa)
    pub fn pressure(&self) -> f64 {
        self.state.pressure
    }

    /// Pressure relative to standard atmosphere (Pa)
    pub fn gauge_pressure(&self) -> f64 {
        *Pascals::new(self.state.pressure).to_gauge()
    }

    /// Set the pressure and re-solve moles; volume and temperature are held.
    ///
    /// # Errors
    /// `InvalidPhysicalQuantity` for a non-finite pressure, `NegativeMoles` for
    /// a negative one.
    pub fn set_pressure(&mut self, pressure: f64) -> Result<(), VesselError> {
        require_finite(Quantity::Pressure, pressure)?;
        let moles = ideal_gas::moles(pressure, self.state.volume, self.state.temperature);
        require_non_negative_moles(moles)?;

        self.state.pressure = pressure;
        self.state.moles = moles;
        debug!(pressure, moles, "pressure set, moles recomputed");
        Ok(())
    }

    /// Absolute temperature (K)
    pub fn temperature(&self) -> f64 {
        self.state.temperature
    }

    /// Temperature for operator-facing display
    pub fn temperature_celsius(&self) -> Celsius {
        Kelvin::new(self.state.temperature).to_celsius()
    }

    /// Set the temperature in Celsius and re-solve pressure; volume and moles
    /// are held.
    ///
    /// # Errors
    /// `InvalidPhysicalQuantity` if the temperature is non-finite or at or below
    /// absolute zero, or the re-solved pressure overflows.
    pub fn set_temperature_celsius(&mut self, temperature_c: f64) -> Result<(), VesselError> {
        let temperature = ideal_gas::celsius_to_kelvin(temperature_c);
        require_positive(Quantity::Temperature, temperature)?;
        self.resolve_pressure(self.state.volume, temperature, self.state.moles)
    }

    /// Amount of gas (mol)
    pub fn moles(&self) -> f64 {
        self.state.moles
    }

    /// Set the total amount of gas and re-solve pressure; volume and
    /// temperature are held.
    ///
    /// # Errors
    /// `NegativeMoles` if `moles` < 0, `InvalidPhysicalQuantity` if non-finite
    /// or the re-solved pressure overflows.
    pub fn set_moles(&mut self, moles: f64) -> Result<(), VesselError> {
        require_non_negative_moles(moles)?;
        self.resolve_pressure(self.state.volume, self.state.temperature, moles)
    }

    /// Alias for [`Vessel::moles`]
    pub fn amount_of_substance(&self) -> f64 {
        self.moles()
    }

    /// Alias for [`Vessel::set_moles`]
    ///
    /// # Errors
    /// See [`Vessel::set_moles`].
    pub fn set_amount_of_substance(&mut self, moles: f64) -> Result<(), VesselError> {
        self.set_moles(moles)
    }

    /// Add (or with a negative `delta`, remove) gas directly in moles
    ///
    /// # Errors
    /// See [`Vessel::set_moles`].
    pub fn add_moles(&mut self, delta: f64) -> Result<(), VesselError> {
        self.set_moles(self.state.moles + delta)
    }

    /// Move gas across the vessel boundary, measured as a volume at the
    /// vessel's current pressure and temperature.
    ///
    /// Positive `delta_volume` is inflow, negative is outflow. The transferred
    /// gas is taken to be at vessel conditions, not those of the stream it
    /// came from. Returns the moles transferred.
    ///
    /// # Errors
    /// `InvalidPhysicalQuantity` if `delta_volume` is non-finite,
    /// `NegativeMoles` if the outflow exceeds the gas in the vessel.
    pub fn transfer(&mut self, delta_volume: f64) -> Result<f64, VesselError> {
        require_finite(Quantity::Volume, delta_volume)?;
        let delta_moles =
            ideal_gas::moles(self.state.pressure, delta_volume, self.state.temperature);
        self.add_moles(delta_moles)?;
        Ok(delta_moles)
    }

    /// Display adapter showing absolute pressure and Kelvin
    pub fn absolute(&self) -> AbsoluteDisplay<'_> {
        AbsoluteDisplay(self)
    }

    /// Re-solve pressure for the given V, T, n and store all four only if the
    /// result is finite.
    fn resolve_pressure(
        &mut self,
        volume: f64,
        temperature: f64,
        moles: f64,
    ) -> Result<(), VesselError> {
        let pressure = ideal_gas::pressure(volume, moles, temperature);
        require_finite(Quantity::Pressure, pressure)?;

        self.state = PhysicalState {
            pressure,
            volume,
            temperature,
            moles,
        };
        debug!(
            volume = self.state.volume,
            temperature = self.state.temperature,
            moles = self.state.moles,
            pressure = self.state.pressure,
            "pressure recomputed"
        );
        Ok(())
    }
}

/// Operator-facing rendering: gauge pressure and Celsius
impl fmt::Display for Vessel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Vessel pressure: {}, volume: {}, temperature: {}, moles: {}>",
            Pascals::new(self.state.pressure).to_gauge(),
            CubicMeters::new(self.state.volume),
            self.temperature_celsius(),
            Moles::new(self.state.moles),
        )
    }
}

/// Renders a [`Vessel`] with absolute pressure and Kelvin
#[derive(Debug, Clone, Copy)]
pub struct AbsoluteDisplay<'a>(&'a Vessel);

impl fmt::Display for AbsoluteDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.state;
        write!(
            f,
            "<Vessel pressure: {}, volume: {}, temperature: {}, moles: {}>",
            Pascals::new(state.pressure),
            CubicMeters::new(state.volume),
            Kelvin::new(state.temperature),
            Moles::new(state.moles),
        )
    }
}
