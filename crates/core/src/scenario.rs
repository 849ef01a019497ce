//! Discrete pressurization scenario
//!
//! Fills a vessel in fixed molar increments, one increment per step. The
//! increment is specified the way a flow meter would report it: a volume of
//! gas at a given line pressure and temperature.

use crate::physics::ideal_gas::{self, STANDARD_PRESSURE};
use crate::vessel::{reject, PhysicalState, Quantity, Vessel, VesselError};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Parameters for filling a vessel over a number of discrete steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressurizeScenario {
    /// Vessel volume (m³)
    pub vessel_volume: f64,
    /// Initial vessel temperature (°C); the vessel starts at atmospheric pressure
    pub initial_temperature_c: f64,
    /// Volume of gas admitted per step, measured at line conditions (m³)
    pub flow_volume: f64,
    /// Line temperature of the incoming gas (°C)
    pub flow_temperature_c: f64,
    /// Line pressure of the incoming gas (Pa, absolute)
    pub flow_pressure: f64,
    /// Number of increments
    pub steps: usize,
}

impl Default for PressurizeScenario {
    /// 100 m³ tank at 0°C, fed 0.1 m³ of atmospheric gas at 21°C ten times
    fn default() -> Self {
        Self {
            vessel_volume: 100.0,
            initial_temperature_c: 0.0,
            flow_volume: 0.1,
            flow_temperature_c: 21.0,
            flow_pressure: STANDARD_PRESSURE,
            steps: 10,
        }
    }
}

impl PressurizeScenario {
    /// Moles admitted per step
    pub fn flow_rate(&self) -> f64 {
        ideal_gas::moles(
            self.flow_pressure,
            self.flow_volume,
            ideal_gas::celsius_to_kelvin(self.flow_temperature_c),
        )
    }

    /// Check the parameters describe a physical setup
    ///
    /// # Errors
    /// `InvalidPhysicalQuantity` for a non-positive vessel volume, a
    /// non-finite flow volume, a temperature at or below absolute zero, or a
    /// negative or non-finite line pressure.
    pub fn validate(&self) -> Result<(), VesselError> {
        let invalid = |quantity: Quantity, value: f64| -> Result<(), VesselError> {
            Err(reject(VesselError::InvalidPhysicalQuantity { quantity, value }))
        };

        if !(self.vessel_volume.is_finite() && self.vessel_volume > 0.0) {
            return invalid(Quantity::Volume, self.vessel_volume);
        }
        if !self.flow_volume.is_finite() {
            return invalid(Quantity::Volume, self.flow_volume);
        }
        for temperature_c in [self.initial_temperature_c, self.flow_temperature_c] {
            let kelvin = ideal_gas::celsius_to_kelvin(temperature_c);
            if !(kelvin.is_finite() && kelvin > 0.0) {
                return invalid(Quantity::Temperature, kelvin);
            }
        }
        if !(self.flow_pressure.is_finite() && self.flow_pressure >= 0.0) {
            return invalid(Quantity::Pressure, self.flow_pressure);
        }
        Ok(())
    }

    /// Run the scenario, calling `observer` with the step index and vessel
    /// after construction (step 0) and after every increment.
    ///
    /// # Errors
    /// Any validation error, or `NegativeMoles` if a negative flow drains the
    /// vessel.
    pub fn run_with<F>(&self, mut observer: F) -> Result<Vessel, VesselError>
    where
        F: FnMut(usize, &Vessel),
    {
        self.validate()?;
        let flow_rate = self.flow_rate();
        let mut vessel = Vessel::new(self.vessel_volume, self.initial_temperature_c)?;
        info!(
            volume = self.vessel_volume,
            steps = self.steps,
            flow_rate,
            "starting pressurization"
        );

        observer(0, &vessel);
        for step in 1..=self.steps {
            vessel.add_moles(flow_rate)?;
            observer(step, &vessel);
        }

        info!(
            pressure = vessel.pressure(),
            moles = vessel.moles(),
            "pressurization complete"
        );
        Ok(vessel)
    }

    /// Run the scenario and collect the state after construction and after
    /// every step (`steps + 1` snapshots)
    ///
    /// # Errors
    /// See [`PressurizeScenario::run_with`].
    pub fn run(&self) -> Result<Vec<PhysicalState>, VesselError> {
        let mut states = Vec::with_capacity(self.steps + 1);
        self.run_with(|_, vessel| states.push(vessel.state()))?;
        Ok(states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_default_flow_rate() {
        let scenario = PressurizeScenario::default();
        let expected = ideal_gas::moles(101325.0, 0.1, ideal_gas::celsius_to_kelvin(21.0));
        assert_eq!(scenario.flow_rate(), expected);
        assert_relative_eq!(scenario.flow_rate(), 4.14299, epsilon = 1e-4);
    }

    #[test]
    fn test_run_produces_one_snapshot_per_step() {
        let states = PressurizeScenario::default().run().unwrap();
        assert_eq!(states.len(), 11);
        assert_eq!(states[0].pressure, STANDARD_PRESSURE);
    }

    #[test]
    fn test_zero_steps_returns_initial_state() {
        let scenario = PressurizeScenario {
            steps: 0,
            ..PressurizeScenario::default()
        };
        let states = scenario.run().unwrap();
        assert_eq!(states.len(), 1);
    }

    #[test]
    fn test_observer_sees_every_step() {
        let mut seen = Vec::new();
        let vessel = PressurizeScenario::default()
            .run_with(|step, _| seen.push(step))
            .unwrap();
        assert_eq!(seen, (0..=10).collect::<Vec<_>>());
        assert!(vessel.gauge_pressure() > 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let base = PressurizeScenario::default();
        let bad = [
            PressurizeScenario { vessel_volume: 0.0, ..base.clone() },
            PressurizeScenario { flow_volume: f64::NAN, ..base.clone() },
            PressurizeScenario { initial_temperature_c: -274.0, ..base.clone() },
            PressurizeScenario { flow_temperature_c: -273.15, ..base.clone() },
            PressurizeScenario { flow_pressure: -1.0, ..base.clone() },
        ];
        for scenario in bad {
            assert!(scenario.validate().is_err(), "{scenario:?} should be rejected");
            assert!(scenario.run().is_err());
        }
        assert!(base.validate().is_ok());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_validate_logs_rejection() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let scenario = PressurizeScenario {
            vessel_volume: -5.0,
            ..PressurizeScenario::default()
        };
        tracing::subscriber::with_default(subscriber, || {
            assert!(scenario.validate().is_err());
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("Invalid volume: -5"), "{output}");
    }

    #[test]
    fn test_outflow_that_drains_vessel_fails() {
        let scenario = PressurizeScenario {
            vessel_volume: 1.0,
            flow_volume: -0.5,
            steps: 5,
            ..PressurizeScenario::default()
        };
        assert!(matches!(
            scenario.run(),
            Err(VesselError::NegativeMoles { .. })
        ));
    }
}
