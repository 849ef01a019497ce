use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vessel_sim_core::{ideal_gas, PressurizeScenario};

/// Ideal gas vessel demo
#[derive(Parser, Debug)]
#[command(name = "vessel-demo")]
#[command(about = "Ideal gas law and pressure vessel demo", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate each gas-law solver on 1 m³ of gas at STP
    Formulas,

    /// Fill a vessel in fixed increments and print its state after each one
    Pressurize {
        /// Vessel volume in m³
        #[arg(short, long, default_value_t = 100.0)]
        volume: f64,

        /// Initial vessel temperature in °C
        #[arg(short, long, default_value_t = 0.0)]
        temperature: f64,

        /// Gas admitted per step, m³ at line conditions
        #[arg(long, default_value_t = 0.1)]
        flow_volume: f64,

        /// Line temperature in °C
        #[arg(long, default_value_t = 21.0)]
        flow_temperature: f64,

        /// Line pressure in Pa (absolute)
        #[arg(long, default_value_t = ideal_gas::STANDARD_PRESSURE)]
        flow_pressure: f64,

        /// Number of increments
        #[arg(short, long, default_value_t = 10)]
        steps: usize,

        /// Show absolute pressure and Kelvin instead of gauge pressure and °C
        #[arg(short, long)]
        absolute: bool,
    },
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(log_filter()).init();

    let args = Args::parse();

    match args.command {
        Command::Formulas => print_formulas(),
        Command::Pressurize {
            volume,
            temperature,
            flow_volume,
            flow_temperature,
            flow_pressure,
            steps,
            absolute,
        } => {
            let scenario = PressurizeScenario {
                vessel_volume: volume,
                initial_temperature_c: temperature,
                flow_volume,
                flow_temperature_c: flow_temperature,
                flow_pressure,
                steps,
            };
            if let Err(e) = pressurize(&scenario, absolute) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// `RUST_LOG` if set and valid, otherwise `info`
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn print_formulas() {
    let demo = ideal_gas::demonstration();
    println!("=== Ideal Gas Law ===\n");
    println!(
        "inputs: v={} m³, t={} K, n={} mol, p={} Pa",
        demo.volume, demo.temperature, demo.moles, demo.pressure
    );
    println!("pressure (Pa):    {}", demo.solved_pressure);
    println!("temperature (K):  {}", demo.solved_temperature);
    println!("moles:            {}", demo.solved_moles);
}

fn pressurize(
    scenario: &PressurizeScenario,
    absolute: bool,
) -> Result<(), vessel_sim_core::VesselError> {
    println!("=== Pressurize Vessel ===\n");
    println!(
        "{:.0} m³ vessel, {} steps of {:.4} mol\n",
        scenario.vessel_volume,
        scenario.steps,
        scenario.flow_rate()
    );

    let vessel = scenario.run_with(|step, vessel| {
        if absolute {
            println!("[{step:>3}] {}", vessel.absolute());
        } else {
            println!("[{step:>3}] {vessel}");
        }
    })?;

    println!(
        "\nFinal gauge pressure: {:.1} Pa ({:.3} atm)",
        vessel.gauge_pressure(),
        vessel.pressure() / ideal_gas::STANDARD_PRESSURE
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_honors_rust_log() {
        std::env::set_var("RUST_LOG", "vessel_sim_core=debug");
        let filter = log_filter().to_string().to_lowercase();
        assert!(filter.contains("vessel_sim_core"), "{filter}");
        assert!(filter.contains("debug"), "{filter}");

        std::env::remove_var("RUST_LOG");
        assert_eq!(log_filter().to_string().to_lowercase(), "info");
    }
}
