/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of lap-crane.
 *
 * lap-crane is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * lap-crane is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with lap-crane. If not, see <https://www.gnu.org/licenses/>.
 */

mod error;
mod report;
mod settings;

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use lapsim::{FitnessEvaluator, SetupParameter, Track, Vehicle};
use crate::error::AppError;
use crate::settings::GlobalSettings;

#[derive(Parser)]
#[command(name = "lap-crane")]
#[command(author = "zephyrj")]
#[command(version)]
#[command(about = "Quasi-steady-state lap time simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a single lap
    Simulate {
        /// Car definition (.json or .toml). Defaults to the built-in example car
        #[arg(long)]
        car: Option<PathBuf>,

        /// Track definition (.json or .toml). Defaults to the built-in example track
        #[arg(long)]
        track: Option<PathBuf>,

        /// Discretisation step in metres. Overrides the settings file
        #[arg(long)]
        step: Option<f64>,

        /// Write the speed profile to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Sweep one setup parameter and report the lap time at each value
    Sweep {
        #[arg(long)]
        car: Option<PathBuf>,

        #[arg(long)]
        track: Option<PathBuf>,

        /// One of power, brake_force, mass, tire_grip, cl_alpha_front, cl_alpha_rear,
        /// cd_alpha_front, cd_alpha_rear, fw_area, rw_area
        #[arg(short = 'p', long)]
        parameter: String,

        /// Defaults to the lower search bound of the parameter
        #[arg(long)]
        from: Option<f64>,

        /// Defaults to the upper search bound of the parameter
        #[arg(long)]
        to: Option<f64>,

        #[arg(short = 'n', long, default_value = "10")]
        steps: usize,
    },
    /// Print the active settings
    Settings {
        /// Also write them to lap-crane-conf.toml
        #[arg(long)]
        write: bool,
    },
}

fn init_logging() {
    match env::current_dir() {
        Ok(current_dir) => {
            let file_appender = tracing_appender::rolling::never(current_dir, "lap_crane.log");
            let subscriber = tracing_subscriber::fmt()
                .with_writer(file_appender)
                .with_ansi(false)
                .compact()
                .finish();
            match tracing::subscriber::set_global_default(subscriber) {
                Ok(_) => {
                    info!("Logging initialised");
                }
                Err(e) => {
                    eprintln!("Failed to init logging. {}", e.to_string());
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to init logging. Couldn't determine current dir {}", e.to_string());
        }
    }
}

fn load_vehicle(path: Option<&Path>) -> Result<Vehicle, AppError> {
    match path {
        Some(path) => Ok(Vehicle::load_from_path(path)?),
        None => {
            info!("No car given. Using the example car");
            Ok(Vehicle::example())
        }
    }
}

fn load_track(path: Option<&Path>) -> Result<Track, AppError> {
    match path {
        Some(path) => Ok(Track::load_from_path(path)?),
        None => {
            info!("No track given. Using the example track");
            Ok(Track::example())
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut settings = GlobalSettings::load()?;
    match cli.command {
        Commands::Simulate { car, track, step, csv } => {
            if let Some(step) = step {
                settings.set_step_size(step);
            }
            let vehicle = load_vehicle(car.as_deref())?;
            let track = load_track(track.as_deref())?;
            println!("{}", report::vehicle_summary(&vehicle));
            println!("{}", report::track_summary(&track));

            let result = lapsim::simulate_lap(&vehicle, &track, &settings.solver_settings())?;
            println!("{}", report::lap_summary(&result));
            if let Some(csv_path) = csv {
                report::write_speed_profile_csv(&result, &csv_path)?;
                println!("Speed profile written to {}", csv_path.display());
            }
        }
        Commands::Sweep { car, track, parameter, from, to, steps } => {
            let parameter = SetupParameter::from_str(&parameter)?;
            let (lower, upper) = parameter.search_bounds();
            let evaluator = FitnessEvaluator::new(load_vehicle(car.as_deref())?,
                                                  load_track(track.as_deref())?,
                                                  settings.solver_settings())?;
            let report = evaluator.sweep(parameter, from.unwrap_or(lower), to.unwrap_or(upper), steps)?;
            println!("{}", report::sweep_summary(&report));
        }
        Commands::Settings { write } => {
            print!("{}", settings.to_toml()?);
            if write {
                settings.write()?;
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e.to_string());
            eprintln!("Error: {}", e.to_string());
            ExitCode::FAILURE
        }
    }
}
