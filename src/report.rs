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

use std::path::Path;
use itertools::Itertools;
use serde::Serialize;
use tracing::info;
use lapsim::{LapResult, SweepReport, Track, Vehicle};
use utils::numeric::round_float_to;
use utils::units::{kw_to_bhp, mps_to_kmh, watts_to_kw};
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct ProfileRow {
    distance_m: f64,
    time_s: f64,
    speed_mps: f64,
    envelope_mps: f64
}

pub fn vehicle_summary(vehicle: &Vehicle) -> String {
    let kw = watts_to_kw(vehicle.power());
    let aero = vehicle.aero();
    [
        format!("Mass: {}kg", round_float_to(vehicle.mass(), 1)),
        format!("Power: {}kW ({}bhp)", round_float_to(kw, 1), round_float_to(kw_to_bhp(kw), 1)),
        format!("Brake force: {}N (bias {})", round_float_to(vehicle.brake_force(), 1), round_float_to(vehicle.brake_bias(), 2)),
        format!("Tyre grip: {}", round_float_to(vehicle.tire_grip(), 3)),
        format!("Downforce area: {}m²  Drag area: {}m²", round_float_to(aero.lift_area(), 3), round_float_to(aero.drag_area(), 3))
    ].iter().join("\n")
}

pub fn track_summary(track: &Track) -> String {
    let straights = track.segments().iter().filter(|s| s.radius().is_straight()).count();
    format!("Track: {}m over {} segments ({} straights)",
            round_float_to(track.length(), 1),
            track.segments().len(),
            straights)
}

pub fn lap_summary(result: &LapResult) -> String {
    let top_speed = result.top_speed();
    let mut lines = vec![
        format!("Lap time: {}s", round_float_to(result.lap_time(), 3)),
        format!("Top speed: {}m/s ({}km/h)", round_float_to(top_speed, 2), round_float_to(mps_to_kmh(top_speed), 1)),
    ];
    if let Some(min_speed) = result.min_rolling_speed() {
        lines.push(format!("Minimum speed: {}m/s ({}km/h)", round_float_to(min_speed, 2), round_float_to(mps_to_kmh(min_speed), 1)));
    }
    lines.push(format!("Samples: {} at {}m", result.len(), result.step_size()));
    lines.iter().join("\n")
}

pub fn sweep_summary(report: &SweepReport) -> String {
    let parameter = report.parameter();
    let mut lines = vec![format!("{:>14} ({}) | lap time (s)", parameter.as_str(), parameter.units())];
    lines.extend(report.samples().iter().map(|sample| {
        let lap_time = match sample.penalised {
            true => "penalised".to_string(),
            false => round_float_to(sample.lap_time, 3).to_string()
        };
        format!("{:>14} | {}", round_float_to(sample.value, 3), lap_time)
    }));
    match report.best() {
        Some(best) => lines.push(format!("Best: {} = {} ({}s)", parameter, round_float_to(best.value, 3), round_float_to(best.lap_time, 3))),
        None => lines.push("Best: no valid samples".to_string())
    }
    if let Some(mean) = report.mean_lap_time() {
        lines.push(format!("Mean lap time: {}s", round_float_to(mean, 3)));
    }
    if let Some(std_dev) = report.lap_time_std_dev() {
        lines.push(format!("Lap time std dev: {}s", round_float_to(std_dev, 3)));
    }
    lines.iter().join("\n")
}

/// Write one row per sample: distance, elapsed time, speed and cornering limit
pub fn write_speed_profile_csv(result: &LapResult, path: &Path) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)?;
    let rows = result.distances().into_iter()
        .zip(result.elapsed_times())
        .zip(result.speed_profile().iter().zip(result.cornering_envelope()));
    for ((distance_m, time_s), (speed_mps, envelope_mps)) in rows {
        writer.serialize(ProfileRow {
            distance_m,
            time_s,
            speed_mps: *speed_mps,
            envelope_mps: *envelope_mps
        })?;
    }
    writer.flush().map_err(|e| {
        AppError::FailedToWrite(path.display().to_string(), e.to_string())
    })?;
    info!("Speed profile written to {}", path.display());
    Ok(())
}
