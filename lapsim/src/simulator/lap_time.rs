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

use itertools::Itertools;

/// Time (s) taken to cover `step` metres between two samples, using the mean
/// of their speeds. A pair that's entirely stationary contributes nothing.
pub fn segment_time(speed_a: f64, speed_b: f64, step: f64) -> f64 {
    let speed_sum = speed_a + speed_b;
    if speed_sum > 0.0 {
        2.0 * step / speed_sum
    } else {
        0.0
    }
}

/// Trapezoidal integration of `1/v` over distance
pub fn lap_time(speeds: &[f64], step: f64) -> f64 {
    speeds.iter()
        .tuple_windows()
        .map(|(a, b)| segment_time(*a, *b, step))
        .sum()
}

/// Elapsed time (s) at each sample, starting from zero
pub fn elapsed_times(speeds: &[f64], step: f64) -> Vec<f64> {
    if speeds.is_empty() {
        return Vec::new();
    }
    let mut elapsed = Vec::with_capacity(speeds.len());
    elapsed.push(0.0);
    let mut total = 0.0;
    for (a, b) in speeds.iter().tuple_windows() {
        total += segment_time(*a, *b, step);
        elapsed.push(total);
    }
    elapsed
}
