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

pub fn kw_to_bhp(power_kw: f64) -> f64 {
    power_kw * 1.341
}

pub fn watts_to_kw(power_w: f64) -> f64 {
    power_w / 1000.0
}

pub fn mps_to_kmh(speed_mps: f64) -> f64 {
    speed_mps * 3.6
}

pub fn kmh_to_mps(speed_kmh: f64) -> f64 {
    speed_kmh / 3.6
}
