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

pub fn round_float_to(float: f64, decimal_places: u32) -> f64 {
    let precision_base: u64 = 10;
    let precision_factor = precision_base.pow(decimal_places) as f64;
    (float * precision_factor).round() / precision_factor
}

/// Returns `count` evenly spaced values from `start` to `end` inclusive.
/// A single sample yields just `start`.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let increment = (end - start) / (count - 1) as f64;
            (0..count).map(|idx| {
                if idx == count - 1 { end } else { start + increment * idx as f64 }
            }).collect()
        }
    }
}

pub fn is_valid_fraction(val: f64) -> bool {
    val >= 0.0 && val <= 1.0
}

pub fn is_positive_finite(val: f64) -> bool {
    val.is_finite() && val > 0.0
}

pub fn is_non_negative_finite(val: f64) -> bool {
    val.is_finite() && val >= 0.0
}

#[cfg(test)]
mod tests {
    use crate::numeric::{is_non_negative_finite, is_positive_finite, is_valid_fraction, linspace, round_float_to};

    #[test]
    fn round_tests() {
        assert_eq!(round_float_to(27.12345, 2), 27.12);
        assert_eq!(round_float_to(27.125001, 2), 27.13);
        assert_eq!(round_float_to(-3.14159, 3), -3.142);
        assert_eq!(round_float_to(10.0, 0), 10.0);
    }

    #[test]
    fn linspace_tests() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(5.0, 10.0, 1), vec![5.0]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(10.0, 0.0, 3), vec![10.0, 5.0, 0.0]);
        let values = linspace(300000.0, 650000.0, 8);
        assert_eq!(values.len(), 8);
        assert_eq!(*values.last().unwrap(), 650000.0);
    }

    #[test]
    fn fraction_tests() {
        assert_eq!(is_valid_fraction(-0.01), false);
        assert_eq!(is_valid_fraction(0.0), true);
        assert_eq!(is_valid_fraction(0.6), true);
        assert_eq!(is_valid_fraction(1.0), true);
        assert_eq!(is_valid_fraction(1.01), false);
        assert_eq!(is_valid_fraction(f64::NAN), false);
    }

    #[test]
    fn finite_checks() {
        assert!(is_positive_finite(0.1));
        assert!(!is_positive_finite(0.0));
        assert!(!is_positive_finite(f64::INFINITY));
        assert!(is_non_negative_finite(0.0));
        assert!(!is_non_negative_finite(-1.0));
        assert!(!is_non_negative_finite(f64::NAN));
    }
}
