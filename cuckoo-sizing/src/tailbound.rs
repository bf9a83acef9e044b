// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Balls-into-bins maximum load approximations.
//!
//! When `balls` items are thrown independently and uniformly at random into `bins` groups, the
//! most loaded group holds with high probability at most
//!
//! ```text
//! balls / bins + alpha * sqrt(2 * (balls / bins) * ln(bins))
//! ```
//!
//! items, where the multiplier `alpha` trades space for a wider overflow margin. The planner
//! compares this estimate against the slots reserved for a group to decide whether a split is
//! safe.
//!
//! A single bin trivially holds every ball, so `bins == 1` returns `balls` exactly.
//!
//! # References
//!
//! - Raab and Steger (1998). "Balls into Bins: A Simple and Tight Analysis"

use crate::error::Error;

fn validate(balls: f64, bins: f64) -> Result<(), Error> {
    Error::require_non_negative("balls", balls)?;
    Error::require_positive("bins", bins)?;
    if bins < 1.0 {
        return Err(Error::domain("ln(bins) is negative for fewer than one bin")
            .with_context("balls", balls)
            .with_context("bins", bins));
    }
    Ok(())
}

fn max_load(balls: f64, bins: f64, alpha: f64) -> f64 {
    balls / bins + alpha * (2.0 * balls / bins * bins.ln()).sqrt()
}

/// Estimates the maximum bin load with the unit multiplier, rounded up to a whole item count.
///
/// # Errors
///
/// Returns `InvalidArgument` if `balls` is negative or `bins` is not positive, and
/// `ArithmeticDomain` if `bins` is in `(0, 1)`.
///
/// # Examples
///
/// ```
/// # use cuckoo_sizing::tailbound::estimate_fixed;
/// assert_eq!(estimate_fixed(100.0, 1.0).unwrap(), 100.0);
/// // 4 + sqrt(8 * ln 4) = 7.33...
/// assert_eq!(estimate_fixed(16.0, 4.0).unwrap(), 8.0);
/// ```
pub fn estimate_fixed(balls: f64, bins: f64) -> Result<f64, Error> {
    validate(balls, bins)?;
    if bins == 1.0 {
        return Ok(balls);
    }
    Ok(max_load(balls, bins, 1.0).ceil())
}

/// Estimates the maximum bin load with a caller supplied multiplier, without rounding.
///
/// The unrounded value is what feasibility comparisons use.
///
/// # Errors
///
/// As [`estimate_fixed`], plus `InvalidArgument` if `alpha` is negative.
///
/// # Examples
///
/// ```
/// # use cuckoo_sizing::tailbound::estimate_with_confidence;
/// let tight = estimate_with_confidence(1000.0, 10.0, 1.0).unwrap();
/// let wide = estimate_with_confidence(1000.0, 10.0, 1.5).unwrap();
/// assert!(tight < wide);
/// assert_eq!(estimate_with_confidence(1000.0, 10.0, 0.0).unwrap(), 100.0);
/// ```
pub fn estimate_with_confidence(balls: f64, bins: f64, alpha: f64) -> Result<f64, Error> {
    validate(balls, bins)?;
    Error::require_non_negative("alpha", alpha)?;
    if bins == 1.0 {
        return Ok(balls);
    }
    Ok(max_load(balls, bins, alpha))
}

#[cfg(test)]
mod tests {
    use googletest::assert_that;
    use googletest::prelude::near;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_single_bin_returns_balls() {
        assert_eq!(estimate_fixed(7.25, 1.0).unwrap(), 7.25);
        for alpha in [0.0, 1.0, 1.5, 10.0] {
            assert_eq!(estimate_with_confidence(7.25, 1.0, alpha).unwrap(), 7.25);
        }
    }

    #[test]
    fn test_formula() {
        let expected = 2.0 + 1.5 * (2.0 * 2.0 * 8f64.ln()).sqrt();
        assert_that!(
            estimate_with_confidence(16.0, 8.0, 1.5).unwrap(),
            near(expected, 1e-12)
        );
        assert_eq!(estimate_fixed(0.0, 8.0).unwrap(), 0.0);
    }

    #[test]
    fn test_fixed_is_ceiling_of_unit_confidence() {
        for (balls, bins) in [(3.8e6, 1024.0), (12.5, 3.0), (1e9, 65536.0)] {
            let raw = estimate_with_confidence(balls, bins, 1.0).unwrap();
            assert_eq!(estimate_fixed(balls, bins).unwrap(), raw.ceil());
        }
    }

    #[test]
    fn test_invalid_arguments() {
        assert_eq!(
            estimate_fixed(-1.0, 4.0).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            estimate_fixed(1.0, 0.0).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            estimate_with_confidence(1.0, 4.0, -0.5).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            estimate_with_confidence(1.0, 0.5, 1.0).unwrap_err().kind(),
            ErrorKind::ArithmeticDomain
        );
    }
}
