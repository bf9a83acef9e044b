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

//! Numeric helpers shared by the planner, the tail-bound estimators and the baselines.

mod binomial;
mod confidence;

pub use self::binomial::binomial_probability;
pub use self::confidence::ConfidencePolicy;

use crate::error::Error;

/// Largest power of two representable as `u64`.
const MAX_POWER_OF_TWO: u64 = 1 << 63;

/// Returns the smallest power of two that is not less than `x`.
///
/// Values in `(0, 1]` round up to `1`.
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if `x` is not
/// a positive finite number, or if the result would not fit in a `u64`.
///
/// # Examples
///
/// ```
/// # use cuckoo_sizing::common::power_of_two_ceil;
/// assert_eq!(power_of_two_ceil(0.3).unwrap(), 1);
/// assert_eq!(power_of_two_ceil(1024.0).unwrap(), 1024);
/// assert_eq!(power_of_two_ceil(1024.5).unwrap(), 2048);
/// assert!(power_of_two_ceil(0.0).is_err());
/// ```
pub fn power_of_two_ceil(x: f64) -> Result<u64, Error> {
    let x = Error::require_positive("x", x)?;
    let ceiled = x.ceil();
    if ceiled > MAX_POWER_OF_TWO as f64 {
        return Err(Error::invalid_argument("power of two ceiling overflows u64").with_context("x", x));
    }
    Ok((ceiled as u64).max(1).next_power_of_two())
}

/// Logarithm of `n` taken in the base-`arity` tree sense: `ln((arity - 1) * n + 1) / ln(arity)`.
///
/// This is the depth of a complete `arity`-ary tree holding `n` nodes, the quantity the
/// relocation budget scales with.
pub(crate) fn tree_log(n: f64, arity: u32) -> f64 {
    let a = f64::from(arity);
    ((a - 1.0) * n + 1.0).ln() / a.ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_power_of_two_ceil_small_values() {
        assert_eq!(power_of_two_ceil(f64::MIN_POSITIVE).unwrap(), 1);
        assert_eq!(power_of_two_ceil(1.0).unwrap(), 1);
        assert_eq!(power_of_two_ceil(1.0001).unwrap(), 2);
        assert_eq!(power_of_two_ceil(3.0).unwrap(), 4);
        assert_eq!(power_of_two_ceil(4.0).unwrap(), 4);
        assert_eq!(power_of_two_ceil(5.0).unwrap(), 8);
    }

    #[test]
    fn test_power_of_two_ceil_limits() {
        assert_eq!(power_of_two_ceil(MAX_POWER_OF_TWO as f64).unwrap(), MAX_POWER_OF_TWO);
        assert_eq!(
            power_of_two_ceil(MAX_POWER_OF_TWO as f64 * 2.0).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            power_of_two_ceil(-4.0).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert!(power_of_two_ceil(f64::NAN).is_err());
    }

    #[test]
    fn test_tree_log() {
        // a 4-ary tree of depth 2 holds 1 + 4 + 16 = 21 nodes
        assert!((tree_log(21.0, 4) - 3.0).abs() < 1e-12);
        assert_eq!(tree_log(0.0, 4), 0.0);
        assert!((tree_log(4096.0, 4) - 12289f64.ln() / 4f64.ln()).abs() < 1e-12);
    }
}
