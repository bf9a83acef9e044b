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

//! Confidence multipliers for the tail-bound margin
//!
//! The planner takes a single multiplier `alpha`. Analyses that sweep the key count over
//! several orders of magnitude raise it at larger scales so that the overflow probability
//! margin stays roughly constant; this module lets callers express that choice as data.

use crate::error::Error;

/// Multiplier used when no policy is given.
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Key count from which [`ConfidencePolicy::paper`] switches to the larger multiplier.
pub const PAPER_CROSSOVER_KEYS: f64 = (1u64 << 23) as f64;

/// How the confidence multiplier is chosen for a given key count.
///
/// # Examples
///
/// ```
/// # use cuckoo_sizing::common::ConfidencePolicy;
/// let policy = ConfidencePolicy::paper();
/// assert_eq!(policy.alpha_for(1_000_000.0), 1.0);
/// assert_eq!(policy.alpha_for(16_777_216.0), 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfidencePolicy {
    /// The same multiplier at every scale.
    Fixed(f64),
    /// `below` for key counts under `crossover`, `above` from `crossover` on.
    ScaleBands {
        /// First key count that uses `above`.
        crossover: f64,
        /// Multiplier for key counts below `crossover`.
        below: f64,
        /// Multiplier for key counts at or above `crossover`.
        above: f64,
    },
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        ConfidencePolicy::Fixed(DEFAULT_ALPHA)
    }
}

impl ConfidencePolicy {
    /// `1.0` below `2^23` keys and `1.5` from there on.
    pub const fn paper() -> Self {
        ConfidencePolicy::ScaleBands {
            crossover: PAPER_CROSSOVER_KEYS,
            below: 1.0,
            above: 1.5,
        }
    }

    /// Returns the multiplier this policy assigns to `keys`.
    pub fn alpha_for(&self, keys: f64) -> f64 {
        match *self {
            ConfidencePolicy::Fixed(alpha) => alpha,
            ConfidencePolicy::ScaleBands {
                crossover,
                below,
                above,
            } => {
                if keys < crossover {
                    below
                } else {
                    above
                }
            }
        }
    }

    /// Checks that every multiplier the policy can produce is non-negative and finite.
    pub fn validate(&self) -> Result<(), Error> {
        match *self {
            ConfidencePolicy::Fixed(alpha) => {
                Error::require_non_negative("alpha", alpha)?;
            }
            ConfidencePolicy::ScaleBands {
                crossover,
                below,
                above,
            } => {
                Error::require_positive("crossover", crossover)?;
                Error::require_non_negative("below", below)?;
                Error::require_non_negative("above", above)?;
            }
        }
        Ok(())
    }
}
