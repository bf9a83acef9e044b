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

use crate::error::Error;

/// Default number of slots per bucket.
pub const DEFAULT_ASSOCIATIVITY: u32 = 4;
/// Default fill ratio used to size the initial bucket budget.
pub const DEFAULT_TARGET_LOAD_FACTOR: f64 = 0.95;
/// Default fraction of a partition's nominal slots that the tail bound may fill.
pub const DEFAULT_OVERFLOW_CAPACITY_RATIO: f64 = 0.96;
/// Default smallest segment size of the variable-segment baseline, in buckets.
pub const DEFAULT_MIN_SEGMENT_BUCKETS: u64 = 1024;
/// Default tail-bound multiplier used by the variable-segment baseline.
pub const DEFAULT_BASELINE_CONFIDENCE: f64 = 1.5;

/// Tunable constants shared by the partition search and the baseline sizers.
///
/// Built and validated through [`PlannerBuilder`](super::PlannerBuilder); the defaults describe
/// a 4-way associative table filled to 95% with 96% of each partition usable under the bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    pub(super) associativity: u32,
    pub(super) target_load_factor: f64,
    pub(super) overflow_capacity_ratio: f64,
    pub(super) min_segment_buckets: u64,
    pub(super) baseline_confidence: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            associativity: DEFAULT_ASSOCIATIVITY,
            target_load_factor: DEFAULT_TARGET_LOAD_FACTOR,
            overflow_capacity_ratio: DEFAULT_OVERFLOW_CAPACITY_RATIO,
            min_segment_buckets: DEFAULT_MIN_SEGMENT_BUCKETS,
            baseline_confidence: DEFAULT_BASELINE_CONFIDENCE,
        }
    }
}

impl PlannerConfig {
    /// Slots per bucket.
    pub fn associativity(&self) -> u32 {
        self.associativity
    }

    /// Target fill ratio.
    pub fn target_load_factor(&self) -> f64 {
        self.target_load_factor
    }

    /// Usable fraction of a partition's slots.
    pub fn overflow_capacity_ratio(&self) -> f64 {
        self.overflow_capacity_ratio
    }

    /// Smallest segment of the variable-segment baseline, in buckets.
    pub fn min_segment_buckets(&self) -> u64 {
        self.min_segment_buckets
    }

    /// Tail-bound multiplier of the variable-segment baseline.
    pub fn baseline_confidence(&self) -> f64 {
        self.baseline_confidence
    }

    /// Bucket budget that holds `keys` at the target load factor, before any rounding.
    pub fn ideal_buckets(&self, keys: f64) -> f64 {
        keys / f64::from(self.associativity) / self.target_load_factor
    }

    /// Number of items `partitions` buckets may safely hold under the tail bound.
    pub(crate) fn safe_load(&self, partitions: f64) -> f64 {
        self.overflow_capacity_ratio * f64::from(self.associativity) * partitions
    }

    pub(super) fn validate(&self) -> Result<(), Error> {
        if self.associativity < 2 {
            return Err(Error::invalid_argument("associativity must be at least 2")
                .with_context("associativity", self.associativity));
        }
        check_unit_interval("target_load_factor", self.target_load_factor)?;
        check_unit_interval("overflow_capacity_ratio", self.overflow_capacity_ratio)?;
        if !self.min_segment_buckets.is_power_of_two() {
            return Err(
                Error::invalid_argument("min_segment_buckets must be a power of two")
                    .with_context("min_segment_buckets", self.min_segment_buckets),
            );
        }
        Error::require_non_negative("baseline_confidence", self.baseline_confidence)?;
        Ok(())
    }
}

fn check_unit_interval(name: &'static str, value: f64) -> Result<(), Error> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(Error::invalid_argument(format!("{name} must be in (0, 1]")).with_context(name, value))
    }
}
