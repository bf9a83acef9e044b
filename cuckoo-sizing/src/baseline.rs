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

//! Non-chunked reference sizers.
//!
//! The partition planner is judged by how much space it saves over two simpler designs:
//!
//! - [`BaselineVariant::Fixed`]: a single power-of-two table, doubled when the keys would fill
//!   it beyond the safe fraction.
//! - [`BaselineVariant::VariableSegment`]: a table whose bucket count is a multiple of a
//!   power-of-two segment, with alternate buckets confined to one segment. The segment is the
//!   smallest size (at least `min_segment_buckets`) for which the tail bound over segments fits.
//!
//! Both return a total bucket count.

use tracing::debug;

use crate::common::power_of_two_ceil;
use crate::error::Error;
use crate::planner::PartitionPlanner;
use crate::tailbound::estimate_with_confidence;

/// Which reference design to size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaselineVariant {
    /// One power-of-two table.
    Fixed,
    /// A multiple of a power-of-two segment.
    VariableSegment,
}

impl PartitionPlanner {
    /// Sizes the reference design `variant` for `keys` items, in buckets.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `keys` is not positive.
    pub fn baseline_size(&self, keys: f64, variant: BaselineVariant) -> Result<u64, Error> {
        match variant {
            BaselineVariant::Fixed => self.fixed_design(keys),
            BaselineVariant::VariableSegment => self.variable_segment_design(keys),
        }
    }

    /// Sizes a single power-of-two table for `keys` items.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cuckoo_sizing::planner::PartitionPlanner;
    /// let planner = PartitionPlanner::default();
    /// // 2^20 keys fill 2^18 buckets completely, so the table doubles
    /// assert_eq!(planner.fixed_design(1_048_576.0).unwrap(), 524_288);
    /// assert_eq!(planner.fixed_design(1_000_000.0).unwrap(), 262_144);
    /// ```
    pub fn fixed_design(&self, keys: f64) -> Result<u64, Error> {
        let keys = Error::require_positive("keys", keys)?;
        let config = self.config();
        let associativity = f64::from(config.associativity());

        let mut buckets = power_of_two_ceil((keys / associativity).max(1.0))?;
        if keys / buckets as f64 / associativity > config.overflow_capacity_ratio() {
            buckets = buckets.checked_mul(2).ok_or_else(|| overflow(keys))?;
        }
        debug!(keys, buckets, "sized fixed baseline");
        Ok(buckets)
    }

    /// Sizes a segmented table for `keys` items.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cuckoo_sizing::planner::PartitionPlanner;
    /// let planner = PartitionPlanner::default();
    /// assert_eq!(planner.variable_segment_design(1_048_576.0).unwrap(), 294_912);
    /// // tiny key counts still get one minimum segment
    /// assert_eq!(planner.variable_segment_design(1.0).unwrap(), 1024);
    /// ```
    pub fn variable_segment_design(&self, keys: f64) -> Result<u64, Error> {
        let keys = Error::require_positive("keys", keys)?;
        let config = self.config();
        let associativity = f64::from(config.associativity());

        let exact = (keys / config.target_load_factor() / associativity).floor();
        if exact >= u64::MAX as f64 {
            return Err(overflow(keys));
        }
        let num_buckets = (exact as u64).max(1);

        let balls = associativity * config.target_load_factor() * num_buckets as f64;
        let mut segment = config.min_segment_buckets();
        while segment < num_buckets {
            let bins = num_buckets as f64 / segment as f64;
            let load = estimate_with_confidence(balls, bins, config.baseline_confidence())?;
            if load <= config.safe_load(segment as f64) {
                break;
            }
            segment = segment.checked_mul(2).ok_or_else(|| overflow(keys))?;
        }

        let buckets = num_buckets
            .div_ceil(segment)
            .checked_mul(segment)
            .ok_or_else(|| overflow(keys))?;
        debug!(keys, segment, buckets, "sized variable segment baseline");
        Ok(buckets)
    }
}

fn overflow(keys: f64) -> Error {
    Error::invalid_argument("bucket count overflows u64").with_context("keys", keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::planner::PlannerBuilder;

    #[test]
    fn test_fixed_design_small_counts() {
        let planner = PartitionPlanner::default();
        assert_eq!(planner.fixed_design(1.0).unwrap(), 1);
        assert_eq!(planner.fixed_design(3.0).unwrap(), 1);
        // 4 keys fill one bucket beyond 96%
        assert_eq!(planner.fixed_design(4.0).unwrap(), 2);
        assert_eq!(planner.fixed_design(16_777_216.0).unwrap(), 8_388_608);
    }

    #[test]
    fn test_variable_segment_is_multiple_of_min_segment() {
        let planner = PartitionPlanner::default();
        for exp in 10..=26 {
            let buckets = planner.variable_segment_design(f64::from(1u32 << exp)).unwrap();
            assert_eq!(buckets % 1024, 0, "exp = {exp}");
        }
        assert_eq!(planner.variable_segment_design(65_536.0).unwrap(), 24_576);
    }

    #[test]
    fn test_min_segment_is_configurable() {
        let planner = PlannerBuilder::new().min_segment_buckets(8).build().unwrap();
        assert_eq!(planner.variable_segment_design(1.0).unwrap(), 8);
    }

    #[test]
    fn test_dispatch() {
        let planner = PartitionPlanner::default();
        assert_eq!(
            planner
                .baseline_size(1_048_576.0, BaselineVariant::Fixed)
                .unwrap(),
            524_288
        );
        assert_eq!(
            planner
                .baseline_size(1_048_576.0, BaselineVariant::VariableSegment)
                .unwrap(),
            294_912
        );
        assert_eq!(
            planner
                .baseline_size(0.0, BaselineVariant::Fixed)
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            planner
                .baseline_size(-1.0, BaselineVariant::VariableSegment)
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidArgument
        );
    }
}
