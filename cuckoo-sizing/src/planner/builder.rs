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

use super::PartitionPlanner;
use super::PlannerConfig;
use crate::error::Error;

/// Builder for creating [`PartitionPlanner`] instances.
///
/// Every setter is optional; unset fields keep the defaults documented on
/// [`PlannerConfig`]. Validation happens once, in [`build()`](Self::build).
///
/// # Examples
///
/// ```
/// # use cuckoo_sizing::planner::PlannerBuilder;
/// let planner = PlannerBuilder::new()
///     .associativity(8)
///     .target_load_factor(0.9)
///     .build()
///     .unwrap();
/// assert_eq!(planner.config().associativity(), 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlannerBuilder {
    config: PlannerConfig,
}

impl PlannerBuilder {
    /// Creates a builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of slots per bucket (default: 4). Must be at least 2.
    pub fn associativity(mut self, associativity: u32) -> Self {
        self.config.associativity = associativity;
        self
    }

    /// Sets the target fill ratio of the initial bucket budget (default: 0.95). Must be in
    /// `(0, 1]`.
    pub fn target_load_factor(mut self, target_load_factor: f64) -> Self {
        self.config.target_load_factor = target_load_factor;
        self
    }

    /// Sets the fraction of a partition's slots the tail bound may fill (default: 0.96). Must
    /// be in `(0, 1]`.
    pub fn overflow_capacity_ratio(mut self, overflow_capacity_ratio: f64) -> Self {
        self.config.overflow_capacity_ratio = overflow_capacity_ratio;
        self
    }

    /// Sets the smallest segment of the variable-segment baseline (default: 1024). Must be a
    /// power of two.
    pub fn min_segment_buckets(mut self, min_segment_buckets: u64) -> Self {
        self.config.min_segment_buckets = min_segment_buckets;
        self
    }

    /// Sets the tail-bound multiplier of the variable-segment baseline (default: 1.5).
    pub fn baseline_confidence(mut self, baseline_confidence: f64) -> Self {
        self.config.baseline_confidence = baseline_confidence;
        self
    }

    /// Validates the configuration and builds the planner.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` naming the first field outside its valid range.
    pub fn build(self) -> Result<PartitionPlanner, Error> {
        self.config.validate()?;
        Ok(PartitionPlanner {
            config: self.config,
        })
    }
}
