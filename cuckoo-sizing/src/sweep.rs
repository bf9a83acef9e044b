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

//! Batch evaluation over ranges of key counts.
//!
//! Charts and tables of chunk counts, relocation budgets and space usage are all built from
//! the same loop: plan each key count in a range with the multiplier a policy assigns, and
//! record the layout next to the baselines. Points are independent, so callers may split a
//! range across threads freely.

use crate::baseline::BaselineVariant;
use crate::common::ConfidencePolicy;
use crate::error::Error;
use crate::planner::PartitionPlan;
use crate::planner::PartitionPlanner;
use crate::relocation::RelocationBudget;

/// One evaluated key count of a sweep.
#[derive(Debug)]
pub struct SweepPoint {
    /// Key count that was planned.
    pub keys: f64,
    /// Multiplier the policy chose for `keys`.
    pub alpha: f64,
    /// The layout and its relocation budget, or why planning failed.
    pub outcome: Result<(PartitionPlan, RelocationBudget), Error>,
}

/// Bucket totals of the planner and the reference designs for one key count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceComparison {
    /// Key count that was sized.
    pub keys: f64,
    /// `chunks * buckets_per_chunk` of the planned layout.
    pub planner_buckets: u64,
    /// Buckets of the single power-of-two table.
    pub fixed_buckets: u64,
    /// Buckets of the segmented table.
    pub variable_segment_buckets: u64,
    /// Unrounded buckets that hold `keys` exactly at the target load factor.
    pub ideal_buckets: f64,
}

impl SpaceComparison {
    /// Planner buckets as a fraction of the fixed design's buckets.
    pub fn planner_to_fixed_ratio(&self) -> f64 {
        self.planner_buckets as f64 / self.fixed_buckets as f64
    }

    /// Planner buckets above the ideal budget, as a fraction of the ideal budget.
    pub fn planner_overhead(&self) -> f64 {
        self.planner_buckets as f64 / self.ideal_buckets - 1.0
    }
}

impl PartitionPlanner {
    /// Plans every key count in `keys`, recording failures instead of stopping at them.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cuckoo_sizing::common::ConfidencePolicy;
    /// # use cuckoo_sizing::planner::PartitionPlanner;
    /// let keys = (19..=26).map(|exp| f64::from(1u32 << exp));
    /// let points = PartitionPlanner::default().sweep(keys, &ConfidencePolicy::paper());
    /// assert_eq!(points.len(), 8);
    /// assert!(points.iter().all(|p| p.outcome.is_ok()));
    /// assert_eq!(points[7].alpha, 1.5);
    /// ```
    pub fn sweep<I>(&self, keys: I, policy: &ConfidencePolicy) -> Vec<SweepPoint>
    where
        I: IntoIterator<Item = f64>,
    {
        keys.into_iter()
            .map(|keys| {
                let alpha = policy.alpha_for(keys);
                let outcome = self.plan_with_policy(keys, policy).and_then(|plan| {
                    let budget = self.relocation_budget(&plan)?;
                    Ok((plan, budget))
                });
                SweepPoint {
                    keys,
                    alpha,
                    outcome,
                }
            })
            .collect()
    }

    /// Sizes `keys` with the planner and both baselines.
    ///
    /// # Errors
    ///
    /// Returns the first error any of the sizers reports.
    pub fn compare_space(
        &self,
        keys: f64,
        policy: &ConfidencePolicy,
    ) -> Result<SpaceComparison, Error> {
        let plan = self.plan_with_policy(keys, policy)?;
        Ok(SpaceComparison {
            keys,
            planner_buckets: plan.total_buckets(),
            fixed_buckets: self.baseline_size(keys, BaselineVariant::Fixed)?,
            variable_segment_buckets: self.baseline_size(keys, BaselineVariant::VariableSegment)?,
            ideal_buckets: self.config().ideal_buckets(keys),
        })
    }
}
