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

use tracing::debug;
use tracing::trace;

use super::PartitionPlan;
use super::PlannerConfig;
use crate::common::ConfidencePolicy;
use crate::common::power_of_two_ceil;
use crate::error::Error;
use crate::tailbound::estimate_with_confidence;

/// Computes chunked layouts under a balls-into-bins load bound.
///
/// Construct one with [`PlannerBuilder`](super::PlannerBuilder) to change the constants, or use
/// [`PartitionPlanner::default`]. A planner holds no state between calls; every method is a pure
/// function of its arguments and the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartitionPlanner {
    pub(super) config: PlannerConfig,
}

/// Outcome of scanning one level of the bucket budget.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    /// Split the budget into `bins` groups of `trial` buckets.
    Commit { trial: f64, bins: f64 },
    /// No split fits; the current budget becomes a single partition.
    Fallback,
}

/// Accumulator threaded through the commit rounds.
#[derive(Debug, Clone, Copy)]
struct SearchState {
    remaining_keys: f64,
    total_buckets: f64,
    cumulative_chunks: f64,
}

impl SearchState {
    fn new(keys: f64, config: &PlannerConfig) -> Self {
        SearchState {
            remaining_keys: keys,
            total_buckets: config.ideal_buckets(keys),
            cumulative_chunks: 1.0,
        }
    }

    /// Finds the coarsest feasible split of the current budget, doubling the partition size
    /// from one bucket.
    fn scan(&self, config: &PlannerConfig, alpha: f64, cap: usize) -> Result<Step, Error> {
        let mut trial = 1.0;
        let mut doublings = 0;
        while trial <= self.total_buckets {
            if doublings > cap {
                return Err(Error::not_converged("bucket doublings", cap)
                    .with_context("total_buckets", self.total_buckets));
            }
            // trial <= total_buckets keeps bins >= 1, inside the estimator's domain
            let bins = self.total_buckets / trial;
            let load = estimate_with_confidence(self.remaining_keys, bins, alpha)?;
            if load <= config.safe_load(trial) {
                return Ok(Step::Commit { trial, bins });
            }
            trial *= 2.0;
            doublings += 1;
        }
        Ok(Step::Fallback)
    }

    fn commit(&mut self, trial: f64, bins: f64) {
        self.remaining_keys /= bins;
        self.cumulative_chunks *= bins;
        self.total_buckets = trial;
    }

    fn finish(self) -> Result<PartitionPlan, Error> {
        let chunks = self.cumulative_chunks.ceil();
        if chunks > u64::MAX as f64 {
            return Err(Error::invalid_argument("chunk count overflows u64")
                .with_context("chunks", chunks));
        }
        let buckets_per_chunk = power_of_two_ceil(self.total_buckets.ceil().max(1.0))?;
        PartitionPlan::new((chunks as u64).max(1), buckets_per_chunk)
    }
}

/// Upper bound on both the commit rounds and the doublings inside one round, given the initial
/// bucket budget.
///
/// Every commit that continues the search at least halves the budget, and a scan never passes
/// it, so `log2(buckets)` plus slack bounds both loops.
fn iteration_cap(buckets: f64) -> usize {
    buckets.max(2.0).log2().ceil() as usize + 2
}

impl PartitionPlanner {
    /// Returns the configuration this planner sizes with.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans a layout for `keys` items with tail-bound multiplier `alpha`.
    ///
    /// Each round looks for the coarsest split of the remaining bucket budget into
    /// `bins` groups of `trial` buckets such that the estimated worst group load stays within
    /// the safe fraction of `trial` buckets. A committed split multiplies the chunk count by
    /// `bins` and recurses into one group. The search stops once a round commits fewer than two
    /// groups, or when no split fits, in which case the remaining budget becomes one chunk.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `keys` is not positive or `alpha` is negative, and
    /// `PlannerDidNotConverge` if the iteration cap is exceeded.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cuckoo_sizing::planner::PartitionPlanner;
    /// let plan = PartitionPlanner::default().plan(1_048_576.0, 1.0).unwrap();
    /// assert_eq!(plan.chunks(), 68);
    /// assert_eq!(plan.buckets_per_chunk(), 4096);
    /// ```
    pub fn plan(&self, keys: f64, alpha: f64) -> Result<PartitionPlan, Error> {
        let keys = Error::require_positive("keys", keys)?;
        let alpha = Error::require_non_negative("alpha", alpha)?;

        let mut state = SearchState::new(keys, &self.config);
        let cap = iteration_cap(state.total_buckets);
        for round in 0..cap {
            match state.scan(&self.config, alpha, cap)? {
                Step::Commit { trial, bins } => {
                    state.commit(trial, bins);
                    trace!(
                        round,
                        trial,
                        bins,
                        remaining_keys = state.remaining_keys,
                        cumulative_chunks = state.cumulative_chunks,
                        "committed split"
                    );
                    if bins < 2.0 {
                        return self.finish(keys, alpha, state);
                    }
                }
                Step::Fallback => {
                    trace!(
                        round,
                        total_buckets = state.total_buckets,
                        "no feasible split, keeping the budget as one partition"
                    );
                    return self.finish(keys, alpha, state);
                }
            }
        }
        Err(Error::not_converged("commit rounds", cap).with_context("keys", keys))
    }

    /// Plans a layout using the multiplier `policy` assigns to `keys`.
    pub fn plan_with_policy(
        &self,
        keys: f64,
        policy: &ConfidencePolicy,
    ) -> Result<PartitionPlan, Error> {
        policy.validate()?;
        self.plan(keys, policy.alpha_for(keys))
    }

    fn finish(&self, keys: f64, alpha: f64, state: SearchState) -> Result<PartitionPlan, Error> {
        let plan = state.finish()?;
        debug!(
            keys,
            alpha,
            chunks = plan.chunks(),
            buckets_per_chunk = plan.buckets_per_chunk(),
            "planned partition layout"
        );
        Ok(plan)
    }
}
