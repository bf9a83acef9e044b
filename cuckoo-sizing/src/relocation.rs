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

//! Relocation chain budgets.
//!
//! An insertion into a full bucket evicts a resident tag and moves it to its alternate bucket,
//! possibly evicting again. For a chunked layout the chain length grows with the number of
//! chunks and with the depth of a `associativity`-ary tree over the buckets of one chunk, so
//! the budget is
//!
//! ```text
//! ceil(2 * A * ln(chunks) * ln((A - 1) * buckets_per_chunk + 1) / ln(A))
//! ```
//!
//! The budget is a diagnostic: chain lengths measured on a real filter are compared against it.
//! A single chunk yields a budget of zero.

use tracing::debug;

use crate::common::tree_log;
use crate::error::Error;
use crate::planner::DEFAULT_ASSOCIATIVITY;
use crate::planner::PartitionPlan;
use crate::planner::PartitionPlanner;

/// Upper bound on relocation chain length for one layout.
///
/// # Examples
///
/// ```
/// # use cuckoo_sizing::planner::PartitionPlan;
/// # use cuckoo_sizing::relocation::RelocationBudget;
/// let plan = PartitionPlan::new(68, 4096).unwrap();
/// let budget = RelocationBudget::for_plan(&plan, 4).unwrap();
/// assert_eq!(budget.threshold(), 230);
/// assert_eq!(budget.count_exceeded(&[79, 231, 230, 402]), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelocationBudget {
    threshold: u64,
}

impl RelocationBudget {
    /// Computes the budget for `plan` in a table with `associativity` slots per bucket.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `associativity` is less than 2.
    pub fn for_plan(plan: &PartitionPlan, associativity: u32) -> Result<Self, Error> {
        let threshold =
            threshold_with(plan.chunks(), plan.buckets_per_chunk(), associativity)?;
        Ok(RelocationBudget { threshold })
    }

    /// Maximum chain length tolerated.
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Returns true if a chain of `chain_length` relocations exceeds the budget.
    pub fn exceeds(&self, chain_length: u64) -> bool {
        chain_length > self.threshold
    }

    /// Counts the measured chain lengths that exceed the budget.
    pub fn count_exceeded(&self, chain_lengths: &[u64]) -> usize {
        chain_lengths.iter().filter(|&&len| self.exceeds(len)).count()
    }
}

/// Computes the relocation threshold of a 4-way layout of `chunks` chunks.
///
/// # Errors
///
/// Returns `InvalidArgument` if either argument is zero.
///
/// # Examples
///
/// ```
/// # use cuckoo_sizing::relocation::threshold;
/// assert_eq!(threshold(68, 4096).unwrap(), 230);
/// assert_eq!(threshold(1, 4096).unwrap(), 0);
/// assert!(threshold(0, 4096).is_err());
/// ```
pub fn threshold(chunks: u64, buckets_per_chunk: u64) -> Result<u64, Error> {
    threshold_with(chunks, buckets_per_chunk, DEFAULT_ASSOCIATIVITY)
}

fn threshold_with(chunks: u64, buckets_per_chunk: u64, associativity: u32) -> Result<u64, Error> {
    if chunks == 0 || buckets_per_chunk == 0 {
        return Err(Error::invalid_argument("layout fields must be positive")
            .with_context("chunks", chunks)
            .with_context("buckets_per_chunk", buckets_per_chunk));
    }
    if associativity < 2 {
        return Err(Error::invalid_argument("associativity must be at least 2")
            .with_context("associativity", associativity));
    }

    let a = f64::from(associativity);
    let depth = tree_log(buckets_per_chunk as f64, associativity);
    let threshold = (2.0 * a * (chunks as f64).ln() * depth).ceil() as u64;
    debug!(chunks, buckets_per_chunk, associativity, threshold, "relocation threshold");
    Ok(threshold)
}

impl PartitionPlanner {
    /// Computes the relocation budget of `plan` with this planner's associativity.
    pub fn relocation_budget(&self, plan: &PartitionPlan) -> Result<RelocationBudget, Error> {
        RelocationBudget::for_plan(plan, self.config().associativity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_known_thresholds() {
        assert_eq!(threshold(68, 4096).unwrap(), 230);
        assert_eq!(threshold(1078, 4096).unwrap(), 380);
        assert_eq!(threshold(34, 8192).unwrap(), 206);
    }

    #[test]
    fn test_single_chunk_has_no_budget() {
        assert_eq!(threshold(1, 1).unwrap(), 0);
        assert_eq!(threshold(1, 1 << 20).unwrap(), 0);
    }

    #[test]
    fn test_invalid_layouts() {
        assert_eq!(
            threshold(0, 1).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            threshold(1, 0).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert!(threshold_with(2, 2, 1).is_err());
    }

    #[test]
    fn test_planner_budget_uses_configured_associativity() {
        let plan = PartitionPlan::new(68, 4096).unwrap();
        let budget = PartitionPlanner::default().relocation_budget(&plan).unwrap();
        assert_eq!(budget.threshold(), 230);
        assert!(budget.exceeds(231));
        assert!(!budget.exceeds(230));
    }
}
