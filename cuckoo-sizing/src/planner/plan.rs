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

use std::fmt;

use super::PartitionPlanner;
use crate::common::binomial_probability;
use crate::error::Error;

/// Layout chosen by the partition search: `chunks` independent sub-filters of
/// `buckets_per_chunk` buckets each.
///
/// `buckets_per_chunk` is always a power of two so that alternate bucket indexes can be derived
/// with a mask inside a chunk. `chunks` is the product of every committed split and is in
/// general not a power of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartitionPlan {
    chunks: u64,
    buckets_per_chunk: u64,
}

impl PartitionPlan {
    /// Creates a plan from a known layout, for example one read back from an existing filter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `chunks` is zero or `buckets_per_chunk` is not a power of
    /// two.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cuckoo_sizing::planner::PartitionPlan;
    /// let plan = PartitionPlan::new(68, 4096).unwrap();
    /// assert_eq!(plan.total_buckets(), 278_528);
    /// assert!(PartitionPlan::new(68, 4000).is_err());
    /// ```
    pub fn new(chunks: u64, buckets_per_chunk: u64) -> Result<Self, Error> {
        if chunks == 0 {
            return Err(Error::invalid_argument("chunks must be at least 1")
                .with_context("chunks", chunks));
        }
        if !buckets_per_chunk.is_power_of_two() {
            return Err(
                Error::invalid_argument("buckets_per_chunk must be a power of two")
                    .with_context("buckets_per_chunk", buckets_per_chunk),
            );
        }
        Ok(PartitionPlan {
            chunks,
            buckets_per_chunk,
        })
    }

    /// Number of sub-filters.
    pub fn chunks(&self) -> u64 {
        self.chunks
    }

    /// Buckets in each sub-filter, a power of two.
    pub fn buckets_per_chunk(&self) -> u64 {
        self.buckets_per_chunk
    }

    /// Buckets across all sub-filters, saturating at `u64::MAX`.
    pub fn total_buckets(&self) -> u64 {
        self.chunks.saturating_mul(self.buckets_per_chunk)
    }

    /// Slots across all sub-filters, saturating at `u64::MAX`.
    ///
    /// `associativity` must be the one the plan was sized with; prefer
    /// [`PartitionPlanner::total_slots`], which takes it from the planner's configuration.
    pub fn total_slots(&self, associativity: u32) -> u64 {
        self.total_buckets().saturating_mul(u64::from(associativity))
    }

    /// Fraction of slots occupied once `keys` items are stored.
    pub fn load_factor(&self, keys: f64, associativity: u32) -> f64 {
        keys / self.total_slots(associativity) as f64
    }

    /// Table bits spent per stored item when each slot holds a `fingerprint_bits` tag.
    ///
    /// Returns infinity for `keys == 0`.
    pub fn bits_per_item(&self, fingerprint_bits: u32, keys: f64, associativity: u32) -> f64 {
        self.total_slots(associativity) as f64 * f64::from(fingerprint_bits) / keys
    }

    /// Probability that exactly `hits` of `lookups` uniformly hashed probes land in one given
    /// chunk.
    ///
    /// Batched operations that touch several items benefit when they fall into the same chunk;
    /// this is the distribution of that overlap.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `hits > lookups`.
    pub fn chunk_hit_probability(&self, hits: u32, lookups: u32) -> Result<f64, Error> {
        binomial_probability(hits, lookups, 1.0 / self.chunks as f64)
    }
}

impl PartitionPlanner {
    /// Slots across all sub-filters of `plan`, with this planner's associativity.
    pub fn total_slots(&self, plan: &PartitionPlan) -> u64 {
        plan.total_slots(self.config.associativity)
    }

    /// Fraction of the slots of `plan` occupied once `keys` items are stored.
    pub fn load_factor(&self, plan: &PartitionPlan, keys: f64) -> f64 {
        plan.load_factor(keys, self.config.associativity)
    }

    /// Table bits spent per stored item in `plan` with `fingerprint_bits` tags.
    pub fn bits_per_item(&self, plan: &PartitionPlan, fingerprint_bits: u32, keys: f64) -> f64 {
        plan.bits_per_item(fingerprint_bits, keys, self.config.associativity)
    }
}

impl fmt::Display for PartitionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.chunks, self.buckets_per_chunk)
    }
}
