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

//! # Capacity planning for chunked cuckoo filters
//!
//! A cuckoo filter stores fingerprints in buckets of a few slots and needs a power-of-two bucket
//! count. This crate sizes a *chunked* filter instead: `chunks` independent sub-filters of a
//! power-of-two bucket count each, chosen so that the most loaded chunk still fits in a safe
//! fraction of its slots according to a balls-into-bins tail bound.
//!
//! The crate is a pure computational library. It is divided into:
//!
//! - [`planner`]: the partition search and its configuration
//! - [`tailbound`]: maximum-load estimates for uniformly thrown items
//! - [`relocation`]: eviction chain budgets derived from a layout
//! - [`baseline`]: non-chunked reference sizers
//! - [`sweep`]: batch evaluation over key count ranges
//! - [`common`]: shared numeric helpers and confidence policies
//!
//! # Usage
//!
//! ```rust
//! use cuckoo_sizing::baseline::BaselineVariant;
//!
//! let plan = cuckoo_sizing::plan(1_048_576.0, 1.0).unwrap();
//! assert_eq!(plan.chunks(), 68);
//! assert_eq!(plan.buckets_per_chunk(), 4096);
//!
//! let threshold = cuckoo_sizing::relocation_threshold(&plan).unwrap();
//! assert_eq!(threshold, 230);
//!
//! let fixed = cuckoo_sizing::baseline_size(1_048_576.0, BaselineVariant::Fixed).unwrap();
//! assert!(plan.total_buckets() < fixed);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod baseline;
pub mod common;
pub mod error;
pub mod planner;
pub mod relocation;
pub mod sweep;
pub mod tailbound;

use crate::baseline::BaselineVariant;
use crate::error::Error;
use crate::planner::PartitionPlan;
use crate::planner::PartitionPlanner;

/// Plans a layout for `keys` items with the default configuration.
///
/// See [`PartitionPlanner::plan`].
pub fn plan(keys: f64, alpha: f64) -> Result<PartitionPlan, Error> {
    PartitionPlanner::default().plan(keys, alpha)
}

/// Computes the relocation threshold of `plan` for a 4-way table.
pub fn relocation_threshold(plan: &PartitionPlan) -> Result<u64, Error> {
    relocation::threshold(plan.chunks(), plan.buckets_per_chunk())
}

/// Sizes a reference design for `keys` items with the default configuration, in buckets.
pub fn baseline_size(keys: f64, variant: BaselineVariant) -> Result<u64, Error> {
    PartitionPlanner::default().baseline_size(keys, variant)
}
