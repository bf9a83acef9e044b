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

//! Partition planning for chunked cuckoo filters.
//!
//! A cuckoo filter of `m` buckets needs every bucket count to be a power of two for its
//! alternate-index mask, which wastes up to half of the table when `n / (4 * 0.95)` lands just
//! above a power of two. Splitting the table into independent chunks of a power-of-two size
//! removes that constraint on the total, at the price of uneven chunk loads: some chunk will
//! receive more than its share of keys. The planner sizes chunks so that the most loaded one,
//! estimated with a balls-into-bins tail bound, still fits in 96% of its slots.
//!
//! # Usage
//!
//! ```rust
//! use cuckoo_sizing::planner::PartitionPlanner;
//! use cuckoo_sizing::planner::PlannerBuilder;
//!
//! // Defaults: 4 slots per bucket, 95% target load, 96% usable under the bound
//! let planner = PartitionPlanner::default();
//! let plan = planner.plan(1_048_576.0, 1.0).unwrap();
//! assert_eq!((plan.chunks(), plan.buckets_per_chunk()), (68, 4096));
//!
//! // A more conservative margin yields fewer, larger chunks
//! let wide = planner.plan(1_048_576.0, 1.5).unwrap();
//! assert!(wide.buckets_per_chunk() > plan.buckets_per_chunk());
//!
//! // Other table shapes go through the builder
//! let planner = PlannerBuilder::new().associativity(8).build().unwrap();
//! let plan = planner.plan(1_048_576.0, 1.0).unwrap();
//! assert!(plan.buckets_per_chunk().is_power_of_two());
//! ```
//!
//! # Search
//!
//! The search keeps three numbers: the keys left to place, the bucket budget left to split and
//! the chunk count committed so far. Each round doubles a candidate partition size from one
//! bucket and commits the first size whose worst-case load fits; see
//! [`PartitionPlanner::plan`]. Both loops are capped at `log2(buckets) + 2` iterations, where
//! `buckets` is the initial bucket budget.

mod builder;
mod config;
mod plan;
mod search;

pub use self::builder::PlannerBuilder;
pub use self::config::DEFAULT_ASSOCIATIVITY;
pub use self::config::DEFAULT_BASELINE_CONFIDENCE;
pub use self::config::DEFAULT_MIN_SEGMENT_BUCKETS;
pub use self::config::DEFAULT_OVERFLOW_CAPACITY_RATIO;
pub use self::config::DEFAULT_TARGET_LOAD_FACTOR;
pub use self::config::PlannerConfig;
pub use self::plan::PartitionPlan;
pub use self::search::PartitionPlanner;
