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

use cuckoo_sizing::baseline::BaselineVariant;
use cuckoo_sizing::common::ConfidencePolicy;
use cuckoo_sizing::error::ErrorKind;
use cuckoo_sizing::planner::PartitionPlan;
use cuckoo_sizing::planner::PartitionPlanner;
use cuckoo_sizing::planner::PlannerBuilder;
use googletest::assert_that;
use googletest::prelude::ge;
use googletest::prelude::le;
use insta::assert_snapshot;

const ASSOCIATIVITY: u64 = 4;
const LOAD_FACTOR: f64 = 0.95;

fn layout(plan: &PartitionPlan) -> (u64, u64) {
    (plan.chunks(), plan.buckets_per_chunk())
}

#[test]
fn test_golden_layouts() {
    let plan = cuckoo_sizing::plan(f64::from(1u32 << 20), 1.0).unwrap();
    assert_eq!(layout(&plan), (68, 4096));

    let plan = cuckoo_sizing::plan(f64::from(1u32 << 20), 1.5).unwrap();
    assert_eq!(layout(&plan), (34, 8192));

    let plan = cuckoo_sizing::plan(f64::from(1u32 << 24), 1.0).unwrap();
    assert_eq!(layout(&plan), (1078, 4096));
}

#[test]
fn test_small_key_counts_degenerate_to_one_chunk() {
    let planner = PartitionPlanner::default();
    assert_eq!(layout(&planner.plan(1.0, 1.0).unwrap()), (1, 1));
    assert_eq!(layout(&planner.plan(0.001, 1.0).unwrap()), (1, 1));
    assert_eq!(layout(&planner.plan(3.0, 1.0).unwrap()), (1, 1));
    assert_eq!(layout(&planner.plan(5.0, 1.0).unwrap()), (1, 2));
    assert_eq!(layout(&planner.plan(100.0, 1.0).unwrap()), (1, 32));
}

#[test]
fn test_small_tables_split_once() {
    for exp in 10..=14 {
        let keys = f64::from(1u32 << exp);
        let plan = cuckoo_sizing::plan(keys, 1.0).unwrap();
        assert_eq!(plan.chunks(), 2, "keys = 2^{exp}");
        assert_eq!(plan.buckets_per_chunk(), 1 << (exp - 2), "keys = 2^{exp}");
    }
}

#[test]
fn test_capacity_covers_target_load() {
    let planner = PartitionPlanner::default();
    for keys in (1..3000).chain((3000..5_000_000).step_by(4099)) {
        let keys = f64::from(keys);
        let plan = planner.plan(keys, 1.0).unwrap();
        let slots = (plan.total_buckets() * ASSOCIATIVITY) as f64;
        assert!(slots >= keys / LOAD_FACTOR, "keys = {keys}, plan = {plan}");
    }
}

#[test]
fn test_total_buckets_monotone_in_keys() {
    for alpha in [0.0, 1.0, 1.5] {
        let mut previous = 0;
        for keys in (1..200_000).step_by(7) {
            let plan = cuckoo_sizing::plan(f64::from(keys), alpha).unwrap();
            assert_that!(plan.total_buckets(), ge(previous));
            previous = plan.total_buckets();
        }
    }
}

#[test]
fn test_chunked_layout_never_larger_than_fixed_table() {
    for exp in 16..=26 {
        let keys = f64::from(1u32 << exp);
        let plan = cuckoo_sizing::plan(keys, 1.0).unwrap();
        let fixed = cuckoo_sizing::baseline_size(keys, BaselineVariant::Fixed).unwrap();
        assert_that!(plan.total_slots(4), le(fixed * ASSOCIATIVITY));
    }

    let keys = f64::from(1u32 << 24);
    let plan = cuckoo_sizing::plan(keys, 1.0).unwrap();
    let fixed = cuckoo_sizing::baseline_size(keys, BaselineVariant::Fixed).unwrap();
    assert_eq!(fixed, 1 << 23);
    assert!(plan.total_buckets() < fixed);
}

#[test]
fn test_larger_alpha_never_shrinks_chunks() {
    let planner = PartitionPlanner::default();
    for exp in 15..=27 {
        let keys = f64::from(1u32 << exp);
        let tight = planner.plan(keys, 1.0).unwrap();
        let wide = planner.plan(keys, 1.5).unwrap();
        assert_that!(wide.buckets_per_chunk(), ge(tight.buckets_per_chunk()));
    }
}

#[test]
fn test_paper_policy_sweep() {
    let keys = (19..=26).map(|exp| f64::from(1u32 << exp));
    let points = PartitionPlanner::default().sweep(keys, &ConfidencePolicy::paper());
    let rendered = points
        .iter()
        .map(|point| {
            let (plan, budget) = point.outcome.as_ref().unwrap();
            format!(
                "2^{} alpha={} {} threshold={}",
                point.keys.log2(),
                point.alpha,
                plan,
                budget.threshold()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    assert_snapshot!(rendered, @r"
    2^19 alpha=1 34 x 4096 threshold=192
    2^20 alpha=1 68 x 4096 threshold=230
    2^21 alpha=1 135 x 4096 threshold=267
    2^22 alpha=1 270 x 4096 threshold=305
    2^23 alpha=1.5 270 x 8192 threshold=327
    2^24 alpha=1.5 539 x 8192 threshold=367
    2^25 alpha=1.5 1078 x 8192 threshold=408
    2^26 alpha=1.5 2156 x 8192 threshold=448
    ");
}

#[test]
fn test_custom_configuration() {
    let planner = PlannerBuilder::new()
        .associativity(8)
        .target_load_factor(0.9)
        .build()
        .unwrap();
    let keys = 1_000_000.0;
    let plan = planner.plan(keys, 1.0).unwrap();
    assert!(plan.buckets_per_chunk().is_power_of_two());
    assert!(plan.total_slots(8) as f64 >= keys / 0.9);
}

#[test]
fn test_invalid_arguments() {
    assert_eq!(
        cuckoo_sizing::plan(0.0, 1.0).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(
        cuckoo_sizing::plan(1000.0, -1.0).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(
        cuckoo_sizing::plan(f64::INFINITY, 1.0).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    let policy = ConfidencePolicy::Fixed(-2.0);
    assert_eq!(
        PartitionPlanner::default()
            .plan_with_policy(1000.0, &policy)
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidArgument
    );
}
