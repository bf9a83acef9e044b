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
use cuckoo_sizing::planner::PartitionPlanner;
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=cuckoo_sizing=trace shows every committed split
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let planner = PartitionPlanner::default();
    let policy = ConfidencePolicy::paper();

    println!("Planning chunked layouts from 2^19 to 2^26 keys");
    println!(
        "{:>6} {:>6} {:>8} {:>8} {:>10} {:>10} {:>10}",
        "keys", "alpha", "chunks", "buckets", "threshold", "fixed", "segmented"
    );

    let keys = (19..=26).map(|exp| f64::from(1u32 << exp));
    for point in planner.sweep(keys, &policy) {
        let (plan, budget) = match point.outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                println!("2^{:<4} failed: {err}", point.keys.log2());
                continue;
            }
        };
        let fixed = planner
            .baseline_size(point.keys, BaselineVariant::Fixed)
            .unwrap();
        let segmented = planner
            .baseline_size(point.keys, BaselineVariant::VariableSegment)
            .unwrap();
        println!(
            "2^{:<4} {:>6} {:>8} {:>8} {:>10} {:>10} {:>10}",
            point.keys.log2(),
            point.alpha,
            plan.chunks(),
            plan.buckets_per_chunk(),
            budget.threshold(),
            fixed,
            segmented,
        );
    }

    let cmp = planner
        .compare_space(1_048_576.0, &ConfidencePolicy::default())
        .unwrap();
    println!(
        "\nAt 2^20 keys the chunked layout uses {:.1}% of the fixed table, {:.2}% above ideal",
        cmp.planner_to_fixed_ratio() * 100.0,
        cmp.planner_overhead() * 100.0
    );
}
