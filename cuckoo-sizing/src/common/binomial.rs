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

use crate::error::Error;

/// Returns the probability that exactly `successes` of `trials` independent Bernoulli trials
/// succeed when each succeeds with probability `p`.
///
/// The coefficient is accumulated in log space so that large `trials` do not overflow.
///
/// # Errors
///
/// Returns `InvalidArgument` if `successes > trials` or `p` is not in `[0, 1]`.
///
/// # Examples
///
/// ```
/// # use cuckoo_sizing::common::binomial_probability;
/// let p = binomial_probability(1, 2, 0.5).unwrap();
/// assert!((p - 0.5).abs() < 1e-12);
/// ```
pub fn binomial_probability(successes: u32, trials: u32, p: f64) -> Result<f64, Error> {
    if successes > trials {
        return Err(Error::invalid_argument("successes must not exceed trials")
            .with_context("successes", successes)
            .with_context("trials", trials));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::invalid_argument("p must be in [0, 1]").with_context("p", p));
    }

    // Degenerate probabilities put all the mass on one outcome; handle them before taking logs.
    if p == 0.0 {
        return Ok(if successes == 0 { 1.0 } else { 0.0 });
    }
    if p == 1.0 {
        return Ok(if successes == trials { 1.0 } else { 0.0 });
    }

    let k = successes.min(trials - successes);
    let ln_choose: f64 = (0..k)
        .map(|i| f64::from(trials - i).ln() - f64::from(i + 1).ln())
        .sum();
    let failures = trials - successes;
    let ln_pmf = ln_choose + f64::from(successes) * p.ln() + f64::from(failures) * (-p).ln_1p();
    Ok(ln_pmf.exp())
}
