use serde::Serialize;

use crate::model::policy::TierBand;
use crate::pipeline::stage6_tier::TierOutcome;
use crate::pipeline::{ShapeInputs, ShapeOutput, ShapePath, run_shaping};
use crate::random::RandomSource;

pub mod json;
pub mod text;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TierHits {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Distribution of final totals over repeated runs of the same input.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SimulationSummary {
    pub trials: usize,
    pub mean: f64,
    pub median: f64,
    pub p10: f64,
    pub p90: f64,
    pub p99: f64,
    pub min: f64,
    pub max: f64,
    /// Totals that land on a multiple of 5.
    pub five_step_fraction: f64,
    pub above_50_fraction: f64,
    pub tier_hits: Vec<TierHits>,
    pub capped: usize,
    pub uninterpretable: usize,
}

pub fn simulate(
    inputs: &ShapeInputs<'_>,
    trials: usize,
    rng: &mut dyn RandomSource,
) -> SimulationSummary {
    let outputs: Vec<ShapeOutput> = (0..trials).map(|_| run_shaping(inputs, rng)).collect();
    summarize(&outputs, &inputs.policy.tiers)
}

pub fn summarize(outputs: &[ShapeOutput], tiers: &[TierBand]) -> SimulationSummary {
    let totals: Vec<f64> = outputs.iter().map(|o| o.pair.total()).collect();
    let mut tier_hits: Vec<TierHits> = tiers
        .iter()
        .map(|band| TierHits {
            lo: band.lo,
            hi: band.hi,
            count: 0,
        })
        .collect();
    let mut capped = 0usize;
    let mut uninterpretable = 0usize;

    for out in outputs {
        if out.trace.path == ShapePath::Uninterpretable {
            uninterpretable += 1;
        }
        match out.trace.tier {
            Some(TierOutcome::Hit { band, .. }) => {
                if let Some(hits) = tier_hits.get_mut(band) {
                    hits.count += 1;
                }
            }
            Some(TierOutcome::Capped) => capped += 1,
            _ => {}
        }
    }

    SimulationSummary {
        trials: outputs.len(),
        mean: mean(&totals),
        median: median(&totals),
        p10: p10(&totals),
        p90: p90(&totals),
        p99: p99(&totals),
        min: totals.iter().copied().reduce(f64::min).unwrap_or(0.0),
        max: totals.iter().copied().reduce(f64::max).unwrap_or(0.0),
        five_step_fraction: bool_fraction(
            &outputs.iter().map(|o| o.pair.total_on_five_step()).collect::<Vec<_>>(),
        ),
        above_50_fraction: bool_fraction(&totals.iter().map(|t| *t > 50.0).collect::<Vec<_>>()),
        tier_hits,
        capped,
        uninterpretable,
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx.min(n - 1)]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p10(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.10)
}

pub fn p90(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.90)
}

pub fn p99(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.99)
}

pub fn bool_fraction(values: &[bool]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().filter(|v| **v).count() as f64 / values.len() as f64
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
