use serde_json::Value;

use crate::model::policy::ShapingPolicy;
use crate::model::score::{AXIS_MAX_TENTHS, ScorePair, round1_tenths};

/// Numeric reading of an untrusted JSON value. Anything that is not a finite
/// number (or a string holding one) reads as 0.
pub fn coerce_number(value: &Value) -> f64 {
    let x = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if x.is_finite() { x } else { 0.0 }
}

pub fn normalize_axis(value: &Value, policy: &ShapingPolicy) -> i32 {
    let scaled = coerce_number(value) * policy.raw_scale();
    round1_tenths(scaled.clamp(0.0, 50.0)).min(AXIS_MAX_TENTHS)
}

pub fn run_stage1(nat: &Value, cre: &Value, policy: &ShapingPolicy) -> ScorePair {
    ScorePair::from_tenths(normalize_axis(nat, policy), normalize_axis(cre, policy))
}

/// Re-normalizes a pair from its float view; a no-op on any valid pair.
pub fn renormalize(pair: ScorePair) -> ScorePair {
    ScorePair::from_values(pair.nat().clamp(0.0, 50.0), pair.cre().clamp(0.0, 50.0))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_normalize.rs"]
mod tests;
