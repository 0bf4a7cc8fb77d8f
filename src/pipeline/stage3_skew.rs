use crate::model::score::{AXIS_MAX_TENTHS, ScorePair};
use crate::pipeline::ShapeContext;
use crate::random::RandomSource;

/// Occasionally moves points between the axes so equal totals do not always
/// split the same way. The total never changes.
pub fn run_skew(pair: ScorePair, ctx: &ShapeContext<'_>, rng: &mut dyn RandomSource) -> ScorePair {
    if !rng.chance(ctx.policy.skew_probability) {
        return pair;
    }
    let raise_nat = rng.chance(0.5);
    let (lo, hi) = ctx.policy.skew_range_tenths();

    let feasible = if raise_nat {
        (AXIS_MAX_TENTHS - pair.nat_tenths()).min(pair.cre_tenths())
    } else {
        (AXIS_MAX_TENTHS - pair.cre_tenths()).min(pair.nat_tenths())
    };
    if feasible < lo {
        return pair;
    }

    let delta = rng.int_inclusive(lo, hi.min(feasible));
    let signed = if raise_nat { delta } else { -delta };
    pair.transfer(signed).unwrap_or(pair)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_skew.rs"]
mod tests;
