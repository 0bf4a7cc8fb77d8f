use serde::Serialize;

use crate::model::policy::TierBand;
use crate::model::score::{AXIS_MAX_TENTHS, ScorePair, TOTAL_MAX_TENTHS, round1_tenths};
use crate::pipeline::ShapeContext;
use crate::pipeline::stage4_dequantize::signed_shifts;
use crate::random::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TierOutcome {
    /// The draw landed in a band and the total was replaced.
    Hit { band: usize, lo: f64, hi: f64 },
    /// Total rescaled down to the cap.
    Capped,
    Untouched,
}

/// Lucky gate. Eligible passages get a small chance at a high band; everything
/// else is held under the cap.
pub fn run_tier(
    pair: ScorePair,
    ctx: &ShapeContext<'_>,
    rng: &mut dyn RandomSource,
) -> (ScorePair, TierOutcome) {
    if ctx.passes_gate {
        if let Some((idx, band)) = draw_band(&ctx.policy.tiers, rng) {
            let out = override_into_band(band, rng);
            return (
                out,
                TierOutcome::Hit {
                    band: idx,
                    lo: band.lo,
                    hi: band.hi,
                },
            );
        }
    }
    cap_total(pair, ctx.policy.cap_tenths())
}

/// Cumulative walk over the bands, rarest first.
fn draw_band<'a>(
    tiers: &'a [TierBand],
    rng: &mut dyn RandomSource,
) -> Option<(usize, &'a TierBand)> {
    let r = rng.next_unit();
    let mut acc = 0.0;
    for (idx, band) in tiers.iter().enumerate() {
        acc += band.probability.max(0.0);
        if r < acc {
            return Some((idx, band));
        }
    }
    None
}

/// Target drawn on the open band, then split into a feasible nat/cre pair.
/// The result is kept off multiples of 5.0 and off doubly quantized splits,
/// since no later stage cleans those up.
pub fn override_into_band(band: &TierBand, rng: &mut dyn RandomSource) -> ScorePair {
    let lo = (round1_tenths(band.lo) + 1).clamp(0, TOTAL_MAX_TENTHS);
    let hi = (round1_tenths(band.hi) - 1).clamp(lo, TOTAL_MAX_TENTHS);
    let target = off_five_step(rng.int_inclusive(lo, hi), lo, hi);

    let nat_lo = (target - AXIS_MAX_TENTHS).max(0);
    let nat_hi = target.min(AXIS_MAX_TENTHS);
    let nat = rng.int_inclusive(nat_lo, nat_hi);
    let mut pair = ScorePair::from_tenths(nat, target - nat);
    if pair.is_doubly_quantized() {
        pair = signed_shifts(rng)
            .into_iter()
            .filter_map(|delta| pair.transfer(delta))
            .find(|candidate| !candidate.is_doubly_quantized())
            .unwrap_or(pair);
    }
    debug_assert_eq!(pair.total_tenths(), target);
    pair
}

/// Steps a target sitting on a multiple of 5.0 to a neighbour inside `lo..=hi`.
fn off_five_step(target: i32, lo: i32, hi: i32) -> i32 {
    if target % 50 != 0 {
        target
    } else if target < hi {
        target + 1
    } else if target > lo {
        target - 1
    } else {
        target
    }
}

/// Proportional rescale so the total equals `cap_tenths`; untouched at or
/// below the cap.
pub fn cap_total(pair: ScorePair, cap_tenths: i32) -> (ScorePair, TierOutcome) {
    let total = pair.total_tenths();
    if total <= cap_tenths {
        return (pair, TierOutcome::Untouched);
    }
    let cap = cap_tenths.max(0) as i64;
    let scaled_nat = (pair.nat_tenths() as i64 * cap + total as i64 / 2) / total as i64;
    let cre = (cap - scaled_nat).min(AXIS_MAX_TENTHS as i64) as i32;
    let nat = cap as i32 - cre;
    (ScorePair::from_tenths(nat, cre), TierOutcome::Capped)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_tier.rs"]
mod tests;
