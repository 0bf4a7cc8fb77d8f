use crate::model::score::ScorePair;
use crate::pipeline::ShapeContext;
use crate::pipeline::stage4_dequantize::signed_shifts;
use crate::random::RandomSource;

/// Nudges nat so the total does not sit on a multiple of 5.0. Gives up and
/// keeps the pair when no nudge qualifies.
pub fn run_decluster(
    pair: ScorePair,
    ctx: &ShapeContext<'_>,
    rng: &mut dyn RandomSource,
) -> ScorePair {
    if !pair.total_on_five_step() {
        return pair;
    }
    // substantial input must not fall back under the floor
    let min_total = if ctx.substantial {
        ctx.policy.floor_tenths().min(pair.total_tenths())
    } else {
        0
    };

    signed_shifts(rng)
        .into_iter()
        .filter_map(|delta| pair.shift_nat(delta))
        .find(|candidate| {
            !candidate.is_doubly_quantized()
                && !candidate.total_on_five_step()
                && candidate.total_tenths() >= min_total
        })
        .unwrap_or(pair)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_decluster.rs"]
mod tests;
