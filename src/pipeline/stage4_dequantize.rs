use crate::model::score::ScorePair;
use crate::random::{RandomSource, shuffle};

/// Candidate shifts in tenths, applied with either sign.
pub const SHIFT_STEPS: [i32; 4] = [1, 2, 3, 4];

pub fn signed_shifts(rng: &mut dyn RandomSource) -> Vec<i32> {
    let mut shifts = SHIFT_STEPS
        .iter()
        .flat_map(|&s| [s, -s])
        .collect::<Vec<_>>();
    shuffle(rng, &mut shifts);
    shifts
}

/// Breaks up pairs where both axes end in .0/.5 by trading a few tenths
/// between them. Sum preserving.
pub fn run_dequantize(pair: ScorePair, rng: &mut dyn RandomSource) -> ScorePair {
    if !pair.is_doubly_quantized() {
        return pair;
    }
    signed_shifts(rng)
        .into_iter()
        .filter_map(|delta| pair.transfer(delta))
        .find(|candidate| !candidate.is_doubly_quantized())
        .unwrap_or(pair)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_dequantize.rs"]
mod tests;
