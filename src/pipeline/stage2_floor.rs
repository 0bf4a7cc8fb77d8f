use crate::model::policy::{FloorSplit, ShapingPolicy};
use crate::model::score::{AXIS_MAX_TENTHS, ScorePair, TOTAL_MAX_TENTHS};
use crate::pipeline::ShapeContext;

/// Raises the total of a substantial input to the policy floor. A no-op at or
/// above the floor, so running it twice changes nothing.
pub fn run_floor_bump(pair: ScorePair, ctx: &ShapeContext<'_>) -> ScorePair {
    if !ctx.substantial {
        return pair;
    }
    let floor = ctx.policy.floor_tenths().min(TOTAL_MAX_TENTHS);
    let total = pair.total_tenths();
    if total >= floor {
        return pair;
    }

    let deficit = floor - total;
    let (want_nat, want_cre) = split_deficit(pair, deficit, ctx.policy.floor_split);

    let room_nat = AXIS_MAX_TENTHS - pair.nat_tenths();
    let room_cre = AXIS_MAX_TENTHS - pair.cre_tenths();
    let mut add_nat = want_nat.min(room_nat);
    let mut add_cre = want_cre.min(room_cre);

    // whatever one axis cannot hold goes to the other
    let spill = deficit - add_nat - add_cre;
    if spill > 0 {
        let to_nat = spill.min(room_nat - add_nat);
        add_nat += to_nat;
        add_cre += (spill - to_nat).min(room_cre - add_cre);
    }

    ScorePair::from_tenths(pair.nat_tenths() + add_nat, pair.cre_tenths() + add_cre)
}

fn split_deficit(pair: ScorePair, deficit: i32, split: FloorSplit) -> (i32, i32) {
    let total = pair.total_tenths();
    match split {
        FloorSplit::Proportional if total > 0 => {
            let nat = (deficit as i64 * pair.nat_tenths() as i64 + total as i64 / 2) / total as i64;
            let nat = nat as i32;
            (nat, deficit - nat)
        }
        _ => {
            let nat = deficit / 2;
            (nat, deficit - nat)
        }
    }
}

/// Terminal path for unreadable input: both axes pinned into the low band.
pub fn run_uninterpretable(pair: ScorePair, policy: &ShapingPolicy) -> ScorePair {
    pair.capped(policy.uninterpretable_axis_tenths())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_floor.rs"]
mod tests;
