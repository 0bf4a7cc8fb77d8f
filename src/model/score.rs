use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Upper bound of a single axis, in tenths.
pub const AXIS_MAX_TENTHS: i32 = 500;
/// Upper bound of the total, in tenths.
pub const TOTAL_MAX_TENTHS: i32 = 2 * AXIS_MAX_TENTHS;

/// Naturalness / creativity pair, stored as whole tenths so that every value
/// carries exactly one decimal digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScorePair {
    nat: i32,
    cre: i32,
}

impl ScorePair {
    pub fn from_tenths(nat: i32, cre: i32) -> Self {
        Self {
            nat: nat.clamp(0, AXIS_MAX_TENTHS),
            cre: cre.clamp(0, AXIS_MAX_TENTHS),
        }
    }

    pub fn from_values(nat: f64, cre: f64) -> Self {
        Self::from_tenths(round1_tenths(nat), round1_tenths(cre))
    }

    pub fn nat_tenths(&self) -> i32 {
        self.nat
    }

    pub fn cre_tenths(&self) -> i32 {
        self.cre
    }

    pub fn total_tenths(&self) -> i32 {
        self.nat + self.cre
    }

    pub fn nat(&self) -> f64 {
        tenths_to_f64(self.nat)
    }

    pub fn cre(&self) -> f64 {
        tenths_to_f64(self.cre)
    }

    pub fn total(&self) -> f64 {
        tenths_to_f64(self.total_tenths())
    }

    /// Both axes end in .0 or .5.
    pub fn is_doubly_quantized(&self) -> bool {
        is_round_tenth(self.nat) && is_round_tenth(self.cre)
    }

    pub fn total_on_five_step(&self) -> bool {
        self.total_tenths() % 50 == 0
    }

    /// Moves `delta` tenths from cre to nat. `None` when either axis would
    /// leave its range.
    pub fn transfer(&self, delta: i32) -> Option<Self> {
        let nat = self.nat + delta;
        let cre = self.cre - delta;
        if axis_in_range(nat) && axis_in_range(cre) {
            Some(Self { nat, cre })
        } else {
            None
        }
    }

    /// Shifts nat alone; the total moves with it.
    pub fn shift_nat(&self, delta: i32) -> Option<Self> {
        let nat = self.nat + delta;
        if axis_in_range(nat) {
            Some(Self { nat, cre: self.cre })
        } else {
            None
        }
    }

    pub fn capped(&self, axis_max_tenths: i32) -> Self {
        let cap = axis_max_tenths.clamp(0, AXIS_MAX_TENTHS);
        Self {
            nat: self.nat.min(cap),
            cre: self.cre.min(cap),
        }
    }
}

impl Serialize for ScorePair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ScorePair", 3)?;
        state.serialize_field("nat", &self.nat())?;
        state.serialize_field("cre", &self.cre())?;
        state.serialize_field("tot", &self.total())?;
        state.end()
    }
}

pub fn axis_in_range(tenths: i32) -> bool {
    (0..=AXIS_MAX_TENTHS).contains(&tenths)
}

pub fn is_round_tenth(tenths: i32) -> bool {
    tenths % 5 == 0
}

/// Round half-up at the tenths digit; negative and non-finite inputs map to 0.
pub fn round1_tenths(x: f64) -> i32 {
    if !x.is_finite() || x <= 0.0 {
        return 0;
    }
    let scaled = (x * 10.0).round();
    if scaled >= i32::MAX as f64 {
        i32::MAX
    } else {
        scaled as i32
    }
}

pub fn round1(x: f64) -> f64 {
    tenths_to_f64(round1_tenths(x))
}

pub fn tenths_to_f64(tenths: i32) -> f64 {
    tenths as f64 / 10.0
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/score.rs"]
mod tests;
