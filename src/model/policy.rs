use serde::{Deserialize, Serialize};

use crate::model::score::round1_tenths;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShapingPolicy {
    /// Upper bound of the scale the LLM answers on (50 or 100).
    pub raw_axis_max: f64,

    pub substantial_min_chars: usize,
    pub floor_total: f64,
    pub floor_split: FloorSplit,

    pub llm_flag_trust_max_chars: usize,
    pub repeat_dominance_ratio: f64,
    pub uninterpretable_axis_max: f64,

    pub skew_probability: f64,
    pub skew_min: f64,
    pub skew_max: f64,

    pub gate_min_chars: usize,
    pub gate_min_script_chars: usize,
    pub gate_requires_terminal_punct: bool,
    /// Rarest band first.
    pub tiers: Vec<TierBand>,
    pub cap_total: f64,

    pub harsh_max_total: f64,
    pub neutral_max_total: f64,
    pub harsh_max_chars: usize,
    pub neutral_max_chars: usize,
    pub effusive_max_chars: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TierBand {
    pub probability: f64,
    pub lo: f64,
    pub hi: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FloorSplit {
    Proportional,
    Even,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PolicyPreset {
    #[default]
    Standard,
    Classic,
}

impl Default for ShapingPolicy {
    fn default() -> Self {
        Self::standard_v1()
    }
}

impl ShapingPolicy {
    pub fn standard_v1() -> Self {
        Self {
            raw_axis_max: 50.0,
            substantial_min_chars: 10,
            floor_total: 20.0,
            floor_split: FloorSplit::Proportional,
            llm_flag_trust_max_chars: 15,
            repeat_dominance_ratio: 0.5,
            uninterpretable_axis_max: 5.0,
            skew_probability: 0.25,
            skew_min: 3.0,
            skew_max: 12.0,
            gate_min_chars: 40,
            gate_min_script_chars: 20,
            gate_requires_terminal_punct: true,
            tiers: vec![
                TierBand {
                    probability: 1.0 / 5000.0,
                    lo: 90.0,
                    hi: 100.0,
                },
                TierBand {
                    probability: 1.0 / 1000.0,
                    lo: 70.0,
                    hi: 90.0,
                },
                TierBand {
                    probability: 1.0 / 30.0,
                    lo: 50.0,
                    hi: 70.0,
                },
            ],
            cap_total: 49.9,
            harsh_max_total: 30.0,
            neutral_max_total: 60.0,
            harsh_max_chars: 200,
            neutral_max_chars: 350,
            effusive_max_chars: 500,
        }
    }

    /// Earliest variant: even floor split and a rarer skew.
    pub fn classic_v1() -> Self {
        let mut base = Self::standard_v1();
        base.floor_split = FloorSplit::Even;
        base.skew_probability = 0.15;
        base
    }

    pub fn from_preset(preset: PolicyPreset) -> Self {
        match preset {
            PolicyPreset::Standard => Self::standard_v1(),
            PolicyPreset::Classic => Self::classic_v1(),
        }
    }

    pub fn floor_tenths(&self) -> i32 {
        round1_tenths(self.floor_total)
    }

    /// Totals strictly above this are rescaled onto it, so 50.0 itself is
    /// capped to 49.9 as well.
    pub fn cap_tenths(&self) -> i32 {
        round1_tenths(self.cap_total)
    }

    pub fn skew_range_tenths(&self) -> (i32, i32) {
        let lo = round1_tenths(self.skew_min).max(1);
        let hi = round1_tenths(self.skew_max).max(lo);
        (lo, hi)
    }

    pub fn uninterpretable_axis_tenths(&self) -> i32 {
        round1_tenths(self.uninterpretable_axis_max)
    }

    /// Multiplier that brings a raw upstream value onto the 0..=50 axis.
    pub fn raw_scale(&self) -> f64 {
        if self.raw_axis_max.is_finite() && self.raw_axis_max > 0.0 {
            50.0 / self.raw_axis_max
        } else {
            1.0
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/policy.rs"]
mod tests;
