use serde::Serialize;

use crate::model::score::ScorePair;

/// Response body of a successful evaluation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Verdict {
    pub nat: f64,
    pub cre: f64,
    pub tot: f64,
    pub comment: String,
}

impl Verdict {
    pub fn assemble(pair: ScorePair, comment: String) -> Self {
        Self {
            nat: pair.nat(),
            cre: pair.cre(),
            tot: pair.total(),
            comment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneBucket {
    Harsh,
    Neutral,
    Effusive,
}

impl ToneBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToneBucket::Harsh => "harsh",
            ToneBucket::Neutral => "neutral",
            ToneBucket::Effusive => "effusive",
        }
    }
}
