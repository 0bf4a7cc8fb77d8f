use serde::Serialize;

use crate::input::{RawJudgement, TextProfile};
use crate::model::policy::ShapingPolicy;
use crate::model::score::ScorePair;
use crate::model::verdict::{ToneBucket, Verdict};
use crate::random::RandomSource;

pub mod stage1_normalize;
pub mod stage2_floor;
pub mod stage3_skew;
pub mod stage4_dequantize;
pub mod stage5_decluster;
pub mod stage6_tier;
pub mod stage7_comment;

use stage6_tier::TierOutcome;

/// Per-request facts every stage may consult.
#[derive(Debug, Clone, Copy)]
pub struct ShapeContext<'a> {
    pub policy: &'a ShapingPolicy,
    pub substantial: bool,
    pub passes_gate: bool,
}

impl<'a> ShapeContext<'a> {
    pub fn new(policy: &'a ShapingPolicy, profile: &TextProfile) -> Self {
        Self {
            policy,
            substantial: profile.is_substantial(policy),
            passes_gate: profile.passes_gate(policy),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    FloorBump,
    Skew,
    Dequantize,
    Decluster,
    TierOverride,
    HardFloor,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::FloorBump => "floor_bump",
            Stage::Skew => "skew",
            Stage::Dequantize => "dequantize",
            Stage::Decluster => "decluster",
            Stage::TierOverride => "tier_override",
            Stage::HardFloor => "hard_floor",
        }
    }

    pub fn apply(
        &self,
        pair: ScorePair,
        ctx: &ShapeContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> (ScorePair, Option<TierOutcome>) {
        match self {
            Stage::FloorBump | Stage::HardFloor => (stage2_floor::run_floor_bump(pair, ctx), None),
            Stage::Skew => (stage3_skew::run_skew(pair, ctx, rng), None),
            Stage::Dequantize => (stage4_dequantize::run_dequantize(pair, rng), None),
            Stage::Decluster => (stage5_decluster::run_decluster(pair, ctx, rng), None),
            Stage::TierOverride => {
                let (out, outcome) = stage6_tier::run_tier(pair, ctx, rng);
                (out, Some(outcome))
            }
        }
    }
}

pub const STANDARD_ORDER: [Stage; 6] = [
    Stage::FloorBump,
    Stage::Skew,
    Stage::Dequantize,
    Stage::Decluster,
    Stage::TierOverride,
    Stage::HardFloor,
];

/// Ordered list of shaping stages, applied left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapingPipeline {
    stages: Vec<Stage>,
}

impl Default for ShapingPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl ShapingPipeline {
    pub fn standard() -> Self {
        Self {
            stages: STANDARD_ORDER.to_vec(),
        }
    }

    pub fn with_stages(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn run(
        &self,
        pair: ScorePair,
        ctx: &ShapeContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> (ScorePair, ShapeTrace) {
        let mut trace = ShapeTrace::new(pair, ShapePath::Shaped);
        let mut current = pair;
        for stage in &self.stages {
            let (next, tier) = stage.apply(current, ctx, rng);
            if tier.is_some() {
                trace.tier = tier;
            }
            if next != current {
                tracing::debug!(
                    stage = stage.name(),
                    before = current.total(),
                    after = next.total(),
                    "stage changed pair"
                );
                trace.steps.push(StageStep {
                    stage: *stage,
                    before: current,
                    after: next,
                });
            }
            current = next;
        }
        (current, trace)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapePath {
    Uninterpretable,
    Shaped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageStep {
    pub stage: Stage,
    pub before: ScorePair,
    pub after: ScorePair,
}

/// What happened to a pair on its way through the pipeline. Only stages
/// that changed the pair are recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeTrace {
    pub normalized: ScorePair,
    pub path: ShapePath,
    pub steps: Vec<StageStep>,
    pub tier: Option<TierOutcome>,
}

impl ShapeTrace {
    fn new(normalized: ScorePair, path: ShapePath) -> Self {
        Self {
            normalized,
            path,
            steps: Vec::new(),
            tier: None,
        }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.stage.name()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct ShapeInputs<'a> {
    pub judgement: &'a RawJudgement,
    pub profile: &'a TextProfile,
    pub policy: &'a ShapingPolicy,
    pub pipeline: &'a ShapingPipeline,
}

#[derive(Debug, Clone)]
pub struct ShapeOutput {
    pub pair: ScorePair,
    pub verdict: Verdict,
    pub bucket: ToneBucket,
    pub trace: ShapeTrace,
}

/// Raw LLM judgement to final verdict: normalize, short-circuit unreadable
/// input, run the stage list, then shape the comment.
pub fn run_shaping(inputs: &ShapeInputs<'_>, rng: &mut dyn RandomSource) -> ShapeOutput {
    let policy = inputs.policy;
    let normalized =
        stage1_normalize::run_stage1(&inputs.judgement.nat, &inputs.judgement.cre, policy);

    if inputs
        .profile
        .is_uninterpretable(inputs.judgement.uninterpretable, policy)
    {
        let pair = stage2_floor::run_uninterpretable(normalized, policy);
        let bucket = stage7_comment::tone_bucket(pair.total_tenths(), policy);
        tracing::warn!(
            chars = inputs.profile.char_len,
            llm_flag = inputs.judgement.uninterpretable,
            "uninterpretable input; low band forced"
        );
        return ShapeOutput {
            pair,
            verdict: Verdict::assemble(pair, stage7_comment::UNINTERPRETABLE_COMMENT.to_string()),
            bucket,
            trace: ShapeTrace::new(normalized, ShapePath::Uninterpretable),
        };
    }

    let ctx = ShapeContext::new(policy, inputs.profile);
    let (pair, trace) = inputs.pipeline.run(normalized, &ctx, rng);
    let (comment, bucket) =
        stage7_comment::run_comment(&inputs.judgement.comment, pair.total_tenths(), policy);

    ShapeOutput {
        pair,
        verdict: Verdict::assemble(pair, comment),
        bucket,
        trace,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
