use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::gateway::{GatewayError, LlmGateway};
use crate::input::{JudgementError, RawJudgement, Submission};
use crate::model::policy::ShapingPolicy;
use crate::pipeline::{ShapeInputs, ShapeOutput, ShapingPipeline, run_shaping};
use crate::random::RngSource;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Parse(#[from] JudgementError),
}

/// One evaluation: ask the gateway, then shape its answer.
pub struct Evaluator<G> {
    gateway: G,
    policy: ShapingPolicy,
    pipeline: ShapingPipeline,
    timeout: Duration,
    seed: Option<u64>,
}

impl<G: LlmGateway> Evaluator<G> {
    pub fn new(gateway: G, policy: ShapingPolicy, timeout: Duration) -> Self {
        Self {
            gateway,
            policy,
            pipeline: ShapingPipeline::standard(),
            timeout,
            seed: None,
        }
    }

    /// Fixed seed for every request; only meant for one-shot CLI runs and tests.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub async fn evaluate(&self, submission: &Submission) -> Result<ShapeOutput, EvalError> {
        let content = tokio::time::timeout(self.timeout, self.gateway.complete(submission))
            .await
            .map_err(|_| GatewayError::Timeout(self.timeout.as_secs()))??;

        let judgement = RawJudgement::parse(&content)?;
        let output = self.shape(&judgement, submission);

        tracing::info!(
            word_chars = submission.word.chars().count(),
            text_chars = submission.text.trim().chars().count(),
            stages = ?output.trace.stage_names(),
            tot = output.verdict.tot,
            tone = output.bucket.as_str(),
            "evaluation complete"
        );
        Ok(output)
    }

    pub fn shape(&self, judgement: &RawJudgement, submission: &Submission) -> ShapeOutput {
        let profile = submission.profile();
        let mut rng = RngSource::new(self.make_rng());
        run_shaping(
            &ShapeInputs {
                judgement,
                profile: &profile,
                policy: &self.policy,
                pipeline: &self.pipeline,
            },
            &mut rng,
        )
    }

    fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/evaluate.rs"]
mod tests;
