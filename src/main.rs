mod config;
mod evaluate;
mod gateway;
mod input;
mod logging;
mod model;
mod pipeline;
mod random;
mod report;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

use crate::config::{ServiceConfig, resolve_bind};
use crate::evaluate::Evaluator;
use crate::gateway::OpenAiGateway;
use crate::input::{EvalRequest, RawJudgement};
use crate::model::policy::{PolicyPreset, ShapingPolicy};
use crate::pipeline::{ShapeInputs, ShapingPipeline, run_shaping};
use crate::random::RngSource;

#[derive(Debug, Parser)]
#[command(
    name = "coinage-judge",
    version,
    about = "Judges coined words with an LLM and shapes the scores."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service.
    Serve(ServeArgs),
    /// One live evaluation; prints the verdict as JSON.
    Judge(JudgeArgs),
    /// Run the shaping pipeline on given raw scores, without the LLM.
    Shape(ShapeArgs),
    /// Run the pipeline many times and report the score distribution.
    Simulate(SimulateArgs),
}

#[derive(Debug, Args)]
struct ServeArgs {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    bind: Option<String>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long, value_enum)]
    preset: Option<PolicyPreset>,
}

#[derive(Debug, Args)]
struct JudgeArgs {
    #[arg(long)]
    word: String,
    #[arg(long)]
    text: String,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Args)]
struct ScoreArgs {
    #[arg(long)]
    nat: f64,
    #[arg(long)]
    cre: f64,
    #[arg(long)]
    text: String,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum)]
    preset: Option<PolicyPreset>,
    /// Optional TOML file; only its `[policy]` table is used.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ShapeArgs {
    #[command(flatten)]
    score: ScoreArgs,
    #[arg(long)]
    uninterpretable: bool,
    #[arg(long, default_value = "")]
    comment: String,
}

#[derive(Debug, Args)]
struct SimulateArgs {
    #[command(flatten)]
    score: ScoreArgs,
    #[arg(long, default_value_t = 10_000)]
    trials: usize,
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => run_serve(args).await,
        Command::Judge(args) => run_judge(args).await,
        Command::Shape(args) => run_shape(args),
        Command::Simulate(args) => run_simulate(args),
    }
}

async fn run_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut cfg = ServiceConfig::load(args.config.as_deref()).context("load config")?;
    if let Some(model) = args.model {
        cfg.llm.model = model;
    }
    let policy = cfg.shaping_policy(args.preset).context("resolve shaping policy")?;
    let port = std::env::var("PORT").ok();
    let bind = resolve_bind(args.bind.as_deref(), port.as_deref(), &cfg.server);

    let timeout = cfg.llm.timeout();
    tracing::info!(model = %cfg.llm.model, base_url = %cfg.llm.base_url, "LLM gateway configured");
    let gateway = OpenAiGateway::from_env(cfg.llm).context("build LLM gateway")?;
    let evaluator = Arc::new(Evaluator::new(gateway, policy, timeout));

    server::serve(evaluator, &bind)
        .await
        .with_context(|| format!("serve on {bind}"))
}

async fn run_judge(args: JudgeArgs) -> anyhow::Result<()> {
    let mut cfg = ServiceConfig::load(args.config.as_deref()).context("load config")?;
    if let Some(model) = args.model {
        cfg.llm.model = model;
    }
    let policy = cfg.shaping_policy(None).context("resolve shaping policy")?;
    let submission = EvalRequest {
        word: Some(args.word),
        text: Some(args.text),
    }
    .validate()?;

    let timeout = cfg.llm.timeout();
    let gateway = OpenAiGateway::from_env(cfg.llm).context("build LLM gateway")?;
    let evaluator = Evaluator::new(gateway, policy, timeout).with_seed(args.seed);
    let output = evaluator.evaluate(&submission).await?;
    println!("{}", report::json::render_verdict_json(&output.verdict)?);
    Ok(())
}

fn run_shape(args: ShapeArgs) -> anyhow::Result<()> {
    let policy = offline_policy(&args.score)?;
    let judgement = offline_judgement(&args.score, args.uninterpretable, args.comment);
    let profile = input::TextProfile::measure(&args.score.text);
    let pipeline = ShapingPipeline::standard();
    let mut rng = RngSource::new(offline_rng(args.score.seed));

    let output = run_shaping(
        &ShapeInputs {
            judgement: &judgement,
            profile: &profile,
            policy: &policy,
            pipeline: &pipeline,
        },
        &mut rng,
    );
    println!("{}", report::json::render_shape_json(&output)?);
    Ok(())
}

fn run_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.trials > 0, "--trials must be at least 1");
    let policy = offline_policy(&args.score)?;
    let judgement = offline_judgement(&args.score, false, String::new());
    let profile = input::TextProfile::measure(&args.score.text);
    let pipeline = ShapingPipeline::standard();
    let mut rng = RngSource::new(offline_rng(args.score.seed));

    let summary = report::simulate(
        &ShapeInputs {
            judgement: &judgement,
            profile: &profile,
            policy: &policy,
            pipeline: &pipeline,
        },
        args.trials,
        &mut rng,
    );
    if args.json {
        println!("{}", report::json::render_summary_json(&summary)?);
    } else {
        print!("{}", report::text::render_summary_text(&summary));
    }
    Ok(())
}

fn offline_policy(args: &ScoreArgs) -> anyhow::Result<ShapingPolicy> {
    let cfg = ServiceConfig::load(args.config.as_deref()).context("load config")?;
    Ok(cfg
        .shaping_policy(args.preset)
        .context("resolve shaping policy")?)
}

fn offline_judgement(args: &ScoreArgs, uninterpretable: bool, comment: String) -> RawJudgement {
    RawJudgement {
        nat: json!(args.nat),
        cre: json!(args.cre),
        comment,
        uninterpretable,
    }
}

fn offline_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
