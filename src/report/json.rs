use serde::Serialize;

use crate::model::verdict::Verdict;
use crate::pipeline::{ShapeOutput, ShapeTrace};
use crate::report::SimulationSummary;

#[derive(Debug, Serialize)]
struct ShapeReport<'a> {
    verdict: &'a Verdict,
    tone: &'static str,
    trace: &'a ShapeTrace,
}

/// Verdict plus the stage trace, for the offline `shape` command.
pub fn render_shape_json(output: &ShapeOutput) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ShapeReport {
        verdict: &output.verdict,
        tone: output.bucket.as_str(),
        trace: &output.trace,
    })
}

pub fn render_verdict_json(verdict: &Verdict) -> serde_json::Result<String> {
    serde_json::to_string_pretty(verdict)
}

pub fn render_summary_json(summary: &SimulationSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}
