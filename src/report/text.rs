use crate::report::SimulationSummary;

pub fn format_f64_1(v: f64) -> String {
    format!("{:.1}", v)
}

pub fn format_pct(v: f64) -> String {
    format!("{:.2}%", v * 100.0)
}

pub fn render_summary_text(summary: &SimulationSummary) -> String {
    let mut out = String::new();

    out.push_str("Score distribution\n");
    out.push_str("==================\n\n");
    out.push_str(&format!("Trials: {}\n", summary.trials));
    if summary.uninterpretable > 0 {
        out.push_str(&format!(
            "Uninterpretable path: {}\n",
            summary.uninterpretable
        ));
    }
    out.push('\n');

    out.push_str("Total\n");
    out.push_str(&format!("mean:   {}\n", format_f64_1(summary.mean)));
    out.push_str(&format!("median: {}\n", format_f64_1(summary.median)));
    out.push_str(&format!("p10:    {}\n", format_f64_1(summary.p10)));
    out.push_str(&format!("p90:    {}\n", format_f64_1(summary.p90)));
    out.push_str(&format!("p99:    {}\n", format_f64_1(summary.p99)));
    out.push_str(&format!(
        "range:  {} .. {}\n\n",
        format_f64_1(summary.min),
        format_f64_1(summary.max)
    ));

    out.push_str(&format!(
        "On a multiple of 5: {}\n",
        format_pct(summary.five_step_fraction)
    ));
    out.push_str(&format!(
        "Above 50: {}\n\n",
        format_pct(summary.above_50_fraction)
    ));

    out.push_str("Tier hits\n");
    for hit in &summary.tier_hits {
        out.push_str(&format!(
            "({}, {}): {}\n",
            format_f64_1(hit.lo),
            format_f64_1(hit.hi),
            hit.count
        ));
    }
    out.push_str(&format!("capped: {}\n", summary.capped));
    out
}
