use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

use super::*;
use crate::random::{RngSource, ScriptedRandom};

const PASSAGE: &str = "ぴらるとは、雨上がりの路地で石畳が夕日を映してきらめく一瞬のことを指す言葉である。祖母はその光を見るたびに、今日もよく働いたねと小さく笑い、私たちは黙って頷いた。";

fn judgement(nat: serde_json::Value, cre: serde_json::Value, flag: bool) -> RawJudgement {
    RawJudgement {
        nat,
        cre,
        comment: "見事な一文である。情景が鮮やかに浮かび、言葉の響きが余韻を残す。".repeat(20),
        uninterpretable: flag,
    }
}

fn shape(
    j: &RawJudgement,
    text: &str,
    policy: &ShapingPolicy,
    rng: &mut dyn RandomSource,
) -> ShapeOutput {
    let profile = TextProfile::measure(text);
    let pipeline = ShapingPipeline::standard();
    run_shaping(
        &ShapeInputs {
            judgement: j,
            profile: &profile,
            policy,
            pipeline: &pipeline,
        },
        rng,
    )
}

fn assert_well_formed(out: &ShapeOutput) {
    let v = &out.verdict;
    assert!((0.0..=50.0).contains(&v.nat));
    assert!((0.0..=50.0).contains(&v.cre));
    assert!((0.0..=100.0).contains(&v.tot));
    assert_eq!(out.pair.total_tenths(), out.pair.nat_tenths() + out.pair.cre_tenths());
    for x in [v.nat, v.cre, v.tot] {
        let tenths = x * 10.0;
        assert!((tenths - tenths.round()).abs() < 1e-9, "{x}");
    }
    assert_eq!(v.tot, out.pair.total());
}

#[test]
fn test_passage_fixture_passes_gate() {
    let policy = ShapingPolicy::standard_v1();
    let profile = TextProfile::measure(PASSAGE);
    assert!(profile.char_len >= 80);
    assert!(profile.passes_gate(&policy));
}

#[test]
fn test_standard_order() {
    let pipeline = ShapingPipeline::standard();
    let names = pipeline.stages().iter().map(|s| s.name()).collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "floor_bump",
            "skew",
            "dequantize",
            "decluster",
            "tier_override",
            "hard_floor"
        ]
    );
}

#[test]
fn test_order_is_observable() {
    // floor before skew vs. skew alone on a low pair
    let policy = ShapingPolicy::standard_v1();
    let profile = TextProfile::measure(PASSAGE);
    let ctx = ShapeContext::new(&policy, &profile);
    let pair = ScorePair::from_tenths(21, 13);

    let floor_only = ShapingPipeline::with_stages(vec![Stage::FloorBump]);
    let (out, trace) = floor_only.run(pair, &ctx, &mut ScriptedRandom::new(&[]));
    assert_eq!(out.total_tenths(), 200);
    assert_eq!(trace.stage_names(), vec!["floor_bump"]);

    let skew_only = ShapingPipeline::with_stages(vec![Stage::Skew]);
    let (out, trace) = skew_only.run(pair, &ctx, &mut ScriptedRandom::new(&[0.0, 0.1, 0.0]));
    assert_eq!(out, pair);
    assert!(trace.steps.is_empty());
}

#[test]
fn test_tier_hit_end_to_end() {
    let policy = ShapingPolicy::standard_v1();
    let j = judgement(json!(21.3), json!(17.4), false);
    // skew miss, tier r in the 70-90 band, target and nat draws
    let mut rng = ScriptedRandom::new(&[0.99, 0.0007, 0.5, 0.25]);
    let out = shape(&j, PASSAGE, &policy, &mut rng);
    assert_well_formed(&out);
    assert!(out.verdict.tot > 70.0 && out.verdict.tot < 90.0);
    // the 80.0 target is stepped to 80.1 and the split is 35.1 / 45.0
    assert_eq!(out.pair.total_tenths(), 801);
    assert!(!out.pair.total_on_five_step());
    assert!(!out.pair.is_doubly_quantized());
    assert_eq!(out.bucket, ToneBucket::Effusive);
    assert!(matches!(out.trace.tier, Some(TierOutcome::Hit { band: 1, .. })));
    assert!(out.verdict.comment.chars().count() > policy.neutral_max_chars);
    assert!(out.verdict.comment.chars().count() <= policy.effusive_max_chars);
}

#[test]
fn test_short_text_end_to_end() {
    let policy = ShapingPolicy::standard_v1();
    let mut rng = RngSource::new(StdRng::seed_from_u64(1));
    for raw in [json!(0), json!(12.5), json!(50), json!("49.9"), json!(null)] {
        let j = judgement(raw.clone(), raw, false);
        for _ in 0..200 {
            let out = shape(&j, "とても短い", &policy, &mut rng);
            assert_well_formed(&out);
            assert!(out.verdict.tot <= 50.0);
            if out.verdict.tot <= 30.0 {
                assert_eq!(out.bucket, ToneBucket::Harsh);
            }
        }
    }
}

#[test]
fn test_uninterpretable_short_circuit() {
    let policy = ShapingPolicy::standard_v1();
    let mut rng = ScriptedRandom::new(&[0.0, 0.0, 0.0]);
    let j = judgement(json!(44), json!(38.2), false);
    let out = shape(&j, "ああああああ", &policy, &mut rng);
    assert_well_formed(&out);
    assert!(out.verdict.nat <= 5.0 && out.verdict.cre <= 5.0);
    assert_eq!(out.verdict.comment, stage7_comment::UNINTERPRETABLE_COMMENT);
    assert_eq!(out.trace.path, ShapePath::Uninterpretable);
    assert!(out.trace.steps.is_empty());
    // no stage consumed randomness
    assert_eq!(rng.remaining(), 3);
}

#[test]
fn test_uninterpretable_via_llm_flag() {
    let policy = ShapingPolicy::standard_v1();
    let j = judgement(json!(3.2), json!(1.1), true);
    let out = shape(&j, "とても短い", &policy, &mut ScriptedRandom::new(&[]));
    assert_eq!(out.pair, ScorePair::from_tenths(32, 11));
    assert_eq!(out.verdict.comment, stage7_comment::UNINTERPRETABLE_COMMENT);
}

#[test]
fn test_llm_flag_ignored_for_long_text() {
    let policy = ShapingPolicy::standard_v1();
    let j = judgement(json!(3.2), json!(1.1), true);
    let out = shape(&j, PASSAGE, &policy, &mut ScriptedRandom::new(&[0.99, 0.99]));
    assert_eq!(out.trace.path, ShapePath::Shaped);
    assert!(out.verdict.tot >= 20.0);
}

#[test]
fn test_floor_property() {
    let policy = ShapingPolicy::standard_v1();
    let mut rng = RngSource::new(StdRng::seed_from_u64(99));
    let text = "静かな朝に新しい言葉を思いついた";
    for nat in [0.0, 0.4, 3.3, 9.9, 10.0] {
        for cre in [0.0, 2.5, 9.6] {
            let j = judgement(json!(nat), json!(cre), false);
            for _ in 0..50 {
                let out = shape(&j, text, &policy, &mut rng);
                assert_well_formed(&out);
                assert!(out.verdict.tot >= 20.0, "{nat} {cre} -> {}", out.verdict.tot);
            }
        }
    }
}

#[test]
fn test_decluster_property() {
    let policy = ShapingPolicy::standard_v1();
    let mut rng = RngSource::new(StdRng::seed_from_u64(2024));
    let j = judgement(json!(15.0), json!(15.0), false);
    let trials = 5000;
    let mut on_five = 0;
    for _ in 0..trials {
        let out = shape(&j, PASSAGE, &policy, &mut rng);
        assert_well_formed(&out);
        if out.pair.total_on_five_step() {
            on_five += 1;
        }
    }
    assert!((on_five as f64) / (trials as f64) < 0.02, "{on_five}");
}

#[test]
fn test_gate_boundary_property() {
    let policy = ShapingPolicy::standard_v1();
    let mut rng = RngSource::new(StdRng::seed_from_u64(7));
    let j = judgement(json!(50), json!(50), false);
    for _ in 0..5000 {
        let out = shape(&j, "xqzvk", &policy, &mut rng);
        assert!(out.verdict.tot <= 50.0);
    }
}

#[test]
fn test_range_and_sum_over_random_inputs() {
    let policy = ShapingPolicy::standard_v1();
    let mut rng = RngSource::new(StdRng::seed_from_u64(31));
    let raws = [
        json!(-10),
        json!(0),
        json!(7.77),
        json!(25),
        json!(49.95),
        json!(120),
        json!("x"),
        json!(null),
    ];
    for nat in &raws {
        for cre in &raws {
            let j = judgement(nat.clone(), cre.clone(), false);
            for text in [PASSAGE, "とても短い", "静かな朝に新しい言葉を思いついた"] {
                for _ in 0..20 {
                    assert_well_formed(&shape(&j, text, &policy, &mut rng));
                }
            }
        }
    }
}

#[test]
fn test_single_character_takes_uninterpretable_path() {
    let policy = ShapingPolicy::standard_v1();
    let j = judgement(json!(40), json!(40), false);
    let mut rng = ScriptedRandom::new(&[]);
    let out = shape(&j, "あ", &policy, &mut rng);
    assert_eq!(out.trace.path, ShapePath::Uninterpretable);
    assert!(out.verdict.nat <= 5.0 && out.verdict.cre <= 5.0);
    assert_eq!(out.verdict.comment, stage7_comment::UNINTERPRETABLE_COMMENT);
}
