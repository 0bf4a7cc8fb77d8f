use serde_json::json;

use super::*;

#[test]
fn test_coerce_number_variants() {
    assert_eq!(coerce_number(&json!(12.34)), 12.34);
    assert_eq!(coerce_number(&json!(" 18.5 ")), 18.5);
    assert_eq!(coerce_number(&json!("abc")), 0.0);
    assert_eq!(coerce_number(&json!(null)), 0.0);
    assert_eq!(coerce_number(&json!(true)), 0.0);
    assert_eq!(coerce_number(&json!([1])), 0.0);
    assert_eq!(coerce_number(&json!("NaN")), 0.0);
    assert_eq!(coerce_number(&json!("inf")), 0.0);
}

#[test]
fn test_clamp_and_round() {
    let policy = ShapingPolicy::standard_v1();
    let pair = run_stage1(&json!(73.2), &json!(-4), &policy);
    assert_eq!(pair.nat_tenths(), 500);
    assert_eq!(pair.cre_tenths(), 0);

    let pair = run_stage1(&json!(21.25), &json!("17.04"), &policy);
    assert_eq!(pair.nat_tenths(), 213);
    assert_eq!(pair.cre_tenths(), 170);
}

#[test]
fn test_hundred_point_scale_is_halved() {
    let mut policy = ShapingPolicy::standard_v1();
    policy.raw_axis_max = 100.0;
    let pair = run_stage1(&json!(80), &json!(100), &policy);
    assert_eq!(pair.nat_tenths(), 400);
    assert_eq!(pair.cre_tenths(), 500);
}

#[test]
fn test_normalize_is_idempotent() {
    let policy = ShapingPolicy::standard_v1();
    for (nat, cre) in [(0.0, 0.0), (12.3, 45.6), (50.0, 50.0), (0.1, 49.9), (33.35, 7.05)] {
        let once = run_stage1(&json!(nat), &json!(cre), &policy);
        let twice = run_stage1(&json!(once.nat()), &json!(once.cre()), &policy);
        assert_eq!(once, twice);
        assert_eq!(renormalize(once), once);
    }
}
