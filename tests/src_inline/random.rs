use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

#[test]
fn test_scripted_draws_then_fallback() {
    let mut rng = ScriptedRandom::new(&[0.1, 0.5]).with_fallback(0.25);
    assert_eq!(rng.next_unit(), 0.1);
    assert_eq!(rng.next_unit(), 0.5);
    assert_eq!(rng.remaining(), 0);
    assert_eq!(rng.next_unit(), 0.25);
}

#[test]
fn test_int_inclusive_covers_endpoints() {
    let mut rng = ScriptedRandom::new(&[0.0, 0.999_999, 0.5]);
    assert_eq!(rng.int_inclusive(30, 120), 30);
    assert_eq!(rng.int_inclusive(30, 120), 120);
    assert_eq!(rng.int_inclusive(0, 3), 2);
    assert_eq!(rng.int_inclusive(7, 7), 7);
    assert_eq!(rng.int_inclusive(7, 2), 7);
}

#[test]
fn test_chance_is_strict() {
    let mut rng = ScriptedRandom::new(&[0.15, 0.149]);
    assert!(!rng.chance(0.15));
    assert!(rng.chance(0.15));
}

#[test]
fn test_shuffle_keeps_elements() {
    let mut rng = RngSource::new(StdRng::seed_from_u64(7));
    let mut items = vec![1, 2, 3, 4, 5, 6];
    shuffle(&mut rng, &mut items);
    let mut sorted = items.clone();
    sorted.sort();
    assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_rng_source_range() {
    let mut rng = RngSource::new(StdRng::seed_from_u64(42));
    for _ in 0..1000 {
        let v = rng.int_inclusive(-4, 4);
        assert!((-4..=4).contains(&v));
        let u = rng.next_unit();
        assert!((0.0..1.0).contains(&u));
    }
}
