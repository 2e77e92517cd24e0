use qmax_comparator::domain::encoding::operand_range;
use qmax_comparator::{
    ComparatorConfig, ComparatorError, EncodingMode, find_the_largest_number,
    find_the_largest_number_with, run_comparison,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

const RANDOM_PAIRS: usize = 300;

fn seeded(width: u32) -> ComparatorConfig {
    ComparatorConfig {
        seed: Some(7),
        ..ComparatorConfig::for_width(width)
    }
}

#[test]
fn test_random_32bit_pairs_return_max() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..RANDOM_PAIRS {
        let a = rng.r#gen::<i32>() as i64;
        let b = rng.r#gen::<i32>() as i64;
        assert_eq!(
            find_the_largest_number(a, b),
            Ok(a.max(b)),
            "a={} b={}",
            a,
            b
        );
    }
}

#[test]
fn test_random_pairs_sharing_high_bits() {
    // Pairs that differ only in low bits exercise the long equality prefix
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..RANDOM_PAIRS {
        let base = rng.r#gen::<i32>() as i64 & !0xFF;
        let a = base | rng.gen_range(0..256);
        let b = base | rng.gen_range(0..256);
        assert_eq!(find_the_largest_number(a, b), Ok(a.max(b)), "a={} b={}", a, b);
    }
}

#[test]
fn test_widest_supported_operands() {
    let width = qmax_comparator::MAX_WIDTH;
    let (min, max) = operand_range(width);
    let config = seeded(width);

    for (a, b) in [(min, max), (max, min), (max - 1, max), (min, min + 1), (-1, 0)] {
        assert_eq!(find_the_largest_number_with(a, b, &config), Ok(a.max(b)));
    }

    let fixed = ComparatorConfig {
        encoding: EncodingMode::Fixed,
        ..config
    };
    let outcome = run_comparison(min, max, &fixed).unwrap();
    assert_eq!(outcome.comparator.circuit.num_qubits(), 3 * width);
    assert_eq!(outcome.larger, max);
}

#[test]
fn test_result_is_deterministic_across_shots() {
    let config = ComparatorConfig {
        shots: 128,
        seed: None,
        ..ComparatorConfig::default()
    };
    let outcome = run_comparison(123_456, -654_321, &config).unwrap();
    assert!(!outcome.less_than);
    assert_eq!(outcome.counts.get("0"), 128);
    assert_eq!(outcome.counts.most_frequent(), Some("0"));
}

#[test]
fn test_out_of_range_operand() {
    let result = find_the_largest_number(i32::MAX as i64 + 1, 0);
    assert!(matches!(result, Err(ComparatorError::Encoding(_))));
}
