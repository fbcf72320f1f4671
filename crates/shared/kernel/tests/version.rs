use proptest::prelude::*;
use std::cmp::Ordering;
use tplat_kernel::version::{Versioned, compare_versions};

const VERSION: &str = "[0-9a-z]{1,4}(\\.[0-9a-z]{1,4}){0,4}";
const NUMERIC_VERSION: &str = "[0-9]{1,4}(\\.[0-9]{1,4}){0,4}";

#[test]
fn documented_predicates() {
    assert!("5.8".is_version("5.8"));
    assert!("5.8".is_after_version("5.6"));
    assert!(!"5.8".is_strictly_before_version("5.6"));
    assert!("5.6".is_strictly_before_version("5.8"));
    assert!("5.8".is_version(&"5.8.0".to_owned()));
}

#[test]
fn empty_reference_is_a_special_case() {
    // The empty reference sorts before everything, yet also counts as "after".
    assert!("5.8".is_after_version(""));
    assert!("5.8".is_strictly_before_version(""));
    assert!(!"5.8".is_version(""));
}

proptest! {
    #[test]
    fn comparison_is_reflexive(v in VERSION) {
        prop_assert_eq!(compare_versions(&v, &v), Ordering::Equal);
        prop_assert!(v.is_version(v.as_str()));
    }

    #[test]
    fn comparison_is_antisymmetric(a in VERSION, b in VERSION) {
        prop_assert_eq!(compare_versions(&a, &b), compare_versions(&b, &a).reverse());
    }

    #[test]
    fn trailing_zeros_are_padding(v in NUMERIC_VERSION, zeros in 1usize..4) {
        let padded = format!("{v}{}", ".0".repeat(zeros));
        prop_assert_eq!(compare_versions(&v, &padded), Ordering::Equal);
    }

    #[test]
    fn numeric_tokens_order_by_value(major in 0u32..100, x in 0u64..100_000, y in 0u64..100_000) {
        let left = format!("{major}.{x}");
        let right = format!("{major}.{y}");
        prop_assert_eq!(compare_versions(&left, &right), x.cmp(&y));
    }

    #[test]
    fn after_and_before_are_exclusive_for_real_references(a in VERSION, b in VERSION) {
        prop_assert!(!(a.is_after_version(b.as_str()) && a.is_strictly_before_version(b.as_str())));
    }

    #[test]
    fn empty_reference_is_after_and_before(v in VERSION) {
        prop_assert!(v.is_after_version(""));
        prop_assert!(v.is_strictly_before_version(""));
    }
}
