use pretty_assertions::assert_eq;

use super::*;

fn digit() -> SubrangeType {
    SubrangeType {
        name: "TDigit".to_owned(),
        base: TypeId::INTEGER,
        low: 0,
        high: 9,
    }
}

#[test]
fn subrange_bounds_are_inclusive() {
    let range = digit();
    assert!(range.contains(0));
    assert!(range.contains(9));
    assert!(!range.contains(-1));
    assert!(!range.contains(10));

    assert_eq!(range.check_range(0), Ok(0));
    assert_eq!(range.check_range(9), Ok(9));
    assert_eq!(range.check_range(5), Ok(5));
}

#[test]
fn check_range_reports_the_violation() {
    let range = digit();
    assert_eq!(
        range.check_range(10),
        Err(OutOfRange {
            value: 10,
            name: "TDigit".to_owned(),
            low: 0,
            high: 9,
        })
    );
    let below = range.check_range(-1).unwrap_err();
    assert_eq!(below.value, -1);
    assert_eq!(
        below.to_string(),
        "value -1 is out of range for type TDigit (0..9)"
    );
}

#[test]
fn subrange_at_extremes() {
    let range = SubrangeType {
        name: String::new(),
        base: TypeId::INTEGER,
        low: i64::MIN,
        high: i64::MAX,
    };
    assert!(range.contains(i64::MIN));
    assert!(range.contains(i64::MAX));
    assert_eq!(range.check_range(i64::MAX), Ok(i64::MAX));
}

#[test]
fn static_array_length() {
    let array = |low, high| ArrayType {
        element: TypeId::INTEGER,
        bounds: Some((low, high)),
    };
    assert_eq!(array(1, 10).len(), Some(10));
    assert_eq!(array(5, 5).len(), Some(1));
    assert_eq!(array(3, 1).len(), Some(0));
    assert_eq!(array(-2, 2).len(), Some(5));
    let dynamic = ArrayType {
        element: TypeId::INTEGER,
        bounds: None,
    };
    assert!(dynamic.is_dynamic());
    assert_eq!(dynamic.len(), None);
}

#[test]
fn static_array_length_does_not_overflow() {
    let array = |low, high| ArrayType {
        element: TypeId::INTEGER,
        bounds: Some((low, high)),
    };
    assert_eq!(array(0, i64::MAX).len(), Some(0));
    assert_eq!(array(i64::MIN, i64::MAX).len(), Some(0));
    assert_eq!(array(1, i64::MAX).len(), Some(u64::try_from(i64::MAX).unwrap()));
    assert_eq!(array(i64::MAX, i64::MIN).len(), Some(0));
}
