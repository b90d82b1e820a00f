use super::*;

#[test]
fn nearly_equal_respects_tolerance() {
    assert!(is_nearly_equal(1.0, 1.0005, 0.001));
    assert!(!is_nearly_equal(1.0, 1.002, 0.001));
    assert!(is_nearly_equal(20.0, 20.0, KINDA_SMALL_NUMBER));
}

#[test]
fn non_zero_keeps_sign_and_magnitude() {
    assert_eq!(non_zero(3.0, SMALL_NUMBER), 3.0);
    assert_eq!(non_zero(-3.0, SMALL_NUMBER), -3.0);
    assert_eq!(non_zero(0.0, SMALL_NUMBER), SMALL_NUMBER);
    assert_eq!(non_zero(-1.0e-12, SMALL_NUMBER), -SMALL_NUMBER);
}
