/// Tolerance for "effectively zero" comparisons in projection math.
pub(crate) const SMALL_NUMBER: f64 = 1.0e-8;

/// Tolerance for comparing clip distances (near == far detection).
pub(crate) const KINDA_SMALL_NUMBER: f64 = 1.0e-4;

pub(crate) fn is_nearly_equal(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Push `v` away from zero so it can be used as a divisor. The sign is kept, zero maps to `+eps`.
pub(crate) fn non_zero(v: f64, eps: f64) -> f64 {
    if v.abs() >= eps {
        v
    } else if v < 0.0 {
        -eps
    } else {
        eps
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
