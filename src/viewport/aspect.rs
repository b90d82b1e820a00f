use crate::foundation::core::{Size, ViewRect};
use crate::foundation::math::{SMALL_NUMBER, is_nearly_equal};

/// Aspect ratios closer than this are considered equal.
pub const ASPECT_TOLERANCE: f64 = 0.001;

/// Centered sub-rectangle of `full` matching the aspect ratio of a `screen` of the given size.
///
/// Returns `full` unchanged when the screen has a non-positive extent.
pub fn constrain_viewport(full: ViewRect, screen: Size) -> ViewRect {
    if screen.width <= SMALL_NUMBER || screen.height <= SMALL_NUMBER {
        return full;
    }
    constrain_to_aspect(full, screen.width / screen.height)
}

/// Centered sub-rectangle of `full` with aspect ratio `screen_aspect` (width / height).
///
/// Narrower screens are pillarboxed (full height), wider screens letterboxed (full width).
/// The result always lies inside `full`. Returns `full` unchanged when it is empty, when
/// `screen_aspect` is not a positive finite number, or when the aspects already match within
/// [`ASPECT_TOLERANCE`].
///
/// The cropped extent is rounded to the nearest pixel unless that would push the result past
/// `screen_aspect` by more than the tolerance, in which case it is rounded away from the crop.
/// The result therefore stays on the same side of `screen_aspect` and a second pass reproduces it.
pub fn constrain_to_aspect(full: ViewRect, screen_aspect: f64) -> ViewRect {
    if !(screen_aspect.is_finite() && screen_aspect > 0.0) || full.is_empty() {
        return full;
    }

    let view_w = full.width();
    let view_h = full.height();
    let view_aspect = f64::from(view_w) / f64::from(view_h);
    if is_nearly_equal(screen_aspect, view_aspect, ASPECT_TOLERANCE) {
        return full;
    }

    let mut off_x = full.min_x;
    let mut off_y = full.min_y;
    let (new_w, new_h) = if screen_aspect < view_aspect {
        let ideal = f64::from(view_h) * screen_aspect;
        let mut w = ideal.round();
        let aspect = w / f64::from(view_h);
        if aspect < screen_aspect && !is_nearly_equal(aspect, screen_aspect, ASPECT_TOLERANCE) {
            w = ideal.ceil();
        }
        let new_w = (w as i32).min(view_w);
        off_x += (view_w - new_w) / 2;
        (new_w, view_h)
    } else {
        let ideal = f64::from(view_w) / screen_aspect;
        let mut h = ideal.round();
        let aspect = f64::from(view_w) / h;
        if aspect > screen_aspect && !is_nearly_equal(aspect, screen_aspect, ASPECT_TOLERANCE) {
            h = ideal.ceil();
        }
        let new_h = (h as i32).min(view_h);
        off_y += (view_h - new_h) / 2;
        (view_w, new_h)
    };

    ViewRect::new(off_x, off_y, off_x + new_w, off_y + new_h)
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/aspect.rs"]
mod tests;
