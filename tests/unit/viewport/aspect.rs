use super::*;

#[test]
fn four_by_three_screen_pillarboxes_hd_viewport() {
    let full = ViewRect::from_size(1920, 1080);
    let r = constrain_to_aspect(full, 4.0 / 3.0);
    assert_eq!(r, ViewRect::new(240, 0, 1680, 1080));
    assert_eq!(r.width(), 1440);
    assert_eq!(r.height(), 1080);
}

#[test]
fn wide_screen_letterboxes() {
    let full = ViewRect::from_size(1200, 1000);
    let r = constrain_viewport(full, Size::new(160.0, 90.0));
    assert_eq!(r.width(), 1200);
    assert_eq!(r.height(), 675);
    assert_eq!(r.min_y, 162);
    assert!(full.contains_rect(&r));
}

#[test]
fn offset_viewports_stay_contained() {
    let full = ViewRect::new(100, 50, 740, 530);
    for aspect in [0.2, 0.75, 1.0, 1.5, 2.39, 9.0] {
        let r = constrain_to_aspect(full, aspect);
        assert!(full.contains_rect(&r), "aspect {aspect}: {r:?}");
    }
}

#[test]
fn constrain_is_idempotent() {
    let full = ViewRect::from_size(1920, 1080);
    for aspect in [4.0 / 3.0, 16.0 / 9.0, 2.39, 0.5625, 1.85, 3.1] {
        let once = constrain_to_aspect(full, aspect);
        assert_eq!(constrain_to_aspect(once, aspect), once, "aspect {aspect}");
    }
}

#[test]
fn no_op_cases_return_full_rect() {
    let full = ViewRect::from_size(1920, 1080);
    assert_eq!(constrain_to_aspect(full, 16.0 / 9.0), full);
    assert_eq!(constrain_to_aspect(full, 1.7775), full);
    assert_eq!(constrain_viewport(full, Size::new(0.0, 90.0)), full);
    assert_eq!(constrain_viewport(full, Size::new(160.0, -1.0)), full);
    assert_eq!(constrain_to_aspect(full, f64::NAN), full);

    let empty = ViewRect::new(10, 10, 10, 500);
    assert_eq!(constrain_to_aspect(empty, 1.0), empty);
}

#[test]
fn small_viewport_still_pillarboxes() {
    let r = constrain_to_aspect(ViewRect::from_size(100, 3), 30.0);
    assert_eq!(r, ViewRect::new(5, 0, 95, 3));

    let r = constrain_to_aspect(ViewRect::from_size(640, 480), 1.332);
    assert_eq!(r, ViewRect::new(0, 0, 639, 480));
}

#[test]
fn rounding_keeps_result_on_the_cropped_side() {
    // 1920 / round(1920 / 2.39) would need a further 1 px pillarbox.
    let r = constrain_to_aspect(ViewRect::from_size(1920, 1080), 2.39);
    assert_eq!(r, ViewRect::new(0, 138, 1920, 942));

    let r = constrain_to_aspect(ViewRect::from_size(100, 10), 30.0);
    assert_eq!(r, ViewRect::new(0, 3, 100, 7));
}

#[test]
fn constrain_is_idempotent_on_odd_sizes() {
    for (w, h) in [(100, 10), (100, 3), (640, 500), (640, 480), (7, 13), (1, 1000), (999, 1)] {
        let full = ViewRect::from_size(w, h);
        for aspect in [0.3, 0.75, 1.332, 2.39, 30.0] {
            let once = constrain_to_aspect(full, aspect);
            assert!(full.contains_rect(&once), "{w}x{h} @ {aspect}: {once:?}");
            assert_eq!(constrain_to_aspect(once, aspect), once, "{w}x{h} @ {aspect}");
        }
    }
}
