use super::*;

fn config(min: u32, optimum: u32, max: u32) -> StripConfig {
    StripConfig {
        cell_min_width: min,
        cell_optimum_width: optimum,
        cell_max_width: max,
        ..StripConfig::default()
    }
}

fn strip(width: f64) -> Rect {
    Rect::new(0.0, 0.0, width, 22.0)
}

fn widths(layout: &StripLayout) -> Vec<f64> {
    layout.frames.iter().flatten().map(|f| f.w).collect()
}

// ── Shrinking ────────────────────────────────────────────────────────

#[test]
fn three_optimum_cells_shrink_into_narrow_strip() {
    let layout = compute_layout(&[0.0; 3], strip(250.0), &config(50, 100, 200));
    assert_eq!(layout.visible, 3);
    assert!(layout.used_length(Orientation::Horizontal) <= 250.0);
    for w in widths(&layout) {
        assert!((50.0..=200.0).contains(&w));
    }
}

#[test]
fn cells_at_optimum_when_room_is_plenty() {
    let layout = compute_layout(&[0.0; 3], strip(1000.0), &config(50, 100, 200));
    assert_eq!(widths(&layout), vec![100.0, 100.0, 100.0]);
    assert!(!layout.has_overflow());
}

#[test]
fn proportional_shrink_keeps_wide_cells_wider() {
    let cfg = StripConfig {
        size_cells_to_fit: true,
        ..config(50, 100, 300)
    };
    let layout = compute_layout(&[250.0, 100.0], strip(250.0), &cfg);
    let w = widths(&layout);
    assert!(w[0] > w[1]);
    assert!(w.iter().sum::<f64>() <= 250.0);
    assert!(w.iter().all(|&x| x >= 50.0));
}

#[test]
fn frames_are_contiguous_from_strip_origin() {
    let bounds = Rect::new(40.0, 10.0, 500.0, 22.0);
    let layout = compute_layout(&[0.0; 3], bounds, &config(50, 100, 200));
    let frames: Vec<Rect> = layout.frames.iter().flatten().copied().collect();
    assert_eq!(frames[0].x, 40.0);
    assert_eq!(frames[1].x, frames[0].max_x());
    assert_eq!(frames[2].x, frames[1].max_x());
    assert!(frames.iter().all(|f| f.y == 10.0 && f.h == 22.0));
}

// ── Overflow ─────────────────────────────────────────────────────────

#[test]
fn trailing_cells_overflow_in_sequence_order() {
    let layout = compute_layout(&[0.0; 6], strip(300.0), &config(80, 100, 200));
    // 300 - overflow button reserve (18) = 282 → three cells at >= 80.
    assert_eq!(layout.visible, 3);
    assert_eq!(layout.overflowed().collect::<Vec<_>>(), vec![3, 4, 5]);
    assert!(layout.overflow_button.is_some());
    assert!(layout.used_length(Orientation::Horizontal) <= 300.0);
}

#[test]
fn overflow_button_sits_after_last_visible_cell() {
    let layout = compute_layout(&[0.0; 6], strip(300.0), &config(80, 100, 200));
    let last = layout.frames[layout.visible - 1].expect("visible frame");
    let button = layout.overflow_button.expect("overflow button");
    assert!(button.x >= last.max_x());
    assert!(button.max_x() <= 300.0);
}

#[test]
fn disabled_overflow_menu_still_excludes_cells() {
    let cfg = StripConfig {
        use_overflow_menu: false,
        ..config(80, 100, 200)
    };
    let layout = compute_layout(&[0.0; 6], strip(300.0), &cfg);
    assert_eq!(layout.visible, 3);
    assert!(layout.overflow_button.is_none());
}

#[test]
fn strip_narrower_than_minimum_overflows_everything() {
    let layout = compute_layout(&[0.0; 2], strip(40.0), &config(50, 100, 200));
    assert_eq!(layout.visible, 0);
    assert!(layout.frames.iter().all(Option::is_none));
}

#[test]
fn width_bounds_hold_for_many_configurations() {
    for min in [20u32, 50, 90] {
        for extra in [0u32, 30, 150] {
            let max = min + extra;
            for count in 0..12usize {
                for width in [0.0, 99.0, 250.0, 640.0, 1333.0] {
                    let cfg = StripConfig {
                        size_cells_to_fit: count % 2 == 0,
                        ..config(min, min + extra / 2, max)
                    };
                    let natural: Vec<f64> =
                        (0..count).map(|i| 30.0 + 47.0 * i as f64).collect();
                    let layout = compute_layout(&natural, strip(width), &cfg);
                    assert!(layout.used_length(Orientation::Horizontal) <= width);
                    for w in widths(&layout) {
                        assert!(w >= min as f64 && w <= max as f64, "{w} outside [{min}, {max}]");
                    }
                    // Overflowed cells always form a suffix.
                    let first_hidden = layout.frames.iter().position(Option::is_none);
                    if let Some(h) = first_hidden {
                        assert!(layout.frames[h..].iter().all(Option::is_none));
                        assert_eq!(h, layout.visible);
                    }
                }
            }
        }
    }
}

// ── Growing ──────────────────────────────────────────────────────────

#[test]
fn size_to_fit_grows_toward_maximum() {
    let cfg = StripConfig {
        size_cells_to_fit: true,
        ..config(50, 100, 200)
    };
    let layout = compute_layout(&[60.0, 60.0], strip(300.0), &cfg);
    let w = widths(&layout);
    assert_eq!(w, vec![150.0, 150.0]);
}

#[test]
fn growth_stops_at_maximum() {
    let cfg = StripConfig {
        size_cells_to_fit: true,
        ..config(50, 100, 200)
    };
    let layout = compute_layout(&[60.0], strip(1000.0), &cfg);
    assert_eq!(widths(&layout), vec![200.0]);
}

#[test]
fn without_size_to_fit_trailing_space_is_left() {
    let cfg = StripConfig {
        show_add_tab_button: true,
        ..config(50, 100, 200)
    };
    let layout = compute_layout(&[0.0; 2], strip(600.0), &cfg);
    assert_eq!(widths(&layout), vec![100.0, 100.0]);
    let add = layout.add_button.expect("add button");
    assert!(add.x >= 200.0);
}

// ── Malformed configuration ──────────────────────────────────────────

#[test]
fn max_below_min_is_clamped_to_min() {
    let layout = compute_layout(&[0.0; 2], strip(1000.0), &config(120, 60, 80));
    assert_eq!(widths(&layout), vec![120.0, 120.0]);
}

#[test]
fn non_finite_measurements_fall_back_to_minimum() {
    let cfg = StripConfig {
        size_cells_to_fit: true,
        ..config(50, 100, 200)
    };
    let layout = compute_layout(&[f64::NAN, f64::INFINITY], strip(100.0), &cfg);
    assert_eq!(widths(&layout), vec![50.0, 50.0]);
}

// ── Orientation ──────────────────────────────────────────────────────

#[test]
fn vertical_orientation_stacks_rows() {
    let cfg = StripConfig {
        orientation: Orientation::Vertical,
        ..config(50, 100, 200)
    };
    let bounds = Rect::new(0.0, 0.0, 150.0, 100.0);
    let layout = compute_layout(&[0.0; 6], bounds, &cfg);
    let frames: Vec<Rect> = layout.frames.iter().flatten().copied().collect();
    assert!(frames.len() < 6);
    assert_eq!(frames[0], Rect::new(0.0, 0.0, 150.0, 22.0));
    assert_eq!(frames[1].y, 22.0);
    assert!(layout.used_length(Orientation::Vertical) <= 100.0);
}

#[test]
fn zero_cells_produce_empty_layout() {
    let cfg = StripConfig {
        show_add_tab_button: true,
        ..StripConfig::default()
    };
    let layout = compute_layout(&[], strip(500.0), &cfg);
    assert!(layout.frames.is_empty());
    assert_eq!(layout.visible, 0);
    assert!(layout.add_button.is_some());
}
