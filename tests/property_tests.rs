use proptest::prelude::*;
use zoom_chart::animation::Animator;
use zoom_chart::core::{AxisInterval, EdgeInsets, Interval, ViewSize, Viewport};
use zoom_chart::legend::visible_label_indices;
use zoom_chart::render::fraction_to_clip;

fn zoomed_viewport(count: usize, width: f64, min: f64, span: f64) -> Viewport {
    let mut viewport = Viewport::new(1, EdgeInsets::zero()).expect("viewport");
    viewport
        .set_size(ViewSize::new(width, 400.0))
        .expect("valid size");
    viewport.update_default_x_scales(count);
    viewport
        .set_interval_x(Interval {
            min,
            max: (min + span).min(1.0),
        })
        .expect("valid interval");
    viewport
}

proptest! {
    #[test]
    fn closest_index_inverts_x_position(
        count in 2usize..400,
        width in 100.0f64..2000.0,
        min in 0.0f64..0.9,
        span in 0.05f64..1.0,
        pick in 0.0f64..1.0,
    ) {
        let viewport = zoomed_viewport(count, width, min, span);
        let (left, right) = viewport.visible_index_window();
        prop_assert!(left <= right);
        prop_assert!(right < count);

        let index = left + ((right - left) as f64 * pick) as usize;
        let normalized = viewport.x_position(index) / width;
        let found = viewport.closest_index(viewport.translate_left() - normalized);
        prop_assert!(found.abs_diff(index) <= 1);
    }

    #[test]
    fn transform_pins_displayed_range_to_the_drawable_edges(
        base_min in -1000.0f64..1000.0,
        base_span in 1.0f64..1000.0,
        lo in 0.0f64..0.45,
        hi in 0.55f64..1.0,
        top in 0.0f64..80.0,
        bottom in 0.0f64..80.0,
    ) {
        let height = 400.0;
        let mut viewport = Viewport::new(1, EdgeInsets::new(top, 0.0, bottom, 0.0)).expect("viewport");
        viewport.set_size(ViewSize::new(500.0, height)).expect("valid size");
        let baseline = AxisInterval { min: base_min, max: base_min + base_span };
        viewport.establish_baseline(0, baseline).expect("axis 0 exists");
        let displayed = AxisInterval {
            min: base_min + base_span * lo,
            max: base_min + base_span * hi,
        };
        viewport.set_interval_y(0, displayed).expect("axis 0 exists");

        let drawable = height - top - bottom;
        let fraction = |value: f64| (top + (baseline.max - value) / base_span * drawable) / height;
        let matrix = viewport.transform_matrix(0);

        let (_, max_clip) = matrix.apply(0.0, fraction_to_clip(0.0, fraction(displayed.max)).1);
        let (_, min_clip) = matrix.apply(0.0, fraction_to_clip(0.0, fraction(displayed.min)).1);
        prop_assert!((max_clip - (1.0 - 2.0 * top / height)).abs() <= 1e-6);
        prop_assert!((min_clip - (-1.0 + 2.0 * bottom / height)).abs() <= 1e-6);
    }

    #[test]
    fn animator_progress_is_monotonic_and_lands_on_target(
        duration in 0.05f64..2.0,
        step in 0.001f64..0.1,
        from in -1000.0f64..1000.0,
        delta in 1.0f64..1000.0,
    ) {
        let to = from + delta;
        let mut animator = Animator::new(duration);
        prop_assert_eq!(animator.animate(from, to), None);

        let mut previous_progress = -1.0;
        let mut previous_value = f64::NEG_INFINITY;
        let mut time = 0.0;
        let mut last = None;
        while animator.is_in_progress() {
            let value = animator.update(time);
            prop_assert!(value.is_some());
            let value = value.unwrap_or(to);
            if animator.is_in_progress() {
                prop_assert!(animator.progress() > previous_progress);
                previous_progress = animator.progress();
            }
            prop_assert!(value >= previous_value);
            previous_value = value;
            last = Some(value);
            time += step;
        }
        prop_assert_eq!(last, Some(to));
    }

    #[test]
    fn label_indices_never_crowd(
        count in 2usize..500,
        spacing in 0.5f64..200.0,
        min_width in 5.0f64..100.0,
    ) {
        let indices: Vec<usize> = visible_label_indices(count, spacing, min_width)
            .into_iter()
            .collect();
        prop_assert_eq!(indices.first().copied(), Some(0));
        prop_assert_eq!(indices.last().copied(), Some(count - 1));

        // Only an unsplit full range may be narrower than one label.
        if indices.len() > 2 {
            for pair in indices.windows(2) {
                prop_assert!((pair[1] - pair[0]) as f64 * spacing >= min_width);
            }
        }
    }
}
