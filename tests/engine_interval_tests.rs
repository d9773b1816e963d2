use zoom_chart::animation::{FrameClock, ease_out_quad};
use zoom_chart::api::InvalidationTopic;
use zoom_chart::core::{AxisInterval, Channel, DataSet, DataSetFlags, Interval, ViewSize};
use zoom_chart::render::{Color, NullRenderer};
use zoom_chart::{ChartEngine, ChartEngineConfig};

const DAY: f64 = 86_400.0;

/// Eleven days: a rising line and a flat one at 5.
fn line_data() -> DataSet {
    let timestamps = (0..11).map(|day| day as f64 * DAY).collect();
    let rising = (0..11).map(f64::from).collect();
    DataSet::new(
        timestamps,
        vec![
            Channel::new("rising", Color::from_hex(0x3cc23f), rising).expect("channel"),
            Channel::new("flat", Color::from_hex(0xf34c44), vec![5.0; 11]).expect("channel"),
        ],
        DataSetFlags::default(),
    )
    .expect("valid data set")
}

fn engine() -> ChartEngine<NullRenderer> {
    ChartEngine::with_data_set(
        NullRenderer::default(),
        line_data(),
        ChartEngineConfig::new(ViewSize::new(300.0, 220.0)),
    )
    .expect("engine init")
}

fn interval(min: f64, max: f64) -> AxisInterval {
    AxisInterval { min, max }
}

#[test]
fn zooming_in_animates_the_y_range_toward_the_visible_envelope() {
    let mut engine = engine();
    assert_eq!(engine.displayed_y_intervals(), &[interval(0.0, 10.0)]);
    assert!(engine.render_frame().expect("render"));

    engine
        .set_interval_x(Interval { min: 0.0, max: 0.3 })
        .expect("valid interval");
    assert_eq!(engine.viewport().visible_index_window(), (0, 3));
    assert_eq!(engine.target_y_intervals(), Some(&[interval(0.0, 5.0)][..]));
    assert_eq!(engine.displayed_y_intervals(), &[interval(0.0, 10.0)]);
    assert!(engine.has_pending_invalidation_topic(InvalidationTopic::Transform));

    let _ = engine.advance_frame(0.0).expect("tick");
    let _ = engine.advance_frame(0.15).expect("tick");
    let expected = 10.0 - 5.0 * ease_out_quad(0.5);
    assert!((engine.displayed_y_intervals()[0].max - expected).abs() <= 1e-9);
    assert!(engine.is_animating());

    let _ = engine.advance_frame(0.5).expect("tick");
    assert_eq!(engine.displayed_y_intervals(), &[interval(0.0, 5.0)]);
    assert!(!engine.is_animating());
    // The baseline is kept for the whole zoom session.
    assert_eq!(engine.viewport().default_diff_ys(), &[10.0]);
    assert_eq!(engine.renderer().y_updates, 1);

    let frame = engine.renderer().last_frame.as_ref().expect("frame uploaded");
    assert!((frame.matrices[0].scale_y() - 2.0).abs() <= 1e-9);
    assert!((frame.matrices[0].scale_x() - 1.0 / 0.3).abs() <= 1e-9);
}

#[test]
fn retargeting_mid_flight_starts_from_the_displayed_range() {
    let mut engine = engine();
    engine
        .set_interval_x(Interval { min: 0.0, max: 0.3 })
        .expect("valid interval");
    let _ = engine.advance_frame(0.0).expect("tick");
    let _ = engine.advance_frame(0.1).expect("tick");
    let displayed = engine.displayed_y_intervals()[0];

    engine
        .set_interval_x(Interval::UNIT)
        .expect("valid interval");
    assert_eq!(engine.target_y_intervals(), Some(&[interval(0.0, 10.0)][..]));
    assert_eq!(engine.displayed_y_intervals(), &[displayed]);

    let _ = engine.advance_frame(1.0).expect("tick");
    assert_eq!(engine.displayed_y_intervals(), &[interval(0.0, 10.0)]);
}

#[test]
fn panning_inside_the_same_envelope_does_nothing() {
    let mut engine = engine();
    engine
        .set_interval_x(Interval { min: 0.0, max: 0.3 })
        .expect("valid interval");
    let _ = engine.advance_frame(0.0).expect("tick");
    let _ = engine.advance_frame(1.0).expect("tick");

    engine
        .set_interval_x(Interval { min: 0.0, max: 0.31 })
        .expect("valid interval");
    assert!(!engine.is_animating());
    assert_eq!(engine.displayed_y_intervals(), &[interval(0.0, 5.0)]);
}

#[test]
fn legends_follow_zoom_transitions() {
    let mut engine = engine().with_default_legends();

    let time = engine.time_legend_frame().expect("time legend attached");
    let indices: Vec<usize> = time.labels.iter().map(|label| label.index).collect();
    assert_eq!(indices, vec![0, 2, 5, 7, 10]);

    let values = engine.value_legend_frame().expect("value legend attached");
    assert_eq!(values.axes.len(), 1);
    assert_eq!(values.axes[0].incoming.len(), 6);
    assert!(values.axes[0].outgoing.is_empty());

    engine
        .set_interval_x(Interval { min: 0.0, max: 0.3 })
        .expect("valid interval");
    let values = engine.value_legend_frame().expect("value legend attached");
    assert!(!values.axes[0].outgoing.is_empty());
    assert!(engine.has_pending_invalidation_topic(InvalidationTopic::ValueLegend));
    assert!(engine.has_pending_invalidation_topic(InvalidationTopic::TimeLegend));

    let _ = engine.advance_frame(0.0).expect("tick");
    let _ = engine.advance_frame(1.0).expect("tick");
    let values = engine.value_legend_frame().expect("value legend attached");
    assert!(values.axes[0].outgoing.is_empty());
    assert!(values.axes[0].incoming.iter().all(|line| line.alpha == 1.0));

    let time = engine.time_legend_frame().expect("time legend attached");
    assert!(time.labels.iter().all(|label| label.alpha == 1.0));
    assert!(time.labels.iter().any(|label| label.index == 1));
}

#[test]
fn zooming_again_mid_crossfade_keeps_every_gridline_in_place() {
    let timestamps = (0..101).map(|day| day as f64 * DAY).collect();
    let rising = (0..101).map(|i| f64::from(i) * 10.0).collect();
    let data_set = DataSet::new(
        timestamps,
        vec![Channel::new("rising", Color::from_hex(0x3cc23f), rising).expect("channel")],
        DataSetFlags::default(),
    )
    .expect("valid data set");
    let mut engine = ChartEngine::with_data_set(
        NullRenderer::default(),
        data_set,
        ChartEngineConfig::new(ViewSize::new(300.0, 220.0)),
    )
    .expect("engine init")
    .with_default_legends();

    engine
        .set_interval_x(Interval { min: 0.0, max: 0.5 })
        .expect("valid interval");
    let _ = engine.advance_frame(0.0).expect("tick");
    let _ = engine.advance_frame(0.03).expect("tick");
    let before = engine.value_legend_frame().expect("value legend attached");
    assert!(!before.axes[0].outgoing.is_empty());

    engine
        .set_interval_x(Interval { min: 0.0, max: 0.45 })
        .expect("valid interval");
    let after = engine.value_legend_frame().expect("value legend attached");

    let after_lines: Vec<_> = after.axes[0]
        .incoming
        .iter()
        .chain(&after.axes[0].outgoing)
        .collect();
    for line in before.axes[0].incoming.iter().chain(&before.axes[0].outgoing) {
        if line.alpha <= 0.0 {
            continue;
        }
        assert!(
            after_lines.iter().any(|next| next.value == line.value
                && (next.y - line.y).abs() <= 1e-9
                && (next.alpha - line.alpha).abs() <= 1e-9),
            "gridline {} jumped",
            line.value
        );
    }

    let _ = engine.advance_frame(1.0).expect("tick");
    let settled = engine.value_legend_frame().expect("value legend attached");
    assert!(settled.axes[0].outgoing.is_empty());
    assert!(settled.axes[0].incoming.iter().all(|line| line.alpha == 1.0));
}

#[test]
fn separate_axes_animate_and_transform_independently() {
    let timestamps = (0..11).map(|day| day as f64 * DAY).collect();
    let rising = (0..11).map(f64::from).collect();
    let falling = (0..11).map(|i| 1000.0 - 50.0 * f64::from(i)).collect();
    let data_set = DataSet::new(
        timestamps,
        vec![
            Channel::new("rising", Color::from_hex(0x3cc23f), rising).expect("channel"),
            Channel::new("falling", Color::from_hex(0xf34c44), falling).expect("channel"),
        ],
        DataSetFlags {
            y_scaled: true,
            ..DataSetFlags::default()
        },
    )
    .expect("valid data set");
    let mut engine = ChartEngine::with_data_set(
        NullRenderer::default(),
        data_set,
        ChartEngineConfig::new(ViewSize::new(300.0, 220.0)),
    )
    .expect("engine init");

    assert_eq!(
        engine.displayed_y_intervals(),
        &[interval(0.0, 10.0), interval(500.0, 1000.0)]
    );
    assert_eq!(engine.viewport().default_diff_ys(), &[10.0, 500.0]);

    // Channel 1 is normalized against its own axis: 1000 at the top, 500 at the bottom.
    assert!(engine.render_frame().expect("render"));
    let y_values = &engine.renderer().y_values;
    assert!((f64::from(y_values[1][0]) - 20.0 / 220.0).abs() <= 1e-6);
    assert!((f64::from(y_values[1][10]) - 1.0).abs() <= 1e-6);
    assert!((f64::from(y_values[0][10]) - 20.0 / 220.0).abs() <= 1e-6);

    engine
        .set_interval_x(Interval { min: 0.0, max: 0.3 })
        .expect("valid interval");
    assert_eq!(
        engine.target_y_intervals(),
        Some(&[interval(0.0, 3.0), interval(850.0, 1000.0)][..])
    );
    let _ = engine.advance_frame(0.0).expect("tick");
    let _ = engine.advance_frame(1.0).expect("tick");
    assert_eq!(
        engine.displayed_y_intervals(),
        &[interval(0.0, 3.0), interval(850.0, 1000.0)]
    );
    assert_eq!(engine.viewport().default_diff_ys(), &[10.0, 500.0]);

    let frame = engine.renderer().last_frame.as_ref().expect("frame uploaded");
    assert_eq!(frame.matrices.len(), 2);
    assert!((frame.matrices[0].scale_y() - 10.0 / 3.0).abs() <= 1e-9);
    assert!((frame.matrices[1].scale_y() - 500.0 / 150.0).abs() <= 1e-9);
}

#[test]
fn resizing_recomputes_defaults() {
    let mut engine = engine();
    engine
        .set_size(ViewSize::new(600.0, 420.0))
        .expect("valid size");

    assert!((engine.viewport().spacing_x() - 60.0).abs() <= 1e-9);
    assert_eq!(engine.renderer().x_updates, 2);
    assert!(engine.has_pending_invalidation_topic(InvalidationTopic::XValues));
    assert!(engine.set_size(ViewSize::new(-1.0, 10.0)).is_err());
}

#[test]
fn engines_tick_from_a_shared_frame_clock() {
    let mut clock = FrameClock::new();
    let first = clock.register(engine());
    let second = clock.register(engine());

    assert_eq!(clock.tick(0.0), 0);
    for registration in [&first, &second] {
        let engine = clock.get(registration).expect("registered");
        assert_eq!(engine.renderer().render_count, 1);
    }

    clock
        .get_mut(&first)
        .expect("registered")
        .set_interval_x(Interval { min: 0.0, max: 0.3 })
        .expect("valid interval");
    let _ = clock.tick(0.1);
    let _ = clock.tick(1.0);

    let zoomed = clock.unregister(first).expect("registered");
    assert_eq!(zoomed.displayed_y_intervals(), &[interval(0.0, 5.0)]);
    assert_eq!(clock.len(), 1);
    let idle = clock.get(&second).expect("registered");
    assert_eq!(idle.renderer().render_count, 1);
}
