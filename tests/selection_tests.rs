use zoom_chart::api::InvalidationTopic;
use zoom_chart::core::{Channel, DataSet, DataSetFlags, Interval, ViewSize};
use zoom_chart::render::{Color, NullRenderer, SelectionType};
use zoom_chart::{ChartEngine, ChartEngineConfig};

const DAY: f64 = 86_400.0;

fn data(first: Vec<f64>, second: Vec<f64>, flags: DataSetFlags) -> DataSet {
    let timestamps = (0..first.len()).map(|day| day as f64 * DAY).collect();
    DataSet::new(
        timestamps,
        vec![
            Channel::new("joined", Color::from_hex(0x3cc23f), first).expect("channel"),
            Channel::new("left", Color::from_hex(0xf34c44), second).expect("channel"),
        ],
        flags,
    )
    .expect("valid data set")
}

fn line_data() -> DataSet {
    data((0..11).map(f64::from).collect(), vec![5.0; 11], DataSetFlags::default())
}

fn config() -> ChartEngineConfig {
    ChartEngineConfig::new(ViewSize::new(300.0, 220.0))
}

fn engine_with(renderer: NullRenderer, data_set: DataSet) -> ChartEngine<NullRenderer> {
    ChartEngine::with_data_set(renderer, data_set, config()).expect("engine init")
}

#[test]
fn scrubbing_selects_the_closest_sample() {
    let mut engine = engine_with(NullRenderer::default(), line_data());
    let details = engine.move_selection(0.5).expect("details enabled");

    assert_eq!(details.index, 5);
    assert_eq!(details.timestamp, 5.0 * DAY);
    assert!((details.x - 150.0).abs() <= 1e-9);
    assert_eq!(details.readings.len(), 2);
    assert_eq!(details.readings[0].name, "joined");
    assert_eq!(details.readings[0].value, 5.0);
    assert!(details.readings.iter().all(|reading| {
        reading
            .y
            .is_some_and(|y| (y - 120.0).abs() <= 1e-9)
    }));
    assert_eq!(details.total, None);
    assert_eq!(details.mask, None);
    assert_eq!(engine.selected_index(), Some(5));
    assert!(engine.has_pending_invalidation_topic(InvalidationTopic::Selection));

    let edge = engine.move_selection(1.2).expect("details enabled");
    assert_eq!(edge.index, 10);
    let start = engine.move_selection(-0.3).expect("details enabled");
    assert_eq!(start.index, 0);
}

#[test]
fn hidden_channels_are_left_out_of_the_readout() {
    let mut engine = engine_with(NullRenderer::default(), line_data());
    engine.disable_channels(&[1]).expect("channel exists");

    let details = engine.move_selection(0.2).expect("details enabled");
    assert_eq!(details.index, 2);
    assert_eq!(details.readings.len(), 1);
    assert_eq!(details.readings[0].channel, 0);
}

#[test]
fn stacked_readout_reports_the_total_and_stack_levels() {
    let stacked = DataSetFlags {
        stacked: true,
        ..DataSetFlags::default()
    };
    let mut engine = engine_with(
        NullRenderer::default(),
        data(vec![1.0, 5.0, 3.0], vec![2.0, 2.0, 2.0], stacked),
    );

    let details = engine.move_selection(0.5).expect("details enabled");
    assert_eq!(details.index, 1);
    assert_eq!(details.total, Some(7.0));
    let spacing = 200.0 / 7.0;
    let first_y = details.readings[0].y.expect("point selection");
    let second_y = details.readings[1].y.expect("point selection");
    assert!((first_y - (20.0 + 2.0 * spacing)).abs() <= 1e-9);
    assert!((second_y - 20.0).abs() <= 1e-9);
}

#[test]
fn percentage_readout_reports_rounded_shares() {
    let percentage = DataSetFlags {
        stacked: true,
        percentage: true,
        y_scaled: false,
    };
    let mut engine = engine_with(
        NullRenderer::default(),
        data(vec![1.0, 3.0], vec![3.0, 1.0], percentage),
    );

    let details = engine.move_selection(0.1).expect("details enabled");
    assert_eq!(details.index, 0);
    assert_eq!(details.readings[0].percentage, Some(25.0));
    assert_eq!(details.readings[1].percentage, Some(75.0));
    assert_eq!(details.total, None);
}

#[test]
fn mask_selection_reports_the_undimmed_column() {
    let mut engine = engine_with(
        NullRenderer::default().with_selection_type(SelectionType::Mask),
        line_data(),
    );
    let details = engine.move_selection(0.5).expect("details enabled");

    let (left, right) = details.mask.expect("mask selection");
    assert!((left - 135.0).abs() <= 1e-9);
    assert!((right - 165.0).abs() <= 1e-9);
    assert!(details.readings.iter().all(|reading| reading.y.is_none()));
}

#[test]
fn selection_follows_the_view_after_zoom() {
    let mut engine = engine_with(NullRenderer::default(), line_data());
    let _ = engine.move_selection(0.5).expect("details enabled");

    engine
        .set_interval_x(Interval { min: 0.0, max: 0.4 })
        .expect("valid interval");
    assert!(engine.render_frame().expect("render"));
    assert_eq!(engine.selected_index(), Some(2));
    assert_eq!(
        engine.selection_details().map(|details| details.index),
        Some(2)
    );
}

#[test]
fn ending_or_disabling_details_clears_the_readout() {
    let mut engine = engine_with(NullRenderer::default(), line_data());
    let _ = engine.move_selection(0.5).expect("details enabled");
    engine.end_selection();
    assert_eq!(engine.selected_index(), None);
    assert!(engine.selection_details().is_none());
    assert!(engine.move_selection(f64::NAN).is_none());

    let mut quiet = ChartEngine::with_data_set(
        NullRenderer::default(),
        line_data(),
        config().with_details_enabled(false),
    )
    .expect("engine init");
    assert!(quiet.move_selection(0.5).is_none());
    assert_eq!(quiet.selected_index(), None);
}
