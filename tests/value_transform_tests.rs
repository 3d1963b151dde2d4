use approx::assert_relative_eq;
use chart_axis::core::tick_unit::MILLIS_PER_DAY;
use chart_axis::core::{
    AxisTimeline, CyclicTransform, DateTransform, DeviceInterval, LogTransform, ModuloTransform,
    Range, RectangleEdge, SegmentedTimeline, Timeline, TransformKind, ValueTransform,
};

fn range(lower: f64, upper: f64) -> Range {
    Range::new(lower, upper).expect("valid range")
}

fn interval(min: f64, max: f64, edge: RectangleEdge) -> DeviceInterval {
    DeviceInterval::new(min, max, edge).expect("valid interval")
}

#[test]
fn linear_maps_along_x_and_against_y() {
    let transform = ValueTransform::linear(range(0.0, 100.0));
    let bottom = interval(50.0, 550.0, RectangleEdge::Bottom);
    let left = interval(20.0, 420.0, RectangleEdge::Left);

    assert_relative_eq!(transform.forward(0.0, bottom), 50.0);
    assert_relative_eq!(transform.forward(25.0, bottom), 175.0);
    assert_relative_eq!(transform.forward(100.0, bottom), 550.0);

    assert_relative_eq!(transform.forward(0.0, left), 420.0);
    assert_relative_eq!(transform.forward(25.0, left), 320.0);
    assert_relative_eq!(transform.forward(100.0, left), 20.0);
}

#[test]
fn inverted_linear_swaps_device_ends() {
    let transform = ValueTransform::linear(range(0.0, 100.0)).with_inverted(true);
    let top = interval(0.0, 200.0, RectangleEdge::Top);
    let right = interval(0.0, 200.0, RectangleEdge::Right);

    assert_relative_eq!(transform.forward(0.0, top), 200.0);
    assert_relative_eq!(transform.forward(75.0, top), 50.0);
    assert_relative_eq!(transform.forward(0.0, right), 0.0);
    assert_relative_eq!(transform.inverse(50.0, top), 75.0);
}

#[test]
fn values_outside_range_extrapolate() {
    let transform = ValueTransform::linear(range(0.0, 10.0));
    let area = interval(0.0, 100.0, RectangleEdge::Bottom);

    assert_relative_eq!(transform.forward(-5.0, area), -50.0);
    assert_relative_eq!(transform.forward(20.0, area), 200.0, epsilon = 1e-9);
    assert_relative_eq!(transform.inverse(150.0, area), 15.0);
}

#[test]
fn degenerate_range_maps_every_value_to_the_midpoint() {
    let transform = ValueTransform::linear(range(3.0, 3.0));
    let area = interval(100.0, 300.0, RectangleEdge::Bottom);

    assert_relative_eq!(transform.forward(3.0, area), 200.0);
    assert_relative_eq!(transform.forward(-40.0, area), 200.0);
}

#[test]
fn log_transform_spaces_decades_evenly() {
    let transform = ValueTransform::new(
        TransformKind::Log(LogTransform::default()),
        range(1.0, 1_000.0),
        false,
    );
    let area = interval(0.0, 300.0, RectangleEdge::Bottom);

    assert_relative_eq!(transform.forward(10.0, area), 100.0, epsilon = 1e-9);
    assert_relative_eq!(transform.forward(100.0, area), 200.0, epsilon = 1e-9);
    assert_relative_eq!(transform.inverse(150.0, area), 10f64.powf(1.5), max_relative = 1e-12);
}

#[test]
fn log_transform_clamps_non_positive_values_to_smallest_value() {
    let log = LogTransform::default()
        .with_smallest_value(1e-3)
        .expect("valid smallest value");
    let transform = ValueTransform::new(TransformKind::Log(log), range(1.0, 1_000.0), false);
    let area = interval(0.0, 300.0, RectangleEdge::Bottom);

    let at_zero = transform.forward(0.0, area);
    let at_negative = transform.forward(-10.0, area);
    assert!(at_zero.is_finite());
    assert_relative_eq!(at_zero, -300.0, epsilon = 1e-9);
    assert_relative_eq!(at_negative, at_zero);
}

#[test]
fn switched_log_passes_smoothly_through_zero() {
    let log = LogTransform::default().with_switched(true);

    assert_eq!(log.calculate_log(0.0), 0.0);
    assert_relative_eq!(log.calculate_log(10.0), 1.0, epsilon = 1e-12);
    assert_relative_eq!(log.calculate_log(-10.0), -1.0, epsilon = 1e-12);
    assert_relative_eq!(log.calculate_log(1_000.0), 3.0, epsilon = 1e-12);
    assert!(log.calculate_log(0.5) > 0.0);
    assert!(log.calculate_log(0.5) < log.calculate_log(1.0));

    for value in [-250.0, -3.0, -0.2, 0.0, 0.7, 4.0, 9.99, 12.0] {
        let back = log.calculate_value(log.calculate_log(value));
        assert_relative_eq!(back, value, epsilon = 1e-9, max_relative = 1e-9);
    }

    let transform = ValueTransform::new(TransformKind::Log(log), range(-100.0, 100.0), false);
    let area = interval(0.0, 400.0, RectangleEdge::Bottom);
    assert_relative_eq!(transform.forward(0.0, area), 200.0, epsilon = 1e-9);
    assert!(transform.forward(-5.0, area) < transform.forward(5.0, area));
}

#[test]
fn log_rejects_invalid_parameters() {
    assert!(LogTransform::new(1.0).is_err());
    assert!(LogTransform::new(f64::NAN).is_err());
    assert!(LogTransform::new(2.0).expect("base 2").with_smallest_value(0.0).is_err());
}

#[test]
fn date_transform_skips_weekends() {
    let day = MILLIS_PER_DAY as f64;
    // Monday 2024-01-01 through Monday 2024-01-15: ten trading days.
    let monday = 1_704_067_200_000.0;
    let transform = ValueTransform::new(
        TransformKind::Date(DateTransform::new(AxisTimeline::Segmented(
            SegmentedTimeline::monday_through_friday(),
        ))),
        range(monday, monday + 14.0 * day),
        false,
    );
    let area = interval(0.0, 1_000.0, RectangleEdge::Bottom);

    let friday = transform.forward(monday + 4.0 * day, area);
    let saturday = transform.forward(monday + 5.0 * day, area);
    let next_monday = transform.forward(monday + 7.0 * day, area);

    assert_relative_eq!(friday, 400.0, epsilon = 1e-6);
    assert_relative_eq!(saturday, 500.0, epsilon = 1e-6);
    assert_relative_eq!(next_monday, 500.0, epsilon = 1e-6);

    let back = transform.inverse(450.0, area);
    assert_relative_eq!(back, monday + 4.5 * day, epsilon = 1.0);
}

#[test]
fn date_inverse_keeps_session_starts_on_their_own_day() {
    let day = MILLIS_PER_DAY as f64;
    let monday = 1_704_067_200_000.0;
    let timeline = AxisTimeline::Segmented(SegmentedTimeline::monday_through_friday());
    let area = interval(0.0, 1_407.5, RectangleEdge::Bottom);

    for weeks in 1..60 {
        let lower = monday - 3.0 * day + 1_234.0;
        let upper = monday + f64::from(weeks) * 7.0 * day + 98_765.0;
        let transform = ValueTransform::new(
            TransformKind::Date(DateTransform::new(timeline.clone())),
            range(lower, upper),
            false,
        );
        for week in 0..weeks {
            let session_start = monday + f64::from(week) * 7.0 * day;
            let px = transform.forward(session_start, area);
            let back = transform.inverse(px, area);
            assert!(
                (back - session_start).abs() <= 1.0,
                "week {week} of {weeks}: {back} vs {session_start}"
            );
        }
    }
}

#[test]
fn segmented_inverse_snaps_rounding_noise_below_a_segment_start() {
    let day = MILLIS_PER_DAY as f64;
    let next_monday = 1_704_067_200_000.0 + 7.0 * day;
    let timeline = AxisTimeline::Segmented(SegmentedTimeline::monday_through_friday());

    let compressed = timeline.to_timeline_value(next_monday);
    let just_below = f64::from_bits(compressed.to_bits() - 1);

    assert_eq!(timeline.to_millisecond(compressed), next_monday);
    assert_eq!(timeline.to_millisecond(just_below), next_monday);
    assert_relative_eq!(
        timeline.to_millisecond(compressed - 0.5),
        next_monday - 2.0 * day - 0.5,
        epsilon = 1e-2
    );
}

#[test]
fn calendar_date_transform_is_linear() {
    let transform = ValueTransform::new(
        TransformKind::Date(DateTransform::default()),
        range(0.0, 1_000.0),
        false,
    );
    let area = interval(0.0, 100.0, RectangleEdge::Bottom);

    assert_relative_eq!(transform.forward(250.0, area), 25.0);
    assert_relative_eq!(transform.length_to_device(100.0, area), 10.0);
}

fn compass(start: f64, end: f64) -> ValueTransform {
    let modulo = ModuloTransform::new(range(0.0, 360.0))
        .expect("valid base")
        .with_display_range(start, end)
        .expect("valid window");
    ValueTransform::new(TransformKind::Modulo(modulo), modulo.display_range(), false)
}

#[test]
fn modulo_window_without_wrap_is_linear() {
    let transform = compass(90.0, 270.0);
    let area = interval(0.0, 180.0, RectangleEdge::Bottom);

    assert_relative_eq!(transform.forward(90.0, area), 0.0);
    assert_relative_eq!(transform.forward(180.0, area), 90.0);
    assert_relative_eq!(transform.forward(180.0 + 360.0, area), 90.0);
    assert_relative_eq!(transform.inverse(45.0, area), 135.0);
}

#[test]
fn modulo_window_wraps_across_the_base_boundary() {
    let transform = compass(270.0, 90.0);
    let area = interval(0.0, 180.0, RectangleEdge::Bottom);

    assert_relative_eq!(transform.forward(270.0, area), 0.0);
    assert_relative_eq!(transform.forward(315.0, area), 45.0);
    assert_relative_eq!(transform.forward(0.0, area), 90.0);
    assert_relative_eq!(transform.forward(360.0, area), 90.0);
    assert_relative_eq!(transform.forward(45.0, area), 135.0);
    assert_relative_eq!(transform.forward(-45.0, area), 45.0);

    assert_relative_eq!(transform.inverse(45.0, area), 315.0);
    assert_relative_eq!(transform.inverse(135.0, area), 45.0);
}

#[test]
fn modulo_display_range_and_segments() {
    let modulo = ModuloTransform::new(range(0.0, 360.0))
        .expect("valid base")
        .with_display_range(-90.0, 450.0)
        .expect("valid window");

    assert_eq!(modulo.display_start(), 270.0);
    assert_eq!(modulo.display_end(), 90.0);
    assert!(modulo.is_wrapping());
    assert_eq!(modulo.display_range(), range(270.0, 450.0));
    assert_eq!(
        modulo.display_segments().as_slice(),
        &[(270.0, 360.0), (0.0, 90.0)]
    );
}

#[test]
fn cyclic_bound_sits_on_either_device_end() {
    let cyclic = CyclicTransform::new(24.0, 0.0).expect("valid cycle");
    let area = interval(0.0, 240.0, RectangleEdge::Bottom);
    let last_cycle =
        ValueTransform::new(TransformKind::Cyclic(cyclic), range(0.0, 24.0), false);
    let first_cycle = last_cycle.clone().with_bound_mapped_to_last_cycle(false);

    let end = last_cycle.forward(24.0, area);
    let start = first_cycle.forward(24.0, area);
    assert_relative_eq!(end, 240.0);
    assert_relative_eq!(start, 0.0);
    assert!(area.min() <= start && end <= area.max());

    assert_relative_eq!(last_cycle.forward(6.0, area), 60.0, epsilon = 1e-9);
    assert!(last_cycle.forward(30.0, area).is_nan());
    assert!(last_cycle.forward(-1.0, area).is_nan());
}

#[test]
fn cyclic_range_straddling_the_bound_splits_the_device_interval() {
    // Range [10, 34] with period 24: bound is 24, so [24, 34] fills the
    // first ten units of the device and [10, 24) the remaining fourteen.
    let cyclic = CyclicTransform::new(24.0, 0.0).expect("valid cycle");
    let transform = ValueTransform::new(TransformKind::Cyclic(cyclic), range(10.0, 34.0), false);
    let area = interval(0.0, 240.0, RectangleEdge::Bottom);

    assert_eq!(cyclic.cycle_bound(range(10.0, 34.0)), 24.0);
    assert_relative_eq!(transform.forward(30.0, area), 60.0, epsilon = 1e-9);
    assert_relative_eq!(transform.forward(34.0, area), 100.0, epsilon = 1e-9);
    assert_relative_eq!(transform.forward(10.0, area), 100.0, epsilon = 1e-9);
    assert_relative_eq!(transform.forward(20.0, area), 200.0, epsilon = 1e-9);

    assert_relative_eq!(transform.inverse(60.0, area), 30.0, epsilon = 1e-9);
    assert_relative_eq!(transform.inverse(200.0, area), 20.0, epsilon = 1e-9);
}

#[test]
fn length_to_device_follows_each_mapping() {
    let area = interval(0.0, 300.0, RectangleEdge::Left);

    let linear = ValueTransform::linear(range(0.0, 30.0));
    assert_relative_eq!(linear.length_to_device(10.0, area), 100.0);

    let log = ValueTransform::new(
        TransformKind::Log(LogTransform::default()),
        range(1.0, 1_000.0),
        false,
    );
    assert_relative_eq!(log.length_to_device(1.0, area), 100.0, epsilon = 1e-9);

    let cyclic = ValueTransform::new(
        TransformKind::Cyclic(CyclicTransform::new(24.0, 0.0).expect("valid cycle")),
        range(0.0, 24.0),
        false,
    );
    assert_relative_eq!(cyclic.length_to_device(6.0, area), 75.0);
}
