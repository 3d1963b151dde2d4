use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use chart_axis::core::{
    AxisTimeline, CyclicTransform, DateTickUnitType, DeviceInterval, LogTransform,
    ModuloTransform, Range, RectangleEdge, TextAnchor, TickLabelFont, TickLabelFormat, TickUnit,
    TickUnitKind, TransformKind,
};
use chart_axis::extensions::{AxisChangeEvent, AxisChangeListener};
use chart_axis::render::{Color, MonospaceMeasurer, NullRenderer};
use chart_axis::{Axis, AxisConfig, AxisError};

struct RecordingListener {
    id: String,
    events: Rc<RefCell<Vec<AxisChangeEvent>>>,
}

impl RecordingListener {
    fn boxed(
        id: impl Into<String>,
        events: Rc<RefCell<Vec<AxisChangeEvent>>>,
    ) -> Box<dyn AxisChangeListener> {
        Box::new(Self {
            id: id.into(),
            events,
        })
    }
}

impl AxisChangeListener for RecordingListener {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_axis_changed(&mut self, event: AxisChangeEvent) {
        self.events.borrow_mut().push(event);
    }
}

fn range(lower: f64, upper: f64) -> Range {
    Range::new(lower, upper).expect("valid range")
}

fn bottom(width: f64) -> DeviceInterval {
    DeviceInterval::new(0.0, width, RectangleEdge::Bottom).expect("valid interval")
}

fn left(height: f64) -> DeviceInterval {
    DeviceInterval::new(0.0, height, RectangleEdge::Left).expect("valid interval")
}

fn number_axis_over(lower: f64, upper: f64) -> Axis {
    let mut axis = Axis::number();
    axis.set_range(range(lower, upper)).expect("valid range");
    axis
}

#[test]
fn number_axis_without_data_uses_default_range_with_margin() {
    let axis = Axis::number();

    assert_eq!(axis.range().lower(), 0.0);
    assert_relative_eq!(axis.range().upper(), 1.05);
    assert!(axis.config().auto_range);
}

#[test]
fn data_range_drives_auto_range() {
    let config = AxisConfig::default()
        .with_margins(0.1, 0.1)
        .with_auto_range_includes_zero(false);
    let mut axis = Axis::new(TransformKind::Linear, config).expect("valid config");

    axis.set_data_range(Some(range(2.0, 10.0)));

    assert_relative_eq!(axis.range().lower(), 1.2, max_relative = 1e-12);
    assert_relative_eq!(axis.range().upper(), 10.8, max_relative = 1e-12);
    assert_eq!(axis.data_range(), Some(range(2.0, 10.0)));
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = AxisConfig::default().with_margins(-0.5, 0.0);

    let result = Axis::new(TransformKind::Linear, config);

    assert!(matches!(result, Err(AxisError::InvalidConfig(_))));
}

#[test]
fn listeners_receive_range_and_config_events() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut axis = Axis::number();
    axis.add_listener(RecordingListener::boxed("recorder", Rc::clone(&events)))
        .expect("register listener");

    axis.set_data_range(Some(range(0.0, 100.0)));
    axis.set_margins(0.0, 0.0).expect("valid margins");

    assert_eq!(
        events.borrow().as_slice(),
        &[
            AxisChangeEvent::RangeChanged {
                range: range(0.0, 105.0)
            },
            AxisChangeEvent::ConfigChanged,
            AxisChangeEvent::RangeChanged {
                range: range(0.0, 100.0)
            },
        ]
    );
}

#[test]
fn listener_ids_must_be_unique_and_non_empty() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut axis = Axis::number();

    axis.add_listener(RecordingListener::boxed("a", Rc::clone(&events)))
        .expect("first listener");
    let duplicate = axis.add_listener(RecordingListener::boxed("a", Rc::clone(&events)));
    let empty = axis.add_listener(RecordingListener::boxed("", Rc::clone(&events)));

    assert!(matches!(duplicate, Err(AxisError::InvalidConfig(_))));
    assert!(matches!(empty, Err(AxisError::InvalidConfig(_))));
    assert_eq!(axis.listener_count(), 1);
    assert!(axis.has_listener("a"));
}

#[test]
fn removed_listener_stops_receiving_events() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut axis = Axis::number();
    axis.add_listener(RecordingListener::boxed("a", Rc::clone(&events)))
        .expect("register listener");

    assert!(axis.remove_listener("a"));
    assert!(!axis.remove_listener("a"));
    axis.set_data_range(Some(range(0.0, 10.0)));

    assert!(events.borrow().is_empty());
}

#[test]
fn unchanged_setting_emits_nothing() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut axis = Axis::number();
    axis.add_listener(RecordingListener::boxed("a", Rc::clone(&events)))
        .expect("register listener");

    axis.set_inverted(false).expect("valid setting");
    axis.set_data_range(None);

    assert!(events.borrow().is_empty());
}

#[test]
fn setters_validate_and_leave_config_untouched_on_error() {
    let mut axis = Axis::number();
    let before = axis.config().clone();

    assert!(axis.set_lower_margin(-0.1).is_err());
    assert!(axis.set_upper_margin(f64::NAN).is_err());
    assert!(axis.set_auto_range_minimum_size(0.0).is_err());
    assert!(axis.set_max_tick_count(0).is_err());
    assert!(
        axis.set_tick_label_font(TickLabelFont {
            family: "mono".to_owned(),
            size: 0.0,
        })
        .is_err()
    );
    assert!(axis.set_default_auto_range(range(1.0, 1.0)).is_err());

    assert_eq!(axis.config(), &before);
}

#[test]
fn explicit_range_turns_auto_range_off() {
    let mut axis = Axis::number();

    axis.set_range(range(3.0, 7.0)).expect("valid range");
    axis.set_data_range(Some(range(0.0, 100.0)));

    assert_eq!(axis.range(), range(3.0, 7.0));
    assert!(!axis.config().auto_range);
    assert!(matches!(
        axis.set_range(range(5.0, 5.0)),
        Err(AxisError::InvalidRange { .. })
    ));

    axis.set_auto_range(true).expect("valid setting");
    assert_relative_eq!(axis.range().upper(), 105.0);
}

#[test]
fn pixel_mapping_round_trips_on_the_axis() {
    let axis = number_axis_over(0.0, 100.0);
    let area = left(400.0);

    assert_relative_eq!(axis.to_pixel(25.0, area), 300.0);
    assert_relative_eq!(axis.to_value(300.0, area), 25.0);
    assert_relative_eq!(axis.length_to_pixels(10.0, area), 40.0);
}

#[test]
fn zoom_and_pan_move_the_visible_range() {
    let mut axis = number_axis_over(0.0, 100.0);

    axis.zoom_range(0.25, 0.75).expect("valid zoom");
    assert_eq!(axis.range(), range(25.0, 75.0));

    axis.set_inverted(true).expect("valid setting");
    axis.zoom_range(0.0, 0.5).expect("valid zoom");
    assert_eq!(axis.range(), range(50.0, 75.0));

    let mut axis = number_axis_over(0.0, 100.0);
    axis.pan(0.5).expect("valid pan");
    assert_eq!(axis.range(), range(50.0, 150.0));

    assert!(axis.zoom_range(0.5, 0.5).is_err());
    assert!(axis.pan(f64::NAN).is_err());
}

#[test]
fn auto_tick_unit_fits_measured_labels() {
    let mut axis = number_axis_over(0.0, 100.0);

    let ticks = axis.compute_ticks(bottom(500.0), &MonospaceMeasurer::default());

    assert_eq!(axis.tick_unit().size(), 10.0);
    assert_eq!(ticks.len(), 11);
    assert_eq!(ticks[10].label, "100");
    assert!(ticks.iter().all(|tick| tick.text_anchor == TextAnchor::TopCenter));
}

#[test]
fn wider_labels_select_a_larger_unit() {
    let mut axis = number_axis_over(0.0, 100.0);
    let wide = |text: &str, _font: &TickLabelFont| {
        chart_axis::core::LabelSize::new(text.chars().count() as f64 * 40.0, 12.0)
    };

    axis.compute_ticks(bottom(500.0), &wide);

    assert_eq!(axis.tick_unit().size(), 50.0);
}

#[test]
fn repeated_unit_selection_is_stable() {
    let measurer = MonospaceMeasurer::default();
    let cases = [
        (-0.536, 4_491_708.03, 26.4),
        (306_953.972_008_54, 306_953.972_011_42, 1_407.5),
        (0.0, 100.0, 500.0),
    ];

    for (lower, upper, width) in cases {
        let mut axis = number_axis_over(lower, upper);
        let first = axis.select_auto_tick_unit(bottom(width), &measurer);
        let second = axis.select_auto_tick_unit(bottom(width), &measurer);
        let third = axis.select_auto_tick_unit(bottom(width), &measurer);

        assert_eq!(first, second, "range [{lower}, {upper}] at {width} px");
        assert_eq!(second, third, "range [{lower}, {upper}] at {width} px");
    }
}

#[test]
fn unit_selection_does_not_remember_earlier_measurements() {
    let mut axis = number_axis_over(0.0, 100.0);
    let wide = |text: &str, _font: &TickLabelFont| {
        chart_axis::core::LabelSize::new(text.chars().count() as f64 * 40.0, 12.0)
    };

    axis.select_auto_tick_unit(bottom(500.0), &wide);
    assert_eq!(axis.tick_unit().size(), 50.0);

    let unit = axis.select_auto_tick_unit(bottom(500.0), &MonospaceMeasurer::default());
    assert_eq!(unit.size(), 10.0);
}

#[test]
fn fixed_tick_unit_disables_auto_selection() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut axis = number_axis_over(0.0, 100.0);
    axis.add_listener(RecordingListener::boxed("a", Rc::clone(&events)))
        .expect("register listener");

    axis.set_tick_unit(TickUnit::number(25.0, TickLabelFormat::decimal(0)))
        .expect("valid unit");
    let ticks = axis.compute_ticks(bottom(500.0), &MonospaceMeasurer::default());

    assert!(!axis.config().auto_tick_unit_selection);
    assert_eq!(ticks.len(), 5);
    assert_eq!(
        events.borrow().as_slice(),
        &[AxisChangeEvent::TickUnitChanged { size: 25.0 }]
    );
    assert!(
        axis.set_tick_unit(TickUnit::number(0.0, TickLabelFormat::decimal(0)))
            .is_err()
    );
}

#[test]
fn manual_tick_unit_size_snaps_to_source() {
    let mut axis = number_axis_over(0.0, 100.0);
    let config = axis
        .config()
        .clone()
        .with_auto_tick_unit_selection(false)
        .with_tick_unit_size(3.0);

    axis.set_config(config).expect("valid config");

    assert_eq!(axis.tick_unit().size(), 5.0);
}

#[test]
fn reserve_space_covers_marks_labels_and_insets() {
    let measurer = MonospaceMeasurer::default();

    let mut horizontal = number_axis_over(0.0, 100.0);
    assert_relative_eq!(horizontal.reserve_space(bottom(500.0), &measurer), 18.0);

    let mut vertical = number_axis_over(0.0, 100.0);
    assert_relative_eq!(vertical.reserve_space(left(400.0), &measurer), 28.0);
    assert_eq!(vertical.tick_unit().size(), 5.0);

    vertical.set_visible(false).expect("valid setting");
    assert_eq!(vertical.reserve_space(left(400.0), &measurer), 0.0);
}

#[test]
fn frame_places_marks_and_labels_outside_the_axis_line() {
    let mut axis = number_axis_over(0.0, 100.0);
    let color = Color::rgb(0.1, 0.2, 0.3);

    let frame = axis
        .build_frame(bottom(500.0), 300.0, &MonospaceMeasurer::default(), color)
        .expect("valid frame");

    let line = frame.axis_line.expect("axis line");
    assert_eq!((line.x1, line.y1, line.x2, line.y2), (0.0, 300.0, 500.0, 300.0));
    assert_eq!(frame.tick_marks.len(), 11);
    assert_eq!(frame.labels.len(), 11);

    let mark = frame.tick_marks[1];
    assert_relative_eq!(mark.x1, 50.0);
    assert_eq!((mark.y1, mark.y2), (300.0, 302.0));
    let label = &frame.labels[1];
    assert_eq!(label.text, "10");
    assert_relative_eq!(label.y, 304.0);
    assert_eq!(label.anchor, TextAnchor::TopCenter);
    assert_eq!(label.color, color);
}

#[test]
fn left_axis_frame_points_marks_leftwards() {
    let mut axis = number_axis_over(0.0, 100.0);

    let frame = axis
        .build_frame(left(400.0), 60.0, &MonospaceMeasurer::default(), Color::default())
        .expect("valid frame");

    let mark = frame.tick_marks[0];
    assert_eq!((mark.x1, mark.x2), (60.0, 58.0));
    assert_relative_eq!(mark.y1, 400.0);
    assert_eq!(frame.labels[0].anchor, TextAnchor::CenterRight);
    assert_relative_eq!(frame.labels[0].x, 54.0);
}

#[test]
fn minor_marks_are_half_length() {
    let mut axis = number_axis_over(0.0, 100.0);
    axis.set_minor_ticks_visible(true).expect("valid setting");

    let frame = axis
        .build_frame(bottom(500.0), 0.0, &MonospaceMeasurer::default(), Color::default())
        .expect("valid frame");

    assert_eq!(frame.tick_marks.len(), 21);
    assert_eq!(frame.labels.len(), 11);
    let minor = frame.tick_marks[1];
    assert_relative_eq!(minor.x1, 25.0);
    assert_relative_eq!(minor.y2 - minor.y1, 1.0);
}

#[test]
fn draw_hands_the_frame_to_the_renderer() {
    let mut axis = number_axis_over(0.0, 100.0);
    let mut renderer = NullRenderer::default();

    axis.draw(
        &mut renderer,
        bottom(500.0),
        300.0,
        &MonospaceMeasurer::default(),
        Color::default(),
    )
    .expect("draw succeeds");

    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_tick_mark_count, 11);
    assert_eq!(renderer.last_label_count, 11);
}

#[test]
fn invalid_frame_geometry_is_reported() {
    let mut axis = number_axis_over(0.0, 100.0);
    let measurer = MonospaceMeasurer::default();

    let cursor = axis.build_frame(bottom(500.0), f64::INFINITY, &measurer, Color::default());
    let color = axis.build_frame(bottom(500.0), 0.0, &measurer, Color::rgb(2.0, 0.0, 0.0));

    assert!(matches!(cursor, Err(AxisError::InvalidFrame(_))));
    assert!(matches!(color, Err(AxisError::InvalidFrame(_))));
}

#[test]
fn hidden_axis_builds_an_empty_frame() {
    let mut axis = number_axis_over(0.0, 100.0);
    axis.set_visible(false).expect("valid setting");

    let frame = axis
        .build_frame(bottom(500.0), 0.0, &MonospaceMeasurer::default(), Color::default())
        .expect("valid frame");

    assert!(frame.is_empty());
}

#[test]
fn symbol_axis_labels_integer_positions() {
    let symbols = vec!["low".to_owned(), "mid".to_owned(), "high".to_owned()];
    let mut axis = Axis::symbol(symbols);

    assert_eq!(axis.range(), range(-0.5, 2.5));

    let ticks = axis.compute_ticks(bottom(300.0), &MonospaceMeasurer::default());
    let labels: Vec<&str> = ticks.iter().map(|tick| tick.label.as_str()).collect();

    assert_eq!(labels, vec!["low", "mid", "high"]);
    assert_eq!(axis.tick_unit().size(), 1.0);
}

#[test]
fn log_axis_auto_range_applies_margins_to_exponents() {
    let mut axis = Axis::log(LogTransform::default());

    axis.set_data_range(Some(range(1.0, 1_000.0)));

    assert_relative_eq!(axis.range().lower(), 10f64.powf(-0.15), max_relative = 1e-12);
    assert_relative_eq!(axis.range().upper(), 10f64.powf(3.15), max_relative = 1e-12);

    let area = left(300.0);
    let ticks = axis.compute_ticks(area, &MonospaceMeasurer::default());
    assert!(!ticks.is_empty());
    assert!(
        ticks
            .iter()
            .all(|tick| (area.min()..=area.max()).contains(&tick.position))
    );
}

#[test]
fn date_axis_picks_calendar_units() {
    // 2024-01-01 to 2024-01-31
    let mut axis = Axis::date(AxisTimeline::Calendar);
    axis.set_data_range(Some(range(1_704_067_200_000.0, 1_706_659_200_000.0)));

    let ticks = axis.compute_ticks(bottom(800.0), &MonospaceMeasurer::default());

    assert_eq!(
        axis.tick_unit().kind(),
        TickUnitKind::Date {
            unit_type: DateTickUnitType::Day,
            multiple: 2
        }
    );
    assert_eq!(ticks.len(), 17);
    assert_eq!(ticks[0].label, "31-Dec");
    assert_eq!(ticks[16].label, "01-Feb");
}

#[test]
fn only_date_axes_accept_a_timeline() {
    let mut number = Axis::number();
    let mut date = Axis::date(AxisTimeline::Calendar);

    assert!(number.set_timeline(AxisTimeline::Calendar).is_err());
    date.set_timeline(AxisTimeline::Segmented(
        chart_axis::core::SegmentedTimeline::monday_through_friday(),
    ))
    .expect("date axis");
    assert!(matches!(date.timeline(), Some(AxisTimeline::Segmented(_))));
    assert!(number.timeline().is_none());
}

#[test]
fn modulo_axis_keeps_its_window() {
    let modulo = ModuloTransform::new(range(0.0, 360.0))
        .expect("valid base")
        .with_display_range(270.0, 90.0)
        .expect("valid window");
    let mut axis = Axis::modulo(modulo);

    assert_eq!(axis.range(), range(270.0, 450.0));
    assert!(!axis.config().auto_range);

    axis.set_data_range(Some(range(0.0, 10.0)));
    assert_eq!(axis.auto_adjust_range(), range(270.0, 450.0));

    axis.set_range(range(300.0, 420.0)).expect("valid window");
    assert_eq!(axis.range(), range(300.0, 420.0));
    let TransformKind::Modulo(current) = axis.kind() else {
        panic!("modulo axis changed kind");
    };
    assert_eq!((current.display_start(), current.display_end()), (300.0, 60.0));
}

#[test]
fn cyclic_axis_shows_one_period_ending_at_data_maximum() {
    let cyclic = CyclicTransform::new(24.0, 0.0).expect("valid cycle");
    let mut axis = Axis::cyclic(cyclic);

    axis.set_data_range(Some(range(0.0, 50.0)));
    assert_eq!(axis.range(), range(26.0, 50.0));

    axis.set_fixed_auto_range(5.0).expect("forced to the period");
    assert_eq!(axis.config().fixed_auto_range, 24.0);

    axis.set_range(range(0.0, 100.0)).expect("valid range");
    assert_eq!(axis.range(), range(76.0, 100.0));
}

#[test]
fn config_round_trips_through_json() {
    let config = AxisConfig::default()
        .with_margins(0.1, 0.2)
        .with_inverted(true)
        .with_minor_ticks(4, true)
        .with_vertical_tick_labels(true);

    let json = serde_json::to_string(&config).expect("serialize config");
    let restored: AxisConfig = serde_json::from_str(&json).expect("deserialize config");

    assert_eq!(restored, config);
}

#[test]
fn partial_config_documents_fill_defaults() {
    let restored: AxisConfig =
        serde_json::from_str(r#"{"lower_margin":0.2,"inverted":true}"#).expect("partial config");

    assert_eq!(restored.lower_margin, 0.2);
    assert!(restored.inverted);
    assert_eq!(restored.upper_margin, 0.05);
    assert_eq!(restored.max_tick_count, 500);
    assert_eq!(restored.tick_label_font, TickLabelFont::default());
    restored.validate().expect("defaults are valid");
}
