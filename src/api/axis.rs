use std::fmt;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::auto_range::{auto_adjust_date, auto_adjust_log, auto_adjust_number};
use crate::core::tick_generator::{self, label_anchors, log_label};
use crate::core::tick_unit::{MILLIS_PER_DAY, standard_date_tick_units};
use crate::core::{
    AutoRangeOptions, AxisTimeline, CyclicTransform, DateTransform, DeviceInterval, LogTransform,
    ModuloTransform, NumberTickUnitSource, Range, RangeType, RectangleEdge, RectangleInsets, Tick,
    TickLabelFont, TickLabelFormat, TickLayout, TickUnit, TickUnitSource, TransformKind,
    ValueTransform,
};
use crate::error::{AxisError, AxisResult};
use crate::extensions::{AxisChangeEvent, AxisChangeListener};
use crate::render::{AxisFrame, Color, LabelMeasurer, LinePrimitive, Renderer, TextPrimitive};

use super::AxisConfig;

const DATE_MINIMUM_AUTO_RANGE_MILLIS: f64 = 2.0;
const SYMBOL_MARGIN: f64 = 0.5;
const AXIS_LINE_WIDTH: f64 = 1.0;

/// One chart axis: a tagged value transform plus its configuration, the
/// current working range and the current tick unit.
///
/// Every layout pass calls [`Axis::compute_ticks`] (or [`Axis::build_frame`])
/// with fresh device geometry; nothing about the device is cached.
pub struct Axis {
    transform: ValueTransform,
    config: AxisConfig,
    data_range: Option<Range>,
    tick_unit: TickUnit,
    tick_source: Box<dyn TickUnitSource>,
    listeners: Vec<Box<dyn AxisChangeListener>>,
}

impl fmt::Debug for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Axis")
            .field("transform", &self.transform)
            .field("config", &self.config)
            .field("data_range", &self.data_range)
            .field("tick_unit", &self.tick_unit)
            .field("tick_source", &self.tick_source)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Axis {
    /// Creates an axis of the given kind.
    ///
    /// Kind-specific setup: modulo axes start on their display window with
    /// auto-range off, cyclic axes pin the auto-range width to one period and
    /// symbol axes label integer positions from the symbol list.
    pub fn new(kind: TransformKind, config: AxisConfig) -> AxisResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(kind, config))
    }

    // Callers validate `config`; the built-in constructors use defaults.
    fn from_parts(kind: TransformKind, mut config: AxisConfig) -> Self {
        let mut range = config.default_auto_range;
        let (tick_source, format): (Box<dyn TickUnitSource>, Option<TickLabelFormat>) =
            match &kind {
                TransformKind::Linear | TransformKind::Log(_) => {
                    (Box::new(NumberTickUnitSource::new(false)), None)
                }
                TransformKind::Date(_) => (Box::new(standard_date_tick_units()), None),
                TransformKind::Modulo(modulo) => {
                    config.auto_range = false;
                    range = modulo.display_range();
                    (Box::new(NumberTickUnitSource::new(false)), None)
                }
                TransformKind::Cyclic(cyclic) => {
                    config.fixed_auto_range = cyclic.period();
                    range = Range::new(cyclic.offset(), cyclic.offset() + cyclic.period())
                        .unwrap_or(range);
                    (Box::new(NumberTickUnitSource::new(false)), None)
                }
                TransformKind::Symbol(symbols) => {
                    let format = TickLabelFormat::symbols(symbols.clone());
                    let source = NumberTickUnitSource::new(true).with_format(format.clone());
                    (Box::new(source), Some(format))
                }
            };

        let mut tick_unit = tick_source.ceiling_unit(config.tick_unit_size);
        if let Some(format) = format {
            tick_unit = tick_unit.with_format(format);
        }

        let mut axis = Self {
            transform: ValueTransform::new(kind, range, config.inverted),
            config,
            data_range: None,
            tick_unit,
            tick_source,
            listeners: Vec::new(),
        };
        if axis.config.auto_range {
            axis.apply_auto_range();
        }
        axis
    }

    /// Plain linear number axis with default options.
    #[must_use]
    pub fn number() -> Self {
        Self::from_parts(TransformKind::Linear, AxisConfig::default())
    }

    /// Log axis with default options except that zero is not forced into view.
    #[must_use]
    pub fn log(log: LogTransform) -> Self {
        let config = AxisConfig::default()
            .with_auto_range_includes_zero(false)
            .with_auto_range_sticky_zero(false)
            .with_default_auto_range(Range::new(1.0, log.base()).unwrap_or_default());
        Self::from_parts(TransformKind::Log(log), config)
    }

    /// Date axis over UTC epoch milliseconds.
    #[must_use]
    pub fn date(timeline: AxisTimeline) -> Self {
        let config = AxisConfig::default()
            .with_auto_range_includes_zero(false)
            .with_auto_range_sticky_zero(false)
            .with_auto_range_minimum_size(DATE_MINIMUM_AUTO_RANGE_MILLIS)
            .with_tick_unit_size(MILLIS_PER_DAY as f64)
            .with_default_auto_range(
                Range::new(0.0, MILLIS_PER_DAY as f64).unwrap_or_default(),
            );
        Self::from_parts(TransformKind::Date(DateTransform::new(timeline)), config)
    }

    pub fn modulo(modulo: ModuloTransform) -> Self {
        Self::from_parts(TransformKind::Modulo(modulo), AxisConfig::default())
    }

    pub fn cyclic(cyclic: CyclicTransform) -> Self {
        let config = AxisConfig::default().with_auto_range_includes_zero(false);
        Self::from_parts(TransformKind::Cyclic(cyclic), config)
    }

    pub fn symbol(symbols: Vec<String>) -> Self {
        let config = AxisConfig::default().with_auto_range_includes_zero(false);
        Self::from_parts(TransformKind::Symbol(symbols), config)
    }

    /// Replaces the source walked by automatic tick unit selection.
    #[must_use]
    pub fn with_tick_unit_source(mut self, source: Box<dyn TickUnitSource>) -> Self {
        self.tick_source = source;
        self
    }

    #[must_use]
    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    #[must_use]
    pub fn kind(&self) -> &TransformKind {
        self.transform.kind()
    }

    #[must_use]
    pub fn transform(&self) -> &ValueTransform {
        &self.transform
    }

    #[must_use]
    pub fn range(&self) -> Range {
        self.transform.range()
    }

    #[must_use]
    pub fn data_range(&self) -> Option<Range> {
        self.data_range
    }

    #[must_use]
    pub fn tick_unit(&self) -> &TickUnit {
        &self.tick_unit
    }

    #[must_use]
    pub fn timeline(&self) -> Option<&AxisTimeline> {
        match self.transform.kind() {
            TransformKind::Date(date) => Some(date.timeline()),
            _ => None,
        }
    }

    /// Data value to device coordinate.
    #[must_use]
    pub fn to_pixel(&self, value: f64, area: DeviceInterval) -> f64 {
        self.transform.forward(value, area)
    }

    /// Device coordinate to data value.
    #[must_use]
    pub fn to_value(&self, pixel: f64, area: DeviceInterval) -> f64 {
        self.transform.inverse(pixel, area)
    }

    #[must_use]
    pub fn length_to_pixels(&self, length: f64, area: DeviceInterval) -> f64 {
        self.transform.length_to_device(length, area)
    }

    /// Recomputes the working range from the stored data bounds and applies it.
    pub fn auto_adjust_range(&mut self) -> Range {
        self.apply_auto_range();
        self.range()
    }

    fn apply_auto_range(&mut self) {
        let options = self.config.auto_range_options();
        let range = match self.transform.kind() {
            TransformKind::Linear => auto_adjust_number(self.data_range, &options),
            TransformKind::Log(log) => auto_adjust_log(self.data_range, &options, *log),
            TransformKind::Date(date) => {
                auto_adjust_date(self.data_range, &options, date.timeline())
            }
            TransformKind::Modulo(_) => {
                trace!("modulo axis keeps its display window on auto-range");
                self.range()
            }
            TransformKind::Cyclic(cyclic) => {
                let period = cyclic.period();
                let options = AutoRangeOptions {
                    fixed_auto_range: period,
                    ..options
                };
                let upper = auto_adjust_number(self.data_range, &options).upper();
                Range::new(upper - period, upper).unwrap_or(self.range())
            }
            TransformKind::Symbol(symbols) => {
                let count = symbols.len() as f64;
                if count == 0.0 {
                    options.default_range
                } else {
                    Range::new(-SYMBOL_MARGIN, count - 1.0 + SYMBOL_MARGIN)
                        .unwrap_or(options.default_range)
                }
            }
        };
        self.replace_range(range);
    }

    fn replace_range(&mut self, range: Range) {
        if range == self.range() {
            return;
        }
        self.transform.set_range(range);
        debug!(lower = range.lower(), upper = range.upper(), "axis range changed");
        self.notify(AxisChangeEvent::RangeChanged { range });
    }

    /// Sets an explicit working range and turns auto-range off.
    ///
    /// Cyclic axes keep one period ending at `range.upper`; modulo axes move
    /// their display window to the range bounds.
    pub fn set_range(&mut self, range: Range) -> AxisResult<()> {
        if range.is_degenerate() {
            return Err(AxisError::InvalidRange {
                lower: range.lower(),
                upper: range.upper(),
            });
        }
        let range = match self.transform.kind_mut() {
            TransformKind::Cyclic(cyclic) => {
                Range::new(range.upper() - cyclic.period(), range.upper())?
            }
            TransformKind::Modulo(modulo) => {
                *modulo = modulo.with_display_range(range.lower(), range.upper())?;
                modulo.display_range()
            }
            _ => range,
        };
        self.config.auto_range = false;
        self.replace_range(range);
        Ok(())
    }

    /// Stores the raw bounds of the attached data; `None` means no data.
    ///
    /// With auto-range on the working range is recomputed immediately.
    pub fn set_data_range(&mut self, data_range: Option<Range>) {
        self.data_range = data_range;
        if self.config.auto_range {
            self.apply_auto_range();
        }
    }

    /// Zooms to the part of the visible range between two fractions of its
    /// length, measured from the lower bound (from the upper bound when
    /// inverted). Turns auto-range off.
    pub fn zoom_range(&mut self, lower_fraction: f64, upper_fraction: f64) -> AxisResult<()> {
        if !lower_fraction.is_finite()
            || !upper_fraction.is_finite()
            || lower_fraction >= upper_fraction
        {
            return Err(AxisError::InvalidConfig(format!(
                "zoom fractions must be finite and ordered: {lower_fraction} >= {upper_fraction}"
            )));
        }
        let (from, to) = if self.transform.is_inverted() {
            (1.0 - upper_fraction, 1.0 - lower_fraction)
        } else {
            (lower_fraction, upper_fraction)
        };
        let lower = self.transform.value_at(from);
        let upper = self.transform.value_at(to);
        self.set_range(Range::new_non_degenerate(lower, upper)?)
    }

    /// Shifts the range by `fraction` of its visible length. Turns
    /// auto-range off.
    pub fn pan(&mut self, fraction: f64) -> AxisResult<()> {
        if !fraction.is_finite() {
            return Err(AxisError::InvalidConfig(
                "pan fraction must be finite".to_owned(),
            ));
        }
        let lower = self.transform.value_at(fraction);
        let upper = self.transform.value_at(1.0 + fraction);
        self.set_range(Range::new_non_degenerate(lower, upper)?)
    }

    /// Replaces the date axis timeline and re-runs auto-range when it is on.
    pub fn set_timeline(&mut self, timeline: AxisTimeline) -> AxisResult<()> {
        let TransformKind::Date(date) = self.transform.kind_mut() else {
            return Err(AxisError::InvalidConfig(
                "only date axes carry a timeline".to_owned(),
            ));
        };
        *date = DateTransform::new(timeline);
        self.after_config_change();
        Ok(())
    }

    /// Sets a fixed tick unit and turns automatic selection off.
    pub fn set_tick_unit(&mut self, unit: TickUnit) -> AxisResult<()> {
        if !unit.size().is_finite() || unit.size() <= 0.0 {
            return Err(AxisError::InvalidConfig(
                "tick unit size must be finite and > 0".to_owned(),
            ));
        }
        self.config.auto_tick_unit_selection = false;
        self.config.tick_unit_size = unit.size();
        self.replace_tick_unit(unit);
        Ok(())
    }

    fn replace_tick_unit(&mut self, unit: TickUnit) {
        let changed = unit.size() != self.tick_unit.size();
        self.tick_unit = unit;
        if changed {
            let size = self.tick_unit.size();
            self.notify(AxisChangeEvent::TickUnitChanged { size });
        }
    }

    /// Picks the smallest tick unit whose labels do not overlap on `area`
    /// and makes it current.
    pub fn select_auto_tick_unit(
        &mut self,
        area: DeviceInterval,
        measurer: &dyn LabelMeasurer,
    ) -> TickUnit {
        let edge = area.edge();
        let (_, _, angle) = label_anchors(edge, self.config.vertical_tick_labels);
        let font = &self.config.tick_label_font;
        let padding = self.config.tick_label_insets.along(edge);
        let fallback = self.configured_tick_unit();
        let unit = tick_generator::select_tick_unit(
            self.tick_source.as_ref(),
            &self.transform,
            area,
            &fallback,
            |candidate| {
                self.label_texts(candidate)
                    .iter()
                    .map(|text| measurer.measure(text, font).extent_along(edge, angle))
                    .fold(0.0, f64::max)
                    + padding
            },
        );
        self.replace_tick_unit(unit.clone());
        unit
    }

    // Labels whose extent bounds every label the unit produces.
    fn label_texts(&self, unit: &TickUnit) -> SmallVec<[String; 2]> {
        let range = self.range();
        match self.transform.kind() {
            TransformKind::Log(log) => SmallVec::from_iter([
                log_label(range.lower(), unit.size(), log.base()),
                log_label(range.upper(), unit.size(), log.base()),
            ]),
            TransformKind::Symbol(symbols) => symbols
                .iter()
                .max_by_key(|symbol| symbol.chars().count())
                .cloned()
                .into_iter()
                .collect(),
            TransformKind::Modulo(modulo) => {
                let base = modulo.base();
                SmallVec::from_iter([unit.label(base.lower()), unit.label(base.upper())])
            }
            _ => SmallVec::from_iter([unit.label(range.lower()), unit.label(range.upper())]),
        }
    }

    fn tick_layout(&self) -> TickLayout {
        TickLayout {
            vertical_labels: self.config.vertical_tick_labels,
            minor_tick_count: self.config.minor_tick_count,
            minor_ticks_visible: self.config.minor_ticks_visible,
            max_tick_count: self.config.max_tick_count,
        }
    }

    /// Ticks for one layout pass over `area`.
    ///
    /// Runs automatic unit selection first when it is enabled. Degenerate
    /// configurations produce an empty list.
    pub fn compute_ticks(
        &mut self,
        area: DeviceInterval,
        measurer: &dyn LabelMeasurer,
    ) -> Vec<Tick> {
        if self.config.auto_tick_unit_selection {
            self.select_auto_tick_unit(area, measurer);
        }
        tick_generator::generate_ticks(&self.transform, area, &self.tick_unit, &self.tick_layout())
    }

    /// Space the axis needs perpendicular to `area`: tick marks plus the
    /// widest label and its insets. Hidden axes need none.
    pub fn reserve_space(&mut self, area: DeviceInterval, measurer: &dyn LabelMeasurer) -> f64 {
        if !self.config.visible {
            return 0.0;
        }
        let edge = area.edge();
        let ticks = self.compute_ticks(area, measurer);
        let font = &self.config.tick_label_font;
        let widest = ticks
            .iter()
            .filter(|tick| tick.is_major())
            .map(|tick| measurer.measure(&tick.label, font).extent_across(edge, tick.angle))
            .fold(0.0, f64::max);
        let labels = if widest > 0.0 {
            widest + self.config.tick_label_insets.across(edge)
        } else {
            0.0
        };
        self.config.tick_mark_outside_length + labels
    }

    /// Geometry for drawing the axis along `area`, with the axis line at
    /// `cursor` on the perpendicular coordinate.
    pub fn build_frame(
        &mut self,
        area: DeviceInterval,
        cursor: f64,
        measurer: &dyn LabelMeasurer,
        color: Color,
    ) -> AxisResult<AxisFrame> {
        let edge = area.edge();
        let mut frame = AxisFrame::new(edge);
        if !self.config.visible {
            return Ok(frame);
        }
        if !cursor.is_finite() {
            return Err(AxisError::InvalidFrame(
                "axis cursor must be finite".to_owned(),
            ));
        }

        let ticks = self.compute_ticks(area, measurer);
        let outward = outward_sign(edge);
        let mark = self.config.tick_mark_outside_length;
        let insets = self.config.tick_label_insets;
        let font = self.config.tick_label_font.clone();

        frame = frame.with_axis_line(along_line(edge, area.min(), area.max(), cursor, color));
        for tick in &ticks {
            let length = if tick.is_major() { mark } else { mark / 2.0 };
            if length > 0.0 {
                frame = frame.with_tick_mark(across_line(
                    edge,
                    tick.position,
                    cursor,
                    cursor + outward * length,
                    color,
                ));
            }
            if tick.is_major() && !tick.label.is_empty() {
                let offset = cursor + outward * (mark + label_gap(edge, insets));
                let (x, y) = point_on(edge, tick.position, offset);
                frame = frame.with_label(
                    TextPrimitive::new(tick.label.clone(), x, y, font.size, color, tick.text_anchor)
                        .with_rotation(tick.rotation_anchor, tick.angle),
                );
            }
        }
        frame.validate()?;
        Ok(frame)
    }

    /// Builds the frame for `area` and hands it to `renderer`.
    pub fn draw<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        area: DeviceInterval,
        cursor: f64,
        measurer: &dyn LabelMeasurer,
        color: Color,
    ) -> AxisResult<()> {
        let frame = self.build_frame(area, cursor, measurer, color)?;
        renderer.render(&frame)
    }

    pub fn set_config(&mut self, config: AxisConfig) -> AxisResult<()> {
        self.update_config(|current| *current = config)
    }

    pub fn set_margins(&mut self, lower_margin: f64, upper_margin: f64) -> AxisResult<()> {
        self.update_config(|config| {
            config.lower_margin = lower_margin;
            config.upper_margin = upper_margin;
        })
    }

    pub fn set_lower_margin(&mut self, margin: f64) -> AxisResult<()> {
        self.update_config(|config| config.lower_margin = margin)
    }

    pub fn set_upper_margin(&mut self, margin: f64) -> AxisResult<()> {
        self.update_config(|config| config.upper_margin = margin)
    }

    pub fn set_auto_range(&mut self, auto_range: bool) -> AxisResult<()> {
        self.update_config(|config| config.auto_range = auto_range)
    }

    pub fn set_auto_range_minimum_size(&mut self, size: f64) -> AxisResult<()> {
        self.update_config(|config| config.auto_range_minimum_size = size)
    }

    pub fn set_fixed_auto_range(&mut self, width: f64) -> AxisResult<()> {
        self.update_config(|config| config.fixed_auto_range = width)
    }

    pub fn set_auto_range_includes_zero(&mut self, includes_zero: bool) -> AxisResult<()> {
        self.update_config(|config| config.auto_range_includes_zero = includes_zero)
    }

    pub fn set_auto_range_sticky_zero(&mut self, sticky_zero: bool) -> AxisResult<()> {
        self.update_config(|config| config.auto_range_sticky_zero = sticky_zero)
    }

    pub fn set_default_auto_range(&mut self, range: Range) -> AxisResult<()> {
        self.update_config(|config| config.default_auto_range = range)
    }

    pub fn set_inverted(&mut self, inverted: bool) -> AxisResult<()> {
        self.update_config(|config| config.inverted = inverted)
    }

    pub fn set_range_type(&mut self, range_type: RangeType) -> AxisResult<()> {
        self.update_config(|config| config.range_type = range_type)
    }

    pub fn set_auto_tick_unit_selection(&mut self, enabled: bool) -> AxisResult<()> {
        self.update_config(|config| config.auto_tick_unit_selection = enabled)
    }

    pub fn set_minor_tick_count(&mut self, count: u32) -> AxisResult<()> {
        self.update_config(|config| config.minor_tick_count = count)
    }

    pub fn set_minor_ticks_visible(&mut self, visible: bool) -> AxisResult<()> {
        self.update_config(|config| config.minor_ticks_visible = visible)
    }

    pub fn set_vertical_tick_labels(&mut self, vertical: bool) -> AxisResult<()> {
        self.update_config(|config| config.vertical_tick_labels = vertical)
    }

    pub fn set_tick_label_font(&mut self, font: TickLabelFont) -> AxisResult<()> {
        self.update_config(|config| config.tick_label_font = font)
    }

    pub fn set_tick_label_insets(&mut self, insets: RectangleInsets) -> AxisResult<()> {
        self.update_config(|config| config.tick_label_insets = insets)
    }

    pub fn set_max_tick_count(&mut self, max_tick_count: usize) -> AxisResult<()> {
        self.update_config(|config| config.max_tick_count = max_tick_count)
    }

    pub fn set_visible(&mut self, visible: bool) -> AxisResult<()> {
        self.update_config(|config| config.visible = visible)
    }

    fn update_config<F>(&mut self, update: F) -> AxisResult<()>
    where
        F: FnOnce(&mut AxisConfig),
    {
        let mut next = self.config.clone();
        update(&mut next);
        if let TransformKind::Cyclic(cyclic) = self.transform.kind() {
            next.fixed_auto_range = cyclic.period();
        }
        next.validate()?;
        if next == self.config {
            return Ok(());
        }
        self.config = next;
        self.after_config_change();
        Ok(())
    }

    fn after_config_change(&mut self) {
        self.transform.set_inverted(self.config.inverted);
        if !self.config.auto_tick_unit_selection
            && self.tick_unit.size() != self.config.tick_unit_size
        {
            let unit = self.configured_tick_unit();
            self.replace_tick_unit(unit);
        }
        self.notify(AxisChangeEvent::ConfigChanged);
        if self.config.auto_range {
            self.apply_auto_range();
        }
    }

    // Unit covering the configured tick unit size.
    fn configured_tick_unit(&self) -> TickUnit {
        let unit = self.tick_source.ceiling_unit(self.config.tick_unit_size);
        match self.transform.kind() {
            TransformKind::Symbol(symbols) => {
                unit.with_format(TickLabelFormat::symbols(symbols.clone()))
            }
            _ => unit,
        }
    }

    /// Registers a listener; ids must be non-empty and unique.
    pub fn add_listener(&mut self, listener: Box<dyn AxisChangeListener>) -> AxisResult<()> {
        let listener_id = listener.id().to_owned();
        if listener_id.is_empty() {
            return Err(AxisError::InvalidConfig(
                "listener id must not be empty".to_owned(),
            ));
        }
        if self.has_listener(&listener_id) {
            return Err(AxisError::InvalidConfig(format!(
                "listener with id `{listener_id}` is already registered"
            )));
        }
        self.listeners.push(listener);
        Ok(())
    }

    /// Removes a listener by id. Returns `true` when removed.
    pub fn remove_listener(&mut self, listener_id: &str) -> bool {
        if let Some(position) = self
            .listeners
            .iter()
            .position(|entry| entry.id() == listener_id)
        {
            self.listeners.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn has_listener(&self, listener_id: &str) -> bool {
        self.listeners
            .iter()
            .any(|listener| listener.id() == listener_id)
    }

    fn notify(&mut self, event: AxisChangeEvent) {
        for listener in &mut self.listeners {
            listener.on_axis_changed(event);
        }
    }
}

fn outward_sign(edge: RectangleEdge) -> f64 {
    match edge {
        RectangleEdge::Bottom | RectangleEdge::Right => 1.0,
        RectangleEdge::Top | RectangleEdge::Left => -1.0,
    }
}

fn label_gap(edge: RectangleEdge, insets: RectangleInsets) -> f64 {
    match edge {
        RectangleEdge::Bottom => insets.top,
        RectangleEdge::Top => insets.bottom,
        RectangleEdge::Left => insets.right,
        RectangleEdge::Right => insets.left,
    }
}

fn point_on(edge: RectangleEdge, along: f64, across: f64) -> (f64, f64) {
    if edge.is_top_or_bottom() {
        (along, across)
    } else {
        (across, along)
    }
}

fn along_line(edge: RectangleEdge, from: f64, to: f64, cursor: f64, color: Color) -> LinePrimitive {
    let (x1, y1) = point_on(edge, from, cursor);
    let (x2, y2) = point_on(edge, to, cursor);
    LinePrimitive::new(x1, y1, x2, y2, AXIS_LINE_WIDTH, color)
}

fn across_line(
    edge: RectangleEdge,
    position: f64,
    from: f64,
    to: f64,
    color: Color,
) -> LinePrimitive {
    let (x1, y1) = point_on(edge, position, from);
    let (x2, y2) = point_on(edge, position, to);
    LinePrimitive::new(x1, y1, x2, y2, AXIS_LINE_WIDTH, color)
}
