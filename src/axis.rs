use crate::flags::AxisFlags;
use crate::types::{Cond, Range, Vec2, almost_equal, nan_or_inf};
use crate::ui::{TextMetrics, display_text};
///turns a tick value into its label
pub type Formatter = fn(f32) -> String;
///formats like printf %g, six significant digits with trailing zeros removed
pub fn format_g(value: f32) -> String {
    let v = value as f64;
    if v == 0.0 {
        return if v.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    if !v.is_finite() {
        return if v.is_nan() {
            "nan".to_string()
        } else if v > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    let sci = format!("{v:.5e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((&sci, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if !(-4..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.abs())
    } else {
        trim_zeros(&format!("{v:.*}", (5 - exp) as usize)).to_string()
    }
}
fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
///rounds x to 1, 2, 5 or 10 times a power of ten
pub fn nice_num(x: f64, round: bool) -> f64 {
    let expv = x.log10().floor();
    let f = x / 10f64.powf(expv);
    let nf = if round {
        if f < 1.5 {
            1.0
        } else if f < 3.0 {
            2.0
        } else if f < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if f <= 1.0 {
        1.0
    } else if f <= 2.0 {
        2.0
    } else if f <= 5.0 {
        5.0
    } else {
        10.0
    };
    nf * 10f64.powf(expv)
}
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub plot_pos: f32,
    pub major: bool,
    pub show_label: bool,
    ///empty when the label is hidden
    pub label: String,
    pub label_size: Vec2,
}
///ticks of one axis for the current frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ticker {
    pub ticks: Vec<Tick>,
}
impl Ticker {
    pub fn reset(&mut self) {
        self.ticks.clear();
    }
    pub fn len(&self) -> usize {
        self.ticks.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
    pub fn add_tick(
        &mut self,
        value: f64,
        major: bool,
        show_label: bool,
        label: Option<String>,
        metrics: &TextMetrics,
    ) -> &Tick {
        let (label, label_size) = match label {
            Some(label) if show_label => {
                let size = metrics.text_size(&label);
                (label, size)
            }
            _ => (String::new(), Vec2::splat(0.0)),
        };
        self.ticks.push(Tick {
            plot_pos: value as f32,
            major,
            show_label,
            label,
            label_size,
        });
        &self.ticks[self.ticks.len() - 1]
    }
    pub fn iter(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter()
    }
}
///three nice major ticks with four minor ticks between each,
///every other label is hidden once more than seven ticks exist
pub fn locator_default(
    ticker: &mut Ticker,
    range: Range,
    formatter: Formatter,
    metrics: &TextMetrics,
) {
    if range.min == range.max {
        return;
    }
    const N_MINOR: usize = 5;
    const N_MAJOR: usize = 3;
    const MAX_TICK_LABELS: usize = 7;
    let nice_range = nice_num(range.size() as f64 * 0.99, false);
    let interval = nice_num(nice_range / (N_MAJOR - 1) as f64, true);
    let graph_min = (range.min as f64 / interval).floor() * interval;
    let graph_max = (range.max as f64 / interval).ceil() * interval;
    let contains = |v: f64| range.contains(v as f32);
    let idx0 = ticker.len();
    let mut first_major_idx = None;
    let mut major = graph_min;
    while major < graph_max + 0.5 * interval {
        if major - interval < 0.0 && major + interval > 0.0 {
            major = 0.0;
        }
        if contains(major) {
            first_major_idx.get_or_insert(ticker.len());
            ticker.add_tick(major, true, true, Some(formatter(major as f32)), metrics);
        }
        for i in 1..N_MINOR {
            let minor = major + i as f64 * interval / N_MINOR as f64;
            if contains(minor) {
                ticker.add_tick(minor, false, true, Some(formatter(minor as f32)), metrics);
            }
        }
        major += interval;
    }
    if ticker.len() > MAX_TICK_LABELS {
        let first = first_major_idx.unwrap_or(0);
        for i in (idx0..first).rev().step_by(2) {
            ticker.ticks[i].show_label = false;
        }
        for tick in ticker.ticks.iter_mut().skip(first + 1).step_by(2) {
            tick.show_label = false;
        }
    }
}
///one of the three plot axes
#[derive(Debug, Clone)]
pub struct Axis {
    pub flags: AxisFlags,
    pub(crate) previous_flags: AxisFlags,
    pub range: Range,
    pub range_cond: Cond,
    pub label: String,
    pub ticker: Ticker,
    ///none uses format_g
    pub formatter: Option<Formatter>,
    ///user ticks added before the default locator runs
    pub(crate) custom_ticks: Vec<(f32, Option<String>)>,
    pub show_default_ticks: bool,
    pub fit_this_frame: bool,
    ///extents of the data seen while fitting
    pub fit_extents: Range,
    ///hard bounds on min and max
    pub constraint_range: Range,
    ///hard bounds on max - min
    pub constraint_zoom: Range,
    pub hovered: bool,
    pub held: bool,
}
impl Default for Axis {
    fn default() -> Self {
        Self {
            flags: AxisFlags::empty(),
            previous_flags: AxisFlags::empty(),
            range: Range::new(0.0, 1.0),
            range_cond: Cond::None,
            label: String::new(),
            ticker: Ticker::default(),
            formatter: None,
            custom_ticks: Vec::new(),
            show_default_ticks: true,
            fit_this_frame: true,
            fit_extents: Range::inverted_infinite(),
            constraint_range: Range::new(f32::NEG_INFINITY, f32::INFINITY),
            constraint_zoom: Range::new(f32::MIN_POSITIVE, f32::INFINITY),
            hovered: false,
            held: false,
        }
    }
}
fn sanitize(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-f32::MAX as f64, f32::MAX as f64)
    }
}
impl Axis {
    ///per frame setup state goes back to defaults, the range is kept
    pub(crate) fn reset(&mut self) {
        self.range_cond = Cond::None;
        self.ticker.reset();
        self.formatter = None;
        self.custom_ticks.clear();
        self.show_default_ticks = true;
        self.fit_extents = Range::inverted_infinite();
        self.constraint_range = Range::new(f32::NEG_INFINITY, f32::INFINITY);
        self.constraint_zoom = Range::new(f32::MIN_POSITIVE, f32::INFINITY);
    }
    ///orders the two values into min and max and constrains them
    pub fn set_range(&mut self, v1: f64, v2: f64) {
        self.range.min = v1.min(v2) as f32;
        self.range.max = v1.max(v2) as f32;
        self.constrain();
    }
    ///false when locked or when min would not stay below max
    pub fn set_min(&mut self, min: f64, force: bool) -> bool {
        if !force && self.is_locked_min() {
            return false;
        }
        let mut min = sanitize(min);
        if min < self.constraint_range.min as f64 {
            min = self.constraint_range.min as f64;
        }
        let max = self.range.max as f64;
        let zoom = max - min;
        if zoom < self.constraint_zoom.min as f64 {
            min = max - self.constraint_zoom.min as f64;
        }
        if zoom > self.constraint_zoom.max as f64 {
            min = max - self.constraint_zoom.max as f64;
        }
        if min >= max {
            return false;
        }
        self.range.min = min as f32;
        true
    }
    ///false when locked or when max would not stay above min
    pub fn set_max(&mut self, max: f64, force: bool) -> bool {
        if !force && self.is_locked_max() {
            return false;
        }
        let mut max = sanitize(max);
        if max > self.constraint_range.max as f64 {
            max = self.constraint_range.max as f64;
        }
        let min = self.range.min as f64;
        let zoom = max - min;
        if zoom < self.constraint_zoom.min as f64 {
            max = min + self.constraint_zoom.min as f64;
        }
        if zoom > self.constraint_zoom.max as f64 {
            max = min + self.constraint_zoom.max as f64;
        }
        if max <= min {
            return false;
        }
        self.range.max = max as f32;
        true
    }
    pub fn constrain(&mut self) {
        self.range.min = sanitize(self.range.min as f64) as f32;
        self.range.max = sanitize(self.range.max as f64) as f32;
        if self.range.min < self.constraint_range.min {
            self.range.min = self.constraint_range.min;
        }
        if self.range.max > self.constraint_range.max {
            self.range.max = self.constraint_range.max;
        }
        let zoom = self.range.size();
        if zoom < self.constraint_zoom.min {
            let delta = (self.constraint_zoom.min - zoom) * 0.5;
            self.range.min -= delta;
            self.range.max += delta;
        }
        if zoom > self.constraint_zoom.max {
            let delta = (zoom - self.constraint_zoom.max) * 0.5;
            self.range.min += delta;
            self.range.max -= delta;
        }
        if self.range.max <= self.range.min {
            self.range.max = self.range.min + f32::EPSILON;
        }
    }
    pub fn is_range_locked(&self) -> bool {
        self.range_cond == Cond::Always
    }
    pub fn is_locked_min(&self) -> bool {
        self.is_range_locked() || self.flags.contains(AxisFlags::LOCK_MIN)
    }
    pub fn is_locked_max(&self) -> bool {
        self.is_range_locked() || self.flags.contains(AxisFlags::LOCK_MAX)
    }
    pub fn is_locked(&self) -> bool {
        self.is_locked_min() && self.is_locked_max()
    }
    pub fn is_auto_fitting(&self) -> bool {
        self.flags.contains(AxisFlags::AUTO_FIT)
    }
    pub fn is_input_locked_min(&self) -> bool {
        self.is_locked_min() || self.is_auto_fitting()
    }
    pub fn is_input_locked_max(&self) -> bool {
        self.is_locked_max() || self.is_auto_fitting()
    }
    pub fn is_input_locked(&self) -> bool {
        self.is_locked() || self.is_auto_fitting()
    }
    ///whether panning in the given direction is blocked
    pub fn is_pan_locked(&self, increasing: bool) -> bool {
        if self.flags.contains(AxisFlags::PAN_STRETCH) {
            self.is_input_locked()
        } else if self.is_locked_min() || self.is_locked_max() || self.is_auto_fitting() {
            false
        } else if increasing {
            self.range.max == self.constraint_range.max
        } else {
            self.range.min == self.constraint_range.min
        }
    }
    ///stores the displayed part of label
    pub fn set_label(&mut self, label: &str) {
        self.label.clear();
        if !display_text(label).is_empty() {
            self.label.push_str(label);
        }
    }
    pub fn has_label(&self) -> bool {
        !self.label.is_empty() && !self.flags.contains(AxisFlags::NO_LABEL)
    }
    pub fn has_grid_lines(&self) -> bool {
        !self.flags.contains(AxisFlags::NO_GRID_LINES)
    }
    pub fn has_tick_labels(&self) -> bool {
        !self.flags.contains(AxisFlags::NO_TICK_LABELS)
    }
    pub fn has_tick_marks(&self) -> bool {
        !self.flags.contains(AxisFlags::NO_TICK_MARKS)
    }
    pub fn is_inverted(&self) -> bool {
        self.flags.contains(AxisFlags::INVERT)
    }
    pub fn extend_fit(&mut self, value: f32) {
        if !nan_or_inf(value) {
            self.fit_extents.expand(value);
        }
    }
    ///moves the unlocked ends of the range onto the fitted extents
    pub fn apply_fit(&mut self) {
        if !self.is_locked_min() && !nan_or_inf(self.fit_extents.min) {
            self.range.min = self.fit_extents.min;
        }
        if !self.is_locked_max() && !nan_or_inf(self.fit_extents.max) {
            self.range.max = self.fit_extents.max;
        }
        if almost_equal(self.range.min, self.range.max, 2.0) {
            self.range.max += 0.5;
            self.range.min -= 0.5;
        }
        self.fit_extents = Range::inverted_infinite();
    }
    pub fn plot_to_ndc(&self, value: f32) -> f32 {
        (value - self.range.min) / (self.range.max - self.range.min) - 0.5
    }
    pub fn ndc_to_plot(&self, value: f32) -> f32 {
        self.range.min + (value + 0.5) * (self.range.max - self.range.min)
    }
    ///fills the ticker with the custom ticks and, unless disabled, the default ones
    pub(crate) fn locate_ticks(&mut self, metrics: &TextMetrics) {
        self.ticker.reset();
        let formatter = self.formatter.unwrap_or(format_g);
        for (value, label) in &self.custom_ticks {
            let label = label.clone().or_else(|| Some(formatter(*value)));
            self.ticker
                .add_tick(*value as f64, true, true, label, metrics);
        }
        if self.show_default_ticks {
            locator_default(&mut self.ticker, self.range, formatter, metrics);
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    fn ticks(min: f32, max: f32) -> Ticker {
        let mut t = Ticker::default();
        locator_default(&mut t, Range::new(min, max), format_g, &TextMetrics::default());
        t
    }
    #[test]
    fn g_format_matches_printf() {
        assert_eq!(format_g(0.0), "0");
        assert_eq!(format_g(0.5), "0.5");
        assert_eq!(format_g(-2.0), "-2");
        assert_eq!(format_g(0.1), "0.1");
        assert_eq!(format_g(123456.0), "123456");
        assert_eq!(format_g(1234567.0), "1.23457e+06");
        assert_eq!(format_g(0.0001), "0.0001");
        assert_eq!(format_g(0.00001), "1e-05");
    }
    #[test]
    fn nice_numbers() {
        assert_relative_eq!(nice_num(0.99, false), 1.0);
        assert_relative_eq!(nice_num(0.5, true), 0.5);
        assert_relative_eq!(nice_num(1.4, true), 1.0);
        assert_relative_eq!(nice_num(2.9, true), 2.0);
        assert_relative_eq!(nice_num(6.0, true), 5.0);
        assert_relative_eq!(nice_num(80.0, true), 100.0);
        assert_relative_eq!(nice_num(3.0, false), 5.0);
    }
    #[test]
    fn unit_range_ticks() {
        let t = ticks(0.0, 1.0);
        let majors: Vec<f32> = t.iter().filter(|t| t.major).map(|t| t.plot_pos).collect();
        assert_eq!(majors, vec![0.0, 0.5, 1.0]);
        assert_eq!(t.len(), 11);
        assert!(t.ticks[0].show_label);
        assert!(!t.ticks[1].show_label);
        assert!(t.ticks[2].show_label);
        assert_eq!(t.ticks[0].label, "0");
        assert_eq!(t.ticks[5].label, "0.5");
    }
    #[test]
    fn zero_snaps_exactly() {
        let t = ticks(-1.0, 1.0);
        assert!(t.iter().any(|t| t.major && t.plot_pos == 0.0));
        assert!(t.iter().all(|t| t.label != "-0"));
    }
    #[test]
    fn degenerate_range_has_no_ticks() {
        assert!(ticks(3.0, 3.0).is_empty());
    }
    #[test]
    fn custom_ticks_come_first() {
        let mut axis = Axis::default();
        axis.custom_ticks = vec![(0.25, Some("a".to_string())), (0.75, None)];
        axis.show_default_ticks = false;
        axis.locate_ticks(&TextMetrics::default());
        assert_eq!(axis.ticker.len(), 2);
        assert_eq!(axis.ticker.ticks[0].label, "a");
        assert_eq!(axis.ticker.ticks[1].label, "0.75");
    }
    #[test]
    fn set_min_respects_locks_and_order() {
        let mut axis = Axis::default();
        assert!(axis.set_min(-1.0, false));
        assert_eq!(axis.range.min, -1.0);
        assert!(!axis.set_min(2.0, false));
        axis.flags = AxisFlags::LOCK_MIN;
        assert!(!axis.set_min(-5.0, false));
        assert!(axis.set_min(-5.0, true));
        assert!(axis.set_max(4.0, false));
        axis.flags = AxisFlags::LOCK_MAX;
        assert!(!axis.set_max(6.0, false));
    }
    #[test]
    fn constrain_keeps_a_valid_range() {
        let mut axis = Axis::default();
        axis.set_range(2.0, 2.0);
        assert!(axis.range.max > axis.range.min);
        axis.range = Range::new(f32::NAN, 1.0);
        axis.constrain();
        assert_eq!((axis.range.min, axis.range.max), (0.0, 1.0));
        axis.constraint_range = Range::new(-1.0, 1.0);
        axis.set_range(-10.0, 10.0);
        assert_eq!((axis.range.min, axis.range.max), (-1.0, 1.0));
        axis.constraint_range = Range::new(f32::NEG_INFINITY, f32::INFINITY);
        axis.constraint_zoom = Range::new(f32::MIN_POSITIVE, 2.0);
        axis.set_range(0.0, 10.0);
        assert_relative_eq!(axis.range.min, 4.0);
        assert_relative_eq!(axis.range.max, 6.0);
    }
    #[test]
    fn fit_widens_degenerate_extents() {
        let mut axis = Axis::default();
        axis.extend_fit(3.0);
        axis.extend_fit(f32::NAN);
        axis.apply_fit();
        assert_eq!((axis.range.min, axis.range.max), (2.5, 3.5));
        assert_eq!(axis.fit_extents, Range::inverted_infinite());
        axis.flags = AxisFlags::LOCK_MAX;
        axis.extend_fit(-1.0);
        axis.extend_fit(1.0);
        axis.apply_fit();
        assert_eq!((axis.range.min, axis.range.max), (-1.0, 3.5));
    }
    #[test]
    fn ndc_round_trip() {
        let mut axis = Axis::default();
        axis.set_range(-3.0, 7.0);
        for v in [-3.0, -1.5, 0.0, 2.25, 7.0] {
            assert_relative_eq!(axis.ndc_to_plot(axis.plot_to_ndc(v)), v, max_relative = 4.0 * f32::EPSILON, epsilon = 1e-6);
        }
        assert_relative_eq!(axis.plot_to_ndc(-3.0), -0.5);
        assert_relative_eq!(axis.plot_to_ndc(7.0), 0.5);
    }
    #[test]
    fn label_keeps_only_visible_text() {
        let mut axis = Axis::default();
        axis.set_label("##hidden");
        assert!(!axis.has_label());
        axis.set_label("x##id");
        assert!(axis.has_label());
        axis.flags = AxisFlags::NO_LABEL;
        assert!(!axis.has_label());
    }
}
