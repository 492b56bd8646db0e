use crate::error::{Error, Result};
use crate::types::{Color, Marker, Vec2};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleColor {
    Line,
    Fill,
    MarkerOutline,
    MarkerFill,
    TitleText,
    ///texts drawn inside of the plot
    InlayText,
    FrameBg,
    PlotBg,
    PlotBorder,
    LegendBg,
    LegendBorder,
    LegendText,
    ///axis labels and tick labels
    AxisText,
    AxisGrid,
    ///defaults to AxisGrid
    AxisTick,
}
impl StyleColor {
    pub const COUNT: usize = 15;
    pub const ALL: [StyleColor; Self::COUNT] = [
        StyleColor::Line,
        StyleColor::Fill,
        StyleColor::MarkerOutline,
        StyleColor::MarkerFill,
        StyleColor::TitleText,
        StyleColor::InlayText,
        StyleColor::FrameBg,
        StyleColor::PlotBg,
        StyleColor::PlotBorder,
        StyleColor::LegendBg,
        StyleColor::LegendBorder,
        StyleColor::LegendText,
        StyleColor::AxisText,
        StyleColor::AxisGrid,
        StyleColor::AxisTick,
    ];
    pub fn name(self) -> &'static str {
        match self {
            StyleColor::Line => "Line",
            StyleColor::Fill => "Fill",
            StyleColor::MarkerOutline => "MarkerOutline",
            StyleColor::MarkerFill => "MarkerFill",
            StyleColor::TitleText => "TitleText",
            StyleColor::InlayText => "InlayText",
            StyleColor::FrameBg => "FrameBg",
            StyleColor::PlotBg => "PlotBg",
            StyleColor::PlotBorder => "PlotBorder",
            StyleColor::LegendBg => "LegendBg",
            StyleColor::LegendBorder => "LegendBorder",
            StyleColor::LegendText => "LegendText",
            StyleColor::AxisText => "AxisText",
            StyleColor::AxisGrid => "AxisGrid",
            StyleColor::AxisTick => "AxisTick",
        }
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleVar {
    ///f32, item line weight in pixels
    LineWeight,
    ///i32, marker index or -1 for none
    Marker,
    ///f32, marker radius in pixels
    MarkerSize,
    ///f32, marker outline weight in pixels
    MarkerWeight,
    ///f32, alpha applied to all item fills
    FillAlpha,
    ///Vec2, used when begin_plot gets a zero size
    PlotDefaultSize,
    ///Vec2
    PlotMinSize,
    ///Vec2, padding between the frame and the plot area
    PlotPadding,
    ///Vec2, padding around labels
    LabelPadding,
    ///Vec2, legend padding from the plot edges
    LegendPadding,
    ///Vec2, legend padding from the legend edges
    LegendInnerPadding,
    ///Vec2, spacing between legend entries
    LegendSpacing,
}
impl StyleVar {
    pub fn name(self) -> &'static str {
        match self {
            StyleVar::LineWeight => "LineWeight",
            StyleVar::Marker => "Marker",
            StyleVar::MarkerSize => "MarkerSize",
            StyleVar::MarkerWeight => "MarkerWeight",
            StyleVar::FillAlpha => "FillAlpha",
            StyleVar::PlotDefaultSize => "PlotDefaultSize",
            StyleVar::PlotMinSize => "PlotMinSize",
            StyleVar::PlotPadding => "PlotPadding",
            StyleVar::LabelPadding => "LabelPadding",
            StyleVar::LegendPadding => "LegendPadding",
            StyleVar::LegendInnerPadding => "LegendInnerPadding",
            StyleVar::LegendSpacing => "LegendSpacing",
        }
    }
}
#[derive(Copy, Debug, Clone, PartialEq)]
pub enum StyleValue {
    F32(f32),
    I32(i32),
    Vec2(Vec2),
}
impl From<f32> for StyleValue {
    fn from(value: f32) -> Self {
        StyleValue::F32(value)
    }
}
impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::I32(value)
    }
}
impl From<Vec2> for StyleValue {
    fn from(value: Vec2) -> Self {
        StyleValue::Vec2(value)
    }
}
pub(crate) fn marker_from_i32(i: i32) -> Option<Marker> {
    usize::try_from(i).ok().and_then(|i| Marker::ALL.get(i).copied())
}
pub(crate) fn marker_to_i32(m: Option<Marker>) -> i32 {
    m.and_then(|m| Marker::ALL.iter().position(|n| *n == m))
        .map(|i| i as i32)
        .unwrap_or(-1)
}
///colors of the hosting ui theme, auto style colors resolve to these
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq)]
pub struct HostStyle {
    pub text: Color,
    pub text_disabled: Color,
    pub frame_bg: Color,
    pub window_bg: Color,
    pub border: Color,
    pub popup_bg: Color,
}
impl Default for HostStyle {
    fn default() -> Self {
        Self::dark()
    }
}
impl HostStyle {
    pub fn dark() -> Self {
        Self {
            text: Color::new(1.0, 1.0, 1.0, 1.0),
            text_disabled: Color::new(0.5, 0.5, 0.5, 1.0),
            frame_bg: Color::new(0.16, 0.29, 0.48, 0.54),
            window_bg: Color::new(0.06, 0.06, 0.06, 0.94),
            border: Color::new(0.43, 0.43, 0.5, 0.5),
            popup_bg: Color::new(0.08, 0.08, 0.08, 0.94),
        }
    }
    pub fn light() -> Self {
        Self {
            text: Color::new(0.0, 0.0, 0.0, 1.0),
            text_disabled: Color::new(0.6, 0.6, 0.6, 1.0),
            frame_bg: Color::new(1.0, 1.0, 1.0, 1.0),
            window_bg: Color::new(0.94, 0.94, 0.94, 1.0),
            border: Color::new(0.0, 0.0, 0.0, 0.3),
            popup_bg: Color::new(1.0, 1.0, 1.0, 0.98),
        }
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub line_weight: f32,
    ///none draws no markers
    pub marker: Option<Marker>,
    pub marker_size: f32,
    pub marker_weight: f32,
    pub fill_alpha: f32,
    pub plot_default_size: Vec2,
    pub plot_min_size: Vec2,
    pub plot_padding: Vec2,
    pub label_padding: Vec2,
    pub legend_padding: Vec2,
    pub legend_inner_padding: Vec2,
    pub legend_spacing: Vec2,
    pub colors: [Color; StyleColor::COUNT],
    ///index of the active colormap
    pub colormap: usize,
}
impl Default for Style {
    fn default() -> Self {
        let mut style = Self {
            line_weight: 1.0,
            marker: None,
            marker_size: 4.0,
            marker_weight: 1.0,
            fill_alpha: 1.0,
            plot_default_size: Vec2::new(400.0, 400.0),
            plot_min_size: Vec2::new(200.0, 200.0),
            plot_padding: Vec2::new(10.0, 10.0),
            label_padding: Vec2::new(5.0, 5.0),
            legend_padding: Vec2::new(10.0, 10.0),
            legend_inner_padding: Vec2::new(5.0, 5.0),
            legend_spacing: Vec2::new(5.0, 0.0),
            colors: [Color::AUTO; StyleColor::COUNT],
            colormap: 0,
        };
        style.colors_auto();
        style
    }
}
impl Style {
    ///every color follows the host theme or the item color
    pub fn colors_auto(&mut self) {
        self.colors = [Color::AUTO; StyleColor::COUNT];
    }
    pub fn colors_dark(&mut self) {
        let white = Color::new(1.0, 1.0, 1.0, 1.0);
        self.set_preset([
            white,
            white,
            white,
            white,
            Color::new(1.0, 1.0, 1.0, 0.07),
            Color::new(0.0, 0.0, 0.0, 0.5),
            Color::new(0.43, 0.43, 0.5, 0.5),
            Color::new(0.08, 0.08, 0.08, 0.94),
            Color::new(0.43, 0.43, 0.5, 0.5),
            Color::new(1.0, 1.0, 1.0, 0.25),
        ]);
    }
    pub fn colors_light(&mut self) {
        let black = Color::new(0.0, 0.0, 0.0, 1.0);
        self.set_preset([
            black,
            black,
            black,
            black,
            Color::new(1.0, 1.0, 1.0, 1.0),
            Color::new(0.42, 0.57, 1.0, 0.13),
            Color::new(0.0, 0.0, 0.0, 0.0),
            Color::new(1.0, 1.0, 1.0, 0.98),
            Color::new(0.82, 0.82, 0.82, 0.8),
            Color::new(1.0, 1.0, 1.0, 1.0),
        ]);
    }
    pub fn colors_classic(&mut self) {
        let text = Color::new(0.9, 0.9, 0.9, 1.0);
        self.set_preset([
            text,
            text,
            text,
            text,
            Color::new(0.43, 0.43, 0.43, 0.39),
            Color::new(0.0, 0.0, 0.0, 0.35),
            Color::new(0.5, 0.5, 0.5, 0.5),
            Color::new(0.11, 0.11, 0.14, 0.92),
            Color::new(0.5, 0.5, 0.5, 0.5),
            Color::new(0.9, 0.9, 0.9, 0.25),
        ]);
    }
    ///title, inlay, legend, axis text, frame, plot bg, plot border, legend bg,
    ///legend border, grid
    fn set_preset(&mut self, c: [Color; 10]) {
        use StyleColor::*;
        for i in [Line, Fill, MarkerOutline, MarkerFill, AxisTick] {
            self.colors[i as usize] = Color::AUTO;
        }
        let slots = [
            TitleText,
            InlayText,
            LegendText,
            AxisText,
            FrameBg,
            PlotBg,
            PlotBorder,
            LegendBg,
            LegendBorder,
            AxisGrid,
        ];
        for (slot, col) in slots.into_iter().zip(c) {
            self.colors[slot as usize] = col;
        }
    }
    pub fn is_color_auto(&self, idx: StyleColor) -> bool {
        self.colors[idx as usize].is_auto()
    }
    fn auto_color(&self, idx: StyleColor, host: &HostStyle) -> Color {
        match idx {
            StyleColor::Line
            | StyleColor::Fill
            | StyleColor::MarkerOutline
            | StyleColor::MarkerFill => Color::AUTO,
            StyleColor::TitleText
            | StyleColor::InlayText
            | StyleColor::LegendText
            | StyleColor::AxisText => host.text,
            StyleColor::FrameBg => host.frame_bg,
            StyleColor::PlotBg => host.window_bg,
            StyleColor::PlotBorder | StyleColor::LegendBorder => host.border,
            StyleColor::LegendBg => host.popup_bg,
            StyleColor::AxisGrid => host.text.with_alpha(host.text.a * 0.25),
            StyleColor::AxisTick => self.color(StyleColor::AxisGrid, host),
        }
    }
    ///the effective color, auto colors resolved through the host theme
    pub fn color(&self, idx: StyleColor, host: &HostStyle) -> Color {
        if self.is_color_auto(idx) {
            self.auto_color(idx, host)
        } else {
            self.colors[idx as usize]
        }
    }
    pub fn color_u32(&self, idx: StyleColor, host: &HostStyle) -> u32 {
        self.color(idx, host).to_u32()
    }
    pub fn var(&self, var: StyleVar) -> StyleValue {
        match var {
            StyleVar::LineWeight => StyleValue::F32(self.line_weight),
            StyleVar::Marker => StyleValue::I32(marker_to_i32(self.marker)),
            StyleVar::MarkerSize => StyleValue::F32(self.marker_size),
            StyleVar::MarkerWeight => StyleValue::F32(self.marker_weight),
            StyleVar::FillAlpha => StyleValue::F32(self.fill_alpha),
            StyleVar::PlotDefaultSize => StyleValue::Vec2(self.plot_default_size),
            StyleVar::PlotMinSize => StyleValue::Vec2(self.plot_min_size),
            StyleVar::PlotPadding => StyleValue::Vec2(self.plot_padding),
            StyleVar::LabelPadding => StyleValue::Vec2(self.label_padding),
            StyleVar::LegendPadding => StyleValue::Vec2(self.legend_padding),
            StyleVar::LegendInnerPadding => StyleValue::Vec2(self.legend_inner_padding),
            StyleVar::LegendSpacing => StyleValue::Vec2(self.legend_spacing),
        }
    }
    ///writes a variable, integers are accepted for float variables
    pub fn set_var(&mut self, var: StyleVar, value: StyleValue) -> Result<()> {
        let float = match value {
            StyleValue::F32(f) => Some(f),
            StyleValue::I32(i) => Some(i as f32),
            StyleValue::Vec2(_) => None,
        };
        let slot = match var {
            StyleVar::LineWeight => &mut self.line_weight,
            StyleVar::MarkerSize => &mut self.marker_size,
            StyleVar::MarkerWeight => &mut self.marker_weight,
            StyleVar::FillAlpha => &mut self.fill_alpha,
            StyleVar::Marker => {
                return match value {
                    StyleValue::I32(i) => {
                        self.marker = marker_from_i32(i);
                        Ok(())
                    }
                    _ => Err(Error::StyleVarType(var.name())),
                };
            }
            StyleVar::PlotDefaultSize
            | StyleVar::PlotMinSize
            | StyleVar::PlotPadding
            | StyleVar::LabelPadding
            | StyleVar::LegendPadding
            | StyleVar::LegendInnerPadding
            | StyleVar::LegendSpacing => {
                let StyleValue::Vec2(v) = value else {
                    return Err(Error::StyleVarType(var.name()));
                };
                *self.vec2_var(var) = v;
                return Ok(());
            }
        };
        *slot = float.ok_or(Error::StyleVarType(var.name()))?;
        Ok(())
    }
    fn vec2_var(&mut self, var: StyleVar) -> &mut Vec2 {
        match var {
            StyleVar::PlotDefaultSize => &mut self.plot_default_size,
            StyleVar::PlotMinSize => &mut self.plot_min_size,
            StyleVar::PlotPadding => &mut self.plot_padding,
            StyleVar::LabelPadding => &mut self.label_padding,
            StyleVar::LegendPadding => &mut self.legend_padding,
            StyleVar::LegendInnerPadding => &mut self.legend_inner_padding,
            _ => &mut self.legend_spacing,
        }
    }
}
///lifo backups for pushed colors, variables and colormaps
#[derive(Debug, Clone, Default)]
pub(crate) struct StyleStack {
    colors: Vec<(StyleColor, Color)>,
    vars: Vec<(StyleVar, StyleValue)>,
    colormaps: Vec<usize>,
}
impl StyleStack {
    pub(crate) fn push_color(&mut self, style: &mut Style, idx: StyleColor, col: Color) {
        self.colors.push((idx, style.colors[idx as usize]));
        style.colors[idx as usize] = col;
    }
    pub(crate) fn pop_color(&mut self, style: &mut Style, count: usize) -> Result<()> {
        if count > self.colors.len() {
            return Err(Error::StyleStackUnderflow {
                requested: count,
                available: self.colors.len(),
            });
        }
        for _ in 0..count {
            if let Some((idx, col)) = self.colors.pop() {
                style.colors[idx as usize] = col;
            }
        }
        Ok(())
    }
    pub(crate) fn push_var(
        &mut self,
        style: &mut Style,
        var: StyleVar,
        value: StyleValue,
    ) -> Result<()> {
        let backup = style.var(var);
        style.set_var(var, value)?;
        self.vars.push((var, backup));
        Ok(())
    }
    pub(crate) fn pop_var(&mut self, style: &mut Style, count: usize) -> Result<()> {
        if count > self.vars.len() {
            return Err(Error::StyleStackUnderflow {
                requested: count,
                available: self.vars.len(),
            });
        }
        for _ in 0..count {
            if let Some((var, value)) = self.vars.pop() {
                style.set_var(var, value)?;
            }
        }
        Ok(())
    }
    pub(crate) fn push_colormap(&mut self, style: &mut Style, cmap: usize) {
        self.colormaps.push(style.colormap);
        style.colormap = cmap;
    }
    pub(crate) fn pop_colormap(&mut self, style: &mut Style, count: usize) -> Result<()> {
        if count > self.colormaps.len() {
            return Err(Error::ColormapStackUnderflow {
                requested: count,
                available: self.colormaps.len(),
            });
        }
        for _ in 0..count {
            if let Some(cmap) = self.colormaps.pop() {
                style.colormap = cmap;
            }
        }
        Ok(())
    }
}
///style requested for the next item, none fields fall back to the style
#[derive(Debug, Clone, PartialEq)]
pub struct NextItemStyle {
    ///line, fill, marker outline and marker fill
    pub colors: [Color; 4],
    pub line_weight: Option<f32>,
    pub marker: Option<Marker>,
    pub marker_size: Option<f32>,
    pub marker_weight: Option<f32>,
    pub fill_alpha: Option<f32>,
}
impl Default for NextItemStyle {
    fn default() -> Self {
        Self {
            colors: [Color::AUTO; 4],
            line_weight: None,
            marker: None,
            marker_size: None,
            marker_weight: None,
            fill_alpha: None,
        }
    }
}
///resolved styling of the item being plotted
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStyle {
    ///line, fill, marker outline and marker fill
    pub colors: [Color; 4],
    pub line_weight: f32,
    pub marker: Option<Marker>,
    pub marker_size: f32,
    pub marker_weight: f32,
    pub fill_alpha: f32,
    pub render_line: bool,
    pub render_fill: bool,
    pub render_marker_line: bool,
    pub render_marker_fill: bool,
    ///fill color was not chosen by the user
    pub is_auto_fill: bool,
    pub is_auto_line: bool,
    pub hidden: bool,
}
impl Default for ItemStyle {
    fn default() -> Self {
        Self {
            colors: [Color::AUTO; 4],
            line_weight: 1.0,
            marker: None,
            marker_size: 4.0,
            marker_weight: 1.0,
            fill_alpha: 1.0,
            render_line: false,
            render_fill: false,
            render_marker_line: true,
            render_marker_fill: true,
            is_auto_fill: true,
            is_auto_line: true,
            hidden: false,
        }
    }
}
pub(crate) const LINE: usize = 0;
pub(crate) const FILL: usize = 1;
pub(crate) const MARKER_OUTLINE: usize = 2;
pub(crate) const MARKER_FILL: usize = 3;
impl ItemStyle {
    ///merges the next item request, the style and the item color
    pub(crate) fn resolve(next: &NextItemStyle, style: &Style, item_color: Color) -> Self {
        let style_col = |i: usize| style.colors[i];
        let pick = |i: usize, fallback: Color| {
            if !next.colors[i].is_auto() {
                next.colors[i]
            } else if !style_col(i).is_auto() {
                style_col(i)
            } else {
                fallback
            }
        };
        let mut colors = [Color::AUTO; 4];
        colors[LINE] = pick(LINE, item_color);
        colors[FILL] = pick(FILL, item_color);
        colors[MARKER_OUTLINE] = pick(MARKER_OUTLINE, colors[LINE]);
        colors[MARKER_FILL] = pick(MARKER_FILL, colors[LINE]);
        let line_weight = next.line_weight.unwrap_or(style.line_weight);
        let marker_weight = next.marker_weight.unwrap_or(style.marker_weight);
        let fill_alpha = next.fill_alpha.unwrap_or(style.fill_alpha);
        colors[FILL].a *= fill_alpha;
        colors[MARKER_FILL].a *= fill_alpha;
        Self {
            colors,
            line_weight,
            marker: next.marker.or(style.marker),
            marker_size: next.marker_size.unwrap_or(style.marker_size),
            marker_weight,
            fill_alpha,
            render_line: colors[LINE].a > 0.0 && line_weight > 0.0,
            render_fill: colors[FILL].a > 0.0,
            render_marker_line: colors[MARKER_OUTLINE].a > 0.0 && marker_weight > 0.0,
            render_marker_fill: colors[MARKER_FILL].a > 0.0,
            is_auto_fill: next.colors[FILL].is_auto() && style_col(FILL).is_auto(),
            is_auto_line: next.colors[LINE].is_auto() && style_col(LINE).is_auto(),
            hidden: false,
        }
    }
    pub fn color_u32(&self, i: usize) -> u32 {
        self.colors[i].to_u32()
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn defaults_match_reference_values() {
        let s = Style::default();
        assert_eq!(s.plot_default_size, Vec2::new(400.0, 400.0));
        assert_eq!(s.legend_spacing, Vec2::new(5.0, 0.0));
        assert!(StyleColor::ALL.iter().all(|c| s.is_color_auto(*c)));
    }
    #[test]
    fn auto_colors_follow_host() {
        let s = Style::default();
        let host = HostStyle::dark();
        assert_eq!(s.color(StyleColor::PlotBg, &host), host.window_bg);
        assert_eq!(s.color(StyleColor::AxisGrid, &host).a, 0.25);
        assert_eq!(
            s.color(StyleColor::AxisTick, &host),
            s.color(StyleColor::AxisGrid, &host)
        );
        assert!(s.color(StyleColor::Line, &host).is_auto());
    }
    #[test]
    fn presets_leave_item_colors_auto() {
        let mut s = Style::default();
        s.colors_light();
        assert!(s.is_color_auto(StyleColor::Line));
        assert!(s.is_color_auto(StyleColor::AxisTick));
        assert_eq!(
            s.colors[StyleColor::LegendBorder as usize],
            Color::new(0.82, 0.82, 0.82, 0.8)
        );
        s.colors_classic();
        assert_eq!(s.colors[StyleColor::PlotBg as usize], Color::new(0.0, 0.0, 0.0, 0.35));
    }
    #[test]
    fn push_pop_restores() {
        let mut s = Style::default();
        let mut stack = StyleStack::default();
        stack.push_color(&mut s, StyleColor::Line, Color::WHITE);
        stack.push_var(&mut s, StyleVar::LineWeight, 3.into()).unwrap();
        stack
            .push_var(&mut s, StyleVar::PlotPadding, Vec2::splat(2.0).into())
            .unwrap();
        stack.push_var(&mut s, StyleVar::Marker, 2.into()).unwrap();
        assert_eq!(s.line_weight, 3.0);
        assert_eq!(s.marker, Some(Marker::Diamond));
        assert!(
            stack
                .push_var(&mut s, StyleVar::PlotPadding, 1.0.into())
                .is_err()
        );
        stack.pop_var(&mut s, 3).unwrap();
        stack.pop_color(&mut s, 1).unwrap();
        assert_eq!(s, Style::default());
        assert_eq!(
            stack.pop_color(&mut s, 1),
            Err(Error::StyleStackUnderflow {
                requested: 1,
                available: 0
            })
        );
    }
    #[test]
    fn resolve_prefers_next_then_style_then_item() {
        let mut style = Style::default();
        let item = Color::new(0.2, 0.4, 0.6, 1.0);
        let mut next = NextItemStyle::default();
        let r = ItemStyle::resolve(&next, &style, item);
        assert_eq!(r.colors[LINE], item);
        assert_eq!(r.colors[MARKER_FILL], item);
        assert!(r.is_auto_fill && r.is_auto_line);
        assert!(r.render_line && r.render_fill && r.render_marker_line);
        style.colors[StyleColor::Fill as usize] = Color::WHITE;
        next.colors[LINE] = Color::BLACK;
        next.fill_alpha = Some(0.5);
        let r = ItemStyle::resolve(&next, &style, item);
        assert_eq!(r.colors[LINE], Color::BLACK);
        assert_eq!(r.colors[FILL], Color::new(1.0, 1.0, 1.0, 0.5));
        assert_eq!(r.colors[MARKER_OUTLINE], Color::BLACK);
        assert!(!r.is_auto_fill && !r.is_auto_line);
        next.line_weight = Some(0.0);
        assert!(!ItemStyle::resolve(&next, &style, item).render_line);
    }
}
