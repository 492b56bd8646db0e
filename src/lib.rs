pub mod axis;
pub mod colormap;
pub mod draw_list;
pub mod error;
pub mod flags;
pub mod input;
pub mod items;
pub mod plot;
mod plot_box;
pub mod series;
pub mod solver;
pub mod style;
pub mod types;
pub mod ui;
use crate::axis::Formatter;
pub use crate::colormap::{Colormap, Colormaps};
pub use crate::error::{Error, Result};
pub use crate::flags::*;
use crate::input::{FrameInput, apply_menu_action, context_menu_entries, handle_input};
pub use crate::input::{ContextMenu, MenuAction, MenuEntry};
use crate::items::{Item, LegendInput, render_legend, render_mouse_text};
pub use crate::plot::Plot;
use crate::plot_box::render_plot_box;
pub use crate::series::{Getter, PlotNum};
use crate::style::StyleStack;
pub use crate::style::{HostStyle, ItemStyle, NextItemStyle, Style, StyleColor, StyleValue, StyleVar};
pub use crate::types::*;
pub use crate::ui::{Painter, TextureId};
use crate::ui::{display_text, hash_id};
use std::collections::HashMap;
///every plot, style and colormap of one ui, drive it once per frame with
///new_frame, then begin_plot, setup and plot calls, and end_plot
#[derive(Debug, Clone)]
pub struct Context {
    pub style: Style,
    ///theme of the hosting ui, auto style colors resolve against it
    pub host_style: HostStyle,
    pub(crate) colormaps: Colormaps,
    pub(crate) plots: Vec<Plot>,
    plot_ids: HashMap<u64, usize>,
    pub(crate) current_plot: Option<usize>,
    current_item: Option<usize>,
    next_item: NextItemStyle,
    ///resolved style of the item being plotted
    pub(crate) item_style: ItemStyle,
    style_stack: StyleStack,
    id_stack: Vec<u64>,
    input: FrameInput,
    pub(crate) painter: Painter,
    ///top left of the next plot
    cursor: Vec2,
    ///space left for plots with a negative size
    avail: Vec2,
    open_menu: Option<(u64, ContextMenu)>,
}
impl Default for Context {
    fn default() -> Self {
        Self {
            style: Style::default(),
            host_style: HostStyle::default(),
            colormaps: Colormaps::default(),
            plots: Vec::new(),
            plot_ids: HashMap::new(),
            current_plot: None,
            current_item: None,
            next_item: NextItemStyle::default(),
            item_style: ItemStyle::default(),
            style_stack: StyleStack::default(),
            id_stack: Vec::new(),
            input: FrameInput::default(),
            painter: Painter::default(),
            cursor: Vec2::splat(0.0),
            avail: Vec2::splat(0.0),
            open_menu: None,
        }
    }
}
///length of one side of a plot frame, 0 picks the default and negative sizes
///fill the available space minus the size
fn frame_size(requested: f32, default: f32, avail: f32, min: f32) -> f32 {
    if requested == 0.0 {
        default
    } else if requested < 0.0 {
        (avail + requested).max(min)
    } else {
        requested
    }
}
impl Context {
    pub fn new() -> Self {
        Self::default()
    }
    ///drops every plot and restores the default style and colormaps,
    ///the painter configuration is kept
    pub fn reset(&mut self) {
        let painter = self.take_painter();
        *self = Self {
            painter,
            ..Self::default()
        };
        log::debug!("context reset");
    }
    ///starts a frame, input is the host state for it
    pub fn new_frame(&mut self, input: &InputState) {
        if self.current_plot.is_some() {
            log::warn!("new_frame called before end_plot, the open plot is dropped");
            self.current_plot = None;
            self.current_item = None;
            self.id_stack.clear();
        }
        self.input.update(input);
        self.painter.clear();
    }
    ///where the next plot goes and how much room is left for it
    pub fn set_cursor(&mut self, pos: Vec2, avail: Vec2) {
        self.cursor = pos;
        self.avail = avail;
    }
    pub fn painter(&self) -> &Painter {
        &self.painter
    }
    pub fn painter_mut(&mut self) -> &mut Painter {
        &mut self.painter
    }
    ///hands out this frame's geometry, leaving an empty painter with the same configuration
    pub fn take_painter(&mut self) -> Painter {
        let mut next = Painter::new(self.painter.clip_rect());
        next.index_width = self.painter.index_width;
        next.metrics = self.painter.metrics;
        next.white_uv = self.painter.white_uv;
        next.aa_line_uvs.clone_from(&self.painter.aa_line_uvs);
        std::mem::replace(&mut self.painter, next)
    }
    fn seed(&self) -> u64 {
        self.id_stack.last().copied().unwrap_or(0)
    }
    ///scopes the ids of following plots and items under label
    pub fn push_id(&mut self, label: &str) {
        let id = hash_id(self.seed(), label);
        self.id_stack.push(id);
    }
    pub fn pop_id(&mut self) {
        if self.id_stack.pop().is_none() {
            log::warn!("pop_id called without a pushed id");
        }
    }
    ///persistent state of the plot titled title in the current id scope
    pub fn plot(&self, title: &str) -> Option<&Plot> {
        self.plot_ids
            .get(&hash_id(self.seed(), title))
            .and_then(|i| self.plots.get(*i))
    }
    pub fn plots(&self) -> impl Iterator<Item = &Plot> {
        self.plots.iter()
    }
    pub(crate) fn current_plot_mut(&mut self) -> Result<&mut Plot> {
        self.current_plot
            .and_then(|i| self.plots.get_mut(i))
            .ok_or(Error::NoCurrentPlot("this function"))
    }
    fn current_plot_ref(&self, what: &'static str) -> Result<&Plot> {
        self.current_plot
            .and_then(|i| self.plots.get(i))
            .ok_or(Error::NoCurrentPlot(what))
    }
    pub(crate) fn current_item_mut(&mut self) -> Option<&mut Item> {
        let item = self.current_item?;
        let plot = self.plots.get_mut(self.current_plot?)?;
        plot.items.item_mut(item)
    }
    ///starts a plot, size components of 0 take the default size and
    ///negative ones fill the available space
    pub fn begin_plot(&mut self, title: &str, size: Vec2, flags: PlotFlags) -> Result<()> {
        if self.current_plot.is_some() {
            log::warn!("begin_plot({title:?}) called while another plot is open");
            return Err(Error::NestedPlot);
        }
        let id = hash_id(self.seed(), title);
        let (idx, created) = match self.plot_ids.get(&id) {
            Some(i) => (*i, false),
            None => {
                let i = self.plots.len();
                self.plots.push(Plot::new(id));
                self.plot_ids.insert(id, i);
                log::debug!("created plot {title:?} with id {id:#x}");
                (i, true)
            }
        };
        let style = &self.style;
        let plot = &mut self.plots[idx];
        plot.just_created = created;
        if created || flags != plot.previous_flags {
            plot.flags = flags;
        }
        plot.previous_flags = flags;
        plot.setup_locked = false;
        plot.open_context_this_frame = false;
        plot.rotation_cond = Cond::None;
        plot.set_title(title);
        for axis in &mut plot.axes {
            axis.reset();
        }
        let frame = Vec2::new(
            frame_size(
                size.x,
                style.plot_default_size.x,
                self.avail.x,
                style.plot_min_size.x,
            ),
            frame_size(
                size.y,
                style.plot_default_size.y,
                self.avail.y,
                style.plot_min_size.y,
            ),
        );
        plot.frame_rect = Rect::from_min_size(self.cursor, frame);
        plot.items.legend.reset();
        plot.draw_list.init(&self.painter);
        self.painter.push_clip_rect(plot.frame_rect, true);
        self.current_plot = Some(idx);
        self.id_stack.push(id);
        Ok(())
    }
    ///flushes the plot's triangles, applies fits and draws the legend, mouse text and menus
    pub fn end_plot(&mut self) -> Result<()> {
        let Some(idx) = self.current_plot else {
            log::warn!("end_plot called without begin_plot");
            return Err(Error::NoCurrentPlot("end_plot"));
        };
        self.setup_lock()?;
        let mouse = self.input.mouse;
        let legend_input = LegendInput {
            mouse,
            left: self.input.down[0].then_some(self.input.clicked[0]),
        };
        let plot = &mut self.plots[idx];
        self.painter.push_clip_rect(plot.frame_rect, true);
        plot.draw_list.sorted_move_to_host(&mut self.painter);
        plot.apply_fit();
        render_legend(
            &mut self.painter,
            plot,
            &self.style,
            &self.host_style,
            legend_input,
        );
        render_mouse_text(&mut self.painter, plot, &self.style, &self.host_style, mouse);
        self.painter.pop_clip_rect();
        self.painter.pop_clip_rect();
        plot.items.end_frame();
        plot.just_created = false;
        self.current_plot = None;
        self.current_item = None;
        self.id_stack.pop();
        Ok(())
    }
    fn setup_plot(&mut self, what: &'static str) -> Result<&mut Plot> {
        let plot = self
            .current_plot
            .and_then(|i| self.plots.get_mut(i))
            .ok_or(Error::NoCurrentPlot(what))?;
        if plot.setup_locked {
            log::warn!("{what} called after the plot setup was locked");
            return Err(Error::SetupLocked);
        }
        Ok(plot)
    }
    ///lays out the plot, locates ticks, handles input and draws the box,
    ///later setup calls fail until the next begin_plot
    pub fn setup_lock(&mut self) -> Result<()> {
        let idx = self
            .current_plot
            .ok_or(Error::NoCurrentPlot("setup_lock"))?;
        let plot = &mut self.plots[idx];
        if plot.setup_locked {
            return Ok(());
        }
        plot.setup_locked = true;
        let painter = &mut self.painter;
        let (style, host) = (&self.style, &self.host_style);
        painter.push_clip_rect(plot.frame_rect, true);
        painter.add_rect_filled(
            plot.frame_rect.min,
            plot.frame_rect.max,
            style.color_u32(StyleColor::FrameBg, host),
        );
        plot.canvas_rect = Rect::new(
            plot.frame_rect.min + style.plot_padding,
            plot.frame_rect.max - style.plot_padding,
        );
        plot.plot_rect = plot.canvas_rect;
        for axis in &mut plot.axes {
            axis.constrain();
            axis.locate_ticks(&painter.metrics);
        }
        if plot.has_title() {
            let top = Vec2::new(plot.frame_rect.center().x, plot.canvas_rect.min.y);
            painter.add_text_centered(
                top,
                style.color_u32(StyleColor::TitleText, host),
                display_text(&plot.title),
            );
            plot.plot_rect.min.y += painter.metrics.line_height + style.label_padding.y;
        }
        plot.animate(self.input.dt);
        plot.initialized = true;
        if let Some(menu) = handle_input(plot, &self.input) {
            log::debug!("opening {menu:?} menu of plot {:#x}", plot.id);
            self.open_menu = Some((plot.id, menu));
        }
        render_plot_box(painter, plot, style, host, self.input.mouse);
        painter.pop_clip_rect();
        Ok(())
    }
    ///sets the label and flags of an axis, none keeps the current label
    pub fn setup_axis(&mut self, axis: Axis3D, label: Option<&str>, flags: AxisFlags) -> Result<()> {
        let plot = self.setup_plot("setup_axis")?;
        let created = plot.just_created;
        let a = &mut plot.axes[axis.index()];
        if created || flags != a.previous_flags {
            a.flags = flags;
        }
        a.previous_flags = flags;
        if let Some(label) = label {
            a.set_label(label);
        }
        Ok(())
    }
    ///sets the range of an axis, ignored when min is not below max
    pub fn setup_axis_limits(&mut self, axis: Axis3D, min: f64, max: f64, cond: Cond) -> Result<()> {
        let plot = self.setup_plot("setup_axis_limits")?;
        if min.is_nan() || max.is_nan() || min >= max {
            log::debug!("ignoring empty limits {min}..{max} for {axis:?}");
            return Ok(());
        }
        if cond == Cond::Once && plot.initialized {
            return Ok(());
        }
        let a = &mut plot.axes[axis.index()];
        a.set_range(min, max);
        a.range_cond = cond;
        a.fit_this_frame = false;
        Ok(())
    }
    pub fn setup_axes(
        &mut self,
        labels: [Option<&str>; 3],
        flags: [AxisFlags; 3],
    ) -> Result<()> {
        for (i, axis) in Axis3D::ALL.into_iter().enumerate() {
            self.setup_axis(axis, labels[i], flags[i])?;
        }
        Ok(())
    }
    ///limits for all three axes as x, y and z (min, max) pairs,
    ///Once also skips the initial fit
    pub fn setup_axes_limits(&mut self, limits: [(f64, f64); 3], cond: Cond) -> Result<()> {
        for (axis, (min, max)) in Axis3D::ALL.into_iter().zip(limits) {
            self.setup_axis_limits(axis, min, max, cond)?;
        }
        if cond == Cond::Once {
            self.setup_plot("setup_axes_limits")?.fit_this_frame = false;
        }
        Ok(())
    }
    ///formatter for the axis's tick labels and mouse text
    pub fn setup_axis_format(&mut self, axis: Axis3D, formatter: Formatter) -> Result<()> {
        self.setup_plot("setup_axis_format")?.axes[axis.index()].formatter = Some(formatter);
        Ok(())
    }
    ///major ticks at values, labeled by labels or the formatter
    pub fn setup_axis_ticks(
        &mut self,
        axis: Axis3D,
        values: &[f64],
        labels: Option<&[&str]>,
        keep_default: bool,
    ) -> Result<()> {
        if let Some(labels) = labels {
            if labels.len() != values.len() {
                return Err(Error::DataLengthMismatch {
                    expected: values.len(),
                    actual: labels.len(),
                });
            }
        }
        let a = &mut self.setup_plot("setup_axis_ticks")?.axes[axis.index()];
        a.show_default_ticks = keep_default;
        a.custom_ticks.extend(values.iter().enumerate().map(|(i, v)| {
            (
                *v as f32,
                labels.and_then(|l| l.get(i)).map(|l| l.to_string()),
            )
        }));
        Ok(())
    }
    ///n evenly spaced major ticks from min to max
    pub fn setup_axis_ticks_range(
        &mut self,
        axis: Axis3D,
        min: f64,
        max: f64,
        n: usize,
        labels: Option<&[&str]>,
        keep_default: bool,
    ) -> Result<()> {
        let values: Vec<f64> = match n {
            0 => Vec::new(),
            1 => vec![min],
            _ => {
                let step = (max - min) / (n - 1) as f64;
                (0..n).map(|i| min + i as f64 * step).collect()
            }
        };
        self.setup_axis_ticks(axis, &values, labels, keep_default)
    }
    ///hard bounds the axis range can never leave
    pub fn setup_axis_limits_constraints(&mut self, axis: Axis3D, min: f64, max: f64) -> Result<()> {
        let a = &mut self.setup_plot("setup_axis_limits_constraints")?.axes[axis.index()];
        a.constraint_range = Range::new(min as f32, max as f32);
        Ok(())
    }
    ///bounds on the size of the axis range
    pub fn setup_axis_zoom_constraints(&mut self, axis: Axis3D, min: f64, max: f64) -> Result<()> {
        let a = &mut self.setup_plot("setup_axis_zoom_constraints")?.axes[axis.index()];
        a.constraint_zoom = Range::new(min as f32, max as f32);
        Ok(())
    }
    ///rotates the box to elevation and azimuth in degrees
    pub fn setup_box_rotation(
        &mut self,
        elevation: f32,
        azimuth: f32,
        animate: bool,
        cond: Cond,
    ) -> Result<()> {
        let rotation = Quat::from_el_az(elevation.to_radians(), azimuth.to_radians());
        self.setup_box_rotation_quat(rotation, animate, cond)
    }
    pub fn setup_box_rotation_quat(&mut self, rotation: Quat, animate: bool, cond: Cond) -> Result<()> {
        let plot = self.setup_plot("setup_box_rotation")?;
        if cond == Cond::Once && plot.initialized {
            return Ok(());
        }
        let rotation = rotation.normalized();
        if animate {
            let angle = 2.0 * plot.rotation.dot(rotation).abs().clamp(0.0, 1.0).acos();
            plot.rotation_animation_end = rotation;
            plot.animation_time = angle / (2.0 * 3.1415);
        } else {
            plot.rotation = rotation;
            plot.animation_time = 0.0;
        }
        plot.rotation_cond = cond;
        Ok(())
    }
    ///view restored by a right double click, elevation and azimuth in degrees
    pub fn setup_box_initial_rotation(&mut self, elevation: f32, azimuth: f32) -> Result<()> {
        let rotation = Quat::from_el_az(elevation.to_radians(), azimuth.to_radians());
        self.setup_box_initial_rotation_quat(rotation)
    }
    pub fn setup_box_initial_rotation_quat(&mut self, rotation: Quat) -> Result<()> {
        self.setup_plot("setup_box_initial_rotation")?.initial_rotation = rotation.normalized();
        Ok(())
    }
    ///stretches the box along each axis, every factor must be positive
    pub fn setup_box_scale(&mut self, x: f32, y: f32, z: f32) -> Result<()> {
        if [x, y, z].iter().any(|s| !(*s > 0.0) || !s.is_finite()) {
            return Err(Error::InvalidBoxScale);
        }
        self.setup_plot("setup_box_scale")?.box_scale = Point3::new(x, y, z);
        Ok(())
    }
    pub fn setup_legend(&mut self, location: Location, flags: LegendFlags) -> Result<()> {
        let plot = self.setup_plot("setup_legend")?;
        let created = plot.just_created;
        let legend = &mut plot.items.legend;
        if created || location != legend.previous_location {
            legend.location = location;
        }
        legend.previous_location = location;
        if created || flags != legend.previous_flags {
            legend.flags = flags;
        }
        legend.previous_flags = flags;
        Ok(())
    }
    ///registers an item for this frame and resolves its style,
    ///false when the item is hidden and nothing should be drawn
    pub fn begin_item(
        &mut self,
        label: &str,
        flags: ItemFlags,
        recolor_from: Option<StyleColor>,
    ) -> Result<bool> {
        let idx = self
            .current_plot
            .ok_or(Error::NoCurrentPlot("begin_item"))?;
        self.setup_lock()?;
        let cmap = self
            .resolve_colormap(None)
            .inspect_err(|e| log::warn!("begin_item({label:?}): {e}"))?;
        let id = hash_id(self.seed(), label);
        let group = &mut self.plots[idx].items;
        let (item_idx, created) = group.get_or_add(id);
        if created {
            log::debug!("created item {label:?} with id {id:#x}");
        }
        let seen = group.item(item_idx).is_some_and(|i| i.seen_this_frame);
        if !seen {
            if let Some(item) = group.item_mut(item_idx) {
                item.seen_this_frame = true;
                item.label = label.to_string();
            }
            if !flags.contains(ItemFlags::NO_LEGEND) && !display_text(label).is_empty() {
                group.legend.indices.push(item_idx);
            }
        }
        let explicit = recolor_from.and_then(|c| {
            let i = c as usize;
            let next = self.next_item.colors.get(i).copied().unwrap_or(Color::AUTO);
            if !next.is_auto() {
                Some(next)
            } else if !self.style.is_color_auto(c) {
                Some(self.style.colors[i])
            } else {
                None
            }
        });
        let new_color = match explicit {
            Some(col) => Some(col.to_u32()),
            None if created => {
                let n = self.colormaps.key_count(cmap);
                let col = self.colormaps.key_color(cmap, group.colormap_idx % n);
                group.colormap_idx += 1;
                Some(col)
            }
            None => None,
        };
        let highlight = !group.legend.flags.contains(LegendFlags::NO_HIGHLIGHT_ITEM);
        let Some(item) = group.item_mut(item_idx) else {
            return Err(Error::NoCurrentItem);
        };
        if let Some(col) = new_color {
            item.color = col;
        }
        let mut style = ItemStyle::resolve(&self.next_item, &self.style, Color::from_u32(item.color));
        let (show, legend_hovered) = (item.show, item.legend_hovered);
        self.current_item = Some(item_idx);
        if !show {
            style.hidden = true;
            self.item_style = style;
            self.end_item();
            return Ok(false);
        }
        if legend_hovered && highlight {
            style.line_weight *= 2.0;
            style.marker_size *= 1.25;
            style.marker_weight *= 2.0;
        }
        self.item_style = style;
        Ok(true)
    }
    ///forgets the next item style and the current item
    pub fn end_item(&mut self) {
        self.next_item = NextItemStyle::default();
        self.current_item = None;
    }
    ///style the current item resolved to
    pub fn item_style(&self) -> &ItemStyle {
        &self.item_style
    }
    pub fn style_colors_auto(&mut self) {
        self.style.colors_auto();
    }
    pub fn style_colors_dark(&mut self) {
        self.style.colors_dark();
    }
    pub fn style_colors_light(&mut self) {
        self.style.colors_light();
    }
    pub fn style_colors_classic(&mut self) {
        self.style.colors_classic();
    }
    ///resolved color, auto colors follow the host style
    pub fn style_color(&self, idx: StyleColor) -> Color {
        self.style.color(idx, &self.host_style)
    }
    pub fn push_style_color(&mut self, idx: StyleColor, col: Color) {
        self.style_stack.push_color(&mut self.style, idx, col);
    }
    pub fn pop_style_color(&mut self, count: usize) -> Result<()> {
        self.style_stack
            .pop_color(&mut self.style, count)
            .inspect_err(|e| log::warn!("{e}"))
    }
    pub fn push_style_var(&mut self, var: StyleVar, value: impl Into<StyleValue>) -> Result<()> {
        self.style_stack.push_var(&mut self.style, var, value.into())
    }
    pub fn pop_style_var(&mut self, count: usize) -> Result<()> {
        self.style_stack
            .pop_var(&mut self.style, count)
            .inspect_err(|e| log::warn!("{e}"))
    }
    ///line color and weight of the next item, Color::AUTO and none keep the style
    pub fn set_next_line_style(&mut self, col: Color, weight: Option<f32>) {
        self.next_item.colors[StyleColor::Line as usize] = col;
        self.next_item.line_weight = weight;
    }
    pub fn set_next_fill_style(&mut self, col: Color, alpha: Option<f32>) {
        self.next_item.colors[StyleColor::Fill as usize] = col;
        self.next_item.fill_alpha = alpha;
    }
    pub fn set_next_marker_style(
        &mut self,
        marker: Option<Marker>,
        size: Option<f32>,
        fill: Color,
        weight: Option<f32>,
        outline: Color,
    ) {
        let next = &mut self.next_item;
        next.marker = marker;
        next.marker_size = size;
        next.colors[StyleColor::MarkerFill as usize] = fill;
        next.marker_weight = weight;
        next.colors[StyleColor::MarkerOutline as usize] = outline;
    }
    pub fn colormaps(&self) -> &Colormaps {
        &self.colormaps
    }
    ///registers a colormap under a new name and returns its index
    pub fn add_colormap(&mut self, name: &str, colors: &[Color], qualitative: bool) -> Result<usize> {
        let keys: Vec<u32> = colors.iter().map(|c| c.to_u32()).collect();
        self.add_colormap_u32(name, &keys, qualitative)
    }
    pub fn add_colormap_u32(&mut self, name: &str, keys: &[u32], qualitative: bool) -> Result<usize> {
        self.colormaps
            .append(name, keys, qualitative)
            .inspect_err(|e| log::warn!("{e}"))
    }
    pub fn colormap_count(&self) -> usize {
        self.colormaps.count()
    }
    pub fn colormap_name(&self, cmap: usize) -> Option<&str> {
        self.colormaps.name(cmap)
    }
    pub fn colormap_index(&self, name: &str) -> Option<usize> {
        self.colormaps.index(name)
    }
    fn resolve_colormap(&self, cmap: Option<usize>) -> Result<usize> {
        let cmap = cmap.unwrap_or(self.style.colormap);
        if self.colormaps.contains(cmap) {
            Ok(cmap)
        } else {
            Err(Error::ColormapIndex(cmap))
        }
    }
    ///key count of cmap, none is the active colormap
    pub fn colormap_size(&self, cmap: Option<usize>) -> Result<usize> {
        Ok(self.colormaps.key_count(self.resolve_colormap(cmap)?))
    }
    ///key idx of cmap, wrapping around
    pub fn colormap_color(&self, idx: usize, cmap: Option<usize>) -> Result<Color> {
        let cmap = self.resolve_colormap(cmap)?;
        let n = self.colormaps.key_count(cmap);
        Ok(Color::from_u32(self.colormaps.key_color(cmap, idx % n)))
    }
    ///color at t in [0, 1] along cmap
    pub fn sample_colormap(&self, t: f32, cmap: Option<usize>) -> Result<Color> {
        let cmap = self.resolve_colormap(cmap)?;
        Ok(Color::from_u32(
            self.colormaps.lerp_table(cmap, t.clamp(0.0, 1.0)),
        ))
    }
    ///the color the next new item of the current plot would get, advancing the plot's counter
    pub fn next_colormap_color(&mut self) -> Result<Color> {
        let cmap = self.resolve_colormap(None)?;
        let n = self.colormaps.key_count(cmap);
        let idx = self
            .current_plot
            .ok_or(Error::NoCurrentPlot("next_colormap_color"))?;
        let group = &mut self.plots[idx].items;
        let col = self.colormaps.key_color(cmap, group.colormap_idx % n);
        group.colormap_idx += 1;
        Ok(Color::from_u32(col))
    }
    pub fn push_colormap(&mut self, cmap: usize) -> Result<()> {
        if !self.colormaps.contains(cmap) {
            log::warn!("push_colormap with unknown index {cmap}");
            return Err(Error::ColormapIndex(cmap));
        }
        self.style_stack.push_colormap(&mut self.style, cmap);
        Ok(())
    }
    pub fn push_colormap_by_name(&mut self, name: &str) -> Result<()> {
        let cmap = self.colormaps.index(name).ok_or_else(|| {
            log::warn!("push_colormap_by_name with unknown name {name:?}");
            Error::UnknownColormap(name.to_string())
        })?;
        self.push_colormap(cmap)
    }
    pub fn pop_colormap(&mut self, count: usize) -> Result<()> {
        self.style_stack
            .pop_colormap(&mut self.style, count)
            .inspect_err(|e| log::warn!("{e}"))
    }
    pub fn plot_to_pixels(&mut self, p: Point3) -> Result<Vec2> {
        self.setup_lock()?;
        Ok(self.current_plot_ref("plot_to_pixels")?.projection().plot_to_pixels(p))
    }
    pub fn pixels_to_plot_ray(&mut self, pix: Vec2) -> Result<Ray> {
        self.setup_lock()?;
        Ok(self
            .current_plot_ref("pixels_to_plot_ray")?
            .projection()
            .pixels_to_plot_ray(pix))
    }
    ///plot point under pix on the visible face orthogonal to plane, nan when there is none
    pub fn pixels_to_plot_plane(&mut self, pix: Vec2, plane: Plane, mask: bool) -> Result<Point3> {
        self.setup_lock()?;
        Ok(self
            .current_plot_ref("pixels_to_plot_plane")?
            .projection()
            .pixels_to_plot_plane(pix, plane, mask))
    }
    ///top left of the plot area in pixels
    pub fn plot_pos(&mut self) -> Result<Vec2> {
        self.setup_lock()?;
        Ok(self.current_plot_ref("plot_pos")?.plot_rect.min)
    }
    pub fn plot_size(&mut self) -> Result<Vec2> {
        self.setup_lock()?;
        Ok(self.current_plot_ref("plot_size")?.plot_rect.size())
    }
    pub fn is_plot_hovered(&mut self) -> Result<bool> {
        self.setup_lock()?;
        Ok(self.current_plot_ref("is_plot_hovered")?.hovered)
    }
    ///the open context menu, if any
    pub fn context_menu(&self) -> Option<ContextMenu> {
        self.open_menu.map(|(_, menu)| menu)
    }
    ///entries of the open context menu for the host to draw
    pub fn context_menu_entries(&self) -> Vec<MenuEntry> {
        self.open_menu
            .and_then(|(id, menu)| {
                let plot = self.plots.get(*self.plot_ids.get(&id)?)?;
                Some(context_menu_entries(plot, menu))
            })
            .unwrap_or_default()
    }
    ///applies a choice made in the open context menu
    pub fn apply_menu_action(&mut self, action: MenuAction) {
        let Some((id, _)) = self.open_menu else {
            log::warn!("apply_menu_action without an open menu");
            return;
        };
        if let Some(plot) = self.plot_ids.get(&id).and_then(|i| self.plots.get_mut(*i)) {
            apply_menu_action(plot, action);
        }
    }
    pub fn close_context_menu(&mut self) {
        self.open_menu = None;
    }
}
