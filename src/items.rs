use crate::colormap::mix_u32;
use crate::flags::{LegendFlags, Location, PlotFlags};
use crate::plot::Plot;
use crate::style::{HostStyle, Style, StyleColor};
use crate::types::{Plane, Rect, Vec2, alpha_u32};
use crate::ui::{Painter, TextMetrics, display_text, hash_id};
use std::collections::HashMap;
///a plotted series, kept across frames so its color and visibility persist
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: u64,
    pub color: u32,
    ///label the item was registered with, may carry a "##" suffix
    pub label: String,
    pub show: bool,
    pub legend_hovered: bool,
    pub seen_this_frame: bool,
}
impl Item {
    fn new(id: u64) -> Self {
        Self {
            id,
            color: 0xFFFFFFFF,
            label: String::new(),
            show: true,
            legend_hovered: false,
            seen_this_frame: false,
        }
    }
}
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub flags: LegendFlags,
    pub(crate) previous_flags: LegendFlags,
    pub location: Location,
    pub(crate) previous_location: Location,
    ///indices into the item pool, in registration order
    pub indices: Vec<usize>,
    pub rect: Rect,
    pub hovered: bool,
    pub held: bool,
}
impl Default for Legend {
    fn default() -> Self {
        Self {
            flags: LegendFlags::empty(),
            previous_flags: LegendFlags::empty(),
            location: Location::NORTH_WEST,
            previous_location: Location::NORTH_WEST,
            indices: Vec::new(),
            rect: Rect::default(),
            hovered: false,
            held: false,
        }
    }
}
impl Legend {
    pub fn reset(&mut self) {
        self.indices.clear();
    }
    pub fn is_horizontal(&self) -> bool {
        self.flags.contains(LegendFlags::HORIZONTAL)
    }
}
///item pool of a plot plus its legend
#[derive(Debug, Clone, Default)]
pub struct ItemGroup {
    items: Vec<Item>,
    by_id: HashMap<u64, usize>,
    pub legend: Legend,
    ///next colormap key handed to a new item
    pub colormap_idx: usize,
}
impl ItemGroup {
    pub fn item_id(&self, seed: u64, label: &str) -> u64 {
        hash_id(seed, label)
    }
    ///index of the item with id, inserting it if missing, and whether it was just created
    pub fn get_or_add(&mut self, id: u64) -> (usize, bool) {
        if let Some(i) = self.by_id.get(&id) {
            return (*i, false);
        }
        let i = self.items.len();
        self.items.push(Item::new(id));
        self.by_id.insert(id, i);
        (i, true)
    }
    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }
    pub fn item_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }
    pub fn by_id(&self, id: u64) -> Option<&Item> {
        self.by_id.get(&id).and_then(|i| self.items.get(*i))
    }
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
    pub fn legend_count(&self) -> usize {
        self.legend.indices.len()
    }
    pub fn legend_item(&self, i: usize) -> Option<&Item> {
        self.legend.indices.get(i).and_then(|idx| self.items.get(*idx))
    }
    pub fn legend_label(&self, i: usize) -> &str {
        self.legend_item(i).map(|item| item.label.as_str()).unwrap_or_default()
    }
    ///forgets every item and the legend
    pub fn reset(&mut self) {
        self.items.clear();
        self.by_id.clear();
        self.legend.reset();
        self.colormap_idx = 0;
    }
    pub(crate) fn end_frame(&mut self) {
        for item in &mut self.items {
            item.seen_this_frame = false;
        }
    }
}
///top left corner of a box of inner_size placed at loc inside outer, pad away from the edges
pub fn location_pos(outer: &Rect, inner_size: Vec2, loc: Location, pad: Vec2) -> Vec2 {
    let center = outer.center();
    let west = loc.contains(Location::WEST);
    let east = loc.contains(Location::EAST);
    let north = loc.contains(Location::NORTH);
    let south = loc.contains(Location::SOUTH);
    let x = match (west, east) {
        (true, false) => outer.min.x + pad.x,
        (false, true) => outer.max.x - pad.x - inner_size.x,
        _ => center.x - inner_size.x * 0.5,
    };
    let y = match (north, south) {
        (true, false) => outer.min.y + pad.y,
        (false, true) => outer.max.y - pad.y - inner_size.y,
        _ => center.y - inner_size.y * 0.5,
    };
    Vec2::new(x.round(), y.round())
}
pub fn legend_size(
    items: &ItemGroup,
    metrics: &TextMetrics,
    pad: Vec2,
    spacing: Vec2,
    vertical: bool,
) -> Vec2 {
    let n = items.legend_count();
    let txt_ht = metrics.line_height;
    let icon_size = txt_ht;
    let (max_w, sum_w) = (0..n)
        .map(|i| metrics.text_size(items.legend_label(i)).x)
        .fold((0.0f32, 0.0f32), |(m, s), w| (m.max(w), s + w));
    let gaps = n.saturating_sub(1) as f32;
    if vertical {
        Vec2::new(
            pad.x * 2.0 + icon_size + max_w,
            pad.y * 2.0 + n as f32 * txt_ht + gaps * spacing.y,
        )
    } else {
        Vec2::new(
            pad.x * 2.0 + icon_size * n as f32 + sum_w + gaps * spacing.x,
            pad.y * 2.0 + txt_ht,
        )
    }
}
///mouse state the legend reacts to
#[derive(Copy, Debug, Clone, Default)]
pub(crate) struct LegendInput {
    pub mouse: Option<Vec2>,
    ///some while the left button is down, true on press
    pub left: Option<bool>,
}
///draws the legend and handles entry clicks, toggling show on press
pub(crate) fn render_legend(
    painter: &mut Painter,
    plot: &mut Plot,
    style: &Style,
    host: &HostStyle,
    input: LegendInput,
) {
    let items = &mut plot.items;
    items.legend.hovered = false;
    if plot.flags.contains(PlotFlags::NO_LEGEND) || items.legend_count() == 0 {
        return;
    }
    let metrics = painter.metrics;
    let vertical = !items.legend.is_horizontal();
    let pad = style.legend_inner_padding;
    let spacing = style.legend_spacing;
    let size = legend_size(items, &metrics, pad, spacing, vertical);
    let pos = location_pos(
        &plot.plot_rect,
        size,
        items.legend.location,
        style.legend_padding,
    );
    let rect = Rect::from_min_size(pos, size);
    items.legend.rect = rect;
    items.legend.hovered = input.mouse.is_some_and(|m| rect.contains(m));
    painter.add_rect_filled(rect.min, rect.max, style.color_u32(StyleColor::LegendBg, host));
    painter.add_rect(
        rect.min,
        rect.max,
        style.color_u32(StyleColor::LegendBorder, host),
        1.0,
    );
    let txt_ht = metrics.line_height;
    let icon_size = txt_ht;
    let icon_shrink = 2.0;
    let col_txt = style.color_u32(StyleColor::LegendText, host);
    let col_txt_dis = alpha_u32(col_txt, 0.25);
    let flags = items.legend.flags;
    let mut sum_w = 0.0;
    let mut any_held = false;
    for i in 0..items.legend_count() {
        let Some(&idx) = items.legend.indices.get(i) else {
            continue;
        };
        let Some(item) = items.items.get_mut(idx) else {
            continue;
        };
        let label_w = metrics.text_size(&item.label).x;
        let top_left = if vertical {
            rect.min + pad + Vec2::new(0.0, i as f32 * (txt_ht + spacing.y))
        } else {
            rect.min + pad + Vec2::new(i as f32 * (icon_size + spacing.x) + sum_w, 0.0)
        };
        sum_w += label_w;
        let icon = Rect::new(
            top_left + Vec2::splat(icon_shrink),
            top_left + Vec2::splat(icon_size - icon_shrink),
        );
        let button = Rect::new(icon.min, top_left + Vec2::new(label_w + icon_size, icon_size));
        let col_item = alpha_u32(item.color, 1.0);
        let buttons = !flags.contains(LegendFlags::NO_BUTTONS);
        let hov = buttons && input.mouse.is_some_and(|m| button.contains(m));
        let held = hov && input.left.is_some();
        if hov && input.left == Some(true) {
            item.show = !item.show;
        }
        any_held |= held;
        let hovering = hov && !flags.contains(LegendFlags::NO_HIGHLIGHT_ITEM);
        item.legend_hovered = hovering;
        let col_txt_hl = if hovering {
            mix_u32(col_txt, col_item, 64)
        } else {
            col_txt
        };
        let disabled = |a: f32| host.text_disabled.with_alpha(host.text_disabled.a * a).to_u32();
        let col_icon = if held {
            if item.show {
                alpha_u32(col_item, 0.5)
            } else {
                disabled(0.5)
            }
        } else if hov {
            if item.show {
                alpha_u32(col_item, 0.75)
            } else {
                disabled(0.75)
            }
        } else if item.show {
            col_item
        } else {
            col_txt_dis
        };
        painter.add_rect_filled(icon.min, icon.max, col_icon);
        if !display_text(&item.label).is_empty() {
            painter.add_text(
                top_left + Vec2::new(icon_size, 0.0),
                if item.show { col_txt_hl } else { col_txt_dis },
                &item.label,
            );
        }
    }
    items.legend.held = any_held;
}
///"(x, y, z)" of the first face under the mouse, in the south east corner
pub(crate) fn render_mouse_text(painter: &mut Painter, plot: &Plot, style: &Style, host: &HostStyle, mouse: Option<Vec2>) {
    if plot.flags.contains(PlotFlags::NO_MOUSE_TEXT) {
        return;
    }
    let Some(mouse) = mouse else {
        return;
    };
    if !plot.plot_rect.contains(mouse) {
        return;
    }
    let proj = plot.projection();
    let Some(p) = Plane::ALL
        .into_iter()
        .map(|plane| proj.pixels_to_plot_plane(mouse, plane, true))
        .find(|p| !p.is_nan())
    else {
        return;
    };
    let text = format!(
        "({})",
        plot.axes
            .iter()
            .enumerate()
            .map(|(i, axis)| axis.formatter.unwrap_or(crate::axis::format_g)(p[i]))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let size = painter.calc_text_size(&text);
    let pos = location_pos(&plot.plot_rect, size, Location::SOUTH_EAST, Vec2::splat(10.0));
    painter.add_text(pos, style.color_u32(StyleColor::InlayText, host), &text);
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn items_are_pooled_by_id() {
        let mut group = ItemGroup::default();
        let a = group.item_id(0, "A");
        let (i, created) = group.get_or_add(a);
        assert!(created);
        let (j, created) = group.get_or_add(a);
        assert_eq!((i, created), (j, false));
        assert_ne!(group.item_id(0, "A##1"), group.item_id(0, "A##2"));
        assert_eq!(group.item_id(0, "A###k"), group.item_id(0, "B###k"));
        assert_eq!(group.item_count(), 1);
    }
    #[test]
    fn location_places_inside_padding() {
        let outer = Rect::new(Vec2::splat(0.0), Vec2::new(200.0, 100.0));
        let size = Vec2::new(20.0, 10.0);
        let pad = Vec2::splat(5.0);
        assert_eq!(location_pos(&outer, size, Location::NORTH_WEST, pad), Vec2::new(5.0, 5.0));
        assert_eq!(location_pos(&outer, size, Location::SOUTH_EAST, pad), Vec2::new(175.0, 85.0));
        assert_eq!(location_pos(&outer, size, Location::CENTER, pad), Vec2::new(90.0, 45.0));
        assert_eq!(location_pos(&outer, size, Location::NORTH, pad), Vec2::new(90.0, 5.0));
    }
    #[test]
    fn legend_size_counts_entries() {
        let mut group = ItemGroup::default();
        for label in ["ab", "abcd"] {
            let id = group.item_id(0, label);
            let (i, _) = group.get_or_add(id);
            if let Some(item) = group.item_mut(i) {
                item.label = label.to_string();
            }
            group.legend.indices.push(i);
        }
        let m = TextMetrics::default();
        let pad = Vec2::splat(5.0);
        let spacing = Vec2::new(5.0, 0.0);
        assert_eq!(legend_size(&group, &m, pad, spacing, true), Vec2::new(51.0, 36.0));
        assert_eq!(legend_size(&group, &m, pad, spacing, false), Vec2::new(83.0, 23.0));
    }
}
