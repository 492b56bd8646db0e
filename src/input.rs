use crate::flags::{AxisFlags, LegendFlags, Location, PlotFlags};
use crate::plot::Plot;
use crate::solver::BoxOrientation;
use crate::types::{Axis3D, InputState, Plane, Point3, Quat, Vec2};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
const LEFT: usize = 0;
const RIGHT: usize = 1;
const MIDDLE: usize = 2;
///seconds a right click waits for a second click before it opens a menu
const DOUBLE_CLICK_TIME: f32 = 0.3;
///squared pixel distance a right drag needs before it counts as rotating
const DRAG_THRESHOLD: f32 = 5.0;
const DEG: f32 = 3.1415 / 180.0;
///per frame mouse state derived from consecutive InputStates
#[derive(Copy, Debug, Clone, Default, PartialEq)]
pub(crate) struct FrameInput {
    pub mouse: Option<Vec2>,
    pub mouse_delta: Vec2,
    ///left, right and middle
    pub down: [bool; 3],
    pub clicked: [bool; 3],
    pub released: [bool; 3],
    pub double_clicked: [bool; 3],
    ///where each button was last pressed
    pub press_pos: [Vec2; 3],
    pub wheel: f32,
    pub dt: f32,
    ///seconds since the context was created
    pub time: f32,
    pub clicked_time: [f32; 3],
}
impl FrameInput {
    ///advances to the frame described by input
    pub(crate) fn update(&mut self, input: &InputState) {
        let previous = self.mouse;
        self.mouse = input.pointer_pos;
        self.mouse_delta = match (previous, self.mouse) {
            (Some(a), Some(b)) => b - a,
            _ => Vec2::splat(0.0),
        };
        self.dt = input.dt.max(0.0);
        self.time += self.dt;
        self.wheel = input.raw_scroll_delta.y;
        for b in 0..3 {
            let state = input.button(b);
            let was_down = self.down[b];
            self.down[b] = state.is_some();
            self.clicked[b] = state == Some(true) || (state.is_some() && !was_down);
            self.released[b] = was_down && state.is_none();
            self.double_clicked[b] = input.double_click[b];
            if self.clicked[b] {
                self.press_pos[b] = self.mouse.unwrap_or(self.press_pos[b]);
                self.clicked_time[b] = self.time;
            }
        }
    }
    ///distance from the press position while the button is down
    pub(crate) fn drag_delta(&self, b: usize) -> Vec2 {
        match self.mouse {
            Some(m) if self.down[b] => m - self.press_pos[b],
            _ => Vec2::splat(0.0),
        }
    }
    pub(crate) fn any_down(&self) -> bool {
        self.down.iter().any(|d| *d)
    }
}
///which context menu is open
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Eq)]
pub enum ContextMenu {
    Legend,
    Axis(Axis3D),
    Plot,
}
///a change requested from a context menu
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq)]
pub enum MenuAction {
    ToggleLegend,
    LegendHorizontal(bool),
    LegendLocation(Location),
    ToggleLockMin(Axis3D),
    ToggleLockMax(Axis3D),
    SetMin(Axis3D, f64),
    SetMax(Axis3D, f64),
    ToggleAutoFit(Axis3D),
    ToggleLabel(Axis3D),
    ToggleGridLines(Axis3D),
    ToggleTickMarks(Axis3D),
    ToggleTickLabels(Axis3D),
    ToggleTitle,
}
impl MenuAction {
    ///replaces the value carried by SetMin and SetMax
    pub fn with_value(self, value: f64) -> Self {
        match self {
            MenuAction::SetMin(axis, _) => MenuAction::SetMin(axis, value),
            MenuAction::SetMax(axis, _) => MenuAction::SetMax(axis, value),
            other => other,
        }
    }
}
///one line of a context menu as the host should draw it
#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry {
    Checkbox {
        label: String,
        checked: bool,
        enabled: bool,
        action: MenuAction,
    },
    Radio {
        label: String,
        selected: bool,
        action: MenuAction,
    },
    ///an editable number, send action.with_value(new) back
    Value {
        label: String,
        value: f64,
        enabled: bool,
        action: MenuAction,
    },
    Submenu {
        label: String,
        entries: Vec<MenuEntry>,
    },
    Separator,
}
fn checkbox(label: &str, checked: bool, enabled: bool, action: MenuAction) -> MenuEntry {
    MenuEntry::Checkbox {
        label: label.to_string(),
        checked,
        enabled,
        action,
    }
}
fn location_name(loc: Location) -> &'static str {
    match loc {
        Location::NORTH_WEST => "North West",
        Location::NORTH => "North",
        Location::NORTH_EAST => "North East",
        Location::WEST => "West",
        Location::EAST => "East",
        Location::SOUTH_WEST => "South West",
        Location::SOUTH => "South",
        Location::SOUTH_EAST => "South East",
        _ => "Center",
    }
}
fn legend_entries(plot: &Plot) -> Vec<MenuEntry> {
    let legend = &plot.items.legend;
    let horizontal = legend.flags.contains(LegendFlags::HORIZONTAL);
    let mut entries = vec![
        checkbox(
            "Show",
            !plot.flags.contains(PlotFlags::NO_LEGEND),
            true,
            MenuAction::ToggleLegend,
        ),
        MenuEntry::Separator,
        MenuEntry::Radio {
            label: "H".to_string(),
            selected: horizontal,
            action: MenuAction::LegendHorizontal(true),
        },
        MenuEntry::Radio {
            label: "V".to_string(),
            selected: !horizontal,
            action: MenuAction::LegendHorizontal(false),
        },
        MenuEntry::Separator,
    ];
    entries.extend(Location::ALL.into_iter().map(|loc| MenuEntry::Radio {
        label: location_name(loc).to_string(),
        selected: legend.location == loc,
        action: MenuAction::LegendLocation(loc),
    }));
    entries
}
fn axis_entries(plot: &Plot, a: Axis3D) -> Vec<MenuEntry> {
    let axis = &plot.axes[a.index()];
    let lock_enabled = !axis.is_range_locked() && !axis.is_auto_fitting();
    let flag = |f: AxisFlags| axis.flags.contains(f);
    vec![
        checkbox("Lock Min", flag(AxisFlags::LOCK_MIN), lock_enabled, MenuAction::ToggleLockMin(a)),
        MenuEntry::Value {
            label: "Min".to_string(),
            value: axis.range.min as f64,
            enabled: !axis.is_locked_min(),
            action: MenuAction::SetMin(a, axis.range.min as f64),
        },
        checkbox("Lock Max", flag(AxisFlags::LOCK_MAX), lock_enabled, MenuAction::ToggleLockMax(a)),
        MenuEntry::Value {
            label: "Max".to_string(),
            value: axis.range.max as f64,
            enabled: !axis.is_locked_max(),
            action: MenuAction::SetMax(a, axis.range.max as f64),
        },
        MenuEntry::Separator,
        checkbox("Auto-Fit", flag(AxisFlags::AUTO_FIT), true, MenuAction::ToggleAutoFit(a)),
        MenuEntry::Separator,
        checkbox(
            "Label",
            !flag(AxisFlags::NO_LABEL),
            !axis.label.is_empty(),
            MenuAction::ToggleLabel(a),
        ),
        checkbox("Grid Lines", !flag(AxisFlags::NO_GRID_LINES), true, MenuAction::ToggleGridLines(a)),
        checkbox("Tick Marks", !flag(AxisFlags::NO_TICK_MARKS), true, MenuAction::ToggleTickMarks(a)),
        checkbox(
            "Tick Labels",
            !flag(AxisFlags::NO_TICK_LABELS),
            true,
            MenuAction::ToggleTickLabels(a),
        ),
    ]
}
///entries of menu for plot, submenus nest their own entries
pub fn context_menu_entries(plot: &Plot, menu: ContextMenu) -> Vec<MenuEntry> {
    match menu {
        ContextMenu::Legend => legend_entries(plot),
        ContextMenu::Axis(a) => axis_entries(plot, a),
        ContextMenu::Plot => {
            let mut entries: Vec<MenuEntry> = Axis3D::ALL
                .into_iter()
                .map(|a| {
                    let axis = &plot.axes[a.index()];
                    let label = if axis.label.is_empty() {
                        a.name().to_string()
                    } else {
                        axis.label.clone()
                    };
                    MenuEntry::Submenu {
                        label,
                        entries: axis_entries(plot, a),
                    }
                })
                .collect();
            entries.push(MenuEntry::Submenu {
                label: "Legend".to_string(),
                entries: legend_entries(plot),
            });
            entries.push(MenuEntry::Submenu {
                label: "Settings".to_string(),
                entries: vec![checkbox(
                    "Title",
                    !plot.flags.contains(PlotFlags::NO_TITLE),
                    !plot.title.is_empty(),
                    MenuAction::ToggleTitle,
                )],
            });
            entries
        }
    }
}
pub fn apply_menu_action(plot: &mut Plot, action: MenuAction) {
    let axis_flag = |plot: &mut Plot, a: Axis3D, f: AxisFlags| plot.axes[a.index()].flags.toggle(f);
    match action {
        MenuAction::ToggleLegend => plot.flags.toggle(PlotFlags::NO_LEGEND),
        MenuAction::LegendHorizontal(h) => plot.items.legend.flags.set(LegendFlags::HORIZONTAL, h),
        MenuAction::LegendLocation(loc) => plot.items.legend.location = loc,
        MenuAction::ToggleLockMin(a) => axis_flag(plot, a, AxisFlags::LOCK_MIN),
        MenuAction::ToggleLockMax(a) => axis_flag(plot, a, AxisFlags::LOCK_MAX),
        MenuAction::SetMin(a, v) => {
            plot.axes[a.index()].set_min(v, true);
        }
        MenuAction::SetMax(a, v) => {
            plot.axes[a.index()].set_max(v, true);
        }
        MenuAction::ToggleAutoFit(a) => axis_flag(plot, a, AxisFlags::AUTO_FIT),
        MenuAction::ToggleLabel(a) => axis_flag(plot, a, AxisFlags::NO_LABEL),
        MenuAction::ToggleGridLines(a) => axis_flag(plot, a, AxisFlags::NO_GRID_LINES),
        MenuAction::ToggleTickMarks(a) => axis_flag(plot, a, AxisFlags::NO_TICK_MARKS),
        MenuAction::ToggleTickLabels(a) => axis_flag(plot, a, AxisFlags::NO_TICK_LABELS),
        MenuAction::ToggleTitle => plot.flags.toggle(PlotFlags::NO_TITLE),
    }
}
fn axis_from_index(i: usize) -> Axis3D {
    Axis3D::ALL[i % 3]
}
///rotation that looks straight at plane with its remaining axes upright
fn snap_rotation(rotation: Quat, orientation: &BoxOrientation, plane: Plane) -> Quat {
    let p = plane.index();
    let unit = |i: usize, s: f32| {
        let mut v = Point3::splat(0.0);
        v[i] = s;
        v
    };
    let up = unit(1, 1.0);
    let normal = unit(p, if orientation.active_faces[p] { -1.0 } else { 1.0 });
    let mut end = Quat::from_two_vectors(rotation * normal, unit(2, 1.0)) * rotation;
    let current_up = if plane == Plane::XY {
        [unit(0, 1.0), unit(0, -1.0), unit(1, 1.0), unit(1, -1.0)]
            .map(|v| end * v)
            .into_iter()
            .max_by(|a, b| a.dot(up).total_cmp(&b.dot(up)))
            .unwrap_or(up)
    } else {
        end * unit(2, 1.0)
    };
    end = Quat::from_two_vectors(current_up, up) * end;
    end.normalized()
}
///moves every transformed axis by delta and marks it held
fn translate(plot: &mut Plot, delta: Point3) {
    for (i, axis) in plot.axes.iter_mut().enumerate() {
        if !plot.transform_axes[i] || delta[i].is_nan() {
            continue;
        }
        if !axis.is_input_locked_min() && !axis.is_input_locked_max() {
            let d = delta[i] as f64;
            axis.set_range(axis.range.min as f64 - d, axis.range.max as f64 - d);
        }
        axis.held = true;
    }
}
///runs the interaction state machine for one frame and returns the menu to open
pub(crate) fn handle_input(plot: &mut Plot, input: &FrameInput) -> Option<ContextMenu> {
    let proj = plot.projection();
    let orientation = BoxOrientation::new(plot.rotation);
    let corners_pix = proj.corners_pix(&proj.corners());
    plot.hovered = input.mouse.is_some_and(|m| plot.plot_rect.contains(m));
    let legend_hovered = plot.items.legend.hovered;
    let plot_clicked = plot.hovered && !legend_hovered && input.clicked.iter().any(|c| *c);
    if plot_clicked {
        plot.held = true;
    }
    if !input.any_down() {
        plot.held = false;
    }
    let rot_drag = input.drag_delta(RIGHT);
    let rotating = rot_drag.dot(rot_drag) > DRAG_THRESHOLD;
    let (hovered_axis, hovered_plane) = match input.mouse {
        Some(m) if plot.hovered => match orientation.mouse_over_axis(&corners_pix, m) {
            Some(axis) => (Some(axis), None),
            None => (None, orientation.mouse_over_plane(&corners_pix, m)),
        },
        _ => (None, None),
    };
    for (i, axis) in plot.axes.iter_mut().enumerate() {
        axis.hovered = hovered_axis.is_some_and(|(a, _)| a.index() == i);
        if !input.down[LEFT] && !input.down[MIDDLE] {
            axis.held = false;
        }
    }
    if !plot.held {
        plot.held_edge_idx = None;
        plot.held_plane_idx = None;
    }
    if !plot.axes.iter().any(|a| a.held) {
        plot.transform_axes = match (hovered_axis, hovered_plane) {
            (Some((a, _)), _) => [0, 1, 2].map(|i| i == a.index()),
            (None, Some(p)) => [0, 1, 2].map(|i| i != p.index()),
            _ => [true; 3],
        };
    }
    let mark_held = |plot: &mut Plot, was_held: bool| {
        if !was_held {
            plot.held_edge_idx = hovered_axis.map(|(_, e)| e);
            plot.held_plane_idx = hovered_plane;
        }
    };
    if plot.hovered
        && ((plot_clicked && input.double_clicked[LEFT]) || input.double_clicked[MIDDLE])
    {
        plot.fit_this_frame = true;
        for (axis, fit) in plot.axes.iter_mut().zip(plot.transform_axes) {
            axis.fit_this_frame |= fit;
        }
        log::debug!("plot {:#x} fitting to its data", plot.id);
    }
    for axis in &mut plot.axes {
        if axis.is_auto_fitting() {
            plot.fit_this_frame = true;
            axis.fit_this_frame = true;
        }
    }
    if let (true, true, Some(mouse)) = (plot.held, input.down[LEFT], input.mouse) {
        let was_held = plot.axes.iter().any(|a| a.held);
        let d = input.mouse_delta;
        let delta = if plot.transform_axes == [true; 3] {
            let zoom = proj.zoom();
            let delta_ndc = plot.rotation.inverse() * Point3::new(d.x / zoom, -d.y / zoom, 0.0);
            proj.ndc_to_plot(delta_ndc) - proj.ndc_to_plot(Point3::splat(0.0))
        } else {
            let plane = match plot.transform_axes {
                [_, true, true] => Plane::YZ,
                [true, _, true] => Plane::XZ,
                [false, false, true] => Plane::YZ,
                _ => Plane::XY,
            };
            proj.pixels_to_plot_plane(mouse + d, plane, false)
                - proj.pixels_to_plot_plane(mouse, plane, false)
        };
        translate(plot, delta);
        mark_held(plot, was_held);
    }
    if plot.held && input.clicked[RIGHT] {
        plot.context_click = true;
    }
    if rotating || input.double_clicked[RIGHT] {
        plot.context_click = false;
    }
    if plot.held && input.double_clicked[RIGHT] {
        let end = match hovered_plane {
            Some(plane) => snap_rotation(plot.rotation, &orientation, plane),
            None => plot.initial_rotation,
        };
        let dot = plot.rotation.dot(end).abs().clamp(-1.0, 1.0);
        let angle = 2.0 * dot.acos();
        plot.rotation_animation_end = end;
        plot.animation_time = angle / (2.0 * 3.1415);
    } else if plot.held && input.down[RIGHT] && !plot.is_rotation_locked() {
        let d = input.mouse_delta;
        plot.rotation = Quat::from_axis_angle(d.y * DEG, Point3::new(1.0, 0.0, 0.0))
            * plot.rotation
            * Quat::from_axis_angle(d.x * DEG, Point3::new(0.0, 0.0, 1.0));
        plot.rotation.normalize();
    }
    if plot.hovered && (input.down[MIDDLE] || input.wheel != 0.0) {
        let was_held = plot.axes.iter().any(|a| a.held);
        let delta = if input.down[MIDDLE] {
            -0.01 * input.mouse_delta.y
        } else {
            -0.1 * input.wheel
        };
        let zoom = (1.0 + delta) as f64;
        for (i, axis) in plot.axes.iter_mut().enumerate() {
            if !plot.transform_axes[i] {
                continue;
            }
            if !axis.is_auto_fitting() {
                let center = (axis.range.min as f64 + axis.range.max as f64) * 0.5;
                let half = axis.range.size() as f64 * zoom * 0.5;
                axis.set_min(center - half, false);
                axis.set_max(center + half, false);
            }
            axis.held = true;
        }
        mark_held(plot, was_held);
    }
    let not_double_click = input.time - input.clicked_time[RIGHT] > DOUBLE_CLICK_TIME;
    if plot.hovered && plot.context_click && not_double_click && !input.down[RIGHT] {
        plot.context_click = false;
        plot.open_context_this_frame = true;
        if plot.flags.contains(PlotFlags::NO_MENUS) {
            return None;
        }
        return Some(if legend_hovered {
            ContextMenu::Legend
        } else if let Some((a, _)) = hovered_axis {
            ContextMenu::Axis(a)
        } else if let Some(p) = hovered_plane {
            ContextMenu::Axis(axis_from_index(p.index()))
        } else {
            ContextMenu::Plot
        });
    }
    None
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Range, Rect};
    use approx::assert_abs_diff_eq;
    fn flat_plot() -> Plot {
        let mut plot = Plot::new(1);
        plot.rotation = Quat::IDENTITY;
        plot.initial_rotation = Quat::IDENTITY;
        plot.plot_rect = Rect::new(Vec2::splat(0.0), Vec2::splat(180.0));
        for axis in &mut plot.axes {
            axis.range = Range::new(0.0, 1.0);
            axis.fit_this_frame = false;
        }
        plot.fit_this_frame = false;
        plot
    }
    fn state(pos: Vec2) -> InputState {
        InputState {
            pointer_pos: Some(pos),
            ..Default::default()
        }
    }
    #[test]
    fn frame_input_tracks_edges_and_drags() {
        let mut input = FrameInput::default();
        let mut s = state(Vec2::new(10.0, 10.0));
        s.pointer_right = Some(true);
        input.update(&s);
        assert!(input.clicked[RIGHT] && input.down[RIGHT]);
        s.pointer_pos = Some(Vec2::new(13.0, 14.0));
        s.pointer_right = Some(false);
        input.update(&s);
        assert!(!input.clicked[RIGHT]);
        assert_eq!(input.mouse_delta, Vec2::new(3.0, 4.0));
        assert_eq!(input.drag_delta(RIGHT), Vec2::new(3.0, 4.0));
        s.pointer_right = None;
        input.update(&s);
        assert!(input.released[RIGHT]);
        assert_eq!(input.drag_delta(RIGHT), Vec2::splat(0.0));
    }
    #[test]
    fn right_drag_rotates_about_z() {
        let mut plot = flat_plot();
        let mut input = FrameInput::default();
        let mut s = state(Vec2::new(5.0, 5.0));
        s.pointer_right = Some(true);
        input.update(&s);
        handle_input(&mut plot, &input);
        assert!(plot.held);
        s.pointer_pos = Some(Vec2::new(15.0, 5.0));
        s.pointer_right = Some(false);
        input.update(&s);
        handle_input(&mut plot, &input);
        let expected = Quat::from_axis_angle(10.0 * DEG, Point3::new(0.0, 0.0, 1.0));
        assert_abs_diff_eq!(plot.rotation.z, expected.z, epsilon = 1e-5);
        assert_abs_diff_eq!(plot.rotation.w, expected.w, epsilon = 1e-5);
        assert!(!plot.context_click);
    }
    #[test]
    fn locked_rotation_ignores_drags() {
        let mut plot = flat_plot();
        plot.rotation_cond = crate::types::Cond::Always;
        let mut input = FrameInput::default();
        let mut s = state(Vec2::new(5.0, 5.0));
        s.pointer_right = Some(true);
        input.update(&s);
        handle_input(&mut plot, &input);
        s.pointer_pos = Some(Vec2::new(25.0, 5.0));
        s.pointer_right = Some(false);
        input.update(&s);
        handle_input(&mut plot, &input);
        assert_eq!(plot.rotation, Quat::IDENTITY);
    }
    #[test]
    fn wheel_zooms_the_hovered_plane() {
        let mut plot = flat_plot();
        let mut input = FrameInput::default();
        let mut s = state(Vec2::new(90.0, 90.0));
        s.raw_scroll_delta = Vec2::new(0.0, 1.0);
        input.update(&s);
        handle_input(&mut plot, &input);
        assert_eq!(plot.transform_axes, [true, true, false]);
        for i in 0..2 {
            assert_abs_diff_eq!(plot.axes[i].range.min, 0.05, epsilon = 1e-6);
            assert_abs_diff_eq!(plot.axes[i].range.max, 0.95, epsilon = 1e-6);
        }
        assert_eq!(plot.axes[2].range, Range::new(0.0, 1.0));
        assert_eq!(plot.held_plane_idx, Some(Plane::XY));
    }
    #[test]
    fn left_drag_pans_in_the_plane() {
        let mut plot = flat_plot();
        let mut input = FrameInput::default();
        let mut s = state(Vec2::new(90.0, 90.0));
        s.pointer = Some(true);
        input.update(&s);
        handle_input(&mut plot, &input);
        s.pointer_pos = Some(Vec2::new(100.0, 90.0));
        s.pointer = Some(false);
        input.update(&s);
        handle_input(&mut plot, &input);
        assert_abs_diff_eq!(plot.axes[0].range.min, -0.1, epsilon = 1e-5);
        assert_abs_diff_eq!(plot.axes[0].range.max, 0.9, epsilon = 1e-5);
        assert_abs_diff_eq!(plot.axes[1].range.min, 0.0, epsilon = 1e-5);
        assert!(plot.axes[0].held);
        s.pointer = None;
        input.update(&s);
        handle_input(&mut plot, &input);
        assert!(!plot.held && !plot.axes[0].held);
        assert_eq!(plot.held_plane_idx, None);
    }
    #[test]
    fn locked_axes_do_not_pan() {
        let mut plot = flat_plot();
        plot.axes[0].flags = AxisFlags::LOCK_MIN;
        let mut input = FrameInput::default();
        let mut s = state(Vec2::new(90.0, 90.0));
        s.pointer = Some(true);
        input.update(&s);
        handle_input(&mut plot, &input);
        s.pointer_pos = Some(Vec2::new(100.0, 80.0));
        s.pointer = Some(false);
        input.update(&s);
        handle_input(&mut plot, &input);
        assert_eq!(plot.axes[0].range, Range::new(0.0, 1.0));
        assert_abs_diff_eq!(plot.axes[1].range.min, -0.1, epsilon = 1e-5);
    }
    #[test]
    fn double_click_fits_the_transformed_axes() {
        let mut plot = flat_plot();
        let mut input = FrameInput::default();
        let mut s = state(Vec2::new(90.0, 90.0));
        s.pointer = Some(true);
        s.double_click[LEFT] = true;
        input.update(&s);
        handle_input(&mut plot, &input);
        assert!(plot.fit_this_frame);
        let fits: Vec<bool> = plot.axes.iter().map(|a| a.fit_this_frame).collect();
        assert_eq!(fits, vec![true, true, false]);
    }
    #[test]
    fn right_double_click_restores_the_initial_view() {
        let mut plot = flat_plot();
        plot.rotation = Quat::from_axis_angle(0.5, Point3::new(1.0, 0.0, 0.0));
        let mut input = FrameInput::default();
        let mut s = state(Vec2::new(2.0, 2.0));
        s.pointer_right = Some(true);
        s.double_click[RIGHT] = true;
        input.update(&s);
        handle_input(&mut plot, &input);
        assert_eq!(plot.rotation_animation_end, Quat::IDENTITY);
        assert_abs_diff_eq!(plot.animation_time, 0.5 / (2.0 * 3.1415), epsilon = 1e-4);
        assert!(!plot.context_click);
    }
    #[test]
    fn snapping_to_the_facing_plane_is_a_no_op() {
        let o = BoxOrientation::new(Quat::IDENTITY);
        let end = snap_rotation(Quat::IDENTITY, &o, Plane::XY);
        assert_abs_diff_eq!(end.w.abs(), 1.0, epsilon = 1e-5);
    }
    #[test]
    fn snapping_to_a_side_plane_faces_it() {
        let rotation = Quat::new(-0.513269, -0.212596, -0.318184, 0.76819).normalized();
        let o = BoxOrientation::new(rotation);
        let end = snap_rotation(rotation, &o, Plane::YZ);
        let sign = if o.active_faces[0] { -1.0 } else { 1.0 };
        let normal = end * Point3::new(sign, 0.0, 0.0);
        assert_abs_diff_eq!(normal.z, 1.0, epsilon = 1e-4);
        let z = end * Point3::new(0.0, 0.0, 1.0);
        assert_abs_diff_eq!(z.y, 1.0, epsilon = 1e-4);
    }
    #[test]
    fn right_click_opens_a_menu_after_the_double_click_window() {
        let mut plot = flat_plot();
        let mut input = FrameInput::default();
        let mut s = state(Vec2::new(5.0, 5.0));
        s.pointer_right = Some(true);
        input.update(&s);
        assert_eq!(handle_input(&mut plot, &input), None);
        assert!(plot.context_click);
        s.pointer_right = None;
        let mut opened = Vec::new();
        for _ in 0..30 {
            input.update(&s);
            if let Some(menu) = handle_input(&mut plot, &input) {
                opened.push(menu);
            }
        }
        assert_eq!(opened, vec![ContextMenu::Plot]);
    }
    #[test]
    fn no_menus_suppresses_opening() {
        let mut plot = flat_plot();
        plot.flags = PlotFlags::NO_MENUS;
        let mut input = FrameInput::default();
        let mut s = state(Vec2::new(90.0, 90.0));
        s.pointer_right = Some(true);
        input.update(&s);
        handle_input(&mut plot, &input);
        s.pointer_right = None;
        for _ in 0..30 {
            input.update(&s);
            assert_eq!(handle_input(&mut plot, &input), None);
        }
    }
    #[test]
    fn axis_menu_reflects_and_changes_flags() {
        let mut plot = flat_plot();
        let entries = context_menu_entries(&plot, ContextMenu::Axis(Axis3D::Y));
        assert!(entries.contains(&checkbox(
            "Grid Lines",
            true,
            true,
            MenuAction::ToggleGridLines(Axis3D::Y)
        )));
        apply_menu_action(&mut plot, MenuAction::ToggleGridLines(Axis3D::Y));
        assert!(!plot.axes[1].has_grid_lines());
        plot.axes[1].flags |= AxisFlags::LOCK_MIN;
        apply_menu_action(&mut plot, MenuAction::SetMin(Axis3D::Y, 0.0).with_value(-2.0));
        assert_eq!(plot.axes[1].range.min, -2.0);
        let entries = context_menu_entries(&plot, ContextMenu::Axis(Axis3D::Y));
        assert!(matches!(entries[1], MenuEntry::Value { enabled: false, .. }));
    }
    #[test]
    fn plot_menu_nests_axes_legend_and_settings() {
        let mut plot = flat_plot();
        let entries = context_menu_entries(&plot, ContextMenu::Plot);
        let labels: Vec<&str> = entries
            .iter()
            .filter_map(|e| match e {
                MenuEntry::Submenu { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["X", "Y", "Z", "Legend", "Settings"]);
        apply_menu_action(&mut plot, MenuAction::LegendLocation(Location::SOUTH));
        apply_menu_action(&mut plot, MenuAction::LegendHorizontal(true));
        apply_menu_action(&mut plot, MenuAction::ToggleLegend);
        assert_eq!(plot.items.legend.location, Location::SOUTH);
        assert!(plot.items.legend.is_horizontal());
        assert!(plot.flags.contains(PlotFlags::NO_LEGEND));
    }
}
