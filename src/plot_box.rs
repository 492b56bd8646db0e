use crate::plot::{Plot, Projection};
use crate::solver::{BoxOrientation, EDGES, FACES};
use crate::style::{HostStyle, Style, StyleColor};
use crate::types::{Color, Plane, Point3, Vec2};
use crate::ui::Painter;
use std::f32::consts::PI;
///ndc length of a major tick mark, minor ones are half as long
const MAJOR_TICK: f32 = 0.06;
const MINOR_TICK: f32 = 0.03;
///pixel distance between an axis and its tick labels
const TICK_LABEL_OFFSET: f32 = 20.0;
///box geometry of the current frame
struct BoxFrame {
    proj: Projection,
    orientation: BoxOrientation,
    corners: [Point3; 8],
    corners_pix: [Vec2; 8],
    axis_corners: [Option<[usize; 2]>; 3],
}
impl BoxFrame {
    fn new(plot: &Plot) -> Self {
        let proj = plot.projection();
        let orientation = BoxOrientation::new(plot.rotation);
        let corners = proj.corners();
        let corners_pix = proj.corners_pix(&corners);
        let axis_corners = orientation.axis_corners(&corners, &corners_pix);
        Self {
            proj,
            orientation,
            corners,
            corners_pix,
            axis_corners,
        }
    }
}
///turns an angle into one that keeps text upright
fn upright(mut angle: f32) -> f32 {
    if angle > PI * 0.5 {
        angle -= PI;
    }
    if angle < -PI * 0.5 {
        angle += PI;
    }
    angle
}
pub(crate) fn render_plot_box(
    painter: &mut Painter,
    plot: &Plot,
    style: &Style,
    host: &HostStyle,
    mouse: Option<Vec2>,
) {
    let frame = BoxFrame::new(plot);
    render_background(painter, plot, &frame, style, host, mouse);
    render_border(painter, plot, &frame, style, host, mouse);
    render_grid(painter, plot, &frame, style, host);
    render_tick_marks(painter, plot, &frame, style, host);
    render_tick_labels(painter, plot, &frame, style, host);
    render_axis_labels(painter, plot, &frame, style, host);
}
fn render_background(
    painter: &mut Painter,
    plot: &Plot,
    frame: &BoxFrame,
    style: &Style,
    host: &HostStyle,
    mouse: Option<Vec2>,
) {
    let bg = style.color(StyleColor::PlotBg, host);
    let bg_hov = Color::new(bg.r + 0.03, bg.g + 0.03, bg.b + 0.03, bg.a);
    let hovered_plane = if plot.held {
        plot.held_plane_idx
    } else {
        mouse.and_then(|m| {
            if frame.orientation.mouse_over_axis(&frame.corners_pix, m).is_some() {
                None
            } else {
                frame.orientation.mouse_over_plane(&frame.corners_pix, m)
            }
        })
    };
    for (plane, face) in frame.orientation.visible_faces() {
        let [p0, p1, p2, p3] = FACES[face].map(|c| frame.corners_pix[c]);
        let col = if hovered_plane == Some(plane) { bg_hov } else { bg };
        painter.add_quad_filled(p0, p1, p2, p3, col.to_u32());
    }
}
fn render_border(
    painter: &mut Painter,
    plot: &Plot,
    frame: &BoxFrame,
    style: &Style,
    host: &HostStyle,
    mouse: Option<Vec2>,
) {
    let hovered_edge = if plot.held {
        plot.held_edge_idx
    } else {
        mouse
            .and_then(|m| frame.orientation.mouse_over_axis(&frame.corners_pix, m))
            .map(|(_, edge)| edge)
    };
    let col = style.color_u32(StyleColor::PlotBorder, host);
    let visible = frame.orientation.visible_edges();
    for (i, [a, b]) in EDGES.iter().enumerate() {
        if visible[i] {
            let thickness = if hovered_edge == Some(i) { 3.0 } else { 1.0 };
            painter.add_line(frame.corners_pix[*a], frame.corners_pix[*b], col, thickness);
        }
    }
}
fn render_grid(painter: &mut Painter, plot: &Plot, frame: &BoxFrame, style: &Style, host: &HostStyle) {
    let grid = style.color(StyleColor::AxisGrid, host);
    let col_minor = grid.with_alpha(grid.a * 0.3).to_u32();
    let col_major = grid.with_alpha(grid.a * 0.6).to_u32();
    for (plane, face) in frame.orientation.visible_faces() {
        let f = plane.index();
        let [p0, p1, _, p3] = FACES[face].map(|c| frame.corners[c]);
        //the face spans u from p0 to p1 and v from p0 to p3
        for (axis_idx, start, end) in [((f + 1) % 3, p0, p3), ((f + 2) % 3, p0, p1)] {
            let axis = &plot.axes[axis_idx];
            if !axis.has_grid_lines() {
                continue;
            }
            for tick in axis.ticker.iter() {
                let (mut a, mut b) = (start, end);
                a[axis_idx] = tick.plot_pos;
                b[axis_idx] = tick.plot_pos;
                let col = if tick.major { col_major } else { col_minor };
                painter.add_line(
                    frame.proj.plot_to_pixels(a),
                    frame.proj.plot_to_pixels(b),
                    col,
                    1.0,
                );
            }
        }
    }
}
///in plane direction orthogonal to the axis, none when the axis is the plane normal
fn tick_direction(axis_dir: Point3, plane: Plane) -> Option<Point3> {
    let mut proj_dir = axis_dir;
    proj_dir[plane.index()] = 0.0;
    let len = proj_dir.length();
    if len < 1e-12 {
        return None;
    }
    let d = proj_dir / len;
    let tick = match plane {
        Plane::YZ => Point3::new(0.0, -d.z, d.y),
        Plane::XZ => Point3::new(-d.z, 0.0, d.x),
        Plane::XY => Point3::new(-d.y, d.x, 0.0),
    };
    Some(tick.normalized())
}
fn render_tick_marks(
    painter: &mut Painter,
    plot: &Plot,
    frame: &BoxFrame,
    style: &Style,
    host: &HostStyle,
) {
    let col = style.color_u32(StyleColor::AxisTick, host);
    for (a, axis) in plot.axes.iter().enumerate() {
        if !axis.has_tick_marks() {
            continue;
        }
        let Some([i0, i1]) = frame.axis_corners[a] else {
            continue;
        };
        let start = frame.corners[i0];
        let dir = frame.corners[i1] - start;
        let len = dir.length();
        if len < 1e-12 {
            continue;
        }
        painter.add_line(frame.corners_pix[i0], frame.corners_pix[i1], col, 1.0);
        let plane = frame.orientation.plane_2d.unwrap_or(if a == 2 {
            Plane::XZ
        } else {
            Plane::XY
        });
        let Some(tick_dir) = tick_direction(dir / len, plane) else {
            continue;
        };
        for tick in axis.ticker.iter() {
            let mut pos = start;
            pos[a] = tick.plot_pos;
            let ndc = frame.proj.plot_to_ndc(pos);
            let size = if tick.major { MAJOR_TICK } else { MINOR_TICK };
            let half = tick_dir * (size * 0.5);
            painter.add_line(
                frame.proj.ndc_to_pixels(ndc - half),
                frame.proj.ndc_to_pixels(ndc + half),
                col,
                1.0,
            );
        }
    }
}
fn render_tick_labels(
    painter: &mut Painter,
    plot: &Plot,
    frame: &BoxFrame,
    style: &Style,
    host: &HostStyle,
) {
    let col = style.color_u32(StyleColor::AxisText, host);
    let box_center = frame.proj.plot_to_pixels(frame.proj.range_center());
    for (a, axis) in plot.axes.iter().enumerate() {
        if !axis.has_tick_labels() {
            continue;
        }
        let Some([i0, i1]) = frame.axis_corners[a] else {
            continue;
        };
        let (start_pix, end_pix) = (frame.corners_pix[i0], frame.corners_pix[i1]);
        let screen = end_pix - start_pix;
        let len = screen.norm();
        let dir = if len != 0.0 {
            screen / len
        } else {
            Vec2::new(1.0, 0.0)
        };
        let mut offset = Vec2::new(-dir.y, dir.x);
        let to_axis = (start_pix + end_pix) * 0.5 - box_center;
        if offset.dot(to_axis) < 0.0 {
            offset = -offset;
        }
        let offset = offset * TICK_LABEL_OFFSET;
        let mut angle = (-dir.y).atan2(dir.x) + PI * 0.5;
        if angle > PI {
            angle -= 2.0 * PI;
        }
        if angle < -PI {
            angle += 2.0 * PI;
        }
        let angle = upright(angle);
        let start = frame.corners[i0];
        for tick in axis.ticker.iter().filter(|t| t.show_label) {
            let mut pos = start;
            pos[a] = tick.plot_pos;
            let pix = frame.proj.plot_to_pixels(pos) + offset;
            painter.add_text_rotated(pix, angle, col, &tick.label);
        }
    }
}
fn render_axis_labels(
    painter: &mut Painter,
    plot: &Plot,
    frame: &BoxFrame,
    style: &Style,
    host: &HostStyle,
) {
    let col = style.color_u32(StyleColor::AxisText, host);
    let center = frame.proj.range_center();
    for (a, axis) in plot.axes.iter().enumerate() {
        if !axis.has_label() {
            continue;
        }
        let Some([i0, i1]) = frame.axis_corners[a] else {
            continue;
        };
        let mid = (frame.corners[i0] + frame.corners[i1]) * 0.5;
        let pos = mid + (mid - center) * 0.4;
        let d = frame.corners_pix[i1] - frame.corners_pix[i0];
        let angle = upright((-d.y).atan2(d.x));
        painter.add_text_rotated(frame.proj.plot_to_pixels(pos), angle, col, &axis.label);
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    #[test]
    fn labels_stay_upright() {
        assert_abs_diff_eq!(upright(PI * 0.75), -PI * 0.25, epsilon = 1e-6);
        assert_abs_diff_eq!(upright(-PI * 0.75), PI * 0.25, epsilon = 1e-6);
        assert_eq!(upright(0.3), 0.3);
    }
    #[test]
    fn tick_direction_turns_in_plane() {
        let d = tick_direction(Point3::new(1.0, 0.0, 0.0), Plane::XY);
        assert_eq!(d, Some(Point3::new(0.0, 1.0, 0.0)));
        let d = tick_direction(Point3::new(0.0, 0.0, 1.0), Plane::XZ);
        assert_eq!(d, Some(Point3::new(-1.0, 0.0, 0.0)));
        assert_eq!(tick_direction(Point3::new(0.0, 0.0, 1.0), Plane::XY), None);
    }
}
