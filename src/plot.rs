use crate::axis::Axis;
use crate::draw_list::DrawList3D;
use crate::flags::PlotFlags;
use crate::items::ItemGroup;
use crate::solver::{BoxOrientation, UNIT_CORNERS};
use crate::types::{Box3, Cond, Plane, Point3, Quat, Range, Ray, Rect, Vec2};
use crate::ui::display_text;
///the three quarter view new plots start from
pub const INIT_ROTATION: Quat = Quat::new(-0.513269, -0.212596, -0.318184, 0.76819);
///everything needed to map between plot, ndc and pixel space for one frame
#[derive(Copy, Debug, Clone, PartialEq)]
pub struct Projection {
    pub rotation: Quat,
    pub plot_rect: Rect,
    pub ranges: [Range; 3],
    pub inverted: [bool; 3],
    pub box_scale: Point3,
}
impl Projection {
    ///pixels per ndc unit
    pub fn zoom(&self) -> f32 {
        self.plot_rect.width().min(self.plot_rect.height()) / 1.8
    }
    pub fn plot_to_ndc(&self, p: Point3) -> Point3 {
        let mut ndc = Point3::splat(0.0);
        for i in 0..3 {
            let r = self.ranges[i];
            let mut v = (p[i] - r.min) / (r.max - r.min) - 0.5;
            if self.inverted[i] {
                v = -v;
            }
            ndc[i] = v * self.box_scale[i];
        }
        ndc
    }
    pub fn ndc_to_plot(&self, ndc: Point3) -> Point3 {
        let mut p = Point3::splat(0.0);
        for i in 0..3 {
            let r = self.ranges[i];
            let mut v = ndc[i] / self.box_scale[i];
            if self.inverted[i] {
                v = -v;
            }
            p[i] = r.min + (v + 0.5) * (r.max - r.min);
        }
        p
    }
    pub fn ndc_to_pixels(&self, ndc: Point3) -> Vec2 {
        let p = (self.rotation * ndc) * self.zoom();
        let center = self.plot_rect.center();
        Vec2::new(center.x + p.x, center.y - p.y)
    }
    pub fn plot_to_pixels(&self, p: Point3) -> Vec2 {
        self.ndc_to_pixels(self.plot_to_ndc(p))
    }
    ///ray through a pixel, starting in front of the box
    pub fn pixels_to_ndc_ray(&self, pix: Vec2) -> Ray {
        let zoom = self.zoom();
        let center = self.plot_rect.center();
        let x = (pix.x - center.x) / zoom;
        let y = -(pix.y - center.y) / zoom;
        let inv = self.rotation.inverse();
        let near = inv * Point3::new(x, y, -10.0);
        let far = inv * Point3::new(x, y, 10.0);
        Ray {
            origin: near,
            direction: (far - near).normalized(),
        }
    }
    pub fn ndc_ray_to_plot_ray(&self, ray: Ray) -> Ray {
        let origin = self.ndc_to_plot(ray.origin);
        let direction = (self.ndc_to_plot(ray.origin + ray.direction) - origin).normalized();
        Ray { origin, direction }
    }
    pub fn pixels_to_plot_ray(&self, pix: Vec2) -> Ray {
        self.ndc_ray_to_plot_ray(self.pixels_to_ndc_ray(pix))
    }
    ///intersects the pixel's ray with the visible face orthogonal to plane,
    ///nan when it misses or, with mask, when the hit lies outside the face
    pub fn pixels_to_plot_plane(&self, pix: Vec2, plane: Plane, mask: bool) -> Point3 {
        let nan = Point3::splat(f32::NAN);
        let ray = self.pixels_to_ndc_ray(pix);
        let orientation = BoxOrientation::new(self.rotation);
        let i = plane.index();
        let half = 0.5 * self.box_scale[i];
        let level = if orientation.active_faces[i] { half } else { -half };
        let denom = ray.direction[i];
        if denom.abs() < 1e-12 {
            return nan;
        }
        let t = (level - ray.origin[i]) / denom;
        if t < 0.0 {
            return nan;
        }
        let hit = ray.origin + ray.direction * t;
        if mask {
            for j in [(i + 1) % 3, (i + 2) % 3] {
                if hit[j].abs() > 0.5 * self.box_scale[j] {
                    return nan;
                }
            }
        }
        self.ndc_to_plot(hit)
    }
    ///sort key of a plot point, larger is closer to the viewer
    pub fn point_depth(&self, p: Point3) -> f32 {
        let mut p = p;
        for i in 0..3 {
            if self.inverted[i] {
                p[i] = -p[i];
            }
        }
        (self.rotation * p).z
    }
    ///box corners in plot space
    pub fn corners(&self) -> [Point3; 8] {
        UNIT_CORNERS.map(|c| self.ndc_to_plot(c * self.box_scale * 0.5))
    }
    pub fn corners_pix(&self, corners: &[Point3; 8]) -> [Vec2; 8] {
        corners.map(|c| self.plot_to_pixels(c))
    }
    pub fn range_center(&self) -> Point3 {
        let r = &self.ranges;
        Point3::new(
            (r[0].min + r[0].max) * 0.5,
            (r[1].min + r[1].max) * 0.5,
            (r[2].min + r[2].max) * 0.5,
        )
    }
    ///the shown range as a box
    pub fn range_box(&self) -> Box3 {
        let r = &self.ranges;
        Box3::new(
            Point3::new(r[0].min, r[1].min, r[2].min),
            Point3::new(r[0].max, r[1].max, r[2].max),
        )
    }
}
///state of one plot, kept across frames
#[derive(Debug, Clone)]
pub struct Plot {
    pub id: u64,
    pub flags: PlotFlags,
    pub(crate) previous_flags: PlotFlags,
    pub title: String,
    pub frame_rect: Rect,
    pub canvas_rect: Rect,
    pub plot_rect: Rect,
    pub initial_rotation: Quat,
    pub rotation: Quat,
    pub rotation_cond: Cond,
    pub axes: [Axis; 3],
    ///stretch of the cube along each axis
    pub box_scale: Point3,
    pub animation_time: f32,
    pub rotation_animation_end: Quat,
    pub setup_locked: bool,
    ///set once the first setup lock ran
    pub initialized: bool,
    pub just_created: bool,
    pub hovered: bool,
    pub held: bool,
    pub held_edge_idx: Option<usize>,
    pub held_plane_idx: Option<Plane>,
    ///axes moved by the current pan or zoom
    pub(crate) transform_axes: [bool; 3],
    pub fit_this_frame: bool,
    pub items: ItemGroup,
    pub draw_list: DrawList3D,
    pub context_click: bool,
    pub open_context_this_frame: bool,
}
impl Plot {
    pub fn new(id: u64) -> Self {
        let mut axes: [Axis; 3] = Default::default();
        for (axis, label) in axes.iter_mut().zip(["X", "Y", "Z"]) {
            axis.set_label(label);
        }
        Self {
            id,
            flags: PlotFlags::empty(),
            previous_flags: PlotFlags::empty(),
            title: String::new(),
            frame_rect: Rect::default(),
            canvas_rect: Rect::default(),
            plot_rect: Rect::default(),
            initial_rotation: INIT_ROTATION,
            rotation: INIT_ROTATION,
            rotation_cond: Cond::None,
            axes,
            box_scale: Point3::splat(1.0),
            animation_time: 0.0,
            rotation_animation_end: INIT_ROTATION,
            setup_locked: false,
            initialized: false,
            just_created: true,
            hovered: false,
            held: false,
            held_edge_idx: None,
            held_plane_idx: None,
            transform_axes: [true; 3],
            fit_this_frame: true,
            items: ItemGroup::default(),
            draw_list: DrawList3D::default(),
            context_click: false,
            open_context_this_frame: false,
        }
    }
    ///keeps the title when it has something to display
    pub fn set_title(&mut self, title: &str) {
        self.title.clear();
        if !display_text(title).is_empty() {
            self.title.push_str(title);
        }
    }
    pub fn has_title(&self) -> bool {
        !self.title.is_empty() && !self.flags.contains(PlotFlags::NO_TITLE)
    }
    pub fn projection(&self) -> Projection {
        Projection {
            rotation: self.rotation,
            plot_rect: self.plot_rect,
            ranges: self.axes.each_ref().map(|a| a.range),
            inverted: self.axes.each_ref().map(|a| a.is_inverted()),
            box_scale: self.box_scale,
        }
    }
    pub fn range_center(&self) -> Point3 {
        self.projection().range_center()
    }
    ///grows the extents of every axis still fitting this frame
    pub fn extend_fit(&mut self, p: Point3) {
        for (i, axis) in self.axes.iter_mut().enumerate() {
            if axis.fit_this_frame {
                axis.extend_fit(p[i]);
            }
        }
    }
    ///applies the data extents collected this frame
    pub(crate) fn apply_fit(&mut self) {
        if !self.fit_this_frame {
            return;
        }
        self.fit_this_frame = false;
        for axis in &mut self.axes {
            if axis.fit_this_frame {
                axis.fit_this_frame = false;
                axis.apply_fit();
            }
        }
    }
    ///steps the rotation animation by dt seconds
    pub(crate) fn animate(&mut self, dt: f32) {
        if self.animation_time <= 0.0 {
            return;
        }
        let t = (dt / self.animation_time).clamp(0.0, 1.0);
        self.animation_time = (self.animation_time - dt).max(0.0);
        self.rotation = Quat::slerp(self.rotation, self.rotation_animation_end, t);
    }
    pub fn is_rotation_locked(&self) -> bool {
        self.rotation_cond == Cond::Always
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    fn projection() -> Projection {
        Projection {
            rotation: Quat::IDENTITY,
            plot_rect: Rect::new(Vec2::splat(0.0), Vec2::splat(180.0)),
            ranges: [Range::new(0.0, 10.0), Range::new(-1.0, 1.0), Range::new(0.0, 1.0)],
            inverted: [false; 3],
            box_scale: Point3::splat(1.0),
        }
    }
    #[test]
    fn identity_maps_the_box_onto_the_rect_center() {
        let proj = projection();
        assert_eq!(proj.zoom(), 100.0);
        let pix = proj.plot_to_pixels(Point3::new(10.0, 1.0, 0.5));
        assert_abs_diff_eq!(pix.x, 140.0, epsilon = 1e-4);
        assert_abs_diff_eq!(pix.y, 40.0, epsilon = 1e-4);
    }
    #[test]
    fn inverted_and_scaled_axes_round_trip() {
        let mut proj = projection();
        proj.inverted = [true, false, true];
        proj.box_scale = Point3::new(2.0, 1.0, 0.5);
        let p = Point3::new(2.5, 0.25, 0.75);
        let ndc = proj.plot_to_ndc(p);
        assert_abs_diff_eq!(ndc.x, 0.5, epsilon = 1e-6);
        let back = proj.ndc_to_plot(ndc);
        assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-5);
        assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-5);
        assert_abs_diff_eq!(back.z, p.z, epsilon = 1e-5);
    }
    #[test]
    fn plane_hits_respect_the_mask() {
        let proj = projection();
        let hit = proj.pixels_to_plot_plane(Vec2::new(140.0, 40.0), Plane::XY, true);
        assert_abs_diff_eq!(hit.x, 10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(hit.y, 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(hit.z, 0.0, epsilon = 1e-4);
        assert!(proj.pixels_to_plot_plane(Vec2::new(175.0, 40.0), Plane::XY, true).is_nan());
        assert!(!proj.pixels_to_plot_plane(Vec2::new(175.0, 40.0), Plane::XY, false).is_nan());
        assert!(proj.pixels_to_plot_plane(Vec2::new(140.0, 40.0), Plane::YZ, false).is_nan());
    }
    #[test]
    fn corners_follow_the_ranges() {
        let proj = projection();
        let c = proj.corners();
        assert_eq!(c[0], Point3::new(0.0, -1.0, 0.0));
        assert_eq!(c[6], Point3::new(10.0, 1.0, 1.0));
    }
    #[test]
    fn animation_reaches_its_target() {
        let mut plot = Plot::new(0);
        plot.rotation = Quat::IDENTITY;
        plot.rotation_animation_end = Quat::from_axis_angle(1.0, Point3::new(0.0, 0.0, 1.0));
        plot.animation_time = 0.1;
        plot.animate(0.05);
        assert_abs_diff_eq!(plot.animation_time, 0.05, epsilon = 1e-6);
        plot.animate(0.05);
        assert_abs_diff_eq!(plot.animation_time, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(plot.rotation.z, plot.rotation_animation_end.z, epsilon = 1e-5);
    }
}
