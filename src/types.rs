#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};
///relative float equality used for degenerate range detection
pub(crate) fn almost_equal(a: f32, b: f32, ulp: f32) -> bool {
    (a - b).abs() < f32::EPSILON * (a + b).abs() * ulp || (a - b).abs() < f32::MIN_POSITIVE
}
pub(crate) fn nan_or_inf(v: f32) -> bool {
    !v.is_finite()
}
pub(crate) fn remap01(x: f32, x0: f32, x1: f32) -> f32 {
    if x1 - x0 != 0.0 {
        (x - x0) / (x1 - x0)
    } else {
        0.0
    }
}
///a point or vector in screen space, in pixels
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}
impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }
    pub fn norm(&self) -> f32 {
        self.y.hypot(self.x)
    }
    pub fn dot(&self, rhs: Vec2) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }
    pub fn to_tuple(self) -> (f32, f32) {
        (self.x, self.y)
    }
    #[cfg(feature = "egui")]
    pub(crate) fn to_pos2(self) -> egui::Pos2 {
        egui::Pos2 {
            x: self.x,
            y: self.y,
        }
    }
}
impl From<(f32, f32)> for Vec2 {
    fn from(value: (f32, f32)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}
impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Self) -> Self::Output {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Self) -> Self::Output {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}
impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Self::Output {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}
impl Div<f32> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f32) -> Self::Output {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}
impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Self::Output {
        Vec2::new(-self.x, -self.y)
    }
}
impl AddAssign<Vec2> for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}
impl SubAssign<Vec2> for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}
impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}
///a point or vector in plot or ndc space
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}
impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }
    pub fn dot(&self, rhs: Point3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }
    pub fn cross(&self, rhs: Point3) -> Point3 {
        Point3::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }
    pub fn normalized(self) -> Point3 {
        self / self.length()
    }
    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
    pub fn to_tuple(self) -> (f32, f32, f32) {
        (self.x, self.y, self.z)
    }
}
impl From<(f32, f32, f32)> for Point3 {
    fn from(value: (f32, f32, f32)) -> Self {
        Self {
            x: value.0,
            y: value.1,
            z: value.2,
        }
    }
}
impl Index<usize> for Point3 {
    type Output = f32;
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        }
    }
}
impl IndexMut<usize> for Point3 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => &mut self.z,
        }
    }
}
impl Add for Point3 {
    type Output = Point3;
    fn add(self, rhs: Self) -> Self::Output {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}
impl Sub for Point3 {
    type Output = Point3;
    fn sub(self, rhs: Self) -> Self::Output {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
impl Mul<f32> for Point3 {
    type Output = Point3;
    fn mul(self, rhs: f32) -> Self::Output {
        Point3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
impl Mul<Point3> for Point3 {
    type Output = Point3;
    fn mul(self, rhs: Point3) -> Self::Output {
        Point3::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}
impl Div<f32> for Point3 {
    type Output = Point3;
    fn div(self, rhs: f32) -> Self::Output {
        Point3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}
impl Div<Point3> for Point3 {
    type Output = Point3;
    fn div(self, rhs: Point3) -> Self::Output {
        Point3::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}
impl Neg for Point3 {
    type Output = Point3;
    fn neg(self) -> Self::Output {
        Point3::new(-self.x, -self.y, -self.z)
    }
}
impl AddAssign<Point3> for Point3 {
    fn add_assign(&mut self, rhs: Point3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}
impl SubAssign<Point3> for Point3 {
    fn sub_assign(&mut self, rhs: Point3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}
impl MulAssign<f32> for Point3 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}
impl DivAssign<f32> for Point3 {
    fn div_assign(&mut self, rhs: f32) {
        self.x /= rhs;
        self.y /= rhs;
        self.z /= rhs;
    }
}
///rotation quaternion, w is the scalar part
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}
impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}
impl Quat {
    pub const IDENTITY: Quat = Quat::new(0.0, 0.0, 0.0, 1.0);
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
    ///rotation of angle radians around a unit axis
    pub fn from_axis_angle(angle: f32, axis: Point3) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(s * axis.x, s * axis.y, s * axis.z, c)
    }
    ///shortest rotation taking v0 onto v1
    pub fn from_two_vectors(v0: Point3, v1: Point3) -> Self {
        let nd = v0.dot(v1) / (v0.length() * v1.length());
        if (nd - 1.0).abs() < 1e-6 {
            return Self::IDENTITY;
        }
        if (nd + 1.0).abs() < 1e-6 {
            //any axis orthogonal to v0 works, pick it from the dominant component
            let axis = if v0.x.abs() > v0.z.abs() {
                Point3::new(-v0.y, v0.x, 0.0)
            } else {
                Point3::new(0.0, -v0.z, v0.y)
            }
            .normalized();
            return Self::new(axis.x, axis.y, axis.z, 0.0);
        }
        let axis = v0.cross(v1).normalized();
        Self::from_axis_angle(nd.acos(), axis)
    }
    ///camera orientation from elevation and azimuth in radians
    pub fn from_el_az(elevation: f32, azimuth: f32) -> Self {
        let x = Point3::new(1.0, 0.0, 0.0);
        let z = Point3::new(0.0, 0.0, 1.0);
        Self::from_axis_angle(elevation, x)
            * Self::from_axis_angle(-std::f32::consts::FRAC_PI_2, x)
            * Self::from_axis_angle(azimuth, z)
    }
    pub fn length(&self) -> f32 {
        self.dot(*self).sqrt()
    }
    pub fn normalized(self) -> Self {
        let l = self.length();
        Self::new(self.x / l, self.y / l, self.z / l, self.w / l)
    }
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }
    pub fn inverse(self) -> Self {
        let l2 = self.dot(self);
        Self::new(-self.x / l2, -self.y / l2, -self.z / l2, self.w / l2)
    }
    pub fn dot(&self, rhs: Quat) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }
    ///spherical interpolation along the shortest arc, t is clamped to [0, 1]
    pub fn slerp(q1: Quat, q2: Quat, t: f32) -> Quat {
        let t = t.clamp(0.0, 1.0);
        let mut dot = q1.dot(q2);
        let mut q2 = q2;
        if dot < 0.0 {
            q2 = Quat::new(-q2.x, -q2.y, -q2.z, -q2.w);
            dot = -dot;
        }
        if dot > 0.9995 {
            return Quat::new(
                q1.x + t * (q2.x - q1.x),
                q1.y + t * (q2.y - q1.y),
                q1.z + t * (q2.z - q1.z),
                q1.w + t * (q2.w - q1.w),
            )
            .normalized();
        }
        let theta0 = dot.acos();
        let theta = theta0 * t;
        let sin_theta = theta.sin();
        let sin_theta0 = theta0.sin();
        let s1 = theta.cos() - dot * sin_theta / sin_theta0;
        let s2 = sin_theta / sin_theta0;
        Quat::new(
            s1 * q1.x + s2 * q2.x,
            s1 * q1.y + s2 * q2.y,
            s1 * q1.z + s2 * q2.z,
            s1 * q1.w + s2 * q2.w,
        )
    }
}
impl Mul for Quat {
    type Output = Quat;
    fn mul(self, rhs: Self) -> Self::Output {
        Quat::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}
impl Mul<Point3> for Quat {
    type Output = Point3;
    fn mul(self, p: Point3) -> Self::Output {
        let qv = Point3::new(self.x, self.y, self.z);
        let uv = qv.cross(p);
        let uuv = qv.cross(uv);
        p + uv * (2.0 * self.w) + uuv * 2.0
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}
impl Default for Range {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}
impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
    ///empty range that any value expands
    pub(crate) const fn inverted_infinite() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        }
    }
    pub fn expand(&mut self, value: f32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
    pub fn size(&self) -> f32 {
        self.max - self.min
    }
}
///axis aligned box in plot space
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct Box3 {
    pub min: Point3,
    pub max: Point3,
}
impl Box3 {
    pub const fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }
    pub fn expand(&mut self, p: Point3) {
        self.min = Point3::new(
            self.min.x.min(p.x),
            self.min.y.min(p.y),
            self.min.z.min(p.z),
        );
        self.max = Point3::new(
            self.max.x.max(p.x),
            self.max.y.max(p.y),
            self.max.z.max(p.z),
        );
    }
    pub fn contains(&self, p: Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
    ///liang-barsky clip of the segment p0 p1 against the box,
    ///none if no part of the segment is inside
    pub fn clip_line_segment(&self, p0: Point3, p1: Point3) -> Option<(Point3, Point3)> {
        if p0.is_nan() || p1.is_nan() {
            return None;
        }
        if self.contains(p0) && self.contains(p1) {
            return Some((p0, p1));
        }
        let mut t0 = 0.0f64;
        let mut t1 = 1.0f64;
        let d = p1 - p0;
        let mut update = |p: f64, q: f64| -> bool {
            if p == 0.0 {
                return q >= 0.0;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return false;
                }
                if r > t0 {
                    t0 = r
                }
            } else {
                if r < t0 {
                    return false;
                }
                if r < t1 {
                    t1 = r
                }
            }
            true
        };
        for i in 0..3 {
            let (d, s) = (d[i] as f64, p0[i] as f64);
            if !update(-d, s - self.min[i] as f64) || !update(d, self.max[i] as f64 - s) {
                return None;
            }
        }
        let (t0, t1) = (t0 as f32, t1 as f32);
        Some((p0 + d * t0, p0 + d * t1))
    }
}
#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Point3,
}
///screen rectangle in pixels
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}
impl Rect {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min, min + size)
    }
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.x < self.max.x && p.y < self.max.y
    }
    pub fn intersect(&self, other: &Rect) -> Rect {
        Rect::new(
            Vec2::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            Vec2::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        )
    }
}
///rgba color with float channels, alpha of -1 marks an automatic color
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}
impl Default for Color {
    fn default() -> Self {
        Self::AUTO
    }
}
impl Color {
    pub const AUTO: Color = Color::new(0.0, 0.0, 0.0, -1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
    pub const fn splat(c: f32, a: f32) -> Self {
        Self { r: c, g: c, b: c, a }
    }
    pub fn is_auto(&self) -> bool {
        self.a == -1.0
    }
    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }
    ///packed as 0xAABBGGRR
    pub fn from_u32(col: u32) -> Self {
        let c = |s: u32| ((col >> s) & 0xFF) as f32 / 255.0;
        Self::new(c(0), c(8), c(16), c(24))
    }
    ///packed as 0xAABBGGRR
    pub fn to_u32(self) -> u32 {
        let c = |v: f32| ((v.clamp(0.0, 1.0) * 255.0 + 0.5) as u32) & 0xFF;
        c(self.r) | (c(self.g) << 8) | (c(self.b) << 16) | (c(self.a) << 24)
    }
    #[cfg(feature = "egui")]
    pub(crate) fn to_col(self) -> egui::Color32 {
        let c = self.to_u32();
        egui::Color32::from_rgba_unmultiplied(
            c as u8,
            (c >> 8) as u8,
            (c >> 16) as u8,
            (c >> 24) as u8,
        )
    }
    #[cfg(feature = "tiny-skia")]
    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
        .unwrap_or(tiny_skia::Color::BLACK)
    }
}
pub(crate) const fn col32(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24)
}
///scales the alpha channel of a packed color
pub(crate) fn alpha_u32(col: u32, alpha: f32) -> u32 {
    col & !((((1.0 - alpha) * 255.0) as u32) << 24)
}
///when a setup value is applied
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Eq, Default)]
pub enum Cond {
    ///apply every call
    #[default]
    None,
    ///apply every call and lock against user input
    Always,
    ///apply only when the plot is first created
    Once,
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Axis3D {
    X = 0,
    Y = 1,
    Z = 2,
}
impl Axis3D {
    pub const ALL: [Axis3D; 3] = [Axis3D::X, Axis3D::Y, Axis3D::Z];
    pub fn index(self) -> usize {
        self as usize
    }
    pub(crate) fn name(self) -> &'static str {
        match self {
            Axis3D::X => "X-Axis",
            Axis3D::Y => "Y-Axis",
            Axis3D::Z => "Z-Axis",
        }
    }
}
///the plane orthogonal to the named axis
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Plane {
    YZ = 0,
    XZ = 1,
    XY = 2,
}
impl Plane {
    pub const ALL: [Plane; 3] = [Plane::YZ, Plane::XZ, Plane::XY];
    pub fn index(self) -> usize {
        self as usize
    }
    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    Circle,
    Square,
    Diamond,
    Up,
    Down,
    Left,
    Right,
    Cross,
    Plus,
    Asterisk,
}
impl Marker {
    pub const ALL: [Marker; 10] = [
        Marker::Circle,
        Marker::Square,
        Marker::Diamond,
        Marker::Up,
        Marker::Down,
        Marker::Left,
        Marker::Right,
        Marker::Cross,
        Marker::Plus,
        Marker::Asterisk,
    ];
    ///whether the shape has an interior to fill
    pub fn is_fillable(self) -> bool {
        !matches!(self, Marker::Cross | Marker::Plus | Marker::Asterisk)
    }
}
///host input for a single frame
#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
    ///how much scroll wheel has scrolled, in notches, positive is up
    pub raw_scroll_delta: Vec2,
    ///where the pointer is currently
    pub pointer_pos: Option<Vec2>,
    ///some if pointer is down, true if this frame pointer was pressed
    pub pointer: Option<bool>,
    ///some if pointer is down, true if this frame pointer was pressed
    pub pointer_right: Option<bool>,
    ///some if pointer is down, true if this frame pointer was pressed
    pub pointer_middle: Option<bool>,
    ///left, right, middle double clicks this frame
    pub double_click: [bool; 3],
    ///seconds since last frame
    pub dt: f32,
}
impl Default for InputState {
    fn default() -> Self {
        Self {
            raw_scroll_delta: Vec2::splat(0.0),
            pointer_pos: None,
            pointer: None,
            pointer_right: None,
            pointer_middle: None,
            double_click: [false; 3],
            dt: 1.0 / 60.0,
        }
    }
}
impl InputState {
    ///resets raw_scroll_delta, double clicks and pressed edges,
    ///expected to happen after a frame
    pub fn reset(&mut self) {
        self.raw_scroll_delta = Vec2::splat(0.0);
        self.double_click = [false; 3];
        for p in [
            &mut self.pointer,
            &mut self.pointer_right,
            &mut self.pointer_middle,
        ] {
            if p.is_some() {
                *p = Some(false);
            }
        }
    }
    pub(crate) fn button(&self, b: usize) -> Option<bool> {
        match b {
            0 => self.pointer,
            1 => self.pointer_right,
            _ => self.pointer_middle,
        }
    }
}
#[cfg(feature = "egui")]
impl From<&egui::InputState> for InputState {
    fn from(val: &egui::InputState) -> Self {
        let state = |b: egui::PointerButton| {
            if val.pointer.button_down(b) {
                Some(val.pointer.button_pressed(b))
            } else {
                None
            }
        };
        InputState {
            raw_scroll_delta: Vec2 {
                x: val.raw_scroll_delta.x / 50.0,
                y: val.raw_scroll_delta.y / 50.0,
            },
            pointer_pos: val.pointer.latest_pos().map(|a| Vec2::new(a.x, a.y)),
            pointer: state(egui::PointerButton::Primary),
            pointer_right: state(egui::PointerButton::Secondary),
            pointer_middle: state(egui::PointerButton::Middle),
            double_click: [
                val.pointer
                    .button_double_clicked(egui::PointerButton::Primary),
                val.pointer
                    .button_double_clicked(egui::PointerButton::Secondary),
                val.pointer.button_double_clicked(egui::PointerButton::Middle),
            ],
            dt: val.stable_dt,
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;
    fn assert_point_eq(a: Point3, b: Point3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-5);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-5);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-5);
    }
    #[test]
    fn quat_rotates_x_onto_y() {
        let q = Quat::from_axis_angle(FRAC_PI_2, Point3::new(0.0, 0.0, 1.0));
        assert_point_eq(q * Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0));
        assert_point_eq(q.inverse() * (q * Point3::new(0.3, -2.0, 5.0)), Point3::new(0.3, -2.0, 5.0));
    }
    #[test]
    fn from_two_vectors_parallel_is_identity() {
        let v = Point3::new(0.0, 2.0, 0.0);
        assert_eq!(Quat::from_two_vectors(v, v * 3.0), Quat::IDENTITY);
    }
    #[test]
    fn from_two_vectors_antiparallel_flips() {
        let v0 = Point3::new(1.0, 0.0, 0.0);
        let q = Quat::from_two_vectors(v0, -v0);
        assert_abs_diff_eq!(q.w, 0.0);
        assert_point_eq(q * v0, -v0);
        let v0 = Point3::new(0.0, 0.0, 1.0);
        let q = Quat::from_two_vectors(v0, -v0);
        assert_point_eq(q * v0, -v0);
    }
    #[test]
    fn from_two_vectors_general() {
        let v0 = Point3::new(1.0, 0.0, 0.0);
        let v1 = Point3::new(1.0, 1.0, 0.0);
        let q = Quat::from_two_vectors(v0, v1);
        assert_point_eq(q * v0, v1.normalized());
    }
    #[test]
    fn slerp_endpoints_and_stability() {
        let a = Quat::from_axis_angle(0.3, Point3::new(0.0, 1.0, 0.0));
        let b = Quat::from_axis_angle(1.3, Point3::new(0.0, 1.0, 0.0));
        let s = Quat::slerp(a, b, 1.0);
        assert_abs_diff_eq!(s.dot(b), 1.0, epsilon = 1e-5);
        let s = Quat::slerp(a, b, 0.5);
        let mid = Quat::from_axis_angle(0.8, Point3::new(0.0, 1.0, 0.0));
        assert_abs_diff_eq!(s.dot(mid), 1.0, epsilon = 1e-5);
        let neg = Quat::new(-a.x, -a.y, -a.z, -a.w);
        for t in [0.0, 0.25, 1.0] {
            assert_eq!(Quat::slerp(a, neg, t), Quat::slerp(a, a, t));
        }
    }
    #[test]
    fn clip_segment_crossing_box() {
        let b = Box3::new(Point3::splat(0.0), Point3::splat(1.0));
        let (p0, p1) = b
            .clip_line_segment(Point3::new(-1.0, 0.5, 0.5), Point3::new(2.0, 0.5, 0.5))
            .unwrap();
        assert_point_eq(p0, Point3::new(0.0, 0.5, 0.5));
        assert_point_eq(p1, Point3::new(1.0, 0.5, 0.5));
    }
    #[test]
    fn clip_segment_outside_or_nan() {
        let b = Box3::new(Point3::splat(0.0), Point3::splat(1.0));
        assert!(
            b.clip_line_segment(Point3::new(2.0, 2.0, 2.0), Point3::new(3.0, 2.0, 2.0))
                .is_none()
        );
        //parallel to a face and outside of it
        assert!(
            b.clip_line_segment(Point3::new(-1.0, 2.0, 0.5), Point3::new(2.0, 2.0, 0.5))
                .is_none()
        );
        assert!(
            b.clip_line_segment(Point3::new(0.5, f32::NAN, 0.5), Point3::new(0.5, 0.5, 0.5))
                .is_none()
        );
    }
    #[test]
    fn color_packing() {
        let c = Color::from_u32(col32(255, 0, 128, 255));
        assert_eq!(c.to_u32(), col32(255, 0, 128, 255));
        assert!(Color::AUTO.is_auto());
        assert_eq!(alpha_u32(col32(1, 2, 3, 255), 0.0) >> 24, 0);
    }
    #[test]
    fn input_reset_clears_edges() {
        let mut i = InputState {
            pointer: Some(true),
            raw_scroll_delta: Vec2::new(0.0, 1.0),
            ..Default::default()
        };
        i.reset();
        assert_eq!(i.pointer, Some(false));
        assert_eq!(i.pointer_right, None);
        assert_eq!(i.raw_scroll_delta, Vec2::splat(0.0));
    }
}
