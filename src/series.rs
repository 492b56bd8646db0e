use crate::Context;
use crate::colormap::Colormaps;
use crate::draw_list::DrawList3D;
use crate::error::{Error, Result};
use crate::flags::{FillFlags, ImageFlags, ItemFlags, LineFlags, PlotFlags, ScatterFlags};
use crate::plot::{Plot, Projection};
use crate::style::{FILL, ItemStyle, LINE, MARKER_FILL, MARKER_OUTLINE, StyleColor};
use crate::types::{Box3, Color, Marker, Point3, Vec2, remap01};
use crate::ui::TextureId;
///numeric types accepted as series data
pub trait PlotNum: Copy {
    fn to_f32(self) -> f32;
}
macro_rules! plot_num {
    ($($t:ty),*) => {
        $(impl PlotNum for $t {
            fn to_f32(self) -> f32 {
                self as f32
            }
        })*
    };
}
plot_num!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize, f32, f64);
///indexed access to the points of a series
pub trait Getter {
    fn count(&self) -> usize;
    fn get(&self, i: usize) -> Point3;
}
impl<G: Getter + ?Sized> Getter for &G {
    fn count(&self) -> usize {
        (**self).count()
    }
    fn get(&self, i: usize) -> Point3 {
        (**self).get(i)
    }
}
///three equally long coordinate slices
#[derive(Copy, Debug, Clone)]
pub struct GetterXyz<'a, T> {
    xs: &'a [T],
    ys: &'a [T],
    zs: &'a [T],
}
impl<'a, T: PlotNum> GetterXyz<'a, T> {
    pub fn new(xs: &'a [T], ys: &'a [T], zs: &'a [T]) -> Result<Self> {
        for actual in [ys.len(), zs.len()] {
            if actual != xs.len() {
                return Err(Error::DataLengthMismatch {
                    expected: xs.len(),
                    actual,
                });
            }
        }
        Ok(Self { xs, ys, zs })
    }
}
impl<T: PlotNum> Getter for GetterXyz<'_, T> {
    fn count(&self) -> usize {
        self.xs.len()
    }
    fn get(&self, i: usize) -> Point3 {
        Point3::new(
            self.xs[i].to_f32(),
            self.ys[i].to_f32(),
            self.zs[i].to_f32(),
        )
    }
}
#[derive(Copy, Debug, Clone)]
pub struct GetterPoints<'a>(pub &'a [Point3]);
impl Getter for GetterPoints<'_> {
    fn count(&self) -> usize {
        self.0.len()
    }
    fn get(&self, i: usize) -> Point3 {
        self.0[i]
    }
}
///repeats the first point at the end
#[derive(Copy, Debug, Clone)]
pub struct GetterLoop<G>(pub G);
impl<G: Getter> Getter for GetterLoop<G> {
    fn count(&self) -> usize {
        self.0.count() + 1
    }
    fn get(&self, i: usize) -> Point3 {
        self.0.get(i % self.0.count())
    }
}
///segment endpoints of the three edges of every triangle
#[derive(Copy, Debug, Clone)]
pub struct GetterTriangleLines<G>(pub G);
impl<G: Getter> Getter for GetterTriangleLines<G> {
    fn count(&self) -> usize {
        self.0.count() / 3 * 6
    }
    fn get(&self, i: usize) -> Point3 {
        self.0.get(((i % 6 + 1) / 2) % 3 + i / 6 * 3)
    }
}
///segment endpoints of the four edges of every quad
#[derive(Copy, Debug, Clone)]
pub struct GetterQuadLines<G>(pub G);
impl<G: Getter> Getter for GetterQuadLines<G> {
    fn count(&self) -> usize {
        self.0.count() / 4 * 8
    }
    fn get(&self, i: usize) -> Point3 {
        self.0.get(((i % 8 + 1) / 2) % 4 + i / 8 * 4)
    }
}
///segment endpoints of a grid, every row first then every column
#[derive(Copy, Debug, Clone)]
pub struct GetterSurfaceLines<G> {
    pub getter: G,
    pub x_count: usize,
    pub y_count: usize,
}
impl<G: Getter> GetterSurfaceLines<G> {
    fn horizontal(&self) -> usize {
        self.x_count.saturating_sub(1) * self.y_count
    }
}
impl<G: Getter> Getter for GetterSurfaceLines<G> {
    fn count(&self) -> usize {
        (self.horizontal() + self.y_count.saturating_sub(1) * self.x_count) * 2
    }
    fn get(&self, i: usize) -> Point3 {
        let endpoint = i % 2;
        let seg = i / 2;
        let h = self.horizontal();
        let (px, py) = if seg < h {
            let (row, col) = (seg / (self.x_count - 1), seg % (self.x_count - 1));
            (col + endpoint, row)
        } else {
            let sv = seg - h;
            let (col, row) = (sv / (self.y_count - 1), sv % (self.y_count - 1));
            (col, row + endpoint)
        };
        self.getter.get(py * self.x_count + px)
    }
}
///triangle corners of an indexed mesh, out of range indices give nan
#[derive(Copy, Debug, Clone)]
pub struct GetterMeshTriangles<'a> {
    pub vtx: &'a [Point3],
    pub idx: &'a [u32],
}
impl Getter for GetterMeshTriangles<'_> {
    fn count(&self) -> usize {
        self.idx.len()
    }
    fn get(&self, i: usize) -> Point3 {
        self.idx
            .get(i)
            .and_then(|j| self.vtx.get(*j as usize))
            .copied()
            .unwrap_or(Point3::splat(f32::NAN))
    }
}
///emits one kind of primitive into the 3d draw list
pub(crate) trait Renderer {
    fn prims(&self) -> usize;
    fn idx_consumed(&self) -> usize;
    fn vtx_consumed(&self) -> usize;
    fn init(&mut self, _dl: &DrawList3D) {}
    ///false when the primitive was culled and wrote nothing
    fn render(&mut self, dl: &mut DrawList3D, proj: &Projection, cull: &Box3, prim: usize) -> bool;
}
pub(crate) fn cull_box(plot: &Plot, proj: &Projection) -> Box3 {
    if plot.flags.contains(PlotFlags::NO_CLIP) {
        Box3::new(
            Point3::splat(f32::NEG_INFINITY),
            Point3::splat(f32::INFINITY),
        )
    } else {
        proj.range_box()
    }
}
///reserves room for every primitive, renders them and hands back the space of culled ones
pub(crate) fn render_primitives<R: Renderer>(plot: &mut Plot, renderer: &mut R) {
    let proj = plot.projection();
    let cull = cull_box(plot, &proj);
    let dl = &mut plot.draw_list;
    let (idx_n, vtx_n) = (renderer.idx_consumed(), renderer.vtx_consumed());
    if vtx_n == 0 {
        return;
    }
    let room = (u32::MAX as usize).saturating_sub(dl.vtx_buffer.len()) / vtx_n;
    let prims = renderer.prims().min(room);
    if prims == 0 {
        return;
    }
    renderer.init(dl);
    dl.prim_reserve(prims * idx_n, prims * vtx_n);
    let culled = (0..prims)
        .filter(|prim| !renderer.render(dl, &proj, &cull, *prim))
        .count();
    dl.prim_unreserve(culled * idx_n, culled * vtx_n);
}
#[derive(Copy, Debug, Clone, Default)]
struct LineProps {
    half_weight: f32,
    uv0: Vec2,
    uv1: Vec2,
    col: u32,
}
impl LineProps {
    fn new(dl: &DrawList3D, weight: f32, col: u32) -> Self {
        let (half_weight, uv0, uv1) = dl.line_render_props(weight.max(1.0) * 0.5);
        Self {
            half_weight,
            uv0,
            uv1,
            col,
        }
    }
}
///a screen space segment as a quad of two triangles at depth z
fn prim_line(dl: &mut DrawList3D, p1: Vec2, p2: Vec2, line: &LineProps, z: f32) {
    let mut d = p2 - p1;
    let len2 = d.dot(d);
    if len2 > 0.0 {
        d = d / len2.sqrt();
    }
    d *= line.half_weight;
    let n = Vec2::new(d.y, -d.x);
    let base = dl.vtx_current_idx();
    dl.write_vtx(p1 + n, line.uv0, line.col);
    dl.write_vtx(p2 + n, line.uv0, line.col);
    dl.write_vtx(p2 - n, line.uv1, line.col);
    dl.write_vtx(p1 - n, line.uv1, line.col);
    for i in [0, 1, 2, 0, 2, 3] {
        dl.write_idx(base + i);
    }
    dl.write_z(z);
    dl.write_z(z);
}
fn write_quad(dl: &mut DrawList3D, pix: [Vec2; 4], uvs: [Vec2; 4], cols: [u32; 4], z: [f32; 2]) {
    let base = dl.vtx_current_idx();
    for i in 0..4 {
        dl.write_vtx(pix[i], uvs[i], cols[i]);
    }
    for i in [0, 1, 2, 0, 2, 3] {
        dl.write_idx(base + i);
    }
    dl.write_z(z[0]);
    dl.write_z(z[1]);
}
struct LineStrip<G> {
    getter: G,
    line: LineProps,
    weight: f32,
    col: u32,
    p1: Point3,
    skip_nan: bool,
}
impl<G: Getter> LineStrip<G> {
    fn new(getter: G, weight: f32, col: u32, skip_nan: bool) -> Self {
        Self {
            getter,
            line: LineProps::default(),
            weight,
            col,
            p1: Point3::splat(f32::NAN),
            skip_nan,
        }
    }
}
impl<G: Getter> Renderer for LineStrip<G> {
    fn prims(&self) -> usize {
        self.getter.count().saturating_sub(1)
    }
    fn idx_consumed(&self) -> usize {
        6
    }
    fn vtx_consumed(&self) -> usize {
        4
    }
    fn init(&mut self, dl: &DrawList3D) {
        self.line = LineProps::new(dl, self.weight, self.col);
        self.p1 = self.getter.get(0);
    }
    fn render(&mut self, dl: &mut DrawList3D, proj: &Projection, cull: &Box3, prim: usize) -> bool {
        let p2 = self.getter.get(prim + 1);
        let p1 = std::mem::replace(&mut self.p1, p2);
        if self.skip_nan && (p1.is_nan() || p2.is_nan()) {
            return false;
        }
        let Some((a, b)) = cull.clip_line_segment(p1, p2) else {
            return false;
        };
        let z = proj.point_depth((p1 + p2) * 0.5);
        prim_line(dl, proj.plot_to_pixels(a), proj.plot_to_pixels(b), &self.line, z);
        true
    }
}
///independent segments from every two consecutive points
struct LineSegments<G> {
    getter: G,
    line: LineProps,
    weight: f32,
    col: u32,
}
impl<G: Getter> LineSegments<G> {
    fn new(getter: G, weight: f32, col: u32) -> Self {
        Self {
            getter,
            line: LineProps::default(),
            weight,
            col,
        }
    }
}
impl<G: Getter> Renderer for LineSegments<G> {
    fn prims(&self) -> usize {
        self.getter.count() / 2
    }
    fn idx_consumed(&self) -> usize {
        6
    }
    fn vtx_consumed(&self) -> usize {
        4
    }
    fn init(&mut self, dl: &DrawList3D) {
        self.line = LineProps::new(dl, self.weight, self.col);
    }
    fn render(&mut self, dl: &mut DrawList3D, proj: &Projection, cull: &Box3, prim: usize) -> bool {
        let p1 = self.getter.get(prim * 2);
        let p2 = self.getter.get(prim * 2 + 1);
        let Some((a, b)) = cull.clip_line_segment(p1, p2) else {
            return false;
        };
        let z = proj.point_depth((p1 + p2) * 0.5);
        prim_line(dl, proj.plot_to_pixels(a), proj.plot_to_pixels(b), &self.line, z);
        true
    }
}
const SQRT_1_2: f32 = 0.70710678;
const SQRT_3_2: f32 = 0.8660254;
const FILL_CIRCLE: [Vec2; 10] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(0.809017, 0.58778524),
    Vec2::new(0.30901697, 0.95105654),
    Vec2::new(-0.30901703, 0.9510565),
    Vec2::new(-0.80901706, 0.5877852),
    Vec2::new(-1.0, 0.0),
    Vec2::new(-0.80901694, -0.58778536),
    Vec2::new(-0.3090171, -0.9510565),
    Vec2::new(0.30901712, -0.9510565),
    Vec2::new(0.80901694, -0.5877853),
];
const FILL_SQUARE: [Vec2; 4] = [
    Vec2::new(SQRT_1_2, SQRT_1_2),
    Vec2::new(SQRT_1_2, -SQRT_1_2),
    Vec2::new(-SQRT_1_2, -SQRT_1_2),
    Vec2::new(-SQRT_1_2, SQRT_1_2),
];
const FILL_DIAMOND: [Vec2; 4] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, 1.0),
];
const FILL_UP: [Vec2; 3] = [
    Vec2::new(SQRT_3_2, 0.5),
    Vec2::new(0.0, -1.0),
    Vec2::new(-SQRT_3_2, 0.5),
];
const FILL_DOWN: [Vec2; 3] = [
    Vec2::new(SQRT_3_2, -0.5),
    Vec2::new(0.0, 1.0),
    Vec2::new(-SQRT_3_2, -0.5),
];
const FILL_LEFT: [Vec2; 3] = [
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.5, SQRT_3_2),
    Vec2::new(0.5, -SQRT_3_2),
];
const FILL_RIGHT: [Vec2; 3] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(-0.5, SQRT_3_2),
    Vec2::new(-0.5, -SQRT_3_2),
];
///consecutive closed pairs of a fill outline
const fn outline<const N: usize, const M: usize>(fill: [Vec2; N]) -> [Vec2; M] {
    let mut out = [Vec2::new(0.0, 0.0); M];
    let mut i = 0;
    while i < N {
        out[i * 2] = fill[i];
        out[i * 2 + 1] = fill[(i + 1) % N];
        i += 1;
    }
    out
}
const LINE_CIRCLE: [Vec2; 20] = outline(FILL_CIRCLE);
const LINE_SQUARE: [Vec2; 8] = outline(FILL_SQUARE);
const LINE_DIAMOND: [Vec2; 8] = outline(FILL_DIAMOND);
const LINE_UP: [Vec2; 6] = outline(FILL_UP);
const LINE_DOWN: [Vec2; 6] = outline(FILL_DOWN);
const LINE_LEFT: [Vec2; 6] = outline(FILL_LEFT);
const LINE_RIGHT: [Vec2; 6] = outline(FILL_RIGHT);
const LINE_ASTERISK: [Vec2; 6] = [
    Vec2::new(-SQRT_3_2, -0.5),
    Vec2::new(SQRT_3_2, 0.5),
    Vec2::new(-SQRT_3_2, 0.5),
    Vec2::new(SQRT_3_2, -0.5),
    Vec2::new(0.0, -1.0),
    Vec2::new(0.0, 1.0),
];
const LINE_PLUS: [Vec2; 4] = [
    Vec2::new(-1.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(0.0, 1.0),
];
const LINE_CROSS: [Vec2; 4] = [
    Vec2::new(-SQRT_1_2, -SQRT_1_2),
    Vec2::new(SQRT_1_2, SQRT_1_2),
    Vec2::new(SQRT_1_2, -SQRT_1_2),
    Vec2::new(-SQRT_1_2, SQRT_1_2),
];
fn marker_fill_shape(marker: Marker) -> Option<&'static [Vec2]> {
    Some(match marker {
        Marker::Circle => &FILL_CIRCLE,
        Marker::Square => &FILL_SQUARE,
        Marker::Diamond => &FILL_DIAMOND,
        Marker::Up => &FILL_UP,
        Marker::Down => &FILL_DOWN,
        Marker::Left => &FILL_LEFT,
        Marker::Right => &FILL_RIGHT,
        Marker::Cross | Marker::Plus | Marker::Asterisk => return None,
    })
}
fn marker_line_shape(marker: Marker) -> &'static [Vec2] {
    match marker {
        Marker::Circle => &LINE_CIRCLE,
        Marker::Square => &LINE_SQUARE,
        Marker::Diamond => &LINE_DIAMOND,
        Marker::Up => &LINE_UP,
        Marker::Down => &LINE_DOWN,
        Marker::Left => &LINE_LEFT,
        Marker::Right => &LINE_RIGHT,
        Marker::Cross => &LINE_CROSS,
        Marker::Plus => &LINE_PLUS,
        Marker::Asterisk => &LINE_ASTERISK,
    }
}
///triangle fan of the marker shape around every point
struct MarkersFill<G> {
    getter: G,
    shape: &'static [Vec2],
    size: f32,
    col: u32,
    uv: Vec2,
}
impl<G: Getter> Renderer for MarkersFill<G> {
    fn prims(&self) -> usize {
        self.getter.count()
    }
    fn idx_consumed(&self) -> usize {
        (self.shape.len() - 2) * 3
    }
    fn vtx_consumed(&self) -> usize {
        self.shape.len()
    }
    fn init(&mut self, dl: &DrawList3D) {
        self.uv = dl.white_uv();
    }
    fn render(&mut self, dl: &mut DrawList3D, proj: &Projection, cull: &Box3, prim: usize) -> bool {
        let p = self.getter.get(prim);
        if !cull.contains(p) {
            return false;
        }
        let center = proj.plot_to_pixels(p);
        let z = proj.point_depth(p);
        let base = dl.vtx_current_idx();
        for m in self.shape {
            dl.write_vtx(center + *m * self.size, self.uv, self.col);
        }
        for i in 2..self.shape.len() as u32 {
            dl.write_idx(base);
            dl.write_idx(base + i - 1);
            dl.write_idx(base + i);
            dl.write_z(z);
        }
        true
    }
}
///outline segments of the marker shape around every point
struct MarkersLine<G> {
    getter: G,
    shape: &'static [Vec2],
    size: f32,
    line: LineProps,
    weight: f32,
    col: u32,
}
impl<G: Getter> Renderer for MarkersLine<G> {
    fn prims(&self) -> usize {
        self.getter.count()
    }
    fn idx_consumed(&self) -> usize {
        self.shape.len() / 2 * 6
    }
    fn vtx_consumed(&self) -> usize {
        self.shape.len() / 2 * 4
    }
    fn init(&mut self, dl: &DrawList3D) {
        self.line = LineProps::new(dl, self.weight, self.col);
    }
    fn render(&mut self, dl: &mut DrawList3D, proj: &Projection, cull: &Box3, prim: usize) -> bool {
        let p = self.getter.get(prim);
        if !cull.contains(p) {
            return false;
        }
        let center = proj.plot_to_pixels(p);
        let z = proj.point_depth(p);
        for pair in self.shape.chunks_exact(2) {
            prim_line(
                dl,
                center + pair[0] * self.size,
                center + pair[1] * self.size,
                &self.line,
                z,
            );
        }
        true
    }
}
fn render_markers<G: Getter>(plot: &mut Plot, getter: G, marker: Marker, n: &ItemStyle) {
    if n.render_marker_fill {
        if let Some(shape) = marker_fill_shape(marker) {
            render_primitives(
                plot,
                &mut MarkersFill {
                    getter: &getter,
                    shape,
                    size: n.marker_size,
                    col: n.color_u32(MARKER_FILL),
                    uv: Vec2::splat(0.0),
                },
            );
        }
    }
    if n.render_marker_line {
        render_primitives(
            plot,
            &mut MarkersLine {
                getter: &getter,
                shape: marker_line_shape(marker),
                size: n.marker_size,
                line: LineProps::default(),
                weight: n.marker_weight,
                col: n.color_u32(MARKER_OUTLINE),
            },
        );
    }
}
struct TriangleFill<G> {
    getter: G,
    col: u32,
    uv: Vec2,
}
impl<G: Getter> Renderer for TriangleFill<G> {
    fn prims(&self) -> usize {
        self.getter.count() / 3
    }
    fn idx_consumed(&self) -> usize {
        3
    }
    fn vtx_consumed(&self) -> usize {
        3
    }
    fn init(&mut self, dl: &DrawList3D) {
        self.uv = dl.white_uv();
    }
    fn render(&mut self, dl: &mut DrawList3D, proj: &Projection, cull: &Box3, prim: usize) -> bool {
        let p: [Point3; 3] = std::array::from_fn(|k| self.getter.get(prim * 3 + k));
        if !p.iter().any(|p| cull.contains(*p)) {
            return false;
        }
        let z = proj.point_depth((p[0] + p[1] + p[2]) / 3.0);
        let base = dl.vtx_current_idx();
        for (i, p) in p.into_iter().enumerate() {
            dl.write_vtx(proj.plot_to_pixels(p), self.uv, self.col);
            dl.write_idx(base + i as u32);
        }
        dl.write_z(z);
        true
    }
}
///corners of quad prim, none when all of them are outside the cull box
fn quad_corners<G: Getter>(getter: &G, cull: &Box3, prim: usize) -> Option<[Point3; 4]> {
    let p: [Point3; 4] = std::array::from_fn(|k| getter.get(prim * 4 + k));
    p.iter().any(|p| cull.contains(*p)).then_some(p)
}
struct QuadFill<G> {
    getter: G,
    col: u32,
    uv: Vec2,
}
impl<G: Getter> Renderer for QuadFill<G> {
    fn prims(&self) -> usize {
        self.getter.count() / 4
    }
    fn idx_consumed(&self) -> usize {
        6
    }
    fn vtx_consumed(&self) -> usize {
        4
    }
    fn init(&mut self, dl: &DrawList3D) {
        self.uv = dl.white_uv();
    }
    fn render(&mut self, dl: &mut DrawList3D, proj: &Projection, cull: &Box3, prim: usize) -> bool {
        let Some(p) = quad_corners(&self.getter, cull, prim) else {
            return false;
        };
        let z = proj.point_depth((p[0] + p[1] + p[2] + p[3]) / 4.0);
        write_quad(
            dl,
            p.map(|p| proj.plot_to_pixels(p)),
            [self.uv; 4],
            [self.col; 4],
            [z, z],
        );
        true
    }
}
struct QuadImage<G> {
    getter: G,
    uvs: [Vec2; 4],
    col: u32,
}
impl<G: Getter> Renderer for QuadImage<G> {
    fn prims(&self) -> usize {
        self.getter.count() / 4
    }
    fn idx_consumed(&self) -> usize {
        6
    }
    fn vtx_consumed(&self) -> usize {
        4
    }
    fn render(&mut self, dl: &mut DrawList3D, proj: &Projection, cull: &Box3, prim: usize) -> bool {
        let Some(p) = quad_corners(&self.getter, cull, prim) else {
            return false;
        };
        let z = proj.point_depth((p[0] + p[1] + p[2] + p[3]) / 4.0);
        write_quad(
            dl,
            p.map(|p| proj.plot_to_pixels(p)),
            self.uvs,
            [self.col; 4],
            [z, z],
        );
        true
    }
}
///colormap shading of a surface by height
struct SurfaceShading<'a> {
    colormaps: &'a Colormaps,
    cmap: usize,
    fill_alpha: f32,
    ///explicit scale, none detects the z extents
    scale: Option<(f32, f32)>,
    min: f32,
    max: f32,
}
impl SurfaceShading<'_> {
    fn color(&self, z: f32) -> u32 {
        let t = remap01(z, self.min, self.max).clamp(0.0, 1.0);
        let col = Color::from_u32(self.colormaps.lerp_table(self.cmap, t));
        col.with_alpha(col.a * self.fill_alpha).to_u32()
    }
}
struct SurfaceFill<'a, G> {
    getter: G,
    x_count: usize,
    y_count: usize,
    col: u32,
    uv: Vec2,
    shading: Option<SurfaceShading<'a>>,
}
impl<G: Getter> Renderer for SurfaceFill<'_, G> {
    fn prims(&self) -> usize {
        self.x_count.saturating_sub(1) * self.y_count.saturating_sub(1)
    }
    fn idx_consumed(&self) -> usize {
        6
    }
    fn vtx_consumed(&self) -> usize {
        4
    }
    fn init(&mut self, dl: &DrawList3D) {
        self.uv = dl.white_uv();
        let getter = &self.getter;
        if let Some(shading) = &mut self.shading {
            (shading.min, shading.max) = match shading.scale {
                Some(scale) => scale,
                None => (0..getter.count())
                    .map(|i| getter.get(i).z)
                    .fold((f32::MAX, -f32::MAX), |(lo, hi), z| (lo.min(z), hi.max(z))),
            };
        }
    }
    fn render(&mut self, dl: &mut DrawList3D, proj: &Projection, cull: &Box3, prim: usize) -> bool {
        let xc = self.x_count;
        let (x, y) = (prim % (xc - 1), prim / (xc - 1));
        let p = [
            x + y * xc,
            x + 1 + y * xc,
            x + 1 + (y + 1) * xc,
            x + (y + 1) * xc,
        ]
        .map(|i| self.getter.get(i));
        if !p.iter().any(|p| cull.contains(*p)) {
            return false;
        }
        let cols = match &self.shading {
            Some(shading) => p.map(|p| shading.color(p.z)),
            None => [self.col; 4],
        };
        let z = [
            proj.point_depth((p[0] + p[1] + p[2]) / 3.0),
            proj.point_depth((p[0] + p[2] + p[3]) / 3.0),
        ];
        write_quad(dl, p.map(|p| proj.plot_to_pixels(p)), [self.uv; 4], cols, z);
        true
    }
}
impl Context {
    ///begin_item that also grows the fit extents by every point of getter
    pub(crate) fn begin_item_ex<G: Getter>(
        &mut self,
        label: &str,
        getter: &G,
        flags: ItemFlags,
        recolor_from: Option<StyleColor>,
    ) -> Result<bool> {
        if !self.begin_item(label, flags, recolor_from)? {
            return Ok(false);
        }
        let plot = self.current_plot_mut()?;
        if plot.fit_this_frame && !flags.contains(ItemFlags::NO_FIT) {
            for i in 0..getter.count() {
                plot.extend_fit(getter.get(i));
            }
        }
        Ok(true)
    }
    ///markers at every point, circles unless a marker is set
    pub fn plot_scatter<T: PlotNum>(
        &mut self,
        label: &str,
        xs: &[T],
        ys: &[T],
        zs: &[T],
        flags: ScatterFlags,
    ) -> Result<()> {
        self.current_plot_mut()
            .map_err(|_| Error::NoCurrentPlot("plot_scatter"))?;
        let getter = GetterXyz::new(xs, ys, zs)?;
        if getter.count() == 0 {
            return Ok(());
        }
        if !self.begin_item_ex(label, &getter, flags.into(), Some(StyleColor::MarkerOutline))? {
            return Ok(());
        }
        let n = self.item_style.clone();
        let marker = n.marker.unwrap_or(Marker::Circle);
        render_markers(self.current_plot_mut()?, &getter, marker, &n);
        self.end_item();
        Ok(())
    }
    pub fn plot_line<T: PlotNum>(
        &mut self,
        label: &str,
        xs: &[T],
        ys: &[T],
        zs: &[T],
        flags: LineFlags,
    ) -> Result<()> {
        self.current_plot_mut()
            .map_err(|_| Error::NoCurrentPlot("plot_line"))?;
        let getter = GetterXyz::new(xs, ys, zs)?;
        if getter.count() < 2 {
            return Ok(());
        }
        if !self.begin_item_ex(label, &getter, flags.into(), Some(StyleColor::Line))? {
            return Ok(());
        }
        let n = self.item_style.clone();
        let plot = self.current_plot_mut()?;
        if n.render_line {
            let (weight, col) = (n.line_weight, n.color_u32(LINE));
            let skip_nan = flags.contains(LineFlags::SKIP_NAN);
            if flags.contains(LineFlags::SEGMENTS) {
                render_primitives(plot, &mut LineSegments::new(&getter, weight, col));
            } else if flags.contains(LineFlags::LOOP) {
                render_primitives(
                    plot,
                    &mut LineStrip::new(GetterLoop(&getter), weight, col, skip_nan),
                );
            } else {
                render_primitives(plot, &mut LineStrip::new(&getter, weight, col, skip_nan));
            }
        }
        if let Some(marker) = n.marker {
            render_markers(plot, &getter, marker, &n);
        }
        self.end_item();
        Ok(())
    }
    ///a filled triangle from every three points
    pub fn plot_triangle<T: PlotNum>(
        &mut self,
        label: &str,
        xs: &[T],
        ys: &[T],
        zs: &[T],
        flags: FillFlags,
    ) -> Result<()> {
        self.current_plot_mut()
            .map_err(|_| Error::NoCurrentPlot("plot_triangle"))?;
        let getter = GetterXyz::new(xs, ys, zs)?;
        if getter.count() < 3 {
            return Ok(());
        }
        if !self.begin_item_ex(label, &getter, flags.into(), Some(StyleColor::Fill))? {
            return Ok(());
        }
        let n = self.item_style.clone();
        let plot = self.current_plot_mut()?;
        if n.render_fill && !flags.contains(FillFlags::NO_FILL) {
            render_primitives(
                plot,
                &mut TriangleFill {
                    getter: &getter,
                    col: n.color_u32(FILL),
                    uv: Vec2::splat(0.0),
                },
            );
        }
        if n.render_line && !flags.contains(FillFlags::NO_LINES) {
            render_primitives(
                plot,
                &mut LineSegments::new(
                    GetterTriangleLines(&getter),
                    n.line_weight,
                    n.color_u32(LINE),
                ),
            );
        }
        if let Some(marker) = n.marker.filter(|_| !flags.contains(FillFlags::NO_MARKERS)) {
            render_markers(plot, &getter, marker, &n);
        }
        self.end_item();
        Ok(())
    }
    ///a filled quad from every four points
    pub fn plot_quad<T: PlotNum>(
        &mut self,
        label: &str,
        xs: &[T],
        ys: &[T],
        zs: &[T],
        flags: FillFlags,
    ) -> Result<()> {
        self.current_plot_mut()
            .map_err(|_| Error::NoCurrentPlot("plot_quad"))?;
        let getter = GetterXyz::new(xs, ys, zs)?;
        if getter.count() < 4 {
            return Ok(());
        }
        if !self.begin_item_ex(label, &getter, flags.into(), Some(StyleColor::Fill))? {
            return Ok(());
        }
        let n = self.item_style.clone();
        let plot = self.current_plot_mut()?;
        if n.render_fill && !flags.contains(FillFlags::NO_FILL) {
            render_primitives(
                plot,
                &mut QuadFill {
                    getter: &getter,
                    col: n.color_u32(FILL),
                    uv: Vec2::splat(0.0),
                },
            );
        }
        if n.render_line && !flags.contains(FillFlags::NO_LINES) {
            render_primitives(
                plot,
                &mut LineSegments::new(GetterQuadLines(&getter), n.line_weight, n.color_u32(LINE)),
            );
        }
        if let Some(marker) = n.marker.filter(|_| !flags.contains(FillFlags::NO_MARKERS)) {
            render_markers(plot, &getter, marker, &n);
        }
        self.end_item();
        Ok(())
    }
    ///a grid of x_count by y_count points, row major,
    ///shaded by the colormap over [scale_min, scale_max] or the z extents when both are zero
    #[allow(clippy::too_many_arguments)]
    pub fn plot_surface<T: PlotNum>(
        &mut self,
        label: &str,
        xs: &[T],
        ys: &[T],
        zs: &[T],
        x_count: usize,
        y_count: usize,
        scale_min: f64,
        scale_max: f64,
        flags: FillFlags,
    ) -> Result<()> {
        self.current_plot_mut()
            .map_err(|_| Error::NoCurrentPlot("plot_surface"))?;
        let getter = GetterXyz::new(xs, ys, zs)?;
        let Some(count) = x_count.checked_mul(y_count) else {
            return Err(Error::DataLengthMismatch {
                expected: usize::MAX,
                actual: getter.count(),
            });
        };
        if getter.count() != count {
            return Err(Error::DataLengthMismatch {
                expected: count,
                actual: getter.count(),
            });
        }
        if count < 4 {
            return Ok(());
        }
        if !self.begin_item_ex(label, &getter, flags.into(), Some(StyleColor::Fill))? {
            return Ok(());
        }
        let n = self.item_style.clone();
        let Some(idx) = self.current_plot else {
            return Err(Error::NoCurrentPlot("plot_surface"));
        };
        let plot = &mut self.plots[idx];
        if n.render_fill && !flags.contains(FillFlags::NO_FILL) {
            let shading = n.is_auto_fill.then(|| SurfaceShading {
                colormaps: &self.colormaps,
                cmap: self.style.colormap,
                fill_alpha: n.fill_alpha,
                scale: (scale_min != 0.0 || scale_max != 0.0)
                    .then_some((scale_min as f32, scale_max as f32)),
                min: 0.0,
                max: 0.0,
            });
            render_primitives(
                plot,
                &mut SurfaceFill {
                    getter: &getter,
                    x_count,
                    y_count,
                    col: n.color_u32(FILL),
                    uv: Vec2::splat(0.0),
                    shading,
                },
            );
        }
        if n.render_line && !flags.contains(FillFlags::NO_LINES) {
            render_primitives(
                plot,
                &mut LineSegments::new(
                    GetterSurfaceLines {
                        getter: &getter,
                        x_count,
                        y_count,
                    },
                    n.line_weight,
                    n.color_u32(LINE),
                ),
            );
        }
        if let Some(marker) = n.marker.filter(|_| !flags.contains(FillFlags::NO_MARKERS)) {
            render_markers(plot, &getter, marker, &n);
        }
        self.end_item();
        Ok(())
    }
    ///triangles indexing into a shared vertex array, three indices each
    pub fn plot_mesh(
        &mut self,
        label: &str,
        vtx: &[Point3],
        idx: &[u32],
        flags: FillFlags,
    ) -> Result<()> {
        self.current_plot_mut()
            .map_err(|_| Error::NoCurrentPlot("plot_mesh"))?;
        if idx.len() % 3 != 0 {
            return Err(Error::NotMultipleOf {
                len: idx.len(),
                multiple: 3,
            });
        }
        if vtx.is_empty() {
            return Ok(());
        }
        let getter = GetterPoints(vtx);
        let triangles = GetterMeshTriangles { vtx, idx };
        if !self.begin_item_ex(label, &getter, flags.into(), Some(StyleColor::Fill))? {
            return Ok(());
        }
        let n = self.item_style.clone();
        let plot = self.current_plot_mut()?;
        if vtx.len() >= 3 && n.render_fill && !flags.contains(FillFlags::NO_FILL) {
            render_primitives(
                plot,
                &mut TriangleFill {
                    getter: triangles,
                    col: n.color_u32(FILL),
                    uv: Vec2::splat(0.0),
                },
            );
        }
        if vtx.len() >= 2
            && n.render_line
            && !n.is_auto_line
            && !flags.contains(FillFlags::NO_LINES)
        {
            render_primitives(
                plot,
                &mut LineSegments::new(
                    GetterTriangleLines(triangles),
                    n.line_weight,
                    n.color_u32(LINE),
                ),
            );
        }
        if let Some(marker) = n.marker.filter(|_| !flags.contains(FillFlags::NO_MARKERS)) {
            render_markers(plot, &getter, marker, &n);
        }
        self.end_item();
        Ok(())
    }
    ///a textured rectangle spanned by axis_u and axis_v around center,
    ///uv0 maps to the center - u - v corner and uv1 to center + u + v
    #[allow(clippy::too_many_arguments)]
    pub fn plot_image(
        &mut self,
        label: &str,
        texture: TextureId,
        center: Point3,
        axis_u: Point3,
        axis_v: Point3,
        uv0: Vec2,
        uv1: Vec2,
        tint: Color,
        flags: ImageFlags,
    ) -> Result<()> {
        let corners = [
            center - axis_u - axis_v,
            center + axis_u - axis_v,
            center + axis_u + axis_v,
            center - axis_u + axis_v,
        ];
        let uvs = [uv0, Vec2::new(uv1.x, uv0.y), uv1, Vec2::new(uv0.x, uv1.y)];
        self.plot_image_quad(label, texture, corners, uvs, tint, flags)
    }
    ///a textured quad with explicit corners and uvs
    pub fn plot_image_quad(
        &mut self,
        label: &str,
        texture: TextureId,
        corners: [Point3; 4],
        uvs: [Vec2; 4],
        tint: Color,
        flags: ImageFlags,
    ) -> Result<()> {
        self.current_plot_mut()
            .map_err(|_| Error::NoCurrentPlot("plot_image"))?;
        self.setup_lock()?;
        let getter = GetterPoints(&corners);
        let uvs = uvs.map(|uv| Vec2::new(uv.x, 1.0 - uv.y));
        if !self.begin_item_ex(label, &getter, flags.into(), None)? {
            return Ok(());
        }
        let tint = tint.to_u32();
        if let Some(item) = self.current_item_mut() {
            item.color = tint;
        }
        let plot = self.current_plot_mut()?;
        if tint >> 24 != 0 {
            plot.draw_list.set_texture(texture);
            render_primitives(
                plot,
                &mut QuadImage {
                    getter: &getter,
                    uvs,
                    col: tint,
                },
            );
            plot.draw_list.reset_texture();
        }
        self.end_item();
        Ok(())
    }
    ///text centered at a plot point plus a pixel offset, turned by angle radians
    pub fn plot_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        z: f32,
        angle: f32,
        pix_offset: Vec2,
    ) -> Result<()> {
        self.current_plot_mut()
            .map_err(|_| Error::NoCurrentPlot("plot_text"))?;
        self.setup_lock()?;
        let Some(idx) = self.current_plot else {
            return Err(Error::NoCurrentPlot("plot_text"));
        };
        let plot = &self.plots[idx];
        let p = Point3::new(x, y, z);
        let proj = plot.projection();
        if !cull_box(plot, &proj).contains(p) {
            return Ok(());
        }
        let col = self.style.color_u32(StyleColor::InlayText, &self.host_style);
        self.painter
            .add_text_rotated(proj.plot_to_pixels(p) + pix_offset, angle, col, text);
        Ok(())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::Colormap;
    use crate::types::{Quat, Range, Rect};
    fn flat_plot() -> Plot {
        let mut plot = Plot::new(0);
        plot.rotation = Quat::IDENTITY;
        plot.plot_rect = Rect::new(Vec2::splat(0.0), Vec2::splat(180.0));
        for axis in &mut plot.axes {
            axis.range = Range::new(0.0, 1.0);
        }
        plot
    }
    fn collect<G: Getter>(g: G) -> Vec<Point3> {
        (0..g.count()).map(|i| g.get(i)).collect()
    }
    fn points(n: usize) -> Vec<Point3> {
        (0..n).map(|i| Point3::splat(i as f32)).collect()
    }
    #[test]
    fn xyz_getter_checks_lengths() {
        assert_eq!(
            GetterXyz::new(&[1.0f32, 2.0], &[1.0], &[1.0, 2.0]).err(),
            Some(Error::DataLengthMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(GetterXyz::<f64>::new(&[], &[], &[]).map(|g| g.count()), Ok(0));
        let g = GetterXyz::new(&[1i32, 2], &[3, 4], &[5, 6]).unwrap();
        assert_eq!(g.get(1), Point3::new(2.0, 4.0, 6.0));
    }
    #[test]
    fn ring_adaptors_close_every_polygon() {
        let pts = points(6);
        let tri: Vec<f32> = collect(GetterTriangleLines(GetterPoints(&pts)))
            .iter()
            .map(|p| p.x)
            .collect();
        assert_eq!(
            tri,
            vec![0.0, 1.0, 1.0, 2.0, 2.0, 0.0, 3.0, 4.0, 4.0, 5.0, 5.0, 3.0]
        );
        let quad: Vec<f32> = collect(GetterQuadLines(GetterPoints(&pts[..4])))
            .iter()
            .map(|p| p.x)
            .collect();
        assert_eq!(quad, vec![0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 0.0]);
        let looped = collect(GetterLoop(GetterPoints(&pts[..3])));
        assert_eq!(looped.len(), 4);
        assert_eq!(looped[3], pts[0]);
    }
    #[test]
    fn surface_lines_cover_rows_then_columns() {
        let pts = points(6);
        let g = GetterSurfaceLines {
            getter: GetterPoints(&pts),
            x_count: 3,
            y_count: 2,
        };
        let idx: Vec<usize> = collect(g).iter().map(|p| p.x as usize).collect();
        assert_eq!(
            idx,
            vec![0, 1, 1, 2, 3, 4, 4, 5, 0, 3, 1, 4, 2, 5]
        );
    }
    #[test]
    fn mesh_getter_tolerates_bad_indices() {
        let pts = points(3);
        let g = GetterMeshTriangles {
            vtx: &pts,
            idx: &[2, 0, 7],
        };
        assert_eq!(g.get(0), pts[2]);
        assert!(g.get(2).is_nan());
    }
    #[test]
    fn culled_segments_give_their_space_back() {
        let mut plot = flat_plot();
        let pts = [
            Point3::splat(0.2),
            Point3::splat(0.8),
            Point3::splat(2.0),
            Point3::splat(3.0),
        ];
        render_primitives(&mut plot, &mut LineSegments::new(GetterPoints(&pts), 1.0, 1));
        assert_eq!(plot.draw_list.tri_count(), 2);
        assert_eq!(plot.draw_list.vtx_buffer.len(), 4);
        assert_eq!(plot.draw_list.idx_buffer, vec![0, 1, 2, 0, 2, 3]);
    }
    #[test]
    fn no_clip_keeps_outside_segments() {
        let mut plot = flat_plot();
        plot.flags = PlotFlags::NO_CLIP;
        let pts = [Point3::splat(2.0), Point3::splat(3.0)];
        render_primitives(&mut plot, &mut LineSegments::new(GetterPoints(&pts), 1.0, 1));
        assert_eq!(plot.draw_list.tri_count(), 2);
    }
    #[test]
    fn strip_segments_are_clipped_to_the_box() {
        let mut plot = flat_plot();
        let pts = [Point3::new(0.5, 0.5, 0.5), Point3::new(1.5, 0.5, 0.5)];
        render_primitives(&mut plot, &mut LineStrip::new(GetterPoints(&pts), 2.0, 1, false));
        let xs: Vec<f32> = plot.draw_list.vtx_buffer.iter().map(|v| v.pos.x).collect();
        assert!(xs.iter().all(|x| *x >= 89.0 && *x <= 141.0));
        assert!((xs[1] - 140.0).abs() < 1e-3);
    }
    #[test]
    fn nan_breaks_the_strip() {
        for skip in [false, true] {
            let mut plot = flat_plot();
            let pts = [
                Point3::splat(0.2),
                Point3::new(0.5, f32::NAN, 0.5),
                Point3::splat(0.8),
            ];
            render_primitives(&mut plot, &mut LineStrip::new(GetterPoints(&pts), 1.0, 1, skip));
            assert_eq!(plot.draw_list.tri_count(), 0);
        }
    }
    #[test]
    fn line_quads_are_offset_by_half_weight() {
        let mut dl = DrawList3D::default();
        dl.prim_reserve(6, 4);
        let line = LineProps {
            half_weight: 1.0,
            uv0: Vec2::splat(0.0),
            uv1: Vec2::splat(0.0),
            col: 5,
        };
        prim_line(&mut dl, Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), &line, 0.25);
        let pos: Vec<Vec2> = dl.vtx_buffer.iter().map(|v| v.pos).collect();
        assert_eq!(
            pos,
            vec![
                Vec2::new(0.0, -1.0),
                Vec2::new(10.0, -1.0),
                Vec2::new(10.0, 1.0),
                Vec2::new(0.0, 1.0)
            ]
        );
        assert_eq!(dl.z_buffer, vec![0.25, 0.25]);
    }
    #[test]
    fn markers_fan_around_their_center() {
        let mut plot = flat_plot();
        let pts = [Point3::splat(0.5), Point3::splat(4.0)];
        render_primitives(
            &mut plot,
            &mut MarkersFill {
                getter: GetterPoints(&pts),
                shape: &FILL_SQUARE,
                size: 2.0,
                col: 1,
                uv: Vec2::splat(0.0),
            },
        );
        assert_eq!(plot.draw_list.tri_count(), 2);
        assert_eq!(plot.draw_list.idx_buffer, vec![0, 1, 2, 0, 2, 3]);
        let v = plot.draw_list.vtx_buffer[0].pos;
        assert!((v.x - (90.0 + 2.0 * SQRT_1_2)).abs() < 1e-4);
    }
    #[test]
    fn outlines_close_the_shape() {
        assert_eq!(LINE_CIRCLE[19], FILL_CIRCLE[0]);
        assert_eq!(LINE_UP[4], FILL_UP[2]);
        assert_eq!(LINE_UP[5], FILL_UP[0]);
        for m in Marker::ALL {
            assert_eq!(marker_fill_shape(m).is_some(), m.is_fillable());
            assert_eq!(marker_line_shape(m).len() % 2, 0);
        }
    }
    #[test]
    fn surface_cells_sample_the_colormap() {
        let mut plot = flat_plot();
        let colormaps = Colormaps::default();
        let greys: usize = Colormap::Greys.into();
        let zs = [0.0f32, 1.0, 1.0, 2.0];
        let (xs, ys) = ([0.0f32, 1.0, 0.0, 1.0], [0.0f32, 0.0, 1.0, 1.0]);
        plot.axes[2].range = Range::new(0.0, 2.0);
        let getter = GetterXyz::new(&xs, &ys, &zs).unwrap();
        render_primitives(
            &mut plot,
            &mut SurfaceFill {
                getter: &getter,
                x_count: 2,
                y_count: 2,
                col: 0,
                uv: Vec2::splat(0.0),
                shading: Some(SurfaceShading {
                    colormaps: &colormaps,
                    cmap: greys,
                    fill_alpha: 1.0,
                    scale: None,
                    min: 0.0,
                    max: 0.0,
                }),
            },
        );
        let cols: Vec<u32> = plot.draw_list.vtx_buffer.iter().map(|v| v.col).collect();
        let expected = [0.0, 0.5, 1.0, 0.5].map(|t| colormaps.lerp_table(greys, t));
        assert_eq!(cols, expected.to_vec());
        assert_eq!(plot.draw_list.tri_count(), 2);
    }
}
