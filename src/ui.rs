#[cfg(any(feature = "egui", feature = "tiny-skia"))]
use crate::types::Color;
use crate::types::{Rect, Vec2};
use std::hash::{DefaultHasher, Hash, Hasher};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
///host texture handle, the default handle is the font atlas holding the white pixel
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TextureId(pub u64);
#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct Vertex {
    pub pos: Vec2,
    pub uv: Vec2,
    ///packed as 0xAABBGGRR
    pub col: u32,
}
impl Vertex {
    pub const fn new(pos: Vec2, uv: Vec2, col: u32) -> Self {
        Self { pos, uv, col }
    }
}
///a run of indices sharing one texture and clip rectangle
#[derive(Copy, Debug, Clone, PartialEq)]
pub struct DrawCmd {
    pub texture: TextureId,
    pub clip_rect: Rect,
    pub idx_offset: usize,
    pub elem_count: usize,
}
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    ///center of the text box
    pub pos: Vec2,
    ///radians, positive turns counter clockwise on screen
    pub angle: f32,
    pub col: u32,
    pub text: String,
}
///index type of the host draw list
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Eq, Default)]
pub enum IndexWidth {
    U16,
    #[default]
    U32,
}
impl IndexWidth {
    pub fn max_idx(self) -> u32 {
        match self {
            IndexWidth::U16 => u16::MAX as u32,
            IndexWidth::U32 => u32::MAX,
        }
    }
}
///font measurements used to size text
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq)]
pub struct TextMetrics {
    pub line_height: f32,
    pub char_width: f32,
}
impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            line_height: 13.0,
            char_width: 7.0,
        }
    }
}
impl TextMetrics {
    ///size of the displayed part of text, one line_height per line
    pub fn text_size(&self, text: &str) -> Vec2 {
        let text = display_text(text);
        if text.is_empty() {
            return Vec2::new(0.0, self.line_height);
        }
        let (lines, width) = text
            .lines()
            .fold((0usize, 0usize), |(n, w), l| (n + 1, w.max(l.chars().count())));
        Vec2::new(
            width as f32 * self.char_width,
            lines.max(1) as f32 * self.line_height,
        )
    }
}
///the part of a label that gets displayed, everything before "##"
pub fn display_text(label: &str) -> &str {
    match label.find("##") {
        Some(i) => &label[..i],
        None => label,
    }
}
///hashes label inside the id scope seed, only the part after "###" counts when present
pub fn hash_id(seed: u64, label: &str) -> u64 {
    let key = match label.find("###") {
        Some(i) => &label[i..],
        None => label,
    };
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    key.hash(&mut hasher);
    hasher.finish()
}
///sink for flattened 2d geometry and text, consumed by the host renderer
#[derive(Debug, Clone)]
pub struct Painter {
    pub vtx: Vec<Vertex>,
    pub idx: Vec<u32>,
    pub cmds: Vec<DrawCmd>,
    pub texts: Vec<TextShape>,
    pub index_width: IndexWidth,
    pub metrics: TextMetrics,
    ///uv of an opaque white texel in the default texture
    pub white_uv: Vec2,
    ///anti aliased line uvs (u0, v0, u1, v1) indexed by integer line width,
    ///some when the host shader fades line edges through a texture
    pub aa_line_uvs: Option<Vec<[f32; 4]>>,
    clip_stack: Vec<Rect>,
    full_clip: Rect,
    texture: TextureId,
}
impl Default for Painter {
    fn default() -> Self {
        Self::new(Rect::new(
            Vec2::splat(f32::MIN / 2.0),
            Vec2::splat(f32::MAX / 2.0),
        ))
    }
}
impl Painter {
    ///creates an empty sink clipping to screen
    pub fn new(screen: Rect) -> Self {
        Self {
            vtx: Vec::new(),
            idx: Vec::new(),
            cmds: Vec::new(),
            texts: Vec::new(),
            index_width: IndexWidth::default(),
            metrics: TextMetrics::default(),
            white_uv: Vec2::splat(0.0),
            aa_line_uvs: None,
            clip_stack: Vec::new(),
            full_clip: screen,
            texture: TextureId::default(),
        }
    }
    ///drops the geometry, keeps the configuration
    pub fn clear(&mut self) {
        self.vtx.clear();
        self.idx.clear();
        self.cmds.clear();
        self.texts.clear();
        self.clip_stack.clear();
        self.texture = TextureId::default();
    }
    pub fn set_screen(&mut self, screen: Rect) {
        self.full_clip = screen;
    }
    pub fn clip_rect(&self) -> Rect {
        self.clip_stack.last().copied().unwrap_or(self.full_clip)
    }
    ///intersect clips the new rectangle with the current one
    pub fn push_clip_rect(&mut self, rect: Rect, intersect: bool) {
        let rect = if intersect {
            rect.intersect(&self.clip_rect())
        } else {
            rect
        };
        self.clip_stack.push(rect);
    }
    pub fn pop_clip_rect(&mut self) {
        if self.clip_stack.pop().is_none() {
            log::warn!("pop_clip_rect called without a pushed clip rectangle");
        }
    }
    pub fn set_texture(&mut self, texture: TextureId) {
        self.texture = texture;
    }
    pub fn texture(&self) -> TextureId {
        self.texture
    }
    pub fn vtx_current_idx(&self) -> u32 {
        self.vtx.len() as u32
    }
    fn current_cmd(&mut self) -> &mut DrawCmd {
        let clip_rect = self.clip_rect();
        let texture = self.texture;
        let idx_offset = self.idx.len();
        let reuse = self
            .cmds
            .last()
            .is_some_and(|c| c.texture == texture && c.clip_rect == clip_rect);
        if !reuse {
            self.cmds.push(DrawCmd {
                texture,
                clip_rect,
                idx_offset,
                elem_count: 0,
            });
        }
        let n = self.cmds.len() - 1;
        &mut self.cmds[n]
    }
    ///reserves room for idx_count indices in the current command,
    ///followed by prim_write_vtx and prim_write_idx calls
    pub fn prim_reserve(&mut self, idx_count: usize, vtx_count: usize) {
        self.current_cmd().elem_count += idx_count;
        self.vtx.reserve(vtx_count);
        self.idx.reserve(idx_count);
    }
    pub fn prim_write_vtx(&mut self, pos: Vec2, uv: Vec2, col: u32) {
        self.vtx.push(Vertex::new(pos, uv, col));
    }
    pub fn prim_write_idx(&mut self, idx: u32) {
        self.idx.push(idx);
    }
    fn prim_quad(&mut self, p: [Vec2; 4], col: u32) {
        let uv = self.white_uv;
        let base = self.vtx_current_idx();
        self.prim_reserve(6, 4);
        for p in p {
            self.prim_write_vtx(p, uv, col);
        }
        for i in [0, 1, 2, 0, 2, 3] {
            self.prim_write_idx(base + i);
        }
    }
    pub fn add_line(&mut self, a: Vec2, b: Vec2, col: u32, thickness: f32) {
        if col >> 24 == 0 {
            return;
        }
        let d = b - a;
        let len = d.norm();
        if len == 0.0 {
            return;
        }
        let n = Vec2::new(-d.y, d.x) * (thickness * 0.5 / len);
        self.prim_quad([a + n, b + n, b - n, a - n], col);
    }
    pub fn add_rect(&mut self, min: Vec2, max: Vec2, col: u32, thickness: f32) {
        let (a, b) = (Vec2::new(max.x, min.y), Vec2::new(min.x, max.y));
        for (p0, p1) in [(min, a), (a, max), (max, b), (b, min)] {
            self.add_line(p0, p1, col, thickness);
        }
    }
    pub fn add_rect_filled(&mut self, min: Vec2, max: Vec2, col: u32) {
        if col >> 24 == 0 {
            return;
        }
        self.prim_quad(
            [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
            col,
        );
    }
    pub fn add_quad_filled(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, col: u32) {
        if col >> 24 == 0 {
            return;
        }
        self.prim_quad([p0, p1, p2, p3], col);
    }
    pub fn add_triangle_filled(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, col: u32) {
        if col >> 24 == 0 {
            return;
        }
        let uv = self.white_uv;
        let base = self.vtx_current_idx();
        self.prim_reserve(3, 3);
        for p in [p0, p1, p2] {
            self.prim_write_vtx(p, uv, col);
        }
        for i in 0..3 {
            self.prim_write_idx(base + i);
        }
    }
    ///size of the displayed part of text
    pub fn calc_text_size(&self, text: &str) -> Vec2 {
        self.metrics.text_size(text)
    }
    ///text with its top left corner at pos
    pub fn add_text(&mut self, pos: Vec2, col: u32, text: &str) {
        let size = self.calc_text_size(text);
        self.push_text(pos + size * 0.5, 0.0, col, text);
    }
    ///text with its top edge centered at top_center
    pub fn add_text_centered(&mut self, top_center: Vec2, col: u32, text: &str) {
        let size = self.calc_text_size(text);
        self.push_text(
            Vec2::new(top_center.x, top_center.y + size.y * 0.5),
            0.0,
            col,
            text,
        );
    }
    ///text centered at pos, turned by angle radians
    pub fn add_text_rotated(&mut self, pos: Vec2, angle: f32, col: u32, text: &str) {
        self.push_text(pos.floor(), angle, col, text);
    }
    fn push_text(&mut self, pos: Vec2, angle: f32, col: u32, text: &str) {
        let text = display_text(text);
        if text.is_empty() || col >> 24 == 0 {
            return;
        }
        let clip = self.clip_rect();
        if !clip.contains(pos) {
            return;
        }
        self.texts.push(TextShape {
            pos,
            angle,
            col,
            text: text.to_string(),
        });
    }
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }
    #[cfg(feature = "egui")]
    ///converts the buffers into egui shapes
    pub fn to_shapes(&self, ctx: &egui::Context) -> Vec<egui::Shape> {
        let mut shapes = Vec::with_capacity(self.cmds.len() + self.texts.len());
        for cmd in &self.cmds {
            let idx = &self.idx[cmd.idx_offset..cmd.idx_offset + cmd.elem_count];
            let (Some(lo), Some(hi)) = (idx.iter().min(), idx.iter().max()) else {
                continue;
            };
            let texture = if cmd.texture == TextureId::default() {
                egui::TextureId::default()
            } else {
                egui::TextureId::User(cmd.texture.0)
            };
            let mut mesh = egui::Mesh::with_texture(texture);
            mesh.vertices = self.vtx[*lo as usize..=*hi as usize]
                .iter()
                .map(|v| egui::epaint::Vertex {
                    pos: v.pos.to_pos2(),
                    uv: egui::pos2(v.uv.x, v.uv.y),
                    color: Color::from_u32(v.col).to_col(),
                })
                .collect();
            mesh.indices = idx.iter().map(|i| i - lo).collect();
            shapes.push(egui::Shape::Mesh(mesh.into()));
        }
        for t in &self.texts {
            let color = Color::from_u32(t.col).to_col();
            let galley = ctx.fonts(|f| {
                f.layout_no_wrap(
                    t.text.clone(),
                    egui::FontId::monospace(self.metrics.line_height),
                    color,
                )
            });
            let half = galley.size() * 0.5;
            let (s, c) = (-t.angle).sin_cos();
            let corner = egui::vec2(-half.x * c + half.y * s, -half.x * s - half.y * c);
            shapes.push(egui::Shape::Text(
                egui::epaint::TextShape::new(t.pos.to_pos2() + corner, galley, color)
                    .with_angle(-t.angle),
            ));
        }
        shapes
    }
    #[cfg(feature = "tiny-skia")]
    ///fills the solid colored triangles into pixmap, textured runs and text are skipped
    pub fn rasterize(&self, pixmap: &mut tiny_skia::PixmapMut) {
        let (w, h) = (pixmap.width(), pixmap.height());
        for cmd in &self.cmds {
            if cmd.texture != TextureId::default() {
                continue;
            }
            let clip = &cmd.clip_rect;
            let mask = tiny_skia::Rect::from_ltrb(
                clip.min.x.max(0.0),
                clip.min.y.max(0.0),
                clip.max.x.min(w as f32),
                clip.max.y.min(h as f32),
            )
            .and_then(|r| {
                let mut mask = tiny_skia::Mask::new(w, h)?;
                mask.fill_path(
                    &tiny_skia::PathBuilder::from_rect(r),
                    tiny_skia::FillRule::Winding,
                    false,
                    tiny_skia::Transform::identity(),
                );
                Some(mask)
            });
            let Some(mask) = mask else {
                continue;
            };
            for tri in self.idx[cmd.idx_offset..cmd.idx_offset + cmd.elem_count].chunks_exact(3) {
                let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| self.vtx[i as usize]);
                let mut pb = tiny_skia::PathBuilder::new();
                pb.move_to(a.pos.x, a.pos.y);
                pb.line_to(b.pos.x, b.pos.y);
                pb.line_to(c.pos.x, c.pos.y);
                pb.close();
                let Some(path) = pb.finish() else {
                    continue;
                };
                let mut paint = tiny_skia::Paint::default();
                paint.set_color(Color::from_u32(a.col).to_skia());
                paint.anti_alias = true;
                pixmap.fill_path(
                    &path,
                    &paint,
                    tiny_skia::FillRule::Winding,
                    tiny_skia::Transform::identity(),
                    Some(&mask),
                );
            }
        }
    }
}
