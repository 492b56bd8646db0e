use crate::types::Vec2;
use crate::ui::{Painter, TextureId, Vertex};
#[cfg(feature = "rayon")]
use rayon::slice::ParallelSliceMut;
///triangles tagged with a depth, flushed back to front into a painter
#[derive(Debug, Clone, Default)]
pub struct DrawList3D {
    pub(crate) vtx_buffer: Vec<Vertex>,
    pub(crate) idx_buffer: Vec<u32>,
    ///one entry per triangle
    pub(crate) z_buffer: Vec<f32>,
    ///texture and first vertex of every texture run
    pub(crate) texture_buffer: Vec<(TextureId, u32)>,
    vtx_write: usize,
    idx_write: usize,
    z_write: usize,
    white_uv: Vec2,
    aa_line_uvs: Option<Vec<[f32; 4]>>,
}
impl DrawList3D {
    ///clears the buffers and takes the line texture setup from painter
    pub fn init(&mut self, painter: &Painter) {
        self.reset_buffers();
        self.white_uv = painter.white_uv;
        self.aa_line_uvs.clone_from(&painter.aa_line_uvs);
    }
    fn reset_buffers(&mut self) {
        self.vtx_buffer.clear();
        self.idx_buffer.clear();
        self.z_buffer.clear();
        self.texture_buffer.clear();
        self.texture_buffer.push((TextureId::default(), 0));
        self.vtx_write = 0;
        self.idx_write = 0;
        self.z_write = 0;
    }
    pub fn white_uv(&self) -> Vec2 {
        self.white_uv
    }
    ///grows the buffers, idx_count must be a multiple of 3
    pub fn prim_reserve(&mut self, idx_count: usize, vtx_count: usize) {
        debug_assert!(idx_count % 3 == 0);
        self.vtx_write = self.vtx_buffer.len();
        self.vtx_buffer
            .resize(self.vtx_write + vtx_count, Vertex::default());
        self.idx_write = self.idx_buffer.len();
        self.idx_buffer.resize(self.idx_write + idx_count, 0);
        self.z_write = self.z_buffer.len();
        self.z_buffer.resize(self.z_write + idx_count / 3, 0.0);
    }
    ///returns the unused tail of the last reservation
    pub fn prim_unreserve(&mut self, idx_count: usize, vtx_count: usize) {
        debug_assert!(idx_count % 3 == 0);
        let n = self.vtx_buffer.len().saturating_sub(vtx_count);
        self.vtx_buffer.truncate(n);
        let n = self.idx_buffer.len().saturating_sub(idx_count);
        self.idx_buffer.truncate(n);
        let n = self.z_buffer.len().saturating_sub(idx_count / 3);
        self.z_buffer.truncate(n);
    }
    ///index the next written vertex will get
    pub fn vtx_current_idx(&self) -> u32 {
        self.vtx_write as u32
    }
    pub fn write_vtx(&mut self, pos: Vec2, uv: Vec2, col: u32) {
        self.vtx_buffer[self.vtx_write] = Vertex::new(pos, uv, col);
        self.vtx_write += 1;
    }
    pub fn write_idx(&mut self, idx: u32) {
        self.idx_buffer[self.idx_write] = idx;
        self.idx_write += 1;
    }
    ///depth of the next triangle
    pub fn write_z(&mut self, z: f32) {
        self.z_buffer[self.z_write] = z;
        self.z_write += 1;
    }
    ///starts a texture run at the next vertex unless the current run already uses texture
    pub fn set_texture(&mut self, texture: TextureId) {
        let first = self.vtx_buffer.len() as u32;
        match self.texture_buffer.last_mut() {
            Some((t, _)) if *t == texture => {}
            Some((t, f)) if *f == first => *t = texture,
            _ => self.texture_buffer.push((texture, first)),
        }
    }
    pub fn reset_texture(&mut self) {
        self.set_texture(TextureId::default());
    }
    pub fn tri_count(&self) -> usize {
        self.z_buffer.len()
    }
    ///half weight and uvs of a line, widened by one pixel when the host fades
    ///line edges through its texture
    pub fn line_render_props(&self, half_weight: f32) -> (f32, Vec2, Vec2) {
        if let Some(uvs) = self
            .aa_line_uvs
            .as_ref()
            .and_then(|t| t.get((half_weight * 2.0) as usize))
        {
            (
                half_weight + 1.0,
                Vec2::new(uvs[0], uvs[1]),
                Vec2::new(uvs[2], uvs[3]),
            )
        } else {
            (half_weight, self.white_uv, self.white_uv)
        }
    }
    fn texture_of(&self, vtx: u32) -> TextureId {
        let run = self
            .texture_buffer
            .partition_point(|(_, first)| *first <= vtx)
            .saturating_sub(1);
        self.texture_buffer
            .get(run)
            .map(|(t, _)| *t)
            .unwrap_or_default()
    }
    ///sorts the triangles far to near and appends them to painter,
    ///one command per texture change, then clears
    pub fn sorted_move_to_host(&mut self, painter: &mut Painter) {
        let tri_count = self.z_buffer.len();
        if tri_count == 0 {
            self.reset_buffers();
            return;
        }
        let mut tris: Vec<(f32, usize)> = self.z_buffer.iter().copied().zip(0..).collect();
        #[cfg(feature = "rayon")]
        tris.par_sort_by(|a, b| a.0.total_cmp(&b.0));
        #[cfg(not(feature = "rayon"))]
        tris.sort_by(|a, b| a.0.total_cmp(&b.0));
        let idx_offset = painter.vtx_current_idx();
        painter.vtx.extend_from_slice(&self.vtx_buffer);
        let max_idx = painter.index_width.max_idx().saturating_sub(idx_offset);
        let host_texture = painter.texture();
        let mut added = 0;
        for (_, tri) in &tris {
            let i = &self.idx_buffer[tri * 3..tri * 3 + 3];
            if i.iter().any(|i| *i > max_idx) {
                break;
            }
            painter.set_texture(self.texture_of(i[0]));
            painter.prim_reserve(3, 0);
            for i in i {
                painter.prim_write_idx(i + idx_offset);
            }
            added += 1;
        }
        painter.set_texture(host_texture);
        if added < tri_count {
            log::debug!(
                "3d draw list truncated to {added} of {tri_count} triangles by the host index width"
            );
        }
        self.reset_buffers();
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::IndexWidth;
    fn push_tri(dl: &mut DrawList3D, z: f32, col: u32) {
        dl.prim_reserve(3, 3);
        let base = dl.vtx_current_idx();
        for i in 0..3 {
            dl.write_vtx(Vec2::splat(i as f32), Vec2::splat(0.0), col);
            dl.write_idx(base + i);
        }
        dl.write_z(z);
    }
    fn flushed_colors(p: &Painter) -> Vec<u32> {
        p.idx.chunks(3).map(|t| p.vtx[t[0] as usize].col).collect()
    }
    #[test]
    fn far_triangles_come_first_and_ties_keep_order() {
        let mut dl = DrawList3D::default();
        let mut p = Painter::default();
        dl.init(&p);
        push_tri(&mut dl, 0.5, 1);
        push_tri(&mut dl, -0.5, 2);
        push_tri(&mut dl, 0.5, 3);
        push_tri(&mut dl, 0.0, 4);
        dl.sorted_move_to_host(&mut p);
        assert_eq!(flushed_colors(&p), vec![2, 4, 1, 3]);
        assert_eq!(dl.tri_count(), 0);
        assert!(dl.vtx_buffer.is_empty());
    }
    #[test]
    fn indices_are_offset_by_host_vertices() {
        let mut dl = DrawList3D::default();
        let mut p = Painter::default();
        p.add_rect_filled(Vec2::splat(0.0), Vec2::splat(1.0), 0xFFFFFFFF);
        dl.init(&p);
        push_tri(&mut dl, 0.0, 7);
        dl.sorted_move_to_host(&mut p);
        assert_eq!(&p.idx[6..], &[4, 5, 6]);
    }
    #[test]
    fn unreserve_drops_the_tail() {
        let mut dl = DrawList3D::default();
        dl.prim_reserve(6, 6);
        let base = dl.vtx_current_idx();
        for i in 0..3 {
            dl.write_vtx(Vec2::splat(0.0), Vec2::splat(0.0), 1);
            dl.write_idx(base + i);
        }
        dl.write_z(0.0);
        dl.prim_unreserve(3, 3);
        assert_eq!(dl.vtx_buffer.len(), 3);
        assert_eq!(dl.idx_buffer.len(), 3);
        assert_eq!(dl.tri_count(), 1);
    }
    #[test]
    fn overflow_truncates_instead_of_wrapping() {
        let mut dl = DrawList3D::default();
        let mut p = Painter::default();
        p.index_width = IndexWidth::U16;
        p.vtx.resize(65533, Vertex::default());
        dl.init(&p);
        push_tri(&mut dl, 0.0, 1);
        push_tri(&mut dl, 1.0, 2);
        dl.sorted_move_to_host(&mut p);
        assert_eq!(p.triangle_count(), 1);
        assert_eq!(p.idx, vec![65533, 65534, 65535]);
    }
    #[test]
    fn texture_runs_become_commands() {
        let mut dl = DrawList3D::default();
        let mut p = Painter::default();
        dl.init(&p);
        push_tri(&mut dl, 0.0, 1);
        dl.set_texture(TextureId(9));
        push_tri(&mut dl, 1.0, 2);
        dl.reset_texture();
        push_tri(&mut dl, 2.0, 3);
        assert_eq!(dl.texture_buffer.len(), 3);
        dl.sorted_move_to_host(&mut p);
        let textures: Vec<TextureId> = p.cmds.iter().map(|c| c.texture).collect();
        assert_eq!(
            textures,
            vec![TextureId(0), TextureId(9), TextureId(0)]
        );
        assert_eq!(p.texture(), TextureId(0));
    }
    #[test]
    fn aa_lines_widen_by_a_pixel() {
        let mut p = Painter::default();
        let mut dl = DrawList3D::default();
        dl.init(&p);
        assert_eq!(dl.line_render_props(0.5).0, 0.5);
        p.aa_line_uvs = Some(vec![[0.0, 0.0, 1.0, 1.0]; 4]);
        dl.init(&p);
        let (hw, uv0, uv1) = dl.line_render_props(0.5);
        assert_eq!(hw, 1.5);
        assert_eq!((uv0, uv1), (Vec2::splat(0.0), Vec2::splat(1.0)));
    }
}
