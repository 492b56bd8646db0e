use crate::types::{Axis3D, Plane, Point3, Quat, Vec2};
///corner indices of each cube face, min faces first then max faces
pub const FACES: [[usize; 4]; 6] = [
    [0, 3, 7, 4],
    [0, 4, 5, 1],
    [0, 1, 2, 3],
    [1, 2, 6, 5],
    [3, 7, 6, 2],
    [4, 5, 6, 7],
];
pub const EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];
pub const FACE_EDGES: [[usize; 4]; 6] = [
    [3, 11, 8, 7],
    [0, 8, 4, 9],
    [0, 1, 2, 3],
    [1, 9, 5, 10],
    [2, 10, 6, 11],
    [4, 5, 6, 7],
];
///cube corners in units of half the box scale
pub const UNIT_CORNERS: [Point3; 8] = [
    Point3::new(-1.0, -1.0, -1.0),
    Point3::new(1.0, -1.0, -1.0),
    Point3::new(1.0, 1.0, -1.0),
    Point3::new(-1.0, 1.0, -1.0),
    Point3::new(-1.0, -1.0, 1.0),
    Point3::new(1.0, -1.0, 1.0),
    Point3::new(1.0, 1.0, 1.0),
    Point3::new(-1.0, 1.0, 1.0),
];
///edge each axis is labeled along, indexed by the packed active faces
const AXIS_CORNERS_3D: [[[usize; 2]; 3]; 8] = [
    [[3, 2], [1, 2], [1, 5]],
    [[7, 6], [5, 6], [1, 5]],
    [[0, 1], [1, 2], [2, 6]],
    [[4, 5], [5, 6], [2, 6]],
    [[3, 2], [0, 3], [0, 4]],
    [[7, 6], [4, 7], [0, 4]],
    [[0, 1], [0, 3], [3, 7]],
    [[4, 5], [4, 7], [3, 7]],
];
///rotated normals closer than this to the screen plane count as edge on
const EDGE_ON: f32 = 0.025;
///squared pixel distance for hovering an axis edge
const AXIS_PROXIMITY: f32 = 15.0;
///which face of every axis pair faces the viewer
#[derive(Copy, Debug, Clone, PartialEq, Eq, Default)]
pub struct BoxOrientation {
    ///true when the max face of the axis is the visible one
    pub active_faces: [bool; 3],
    ///set when the camera looks straight down one axis
    pub plane_2d: Option<Plane>,
}
impl BoxOrientation {
    pub fn new(rotation: Quat) -> Self {
        let mut active_faces = [false; 3];
        let mut plane_2d = None;
        let mut degenerate = 0;
        for (i, active) in active_faces.iter_mut().enumerate() {
            let mut normal = Point3::splat(0.0);
            normal[i] = 1.0;
            let n = rotation * normal;
            if n.z.abs() < EDGE_ON {
                *active = n.x + n.y < 0.0;
                degenerate += 1;
            } else {
                *active = n.z < 0.0;
                plane_2d = Plane::from_index(i);
            }
        }
        if degenerate != 2 {
            plane_2d = None;
        }
        Self {
            active_faces,
            plane_2d,
        }
    }
    pub fn is_2d(&self) -> bool {
        self.plane_2d.is_some()
    }
    ///index into FACES of the visible face orthogonal to axis
    pub fn face(&self, axis: usize) -> usize {
        axis + 3 * self.active_faces[axis] as usize
    }
    ///faces drawn as the plot background, only the flat one in 2d
    pub fn visible_faces(&self) -> impl Iterator<Item = (Plane, usize)> + '_ {
        Plane::ALL
            .into_iter()
            .filter(|p| self.plane_2d.is_none_or(|p2| p2 == *p))
            .map(|p| (p, self.face(p.index())))
    }
    pub fn visible_edges(&self) -> [bool; 12] {
        let mut visible = [false; 12];
        for (_, face) in self.visible_faces() {
            for e in FACE_EDGES[face] {
                visible[e] = true;
            }
        }
        visible
    }
    ///start and end corner of the edge carrying each axis's ticks,
    ///none for the axis pointing at the viewer in 2d
    pub fn axis_corners(
        &self,
        corners: &[Point3; 8],
        corners_pix: &[Vec2; 8],
    ) -> [Option<[usize; 2]>; 3] {
        let Some(plane) = self.plane_2d else {
            let index = (self.active_faces[0] as usize) << 2
                | (self.active_faces[1] as usize) << 1
                | self.active_faces[2] as usize;
            return AXIS_CORNERS_3D[index].map(Some);
        };
        let p = plane.index();
        let face = self.face(p);
        let mut common_edges = [0; 2];
        for edge in FACE_EDGES[face] {
            for (j, common) in common_edges.iter_mut().enumerate() {
                let axis = (p + 1 + j) % 3;
                if FACE_EDGES[self.face(axis)].contains(&edge) {
                    *common = edge;
                }
            }
        }
        let (e0, e1) = (EDGES[common_edges[0]], EDGES[common_edges[1]]);
        let (mut origin, mut x_corner, mut y_corner) = (e0[0], e0[1], e1[1]);
        for i in 0..2 {
            for j in 0..2 {
                if e0[i] == e1[j] {
                    origin = e0[i];
                    x_corner = e0[1 - i];
                    y_corner = e1[1 - j];
                }
            }
        }
        let x_vec = corners_pix[x_corner] - corners_pix[origin];
        let y_vec = corners_pix[y_corner] - corners_pix[origin];
        if y_vec.x > x_vec.x {
            std::mem::swap(&mut x_corner, &mut y_corner);
        }
        let x_3d = (corners[x_corner] - corners[origin]).normalized();
        let y_3d = (corners[y_corner] - corners[origin]).normalized();
        let (mut x_axis, mut y_axis) = (None, None);
        let (mut x_inv, mut y_inv) = (false, false);
        for i in 0..2 {
            let axis = (p + 1 + i) % 3;
            if y_axis.is_some() || (x_3d[axis].abs() > 1e-8 && x_axis.is_none()) {
                x_axis = Some(axis);
                x_inv = x_3d[axis] < 0.0;
            } else {
                y_axis = Some(axis);
                y_inv = y_3d[axis] < 0.0;
            }
        }
        let mut out = [None; 3];
        let span = |corner: usize, inverted: bool| {
            if inverted {
                [corner, origin]
            } else {
                [origin, corner]
            }
        };
        if let Some(x) = x_axis {
            out[x] = Some(span(x_corner, x_inv));
        }
        if let Some(y) = y_axis {
            out[y] = Some(span(y_corner, y_inv));
        }
        out
    }
    ///the visible face under the mouse, checked in yz, xz, xy order,
    ///edge on faces are skipped since they have no area
    pub fn mouse_over_plane(&self, corners_pix: &[Vec2; 8], mouse: Vec2) -> Option<Plane> {
        self.visible_faces().find_map(|(plane, face)| {
            let [p0, p1, p2, p3] = FACES[face].map(|c| corners_pix[c]);
            (triangle_contains(p0, p1, p2, mouse) || triangle_contains(p2, p3, p0, mouse))
                .then_some(plane)
        })
    }
    ///the first visible edge near the mouse and the axis it runs along
    pub fn mouse_over_axis(&self, corners_pix: &[Vec2; 8], mouse: Vec2) -> Option<(Axis3D, usize)> {
        let visible = self.visible_edges();
        (0..12).filter(|e| visible[*e]).find_map(|edge| {
            let [a, b] = EDGES[edge].map(|c| corners_pix[c]);
            let d = mouse - line_closest_point(a, b, mouse);
            (d.dot(d) <= AXIS_PROXIMITY).then_some((edge_axis(edge), edge))
        })
    }
}
///axis an edge runs parallel to
pub fn edge_axis(edge: usize) -> Axis3D {
    match edge {
        0 | 2 | 4 | 6 => Axis3D::X,
        1 | 3 | 5 | 7 => Axis3D::Y,
        _ => Axis3D::Z,
    }
}
pub fn triangle_contains(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> bool {
    let side = |u: Vec2, v: Vec2| {
        let (e, q) = (v - u, p - u);
        e.x * q.y - e.y * q.x < 0.0
    };
    let b1 = side(a, b);
    let b2 = side(b, c);
    let b3 = side(c, a);
    b1 == b2 && b2 == b3
}
pub fn line_closest_point(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ap = p - a;
    let ab = b - a;
    let dot = ap.dot(ab);
    if dot <= 0.0 {
        return a;
    }
    let len_sq = ab.dot(ab);
    if dot >= len_sq {
        return b;
    }
    a + ab * (dot / len_sq)
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;
    fn flat_corners() -> ([Point3; 8], [Vec2; 8]) {
        let corners = UNIT_CORNERS.map(|c| (c + Point3::splat(1.0)) * 0.5);
        let pix = corners.map(|c| Vec2::new(c.x * 100.0, -c.y * 100.0));
        (corners, pix)
    }
    #[test]
    fn identity_looks_down_z() {
        let o = BoxOrientation::new(Quat::IDENTITY);
        assert_eq!(o.plane_2d, Some(Plane::XY));
        assert!(!o.active_faces[2]);
    }
    #[test]
    fn flipped_view_uses_the_far_z_face() {
        let o = BoxOrientation::new(Quat::from_axis_angle(PI, Point3::new(1.0, 0.0, 0.0)));
        assert_eq!(o.plane_2d, Some(Plane::XY));
        assert!(o.active_faces[2]);
    }
    #[test]
    fn default_view_is_3d() {
        let o = BoxOrientation::new(Quat::new(-0.513269, -0.212596, -0.318184, 0.76819));
        assert_eq!(o.plane_2d, None);
        let (corners, pix) = flat_corners();
        assert!(o.axis_corners(&corners, &pix).iter().all(Option::is_some));
    }
    #[test]
    fn flat_view_corners() {
        let o = BoxOrientation::new(Quat::IDENTITY);
        let (corners, pix) = flat_corners();
        let axes = o.axis_corners(&corners, &pix);
        assert_eq!(axes, [Some([0, 1]), Some([0, 3]), None]);
        let visible = o.visible_edges();
        assert_eq!(visible.iter().filter(|v| **v).count(), 4);
    }
    #[test]
    fn hover_plane_and_axis() {
        let o = BoxOrientation::new(Quat::IDENTITY);
        let (_, pix) = flat_corners();
        assert_eq!(o.mouse_over_plane(&pix, Vec2::new(40.0, -30.0)), Some(Plane::XY));
        assert_eq!(o.mouse_over_plane(&pix, Vec2::new(150.0, -50.0)), None);
        assert_eq!(
            o.mouse_over_axis(&pix, Vec2::new(50.0, 2.0)),
            Some((Axis3D::X, 0))
        );
        assert_eq!(o.mouse_over_axis(&pix, Vec2::new(50.0, 5.0)), None);
        assert_eq!(
            o.mouse_over_axis(&pix, Vec2::new(-1.0, -60.0)),
            Some((Axis3D::Y, 3))
        );
    }
    #[test]
    fn closest_point_clamps_to_segment() {
        let (a, b) = (Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        assert_eq!(line_closest_point(a, b, Vec2::new(-5.0, 3.0)), a);
        assert_eq!(line_closest_point(a, b, Vec2::new(15.0, 3.0)), b);
        assert_eq!(line_closest_point(a, b, Vec2::new(4.0, 3.0)), Vec2::new(4.0, 0.0));
    }
}
