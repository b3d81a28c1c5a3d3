use super::constants::{STAR_DEPTH, STAR_GLOW_RADIUS, STAR_INNER_RADIUS, STAR_OUTER_RADIUS, STAR_POINTS};
use glam::Vec3;
use std::f32::consts::PI;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub _pad: f32,
}

impl MeshVertex {
    #[inline]
    fn at(p: Vec3) -> Self {
        Self {
            position: p.to_array(),
            _pad: 0.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

/// Geometry for the tree topper: solid body, outline edges (line list) and glow halo.
#[derive(Clone, Debug)]
pub struct StarGeometry {
    pub body: Mesh,
    pub edges: Vec<MeshVertex>,
    pub glow: Mesh,
}

/// Alternating outer/inner outline, first point straight up, clockwise seen from +Z.
pub fn star_outline(points: usize, inner: f32, outer: f32) -> Vec<[f32; 2]> {
    (0..points * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let a = i as f32 / points as f32 * PI;
            [a.sin() * r, a.cos() * r]
        })
        .collect()
}

/// Extrude the outline to `depth` and centre the result on its bounding box.
pub fn extruded_star(outline: &[[f32; 2]], depth: f32) -> (Mesh, Vec<MeshVertex>) {
    let n = outline.len();
    let (mut min, mut max) = ([f32::MAX; 2], [f32::MIN; 2]);
    for p in outline {
        for k in 0..2 {
            min[k] = min[k].min(p[k]);
            max[k] = max[k].max(p[k]);
        }
    }
    let cx = (min[0] + max[0]) * 0.5;
    let cy = (min[1] + max[1]) * 0.5;
    let half = depth * 0.5;
    let ring = |z: f32| -> Vec<Vec3> {
        outline
            .iter()
            .map(|p| Vec3::new(p[0] - cx, p[1] - cy, z))
            .collect()
    };
    let front = ring(half);
    let back = ring(-half);

    let mut body = Mesh::default();
    // layout: front centre, front ring, back centre, back ring
    body.vertices.push(MeshVertex::at(Vec3::new(-cx, -cy, half)));
    body.vertices.extend(front.iter().copied().map(MeshVertex::at));
    body.vertices.push(MeshVertex::at(Vec3::new(-cx, -cy, -half)));
    body.vertices.extend(back.iter().copied().map(MeshVertex::at));

    let front_c = 0u16;
    let front_0 = 1u16;
    let back_c = (n + 1) as u16;
    let back_0 = (n + 2) as u16;
    for i in 0..n as u16 {
        let j = (i + 1) % n as u16;
        // the outline runs clockwise, so flip the front fan to face +Z
        body.indices.extend_from_slice(&[front_c, front_0 + j, front_0 + i]);
        body.indices.extend_from_slice(&[back_c, back_0 + i, back_0 + j]);
        body.indices
            .extend_from_slice(&[front_0 + i, front_0 + j, back_0 + j]);
        body.indices
            .extend_from_slice(&[front_0 + i, back_0 + j, back_0 + i]);
    }

    let mut edges = Vec::with_capacity(n * 6);
    for i in 0..n {
        let j = (i + 1) % n;
        edges.push(MeshVertex::at(front[i]));
        edges.push(MeshVertex::at(front[j]));
        edges.push(MeshVertex::at(back[i]));
        edges.push(MeshVertex::at(back[j]));
        edges.push(MeshVertex::at(front[i]));
        edges.push(MeshVertex::at(back[i]));
    }
    (body, edges)
}

pub fn octahedron(radius: f32) -> Mesh {
    let v = [
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ];
    Mesh {
        vertices: v.iter().map(|p| MeshVertex::at(*p * radius)).collect(),
        indices: vec![
            0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2, //
            1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
        ],
    }
}

pub fn build_star() -> StarGeometry {
    let outline = star_outline(STAR_POINTS, STAR_INNER_RADIUS, STAR_OUTER_RADIUS);
    let (body, edges) = extruded_star(&outline, STAR_DEPTH);
    StarGeometry {
        body,
        edges,
        glow: octahedron(STAR_GLOW_RADIUS),
    }
}
