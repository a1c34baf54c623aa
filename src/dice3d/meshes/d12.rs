use bevy::prelude::*;

use super::{faceted_mesh, DIE_RADIUS, PHI};

pub fn create_d12() -> Mesh {
    let inv_phi = 1.0 / PHI;
    // Unscaled dodecahedron has circumradius sqrt(3).
    let s = DIE_RADIUS / 3.0_f32.sqrt();

    let mut vertices = Vec::with_capacity(20);

    // Cube vertices
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            for sz in [-1.0, 1.0] {
                vertices.push(Vec3::new(sx, sy, sz) * s);
            }
        }
    }

    // Rectangle vertices on each axis
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            vertices.push(Vec3::new(0.0, a * inv_phi, b * PHI) * s);
            vertices.push(Vec3::new(a * inv_phi, b * PHI, 0.0) * s);
            vertices.push(Vec3::new(a * PHI, 0.0, b * inv_phi) * s);
        }
    }

    // Pentagonal faces point at the vertices of the dual icosahedron.
    let mut face_normals = Vec::with_capacity(12);
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            face_normals.push(Vec3::new(0.0, a * PHI, b));
            face_normals.push(Vec3::new(a * PHI, b, 0.0));
            face_normals.push(Vec3::new(a, 0.0, b * PHI));
        }
    }

    faceted_mesh(&vertices, &face_normals)
}
