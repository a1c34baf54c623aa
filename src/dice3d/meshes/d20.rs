use bevy::prelude::*;

use super::{faceted_mesh, DIE_RADIUS, PHI};

pub fn create_d20() -> Mesh {
    let inv_phi = 1.0 / PHI;
    // Unscaled icosahedron has circumradius sqrt(1 + phi^2).
    let s = DIE_RADIUS / (1.0 + PHI * PHI).sqrt();

    let mut vertices = Vec::with_capacity(12);
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            vertices.push(Vec3::new(0.0, a, b * PHI) * s);
            vertices.push(Vec3::new(a, b * PHI, 0.0) * s);
            vertices.push(Vec3::new(a * PHI, 0.0, b) * s);
        }
    }

    // Triangular faces point at the vertices of the dual dodecahedron.
    let mut face_normals = Vec::with_capacity(20);
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            for sz in [-1.0, 1.0] {
                face_normals.push(Vec3::new(sx, sy, sz));
            }
        }
    }
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            face_normals.push(Vec3::new(0.0, a * PHI, b * inv_phi));
            face_normals.push(Vec3::new(a * PHI, b * inv_phi, 0.0));
            face_normals.push(Vec3::new(a * inv_phi, 0.0, b * PHI));
        }
    }

    faceted_mesh(&vertices, &face_normals)
}
