use bevy::prelude::*;

use super::{faceted_mesh, DIE_RADIUS};

pub fn create_d8() -> Mesh {
    let vertices = [
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ]
    .map(|v| v * DIE_RADIUS);

    // One face per octant.
    let mut face_normals = Vec::with_capacity(8);
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            for sz in [-1.0, 1.0] {
                face_normals.push(Vec3::new(sx, sy, sz));
            }
        }
    }

    faceted_mesh(&vertices, &face_normals)
}
