use bevy::prelude::*;

use super::DIE_RADIUS;

/// Circumradius of `Tetrahedron::default()`.
const TETRAHEDRON_CIRCUMRADIUS: f32 = 0.866_025_4;

pub fn create_d4() -> Mesh {
    Mesh::from(Tetrahedron::default())
        .scaled_by(Vec3::splat(DIE_RADIUS / TETRAHEDRON_CIRCUMRADIUS))
}
