use bevy::prelude::*;

use super::DIE_RADIUS;

pub fn create_d6() -> Mesh {
    // Cube circumradius is half the space diagonal.
    let size = 2.0 * DIE_RADIUS / 3.0_f32.sqrt();
    Mesh::from(Cuboid::new(size, size, size))
}
