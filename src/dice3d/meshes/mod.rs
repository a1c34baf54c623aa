pub mod d12;
pub mod d20;
pub mod d4;
pub mod d6;
pub mod d8;

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::dice3d::types::DiceType;

pub use d12::create_d12;
pub use d20::create_d20;
pub use d4::create_d4;
pub use d6::create_d6;
pub use d8::create_d8;

/// Circumradius shared by every die so they fill their tiles alike.
pub const DIE_RADIUS: f32 = 0.9;

pub(crate) const PHI: f32 = 1.618_034;

pub fn create_die_mesh(die_type: DiceType) -> Mesh {
    match die_type {
        DiceType::D4 => create_d4(),
        DiceType::D6 => create_d6(),
        DiceType::D8 => create_d8(),
        DiceType::D12 => create_d12(),
        DiceType::D20 => create_d20(),
    }
}

/// One mesh per die type, built on first request and shared by every die
/// of that type.
#[derive(Resource, Default)]
pub struct DiceGeometryCache {
    meshes: HashMap<DiceType, Handle<Mesh>>,
}

impl DiceGeometryCache {
    pub fn get_or_create(&mut self, die_type: DiceType, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
        self.meshes
            .entry(die_type)
            .or_insert_with(|| meshes.add(create_die_mesh(die_type)))
            .clone()
    }

    pub fn get(&self, die_type: DiceType) -> Option<&Handle<Mesh>> {
        self.meshes.get(&die_type)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

/// Flat-shaded convex polyhedron from its vertices and one outward
/// direction per face. A face is the set of vertices furthest along its
/// direction; triangles are emitted as-is, larger polygons are fanned from
/// their center. Each face gets the full texture mapped into a regular
/// polygon inscribed in UV space.
pub(crate) fn faceted_mesh(vertices: &[Vec3], face_normals: &[Vec3]) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();

    for normal in face_normals {
        let n = normal.normalize();
        let support = vertices
            .iter()
            .map(|v| v.dot(n))
            .fold(f32::MIN, f32::max);
        let mut face: Vec<Vec3> = vertices
            .iter()
            .copied()
            .filter(|v| (v.dot(n) - support).abs() < 1e-4)
            .collect();
        if face.len() < 3 {
            continue;
        }

        let center = face.iter().copied().sum::<Vec3>() / face.len() as f32;
        let u = (face[0] - center).normalize();
        let w = n.cross(u);
        face.sort_by(|a, b| {
            let angle = |p: &Vec3| (*p - center).dot(w).atan2((*p - center).dot(u));
            angle(a).total_cmp(&angle(b))
        });

        let k = face.len();
        let corner_uv = |i: usize| {
            let theta = FRAC_PI_2 + TAU * i as f32 / k as f32;
            [0.5 + 0.5 * theta.cos(), 0.5 - 0.5 * theta.sin()]
        };

        if k == 3 {
            for (i, p) in face.iter().enumerate() {
                positions.push(p.to_array());
                uvs.push(corner_uv(i));
            }
        } else {
            for i in 0..k {
                let next = (i + 1) % k;
                positions.push(center.to_array());
                positions.push(face[i].to_array());
                positions.push(face[next].to_array());
                uvs.push([0.5, 0.5]);
                uvs.push(corner_uv(i));
                uvs.push(corner_uv(next));
            }
        }

        while normals.len() < positions.len() {
            normals.push(n.to_array());
        }
    }

    let indices: Vec<u32> = (0..positions.len() as u32).collect();

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_mesh::VertexAttributeValues;

    fn positions(mesh: &Mesh) -> Vec<Vec3> {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(p)) => {
                p.iter().map(|v| Vec3::from_array(*v)).collect()
            }
            _ => panic!("mesh has no Float32x3 positions"),
        }
    }

    fn triangles(mesh: &Mesh) -> Vec<[Vec3; 3]> {
        let p = positions(mesh);
        let idx: Vec<usize> = match mesh.indices() {
            Some(indices) => indices.iter().collect(),
            None => (0..p.len()).collect(),
        };
        idx.chunks(3).map(|t| [p[t[0]], p[t[1]], p[t[2]]]).collect()
    }

    #[test]
    fn test_faceted_triangle_counts() {
        // d8: 8 triangles; d12: 12 pentagons fanned into 5; d20: 20 triangles.
        assert_eq!(triangles(&create_d8()).len(), 8);
        assert_eq!(triangles(&create_d12()).len(), 60);
        assert_eq!(triangles(&create_d20()).len(), 20);
    }

    #[test]
    fn test_all_dice_wind_outward() {
        for die in DiceType::ALL {
            let mesh = create_die_mesh(die);
            for [a, b, c] in triangles(&mesh) {
                let n = (b - a).cross(c - a);
                let centroid = (a + b + c) / 3.0;
                assert!(
                    n.dot(centroid) > 0.0,
                    "{} has an inward-facing triangle",
                    die
                );
            }
        }
    }

    #[test]
    fn test_all_dice_share_radius() {
        for die in DiceType::ALL {
            let far = positions(&create_die_mesh(die))
                .iter()
                .map(|p| p.length())
                .fold(0.0_f32, f32::max);
            assert!(
                (far - DIE_RADIUS).abs() < 0.01,
                "{} circumradius {} != {}",
                die,
                far,
                DIE_RADIUS
            );
        }
    }

    #[test]
    fn test_all_dice_have_uvs() {
        for die in DiceType::ALL {
            let mesh = create_die_mesh(die);
            assert!(mesh.attribute(Mesh::ATTRIBUTE_UV_0).is_some(), "{} lacks UVs", die);
        }
    }

    #[test]
    fn test_geometry_cache_shares_handles() {
        let mut meshes = Assets::<Mesh>::default();
        let mut cache = DiceGeometryCache::default();

        let first = cache.get_or_create(DiceType::D20, &mut meshes);
        let second = cache.get_or_create(DiceType::D20, &mut meshes);
        assert_eq!(first, second);
        assert_eq!(meshes.len(), 1);

        let other = cache.get_or_create(DiceType::D6, &mut meshes);
        assert_ne!(first, other);
        assert_eq!(meshes.len(), 2);
        assert_eq!(cache.len(), 2);
    }
}
