//! Tests for die meshes and the shared geometry cache

use bevy::prelude::*;
use crystaldice::dice3d::meshes::{create_die_mesh, DiceGeometryCache};
use crystaldice::dice3d::types::DiceType;

#[test]
fn test_cache_creates_one_mesh_per_type() {
    let mut meshes = Assets::<Mesh>::default();
    let mut cache = DiceGeometryCache::default();
    assert!(cache.is_empty());

    let mut handles = Vec::new();
    for _ in 0..3 {
        for die in DiceType::ALL {
            handles.push((die, cache.get_or_create(die, &mut meshes)));
        }
    }

    assert_eq!(meshes.len(), DiceType::ALL.len());
    assert_eq!(cache.len(), DiceType::ALL.len());
    for (die, handle) in &handles {
        assert_eq!(cache.get(*die), Some(handle));
    }
}

#[test]
fn test_cache_lookup_before_creation() {
    let cache = DiceGeometryCache::default();
    assert!(cache.get(DiceType::D8).is_none());
}

#[test]
fn test_meshes_have_normals_for_every_vertex() {
    for die in DiceType::ALL {
        let mesh = create_die_mesh(die);
        let count = mesh.count_vertices();
        assert!(count > 0, "{} has no vertices", die);
        let normals = mesh
            .attribute(Mesh::ATTRIBUTE_NORMAL)
            .unwrap_or_else(|| panic!("{} has no normals", die));
        assert_eq!(normals.len(), count, "{}", die);
    }
}
