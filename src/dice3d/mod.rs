pub mod crystal_material;
pub mod meshes;
pub mod plugin;
pub mod systems;
pub mod types;

pub use crystal_material::*;
pub use meshes::*;
pub use plugin::*;
pub use systems::*;
pub use types::*;
