//! Scene-side contracts consumed by the mappers
//!
//! Materials and meshes are owned by the import subsystem. The mappers only
//! read presence flags and values through the types in this module.

pub mod material;
pub mod mesh;

pub use material::{MaterialRecord, TextureKind, TextureSlot};
pub use mesh::{MeshAttributes, MeshDescriptor};
