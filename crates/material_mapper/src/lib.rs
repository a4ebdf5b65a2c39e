//! # Material Mapper
//!
//! Translates imported scene materials into the pipeline state a viewer needs
//! to draw them, covering both fixed-function and shader-based rendering.
//!
//! ## Features
//!
//! - **Importer fix-ups**: Missing or bogus colors, zero alpha and black
//!   textured materials are repaired before they reach the GPU
//! - **Two pipelines**: Fixed-function state or uniform blocks, chosen from
//!   renderer capabilities
//! - **Draw ordering**: Alpha classification that agrees with the blend state
//! - **Configurable presets**: Classic and revised heuristics, loadable from
//!   TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use material_mapper::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let textures = TextureSet::new();
//!     let mut mapper = create_mapper(&RendererCaps::fixed_function(), &textures, MapperConfig::default())?;
//!     let mut state = RecordingState::new();
//!
//!     mapper.begin_scene(&mut state, &RenderContext::default())?;
//!     let mesh = MeshDescriptor::new().with_normals();
//!     let material = MaterialRecord::new("floor").with_diffuse(Color4::rgb(0.8, 0.8, 0.8));
//!     mapper.apply_material(&mut state, Some(&mesh), &material, true, true)?;
//!     mapper.end_scene(&mut state)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod mapper;
pub mod render;
pub mod scene;

/// Common imports for mapper users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, MapperConfig},
        foundation::{math::Mat4, Color4},
        mapper::{
            create_mapper, is_alpha_material, ClassicMapper, MapperError, MapperKind, MapperResult,
            MaterialMapper, RendererCaps, ShaderMapper,
        },
        render::{PipelineState, RecordingState, RenderContext, TextureHandle, TextureLookup, TextureSet},
        scene::{MaterialRecord, MeshAttributes, MeshDescriptor, TextureKind},
    };
}
