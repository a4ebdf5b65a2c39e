//! # Material Mappers
//!
//! A mapper turns one imported material into the pipeline state needed to
//! draw a mesh with it. The renderer drives it once per frame:
//!
//! ```text
//! begin_scene
//!   apply_material / apply_ghost_material   (once per draw call)
//! end_scene
//! ```
//!
//! Two implementations share [`heuristics`]:
//!
//! - [`ClassicMapper`] for the fixed-function pipeline
//! - [`ShaderMapper`] for programmable pipelines, which receive the same
//!   resolved values as uniform blocks
//!
//! [`create_mapper`] picks one from the detected renderer capabilities.

mod bracket;
mod classic;
mod error;
pub mod heuristics;
mod shader;


pub use classic::ClassicMapper;
pub use error::{MapperError, MapperResult};
pub use heuristics::{is_alpha_material, ResolvedMaterial};
pub use shader::ShaderMapper;

use crate::config::MapperConfig;
use crate::render::context::RenderContext;
use crate::render::state::{BlendFactor, Capability, PipelineState};
use crate::render::texture::{LoadState, TextureLookup};
use crate::scene::{MaterialRecord, MeshAttributes};

/// Which mapper implementation is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapperKind {
    /// Fixed-function lighting and material state
    Classic,
    /// Uniform blocks for shader-based rendering
    Shader,
}

/// Translate imported materials into pipeline state
pub trait MaterialMapper {
    /// Which implementation this is
    fn kind(&self) -> MapperKind;

    /// Set up scene-wide lighting. Must be matched by [`Self::end_scene`].
    fn begin_scene(&mut self, state: &mut dyn PipelineState, context: &RenderContext) -> MapperResult<()>;

    /// Tear down scene-wide lighting
    fn end_scene(&mut self, state: &mut dyn PipelineState) -> MapperResult<()>;

    /// Configure state to draw `mesh` with `material`.
    ///
    /// `mesh` may be `None` when the caller has no attribute information; it
    /// is then treated as having normals and no vertex colors.
    fn apply_material(
        &self,
        state: &mut dyn PipelineState,
        mesh: Option<&dyn MeshAttributes>,
        material: &MaterialRecord,
        textured: bool,
        shaded: bool,
    ) -> MapperResult<()>;

    /// Configure the fixed translucent preview appearance. `material` is
    /// accepted for interface symmetry and ignored.
    fn apply_ghost_material(
        &self,
        state: &mut dyn PipelineState,
        mesh: Option<&dyn MeshAttributes>,
        material: &MaterialRecord,
        shaded: bool,
    ) -> MapperResult<()>;

    /// Release the mapper. Nothing is owned; later calls fail with
    /// [`MapperError::Disposed`].
    fn dispose(&mut self);
}

/// Renderer capabilities relevant to mapper selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RendererCaps {
    /// The context can run GLSL programs
    pub supports_shaders: bool,
    /// The user asked for the legacy path anyway
    pub prefer_fixed_function: bool,
}

impl RendererCaps {
    /// Context without programmable stages
    pub const fn fixed_function() -> Self {
        Self {
            supports_shaders: false,
            prefer_fixed_function: false,
        }
    }

    /// Context with programmable stages
    pub const fn programmable() -> Self {
        Self {
            supports_shaders: true,
            prefer_fixed_function: false,
        }
    }

    /// Derive capabilities from a context version. GLSL is core from 2.0.
    pub const fn from_gl_version(major: u32, _minor: u32) -> Self {
        Self {
            supports_shaders: major >= 2,
            prefer_fixed_function: false,
        }
    }

    /// Force the fixed-function mapper
    #[must_use]
    pub const fn with_fixed_function_preference(mut self, prefer: bool) -> Self {
        self.prefer_fixed_function = prefer;
        self
    }

    /// Mapper these capabilities select
    pub const fn mapper_kind(&self) -> MapperKind {
        if self.supports_shaders && !self.prefer_fixed_function {
            MapperKind::Shader
        } else {
            MapperKind::Classic
        }
    }
}

/// Create the mapper matching `caps` for one scene
pub fn create_mapper<'a>(
    caps: &RendererCaps,
    textures: &'a dyn TextureLookup,
    config: MapperConfig,
) -> MapperResult<Box<dyn MaterialMapper + 'a>> {
    let kind = caps.mapper_kind();
    log::debug!("Creating {:?} material mapper for {:?}", kind, caps);
    Ok(match kind {
        MapperKind::Classic => Box::new(ClassicMapper::new(textures, config)?),
        MapperKind::Shader => Box::new(ShaderMapper::new(textures, config)?),
    })
}

/// Blend and depth-write state for translucent or opaque geometry.
///
/// Set on every draw; the state is shared by all meshes.
pub(crate) fn apply_blending(state: &mut dyn PipelineState, has_alpha: bool) {
    if has_alpha {
        state.enable(Capability::Blend);
        state.blend_func(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);
        state.depth_mask(false);
    } else {
        state.disable(Capability::Blend);
        state.depth_mask(true);
    }
}

/// Texture unit the diffuse map is bound to
const DIFFUSE_UNIT: u32 = 0;

/// Bind the diffuse texture on unit 0 and enable 2D texturing when it is on
/// the GPU; otherwise disable texturing for this draw.
pub(crate) fn bind_diffuse_texture(state: &mut dyn PipelineState, resolved: &ResolvedMaterial) {
    let Some(texture) = &resolved.texture else {
        state.disable(Capability::Texture2D);
        return;
    };

    match texture.state {
        LoadState::Ready(handle) => {
            state.active_texture(DIFFUSE_UNIT);
            state.bind_texture(handle);
            state.enable(Capability::Texture2D);
        }
        LoadState::Pending | LoadState::Failed => {
            // Draw untextured this frame; a later frame picks it up once uploaded
            log::debug!("Texture {:?} not ready ({:?}), drawing untextured", texture.path, texture.state);
            state.disable(Capability::Texture2D);
        }
    }
}
