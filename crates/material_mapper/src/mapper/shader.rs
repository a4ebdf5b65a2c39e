//! Shader-based material mapper
//!
//! Resolves materials exactly like the fixed-function mapper but hands the
//! result to the shaders as uniform blocks. Texture binding, blending and
//! depth writes are still pipeline state and are set the same way; the
//! block's textured flag mirrors whether 2D texturing was enabled.

use super::bracket::SceneBracket;
use super::error::MapperResult;
use super::heuristics::{
    self, ResolvedMaterial, GHOST_AMBIENT, GHOST_DIFFUSE, GHOST_EMISSION, GHOST_SHININESS, GHOST_SPECULAR,
};
use super::{apply_blending, bind_diffuse_texture, MapperKind, MaterialMapper};
use crate::config::MapperConfig;
use crate::render::blocks::MaterialBlock;
use crate::render::context::RenderContext;
use crate::render::lighting::SceneLighting;
use crate::render::state::{Capability, PipelineState};
use crate::render::texture::TextureLookup;
use crate::scene::{MaterialRecord, MeshAttributes};

/// Mapper for programmable pipelines
pub struct ShaderMapper<'a> {
    textures: &'a dyn TextureLookup,
    config: MapperConfig,
    bracket: SceneBracket,
}

impl<'a> ShaderMapper<'a> {
    /// Create a mapper for one scene
    pub fn new(textures: &'a dyn TextureLookup, config: MapperConfig) -> MapperResult<Self> {
        config.validate()?;
        Ok(Self {
            textures,
            config,
            bracket: SceneBracket::default(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Uniform block for the ghost appearance
    pub fn ghost_block(shaded: bool) -> MaterialBlock {
        MaterialBlock::new(GHOST_DIFFUSE, GHOST_SPECULAR, GHOST_AMBIENT, GHOST_EMISSION, GHOST_SHININESS)
            .with_flags(shaded, false, false)
    }
}

impl MaterialMapper for ShaderMapper<'_> {
    fn kind(&self) -> MapperKind {
        MapperKind::Shader
    }

    fn begin_scene(&mut self, state: &mut dyn PipelineState, context: &RenderContext) -> MapperResult<()> {
        self.bracket.begin()?;
        let lighting = SceneLighting::compute(&self.config.light, context);
        log::debug!("Scene light block: {:?}", lighting);
        state.upload_light_block(&lighting.to_block());
        Ok(())
    }

    fn end_scene(&mut self, _state: &mut dyn PipelineState) -> MapperResult<()> {
        // Lighting lives in the shaders; nothing to switch off
        self.bracket.end()
    }

    fn apply_material(
        &self,
        state: &mut dyn PipelineState,
        mesh: Option<&dyn MeshAttributes>,
        material: &MaterialRecord,
        textured: bool,
        shaded: bool,
    ) -> MapperResult<()> {
        self.bracket.require_active()?;

        let resolved = ResolvedMaterial::resolve(mesh, material, self.textures, &self.config, textured, shaded);
        log::trace!("Applying material {:?} via uniforms: {:?}", material.name, resolved);

        bind_diffuse_texture(state, &resolved);
        state.upload_material_block(&resolved.to_block());
        apply_blending(state, resolved.has_alpha);
        Ok(())
    }

    fn apply_ghost_material(
        &self,
        state: &mut dyn PipelineState,
        mesh: Option<&dyn MeshAttributes>,
        _material: &MaterialRecord,
        shaded: bool,
    ) -> MapperResult<()> {
        self.bracket.require_active()?;
        let shaded = heuristics::effective_shading(shaded, mesh);
        state.upload_material_block(&Self::ghost_block(shaded));
        state.disable(Capability::Texture2D);
        apply_blending(state, true);
        Ok(())
    }

    fn dispose(&mut self) {
        self.bracket.dispose();
    }
}
