//! Fixed-function material mapper
//!
//! Drives legacy lighting and material state: one directional light, per-face
//! material colors, color-material for vertex-colored meshes, and 2D
//! texturing on unit 0.

use super::bracket::SceneBracket;
use super::error::MapperResult;
use super::heuristics::{
    self, ResolvedMaterial, GHOST_AMBIENT, GHOST_DIFFUSE, GHOST_EMISSION, GHOST_SHININESS, GHOST_SPECULAR,
};
use super::{apply_blending, bind_diffuse_texture, MapperKind, MaterialMapper};
use crate::config::MapperConfig;
use crate::foundation::Color4;
use crate::render::context::RenderContext;
use crate::render::lighting::SceneLighting;
use crate::render::state::{
    Capability, ColorMaterialMode, Face, LightParameter, MaterialParameter, PipelineState,
    ShadeModel,
};
use crate::render::texture::TextureLookup;
use crate::scene::{MaterialRecord, MeshAttributes};

/// Light index used for the scene light
const SCENE_LIGHT: u32 = 0;

/// Mapper for the fixed-function pipeline
pub struct ClassicMapper<'a> {
    textures: &'a dyn TextureLookup,
    config: MapperConfig,
    bracket: SceneBracket,
}

impl<'a> ClassicMapper<'a> {
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

    /// True between `begin_scene` and `end_scene`
    pub fn in_scene(&self) -> bool {
        self.bracket.is_active()
    }

    fn set_lit_material(state: &mut dyn PipelineState, resolved: &ResolvedMaterial) {
        let face = Face::FrontAndBack;
        state.material_color(face, MaterialParameter::Diffuse, resolved.lit_diffuse);
        state.material_color(face, MaterialParameter::Specular, resolved.specular);
        state.material_color(face, MaterialParameter::Ambient, resolved.ambient);
        state.material_color(face, MaterialParameter::Emission, resolved.emissive);
        state.material_shininess(face, resolved.shininess);
    }
}

impl MaterialMapper for ClassicMapper<'_> {
    fn kind(&self) -> MapperKind {
        MapperKind::Classic
    }

    fn begin_scene(&mut self, state: &mut dyn PipelineState, context: &RenderContext) -> MapperResult<()> {
        self.bracket.begin()?;

        let lighting = SceneLighting::compute(&self.config.light, context);
        log::debug!(
            "Scene lighting: ambient {:.3}, diffuse {:.3}, specular {:.3}, direction {:?}",
            lighting.ambient,
            lighting.diffuse,
            lighting.specular,
            lighting.position()
        );

        state.shade_model(ShadeModel::Smooth);
        state.light_model_ambient(Color4::gray(lighting.ambient));
        state.enable(Capability::Lighting);
        state.enable(Capability::Light0);
        state.light(SCENE_LIGHT, LightParameter::Position, lighting.position());
        state.light(SCENE_LIGHT, LightParameter::Diffuse, lighting.diffuse_rgba());
        state.light(SCENE_LIGHT, LightParameter::Specular, lighting.specular_rgba());
        Ok(())
    }

    fn end_scene(&mut self, state: &mut dyn PipelineState) -> MapperResult<()> {
        self.bracket.end()?;
        state.disable(Capability::Lighting);
        Ok(())
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
        log::trace!("Applying material {:?}: {:?}", material.name, resolved);

        state.set_enabled(Capability::Lighting, resolved.shaded);

        if resolved.vertex_colors {
            state.enable(Capability::ColorMaterial);
            state.color_material(Face::FrontAndBack, ColorMaterialMode::AmbientAndDiffuse);
        } else {
            state.disable(Capability::ColorMaterial);
        }

        bind_diffuse_texture(state, &resolved);
        state.enable(Capability::Normalize);

        if resolved.shaded {
            Self::set_lit_material(state, &resolved);
        } else if !resolved.vertex_colors {
            let c = resolved.diffuse;
            state.color3(c.r, c.g, c.b);
        }

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

        apply_blending(state, true);

        if heuristics::effective_shading(shaded, mesh) {
            let face = Face::FrontAndBack;
            state.enable(Capability::Lighting);
            state.material_color(face, MaterialParameter::Diffuse, GHOST_DIFFUSE);
            state.material_color(face, MaterialParameter::Specular, GHOST_SPECULAR);
            state.material_color(face, MaterialParameter::Ambient, GHOST_AMBIENT);
            state.material_color(face, MaterialParameter::Emission, GHOST_EMISSION);
            state.material_shininess(face, GHOST_SHININESS);
        } else {
            state.disable(Capability::Lighting);
            state.color3(GHOST_DIFFUSE.r, GHOST_DIFFUSE.g, GHOST_DIFFUSE.b);
        }

        state.disable(Capability::ColorMaterial);
        state.disable(Capability::Texture2D);
        Ok(())
    }

    fn dispose(&mut self) {
        // Nothing is owned; only further use is prevented
        self.bracket.dispose();
    }
}
