//! Pipeline-state sink
//!
//! The mappers never call a graphics API directly. Every state change goes
//! through [`PipelineState`], which a renderer implements over its real
//! context and tests implement with [`super::RecordingState`]. The vocabulary
//! follows the legacy fixed-function API one call per method, so an OpenGL
//! compatibility-profile backend is a direct translation.

use crate::foundation::Color4;
use crate::render::blocks::{LightBlock, MaterialBlock};
use crate::render::texture::TextureHandle;

/// Toggleable pipeline capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Fixed-function lighting
    Lighting,
    /// The single directional light used by the viewer
    Light0,
    /// Vertex colors drive material reflectance
    ColorMaterial,
    /// 2D texturing on the active unit
    Texture2D,
    /// Renormalize transformed normals
    Normalize,
    /// Alpha blending
    Blend,
}

/// Polygon faces a material call applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// Front faces
    Front,
    /// Back faces
    Back,
    /// Both faces
    FrontAndBack,
}

/// Material reflectance channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialParameter {
    /// Ambient reflectance
    Ambient,
    /// Diffuse reflectance
    Diffuse,
    /// Specular reflectance
    Specular,
    /// Emitted light
    Emission,
}

/// Material channels tracked by vertex colors when color-material is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMaterialMode {
    /// Ambient and diffuse together
    AmbientAndDiffuse,
    /// Diffuse only
    Diffuse,
    /// Ambient only
    Ambient,
    /// Specular only
    Specular,
    /// Emission only
    Emission,
}

/// Interpolation of lit colors across a primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadeModel {
    /// One color per primitive
    Flat,
    /// Gouraud interpolation
    Smooth,
}

/// Per-light parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightParameter {
    /// Homogeneous position; `w = 0` makes the light directional
    Position,
    /// Ambient intensity
    Ambient,
    /// Diffuse intensity
    Diffuse,
    /// Specular intensity
    Specular,
}

/// Blend equation factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// 0
    Zero,
    /// 1
    One,
    /// Source alpha
    SrcAlpha,
    /// 1 - source alpha
    OneMinusSrcAlpha,
}

/// Mutable graphics pipeline state shared by every draw call
///
/// Implementations forward to the process-wide graphics context. Callers
/// serialize all access on one thread; `&mut self` makes that explicit.
pub trait PipelineState {
    /// Turn a capability on
    fn enable(&mut self, capability: Capability);

    /// Turn a capability off
    fn disable(&mut self, capability: Capability);

    /// Turn a capability on or off
    fn set_enabled(&mut self, capability: Capability, enabled: bool) {
        if enabled {
            self.enable(capability);
        } else {
            self.disable(capability);
        }
    }

    /// Select flat or smooth shading
    fn shade_model(&mut self, model: ShadeModel);

    /// Set the global ambient light
    fn light_model_ambient(&mut self, color: Color4);

    /// Set a parameter of light `index`
    fn light(&mut self, index: u32, parameter: LightParameter, value: [f32; 4]);

    /// Choose which material channels follow the vertex color
    fn color_material(&mut self, face: Face, mode: ColorMaterialMode);

    /// Select the active texture unit
    fn active_texture(&mut self, unit: u32);

    /// Bind a 2D texture on the active unit
    fn bind_texture(&mut self, handle: TextureHandle);

    /// Set a material reflectance channel
    fn material_color(&mut self, face: Face, parameter: MaterialParameter, color: Color4);

    /// Set the specular exponent
    fn material_shininess(&mut self, face: Face, exponent: f32);

    /// Set the current flat color used when lighting is off
    fn color3(&mut self, r: f32, g: f32, b: f32);

    /// Set blend factors
    fn blend_func(&mut self, source: BlendFactor, destination: BlendFactor);

    /// Enable or disable depth-buffer writes
    fn depth_mask(&mut self, write: bool);

    /// Upload the material uniform block for programmable pipelines
    fn upload_material_block(&mut self, block: &MaterialBlock);

    /// Upload the light uniform block for programmable pipelines
    fn upload_light_block(&mut self, block: &LightBlock);
}
