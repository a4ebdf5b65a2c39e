//! In-memory pipeline-state sink
//!
//! [`RecordingState`] keeps every call in order and folds them into a
//! [`PipelineSnapshot`]. Tests assert on either view; a renderer can also use
//! it to diff per-draw state when chasing rendering bugs.

use bitflags::bitflags;

use crate::foundation::Color4;
use crate::render::blocks::{LightBlock, MaterialBlock};
use crate::render::state::{
    BlendFactor, Capability, ColorMaterialMode, Face, LightParameter, MaterialParameter,
    PipelineState, ShadeModel,
};
use crate::render::texture::TextureHandle;

bitflags! {
    /// Set of enabled capabilities
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CapabilityFlags: u32 {
        /// Fixed-function lighting
        const LIGHTING = 1 << 0;
        /// Light 0
        const LIGHT0 = 1 << 1;
        /// Color-material
        const COLOR_MATERIAL = 1 << 2;
        /// 2D texturing
        const TEXTURE_2D = 1 << 3;
        /// Normal renormalization
        const NORMALIZE = 1 << 4;
        /// Alpha blending
        const BLEND = 1 << 5;
    }
}

impl From<Capability> for CapabilityFlags {
    fn from(capability: Capability) -> Self {
        match capability {
            Capability::Lighting => Self::LIGHTING,
            Capability::Light0 => Self::LIGHT0,
            Capability::ColorMaterial => Self::COLOR_MATERIAL,
            Capability::Texture2D => Self::TEXTURE_2D,
            Capability::Normalize => Self::NORMALIZE,
            Capability::Blend => Self::BLEND,
        }
    }
}

/// One recorded sink call
#[derive(Debug, Clone, PartialEq)]
pub enum StateCommand {
    /// `enable`
    Enable(Capability),
    /// `disable`
    Disable(Capability),
    /// `shade_model`
    ShadeModel(ShadeModel),
    /// `light_model_ambient`
    LightModelAmbient(Color4),
    /// `light`
    Light {
        /// Light index
        index: u32,
        /// Parameter
        parameter: LightParameter,
        /// Value
        value: [f32; 4],
    },
    /// `color_material`
    ColorMaterial(Face, ColorMaterialMode),
    /// `active_texture`
    ActiveTexture(u32),
    /// `bind_texture`
    BindTexture(TextureHandle),
    /// `material_color`
    MaterialColor(Face, MaterialParameter, Color4),
    /// `material_shininess`
    MaterialShininess(Face, f32),
    /// `color3`
    Color3([f32; 3]),
    /// `blend_func`
    BlendFunc(BlendFactor, BlendFactor),
    /// `depth_mask`
    DepthMask(bool),
    /// `upload_material_block`
    MaterialBlock(MaterialBlock),
    /// `upload_light_block`
    LightBlock(LightBlock),
}

/// Last value written for every piece of state
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSnapshot {
    /// Enabled capabilities
    pub enabled: CapabilityFlags,
    /// Shade model
    pub shade_model: Option<ShadeModel>,
    /// Global ambient light
    pub light_model_ambient: Option<Color4>,
    /// Light 0 position
    pub light_position: Option<[f32; 4]>,
    /// Light 0 ambient intensity
    pub light_ambient: Option<[f32; 4]>,
    /// Light 0 diffuse intensity
    pub light_diffuse: Option<[f32; 4]>,
    /// Light 0 specular intensity
    pub light_specular: Option<[f32; 4]>,
    /// Color-material face and mode
    pub color_material: Option<(Face, ColorMaterialMode)>,
    /// Active texture unit
    pub active_texture_unit: u32,
    /// Bound texture
    pub bound_texture: Option<TextureHandle>,
    /// Material ambient reflectance
    pub ambient: Option<Color4>,
    /// Material diffuse reflectance
    pub diffuse: Option<Color4>,
    /// Material specular reflectance
    pub specular: Option<Color4>,
    /// Material emission
    pub emission: Option<Color4>,
    /// Specular exponent
    pub shininess: Option<f32>,
    /// Flat color
    pub color: Option<[f32; 3]>,
    /// Blend factors
    pub blend_func: Option<(BlendFactor, BlendFactor)>,
    /// Depth writes
    pub depth_write: bool,
    /// Last material uniform block
    pub material_block: Option<MaterialBlock>,
    /// Last light uniform block
    pub light_block: Option<LightBlock>,
}

impl Default for PipelineSnapshot {
    fn default() -> Self {
        // Depth writes start enabled, everything else starts off or unset
        Self {
            enabled: CapabilityFlags::empty(),
            shade_model: None,
            light_model_ambient: None,
            light_position: None,
            light_ambient: None,
            light_diffuse: None,
            light_specular: None,
            color_material: None,
            active_texture_unit: 0,
            bound_texture: None,
            ambient: None,
            diffuse: None,
            specular: None,
            emission: None,
            shininess: None,
            color: None,
            blend_func: None,
            depth_write: true,
            material_block: None,
            light_block: None,
        }
    }
}

impl PipelineSnapshot {
    /// True when `capability` is currently enabled
    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.enabled.contains(capability.into())
    }

    fn apply(&mut self, command: &StateCommand) {
        match *command {
            StateCommand::Enable(cap) => self.enabled.insert(cap.into()),
            StateCommand::Disable(cap) => self.enabled.remove(cap.into()),
            StateCommand::ShadeModel(model) => self.shade_model = Some(model),
            StateCommand::LightModelAmbient(color) => self.light_model_ambient = Some(color),
            StateCommand::Light { index, parameter, value } => {
                // Only light 0 is tracked
                if index == 0 {
                    let slot = match parameter {
                        LightParameter::Position => &mut self.light_position,
                        LightParameter::Ambient => &mut self.light_ambient,
                        LightParameter::Diffuse => &mut self.light_diffuse,
                        LightParameter::Specular => &mut self.light_specular,
                    };
                    *slot = Some(value);
                }
            }
            StateCommand::ColorMaterial(face, mode) => self.color_material = Some((face, mode)),
            StateCommand::ActiveTexture(unit) => self.active_texture_unit = unit,
            StateCommand::BindTexture(handle) => self.bound_texture = Some(handle),
            StateCommand::MaterialColor(_, parameter, color) => {
                let slot = match parameter {
                    MaterialParameter::Ambient => &mut self.ambient,
                    MaterialParameter::Diffuse => &mut self.diffuse,
                    MaterialParameter::Specular => &mut self.specular,
                    MaterialParameter::Emission => &mut self.emission,
                };
                *slot = Some(color);
            }
            StateCommand::MaterialShininess(_, exponent) => self.shininess = Some(exponent),
            StateCommand::Color3(rgb) => self.color = Some(rgb),
            StateCommand::BlendFunc(src, dst) => self.blend_func = Some((src, dst)),
            StateCommand::DepthMask(write) => self.depth_write = write,
            StateCommand::MaterialBlock(block) => self.material_block = Some(block),
            StateCommand::LightBlock(block) => self.light_block = Some(block),
        }
    }
}

/// Pipeline-state sink that records instead of rendering
#[derive(Debug, Clone, Default)]
pub struct RecordingState {
    commands: Vec<StateCommand>,
    snapshot: PipelineSnapshot,
}

impl RecordingState {
    /// Create an empty recorder with default pipeline state
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call recorded since creation or the last `clear_commands`
    pub fn commands(&self) -> &[StateCommand] {
        &self.commands
    }

    /// Current folded state
    pub fn snapshot(&self) -> &PipelineSnapshot {
        &self.snapshot
    }

    /// True when `capability` is currently enabled
    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.snapshot.is_enabled(capability)
    }

    /// Drop the command log but keep the folded state
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Reset to default pipeline state and an empty log
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn record(&mut self, command: StateCommand) {
        log::trace!("pipeline state: {:?}", command);
        self.snapshot.apply(&command);
        self.commands.push(command);
    }
}

impl PipelineState for RecordingState {
    fn enable(&mut self, capability: Capability) {
        self.record(StateCommand::Enable(capability));
    }

    fn disable(&mut self, capability: Capability) {
        self.record(StateCommand::Disable(capability));
    }

    fn shade_model(&mut self, model: ShadeModel) {
        self.record(StateCommand::ShadeModel(model));
    }

    fn light_model_ambient(&mut self, color: Color4) {
        self.record(StateCommand::LightModelAmbient(color));
    }

    fn light(&mut self, index: u32, parameter: LightParameter, value: [f32; 4]) {
        self.record(StateCommand::Light { index, parameter, value });
    }

    fn color_material(&mut self, face: Face, mode: ColorMaterialMode) {
        self.record(StateCommand::ColorMaterial(face, mode));
    }

    fn active_texture(&mut self, unit: u32) {
        self.record(StateCommand::ActiveTexture(unit));
    }

    fn bind_texture(&mut self, handle: TextureHandle) {
        self.record(StateCommand::BindTexture(handle));
    }

    fn material_color(&mut self, face: Face, parameter: MaterialParameter, color: Color4) {
        self.record(StateCommand::MaterialColor(face, parameter, color));
    }

    fn material_shininess(&mut self, face: Face, exponent: f32) {
        self.record(StateCommand::MaterialShininess(face, exponent));
    }

    fn color3(&mut self, r: f32, g: f32, b: f32) {
        self.record(StateCommand::Color3([r, g, b]));
    }

    fn blend_func(&mut self, source: BlendFactor, destination: BlendFactor) {
        self.record(StateCommand::BlendFunc(source, destination));
    }

    fn depth_mask(&mut self, write: bool) {
        self.record(StateCommand::DepthMask(write));
    }

    fn upload_material_block(&mut self, block: &MaterialBlock) {
        self.record(StateCommand::MaterialBlock(*block));
    }

    fn upload_light_block(&mut self, block: &LightBlock) {
        self.record(StateCommand::LightBlock(*block));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = RecordingState::new();
        assert!(state.commands().is_empty());
        assert!(state.snapshot().enabled.is_empty());
        assert!(state.snapshot().depth_write);
    }

    #[test]
    fn test_enable_disable_folds_into_flags() {
        let mut state = RecordingState::new();
        state.enable(Capability::Lighting);
        state.enable(Capability::Blend);
        state.set_enabled(Capability::Blend, false);

        assert!(state.is_enabled(Capability::Lighting));
        assert!(!state.is_enabled(Capability::Blend));
        assert_eq!(
            state.commands(),
            &[
                StateCommand::Enable(Capability::Lighting),
                StateCommand::Enable(Capability::Blend),
                StateCommand::Disable(Capability::Blend),
            ]
        );
    }

    #[test]
    fn test_material_channels_tracked_separately() {
        let mut state = RecordingState::new();
        state.material_color(Face::FrontAndBack, MaterialParameter::Diffuse, Color4::WHITE);
        state.material_color(Face::FrontAndBack, MaterialParameter::Emission, Color4::BLACK);

        assert_eq!(state.snapshot().diffuse, Some(Color4::WHITE));
        assert_eq!(state.snapshot().emission, Some(Color4::BLACK));
        assert_eq!(state.snapshot().specular, None);
    }

    #[test]
    fn test_clear_commands_keeps_state() {
        let mut state = RecordingState::new();
        state.depth_mask(false);
        state.clear_commands();
        assert!(state.commands().is_empty());
        assert!(!state.snapshot().depth_write);

        state.reset();
        assert!(state.snapshot().depth_write);
    }
}
