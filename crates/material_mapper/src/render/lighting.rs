//! Scene lighting
//!
//! The viewer lights every scene with one directional light that follows the
//! camera-independent light rotation, plus a global ambient term. Intensities
//! are grey and scale with the output brightness setting.

use crate::config::LightingConfig;
use crate::foundation::math::{transform_normal, Vec3};
use crate::render::blocks::LightBlock;
use crate::render::context::RenderContext;

/// Light direction before the renderer's rotation is applied
pub const BASE_LIGHT_DIRECTION: [f32; 3] = [1.0, 1.0, 0.0];

/// Directional light and ambient term for one render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLighting {
    /// World-space direction towards the light, not normalized
    pub direction: Vec3,
    /// Global ambient intensity
    pub ambient: f32,
    /// Diffuse intensity
    pub diffuse: f32,
    /// Specular intensity
    pub specular: f32,
}

impl SceneLighting {
    /// Derive lighting from the configured formula and this frame's context
    pub fn compute(config: &LightingConfig, context: &RenderContext) -> Self {
        let brightness = context.brightness();
        let [x, y, z] = BASE_LIGHT_DIRECTION;
        Self {
            direction: transform_normal(&context.light_rotation, Vec3::new(x, y, z)),
            ambient: config.ambient.at(brightness),
            diffuse: config.diffuse.at(brightness),
            specular: config.specular.at(brightness),
        }
    }

    /// Homogeneous light position; `w = 0` marks it directional
    pub fn position(&self) -> [f32; 4] {
        [self.direction.x, self.direction.y, self.direction.z, 0.0]
    }

    /// Ambient intensity as an opaque grey
    pub fn ambient_rgba(&self) -> [f32; 4] {
        grey(self.ambient)
    }

    /// Diffuse intensity as an opaque grey
    pub fn diffuse_rgba(&self) -> [f32; 4] {
        grey(self.diffuse)
    }

    /// Specular intensity as an opaque grey
    pub fn specular_rgba(&self) -> [f32; 4] {
        grey(self.specular)
    }

    /// Pack for the programmable pipeline
    pub fn to_block(&self) -> LightBlock {
        LightBlock {
            direction: self.position(),
            ambient: self.ambient_rgba(),
            diffuse: self.diffuse_rgba(),
            specular: self.specular_rgba(),
        }
    }
}

const fn grey(value: f32) -> [f32; 4] {
    [value, value, value, 1.0]
}
