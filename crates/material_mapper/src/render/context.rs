//! Per-frame inputs supplied by the renderer

use crate::foundation::math::Mat4;

/// Values the renderer refreshes once per scene render pass
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    /// Rotation applied to the fixed light direction
    pub light_rotation: Mat4,
    brightness: f32,
}

impl RenderContext {
    /// Brightness used when the viewer has no setting yet
    pub const DEFAULT_BRIGHTNESS: f32 = 50.0;

    /// Create a context; brightness is clamped to `[0, 100]`
    pub fn new(light_rotation: Mat4, brightness: f32) -> Self {
        Self {
            light_rotation,
            brightness: clamp_brightness(brightness),
        }
    }

    /// Output brightness percentage in `[0, 100]`
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Change the brightness; clamped to `[0, 100]`
    pub fn set_brightness(&mut self, brightness: f32) {
        self.brightness = clamp_brightness(brightness);
    }

    /// Replace the light rotation
    #[must_use]
    pub fn with_light_rotation(mut self, rotation: Mat4) -> Self {
        self.light_rotation = rotation;
        self
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(Mat4::identity(), Self::DEFAULT_BRIGHTNESS)
    }
}

fn clamp_brightness(value: f32) -> f32 {
    if value.is_nan() {
        RenderContext::DEFAULT_BRIGHTNESS
    } else {
        value.clamp(0.0, 100.0)
    }
}
