//! Uniform blocks for the programmable-pipeline mapper
//!
//! Layouts match std140 blocks in the viewer's shaders: every member is a
//! 16-byte vector, so no implicit padding is needed.

use bytemuck::{Pod, Zeroable};

use crate::foundation::Color4;

/// Resolved material data for shader-based rendering
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MaterialBlock {
    /// Diffuse color - RGB + alpha
    pub diffuse: [f32; 4],
    /// Specular color - RGB + alpha
    pub specular: [f32; 4],
    /// Ambient color - RGB + alpha
    pub ambient: [f32; 4],
    /// Emissive color - RGB + alpha
    pub emission: [f32; 4],
    /// Shininess exponent, lit flag, textured flag, vertex-color flag
    pub params: [f32; 4],
}

impl MaterialBlock {
    /// Pack material channels
    pub fn new(diffuse: Color4, specular: Color4, ambient: Color4, emission: Color4, shininess: f32) -> Self {
        Self {
            diffuse: diffuse.to_array(),
            specular: specular.to_array(),
            ambient: ambient.to_array(),
            emission: emission.to_array(),
            params: [shininess, 0.0, 0.0, 0.0],
        }
    }

    /// Set the lit/textured/vertex-color flags
    #[must_use]
    pub fn with_flags(mut self, lit: bool, textured: bool, vertex_colors: bool) -> Self {
        self.params[1] = flag(lit);
        self.params[2] = flag(textured);
        self.params[3] = flag(vertex_colors);
        self
    }

    /// Shininess exponent
    pub fn shininess(&self) -> f32 {
        self.params[0]
    }

    /// True when the shader should evaluate lighting
    pub fn is_lit(&self) -> bool {
        self.params[1] > 0.5
    }

    /// True when the shader should sample the diffuse texture
    pub fn is_textured(&self) -> bool {
        self.params[2] > 0.5
    }

    /// True when vertex colors replace ambient and diffuse
    pub fn uses_vertex_colors(&self) -> bool {
        self.params[3] > 0.5
    }
}

/// Scene light data for shader-based rendering
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightBlock {
    /// World-space direction towards the light, `w = 0`
    pub direction: [f32; 4],
    /// Global ambient intensity
    pub ambient: [f32; 4],
    /// Diffuse intensity
    pub diffuse: [f32; 4],
    /// Specular intensity
    pub specular: [f32; 4],
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_sizes_are_std140_friendly() {
        assert_eq!(std::mem::size_of::<MaterialBlock>(), 80);
        assert_eq!(std::mem::size_of::<LightBlock>(), 64);
        assert_eq!(bytemuck::bytes_of(&LightBlock::zeroed()).len(), 64);
    }

    #[test]
    fn test_flags() {
        let block = MaterialBlock::new(Color4::WHITE, Color4::BLACK, Color4::BLACK, Color4::BLACK, 8.0)
            .with_flags(true, false, true);
        assert!(block.is_lit());
        assert!(!block.is_textured());
        assert!(block.uses_vertex_colors());
        assert_eq!(block.shininess(), 8.0);
    }
}
