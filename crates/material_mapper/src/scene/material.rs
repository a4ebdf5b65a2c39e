//! Imported material record
//!
//! Mirrors what asset importers expose: every color and scalar property is
//! optional, and presence is meaningful on its own. Several importers report
//! a property as present with a zero value when the source file had none,
//! which is why the mappers treat some present values as missing data.

use crate::foundation::Color4;

/// Texture slot semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// Base color map
    Diffuse,
    /// Specular color map
    Specular,
    /// Ambient color map
    Ambient,
    /// Self-illumination map
    Emissive,
    /// Height map
    Height,
    /// Tangent-space normal map
    Normals,
    /// Glossiness map
    Shininess,
    /// Transparency map
    Opacity,
    /// Displacement map
    Displacement,
    /// Baked lighting map
    Lightmap,
    /// Environment reflection map
    Reflection,
    /// Anything the importer could not classify
    Unknown,
}

/// Texture reference inside a material
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSlot {
    /// Slot semantics
    pub kind: TextureKind,
    /// File path as written in the source asset
    pub path: String,
}

impl TextureSlot {
    /// Create a texture slot
    pub fn new(kind: TextureKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// Material properties with presence flags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialRecord {
    /// Material name
    pub name: String,
    /// Diffuse color
    pub diffuse: Option<Color4>,
    /// Specular color
    pub specular: Option<Color4>,
    /// Ambient color
    pub ambient: Option<Color4>,
    /// Emissive color
    pub emissive: Option<Color4>,
    /// Opacity, 0.0 = invisible and 1.0 = opaque
    pub opacity: Option<f32>,
    /// Phong specular exponent
    pub shininess: Option<f32>,
    /// Multiplier for the specular exponent
    pub shininess_strength: Option<f32>,
    /// Texture slots in import order
    pub textures: Vec<TextureSlot>,
}

impl MaterialRecord {
    /// Create a material with no declared properties
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Declare a diffuse color
    #[must_use]
    pub fn with_diffuse(mut self, color: Color4) -> Self {
        self.diffuse = Some(color);
        self
    }

    /// Declare a specular color
    #[must_use]
    pub fn with_specular(mut self, color: Color4) -> Self {
        self.specular = Some(color);
        self
    }

    /// Declare an ambient color
    #[must_use]
    pub fn with_ambient(mut self, color: Color4) -> Self {
        self.ambient = Some(color);
        self
    }

    /// Declare an emissive color
    #[must_use]
    pub fn with_emissive(mut self, color: Color4) -> Self {
        self.emissive = Some(color);
        self
    }

    /// Declare an opacity
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Declare a specular exponent
    #[must_use]
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = Some(shininess);
        self
    }

    /// Declare a specular exponent multiplier
    #[must_use]
    pub fn with_shininess_strength(mut self, strength: f32) -> Self {
        self.shininess_strength = Some(strength);
        self
    }

    /// Append a texture slot
    #[must_use]
    pub fn with_texture(mut self, kind: TextureKind, path: impl Into<String>) -> Self {
        self.textures.push(TextureSlot::new(kind, path));
        self
    }

    /// Number of texture slots of `kind`
    pub fn texture_count(&self, kind: TextureKind) -> usize {
        self.textures.iter().filter(|slot| slot.kind == kind).count()
    }

    /// The `index`-th texture slot of `kind`
    pub fn texture(&self, kind: TextureKind, index: usize) -> Option<&TextureSlot> {
        self.textures.iter().filter(|slot| slot.kind == kind).nth(index)
    }

    /// True when the material references a transparency map
    pub fn has_opacity_texture(&self) -> bool {
        self.texture_count(TextureKind::Opacity) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_material_declares_nothing() {
        let mat = MaterialRecord::new("Plain");
        assert_eq!(mat.name, "Plain");
        assert!(mat.diffuse.is_none());
        assert!(mat.opacity.is_none());
        assert_eq!(mat.texture_count(TextureKind::Diffuse), 0);
        assert!(!mat.has_opacity_texture());
    }

    #[test]
    fn test_texture_lookup_by_kind() {
        let mat = MaterialRecord::new("Layered")
            .with_texture(TextureKind::Normals, "n.png")
            .with_texture(TextureKind::Diffuse, "base.png")
            .with_texture(TextureKind::Diffuse, "detail.png")
            .with_texture(TextureKind::Opacity, "mask.png");

        assert_eq!(mat.texture_count(TextureKind::Diffuse), 2);
        assert_eq!(mat.texture(TextureKind::Diffuse, 0).unwrap().path, "base.png");
        assert_eq!(mat.texture(TextureKind::Diffuse, 1).unwrap().path, "detail.png");
        assert!(mat.texture(TextureKind::Diffuse, 2).is_none());
        assert!(mat.has_opacity_texture());
    }
}
