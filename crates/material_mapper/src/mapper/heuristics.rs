//! Material heuristics shared by every mapper
//!
//! Importers are lossy. Many report a property as present with a zero value
//! when the source file had none (OBJ/MTL opacity and ambient are the usual
//! offenders), and some export black base colors for textured materials.
//! The functions here turn a [`MaterialRecord`] into the colors that should
//! actually be drawn. They are pure so that the fixed-function mapper, the
//! shader mapper and draw ordering all agree.

use crate::config::{MapperConfig, OpacityRule, TextureAlphaSource};
use crate::foundation::Color4;
use crate::render::blocks::MaterialBlock;
use crate::render::texture::{ResolvedTexture, TextureHandle, TextureLookup};
use crate::scene::{MaterialRecord, MeshAttributes, TextureKind};

/// Diffuse color when the material declares none
pub const DEFAULT_DIFFUSE: Color4 = Color4::gray(0.5);

/// Channels below this count as black for the textured-diffuse fix
pub const NEAR_BLACK_EPSILON: f32 = 1e-3;

/// Largest specular exponent fixed-function lighting accepts
pub const MAX_SHININESS: f32 = 128.0;

/// Ghost material diffuse
pub const GHOST_DIFFUSE: Color4 = Color4::new(0.6, 0.6, 0.9, 0.15);

/// Ghost material specular
pub const GHOST_SPECULAR: Color4 = Color4::new(1.0, 1.0, 1.0, 0.4);

/// Ghost material ambient
pub const GHOST_AMBIENT: Color4 = Color4::new(0.2, 0.2, 0.2, 0.1);

/// Ghost material emission
pub const GHOST_EMISSION: Color4 = Color4::new(0.0, 0.0, 0.0, 0.0);

/// Ghost material specular exponent
pub const GHOST_SHININESS: f32 = 16.0;

/// Lighting only makes sense when the mesh has normals. An unknown mesh is
/// assumed to have them.
pub fn effective_shading(shaded: bool, mesh: Option<&dyn MeshAttributes>) -> bool {
    shaded && mesh.map_or(true, |m| m.has_normals())
}

/// True when vertex-color channel 0 should drive ambient and diffuse
pub fn uses_vertex_colors(mesh: Option<&dyn MeshAttributes>) -> bool {
    mesh.is_some_and(|m| m.has_vertex_colors(0))
}

/// Opacity multiplier for every material channel
pub fn opacity_factor(material: &MaterialRecord, config: &MapperConfig) -> f32 {
    let Some(opacity) = material.opacity else {
        return 1.0;
    };
    let threshold = config.alpha_suppression_threshold;

    match config.opacity_rule {
        OpacityRule::PreserveExactOne => {
            if opacity > threshold && opacity != 1.0 {
                opacity
            } else {
                1.0
            }
        }
        OpacityRule::SnapToOpaque => {
            if opacity.is_nan() || opacity <= threshold {
                1.0
            } else {
                opacity
            }
        }
    }
}

/// Declared color unless the material is the importer's placeholder
fn declared_color(color: Option<Color4>, material: &MaterialRecord, config: &MapperConfig) -> Option<Color4> {
    color.filter(|_| !config.is_placeholder(&material.name))
}

/// Diffuse color with near-zero alpha treated as missing, times opacity
pub fn resolve_diffuse(material: &MaterialRecord, config: &MapperConfig, opacity: f32) -> Color4 {
    let mut color = DEFAULT_DIFFUSE;
    if let Some(declared) = declared_color(material.diffuse, material, config) {
        color = declared;
        if color.a <= config.alpha_suppression_threshold {
            color.a = 1.0;
        }
    }
    color.a *= opacity;
    color
}

/// Specular color; a declared pure black keeps the default
pub fn resolve_specular(material: &MaterialRecord, config: &MapperConfig, opacity: f32) -> Color4 {
    let mut color = declared_color(material.specular, material, config)
        .filter(|c| !c.is_black())
        .unwrap_or(config.default_specular);
    if config.specular_alpha_from_opacity {
        color.a *= opacity;
    }
    color
}

/// Remap one channel from `[0, 1]` into `[floor, 1]`
pub fn shift_ambient_channel(value: f32, floor: f32) -> f32 {
    value * (1.0 - floor) + floor
}

/// Ambient color, never darker than the configured floor
pub fn resolve_ambient(material: &MaterialRecord, config: &MapperConfig, opacity: f32) -> Color4 {
    let floor = config.ambient_floor;
    let mut color = material
        .ambient
        .map_or(Color4::gray(floor), |c| c.map_rgb(|v| shift_ambient_channel(v, floor)));
    color.a *= opacity;
    color
}

/// Emissive color; a declared pure black is the same as none
pub fn resolve_emissive(material: &MaterialRecord) -> Color4 {
    material
        .emissive
        .filter(|c| !c.is_black())
        .unwrap_or(Color4::BLACK)
}

/// Specular exponent times strength, clamped to [`MAX_SHININESS`]
pub fn shininess_exponent(material: &MaterialRecord) -> f32 {
    let shininess = material.shininess.filter(|&s| s > 0.0).unwrap_or(1.0);
    let strength = material.shininess_strength.filter(|&s| s > 0.0).unwrap_or(1.0);
    (shininess * strength).min(MAX_SHININESS)
}

/// Look up the first diffuse texture, if texturing was requested
pub fn resolve_diffuse_texture(
    material: &MaterialRecord,
    textures: &dyn TextureLookup,
    textured: bool,
) -> Option<ResolvedTexture> {
    if !textured {
        return None;
    }
    material
        .texture(TextureKind::Diffuse, 0)
        .map(|slot| textures.resolve(&slot.path))
}

/// Whether the diffuse texture makes the material translucent
pub fn texture_alpha(material: &MaterialRecord, texture: &ResolvedTexture, config: &MapperConfig) -> bool {
    match config.texture_alpha_source {
        TextureAlphaSource::TextureAlphaState => texture.has_alpha(),
        TextureAlphaSource::MaterialOpacityTexture => material.has_opacity_texture(),
    }
}

/// Everything a mapper needs to draw one material
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMaterial {
    /// Lighting is on for this draw
    pub shaded: bool,
    /// Vertex colors drive ambient and diffuse
    pub vertex_colors: bool,
    /// Diffuse texture lookup, present when texturing was requested and the
    /// material has a diffuse slot
    pub texture: Option<ResolvedTexture>,
    /// Opacity multiplier
    pub opacity: f32,
    /// Derived diffuse; used as the flat color when unlit
    pub diffuse: Color4,
    /// Diffuse handed to lighting, after the black-textured fix
    pub lit_diffuse: Color4,
    /// Specular reflectance
    pub specular: Color4,
    /// Ambient reflectance
    pub ambient: Color4,
    /// Emission
    pub emissive: Color4,
    /// Specular exponent
    pub shininess: f32,
    /// Needs blending and no depth writes
    pub has_alpha: bool,
}

impl ResolvedMaterial {
    /// Apply every heuristic to `material` for one draw
    pub fn resolve(
        mesh: Option<&dyn MeshAttributes>,
        material: &MaterialRecord,
        textures: &dyn TextureLookup,
        config: &MapperConfig,
        textured: bool,
        shaded: bool,
    ) -> Self {
        let shaded = effective_shading(shaded, mesh);
        let texture = resolve_diffuse_texture(material, textures, textured);
        let texture_has_alpha = texture
            .as_ref()
            .is_some_and(|t| texture_alpha(material, t, config));

        let opacity = opacity_factor(material, config);
        let diffuse = resolve_diffuse(material, config, opacity);
        let has_alpha = texture_has_alpha || diffuse.a < 1.0;

        // Black base color under a texture is almost always an export flaw
        let lit_diffuse = if texture.is_some() && diffuse.is_near_black(NEAR_BLACK_EPSILON) {
            Color4::WHITE.with_alpha(opacity)
        } else {
            diffuse
        };

        Self {
            shaded,
            vertex_colors: uses_vertex_colors(mesh),
            texture,
            opacity,
            diffuse,
            lit_diffuse,
            specular: resolve_specular(material, config, opacity),
            ambient: resolve_ambient(material, config, opacity),
            emissive: resolve_emissive(material),
            shininess: shininess_exponent(material),
            has_alpha,
        }
    }

    /// Handle to bind, if the diffuse texture is on the GPU
    pub fn texture_handle(&self) -> Option<TextureHandle> {
        self.texture.as_ref().and_then(ResolvedTexture::handle)
    }

    /// Pack for the programmable pipeline
    pub fn to_block(&self) -> MaterialBlock {
        let diffuse = if self.shaded { self.lit_diffuse } else { self.diffuse };
        MaterialBlock::new(diffuse, self.specular, self.ambient, self.emissive, self.shininess).with_flags(
            self.shaded,
            self.texture_handle().is_some(),
            self.vertex_colors,
        )
    }
}

/// True when drawing `material` textured will enable blending
///
/// Renderers use this to draw translucent meshes after opaque ones. It
/// agrees with `apply_material(.., textured = true, ..)` by construction.
pub fn is_alpha_material(material: &MaterialRecord, textures: &dyn TextureLookup, config: &MapperConfig) -> bool {
    ResolvedMaterial::resolve(None, material, textures, config, true, false).has_alpha
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::texture::{AlphaState, TextureSet};
    use crate::scene::MeshDescriptor;
    use approx::assert_relative_eq;

    fn revised() -> MapperConfig {
        MapperConfig::revised()
    }

    fn classic() -> MapperConfig {
        MapperConfig::classic()
    }

    #[test]
    fn test_shading_requires_normals() {
        let lit = MeshDescriptor::new().with_normals();
        let bare = MeshDescriptor::new();
        assert!(effective_shading(true, Some(&lit)));
        assert!(!effective_shading(true, Some(&bare)));
        assert!(!effective_shading(false, Some(&lit)));
        assert!(effective_shading(true, None));
    }

    #[test]
    fn test_opacity_absent_is_opaque() {
        let mat = MaterialRecord::new("m");
        assert_eq!(opacity_factor(&mat, &revised()), 1.0);
        assert_eq!(opacity_factor(&mat, &classic()), 1.0);
    }

    #[test]
    fn test_opacity_rules_differ_only_near_zero() {
        let half = MaterialRecord::new("m").with_opacity(0.5);
        assert_eq!(opacity_factor(&half, &revised()), 0.5);
        assert_eq!(opacity_factor(&half, &classic()), 0.5);

        let zero = MaterialRecord::new("m").with_opacity(0.0);
        assert_eq!(opacity_factor(&zero, &revised()), 1.0);
        assert_eq!(opacity_factor(&zero, &classic()), 1.0);

        let tiny = MaterialRecord::new("m").with_opacity(0.005);
        assert_eq!(opacity_factor(&tiny, &revised()), 1.0);
        assert_eq!(opacity_factor(&tiny, &classic()), 1.0);

        let one = MaterialRecord::new("m").with_opacity(1.0);
        assert_eq!(opacity_factor(&one, &revised()), 1.0);
        assert_eq!(opacity_factor(&one, &classic()), 1.0);

        let nan = MaterialRecord::new("m").with_opacity(f32::NAN);
        assert_eq!(opacity_factor(&nan, &revised()), 1.0);
        assert_eq!(opacity_factor(&nan, &classic()), 1.0);
    }

    #[test]
    fn test_diffuse_default_and_suppression() {
        let config = revised();
        assert_eq!(resolve_diffuse(&MaterialRecord::new("m"), &config, 1.0), DEFAULT_DIFFUSE);

        let zero_alpha = MaterialRecord::new("m").with_diffuse(Color4::new(0.1, 0.2, 0.3, 0.0));
        assert_eq!(
            resolve_diffuse(&zero_alpha, &config, 1.0),
            Color4::new(0.1, 0.2, 0.3, 1.0)
        );

        let translucent = MaterialRecord::new("m").with_diffuse(Color4::new(1.0, 0.0, 0.0, 0.5));
        assert_relative_eq!(resolve_diffuse(&translucent, &config, 0.5).a, 0.25);
    }

    #[test]
    fn test_diffuse_alpha_at_threshold_counts_as_missing() {
        let config = revised();
        let at_threshold = MaterialRecord::new("m")
            .with_diffuse(Color4::new(0.3, 0.3, 0.3, config.alpha_suppression_threshold));

        assert_eq!(resolve_diffuse(&at_threshold, &config, 1.0).a, 1.0);

        let textures = TextureSet::new();
        let resolved = ResolvedMaterial::resolve(None, &at_threshold, &textures, &config, true, true);
        assert_eq!(resolved.diffuse, Color4::new(0.3, 0.3, 0.3, 1.0));
        assert!(!resolved.has_alpha);
        assert!(!is_alpha_material(&at_threshold, &textures, &config));
    }

    #[test]
    fn test_placeholder_material_colors_ignored() {
        let mat = MaterialRecord::new("DefaultMaterial")
            .with_diffuse(Color4::rgb(1.0, 0.0, 0.0))
            .with_specular(Color4::rgb(0.0, 1.0, 0.0));

        assert_eq!(resolve_diffuse(&mat, &revised(), 1.0), DEFAULT_DIFFUSE);
        assert_eq!(resolve_specular(&mat, &revised(), 1.0), Color4::gray(0.5));
        assert_eq!(resolve_diffuse(&mat, &classic(), 1.0), Color4::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_specular_black_keeps_default() {
        let black = MaterialRecord::new("m").with_specular(Color4::BLACK);
        assert_eq!(resolve_specular(&black, &classic(), 1.0), Color4::WHITE);

        let red = MaterialRecord::new("m").with_specular(Color4::rgb(1.0, 0.0, 0.0));
        assert_eq!(resolve_specular(&red, &revised(), 0.5), Color4::new(1.0, 0.0, 0.0, 0.5));
        assert_eq!(resolve_specular(&red, &classic(), 0.5), Color4::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ambient_shift_fixed_points_and_monotonic() {
        for floor in [0.0, 0.2, 0.8, 1.0] {
            assert_relative_eq!(shift_ambient_channel(0.0, floor), floor);
            assert_relative_eq!(shift_ambient_channel(1.0, floor), 1.0, epsilon = 1e-6);

            let mut previous = shift_ambient_channel(0.0, floor);
            for step in 1..=100 {
                let value = shift_ambient_channel(step as f32 / 100.0, floor);
                assert!(value >= previous, "not monotonic at floor {floor}, step {step}");
                previous = value;
            }
        }
    }

    #[test]
    fn test_ambient_declared_black_yields_floor() {
        let config = revised();
        let black = MaterialRecord::new("m").with_ambient(Color4::BLACK);
        assert_eq!(resolve_ambient(&black, &config, 1.0), Color4::gray(0.2));
        assert_eq!(resolve_ambient(&MaterialRecord::new("m"), &config, 1.0), Color4::gray(0.2));

        let half = MaterialRecord::new("m").with_ambient(Color4::rgb(0.5, 0.0, 1.0));
        let shifted = resolve_ambient(&half, &config, 0.5);
        assert_relative_eq!(shifted.r, 0.6, epsilon = 1e-6);
        assert_relative_eq!(shifted.g, 0.2, epsilon = 1e-6);
        assert_relative_eq!(shifted.b, 1.0, epsilon = 1e-6);
        assert_relative_eq!(shifted.a, 0.5);
    }

    #[test]
    fn test_emissive() {
        assert_eq!(resolve_emissive(&MaterialRecord::new("m")), Color4::BLACK);
        let black = MaterialRecord::new("m").with_emissive(Color4::new(0.0, 0.0, 0.0, 0.3));
        assert_eq!(resolve_emissive(&black), Color4::BLACK);
        let glow = MaterialRecord::new("m").with_emissive(Color4::new(0.2, 0.1, 0.0, 0.3));
        assert_eq!(resolve_emissive(&glow), Color4::new(0.2, 0.1, 0.0, 0.3));
    }

    #[test]
    fn test_shininess_defaults_and_clamp() {
        assert_eq!(shininess_exponent(&MaterialRecord::new("m")), 1.0);
        assert_eq!(shininess_exponent(&MaterialRecord::new("m").with_shininess(-4.0)), 1.0);
        assert_eq!(
            shininess_exponent(&MaterialRecord::new("m").with_shininess(20.0).with_shininess_strength(2.0)),
            40.0
        );

        for (shininess, strength) in [(128.0, 1.0), (64.0, 2.0), (500.0, 0.5), (1000.0, 3.0)] {
            let mat = MaterialRecord::new("m")
                .with_shininess(shininess)
                .with_shininess_strength(strength);
            assert_eq!(shininess_exponent(&mat), MAX_SHININESS);
        }
    }

    #[test]
    fn test_texture_alpha_source() {
        let mut set = TextureSet::new();
        set.add("leaf.png");
        set.set_alpha("leaf.png", AlphaState::HasAlpha);

        let mat = MaterialRecord::new("leaf").with_texture(TextureKind::Diffuse, "leaf.png");
        let texture = set.resolve("leaf.png");

        assert!(texture_alpha(&mat, &texture, &classic()));
        assert!(!texture_alpha(&mat, &texture, &revised()));

        let masked = mat.with_texture(TextureKind::Opacity, "leaf_mask.png");
        assert!(texture_alpha(&masked, &texture, &revised()));
    }

    #[test]
    fn test_resolve_without_texturing_skips_lookup() {
        let set = TextureSet::new();
        let mat = MaterialRecord::new("m").with_texture(TextureKind::Diffuse, "a.png");
        let resolved = ResolvedMaterial::resolve(None, &mat, &set, &revised(), false, true);
        assert!(resolved.texture.is_none());
        assert!(resolved.texture_handle().is_none());
    }

    #[test]
    fn test_is_alpha_material() {
        let set = TextureSet::new();
        let config = revised();
        assert!(!is_alpha_material(&MaterialRecord::new("m"), &set, &config));
        assert!(is_alpha_material(&MaterialRecord::new("m").with_opacity(0.4), &set, &config));
        assert!(is_alpha_material(
            &MaterialRecord::new("m")
                .with_texture(TextureKind::Diffuse, "a.png")
                .with_texture(TextureKind::Opacity, "mask.png"),
            &set,
            &config
        ));
    }
}
