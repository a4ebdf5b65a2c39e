//! # Mapper Configuration
//!
//! Every constant the material heuristics depend on lives here. Two presets
//! reproduce the two historical behaviours of the viewer:
//!
//! - [`MapperConfig::classic`]: trusts the texture's own alpha scan, snaps
//!   near-zero opacity back to opaque and keeps a bright ambient floor.
//! - [`MapperConfig::revised`]: trusts the material's opacity-texture flag,
//!   skips an opacity of exactly 1.0, ignores colors of the importer's
//!   placeholder material and lowers the ambient floor.
//!
//! `revised` is the default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::Color4;

/// Gate deciding when a declared opacity overrides the default alpha of 1.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpacityRule {
    /// Use the opacity only when it is above the suppression threshold and
    /// not exactly 1.0. Values at or below the threshold are ignored.
    PreserveExactOne,
    /// Always use a declared opacity, but snap values at or below the
    /// suppression threshold back to 1.0.
    SnapToOpaque,
}

/// Where the "texture has alpha" flag comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureAlphaSource {
    /// The texture cache's alpha scan of the decoded image
    TextureAlphaState,
    /// The material's own opacity-texture flag
    MaterialOpacityTexture,
}

/// Intensity that grows linearly with the brightness setting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearIntensity {
    /// Intensity at brightness 0
    pub base: f32,
    /// Added intensity at brightness 100
    pub slope: f32,
}

impl LinearIntensity {
    /// Create a brightness-dependent intensity
    pub const fn new(base: f32, slope: f32) -> Self {
        Self { base, slope }
    }

    /// Intensity for a brightness percentage in `[0, 100]`
    pub fn at(&self, brightness_percent: f32) -> f32 {
        self.base + (brightness_percent / 100.0) * self.slope
    }

    fn is_finite(&self) -> bool {
        self.base.is_finite() && self.slope.is_finite()
    }
}

/// Scene light intensities used by `begin_scene`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingConfig {
    /// Global ambient light
    pub ambient: LinearIntensity,
    /// Diffuse intensity of the single directional light
    pub diffuse: LinearIntensity,
    /// Specular intensity of the single directional light
    pub specular: LinearIntensity,
}

impl LightingConfig {
    /// Light formula of the classic viewer
    pub const fn classic() -> Self {
        Self {
            ambient: LinearIntensity::new(0.2, 0.4),
            diffuse: LinearIntensity::new(0.375, 2.25),
            specular: LinearIntensity::new(0.375, 2.25),
        }
    }

    /// Light formula of the revised viewer
    pub const fn revised() -> Self {
        Self {
            ambient: LinearIntensity::new(0.3, 0.4),
            diffuse: LinearIntensity::new(0.5, 1.0),
            specular: LinearIntensity::new(0.8, 1.0),
        }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self::revised()
    }
}

/// Tunable constants for the material heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Opacity and diffuse alpha at or below this value count as missing data
    pub alpha_suppression_threshold: f32,
    /// Minimum ambient reflectance; declared ambient is remapped into `[floor, 1]`
    pub ambient_floor: f32,
    /// Opacity gate
    pub opacity_rule: OpacityRule,
    /// Source of the texture alpha flag
    pub texture_alpha_source: TextureAlphaSource,
    /// Importer-synthesized material name whose declared colors are ignored.
    /// Empty disables the check.
    pub placeholder_material_name: String,
    /// Specular reflectance used when the material declares none
    pub default_specular: Color4,
    /// Multiply specular alpha by the opacity factor
    pub specular_alpha_from_opacity: bool,
    /// Scene light intensities
    pub light: LightingConfig,
}

impl MapperConfig {
    /// Default suppression threshold shared by both presets
    pub const DEFAULT_ALPHA_SUPPRESSION_THRESHOLD: f32 = 0.01;

    /// Classic viewer behaviour
    pub fn classic() -> Self {
        Self {
            alpha_suppression_threshold: Self::DEFAULT_ALPHA_SUPPRESSION_THRESHOLD,
            ambient_floor: 0.8,
            opacity_rule: OpacityRule::SnapToOpaque,
            texture_alpha_source: TextureAlphaSource::TextureAlphaState,
            placeholder_material_name: String::new(),
            default_specular: Color4::WHITE,
            specular_alpha_from_opacity: false,
            light: LightingConfig::classic(),
        }
    }

    /// Revised viewer behaviour
    pub fn revised() -> Self {
        Self {
            alpha_suppression_threshold: Self::DEFAULT_ALPHA_SUPPRESSION_THRESHOLD,
            ambient_floor: 0.2,
            opacity_rule: OpacityRule::PreserveExactOne,
            texture_alpha_source: TextureAlphaSource::MaterialOpacityTexture,
            placeholder_material_name: "DefaultMaterial".to_string(),
            default_specular: Color4::gray(0.5),
            specular_alpha_from_opacity: true,
            light: LightingConfig::revised(),
        }
    }

    /// Set the suppression threshold
    #[must_use]
    pub fn with_alpha_suppression_threshold(mut self, threshold: f32) -> Self {
        self.alpha_suppression_threshold = threshold;
        self
    }

    /// Set the ambient floor
    #[must_use]
    pub fn with_ambient_floor(mut self, floor: f32) -> Self {
        self.ambient_floor = floor;
        self
    }

    /// Set the opacity gate
    #[must_use]
    pub fn with_opacity_rule(mut self, rule: OpacityRule) -> Self {
        self.opacity_rule = rule;
        self
    }

    /// Set the texture alpha source
    #[must_use]
    pub fn with_texture_alpha_source(mut self, source: TextureAlphaSource) -> Self {
        self.texture_alpha_source = source;
        self
    }

    /// Set the placeholder material name; an empty name disables the check
    #[must_use]
    pub fn with_placeholder_material_name(mut self, name: impl Into<String>) -> Self {
        self.placeholder_material_name = name.into();
        self
    }

    /// Set the light formula
    #[must_use]
    pub fn with_lighting(mut self, light: LightingConfig) -> Self {
        self.light = light;
        self
    }

    /// True when `name` is the importer's placeholder material
    pub fn is_placeholder(&self, name: &str) -> bool {
        !self.placeholder_material_name.is_empty() && self.placeholder_material_name == name
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.alpha_suppression_threshold) {
            return Err(ConfigError::Invalid(format!(
                "alpha suppression threshold {} outside [0, 1]",
                self.alpha_suppression_threshold
            )));
        }

        if !(0.0..=1.0).contains(&self.ambient_floor) {
            return Err(ConfigError::Invalid(format!(
                "ambient floor {} outside [0, 1]",
                self.ambient_floor
            )));
        }

        let light = &self.light;
        if !(light.ambient.is_finite() && light.diffuse.is_finite() && light.specular.is_finite()) {
            return Err(ConfigError::Invalid("light intensities must be finite".to_string()));
        }

        Ok(())
    }

    /// Load a configuration file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self::revised()
    }
}

impl Config for MapperConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;
    use approx::assert_relative_eq;

    #[test]
    fn test_presets_validate() {
        assert!(MapperConfig::classic().validate().is_ok());
        assert!(MapperConfig::revised().validate().is_ok());
        assert_eq!(MapperConfig::default(), MapperConfig::revised());
    }

    #[test]
    fn test_invalid_floor_rejected() {
        let config = MapperConfig::default().with_ambient_floor(1.5);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_non_finite_light_rejected() {
        let mut light = LightingConfig::revised();
        light.diffuse.slope = f32::NAN;
        let config = MapperConfig::default().with_lighting(light);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_linear_intensity() {
        let light = LightingConfig::revised();
        assert_relative_eq!(light.ambient.at(0.0), 0.3, epsilon = 1e-6);
        assert_relative_eq!(light.ambient.at(100.0), 0.7, epsilon = 1e-6);
        assert_relative_eq!(light.specular.at(50.0), 1.3, epsilon = 1e-6);
    }

    #[test]
    fn test_placeholder_name() {
        let config = MapperConfig::revised();
        assert!(config.is_placeholder("DefaultMaterial"));
        assert!(!config.is_placeholder("Steel"));
        assert!(!MapperConfig::classic().is_placeholder("DefaultMaterial"));
        assert!(!MapperConfig::classic().is_placeholder(""));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let text = "ambient_floor = 0.5\nopacity_rule = \"SnapToOpaque\"\n";
        let config = MapperConfig::from_str_as(text, ConfigFormat::Toml).unwrap();
        assert_relative_eq!(config.ambient_floor, 0.5);
        assert_eq!(config.opacity_rule, OpacityRule::SnapToOpaque);
        assert_eq!(config.light, LightingConfig::revised());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let original = MapperConfig::classic().with_alpha_suppression_threshold(0.05);

        for name in ["mapper.toml", "mapper.ron"] {
            let path = dir.path().join(name);
            original.save_to_file(&path).unwrap();
            let loaded = MapperConfig::load(&path).unwrap();
            assert_eq!(loaded, original);
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapper.json");
        assert!(matches!(
            MapperConfig::default().save_to_file(&path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
