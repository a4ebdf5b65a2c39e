//! Texture lookup contract and the scene texture set
//!
//! Decoding and GPU upload happen elsewhere, usually on a worker. The
//! mappers only ask "what is the state of the texture for this path right
//! now" and never wait for an answer to change.

use std::collections::HashMap;

use image::RgbaImage;
use slotmap::{new_key_type, SlotMap};

/// Handle for a GPU texture resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Upload progress of a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Queued or decoding; not on the GPU yet
    Pending,
    /// Missing file or failed decode; will never become ready
    Failed,
    /// Uploaded and bindable
    Ready(TextureHandle),
}

/// Result of scanning a texture for transparency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphaState {
    /// Not scanned yet
    #[default]
    Unknown,
    /// Every pixel is fully opaque
    Opaque,
    /// At least one pixel is translucent
    HasAlpha,
}

/// What a lookup returns for a texture path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTexture {
    /// Path that was actually resolved, after replacement
    pub path: String,
    /// Transparency scan result
    pub alpha: AlphaState,
    /// Upload progress
    pub state: LoadState,
}

impl ResolvedTexture {
    /// Result for a path nobody registered
    pub fn missing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alpha: AlphaState::Unknown,
            state: LoadState::Failed,
        }
    }

    /// Bindable handle, if the texture is on the GPU
    pub fn handle(&self) -> Option<TextureHandle> {
        match self.state {
            LoadState::Ready(handle) => Some(handle),
            LoadState::Pending | LoadState::Failed => None,
        }
    }

    /// True when the transparency scan found translucent pixels
    pub fn has_alpha(&self) -> bool {
        self.alpha == AlphaState::HasAlpha
    }
}

/// Texture cache as seen by the mappers
pub trait TextureLookup {
    /// Resolve `path`, following any registered replacement. Unknown paths
    /// resolve to [`LoadState::Failed`] rather than an error.
    fn resolve(&self, path: &str) -> ResolvedTexture;
}

/// Scan decoded pixels for anything below full opacity
pub fn scan_alpha(image: &RgbaImage) -> AlphaState {
    if image.pixels().any(|pixel| pixel.0[3] < u8::MAX) {
        AlphaState::HasAlpha
    } else {
        AlphaState::Opaque
    }
}

new_key_type! {
    /// Stable key of a texture entry
    pub struct TextureKey;
}

#[derive(Debug, Clone)]
struct TextureEntry {
    path: String,
    alpha: AlphaState,
    state: LoadState,
}

/// Textures referenced by one scene, keyed by file path
///
/// Users can substitute a texture from the viewer UI; the replacement is
/// recorded per original path and applied on every lookup.
#[derive(Debug, Default)]
pub struct TextureSet {
    entries: SlotMap<TextureKey, TextureEntry>,
    by_path: HashMap<String, TextureKey>,
    replacements: HashMap<String, String>,
}

impl TextureSet {
    /// Create an empty texture set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` as pending. Registering a known path returns its key.
    pub fn add(&mut self, path: impl Into<String>) -> TextureKey {
        let path = path.into();
        if let Some(&key) = self.by_path.get(&path) {
            return key;
        }

        let key = self.entries.insert(TextureEntry {
            path: path.clone(),
            alpha: AlphaState::Unknown,
            state: LoadState::Pending,
        });
        log::debug!("Registered texture {:?} as {:?}", path, key);
        self.by_path.insert(path, key);
        key
    }

    /// Record a finished upload. Returns false for unknown paths.
    pub fn mark_uploaded(&mut self, path: &str, handle: TextureHandle) -> bool {
        self.update(path, |entry| entry.state = LoadState::Ready(handle))
    }

    /// Record a failed load. Returns false for unknown paths.
    pub fn mark_failed(&mut self, path: &str) -> bool {
        self.update(path, |entry| entry.state = LoadState::Failed)
    }

    /// Record a transparency scan result. Returns false for unknown paths.
    pub fn set_alpha(&mut self, path: &str, alpha: AlphaState) -> bool {
        self.update(path, |entry| entry.alpha = alpha)
    }

    /// Scan decoded pixels and record the result
    pub fn set_alpha_from_image(&mut self, path: &str, image: &RgbaImage) -> Option<AlphaState> {
        let alpha = scan_alpha(image);
        self.set_alpha(path, alpha).then_some(alpha)
    }

    /// Substitute `replacement` whenever `original` is looked up
    pub fn set_replacement(&mut self, original: impl Into<String>, replacement: impl Into<String>) {
        let original = original.into();
        let replacement = replacement.into();
        log::debug!("Replacing texture {:?} with {:?}", original, replacement);
        self.replacements.insert(original, replacement);
    }

    /// Drop a replacement. Returns the previous replacement path.
    pub fn clear_replacement(&mut self, original: &str) -> Option<String> {
        self.replacements.remove(original)
    }

    /// The path lookups for `path` actually resolve
    pub fn original_or_replacement<'a>(&'a self, path: &'a str) -> &'a str {
        self.replacements.get(path).map_or(path, String::as_str)
    }

    /// Remove a texture. Returns false for unknown paths.
    pub fn remove(&mut self, path: &str) -> bool {
        match self.by_path.remove(path) {
            Some(key) => self.entries.remove(key).is_some(),
            None => false,
        }
    }

    /// Number of registered textures
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no texture is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn update(&mut self, path: &str, f: impl FnOnce(&mut TextureEntry)) -> bool {
        let Some(entry) = self.by_path.get(path).and_then(|&key| self.entries.get_mut(key)) else {
            log::warn!("Texture {:?} is not registered", path);
            return false;
        };
        f(entry);
        true
    }
}

impl TextureLookup for TextureSet {
    fn resolve(&self, path: &str) -> ResolvedTexture {
        let resolved = self.original_or_replacement(path);
        self.by_path
            .get(resolved)
            .and_then(|&key| self.entries.get(key))
            .map_or_else(
                || ResolvedTexture::missing(resolved),
                |entry| ResolvedTexture {
                    path: entry.path.clone(),
                    alpha: entry.alpha,
                    state: entry.state,
                },
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_texture_set_creation() {
        let set = TextureSet::new();
        assert!(set.is_empty());
        assert_eq!(set.resolve("none.png"), ResolvedTexture::missing("none.png"));
    }

    #[test]
    fn test_pending_then_ready() {
        let mut set = TextureSet::new();
        let key = set.add("wood.png");
        assert_eq!(set.add("wood.png"), key);
        assert_eq!(set.len(), 1);

        let pending = set.resolve("wood.png");
        assert_eq!(pending.state, LoadState::Pending);
        assert!(pending.handle().is_none());

        assert!(set.mark_uploaded("wood.png", TextureHandle(7)));
        assert_eq!(set.resolve("wood.png").handle(), Some(TextureHandle(7)));
    }

    #[test]
    fn test_unknown_path_updates_are_rejected() {
        let mut set = TextureSet::new();
        assert!(!set.mark_uploaded("ghost.png", TextureHandle(1)));
        assert!(!set.mark_failed("ghost.png"));
        assert!(!set.remove("ghost.png"));
    }

    #[test]
    fn test_replacement_is_resolved_first() {
        let mut set = TextureSet::new();
        set.add("original.png");
        set.add("better.png");
        set.mark_uploaded("better.png", TextureHandle(3));
        set.set_replacement("original.png", "better.png");

        let resolved = set.resolve("original.png");
        assert_eq!(resolved.path, "better.png");
        assert_eq!(resolved.handle(), Some(TextureHandle(3)));

        assert_eq!(set.clear_replacement("original.png").as_deref(), Some("better.png"));
        assert_eq!(set.resolve("original.png").state, LoadState::Pending);
    }

    #[test]
    fn test_alpha_scan() {
        let opaque = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        assert_eq!(scan_alpha(&opaque), AlphaState::Opaque);

        let mut cutout = opaque.clone();
        cutout.put_pixel(1, 1, Rgba([0, 0, 0, 0]));
        assert_eq!(scan_alpha(&cutout), AlphaState::HasAlpha);

        let mut set = TextureSet::new();
        set.add("leaf.png");
        assert_eq!(set.set_alpha_from_image("leaf.png", &cutout), Some(AlphaState::HasAlpha));
        assert!(set.resolve("leaf.png").has_alpha());
        assert_eq!(set.set_alpha_from_image("bark.png", &cutout), None);
    }
}
