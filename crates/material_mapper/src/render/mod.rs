//! # Render-State Abstractions
//!
//! Everything the mappers touch on the rendering side:
//!
//! - **State sink**: [`PipelineState`], the only way state reaches the GPU
//! - **Recording sink**: [`RecordingState`] for tests and diagnostics
//! - **Textures**: the [`TextureLookup`] contract and the [`TextureSet`] cache
//! - **Frame inputs**: [`RenderContext`] and the derived [`SceneLighting`]
//! - **Uniform blocks**: GPU layouts used by the shader mapper

pub mod blocks;
pub mod context;
pub mod lighting;
pub mod recording;
pub mod state;
pub mod texture;

pub use blocks::{LightBlock, MaterialBlock};
pub use context::RenderContext;
pub use lighting::SceneLighting;
pub use recording::{CapabilityFlags, PipelineSnapshot, RecordingState, StateCommand};
pub use state::{
    BlendFactor, Capability, ColorMaterialMode, Face, LightParameter, MaterialParameter,
    PipelineState, ShadeModel,
};
pub use texture::{
    AlphaState, LoadState, ResolvedTexture, TextureHandle, TextureKey, TextureLookup, TextureSet,
};
