//! Mapper errors
//!
//! Material data never produces an error; every odd value has a fallback.
//! Errors only report calls made out of order by the renderer.

use crate::config::ConfigError;

/// Result type for mapper operations
pub type MapperResult<T> = Result<T, MapperError>;

/// Invalid use of a mapper
#[derive(thiserror::Error, Debug)]
pub enum MapperError {
    /// A material or `end_scene` call arrived outside `begin_scene`/`end_scene`
    #[error("no active scene: call begin_scene first")]
    NoActiveScene,

    /// `begin_scene` was called twice without `end_scene`
    #[error("scene already active: call end_scene first")]
    SceneAlreadyActive,

    /// The mapper was used after `dispose`
    #[error("mapper has been disposed")]
    Disposed,

    /// The configuration failed validation
    #[error("invalid mapper configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
