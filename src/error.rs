// error.rs - Failure types for scene construction
//
// Per-frame updates are total; only initialization can fail.

/// Raster acquisition failures while synthesizing a texture.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// A zero-sized raster was requested.
    #[error("cannot allocate an empty {width}x{height} raster")]
    EmptyRaster { width: u32, height: u32 },

    /// The raster byte size does not fit in memory.
    #[error("raster {width}x{height} is too large to allocate")]
    RasterTooLarge { width: u32, height: u32 },

    /// Splats were requested without any accent color to paint them with.
    #[error("splat stamping needs at least one accent color")]
    NoAccentColors,

    /// Splats of size zero cover no pixels.
    #[error("splat size must be at least one pixel")]
    ZeroSplatSize,
}

/// Errors that can occur when loading, saving, or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    Write(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),

    /// A value is outside the range the engine can run with.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Anything that aborts scene construction.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
