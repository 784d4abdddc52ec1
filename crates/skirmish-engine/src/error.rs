//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode during startup so `main` can
//! propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: skirmish_core::ConfigError,
    },

    /// The upgrade priorities could not build a selector.
    #[error("upgrade selector error: {source}")]
    Selector {
        /// The underlying selector error.
        #[from]
        source: skirmish_core::SelectorError,
    },

    /// The arena could not be set up.
    #[error("arena error: {source}")]
    Arena {
        /// The underlying arena error.
        #[from]
        source: skirmish_arena::ArenaError,
    },
}
