//! Error types for arena setup.

use skirmish_types::{Location, UnitId};

/// Errors raised while building or driving an [`Arena`](crate::Arena).
///
/// Rule violations during a turn are not errors here; they reach the
/// decision engine as [`HostError`](skirmish_types::HostError) values.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    /// The arena configuration is unusable.
    #[error("arena config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: skirmish_core::ConfigError,
    },

    /// No living unit has this id.
    #[error("unknown unit {0}")]
    UnknownUnit(UnitId),

    /// The cell lies outside the map.
    #[error("location {location} is off the map")]
    OutOfBounds {
        /// The offending cell.
        location: Location,
    },

    /// Another unit already stands on the cell.
    #[error("location {location} is occupied")]
    Occupied {
        /// The offending cell.
        location: Location,
    },
}
