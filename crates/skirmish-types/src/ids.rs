//! Type-safe identifier wrappers.
//!
//! Identifiers are assigned by the simulation host; the decision engine
//! only compares and logs them.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around a `u32` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Wrap a raw host identifier.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Return the inner raw value.
            pub const fn into_inner(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "#{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a unit in a match.
    UnitId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_roundtrip_serde() {
        let original = UnitId::new(17);
        let json = serde_json::to_string(&original).ok();
        assert_eq!(json.as_deref(), Some("17"));
        let restored: Result<UnitId, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert!(matches!(restored, Ok(id) if id == original));
    }

    #[test]
    fn id_display_is_prefixed() {
        assert_eq!(UnitId::new(3).to_string(), "#3");
        assert_eq!(u32::from(UnitId::from(9)), 9);
    }
}
