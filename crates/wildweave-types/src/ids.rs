//! Type-safe identifier wrappers around the integer keys of the region store.
//!
//! Regions, hints and rooms are all addressed by signed 64-bit database keys
//! (virtual numbers in game terms). Wrapping them keeps a region id from
//! being passed where a hint id is expected.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around [`i64`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wrap a raw key.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Return the inner key.
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Whether the key refers to a real record (keys start at 1).
            pub const fn is_valid(self) -> bool {
                self.0 > 0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of a region (a named area over wilderness coordinates).
    RegionId
}

define_id! {
    /// Identifier of a single authored region hint.
    HintId
}

define_id! {
    /// Virtual number of a room.
    RoomVnum
}
