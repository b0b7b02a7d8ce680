//! # Typed Identifiers
//!
//! Zero-cost wrappers that keep pool, asset and account identifiers from being
//! mixed up at call sites.
//!
//! ## Two Families
//!
//! - **Numeric IDs** ([`define_typed_id!`]): `u64` wrappers allocated by a
//!   registry. Pools are addressed this way (arena index, stable for the
//!   lifetime of the exchange).
//! - **Named IDs** ([`define_typed_name!`]): string wrappers for identifiers that
//!   come from outside the engine, such as asset symbols and account names.
//!
//! ```rust
//! use types::{AccountId, AssetId, PoolId};
//!
//! let pool = PoolId::new(0);
//! let usdc = AssetId::new("USDC");
//! let alice = AccountId::new("alice");
//!
//! fn swap(pool: PoolId, asset_in: &AssetId, caller: &AccountId) {}
//! swap(pool, &usdc, &alice);
//! // swap(pool, &alice, &usdc); // compile error
//! ```

use crate::common::errors::ValidationError;

/// Macro for generating zero-cost typed ID wrappers
///
/// Creates a new type that wraps `u64` with complete type safety while maintaining
/// identical runtime performance and memory layout.
#[macro_export]
macro_rules! define_typed_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[repr(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Create a new typed ID
            #[inline(always)]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Extract the inner u64 value
            #[inline(always)]
            pub const fn inner(&self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<u64> for $name {
            #[inline(always)]
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            #[inline(always)]
            fn from(id: $name) -> u64 {
                id.0
            }
        }

        // Serializes as raw u64
        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                self.0.serialize(serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                u64::deserialize(deserializer).map(Self)
            }
        }
    };
}

/// Macro for generating string-backed identifier wrappers
///
/// The wrapped name is compared, hashed and ordered as a plain string, so two
/// IDs built from the same text are always equal.
#[macro_export]
macro_rules! define_typed_name {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new named ID without validation
            #[inline]
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// Create a new named ID, rejecting empty names and names with
            /// whitespace or control characters
            pub fn new_validated(
                name: impl Into<String>,
            ) -> Result<Self, $crate::common::errors::ValidationError> {
                let name = name.into();
                $crate::common::identifiers::validate_name(stringify!($name), &name)?;
                Ok(Self(name))
            }

            /// Borrow the underlying name
            #[inline(always)]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Extract the underlying name
            #[inline(always)]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self(name.to_string())
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(name)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                String::deserialize(deserializer).map(Self)
            }
        }
    };
}

#[doc(hidden)]
pub fn validate_name(kind: &'static str, name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName { kind });
    }
    if let Some(found) = name.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::InvalidCharacter {
            kind,
            name: name.to_string(),
            found,
        });
    }
    Ok(())
}

define_typed_id!(
    /// Arena index of a trading pair
    PoolId
);

define_typed_name!(
    /// Fungible asset identifier (symbol or contract address)
    AssetId
);

define_typed_name!(
    /// Account that holds balances and liquidity claims
    AccountId
);
