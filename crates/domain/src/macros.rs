//! Macro for implementing Display and FromStr for wire-level status enums
//!
//! Provider statuses travel as lowercase strings. The macro gives an enum a
//! single mapping used for both directions, with case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use calsift_domain::impl_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Transparency {
//!     Opaque,
//!     Transparent,
//! }
//!
//! impl_status_conversions!(Transparency {
//!     Opaque => "opaque",
//!     Transparent => "transparent",
//! });
//!
//! assert_eq!(Transparency::Transparent.to_string(), "transparent");
//! assert_eq!("OPAQUE".parse::<Transparency>().unwrap(), Transparency::Opaque);
//! ```

/// Implements Display and FromStr traits for status enums
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their lowercase string
///   representations
#[macro_export]
macro_rules! impl_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
