//! Macro for wire-identified enums
//!
//! Somfy identifies capabilities, categories and device types by lowercase
//! string identifiers. This macro generates the lookup table plumbing once:
//! the identifier accessor, the reverse lookup, `Display` and `FromStr`.
//!
//! # Example
//!
//! ```rust
//! use somfy_domain::impl_wire_identifier;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Mode {
//!     Manual,
//!     Auto,
//! }
//!
//! impl_wire_identifier!(Mode {
//!     Manual => "manual",
//!     Auto => "auto",
//! });
//!
//! assert_eq!(Mode::Auto.identification(), "auto");
//! assert_eq!(Mode::from_identification("manual"), Some(Mode::Manual));
//! ```

/// Implements identifier lookup, `Display` and `FromStr` for a closed enum
///
/// This macro generates:
/// - `ALL`: every variant, in declaration order
/// - `identification()`: the wire identifier of a variant
/// - `from_identification()`: exact reverse lookup
/// - `Display`: writes the wire identifier
/// - `FromStr`: case-insensitive parse with a descriptive error
#[macro_export]
macro_rules! impl_wire_identifier {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$enum_name] = &[$($enum_name::$variant),+];

            /// Wire identifier used by the Somfy API
            #[must_use]
            pub const fn identification(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }

            /// Look up the variant carrying the given wire identifier
            #[must_use]
            pub fn from_identification(identification: &str) -> Option<Self> {
                match identification {
                    $($str => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.identification())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_identification(s.to_lowercase().as_str())
                    .ok_or_else(|| format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Shade {
        Open,
        HalfOpen,
        Closed,
    }

    impl_wire_identifier!(Shade {
        Open => "open",
        HalfOpen => "half_open",
        Closed => "closed",
    });

    #[test]
    fn test_identification() {
        assert_eq!(Shade::Open.identification(), "open");
        assert_eq!(Shade::HalfOpen.identification(), "half_open");
        assert_eq!(Shade::Closed.to_string(), "closed");
    }

    #[test]
    fn test_from_identification_is_exact() {
        assert_eq!(Shade::from_identification("half_open"), Some(Shade::HalfOpen));
        assert_eq!(Shade::from_identification("HALF_OPEN"), None);
        assert_eq!(Shade::from_identification(""), None);
    }

    #[test]
    fn test_fromstr_ignores_case() {
        assert_eq!(Shade::from_str("CLOSED").unwrap(), Shade::Closed);
        assert_eq!(Shade::from_str("Half_Open").unwrap(), Shade::HalfOpen);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = Shade::from_str("ajar");
        assert!(result.unwrap_err().contains("Invalid Shade: ajar"));
    }

    #[test]
    fn test_all_lists_every_variant_in_order() {
        assert_eq!(Shade::ALL, &[Shade::Open, Shade::HalfOpen, Shade::Closed]);
    }
}
