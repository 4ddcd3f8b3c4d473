//! Newtype wrappers for Shopify global IDs.
//!
//! Shopify identifies every object with a global ID of the form
//! `gid://shopify/<Kind>/<id>`, optionally followed by a query string
//! (carts carry `?key=...`). Use the `define_gid!` macro to create wrappers
//! that only accept IDs of one kind, so a cart line ID posted from a form can
//! never be sent where a variant ID is expected.

use thiserror::Error;

/// Prefix shared by all Shopify global IDs.
pub const GID_PREFIX: &str = "gid://shopify/";

/// Errors produced when parsing a global ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GidError {
    #[error("not a Shopify global ID: {0}")]
    Malformed(String),
    #[error("expected a {expected} ID, got {found}")]
    WrongKind {
        expected: &'static str,
        found: String,
    },
}

/// Split a global ID into its kind and object part.
///
/// The object part keeps any query string (`abc?key=123`).
///
/// # Errors
///
/// Returns `GidError::Malformed` if the prefix is missing or either part is empty.
pub fn split_gid(value: &str) -> Result<(&str, &str), GidError> {
    let rest = value
        .strip_prefix(GID_PREFIX)
        .ok_or_else(|| GidError::Malformed(value.to_string()))?;
    let (kind, id) = rest
        .split_once('/')
        .ok_or_else(|| GidError::Malformed(value.to_string()))?;
    if kind.is_empty() || id.is_empty() || id.starts_with('?') {
        return Err(GidError::Malformed(value.to_string()));
    }
    Ok((kind, id))
}

/// Macro to define a type-safe global ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` through `String`, validated on the way in
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `FromStr`, `TryFrom<String>`, `Display`, `as_str()`
///
/// # Example
///
/// ```rust
/// # use lumen_core::define_gid;
/// define_gid!(OrderId, "Order");
///
/// let id: OrderId = "gid://shopify/Order/42".parse().unwrap();
/// assert_eq!(id.as_str(), "gid://shopify/Order/42");
/// assert!("gid://shopify/Cart/42".parse::<OrderId>().is_err());
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident, $kind:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// The Shopify object kind this ID refers to.
            pub const KIND: &'static str = $kind;

            /// Get the full global ID string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::convert::TryFrom<String> for $name {
            type Error = $crate::types::id::GidError;

            fn try_from(value: String) -> ::core::result::Result<Self, Self::Error> {
                let (kind, _) = $crate::types::id::split_gid(&value)?;
                if kind != $kind {
                    return Err($crate::types::id::GidError::WrongKind {
                        expected: $kind,
                        found: kind.to_string(),
                    });
                }
                Ok(Self(value))
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::GidError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::try_from(s.trim().to_string())
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_gid!(CartId, "Cart");
define_gid!(CartLineId, "CartLine");
define_gid!(ProductVariantId, "ProductVariant");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cart_id_with_key() {
        let id: CartId = "gid://shopify/Cart/c1-abc?key=f00".parse().unwrap();
        assert_eq!(id.as_str(), "gid://shopify/Cart/c1-abc?key=f00");
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let err = "gid://shopify/CartLine/1".parse::<ProductVariantId>().unwrap_err();
        assert_eq!(
            err,
            GidError::WrongKind {
                expected: "ProductVariant",
                found: "CartLine".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_rejected() {
        assert!("12345".parse::<CartLineId>().is_err());
        assert!("gid://shopify/CartLine/".parse::<CartLineId>().is_err());
        assert!("gid://shopify/Cart/?key=1".parse::<CartId>().is_err());
    }

    #[test]
    fn test_serde_validates() {
        let ok: ProductVariantId =
            serde_json::from_str("\"gid://shopify/ProductVariant/9\"").unwrap();
        assert_eq!(ok.to_string(), "gid://shopify/ProductVariant/9");

        let bad = serde_json::from_str::<ProductVariantId>("\"gid://shopify/Product/9\"");
        assert!(bad.is_err());
    }
}
