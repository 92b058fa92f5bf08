//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.
//!
//! Catalog identifiers are opaque strings (typically UUIDs). They are never
//! converted into numeric keys.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, `AsRef<str>`, and `Borrow<str>`
///   implementations
///
/// # Example
///
/// ```rust
/// # use shopkeep_core::define_id;
/// define_id!(WidgetId);
/// define_id!(GadgetId);
///
/// let widget = WidgetId::new("w-1");
/// let gadget = GadgetId::new("w-1");
///
/// // These are different types, so this won't compile:
/// // let _: WidgetId = gadget;
/// assert_eq!(widget.as_str(), gadget.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl ::core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(CategoryId);
define_id!(OrderNumber);

impl OrderNumber {
    /// Prefix shared by every generated order number.
    pub const PREFIX: &'static str = "ORD-";

    /// Build an order number from a millisecond Unix timestamp.
    #[must_use]
    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self(format!("{}{millis}", Self::PREFIX))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_product_id_serializes_transparently() {
        let id = ProductId::new("9a1f-22");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"9a1f-22\"");

        let parsed: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_product_id_rejects_numbers() {
        assert!(serde_json::from_str::<ProductId>("42").is_err());
    }

    #[test]
    fn test_borrow_allows_str_lookup() {
        let mut ids = HashSet::new();
        ids.insert(ProductId::new("a"));
        assert!(ids.contains("a"));
        assert!(!ids.contains("b"));
    }

    #[test]
    fn test_display() {
        assert_eq!(CategoryId::new("shoes").to_string(), "shoes");
    }

    #[test]
    fn test_order_number_from_timestamp() {
        let order = OrderNumber::from_timestamp_millis(1_700_000_000_123);
        assert_eq!(order.as_str(), "ORD-1700000000123");
        assert!(order.as_str().starts_with(OrderNumber::PREFIX));
    }
}
