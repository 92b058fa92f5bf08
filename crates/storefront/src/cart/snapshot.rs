//! Decoding the persisted cart value.
//!
//! The slot holds a JSON array of `{ product, quantity }` records. Older
//! releases wrote `{ id: <number>, quantity }` instead; those entries carry no
//! product data and cannot be repaired.

use serde_json::Value;

use super::line::CartLine;

/// What a raw persisted value turned out to be.
#[derive(Debug, PartialEq, Eq)]
pub enum Snapshot {
    /// Well-formed lines, not yet consolidated.
    Lines(Vec<CartLine>),
    /// At least one entry uses the numeric-id shape.
    Legacy,
    /// Not a JSON array of cart lines.
    Unparsable(String),
}

/// Classify and decode a raw persisted value.
///
/// The legacy check runs before line decoding, so a single legacy entry
/// discards the whole value even when its neighbours are well-formed.
pub fn decode(raw: &str) -> Snapshot {
    let entries: Vec<Value> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(e) => return Snapshot::Unparsable(e.to_string()),
    };

    if entries.iter().any(is_legacy_entry) {
        return Snapshot::Legacy;
    }

    entries
        .into_iter()
        .map(serde_json::from_value::<CartLine>)
        .collect::<Result<Vec<_>, _>>()
        .map_or_else(|e| Snapshot::Unparsable(e.to_string()), Snapshot::Lines)
}

/// Encode lines for the persisted slot.
///
/// # Errors
///
/// Returns the `serde_json` error if a product fails to serialize.
pub fn encode(lines: &[CartLine]) -> Result<String, serde_json::Error> {
    serde_json::to_string(lines)
}

fn is_legacy_entry(entry: &Value) -> bool {
    entry.get("id").is_some_and(Value::is_number)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use shopkeep_core::Product;

    use super::*;

    #[test]
    fn test_decode_lines() {
        let raw = r#"[{"product": {"id": "a", "name": "A", "price": 10}, "quantity": 2}]"#;
        let Snapshot::Lines(lines) = decode(raw) else {
            panic!("expected lines");
        };
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(|l| l.quantity), Some(2));
    }

    #[test]
    fn test_decode_empty_array() {
        assert_eq!(decode("[]"), Snapshot::Lines(Vec::new()));
    }

    #[test]
    fn test_decode_legacy_shape() {
        assert_eq!(decode(r#"[{"id": 3, "quantity": 1}]"#), Snapshot::Legacy);
    }

    #[test]
    fn test_decode_mixed_legacy_discards_everything() {
        let raw = r#"[
            {"product": {"id": "a", "name": "A", "price": 10}, "quantity": 2},
            {"id": 17, "quantity": 4}
        ]"#;
        assert_eq!(decode(raw), Snapshot::Legacy);
    }

    #[test]
    fn test_decode_string_id_is_not_legacy() {
        // A top-level string id is malformed, not the numeric legacy shape.
        assert!(matches!(
            decode(r#"[{"id": "a", "quantity": 1}]"#),
            Snapshot::Unparsable(_)
        ));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(decode("not json"), Snapshot::Unparsable(_)));
        assert!(matches!(decode(r#"{"a": 1}"#), Snapshot::Unparsable(_)));
        assert!(matches!(
            decode(r#"[{"product": {"id": "a", "name": "A", "price": 1}, "quantity": -1}]"#),
            Snapshot::Unparsable(_)
        ));
    }

    #[test]
    fn test_encode_then_decode() {
        let lines = vec![CartLine {
            product: Product::new("a", "A", Decimal::new(1999, 2)),
            quantity: 3,
        }];
        let raw = encode(&lines).unwrap();
        assert_eq!(decode(&raw), Snapshot::Lines(lines));
    }
}
