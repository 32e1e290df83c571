//! Order-preserving document reader.
//!
//! Parsing JSON text straight into a `serde_json::Value` collapses repeated
//! keys: the later value replaces the earlier one but keeps the first
//! position. [`RawDocument`] keeps every top-level `(key, value)` pair in the
//! order written, so "last key wins" holds for text input too.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Value;

/// A document as written: top-level object pairs in order, or any other value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDocument {
    Object(Vec<(String, Value)>),
    Other(Value),
}

impl<'de> Deserialize<'de> for RawDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawDocumentVisitor)
    }
}

struct RawDocumentVisitor;

impl<'de> Visitor<'de> for RawDocumentVisitor {
    type Value = RawDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON document")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            entries.push((key, value));
        }
        Ok(RawDocument::Object(entries))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(RawDocument::Other(Value::Array(items)))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(RawDocument::Other(Value::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(RawDocument::Other(Value::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(RawDocument::Other(Value::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(RawDocument::Other(Value::from(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(RawDocument::Other(Value::String(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(RawDocument::Other(Value::String(v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RawDocument::Other(Value::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RawDocument::Other(Value::Null))
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawDocument::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_repeated_keys_kept_in_order() {
        let doc: RawDocument = serde_json::from_str(r#"{"http":"a","HTTP":"b","http":""}"#).unwrap();
        assert_eq!(
            doc,
            RawDocument::Object(vec![
                ("http".to_string(), json!("a")),
                ("HTTP".to_string(), json!("b")),
                ("http".to_string(), json!("")),
            ])
        );
    }

    #[test]
    fn test_non_object_documents() {
        let doc: RawDocument = serde_json::from_str(r#"["Name"]"#).unwrap();
        assert_eq!(doc, RawDocument::Other(json!(["Name"])));

        let doc: RawDocument = serde_json::from_str("42").unwrap();
        assert_eq!(doc, RawDocument::Other(json!(42)));

        let doc: RawDocument = serde_json::from_str("null").unwrap();
        assert_eq!(doc, RawDocument::Other(Value::Null));
    }
}
