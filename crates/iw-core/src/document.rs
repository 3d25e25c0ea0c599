//! A parsed story document.
//!
//! The schema belongs to whichever engine consumes the document, so this type
//! only guarantees that the bytes were valid JSON.

use serde_json::Value;

/// Opaque JSON description of a story graph.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryDocument {
    value: Value,
}

impl StoryDocument {
    /// Wrap an already-parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    /// Parse a document from raw bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        // Story compilers commonly emit a UTF-8 byte order mark.
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        serde_json::from_slice(bytes).map(Self::from_value)
    }

    /// Borrow the underlying JSON value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Give up the document, handing its JSON to an engine.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Serialize back to compact JSON, for engines that take a string.
    pub fn to_json_string(&self) -> String {
        self.value.to_string()
    }

    /// Top-level keys, when the document is an object.
    pub fn top_level_keys(&self) -> Vec<&str> {
        self.value
            .as_object()
            .map(|obj| obj.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// The `inkVersion` field carried by compiled ink stories, if present.
    pub fn ink_version(&self) -> Option<u64> {
        self.value.get("inkVersion").and_then(Value::as_u64)
    }
}
