//! The [`Serializer`] contract and its JSON implementation.
//!
//! All operations share two rules:
//!
//! * absent input gives absent output: `None` in, `Ok(None)` out. Empty input
//!   (a zero-length string, slice or stream) is treated as absent by the
//!   deserializers;
//! * any failure is a [`SerializationError`], never a panic and never a raw
//!   serde_json error.

use std::io::Read;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::SerializationError;

/// Converts API objects to and from their wire representation.
pub trait Serializer: Send + Sync {
    /// Serialize `value` to bytes.
    fn serialize<T>(&self, value: Option<&T>) -> Result<Option<Vec<u8>>, SerializationError>
    where
        T: Serialize + ?Sized;

    /// Serialize `value` to a string.
    fn serialize_to_string<T>(&self, value: Option<&T>) -> Result<Option<String>, SerializationError>
    where
        T: Serialize + ?Sized;

    /// Deserialize a value from bytes.
    fn deserialize_bytes<T>(&self, input: Option<&[u8]>) -> Result<Option<T>, SerializationError>
    where
        T: DeserializeOwned;

    /// Deserialize a value from a string.
    fn deserialize_str<T>(&self, input: Option<&str>) -> Result<Option<T>, SerializationError>
    where
        T: DeserializeOwned,
    {
        self.deserialize_bytes(input.map(str::as_bytes))
    }

    /// Deserialize a value from a stream, reading it to the end.
    fn deserialize_reader<T, R>(&self, input: Option<R>) -> Result<Option<T>, SerializationError>
    where
        T: DeserializeOwned,
        R: Read,
    {
        let Some(mut reader) = input else { return Ok(None) };
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).map_err(SerializationError::Read)?;
        self.deserialize_bytes(Some(&buf))
    }
}

// ─── JsonSerializer ───────────────────────────────────────────────────────────

/// [`Serializer`] backed by serde_json.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output, for logs and fixtures.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Serializer for JsonSerializer {
    fn serialize<T>(&self, value: Option<&T>) -> Result<Option<Vec<u8>>, SerializationError>
    where
        T: Serialize + ?Sized,
    {
        let Some(value) = value else { return Ok(None) };
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        bytes.map(Some).map_err(|e| {
            tracing::debug!("[max] serialize failed: {e}");
            SerializationError::Serialize(e)
        })
    }

    fn serialize_to_string<T>(&self, value: Option<&T>) -> Result<Option<String>, SerializationError>
    where
        T: Serialize + ?Sized,
    {
        let Some(value) = value else { return Ok(None) };
        let text = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        text.map(Some).map_err(|e| {
            tracing::debug!("[max] serialize failed: {e}");
            SerializationError::Serialize(e)
        })
    }

    fn deserialize_bytes<T>(&self, input: Option<&[u8]>) -> Result<Option<T>, SerializationError>
    where
        T: DeserializeOwned,
    {
        match input {
            None | Some([]) => Ok(None),
            Some(bytes) => serde_json::from_slice(bytes).map(Some).map_err(|e| {
                tracing::debug!("[max] deserialize failed ({} bytes): {e}", bytes.len());
                SerializationError::Deserialize(e)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_output_is_indented() {
        let out = JsonSerializer::pretty().serialize_to_string(Some(&[1, 2])).unwrap().unwrap();
        assert!(out.contains('\n'));
        let compact = JsonSerializer::new().serialize_to_string(Some(&[1, 2])).unwrap().unwrap();
        assert_eq!(compact, "[1,2]");
    }

    #[test]
    fn syntax_errors_are_flagged() {
        let err = JsonSerializer::new().deserialize_str::<Vec<i32>>(Some("[1,")).unwrap_err();
        assert!(err.is_syntax());
        let err = JsonSerializer::new().deserialize_str::<Vec<i32>>(Some("{}")).unwrap_err();
        assert!(!err.is_syntax());
    }
}
