//! The single operation argument, in raw form.

use serde::de::DeserializeOwned;

use super::error::DispatchError;

/// Raw operation argument extracted from the first request parameter.
///
/// Read-style operations consume it as a plain identifier; write-style
/// operations decode it into their typed request schema. Decoding fails
/// closed: a malformed argument never reaches a backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArgument(String);

impl RawArgument {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode into a typed request schema.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DispatchError> {
        serde_json::from_str(&self.0).map_err(DispatchError::from)
    }

    /// Decode, falling back to the schema's defaults when the argument is
    /// empty. List-style operations take an optional filter object and must
    /// accept invocations that carry no argument at all.
    pub fn decode_or_default<T: DeserializeOwned + Default>(&self) -> Result<T, DispatchError> {
        if self.0.trim().is_empty() {
            Ok(T::default())
        } else {
            self.decode()
        }
    }
}

impl From<&str> for RawArgument {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for RawArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
