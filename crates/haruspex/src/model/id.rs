use std::fmt;
use uuid::Uuid;

/// Identifier of a loaded model.
///
/// The id names the model wherever the harness needs a stable key: log
/// events emitted during loading, and the per-model metrics scopes kept by
/// the prediction decorator. Two models with the same id share a metrics
/// scope, so ids should be unique per logical model.
///
/// Ids are plain strings. Backends that version their artifacts typically
/// bake the version into the id (`"ctr-model/v42"`); throwaway models can
/// use [`ModelId::random`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelId(String);

impl ModelId {
    /// Creates an id from any string-like value.
    pub fn new(value: impl Into<String>) -> Self {
        ModelId(value.into())
    }

    /// Creates a unique id backed by a v4 UUID.
    ///
    /// Useful for models that have no natural name, such as fixtures in
    /// tests or models built from in-memory state.
    pub fn random() -> Self {
        ModelId(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(value: &str) -> Self {
        ModelId::new(value)
    }
}

impl From<String> for ModelId {
    fn from(value: String) -> Self {
        ModelId(value)
    }
}
