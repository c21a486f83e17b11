use serde::{Deserialize, Serialize};

use crate::model::Id;

/// A prompt/response pair shown to annotators.
///
/// Missing fields decode as empty strings so a sparse line in the examples
/// file still yields an example.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Example {
    pub id: Id,
    pub prompt: String,
    pub response: String,
}

impl Example {
    pub fn new(id: impl Into<Id>, prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            response: response.into(),
        }
    }
}
