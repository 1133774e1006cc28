use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// A named unit extracted from documentation.
///
/// Submodules keep the order the service sent them in; that order is what
/// gets displayed and exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub submodules: IndexMap<String, Option<String>>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            module: name.into(),
            description: None,
            submodules: IndexMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a submodule; re-adding a name replaces its description in place.
    pub fn with_submodule(mut self, name: impl Into<String>, description: Option<&str>) -> Self {
        self.submodules
            .insert(name.into(), description.map(ToOwned::to_owned));
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<IndexMap<String, Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Formats modules the way "copy JSON" presents them: pretty, two-space indent.
pub fn modules_to_pretty_json(modules: &[Module]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(modules)
}
