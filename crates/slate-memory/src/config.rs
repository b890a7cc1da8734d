use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub name: String,
    /// Reference path → name of the collection it points into.
    #[serde(default)]
    pub refs: HashMap<String, String>,
}

impl CollectionConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            refs: HashMap::new(),
        }
    }

    pub fn with_ref(mut self, path: impl Into<String>, collection: impl Into<String>) -> Self {
        self.refs.insert(path.into(), collection.into());
        self
    }
}
