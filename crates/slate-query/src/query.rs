use bson::Document;
use serde::{Deserialize, Serialize};

use crate::projection::Projection;
use crate::sort::Sort;

/// A bulk find against one collection.
///
/// `filter` is a MongoDB-style filter document; an empty document matches
/// every record. Results are returned in `sort` order, or the store's
/// natural order when `sort` is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    pub filter: Document,
    pub projection: Option<Projection>,
    pub sort: Vec<Sort>,
    pub populate: Option<PopulateSpec>,
}

/// Resolve references stored on the fetched documents, one level deep.
///
/// The value at `path` (an id or an array of ids) is replaced by the
/// referenced document(s). `model` names the referenced collection when the
/// store cannot infer it from the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulateSpec {
    pub path: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub select: Option<String>,
    #[serde(default)]
    pub filter: Option<Document>,
}

impl PopulateSpec {
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            model: None,
            select: None,
            filter: None,
        }
    }
}

impl From<&str> for PopulateSpec {
    fn from(path: &str) -> Self {
        PopulateSpec::path(path)
    }
}
