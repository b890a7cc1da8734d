use bson::Document;
use serde::{Deserialize, Serialize};
use slate_query::PopulateSpec;

/// The serializable part of a reverse-population call.
///
/// Everything except the parent documents and the model handle can live in
/// configuration. Absent (or `null`) entries stay unset, so a config missing
/// a required option fails validation the same way a builder call would.
/// The camelCase names used by JavaScript callers are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulateConfig {
    #[serde(default, alias = "storeWhere")]
    pub store_where: Option<String>,
    #[serde(default, alias = "arrayPop")]
    pub array_pop: Option<bool>,
    #[serde(default, alias = "idField")]
    pub id_field: Option<String>,
    #[serde(default)]
    pub filters: Option<Document>,
    /// Sort string, e.g. `"-rank title"`.
    #[serde(default)]
    pub sort: Option<String>,
    /// Select string, e.g. `"title -body"`.
    #[serde(default)]
    pub select: Option<String>,
    #[serde(default)]
    pub populate: Option<PopulateSpec>,
}
