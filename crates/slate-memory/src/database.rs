use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use bson::oid::ObjectId;
use bson::{Bson, Document};
use slate_query::{FindQuery, parse_filter};
use tracing::debug;

use crate::collection::MemoryCollection;
use crate::config::CollectionConfig;
use crate::error::MemoryError;
use crate::{eval, populate, projection, sort};

pub(crate) struct CollectionData {
    pub(crate) config: CollectionConfig,
    pub(crate) docs: Vec<Document>,
}

/// A set of named in-memory collections.
///
/// Cloning is cheap and every clone sees the same data.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    inner: Arc<RwLock<HashMap<String, CollectionData>>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_collection(&self, config: CollectionConfig) -> Result<(), MemoryError> {
        let mut collections = self.inner.write().map_err(|_| MemoryError::Poisoned)?;
        if collections.contains_key(&config.name) {
            return Err(MemoryError::CollectionExists(config.name));
        }
        collections.insert(
            config.name.clone(),
            CollectionData {
                config,
                docs: Vec::new(),
            },
        );
        Ok(())
    }

    pub fn collection(&self, name: impl Into<String>) -> MemoryCollection {
        MemoryCollection::new(self.clone(), name.into())
    }

    /// Append documents in order, assigning an `ObjectId` to any without
    /// `_id`. Returns the ids of the inserted documents.
    pub fn insert_many(
        &self,
        collection: &str,
        docs: impl IntoIterator<Item = Document>,
    ) -> Result<Vec<Bson>, MemoryError> {
        let mut collections = self.inner.write().map_err(|_| MemoryError::Poisoned)?;
        let data = collections
            .get_mut(collection)
            .ok_or_else(|| MemoryError::CollectionNotFound(collection.to_string()))?;

        let mut ids = Vec::new();
        for mut doc in docs {
            if !doc.contains_key("_id") {
                doc.insert("_id", ObjectId::new());
            }
            if let Some(id) = doc.get("_id") {
                ids.push(id.clone());
            }
            data.docs.push(doc);
        }
        Ok(ids)
    }

    /// Run a query: filter → sort → projection → nested populate.
    pub fn find(&self, collection: &str, query: &FindQuery) -> Result<Vec<Document>, MemoryError> {
        let collections = self.inner.read().map_err(|_| MemoryError::Poisoned)?;
        let data = collections
            .get(collection)
            .ok_or_else(|| MemoryError::CollectionNotFound(collection.to_string()))?;

        let predicate = parse_filter(&query.filter)?;
        if let Some(p) = &query.projection {
            projection::validate(p)?;
        }

        let mut docs: Vec<Document> = data
            .docs
            .iter()
            .filter(|doc| eval::matches(doc, &predicate))
            .cloned()
            .collect();

        sort::sort_documents(&mut docs, &query.sort);

        if let Some(p) = &query.projection {
            for doc in &mut docs {
                projection::apply(doc, p);
            }
        }

        if let Some(spec) = &query.populate {
            populate::resolve(&collections, &data.config, spec, &mut docs)?;
        }

        debug!(
            collection,
            scanned = data.docs.len(),
            returned = docs.len(),
            "memory find"
        );
        Ok(docs)
    }
}
