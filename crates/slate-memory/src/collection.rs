use bson::{Bson, Document};
use slate_query::{FindQuery, Model};

use crate::database::MemoryDatabase;
use crate::error::MemoryError;

/// Handle to one collection of a [`MemoryDatabase`].
#[derive(Clone)]
pub struct MemoryCollection {
    db: MemoryDatabase,
    name: String,
}

impl MemoryCollection {
    pub(crate) fn new(db: MemoryDatabase, name: String) -> Self {
        Self { db, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert_many(
        &self,
        docs: impl IntoIterator<Item = Document>,
    ) -> Result<Vec<Bson>, MemoryError> {
        self.db.insert_many(&self.name, docs)
    }
}

impl Model for MemoryCollection {
    type Error = MemoryError;

    async fn find(&self, query: FindQuery) -> Result<Vec<Document>, MemoryError> {
        self.db.find(&self.name, &query)
    }
}
