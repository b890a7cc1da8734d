use std::collections::HashMap;

use bson::Document;
use slate_query::id_key;

use crate::PARENT_ID;

/// Stringified parent id → position in the parent collection.
///
/// When two parents share an id the later one owns the key.
pub(crate) struct ParentIndex {
    positions: HashMap<String, usize>,
}

impl ParentIndex {
    pub(crate) fn build(parents: &[Document]) -> Self {
        let mut positions = HashMap::with_capacity(parents.len());
        for (pos, parent) in parents.iter().enumerate() {
            if let Some(key) = parent.get(PARENT_ID).and_then(id_key) {
                positions.insert(key, pos);
            }
        }
        Self { positions }
    }

    pub(crate) fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use bson::oid::ObjectId;

    #[test]
    fn one_entry_per_id() {
        let oid = ObjectId::new();
        let parents = vec![doc! { "_id": "a1" }, doc! { "_id": oid }, doc! { "name": "no id" }];
        let index = ParentIndex::build(&parents);
        assert_eq!(index.len(), 2);
        assert_eq!(index.position("a1"), Some(0));
        assert_eq!(index.position(&oid.to_hex()), Some(1));
        assert_eq!(index.position("missing"), None);
    }

    #[test]
    fn later_duplicate_wins() {
        let parents = vec![doc! { "_id": "a1", "n": 1_i32 }, doc! { "_id": "a1", "n": 2_i32 }];
        let index = ParentIndex::build(&parents);
        assert_eq!(index.len(), 1);
        assert_eq!(index.position("a1"), Some(1));
    }
}
