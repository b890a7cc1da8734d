use bson::{Bson, Document};
use slate_query::{get_path, id_key};
use tracing::trace;

use crate::index::ParentIndex;

/// How many related documents a parent field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// A single document; later matches replace earlier ones.
    One,
    /// An array of every match, in fetch order.
    Many,
}

impl Cardinality {
    pub fn from_array_pop(array_pop: bool) -> Self {
        if array_pop {
            Cardinality::Many
        } else {
            Cardinality::One
        }
    }
}

/// What reverse population attached to one parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Populated {
    One(Document),
    Many(Vec<Document>),
}

impl Populated {
    /// Read back the value attached under `field`, if any.
    pub fn read(parent: &Document, field: &str) -> Option<Populated> {
        match parent.get(field)? {
            Bson::Document(doc) => Some(Populated::One(doc.clone())),
            Bson::Array(items) => items
                .iter()
                .map(|item| item.as_document().cloned())
                .collect::<Option<Vec<_>>>()
                .map(Populated::Many),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Populated::One(_) => 1,
            Populated::Many(docs) => docs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn documents(&self) -> &[Document] {
        match self {
            Populated::One(doc) => std::slice::from_ref(doc),
            Populated::Many(docs) => docs,
        }
    }

    fn attach(slot: &mut Option<Populated>, related: Document, cardinality: Cardinality) {
        match cardinality {
            Cardinality::One => *slot = Some(Populated::One(related)),
            Cardinality::Many => match slot {
                Some(Populated::Many(docs)) => docs.push(related),
                _ => *slot = Some(Populated::Many(vec![related])),
            },
        }
    }
}

impl From<Populated> for Bson {
    fn from(populated: Populated) -> Self {
        match populated {
            Populated::One(doc) => Bson::Document(doc),
            Populated::Many(docs) => Bson::Array(docs.into_iter().map(Bson::Document).collect()),
        }
    }
}

/// Route each related document to the parent(s) its join key names.
///
/// Returns one slot per parent position. A join key holding an array fans
/// the document out to every parent it lists; unknown ids are skipped and a
/// document matching no parent is dropped.
pub(crate) fn group(
    related: Vec<Document>,
    index: &ParentIndex,
    parent_count: usize,
    id_field: &str,
    cardinality: Cardinality,
) -> Vec<Option<Populated>> {
    let mut slots: Vec<Option<Populated>> = vec![None; parent_count];
    let mut hits: Vec<usize> = Vec::new();

    for doc in related {
        hits.clear();
        match get_path(&doc, id_field) {
            Some(Bson::Array(ids)) => hits.extend(
                ids.iter()
                    .filter_map(id_key)
                    .filter_map(|key| index.position(&key)),
            ),
            Some(id) => hits.extend(id_key(id).and_then(|key| index.position(&key))),
            None => {}
        }

        let Some((&last, rest)) = hits.split_last() else {
            trace!(id = ?doc.get("_id"), id_field, "related document matches no parent");
            continue;
        };
        for &pos in rest {
            Populated::attach(&mut slots[pos], doc.clone(), cardinality);
        }
        Populated::attach(&mut slots[last], doc, cardinality);
    }

    slots
}

/// Merge grouped results into the parents. Parents without a slot are left
/// untouched. Returns how many parents received a value.
pub(crate) fn assign(
    parents: &mut [Document],
    slots: Vec<Option<Populated>>,
    store_where: &str,
) -> usize {
    let mut matched = 0;
    for (parent, slot) in parents.iter_mut().zip(slots) {
        if let Some(populated) = slot {
            parent.insert(store_where, Bson::from(populated));
            matched += 1;
        }
    }
    matched
}
