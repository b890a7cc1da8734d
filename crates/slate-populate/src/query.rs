use std::collections::HashSet;

use bson::{Bson, Document, doc};
use slate_query::{FindQuery, Model, id_key};

use crate::PARENT_ID;
use crate::options::PopulateOptions;

/// Build the single bulk query for a call: related documents whose join key
/// is one of the parents' ids, narrowed by the caller's filters.
///
/// A caller projection is extended so the join key is always fetched.
/// Sort and nested populate pass through untouched.
pub(crate) fn build_query<M: Model>(options: &PopulateOptions<'_, M>) -> FindQuery {
    let mut membership = Document::new();
    membership.insert(
        options.id_field.clone(),
        doc! { "$in": parent_ids(&options.model_array) },
    );

    let projection = options.select.clone().map(|mut projection| {
        projection.ensure_included(&options.id_field);
        projection
    });

    FindQuery {
        filter: merge_filters(options.filters.as_ref(), membership),
        projection,
        sort: options.sort.clone(),
        populate: options.populate.clone(),
    }
}

/// Distinct parent identifiers, in first-seen order. Parents without an
/// identifier cannot be referenced and are skipped.
pub(crate) fn parent_ids(parents: &[Document]) -> Vec<Bson> {
    let mut seen = HashSet::with_capacity(parents.len());
    parents
        .iter()
        .filter_map(|parent| parent.get(PARENT_ID))
        .filter(|id| id_key(id).is_some_and(|key| seen.insert(key)))
        .cloned()
        .collect()
}

/// AND the caller's filter with the id-membership condition.
///
/// - No caller filter (or an empty one) → membership alone
/// - Otherwise → `{ "$and": [caller, membership] }`
pub(crate) fn merge_filters(caller: Option<&Document>, membership: Document) -> Document {
    match caller {
        Some(filters) if !filters.is_empty() => doc! {
            "$and": [Bson::Document(filters.clone()), Bson::Document(membership)]
        },
        _ => membership,
    }
}
