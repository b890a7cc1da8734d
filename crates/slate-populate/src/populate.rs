use bson::Document;
use slate_query::Model;
use tracing::debug;

use crate::error::PopulateError;
use crate::group;
use crate::index::ParentIndex;
use crate::options::PopulateOptions;
use crate::query;

/// Attach to each parent the related documents that reference it.
///
/// Issues exactly one `find` against `options.model` (none at all for an
/// empty parent collection). The parents come back in their original order
/// and number, each carrying `store_where` when at least one related
/// document matched it. A failed fetch aborts the call and nothing is
/// returned but the model's error.
pub async fn reverse_populate<M: Model>(
    options: PopulateOptions<'_, M>,
) -> Result<Vec<Document>, PopulateError<M::Error>> {
    if options.model_array.is_empty() {
        debug!(store_where = %options.store_where, "no parents, skipping fetch");
        return Ok(options.model_array);
    }

    let query = query::build_query(&options);
    let index = ParentIndex::build(&options.model_array);

    let related = options
        .model
        .find(query)
        .await
        .map_err(PopulateError::Fetch)?;
    let fetched = related.len();

    let PopulateOptions {
        model_array: mut parents,
        store_where,
        cardinality,
        id_field,
        ..
    } = options;

    let slots = group::group(related, &index, parents.len(), &id_field, cardinality);
    let matched = group::assign(&mut parents, slots, &store_where);

    debug!(
        parents = parents.len(),
        indexed = index.len(),
        fetched,
        matched,
        store_where = %store_where,
        id_field = %id_field,
        ?cardinality,
        "reverse populate complete"
    );
    Ok(parents)
}
