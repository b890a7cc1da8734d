use std::future::Future;

use bson::Document;

use crate::query::FindQuery;

/// The query interface of one collection.
///
/// Implementors own connection handling and query execution: filtering,
/// projection, sorting and nested population all happen inside `find`.
/// A failed `find` is reported as-is; callers do not retry.
pub trait Model: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn find(
        &self,
        query: FindQuery,
    ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send;
}
