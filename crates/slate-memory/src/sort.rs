use std::cmp::Ordering;

use bson::{Bson, Document};
use slate_query::{Sort, SortDirection, get_path};

use crate::eval;

/// Stable multi-key sort. Missing and null values order before everything
/// else; values of incomparable types compare equal.
///
/// Array-valued keys are not unwound: they compare equal to everything, so
/// those documents keep their insertion order rather than sorting by their
/// smallest or largest element as MongoDB does.
pub(crate) fn sort_documents(docs: &mut [Document], sorts: &[Sort]) {
    if sorts.is_empty() {
        return;
    }

    docs.sort_by(|a, b| {
        for sort in sorts {
            let ord = compare_field_values(get_path(a, &sort.field), get_path(b, &sort.field));
            let ord = match sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

fn compare_field_values(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (None | Some(Bson::Null), None | Some(Bson::Null)) => Ordering::Equal,
        (None | Some(Bson::Null), Some(_)) => Ordering::Less,
        (Some(_), None | Some(Bson::Null)) => Ordering::Greater,
        (Some(a), Some(b)) => eval::value_cmp(a, b).unwrap_or(Ordering::Equal),
    }
}
