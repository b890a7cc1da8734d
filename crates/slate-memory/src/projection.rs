use std::collections::{HashMap, HashSet};

use bson::{Bson, Document};
use slate_query::Projection;

use crate::error::MemoryError;

/// Check a projection is executable: inclusion and exclusion cannot be
/// mixed, except for excluding `_id` from an inclusion projection.
pub(crate) fn validate(projection: &Projection) -> Result<(), MemoryError> {
    let includes_field = projection.included().any(|f| f != "_id");
    if includes_field {
        if let Some(field) = projection.excluded().find(|f| *f != "_id") {
            return Err(MemoryError::InvalidQuery(format!(
                "cannot exclude {field} in an inclusion projection"
            )));
        }
    }
    Ok(())
}

/// Apply a validated projection in place.
pub(crate) fn apply(doc: &mut Document, projection: &Projection) {
    if projection.is_inclusive() {
        let columns: Vec<&str> = projection.included().collect();
        let keep_id = !projection.excluded().any(|f| f == "_id");
        apply_inclusion(doc, &columns, keep_id);
    } else {
        for field in projection.excluded() {
            remove_path(doc, field);
        }
    }
}

/// Keep only the listed columns, supporting dot-notation paths. For dotted
/// paths like "address.city", keeps `{ "address": { "city": <value> } }`.
fn apply_inclusion(doc: &mut Document, columns: &[&str], keep_id: bool) {
    // Separate flat keys from dotted paths grouped by top-level key
    let mut flat_keys: HashSet<&str> = HashSet::new();
    let mut nested: HashMap<&str, Vec<&str>> = HashMap::new();

    for &col in columns {
        match col.split_once('.') {
            Some((top, rest)) => nested.entry(top).or_default().push(rest),
            None => {
                flat_keys.insert(col);
            }
        }
    }

    let keys_to_remove: Vec<String> = doc
        .keys()
        .filter(|k| {
            let k = k.as_str();
            !(k == "_id" && keep_id) && !flat_keys.contains(k) && !nested.contains_key(k)
        })
        .cloned()
        .collect();
    for key in keys_to_remove {
        doc.remove(&key);
    }

    // A flat include of the top-level key keeps the whole sub-document
    for (top_key, sub_paths) in &nested {
        if flat_keys.contains(top_key) {
            continue;
        }
        if let Some(Bson::Document(sub_doc)) = doc.get_mut(*top_key) {
            apply_inclusion(sub_doc, sub_paths, false);
        }
    }
}

fn remove_path(doc: &mut Document, path: &str) {
    match path.split_once('.') {
        None => {
            doc.remove(path);
        }
        Some((top, rest)) => {
            if let Some(Bson::Document(sub_doc)) = doc.get_mut(top) {
                remove_path(sub_doc, rest);
            }
        }
    }
}
