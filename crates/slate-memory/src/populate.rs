use std::collections::{HashMap, HashSet};

use bson::{Bson, Document};
use slate_query::{Expression, PopulateSpec, Projection, get_path, id_key, parse_filter};

use crate::config::CollectionConfig;
use crate::database::CollectionData;
use crate::error::MemoryError;
use crate::{eval, projection};

/// Replace the reference at `spec.path` in every document with the
/// referenced record(s). Scalar references that resolve to nothing become
/// `null`; unresolved entries of a reference array are dropped.
pub(crate) fn resolve(
    collections: &HashMap<String, CollectionData>,
    config: &CollectionConfig,
    spec: &PopulateSpec,
    docs: &mut [Document],
) -> Result<(), MemoryError> {
    let target = spec
        .model
        .as_deref()
        .or_else(|| config.refs.get(&spec.path).map(String::as_str))
        .ok_or_else(|| {
            MemoryError::InvalidQuery(format!("no reference configured for path {}", spec.path))
        })?;
    let target_data = collections
        .get(target)
        .ok_or_else(|| MemoryError::CollectionNotFound(target.to_string()))?;

    let predicate = match &spec.filter {
        Some(filter) => parse_filter(filter)?,
        None => Expression::all(),
    };
    let select = spec.select.as_deref().map(Projection::parse);
    if let Some(p) = &select {
        projection::validate(p)?;
    }

    let mut wanted: HashSet<String> = HashSet::new();
    for doc in docs.iter() {
        match get_path(doc, &spec.path) {
            Some(Bson::Array(ids)) => wanted.extend(ids.iter().filter_map(id_key)),
            Some(id) => wanted.extend(id_key(id)),
            None => {}
        }
    }

    let mut lookup: HashMap<String, Document> = HashMap::with_capacity(wanted.len());
    for candidate in &target_data.docs {
        let Some(key) = candidate.get("_id").and_then(id_key) else {
            continue;
        };
        if !wanted.contains(&key) || !eval::matches(candidate, &predicate) {
            continue;
        }
        let mut referenced = candidate.clone();
        if let Some(p) = &select {
            projection::apply(&mut referenced, p);
        }
        lookup.insert(key, referenced);
    }

    let find = |id: &Bson| {
        id_key(id)
            .and_then(|k| lookup.get(&k))
            .map(|d| Bson::Document(d.clone()))
    };

    for doc in docs.iter_mut() {
        let Some(slot) = get_path_mut(doc, &spec.path) else {
            continue;
        };
        let resolved = match &*slot {
            Bson::Array(ids) => Bson::Array(ids.iter().filter_map(find).collect()),
            id => find(id).unwrap_or(Bson::Null),
        };
        *slot = resolved;
    }

    Ok(())
}

fn get_path_mut<'a>(doc: &'a mut Document, path: &str) -> Option<&'a mut Bson> {
    match path.split_once('.') {
        None => doc.get_mut(path),
        Some((top, rest)) => match doc.get_mut(top)? {
            Bson::Document(sub) => get_path_mut(sub, rest),
            _ => None,
        },
    }
}
