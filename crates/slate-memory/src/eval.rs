use std::cmp::Ordering;

use bson::{Bson, Document};
use slate_query::Expression;

/// Evaluate whether a document matches the given expression.
pub(crate) fn matches(doc: &Document, expr: &Expression) -> bool {
    match expr {
        Expression::And(children) => children.iter().all(|child| matches(doc, child)),
        Expression::Or(children) => children.iter().any(|child| matches(doc, child)),
        Expression::Eq(field, val) => eq_any(&path_values(doc, field), val),
        Expression::Ne(field, val) => !eq_any(&path_values(doc, field), val),
        Expression::In(field, set) => {
            let values = path_values(doc, field);
            set.iter().any(|candidate| eq_any(&values, candidate))
        }
        Expression::Nin(field, set) => {
            let values = path_values(doc, field);
            !set.iter().any(|candidate| eq_any(&values, candidate))
        }
        Expression::Gt(field, val)
        | Expression::Gte(field, val)
        | Expression::Lt(field, val)
        | Expression::Lte(field, val) => {
            let predicate: fn(Ordering) -> bool = match expr {
                Expression::Gt(..) => |o| o == Ordering::Greater,
                Expression::Gte(..) => |o| o != Ordering::Less,
                Expression::Lt(..) => |o| o == Ordering::Less,
                _ => |o| o != Ordering::Greater,
            };
            leaf_values(&path_values(doc, field))
                .any(|v| value_cmp(v, val).is_some_and(predicate))
        }
        Expression::Regex(field, re) => leaf_values(&path_values(doc, field))
            .any(|v| matches!(v, Bson::String(s) if re.is_match(s))),
        Expression::Exists(field, expected) => {
            // $exists checks physical presence — even a null value counts
            *expected == !path_values(doc, field).is_empty()
        }
    }
}

/// $eq semantics: null matches missing fields and explicit nulls; an array
/// field matches when the whole array or any element is equal.
fn eq_any(values: &[&Bson], query_val: &Bson) -> bool {
    if matches!(query_val, Bson::Null) && values.is_empty() {
        return true;
    }
    values.iter().any(|v| {
        value_eq(v, query_val)
            || matches!(v, Bson::Array(arr) if arr.iter().any(|e| value_eq(e, query_val)))
    })
}

/// Array values expand to their elements; scalars pass through.
fn leaf_values<'a>(values: &'a [&'a Bson]) -> impl Iterator<Item = &'a Bson> {
    values.iter().copied().flat_map(|v: &'a Bson| -> Vec<&'a Bson> {
        match v {
            Bson::Array(arr) => arr.iter().collect(),
            other => vec![other],
        }
    })
}

/// Collect every value reachable through a dot-separated path.
///
/// Arrays of embedded documents in the middle of the path are traversed
/// element by element:
///
/// - `"status"`          → `[String("active")]`
/// - `"address.city"`    → `[String("Austin")]`
/// - `"items.sku"`       → `[String("A1"), String("B2")]`
pub(crate) fn path_values<'a>(doc: &'a Document, path: &str) -> Vec<&'a Bson> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut out = Vec::new();
    collect_from_doc(doc, &segments, &mut out);
    out
}

fn collect_from_doc<'a>(doc: &'a Document, segments: &[&str], out: &mut Vec<&'a Bson>) {
    let Some((seg, rest)) = segments.split_first() else {
        return;
    };
    if let Some(value) = doc.get(*seg) {
        collect_from_value(value, rest, out);
    }
}

fn collect_from_value<'a>(value: &'a Bson, segments: &[&str], out: &mut Vec<&'a Bson>) {
    if segments.is_empty() {
        out.push(value);
        return;
    }
    match value {
        Bson::Document(d) => collect_from_doc(d, segments, out),
        Bson::Array(arr) => {
            for elem in arr {
                if let Bson::Document(d) = elem {
                    collect_from_doc(d, segments, out);
                }
            }
        }
        _ => {}
    }
}

/// Equality with numeric coercion across integer and double widths.
pub(crate) fn value_eq(a: &Bson, b: &Bson) -> bool {
    match (a, b) {
        (Bson::Int32(x), Bson::Int64(y)) => (*x as i64) == *y,
        (Bson::Int64(x), Bson::Int32(y)) => *x == (*y as i64),
        (Bson::Double(x), Bson::Int64(y)) => *x == (*y as f64),
        (Bson::Double(x), Bson::Int32(y)) => *x == (*y as f64),
        (Bson::Int64(x), Bson::Double(y)) => (*x as f64) == *y,
        (Bson::Int32(x), Bson::Double(y)) => (*x as f64) == *y,
        (Bson::DateTime(x), Bson::DateTime(y)) => x.timestamp_millis() == y.timestamp_millis(),
        _ => a == b,
    }
}

/// Ordering between two values of comparable types; `None` when the types
/// cannot be compared (silent exclusion for range operators).
pub(crate) fn value_cmp(a: &Bson, b: &Bson) -> Option<Ordering> {
    match (a, b) {
        (Bson::String(x), Bson::String(y)) => Some(x.cmp(y)),
        (Bson::Int32(x), Bson::Int32(y)) => Some(x.cmp(y)),
        (Bson::Int64(x), Bson::Int64(y)) => Some(x.cmp(y)),
        (Bson::Int32(x), Bson::Int64(y)) => Some((*x as i64).cmp(y)),
        (Bson::Int64(x), Bson::Int32(y)) => Some(x.cmp(&(*y as i64))),
        (Bson::Double(x), Bson::Double(y)) => x.partial_cmp(y),
        (Bson::Double(x), Bson::Int64(y)) => x.partial_cmp(&(*y as f64)),
        (Bson::Double(x), Bson::Int32(y)) => x.partial_cmp(&(*y as f64)),
        (Bson::Int64(x), Bson::Double(y)) => (*x as f64).partial_cmp(y),
        (Bson::Int32(x), Bson::Double(y)) => (*x as f64).partial_cmp(y),
        (Bson::Boolean(x), Bson::Boolean(y)) => Some(x.cmp(y)),
        (Bson::DateTime(x), Bson::DateTime(y)) => {
            Some(x.timestamp_millis().cmp(&y.timestamp_millis()))
        }
        (Bson::ObjectId(x), Bson::ObjectId(y)) => Some(x.bytes().cmp(&y.bytes())),
        _ => None,
    }
}
