use bson::{Bson, Document};
use regex::Regex;

use crate::expression::Expression;

/// Parse error for filter documents.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParseError(pub String);

impl std::fmt::Display for FilterParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "filter parse error: {}", self.0)
    }
}

impl std::error::Error for FilterParseError {}

/// Parse a BSON filter document into an Expression tree.
///
/// Follows MongoDB query semantics:
/// - Top-level document is an implicit AND of all entries
/// - An empty document matches everything
/// - `{ "field": value }` is implicit `$eq`
/// - `{ "field": { "$gt": v } }` uses operator sub-documents
/// - `{ "field": { "$in": [a, b] } }` / `$nin` for membership
/// - `{ "$or": [...] }` / `{ "$and": [...] }` for explicit logical ops
/// - `{ "field": { "$regex": "pattern", "$options": "i" } }` for regex
/// - `{ "field": { "$exists": true } }` for field existence checks
pub fn parse_filter(doc: &Document) -> Result<Expression, FilterParseError> {
    let mut children = Vec::with_capacity(doc.len());

    for (key, value) in doc {
        match key.as_str() {
            "$and" => children.push(parse_logical_array(value, Expression::And)?),
            "$or" => children.push(parse_logical_array(value, Expression::Or)?),
            k if k.starts_with('$') => {
                return Err(FilterParseError(format!("unknown top-level operator: {k}")));
            }
            _ => children.push(parse_field_condition(key, value)?),
        }
    }

    match children.len() {
        1 => Ok(children.remove(0)),
        _ => Ok(Expression::And(children)),
    }
}

/// Parse a `$and` or `$or` array value into a logical expression.
fn parse_logical_array(
    value: &Bson,
    make: fn(Vec<Expression>) -> Expression,
) -> Result<Expression, FilterParseError> {
    let arr = match value {
        Bson::Array(a) => a,
        _ => return Err(FilterParseError("$and/$or value must be an array".into())),
    };

    let mut children = Vec::with_capacity(arr.len());
    for elem in arr {
        match elem {
            Bson::Document(sub_doc) => children.push(parse_filter(sub_doc)?),
            _ => {
                return Err(FilterParseError(
                    "$and/$or array elements must be documents".into(),
                ));
            }
        }
    }

    if children.is_empty() {
        return Err(FilterParseError("$and/$or array must not be empty".into()));
    }

    Ok(make(children))
}

/// Parse a field condition: either implicit $eq or an operator sub-document.
fn parse_field_condition(field: &str, value: &Bson) -> Result<Expression, FilterParseError> {
    // A document whose first key starts with $ is an operator doc
    if let Bson::Document(sub_doc) = value {
        if sub_doc.keys().next().is_some_and(|k| k.starts_with('$')) {
            return parse_operator_doc(field, sub_doc);
        }
    }

    Ok(Expression::Eq(field.to_string(), value.clone()))
}

/// Parse an operator sub-document like `{ "$gt": 21, "$lte": 100 }`.
fn parse_operator_doc(field: &str, doc: &Document) -> Result<Expression, FilterParseError> {
    if doc.contains_key("$regex") {
        return parse_regex(field, doc);
    }

    let mut conditions = Vec::with_capacity(doc.len());

    for (op_key, op_value) in doc {
        let f = field.to_string();
        let expr = match op_key.as_str() {
            "$eq" => Expression::Eq(f, op_value.clone()),
            "$ne" => Expression::Ne(f, op_value.clone()),
            "$gt" => Expression::Gt(f, op_value.clone()),
            "$gte" => Expression::Gte(f, op_value.clone()),
            "$lt" => Expression::Lt(f, op_value.clone()),
            "$lte" => Expression::Lte(f, op_value.clone()),
            "$in" => Expression::In(f, membership_values(op_key, op_value)?),
            "$nin" => Expression::Nin(f, membership_values(op_key, op_value)?),
            "$exists" => match op_value {
                Bson::Boolean(b) => Expression::Exists(f, *b),
                _ => return Err(FilterParseError("$exists value must be a boolean".into())),
            },
            "$options" => {
                return Err(FilterParseError("$options without $regex".into()));
            }
            k => return Err(FilterParseError(format!("unknown field operator: {k}"))),
        };
        conditions.push(expr);
    }

    match conditions.len() {
        0 => Err(FilterParseError("empty operator document".into())),
        1 => Ok(conditions.remove(0)),
        _ => Ok(Expression::And(conditions)),
    }
}

fn membership_values(op: &str, value: &Bson) -> Result<Vec<Bson>, FilterParseError> {
    match value {
        Bson::Array(values) => Ok(values.clone()),
        _ => Err(FilterParseError(format!("{op} value must be an array"))),
    }
}

/// Parse a `$regex` + optional `$options` sub-document.
fn parse_regex(field: &str, doc: &Document) -> Result<Expression, FilterParseError> {
    let mut pattern: Option<&str> = None;
    let mut options: Option<&str> = None;

    for (key, value) in doc {
        match key.as_str() {
            "$regex" => match value {
                Bson::String(s) => pattern = Some(s),
                _ => return Err(FilterParseError("$regex value must be a string".into())),
            },
            "$options" => match value {
                Bson::String(s) => options = Some(s),
                _ => return Err(FilterParseError("$options value must be a string".into())),
            },
            k => {
                return Err(FilterParseError(format!(
                    "unexpected key alongside $regex: {k}"
                )));
            }
        }
    }

    let pat = pattern.ok_or_else(|| FilterParseError("missing $regex pattern".into()))?;

    let full_pattern = match options {
        Some(opts) => {
            let mut prefix = String::with_capacity(4 + opts.len() + pat.len());
            prefix.push_str("(?");
            for ch in opts.chars() {
                match ch {
                    'i' | 's' | 'm' | 'x' => prefix.push(ch),
                    c => return Err(FilterParseError(format!("unknown regex option: {c}"))),
                }
            }
            prefix.push(')');
            prefix.push_str(pat);
            prefix
        }
        None => pat.to_string(),
    };

    let re = Regex::new(&full_pattern)
        .map_err(|e| FilterParseError(format!("invalid regex pattern: {e}")))?;

    Ok(Expression::Regex(field.to_string(), re))
}
