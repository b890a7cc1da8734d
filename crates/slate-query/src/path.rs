use bson::{Bson, Document};

/// Walk a dot-separated path through nested documents.
///
/// - `"status"`       → the top-level `status` value
/// - `"meta.owner"`   → `owner` inside the embedded `meta` document
///
/// Returns `None` if any segment is missing or a non-final segment is not a
/// document.
pub fn get_path<'a>(doc: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut segments = path.split('.');
    let mut current = doc.get(segments.next()?)?;
    for seg in segments {
        current = match current {
            Bson::Document(d) => d.get(seg)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Stringify an identifier for use as a lookup key.
///
/// `ObjectId`s become their hex form, strings are used as-is, integers in
/// decimal (an integral double keys like the integer it equals). Binary
/// values such as UUIDs key by subtype and hex bytes, other scalars by a
/// tagged rendering. An embedded document stands for the record it was
/// populated from and is keyed by its own `_id`. Null, undefined, arrays and
/// documents without `_id` cannot identify a record and yield `None`.
pub fn id_key(value: &Bson) -> Option<String> {
    match value {
        Bson::ObjectId(oid) => Some(oid.to_hex()),
        Bson::String(s) => Some(s.clone()),
        Bson::Int32(n) => Some(n.to_string()),
        Bson::Int64(n) => Some(n.to_string()),
        Bson::Double(f) if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => {
            Some((*f as i64).to_string())
        }
        Bson::Double(f) => Some(f.to_string()),
        Bson::Binary(bin) => Some(format!(
            "bin:{:02x}:{}",
            u8::from(bin.subtype),
            hex(&bin.bytes)
        )),
        Bson::DateTime(dt) => Some(format!("date:{}", dt.timestamp_millis())),
        Bson::Boolean(b) => Some(format!("bool:{b}")),
        Bson::Timestamp(ts) => Some(format!("ts:{}:{}", ts.time, ts.increment)),
        Bson::Document(d) => d.get("_id").and_then(id_key),
        Bson::Null | Bson::Undefined | Bson::Array(_) => None,
        other => Some(other.to_string()),
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
