use std::fmt;

/// A field projection parsed from a select string such as `"title -body"`.
///
/// Each entry records a field path and whether it is included (`true`) or
/// excluded (`false`). Parsing never fails: whether the combination is
/// executable (MongoDB rejects mixed inclusion and exclusion, `_id` aside)
/// is decided by the store running the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    fields: Vec<(String, bool)>,
}

impl Projection {
    /// Parse a whitespace-separated select string.
    ///
    /// `-field` excludes, `field` and `+field` include.
    pub fn parse(select: &str) -> Self {
        let mut projection = Projection::default();
        for token in select.split_whitespace() {
            let (field, included) = match token.strip_prefix('-') {
                Some(field) => (field, false),
                None => (token.strip_prefix('+').unwrap_or(token), true),
            };
            if !field.is_empty() {
                projection.set(field, included);
            }
        }
        projection
    }

    pub fn include(fields: &[&str]) -> Self {
        let mut projection = Projection::default();
        for field in fields {
            projection.set(field, true);
        }
        projection
    }

    pub fn fields(&self) -> &[(String, bool)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields explicitly included.
    pub fn included(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter(|(_, inc)| *inc).map(|(f, _)| f.as_str())
    }

    /// Fields explicitly excluded.
    pub fn excluded(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter(|(_, inc)| !*inc).map(|(f, _)| f.as_str())
    }

    /// True when the projection lists the fields to keep. Any inclusion
    /// counts, `_id` alone too, unless a field other than `_id` is also
    /// excluded.
    pub fn is_inclusive(&self) -> bool {
        self.included().next().is_some() && !self.excluded().any(|f| f != "_id")
    }

    /// Guarantee `field` survives this projection.
    ///
    /// Exclusions of the field (or of any sub-path under it) are dropped.
    /// In inclusion mode the field is appended unless already included.
    pub fn ensure_included(&mut self, field: &str) {
        self.fields
            .retain(|(f, inc)| *inc || !(f == field || is_sub_path(f, field)));

        if self.is_inclusive() && !self.included().any(|f| f == field) {
            self.fields.push((field.to_string(), true));
        }
    }

    fn set(&mut self, field: &str, included: bool) {
        match self.fields.iter_mut().find(|(f, _)| f == field) {
            Some(entry) => entry.1 = included,
            None => self.fields.push((field.to_string(), included)),
        }
    }
}

fn is_sub_path(path: &str, parent: &str) -> bool {
    path.len() > parent.len() && path.starts_with(parent) && path.as_bytes()[parent.len()] == b'.'
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, included)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if !included {
                f.write_str("-")?;
            }
            f.write_str(field)?;
        }
        Ok(())
    }
}

impl From<&str> for Projection {
    fn from(select: &str) -> Self {
        Projection::parse(select)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_inclusion_and_exclusion() {
        let p = Projection::parse("title +secret -_id");
        assert_eq!(
            p.fields(),
            &[
                ("title".to_string(), true),
                ("secret".to_string(), true),
                ("_id".to_string(), false)
            ]
        );
        assert!(p.is_inclusive());
    }

    #[test]
    fn ensure_appends_missing_field_in_inclusion_mode() {
        let mut p = Projection::parse("title");
        p.ensure_included("author");
        assert_eq!(p.to_string(), "title author");
    }

    #[test]
    fn ensure_is_not_fooled_by_substrings() {
        let mut p = Projection::parse("authorName");
        p.ensure_included("author");
        assert_eq!(p.to_string(), "authorName author");
    }

    #[test]
    fn ensure_leaves_already_included_field_alone() {
        let mut p = Projection::parse("author title");
        p.ensure_included("author");
        assert_eq!(p.to_string(), "author title");
    }

    #[test]
    fn ensure_drops_exclusion_of_field_and_sub_paths() {
        let mut p = Projection::parse("-author -author.name -body -authors");
        p.ensure_included("author");
        assert_eq!(p.to_string(), "-body -authors");
        assert!(!p.is_inclusive());
    }

    #[test]
    fn ensure_id_reverses_id_exclusion() {
        let mut p = Projection::parse("title -_id");
        p.ensure_included("_id");
        assert_eq!(p.to_string(), "title _id");
    }

    #[test]
    fn id_alone_is_an_inclusion_projection() {
        let mut p = Projection::parse("_id");
        assert!(p.is_inclusive());
        p.ensure_included("author");
        assert_eq!(p.to_string(), "_id author");
    }

    #[test]
    fn id_exclusion_alone_stays_exclusive() {
        let mut p = Projection::parse("-_id");
        assert!(!p.is_inclusive());
        p.ensure_included("_id");
        assert!(p.is_empty());

        let mut p = Projection::parse("-body");
        p.ensure_included("_id");
        assert_eq!(p.to_string(), "-body");
    }

    #[test]
    fn later_token_wins_for_same_field() {
        let p = Projection::parse("title -title");
        assert_eq!(p.to_string(), "-title");
    }
}
