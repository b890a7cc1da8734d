use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Parse a whitespace-separated sort string such as `"-rank title"`.
///
/// A leading `-` sorts that field descending, a leading `+` (or nothing)
/// ascending. Keys are applied in the order given.
pub fn parse_sort(spec: &str) -> Vec<Sort> {
    spec.split_whitespace()
        .filter_map(|token| {
            if let Some(field) = token.strip_prefix('-') {
                (!field.is_empty()).then(|| Sort::desc(field))
            } else {
                let field = token.strip_prefix('+').unwrap_or(token);
                (!field.is_empty()).then(|| Sort::asc(field))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_directions_in_order() {
        assert_eq!(
            parse_sort("-rank title +age"),
            vec![Sort::desc("rank"), Sort::asc("title"), Sort::asc("age")]
        );
    }

    #[test]
    fn blank_and_bare_sign_tokens_are_ignored() {
        assert_eq!(parse_sort("  - +  "), vec![]);
        assert!(parse_sort("").is_empty());
    }
}
