use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

// Same rule the warehouse API enforces for table and column names.
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("identifier pattern is valid"));

/// Returns true if `name` is a valid warehouse or field identifier.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Validate a name before it is placed in a URL path segment.
pub fn validate_identifier(name: &str) -> Result<&str> {
    if is_identifier(name) {
        Ok(name)
    } else {
        Err(Error::InvalidIdentifier(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_sql_style_names() {
        assert!(is_identifier("widgets"));
        assert!(is_identifier("created_at"));
        assert!(is_identifier("Field_2"));
    }

    #[test]
    fn test_rejects_path_and_query_characters() {
        assert!(!is_identifier(""));
        assert!(!is_identifier("../etc"));
        assert!(!is_identifier("name?x=1"));
        assert!(!is_identifier("has space"));
        assert_eq!(
            validate_identifier("a/b"),
            Err(Error::InvalidIdentifier("a/b".to_string()))
        );
    }
}
