//! Parsing of the additional-tags image label.

/// Image label listing extra tags to apply, as a space-or-comma separated
/// list. These all mean the same thing:
///
/// ```text
/// LABEL ocitag.additional-tags="v1 v1.0"
/// LABEL ocitag.additional-tags="v1,v1.0"
/// LABEL ocitag.additional-tags="v1, v1.0"
/// ```
pub const ADDITIONAL_TAGS_LABEL: &str = "ocitag.additional-tags";

/// Split a label value into individual tags. Empty items are discarded.
pub fn parse_additional_tags(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_separated() {
        assert_eq!(parse_additional_tags("v1 v1.0"), vec!["v1", "v1.0"]);
    }

    #[test]
    fn comma_separated() {
        assert_eq!(parse_additional_tags("v1,v1.0"), vec!["v1", "v1.0"]);
    }

    #[test]
    fn comma_and_space_separated() {
        assert_eq!(parse_additional_tags("v1, v1.0"), vec!["v1", "v1.0"]);
        assert_eq!(parse_additional_tags(" v1 ,  v1.0 "), vec!["v1", "v1.0"]);
    }

    #[test]
    fn empty_value_yields_nothing() {
        assert!(parse_additional_tags("").is_empty());
        assert!(parse_additional_tags("  , ,, ").is_empty());
    }

    #[test]
    fn single_tag() {
        assert_eq!(parse_additional_tags("latest"), vec!["latest"]);
    }
}
