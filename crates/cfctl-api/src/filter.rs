//! Server-side query filters.
//!
//! A filter is an ordered list of `field:value` pairs. On the wire the pairs
//! are joined with `;` and the whole expression is form-urlencoded into a
//! single `q` query parameter.

use std::fmt;

use url::form_urlencoded;

/// Ordered `field:value` filter expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pairs: Vec<(String, String)>,
}

impl Filter {
    /// Creates an empty filter.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Creates a filter with a single `field:value` pair.
    #[must_use]
    pub fn by(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new().and(field, value)
    }

    /// Appends a `field:value` pair.
    #[must_use]
    pub fn and(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((field.into(), value.into()));
        self
    }

    /// Returns true if no pairs were added.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The raw expression, `field:value[;field:value...]`.
    pub fn expression(&self) -> String {
        self.pairs
            .iter()
            .map(|(field, value)| format!("{field}:{value}"))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// The query string fragment, `q=<encoded expression>`.
    pub fn to_query(&self) -> String {
        let encoded: String =
            form_urlencoded::byte_serialize(self.expression().as_bytes()).collect();
        format!("q={encoded}")
    }

    /// Key identifying the looked-up entity in not-found reports: the values
    /// joined by a space.
    pub fn lookup_key(&self) -> String {
        self.pairs
            .iter()
            .map(|(_, value)| value.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_pair_query() {
        let filter = Filter::by("name", "staging");
        assert_eq!(filter.expression(), "name:staging");
        assert_eq!(filter.to_query(), "q=name%3Astaging");
        assert_eq!(filter.lookup_key(), "staging");
    }

    #[test]
    fn pairs_join_with_semicolon_and_encode_as_one_parameter() {
        let filter = Filter::by("label", "mysql").and("provider", "core");
        assert_eq!(filter.expression(), "label:mysql;provider:core");
        assert_eq!(filter.to_query(), "q=label%3Amysql%3Bprovider%3Acore");
        assert_eq!(filter.lookup_key(), "mysql core");
    }

    #[test]
    fn spaces_and_reserved_characters_are_escaped() {
        let filter = Filter::by("name", "my app&co");
        assert_eq!(filter.to_query(), "q=name%3Amy+app%26co");
    }

    #[test]
    fn empty_filter() {
        let filter = Filter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.expression(), "");
    }

    proptest! {
        #[test]
        fn encoded_query_decodes_to_expression(field in "[a-z_]{1,12}", value in "\\PC{0,24}") {
            let filter = Filter::by(field, value);
            let query = filter.to_query();
            let decoded: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect();
            prop_assert_eq!(decoded.len(), 1);
            prop_assert_eq!(&decoded[0].0, "q");
            prop_assert_eq!(&decoded[0].1, &filter.expression());
        }
    }
}
