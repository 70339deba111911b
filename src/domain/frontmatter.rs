//! Front matter parsing
//!
//! Documents may start with a metadata block delimited by two `---` lines.
//! Only a small `key: value` subset of YAML is understood: continuation
//! lines (indented or `- ` list items) are folded into the previous value,
//! and every value stays plain text.

use std::collections::BTreeMap;

/// Delimiter line that opens and closes a front matter block
const DELIMITER: &str = "---";

/// Flat field map parsed from a document's front matter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter(BTreeMap<String, String>);

impl FrontMatter {
    /// Creates an empty mapping
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Parses the leading front matter block of `text`.
    ///
    /// Returns an empty mapping when the text does not open with a `---`
    /// line or the block is never closed.
    pub fn parse(text: &str) -> Self {
        let mut lines = text.split('\n');

        match lines.next() {
            Some(first) if is_delimiter(first) => {}
            _ => return Self::new(),
        }

        let mut block = Vec::new();
        let mut closed = false;
        for line in lines {
            if is_delimiter(line) {
                closed = true;
                break;
            }
            block.push(line);
        }

        if !closed {
            return Self::new();
        }

        Self::parse_block(&block)
    }

    fn parse_block(block: &[&str]) -> Self {
        let mut fields: BTreeMap<String, String> = BTreeMap::new();
        let mut current_key: Option<String> = None;

        for raw in block {
            let line = raw.trim_end();
            if line.is_empty() {
                continue;
            }

            if is_continuation(line) {
                let key = current_key.as_deref().filter(|k| !k.is_empty());
                if let Some(value) = key.and_then(|k| fields.get_mut(k)) {
                    value.push(' ');
                    value.push_str(line.trim());
                    continue;
                }
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };

            let key = key.trim().to_string();
            fields.insert(key.clone(), value.trim().to_string());
            current_key = Some(key);
        }

        Self(fields)
    }

    /// Gets a field value by its exact (case-sensitive) name
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Gets a field value, treating an absent field as empty
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Returns true if no fields were parsed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of parsed fields
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

fn is_delimiter(line: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == DELIMITER
}

fn is_continuation(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t') || line.starts_with("- ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_simple_field() {
        let fm = FrontMatter::parse("---\nkey: value\n---\n");
        assert_eq!(fm.len(), 1);
        assert_eq!(fm.get("key"), Some("value"));
    }

    #[test]
    fn folds_continuation_lines() {
        let fm = FrontMatter::parse("---\nkey: v1\n  more\n---\n");
        assert_eq!(fm.get("key"), Some("v1 more"));
    }

    #[test]
    fn folds_list_items() {
        let text = "---\nauthor: Alice\n- Bob\n\t- Carol\n---\nbody";
        let fm = FrontMatter::parse(text);
        assert_eq!(fm.get("author"), Some("Alice - Bob - Carol"));
    }

    #[test]
    fn continuation_without_key_is_not_folded() {
        let fm = FrontMatter::parse("---\n  orphan\n  nested: yes\n---\n");
        assert_eq!(fm.get("nested"), Some("yes"));
        assert_eq!(fm.len(), 1);
    }

    #[test]
    fn empty_key_does_not_absorb_indented_fields() {
        let fm = FrontMatter::parse("---\n: x\n  status: Final\n---\n");
        assert_eq!(fm.get(""), Some("x"));
        assert_eq!(fm.get("status"), Some("Final"));
    }

    #[test]
    fn indented_line_after_empty_key_without_colon_is_dropped() {
        let fm = FrontMatter::parse("---\n: x\n  stray words\n---\n");
        assert_eq!(fm.get(""), Some("x"));
        assert_eq!(fm.len(), 1);
    }

    #[test]
    fn list_item_with_colon_before_any_key_becomes_key() {
        let fm = FrontMatter::parse("---\n- item: x\n---\n");
        assert_eq!(fm.get("- item"), Some("x"));
    }

    #[test]
    fn splits_at_first_colon_only() {
        let fm = FrontMatter::parse("---\ndiscussions-to: https://example.org/t/1\n---\n");
        assert_eq!(fm.get("discussions-to"), Some("https://example.org/t/1"));
    }

    #[test]
    fn later_value_overwrites_earlier() {
        let fm = FrontMatter::parse("---\nstatus: Draft\nstatus: Final\n---\n");
        assert_eq!(fm.get("status"), Some("Final"));
    }

    #[test]
    fn skips_blank_and_colonless_lines() {
        let fm = FrontMatter::parse("---\n\ntitle: Token\njust words\n\neip: 20\n---\n");
        assert_eq!(fm.len(), 2);
        assert_eq!(fm.get("title"), Some("Token"));
        assert_eq!(fm.get("eip"), Some("20"));
    }

    #[test]
    fn keys_are_case_sensitive_and_values_uncoerced() {
        let fm = FrontMatter::parse("---\nStatus: Final\nrequires: 20, 165\ncreated: 2024-01-01\n---\n");
        assert_eq!(fm.get("status"), None);
        assert_eq!(fm.get("Status"), Some("Final"));
        assert_eq!(fm.get("requires"), Some("20, 165"));
        assert_eq!(fm.get("created"), Some("2024-01-01"));
    }

    #[test]
    fn unterminated_block_is_empty() {
        assert!(FrontMatter::parse("---\nkey: value\n").is_empty());
    }

    #[test]
    fn delimiter_must_be_whole_line() {
        assert!(FrontMatter::parse("----\nkey: value\n----\n").is_empty());
        assert!(FrontMatter::parse("---\nkey: value\n--- trailing\n").is_empty());
    }

    #[test]
    fn leading_whitespace_before_delimiter_is_rejected() {
        assert!(FrontMatter::parse("\n---\nkey: value\n---\n").is_empty());
        assert!(FrontMatter::parse(" ---\nkey: value\n---\n").is_empty());
    }

    #[test]
    fn tolerates_crlf_line_endings() {
        let fm = FrontMatter::parse("---\r\nstatus: Final\r\n---\r\n");
        assert_eq!(fm.get("status"), Some("Final"));
    }

    #[test]
    fn empty_block_is_empty() {
        assert!(FrontMatter::parse("---\n---\n").is_empty());
    }

    #[test]
    fn missing_field_reads_as_empty() {
        let fm = FrontMatter::parse("---\ntitle: x\n---\n");
        assert_eq!(fm.get_or_empty("status"), "");
    }

    proptest! {
        #[test]
        fn text_without_opening_delimiter_is_empty(text in "(\\PC|\n){0,200}") {
            prop_assume!(!text.starts_with("---\n") && !text.starts_with("---\r\n") && text != "---" && text != "---\r");
            prop_assert!(FrontMatter::parse(&text).is_empty());
        }

        #[test]
        fn single_field_roundtrips(key in "[a-z][a-z0-9-]{0,15}", value in "[A-Za-z0-9][A-Za-z0-9 .]{0,30}") {
            let text = format!("---\n{}: {}\n---\nbody\n", key, value);
            let fm = FrontMatter::parse(&text);
            prop_assert_eq!(fm.get(&key), Some(value.trim()));
        }
    }
}
