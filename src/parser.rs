// 🧩 Line & Field Parser
// Turns a Zengin buffer into numbered lines and positional fields
//
// Quote handling is a naive toggle: every `"` flips the in-quotes state,
// no escaping is recognised. Quotes stay in the raw field and are only
// stripped when a validator reads the value.

// ============================================================================
// CORE TYPES
// ============================================================================

/// One non-empty line of the input, numbered for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based position among NON-EMPTY lines (blank lines don't count)
    pub number: usize,
    /// Raw text without the line terminator
    pub text: &'a str,
}

// ============================================================================
// LINE SPLITTER
// ============================================================================

/// Split a buffer into its non-empty lines
///
/// Accepts both `\n` and `\r\n` terminators. A line that is empty after
/// trimming whitespace is dropped and does not consume a line number.
///
/// # Example:
/// ```
/// use zengin_validator::parser::split_lines;
///
/// let lines = split_lines("1,21\r\n\r\n2,0001\n");
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[1].number, 2);
/// assert_eq!(lines[1].text, "2,0001");
/// ```
pub fn split_lines(content: &str) -> Vec<SourceLine<'_>> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(idx, text)| SourceLine {
            number: idx + 1,
            text,
        })
        .collect()
}

// ============================================================================
// FIELD PARSER
// ============================================================================

/// Split one line into raw fields on commas outside quotes
///
/// The last field is always pushed, so a line without commas yields one
/// field and a trailing comma yields a trailing empty field.
pub fn parse_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }

    fields.push(current);
    fields
}

/// Remove every literal `"` from a raw field
pub fn strip_quotes(raw: &str) -> String {
    raw.replace('"', "")
}

/// Quote-stripped value of field `index`, empty when the field is absent
pub fn field_value(fields: &[String], index: usize) -> String {
    fields.get(index).map(|f| strip_quotes(f)).unwrap_or_default()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_mixed_endings() {
        let lines = split_lines("a\r\nb\nc");

        let texts: Vec<&str> = lines.iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_lines_skips_blank_lines_without_numbering_them() {
        let lines = split_lines("\n\na\n   \n\t\r\nb\n\n");

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], SourceLine { number: 1, text: "a" });
        assert_eq!(lines[1], SourceLine { number: 2, text: "b" });
    }

    #[test]
    fn test_split_lines_keeps_surrounding_whitespace() {
        let lines = split_lines(" 1,21 \n");

        assert_eq!(lines[0].text, " 1,21 ");
    }

    #[test]
    fn test_split_lines_empty_buffer() {
        assert!(split_lines("").is_empty());
        assert!(split_lines("\r\n\r\n").is_empty());
    }

    #[test]
    fn test_parse_fields_plain() {
        assert_eq!(parse_fields("1,21,0"), vec!["1", "21", "0"]);
    }

    #[test]
    fn test_parse_fields_no_comma_yields_single_field() {
        assert_eq!(parse_fields("9"), vec!["9"]);
        assert_eq!(parse_fields(""), vec![""]);
    }

    #[test]
    fn test_parse_fields_trailing_comma() {
        assert_eq!(parse_fields("9,"), vec!["9", ""]);
    }

    #[test]
    fn test_parse_fields_quoted_comma_stays_in_one_field() {
        let fields = parse_fields("2,\"1,234\",x");

        assert_eq!(fields, vec!["2", "\"1,234\"", "x"]);
        assert_eq!(strip_quotes(&fields[1]), "1,234");
    }

    #[test]
    fn test_parse_fields_unbalanced_quote_swallows_rest() {
        let fields = parse_fields("8,\"12,34,56");

        assert_eq!(fields, vec!["8", "\"12,34,56"]);
    }

    #[test]
    fn test_field_value_strips_and_defaults() {
        let fields = parse_fields("\"1\",\"2\"1");

        assert_eq!(field_value(&fields, 0), "1");
        assert_eq!(field_value(&fields, 1), "21");
        assert_eq!(field_value(&fields, 5), "");
    }
}
