/// Entries of an import file: one CPF per line, blank lines and `#` comments skipped.
/// Pairs each entry with its 1-based line number.
pub fn parse_entries(contents: &str) -> Vec<(usize, &str)> {
    contents
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_entries;

    #[test]
    fn test_basic() {
        assert_eq!(
            parse_entries("123.456.789-09\n11122233344\n"),
            vec![(1, "123.456.789-09"), (2, "11122233344")]
        );
    }

    #[test]
    fn test_blank_and_comments() {
        assert_eq!(
            parse_entries("# morning shift\n\n   \n  12345678909  \n"),
            vec![(4, "12345678909")]
        );
    }

    #[test]
    fn test_empty_string() {
        assert!(parse_entries("").is_empty());
    }

    #[test]
    fn test_windows_line_endings() {
        assert_eq!(parse_entries("a\r\nb\r\n"), vec![(1, "a"), (2, "b")]);
    }
}
