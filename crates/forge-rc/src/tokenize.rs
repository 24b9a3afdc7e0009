//! Rc-file line splitting and word tokenization.
//!
//! Two stages: first `\`-continued physical lines are spliced into logical
//! lines, then each logical line is split into words honoring `#` comments,
//! single/double quoting, and backslash escapes.

/// Splice line continuations and split into trimmed logical lines.
///
/// A `\` immediately before a line break (optionally with a carriage return
/// in between) removes the break, before any other processing. Blank lines
/// are kept here so callers can skip them with their own accounting.
pub fn logical_lines(contents: &str) -> Vec<String> {
    let spliced = contents.replace("\\\r\n", "").replace("\\\n", "");
    spliced.lines().map(|line| line.trim().to_string()).collect()
}

/// Split one logical line into words.
///
/// Rules:
/// - `#` outside quotes starts a comment running to end of line
/// - single and double quotes group words containing whitespace
/// - `\` escapes the next character, inside or outside quotes
///
/// A dangling trailing backslash and a missing end-quote are silently
/// ignored: the escape is dropped and the open quote is treated as closed
/// at end of line. Rc files in the wild rely on this, so it is preserved
/// as observed behavior rather than reported as an error.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                word.push(escaped);
            }
        } else if let Some(q) = quote {
            if c == q {
                quote = None;
            } else {
                word.push(c);
            }
        } else if c == '\'' || c == '"' {
            quote = Some(c);
        } else if c == '#' {
            break;
        } else if c.is_whitespace() {
            if !word.is_empty() {
                words.push(std::mem::take(&mut word));
            }
        } else {
            word.push(c);
        }
    }

    if !word.is_empty() {
        words.push(word);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_words() {
        assert_eq!(
            tokenize_line("startup --batch --max_idle_secs=20"),
            vec!["startup", "--batch", "--max_idle_secs=20"]
        );
    }

    #[test]
    fn test_comment_to_end_of_line() {
        assert_eq!(
            tokenize_line("build --jobs 4 # prefer small machines"),
            vec!["build", "--jobs", "4"]
        );
    }

    #[test]
    fn test_comment_only_line_yields_no_words() {
        assert!(tokenize_line("# nothing but commentary").is_empty());
    }

    #[test]
    fn test_hash_inside_quotes_is_literal() {
        assert_eq!(
            tokenize_line(r##"build --copt="-DANSWER=#42""##),
            vec!["build", "--copt=-DANSWER=#42"]
        );
    }

    #[test]
    fn test_single_quotes_group_whitespace() {
        assert_eq!(
            tokenize_line("test --test_arg 'one two'"),
            vec!["test", "--test_arg", "one two"]
        );
    }

    #[test]
    fn test_backslash_escapes_next_char() {
        assert_eq!(
            tokenize_line(r"build --define ping\ pong"),
            vec!["build", "--define", "ping pong"]
        );
    }

    #[test]
    fn test_escape_inside_quotes() {
        assert_eq!(
            tokenize_line(r#"build "a\"b""#),
            vec!["build", r#"a"b"#]
        );
    }

    #[test]
    fn test_dangling_backslash_is_dropped() {
        assert_eq!(tokenize_line(r"build --opt\"), vec!["build", "--opt"]);
    }

    #[test]
    fn test_unterminated_quote_closes_at_eol() {
        assert_eq!(
            tokenize_line(r#"build "half open"#),
            vec!["build", "half open"]
        );
    }

    #[test]
    fn test_logical_lines_splice_continuation() {
        let lines = logical_lines("startup --foo \\\nbar\nbuild --baz\n");
        assert_eq!(lines, vec!["startup --foo bar", "build --baz"]);
    }

    #[test]
    fn test_logical_lines_splice_crlf_continuation() {
        let lines = logical_lines("startup --foo \\\r\nbar\r\n");
        assert_eq!(lines, vec!["startup --foo bar"]);
    }

    #[test]
    fn test_logical_lines_trim_whitespace() {
        let lines = logical_lines("  build --x  \n\t\n");
        assert_eq!(lines, vec!["build --x", ""]);
    }
}
