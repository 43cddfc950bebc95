//! Character classes and literal escaping shared by the packer and the unpacker.

use phf::{phf_map, phf_set};

//////////////////////////////////////////////////////////////////////////////

// Whitespace next to any of these is dropped by the cleanup pass.
pub(crate) static OPERATOR_CHARACTERS: phf::Set<char> = phf_set! {
    '{', '}', ';', ',', ':', '(', ')', '[', ']',
    '=', '+', '-', '*', '/', '<', '>', '!', '&', '|', '?',
};

// The payload travels inside a single-quoted JavaScript string literal.
// Only the backslash and the quote itself need escaping there.
pub(crate) static ESCAPED_CODE_POINTS: phf::Map<char, &'static str> = phf_map! {
    '\u{005C}' => r#"\\"#,
    '\u{0027}' => r#"\'"#,
};

/// A word character is anything a token may be made of: `[A-Za-z0-9_$]`.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

pub(crate) fn is_operator_char(c: char) -> bool {
    OPERATOR_CHARACTERS.contains(&c)
}

/// Escapes `input` for embedding between single quotes.
///
/// Every backslash is doubled before any quote gains its own backslash, so an
/// escaped quote is never escaped a second time.
pub(crate) fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    input
        .chars()
        .for_each(|c| match ESCAPED_CODE_POINTS.get(&c) {
            None => escaped.push(c),
            Some(escape) => escaped.push_str(escape),
        });
    escaped
}

/// Reverses [`escape`]: `\'` becomes `'` and `\\` becomes `\`.
///
/// Scans left to right so that a doubled backslash followed by a quote is read
/// as a backslash and a literal quote. Any other escape sequence is kept verbatim.
pub(crate) fn unescape(input: &str) -> String {
    let mut unescaped = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ '\'') | Some(next @ '\\') => unescaped.push(next),
            Some(other) => {
                unescaped.push(c);
                unescaped.push(other);
            }
            None => unescaped.push(c),
        }
    }
    unescaped
}

/// Splits `input` into alternating runs of word and non-word characters.
///
/// Concatenating the yielded slices gives back `input`.
pub(crate) fn word_runs(input: &str) -> WordRuns<'_> {
    WordRuns { rest: input }
}

pub(crate) struct WordRuns<'a> {
    rest: &'a str,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Run<'a> {
    Word(&'a str),
    Other(&'a str),
}

impl<'a> Iterator for WordRuns<'a> {
    type Item = Run<'a>;

    fn next(&mut self) -> Option<Run<'a>> {
        let first = self.rest.chars().next()?;
        let in_word = is_word_char(first);
        let end = self
            .rest
            .char_indices()
            .find(|&(_, c)| is_word_char(c) != in_word)
            .map(|(i, _)| i)
            .unwrap_or_else(|| self.rest.len());
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if in_word { Run::Word(run) } else { Run::Other(run) })
    }
}

/// Rewrites every whole word of `input` through `replace`.
///
/// Words for which `replace` returns `None` are copied unchanged.
pub(crate) fn replace_words<'a, F>(input: &'a str, mut replace: F) -> String
where
    F: FnMut(&'a str) -> Option<&'a str>,
{
    let mut output = String::with_capacity(input.len());
    for run in word_runs(input) {
        match run {
            Run::Word(word) => output.push_str(replace(word).unwrap_or(word)),
            Run::Other(other) => output.push_str(other),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_word_chars() {
        assert!(is_word_char('a'));
        assert!(is_word_char('Z'));
        assert!(is_word_char('7'));
        assert!(is_word_char('_'));
        assert!(is_word_char('$'));
        assert!(!is_word_char('.'));
        assert!(!is_word_char('é'));
    }

    #[test]
    fn test_escape_backslash_before_quote() {
        assert_eq!(escape(r#"it's"#), r#"it\'s"#);
        assert_eq!(escape(r#"a\b"#), r#"a\\b"#);
        assert_eq!(escape(r#"\'"#), r#"\\\'"#);
    }

    #[test]
    fn test_unescape_reverses_escape() {
        for input in &[r#"'\'"#, r#"\\'"#, r#"x = 'a\nb';"#, r#"\"#, "plain"] {
            assert_eq!(unescape(&escape(input)), *input);
        }
    }

    #[test]
    fn test_unescape_keeps_foreign_escapes() {
        assert_eq!(unescape(r#"a\nb\'c"#), r#"a\nb'c"#);
        assert_eq!(unescape(r#"trailing\"#), r#"trailing\"#);
    }

    #[test]
    fn test_word_runs() {
        let runs: Vec<_> = word_runs("var $x=a1+_b;").collect();
        assert_eq!(
            runs,
            vec![
                Run::Word("var"),
                Run::Other(" "),
                Run::Word("$x"),
                Run::Other("="),
                Run::Word("a1"),
                Run::Other("+"),
                Run::Word("_b"),
                Run::Other(";"),
            ]
        );
    }

    #[test]
    fn test_word_runs_non_ascii() {
        let runs: Vec<_> = word_runs("é1 ü").collect();
        assert_eq!(
            runs,
            vec![Run::Other("é"), Run::Word("1"), Run::Other(" ü")]
        );
    }

    #[test]
    fn test_replace_words_whole_words_only() {
        let replaced = replace_words("a ab a1 a", |w| if w == "a" { Some("x") } else { None });
        assert_eq!(replaced, "x ab a1 x");
    }
}
