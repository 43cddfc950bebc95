//! The cleanup pass run before packing.
//!
//! This is a purely textual minifier. It does not know where string literals
//! or regular expression literals start and end, so comment markers and
//! whitespace inside them are treated like any other.

use crate::text::is_operator_char;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BLOCK_COMMENT: Regex = Regex::new(r"(?s)/\*.*?\*/").unwrap();
    // A `//` right after `:` is the scheme separator of a URL, not a comment.
    static ref LINE_COMMENT: Regex = Regex::new(r"(?m)(^|[^:])//.*$").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Strips comments and insignificant whitespace from JavaScript-like source.
///
/// ```
/// assert_eq!(
///     jspack::cleanup("function add(a, b) {\n  // sum\n  return a + b;\n}"),
///     "function add(a,b){return a+b}"
/// );
/// ```
pub fn cleanup(source: &str) -> String {
    let text = LINE_COMMENT.replace_all(source, "$1");
    let text = BLOCK_COMMENT.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = strip_operator_spaces(&text);
    text.replace(";}", "}").trim().to_string()
}

// Expects whitespace already collapsed to single spaces.
fn strip_operator_spaces(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut stripped = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            let after_operator = i > 0 && is_operator_char(chars[i - 1]);
            let before_operator = chars.get(i + 1).map_or(false, |&n| is_operator_char(n));
            if after_operator || before_operator {
                continue;
            }
        }
        stripped.push(c);
    }
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_block_comments() {
        assert_eq!(cleanup("a /* one\n two */ b"), "a b");
        assert_eq!(cleanup("/**/x/* y */"), "x");
    }

    #[test]
    fn test_line_comments() {
        assert_eq!(cleanup("var a = 1; // one\nvar b = 2;"), "var a=1;var b=2;");
        assert_eq!(cleanup("// header\nrun()"), "run()");
    }

    #[test]
    fn test_line_comments_go_first() {
        // The `/*` sits inside a line comment, so the `*/` below is plain text.
        assert_eq!(cleanup("// a /*\nb */"), "b*/");
        assert_eq!(cleanup("x; /* keep // out */ y"), "x;/*keep");
    }

    #[test]
    fn test_urls_survive() {
        assert_eq!(
            cleanup("load('http://example.com/x.js'); // fetch"),
            "load('http://example.com/x.js');"
        );
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(cleanup("  var\t\tx\n\n =  y  "), "var x=y");
        assert_eq!(cleanup("return   typeof   x"), "return typeof x");
    }

    #[test]
    fn test_operator_spacing() {
        assert_eq!(
            cleanup("if ( a && b ) { c [ 0 ] = d ? e : f ; }"),
            "if(a&&b){c[0]=d?e:f}"
        );
        assert_eq!(cleanup("x < y | z > w ! v"), "x<y|z>w!v");
    }

    #[test]
    fn test_semicolon_before_brace() {
        assert_eq!(cleanup("function f(){ a(); b(); }"), "function f(){a();b()}");
    }

    #[test]
    fn test_string_literals_are_not_protected() {
        assert_eq!(cleanup("s = 'a // b';"), "s='a");
    }

    #[test]
    fn test_blank() {
        assert_eq!(cleanup(" \n\t "), "");
        assert_eq!(cleanup("// only a comment"), "");
    }
}
