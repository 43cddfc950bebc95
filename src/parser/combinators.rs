use nom::{
    bytes::complete::{escaped, is_not, tag},
    character::complete::{anychar, char, digit1, multispace0},
    combinator::{map, map_res, opt},
    sequence::{delimited, preceded},
    IResult,
};

/// Parser combinators for the argument list of a packed bootstrap call.
///
/// Everything here returns borrowed slices of the input; unescaping happens
/// once a whole argument list has been recognised.

/// A single-quoted JavaScript string literal. Returns the raw, still escaped,
/// contents. Any character may follow a backslash.
pub fn single_quoted(i: &str) -> IResult<&str, &str> {
    delimited(
        char('\''),
        map(opt(escaped(is_not("\\'"), '\\', anychar)), |s| {
            s.unwrap_or("")
        }),
        char('\''),
    )(i)
}

/// An unsigned decimal integer. Values that overflow `usize` are rejected.
pub fn decimal(i: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(i)
}

/// A comma with optional whitespace on either side.
pub fn separator(i: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0)(i)
}

/// `.split('|')`, optionally preceded by whitespace.
pub fn split_on_pipe(i: &str) -> IResult<&str, &str> {
    preceded(multispace0, tag(".split('|')"))(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_quoted() {
        assert_eq!(single_quoted("'abc',1"), Ok((",1", "abc")));
        assert_eq!(single_quoted("'',1"), Ok((",1", "")));
        assert_eq!(single_quoted(r#"'it\'s' x"#), Ok((" x", r#"it\'s"#)));
        assert_eq!(single_quoted(r#"'\\'"#), Ok(("", r#"\\"#)));
        assert!(single_quoted("'unterminated").is_err());
        assert!(single_quoted("abc'").is_err());
    }

    #[test]
    fn test_decimal() {
        assert_eq!(decimal("62,"), Ok((",", 62)));
        assert!(decimal("x").is_err());
        assert!(decimal("99999999999999999999999999").is_err());
    }

    #[test]
    fn test_separator() {
        assert_eq!(separator(" ,\n 5"), Ok(("5", ',')));
        assert_eq!(separator(",5"), Ok(("5", ',')));
        assert!(separator(" 5").is_err());
    }

    #[test]
    fn test_split_on_pipe() {
        assert_eq!(split_on_pipe(" .split('|'),0"), Ok((",0", ".split('|')")));
        assert!(split_on_pipe(".split(',')").is_err());
    }
}
