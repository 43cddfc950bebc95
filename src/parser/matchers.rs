use super::combinators::{decimal, separator, single_quoted, split_on_pipe};
use super::PREAMBLE;
use lazy_static::lazy_static;
use nom::{
    character::complete::{char, multispace0},
    sequence::preceded,
    IResult,
};
use regex::Regex;

lazy_static! {
    static ref STRICT_BOOTSTRAP: Regex = Regex::new(concat!(
        r"(?s)eval\(function\(p,a,c,k,e,[dr]\)\{.*?\}",
        r"\('((?:[^'\\]|\\.)*)',(\d+),(\d+),'((?:[^'\\]|\\.)*)'",
        r"\.split\('\|'\),\d+,\{\}\)\)",
    ))
    .unwrap();
}

/// The call arguments of a bootstrap as they appear in the text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawParams<'a> {
    /// Still escaped for a single-quoted literal.
    pub payload: &'a str,
    pub radix: usize,
    pub count: usize,
    /// Still joined by `|`.
    pub dictionary: &'a str,
}

/// One way of finding the call arguments in a bootstrap.
pub trait ParamsMatcher: Sync {
    fn name(&self) -> &'static str;

    fn extract<'a>(&self, packed: &'a str) -> Option<RawParams<'a>>;
}

/// Matchers in the order they are tried.
pub static MATCHERS: [&dyn ParamsMatcher; 2] = [&StrictMatcher, &LooseMatcher];

/// The exact shape the packer emits, terminator included.
#[derive(Clone, Copy, Debug)]
pub struct StrictMatcher;

impl ParamsMatcher for StrictMatcher {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn extract<'a>(&self, packed: &'a str) -> Option<RawParams<'a>> {
        let captures = STRICT_BOOTSTRAP.captures(packed)?;
        Some(RawParams {
            payload: captures.get(1)?.as_str(),
            radix: captures.get(2)?.as_str().parse().ok()?,
            count: captures.get(3)?.as_str().parse().ok()?,
            dictionary: captures.get(4)?.as_str(),
        })
    }
}

/// Looks for the four arguments after any closing brace that follows the
/// preamble. Whitespace between tokens is allowed and nothing after
/// `.split('|')` is required.
#[derive(Clone, Copy, Debug)]
pub struct LooseMatcher;

impl ParamsMatcher for LooseMatcher {
    fn name(&self) -> &'static str {
        "loose"
    }

    fn extract<'a>(&self, packed: &'a str) -> Option<RawParams<'a>> {
        let start = PREAMBLE.find(packed)?.end();
        let body = &packed[start..];
        body.match_indices('}')
            .find_map(|(offset, _)| call_arguments(&body[offset + 1..]).ok())
            .map(|(_, raw)| raw)
    }
}

fn call_arguments(i: &str) -> IResult<&str, RawParams<'_>> {
    let (i, _) = preceded(multispace0, char('('))(i)?;
    let (i, payload) = preceded(multispace0, single_quoted)(i)?;
    let (i, radix) = preceded(separator, decimal)(i)?;
    let (i, count) = preceded(separator, decimal)(i)?;
    let (i, dictionary) = preceded(separator, single_quoted)(i)?;
    let (i, _) = split_on_pipe(i)?;
    Ok((
        i,
        RawParams {
            payload,
            radix,
            count,
            dictionary,
        },
    ))
}
