//! Recognition of packed bootstraps and recovery of their call arguments.

pub mod combinators;
pub mod matchers;

use self::matchers::{RawParams, MATCHERS};
use crate::error::FormatError;
use crate::text::unescape;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

lazy_static! {
    pub(crate) static ref PREAMBLE: Regex =
        Regex::new(r"eval\(function\(p,a,c,k,e,[dr]\)\{").unwrap();
}

/// The four arguments the bootstrap hands to its decoder.
#[derive(Clone, Debug, PartialEq)]
pub struct PackedParams {
    /// The payload with string-literal escapes already removed.
    pub payload: String,
    /// Numeral base of the symbols (`a`).
    pub radix: usize,
    /// Number of symbols the decoder walks (`c`).
    pub count: usize,
    /// The dictionary after `.split('|')` (`k`).
    pub dictionary: Vec<String>,
}

impl<'a> From<RawParams<'a>> for PackedParams {
    fn from(raw: RawParams<'a>) -> Self {
        PackedParams {
            payload: unescape(raw.payload),
            radix: raw.radix,
            count: raw.count,
            dictionary: raw.dictionary.split('|').map(String::from).collect(),
        }
    }
}

/// Whether `text` contains a packer preamble, with either `d` or `r` as the
/// last decoder parameter.
pub fn is_packed(text: &str) -> bool {
    PREAMBLE.is_match(text)
}

/// Extracts the decoder arguments from a packed bootstrap.
///
/// Matchers are tried in order and the first one to succeed wins.
pub fn parse_params(packed: &str) -> Result<PackedParams, FormatError> {
    if !is_packed(packed) {
        return Err(FormatError::NotPacked);
    }

    for (rank, matcher) in MATCHERS.iter().enumerate() {
        if let Some(raw) = matcher.extract(packed) {
            if rank > 0 {
                warn!("bootstrap only recognised by the {} matcher", matcher.name());
            } else {
                debug!("bootstrap recognised by the {} matcher", matcher.name());
            }
            let params = PackedParams::from(raw);
            if params.dictionary.len() != params.count {
                debug!(
                    "dictionary holds {} entries for {} symbols",
                    params.dictionary.len(),
                    params.count
                );
            }
            return Ok(params);
        }
    }

    Err(FormatError::Unparsable)
}
