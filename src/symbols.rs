//! The packer's dictionary and its two numeral systems.
//!
//! A token is a maximal run of word characters (`[A-Za-z0-9_$]`). The packer
//! counts every token of the source, sorts the distinct tokens by descending
//! frequency and numbers them; that number is the token's symbol id.
//!
//! Symbol ids are written into the payload in base 62 (`0-9a-zA-Z`). The
//! bootstrap decodes them again with the classic runtime encoder, which uses
//! `0-9a-z` for digits below 36 and the character with code `digit + 29` above.
//! `digit + 29` lands on `A` for 36 and on `Z` for 61, so the two systems agree
//! on every digit either of them can produce as long as the radix stays at or
//! below [`MAX_RADIX`].

use crate::error::FormatError;
use crate::text::{word_runs, Run};
use itertools::Itertools;
use std::collections::HashMap;

/// Dense index of a token in the sorted [`Dictionary`].
pub type SymbolId = usize;

pub const BASE62_DIGITS: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Largest radix whose digits are all word characters.
pub const MAX_RADIX: usize = 62;

/// Offset the runtime encoder adds to digits of 36 and above.
const CHAR_CODE_OFFSET: u32 = 29;

/// Encodes `id` in base 62, most significant digit first. Zero encodes to `"0"`.
pub fn encode62(id: SymbolId) -> String {
    let mut n = id;
    let mut digits = Vec::new();
    loop {
        digits.push(BASE62_DIGITS[n % MAX_RADIX]);
        n /= MAX_RADIX;
        if n == 0 {
            break;
        }
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

/// Radix the packer announces for a dictionary of `count` symbols.
///
/// This is the count itself until the dictionary outgrows the base-62
/// alphabet. Past that point the runtime would decode `count`-ary digits that
/// the base-62 encoder never wrote, so the radix stays at [`MAX_RADIX`].
/// Bootstraps for larger dictionaries therefore carry `62,<count>` rather
/// than the count twice, unlike what classic packers emit.
pub fn radix_for(count: usize) -> usize {
    count.min(MAX_RADIX)
}

/// Decodes symbol ids the way the bootstrap's own `e` function does.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymbolDecoder {
    radix: usize,
}

impl SymbolDecoder {
    /// Validates that `radix` can spell every id below `count`.
    pub fn new(radix: usize, count: usize) -> Result<Self, FormatError> {
        let spellable = match radix {
            0 => count == 0,
            1 => count <= 1,
            // Highest digit must stay below the surrogate range.
            _ => (radix - 1)
                .checked_add(CHAR_CODE_OFFSET as usize)
                .map_or(false, |top| top < 0xD800),
        };
        if spellable {
            Ok(SymbolDecoder { radix })
        } else {
            Err(FormatError::InvalidRadix { radix, count })
        }
    }

    pub fn radix(&self) -> usize {
        self.radix
    }

    /// The textual form of `id` inside a packed payload.
    pub fn decode(&self, id: SymbolId) -> String {
        let mut n = id;
        let mut digits = Vec::new();
        loop {
            if n < self.radix || self.radix < 2 {
                digits.push(self.digit(n));
                break;
            }
            digits.push(self.digit(n % self.radix));
            n /= self.radix;
        }
        digits.into_iter().rev().collect()
    }

    fn digit(&self, d: usize) -> char {
        if d < 36 {
            char::from(BASE62_DIGITS[d])
        } else {
            // Validated in `new` for every digit below the radix.
            char::from_u32(d as u32 + CHAR_CODE_OFFSET).unwrap_or(char::REPLACEMENT_CHARACTER)
        }
    }
}

/// ## FrequencyTable
///
/// Distinct tokens in first-seen order, with their occurrence counts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrequencyTable<'a> {
    order: Vec<&'a str>,
    counts: HashMap<&'a str, usize>,
}

impl<'a> FrequencyTable<'a> {
    pub fn from_source(source: &'a str) -> Self {
        let mut table = FrequencyTable::default();
        for run in word_runs(source) {
            if let Run::Word(token) = run {
                table.add(token);
            }
        }
        table
    }

    fn add(&mut self, token: &'a str) {
        let count = self.counts.entry(token).or_insert(0);
        if *count == 0 {
            self.order.push(token);
        }
        *count += 1;
    }

    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Tokens in the order they first appeared.
    pub fn first_seen(&self) -> &[&'a str] {
        &self.order
    }
}

/// ## Dictionary
///
/// Distinct tokens sorted by descending count. Ties keep first-seen order,
/// which makes packing deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dictionary {
    symbols: Vec<String>,
}

impl Dictionary {
    pub fn from_source(source: &str) -> Self {
        Dictionary::from(&FrequencyTable::from_source(source))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, id: SymbolId) -> Option<&str> {
        self.symbols.get(id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &str)> {
        self.symbols.iter().map(String::as_str).enumerate()
    }
}

impl<'a> From<&FrequencyTable<'a>> for Dictionary {
    fn from(table: &FrequencyTable<'a>) -> Self {
        // sorted_by is a stable sort, so equal counts stay in first-seen order.
        let symbols = table
            .first_seen()
            .iter()
            .sorted_by(|a, b| table.count(b).cmp(&table.count(a)))
            .map(|token| token.to_string())
            .collect_vec();
        Dictionary { symbols }
    }
}
