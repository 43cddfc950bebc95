use crate::error::UnpackError;
use crate::parser::{parse_params, PackedParams};
use crate::symbols::SymbolDecoder;
use crate::text::replace_words;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

//////////////////////////////////////////////////////////////////////////////

/// How symbols in the payload are swapped back for dictionary entries.
///
/// Both strategies come from the decoder embedded in every bootstrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Rewrite each word of the payload once, through a table from symbol to
    /// entry. This is the branch the embedded decoder takes on current engines.
    /// A replacement is never looked at again.
    SinglePass,
    /// Replace the whole-word occurrences of one symbol at a time, highest id
    /// first. Going downwards keeps an entry that spells a higher symbol, such
    /// as `10`, from being rewritten by that symbol's pass. An entry spelling a
    /// lower symbol is still rewritten.
    Descending,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::SinglePass
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnpackOptions {
    pub strategy: Strategy,
}

/// A structure for recovering source text from a packed bootstrap.
#[derive(Clone, Debug, Default)]
pub struct Unpacker {
    options: UnpackOptions,
}

impl Unpacker {
    #[inline]
    pub fn new(options: UnpackOptions) -> Self {
        Unpacker { options }
    }

    pub fn options(&self) -> &UnpackOptions {
        &self.options
    }

    /// Unpacks a bootstrap, failing with a format error when it is not one.
    pub fn unpack(&self, packed: &str) -> Result<String, UnpackError> {
        let params = parse_params(packed)?;
        self.unpack_params(&params)
    }

    /// Substitutes the dictionary back into an already extracted payload.
    pub fn unpack_params(&self, params: &PackedParams) -> Result<String, UnpackError> {
        let decoder = SymbolDecoder::new(params.radix, params.count)?;
        debug!(
            "unpacking {} symbols in radix {} ({:?})",
            params.count,
            decoder.radix(),
            self.options.strategy
        );
        let text = match self.options.strategy {
            Strategy::SinglePass => single_pass(params, &decoder),
            Strategy::Descending => descending(params, &decoder),
        };
        Ok(text)
    }
}

// Ids from `count - 1` down to 0 whose dictionary slot is filled. Ids past
// the end of the dictionary have no slot, so the walk starts at the shorter
// of the two.
fn filled_slots<'p>(params: &'p PackedParams) -> impl Iterator<Item = (usize, &'p str)> {
    (0..params.count.min(params.dictionary.len()))
        .rev()
        .filter_map(move |id| match params.dictionary.get(id) {
            Some(entry) if !entry.is_empty() => Some((id, entry.as_str())),
            _ => None,
        })
}

fn single_pass(params: &PackedParams, decoder: &SymbolDecoder) -> String {
    let table: HashMap<String, &str> = filled_slots(params)
        .map(|(id, entry)| (decoder.decode(id), entry))
        .collect();
    replace_words(&params.payload, |word| table.get(word).copied())
}

fn descending(params: &PackedParams, decoder: &SymbolDecoder) -> String {
    filled_slots(params).fold(params.payload.clone(), |text, (id, entry)| {
        let symbol = decoder.decode(id);
        trace!("{:?} -> {:?}", symbol, entry);
        replace_words(&text, |word| if word == symbol { Some(entry) } else { None })
    })
}
