pub mod bootstrap;

use crate::error::PackError;
use crate::minify::cleanup;
use crate::symbols::{encode62, radix_for, Dictionary};
use crate::text::{escape, replace_words};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

//////////////////////////////////////////////////////////////////////////////

/// Knobs for [`Packer`]. Missing fields deserialize to their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackOptions {
    /// Run the cleanup pass (comments and insignificant whitespace) first.
    pub cleanup: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        PackOptions { cleanup: true }
    }
}

/// Byte sizes before and after packing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackReport {
    /// UTF-8 length of the source as given.
    pub original_size: usize,
    /// UTF-8 length of the bootstrap.
    pub packed_size: usize,
    /// Number of dictionary entries.
    pub symbols: usize,
}

impl PackReport {
    /// Packed size as a fraction of the original size.
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.packed_size as f64 / self.original_size as f64
    }
}

impl fmt::Display for PackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes → {} bytes ({} symbols)",
            self.original_size, self.packed_size, self.symbols
        )
    }
}

/// A structure for packing source text into a self-decoding bootstrap.
#[derive(Clone, Debug, Default)]
pub struct Packer {
    options: PackOptions,
}

impl Packer {
    /// Creates a packer with the given options.
    #[inline]
    pub fn new(options: PackOptions) -> Self {
        Packer { options }
    }

    pub fn options(&self) -> &PackOptions {
        &self.options
    }

    /// Packs `source`, failing only when it is empty or whitespace-only.
    pub fn pack(&self, source: &str) -> Result<String, PackError> {
        self.pack_counted(source).map(|(packed, _)| packed)
    }

    /// Packs `source` and measures the result.
    pub fn pack_with_report(&self, source: &str) -> Result<(String, PackReport), PackError> {
        let (packed, symbols) = self.pack_counted(source)?;
        let report = PackReport {
            original_size: source.len(),
            packed_size: packed.len(),
            symbols,
        };
        Ok((packed, report))
    }

    fn pack_counted(&self, source: &str) -> Result<(String, usize), PackError> {
        if source.trim().is_empty() {
            return Err(PackError::EmptyInput);
        }

        let text = if self.options.cleanup {
            Cow::Owned(cleanup(source))
        } else {
            Cow::Borrowed(source)
        };

        let dictionary = Dictionary::from_source(&text);
        let count = dictionary.len();
        let radix = radix_for(count);
        debug!(
            "packing {} bytes with {} symbols in radix {}",
            text.len(),
            count,
            radix
        );

        // Every word is substituted: the bootstrap rewrites each word of the
        // payload through its table, so nothing may be left in clear.
        let encodings: HashMap<&str, String> = dictionary
            .iter()
            .map(|(id, token)| {
                let encoded = encode62(id);
                trace!("{:?} -> {:?}", token, encoded);
                (token, encoded)
            })
            .collect();
        let payload = replace_words(&text, |word| encodings.get(word).map(String::as_str));

        let symbols = dictionary.iter().map(|(_, token)| token);
        let packed = bootstrap::emit(&escape(&payload), radix, count, symbols);
        Ok((packed, count))
    }
}
