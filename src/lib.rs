// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Packs JavaScript into Dean Edwards' self-decoding
//! `eval(function(p,a,c,k,e,d){...})` form, and unpacks it again.
//!
//! ```
//! let packed = jspack::pack("function add(a, b) { return a + b; }").unwrap();
//! assert!(packed.starts_with("eval(function(p,a,c,k,e,d){"));
//! assert_eq!(jspack::unpack(&packed).unwrap(), "function add(a,b){return a+b}");
//! ```

pub mod de;
pub mod error;
pub mod minify;
pub mod parser;
pub mod ser;
pub mod symbols;
pub mod text;


pub use de::{Strategy, UnpackOptions, Unpacker};
pub use error::{FormatError, PackError, UnpackError};
pub use minify::cleanup;
pub use parser::{is_packed, parse_params, PackedParams};
pub use ser::{PackOptions, PackReport, Packer};

/// Packs `source` with the default options: cleanup on.
pub fn pack(source: &str) -> Result<String, PackError> {
    Packer::default().pack(source)
}

/// Unpacks a bootstrap produced by [`pack`] or any compatible packer.
pub fn unpack(packed: &str) -> Result<String, UnpackError> {
    Unpacker::default().unpack(packed)
}
