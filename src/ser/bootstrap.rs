//! The self-decoding wrapper every packed script is emitted in.

use itertools::Itertools;

/// Opening of the bootstrap, up to and including the brace of the decoder body.
pub const PREAMBLE: &str = "eval(function(p,a,c,k,e,d){";

/// The decoder body, verbatim from the classic runtime.
///
/// `e` spells a symbol id in radix `a`. When `String` can be used as a replace
/// callback (every engine in use today) the whole payload is rewritten in one
/// pass through the `d` lookup table; otherwise each symbol is replaced in turn,
/// highest id first.
pub const DECODER: &str = r"e=function(c){return(c<a?'':e(parseInt(c/a)))+((c=c%a)>35?String.fromCharCode(c+29):c.toString(36))};if(!''.replace(/^/,String)){while(c--)d[e(c)]=k[c]||e(c);k=[function(e){return d[e]}];e=function(){return'\\w+'};c=1};while(c--)if(k[c])p=p.replace(new RegExp('\\b'+e(c)+'\\b','g'),k[c]);return p";

/// Fills the bootstrap template.
///
/// `payload` must already be escaped for a single-quoted literal. Dictionary
/// entries are word characters only and are written as they are.
pub(crate) fn emit<'a, I>(payload: &str, radix: usize, count: usize, dictionary: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    format!(
        "{}{}}}('{}',{},{},'{}'.split('|'),0,{{}}))",
        PREAMBLE,
        DECODER,
        payload,
        radix,
        count,
        dictionary.into_iter().join("|"),
    )
}
