//! Verdict extraction from captured page markup.
//!
//! Known limitation, kept on purpose: only ASCII space characters are
//! stripped (tabs, newlines, `&nbsp;` and friends survive), and the marker is
//! matched as a raw substring with no DOM parsing. If the upstream page
//! changes its wording, the verdict silently flips to "no match" instead of
//! erroring.

use serde::Serialize;

/// Outcome of one verification run, serialized to stdout as a single JSON
/// object. Constructed once; never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Verification {
    /// Whether the verdict marker was found in the captured markup.
    #[serde(rename = "match")]
    pub matched: bool,
    /// The captured markup, verbatim.
    pub raw_html: String,
}

/// Remove literal space characters so marker matching survives arbitrary
/// interior spacing around the colon and characters.
pub fn normalize(markup: &str) -> String {
    markup.replace(' ', "")
}

/// True if the space-stripped markup contains the space-stripped marker.
/// Pure and total over strings.
pub fn is_match(markup: &str, marker: &str) -> bool {
    normalize(markup).contains(&normalize(marker))
}
