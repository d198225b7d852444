//! Longest-match reaction sanitizer.

use openheart_core::error::InvalidReactionError;

use crate::lexicon::Lexicon;

impl Lexicon {
    /// Validate raw reaction input and split it into a normalized emoji and
    /// its unconsumed remainder.
    ///
    /// The longest lexicon key that is a prefix of `raw` wins. Longest-first
    /// matters because the lexicon contains families where a base emoji is a
    /// strict prefix of an equally valid joiner or modifier sequence (❤️ vs
    /// ❤️‍🔥, 👍 vs 👍🏽); matching greedily-shortest would silently corrupt
    /// the user's intent.
    ///
    /// Trailing bytes are returned as-is; the caller decides remainder
    /// policy.
    pub fn sanitize<'a>(&self, raw: &'a str) -> Result<(&'a str, &'a str), InvalidReactionError> {
        if raw.is_empty() {
            return Err(InvalidReactionError::new("the reaction payload is empty"));
        }

        // Candidate prefixes end on char boundaries, and no key is longer
        // than max_key_len bytes, so the scan is bounded regardless of how
        // much trailing data the caller sent.
        let limit = raw.len().min(self.max_key_len());
        let boundaries: Vec<usize> = raw
            .char_indices()
            .map(|(start, c)| start + c.len_utf8())
            .take_while(|end| *end <= limit)
            .collect();

        for end in boundaries.into_iter().rev() {
            if self.contains(&raw[..end]) {
                return Ok((&raw[..end], &raw[end..]));
            }
        }
        Err(InvalidReactionError::new(
            "this is not a recognized emoji",
        ))
    }
}
