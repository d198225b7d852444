//! # openheart-lexicon
//!
//! The authoritative table of valid emoji sequences and their metadata,
//! parsed from a vendored subset of the Unicode `emoji-test.txt` data file,
//! plus the longest-match sanitizer that validates raw reaction input
//! against it.
//!
//! The lexicon is read-only after load and is shared for the lifetime of
//! the process via [`Lexicon::builtin`].

pub mod entry;
pub mod lexicon;
mod sanitize;

pub use entry::{LexiconEntry, Status};
pub use lexicon::Lexicon;
