//! Lexicon model and parser for the Unicode `emoji-test.txt` format.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use openheart_core::error::DataError;

use crate::entry::{LexiconEntry, Status};

/// The vendored emoji table shipped with this crate.
const BUILTIN_DATA: &str = include_str!("../data/emoji-test.txt");

/// An immutable table mapping every valid emoji sequence to its metadata.
///
/// Keys may be prefixes of other keys (a base emoji and its joiner or
/// modifier sequences share a prefix), which is exactly why the sanitizer
/// must match longest-first.
#[derive(Debug)]
pub struct Lexicon {
    entries: HashMap<String, LexiconEntry>,
    max_key_len: usize,
}

impl Lexicon {
    /// Parse a lexicon from `emoji-test.txt` formatted data.
    ///
    /// Data lines look like:
    ///
    /// ```text
    /// 2764 FE0F 200D 1F525 ; fully-qualified # ❤️‍🔥 E13.1 heart on fire
    /// ```
    ///
    /// with `# group:` / `# subgroup:` comments delimiting sections. Fails
    /// on malformed lines, unknown statuses, codepoint sequences that do
    /// not re-compose into their declared literal, and duplicate keys with
    /// conflicting metadata.
    pub fn parse(source: &str) -> Result<Self, DataError> {
        let mut entries: HashMap<String, LexiconEntry> = HashMap::new();
        let mut max_key_len = 0;
        let mut group: Option<String> = None;
        let mut subgroup: Option<String> = None;

        for (index, raw_line) in source.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw_line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(rest) = trimmed.strip_prefix('#') {
                let rest = rest.trim();
                if let Some(name) = rest.strip_prefix("group:") {
                    group = Some(name.trim().to_string());
                    subgroup = None;
                } else if let Some(name) = rest.strip_prefix("subgroup:") {
                    subgroup = Some(name.trim().to_string());
                }
                continue;
            }

            let (emoji, entry) = parse_line(trimmed, line, group.as_deref(), subgroup.as_deref())?;
            max_key_len = max_key_len.max(emoji.len());
            if let Some(previous) = entries.insert(emoji.clone(), entry) {
                // A byte-identical duplicate is tolerated; conflicting
                // metadata for the same sequence is not.
                if previous != entries[&emoji] {
                    return Err(DataError::ConflictingDuplicate { emoji });
                }
            }
        }

        Ok(Self {
            entries,
            max_key_len,
        })
    }

    /// The vendored lexicon, parsed once per process and shared from then
    /// on.
    ///
    /// # Panics
    /// Panics if the vendored data file is malformed; that is a build
    /// defect, equivalent to a fatal startup error.
    pub fn builtin() -> Arc<Lexicon> {
        static BUILTIN: OnceLock<Arc<Lexicon>> = OnceLock::new();
        Arc::clone(BUILTIN.get_or_init(|| {
            Arc::new(Lexicon::parse(BUILTIN_DATA).expect("vendored emoji table is well-formed"))
        }))
    }

    /// Metadata for an exact emoji sequence, if it is in the lexicon.
    pub fn lookup(&self, candidate: &str) -> Option<&LexiconEntry> {
        self.entries.get(candidate)
    }

    /// Iterate over every `(emoji, metadata)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LexiconEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Byte length of the longest key; the sanitizer never has to look
    /// further than this into the input.
    pub(crate) fn max_key_len(&self) -> usize {
        self.max_key_len
    }

    pub(crate) fn contains(&self, candidate: &str) -> bool {
        self.entries.contains_key(candidate)
    }
}

fn parse_line(
    line: &str,
    number: usize,
    group: Option<&str>,
    subgroup: Option<&str>,
) -> Result<(String, LexiconEntry), DataError> {
    let malformed = |reason: &str| DataError::MalformedLine {
        line: number,
        reason: reason.to_string(),
    };

    let (group, subgroup) = match (group, subgroup) {
        (Some(g), Some(s)) => (g, s),
        _ => return Err(malformed("entry outside of a group/subgroup section")),
    };

    let (codepoints, rest) = line
        .split_once(';')
        .ok_or_else(|| malformed("missing ';' separator"))?;
    let (status, comment) = rest
        .split_once('#')
        .ok_or_else(|| malformed("missing '#' comment with the literal emoji"))?;

    let status = status.trim();
    let status = Status::parse(status).ok_or_else(|| DataError::UnknownStatus {
        line: number,
        status: status.to_string(),
    })?;

    let mut sequence = String::new();
    for code in codepoints.split_whitespace() {
        let value = u32::from_str_radix(code, 16).map_err(|_| DataError::InvalidCodepoint {
            line: number,
            codepoint: code.to_string(),
        })?;
        let scalar = char::from_u32(value).ok_or_else(|| DataError::InvalidCodepoint {
            line: number,
            codepoint: code.to_string(),
        })?;
        sequence.push(scalar);
    }
    if sequence.is_empty() {
        return Err(malformed("empty codepoint sequence"));
    }

    let mut fields = comment.trim().splitn(3, ' ');
    let literal = fields.next().ok_or_else(|| malformed("missing literal emoji"))?;
    let version = fields.next().ok_or_else(|| malformed("missing version field"))?;
    let description = fields
        .next()
        .ok_or_else(|| malformed("missing description field"))?
        .trim();

    if literal != sequence {
        return Err(DataError::CodepointMismatch { line: number });
    }
    if !version.starts_with('E') {
        return Err(malformed("version field must look like 'E1.0'"));
    }

    Ok((
        sequence,
        LexiconEntry {
            status,
            version: version.to_string(),
            description: description.to_string(),
            group: group.to_string(),
            subgroup: subgroup.to_string(),
        },
    ))
}
