//! Ordered, provenance-tagged option table.
//!
//! The table is the single accumulator shared by every rc file parsed during
//! one invocation. Each directive name maps to the sequence of words declared
//! under it, in strict append order across all files (depth-first through
//! imports), with each word tagged by the index of its contributing file.

use serde::Serialize;
use std::collections::BTreeMap;

/// One word contributed by one directive line of one rc file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RcOption {
    /// Index of the contributing rc file in global discovery order.
    /// A non-owning back-reference into the session's file list.
    pub rcfile_index: usize,
    /// The single whitespace/quote-delimited word.
    pub value: String,
}

impl RcOption {
    pub fn new(rcfile_index: usize, value: impl Into<String>) -> Self {
        Self {
            rcfile_index,
            value: value.into(),
        }
    }
}

/// Mapping from directive name to its ordered value sequence.
///
/// Cross-key iteration order is lexicographic (a `BTreeMap`), which is stable
/// but not contractual; the sequence under each key preserves insertion order
/// across the entire parse.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OptionTable {
    entries: BTreeMap<String, Vec<RcOption>>,
}

impl OptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one option to a directive's sequence.
    pub fn push(&mut self, directive: &str, option: RcOption) {
        self.entries
            .entry(directive.to_string())
            .or_default()
            .push(option);
    }

    /// The ordered sequence for a directive; empty if never declared.
    pub fn get(&self, directive: &str) -> &[RcOption] {
        self.entries.get(directive).map_or(&[], Vec::as_slice)
    }

    /// Iterate over (directive, sequence) pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RcOption])> {
        self.entries
            .iter()
            .map(|(name, options)| (name.as_str(), options.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct directive names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
