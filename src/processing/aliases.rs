//! Synonym and alias expansion
//!
//! Candidate notes rarely spell requirements the way a JD does ("gtm" vs
//! "go to market"). The expander appends the canonical term for every alias
//! it finds, widening literal overlap downstream without touching the
//! original text.

use crate::error::{Result, FitScorerError};
use aho_corasick::AhoCorasick;
use std::collections::BTreeSet;

/// Canonical phrase -> alias spellings that should surface it.
const ALIASES: &[(&str, &[&str])] = &[
    ("go to market", &["gtm", "go-to-market", "go to market strategy", "launch strategy"]),
    ("product marketing", &["pmm", "product marketing manager"]),
    ("positioning", &["messaging", "narrative", "storytelling"]),
    ("analytics", &["ga4", "google analytics", "hubspot", "looker", "tableau", "amplitude"]),
    ("postgresql", &["postgres", "psql"]),
    ("human resources", &["hr"]),
    ("okrs", &["okr", "objectives and key results"]),
    ("machine learning", &["ml"]),
    ("artificial intelligence", &["ai"]),
    ("sql", &["structured query language"]),
    ("lifecycle", &["life cycle", "life-cycle", "customer lifecycle"]),
    ("sales enablement", &["product sales", "field enablement", "sales collateral"]),
];

pub struct AliasExpander {
    automaton: AhoCorasick,
    /// Index into `ALIASES` for each automaton pattern.
    canonical_index: Vec<usize>,
}

impl Default for AliasExpander {
    fn default() -> Self {
        Self::new().expect("Failed to build alias automaton")
    }
}

impl AliasExpander {
    pub fn new() -> Result<Self> {
        let mut patterns = Vec::new();
        let mut canonical_index = Vec::new();
        for (idx, (_, alts)) in ALIASES.iter().enumerate() {
            for alias in alts.iter() {
                patterns.push(*alias);
                canonical_index.push(idx);
            }
        }

        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .map_err(|e| FitScorerError::TextProcessing(format!("Failed to build alias matcher: {}", e)))?;

        Ok(Self {
            automaton,
            canonical_index,
        })
    }

    /// Return `text` with every canonical term whose alias occurs in it
    /// appended once. Original content is never removed or reordered.
    pub fn expand(&self, text: &str) -> String {
        let mut triggered: BTreeSet<usize> = BTreeSet::new();
        for mat in self.automaton.find_overlapping_iter(text) {
            if Self::is_whole_word(text, mat.start(), mat.end()) {
                triggered.insert(self.canonical_index[mat.pattern().as_usize()]);
            }
        }

        if triggered.is_empty() {
            return text.to_string();
        }

        let mut out = text.to_string();
        for idx in triggered {
            out.push(' ');
            out.push_str(ALIASES[idx].0);
        }
        out
    }

    /// Alias hits inside larger words ("html" containing "ml") do not count.
    fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
        let bytes = text.as_bytes();
        let left_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let right_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        left_ok && right_ok
    }

    pub fn alias_count(&self) -> usize {
        self.canonical_index.len()
    }
}
