//! Fragment-level matching of requirement phrases against candidate text
//!
//! A phrase is split on list separators and coordinators before
//! normalization, so "SQL, Python, and Docker" is judged fragment by
//! fragment with OR semantics. Each fragment can hit through three
//! signals: token Jaccard against the whole candidate, coverage of the
//! fragment's own tokens, or an exact single-token presence check that
//! keeps short technical terms from being penalized for vocabulary-size
//! mismatch.

use crate::config::ScoringConfig;
use crate::processing::text::TextProcessor;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl MatchOutcome {
    pub fn total(&self) -> usize {
        self.matched.len() + self.missing.len()
    }

    pub fn ratio(&self) -> f64 {
        // an empty bucket contributes 0, uniformly
        if self.total() == 0 {
            0.0
        } else {
            self.matched.len() as f64 / self.total() as f64
        }
    }
}

pub struct FragmentMatcher {
    processor: TextProcessor,
    separators: Regex,
    similarity_threshold: f64,
    overlap_threshold: f64,
}

impl FragmentMatcher {
    pub fn new(config: &ScoringConfig) -> Self {
        let separators =
            Regex::new(r"(?i),|;|\s+and\s+|\s+or\s+").expect("Invalid separator regex");
        Self {
            processor: TextProcessor::new(),
            separators,
            similarity_threshold: config.similarity_threshold,
            overlap_threshold: config.overlap_threshold,
        }
    }

    /// Partition `phrases` into matched and missing against the candidate
    /// text. `matched ∪ missing` is always the input set, in input order.
    pub fn match_against(&self, candidate_text: &str, phrases: &[String]) -> MatchOutcome {
        let candidate_tokens = self.processor.token_set(candidate_text);

        let mut outcome = MatchOutcome::default();
        for phrase in phrases {
            if self.phrase_hits(&candidate_tokens, phrase) {
                outcome.matched.push(phrase.clone());
            } else {
                outcome.missing.push(phrase.clone());
            }
        }
        outcome
    }

    /// Split a raw phrase on list separators and coordinators, then
    /// normalize each piece. Fragments shorter than two characters are
    /// noise and get dropped.
    pub fn fragmentize(&self, phrase: &str) -> Vec<String> {
        self.separators
            .split(phrase)
            .map(|piece| self.processor.tokenize(piece).join(" "))
            .filter(|frag| frag.len() >= 2)
            .collect()
    }

    fn phrase_hits(&self, candidate_tokens: &HashSet<String>, phrase: &str) -> bool {
        for fragment in self.fragmentize(phrase) {
            let frag_tokens = self.processor.tokenize(&fragment);
            if frag_tokens.is_empty() {
                continue;
            }

            let frag_set: HashSet<String> = frag_tokens.iter().cloned().collect();
            let similarity = TextProcessor::jaccard_sets(&frag_set, candidate_tokens);

            let present = frag_tokens
                .iter()
                .filter(|t| candidate_tokens.contains(*t))
                .count();
            let overlap = present as f64 / frag_tokens.len() as f64;

            if similarity >= self.similarity_threshold || overlap >= self.overlap_threshold {
                return true;
            }

            // single-token exacts for named tech (ga4, hubspot, sql)
            if frag_tokens.len() == 1 && candidate_tokens.contains(&frag_tokens[0]) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn matcher() -> FragmentMatcher {
        FragmentMatcher::new(&Config::default().scoring)
    }

    fn phrases(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fragmentize_splits_on_separators() {
        let frags = matcher().fragmentize("SQL, Python, and Docker");
        assert_eq!(frags, vec!["sql", "python", "docker"]);
    }

    #[test]
    fn test_fragmentize_keeps_two_char_terms() {
        let frags = matcher().fragmentize("Go; R");
        assert_eq!(frags, vec!["go"]);
    }

    #[test]
    fn test_compound_phrase_matches_on_one_fragment() {
        let outcome = matcher().match_against(
            "Shipped several Python services",
            &phrases(&["SQL, Python, and Docker"]),
        );
        assert_eq!(outcome.matched.len(), 1);
        assert!(outcome.missing.is_empty());
    }

    #[test]
    fn test_single_token_technical_term() {
        let outcome = matcher().match_against(
            "ten years writing sql reports for finance",
            &phrases(&["sql"]),
        );
        assert_eq!(outcome.matched, vec!["sql"]);
    }

    #[test]
    fn test_overlap_signal_survives_verbose_candidate() {
        let candidate = "Long background covering kubernetes clusters, terraform, \
                         observability stacks, incident response, python tooling and mentoring";
        let outcome = matcher().match_against(candidate, &phrases(&["python tooling"]));
        assert_eq!(outcome.matched, vec!["python tooling"]);
    }

    #[test]
    fn test_jaccard_signal_fires_for_terse_candidate() {
        // fragment has 5 tokens, candidate 2, intersection 2:
        // overlap 0.4 misses, jaccard 2/5 = 0.4 hits
        let outcome = matcher().match_against(
            "alpha beta",
            &phrases(&["alpha beta gamma delta epsilon"]),
        );
        assert_eq!(outcome.matched.len(), 1);
    }

    #[test]
    fn test_unrelated_phrase_is_missing() {
        let outcome = matcher().match_against(
            "watercolor painting and pottery",
            &phrases(&["distributed consensus protocols"]),
        );
        assert!(outcome.matched.is_empty());
        assert_eq!(outcome.missing.len(), 1);
    }

    #[test]
    fn test_partition_invariant() {
        let input = phrases(&["rust services", "sql", "event driven design", "figma prototypes"]);
        let outcome = matcher().match_against("rust and sql daily", &input);
        assert_eq!(outcome.total(), input.len());
        for p in &input {
            let in_matched = outcome.matched.contains(p);
            let in_missing = outcome.missing.contains(p);
            assert!(in_matched ^ in_missing, "{:?} must be in exactly one list", p);
        }
    }

    #[test]
    fn test_empty_candidate_matches_nothing() {
        let input = phrases(&["rust services", "sql"]);
        let outcome = matcher().match_against("", &input);
        assert!(outcome.matched.is_empty());
        assert_eq!(outcome.missing.len(), 2);
    }

    #[test]
    fn test_empty_bucket_ratio_is_zero() {
        assert_eq!(MatchOutcome::default().ratio(), 0.0);
    }
}
