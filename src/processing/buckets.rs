//! Priority bucket classification for extracted requirement phrases
//!
//! Each phrase lands in exactly one of `must`, `nice`, or `general`,
//! decided by marker words in the clause surrounding its occurrence in the
//! JD. A positional backfill keeps `must` populated for JDs without any
//! section headers, so scoring always has signal to work with.

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::processing::extractor::PhraseExtractor;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The classification window extends to the nearest sentence terminator or
/// line break on each side of an occurrence, capped at this many bytes.
const WINDOW: usize = 80;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Buckets {
    pub must: Vec<String>,
    pub nice: Vec<String>,
    pub general: Vec<String>,
}

impl Buckets {
    pub fn total_phrases(&self) -> usize {
        self.must.len() + self.nice.len() + self.general.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_phrases() == 0
    }
}

pub struct BucketClassifier {
    must_markers: Regex,
    nice_markers: Regex,
    max_per_bucket: usize,
    must_backfill: usize,
    nice_backfill_end: usize,
    general_backfill_end: usize,
}

impl BucketClassifier {
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        let must_markers =
            Regex::new(r"(?i)\b(must[-\s]?have|required|min(imum)?|need(ed)?\s?to|we need)\b")
                .expect("Invalid must-marker regex");
        let nice_markers = Regex::new(r"(?i)\b(nice[-\s]?to[-\s]?have|preferred|bonus|plus)\b")
            .expect("Invalid nice-marker regex");

        Ok(Self {
            must_markers,
            nice_markers,
            max_per_bucket: config.max_phrases_per_bucket,
            must_backfill: config.must_backfill,
            nice_backfill_end: config.nice_backfill_end,
            general_backfill_end: config.general_backfill_end,
        })
    }

    /// Assign every phrase to exactly one bucket. Must-markers win over
    /// nice-markers when both appear in a window; phrases whose window has
    /// neither go to `general`.
    pub fn bucketize(&self, jd: &str, phrases: &[String]) -> Buckets {
        let blob = PhraseExtractor::split_lines(jd).join("\n").to_lowercase();
        let jd_lower = jd.to_lowercase();

        let mut buckets = Buckets::default();
        for phrase in phrases {
            let needle = phrase.to_lowercase();
            let window = match blob.find(&needle) {
                Some(idx) => Self::clause_window(&blob, idx, idx + needle.len()),
                // not present verbatim (mined keywords, reflowed text):
                // sniff the whole JD instead
                None => jd_lower.as_str(),
            };

            if self.must_markers.is_match(window) {
                buckets.must.push(phrase.clone());
            } else if self.nice_markers.is_match(window) {
                buckets.nice.push(phrase.clone());
            } else {
                buckets.general.push(phrase.clone());
            }
        }

        self.backfill(&mut buckets, phrases);

        buckets.must.truncate(self.max_per_bucket);
        buckets.nice.truncate(self.max_per_bucket);
        buckets.general.truncate(self.max_per_bucket);
        buckets
    }

    /// Positional backfill for empty buckets. Phrases are MOVED, never
    /// copied, so the one-bucket-per-phrase invariant holds.
    fn backfill(&self, buckets: &mut Buckets, phrases: &[String]) {
        if buckets.must.is_empty() && !phrases.is_empty() {
            for phrase in phrases.iter().take(self.must_backfill) {
                buckets.nice.retain(|p| p != phrase);
                buckets.general.retain(|p| p != phrase);
                buckets.must.push(phrase.clone());
            }
        }

        if buckets.nice.is_empty() && phrases.len() > self.must_backfill {
            for phrase in phrases
                .iter()
                .skip(self.must_backfill)
                .take(self.nice_backfill_end.saturating_sub(self.must_backfill))
            {
                if buckets.must.contains(phrase) {
                    continue;
                }
                buckets.general.retain(|p| p != phrase);
                buckets.nice.push(phrase.clone());
            }
        }

        if buckets.general.is_empty() && phrases.len() > self.nice_backfill_end {
            for phrase in phrases
                .iter()
                .skip(self.nice_backfill_end)
                .take(self.general_backfill_end.saturating_sub(self.nice_backfill_end))
            {
                if buckets.must.contains(phrase) || buckets.nice.contains(phrase) {
                    continue;
                }
                buckets.general.push(phrase.clone());
            }
        }
    }

    /// Slice of `text` bounded by sentence terminators or line breaks
    /// around `[start, end)`, at most `WINDOW` bytes each side.
    fn clause_window(text: &str, start: usize, end: usize) -> &str {
        let bytes = text.as_bytes();

        let floor = start.saturating_sub(WINDOW);
        let mut w_start = floor;
        let mut i = start;
        while i > floor {
            i -= 1;
            if matches!(bytes[i], b'.' | b'!' | b'?' | b'\n') {
                w_start = i + 1;
                break;
            }
        }

        let ceil = (end + WINDOW).min(bytes.len());
        let mut w_end = ceil;
        let mut j = end;
        while j < ceil {
            if matches!(bytes[j], b'.' | b'!' | b'?' | b'\n') {
                w_end = j + 1;
                break;
            }
            j += 1;
        }

        while !text.is_char_boundary(w_start) {
            w_start += 1;
        }
        while !text.is_char_boundary(w_end) {
            w_end -= 1;
        }
        &text[w_start..w_end.max(w_start)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::extractor::PhraseExtractor;

    fn classifier() -> BucketClassifier {
        BucketClassifier::new(&Config::default().extraction).unwrap()
    }

    fn phrases_of(jd: &str) -> Vec<String> {
        PhraseExtractor::new(&Config::default().extraction).extract(jd)
    }

    #[test]
    fn test_marker_words_route_phrases() {
        let jd = "Required: Kafka streaming pipelines\nNice to have: Grafana dashboards\nYou will ship features weekly";
        let phrases = phrases_of(jd);
        let buckets = classifier().bucketize(jd, &phrases);

        assert!(buckets.must.iter().any(|p| p.contains("Kafka")));
        assert!(buckets.nice.iter().any(|p| p.contains("Grafana")));
        assert!(buckets.general.iter().any(|p| p.contains("ship features")));
    }

    #[test]
    fn test_must_wins_over_nice_in_same_window() {
        let jd = "Must have, and a real plus: Terraform modules";
        let phrases = phrases_of(jd);
        let buckets = classifier().bucketize(jd, &phrases);
        assert!(buckets.must.iter().any(|p| p.contains("Terraform")));
        assert!(!buckets.nice.iter().any(|p| p.contains("Terraform")));
    }

    #[test]
    fn test_clauses_in_one_line_classify_independently() {
        let jd = "Must have: SQL, Python. Nice to have: Docker.";
        let phrases = phrases_of(jd);
        let buckets = classifier().bucketize(jd, &phrases);
        assert!(buckets.nice.contains(&"docker".to_string()));
        assert!(buckets.must.contains(&"python".to_string()));
    }

    #[test]
    fn test_phrase_never_lands_in_two_buckets() {
        let jd = "Required: Rust services. Preferred: Rust services.";
        let phrases = phrases_of(jd);
        let buckets = classifier().bucketize(jd, &phrases);
        for p in &buckets.must {
            assert!(!buckets.nice.contains(p), "{:?} in must and nice", p);
            assert!(!buckets.general.contains(p), "{:?} in must and general", p);
        }
        for p in &buckets.nice {
            assert!(!buckets.general.contains(p), "{:?} in nice and general", p);
        }
    }

    #[test]
    fn test_backfill_populates_empty_must() {
        let jd = "Ship customer features\nReview pull requests\nMentor junior engineers";
        let phrases = phrases_of(jd);
        let buckets = classifier().bucketize(jd, &phrases);
        assert!(!buckets.must.is_empty());
        // moved, not copied
        for p in &buckets.must {
            assert!(!buckets.general.contains(p));
        }
    }

    #[test]
    fn test_buckets_respect_cap() {
        let jd: String = (0..60)
            .map(|i| format!("Required: skill number {} mastery\n", i))
            .collect();
        let phrases = phrases_of(&jd);
        let buckets = classifier().bucketize(&jd, &phrases);
        let cap = Config::default().extraction.max_phrases_per_bucket;
        assert!(buckets.must.len() <= cap);
        assert!(buckets.nice.len() <= cap);
        assert!(buckets.general.len() <= cap);
    }

    #[test]
    fn test_empty_jd_yields_empty_buckets() {
        let buckets = classifier().bucketize("", &[]);
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_marker_needs_word_boundary() {
        // "administration" contains "min"; must not classify as must-have
        let jd = "Required: Python scripting\nHandles office administration tasks";
        let phrases = phrases_of(jd);
        let buckets = classifier().bucketize(jd, &phrases);
        assert!(buckets
            .general
            .contains(&"Handles office administration tasks".to_string()));
    }
}
