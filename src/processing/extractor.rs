//! Requirement phrase extraction from job description text
//!
//! Three passes over the JD feed the phrase pool: bullet-stripped lines,
//! short sentences, and frequency-ranked keywords/bigrams. Lines and
//! sentences must carry at least two significant tokens; mined keywords are
//! exempt so short technical terms ("sql") survive on their own.

use crate::config::ExtractionConfig;
use crate::processing::text::TextProcessor;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

pub struct PhraseExtractor {
    processor: TextProcessor,
    min_phrase_tokens: usize,
    max_sentence_len: usize,
    top_keywords: usize,
}

impl PhraseExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            processor: TextProcessor::new(),
            min_phrase_tokens: config.min_phrase_tokens,
            max_sentence_len: config.max_sentence_len,
            top_keywords: config.top_keywords,
        }
    }

    /// Produce the deduplicated, order-preserving phrase pool for a JD.
    /// Never yields phrases made purely of stopwords; no cap is applied
    /// here (buckets cap later).
    pub fn extract(&self, jd: &str) -> Vec<String> {
        let mut pieces: Vec<(String, bool)> = Vec::new();

        for line in Self::split_lines(jd) {
            pieces.push((line, false));
        }
        for sentence in self.split_sentences(jd) {
            if sentence.chars().count() < self.max_sentence_len {
                pieces.push((sentence, false));
            }
        }
        for keyword in self.top_keywords(jd) {
            // mined keywords are exempt from the min-token filter
            pieces.push((keyword, true));
        }

        let mut seen = HashSet::new();
        let mut phrases = Vec::new();
        for (piece, exempt) in pieces {
            let cleaned = piece.split_whitespace().collect::<Vec<_>>().join(" ");
            if cleaned.is_empty() {
                continue;
            }
            let token_count = self.processor.tokenize(&cleaned).len();
            if token_count == 0 {
                continue;
            }
            if !exempt && token_count < self.min_phrase_tokens {
                continue;
            }
            if seen.insert(cleaned.clone()) {
                phrases.push(cleaned);
            }
        }
        phrases
    }

    /// Lines with leading bullet markers stripped.
    pub fn split_lines(text: &str) -> Vec<String> {
        text.lines()
            .map(|l| {
                l.trim_start()
                    .trim_start_matches(['-', '*', '\u{2022}'])
                    .trim()
                    .to_string()
            })
            .filter(|l| !l.is_empty())
            .collect()
    }

    /// Sentence boundaries via Unicode segmentation.
    pub fn split_sentences(&self, text: &str) -> Vec<String> {
        text.unicode_sentences()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Frequency-ranked single tokens and adjacent-token bigrams across the
    /// whole JD. Bigrams count double so multi-word skills outrank their
    /// parts. Ties break on first occurrence, keeping output deterministic.
    pub fn top_keywords(&self, text: &str) -> Vec<String> {
        let tokens = self.processor.tokenize(text);

        // (weight, first-seen rank) per term; singles rank before bigrams
        let mut freq: HashMap<String, (usize, usize)> = HashMap::new();
        for (pos, token) in tokens.iter().enumerate() {
            let entry = freq.entry(token.clone()).or_insert((0, pos));
            entry.0 += 1;
        }
        for (pos, pair) in tokens.windows(2).enumerate() {
            let bigram = format!("{} {}", pair[0], pair[1]);
            let entry = freq.entry(bigram).or_insert((0, tokens.len() + pos));
            entry.0 += 2;
        }

        let mut ranked: Vec<(String, (usize, usize))> = freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
        ranked
            .into_iter()
            .take(self.top_keywords)
            .map(|(term, _)| term)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn extractor() -> PhraseExtractor {
        PhraseExtractor::new(&Config::default().extraction)
    }

    #[test]
    fn test_bullet_markers_are_stripped() {
        let lines = PhraseExtractor::split_lines("- SQL mastery\n* Python fluency\n\u{2022} Docker basics");
        assert_eq!(lines, vec!["SQL mastery", "Python fluency", "Docker basics"]);
    }

    #[test]
    fn test_extract_skips_single_token_lines() {
        let phrases = extractor().extract("Python\nDistributed systems design");
        assert!(phrases.contains(&"Distributed systems design".to_string()));
        // "Python" as a line is too short, but survives as a mined keyword
        assert!(phrases.contains(&"python".to_string()));
    }

    #[test]
    fn test_extract_deduplicates_exact_strings() {
        let phrases = extractor().extract("Kafka streaming pipelines\nKafka streaming pipelines");
        let occurrences = phrases
            .iter()
            .filter(|p| p.as_str() == "Kafka streaming pipelines")
            .count();
        assert_eq!(occurrences, 1);
    }

    #[test]
    fn test_extract_empty_input() {
        assert!(extractor().extract("").is_empty());
        assert!(extractor().extract("   \n  ").is_empty());
    }

    #[test]
    fn test_no_stopword_only_phrases() {
        let phrases = extractor().extract("must have the ability to work with our team");
        for p in &phrases {
            assert!(
                !extractor().processor.tokenize(p).is_empty(),
                "stopword-only phrase leaked: {:?}",
                p
            );
        }
    }

    #[test]
    fn test_bigrams_outrank_rare_singles() {
        let keywords = extractor().top_keywords("event sourcing event sourcing postgres");
        assert_eq!(keywords.first().map(String::as_str), Some("event sourcing"));
    }

    #[test]
    fn test_keyword_ranking_is_deterministic() {
        let text = "alpha beta gamma delta alpha beta";
        let a = extractor().top_keywords(text);
        let b = extractor().top_keywords(text);
        assert_eq!(a, b);
    }
}
