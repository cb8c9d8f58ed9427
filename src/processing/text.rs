//! Text normalization and tokenization
//!
//! Foundation for every later pipeline stage. All comparisons in the crate
//! happen over the output of these functions, so the rules here are the
//! single source of truth for what counts as a token.

use std::collections::HashSet;

/// Stopwords dropped during tokenization. Deliberately includes JD
/// boilerplate ("experience", "skills", "required") so requirement phrases
/// reduce to their informative terms.
const STOP_WORDS: &[&str] = &[
    "and", "or", "the", "a", "an", "of", "for", "to", "with", "in", "on", "at", "by",
    "be", "is", "are", "as", "that", "this", "those", "these", "it", "we", "you",
    "i", "will", "can", "may", "etc", "using", "use", "used", "including", "include",
    "experience", "ability", "skills", "skill", "required", "requirements",
    "preferred", "nice", "have", "must", "role", "responsibilities", "about",
    "our", "your", "their", "team", "teams", "work", "works", "from", "into", "across",
];

pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Lowercase, map punctuation and markup noise to spaces, collapse runs
    /// of whitespace. Empty input yields an empty string, never an error.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let mapped: String = lowered
            .chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' | '"' => '\'',
                '(' | ')' | '[' | ']' | '{' | '}' | ':' | ';' | '\u{2022}' | '-'
                | '\u{2013}' | '\u{2014}' | '_' | '/' | '\\' | '|' | '~' | '!' | '?'
                | ',' | '.' => ' ',
                c if c.is_whitespace() => ' ',
                _ => c,
            })
            .collect();

        mapped.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Normalize, split on spaces, and drop stopwords.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split(' ')
            .filter(|w| !w.is_empty() && !self.stop_words.contains(w))
            .map(|w| w.to_string())
            .collect()
    }

    /// Unique tokens of `text`.
    pub fn token_set(&self, text: &str) -> HashSet<String> {
        self.tokenize(text).into_iter().collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Token-level Jaccard similarity of two texts. Zero when either side
    /// has no significant tokens.
    pub fn jaccard(&self, a: &str, b: &str) -> f64 {
        let set_a = self.token_set(a);
        let set_b = self.token_set(b);
        Self::jaccard_sets(&set_a, &set_b)
    }

    /// Jaccard over pre-tokenized sets, for callers that tokenize once and
    /// compare many times.
    pub fn jaccard_sets(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        let inter = a.intersection(b).count();
        let union = a.len() + b.len() - inter;
        inter as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        let processor = TextProcessor::new();
        let normalized = processor.normalize("Must-have: SQL, Python (5+ years)!");
        assert_eq!(normalized, "must have sql python 5+ years");
    }

    #[test]
    fn test_normalize_empty_and_whitespace() {
        let processor = TextProcessor::new();
        assert_eq!(processor.normalize(""), "");
        assert_eq!(processor.normalize("   \n\t  "), "");
    }

    #[test]
    fn test_tokenize_filters_stopwords() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("Experience with Postgres and Python is required");
        assert_eq!(tokens, vec!["postgres", "python"]);
    }

    #[test]
    fn test_tokenize_empty_input_yields_no_tokens() {
        let processor = TextProcessor::new();
        assert!(processor.tokenize("").is_empty());
        assert!(processor.tokenize("the and of").is_empty());
    }

    #[test]
    fn test_jaccard_identical_texts() {
        let processor = TextProcessor::new();
        assert!((processor.jaccard("rust tokio", "tokio rust") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_jaccard_disjoint_and_empty() {
        let processor = TextProcessor::new();
        assert_eq!(processor.jaccard("rust", "python"), 0.0);
        assert_eq!(processor.jaccard("", "python"), 0.0);
    }

    #[test]
    fn test_jaccard_partial_overlap() {
        let processor = TextProcessor::new();
        // tokens: {postgres, python} vs {postgres, docker} -> 1/3
        let sim = processor.jaccard("Postgres Python", "Postgres Docker");
        assert!((sim - 1.0 / 3.0).abs() < 1e-9);
    }
}
