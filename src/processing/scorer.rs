//! Weighted score aggregation and the scoring engine
//!
//! `FitScorer` wires the full pipeline together: alias expansion of the
//! candidate notes, phrase extraction and bucket classification of the JD,
//! fragment matching per bucket, and weighted aggregation into a single
//! `ScoreResult`. The deterministic path is a pure function of its two
//! input strings; the collaborator path only ever widens it.

use crate::config::{Config, ScoringConfig, SemanticConfig};
use crate::error::{FitScorerError, Result};
use crate::processing::aliases::AliasExpander;
use crate::processing::buckets::{BucketClassifier, Buckets};
use crate::processing::extractor::PhraseExtractor;
use crate::processing::matcher::{FragmentMatcher, MatchOutcome};
use crate::processing::text::TextProcessor;
use crate::semantic::{cosine_similarity, Collaborator, ExtractedCriteria};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::timeout;

/// Longest phrase slice echoed into the summary text.
const SUMMARY_PHRASE_LEN: usize = 48;
/// How many phrases per bucket feed the summary.
const SUMMARY_TOP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Strong match")]
    StrongMatch,
    #[serde(rename = "Partial match")]
    PartialMatch,
    #[serde(rename = "Weak match")]
    WeakMatch,
}

impl Verdict {
    /// Fixed cutpoints: 80 and above is strong, 60 and above is partial.
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Verdict::StrongMatch
        } else if score >= 60 {
            Verdict::PartialMatch
        } else {
            Verdict::WeakMatch
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::StrongMatch => write!(f, "Strong match"),
            Verdict::PartialMatch => write!(f, "Partial match"),
            Verdict::WeakMatch => write!(f, "Weak match"),
        }
    }
}

/// Which pipeline produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    Heuristic,
    Semantic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCount {
    pub matched: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCounts {
    pub must: BucketCount,
    pub nice: BucketCount,
    pub general: BucketCount,
}

/// Final output of a scoring invocation. Constructed fresh per call and
/// never mutated afterwards; nothing is persisted between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub overall_score: u8,
    pub verdict: Verdict,
    pub summary: String,
    pub recommendation: String,

    pub must_have_matched: Vec<String>,
    pub must_have_missing: Vec<String>,
    pub nice_to_have_matched: Vec<String>,
    pub nice_to_have_missing: Vec<String>,
    pub general_matched: Vec<String>,
    pub general_missing: Vec<String>,

    pub counts: MatchCounts,
    /// What the JD extractor detected, bucket by bucket.
    pub extracted: Buckets,
    pub chars_processed: usize,
    pub mode: ScoreMode,
}

pub struct FitScorer {
    processor: TextProcessor,
    expander: AliasExpander,
    extractor: PhraseExtractor,
    classifier: BucketClassifier,
    matcher: FragmentMatcher,
    scoring: ScoringConfig,
    semantic: SemanticConfig,
    max_phrases_per_bucket: usize,
}

impl FitScorer {
    pub fn new() -> Result<Self> {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Result<Self> {
        Ok(Self {
            processor: TextProcessor::new(),
            expander: AliasExpander::new()?,
            extractor: PhraseExtractor::new(&config.extraction),
            classifier: BucketClassifier::new(&config.extraction)?,
            matcher: FragmentMatcher::new(&config.scoring),
            scoring: config.scoring.clone(),
            semantic: config.semantic.clone(),
            max_phrases_per_bucket: config.extraction.max_phrases_per_bucket,
        })
    }

    /// Deterministic scoring of a job description against candidate notes.
    /// Empty or whitespace-only inputs are valid and yield a well-formed
    /// zero result, never an error.
    pub fn score(&self, job_description: &str, candidate_notes: &str) -> ScoreResult {
        let expanded = self.expander.expand(candidate_notes);
        let phrases = self.extractor.extract(job_description);
        let buckets = self.classifier.bucketize(job_description, &phrases);

        let (must, nice, general) = self.run_matcher(&expanded, &buckets);
        let mut result = self.aggregate(must, nice, general);
        result.chars_processed =
            job_description.chars().count() + candidate_notes.chars().count();
        result
    }

    /// Scoring with an external collaborator layered on top. Every
    /// collaborator failure, timeout, or missing capability downgrades
    /// silently to the deterministic result; `mode` records what actually
    /// ran.
    pub async fn score_with_collaborator<C: Collaborator>(
        &self,
        job_description: &str,
        candidate_notes: &str,
        collaborator: &C,
    ) -> ScoreResult {
        if !collaborator.is_available() {
            return self.score(job_description, candidate_notes);
        }

        let bound = Duration::from_secs(self.semantic.timeout_secs);
        let expanded = self.expander.expand(candidate_notes);
        let phrases = self.extractor.extract(job_description);
        let mut buckets = self.classifier.bucketize(job_description, &phrases);
        let mut semantic_used = false;

        match timeout(bound, collaborator.extract_criteria(job_description)).await {
            Ok(Ok(criteria)) if !criteria.is_empty() => {
                buckets = self.adopt_criteria(criteria);
                semantic_used = true;
            }
            Ok(Ok(_)) => log::debug!("collaborator returned no criteria, keeping heuristic buckets"),
            Ok(Err(e)) => log::debug!("criteria extraction unavailable: {}", e),
            Err(_) => log::warn!("criteria extraction timed out after {:?}", bound),
        }

        let (mut must, mut nice, mut general) = self.run_matcher(&expanded, &buckets);

        let embed_pair = async {
            let jd_vec = collaborator.embed(job_description).await?;
            let cand_vec = collaborator.embed(&expanded).await?;
            Ok::<_, FitScorerError>((jd_vec, cand_vec))
        };
        match timeout(bound, embed_pair).await {
            Ok(Ok((jd_vec, cand_vec))) => match cosine_similarity(&jd_vec, &cand_vec) {
                Ok(cosine) => {
                    semantic_used = true;
                    if f64::from(cosine) >= self.semantic.cosine_threshold {
                        // globally similar texts: re-admit missing phrases
                        // that at least share one literal token
                        let candidate_tokens = self.processor.token_set(&expanded);
                        for outcome in [&mut must, &mut nice, &mut general] {
                            self.readmit_by_literal_token(outcome, &candidate_tokens);
                        }
                    }
                }
                Err(e) => log::debug!("embedding comparison failed: {}", e),
            },
            Ok(Err(e)) => log::debug!("embedding unavailable: {}", e),
            Err(_) => log::warn!("embedding timed out after {:?}", bound),
        }

        let mut result = self.aggregate(must, nice, general);
        result.chars_processed =
            job_description.chars().count() + candidate_notes.chars().count();
        if semantic_used {
            result.mode = ScoreMode::Semantic;
        }
        result
    }

    /// Combine per-bucket outcomes into the final result. Bucket ratios are
    /// weighted 0.6/0.3/0.1 by default; an empty bucket contributes ratio 0
    /// for every bucket alike.
    pub fn aggregate(
        &self,
        must: MatchOutcome,
        nice: MatchOutcome,
        general: MatchOutcome,
    ) -> ScoreResult {
        let raw = self.scoring.must_weight * must.ratio()
            + self.scoring.nice_weight * nice.ratio()
            + self.scoring.general_weight * general.ratio();

        let mut score = (raw * 100.0).round().clamp(0.0, 100.0) as u8;

        // some signal must never display as "0%"
        let any_hit =
            must.matched.len() + nice.matched.len() + general.matched.len() > 0;
        if any_hit && score < self.scoring.noise_floor {
            score = self.scoring.noise_floor;
        }

        let verdict = Verdict::from_score(score);
        let total_phrases = must.total() + nice.total() + general.total();
        let summary = self.compose_summary(&must, &nice, total_phrases);
        let recommendation = Self::compose_recommendation(verdict, total_phrases);

        let counts = MatchCounts {
            must: BucketCount { matched: must.matched.len(), total: must.total() },
            nice: BucketCount { matched: nice.matched.len(), total: nice.total() },
            general: BucketCount { matched: general.matched.len(), total: general.total() },
        };

        let extracted = Buckets {
            must: chain_phrases(&must),
            nice: chain_phrases(&nice),
            general: chain_phrases(&general),
        };

        ScoreResult {
            overall_score: score,
            verdict,
            summary,
            recommendation,
            must_have_matched: must.matched,
            must_have_missing: must.missing,
            nice_to_have_matched: nice.matched,
            nice_to_have_missing: nice.missing,
            general_matched: general.matched,
            general_missing: general.missing,
            counts,
            extracted,
            chars_processed: 0,
            mode: ScoreMode::Heuristic,
        }
    }

    fn run_matcher(
        &self,
        candidate: &str,
        buckets: &Buckets,
    ) -> (MatchOutcome, MatchOutcome, MatchOutcome) {
        (
            self.matcher.match_against(candidate, &buckets.must),
            self.matcher.match_against(candidate, &buckets.nice),
            self.matcher.match_against(candidate, &buckets.general),
        )
    }

    /// Collaborator-extracted criteria pass through the same hygiene as
    /// heuristic buckets: trimmed, deduplicated across buckets with
    /// must-first priority, and capped.
    fn adopt_criteria(&self, criteria: ExtractedCriteria) -> Buckets {
        let mut seen = HashSet::new();
        Buckets {
            must: self.sanitize_criteria_list(criteria.must, &mut seen),
            nice: self.sanitize_criteria_list(criteria.nice, &mut seen),
            general: self.sanitize_criteria_list(criteria.general, &mut seen),
        }
    }

    fn sanitize_criteria_list(
        &self,
        list: Vec<String>,
        seen: &mut HashSet<String>,
    ) -> Vec<String> {
        let mut out = Vec::new();
        for phrase in list {
            let cleaned = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
            if cleaned.is_empty() {
                continue;
            }
            if !seen.insert(cleaned.to_lowercase()) {
                continue;
            }
            out.push(cleaned);
            if out.len() >= self.max_phrases_per_bucket {
                break;
            }
        }
        out
    }

    fn readmit_by_literal_token(
        &self,
        outcome: &mut MatchOutcome,
        candidate_tokens: &HashSet<String>,
    ) {
        let missing = std::mem::take(&mut outcome.missing);
        for phrase in missing {
            let has_literal = self
                .processor
                .tokenize(&phrase)
                .iter()
                .any(|t| candidate_tokens.contains(t));
            if has_literal {
                outcome.matched.push(phrase);
            } else {
                outcome.missing.push(phrase);
            }
        }
    }

    fn compose_summary(
        &self,
        must: &MatchOutcome,
        nice: &MatchOutcome,
        total_phrases: usize,
    ) -> String {
        if total_phrases == 0 {
            return "No requirements could be parsed from the job description.".to_string();
        }

        let strong = join_top(&must.matched);
        let core_gaps = join_top(&must.missing);
        let trainable = join_top(&nice.missing);

        let mut parts = Vec::new();
        if strong.is_empty() {
            parts.push("No strong overlaps detected.".to_string());
        } else {
            parts.push(format!("Strong in {}.", strong));
        }
        if !core_gaps.is_empty() {
            parts.push(format!("Core gaps: {}.", core_gaps));
        }
        if !trainable.is_empty() {
            parts.push(format!("Trainable gaps: {}.", trainable));
        }
        parts.join(" ")
    }

    fn compose_recommendation(verdict: Verdict, total_phrases: usize) -> String {
        if total_phrases == 0 {
            return "No signal to evaluate; provide a fuller job description.".to_string();
        }
        match verdict {
            Verdict::StrongMatch => {
                "Advance to interview; core requirements are well covered.".to_string()
            }
            Verdict::PartialMatch => {
                "Worth a screen; probe the missing must-have areas first.".to_string()
            }
            Verdict::WeakMatch => {
                "Unlikely fit on current evidence; revisit sourcing or the role requirements."
                    .to_string()
            }
        }
    }
}

/// One-shot convenience wrapper over a default-configured scorer.
pub fn score_jd_and_candidate(
    job_description: &str,
    candidate_notes: &str,
) -> Result<ScoreResult> {
    Ok(FitScorer::new()?.score(job_description, candidate_notes))
}

fn chain_phrases(outcome: &MatchOutcome) -> Vec<String> {
    outcome
        .matched
        .iter()
        .chain(outcome.missing.iter())
        .cloned()
        .collect()
}

fn join_top(phrases: &[String]) -> String {
    phrases
        .iter()
        .take(SUMMARY_TOP)
        .map(|p| truncate_phrase(p, SUMMARY_PHRASE_LEN))
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate_phrase(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}
