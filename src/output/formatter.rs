//! Output formatters with multiple format support

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::ScoreReport;
use crate::processing::scorer::Verdict;
use colored::Colorize;

/// Trait for rendering a score report into a displayable string.
pub trait OutputFormatter {
    fn format(&self, report: &ScoreReport) -> Result<String>;
}

/// Console formatter with colors keyed to the verdict.
pub struct ConsoleFormatter {
    pub use_colors: bool,
    pub detailed: bool,
}

/// JSON formatter for piping into other tools.
pub struct JsonFormatter {
    pub pretty: bool,
}

/// Markdown formatter for shareable reports.
pub struct MarkdownFormatter;

/// Dispatches to the right formatter for a requested output format.
pub struct ReportGenerator {
    console: ConsoleFormatter,
    json: JsonFormatter,
    markdown: MarkdownFormatter,
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console: ConsoleFormatter { use_colors, detailed },
            json: JsonFormatter { pretty: true },
            markdown: MarkdownFormatter,
        }
    }

    pub fn format(&self, report: &ScoreReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console.format(report),
            OutputFormat::Json => self.json.format(report),
            OutputFormat::Markdown => self.markdown.format(report),
        }
    }
}

impl ConsoleFormatter {
    fn paint(&self, text: &str, verdict: Verdict) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        match verdict {
            Verdict::StrongMatch => text.green().bold().to_string(),
            Verdict::PartialMatch => text.yellow().bold().to_string(),
            Verdict::WeakMatch => text.red().bold().to_string(),
        }
    }

    fn push_phrase_block(out: &mut String, title: &str, phrases: &[String], limit: usize) {
        if phrases.is_empty() {
            return;
        }
        out.push_str(&format!("  {}\n", title));
        for phrase in phrases.iter().take(limit) {
            out.push_str(&format!("    - {}\n", phrase));
        }
        if phrases.len() > limit {
            out.push_str(&format!("    ... and {} more\n", phrases.len() - limit));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &ScoreReport) -> Result<String> {
        let r = &report.result;
        let limit = if self.detailed { usize::MAX } else { 5 };

        let mut out = String::new();
        out.push_str("JD \u{2194} Candidate Fit\n");
        out.push_str(&format!(
            "  Job: {}  Candidate: {}\n\n",
            report.job_source, report.candidate_source
        ));

        let headline = format!("{}% \u{2014} {}", r.overall_score, r.verdict);
        out.push_str(&format!("  {}\n", self.paint(&headline, r.verdict)));
        out.push_str(&format!("  {}\n", r.summary));
        out.push_str(&format!("  {}\n\n", r.recommendation));

        Self::push_phrase_block(&mut out, "Must-have matched:", &r.must_have_matched, limit);
        Self::push_phrase_block(&mut out, "Must-have missing:", &r.must_have_missing, limit);
        Self::push_phrase_block(&mut out, "Nice-to-have matched:", &r.nice_to_have_matched, limit);
        Self::push_phrase_block(&mut out, "Nice-to-have missing:", &r.nice_to_have_missing, limit);
        if self.detailed {
            Self::push_phrase_block(&mut out, "General matched:", &r.general_matched, limit);
            Self::push_phrase_block(&mut out, "General missing:", &r.general_missing, limit);
        }

        out.push_str(&format!(
            "\n  Coverage: must {}/{}  nice {}/{}  general {}/{}\n",
            r.counts.must.matched,
            r.counts.must.total,
            r.counts.nice.matched,
            r.counts.nice.total,
            r.counts.general.matched,
            r.counts.general.total,
        ));
        out.push_str(&format!(
            "  Mode: {:?} \u{00b7} ~{} chars processed\n",
            r.mode, r.chars_processed
        ));

        Ok(out)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &ScoreReport) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(rendered)
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format(&self, report: &ScoreReport) -> Result<String> {
        let r = &report.result;
        let mut out = String::new();

        out.push_str("# JD \u{2194} Candidate Fit Report\n\n");
        out.push_str(&format!(
            "Generated: {}  \n",
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
        out.push_str(&format!("Job: `{}`  \n", report.job_source));
        out.push_str(&format!("Candidate: `{}`\n\n", report.candidate_source));

        out.push_str(&format!("## {}% \u{2014} {}\n\n", r.overall_score, r.verdict));
        out.push_str(&format!("{}\n\n", r.summary));
        out.push_str(&format!("**Recommendation:** {}\n\n", r.recommendation));

        out.push_str("| Bucket | Matched | Total |\n|---|---|---|\n");
        out.push_str(&format!(
            "| Must-have | {} | {} |\n",
            r.counts.must.matched, r.counts.must.total
        ));
        out.push_str(&format!(
            "| Nice-to-have | {} | {} |\n",
            r.counts.nice.matched, r.counts.nice.total
        ));
        out.push_str(&format!(
            "| General | {} | {} |\n\n",
            r.counts.general.matched, r.counts.general.total
        ));

        let sections: [(&str, &[String]); 6] = [
            ("Must-have matched", r.must_have_matched.as_slice()),
            ("Must-have missing", r.must_have_missing.as_slice()),
            ("Nice-to-have matched", r.nice_to_have_matched.as_slice()),
            ("Nice-to-have missing", r.nice_to_have_missing.as_slice()),
            ("General matched", r.general_matched.as_slice()),
            ("General missing", r.general_missing.as_slice()),
        ];
        for (title, phrases) in sections {
            if phrases.is_empty() {
                continue;
            }
            out.push_str(&format!("### {}\n\n", title));
            for phrase in phrases {
                out.push_str(&format!("- {}\n", phrase));
            }
            out.push('\n');
        }

        Ok(out)
    }
}
