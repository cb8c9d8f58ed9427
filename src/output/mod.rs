//! Output rendering for score results
//! Console, JSON, and Markdown formats

pub mod formatter;
pub mod report;

pub use formatter::{ConsoleFormatter, JsonFormatter, MarkdownFormatter, ReportGenerator};
pub use report::ScoreReport;
