//! Plain-text extraction from source files
//!
//! The scorer itself only ever sees strings; this module turns the files a
//! recruiter actually has (a pasted .txt, a markdown JD, a PDF resume) into
//! those strings. Repeated reads of the same path hit an in-memory cache.

use crate::error::{FitScorerError, Result};
use log::info;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("pdf") => FileType::Pdf,
            Some("txt") => FileType::Text,
            Some("md") | Some("markdown") => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }
}

pub struct SourceReader {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for SourceReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceReader {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a source file and return its plain text.
    pub async fn read(&mut self, path: &Path) -> Result<String> {
        let key = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&key) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(FitScorerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                Self::read_pdf(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                fs::read_to_string(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                Self::read_markdown(path).await?
            }
            FileType::Unknown => {
                return Err(FitScorerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(key, text.clone());
        }

        Ok(text)
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    async fn read_pdf(path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            FitScorerError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Render markdown to HTML, then strip the tags. Keeps the text content
    /// of lists and headings while dropping formatting syntax.
    async fn read_markdown(path: &Path) -> Result<String> {
        let markdown = fs::read_to_string(path).await?;

        let parser = Parser::new(&markdown);
        let mut rendered = String::new();
        html::push_html(&mut rendered, parser);

        Ok(Self::html_to_text(&rendered))
    }

    fn html_to_text(html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let tag_re = Regex::new(r"<[^>]*>").expect("Invalid tag regex");
        let stripped = tag_re.replace_all(&text, "");

        stripped
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_type_detection() {
        assert_eq!(FileType::from_path(Path::new("jd.txt")), FileType::Text);
        assert_eq!(FileType::from_path(Path::new("jd.MD")), FileType::Markdown);
        assert_eq!(FileType::from_path(Path::new("cv.pdf")), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("cv.docx")), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("noext")), FileType::Unknown);
    }

    #[tokio::test]
    async fn test_read_plain_text() {
        let file = temp_file(".txt", "Must have: SQL, Python");
        let mut reader = SourceReader::new();
        let text = reader.read(file.path()).await.unwrap();
        assert_eq!(text, "Must have: SQL, Python");
    }

    #[tokio::test]
    async fn test_read_markdown_strips_formatting() {
        let file = temp_file(".md", "## Requirements\n\n- **SQL** mastery\n- Python fluency\n");
        let mut reader = SourceReader::new();
        let text = reader.read(file.path()).await.unwrap();
        assert!(text.contains("SQL mastery"));
        assert!(text.contains("Python fluency"));
        assert!(!text.contains("**"));
        assert!(!text.contains("##"));
    }

    #[tokio::test]
    async fn test_cache_round_trip() {
        let file = temp_file(".txt", "cached content");
        let mut reader = SourceReader::new();

        let first = reader.read(file.path()).await.unwrap();
        assert_eq!(reader.cache_size(), 1);
        let second = reader.read(file.path()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(reader.cache_size(), 1);

        reader.clear_cache();
        assert_eq!(reader.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_error() {
        let file = temp_file(".docx", "whatever");
        let mut reader = SourceReader::new();
        assert!(reader.read(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let mut reader = SourceReader::new();
        let result = reader.read(Path::new("does/not/exist.txt")).await;
        assert!(result.is_err());
    }
}
