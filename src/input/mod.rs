//! Input handling for the CLI
//! Reads job descriptions and candidate notes from txt, md, and pdf files

pub mod reader;

pub use reader::{FileType, SourceReader};
