//! fOS HTML Parser
//!
//! HTML5 parsing built on html5ever. Produces `fos_dom::Document`s used
//! as audit fixtures and by the command-line harness.

mod parser;

pub use fos_dom::Document;
pub use parser::HtmlParser;

/// Parse an HTML string into a document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),
}
