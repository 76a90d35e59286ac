// ABOUTME: Library module for the md2pptx program.
// ABOUTME: Contains the markdown slide parser and the PPTX renderer.

// Reexport modules
pub mod config;
pub mod errors;
pub mod parser;
pub mod pptx;
pub mod slide;
pub mod template;
pub mod utils;

// Reexport common types and functions
pub use config::Config;
pub use errors::{DeckError, Result};
pub use parser::{parse_markdown, parse_markdown_file};
pub use pptx::{generate_pptx, render_slide_xml, PptxConfig};
pub use slide::{ContentItem, ParagraphStyle, SlideRecord};
