// ABOUTME: Configuration module for the md2pptx application
// ABOUTME: Holds input/output locations and the defaults used when rendering decks

use crate::pptx::PptxConfig;
use crate::slide::SlideRecord;
use crate::utils;
use std::path::PathBuf;

/// Markdown source converted when no input is given on the command line
pub const DEFAULT_INPUT: &str = "../BASIS_TEAM_PRESENTATION.md";

/// Global configuration for a conversion run
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub default_aspect_ratio: String,
    pub title_font_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_path: None,
            default_aspect_ratio: "4:3".to_string(), // 10in x 7.5in
            title_font_size: 32,
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the input and output paths, keeping the remaining defaults
    pub fn with_paths(input_path: Option<PathBuf>, output_path: Option<PathBuf>) -> Self {
        let defaults = Self::default();
        Self {
            input_path: input_path.unwrap_or(defaults.input_path),
            output_path,
            ..defaults
        }
    }

    /// The presentation path to write: explicit output, else the input with a `.pptx` extension
    pub fn resolved_output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| utils::default_output_path(&self.input_path))
    }

    /// Title stored in the document properties.
    ///
    /// Prefers the first slide's title, then the input file stem.
    pub fn document_title(&self, slides: &[SlideRecord]) -> String {
        slides
            .first()
            .map(|slide| slide.title.clone())
            .or_else(|| {
                self.input_path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().to_string())
            })
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| PptxConfig::default().title)
    }

    /// Get a PPTX configuration with defaults from this config
    pub fn get_pptx_config(
        &self,
        title: Option<String>,
        aspect_ratio: Option<String>,
    ) -> PptxConfig {
        PptxConfig {
            title: title.unwrap_or_else(|| PptxConfig::default().title),
            aspect_ratio: aspect_ratio.unwrap_or_else(|| self.default_aspect_ratio.clone()),
            title_font_size: self.title_font_size,
        }
    }
}
