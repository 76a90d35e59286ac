// ABOUTME: Markdown parsing module for the md2pptx application
// ABOUTME: Splits a slide-deck markdown document into ordered slide records

use crate::errors::{DeckError, Result};
use crate::slide::{ContentItem, SlideRecord};
use crate::utils;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Prefix that opens a new slide, e.g. `## Slide 3: Roadmap`
const SLIDE_HEADER_PREFIX: &str = "## Slide";

/// Literal lines that are dropped instead of becoming plain text
const EXCLUDED_LINES: [&str; 3] = [
    "```typescript",
    "```",
    "**Thank you for your consideration!**",
];

/// Glyphs that turn a line into a bullet item verbatim
const CHECK_MARKS: [char; 2] = ['✅', '❌'];

/// Parse a markdown file from disk into slide records
pub fn parse_markdown_file(markdown_path: &Path) -> Result<Vec<SlideRecord>> {
    info!("Parsing markdown file: {:?}", markdown_path);

    utils::validate_file_exists(markdown_path)?;

    let content = fs::read_to_string(markdown_path).map_err(DeckError::FileReadError)?;
    Ok(parse_markdown(&content))
}

/// Parse markdown text into an ordered list of slides.
///
/// Lines are scanned in order against a single accumulator. A `## Slide <n>: <title>`
/// line closes the accumulator and opens the next one; every other recognised line
/// adds a content item to the current accumulator. Only accumulators with a
/// non-empty title are kept.
///
/// A `# <title>` line retitles the current accumulator while no slide has been kept
/// yet. The accumulator that precedes the first slide header only becomes a slide
/// when the document has no slide headers.
pub fn parse_markdown(content: &str) -> Vec<SlideRecord> {
    let mut slides: Vec<SlideRecord> = Vec::new();
    let mut current = SlideRecord::default();
    let mut seen_slide_header = false;

    for raw_line in content.split('\n') {
        let line = raw_line.trim();

        if let Some(rest) = line.strip_prefix(SLIDE_HEADER_PREFIX) {
            let finished = std::mem::take(&mut current);
            if seen_slide_header {
                push_if_titled(&mut slides, finished);
            } else if finished.has_title() {
                debug!("Replacing deck title {:?} with first slide", finished.title);
            }
            seen_slide_header = true;

            if let Some((_, title)) = rest.split_once(':') {
                current.title = title.trim().to_string();
            }
            debug!("Opened slide {:?}", current.title);
        } else if line.starts_with("# ") && slides.is_empty() {
            current.title = line[2..].trim().to_string();
            debug!("Set title {:?} from top-level heading", current.title);
        } else if let Some(item) = classify_line(line) {
            current.content.push(item);
        }
    }

    push_if_titled(&mut slides, current);

    info!("Parsed {} slides", slides.len());
    slides
}

fn push_if_titled(slides: &mut Vec<SlideRecord>, slide: SlideRecord) {
    if slide.has_title() {
        slides.push(slide);
    } else if !slide.content.is_empty() {
        debug!(
            "Dropping untitled slide with {} content items",
            slide.content.len()
        );
    }
}

/// Map one trimmed body line to a content item, or `None` if it is dropped
fn classify_line(line: &str) -> Option<ContentItem> {
    if let Some(text) = line.strip_prefix("### ") {
        return Some(ContentItem::Header(text.trim().to_string()));
    }

    if line.starts_with("**") && line.ends_with("**") {
        let inner = line.get(2..line.len().saturating_sub(2)).unwrap_or("");
        return Some(ContentItem::Bold(inner.trim().to_string()));
    }

    if let Some(text) = line.strip_prefix("- ") {
        return Some(ContentItem::Bullet(text.trim().replace("**", "")));
    }

    if line.contains(CHECK_MARKS) {
        return Some(ContentItem::Bullet(line.to_string()));
    }

    if line.is_empty() || line.starts_with("---") || EXCLUDED_LINES.contains(&line) {
        return None;
    }

    Some(ContentItem::PlainText(line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullet(text: &str) -> ContentItem {
        ContentItem::Bullet(text.to_string())
    }

    #[test]
    fn test_single_slide_with_bullet() {
        let slides = parse_markdown("## Slide 1: Title\n- first point");

        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Title");
        assert_eq!(slides[0].content, vec![bullet("first point")]);
    }

    #[test]
    fn test_deck_title_is_replaced_by_first_slide() {
        let markdown = "# Deck Title\n## Slide 1: Intro\n- point one\n- **point two**\n## Slide 2: Summary\n✅ done";
        let slides = parse_markdown(markdown);

        assert_eq!(
            slides,
            vec![
                SlideRecord {
                    title: "Intro".to_string(),
                    content: vec![bullet("point one"), bullet("point two")],
                },
                SlideRecord {
                    title: "Summary".to_string(),
                    content: vec![bullet("✅ done")],
                },
            ]
        );
    }

    #[test]
    fn test_deck_title_without_slide_headers() {
        let markdown = "# Only Title\n### Section\n**Key point**\n- item\nSome text\n❌ not done";
        let slides = parse_markdown(markdown);

        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Only Title");
        assert_eq!(
            slides[0].content,
            vec![
                ContentItem::Header("Section".to_string()),
                ContentItem::Bold("Key point".to_string()),
                bullet("item"),
                ContentItem::PlainText("Some text".to_string()),
                bullet("❌ not done"),
            ]
        );
    }

    #[test]
    fn test_empty_slide_title_is_dropped() {
        let slides = parse_markdown("## Slide 1:\n- lost\n## Slide 2: Kept\n- kept");

        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Kept");
        assert_eq!(slides[0].content, vec![bullet("kept")]);
    }

    #[test]
    fn test_slide_header_without_colon_is_dropped() {
        let slides = parse_markdown("## Slide 1 Intro\n- lost");
        assert!(slides.is_empty());
    }

    #[test]
    fn test_title_after_first_colon_only() {
        let slides = parse_markdown("## Slide 4: Plan: Phase Two  ");
        assert_eq!(slides[0].title, "Plan: Phase Two");
    }

    #[test]
    fn test_code_fences_and_rules_are_dropped() {
        let markdown = "## Slide 1: Code\n```typescript\nconst x = 1;\n```\n---\n\n   \n";
        let slides = parse_markdown(markdown);

        assert_eq!(
            slides[0].content,
            vec![ContentItem::PlainText("const x = 1;".to_string())]
        );
    }

    #[test]
    fn test_top_level_heading_after_closed_slide_is_plain_text() {
        let slides = parse_markdown("## Slide 1: One\n## Slide 2: Two\n# Late Heading");

        assert_eq!(slides.len(), 2);
        assert_eq!(
            slides[1].content,
            vec![ContentItem::PlainText("# Late Heading".to_string())]
        );
    }

    #[test]
    fn test_top_level_heading_retitles_first_open_slide() {
        let slides = parse_markdown("## Slide 1: One\n# Retitled\n- x");

        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Retitled");
        assert_eq!(slides[0].content, vec![bullet("x")]);
    }

    #[test]
    fn test_top_level_heading_titles_untitled_first_slide() {
        let slides = parse_markdown("## Slide 1:\n# Rescued\n- x\n## Slide 2: Next");

        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].title, "Rescued");
        assert_eq!(slides[0].content, vec![bullet("x")]);
        assert_eq!(slides[1].title, "Next");
    }

    #[test]
    fn test_deck_title_content_is_discarded_with_slide_headers() {
        let slides = parse_markdown("# Deck\n- preamble\n## Slide 1: One\n- kept");

        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "One");
        assert_eq!(slides[0].content, vec![bullet("kept")]);
    }

    #[test]
    fn test_other_level_two_headings_are_plain_text() {
        let slides = parse_markdown("## Slide 1: One\n## Agenda");
        assert_eq!(
            slides[0].content,
            vec![ContentItem::PlainText("## Agenda".to_string())]
        );
    }

    #[test]
    fn test_bold_markers_only_yield_empty_bold() {
        let slides = parse_markdown("## Slide 1: One\n**\n***");
        assert_eq!(
            slides[0].content,
            vec![
                ContentItem::Bold(String::new()),
                ContentItem::Bold(String::new()),
            ]
        );
    }

    #[test]
    fn test_bulleted_checkmark_is_a_single_item() {
        let slides = parse_markdown("## Slide 1: Status\n- ✅ **shipped**");
        assert_eq!(slides[0].content, vec![bullet("✅ shipped")]);
    }

    #[test]
    fn test_indented_lines_and_crlf() {
        let slides = parse_markdown("## Slide 1: Win\r\n    - indented\r\n  ### Sub\r\n");

        assert_eq!(slides[0].title, "Win");
        assert_eq!(
            slides[0].content,
            vec![bullet("indented"), ContentItem::Header("Sub".to_string())]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_markdown("").is_empty());
    }
}
