// ABOUTME: Slide data model for the md2pptx application
// ABOUTME: Defines parsed slide records, content items and their paragraph styles

/// One styled line of slide body text, tagged by the markdown construct it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentItem {
    Header(String),
    Bold(String),
    Bullet(String),
    PlainText(String),
}

/// Paragraph formatting applied to a content item when it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphStyle {
    /// Font size in points
    pub size_pt: u32,
    pub bold: bool,
    /// Spacing after the paragraph in points
    pub space_after_pt: u32,
    pub bulleted: bool,
}

impl ContentItem {
    /// The text carried by this item
    pub fn text(&self) -> &str {
        match self {
            ContentItem::Header(text)
            | ContentItem::Bold(text)
            | ContentItem::Bullet(text)
            | ContentItem::PlainText(text) => text,
        }
    }

    /// Short tag name used in outlines and log output
    pub fn kind(&self) -> &'static str {
        match self {
            ContentItem::Header(_) => "header",
            ContentItem::Bold(_) => "bold",
            ContentItem::Bullet(_) => "bullet",
            ContentItem::PlainText(_) => "text",
        }
    }

    /// Look up the fixed paragraph style for this item's tag
    pub fn style(&self) -> ParagraphStyle {
        match self {
            ContentItem::Header(_) => ParagraphStyle {
                size_pt: 20,
                bold: true,
                space_after_pt: 12,
                bulleted: false,
            },
            ContentItem::Bold(_) => ParagraphStyle {
                size_pt: 18,
                bold: true,
                space_after_pt: 6,
                bulleted: false,
            },
            ContentItem::Bullet(_) => ParagraphStyle {
                size_pt: 16,
                bold: false,
                space_after_pt: 4,
                bulleted: true,
            },
            ContentItem::PlainText(_) => ParagraphStyle {
                size_pt: 14,
                bold: false,
                space_after_pt: 4,
                bulleted: false,
            },
        }
    }
}

/// The parsed representation of one output slide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideRecord {
    pub title: String,
    pub content: Vec<ContentItem>,
}

impl SlideRecord {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: Vec::new(),
        }
    }

    /// Slides without a title are never emitted
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// Render a plain-text outline of the slide, one item per line
    pub fn outline(&self) -> String {
        let mut outline = self.title.clone();
        for item in &self.content {
            outline.push_str(&format!("\n  [{}] {}", item.kind(), item.text()));
        }
        outline
    }
}
