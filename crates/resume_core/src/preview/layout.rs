//! Fixed-width page layout for preview trees.
//!
//! # Responsibility
//! - Position every preview node on one page of fixed width.
//! - Wrap long text at word boundaries using static font metrics.
//!
//! # Invariants
//! - Coordinates are pixels with the origin at the top-left page corner;
//!   run `y` values are baselines.
//! - No run extends past the right margin.
//! - Page height never drops below `LayoutConfig::min_page_height`.

use crate::preview::metrics::FontFace;
use crate::preview::render::{Preview, PreviewEntry, PreviewNode};

/// Page geometry and type scale.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub min_page_height: f32,
    pub margin: f32,
    pub name_size: f32,
    pub headline_size: f32,
    pub heading_size: f32,
    pub entry_title_size: f32,
    pub body_size: f32,
    /// Line box height as a multiple of font size.
    pub line_height: f32,
    pub block_gap: f32,
    pub entry_gap: f32,
    /// Horizontal space between an entry body and its aside column.
    pub aside_gutter: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 794.0,
            min_page_height: 1123.0,
            margin: 48.0,
            name_size: 24.0,
            headline_size: 17.0,
            heading_size: 17.0,
            entry_title_size: 15.0,
            body_size: 13.0,
            line_height: 1.4,
            block_gap: 24.0,
            entry_gap: 12.0,
            aside_gutter: 16.0,
        }
    }
}

impl LayoutConfig {
    pub fn content_width(&self) -> f32 {
        (self.page_width - 2.0 * self.margin).max(0.0)
    }

    fn right_edge(&self) -> f32 {
        self.page_width - self.margin
    }
}

/// One positioned line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    /// Baseline, measured from the page top.
    pub y: f32,
    pub size: f32,
    pub face: FontFace,
    pub text: String,
}

impl TextRun {
    pub fn width(&self) -> f32 {
        self.face.measure(&self.text, self.size)
    }
}

/// Horizontal rule under a section heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub thickness: f32,
}

/// Positioned content of one preview page.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewLayout {
    pub width: f32,
    pub height: f32,
    pub runs: Vec<TextRun>,
    pub rules: Vec<Rule>,
}

impl PreviewLayout {
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Lays `preview` out on a single page.
pub fn layout_preview(preview: &Preview, config: &LayoutConfig) -> PreviewLayout {
    let mut cursor = Cursor {
        config,
        top: config.margin,
        runs: Vec::new(),
        rules: Vec::new(),
    };

    for (index, block) in preview.blocks.iter().enumerate() {
        if block.nodes.is_empty() {
            continue;
        }
        if index > 0 && !cursor.runs.is_empty() {
            cursor.top += config.block_gap;
        }
        for node in &block.nodes {
            cursor.node(node);
        }
    }

    let height = (cursor.top + config.margin).max(config.min_page_height);
    PreviewLayout {
        width: config.page_width,
        height,
        runs: cursor.runs,
        rules: cursor.rules,
    }
}

struct Cursor<'a> {
    config: &'a LayoutConfig,
    /// Top of the next line box.
    top: f32,
    runs: Vec<TextRun>,
    rules: Vec<Rule>,
}

impl Cursor<'_> {
    fn node(&mut self, node: &PreviewNode) {
        let config = self.config;
        let left = config.margin;
        let width = config.content_width();
        match node {
            PreviewNode::Name(name) => {
                self.paragraph(name, FontFace::Bold, config.name_size, left, width)
            }
            PreviewNode::Headline(text) => {
                self.paragraph(text, FontFace::Regular, config.headline_size, left, width)
            }
            PreviewNode::ContactLine(parts) => {
                self.top += config.body_size * 0.3;
                self.paragraph(&parts.join(" | "), FontFace::Regular, config.body_size, left, width)
            }
            PreviewNode::Summary(text) => {
                self.top += config.body_size * 0.5;
                self.paragraph(text, FontFace::Regular, config.body_size, left, width)
            }
            PreviewNode::SectionHeading(title) => {
                self.paragraph(title, FontFace::Bold, config.heading_size, left, width);
                self.rules.push(Rule {
                    x1: left,
                    x2: config.right_edge(),
                    y: self.top + 2.0,
                    thickness: 1.0,
                });
                self.top += config.entry_gap;
            }
            PreviewNode::Entry(entry) => {
                self.entry(entry);
                self.top += config.entry_gap;
            }
            PreviewNode::SkillGroup { label, skills } => {
                self.paragraph(label, FontFace::Bold, config.body_size, left, width);
                self.paragraph(&skills.join(", "), FontFace::Regular, config.body_size, left, width);
                self.top += config.entry_gap;
            }
        }
    }

    fn entry(&mut self, entry: &PreviewEntry) {
        let config = self.config;
        let left = config.margin;
        let right = config.right_edge();
        let aside_width = entry
            .aside
            .iter()
            .map(|line| FontFace::Regular.measure(line, config.body_size))
            .fold(0.0_f32, f32::max)
            .min(config.content_width() / 2.0);
        let body_width = if aside_width > 0.0 {
            config.content_width() - aside_width - config.aside_gutter
        } else {
            config.content_width()
        };

        let start = self.top;
        for line in &entry.aside {
            for piece in wrap_text(line, FontFace::Regular, config.body_size, aside_width) {
                let x = right - FontFace::Regular.measure(&piece, config.body_size);
                self.line(piece, FontFace::Regular, config.body_size, x);
            }
        }
        let aside_bottom = self.top;

        self.top = start;
        self.paragraph(&entry.title, FontFace::Bold, config.entry_title_size, left, body_width);
        if let Some(subtitle) = &entry.subtitle {
            self.paragraph(subtitle, FontFace::Regular, config.body_size, left, body_width);
        }
        self.top = self.top.max(aside_bottom);

        if let Some(link) = &entry.link {
            self.paragraph(link, FontFace::Regular, config.body_size, left, config.content_width());
        }
        for detail in &entry.details {
            self.paragraph(detail, FontFace::Regular, config.body_size, left, config.content_width());
        }
    }

    fn paragraph(&mut self, text: &str, face: FontFace, size: f32, x: f32, max_width: f32) {
        for line in wrap_text(text, face, size, max_width) {
            self.line(line, face, size, x);
        }
    }

    fn line(&mut self, text: String, face: FontFace, size: f32, x: f32) {
        let box_height = size * self.config.line_height;
        let baseline = self.top + (box_height + size * 0.7) / 2.0;
        self.runs.push(TextRun {
            x,
            y: baseline,
            size,
            face,
            text,
        });
        self.top += box_height;
    }
}

/// Greedy word wrap of `text` into lines no wider than `max_width`.
///
/// Words wider than a whole line are split between characters. Blank text
/// yields no lines.
pub fn wrap_text(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if face.measure(&candidate, size) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if face.measure(word, size) <= max_width {
            current = word.to_string();
        } else {
            let mut pieces = split_word(word, face, size, max_width);
            current = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_word(word: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        current.push(ch);
        if face.measure(&current, size) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(ch);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}
