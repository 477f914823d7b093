//! Document to preview-tree rendering.
//!
//! # Responsibility
//! - Map every section of a document to typed preview nodes, in order.
//! - Provide a plain-text rendering for diagnostics and export checks.
//!
//! # Invariants
//! - Rendering is a pure function of the document (no drag or focus state).
//! - Every section yields exactly one block, even when its content is empty.
//! - Blank optional fields are skipped, never rendered as empty lines.

use crate::editor::document::Document;
use crate::model::content::{
    AchievementItem, EducationItem, ExperienceItem, HeaderContent, ProjectItem, SectionContent,
    SkillsContent,
};
use crate::model::section::{Section, SectionId, SectionKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Bullet marker used for normalized description lines.
pub const BULLET: char = '•';

static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[•\-*]|\x{2013}|\x{25E6})\s+").expect("valid bullet regex")
});

/// Rendered preview of a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    pub blocks: Vec<PreviewBlock>,
}

/// Rendered preview of one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewBlock {
    pub section_id: SectionId,
    pub kind: SectionKind,
    pub nodes: Vec<PreviewNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewNode {
    /// Candidate name (largest text on the page).
    Name(String),
    /// Professional title below the name.
    Headline(String),
    /// Non-blank contact fields in display order.
    ContactLine(Vec<String>),
    Summary(String),
    /// Section title with a rule beneath it.
    SectionHeading(String),
    Entry(PreviewEntry),
    SkillGroup {
        label: String,
        skills: Vec<String>,
    },
}

/// One titled item with an optional right-aligned aside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewEntry {
    pub title: String,
    pub subtitle: Option<String>,
    /// Right-aligned lines (location, date range).
    pub aside: Vec<String>,
    pub link: Option<String>,
    /// Description split into display lines.
    pub details: Vec<String>,
}

impl Preview {
    /// All visible text, one line per text element, in reading order.
    pub fn text_content(&self) -> String {
        let mut lines = Vec::new();
        for block in &self.blocks {
            for node in &block.nodes {
                push_node_text(&mut lines, node);
            }
        }
        lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|block| block.nodes.is_empty())
    }
}

fn push_node_text(lines: &mut Vec<String>, node: &PreviewNode) {
    match node {
        PreviewNode::Name(text)
        | PreviewNode::Headline(text)
        | PreviewNode::Summary(text)
        | PreviewNode::SectionHeading(text) => lines.push(text.clone()),
        PreviewNode::ContactLine(parts) => lines.push(parts.join(" | ")),
        PreviewNode::Entry(entry) => {
            lines.push(entry.title.clone());
            lines.extend(entry.subtitle.iter().cloned());
            lines.extend(entry.aside.iter().cloned());
            lines.extend(entry.link.iter().cloned());
            lines.extend(entry.details.iter().cloned());
        }
        PreviewNode::SkillGroup { label, skills } => {
            lines.push(label.clone());
            lines.push(skills.join(", "));
        }
    }
}

/// Renders `document` into a preview tree.
pub fn render_preview(document: &Document) -> Preview {
    Preview {
        blocks: document.iter().map(render_section).collect(),
    }
}

fn render_section(section: &Section) -> PreviewBlock {
    let mut nodes = Vec::new();
    match &section.content {
        SectionContent::Header(header) => render_header(&mut nodes, header),
        SectionContent::Education(items) => {
            nodes.push(PreviewNode::SectionHeading(section.title.clone()));
            nodes.extend(items.iter().map(education_entry).map(PreviewNode::Entry));
        }
        SectionContent::Experience(items) => {
            nodes.push(PreviewNode::SectionHeading(section.title.clone()));
            nodes.extend(items.iter().map(experience_entry).map(PreviewNode::Entry));
        }
        SectionContent::Skills(skills) => {
            nodes.push(PreviewNode::SectionHeading(section.title.clone()));
            render_skills(&mut nodes, skills);
        }
        SectionContent::Projects(items) => {
            nodes.push(PreviewNode::SectionHeading(section.title.clone()));
            nodes.extend(items.iter().map(project_entry).map(PreviewNode::Entry));
        }
        SectionContent::Achievements(items) => {
            nodes.push(PreviewNode::SectionHeading(section.title.clone()));
            nodes.extend(items.iter().map(achievement_entry).map(PreviewNode::Entry));
        }
    }
    PreviewBlock {
        section_id: section.id.clone(),
        kind: section.kind(),
        nodes,
    }
}

fn render_header(nodes: &mut Vec<PreviewNode>, header: &HeaderContent) {
    if let Some(name) = non_blank(&header.full_name) {
        nodes.push(PreviewNode::Name(name));
    }
    if let Some(title) = non_blank(&header.title) {
        nodes.push(PreviewNode::Headline(title));
    }
    let contact: Vec<String> = [
        &header.email,
        &header.phone,
        &header.website,
        &header.location,
    ]
    .into_iter()
    .filter_map(|value| non_blank(value))
    .collect();
    if !contact.is_empty() {
        nodes.push(PreviewNode::ContactLine(contact));
    }
    if let Some(summary) = non_blank(&header.summary) {
        nodes.push(PreviewNode::Summary(summary));
    }
}

fn render_skills(nodes: &mut Vec<PreviewNode>, skills: &SkillsContent) {
    for category in &skills.categories {
        nodes.push(PreviewNode::SkillGroup {
            label: category.name.clone(),
            skills: category.skills.clone(),
        });
    }
}

fn education_entry(item: &EducationItem) -> PreviewEntry {
    PreviewEntry {
        title: item.institution.clone(),
        subtitle: non_blank(&item.degree),
        aside: aside_lines([
            item.location.clone(),
            date_range(&item.start_date, &item.end_date),
        ]),
        link: None,
        details: description_lines(&item.description),
    }
}

fn experience_entry(item: &ExperienceItem) -> PreviewEntry {
    PreviewEntry {
        title: item.company.clone(),
        subtitle: non_blank(&item.position),
        aside: aside_lines([
            item.location.clone(),
            date_range(&item.start_date, &item.end_date),
        ]),
        link: None,
        details: description_lines(&item.description),
    }
}

fn project_entry(item: &ProjectItem) -> PreviewEntry {
    PreviewEntry {
        title: item.name.clone(),
        subtitle: non_blank(&item.role),
        aside: aside_lines([date_range(&item.start_date, &item.end_date)]),
        link: non_blank(&item.link),
        details: description_lines(&item.description),
    }
}

fn achievement_entry(item: &AchievementItem) -> PreviewEntry {
    PreviewEntry {
        title: item.title.clone(),
        subtitle: non_blank(&item.issuer),
        aside: aside_lines([item.date.clone()]),
        link: None,
        details: description_lines(&item.description),
    }
}

/// Formats a free-text date range as `"start - end"`.
///
/// A single present endpoint is shown alone; two blanks give an empty string.
pub fn date_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (start, "") => start.to_string(),
        ("", end) => end.to_string(),
        (start, end) => format!("{start} - {end}"),
    }
}

/// Splits a description into display lines.
///
/// Blank lines are dropped and leading bullet markers (`•`, `-`, `*`) are
/// normalized to a single `•`.
pub fn description_lines(description: &str) -> Vec<String> {
    description
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            if BULLET_PREFIX.is_match(line) {
                format!("{BULLET} {}", BULLET_PREFIX.replace(line, ""))
            } else {
                line.trim_start().to_string()
            }
        })
        .collect()
}

fn aside_lines<const N: usize>(values: [String; N]) -> Vec<String> {
    values
        .into_iter()
        .filter(|value| !value.trim().is_empty())
        .collect()
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{date_range, description_lines, render_preview, PreviewNode};
    use crate::editor::document::Document;
    use crate::model::content::{HeaderContent, SectionContent};
    use crate::model::section::{Section, SectionKind};

    #[test]
    fn date_range_handles_missing_endpoints() {
        assert_eq!(date_range("Jan 2020", "Present"), "Jan 2020 - Present");
        assert_eq!(date_range("Jan 2020", ""), "Jan 2020");
        assert_eq!(date_range(" ", "2021"), "2021");
        assert_eq!(date_range("", ""), "");
    }

    #[test]
    fn description_bullets_are_normalized() {
        let lines = description_lines("- first\n\n* second\n• third\nplain text\n-nospace");
        assert_eq!(
            lines,
            vec!["• first", "• second", "• third", "plain text", "-nospace"]
        );
    }

    #[test]
    fn header_skips_blank_contact_fields() {
        let document = Document::from_sections([Section::with_id(
            "h",
            "Personal Details",
            SectionContent::Header(HeaderContent {
                full_name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                location: "London".to_string(),
                ..HeaderContent::default()
            }),
        )]);
        let preview = render_preview(&document);
        assert_eq!(
            preview.blocks[0].nodes,
            vec![
                PreviewNode::Name("Ada".to_string()),
                PreviewNode::ContactLine(vec![
                    "ada@example.com".to_string(),
                    "London".to_string()
                ]),
            ]
        );
    }

    #[test]
    fn empty_list_section_still_renders_heading() {
        let document = Document::from_sections([Section::new(SectionKind::Projects)]);
        let preview = render_preview(&document);
        assert_eq!(
            preview.blocks[0].nodes,
            vec![PreviewNode::SectionHeading("Projects".to_string())]
        );
        assert!(!preview.is_empty());
    }
}
