//! Single-page PDF export via `pdf-writer`.
//!
//! The page is sized to the layout in pixels (one PDF user unit per layout
//! pixel) and uses the standard Helvetica faces, so no font is embedded.

use crate::export::{
    ExportAdapter, ExportArtifact, ExportError, ExportResult, DEFAULT_EXPORT_FILE_NAME,
};
use crate::preview::layout::PreviewLayout;
use crate::preview::metrics::FontFace;
use log::{error, info};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
use std::fs;
use std::path::{Path, PathBuf};

const CATALOG_ID: Ref = Ref::new(1);
const PAGE_TREE_ID: Ref = Ref::new(2);
const PAGE_ID: Ref = Ref::new(3);
const REGULAR_FONT_ID: Ref = Ref::new(4);
const BOLD_FONT_ID: Ref = Ref::new(5);
const CONTENT_ID: Ref = Ref::new(6);

const REGULAR_FONT_NAME: Name<'static> = Name(b"F1");
const BOLD_FONT_NAME: Name<'static> = Name(b"F2");
const RULE_GRAY: f32 = 0.8;

/// Writes `resume.pdf` into a target directory.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    dir: PathBuf,
}

impl PdfExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the artifact is written to.
    pub fn target_path(&self) -> PathBuf {
        self.dir.join(DEFAULT_EXPORT_FILE_NAME)
    }
}

impl ExportAdapter for PdfExporter {
    fn export(&mut self, layout: &PreviewLayout) -> ExportResult<ExportArtifact> {
        if layout.is_empty() {
            return Err(ExportError::EmptyPreview);
        }
        let bytes = render_pdf(layout);
        let path = self.target_path();
        if let Err(err) = fs::create_dir_all(&self.dir).and_then(|_| fs::write(&path, &bytes)) {
            error!("event=export_pdf module=export status=error error={err}");
            return Err(err.into());
        }
        info!(
            "event=export_pdf module=export status=ok bytes={} runs={}",
            bytes.len(),
            layout.runs.len()
        );
        Ok(ExportArtifact {
            path,
            width: layout.width,
            height: layout.height,
            byte_len: bytes.len(),
        })
    }
}

/// Serializes `layout` as a one-page PDF document.
pub fn render_pdf(layout: &PreviewLayout) -> Vec<u8> {
    let mut pdf = Pdf::new();
    pdf.catalog(CATALOG_ID).pages(PAGE_TREE_ID);
    pdf.pages(PAGE_TREE_ID).kids([PAGE_ID]).count(1);

    let mut page = pdf.page(PAGE_ID);
    page.media_box(Rect::new(0.0, 0.0, layout.width, layout.height));
    page.parent(PAGE_TREE_ID);
    page.contents(CONTENT_ID);
    page.resources()
        .fonts()
        .pair(REGULAR_FONT_NAME, REGULAR_FONT_ID)
        .pair(BOLD_FONT_NAME, BOLD_FONT_ID);
    page.finish();

    for (id, face) in [
        (REGULAR_FONT_ID, FontFace::Regular),
        (BOLD_FONT_ID, FontFace::Bold),
    ] {
        pdf.type1_font(id)
            .base_font(Name(face.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let mut content = Content::new();
    for rule in &layout.rules {
        let y = layout.height - rule.y;
        content.set_line_width(rule.thickness);
        content.set_stroke_gray(RULE_GRAY);
        content.move_to(rule.x1, y);
        content.line_to(rule.x2, y);
        content.stroke();
    }
    for run in &layout.runs {
        let font = match run.face {
            FontFace::Regular => REGULAR_FONT_NAME,
            FontFace::Bold => BOLD_FONT_NAME,
        };
        let encoded = encode_win_ansi(&run.text);
        content.begin_text();
        content.set_font(font, run.size);
        content.next_line(run.x, layout.height - run.y);
        content.show(Str(&encoded));
        content.end_text();
    }
    pdf.stream(CONTENT_ID, &content.finish());

    pdf.finish()
}

/// Encodes text for the WinAnsi-encoded standard fonts.
///
/// Characters the encoding lacks are replaced with `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' => ch as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '\u{a0}'..='\u{ff}' => ch as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{encode_win_ansi, render_pdf};
    use crate::preview::layout::{PreviewLayout, TextRun};
    use crate::preview::metrics::FontFace;

    #[test]
    fn win_ansi_maps_typographic_marks() {
        assert_eq!(encode_win_ansi("A•B"), vec![b'A', 0x95, b'B']);
        assert_eq!(encode_win_ansi("é"), vec![0xE9]);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
    }

    #[test]
    fn rendered_pdf_has_header_and_fonts() {
        let layout = PreviewLayout {
            width: 794.0,
            height: 1123.0,
            runs: vec![TextRun {
                x: 48.0,
                y: 70.0,
                size: 24.0,
                face: FontFace::Bold,
                text: "Jane Roe".to_string(),
            }],
            rules: Vec::new(),
        };
        let bytes = render_pdf(&layout);
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Helvetica-Bold"));
        assert!(text.contains("/WinAnsiEncoding"));
    }
}
