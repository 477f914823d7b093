//! Static glyph-width tables for the two preview faces.
//!
//! Widths are the standard Helvetica / Helvetica-Bold AFM advances in
//! 1/1000 em. Tables cover ASCII 0x20..=0x7E; index = (char as usize) - 32.

const FIRST_CHAR: usize = 32;
const LAST_CHAR: usize = 126;
const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Font face used by a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    /// PostScript name of the standard Type1 font.
    pub fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
        }
    }

    /// Advance width of `ch` in 1/1000 em.
    pub fn char_width(self, ch: char) -> u16 {
        let code = ch as usize;
        if (FIRST_CHAR..=LAST_CHAR).contains(&code) {
            let table = match self {
                Self::Regular => &HELVETICA,
                Self::Bold => &HELVETICA_BOLD,
            };
            return table[code - FIRST_CHAR];
        }
        match ch {
            '•' => 350,
            '–' => 556,
            '—' => 1000,
            '\u{a0}' => 278,
            _ => FALLBACK_WIDTH,
        }
    }

    /// Width of `text` in pixels at `size` pixels per em.
    pub fn measure(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|ch| u32::from(self.char_width(ch))).sum();
        units as f32 * size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::FontFace;

    #[test]
    fn ascii_widths_come_from_tables() {
        assert_eq!(FontFace::Regular.char_width(' '), 278);
        assert_eq!(FontFace::Regular.char_width('W'), 944);
        assert_eq!(FontFace::Bold.char_width('i'), 278);
        assert_eq!(FontFace::Regular.char_width('~'), 584);
    }

    #[test]
    fn bold_is_never_narrower_for_letters() {
        for ch in ('a'..='z').chain('A'..='Z') {
            assert!(FontFace::Bold.char_width(ch) >= FontFace::Regular.char_width(ch));
        }
    }

    #[test]
    fn measure_scales_with_size() {
        let at_ten = FontFace::Regular.measure("Resume", 10.0);
        let at_twenty = FontFace::Regular.measure("Resume", 20.0);
        assert!((at_twenty - 2.0 * at_ten).abs() < 1e-3);
        assert_eq!(FontFace::Regular.measure("", 12.0), 0.0);
    }
}
