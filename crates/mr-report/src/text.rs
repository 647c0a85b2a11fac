//! Text measurement and greedy word wrapping.
//!
//! Widths come from the AFM advance tables of the standard Type1 Helvetica
//! faces, measured over the WinAnsi bytes that will actually be written to
//! the PDF. Widths are summed in integer font units and converted to
//! millimetres once, so measuring a joined line and summing its tokens give
//! the same number.

use serde::{Deserialize, Serialize};

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Advance used for bytes without a table entry.
const DEFAULT_ADVANCE: u16 = 556;

/// Helvetica advances for bytes 0x20..=0x7E.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Helvetica-Bold advances for bytes 0x20..=0x7E.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0..?
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // P.._
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // `..o
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // p..~
];

/// Standard Type1 faces used by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
}

impl FontFace {
    /// PostScript base font name.
    pub fn base_font(&self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used inside page content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontFace::Helvetica => "F1",
            FontFace::HelveticaBold => "F2",
        }
    }

    /// Every face, in resource order.
    pub fn all() -> [FontFace; 2] {
        [FontFace::Helvetica, FontFace::HelveticaBold]
    }

    /// Advance width of one WinAnsi byte in 1/1000 em.
    fn advance(&self, byte: u8) -> u16 {
        let table = match self {
            FontFace::Helvetica => &HELVETICA,
            FontFace::HelveticaBold => &HELVETICA_BOLD,
        };
        match byte {
            0x20..=0x7e => table[(byte - 0x20) as usize],
            0x95 => 350,
            0x97 => 1000,
            0x91 | 0x92 => match self {
                FontFace::Helvetica => 222,
                FontFace::HelveticaBold => 278,
            },
            0x93 | 0x94 => match self {
                FontFace::Helvetica => 333,
                FontFace::HelveticaBold => 500,
            },
            0xa0 => 278,
            _ => DEFAULT_ADVANCE,
        }
    }
}

/// Encode text as WinAnsi bytes. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' => ch as u8,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            _ => b'?',
        })
        .collect()
}

/// Measures and wraps text for one face at one size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    face: FontFace,
    size_pt: f32,
}

impl TextMetrics {
    /// Metrics for `face` at `size_pt` points.
    pub fn new(face: FontFace, size_pt: f32) -> Self {
        Self { face, size_pt }
    }

    pub fn face(&self) -> FontFace {
        self.face
    }

    pub fn size_pt(&self) -> f32 {
        self.size_pt
    }

    /// Width of `text` in font units (1/1000 em).
    pub fn units(&self, text: &str) -> u32 {
        encode_win_ansi(text)
            .into_iter()
            .map(|b| u32::from(self.face.advance(b)))
            .sum()
    }

    fn units_to_mm(&self, units: u32) -> f32 {
        units as f32 / 1000.0 * self.size_pt * MM_PER_PT
    }

    /// Rendered width of `text` in millimetres.
    pub fn width(&self, text: &str) -> f32 {
        self.units_to_mm(self.units(text))
    }

    /// Greedy word wrap to `max_width` millimetres.
    ///
    /// Tokens are whitespace-delimited and kept in order. A token wider than
    /// `max_width` gets a line of its own. Empty or blank input yields no
    /// lines.
    pub fn wrap(&self, text: &str, max_width: f32) -> Vec<String> {
        let space = self.units(" ");
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_units = 0u32;

        for token in text.split_whitespace() {
            let token_units = self.units(token);
            if current.is_empty() {
                current.push_str(token);
                current_units = token_units;
                continue;
            }
            let candidate = current_units + space + token_units;
            if self.units_to_mm(candidate) <= max_width {
                current.push(' ');
                current.push_str(token);
                current_units = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(token);
                current_units = token_units;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Wrap `text` to `max_width` millimetres in regular Helvetica at `size_pt`.
pub fn wrap(text: &str, max_width: f32, size_pt: f32) -> Vec<String> {
    TextMetrics::new(FontFace::Helvetica, size_pt).wrap(text, max_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Abc 1"), b"Abc 1".to_vec());
        assert_eq!(encode_win_ansi("\u{2022} x"), vec![0x95, b' ', b'x']);
        assert_eq!(encode_win_ansi("caf\u{e9}"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(encode_win_ansi("\u{1f9e0}"), vec![b'?']);
    }

    #[test]
    fn test_known_widths() {
        let m = TextMetrics::new(FontFace::Helvetica, 12.0);
        // "Hi" = 722 + 222 units
        assert_eq!(m.units("Hi"), 944);
        let expected = 944.0 / 1000.0 * 12.0 * MM_PER_PT;
        assert!((m.width("Hi") - expected).abs() < 1e-5);

        let bold = TextMetrics::new(FontFace::HelveticaBold, 12.0);
        assert!(bold.units("Diagnostic") > m.units("Diagnostic"));
    }

    #[test]
    fn test_wrap_basic() {
        let lines = wrap("alpha beta gamma delta", 20.0, 12.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), "alpha beta gamma delta");
    }

    #[test]
    fn test_wrap_empty_and_blank() {
        assert!(wrap("", 100.0, 12.0).is_empty());
        assert!(wrap("   \n\t ", 100.0, 12.0).is_empty());
    }

    #[test]
    fn test_wrap_normalizes_whitespace() {
        let lines = wrap("  one\n two\t\tthree  ", 500.0, 12.0);
        assert_eq!(lines, vec!["one two three".to_string()]);
    }

    #[test]
    fn test_overlong_token_on_own_line() {
        let long = "x".repeat(200);
        let text = format!("a {} b", long);
        let lines = wrap(&text, 50.0, 12.0);
        assert_eq!(lines, vec!["a".to_string(), long, "b".to_string()]);
    }

    #[test]
    fn test_wrap_is_stateless() {
        let text = "Immediate consultation with a neurosurgeon or oncologist is strongly recommended";
        assert_eq!(wrap(text, 60.0, 12.0), wrap(text, 60.0, 12.0));
    }
}
