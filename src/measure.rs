//! Text measurement. The engine depends on the [`TextMeasurer`] trait
//! only; [`FontMetrics`] is the bundled implementation backed by real font
//! metrics (or an approximate built-in table when no font is available).

use crate::error::Error;

/// Measures text for the flow engine.
///
/// Implementations must be deterministic: the same text, size, weight, and
/// width always produce the same result. The engine treats any error as
/// fatal for the whole render.
pub trait TextMeasurer {
    /// Wrap `text` to `max_width` points, returning the wrapped lines.
    /// Whitespace-only text yields no lines.
    fn measure_lines(
        &self,
        text: &str,
        size: f32,
        bold: bool,
        max_width: f32,
    ) -> Result<Vec<String>, Error>;

    /// Width of `text` laid out on a single line, in points.
    fn line_width(&self, text: &str, size: f32, bold: bool) -> Result<f32, Error>;

    /// Vertical extent of one line at `size`, in points.
    fn line_height(&self, size: f32, bold: bool) -> f32;
}

/// Advance widths at 1000 units/em for ASCII 32..=126 plus line metrics
/// for one face.
struct FaceTable {
    widths_1000: Vec<f32>,
    default_width: f32,
    line_h_ratio: f32,
}

impl FaceTable {
    fn char_width_1000(&self, ch: char) -> f32 {
        let cp = ch as u32;
        if (32..=126).contains(&cp) {
            self.widths_1000[(cp - 32) as usize]
        } else {
            self.default_width
        }
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_width_1000(ch) * size / 1000.0)
            .sum()
    }
}

/// Approximate Helvetica widths at 1000 units/em for ASCII 32..=126.
fn helvetica_widths() -> Vec<f32> {
    (32u8..=126u8)
        .map(|b| match b {
            32 => 278.0,                          // space
            33..=47 => 333.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 333.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => 833.0,                          // M (wide)
            65..=90 => 667.0,                     // uppercase A-Z (average)
            91..=96 => 333.0,                     // brackets etc.
            102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
            109 | 119 => 833.0,                   // m w (wide)
            97..=122 => 556.0,                    // lowercase a-z (average)
            _ => 556.0,
        })
        .collect()
}

fn table_from_face(data: &[u8], what: &str) -> Result<FaceTable, Error> {
    let face = ttf_parser::Face::parse(data, 0)
        .map_err(|e| Error::Measurement(format!("cannot parse {what} font face: {e}")))?;
    let units = face.units_per_em() as f32;
    if units <= 0.0 {
        return Err(Error::Measurement(format!(
            "{what} font face reports zero units per em"
        )));
    }

    let widths_1000: Vec<f32> = (32u8..=126u8)
        .map(|b| {
            face.glyph_index(b as char)
                .and_then(|gid| face.glyph_hor_advance(gid))
                .map(|adv| adv as f32 / units * 1000.0)
                .unwrap_or(500.0)
        })
        .collect();

    let line_h_ratio =
        (face.ascender() as f32 - face.descender() as f32 + face.line_gap() as f32) / units;

    Ok(FaceTable {
        widths_1000,
        default_width: 500.0,
        line_h_ratio,
    })
}

/// Deterministic measurer built from per-char advance tables, one table
/// per weight. Wrapping is greedy at word granularity; words wider than
/// the available width occupy a line of their own rather than being split.
pub struct FontMetrics {
    regular: FaceTable,
    bold: FaceTable,
}

impl FontMetrics {
    /// Build metrics from raw TTF/OTF data for the regular and bold faces.
    pub fn from_font_bytes(regular: &[u8], bold: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            regular: table_from_face(regular, "regular")?,
            bold: table_from_face(bold, "bold")?,
        })
    }

    /// Approximate Helvetica metrics; no font files required. Bold shares
    /// the regular advances, which is close enough for layout decisions.
    pub fn helvetica() -> Self {
        Self {
            regular: FaceTable {
                widths_1000: helvetica_widths(),
                default_width: 556.0,
                line_h_ratio: 1.2,
            },
            bold: FaceTable {
                widths_1000: helvetica_widths(),
                default_width: 556.0,
                line_h_ratio: 1.2,
            },
        }
    }

    fn table(&self, bold: bool) -> &FaceTable {
        if bold { &self.bold } else { &self.regular }
    }
}

impl TextMeasurer for FontMetrics {
    fn measure_lines(
        &self,
        text: &str,
        size: f32,
        bold: bool,
        max_width: f32,
    ) -> Result<Vec<String>, Error> {
        let table = self.table(bold);
        let space_w = table.char_width_1000(' ') * size / 1000.0;

        let mut lines: Vec<String> = Vec::new();
        let mut line = String::new();
        let mut line_w: f32 = 0.0;
        for word in text.split_whitespace() {
            let ww = table.text_width(word, size);
            if !line.is_empty() && line_w + space_w + ww > max_width {
                lines.push(std::mem::take(&mut line));
                line_w = 0.0;
            }
            if !line.is_empty() {
                line.push(' ');
                line_w += space_w;
            }
            line.push_str(word);
            line_w += ww;
        }
        if !line.is_empty() {
            lines.push(line);
        }
        Ok(lines)
    }

    fn line_width(&self, text: &str, size: f32, bold: bool) -> Result<f32, Error> {
        Ok(self.table(bold).text_width(text, size))
    }

    fn line_height(&self, size: f32, bold: bool) -> f32 {
        size * self.table(bold).line_h_ratio
    }
}
