use pageflow::{DrawOp, Error, PageGeometry, TextMeasurer};

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fixed-pitch measurer: every char is `char_w` points wide and every line
/// is `line_h` points tall, regardless of font size or weight. Makes page
/// arithmetic in the scenarios exact.
pub struct MonoMeasurer {
    pub char_w: f32,
    pub line_h: f32,
}

impl MonoMeasurer {
    pub fn new() -> Self {
        Self {
            char_w: 6.0,
            line_h: 12.0,
        }
    }

    fn width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_w
    }
}

impl TextMeasurer for MonoMeasurer {
    fn measure_lines(
        &self,
        text: &str,
        _size: f32,
        _bold: bool,
        max_width: f32,
    ) -> Result<Vec<String>, Error> {
        let mut lines = Vec::new();
        let mut line = String::new();
        for word in text.split_whitespace() {
            let joined = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if !line.is_empty() && self.width(&joined) > max_width {
                lines.push(std::mem::take(&mut line));
                line = word.to_string();
            } else {
                line = joined;
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
        Ok(lines)
    }

    fn line_width(&self, text: &str, _size: f32, _bold: bool) -> Result<f32, Error> {
        Ok(self.width(text))
    }

    fn line_height(&self, _size: f32, _bold: bool) -> f32 {
        self.line_h
    }
}

/// Geometry whose content region is exactly `content_h` tall and whose
/// text width is exactly `text_w`, derived rather than assumed so the
/// tests stay correct if the band inset changes.
pub fn geom(content_h: f32, text_w: f32) -> PageGeometry {
    let probe = PageGeometry {
        page_width: text_w + 40.0,
        page_height: 1000.0,
        margin_left: 20.0,
        margin_right: 20.0,
        header_band: 40.0,
        footer_band: 36.0,
    };
    let overhead = probe.page_height - (probe.content_bottom() - probe.content_top());
    PageGeometry {
        page_height: content_h + overhead,
        ..probe
    }
}

/// (x, y, text) of every text op on a page, in draw order.
pub fn texts(ops: &[DrawOp]) -> Vec<(f32, f32, String)> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Text { x, y, text } => Some((*x, *y, text.clone())),
            _ => None,
        })
        .collect()
}

/// (x, y, w, h, filled) of every rect op on a page, in draw order.
pub fn rects(ops: &[DrawOp]) -> Vec<(f32, f32, f32, f32, bool)> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Rect { x, y, w, h, filled } => Some((*x, *y, *w, *h, *filled)),
            _ => None,
        })
        .collect()
}
