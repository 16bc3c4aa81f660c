//! The flow engine: consumes the content model block by block, asks the
//! measurer for sizes, decides page breaks, and emits draw commands while
//! maintaining the cursor invariant.

mod finalize;
mod line;
mod table;

pub(crate) use finalize::finalize;

use crate::error::Error;
use crate::geometry::PageGeometry;
use crate::measure::TextMeasurer;
use crate::model::{Block, BlockKind, Document, Heading, Paragraph, Table};
use crate::surface::DrawSurface;

use line::{Line, build_lines, is_text_empty};

/// Body text size in points.
const BODY_SIZE: f32 = 10.5;
/// Heading sizes by level; deeper levels clamp to the last entry.
const HEADING_SIZES: [f32; 3] = [16.0, 13.0, 11.0];
const HEADING_SPACE_BEFORE: f32 = 10.0;
const HEADING_SPACE_AFTER: f32 = 5.0;
const PARAGRAPH_SPACE_AFTER: f32 = 4.0;
/// Gap an empty paragraph contributes: visual separation without the cost
/// of a full line.
const EMPTY_PARAGRAPH_GAP: f32 = 5.0;
const TABLE_SPACE_AFTER: f32 = 6.0;
/// Baseline drop from the top of a line slot, as a fraction of font size.
const ASCENDER_RATIO: f32 = 0.75;

fn heading_size(level: u8) -> f32 {
    let idx = (level.clamp(1, HEADING_SIZES.len() as u8) - 1) as usize;
    HEADING_SIZES[idx]
}

/// Mutable placement state, owned exclusively by the flow engine for the
/// duration of one render. Between block placements `top <= y <= bottom`
/// holds; the one sanctioned exception is a table taller than a full
/// content region, whose rows are placed without per-row re-checks.
struct FlowCursor {
    /// Vertical offset on the current page, growing downward.
    y: f32,
    /// 1-based page index.
    page: usize,
    top: f32,
    bottom: f32,
}

impl FlowCursor {
    fn new(geom: &PageGeometry) -> Self {
        Self {
            y: geom.content_top(),
            page: 1,
            top: geom.content_top(),
            bottom: geom.content_bottom(),
        }
    }

    fn fits(&self, h: f32) -> bool {
        self.y + h <= self.bottom
    }

    fn at_page_top(&self) -> bool {
        (self.y - self.top).abs() < 0.5
    }

    fn advance(&mut self, h: f32) {
        self.y += h;
    }

    /// Advance by an inter-block gap, clamped to the bottom of the content
    /// region. Gaps never trigger a page break on their own, and the clamp
    /// never pulls the cursor back after a table overflow.
    fn advance_gap(&mut self, h: f32) {
        let next = self.y + h;
        self.y = if next > self.bottom {
            self.bottom.max(self.y)
        } else {
            next
        };
    }
}

/// Proof that layout ran to completion: the page count is fixed and the
/// document can move on to finalization. Not constructible by callers.
pub(crate) struct LaidOut {
    pub(crate) pages: usize,
}

/// First pass: flow every block onto the surface in reading order.
pub(crate) fn lay_out(
    doc: &Document,
    geom: &PageGeometry,
    measurer: &dyn TextMeasurer,
    surface: &mut dyn DrawSurface,
) -> Result<LaidOut, Error> {
    let mut composer = Composer {
        geom,
        measurer,
        surface,
        cursor: FlowCursor::new(geom),
        font: None,
    };
    // Page 1 exists before the first block, so a forced break on the very
    // first block cannot create a blank leading page.
    composer.surface.new_page();

    for block in &doc.blocks {
        composer.place_block(block)?;
    }

    debug_assert_eq!(composer.cursor.page, composer.surface.page_count());
    Ok(LaidOut {
        pages: composer.cursor.page,
    })
}

struct Composer<'a> {
    geom: &'a PageGeometry,
    measurer: &'a dyn TextMeasurer,
    surface: &'a mut dyn DrawSurface,
    cursor: FlowCursor,
    /// Last font issued to the surface, to skip redundant set_font calls.
    font: Option<(f32, bool)>,
}

impl<'a> Composer<'a> {
    fn break_page(&mut self) {
        self.surface.new_page();
        self.cursor.page += 1;
        self.cursor.y = self.cursor.top;
        log::debug!("page break -> page {}", self.cursor.page);
    }

    fn set_font(&mut self, bold: bool, size: f32) {
        if self.font != Some((size, bold)) {
            self.surface.set_font(bold, size);
            self.font = Some((size, bold));
        }
    }

    fn place_block(&mut self, block: &Block) -> Result<(), Error> {
        if block.force_page_break && !self.cursor.at_page_top() {
            self.break_page();
        }
        match &block.kind {
            BlockKind::Heading(h) => self.place_heading(h),
            BlockKind::Paragraph(p) => self.place_paragraph(p),
            BlockKind::Table(t) => self.place_table(t),
        }
    }

    /// Draw one line slot's chunks and advance the cursor, breaking the
    /// page first when the slot does not fit. Shared by headings and
    /// paragraphs; this per-line decision is what lets a paragraph
    /// straddle a page boundary.
    fn place_line(&mut self, line: &Line, size: f32, line_h: f32) {
        if !self.cursor.fits(line_h) && !self.cursor.at_page_top() {
            self.break_page();
        }
        let baseline = self.cursor.y + size * ASCENDER_RATIO;
        for chunk in &line.chunks {
            self.set_font(chunk.bold, size);
            self.surface
                .draw_text(self.geom.margin_left + chunk.x_offset, baseline, &chunk.text);
        }
        self.cursor.advance(line_h);
    }

    fn place_heading(&mut self, heading: &Heading) -> Result<(), Error> {
        let size = heading_size(heading.level);
        let line_h = self.measurer.line_height(size, true);
        let lines =
            self.measurer
                .measure_lines(&heading.text, size, true, self.geom.text_width())?;

        if !self.cursor.at_page_top() {
            self.cursor.advance_gap(HEADING_SPACE_BEFORE);
        }
        for text in &lines {
            let line = Line {
                chunks: vec![line::Chunk {
                    text: text.clone(),
                    bold: true,
                    x_offset: 0.0,
                }],
            };
            self.place_line(&line, size, line_h);
        }
        self.cursor.advance_gap(HEADING_SPACE_AFTER);
        Ok(())
    }

    fn place_paragraph(&mut self, para: &Paragraph) -> Result<(), Error> {
        if is_text_empty(&para.runs) {
            self.cursor.advance_gap(EMPTY_PARAGRAPH_GAP);
            return Ok(());
        }

        let line_h = self.measurer.line_height(BODY_SIZE, false);
        let lines = build_lines(&para.runs, self.measurer, BODY_SIZE, self.geom.text_width())?;
        for line in &lines {
            self.place_line(line, BODY_SIZE, line_h);
        }
        self.cursor.advance_gap(PARAGRAPH_SPACE_AFTER);
        Ok(())
    }

    fn place_table(&mut self, tbl: &Table) -> Result<(), Error> {
        let plan = table::plan_table(&tbl.rows, self.geom.text_width(), self.measurer)?;
        if plan.is_empty() {
            return Ok(());
        }

        // One overflow check for the whole table, before any row is drawn:
        // a table breaks *before* itself, never inside. A table taller
        // than a full content region is still placed and overflows.
        if !self.cursor.fits(plan.total_height) && !self.cursor.at_page_top() {
            self.break_page();
        }

        table::draw_table(&plan, self.geom.margin_left, self.cursor.y, self.surface);
        self.font = None; // draw_table issues its own fonts

        for row in &plan.rows {
            self.cursor.advance(row.height);
        }
        self.cursor.advance_gap(TABLE_SPACE_AFTER);
        Ok(())
    }
}
