use crate::error::Error;
use crate::measure::TextMeasurer;
use crate::surface::DrawSurface;

use super::{ASCENDER_RATIO, BODY_SIZE};

/// Horizontal inset between a cell border and its text.
const CELL_PADDING: f32 = 4.0;
/// Vertical padding added to every row's content height.
const ROW_PADDING: f32 = 5.0;

pub(super) struct RowPlan {
    pub(super) height: f32,
    line_h: f32,
    /// Wrapped lines per cell, left to right.
    cells: Vec<Vec<String>>,
}

/// Concrete column width and per-row heights for one table, computed in
/// full before any row is drawn. The flow engine uses `total_height` for
/// its single pre-draw overflow check.
pub(super) struct TablePlan {
    pub(super) col_width: f32,
    pub(super) rows: Vec<RowPlan>,
    pub(super) total_height: f32,
}

impl TablePlan {
    pub(super) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Size a rectangular grid: equal column widths, row heights from the
/// tallest cell in each row. A row whose column count differs from the
/// header's is a caller defect and fails the render.
pub(super) fn plan_table(
    rows: &[Vec<String>],
    available_width: f32,
    measurer: &dyn TextMeasurer,
) -> Result<TablePlan, Error> {
    let columns = rows.first().map(|r| r.len()).unwrap_or(0);
    if columns == 0 {
        return Ok(TablePlan {
            col_width: available_width,
            rows: Vec::new(),
            total_height: 0.0,
        });
    }

    let col_width = available_width / columns as f32;
    let cell_text_width = (col_width - 2.0 * CELL_PADDING).max(1.0);

    let mut row_plans = Vec::with_capacity(rows.len());
    let mut total_height = 0.0f32;

    for (ri, row) in rows.iter().enumerate() {
        if row.len() != columns {
            return Err(Error::MalformedTable {
                row: ri,
                expected: columns,
                found: row.len(),
            });
        }

        let bold = ri == 0; // header row
        let line_h = measurer.line_height(BODY_SIZE, bold);

        let mut max_lines = 0usize;
        let mut cells = Vec::with_capacity(columns);
        for text in row {
            let lines = measurer.measure_lines(text, BODY_SIZE, bold, cell_text_width)?;
            max_lines = max_lines.max(lines.len());
            cells.push(lines);
        }

        // An all-empty row still renders a visible row.
        let height = (max_lines as f32 * line_h + ROW_PADDING).max(line_h + ROW_PADDING);
        total_height += height;
        row_plans.push(RowPlan {
            height,
            line_h,
            cells,
        });
    }

    Ok(TablePlan {
        col_width,
        rows: row_plans,
        total_height,
    })
}

/// Emit the table at (`left`, `top`): header-row shading, uniform grid
/// borders around every cell, then the wrapped cell text. Purely emits
/// draw commands; the flow engine advances the cursor by the row heights.
pub(super) fn draw_table(plan: &TablePlan, left: f32, top: f32, surface: &mut dyn DrawSurface) {
    let mut row_top = top;
    for (ri, row) in plan.rows.iter().enumerate() {
        let header = ri == 0;
        let row_width = plan.col_width * row.cells.len() as f32;

        if header {
            surface.draw_rect(left, row_top, row_width, row.height, true);
        }
        surface.set_font(header, BODY_SIZE);

        for (ci, cell) in row.cells.iter().enumerate() {
            let cell_x = left + ci as f32 * plan.col_width;
            surface.draw_rect(cell_x, row_top, plan.col_width, row.height, false);

            let mut baseline = row_top + ROW_PADDING / 2.0 + BODY_SIZE * ASCENDER_RATIO;
            for line in cell {
                surface.draw_text(cell_x + CELL_PADDING, baseline, line);
                baseline += row.line_h;
            }
        }

        log::debug!(
            "table row={} height={:.1} top={:.1} cols={}",
            ri,
            row.height,
            row_top,
            row.cells.len()
        );
        row_top += row.height;
    }
}
