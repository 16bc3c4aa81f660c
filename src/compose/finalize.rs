//! Second pass over the laid-out pages: stamps the header and footer
//! bands and the page-number caption. Runs only once the total page count
//! is fixed — "Page X of N" cannot exist before N does.

use crate::error::Error;
use crate::geometry::PageGeometry;
use crate::measure::TextMeasurer;
use crate::model::Document;
use crate::surface::DrawSurface;

use super::LaidOut;

const BAND_TEXT_SIZE: f32 = 8.0;
const RULE_THICKNESS: f32 = 0.6;
/// Distance from a band's inner edge to its rule.
const RULE_GAP: f32 = 3.0;
/// Baseline drop from the footer band's top edge (and, mirrored, rise
/// from the header band's bottom edge) for band text.
const BAND_BASELINE: f32 = 13.0;
/// Extra drop for the closing caption's own line in the footer band.
const CLOSING_DROP: f32 = 11.0;

/// Visit every page exactly once, in order, stamping strictly inside the
/// reserved bands. Consumes the layout proof; the document is terminal
/// after this.
pub(crate) fn finalize(
    laid: LaidOut,
    doc: &Document,
    geom: &PageGeometry,
    measurer: &dyn TextMeasurer,
    surface: &mut dyn DrawSurface,
) -> Result<usize, Error> {
    let total = laid.pages;
    debug_assert_eq!(total, surface.page_count());

    for page in 1..=total {
        surface.goto_page(page);
        stamp_page(doc, geom, measurer, surface, page, total)?;
    }
    log::debug!("finalized {total} pages");
    Ok(total)
}

fn stamp_page(
    doc: &Document,
    geom: &PageGeometry,
    measurer: &dyn TextMeasurer,
    surface: &mut dyn DrawSurface,
    page: usize,
    total: usize,
) -> Result<(), Error> {
    let left = geom.margin_left;
    let width = geom.text_width();

    surface.set_font(false, BAND_TEXT_SIZE);

    // Header band: optional text above a rule along the band's lower edge.
    if let Some(text) = &doc.header_text {
        surface.draw_text(left, geom.header_band - BAND_BASELINE, text);
    }
    surface.draw_rect(
        left,
        geom.header_band - RULE_GAP,
        width,
        RULE_THICKNESS,
        true,
    );

    // Footer band: rule along the band's upper edge, then text below it.
    let band_top = geom.page_height - geom.footer_band;
    surface.draw_rect(left, band_top + RULE_GAP, width, RULE_THICKNESS, true);

    if let Some(text) = &doc.footer_text {
        surface.draw_text(left, band_top + BAND_BASELINE, text);
    }

    if total > 1 {
        let caption = format!("Page {page} of {total}");
        let w = measurer.line_width(&caption, BAND_TEXT_SIZE, false)?;
        surface.draw_text(left + (width - w) / 2.0, band_top + BAND_BASELINE, &caption);
    }

    if page == total
        && let Some(text) = &doc.closing_caption
    {
        let w = measurer.line_width(text, BAND_TEXT_SIZE, false)?;
        surface.draw_text(
            left + (width - w) / 2.0,
            band_top + BAND_BASELINE + CLOSING_DROP,
            text,
        );
    }

    Ok(())
}
