//! Paginated document composition.
//!
//! Flows an ordered sequence of blocks — headings, rich-text paragraphs,
//! tables — onto fixed-size pages with a reserved header/footer band on
//! every page, then stamps the bands and the "Page X of N" caption once
//! the total page count is known.
//!
//! The engine draws through the abstract [`DrawSurface`] and measures
//! through the abstract [`TextMeasurer`]; concrete output formats and
//! fonts live with the caller. [`RecordingSurface`] and [`FontMetrics`]
//! are bundled implementations of the two.
//!
//! ```
//! use pageflow::{Document, FontMetrics, PageGeometry, RecordingSurface, TextRun, render};
//!
//! let doc = Document::builder()
//!     .header_text("Service agreement 2026-014")
//!     .heading(1, "Service agreement")
//!     .paragraph([
//!         TextRun::plain("Between "),
//!         TextRun::bold("Acme GmbH"),
//!         TextRun::plain(" and the client named below."),
//!     ])
//!     .table(vec![
//!         vec!["Milestone".into(), "Due".into(), "Amount".into()],
//!         vec!["Kickoff".into(), "2026-09-01".into(), "EUR 4,000".into()],
//!     ])
//!     .build();
//!
//! let measurer = FontMetrics::helvetica();
//! let mut surface = RecordingSurface::new();
//! let summary = render(&doc, &PageGeometry::a4(), &measurer, &mut surface).unwrap();
//! assert_eq!(summary.pages, surface.pages().len());
//! ```

mod compose;
mod error;
mod geometry;
mod measure;
mod model;
mod surface;

pub use error::Error;
pub use geometry::PageGeometry;
pub use measure::{FontMetrics, TextMeasurer};
pub use model::{
    Block, BlockKind, Document, DocumentBuilder, Heading, Paragraph, Table, TextRun,
};
pub use surface::{DrawOp, DrawSurface, RecordingSurface};

/// Outcome of a successful render: the surface is fully populated and
/// finalized across `pages` pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSummary {
    pub pages: usize,
}

/// Render `doc` onto `surface`: geometry precondition check, then layout,
/// then finalization. On error the render is aborted as a whole; the
/// surface contents are unspecified and must be discarded by the caller.
pub fn render(
    doc: &Document,
    geometry: &PageGeometry,
    measurer: &dyn TextMeasurer,
    surface: &mut dyn DrawSurface,
) -> Result<RenderSummary, Error> {
    let t0 = std::time::Instant::now();

    geometry.validate()?;

    let laid = compose::lay_out(doc, geometry, measurer, surface)?;
    let t_layout = t0.elapsed();

    let pages = compose::finalize(laid, doc, geometry, measurer, surface)?;
    let t_total = t0.elapsed();

    log::info!(
        "Render: layout={:.1}ms, finalize={:.1}ms, total={:.1}ms ({} blocks → {} pages)",
        t_layout.as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        doc.blocks.len(),
        pages,
    );

    Ok(RenderSummary { pages })
}
