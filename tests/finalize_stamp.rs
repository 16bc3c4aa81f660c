//! Finalization: every laid-out page gets its band stamps exactly once,
//! and the page caption exists only when there is more than one page.

mod common;

use common::{MonoMeasurer, geom, init_logs, rects, texts};
use pageflow::{Block, Document, RecordingSurface, render};

fn three_page_doc() -> Document {
    Document::builder()
        .header_text("Agreement 2026-014")
        .footer_text("Acme GmbH")
        .closing_caption("End of agreement")
        .text("first")
        .block(Block::text("second").with_page_break())
        .block(Block::text("third").with_page_break())
        .build()
}

#[test]
fn every_page_is_stamped_exactly_once() {
    init_logs();
    let g = geom(150.0, 240.0);
    let measurer = MonoMeasurer::new();
    let mut surface = RecordingSurface::new();
    let summary = render(&three_page_doc(), &g, &measurer, &mut surface).unwrap();
    assert_eq!(summary.pages, 3);

    let band_top = g.page_height - g.footer_band;
    for page in 1..=3 {
        let ops = surface.page(page);

        // One rule per band, both outside the content region.
        let rules: Vec<_> = rects(ops)
            .into_iter()
            .filter(|&(_, _, _, _, filled)| filled)
            .collect();
        assert_eq!(rules.len(), 2);
        assert!(rules.iter().any(|&(_, y, _, _, _)| y < g.content_top()));
        assert!(rules.iter().any(|&(_, y, _, _, _)| y > g.content_bottom()));

        let texts_on_page = texts(ops);
        let header: Vec<_> = texts_on_page
            .iter()
            .filter(|(_, _, t)| t == "Agreement 2026-014")
            .collect();
        assert_eq!(header.len(), 1);
        assert!(header[0].1 <= g.header_band, "header text stays in its band");

        let footer: Vec<_> = texts_on_page
            .iter()
            .filter(|(_, _, t)| t == "Acme GmbH")
            .collect();
        assert_eq!(footer.len(), 1);
        assert!(footer[0].1 >= band_top, "footer text stays in its band");

        let captions: Vec<_> = texts_on_page
            .iter()
            .filter(|(_, _, t)| t.starts_with("Page "))
            .collect();
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].2, format!("Page {page} of 3"));
        assert!(captions[0].1 >= band_top);
    }
}

#[test]
fn page_caption_is_centered() {
    init_logs();
    let g = geom(150.0, 240.0);
    let measurer = MonoMeasurer::new();
    let mut surface = RecordingSurface::new();
    render(&three_page_doc(), &g, &measurer, &mut surface).unwrap();

    let caption = "Page 1 of 3";
    let (x, _, _) = texts(surface.page(1))
        .into_iter()
        .find(|(_, _, t)| t == caption)
        .unwrap();
    let w = caption.chars().count() as f32 * measurer.char_w;
    let expected = g.margin_left + (g.text_width() - w) / 2.0;
    assert!((x - expected).abs() < 0.01);
}

#[test]
fn closing_caption_lands_on_the_last_page_only() {
    init_logs();
    let g = geom(150.0, 240.0);
    let measurer = MonoMeasurer::new();
    let mut surface = RecordingSurface::new();
    render(&three_page_doc(), &g, &measurer, &mut surface).unwrap();

    for page in 1..=3 {
        let found = texts(surface.page(page))
            .iter()
            .any(|(_, _, t)| t == "End of agreement");
        assert_eq!(found, page == 3, "closing caption on page {page}");
    }
}

/// A single-page document gets no "Page X of N" caption.
#[test]
fn single_page_documents_have_no_caption() {
    init_logs();
    let doc = Document::builder()
        .header_text("Agreement 2026-014")
        .closing_caption("End of agreement")
        .text("only page")
        .build();

    let measurer = MonoMeasurer::new();
    let mut surface = RecordingSurface::new();
    let summary = render(&doc, &geom(150.0, 240.0), &measurer, &mut surface).unwrap();
    assert_eq!(summary.pages, 1);

    let texts_on_page = texts(surface.page(1));
    assert!(!texts_on_page.iter().any(|(_, _, t)| t.starts_with("Page ")));
    assert!(texts_on_page.iter().any(|(_, _, t)| t == "End of agreement"));
}

/// An empty document still produces one stamped page.
#[test]
fn empty_documents_render_one_stamped_page() {
    init_logs();
    let measurer = MonoMeasurer::new();
    let mut surface = RecordingSurface::new();
    let summary = render(
        &Document::default(),
        &geom(150.0, 240.0),
        &measurer,
        &mut surface,
    )
    .unwrap();

    assert_eq!(summary.pages, 1);
    let rules: Vec<_> = rects(surface.page(1))
        .into_iter()
        .filter(|&(_, _, _, _, filled)| filled)
        .collect();
    assert_eq!(rules.len(), 2, "both band rules are stamped");
}
