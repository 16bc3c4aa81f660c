use thiserror::Error;

/// All errors the engine can produce. Every variant is terminal for the
/// render call: partially laid-out pages cannot be rolled back, so the
/// caller discards the surface and retries with corrected input.
#[derive(Error, Debug)]
pub enum Error {
    /// The text measurer could not size a string.
    #[error("text measurement failed: {0}")]
    Measurement(String),

    /// A table row does not match the header row's column count.
    #[error("malformed table: row {row} has {found} columns, expected {expected}")]
    MalformedTable {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The reserved header/footer bands leave no content region.
    #[error(
        "page geometry leaves no content region: header band {header} + footer band {footer} on a {page_height} tall page"
    )]
    Geometry {
        header: f32,
        footer: f32,
        page_height: f32,
    },
}
