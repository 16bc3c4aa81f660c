use crate::error::Error;
use crate::measure::TextMeasurer;
use crate::model::TextRun;

/// A measured word in one weight, positioned relative to the line start.
pub(super) struct Chunk {
    pub(super) text: String,
    pub(super) bold: bool,
    pub(super) x_offset: f32,
}

pub(super) struct Line {
    pub(super) chunks: Vec<Chunk>,
}

/// True when a paragraph has no visible text.
pub(super) fn is_text_empty(runs: &[TextRun]) -> bool {
    runs.iter().all(|r| r.text.trim().is_empty())
}

fn finish_line(chunks: &mut Vec<Chunk>) -> Line {
    Line {
        chunks: std::mem::take(chunks),
    }
}

/// Wrap runs into lines at word granularity.
///
/// Handles cross-run contiguous text correctly: no space is inserted
/// between runs unless the preceding text ended with whitespace or the new
/// run starts with whitespace (e.g., "bold" + ", " → "bold," not "bold ,").
pub(super) fn build_lines(
    runs: &[TextRun],
    measurer: &dyn TextMeasurer,
    size: f32,
    max_width: f32,
) -> Result<Vec<Line>, Error> {
    let mut lines: Vec<Line> = Vec::new();
    let mut chunks: Vec<Chunk> = Vec::new();
    let mut current_x: f32 = 0.0;
    let mut prev_ended_with_ws = false;
    let mut prev_space_w: f32 = 0.0;

    for run in runs {
        let space_w = measurer.line_width(" ", size, run.bold)?;
        let starts_with_ws = run.text.starts_with(char::is_whitespace);

        for (i, word) in run.text.split_whitespace().enumerate() {
            let ww = measurer.line_width(word, size, run.bold)?;

            let need_space =
                !chunks.is_empty() && (i > 0 || starts_with_ws || prev_ended_with_ws);

            // The run that owns the whitespace supplies the space width:
            // within a run (i > 0) or leading ws → this run's space_w;
            // trailing ws from the previous run → the previous run's.
            let effective_space_w = if i > 0 || starts_with_ws {
                space_w
            } else {
                prev_space_w
            };

            let proposed_x = if need_space {
                current_x + effective_space_w
            } else {
                current_x
            };

            if !chunks.is_empty() && proposed_x + ww > max_width {
                lines.push(finish_line(&mut chunks));
                current_x = 0.0;
            } else {
                current_x = proposed_x;
            }

            chunks.push(Chunk {
                text: word.to_string(),
                bold: run.bold,
                x_offset: current_x,
            });
            current_x += ww;
        }

        prev_ended_with_ws = run.text.ends_with(char::is_whitespace);
        prev_space_w = space_w;
    }

    if !chunks.is_empty() {
        lines.push(finish_line(&mut chunks));
    }
    Ok(lines)
}
