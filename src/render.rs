//! Run output rendering — paginated PDF plus a plain-text mirror.
//!
//! Both artifacts are named from the run date (`Daily_Wisdom_<YYYYMMDD>`)
//! inside the output directory; a second run on the same date overwrites
//! them. PDF generation via `printpdf` builtin fonts with a simple
//! cursor layout; each item after the first starts a fresh page.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use printpdf::*;

use crate::pipeline::GeneratedItem;

/// US Letter, in millimetres.
const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;

/// Left margin and top-of-page text cursor.
const MARGIN_MM: f32 = 20.0;
const TOP_MM: f32 = PAGE_HEIGHT_MM - 20.0;

/// Characters per wrapped line at content size.
const WRAP_COLS: usize = 90;

/// Document title shared by both artifacts.
const DOC_TITLE: &str = "Daily Trading & Life Wisdom";

/// Errors from rendering or writing run outputs.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One presentation style: font size, RGB fill, and vertical advance.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size_pt: f32,
    pub color: (f32, f32, f32),
    /// Extra space below the block, in mm.
    pub space_after_mm: f32,
}

/// The three presentation styles, built once and passed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct StyleSheet {
    pub header: TextStyle,
    pub content: TextStyle,
    pub timestamp: TextStyle,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            header: TextStyle {
                size_pt: 14.0,
                color: (0.0, 0.0, 0.0),
                space_after_mm: 7.0,
            },
            content: TextStyle {
                size_pt: 12.0,
                color: (0.0, 0.0, 0.55),
                space_after_mm: 5.5,
            },
            timestamp: TextStyle {
                size_pt: 10.0,
                color: (0.5, 0.5, 0.5),
                space_after_mm: 11.0,
            },
        }
    }
}

/// Paths of the two artifacts written for one run.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    pub pdf: PathBuf,
    pub txt: PathBuf,
}

/// Deterministic artifact stem for a run date: `Daily_Wisdom_<YYYYMMDD>`.
pub fn artifact_stem(run_time: DateTime<Local>) -> String {
    format!("Daily_Wisdom_{}", run_time.format("%Y%m%d"))
}

/// Render the run PDF. Returns the serialized document bytes.
///
/// Page one carries the title, the generation timestamp, and the first
/// item; every following item starts a new page (no break after the
/// last).
pub fn render_pdf(
    items: &[GeneratedItem],
    run_time: DateTime<Local>,
    styles: &StyleSheet,
) -> Result<Vec<u8>, RenderError> {
    let title = format!("{DOC_TITLE} - {}", run_time.format("%B %d, %Y"));
    let (doc, page1, layer1) =
        PdfDocument::new(&title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(format!("font error: {e}")))?;

    let mut layer = doc.get_page(page1).get_layer(layer1);
    let mut y = Mm(TOP_MM);

    set_color(&layer, styles.header.color);
    layer.use_text(&title, styles.header.size_pt, Mm(MARGIN_MM), y, &bold);
    y -= Mm(styles.header.space_after_mm);

    set_color(&layer, styles.timestamp.color);
    layer.use_text(
        format!("Generated at: {}", run_time.format("%H:%M:%S")),
        styles.timestamp.size_pt,
        Mm(MARGIN_MM),
        y,
        &font,
    );
    y -= Mm(styles.timestamp.space_after_mm);

    for (i, item) in items.iter().enumerate() {
        // Page break between consecutive items, never after the last.
        if i > 0 {
            let (page, layer_idx) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(page).get_layer(layer_idx);
            y = Mm(TOP_MM);
        }

        set_color(&layer, styles.content.color);
        let block = format!("{}. {}", item.position, item.text);
        for source_line in block.split('\n') {
            for line in wrap_text(source_line, WRAP_COLS) {
                layer.use_text(&line, styles.content.size_pt, Mm(MARGIN_MM), y, &font);
                y -= Mm(styles.content.space_after_mm);
            }
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| RenderError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| RenderError::Pdf(format!("buffer error: {e}")))
}

/// Render the plain-text mirror: header block, separator, then one
/// blank-line-separated block per item.
pub fn render_text(items: &[GeneratedItem], run_time: DateTime<Local>) -> String {
    let mut out = String::new();
    out.push_str(DOC_TITLE);
    out.push('\n');
    out.push_str(&format!("Date: {}\n", run_time.format("%Y-%m-%d")));
    out.push_str(&format!("Time: {}\n", run_time.format("%H:%M:%S")));
    out.push_str(&"=".repeat(60));
    out.push_str("\n\n");

    for item in items {
        out.push_str(&format!("{}. {}\n\n", item.position, item.text));
    }
    out
}

/// Write both artifacts for a run, creating the output directory if
/// absent. Same-date re-runs overwrite silently.
pub fn write_run_outputs(
    items: &[GeneratedItem],
    run_time: DateTime<Local>,
    output_dir: &Path,
    styles: &StyleSheet,
) -> Result<RunArtifacts, RenderError> {
    std::fs::create_dir_all(output_dir)?;
    let stem = artifact_stem(run_time);

    let pdf_path = output_dir.join(format!("{stem}.pdf"));
    let pdf_bytes = render_pdf(items, run_time, styles)?;
    std::fs::write(&pdf_path, &pdf_bytes)?;
    tracing::info!(path = %pdf_path.display(), "PDF saved");

    let txt_path = output_dir.join(format!("{stem}.txt"));
    std::fs::write(&txt_path, render_text(items, run_time))?;
    tracing::info!(path = %txt_path.display(), "Text mirror saved");

    Ok(RunArtifacts {
        pdf: pdf_path,
        txt: txt_path,
    })
}

fn set_color(layer: &PdfLayerReference, (r, g, b): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
}

/// Simple word-wrap helper for PDF text lines.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ItemSource;
    use chrono::TimeZone;

    fn run_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 31, 17, 0, 3).unwrap()
    }

    fn items(texts: &[&str]) -> Vec<GeneratedItem> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| GeneratedItem {
                position: i + 1,
                text: t.to_string(),
                source: ItemSource::Generated,
                created_at: run_time(),
            })
            .collect()
    }

    #[test]
    fn artifact_stem_uses_run_date() {
        assert_eq!(artifact_stem(run_time()), "Daily_Wisdom_20260831");
    }

    #[test]
    fn text_mirror_exact_layout() {
        let out = render_text(&items(&["First post.", "Second\npost."]), run_time());
        let expected = format!(
            "Daily Trading & Life Wisdom\nDate: 2026-08-31\nTime: 17:00:03\n{}\n\n1. First post.\n\n2. Second\npost.\n\n",
            "=".repeat(60)
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn pdf_bytes_look_like_a_pdf() {
        let bytes = render_pdf(&items(&["One.", "Two."]), run_time(), &StyleSheet::default())
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn pdf_handles_multiline_and_long_items() {
        let long = vec!["wealth"; 200].join(" ");
        let text = format!("High income = wealth\n{long}");
        let bytes =
            render_pdf(&items(&[&text]), run_time(), &StyleSheet::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn write_run_outputs_creates_dir_and_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("Growth");

        let artifacts = write_run_outputs(
            &items(&["Post one.", "Post two."]),
            run_time(),
            &out_dir,
            &StyleSheet::default(),
        )
        .unwrap();

        assert!(artifacts.pdf.exists());
        assert!(artifacts.txt.exists());
        assert_eq!(artifacts.pdf.file_name().unwrap(), "Daily_Wisdom_20260831.pdf");
        assert_eq!(artifacts.txt.file_name().unwrap(), "Daily_Wisdom_20260831.txt");
    }

    #[test]
    fn same_date_rerun_overwrites_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let styles = StyleSheet::default();

        write_run_outputs(&items(&["First run."]), run_time(), dir.path(), &styles).unwrap();
        let artifacts =
            write_run_outputs(&items(&["Second run."]), run_time(), dir.path(), &styles)
                .unwrap();

        let txt = std::fs::read_to_string(&artifacts.txt).unwrap();
        assert!(txt.contains("Second run."));
        assert!(!txt.contains("First run."));
    }

    #[test]
    fn wrap_text_splits_on_word_boundaries() {
        let lines = wrap_text("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn wrap_text_empty_input_yields_one_empty_line() {
        assert_eq!(wrap_text("", 80), vec![String::new()]);
    }
}
