//! # Pipeline Tests
//!
//! End-to-end checks through the public API: bytes in, canvas out.

use pretty_assertions::assert_eq;
use rasterpos::interpret::{self, FormattedLine};
use rasterpos::job::{self, PrintRequest};
use rasterpos::pipeline::{self, RenderPath, render_escpos};
use rasterpos::printer::{PaperConfig, RenderConfig};
use rasterpos::protocol::{commands, text};
use rasterpos::receipt::{self, EscPosBuilder};
use rasterpos::reconstruct::MERGED_HEADER;
use rasterpos::render::{FontFace, Rasterizer};
use rasterpos::transport::{FailureCode, MemorySink};
use rasterpos::Alignment;

const ESC: u8 = commands::ESC;

fn config() -> RenderConfig {
    RenderConfig::default()
}

// ============================================================================
// DEGENERATE INPUT
// ============================================================================

#[test]
fn test_empty_input_renders_placeholder() {
    let lines = pipeline::lines_for(&[], &config());
    assert_eq!(
        lines[0],
        FormattedLine::new("ESC/POS Data (0 bytes)", Alignment::Center, false, false)
    );

    let outcome = render_escpos(&[], 384, &config()).unwrap();
    assert_eq!(outcome.path, RenderPath::Primary);
    assert_eq!(outcome.canvas.width(), 384);
    assert!(outcome.canvas.height() > 0);
    assert!(!outcome.canvas.is_blank());
}

#[test]
fn test_command_only_input() {
    let bytes = [ESC, 0x40, ESC, 0x61, 0x01, ESC, 0x45, 0x01];
    assert!(interpret::parse(&bytes).is_empty());

    let lines = pipeline::lines_for(&bytes, &config());
    assert_eq!(lines[0].text, "ESC/POS Data (8 bytes)");

    let outcome = render_escpos(&bytes, 384, &config()).unwrap();
    assert_eq!(outcome.path, RenderPath::Primary);
    assert!(outcome.canvas.height() > 0);
}

#[test]
fn test_form_feeds_render_blank_paper() {
    let bytes = [commands::FF, commands::FF];
    let outcome = render_escpos(&bytes, 384, &config()).unwrap();
    assert_eq!(outcome.path, RenderPath::Primary);
    assert!(outcome.canvas.height() > 0);
    assert!(outcome.canvas.is_blank());
}

#[test]
fn test_long_receipt_stays_on_primary_path() {
    let bytes: Vec<u8> = (0..1200)
        .flat_map(|i| format!("Line number {}\n", i).into_bytes())
        .collect();
    let outcome = render_escpos(&bytes, 384, &config()).unwrap();
    assert_eq!(outcome.path, RenderPath::Primary);
    // 1200 text rows of 28.8 dots plus trailing blanks and padding
    assert!(outcome.canvas.height() > 34_000, "{}", outcome.canvas.height());
}

#[test]
fn test_truncated_stream_still_renders() {
    let bytes = [b'H', b'i', commands::LF, ESC, 0x61];
    let outcome = render_escpos(&bytes, 384, &config()).unwrap();
    assert_eq!(outcome.path, RenderPath::Primary);
    assert!(!outcome.canvas.is_blank());
}

// ============================================================================
// FORMAT STATE
// ============================================================================

#[test]
fn test_init_resets_formatting() {
    let bytes = EscPosBuilder::new()
        .bold(true)
        .align(Alignment::Right)
        .raw(commands::init())
        .line("X")
        .build();
    assert_eq!(interpret::parse(&bytes), vec![FormattedLine::plain("X")]);
}

#[test]
fn test_alignment_mapping() {
    let mut bytes = Vec::new();
    for (param, label) in [(1u8, "A"), (b'1', "B"), (2, "C"), (5, "D")] {
        bytes.extend(text::align(param));
        bytes.extend(label.as_bytes());
        bytes.push(commands::LF);
    }

    let lines = interpret::parse(&bytes);
    let alignments: Vec<Alignment> = lines.iter().map(|l| l.alignment).collect();
    assert_eq!(
        alignments,
        vec![
            Alignment::Center,
            Alignment::Center,
            Alignment::Right,
            Alignment::Other(5)
        ]
    );

    // Unknown alignment draws at the left margin.
    let rows = Rasterizer::new(384, &config()).layout(&lines[3..]);
    assert_eq!(rows[0].runs[0].x, config().margin);

    let outcome = render_escpos(&bytes, 384, &config()).unwrap();
    assert_eq!(outcome.path, RenderPath::Primary);
}

// ============================================================================
// RECONSTRUCTION
// ============================================================================

#[test]
fn test_header_merge_from_bytes() {
    let bytes = EscPosBuilder::new()
        .line("Particular")
        .align(Alignment::Right)
        .line("Amount")
        .build();
    let lines = pipeline::lines_for(&bytes, &config());
    assert_eq!(lines[0].text, MERGED_HEADER);
    assert_eq!(lines[0].alignment, Alignment::Left);
    assert!(lines[1].is_blank());
}

#[test]
fn test_product_pairing_from_bytes() {
    let bytes = EscPosBuilder::new().item("Widget A", "12.50").build();
    let lines = pipeline::lines_for(&bytes, &config());

    let content: Vec<&FormattedLine> = lines.iter().filter(|l| !l.is_blank()).collect();
    assert_eq!(content.len(), 1);
    assert_eq!(content[0].alignment, Alignment::Split);
    assert_eq!(content[0].split_parts(), Some(("Widget A", "12.50")));
}

#[test]
fn test_zero_rows_filtered() {
    let bytes = EscPosBuilder::new()
        .line("Change: 5.00")
        .align(Alignment::Right)
        .line("0.00")
        .build();
    let lines = pipeline::lines_for(&bytes, &config());
    assert!(lines.iter().all(|l| l.text.trim() != "0.00"));
    assert_eq!(lines[0].text, "Change: 5.00");
}

#[test]
fn test_trailing_blank_lines() {
    let lines = pipeline::lines_for(b"Hello\n", &config());
    assert_eq!(lines.len(), 1 + config().trailing_blank_lines);
    assert!(lines[1..].iter().all(FormattedLine::is_blank));
}

// ============================================================================
// LAYOUT
// ============================================================================

#[test]
fn test_rule_fits_maximal_dashes() {
    let paper = PaperConfig::MM80.width_dots;
    let rasterizer = Rasterizer::new(paper, &config());
    let rows = rasterizer.layout(&[FormattedLine::plain("-".repeat(32))]);

    let dashes = &rows[0].runs[0].text;
    let face = FontFace::regular(config().base_font_height);
    let usable = paper - 2 * config().margin;
    assert!(face.measure(dashes) <= usable);
    assert!(face.measure(&format!("{}-", dashes)) > usable);
}

#[test]
fn test_long_lines_wrap_within_margins() {
    let bytes = receipt::wrapping();
    let lines = pipeline::lines_for(&bytes, &config());
    let rasterizer = Rasterizer::new(384, &config());
    let rows = rasterizer.layout(&lines);

    assert!(rows.len() > lines.len());
    for row in &rows {
        for run in &row.runs {
            assert!(run.x >= config().margin);
            assert!(run.x + row.face.measure(&run.text) <= 384 - config().margin);
        }
    }
}

#[test]
fn test_invoice_end_to_end() {
    let bytes = receipt::invoice();
    let lines = pipeline::lines_for(&bytes, &config());
    let rasterizer = Rasterizer::new(384, &config());
    let rows = rasterizer.layout(&lines);

    // Title: centered, bold, double size.
    let title = &rows[0];
    assert_eq!(title.face, FontFace::new(36, true));
    let width = title.face.measure("CORNER CAFE");
    assert_eq!(title.runs[0].x, (384 - width) / 2);

    // Item rows: description at the margin, amount flush right.
    let split = rows
        .iter()
        .find(|row| row.runs.len() == 2 && row.runs[0].text == "Flat White")
        .unwrap();
    let amount = &split.runs[1];
    assert_eq!(split.runs[0].x, config().margin);
    assert_eq!(amount.x + split.face.measure(&amount.text), 384 - config().margin);

    let outcome = render_escpos(&bytes, 384, &config()).unwrap();
    assert_eq!(outcome.path, RenderPath::Primary);
    assert_eq!(outcome.canvas.height(), rasterizer.height_for(&rows));

    // Title ink sits in the middle of the paper.
    let top = config().top_padding;
    let (lo, hi) = outcome.canvas.ink_span(top, top + 36).unwrap();
    assert!(lo >= (384 - width) / 2);
    assert!(hi < (384 + width) / 2 + 1);
}

#[test]
fn test_wider_paper_same_lines() {
    let bytes = receipt::invoice();
    let narrow = render_escpos(&bytes, PaperConfig::MM58.width_dots, &config()).unwrap();
    let wide = render_escpos(&bytes, PaperConfig::MM80.width_dots, &config()).unwrap();
    assert_eq!(wide.canvas.width(), 576);
    assert!(wide.canvas.height() <= narrow.canvas.height());
}

// ============================================================================
// FALLBACK AND OUTPUT
// ============================================================================

#[test]
fn test_fallback_path_reported() {
    let limited = RenderConfig {
        max_canvas_dots: 384 * 64,
        ..Default::default()
    };
    let outcome = render_escpos(&receipt::invoice(), 384, &limited).unwrap();
    assert_eq!(outcome.path, RenderPath::Fallback);
    assert!(!outcome.canvas.is_blank());
}

#[test]
fn test_png_round_trip_dimensions() {
    let outcome = render_escpos(&receipt::notice(), 384, &config()).unwrap();
    let png = outcome.canvas.to_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_luma8();
    assert_eq!(
        decoded.dimensions(),
        (384, outcome.canvas.height() as u32)
    );
}

#[test]
fn test_raster_rows_are_byte_aligned() {
    let outcome = render_escpos(&receipt::notice(), 380, &config()).unwrap();
    let raster = outcome.canvas.to_raster();
    assert_eq!(raster.width_bytes(), 48);
    assert_eq!(raster.data.len(), 48 * raster.height);
}

// ============================================================================
// JOBS
// ============================================================================

#[test]
fn test_json_raw_bytes_job() {
    let bytes: Vec<String> = receipt::notice().iter().map(|b| b.to_string()).collect();
    let json = format!(
        r#"{{"method":"printRawBytes","bytes":[{}],"paperWidth":576}}"#,
        bytes.join(",")
    );
    let request = PrintRequest::from_json(&json).unwrap();

    let mut sink = MemorySink::new();
    let outcome = job::run(&request, &mut sink);
    assert!(outcome.is_success(), "{}", outcome);
    assert_eq!(sink.images[0].width(), 576);
}

#[test]
fn test_json_job_validation_failure() {
    let request =
        PrintRequest::from_json(r#"{"method":"printRawBytes","bytes":[27,64],"paperWidth":2000}"#)
            .unwrap();
    let mut sink = MemorySink::new();
    let outcome = job::run(&request, &mut sink);
    assert_eq!(outcome.code(), Some(FailureCode::InvalidInput));
    assert_eq!(outcome.message(), "Paper width must be between 1 and 1000 pixels");
    assert!(sink.images.is_empty());
}

#[test]
fn test_text_job() {
    let request = PrintRequest::from_json(r#"{"method":"printText","text":"Order ready"}"#).unwrap();
    let mut sink = MemorySink::new();
    assert!(job::run(&request, &mut sink).is_success());
    assert_eq!(sink.images[0].width(), 384);
}
