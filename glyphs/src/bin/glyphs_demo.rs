// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Builds a few documents in one workspace, reformats and renders them, and prints the
//! sharing reports. Run with `--log-level debug` to watch formats being interned.

use std::{path::PathBuf, sync::Arc};

use clap::{Parser, ValueEnum};
use miette::WrapErr;
use styled_glyphs::{AttributeKey, CommonResult, LayoutConfig, Position, RecordingSink,
                    TextStyle, TracingConfig, Workspace, ok,
                    try_initialize_logging_global};
use tracing_core::LevelFilter;

/// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
#[derive(Debug, Parser)]
#[command(bin_name = "glyphs_demo")]
#[command(about = "🔤 Share formatting between thousands of glyphs")]
#[command(version)]
#[command(next_line_help = true)]
pub struct CLIArg {
    #[arg(long, default_value_t = 10, help = "Number of repeated body lines.")]
    pub lines: usize,

    #[arg(long, default_value_t = 1.0, help = "Zoom level of the recording canvas.")]
    pub zoom: f64,

    #[arg(long, help = "JSON file with `advance_factor` and `line_gap`.")]
    pub layout_config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Off)]
    pub log_level: LogLevel,

    #[arg(long, help = "Log to this file instead of stderr.")]
    pub log_file: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(it: LogLevel) -> Self {
        match it {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    try_initialize_logging_global(TracingConfig::new_display_or_file(
        cli_arg.log_level.into(),
        cli_arg.log_file.clone(),
    ))
    .wrap_err("Could not set up logging")?;

    let layout_config = match &cli_arg.layout_config {
        Some(path) => LayoutConfig::try_from_json_file(path)?,
        None => LayoutConfig::default(),
    };

    let mut workspace = Workspace::new().with_layout_config(layout_config)?;
    build_sample_document(&mut workspace, cli_arg.lines)?;
    reformat_and_render(&mut workspace, cli_arg.zoom)?;
    build_second_document(&mut workspace)?;
    print_global_report(&workspace);
    verify_sharing(&mut workspace)?;

    ok!()
}

const SAMPLE: &str = "sample_document.txt";
const BODY_FIRST_LINE: usize = 7;

fn key(font: &str, size: u32, color: &str, style: TextStyle) -> AttributeKey {
    AttributeKey::new(font, size, color, style)
}

fn build_sample_document(workspace: &mut Workspace, lines: usize) -> CommonResult<()> {
    println!("=== Creating document ===");

    let doc = workspace.create_document(SAMPLE)?;

    doc.add_text(
        "SAMPLE DOCUMENT",
        Position::new(0, 0, 50.0, 50.0),
        key("Arial", 18, "blue", TextStyle::Bold),
    )?;
    doc.add_text(
        "\nThis document shows formats being shared between glyphs.",
        Position::new(1, 0, 50.0, 70.0),
        key("Arial", 12, "black", TextStyle::Normal),
    )?;
    doc.add_text(
        "Important words",
        Position::new(3, 0, 50.0, 110.0),
        key("Arial", 12, "red", TextStyle::Bold),
    )?;
    doc.add_text(
        " may look different, equal formats are still shared.",
        Position::new(3, 15, 158.0, 110.0),
        key("Arial", 12, "black", TextStyle::Normal),
    )?;
    doc.add_text(
        "Italic text shares its format just as well.",
        Position::new(5, 0, 50.0, 140.0),
        key("Arial", 12, "green", TextStyle::Italic),
    )?;

    println!("Adding {lines} repeated lines...");
    let base_y = 180.0;
    for i in 0..lines {
        let text = format!(
            "Line {}: every character on this line uses the same shared format.",
            i + 1
        );
        doc.add_text(
            &text,
            Position::new(BODY_FIRST_LINE + i, 0, 50.0, base_y + i as f64 * 20.0),
            key("Arial", 11, "black", TextStyle::Normal),
        )?;
    }

    doc.add_text(
        "SPECIAL TEXT WITH A UNIQUE FORMAT",
        Position::new(BODY_FIRST_LINE + lines + 1, 0, 50.0, base_y + 220.0),
        key("Times", 14, "purple", TextStyle::BoldItalic),
    )?;

    println!("\n=== Memory usage ===");
    println!("{}: {}", doc.name(), doc.memory_report());
    println!("Cache: {}", doc.cache().stats());
    println!("Estimated bytes: {}", doc.estimated_heap_bytes());

    ok!()
}

fn reformat_and_render(workspace: &mut Workspace, zoom: f64) -> CommonResult<()> {
    let doc = workspace
        .document_mut(SAMPLE)
        .ok_or_else(|| miette::miette!("Document {SAMPLE} is missing"))?;

    println!("\n=== Format changes ===");
    let changed = doc.reformat_range(
        (BODY_FIRST_LINE, 0),
        (BODY_FIRST_LINE + 3, 50),
        key("Arial", 12, "darkblue", TextStyle::Bold),
    )?;
    println!("Changed formatting of {changed} glyphs");
    println!("Unique formats now: {}", doc.memory_report().unique_formats);
    println!("Cache: {}", doc.cache().stats());

    println!("\n=== Rendering ===");
    let mut sink = RecordingSink::new(1200, 800).with_zoom_level(zoom);
    doc.render(&mut sink);
    println!("Rendered {} glyphs to canvas", sink.render_count());

    ok!()
}

fn build_second_document(workspace: &mut Workspace) -> CommonResult<()> {
    println!("\n=== Second document ===");
    let doc = workspace.create_document("second_document.txt")?;

    doc.add_text(
        "SECOND DOCUMENT",
        Position::new(0, 0, 50.0, 50.0),
        key("Arial", 18, "blue", TextStyle::Bold),
    )?;
    doc.add_text(
        "\nThis document reuses the formats of the first one.",
        Position::new(1, 0, 50.0, 70.0),
        key("Arial", 12, "black", TextStyle::Normal),
    )?;
    println!("Cache after second document: {}", doc.cache().stats());

    ok!()
}

fn print_global_report(workspace: &Workspace) {
    println!("\n=== Global report ===");
    let report = workspace.global_report();
    println!("{report}");

    let total = report.total_glyphs;
    if total > 0 {
        let unique = report.unique_formats;
        println!(
            "Without sharing: {total} format objects. With sharing: {unique} format objects + {total} glyphs ({:.1}% fewer format objects)",
            (total - unique.min(total)) as f64 / total as f64 * 100.0
        );
    }
}

fn verify_sharing(workspace: &mut Workspace) -> CommonResult<()> {
    println!("\n=== Glyph operations ===");
    if let Some(glyph) = workspace
        .document(SAMPLE)
        .and_then(|doc| doc.glyph_at((0, 0)))
    {
        println!("{glyph}");
    }

    println!("\n=== Sharing verification ===");
    let doc = workspace.create_document("third_document.txt")?;
    let normal = key("Arial", 12, "black", TextStyle::Normal);
    doc.add_glyph('A', Position::new(0, 0, 0.0, 0.0), normal.clone())?;
    doc.add_glyph('B', Position::new(0, 1, 10.0, 0.0), normal)?;

    if let (Some(a), Some(b)) = (doc.glyph_at((0, 0)), doc.glyph_at((0, 1))) {
        println!(
            "'A' and 'B' share the same format instance: {}",
            Arc::ptr_eq(a.attributes(), b.attributes())
        );
    }

    ok!()
}
