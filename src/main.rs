//! # Rasterpos CLI
//!
//! Command-line interface for rendering ESC/POS data to bitmaps.
//!
//! ## Usage
//!
//! ```bash
//! # Render a captured ESC/POS stream to PNG
//! rasterpos render capture.bin --png receipt.png
//!
//! # 80mm paper, packed 1-bit raster output
//! rasterpos render capture.bin --paper 80mm --raw receipt.raw
//!
//! # Render plain text
//! rasterpos text "Hello\nWorld" --size 32
//!
//! # Run a JSON print job
//! rasterpos job request.json --png out.png
//!
//! # List and render the built-in sample receipts
//! rasterpos demo --list
//! rasterpos demo invoice --png invoice.png
//!
//! # Show what the interpreter makes of a stream
//! rasterpos dump capture.bin
//! ```

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use rasterpos::{
    RasterError,
    interpret, job,
    pipeline::{self, RenderPath},
    printer::{PaperConfig, RenderConfig},
    receipt,
    reconstruct,
    render::{Canvas, text::render_text_bitmap},
    transport::PngFileSink,
};

/// Rasterpos - ESC/POS to bitmap renderer
#[derive(Parser, Debug)]
#[command(name = "rasterpos")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every command and layout decision
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render an ESC/POS byte stream
    Render {
        /// Input file ("-" for stdin)
        input: PathBuf,

        /// Paper: 58mm, 80mm, or a width in dots
        #[arg(long, default_value = "58mm")]
        paper: String,

        /// Write a PNG image
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        /// Write packed 1-bit raster rows
        #[arg(long, value_name = "FILE")]
        raw: Option<PathBuf>,
    },

    /// Render plain text
    Text {
        /// Text to render; "\n" starts a new paragraph
        text: String,

        /// Text size in dots
        #[arg(long, default_value = "24")]
        size: usize,

        /// Paper: 58mm, 80mm, or a width in dots
        #[arg(long, default_value = "58mm")]
        paper: String,

        /// Write a PNG image
        #[arg(long, value_name = "FILE", default_value = "text.png")]
        png: PathBuf,
    },

    /// Run a JSON print request
    Job {
        /// Request file ("-" for stdin)
        request: PathBuf,

        /// Where the bitmap goes
        #[arg(long, value_name = "FILE", default_value = "job.png")]
        png: PathBuf,
    },

    /// Render a built-in sample receipt
    Demo {
        /// Sample name (omit to list)
        name: Option<String>,

        /// List available samples
        #[arg(long)]
        list: bool,

        /// Paper: 58mm, 80mm, or a width in dots
        #[arg(long, default_value = "58mm")]
        paper: String,

        /// Write a PNG image
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        /// Write the ESC/POS bytes instead of rendering
        #[arg(long, value_name = "FILE")]
        bytes: Option<PathBuf>,
    },

    /// Print parsed and reconstructed lines
    Dump {
        /// Input file ("-" for stdin)
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), RasterError> {
    match command {
        Commands::Render {
            input,
            paper,
            png,
            raw,
        } => {
            let paper = PaperConfig::parse(&paper)?;
            let bytes = read_input(&input)?;
            let canvas = render_bytes(&bytes, &paper)?;

            let png = match (&png, &raw) {
                (None, None) => Some(PathBuf::from("receipt.png")),
                _ => png,
            };
            if let Some(path) = png {
                write_png(&path, &canvas)?;
            }
            if let Some(path) = raw {
                let raster = canvas.to_raster();
                std::fs::write(&path, &raster.data)?;
                println!(
                    "Saved {} bytes of raster data ({} bytes/row, {} rows) to {}",
                    raster.data.len(),
                    raster.width_bytes(),
                    raster.height,
                    path.display()
                );
            }
        }

        Commands::Text {
            text,
            size,
            paper,
            png,
        } => {
            let paper = PaperConfig::parse(&paper)?;
            if !(1..=100).contains(&size) {
                return Err(RasterError::InvalidInput(
                    "Text size must be between 1 and 100".to_string(),
                ));
            }
            let text = text.replace("\\n", "\n");
            let canvas = render_text_bitmap(&text, size, paper.width_dots)?;
            write_png(&png, &canvas)?;
        }

        Commands::Job { request, png } => {
            let json = String::from_utf8_lossy(&read_input(&request)?).into_owned();
            let request = job::PrintRequest::from_json(&json)?;
            let mut sink = PngFileSink::new(&png);
            let outcome = job::run(&request, &mut sink);
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }

        Commands::Demo {
            name,
            list,
            paper,
            png,
            bytes,
        } => {
            let Some(name) = name.filter(|_| !list) else {
                println!("Available samples:");
                for name in receipt::list_receipts() {
                    println!("  {}", name);
                }
                return Ok(());
            };

            let data = receipt::by_name(&name).ok_or_else(|| {
                RasterError::InvalidInput(format!(
                    "Unknown sample '{}'. Available: {}",
                    name,
                    receipt::list_receipts().join(", ")
                ))
            })?;

            if let Some(path) = bytes {
                std::fs::write(&path, &data)?;
                println!("Saved {} ESC/POS bytes to {}", data.len(), path.display());
                return Ok(());
            }

            let paper = PaperConfig::parse(&paper)?;
            let canvas = render_bytes(&data, &paper)?;
            let path = png.unwrap_or_else(|| PathBuf::from(format!("{}.png", name)));
            write_png(&path, &canvas)?;
        }

        Commands::Dump { input } => {
            let bytes = read_input(&input)?;
            let parsed = interpret::parse(&bytes);

            println!("Parsed {} lines from {} bytes:", parsed.len(), bytes.len());
            for line in &parsed {
                println!("  {}", line);
            }

            let rebuilt =
                reconstruct::reconstruct(parsed, bytes.len(), &RenderConfig::default());
            println!();
            println!("Reconstructed {} lines:", rebuilt.len());
            for line in &rebuilt {
                println!("  {}", line);
            }
        }
    }

    Ok(())
}

fn render_bytes(bytes: &[u8], paper: &PaperConfig) -> Result<Canvas, RasterError> {
    let outcome = pipeline::render_escpos(bytes, paper.width_dots, &RenderConfig::default())?;
    if outcome.path == RenderPath::Fallback {
        eprintln!("Warning: full rendering failed, output is plain text only");
    }
    Ok(outcome.canvas)
}

fn read_input(path: &Path) -> Result<Vec<u8>, RasterError> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read(path)?)
}

fn write_png(path: &Path, canvas: &Canvas) -> Result<(), RasterError> {
    std::fs::write(path, canvas.to_png()?)?;
    println!(
        "Saved {}x{} preview to {}",
        canvas.width(),
        canvas.height(),
        path.display()
    );
    Ok(())
}
