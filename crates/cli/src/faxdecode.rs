//! faxdecode - Decode CCITT Group 3/Group 4 fax data
//!
//! A command line tool that decodes the body of a `CCITTFaxDecode` stream
//! and writes the packed rows as raw bytes or as a binary PBM image.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use parchment_core::ccitt::{self, CcittParams, DEFAULT_COLUMNS, EncodingMode};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Output format for the decoded image.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Packed rows exactly as the filter produces them (default)
    #[default]
    Raw,
    /// Binary PBM (P4); always written with 1 = black
    Pbm,
}

/// Decode parameters in PDF `DecodeParms` form.
///
/// Entries the decoder has no use for (`EndOfLine`, `EndOfBlock`,
/// `DamagedRowsBeforeError`) are accepted and ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DecodeParms {
    #[serde(rename = "K")]
    k: Option<i32>,
    #[serde(rename = "Columns")]
    columns: Option<usize>,
    /// 0 means the height is not known, as in PDF.
    #[serde(rename = "Rows")]
    rows: Option<usize>,
    #[serde(rename = "BlackIs1")]
    black_is_1: Option<bool>,
    #[serde(rename = "EncodedByteAlign")]
    encoded_byte_align: Option<bool>,
}

/// Decode CCITT Group 3 (K = 0) or Group 4 (K < 0) fax data.
#[derive(Parser, Debug)]
#[command(name = "faxdecode")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Encoded input file, or "-" for stdin
    #[arg(default_value = "-")]
    input: String,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    // === Decode parameters ===
    /// DecodeParms as JSON, e.g. '{"K": -1, "Columns": 2548}'
    #[arg(short = 'p', long)]
    params: Option<String>,

    /// The K entry: negative for Group 4, 0 for Group 3
    #[arg(short = 'K', long = "k", allow_negative_numbers = true)]
    k: Option<i32>,

    /// Pixels per row (default 1728)
    #[arg(short = 'c', long)]
    columns: Option<usize>,

    /// Stop after this many rows
    #[arg(short = 'r', long)]
    rows: Option<usize>,

    /// Write 1 for black pixels instead of white (`=false` to turn off)
    #[arg(
        long = "black-is-1",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    black_is_1: Option<bool>,

    /// Every encoded row starts on a byte boundary (`=false` to turn off)
    #[arg(
        long = "byte-align",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    byte_align: Option<bool>,

    /// Input bytes are stored least significant bit first (TIFF FillOrder 2)
    #[arg(long = "lsb-first", action = ArgAction::SetTrue)]
    lsb_first: bool,

    // === Output options ===
    /// Type of output to generate
    #[arg(short = 't', long = "format", value_enum, default_value = "raw")]
    format: OutputFormat,
}

/// Merges `--params` JSON with the individual flags; flags win.
fn build_params(args: &Args) -> Result<CcittParams> {
    let parms: DecodeParms = match &args.params {
        Some(json) => serde_json::from_str(json).context("invalid --params JSON")?,
        None => DecodeParms::default(),
    };

    let k = args.k.or(parms.k).unwrap_or(0);
    let mode = EncodingMode::from_k(k)?;
    let columns = args.columns.or(parms.columns).unwrap_or(DEFAULT_COLUMNS);
    let rows = args.rows.or(parms.rows.filter(|rows| *rows > 0));

    let params = CcittParams::new(mode, columns)
        .with_rows(rows)
        .with_black_is_1(args.black_is_1.or(parms.black_is_1).unwrap_or(false))
        .with_byte_align(
            args.byte_align
                .or(parms.encoded_byte_align)
                .unwrap_or(false),
        )
        .with_lsb_to_msb(args.lsb_first);

    params.validate()?;
    Ok(params)
}

fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut data = Vec::new();
        io::stdin()
            .read_to_end(&mut data)
            .context("failed to read stdin")?;
        Ok(data)
    } else {
        fs::read(input).with_context(|| format!("failed to read {input}"))
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let mut params = build_params(&args)?;
    if matches!(args.format, OutputFormat::Pbm) {
        params.black_is_1 = true;
    }
    debug!(?params, input = %args.input, "decoding");

    let data = read_input(&args.input)?;
    let mut stream = ccitt::decode(&data, &params)?;
    let rows = stream.row_count();
    if let Some(err) = stream.error() {
        warn!(rows, error = %err, "writing the rows decoded before the error");
    }

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("failed to create output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    if matches!(args.format, OutputFormat::Pbm) {
        write!(output, "P4\n{} {}\n", params.columns, rows)?;
    }

    // Copying drains the rows first, then surfaces any decode error.
    let copied = io::copy(&mut stream, &mut output);
    output.flush().context("failed to write output")?;
    copied.with_context(|| format!("decoding {} stopped after {rows} rows", args.input))?;

    Ok(())
}
