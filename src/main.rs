use anyhow::Result;
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use maptrack::extract::extract_records;
use maptrack::pipeline::build_track;
use maptrack::table::{write_layout, write_table};

/// maptrack - mappability classification and row-packed track layout
///
/// Classifies simulated-read alignments as uniquely mapped or top
/// multi-mapped and packs them into non-overlapping display rows. Read names
/// must encode the ground-truth origin as
/// "<chr>:<regionStart>-<regionEnd>_<label>_<offset>_...".
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Input BAM/SAM file with simulated reads
    #[clap(value_name = "ALIGNMENTS")]
    input: String,

    /// Output TSV of placed rectangles (stdout if not specified)
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Also write the flat per-alignment table (TSV) to this path
    #[clap(long = "table")]
    table: Option<String>,

    /// Number of threads for BAM decompression
    #[clap(short = 't', long = "threads", default_value = "4")]
    threads: usize,

    /// Quiet mode (no summary output)
    #[clap(long = "quiet")]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let extraction = extract_records(&args.input, args.threads)?;
    if !args.quiet {
        eprintln!(
            "Extracted {} alignments from {} ({} skipped)",
            extraction.records.len(),
            args.input,
            extraction.skipped
        );
    }

    if let Some(ref path) = args.table {
        let file = File::create(path)?;
        write_table(BufWriter::new(file), &extraction.records)?;
        info!("Wrote alignment table to {}", path);
    }

    let layout = build_track(&extraction.records);
    if !args.quiet {
        eprintln!(
            "Placed {} rectangles across {} rows",
            layout.rectangles.len(),
            layout.rectangles.iter().map(|r| r.row).max().unwrap_or(0)
        );
    }

    let output: Box<dyn Write> = if let Some(ref path) = args.output {
        Box::new(BufWriter::new(File::create(path)?))
    } else {
        Box::new(io::stdout())
    };
    write_layout(output, &layout)?;

    Ok(())
}
