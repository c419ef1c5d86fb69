use anyhow::{Context, Result};
use clap::Parser;
use ema_slicer::{parse_expression, resolve_selection, slice_musicxml, Orientation, Score, SliceSettings};
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ema-slice")]
#[command(about = "Slice a MusicXML score by a measure/staff/beat address expression", long_about = None)]
struct Cli {
    /// Partwise MusicXML file, or '-' for stdin
    input: PathBuf,

    /// Address expression, e.g. 1-4/1+2/@all
    #[arg(short, long)]
    expression: String,

    /// Write the sliced score here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Key the selection by staff first
    #[arg(long)]
    partwise: bool,

    /// Print the resolved selection as JSON instead of slicing
    #[arg(long, conflicts_with = "print_metadata")]
    print_selection: bool,

    /// Print the score metadata as JSON instead of slicing
    #[arg(long)]
    print_metadata: bool,
}

fn read_input(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut xml = String::new();
        std::io::stdin()
            .read_to_string(&mut xml)
            .context("Failed to read score from stdin")?;
        return Ok(xml);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_output(path: Option<&PathBuf>, text: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let xml = read_input(&cli.input)?;
    let orientation = Orientation::from_partwise(cli.partwise);

    // Reject a malformed expression before reading the whole score
    parse_expression(&cli.expression)
        .with_context(|| format!("Invalid address expression '{}'", cli.expression))?;

    if cli.print_selection || cli.print_metadata {
        let score = Score::parse(&xml).context("Failed to parse score")?;
        let (metadata, selection) = resolve_selection(&score, &cli.expression, orientation)?;
        let json = if cli.print_metadata {
            serde_json::to_string_pretty(&metadata)?
        } else {
            serde_json::to_string_pretty(&selection)?
        };
        return write_output(cli.output.as_ref(), &json);
    }

    let result = slice_musicxml(&xml, &cli.expression, Some(SliceSettings { orientation }))
        .with_context(|| format!("Failed to slice by '{}'", cli.expression))?;

    log::info!(
        "{} measure(s) removed, {} note(s) silenced, parts removed: {:?}",
        result.report.measures_removed,
        result.report.notes_silenced,
        result.report.removed_parts
    );

    write_output(cli.output.as_ref(), &result.musicxml)
}
