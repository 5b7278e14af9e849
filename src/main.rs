use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use vk4_extract_rs::logger;
use vk4_extract_rs::output::{self, LayerSelection, OutputFormat};
use vk4_extract_rs::vk4::Vk4Container;

/// Keyence VK4 file format data extraction tool.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Input VK4 file to read.
    #[arg(short, long)]
    input: PathBuf,

    /// Output type.
    #[arg(short = 't', long = "type", value_enum)]
    output_type: OutputFormat,

    /// Data layers to extract: combinations of R, G and B, with an optional
    /// L selecting the color-light block (e.g. RB, LGB, G); or H or L alone
    /// for the height and light-intensity maps.
    #[arg(short, long)]
    layer: String,

    /// Output file basename (the extension is generated). Defaults to a name
    /// derived from the input basename, output type and layers.
    #[arg(short, long)]
    output: Option<String>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let selection: LayerSelection = cli.layer.parse()?;
    let sections = selection.section_set();

    let container = Vk4Container::decode_file(&cli.input, sections)
        .with_context(|| format!("failed to decode {}", cli.input.display()))?;

    let out_path = output::output_path(
        &cli.input,
        cli.output.as_deref(),
        &cli.layer,
        cli.output_type,
    );
    let input_name = cli.input.to_string_lossy();
    output::write(
        &container,
        &selection,
        cli.output_type,
        &out_path,
        &input_name,
    )
    .with_context(|| format!("failed to write {}", out_path.display()))?;

    info!(output = %out_path.display(), "Extraction complete");
    Ok(())
}
