//! Output collaborators: layer selection, metadata formatting, and CSV/image
//! serialization of decoded VK4 data.

pub mod csv;
pub mod error;
pub mod image;
pub mod layers;
pub mod metadata;

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

pub use error::{OutputError, Result};
pub use layers::LayerSelection;

/// Directory output files are placed in when no explicit basename is given.
pub const OUT_DIR: &str = "out_files";

/// The supported serialization targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain CSV grid.
    Csv,
    /// CSV grid with a metadata header block.
    Hcsv,
    Jpeg,
    Png,
    Tiff,
}

impl OutputFormat {
    /// The label used in generated file names, matching the CLI argument.
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Hcsv => "hcsv",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Tiff => "tiff",
        }
    }

    /// The file extension for this format; both CSV variants produce `.csv`.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv | OutputFormat::Hcsv => "csv",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Tiff => "tiff",
        }
    }
}

/// Serializes one layer of a decoded container to `path`.
pub fn write(
    container: &crate::vk4::Vk4Container,
    selection: &LayerSelection,
    format: OutputFormat,
    path: &Path,
    input_name: &str,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    match format {
        OutputFormat::Csv => csv::write_csv(container, selection, path, false, input_name),
        OutputFormat::Hcsv => csv::write_csv(container, selection, path, true, input_name),
        OutputFormat::Jpeg | OutputFormat::Png | OutputFormat::Tiff => {
            image::write_image(container, selection, format, path)
        }
    }
}

/// Resolves the output path: an explicit basename if given, otherwise a name
/// derived from the input file, output type and layer string, under
/// [`OUT_DIR`]. The directory itself is created by [`write`].
pub fn output_path(
    input: &Path,
    basename: Option<&str>,
    layer: &str,
    format: OutputFormat,
) -> PathBuf {
    let dir = Path::new(OUT_DIR);
    let stem = match basename {
        Some(name) => name.to_string(),
        None => {
            let input_stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "output".to_string());
            format!("{}_{}_{}", input_stem, format.label(), layer)
        }
    };
    dir.join(format!("{}.{}", stem, format.extension()))
}
