//! CSV serialization of decoded layers.
//!
//! Output is a height x width grid of cell values: composite RGB integers
//! for color layers, raw signed heights, or raw light intensities. The
//! `hcsv` variant prepends the metadata pair block and a blank line.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use tracing::debug;

use crate::output::error::Result;
use crate::output::layers::{self, LayerSelection};
use crate::output::metadata;
use crate::vk4::{GraySamples, GraySelector, Vk4Container};

/// Writes the selected layer as CSV. `with_metadata_header` selects the
/// `hcsv` variant.
pub fn write_csv(
    container: &Vk4Container,
    selection: &LayerSelection,
    path: &Path,
    with_metadata_header: bool,
    input_name: &str,
) -> Result<()> {
    let cells = cell_values(container, selection)?;
    let width = container.width() as usize;
    debug!(path = %path.display(), width, rows = container.height(), "Writing CSV");

    let mut file = File::create(path)?;
    if with_metadata_header {
        let mut writer = WriterBuilder::new().from_writer(&mut file);
        for (name, value) in metadata::file_metadata(container, input_name) {
            writer.write_record([name, value])?;
        }
        writer.flush()?;
        drop(writer);
        file.write_all(b"\n")?;
    }

    let mut writer = WriterBuilder::new().flexible(true).from_writer(&mut file);
    for row in cells.chunks(width) {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// One formatted cell per pixel, row-major.
fn cell_values(container: &Vk4Container, selection: &LayerSelection) -> Result<Vec<String>> {
    let cells = match selection {
        LayerSelection::Height => {
            match &container.gray_block(GraySelector::Height)?.samples {
                GraySamples::Height(samples) => samples.iter().map(i32::to_string).collect(),
                GraySamples::Light(samples) => samples.iter().map(u16::to_string).collect(),
            }
        }
        LayerSelection::LightIntensity => {
            match &container.gray_block(GraySelector::Light)?.samples {
                GraySamples::Height(samples) => samples.iter().map(i32::to_string).collect(),
                GraySamples::Light(samples) => samples.iter().map(u16::to_string).collect(),
            }
        }
        LayerSelection::Color { channels, block } => {
            let merged = layers::merge_channels(container, channels, *block)?;
            layers::composite_values(&merged)
                .iter()
                .map(u32::to_string)
                .collect()
        }
    };
    Ok(cells)
}
