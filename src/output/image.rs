//! Raster image serialization of decoded layers.
//!
//! Color layers are written as 8-bit RGB jpeg/png/tiff. Height and
//! light-intensity maps are scaled to physical units and written as
//! single-channel 32-bit float tiffs; jpeg and png cannot carry them.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbImage};
use tiff::encoder::{colortype, TiffEncoder};
use tracing::debug;

use crate::output::error::{OutputError, Result};
use crate::output::layers::{self, LayerSelection};
use crate::output::OutputFormat;
use crate::vk4::{GraySamples, GraySelector, Vk4Container};

/// Meters per height digit unit before calibration.
const PICOMETER: f64 = 1.0e-12;

/// Writes the selected layer as a raster image in the requested format.
pub fn write_image(
    container: &Vk4Container,
    selection: &LayerSelection,
    format: OutputFormat,
    path: &Path,
) -> Result<()> {
    let width = container.width();
    let height = container.height();
    debug!(path = %path.display(), width, height, "Writing image");

    match selection {
        LayerSelection::Color { channels, block } => {
            let merged = layers::merge_channels(container, channels, *block)?;
            let raw: Vec<u8> = merged.iter().flat_map(|px| px.iter().copied()).collect();
            match format {
                OutputFormat::Jpeg | OutputFormat::Png => {
                    let img = RgbImage::from_raw(width, height, raw).ok_or_else(|| {
                        OutputError::Encode("pixel buffer does not match dimensions".to_string())
                    })?;
                    let img_format = match format {
                        OutputFormat::Jpeg => ImageFormat::Jpeg,
                        _ => ImageFormat::Png,
                    };
                    img.save_with_format(path, img_format)
                        .map_err(|e| OutputError::Encode(e.to_string()))?;
                    Ok(())
                }
                OutputFormat::Tiff => write_rgb_tiff(path, width, height, &raw),
                OutputFormat::Csv | OutputFormat::Hcsv => Err(OutputError::Encode(
                    "csv output is not an image format".to_string(),
                )),
            }
        }
        LayerSelection::Height | LayerSelection::LightIntensity => {
            if format != OutputFormat::Tiff {
                return Err(OutputError::UnsupportedOutput {
                    layer: match selection {
                        LayerSelection::Height => "height",
                        _ => "light intensity",
                    },
                    requested: format.extension(),
                });
            }
            let scaled = scaled_samples(container, selection)?;
            write_gray_tiff(path, width, height, &scaled)
        }
    }
}

/// Height samples scaled to meters (1 pm times the calibration digit size);
/// light samples normalized by the block's bit depth.
pub fn scaled_samples(container: &Vk4Container, selection: &LayerSelection) -> Result<Vec<f32>> {
    match selection {
        LayerSelection::Height => {
            let block = container.gray_block(GraySelector::Height)?;
            let digit = container.measurement_conditions.z_length_per_digit as f64;
            let scale = PICOMETER * digit;
            match &block.samples {
                GraySamples::Height(samples) => {
                    Ok(samples.iter().map(|&v| (v as f64 * scale) as f32).collect())
                }
                GraySamples::Light(samples) => {
                    Ok(samples.iter().map(|&v| (v as f64 * scale) as f32).collect())
                }
            }
        }
        LayerSelection::LightIntensity => {
            let block = container.gray_block(GraySelector::Light)?;
            let scale = 0.5f64.powi(block.bit_depth as i32);
            match &block.samples {
                GraySamples::Light(samples) => {
                    Ok(samples.iter().map(|&v| (v as f64 * scale) as f32).collect())
                }
                GraySamples::Height(samples) => {
                    Ok(samples.iter().map(|&v| (v as f64 * scale) as f32).collect())
                }
            }
        }
        LayerSelection::Color { .. } => Err(OutputError::Encode(
            "color layers are not scaled to physical units".to_string(),
        )),
    }
}

fn write_rgb_tiff(path: &Path, width: u32, height: u32, raw: &[u8]) -> Result<()> {
    let mut buffer = Vec::new();
    let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
        .map_err(|e| OutputError::Encode(e.to_string()))?;
    encoder
        .write_image::<colortype::RGB8>(width, height, raw)
        .map_err(|e| OutputError::Encode(e.to_string()))?;
    std::fs::write(path, &buffer)?;
    Ok(())
}

fn write_gray_tiff(path: &Path, width: u32, height: u32, samples: &[f32]) -> Result<()> {
    let mut buffer = Vec::new();
    let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
        .map_err(|e| OutputError::Encode(e.to_string()))?;
    encoder
        .write_image::<colortype::Gray32Float>(width, height, samples)
        .map_err(|e| OutputError::Encode(e.to_string()))?;
    std::fs::write(path, &buffer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::tempdir;

    use super::{scaled_samples, write_image};
    use crate::output::error::OutputError;
    use crate::output::layers::LayerSelection;
    use crate::output::OutputFormat;
    use crate::vk4::fixtures::SyntheticVk4;
    use crate::vk4::{SectionSet, Vk4Container};

    fn decoded_full() -> Vk4Container {
        let fixture = SyntheticVk4 {
            peak: Some((2, 2, vec![[255, 0, 0], [0, 255, 0], [0, 0, 255], [8, 8, 8]])),
            color_light: Some((2, 2, vec![[0, 0, 0]; 4])),
            light: Some((2, 2, vec![0, 16384, 32768, 65535])),
            height: Some((2, 2, vec![-1000, 0, 1000, 2000])),
            ..SyntheticVk4::default()
        };
        Vk4Container::decode(Cursor::new(fixture.build()), SectionSet::all()).unwrap()
    }

    #[test]
    fn rgb_layers_write_png_and_tiff() {
        let container = decoded_full();
        let dir = tempdir().unwrap();
        let selection = "RGB".parse::<LayerSelection>().unwrap();

        let png = dir.path().join("out.png");
        write_image(&container, &selection, OutputFormat::Png, &png).unwrap();
        assert!(png.metadata().unwrap().len() > 0);

        let tiff = dir.path().join("out.tiff");
        write_image(&container, &selection, OutputFormat::Tiff, &tiff).unwrap();
        assert!(tiff.metadata().unwrap().len() > 0);
    }

    #[test]
    fn height_map_writes_float_tiff() {
        let container = decoded_full();
        let dir = tempdir().unwrap();
        let path = dir.path().join("height.tiff");

        write_image(&container, &LayerSelection::Height, OutputFormat::Tiff, &path).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn height_map_refuses_jpeg_and_png() {
        let container = decoded_full();
        let dir = tempdir().unwrap();
        let path = dir.path().join("height.png");

        for format in [OutputFormat::Png, OutputFormat::Jpeg] {
            assert!(matches!(
                write_image(&container, &LayerSelection::Height, format, &path),
                Err(OutputError::UnsupportedOutput { .. })
            ));
        }
    }

    #[test]
    fn height_scaling_uses_calibration_digit_size() {
        let container = decoded_full();
        // Seeded z_length_per_digit = 42 (field 42), so one digit is 42 pm.
        let scaled = scaled_samples(&container, &LayerSelection::Height).unwrap();
        assert!((scaled[0] as f64 - (-1000.0 * 42.0e-12)).abs() < 1e-12);
        assert_eq!(scaled[1], 0.0);
    }

    #[test]
    fn light_scaling_normalizes_by_bit_depth() {
        let container = decoded_full();
        // Light fixture blocks declare 16-bit samples.
        let scaled = scaled_samples(&container, &LayerSelection::LightIntensity).unwrap();
        assert_eq!(scaled[0], 0.0);
        assert!((scaled[1] - 0.25).abs() < 1e-6);
        assert!((scaled[3] - 0.99998474).abs() < 1e-6);
    }
}
