//! Layer selection: mapping CLI layer strings onto decoded sections and
//! merging the requested color channels.
//!
//! A layer string is either `H` (height map), `L` alone (light-intensity
//! map), or any combination of `R`, `G`, `B`; an `L` anywhere in a color
//! combination switches the source from the color-peak block to the
//! color-light block (e.g. `RG`, `LGB`, `RBL`).

use std::str::FromStr;

use crate::output::error::{OutputError, Result};
use crate::vk4::{CanonicalBlock, Channel, ColorSelector, SectionSet, Vk4Container};

/// Which decoded data one output run draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerSelection {
    Height,
    LightIntensity,
    Color {
        channels: Vec<Channel>,
        block: ColorSelector,
    },
}

impl FromStr for LayerSelection {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => return Err(OutputError::InvalidLayer(s.to_string())),
            "H" => return Ok(LayerSelection::Height),
            "L" => return Ok(LayerSelection::LightIntensity),
            _ => {}
        }

        let mut block = ColorSelector::Peak;
        let mut channels = Vec::new();
        for c in s.chars() {
            match c {
                'R' => channels.push(Channel::Red),
                'G' => channels.push(Channel::Green),
                'B' => channels.push(Channel::Blue),
                'L' => block = ColorSelector::Light,
                _ => return Err(OutputError::InvalidLayer(s.to_string())),
            }
        }
        if channels.is_empty() {
            return Err(OutputError::InvalidLayer(s.to_string()));
        }
        Ok(LayerSelection::Color { channels, block })
    }
}

impl LayerSelection {
    /// The sections that must be decoded to serve this selection; the chosen
    /// block is also the canonical source for image dimensions.
    pub fn section_set(&self) -> SectionSet {
        match self {
            LayerSelection::Height => SectionSet::only(CanonicalBlock::Height),
            LayerSelection::LightIntensity => SectionSet::only(CanonicalBlock::Light),
            LayerSelection::Color { block, .. } => match block {
                ColorSelector::Peak => SectionSet::only(CanonicalBlock::ColorPeak),
                ColorSelector::Light => SectionSet::only(CanonicalBlock::ColorLight),
            },
        }
    }
}

/// Merges the requested channels into one RGB array. Each channel keeps its
/// source value at its own position; channels never requested stay zero.
pub fn merge_channels(
    container: &Vk4Container,
    channels: &[Channel],
    block: ColorSelector,
) -> Result<Vec<[u8; 3]>> {
    let pixel_count = container.width() as usize * container.height() as usize;
    let mut merged = vec![[0u8; 3]; pixel_count];
    for &channel in channels {
        let values = container.single_channel_values(channel, block)?;
        let idx = channel.index();
        for (out, src) in merged.iter_mut().zip(&values) {
            out[idx] = src[idx];
        }
    }
    Ok(merged)
}

/// Composite `(r<<16) | (g<<8) | b` value per pixel, the CSV cell encoding
/// for color layers.
pub fn composite_values(pixels: &[[u8; 3]]) -> Vec<u32> {
    pixels
        .iter()
        .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32)
        .collect()
}
