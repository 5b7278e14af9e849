//! Color and grayscale pixel block decoding.
//!
//! A VK4 file carries two RGB blocks (the "peak" and "light" capture modes)
//! and two single-channel blocks (the height map and the light-intensity
//! map). Each grayscale block carries a 256-entry RGB display palette ahead
//! of its samples. Rows are stored unpadded in row-major order; the declared
//! width and height fully determine how many bytes a block occupies.

use std::io::{Read, Seek};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::vk4::error::{Result, Vk4Error};
use crate::vk4::offsets::{OffsetTable, SectionKind};
use crate::vk4::reader::ByteReader;

/// Bit depth the format uses for RGB blocks. Other depths have never been
/// observed; the decoder logs a mismatch and still reads 3 bytes per pixel.
pub const EXPECTED_COLOR_BIT_DEPTH: u32 = 24;

/// Size in bytes of a grayscale block's display palette: 256 RGB triples.
pub const PALETTE_SIZE: usize = 768;

/// One RGB channel within a color block pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Index of this channel within a pixel triple.
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

impl FromStr for Channel {
    type Err = Vk4Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "red" => Ok(Channel::Red),
            "green" => Ok(Channel::Green),
            "blue" => Ok(Channel::Blue),
            other => Err(Vk4Error::UnknownChannel(other.to_string())),
        }
    }
}

/// Which of the two RGB capture modes to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSelector {
    Peak,
    Light,
}

impl ColorSelector {
    pub fn section(self) -> SectionKind {
        match self {
            ColorSelector::Peak => SectionKind::ColorPeak,
            ColorSelector::Light => SectionKind::ColorLight,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorSelector::Peak => "peak",
            ColorSelector::Light => "light",
        }
    }
}

impl FromStr for ColorSelector {
    type Err = Vk4Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "peak" => Ok(ColorSelector::Peak),
            "light" => Ok(ColorSelector::Light),
            other => Err(Vk4Error::InvalidSelector(other.to_string())),
        }
    }
}

/// Which of the two single-channel maps to decode. Height and light intensity
/// share a layout but sit at distinct offset table entries and use distinct
/// sample widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraySelector {
    Height,
    Light,
}

impl GraySelector {
    pub fn section(self) -> SectionKind {
        match self {
            GraySelector::Height => SectionKind::Height,
            GraySelector::Light => SectionKind::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GraySelector::Height => "height",
            GraySelector::Light => "light",
        }
    }
}

impl FromStr for GraySelector {
    type Err = Vk4Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "height" => Ok(GraySelector::Height),
            "light" => Ok(GraySelector::Light),
            other => Err(Vk4Error::InvalidSelector(other.to_string())),
        }
    }
}

/// A decoded RGB pixel block: 5-field header plus width*height triples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPixelBlock {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u32,
    pub compression: u32,
    pub data_byte_size: u32,
    /// Row-major RGB triples, `width * height` of them.
    pub data: Vec<[u8; 3]>,
}

impl ColorPixelBlock {
    pub fn decode<R: Read + Seek>(
        offsets: &OffsetTable,
        selector: ColorSelector,
        reader: &mut ByteReader<R>,
    ) -> Result<Self> {
        reader.seek_to(offsets.offset(selector.section()) as u64)?;

        let width = reader.read_u32()?;
        let height = reader.read_u32()?;
        let bit_depth = reader.read_u32()?;
        let compression = reader.read_u32()?;
        let data_byte_size = reader.read_u32()?;

        if bit_depth != EXPECTED_COLOR_BIT_DEPTH {
            warn!(
                bit_depth,
                selector = selector.name(),
                "Color block declares an unexpected bit depth; reading 3 bytes per pixel anyway"
            );
        }

        let pixel_count = width as usize * height as usize;
        let raw = reader.read_bytes(pixel_count * 3)?;
        let data = raw.chunks_exact(3).map(|px| [px[0], px[1], px[2]]).collect();

        debug!(
            width,
            height,
            selector = selector.name(),
            "Decoded color pixel block"
        );
        Ok(Self {
            width,
            height,
            bit_depth,
            compression,
            data_byte_size,
            data,
        })
    }
}

/// Sample storage for a grayscale block: 16-bit unsigned for light intensity,
/// 32-bit signed for height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraySamples {
    Light(Vec<u16>),
    Height(Vec<i32>),
}

impl GraySamples {
    pub fn len(&self) -> usize {
        match self {
            GraySamples::Light(samples) => samples.len(),
            GraySamples::Height(samples) => samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A decoded single-channel block: 7-field header, display palette, samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayPixelBlock {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u32,
    pub compression: u32,
    pub data_byte_size: u32,
    pub palette_range_min: u32,
    pub palette_range_max: u32,
    /// 768 raw palette bytes: 256 RGB triples used for display colorization.
    pub palette: Vec<u8>,
    pub samples: GraySamples,
}

impl GrayPixelBlock {
    pub fn decode<R: Read + Seek>(
        offsets: &OffsetTable,
        selector: GraySelector,
        reader: &mut ByteReader<R>,
    ) -> Result<Self> {
        reader.seek_to(offsets.offset(selector.section()) as u64)?;

        let width = reader.read_u32()?;
        let height = reader.read_u32()?;
        let bit_depth = reader.read_u32()?;
        let compression = reader.read_u32()?;
        let data_byte_size = reader.read_u32()?;
        let palette_range_min = reader.read_u32()?;
        let palette_range_max = reader.read_u32()?;
        let palette = reader.read_bytes(PALETTE_SIZE)?;

        let sample_count = width as usize * height as usize;
        let samples = match selector {
            GraySelector::Light => GraySamples::Light(reader.read_u16_vec(sample_count)?),
            GraySelector::Height => GraySamples::Height(reader.read_i32_vec(sample_count)?),
        };

        debug!(
            width,
            height,
            bit_depth,
            selector = selector.name(),
            "Decoded grayscale pixel block"
        );
        Ok(Self {
            width,
            height,
            bit_depth,
            compression,
            data_byte_size,
            palette_range_min,
            palette_range_max,
            palette,
            samples,
        })
    }
}
