//! Container assembly: one decode pass over an open source, producing an
//! immutable aggregate of every requested section.
//!
//! Which pixel blocks get decoded is driven by a flat [`SectionSet`]
//! configuration value rather than a builder hierarchy; the caller names the
//! blocks it needs and which one is canonical for the image dimensions.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tracing::{debug, info};

use crate::vk4::blocks::{
    Channel, ColorPixelBlock, ColorSelector, GrayPixelBlock, GraySelector,
};
use crate::vk4::conditions::MeasurementConditions;
use crate::vk4::error::{Result, Vk4Error};
use crate::vk4::offsets::{FileHeader, OffsetTable, SectionKind};
use crate::vk4::reader::ByteReader;
use crate::vk4::strings::StringData;

/// Which decoded block supplies the container's image width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalBlock {
    ColorPeak,
    ColorLight,
    Height,
    Light,
}

impl CanonicalBlock {
    fn name(self) -> &'static str {
        match self {
            CanonicalBlock::ColorPeak => "color peak",
            CanonicalBlock::ColorLight => "color light",
            CanonicalBlock::Height => "height",
            CanonicalBlock::Light => "light",
        }
    }
}

/// The pixel blocks to decode in one pass. The header, offset table,
/// measurement conditions and string data are always decoded; the canonical
/// block is always included among the decoded blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSet {
    pub color_peak: bool,
    pub color_light: bool,
    pub light: bool,
    pub height: bool,
    pub canonical: CanonicalBlock,
}

impl SectionSet {
    /// Every pixel block, with color peak as the canonical dimensions source.
    pub fn all() -> Self {
        Self {
            color_peak: true,
            color_light: true,
            light: true,
            height: true,
            canonical: CanonicalBlock::ColorPeak,
        }
    }

    /// Just the named block, which is also canonical.
    pub fn only(canonical: CanonicalBlock) -> Self {
        let mut set = Self {
            color_peak: false,
            color_light: false,
            light: false,
            height: false,
            canonical,
        };
        match canonical {
            CanonicalBlock::ColorPeak => set.color_peak = true,
            CanonicalBlock::ColorLight => set.color_light = true,
            CanonicalBlock::Height => set.height = true,
            CanonicalBlock::Light => set.light = true,
        }
        set
    }
}

/// A reference to one decoded section, for lookup by section name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionRef<'a> {
    MeasurementConditions(&'a MeasurementConditions),
    Color(&'a ColorPixelBlock),
    Gray(&'a GrayPixelBlock),
    Strings(&'a StringData),
}

/// All decoded data for one VK4 file. Constructed in a single top-to-bottom
/// decode pass and immutable afterwards; decode is all-or-nothing, so no
/// partially populated container is ever observable.
#[derive(Debug, Clone, PartialEq)]
pub struct Vk4Container {
    pub header: FileHeader,
    pub offsets: OffsetTable,
    pub measurement_conditions: MeasurementConditions,
    pub string_data: StringData,
    pub rgb_peak: Option<ColorPixelBlock>,
    pub rgb_light: Option<ColorPixelBlock>,
    pub light: Option<GrayPixelBlock>,
    pub height: Option<GrayPixelBlock>,
    image_width: u32,
    image_height: u32,
}

impl Vk4Container {
    /// Decodes the requested sections from a seekable byte source. The source
    /// is consumed and dropped (closed) whether or not decoding succeeds.
    pub fn decode<R: Read + Seek>(source: R, sections: SectionSet) -> Result<Self> {
        let mut reader = ByteReader::new(source);

        let header = FileHeader::decode(&mut reader)?;
        let offsets = OffsetTable::decode(&mut reader)?;
        let measurement_conditions = MeasurementConditions::decode(&offsets, &mut reader)?;
        let string_data = StringData::decode(&offsets, &mut reader)?;

        let rgb_peak = if sections.color_peak {
            Some(ColorPixelBlock::decode(
                &offsets,
                ColorSelector::Peak,
                &mut reader,
            )?)
        } else {
            None
        };
        let rgb_light = if sections.color_light {
            Some(ColorPixelBlock::decode(
                &offsets,
                ColorSelector::Light,
                &mut reader,
            )?)
        } else {
            None
        };
        let light = if sections.light {
            Some(GrayPixelBlock::decode(
                &offsets,
                GraySelector::Light,
                &mut reader,
            )?)
        } else {
            None
        };
        let height = if sections.height {
            Some(GrayPixelBlock::decode(
                &offsets,
                GraySelector::Height,
                &mut reader,
            )?)
        } else {
            None
        };

        let (image_width, image_height) = match sections.canonical {
            CanonicalBlock::ColorPeak => rgb_peak.as_ref().map(|b| (b.width, b.height)),
            CanonicalBlock::ColorLight => rgb_light.as_ref().map(|b| (b.width, b.height)),
            CanonicalBlock::Height => height.as_ref().map(|b| (b.width, b.height)),
            CanonicalBlock::Light => light.as_ref().map(|b| (b.width, b.height)),
        }
        .ok_or_else(|| Vk4Error::UnknownBlock(sections.canonical.name().to_string()))?;

        debug!(image_width, image_height, "Container assembled");
        Ok(Self {
            header,
            offsets,
            measurement_conditions,
            string_data,
            rgb_peak,
            rgb_light,
            light,
            height,
            image_width,
            image_height,
        })
    }

    /// Opens a file and decodes it.
    pub fn decode_file<P: AsRef<Path>>(path: P, sections: SectionSet) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Decoding VK4 file");
        let file = File::open(path)?;
        Self::decode(BufReader::new(file), sections)
    }

    /// Image width from the canonical block.
    pub fn width(&self) -> u32 {
        self.image_width
    }

    /// Image height from the canonical block.
    pub fn height(&self) -> u32 {
        self.image_height
    }

    /// Looks up a decoded section by name. Returns `None` for sections that
    /// were not requested or that this decoder does not materialize
    /// (thumbnails, assembly info, line data).
    pub fn section(&self, kind: SectionKind) -> Option<SectionRef<'_>> {
        match kind {
            SectionKind::MeasurementConditions => Some(SectionRef::MeasurementConditions(
                &self.measurement_conditions,
            )),
            SectionKind::StringData => Some(SectionRef::Strings(&self.string_data)),
            SectionKind::ColorPeak => self.rgb_peak.as_ref().map(SectionRef::Color),
            SectionKind::ColorLight => self.rgb_light.as_ref().map(SectionRef::Color),
            SectionKind::Light => self.light.as_ref().map(SectionRef::Gray),
            SectionKind::Height => self.height.as_ref().map(SectionRef::Gray),
            _ => None,
        }
    }

    /// The decoded color block for a capture mode, or `UnknownBlock` if it
    /// was not part of the decode.
    pub fn color_block(&self, selector: ColorSelector) -> Result<&ColorPixelBlock> {
        let block = match selector {
            ColorSelector::Peak => self.rgb_peak.as_ref(),
            ColorSelector::Light => self.rgb_light.as_ref(),
        };
        block.ok_or_else(|| Vk4Error::UnknownBlock(selector.name().to_string()))
    }

    /// The decoded grayscale block for a map, or `UnknownBlock` if it was not
    /// part of the decode.
    pub fn gray_block(&self, selector: GraySelector) -> Result<&GrayPixelBlock> {
        let block = match selector {
            GraySelector::Light => self.light.as_ref(),
            GraySelector::Height => self.height.as_ref(),
        };
        block.ok_or_else(|| Vk4Error::UnknownBlock(selector.name().to_string()))
    }

    /// Per-pixel triples where the requested channel keeps its source value
    /// and the other two channels are zero, in row-major pixel order.
    pub fn single_channel_values(
        &self,
        channel: Channel,
        selector: ColorSelector,
    ) -> Result<Vec<[u8; 3]>> {
        let block = self.color_block(selector)?;
        let idx = channel.index();
        let mut values = vec![[0u8; 3]; block.data.len()];
        for (out, px) in values.iter_mut().zip(&block.data) {
            out[idx] = px[idx];
        }
        Ok(values)
    }
}
