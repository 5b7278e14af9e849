//! File header and section offset table decoding.
//!
//! A VK4 file opens with a 12-byte header (extension tag, DLL version, file
//! type code) followed immediately by a table of 14 `u32` offsets locating
//! every other section in the file. All later decoding is random access keyed
//! by these offsets.

use std::io::{Read, Seek};

use tracing::debug;

use crate::vk4::error::Result;
use crate::vk4::reader::ByteReader;

/// Byte position of the offset table, immediately after the file header.
pub const OFFSET_TABLE_POSITION: u64 = 12;

/// Size in bytes of the offset table including its two 8-byte reserved runs.
pub const OFFSET_TABLE_SIZE: u64 = 14 * 4 + 16;

/// The fixed 12 bytes at the start of every VK4 file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// 4-byte magic/extension tag, kept raw. The vendor file is trusted, so
    /// the tag is recorded but not validated.
    pub extension: [u8; 4],
    pub dll_version: u32,
    pub file_type: u32,
}

impl FileHeader {
    pub fn decode<R: Read + Seek>(reader: &mut ByteReader<R>) -> Result<Self> {
        reader.seek_to(0)?;
        let tag = reader.read_bytes(4)?;
        let mut extension = [0u8; 4];
        extension.copy_from_slice(&tag);
        let dll_version = reader.read_u32()?;
        let file_type = reader.read_u32()?;
        debug!(dll_version, file_type, "Decoded file header");
        Ok(Self {
            extension,
            dll_version,
            file_type,
        })
    }
}

/// Names for the 14 sections an offset table can locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    MeasurementConditions,
    ColorPeak,
    ColorLight,
    Light,
    Height,
    ColorPeakThumbnail,
    ColorThumbnail,
    LightThumbnail,
    HeightThumbnail,
    AssemblyInfo,
    LineMeasure,
    LineThickness,
    StringData,
    Reserved,
}

/// The decoded offset table. Offsets are byte positions into the source file;
/// the format leaves an entry at 0 when a section is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetTable {
    pub measurement_conditions: u32,
    pub color_peak: u32,
    pub color_light: u32,
    pub light: u32,
    pub height: u32,
    pub color_peak_thumbnail: u32,
    pub color_thumbnail: u32,
    pub light_thumbnail: u32,
    pub height_thumbnail: u32,
    pub assembly_info: u32,
    pub line_measure: u32,
    pub line_thickness: u32,
    pub string_data: u32,
    pub reserved: u32,
}

impl OffsetTable {
    /// Reads the 14 offset entries in their fixed order. The format reserves
    /// 8 bytes after the `light` entry and 8 more after the `height` entry;
    /// those bytes are skipped whatever their content. No cross-entry
    /// consistency check is made.
    pub fn decode<R: Read + Seek>(reader: &mut ByteReader<R>) -> Result<Self> {
        reader.seek_to(OFFSET_TABLE_POSITION)?;

        let measurement_conditions = reader.read_u32()?;
        let color_peak = reader.read_u32()?;
        let color_light = reader.read_u32()?;
        let light = reader.read_u32()?;
        reader.skip(8)?;
        let height = reader.read_u32()?;
        reader.skip(8)?;
        let color_peak_thumbnail = reader.read_u32()?;
        let color_thumbnail = reader.read_u32()?;
        let light_thumbnail = reader.read_u32()?;
        let height_thumbnail = reader.read_u32()?;
        let assembly_info = reader.read_u32()?;
        let line_measure = reader.read_u32()?;
        let line_thickness = reader.read_u32()?;
        let string_data = reader.read_u32()?;
        let reserved = reader.read_u32()?;

        let table = Self {
            measurement_conditions,
            color_peak,
            color_light,
            light,
            height,
            color_peak_thumbnail,
            color_thumbnail,
            light_thumbnail,
            height_thumbnail,
            assembly_info,
            line_measure,
            line_thickness,
            string_data,
            reserved,
        };
        debug!(
            measurement_conditions,
            color_peak, color_light, light, height, string_data, "Decoded offset table"
        );
        Ok(table)
    }

    /// Offset lookup keyed by section name.
    pub fn offset(&self, kind: SectionKind) -> u32 {
        match kind {
            SectionKind::MeasurementConditions => self.measurement_conditions,
            SectionKind::ColorPeak => self.color_peak,
            SectionKind::ColorLight => self.color_light,
            SectionKind::Light => self.light,
            SectionKind::Height => self.height,
            SectionKind::ColorPeakThumbnail => self.color_peak_thumbnail,
            SectionKind::ColorThumbnail => self.color_thumbnail,
            SectionKind::LightThumbnail => self.light_thumbnail,
            SectionKind::HeightThumbnail => self.height_thumbnail,
            SectionKind::AssemblyInfo => self.assembly_info,
            SectionKind::LineMeasure => self.line_measure,
            SectionKind::LineThickness => self.line_thickness,
            SectionKind::StringData => self.string_data,
            SectionKind::Reserved => self.reserved,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{FileHeader, OffsetTable, SectionKind, OFFSET_TABLE_POSITION, OFFSET_TABLE_SIZE};
    use crate::vk4::error::Vk4Error;
    use crate::vk4::reader::ByteReader;

    /// 12-byte header plus a table whose entries are 100, 200, ... 1400, with
    /// garbage filling both reserved runs.
    fn synthetic_prefix() -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"VK4_");
        buf.extend_from_slice(&2u32.to_le_bytes());
        buf.extend_from_slice(&7u32.to_le_bytes());
        for entry in 1..=4u32 {
            buf.extend_from_slice(&(entry * 100).to_le_bytes());
        }
        buf.extend_from_slice(&[0xab; 8]);
        buf.extend_from_slice(&500u32.to_le_bytes());
        buf.extend_from_slice(&[0xcd; 8]);
        for entry in 6..=14u32 {
            buf.extend_from_slice(&(entry * 100).to_le_bytes());
        }
        buf
    }

    #[test]
    fn header_fields_decode_in_order() {
        let mut reader = ByteReader::new(Cursor::new(synthetic_prefix()));
        let header = FileHeader::decode(&mut reader).unwrap();

        assert_eq!(&header.extension, b"VK4_");
        assert_eq!(header.dll_version, 2);
        assert_eq!(header.file_type, 7);
    }

    #[test]
    fn offset_table_round_trips_known_values() {
        let mut reader = ByteReader::new(Cursor::new(synthetic_prefix()));
        let table = OffsetTable::decode(&mut reader).unwrap();

        assert_eq!(table.measurement_conditions, 100);
        assert_eq!(table.color_peak, 200);
        assert_eq!(table.color_light, 300);
        assert_eq!(table.light, 400);
        assert_eq!(table.height, 500);
        assert_eq!(table.color_peak_thumbnail, 600);
        assert_eq!(table.color_thumbnail, 700);
        assert_eq!(table.light_thumbnail, 800);
        assert_eq!(table.height_thumbnail, 900);
        assert_eq!(table.assembly_info, 1000);
        assert_eq!(table.line_measure, 1100);
        assert_eq!(table.line_thickness, 1200);
        assert_eq!(table.string_data, 1300);
        assert_eq!(table.reserved, 1400);

        assert_eq!(
            reader.position().unwrap(),
            OFFSET_TABLE_POSITION + OFFSET_TABLE_SIZE
        );
    }

    #[test]
    fn gap_bytes_are_ignored_regardless_of_content() {
        let mut zeroed = synthetic_prefix();
        for gap in [28..36usize, 40..48usize] {
            zeroed[gap].fill(0);
        }

        let from_garbage =
            OffsetTable::decode(&mut ByteReader::new(Cursor::new(synthetic_prefix()))).unwrap();
        let from_zeroes = OffsetTable::decode(&mut ByteReader::new(Cursor::new(zeroed))).unwrap();
        assert_eq!(from_garbage, from_zeroes);
    }

    #[test]
    fn truncation_boundary() {
        let full = synthetic_prefix();
        let end = (OFFSET_TABLE_POSITION + OFFSET_TABLE_SIZE) as usize;
        assert_eq!(full.len(), end);

        let mut reader = ByteReader::new(Cursor::new(full[..end - 1].to_vec()));
        assert!(matches!(
            OffsetTable::decode(&mut reader),
            Err(Vk4Error::Truncated)
        ));

        let mut reader = ByteReader::new(Cursor::new(full));
        assert!(OffsetTable::decode(&mut reader).is_ok());
    }

    #[test]
    fn lookup_by_section_kind() {
        let mut reader = ByteReader::new(Cursor::new(synthetic_prefix()));
        let table = OffsetTable::decode(&mut reader).unwrap();

        assert_eq!(table.offset(SectionKind::MeasurementConditions), 100);
        assert_eq!(table.offset(SectionKind::Height), 500);
        assert_eq!(table.offset(SectionKind::StringData), 1300);
        assert_eq!(table.offset(SectionKind::Reserved), 1400);
    }
}
