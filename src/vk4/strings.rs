//! String data section decoding.
//!
//! The section holds two length-prefixed UTF-16LE strings: the capture title
//! and the objective lens name. Lengths count 16-bit code units.

use std::io::{Read, Seek};

use tracing::debug;

use crate::vk4::error::Result;
use crate::vk4::offsets::OffsetTable;
use crate::vk4::reader::ByteReader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringData {
    pub title: String,
    pub lens_name: String,
}

impl StringData {
    pub fn decode<R: Read + Seek>(
        offsets: &OffsetTable,
        reader: &mut ByteReader<R>,
    ) -> Result<Self> {
        reader.seek_to(offsets.string_data as u64)?;
        let title = read_utf16_field(reader)?;
        let lens_name = read_utf16_field(reader)?;
        debug!(title = %title, lens_name = %lens_name, "Decoded string data");
        Ok(Self { title, lens_name })
    }
}

fn read_utf16_field<R: Read + Seek>(reader: &mut ByteReader<R>) -> Result<String> {
    let length = reader.read_u32()? as usize;
    let units = reader.read_u16_vec(length)?;
    Ok(String::from_utf16_lossy(&units))
}
