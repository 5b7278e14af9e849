//! Synthetic VK4 byte buffers for tests.
//!
//! Sections are built individually so decoder tests can place them at
//! arbitrary offsets; [`SyntheticVk4`] assembles a complete file with a
//! consistent offset table for container-level tests.

use crate::vk4::blocks::PALETTE_SIZE;

fn push_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// A 312-byte measurement conditions record whose nth field holds
/// `seed + n - 1`, with 0xEE filling the three reserved runs.
pub(crate) fn conditions_bytes(seed: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut next = seed;
    let mut fields = |buf: &mut Vec<u8>, count: u32| {
        for _ in 0..count {
            push_u32(buf, next);
            next += 1;
        }
    };

    fields(&mut buf, 21);
    buf.extend_from_slice(&[0xee; 12]);
    fields(&mut buf, 21);
    buf.extend_from_slice(&[0xee; 20]);
    fields(&mut buf, 1);
    buf.extend_from_slice(&[0xee; 4]);
    fields(&mut buf, 26);
    buf
}

/// An RGB block: 5-field header (bit depth 24, no compression) plus pixels.
pub(crate) fn color_block_bytes(width: u32, height: u32, pixels: &[[u8; 3]]) -> Vec<u8> {
    assert_eq!(pixels.len() as u32, width * height);
    let mut buf = Vec::new();
    push_u32(&mut buf, width);
    push_u32(&mut buf, height);
    push_u32(&mut buf, 24);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, width * height * 3);
    for px in pixels {
        buf.extend_from_slice(px);
    }
    buf
}

fn gray_block_header(buf: &mut Vec<u8>, width: u32, height: u32, bit_depth: u32, data_size: u32) {
    push_u32(buf, width);
    push_u32(buf, height);
    push_u32(buf, bit_depth);
    push_u32(buf, 0);
    push_u32(buf, data_size);
    push_u32(buf, 0);
    push_u32(buf, 4095);
    // Ramp palette, distinguishable from zeroed sample data.
    for i in 0..PALETTE_SIZE {
        buf.push((i % 256) as u8);
    }
}

/// A light-intensity block with u16 samples.
pub(crate) fn gray_block_bytes_u16(width: u32, height: u32, bit_depth: u32, samples: &[u16]) -> Vec<u8> {
    assert_eq!(samples.len() as u32, width * height);
    let mut buf = Vec::new();
    gray_block_header(&mut buf, width, height, bit_depth, width * height * 2);
    for sample in samples {
        buf.extend_from_slice(&sample.to_le_bytes());
    }
    buf
}

/// A height block with i32 samples.
pub(crate) fn gray_block_bytes_i32(width: u32, height: u32, bit_depth: u32, samples: &[i32]) -> Vec<u8> {
    assert_eq!(samples.len() as u32, width * height);
    let mut buf = Vec::new();
    gray_block_header(&mut buf, width, height, bit_depth, width * height * 4);
    for sample in samples {
        buf.extend_from_slice(&sample.to_le_bytes());
    }
    buf
}

/// A string data section: two length-prefixed UTF-16LE strings.
pub(crate) fn string_data_bytes(title: &str, lens_name: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    for text in [title, lens_name] {
        let units: Vec<u16> = text.encode_utf16().collect();
        push_u32(&mut buf, units.len() as u32);
        for unit in units {
            buf.extend_from_slice(&unit.to_le_bytes());
        }
    }
    buf
}

/// Assembles a complete synthetic VK4 file. Sections are laid out after the
/// 84-byte prefix in the order conditions, strings, peak, color light, light
/// intensity, height; omitted blocks get offset table entries of 0.
pub(crate) struct SyntheticVk4 {
    pub conditions_seed: u32,
    pub title: &'static str,
    pub lens_name: &'static str,
    pub peak: Option<(u32, u32, Vec<[u8; 3]>)>,
    pub color_light: Option<(u32, u32, Vec<[u8; 3]>)>,
    pub light: Option<(u32, u32, Vec<u16>)>,
    pub height: Option<(u32, u32, Vec<i32>)>,
}

impl Default for SyntheticVk4 {
    fn default() -> Self {
        Self {
            conditions_seed: 1,
            title: "synthetic capture",
            lens_name: "test lens",
            peak: None,
            color_light: None,
            light: None,
            height: None,
        }
    }
}

impl SyntheticVk4 {
    pub fn build(&self) -> Vec<u8> {
        let mut sections: Vec<Vec<u8>> = Vec::new();
        // Header (12) + table entries (56) + two reserved runs (16).
        let mut cursor = 84u32;
        let mut place = |section: Vec<u8>| -> u32 {
            let offset = cursor;
            cursor += section.len() as u32;
            sections.push(section);
            offset
        };

        let conditions = place(conditions_bytes(self.conditions_seed));
        let strings = place(string_data_bytes(self.title, self.lens_name));
        let peak = self
            .peak
            .as_ref()
            .map(|(w, h, px)| place(color_block_bytes(*w, *h, px)))
            .unwrap_or(0);
        let color_light = self
            .color_light
            .as_ref()
            .map(|(w, h, px)| place(color_block_bytes(*w, *h, px)))
            .unwrap_or(0);
        let light = self
            .light
            .as_ref()
            .map(|(w, h, s)| place(gray_block_bytes_u16(*w, *h, 16, s)))
            .unwrap_or(0);
        let height = self
            .height
            .as_ref()
            .map(|(w, h, s)| place(gray_block_bytes_i32(*w, *h, 32, s)))
            .unwrap_or(0);

        let mut buf = Vec::new();
        buf.extend_from_slice(b"VK4_");
        push_u32(&mut buf, 1);
        push_u32(&mut buf, 0);

        push_u32(&mut buf, conditions);
        push_u32(&mut buf, peak);
        push_u32(&mut buf, color_light);
        push_u32(&mut buf, light);
        buf.extend_from_slice(&[0xab; 8]);
        push_u32(&mut buf, height);
        buf.extend_from_slice(&[0xab; 8]);
        // Thumbnail, assembly and line entries: absent.
        for _ in 0..7 {
            push_u32(&mut buf, 0);
        }
        push_u32(&mut buf, strings);
        push_u32(&mut buf, 0);
        assert_eq!(buf.len(), 84);

        for section in sections {
            buf.extend_from_slice(&section);
        }
        buf
    }
}
