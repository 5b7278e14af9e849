//! Measurement conditions record decoding.
//!
//! The record is a fixed layout of 69 little-endian 32-bit fields with three
//! interior reserved runs (12, 20 and 4 bytes) that are skipped, not
//! interpreted. The format has no per-field length prefixes, so field order
//! here must match the file layout exactly: a single misordered or mis-sized
//! read silently corrupts every later field. The golden-buffer test below
//! pins the layout.

use std::io::{Read, Seek};

use tracing::debug;

use crate::vk4::error::Result;
use crate::vk4::offsets::OffsetTable;
use crate::vk4::reader::ByteReader;

/// Size in bytes of the record, reserved runs included.
pub const RECORD_SIZE: u64 = 69 * 4 + 12 + 20 + 4;

/// Capture settings recorded by the instrument. All values are raw instrument
/// units; display scaling (tenths of a magnification, picometers per digit,
/// and so on) is left to the metadata formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementConditions {
    pub size: u32,
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// Minutes east of UTC; the only signed field in the record.
    pub diff_from_utc: i32,
    pub image_attributes: u32,
    pub user_interface_mode: u32,
    pub color_composite_mode: u32,
    pub image_layer_number: u32,
    pub run_mode: u32,
    pub peak_mode: u32,
    pub sharpening_level: u32,
    pub speed: u32,
    pub distance: u32,
    pub pitch: u32,
    pub optical_zoom: u32,
    pub number_of_lines: u32,
    pub line0_position: u32,
    pub lens_magnification: u32,
    pub pmt_gain_mode: u32,
    pub pmt_gain: u32,
    pub pmt_gain_2: u32,
    pub pmt_offset: u32,
    pub nd_filter: u32,
    pub persist_count: u32,
    pub shutter_speed_mode: u32,
    pub shutter_speed: u32,
    pub white_balance_mode: u32,
    pub white_balance_red: u32,
    pub white_balance_blue: u32,
    pub camera_gain: u32,
    pub plane_compensation: u32,
    pub xy_length_unit: u32,
    pub z_length_unit: u32,
    pub xy_decimal_place: u32,
    pub z_decimal_place: u32,
    pub x_length_per_pixel: u32,
    pub y_length_per_pixel: u32,
    pub z_length_per_digit: u32,
    pub light_filter_type: u32,
    pub gamma_reverse: u32,
    pub gamma: u32,
    pub gamma_correction_offset: u32,
    pub ccd_bw_offset: u32,
    pub numerical_aperture: u32,
    pub head_type: u32,
    pub pmt_gain_3: u32,
    pub omit_color_image: u32,
    pub lens_id: u32,
    pub light_lut_mode: u32,
    pub light_lut_in0: u32,
    pub light_lut_in1: u32,
    pub light_lut_in2: u32,
    pub light_lut_in3: u32,
    pub light_lut_in4: u32,
    pub light_lut_out0: u32,
    pub light_lut_out1: u32,
    pub light_lut_out2: u32,
    pub light_lut_out3: u32,
    pub light_lut_out4: u32,
    pub roi_x: u32,
    pub roi_y: u32,
    pub roi_width: u32,
    pub roi_height: u32,
    pub frame_width: u32,
    pub frame_height: u32,
}

impl MeasurementConditions {
    /// Seeks to the record's offset table entry and reads every field in
    /// layout order.
    pub fn decode<R: Read + Seek>(
        offsets: &OffsetTable,
        reader: &mut ByteReader<R>,
    ) -> Result<Self> {
        reader.seek_to(offsets.measurement_conditions as u64)?;

        let size = reader.read_u32()?;
        let year = reader.read_u32()?;
        let month = reader.read_u32()?;
        let day = reader.read_u32()?;
        let hour = reader.read_u32()?;
        let minute = reader.read_u32()?;
        let second = reader.read_u32()?;
        let diff_from_utc = reader.read_i32()?;
        let image_attributes = reader.read_u32()?;
        let user_interface_mode = reader.read_u32()?;
        let color_composite_mode = reader.read_u32()?;
        let image_layer_number = reader.read_u32()?;
        let run_mode = reader.read_u32()?;
        let peak_mode = reader.read_u32()?;
        let sharpening_level = reader.read_u32()?;
        let speed = reader.read_u32()?;
        let distance = reader.read_u32()?;
        let pitch = reader.read_u32()?;
        let optical_zoom = reader.read_u32()?;
        let number_of_lines = reader.read_u32()?;
        let line0_position = reader.read_u32()?;
        reader.skip(12)?;
        let lens_magnification = reader.read_u32()?;
        let pmt_gain_mode = reader.read_u32()?;
        let pmt_gain = reader.read_u32()?;
        let pmt_gain_2 = reader.read_u32()?;
        let pmt_offset = reader.read_u32()?;
        let nd_filter = reader.read_u32()?;
        let persist_count = reader.read_u32()?;
        let shutter_speed_mode = reader.read_u32()?;
        let shutter_speed = reader.read_u32()?;
        let white_balance_mode = reader.read_u32()?;
        let white_balance_red = reader.read_u32()?;
        let white_balance_blue = reader.read_u32()?;
        let camera_gain = reader.read_u32()?;
        let plane_compensation = reader.read_u32()?;
        let xy_length_unit = reader.read_u32()?;
        let z_length_unit = reader.read_u32()?;
        let xy_decimal_place = reader.read_u32()?;
        let z_decimal_place = reader.read_u32()?;
        let x_length_per_pixel = reader.read_u32()?;
        let y_length_per_pixel = reader.read_u32()?;
        let z_length_per_digit = reader.read_u32()?;
        reader.skip(20)?;
        let light_filter_type = reader.read_u32()?;
        reader.skip(4)?;
        let gamma_reverse = reader.read_u32()?;
        let gamma = reader.read_u32()?;
        let gamma_correction_offset = reader.read_u32()?;
        let ccd_bw_offset = reader.read_u32()?;
        let numerical_aperture = reader.read_u32()?;
        let head_type = reader.read_u32()?;
        let pmt_gain_3 = reader.read_u32()?;
        let omit_color_image = reader.read_u32()?;
        let lens_id = reader.read_u32()?;
        let light_lut_mode = reader.read_u32()?;
        let light_lut_in0 = reader.read_u32()?;
        let light_lut_in1 = reader.read_u32()?;
        let light_lut_in2 = reader.read_u32()?;
        let light_lut_in3 = reader.read_u32()?;
        let light_lut_in4 = reader.read_u32()?;
        let light_lut_out0 = reader.read_u32()?;
        let light_lut_out1 = reader.read_u32()?;
        let light_lut_out2 = reader.read_u32()?;
        let light_lut_out3 = reader.read_u32()?;
        let light_lut_out4 = reader.read_u32()?;
        let roi_x = reader.read_u32()?;
        let roi_y = reader.read_u32()?;
        let roi_width = reader.read_u32()?;
        let roi_height = reader.read_u32()?;
        let frame_width = reader.read_u32()?;
        let frame_height = reader.read_u32()?;

        debug!(
            year,
            month, day, lens_magnification, z_length_per_digit, "Decoded measurement conditions"
        );

        Ok(Self {
            size,
            year,
            month,
            day,
            hour,
            minute,
            second,
            diff_from_utc,
            image_attributes,
            user_interface_mode,
            color_composite_mode,
            image_layer_number,
            run_mode,
            peak_mode,
            sharpening_level,
            speed,
            distance,
            pitch,
            optical_zoom,
            number_of_lines,
            line0_position,
            lens_magnification,
            pmt_gain_mode,
            pmt_gain,
            pmt_gain_2,
            pmt_offset,
            nd_filter,
            persist_count,
            shutter_speed_mode,
            shutter_speed,
            white_balance_mode,
            white_balance_red,
            white_balance_blue,
            camera_gain,
            plane_compensation,
            xy_length_unit,
            z_length_unit,
            xy_decimal_place,
            z_decimal_place,
            x_length_per_pixel,
            y_length_per_pixel,
            z_length_per_digit,
            light_filter_type,
            gamma_reverse,
            gamma,
            gamma_correction_offset,
            ccd_bw_offset,
            numerical_aperture,
            head_type,
            pmt_gain_3,
            omit_color_image,
            lens_id,
            light_lut_mode,
            light_lut_in0,
            light_lut_in1,
            light_lut_in2,
            light_lut_in3,
            light_lut_in4,
            light_lut_out0,
            light_lut_out1,
            light_lut_out2,
            light_lut_out3,
            light_lut_out4,
            roi_x,
            roi_y,
            roi_width,
            roi_height,
            frame_width,
            frame_height,
        })
    }
}
