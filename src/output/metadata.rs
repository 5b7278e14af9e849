//! Measurement metadata formatting.
//!
//! Produces the ordered name/value pairs attached to `hcsv` output, scaled
//! the way the vendor's own CSV export displays them (magnifications in
//! tenths, apertures in thousandths, calibrations in nanometers, and so on).

use crate::vk4::Vk4Container;

/// Display-scaled metadata pairs for one decoded file.
pub fn file_metadata(container: &Vk4Container, input_name: &str) -> Vec<(String, String)> {
    let mc = &container.measurement_conditions;
    let strings = &container.string_data;
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut push = |name: &str, value: String| pairs.push((name.to_string(), value));

    push("File name", input_name.to_string());
    push("Title", strings.title.clone());
    push(
        "Measurement date",
        format!("{}\\{}\\{}", mc.month, mc.day, mc.year),
    );
    push(
        "Measurement time",
        format!("{}:{:02}:{:02}", mc.hour, mc.minute, mc.second),
    );
    push(
        "Objective lens",
        format!("{} {}x", strings.lens_name, mc.lens_magnification as f64 / 10.0),
    );
    push(
        "Numerical Aperture",
        format!("{}", mc.numerical_aperture as f64 / 1000.0),
    );
    push("Pitch (um)", format!("{}", mc.pitch as f64 / 1000.0));
    push(
        "Z measurement distance (um)",
        format!("{}", mc.distance as f64 / 1000.0),
    );
    push("Brightness 1", mc.pmt_gain.to_string());
    push(
        "Brightness 2",
        if mc.pmt_gain_2 == 0 {
            "---".to_string()
        } else {
            mc.pmt_gain_2.to_string()
        },
    );
    push("ND filter (%)", (mc.nd_filter * 30).to_string());
    push("Optical zoom", format!("{}", mc.optical_zoom as f64 / 10.0));
    push("Line count", mc.number_of_lines.to_string());
    // Line positions beyond the first live in reserved bytes the decoder
    // does not interpret.
    push(
        "Line position1",
        if mc.number_of_lines == 0 {
            "---".to_string()
        } else {
            mc.line0_position.to_string()
        },
    );
    push("Camera gain (db)", (mc.camera_gain * 6).to_string());
    push("Shutter speed", mc.shutter_speed.to_string());
    push(
        "White balance mode",
        if mc.white_balance_mode == 1 {
            "Auto".to_string()
        } else {
            mc.white_balance_mode.to_string()
        },
    );
    push("White balance R", mc.white_balance_red.to_string());
    push("White balance B", mc.white_balance_blue.to_string());
    push(
        "Gamma correction value",
        format!("{}", mc.gamma as f64 / 100.0),
    );
    push(
        "Gamma offset (%)",
        format!("{}", mc.gamma_correction_offset as f64 / 65536.0),
    );
    push(
        "XY calibration (nm/pixel)",
        format!("{}", mc.x_length_per_pixel as f64 / 1000.0),
    );
    push(
        "Z calibration (nm/digit)",
        format!("{}", mc.z_length_per_digit as f64 / 1000.0),
    );
    push("Width", container.width().to_string());
    push("Height", container.height().to_string());

    pairs
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::file_metadata;
    use crate::vk4::fixtures::SyntheticVk4;
    use crate::vk4::{CanonicalBlock, SectionSet, Vk4Container};

    fn decoded() -> Vk4Container {
        let fixture = SyntheticVk4 {
            peak: Some((2, 1, vec![[0, 0, 0]; 2])),
            ..SyntheticVk4::default()
        };
        Vk4Container::decode(
            Cursor::new(fixture.build()),
            SectionSet::only(CanonicalBlock::ColorPeak),
        )
        .unwrap()
    }

    #[test]
    fn pairs_are_scaled_for_display() {
        let container = decoded();
        let pairs = file_metadata(&container, "sample.vk4");
        let get = |name: &str| -> &str {
            &pairs
                .iter()
                .find(|(n, _)| n == name)
                .unwrap_or_else(|| panic!("missing pair {name}"))
                .1
        };

        assert_eq!(get("File name"), "sample.vk4");
        assert_eq!(get("Title"), "synthetic capture");
        // Seeded conditions: month=3, day=4, year=2.
        assert_eq!(get("Measurement date"), "3\\4\\2");
        // lens_magnification=22, pitch=18, optical_zoom=19.
        assert_eq!(get("Objective lens"), "test lens 2.2x");
        assert_eq!(get("Pitch (um)"), "0.018");
        assert_eq!(get("Optical zoom"), "1.9");
        // camera_gain=34, nd_filter=27.
        assert_eq!(get("Camera gain (db)"), "204");
        assert_eq!(get("ND filter (%)"), "810");
        assert_eq!(get("Width"), "2");
        assert_eq!(get("Height"), "1");
    }

    #[test]
    fn zero_pmt_gain_2_renders_as_dashes() {
        let container = decoded();
        let pairs = file_metadata(&container, "x");
        // Seeded pmt_gain_2=25, nonzero here; the zero case is the dash.
        assert_eq!(pairs.iter().find(|(n, _)| n == "Brightness 2").unwrap().1, "25");

        let mut zeroed = container;
        zeroed.measurement_conditions.pmt_gain_2 = 0;
        let pairs = file_metadata(&zeroed, "x");
        assert_eq!(pairs.iter().find(|(n, _)| n == "Brightness 2").unwrap().1, "---");
    }
}
