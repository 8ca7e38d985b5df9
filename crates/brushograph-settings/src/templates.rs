//! Built-in maintenance sequences
//!
//! Motion blocks for the stock paint station: three color wells along the
//! front edge, a washing area near the origin and a parking spot at the back.
//! Every block starts with an empty line so it reads as a separate paragraph
//! in the output.

use regex::Regex;

/// Clearance move and feed setup emitted before the first source line
pub const HOMING_SEQUENCE: &str = include_str!("../templates/homing.gcode");

/// Pickup sequence for the first color well
pub const COLOR1_SEQUENCE: &str = include_str!("../templates/color1.gcode");

/// Pickup sequence for the edge color well
pub const COLOR3_SEQUENCE: &str = include_str!("../templates/color3.gcode");

/// Brush washing sequence
pub const WASHING_SEQUENCE: &str = include_str!("../templates/washing.gcode");

/// Final wash, park and program end emitted after the last source line
pub const ENDING_SEQUENCE: &str = include_str!("../templates/ending.gcode");

/// X distance between neighbouring color wells (mm)
pub const COLOR_WELL_PITCH: f64 = 45.0;

fn x_word_regex() -> &'static Regex {
    static X_WORD_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    X_WORD_REGEX
        .get_or_init(|| Regex::new(r"X(\s*)(-?\d+(?:\.\d+)?)").expect("invalid regex pattern"))
}

/// Shift every X word in a block by `dx`
///
/// Each value keeps its own number of decimals, and integers stay integers.
/// Whitespace between the letter and the value is preserved.
pub fn offset_x(block: &str, dx: f64) -> String {
    x_word_regex()
        .replace_all(block, |caps: &regex::Captures| {
            let space = &caps[1];
            let original = &caps[2];
            let Ok(value) = original.parse::<f64>() else {
                return caps[0].to_string();
            };
            let shifted = value + dx;
            let formatted = match original.split_once('.') {
                Some((_, decimals)) => format!("{:.*}", decimals.len(), shifted),
                None => format!("{}", shifted.round() as i64),
            };
            format!("X{}{}", space, formatted)
        })
        .into_owned()
}

/// Pickup sequence for the second color well, one pitch to the right of the first
pub fn color2_sequence() -> String {
    offset_x(COLOR1_SEQUENCE, COLOR_WELL_PITCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_preserves_precision() {
        assert_eq!(offset_x("G1 X40.102Y7.295Z0", 45.0), "G1 X85.102Y7.295Z0");
        assert_eq!(offset_x("G0 X41 Y5 F1200", 45.0), "G0 X86 Y5 F1200");
        assert_eq!(offset_x("G1 X 1.50 Y2", 1.0), "G1 X 2.50 Y2");
        assert_eq!(offset_x("G1 X-10 Y0", 4.0), "G1 X-6 Y0");
        assert_eq!(offset_x("; no x words here", 5.0), "; no x words here");
    }

    #[test]
    fn test_builtin_sequences_shape() {
        assert!(HOMING_SEQUENCE.starts_with('\n'));
        assert!(COLOR1_SEQUENCE.contains("; Color 1 picking sequence"));
        assert!(ENDING_SEQUENCE.contains("G0 X20 Y110 Z10 F500"));
        assert!(ENDING_SEQUENCE.trim_end().ends_with("; End program"));
        assert!(WASHING_SEQUENCE.contains("; Washing sequence (no color)"));
    }

    #[test]
    fn test_color2_is_shifted_color1() {
        let color2 = color2_sequence();
        assert_eq!(color2.lines().count(), COLOR1_SEQUENCE.lines().count());
        assert!(color2.contains("G0 X86 Y5 F1200"));
        assert!(color2.contains("G1 X85.102Y7.295Z0S800F1200"));
        // Y and comments are untouched.
        assert!(color2.contains("; Color 1 picking sequence"));
    }
}
