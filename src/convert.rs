//! RGB to CIE-Lab conversion and hex parsing.
//!
//! The conversion pipeline is the classic sRGB (D65) one: gamma-expand each
//! channel, project through the fixed sRGB-to-XYZ matrix, normalize against
//! the D65 reference white, then apply the Lab nonlinearity. All arithmetic
//! is `f32`; the tree stores coordinates produced by this exact function, so
//! queries converted the same way compare exactly.

use crate::color::{ColorParseError, Lab, Rgb};

/// D65 reference white point in XYZ.
const D65_X: f32 = 95.047;
const D65_Y: f32 = 100.0;
const D65_Z: f32 = 108.883;

/// Threshold between the linear and cube-root segments of the Lab curve.
const LAB_EPSILON: f32 = 0.008856;

/// Convert an 8-bit RGB triple to its CIE-Lab coordinate.
///
/// Total for all inputs; there are no error paths.
///
/// # Examples
///
/// ```
/// use color_names::convert::rgb_to_lab;
///
/// let black = rgb_to_lab(0, 0, 0);
/// assert_eq!(black.l, 0.0);
///
/// let white = rgb_to_lab(255, 255, 255);
/// assert!((white.l - 100.0).abs() < 0.01);
/// ```
#[must_use]
pub fn rgb_to_lab(red: u8, green: u8, blue: u8) -> Lab {
    let r = gamma_expand(f32::from(red) / 255.0) * 100.0;
    let g = gamma_expand(f32::from(green) / 255.0) * 100.0;
    let b = gamma_expand(f32::from(blue) / 255.0) * 100.0;

    // sRGB -> XYZ, then normalize against the D65 white point.
    let x = lab_curve((r * 0.412_453 + g * 0.357_580 + b * 0.180_423) / D65_X);
    let y = lab_curve((r * 0.212_671 + g * 0.715_160 + b * 0.072_169) / D65_Y);
    let z = lab_curve((r * 0.019_334 + g * 0.119_193 + b * 0.950_227) / D65_Z);

    Lab {
        l: 116.0 * y - 16.0,
        a: 500.0 * (x - y),
        b: 200.0 * (y - z),
    }
}

/// sRGB gamma expansion for one normalized channel.
fn gamma_expand(v: f32) -> f32 {
    if v > 0.04045 {
        ((v + 0.055) / 1.055).powf(2.4)
    } else {
        v / 12.92
    }
}

/// The piecewise Lab nonlinearity for one normalized XYZ axis.
fn lab_curve(v: f32) -> f32 {
    if v > LAB_EPSILON {
        v.cbrt()
    } else {
        v * 7.787 + 16.0 / 116.0
    }
}

/// Parse a `#RRGGBB` hex string into an RGB triple.
///
/// The accepted format is strict: exactly a `#` followed by six hexadecimal
/// digits. Shorthand (`#RGB`) and bare digits (`RRGGBB`) are rejected so a
/// malformed palette source fails loudly instead of producing a silently
/// wrong color.
///
/// # Errors
///
/// Returns [`ColorParseError::InvalidHex`] for any other input.
///
/// # Examples
///
/// ```
/// use color_names::convert::hex_to_rgb;
/// use color_names::color::Rgb;
///
/// assert_eq!(hex_to_rgb("#FF0000").unwrap(), Rgb::new(255, 0, 0));
/// assert!(hex_to_rgb("FF0000").is_err());
/// assert!(hex_to_rgb("#FF00").is_err());
/// ```
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorParseError> {
    let digits = hex
        .strip_prefix('#')
        .ok_or_else(|| ColorParseError::InvalidHex(hex.to_string()))?;

    // Byte length check is only sound on ASCII input.
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(ColorParseError::InvalidHex(hex.to_string()));
    }

    let parse = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| ColorParseError::InvalidHex(hex.to_string()))
    };

    Ok(Rgb::new(parse(0..2)?, parse(2..4)?, parse(4..6)?))
}
