// colour.rs
// Author: Dustin Pilgrim
// License: MIT
//
// Colour maths for the read mode overlay.
// Packed format: 0xAARRGGBB

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ColourError;

/// Alpha of both overlay layers at brightness 0. Each brightness step removes one.
pub const BASE_ALPHA: i32 = 150;

/// Alpha forced onto solid UI swatches.
pub const BUTTON_ALPHA: u8 = 0xFF;

/// A swatch brighter than this wants dark text on top of it.
pub const VERY_LIGHT_LUMA: u32 = 200;

/// A background darker than this wants light text on top of it.
pub const DARK_LUMA: u32 = 128;

// Rec. 601 weights scaled by 1000 so thresholds compare without float error.
const LUMA_R: u32 = 299;
const LUMA_G: u32 = 587;
const LUMA_B: u32 = 114;
const LUMA_SCALE: u32 = 1000;

#[inline]
pub fn a(argb: u32) -> u8 { ((argb >> 24) & 0xFF) as u8 }
#[inline]
pub fn r(argb: u32) -> u8 { ((argb >> 16) & 0xFF) as u8 }
#[inline]
pub fn g(argb: u32) -> u8 { ((argb >> 8) & 0xFF) as u8 }
#[inline]
pub fn b(argb: u32) -> u8 { (argb & 0xFF) as u8 }

#[inline]
fn clamp_u8(v: i32) -> u8 {
    if v < 0 { 0 } else if v > 255 { 255 } else { v as u8 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Takes the low 24 bits; any alpha byte is ignored.
    pub const fn from_u32(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Parses exactly `#RRGGBB`. An alpha byte is an error, not dropped.
    pub fn parse(s: &str) -> Result<Self, ColourError> {
        if s.trim().len() != 7 {
            return Err(ColourError::Format {
                input: s.to_string(),
                reason: "colour must be #RRGGBB",
            });
        }
        parse_hex(s).map(Self::from_u32)
    }

    /// Perceptual luma in 0.0..=255.0.
    pub fn luma(self) -> f64 {
        self.luma_milli() as f64 / LUMA_SCALE as f64
    }

    fn luma_milli(self) -> u32 {
        LUMA_R * self.r as u32 + LUMA_G * self.g as u32 + LUMA_B * self.b as u32
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// ARGB value with an unclamped alpha.
///
/// `a` holds whatever the overlay formula produced, which may sit outside
/// 0..=255. Packing keeps only its low byte, the same as shifting an int
/// into the top of a 32-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Argb {
    pub a: i32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Argb {
    pub const fn new(a: i32, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn with_alpha(a: i32, rgb: Rgb) -> Self {
        Self::new(a, rgb.r, rgb.g, rgb.b)
    }

    pub const fn opaque(rgb: Rgb) -> Self {
        Self::with_alpha(BUTTON_ALPHA as i32, rgb)
    }

    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    pub const fn from_u32(v: u32) -> Self {
        Self {
            a: ((v >> 24) & 0xFF) as i32,
            r: ((v >> 16) & 0xFF) as u8,
            g: ((v >> 8) & 0xFF) as u8,
            b: (v & 0xFF) as u8,
        }
    }

    pub const fn to_u32(self) -> u32 {
        ((self.a as u32) << 24)
            | ((self.r as u32) << 16)
            | ((self.g as u32) << 8)
            | (self.b as u32)
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex_string(self.to_u32()))
    }
}

/// Tint colour for the overlay.
///
/// Intensity is taken off the blue channel (clamped at zero) while red and
/// green pass through. Alpha is `BASE_ALPHA - brightness` and is left
/// unclamped. No input validation happens here.
pub fn adjust_colour(base: Rgb, intensity: i32, brightness: i32) -> Argb {
    let blue = clamp_u8((base.b as i32).saturating_sub(intensity));
    Argb::new(BASE_ALPHA.wrapping_sub(brightness), base.r, base.g, blue)
}

/// The black dimming wash painted under the tint.
pub fn dim_colour(brightness: i32) -> Argb {
    Argb::with_alpha(BASE_ALPHA.wrapping_sub(brightness), Rgb::BLACK)
}

pub fn is_very_light(colour: Rgb) -> bool {
    colour.luma_milli() > VERY_LIGHT_LUMA * LUMA_SCALE
}

pub fn is_colour_dark(colour: Rgb) -> bool {
    colour.luma_milli() < DARK_LUMA * LUMA_SCALE
}

/// Opaque swatch colour for a colour-picker button.
pub fn to_button_colour(hex: &str) -> Result<Argb, ColourError> {
    Rgb::parse(hex).map(Argb::opaque)
}

/// Text colour to draw on top of a button swatch.
pub fn button_text_colour(swatch: Rgb) -> Rgb {
    if is_very_light(swatch) { Rgb::BLACK } else { Rgb::WHITE }
}

/// Label colour against a container background.
pub fn label_colour(background: Rgb) -> Rgb {
    if is_colour_dark(background) { Rgb::WHITE } else { Rgb::BLACK }
}

/// Formats as `#AARRGGBB`.
pub fn hex_string(v: u32) -> String {
    format!("#{:02X}{:02X}{:02X}{:02X}", a(v), r(v), g(v), b(v))
}

/// Parses `#RRGGBB` (alpha forced to 0xFF) or `#AARRGGBB`.
pub fn parse_hex(s: &str) -> Result<u32, ColourError> {
    let input = s;
    let s = s.trim();

    let fail = |reason: &'static str| ColourError::Format {
        input: input.to_string(),
        reason,
    };

    let hex = s.strip_prefix('#').ok_or_else(|| fail("colour must start with #"))?;

    if !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(fail("invalid hex digit"));
    }

    let v = match hex.len() {
        6 => 0xFF00_0000 | u32::from_str_radix(hex, 16).map_err(|_| fail("invalid hex colour"))?,
        8 => u32::from_str_radix(hex, 16).map_err(|_| fail("invalid hex colour"))?,
        _ => return Err(fail("colour must be 6 or 8 hex digits (RRGGBB or AARRGGBB)")),
    };

    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_zero_intensity_keeps_rgb() {
        let c = Rgb::new(12, 200, 99);
        let out = adjust_colour(c, 0, 50);
        assert_eq!(out.rgb(), c);
        assert_eq!(out.a, 100);
    }

    #[test]
    fn adjust_clamps_channels_at_zero() {
        for intensity in 0..=100 {
            for brightness in [0, 50, 100] {
                let out = adjust_colour(Rgb::new(10, 0, 30), intensity, brightness);
                assert!(out.b <= 30);
                assert_eq!(out.a, 150 - brightness);
            }
        }
        assert_eq!(adjust_colour(Rgb::new(0, 0, 30), 100, 0).b, 0);
    }

    #[test]
    fn adjust_reduces_blue_only() {
        let out = adjust_colour(Rgb::new(0xF5, 0xF5, 0xDC), 50, 30);
        assert_eq!(out, Argb::new(120, 245, 245, 170));
    }

    #[test]
    fn alpha_is_not_clamped() {
        assert_eq!(adjust_colour(Rgb::WHITE, 0, 200).a, -50);
        assert_eq!(adjust_colour(Rgb::WHITE, 0, -200).a, 350);
        assert_eq!(dim_colour(-200).a, 350);
    }

    #[test]
    fn adjust_is_total() {
        let out = adjust_colour(Rgb::new(1, 2, 3), i32::MIN, i32::MIN);
        assert_eq!(out.b, 255);
        let out = adjust_colour(Rgb::new(1, 2, 3), i32::MAX, i32::MAX);
        assert_eq!(out.b, 0);
    }

    #[test]
    fn packing_keeps_low_alpha_byte() {
        // -10 packs like 0xF6, 300 packs like 0x2C
        assert_eq!(Argb::new(-10, 1, 2, 3).to_u32(), 0xF601_0203);
        assert_eq!(Argb::new(300, 1, 2, 3).to_u32(), 0x2C01_0203);
    }

    #[test]
    fn very_light_boundaries() {
        assert!(is_very_light(Rgb::WHITE));
        assert!(!is_very_light(Rgb::BLACK));
        assert!(!is_very_light(Rgb::new(200, 200, 200)));
        assert!(is_very_light(Rgb::new(201, 201, 201)));
    }

    #[test]
    fn dark_boundaries() {
        assert!(is_colour_dark(Rgb::BLACK));
        assert!(!is_colour_dark(Rgb::WHITE));
        assert!(is_colour_dark(Rgb::new(127, 127, 127)));
        assert!(!is_colour_dark(Rgb::new(128, 128, 128)));
    }

    #[test]
    fn mid_grey_is_neither_light_nor_dark() {
        let grey = Rgb::new(160, 160, 160);
        assert!(!is_very_light(grey));
        assert!(!is_colour_dark(grey));
        assert_eq!(button_text_colour(grey), Rgb::WHITE);
        assert_eq!(label_colour(grey), Rgb::BLACK);
    }

    #[test]
    fn luma_matches_weights() {
        assert!((Rgb::new(255, 0, 0).luma() - 76.245).abs() < 1e-9);
        assert!((Rgb::WHITE.luma() - 255.0).abs() < 1e-9);
    }

    #[test]
    fn hex_string_is_zero_padded() {
        assert_eq!(hex_string(0x0102_0304), "#01020304");
        assert_eq!(hex_string(0), "#00000000");
        assert_eq!(hex_string(0xFFF5_F5DC), "#FFF5F5DC");
    }

    #[test]
    fn hex_round_trip() {
        for v in [0u32, 1, 0x8000_0000, 0xFFFF_FFFF, 0x1234_5678, 0x00AB_CDEF] {
            assert_eq!(parse_hex(&hex_string(v)), Ok(v));
        }
    }

    #[test]
    fn parse_six_digits_forces_alpha() {
        assert_eq!(parse_hex("#7F7F7F"), Ok(0xFF7F_7F7F));
        assert_eq!(parse_hex("  #ff5733 "), Ok(0xFFFF_5733));
    }

    #[test]
    fn rgb_parse_wants_six_digits() {
        assert_eq!(Rgb::parse(" #ff5733 "), Ok(Rgb::new(0xFF, 0x57, 0x33)));
        for bad in ["#00FF5733", "#FF573", "FF5733", "#FF5733 0"] {
            assert!(
                matches!(Rgb::parse(bad), Err(ColourError::Format { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["", "#", "7F7F7F", "#7F7F7", "#GGGGGG", "#+FFFFF", "#7F7F7F7F7F"] {
            assert!(
                matches!(parse_hex(bad), Err(ColourError::Format { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn button_colour_is_opaque() {
        let c = to_button_colour("#F5F5DC").unwrap();
        assert_eq!(c.to_u32(), 0xFFF5_F5DC);
        assert_eq!(button_text_colour(c.rgb()), Rgb::BLACK);
        assert!(to_button_colour("beige").is_err());
        assert!(to_button_colour("#FFF5F5DC").is_err());
    }

    #[test]
    fn label_on_dark_background_is_white() {
        assert_eq!(label_colour(Rgb::new(0x70, 0x42, 0x14)), Rgb::WHITE);
    }
}
