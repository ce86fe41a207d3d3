//! Hue, saturation and exposure rendering.
//!
//! The browser preview draws the image with a CSS filter chain
//! `hue-rotate(h) saturate(s) brightness(e)`. This module implements the
//! same color matrices from the W3C Filter Effects module so the exported
//! pixels match what the user saw. Preview and export both go through
//! [`apply_adjustments`]; there is no second rendering path.
//!
//! ## Order
//! 1. Hue rotation
//! 2. Saturation
//! 3. Exposure (brightness)
//!
//! Each stage clamps to `[0, 1]` before the next, as a filter chain does.

use thiserror::Error;

use crate::decode::DecodedImage;
use crate::Adjustments;

/// Errors raised while building adjustment values from untyped input.
#[derive(Debug, Error, PartialEq)]
pub enum AdjustmentError {
    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f64 },
}

// Luminance weights used by the Filter Effects matrices.
const LUMA_R: f32 = 0.213;
const LUMA_G: f32 = 0.715;
const LUMA_B: f32 = 0.072;

/// 3x3 linear color transform on normalized RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColorMatrix([[f32; 3]; 3]);

impl ColorMatrix {
    /// `hue-rotate(degrees)`.
    fn hue_rotate(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self([
            [
                LUMA_R + cos * (1.0 - LUMA_R) - sin * LUMA_R,
                LUMA_G - cos * LUMA_G - sin * LUMA_G,
                LUMA_B - cos * LUMA_B + sin * (1.0 - LUMA_B),
            ],
            [
                LUMA_R - cos * LUMA_R + sin * 0.143,
                LUMA_G + cos * (1.0 - LUMA_G) + sin * 0.140,
                LUMA_B - cos * LUMA_B - sin * 0.283,
            ],
            [
                LUMA_R - cos * LUMA_R - sin * (1.0 - LUMA_R),
                LUMA_G - cos * LUMA_G + sin * LUMA_G,
                LUMA_B + cos * (1.0 - LUMA_B) + sin * LUMA_B,
            ],
        ])
    }

    /// `saturate(amount)`; `amount` of 0 is grayscale, 1 is unchanged.
    fn saturate(amount: f32) -> Self {
        let s = amount;
        Self([
            [
                LUMA_R + (1.0 - LUMA_R) * s,
                LUMA_G - LUMA_G * s,
                LUMA_B - LUMA_B * s,
            ],
            [
                LUMA_R - LUMA_R * s,
                LUMA_G + (1.0 - LUMA_G) * s,
                LUMA_B - LUMA_B * s,
            ],
            [
                LUMA_R - LUMA_R * s,
                LUMA_G - LUMA_G * s,
                LUMA_B + (1.0 - LUMA_B) * s,
            ],
        ])
    }

    #[inline]
    fn apply(&self, [r, g, b]: [f32; 3]) -> [f32; 3] {
        let m = &self.0;
        [
            (m[0][0] * r + m[0][1] * g + m[0][2] * b).clamp(0.0, 1.0),
            (m[1][0] * r + m[1][1] * g + m[1][2] * b).clamp(0.0, 1.0),
            (m[2][0] * r + m[2][1] * g + m[2][2] * b).clamp(0.0, 1.0),
        ]
    }
}

/// The three stages resolved for one render call.
struct FilterChain {
    hue: Option<ColorMatrix>,
    saturation: Option<ColorMatrix>,
    brightness: Option<f32>,
}

impl FilterChain {
    fn new(adjustments: &Adjustments) -> Self {
        let hue = adjustments.normalized_hue();
        let saturation = adjustments.saturation_factor();
        let brightness = adjustments.exposure_factor();
        Self {
            hue: (hue != 0).then(|| ColorMatrix::hue_rotate(hue as f32)),
            saturation: (adjustments.saturation != 0).then(|| ColorMatrix::saturate(saturation)),
            brightness: (adjustments.exposure != 0).then_some(brightness),
        }
    }

    #[inline]
    fn apply(&self, mut rgb: [f32; 3]) -> [f32; 3] {
        if let Some(m) = &self.hue {
            rgb = m.apply(rgb);
        }
        if let Some(m) = &self.saturation {
            rgb = m.apply(rgb);
        }
        if let Some(k) = self.brightness {
            rgb = rgb.map(|c| (c * k).clamp(0.0, 1.0));
        }
        rgb
    }
}

/// Apply adjustments to RGB pixel data in place.
///
/// `pixels` is 3 bytes per pixel, row-major. Default adjustments leave the
/// buffer untouched.
pub fn apply_adjustments_in_place(pixels: &mut [u8], adjustments: &Adjustments) {
    if adjustments.is_default() {
        return;
    }

    let chain = FilterChain::new(adjustments);
    for chunk in pixels.chunks_exact_mut(3) {
        let rgb = [
            chunk[0] as f32 / 255.0,
            chunk[1] as f32 / 255.0,
            chunk[2] as f32 / 255.0,
        ];
        let [r, g, b] = chain.apply(rgb);
        chunk[0] = (r * 255.0).round() as u8;
        chunk[1] = (g * 255.0).round() as u8;
        chunk[2] = (b * 255.0).round() as u8;
    }
}

/// Render `image` with `adjustments`, returning a new image.
pub fn apply_adjustments(image: &DecodedImage, adjustments: &Adjustments) -> DecodedImage {
    let mut pixels = image.pixels.clone();
    apply_adjustments_in_place(&mut pixels, adjustments);
    DecodedImage::new(image.width, image.height, pixels)
}
