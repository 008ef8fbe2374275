//! HSV color statistics and the diseased-pixel mask
//!
//! Works in the 8-bit HSV domain (hue 0-179 as degrees/2, saturation and
//! value 0-255). The yellow/brown thresholds below were calibrated against
//! that domain, so color analysis always starts from the image rescaled
//! back to 8-bit intensities, not the [0,1] floats.

/// A pixel in 8-bit HSV: hue 0-179 (degrees halved), saturation and value 0-255
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvPixel {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

/// Convert an 8-bit RGB pixel to 8-bit HSV
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> HsvPixel {
    let rf = r as f32;
    let gf = g as f32;
    let bf = b as f32;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { 255.0 * delta / max } else { 0.0 };

    let h_deg = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * ((gf - bf) / delta)
    } else if max == gf {
        60.0 * ((bf - rf) / delta) + 120.0
    } else {
        60.0 * ((rf - gf) / delta) + 240.0
    };
    let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };

    HsvPixel {
        h: ((h_deg / 2.0).round() as u16 % 180) as u8,
        s: s.round().clamp(0.0, 255.0) as u8,
        v: v.round().clamp(0.0, 255.0) as u8,
    }
}

/// A pixel counts as diseased when its hue falls in the yellow band, or in
/// the red/brown band with strong saturation.
pub fn is_diseased(px: &HsvPixel) -> bool {
    (px.h >= 20 && px.h <= 40) || (px.h <= 20 && px.s >= 100)
}

/// Per-image color summary over the HSV channels
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSummary {
    /// Mean hue over all pixels (0-179 domain)
    pub mean_hue: f64,
    /// Mean saturation over all pixels (0-255 domain)
    pub mean_saturation: f64,
    /// Mean value over all pixels (0-255 domain)
    pub mean_value: f64,
    /// Percentage of pixels matching the diseased mask (0-100)
    pub affected_area_percent: f64,
}

/// Summarize the HSV channels and diseased-mask coverage of an 8-bit RGB image
pub fn summarize(rgb: &[[u8; 3]]) -> ColorSummary {
    if rgb.is_empty() {
        return ColorSummary {
            mean_hue: 0.0,
            mean_saturation: 0.0,
            mean_value: 0.0,
            affected_area_percent: 0.0,
        };
    }

    let mut hue_sum = 0.0f64;
    let mut sat_sum = 0.0f64;
    let mut val_sum = 0.0f64;
    let mut diseased = 0usize;

    for &[r, g, b] in rgb {
        let px = rgb_to_hsv(r, g, b);
        hue_sum += px.h as f64;
        sat_sum += px.s as f64;
        val_sum += px.v as f64;
        if is_diseased(&px) {
            diseased += 1;
        }
    }

    let n = rgb.len() as f64;
    ColorSummary {
        mean_hue: hue_sum / n,
        mean_saturation: sat_sum / n,
        mean_value: val_sum / n,
        affected_area_percent: 100.0 * diseased as f64 / n,
    }
}

/// Compute the diseased-pixel mask for every pixel, in image order.
/// Used by the severity overlay rendering.
pub fn diseased_mask(rgb: &[[u8; 3]]) -> Vec<bool> {
    rgb.iter()
        .map(|&[r, g, b]| is_diseased(&rgb_to_hsv(r, g, b)))
        .collect()
}
