//! HSB (hue, saturation, brightness) color space

use super::Rgb;

/// A color in HSB space.
///
/// All components are normalized: `h` in `[0, 1)` (one full turn), `s` and
/// `v` in `[0, 1]`. Achromatic colors always carry `h == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsb {
    /// Hue as a fraction of a full turn
    pub h: f32,
    /// Saturation
    pub s: f32,
    /// Brightness (value)
    pub v: f32,
}

impl Hsb {
    #[inline]
    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }
}

impl From<Rgb> for Hsb {
    #[inline]
    fn from(c: Rgb) -> Self {
        rgb_to_hsb(c.r, c.g, c.b)
    }
}

impl From<Hsb> for Rgb {
    #[inline]
    fn from(c: Hsb) -> Self {
        hsb_to_rgb(c.h, c.s, c.v)
    }
}

/// Convert 8-bit RGB to HSB.
///
/// Zero saturation (which includes black) yields `h == 0`.
pub fn rgb_to_hsb(r: u8, g: u8, b: u8) -> Hsb {
    let rf = r as f32 / 255.0;
    let gf = g as f32 / 255.0;
    let bf = b as f32 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { delta / max } else { 0.0 };

    if delta <= 0.0 || s <= 0.0 {
        return Hsb::new(0.0, s, v);
    }

    let mut h = if max == rf {
        (gf - bf) / delta
    } else if max == gf {
        2.0 + (bf - rf) / delta
    } else {
        4.0 + (rf - gf) / delta
    };
    h /= 6.0;
    if h < 0.0 {
        h += 1.0;
    }
    if h >= 1.0 {
        h -= 1.0;
    }

    Hsb::new(h, s, v)
}

/// Convert HSB back to 8-bit RGB.
///
/// Hue wraps modulo 1; saturation and brightness are clamped to `[0, 1]`.
/// Channels are rounded to the nearest integer.
pub fn hsb_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    if s <= 0.0 {
        let c = to_channel(v);
        return Rgb::new(c, c, c);
    }

    let h = h.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    // h * 6 can land on exactly 6.0 after float rounding.
    let (r, g, b) = match (sector as i32).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb::new(to_channel(r), to_channel(g), to_channel(b))
}

#[inline]
fn to_channel(x: f32) -> u8 {
    (x * 255.0 + 0.5).clamp(0.0, 255.0) as u8
}
