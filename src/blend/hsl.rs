//! Non-separable blend formulas built on luminance and saturation.

use crate::{blend::mode::NonSeparable, foundation::core::Rgb};

/// Perceptual luma with 8-bit weights (77, 151, 28 out of 256), floored.
#[inline]
pub fn luminance(c: Rgb) -> i32 {
    (c.r * 77 + c.g * 151 + c.b * 28) >> 8
}

/// Spread between the largest and smallest channel.
#[inline]
pub fn saturation(c: Rgb) -> i32 {
    c.max() - c.min()
}

/// Shift `c` so its luminance becomes `lum`, then pull it back into gamut.
pub fn set_luminance(c: Rgb, lum: i32) -> Rgb {
    let delta = lum - luminance(c);
    clip_color(c.map(|v| v + delta))
}

/// Rescale out-of-gamut channels toward the luminance until they fit in 0..=255.
///
/// Both corrections use the extremes of the input triple; the low one is applied first and
/// both may trigger.
pub fn clip_color(c: Rgb) -> Rgb {
    let lum = luminance(c);
    let (mn, mx) = (c.min(), c.max());
    let mut c = c;

    if mn < 0 {
        c = if lum > mn {
            c.map(|v| lum + ((v - lum) * lum).div_euclid(lum - mn))
        } else {
            c.map(|_| lum.max(0))
        };
    }

    if mx > 255 {
        c = if mx > lum {
            c.map(|v| lum + ((v - lum) * (255 - lum)).div_euclid(mx - lum))
        } else {
            c.map(|_| lum.min(255))
        };
    }
    c
}

/// Give `c` saturation `sat` while keeping the ordering of its channels.
///
/// The smallest channel becomes 0, the largest `sat`, and the middle one is scaled
/// proportionally. A gray input collapses to black.
pub fn set_saturation(c: Rgb, sat: i32) -> Rgb {
    let mut ch = [c.r, c.g, c.b];
    let mut order = [0usize, 1, 2];
    order.sort_by_key(|&i| ch[i]);
    let [lo, mid, hi] = order;

    if ch[hi] > ch[lo] {
        ch[mid] = (ch[mid] - ch[lo]) * sat / (ch[hi] - ch[lo]);
        ch[hi] = sat;
    } else {
        ch[mid] = 0;
        ch[hi] = 0;
    }
    ch[lo] = 0;
    Rgb::new(ch[0], ch[1], ch[2])
}

/// Evaluate `f` for one source/destination color pair.
pub fn blend_rgb(f: NonSeparable, src: Rgb, dest: Rgb) -> Rgb {
    match f {
        NonSeparable::DarkerColor => {
            if luminance(src) < luminance(dest) {
                src
            } else {
                dest
            }
        }
        NonSeparable::LighterColor => {
            if luminance(src) > luminance(dest) {
                src
            } else {
                dest
            }
        }
        NonSeparable::Hue => set_luminance(set_saturation(src, saturation(dest)), luminance(dest)),
        NonSeparable::Saturation => {
            set_luminance(set_saturation(dest, saturation(src)), luminance(dest))
        }
        NonSeparable::Color => set_luminance(src, luminance(dest)),
        NonSeparable::Luminosity => set_luminance(dest, luminance(src)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/hsl.rs"]
mod tests;
