//! Per-channel blend formulas.
//!
//! Every function takes the source and destination channel (0..=255) and returns the blended
//! channel. Some formulas leave the byte range (`linear-dodge` can reach 510, `linear-light`
//! can go negative); the alpha compositor clamps after weighting. Divisions are integer and
//! truncating, with explicit guards wherever a divisor can reach zero.

use crate::blend::{
    alpha::{RECIP_255, SHIFT, div255},
    mode::Separable,
};

/// Evaluate `f` on one channel pair.
#[inline]
pub fn blend_channel(f: Separable, src: i32, dest: i32) -> i32 {
    match f {
        Separable::Normal => normal(src, dest),
        Separable::Darken => darken(src, dest),
        Separable::Multiply => multiply(src, dest),
        Separable::ColorBurn => color_burn(src, dest),
        Separable::LinearBurn => linear_burn(src, dest),
        Separable::Lighten => lighten(src, dest),
        Separable::Screen => screen(src, dest),
        Separable::ColorDodge => color_dodge(src, dest),
        Separable::LinearDodge => linear_dodge(src, dest),
        Separable::Overlay => overlay(src, dest),
        Separable::SoftLight => soft_light(src, dest),
        Separable::HardLight => hard_light(src, dest),
        Separable::VividLight => vivid_light(src, dest),
        Separable::LinearLight => linear_light(src, dest),
        Separable::PinLight => pin_light(src, dest),
        Separable::HardMix => hard_mix(src, dest),
        Separable::Difference => difference(src, dest),
        Separable::Exclusion => exclusion(src, dest),
        Separable::Subtract => subtract(src, dest),
        Separable::Divide => divide(src, dest),
    }
}

#[inline]
pub fn normal(src: i32, _dest: i32) -> i32 {
    src
}

#[inline]
pub fn darken(src: i32, dest: i32) -> i32 {
    src.min(dest)
}

#[inline]
pub fn multiply(src: i32, dest: i32) -> i32 {
    div255(src * dest)
}

#[inline]
pub fn color_burn(src: i32, dest: i32) -> i32 {
    if dest == 255 {
        255
    } else if src == 0 {
        0
    } else {
        255 - ((255 - dest) * 255 / src).min(255)
    }
}

#[inline]
pub fn linear_burn(src: i32, dest: i32) -> i32 {
    (dest + src - 255).max(0)
}

#[inline]
pub fn lighten(src: i32, dest: i32) -> i32 {
    src.max(dest)
}

#[inline]
pub fn screen(src: i32, dest: i32) -> i32 {
    src + dest - div255(src * dest)
}

#[inline]
pub fn color_dodge(src: i32, dest: i32) -> i32 {
    if dest == 0 {
        0
    } else if src == 255 {
        255
    } else {
        (dest * 255 / (255 - src)).min(255)
    }
}

/// Unclamped; values above 255 are resolved by the compositor.
#[inline]
pub fn linear_dodge(src: i32, dest: i32) -> i32 {
    src + dest
}

#[inline]
pub fn overlay(src: i32, dest: i32) -> i32 {
    if dest < 128 {
        div255(2 * src * dest)
    } else {
        255 - div255((255 - ((dest - 128) << 1)) * (255 - src))
    }
}

/// Soft light with the smoothed midtone curve.
///
/// Below 128 the dark half keeps the approximation `dest - (1 - 2s)·d·(1 - d)` rather than
/// the canonical polynomial. Above 128 the curve `D(d)` is a cubic for dark destinations and
/// `sqrt(d)` otherwise.
#[inline]
pub fn soft_light(src: i32, dest: i32) -> i32 {
    if src < 128 {
        dest - div255(div255((255 - (src << 1)) * dest) * (255 - dest))
    } else {
        let s2 = (src << 1) - 255;
        if dest < 64 {
            let curve = div255((div255((dest << 4) - 3060) * dest + 1020) * dest);
            dest + div255(s2 * (curve - dest))
        } else {
            // The sqrt curve stays fractional until the final fixed-point shift.
            let curve = (f64::from(dest) / 255.0).sqrt() * 255.0;
            let lift = (f64::from(s2) * (curve - f64::from(dest)) * RECIP_255 as f64) as i64;
            dest + (lift >> SHIFT) as i32
        }
    }
}

#[inline]
pub fn hard_light(src: i32, dest: i32) -> i32 {
    if src < 128 {
        div255(2 * dest * src)
    } else {
        let s2 = (src << 1) - 255;
        dest + s2 - div255(dest * s2)
    }
}

#[inline]
pub fn vivid_light(src: i32, dest: i32) -> i32 {
    if src < 128 {
        burn_half(src, dest)
    } else {
        let s2 = ((src - 128) << 1) + 1;
        if s2 == 255 {
            255
        } else {
            (dest * 255 / (255 - s2)).min(255)
        }
    }
}

/// Can go negative for dark pairs; the compositor clamps.
#[inline]
pub fn linear_light(src: i32, dest: i32) -> i32 {
    if src < 128 {
        dest + (src << 1) - 255
    } else {
        dest + ((src - 128) << 1)
    }
}

#[inline]
pub fn pin_light(src: i32, dest: i32) -> i32 {
    if src < 128 {
        (src << 1).min(dest)
    } else {
        ((src - 128) << 1).max(dest)
    }
}

/// Vivid light pushed to 0 or 255. A black destination never lights up.
#[inline]
pub fn hard_mix(src: i32, dest: i32) -> i32 {
    let vivid = if src < 128 {
        burn_half(src, dest)
    } else if dest == 0 {
        0
    } else {
        let s2 = ((src - 128) << 1) + 1;
        if s2 == 255 {
            s2
        } else {
            (dest * 255 / (255 - s2)).min(255)
        }
    };
    if vivid < 128 { 0 } else { 255 }
}

#[inline]
pub fn difference(src: i32, dest: i32) -> i32 {
    (dest - src).abs()
}

#[inline]
pub fn exclusion(src: i32, dest: i32) -> i32 {
    dest + src - div255(2 * dest * src)
}

#[inline]
pub fn subtract(src: i32, dest: i32) -> i32 {
    (dest - src).max(0)
}

#[inline]
pub fn divide(src: i32, dest: i32) -> i32 {
    if dest == 0 {
        0
    } else if src == 0 {
        255
    } else {
        (dest * 255 / src).min(255)
    }
}

// Color-burn half of vivid light / hard mix, with the doubled source as divisor.
#[inline]
fn burn_half(src: i32, dest: i32) -> i32 {
    let s2 = src << 1;
    if src == 0 {
        s2
    } else {
        (255 - (255 - dest) * 255 / s2).max(0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/separable.rs"]
mod tests;
