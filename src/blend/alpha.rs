//! Fixed-point alpha compositing for straight-alpha RGBA8.
//!
//! `x * 32897 >> 23` equals `x / 255` (floored) for every product of two bytes, so the hot
//! path never touches floating point once the global alpha has been folded in.

use crate::foundation::core::Rgb;

/// Fixed-point reciprocal of 255, scaled by `2^SHIFT`.
pub const RECIP_255: i64 = 32897;
/// Fixed-point shift paired with [`RECIP_255`].
pub const SHIFT: u32 = 23;

const FULL: i64 = 255 * RECIP_255;

/// `x / 255` via the fixed-point reciprocal.
///
/// Exact (floored) for `0 <= x <= 255 * 255`; negative inputs shift arithmetically.
#[inline]
pub fn div255(x: i32) -> i32 {
    ((i64::from(x) * RECIP_255) >> SHIFT) as i32
}

/// Alpha weights for one pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlphaWeights {
    /// Weight of the blended color (both layers present).
    pub blended: i32,
    /// Weight of the raw source color (destination transparent).
    pub source: i32,
    /// Weight of the raw destination color (source transparent).
    pub dest: i32,
}

impl AlphaWeights {
    /// Split the coverage of a source pixel over a destination pixel.
    #[inline]
    pub fn new(sa: u8, da: u8, alpha: f64) -> Self {
        let tmp = (f64::from(sa) * alpha * RECIP_255 as f64) as i64;
        let da = i64::from(da);
        Self {
            blended: ((tmp * da) >> SHIFT) as i32,
            source: ((tmp * (255 - da)) >> SHIFT) as i32,
            dest: (((FULL - tmp) * da) >> SHIFT) as i32,
        }
    }

    /// Resulting destination alpha.
    #[inline]
    pub fn out_alpha(self) -> i32 {
        self.blended + self.source + self.dest
    }
}

/// Merge a blended color into the destination pixel `dst` (RGBA8, in place).
///
/// When the resulting alpha is zero only the alpha byte is written.
#[inline]
pub fn composite_pixel(dst: &mut [u8; 4], src: &[u8; 4], blended: Rgb, alpha: f64) {
    let w = AlphaWeights::new(src[3], dst[3], alpha);
    let a = w.out_alpha();
    dst[3] = clamp_u8(a);
    if a == 0 {
        return;
    }
    let mix = |b: i32, s: u8, d: u8| -> u8 {
        clamp_u8((b * w.blended + i32::from(s) * w.source + i32::from(d) * w.dest) / a)
    };
    dst[0] = mix(blended.r, src[0], dst[0]);
    dst[1] = mix(blended.g, src[1], dst[1]);
    dst[2] = mix(blended.b, src[2], dst[2]);
}

/// Scale a byte by the global alpha, floored.
#[inline]
pub fn scale_alpha(value: u8, alpha: f64) -> u8 {
    clamp_u8((f64::from(value) * alpha) as i32)
}

#[inline]
pub(crate) fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/blend/alpha.rs"]
mod tests;
