use crate::{
    blend::{
        alpha::{clamp_u8, composite_pixel, scale_alpha},
        hsl::blend_rgb,
        mode::{BlendMode, FormulaKind},
        separable::blend_channel,
    },
    foundation::{
        core::{PixelBuffer, Rgb},
        error::{BlendError, BlendResult},
    },
    render::clip::Region,
};

/// Blend the clipped `region` of `src` onto `dest` in place.
///
/// `alpha` is the global opacity in 0..=1. The region must already be clipped against both
/// buffers (see [`clip_region`](crate::clip_region)); a region that does not fit is rejected
/// before any pixel is written.
pub fn blend_region(
    dest: &mut PixelBuffer,
    src: &PixelBuffer,
    region: Region,
    alpha: f64,
    mode: BlendMode,
) -> BlendResult<()> {
    check_fits(region.src_x, region.src_y, &region, src, "source")?;
    check_fits(region.dest_x, region.dest_y, &region, dest, "destination")?;

    let alpha = alpha.clamp(0.0, 1.0);
    let (src_w, dest_w) = (src.width() as usize, dest.width() as usize);
    let row_bytes = region.width * 4;
    let kind = mode.kind();

    for row in 0..region.height {
        let s0 = ((region.src_y + row) * src_w + region.src_x) * 4;
        let d0 = ((region.dest_y + row) * dest_w + region.dest_x) * 4;
        let s_row = &src.as_bytes()[s0..s0 + row_bytes];
        let d_row = &mut dest.as_bytes_mut()[d0..d0 + row_bytes];
        blend_row(d_row, s_row, alpha, kind);
    }
    Ok(())
}

fn blend_row(dst: &mut [u8], src: &[u8], alpha: f64, kind: FormulaKind) {
    let (dst, _) = dst.as_chunks_mut::<4>();
    let (src, _) = src.as_chunks::<4>();
    let pixels = dst.iter_mut().zip(src);
    match kind {
        FormulaKind::CopyAlpha => {
            for (d, s) in pixels {
                d[3] = scale_alpha(s[3], alpha);
            }
        }
        FormulaKind::CopyOpaque => {
            let a = clamp_u8((255.0 * alpha) as i32);
            for (d, s) in pixels {
                *d = [s[0], s[1], s[2], a];
            }
        }
        FormulaKind::Separable(f) => {
            for (d, s) in pixels {
                let blended = Rgb::new(
                    blend_channel(f, i32::from(s[0]), i32::from(d[0])),
                    blend_channel(f, i32::from(s[1]), i32::from(d[1])),
                    blend_channel(f, i32::from(s[2]), i32::from(d[2])),
                );
                composite_pixel(d, s, blended, alpha);
            }
        }
        FormulaKind::NonSeparable(f) => {
            for (d, s) in pixels {
                let blended = blend_rgb(f, Rgb::from_pixel(*s), Rgb::from_pixel(*d));
                composite_pixel(d, s, blended, alpha);
            }
        }
    }
}

fn check_fits(
    x: usize,
    y: usize,
    region: &Region,
    buf: &PixelBuffer,
    what: &str,
) -> BlendResult<()> {
    let fits_x = x
        .checked_add(region.width)
        .is_some_and(|end| end <= buf.width() as usize);
    let fits_y = y
        .checked_add(region.height)
        .is_some_and(|end| end <= buf.height() as usize);
    if fits_x && fits_y {
        Ok(())
    } else {
        Err(BlendError::validation(format!(
            "{what} region {}x{} at ({x}, {y}) exceeds {}x{} buffer",
            region.width,
            region.height,
            buf.width(),
            buf.height()
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/software.rs"]
mod tests;
