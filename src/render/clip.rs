use crate::foundation::core::CopyRect;

/// A placement that lies fully inside both buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    /// Left edge in the source buffer.
    pub src_x: usize,
    /// Top edge in the source buffer.
    pub src_y: usize,
    /// Left edge in the destination buffer.
    pub dest_x: usize,
    /// Top edge in the destination buffer.
    pub dest_y: usize,
    /// Width in pixels, always > 0.
    pub width: usize,
    /// Height in pixels, always > 0.
    pub height: usize,
}

/// Intersect a requested placement with the source and destination bounds.
///
/// Negative destination offsets shift the source window forward (and vice versa); the size
/// shrinks by the same amount and is then capped by whatever remains of either buffer.
/// Returns `None` when nothing overlaps or `alpha` is zero, which callers treat as a no-op.
pub fn clip_region(
    rect: CopyRect,
    src_size: (u32, u32),
    dest_size: (u32, u32),
    alpha: f64,
) -> Option<Region> {
    if alpha <= 0.0 || alpha.is_nan() {
        return None;
    }
    let (src_x, dest_x, width) = clip_axis(
        i64::from(rect.src_x),
        i64::from(rect.dest_x),
        i64::from(rect.width),
        i64::from(src_size.0),
        i64::from(dest_size.0),
    )?;
    let (src_y, dest_y, height) = clip_axis(
        i64::from(rect.src_y),
        i64::from(rect.dest_y),
        i64::from(rect.height),
        i64::from(src_size.1),
        i64::from(dest_size.1),
    )?;
    Some(Region {
        src_x,
        src_y,
        dest_x,
        dest_y,
        width,
        height,
    })
}

fn clip_axis(
    mut s: i64,
    mut d: i64,
    mut len: i64,
    src_len: i64,
    dest_len: i64,
) -> Option<(usize, usize, usize)> {
    if d < 0 {
        len += d;
        s -= d;
        d = 0;
    }
    if s < 0 {
        len += s;
        d -= s;
        s = 0;
    }
    let len = len.min(src_len - s).min(dest_len - d);
    if len <= 0 {
        return None;
    }
    Some((
        usize::try_from(s).ok()?,
        usize::try_from(d).ok()?,
        usize::try_from(len).ok()?,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/clip.rs"]
mod tests;
