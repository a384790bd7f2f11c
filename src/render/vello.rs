use std::sync::Arc;

use vello_cpu::{
    kurbo::{Affine, Rect},
    peniko::{BlendMode as PenikoBlend, Compose, Mix},
};

use crate::{
    blend::{alpha::clamp_u8, mode::BlendMode},
    foundation::{
        core::{CopyRect, PixelBuffer},
        error::{BlendError, BlendResult},
    },
    render::backend::NativeBackend,
};

/// Native backend rendering through `vello_cpu`.
///
/// Only modes that map onto a `peniko` mix with source-over composition are accepted; the
/// rest fall back to the software engine. Pixels cross the boundary premultiplied, so results
/// can differ from the software engine by rounding.
#[derive(Clone, Copy, Debug, Default)]
pub struct VelloBackend;

impl VelloBackend {
    /// Create the backend.
    pub fn new() -> Self {
        Self
    }
}

pub(crate) fn mix_for(mode: BlendMode) -> Option<Mix> {
    Some(match mode {
        BlendMode::SourceOver => Mix::Normal,
        BlendMode::Multiply => Mix::Multiply,
        BlendMode::Screen => Mix::Screen,
        BlendMode::Overlay => Mix::Overlay,
        BlendMode::Darken => Mix::Darken,
        BlendMode::Lighten => Mix::Lighten,
        BlendMode::ColorDodge => Mix::ColorDodge,
        BlendMode::ColorBurn => Mix::ColorBurn,
        BlendMode::HardLight => Mix::HardLight,
        BlendMode::SoftLight => Mix::SoftLight,
        BlendMode::Difference => Mix::Difference,
        BlendMode::Exclusion => Mix::Exclusion,
        BlendMode::Hue => Mix::Hue,
        BlendMode::Saturation => Mix::Saturation,
        BlendMode::Color => Mix::Color,
        BlendMode::Luminosity => Mix::Luminosity,
        _ => return None,
    })
}

impl NativeBackend for VelloBackend {
    fn name(&self) -> &str {
        "vello_cpu"
    }

    fn round_trip_operation(&self, op: &str) -> BlendResult<Option<String>> {
        Ok(op
            .parse::<BlendMode>()
            .ok()
            .filter(|m| mix_for(*m).is_some())
            .map(|m| m.as_str().to_string()))
    }

    fn draw(
        &self,
        dest: &mut PixelBuffer,
        src: &PixelBuffer,
        rect: CopyRect,
        alpha: f64,
        mode: BlendMode,
    ) -> BlendResult<()> {
        let mix = mix_for(mode).ok_or_else(|| {
            BlendError::backend(format!("vello_cpu cannot draw with {mode}"))
        })?;
        let alpha = alpha.clamp(0.0, 1.0);
        let Some(window) = DrawWindow::new(rect, src, dest) else {
            return Ok(());
        };
        if alpha <= 0.0 {
            return Ok(());
        }

        let (dw, dh) = dims_u16(dest)?;
        let backdrop = image_paint(straight_to_pixmap(dest)?);
        let layer = image_paint(straight_to_pixmap(src)?);

        let mut ctx = vello_cpu::RenderContext::new(dw, dh);
        ctx.set_paint_transform(Affine::IDENTITY);
        ctx.set_transform(Affine::IDENTITY);
        ctx.set_paint(backdrop);
        ctx.fill_rect(&Rect::new(0.0, 0.0, f64::from(dw), f64::from(dh)));

        ctx.push_blend_layer(PenikoBlend::new(mix, Compose::SrcOver));
        if alpha < 1.0 {
            ctx.push_opacity_layer(alpha as f32);
        }
        ctx.set_transform(Affine::translate((window.offset_x, window.offset_y)));
        ctx.set_paint(layer);
        ctx.fill_rect(&window.src_rect);
        if alpha < 1.0 {
            ctx.pop_layer();
        }
        ctx.pop_layer();
        ctx.flush();

        let mut out = vello_cpu::Pixmap::new(dw, dh);
        ctx.render_to_pixmap(&mut out);
        write_back_unpremultiplied(dest, out.data_as_u8_slice(), &window);
        Ok(())
    }
}

// Source rectangle clipped to the source bounds, plus the integer destination window it
// lands on.
struct DrawWindow {
    src_rect: Rect,
    offset_x: f64,
    offset_y: f64,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

impl DrawWindow {
    fn new(rect: CopyRect, src: &PixelBuffer, dest: &PixelBuffer) -> Option<Self> {
        let (sx, sy) = (i64::from(rect.src_x), i64::from(rect.src_y));
        let (dx, dy) = (i64::from(rect.dest_x), i64::from(rect.dest_y));
        let (w, h) = (i64::from(rect.width), i64::from(rect.height));

        let sx0 = sx.max(0);
        let sy0 = sy.max(0);
        let sx1 = (sx + w).min(i64::from(src.width()));
        let sy1 = (sy + h).min(i64::from(src.height()));

        let (ox, oy) = (dx - sx, dy - sy);
        let x0 = (sx0 + ox).max(0);
        let y0 = (sy0 + oy).max(0);
        let x1 = (sx1 + ox).min(i64::from(dest.width()));
        let y1 = (sy1 + oy).min(i64::from(dest.height()));
        if sx1 <= sx0 || sy1 <= sy0 || x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            src_rect: Rect::new(sx0 as f64, sy0 as f64, sx1 as f64, sy1 as f64),
            offset_x: ox as f64,
            offset_y: oy as f64,
            x0: usize::try_from(x0).ok()?,
            y0: usize::try_from(y0).ok()?,
            x1: usize::try_from(x1).ok()?,
            y1: usize::try_from(y1).ok()?,
        })
    }
}

fn dims_u16(buf: &PixelBuffer) -> BlendResult<(u16, u16)> {
    let w: u16 = buf
        .width()
        .try_into()
        .map_err(|_| BlendError::backend("buffer width exceeds u16"))?;
    let h: u16 = buf
        .height()
        .try_into()
        .map_err(|_| BlendError::backend("buffer height exceeds u16"))?;
    Ok((w, h))
}

fn image_paint(pixmap: vello_cpu::Pixmap) -> vello_cpu::Image {
    vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    }
}

fn straight_to_pixmap(buf: &PixelBuffer) -> BlendResult<vello_cpu::Pixmap> {
    let (w, h) = dims_u16(buf)?;
    let mut may_have_opacities = false;
    let pixels: Vec<_> = buf
        .as_bytes()
        .chunks_exact(4)
        .map(|px| {
            let a = px[3];
            may_have_opacities |= a != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: mul_div255(px[0], a),
                g: mul_div255(px[1], a),
                b: mul_div255(px[2], a),
                a,
            }
        })
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn write_back_unpremultiplied(dest: &mut PixelBuffer, premul: &[u8], window: &DrawWindow) {
    let width = dest.width() as usize;
    let bytes = dest.as_bytes_mut();
    for y in window.y0..window.y1 {
        let start = (y * width + window.x0) * 4;
        let end = (y * width + window.x1) * 4;
        for (d, p) in bytes[start..end]
            .chunks_exact_mut(4)
            .zip(premul[start..end].chunks_exact(4))
        {
            d.copy_from_slice(&unpremultiply([p[0], p[1], p[2], p[3]]));
        }
    }
}

fn mul_div255(c: u8, a: u8) -> u8 {
    ((u32::from(c) * u32::from(a) + 127) / 255) as u8
}

fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = i32::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| clamp_u8((i32::from(c) * 255 + a / 2) / a);
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}

#[cfg(test)]
#[path = "../../tests/unit/render/vello.rs"]
mod tests;
