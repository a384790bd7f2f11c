use crate::foundation::error::{BlendError, BlendResult};

/// An 8-bit RGBA bitmap with straight (non-premultiplied) alpha, row-major, 4 bytes per pixel.
///
/// Compositing reads source buffers and rewrites destination buffers in place; the pixel
/// storage is never reallocated by this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Create a buffer where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let px = width as usize * height as usize;
        Self {
            width,
            height,
            data: rgba.repeat(px),
        }
    }

    /// Wrap existing RGBA8 bytes. The length must be exactly `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> BlendResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| BlendError::validation("pixel buffer size overflow"))?;
        if data.len() != expected {
            return Err(BlendError::validation(format!(
                "pixel buffer expects {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA8 bytes. The length cannot change through this view.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return its bytes.
    pub fn into_rgba8(self) -> Vec<u8> {
        self.data
    }

    /// Read one pixel, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let idx = self.index_of(x, y)?;
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Overwrite one pixel. Out-of-bounds writes are rejected.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> BlendResult<()> {
        let idx = self.index_of(x, y).ok_or_else(|| {
            BlendError::validation(format!(
                "pixel ({x}, {y}) outside {}x{} buffer",
                self.width, self.height
            ))
        })?;
        self.data[idx..idx + 4].copy_from_slice(&rgba);
        Ok(())
    }

    /// Convert into an `image` crate buffer.
    pub fn into_rgba_image(self) -> BlendResult<image::RgbaImage> {
        let (w, h) = (self.width, self.height);
        image::RgbaImage::from_raw(w, h, self.data)
            .ok_or_else(|| BlendError::validation("pixel buffer does not match image dimensions"))
    }

    fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }
}

impl From<image::RgbaImage> for PixelBuffer {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

/// Caller-requested placement of a source rectangle onto a destination.
///
/// Offsets may be negative and the size may exceed either buffer; see
/// [`clip_region`](crate::clip_region).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CopyRect {
    /// Left edge in the source buffer.
    pub src_x: i32,
    /// Top edge in the source buffer.
    pub src_y: i32,
    /// Left edge in the destination buffer.
    pub dest_x: i32,
    /// Top edge in the destination buffer.
    pub dest_y: i32,
    /// Requested width.
    pub width: i32,
    /// Requested height.
    pub height: i32,
}

impl CopyRect {
    /// Place the whole `width` x `height` source at `(dest_x, dest_y)`.
    pub fn at(dest_x: i32, dest_y: i32, width: i32, height: i32) -> Self {
        Self {
            src_x: 0,
            src_y: 0,
            dest_x,
            dest_y,
            width,
            height,
        }
    }
}

/// An RGB triple used by the luminance/saturation math.
///
/// Channels are nominally 0..=255 but may leave that range between steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    /// Red.
    pub r: i32,
    /// Green.
    pub g: i32,
    /// Blue.
    pub b: i32,
}

impl Rgb {
    /// Build a triple.
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    /// Build a triple from the color bytes of an RGBA pixel.
    pub fn from_pixel(px: [u8; 4]) -> Self {
        Self::new(i32::from(px[0]), i32::from(px[1]), i32::from(px[2]))
    }

    /// Smallest channel.
    pub fn min(self) -> i32 {
        self.r.min(self.g).min(self.b)
    }

    /// Largest channel.
    pub fn max(self) -> i32 {
        self.r.max(self.g).max(self.b)
    }

    /// Apply `f` to every channel.
    pub fn map(self, f: impl Fn(i32) -> i32) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
