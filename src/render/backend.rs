use crate::{
    blend::mode::BlendMode,
    foundation::{
        core::{CopyRect, PixelBuffer},
        error::BlendResult,
    },
};

/// A native compositing engine that can draw one straight-alpha buffer onto another.
///
/// The compositor treats implementations as opaque: it only asks which operation names they
/// retain and hands them whole draws. Correctness of the pixels they produce is what
/// [`CapabilityProber`](crate::CapabilityProber) checks.
pub trait NativeBackend: Send + Sync {
    /// Short human-readable backend name, used in logs.
    fn name(&self) -> &str;

    /// Set `op` as the active composite operation on a scratch context and report what the
    /// backend kept (`None` when it rejected the name).
    ///
    /// An error means no rendering context could be acquired at all.
    fn round_trip_operation(&self, op: &str) -> BlendResult<Option<String>>;

    /// Draw the `rect` portion of `src` onto `dest` with global `alpha` and `mode`.
    ///
    /// `rect` is not pre-clipped; the backend clips against both buffers itself.
    fn draw(
        &self,
        dest: &mut PixelBuffer,
        src: &PixelBuffer,
        rect: CopyRect,
        alpha: f64,
        mode: BlendMode,
    ) -> BlendResult<()>;
}
