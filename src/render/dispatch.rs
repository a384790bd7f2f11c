use std::sync::Arc;

use crate::{
    blend::mode::BlendMode,
    foundation::{
        config::{CompositorConfig, NativePolicy},
        core::{CopyRect, PixelBuffer},
        error::BlendResult,
    },
    probe::{prober::CapabilityProber, registry::CapabilityRegistry},
    render::{backend::NativeBackend, clip::clip_region, software::blend_region},
};

/// Top-level compositing entry point.
///
/// Each call routes either to the native backend, when the mode is currently in the
/// registry's safe set, or to the software engine over the clipped region. The registry may
/// still be forming while calls arrive; see [`CapabilityRegistry::probed`].
pub struct Compositor {
    backend: Option<Arc<dyn NativeBackend>>,
    registry: Arc<CapabilityRegistry>,
}

impl Compositor {
    /// Probe `backend` according to `config` and build a compositor over it.
    ///
    /// A backend that cannot provide a rendering context is a fatal error; use
    /// [`Compositor::software`] in that case.
    pub fn new(backend: Arc<dyn NativeBackend>, config: &CompositorConfig) -> BlendResult<Self> {
        match config.native {
            NativePolicy::SoftwareOnly => Ok(Self::software()),
            NativePolicy::Auto => {
                let registry = CapabilityProber::new(Arc::clone(&backend))
                    .verify_color_dodge(config.verify_color_dodge)
                    .start()?;
                Ok(Self::with_registry(backend, registry))
            }
        }
    }

    /// A compositor that never uses a native backend.
    pub fn software() -> Self {
        Self {
            backend: None,
            registry: Arc::new(CapabilityRegistry::empty()),
        }
    }

    /// Use an already-populated registry instead of probing.
    pub fn with_registry(backend: Arc<dyn NativeBackend>, registry: Arc<CapabilityRegistry>) -> Self {
        Self {
            backend: Some(backend),
            registry,
        }
    }

    /// The registry gating native routing.
    pub fn registry(&self) -> &Arc<CapabilityRegistry> {
        &self.registry
    }

    /// Composite `rect` of `src` onto `dest` with global opacity `alpha` and `mode`.
    ///
    /// Empty or fully transparent requests are a no-op.
    pub fn composite(
        &self,
        dest: &mut PixelBuffer,
        src: &PixelBuffer,
        rect: CopyRect,
        alpha: f64,
        mode: BlendMode,
    ) -> BlendResult<()> {
        let alpha = if alpha.is_nan() {
            0.0
        } else {
            alpha.clamp(0.0, 1.0)
        };

        if let Some(backend) = self.backend.as_deref()
            && self.registry.contains(mode)
        {
            tracing::trace!(%mode, backend = backend.name(), "composite routed native");
            return backend.draw(dest, src, rect, alpha, mode);
        }

        let Some(region) = clip_region(
            rect,
            (src.width(), src.height()),
            (dest.width(), dest.height()),
            alpha,
        ) else {
            return Ok(());
        };
        tracing::trace!(%mode, w = region.width, h = region.height, "composite routed software");
        blend_region(dest, src, region, alpha, mode)
    }

    /// [`composite`](Self::composite) with a mode identifier such as `"multiply"` or
    /// `"normal"`. Unknown names fail with [`BlendError::InvalidBlendMode`] before `dest` is
    /// touched.
    ///
    /// [`BlendError::InvalidBlendMode`]: crate::BlendError::InvalidBlendMode
    pub fn composite_named(
        &self,
        dest: &mut PixelBuffer,
        src: &PixelBuffer,
        rect: CopyRect,
        alpha: f64,
        mode: &str,
    ) -> BlendResult<()> {
        let mode: BlendMode = mode.parse()?;
        self.composite(dest, src, rect, alpha, mode)
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::software()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/dispatch.rs"]
mod tests;
