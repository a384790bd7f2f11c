use std::sync::Arc;

use anyhow::Context;
use base64::Engine;

use crate::{
    blend::mode::BlendMode,
    foundation::{
        core::{CopyRect, PixelBuffer},
        error::{BlendError, BlendResult},
    },
    probe::registry::{CapabilityRegistry, ProbeOutcome},
    render::backend::NativeBackend,
};

// 2x2 near-opaque white PNG. Color-dodge of anything onto white is white, so a correct
// backend reads back red >= 128 at the origin.
const REFERENCE_PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAIAAAACCAYAAABytg0kAAAAGUlEQVQI1wXBAQEAAAgCIOz/5TJI20UGhz5D2wX8PWbkFQAAAABJRU5ErkJggg==";

const PROBE_SURFACE: (u32, u32) = (257, 256);
const PROBE_ALPHA: f64 = 0.5;

/// Determines which modes a [`NativeBackend`] can be trusted with.
///
/// Probing runs in two phases. [`start`](Self::start) synchronously asks the backend which
/// operation names it retains and publishes them in a [`CapabilityRegistry`]. It then renders
/// a reference image with `color-dodge` on a background thread and removes that mode if the
/// readback is wrong. Until that thread finishes the registry may still list `color-dodge`;
/// await [`CapabilityRegistry::probed`] when that matters.
pub struct CapabilityProber {
    backend: Arc<dyn NativeBackend>,
    reference_png: Option<Vec<u8>>,
    verify_color_dodge: bool,
}

impl CapabilityProber {
    /// Probe `backend` with the built-in reference image.
    pub fn new(backend: Arc<dyn NativeBackend>) -> Self {
        Self {
            backend,
            reference_png: None,
            verify_color_dodge: true,
        }
    }

    /// Use different PNG bytes for the `color-dodge` check.
    pub fn with_reference_png(mut self, png: Vec<u8>) -> Self {
        self.reference_png = Some(png);
        self
    }

    /// Enable or disable the asynchronous `color-dodge` check.
    pub fn verify_color_dodge(mut self, enabled: bool) -> Self {
        self.verify_color_dodge = enabled;
        self
    }

    /// Run the synchronous phase and launch the asynchronous one.
    ///
    /// Fails only when the backend cannot provide a rendering context; the caller should then
    /// fall back to software compositing for every mode.
    #[tracing::instrument(skip_all, fields(backend = self.backend.name()))]
    pub fn start(self) -> BlendResult<Arc<CapabilityRegistry>> {
        let modes = probe_operations(self.backend.as_ref())?;
        tracing::debug!(accepted = modes.len(), "native composite operations probed");
        let registry = Arc::new(CapabilityRegistry::with_modes(modes, ProbeOutcome::Pending));

        if !self.verify_color_dodge || !registry.contains(BlendMode::ColorDodge) {
            registry.finish(ProbeOutcome::Skipped);
            return Ok(registry);
        }

        let worker = {
            let registry = Arc::clone(&registry);
            let backend = Arc::clone(&self.backend);
            let png = self.reference_png;
            move || {
                let outcome = verify_color_dodge(backend.as_ref(), &registry, png.as_deref());
                registry.finish(outcome);
            }
        };
        if let Err(e) = std::thread::Builder::new()
            .name("layerblend-probe".into())
            .spawn(worker)
        {
            tracing::warn!(error = %e, "could not spawn probe thread; color-dodge stays native");
            registry.finish(ProbeOutcome::ReferenceUnavailable);
        }
        Ok(registry)
    }
}

/// Ask `backend` which identifiers it retains verbatim.
pub fn probe_operations(backend: &dyn NativeBackend) -> BlendResult<Vec<BlendMode>> {
    let mut accepted = Vec::new();
    for mode in BlendMode::ALL {
        let kept = backend.round_trip_operation(mode.as_str()).map_err(|e| {
            BlendError::backend(format!(
                "cannot acquire a rendering context from {}: {e}",
                backend.name()
            ))
        })?;
        if kept.as_deref() == Some(mode.as_str()) {
            accepted.push(mode);
        }
    }
    Ok(accepted)
}

/// Render the reference image with `color-dodge` and drop the mode from `registry` if the
/// result is wrong.
pub fn verify_color_dodge(
    backend: &dyn NativeBackend,
    registry: &CapabilityRegistry,
    reference_png: Option<&[u8]>,
) -> ProbeOutcome {
    let reference = match load_reference(reference_png) {
        Ok(img) => img,
        Err(e) => {
            tracing::warn!(error = %e, "reference image unavailable; color-dodge stays native");
            return ProbeOutcome::ReferenceUnavailable;
        }
    };

    let broken = match render_probe(backend, &reference) {
        Ok(red) => red < 128,
        Err(e) => {
            tracing::warn!(error = %e, "color-dodge probe draw failed");
            true
        }
    };
    if broken {
        registry.remove(BlendMode::ColorDodge);
        tracing::warn!(backend = backend.name(), "native color-dodge is broken; using software");
        ProbeOutcome::Disqualified
    } else {
        tracing::debug!(backend = backend.name(), "native color-dodge verified");
        ProbeOutcome::Verified
    }
}

fn render_probe(backend: &dyn NativeBackend, reference: &PixelBuffer) -> BlendResult<u8> {
    let (w, h) = PROBE_SURFACE;
    let mut surface = PixelBuffer::filled(w, h, [255, 255, 255, 255]);
    let rect = CopyRect::at(
        0,
        0,
        i32::try_from(reference.width()).map_err(anyhow::Error::from)?,
        i32::try_from(reference.height()).map_err(anyhow::Error::from)?,
    );
    backend.draw(&mut surface, reference, rect, PROBE_ALPHA, BlendMode::ColorDodge)?;
    surface
        .pixel(0, 0)
        .map(|px| px[0])
        .ok_or_else(|| BlendError::validation("probe surface is empty"))
}

fn load_reference(png: Option<&[u8]>) -> BlendResult<PixelBuffer> {
    let decoded;
    let bytes = match png {
        Some(bytes) => bytes,
        None => {
            decoded = base64::engine::general_purpose::STANDARD
                .decode(REFERENCE_PNG_BASE64)
                .context("decode embedded reference image")?;
            decoded.as_slice()
        }
    };
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .context("load reference image")?;
    Ok(PixelBuffer::from(img.to_rgba8()))
}

#[cfg(test)]
#[path = "../../tests/unit/probe/prober.rs"]
mod tests;
