//! Layerblend composites 8-bit straight-alpha RGBA buffers with the blend modes found in
//! professional image editors.
//!
//! # Overview
//!
//! 1. **Clip**: a requested [`CopyRect`] is intersected with both buffers ([`clip_region`]).
//! 2. **Blend**: each pixel runs a per-channel ([`Separable`]) or whole-triple
//!    ([`NonSeparable`]) formula, or one of the two copy modes.
//! 3. **Composite**: the blended color is merged with source and destination using
//!    fixed-point alpha weights ([`composite_pixel`]), so results are bit-exact across
//!    platforms.
//!
//! A [`Compositor`] sits on top and decides per call whether a [`NativeBackend`] may do the
//! work instead. Which modes the backend handles correctly is discovered once by a
//! [`CapabilityProber`], whose second phase runs in the background and may still be in
//! flight when the first composite calls arrive.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Integer hot path**: no floating point inside the per-pixel loops except soft light.
//! - **Straight RGBA8** at the boundary: buffers are never premultiplied in place.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod blend;
mod foundation;
mod probe;
mod render;

pub use blend::alpha::{AlphaWeights, RECIP_255, SHIFT, composite_pixel, div255, scale_alpha};
pub use blend::hsl::{
    blend_rgb, clip_color, luminance, saturation, set_luminance, set_saturation,
};
pub use blend::mode::{BlendMode, FormulaKind, NonSeparable, Separable};
pub use blend::separable::blend_channel;
pub use foundation::config::{CompositorConfig, NativePolicy};
pub use foundation::core::{CopyRect, PixelBuffer, Rgb};
pub use foundation::error::{BlendError, BlendResult};
pub use probe::prober::{CapabilityProber, probe_operations, verify_color_dodge};
pub use probe::registry::{CapabilityRegistry, ProbeOutcome};
pub use render::backend::NativeBackend;
pub use render::clip::{Region, clip_region};
pub use render::dispatch::Compositor;
pub use render::software::blend_region;
pub use render::vello::VelloBackend;
