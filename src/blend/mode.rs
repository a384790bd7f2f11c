use std::{fmt, str::FromStr};

use crate::foundation::error::BlendError;

/// Every composite operation the compositor understands.
///
/// Identifiers follow the canvas `globalCompositeOperation` spelling; `normal` is accepted as
/// an alias of [`BlendMode::SourceOver`] when parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// Replace destination alpha with source alpha, keep destination color.
    CopyAlpha,
    /// Replace destination color with source color, alpha becomes `255 * alpha`.
    CopyOpaque,
    /// Plain alpha compositing.
    #[serde(alias = "normal")]
    SourceOver,
    /// Per-channel minimum.
    Darken,
    /// Per-channel product.
    Multiply,
    /// Darkens by increasing contrast.
    ColorBurn,
    /// Sum minus white, floored at black.
    LinearBurn,
    /// Whichever color has lower luminance.
    DarkerColor,
    /// Per-channel maximum.
    Lighten,
    /// Inverted product of inverses.
    Screen,
    /// Brightens by decreasing contrast.
    ColorDodge,
    /// Channel sum (add).
    LinearDodge,
    /// Whichever color has higher luminance.
    LighterColor,
    /// Multiply or screen, keyed on the destination.
    Overlay,
    /// Gentle dodge or burn, keyed on the source.
    SoftLight,
    /// Multiply or screen, keyed on the source.
    HardLight,
    /// Color burn or color dodge, keyed on the source.
    VividLight,
    /// Linear burn or linear dodge, keyed on the source.
    LinearLight,
    /// Darken or lighten, keyed on the source.
    PinLight,
    /// Vivid light thresholded to 0 or 255.
    HardMix,
    /// Absolute channel difference.
    Difference,
    /// Lower-contrast difference.
    Exclusion,
    /// Destination minus source, floored at black.
    Subtract,
    /// Destination divided by source.
    Divide,
    /// Source hue with destination saturation and luminance.
    Hue,
    /// Source saturation with destination hue and luminance.
    Saturation,
    /// Source hue and saturation with destination luminance.
    Color,
    /// Source luminance with destination hue and saturation.
    Luminosity,
}

/// Per-channel formulas: each output channel depends only on the matching input channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Separable {
    Normal,
    Darken,
    Multiply,
    ColorBurn,
    LinearBurn,
    Lighten,
    Screen,
    ColorDodge,
    LinearDodge,
    Overlay,
    SoftLight,
    HardLight,
    VividLight,
    LinearLight,
    PinLight,
    HardMix,
    Difference,
    Exclusion,
    Subtract,
    Divide,
}

/// Formulas that need the whole RGB triple (luminance and saturation based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum NonSeparable {
    DarkerColor,
    LighterColor,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

/// The formula family a [`BlendMode`] is computed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormulaKind {
    /// Channel-wise formula followed by alpha compositing.
    Separable(Separable),
    /// RGB-triple formula followed by alpha compositing.
    NonSeparable(NonSeparable),
    /// Alpha-only copy.
    CopyAlpha,
    /// Color copy with constant alpha.
    CopyOpaque,
}

impl BlendMode {
    /// All 28 modes, in canonical order.
    pub const ALL: [BlendMode; 28] = [
        BlendMode::CopyAlpha,
        BlendMode::CopyOpaque,
        BlendMode::SourceOver,
        BlendMode::Darken,
        BlendMode::Multiply,
        BlendMode::ColorBurn,
        BlendMode::LinearBurn,
        BlendMode::DarkerColor,
        BlendMode::Lighten,
        BlendMode::Screen,
        BlendMode::ColorDodge,
        BlendMode::LinearDodge,
        BlendMode::LighterColor,
        BlendMode::Overlay,
        BlendMode::SoftLight,
        BlendMode::HardLight,
        BlendMode::VividLight,
        BlendMode::LinearLight,
        BlendMode::PinLight,
        BlendMode::HardMix,
        BlendMode::Difference,
        BlendMode::Exclusion,
        BlendMode::Subtract,
        BlendMode::Divide,
        BlendMode::Hue,
        BlendMode::Saturation,
        BlendMode::Color,
        BlendMode::Luminosity,
    ];

    /// Canonical identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            BlendMode::CopyAlpha => "copy-alpha",
            BlendMode::CopyOpaque => "copy-opaque",
            BlendMode::SourceOver => "source-over",
            BlendMode::Darken => "darken",
            BlendMode::Multiply => "multiply",
            BlendMode::ColorBurn => "color-burn",
            BlendMode::LinearBurn => "linear-burn",
            BlendMode::DarkerColor => "darker-color",
            BlendMode::Lighten => "lighten",
            BlendMode::Screen => "screen",
            BlendMode::ColorDodge => "color-dodge",
            BlendMode::LinearDodge => "linear-dodge",
            BlendMode::LighterColor => "lighter-color",
            BlendMode::Overlay => "overlay",
            BlendMode::SoftLight => "soft-light",
            BlendMode::HardLight => "hard-light",
            BlendMode::VividLight => "vivid-light",
            BlendMode::LinearLight => "linear-light",
            BlendMode::PinLight => "pin-light",
            BlendMode::HardMix => "hard-mix",
            BlendMode::Difference => "difference",
            BlendMode::Exclusion => "exclusion",
            BlendMode::Subtract => "subtract",
            BlendMode::Divide => "divide",
            BlendMode::Hue => "hue",
            BlendMode::Saturation => "saturation",
            BlendMode::Color => "color",
            BlendMode::Luminosity => "luminosity",
        }
    }

    /// Which formula family computes this mode.
    pub fn kind(self) -> FormulaKind {
        use FormulaKind as K;
        match self {
            BlendMode::CopyAlpha => K::CopyAlpha,
            BlendMode::CopyOpaque => K::CopyOpaque,
            BlendMode::SourceOver => K::Separable(Separable::Normal),
            BlendMode::Darken => K::Separable(Separable::Darken),
            BlendMode::Multiply => K::Separable(Separable::Multiply),
            BlendMode::ColorBurn => K::Separable(Separable::ColorBurn),
            BlendMode::LinearBurn => K::Separable(Separable::LinearBurn),
            BlendMode::DarkerColor => K::NonSeparable(NonSeparable::DarkerColor),
            BlendMode::Lighten => K::Separable(Separable::Lighten),
            BlendMode::Screen => K::Separable(Separable::Screen),
            BlendMode::ColorDodge => K::Separable(Separable::ColorDodge),
            BlendMode::LinearDodge => K::Separable(Separable::LinearDodge),
            BlendMode::LighterColor => K::NonSeparable(NonSeparable::LighterColor),
            BlendMode::Overlay => K::Separable(Separable::Overlay),
            BlendMode::SoftLight => K::Separable(Separable::SoftLight),
            BlendMode::HardLight => K::Separable(Separable::HardLight),
            BlendMode::VividLight => K::Separable(Separable::VividLight),
            BlendMode::LinearLight => K::Separable(Separable::LinearLight),
            BlendMode::PinLight => K::Separable(Separable::PinLight),
            BlendMode::HardMix => K::Separable(Separable::HardMix),
            BlendMode::Difference => K::Separable(Separable::Difference),
            BlendMode::Exclusion => K::Separable(Separable::Exclusion),
            BlendMode::Subtract => K::Separable(Separable::Subtract),
            BlendMode::Divide => K::Separable(Separable::Divide),
            BlendMode::Hue => K::NonSeparable(NonSeparable::Hue),
            BlendMode::Saturation => K::NonSeparable(NonSeparable::Saturation),
            BlendMode::Color => K::NonSeparable(NonSeparable::Color),
            BlendMode::Luminosity => K::NonSeparable(NonSeparable::Luminosity),
        }
    }

    /// Bit used for this mode in capability sets.
    pub(crate) fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl FromStr for BlendMode {
    type Err = BlendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "normal" {
            return Ok(BlendMode::SourceOver);
        }
        BlendMode::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| BlendError::invalid_mode(s))
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/mode.rs"]
mod tests;
