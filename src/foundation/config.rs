use crate::foundation::error::{BlendError, BlendResult};

/// Whether a [`Compositor`](crate::Compositor) may route work to a native backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NativePolicy {
    /// Probe the backend and use it for every mode it handles correctly.
    #[default]
    Auto,
    /// Always run the software engine.
    SoftwareOnly,
}

/// Compositor settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositorConfig {
    /// Native routing policy.
    pub native: NativePolicy,
    /// Run the asynchronous `color-dodge` correctness probe after startup.
    pub verify_color_dodge: bool,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            native: NativePolicy::Auto,
            verify_color_dodge: true,
        }
    }
}

impl CompositorConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(s: &str) -> BlendResult<Self> {
        serde_json::from_str(s).map_err(|e| BlendError::config(e.to_string()))
    }

    /// Defaults overridden by `LAYERBLEND_NATIVE` and `LAYERBLEND_VERIFY_COLOR_DODGE`.
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(policy) = lookup("LAYERBLEND_NATIVE").and_then(|v| parse_policy(&v)) {
            cfg.native = policy;
        }
        if let Some(verify) = lookup("LAYERBLEND_VERIFY_COLOR_DODGE").and_then(|v| parse_flag(&v))
        {
            cfg.verify_color_dodge = verify;
        }
        cfg
    }
}

fn parse_policy(v: &str) -> Option<NativePolicy> {
    match v.trim().to_ascii_lowercase().as_str() {
        "auto" => Some(NativePolicy::Auto),
        "software-only" | "software" | "off" => Some(NativePolicy::SoftwareOnly),
        _ => None,
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
