//! Values crossing the JavaScript boundary.
use serde::{Deserialize, Serialize};
use spinwheel_core::{ConfigError, SpinOutcome, WheelConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("expected an array of strings: {0}")]
    Decode(String),
    #[error("no element with id `{0}`")]
    MissingElement(String),
    #[error("browser call failed: {0}")]
    Browser(String),
}

#[cfg(target_arch = "wasm32")]
impl From<BridgeError> for wasm_bindgen::JsValue {
    fn from(err: BridgeError) -> Self {
        Self::from_str(&err.to_string())
    }
}

/// Spin result as handed to JavaScript, with the rotation to animate to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinPayload {
    #[serde(flatten)]
    pub outcome: SpinOutcome,
    pub rotation_deg: f64,
}

impl SpinPayload {
    #[must_use]
    pub const fn new(outcome: SpinOutcome, rotation_deg: f64) -> Self {
        Self {
            outcome,
            rotation_deg,
        }
    }
}

/// Config from an optional JSON override, else the bundled defaults.
///
/// # Errors
///
/// Returns an error if the override is present but invalid.
pub fn resolve_config(config_json: Option<&str>) -> Result<WheelConfig, BridgeError> {
    match config_json.map(str::trim).filter(|json| !json.is_empty()) {
        Some(json) => Ok(WheelConfig::from_json(json)?),
        None => Ok(WheelConfig::default_config()),
    }
}
