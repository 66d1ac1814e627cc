//! Plugin-style request bridge: dispatches a method name and a JSON options
//! object to the [`CameraReporter`] and returns a JSON response.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::reporter::CameraReporter;
use crate::traits::{CameraError, CharacteristicsProvider};

/// Camera requested when the options do not name one.
pub const DEFAULT_CAMERA: &str = "back";

/// Methods exposed through the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `getSupportedResolutions`, alias `listResolutions`.
    GetSupportedResolutions,
    /// `getCameraInfo`.
    GetCameraInfo,
    /// `getAvailableCameras`, alias `listAvailableCameras`.
    GetAvailableCameras,
}

impl Method {
    /// Canonical method name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetSupportedResolutions => "getSupportedResolutions",
            Self::GetCameraInfo => "getCameraInfo",
            Self::GetAvailableCameras => "getAvailableCameras",
        }
    }
}

impl std::str::FromStr for Method {
    type Err = BridgeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "getSupportedResolutions" | "listResolutions" => Ok(Self::GetSupportedResolutions),
            "getCameraInfo" => Ok(Self::GetCameraInfo),
            "getAvailableCameras" | "listAvailableCameras" => Ok(Self::GetAvailableCameras),
            other => Err(BridgeError::UnknownMethod(other.to_owned())),
        }
    }
}

/// Options accepted by the camera-scoped methods.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestOptions {
    /// Requested facing, `"back"` or `"front"`. A missing, `null` or
    /// non-string value falls back to `"back"`.
    #[serde(default = "default_camera", deserialize_with = "camera_or_default")]
    pub camera: String,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            camera: default_camera(),
        }
    }
}

fn default_camera() -> String {
    DEFAULT_CAMERA.to_owned()
}

fn camera_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .map_or_else(default_camera, str::to_owned))
}

impl RequestOptions {
    /// Parse options from a JSON value. `null` yields the defaults.
    pub fn from_value(options: &Value) -> Result<Self, BridgeError> {
        if options.is_null() {
            return Ok(Self::default());
        }
        Self::deserialize(options).map_err(BridgeError::InvalidOptions)
    }
}

/// Rejection returned to the caller. `Display` gives the rejection message.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The camera query failed.
    #[error(transparent)]
    Camera(#[from] CameraError),
    /// No such method.
    #[error("Method not implemented: {0}")]
    UnknownMethod(String),
    /// The options object could not be parsed.
    #[error("Invalid options: {0}")]
    InvalidOptions(#[source] serde_json::Error),
    /// The response could not be encoded.
    #[error("Failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Dispatches bridge calls to a [`CameraReporter`].
#[derive(Debug, Clone)]
pub struct Bridge<P> {
    reporter: CameraReporter<P>,
}

impl<P: CharacteristicsProvider> Bridge<P> {
    /// Create a bridge over `provider`.
    pub const fn new(provider: P) -> Self {
        Self {
            reporter: CameraReporter::new(provider),
        }
    }

    /// Handle one call by method name.
    pub fn call(&self, method: &str, options: &Value) -> Result<Value, BridgeError> {
        let method: Method = method.parse()?;
        self.invoke(method, options)
            .inspect_err(|err| warn!(method = method.name(), error = %err, "call rejected"))
    }

    /// Handle one call for an already-parsed method.
    pub fn invoke(&self, method: Method, options: &Value) -> Result<Value, BridgeError> {
        debug!(method = method.name(), "bridge call");
        let response = match method {
            Method::GetSupportedResolutions => {
                let options = RequestOptions::from_value(options)?;
                to_value(&self.reporter.list_resolutions(&options.camera)?)
            }
            Method::GetCameraInfo => {
                let options = RequestOptions::from_value(options)?;
                to_value(&self.reporter.camera_info(&options.camera)?)
            }
            Method::GetAvailableCameras => to_value(&self.reporter.list_available_cameras()?),
        };
        response.map_err(BridgeError::Encode)
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> serde_json::Result<Value> {
    serde_json::to_value(value)
}
