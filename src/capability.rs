//! Capability derivation: facing and focus label tables, the zoom-type
//! heuristic, and assembly of the camera info response.

use serde::{Serialize, Serializer};

use crate::resolution::{resolutions_from_sizes, Resolution};
use crate::traits::{codes, Characteristics, Range};

/// Physical orientation of a camera module. Serializes as its [`label`](Self::label).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Rear-facing camera.
    Back,
    /// Front-facing camera.
    Front,
    /// Externally attached camera.
    External,
    /// Missing or unrecognized facing code.
    Unknown,
}

impl Facing {
    const ALL: [Self; 4] = [Self::Back, Self::Front, Self::External, Self::Unknown];

    /// Map a platform lens facing code. Missing or unknown codes map to `Unknown`.
    #[must_use]
    pub const fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(codes::LENS_FACING_BACK) => Self::Back,
            Some(codes::LENS_FACING_FRONT) => Self::Front,
            Some(codes::LENS_FACING_EXTERNAL) => Self::External,
            _ => Self::Unknown,
        }
    }

    /// Platform code for this facing, if it has one.
    #[must_use]
    pub const fn code(self) -> Option<i32> {
        match self {
            Self::Back => Some(codes::LENS_FACING_BACK),
            Self::Front => Some(codes::LENS_FACING_FRONT),
            Self::External => Some(codes::LENS_FACING_EXTERNAL),
            Self::Unknown => None,
        }
    }

    /// Parse a requested facing. Only `"back"` and `"front"` are selectable.
    #[must_use]
    pub fn selectable(requested: &str) -> Option<Self> {
        match requested {
            "back" => Some(Self::Back),
            "front" => Some(Self::Front),
            _ => None,
        }
    }

    /// Wire label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Front => "front",
            Self::External => "external",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Back => "Cámara trasera",
            Self::Front => "Cámara frontal",
            Self::External => "Cámara externa",
            Self::Unknown => "Cámara desconocida",
        }
    }
}

impl std::str::FromStr for Facing {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|facing| facing.label() == s)
            .ok_or_else(|| format!("unknown facing: {s}"))
    }
}

impl Serialize for Facing {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Autofocus mode. Serializes as its [`label`](Self::label).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMode {
    /// Single-shot autofocus.
    Auto,
    /// Continuous autofocus tuned for stills.
    Continuous,
    /// Close-up autofocus.
    Macro,
    /// Continuous autofocus tuned for video.
    ContinuousVideo,
    /// Extended depth of field.
    Edof,
    /// Manual focus.
    Off,
    /// Unrecognized platform code.
    Unknown,
}

impl FocusMode {
    /// Map a platform autofocus mode code.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            codes::AF_MODE_AUTO => Self::Auto,
            codes::AF_MODE_CONTINUOUS_PICTURE => Self::Continuous,
            codes::AF_MODE_MACRO => Self::Macro,
            codes::AF_MODE_CONTINUOUS_VIDEO => Self::ContinuousVideo,
            codes::AF_MODE_EDOF => Self::Edof,
            codes::AF_MODE_OFF => Self::Off,
            _ => Self::Unknown,
        }
    }

    /// Wire label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Continuous => "continuous",
            Self::Macro => "macro",
            Self::ContinuousVideo => "continuous_video",
            Self::Edof => "edof",
            Self::Off => "off",
            Self::Unknown => "unknown",
        }
    }
}

impl Serialize for FocusMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Map platform focus codes in order, without sorting or de-duplication.
#[must_use]
pub fn focus_modes(codes: &[i32]) -> Vec<FocusMode> {
    codes.iter().copied().map(FocusMode::from_code).collect()
}

/// How a camera achieves zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomType {
    /// Crop and upscale only.
    Digital,
    /// Multiple focal lengths.
    Optical,
    /// Large sensor plus a high digital zoom factor.
    Hybrid,
}

/// Digital zoom factor above which a large sensor counts as hybrid zoom.
const HYBRID_MIN_DIGITAL_ZOOM: f32 = 2.0;
/// Sensor width in millimetres above which hybrid zoom is assumed.
const HYBRID_MIN_SENSOR_WIDTH: f32 = 5.0;

/// Guess the zoom type from the focal lengths, max digital zoom and sensor
/// width. Returns `(has_optical_zoom, zoom_type)`; the first matching rule wins.
#[must_use]
pub fn classify_zoom(
    max_digital_zoom: Option<f32>,
    focal_lengths: Option<&[f32]>,
    sensor_width: Option<f32>,
) -> (bool, ZoomType) {
    if focal_lengths.is_some_and(|lengths| lengths.len() > 1) {
        return (true, ZoomType::Optical);
    }

    let high_zoom = max_digital_zoom.is_some_and(|zoom| zoom > HYBRID_MIN_DIGITAL_ZOOM);
    let large_sensor = sensor_width.is_some_and(|width| width > HYBRID_MIN_SENSOR_WIDTH);
    if high_zoom && large_sensor {
        return (true, ZoomType::Hybrid);
    }

    (false, ZoomType::Digital)
}

/// Zoom fields of the camera info response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomCapability {
    /// Maximum digital zoom factor.
    pub max_zoom: f32,
    /// Whether the camera is believed to have optical zoom.
    pub has_optical_zoom: bool,
    /// Classified zoom type.
    pub zoom_type: ZoomType,
    /// Whether zoom controls should be offered. Mirrors `has_optical_zoom`.
    pub enable_zoom_controls: bool,
}

impl ZoomCapability {
    /// Derive the zoom fields. They are only reported when the platform
    /// gives a max digital zoom, even though the classification does not
    /// depend on it alone.
    #[must_use]
    pub fn from_characteristics(chars: &Characteristics) -> Option<Self> {
        let (has_optical_zoom, zoom_type) = classify_zoom(
            chars.max_digital_zoom,
            chars.focal_lengths.as_deref(),
            chars.sensor_physical_size.map(|size| size.width),
        );

        chars.max_digital_zoom.map(|max_zoom| Self {
            max_zoom,
            has_optical_zoom,
            zoom_type,
            enable_zoom_controls: has_optical_zoom,
        })
    }
}

/// One entry of the available cameras listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CameraDescriptor {
    /// Platform camera identifier.
    pub id: String,
    /// Facing label.
    pub facing: Facing,
    /// Human-readable description.
    pub description: &'static str,
}

impl CameraDescriptor {
    /// Build a descriptor from a camera id and its lens facing code.
    #[must_use]
    pub fn new(id: String, lens_facing: Option<i32>) -> Self {
        let facing = Facing::from_code(lens_facing);
        Self {
            id,
            facing,
            description: facing.description(),
        }
    }
}

/// Full capability report for one camera.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraInfo {
    /// Platform camera identifier.
    pub id: String,
    /// Facing reported by the resolved camera.
    pub facing: Facing,
    /// JPEG output resolutions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_resolutions: Option<Vec<Resolution>>,
    /// Zoom fields, flattened into the response.
    #[serde(flatten)]
    pub zoom: Option<ZoomCapability>,
    /// Autofocus modes in platform order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_focus_modes: Option<Vec<FocusMode>>,
    /// ISO sensitivity range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_iso_ranges: Option<Range>,
    /// Exposure compensation range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_exposure_range: Option<Range>,
}

impl CameraInfo {
    /// Assemble the report for camera `id`, which reports `facing`.
    #[must_use]
    pub fn from_characteristics(id: String, facing: Facing, chars: &Characteristics) -> Self {
        Self {
            id,
            facing,
            supported_resolutions: chars
                .stream_configuration
                .as_ref()
                .map(|config| resolutions_from_sizes(&config.jpeg_output_sizes())),
            zoom: ZoomCapability::from_characteristics(chars),
            supported_focus_modes: chars.af_available_modes.as_deref().map(focus_modes),
            supported_iso_ranges: chars.sensitivity_range,
            supported_exposure_range: chars.ae_compensation_range,
        }
    }
}
