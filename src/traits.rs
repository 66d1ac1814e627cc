//! Core traits and types for the camera characteristics abstraction.

use serde::Serialize;

/// Pixel format representation (e.g., JPEG, MJPG).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// Create a new `FourCC` from a 4-byte array.
    #[must_use]
    pub const fn new(code: &[u8; 4]) -> Self {
        Self(*code)
    }

    /// Still JPEG output.
    pub const JPEG: Self = Self::new(b"JPEG");
    /// MJPEG pixel format (Motion JPEG).
    pub const MJPG: Self = Self::new(b"MJPG");
}

impl From<v4l::FourCC> for FourCC {
    fn from(fourcc: v4l::FourCC) -> Self {
        Self(fourcc.repr)
    }
}

impl From<FourCC> for v4l::FourCC {
    fn from(fourcc: FourCC) -> Self {
        Self::new(&fourcc.0)
    }
}

/// Platform codes, numbered the way Android Camera2 numbers them.
pub mod codes {
    /// `LENS_FACING_FRONT`
    pub const LENS_FACING_FRONT: i32 = 0;
    /// `LENS_FACING_BACK`
    pub const LENS_FACING_BACK: i32 = 1;
    /// `LENS_FACING_EXTERNAL`
    pub const LENS_FACING_EXTERNAL: i32 = 2;

    /// `CONTROL_AF_MODE_OFF`
    pub const AF_MODE_OFF: i32 = 0;
    /// `CONTROL_AF_MODE_AUTO`
    pub const AF_MODE_AUTO: i32 = 1;
    /// `CONTROL_AF_MODE_MACRO`
    pub const AF_MODE_MACRO: i32 = 2;
    /// `CONTROL_AF_MODE_CONTINUOUS_VIDEO`
    pub const AF_MODE_CONTINUOUS_VIDEO: i32 = 3;
    /// `CONTROL_AF_MODE_CONTINUOUS_PICTURE`
    pub const AF_MODE_CONTINUOUS_PICTURE: i32 = 4;
    /// `CONTROL_AF_MODE_EDOF`
    pub const AF_MODE_EDOF: i32 = 5;
}

/// Output size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel area.
    #[must_use]
    pub const fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Physical size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeF {
    /// Width in millimetres.
    pub width: f32,
    /// Height in millimetres.
    pub height: f32,
}

/// Inclusive integer range, used for ISO sensitivity and exposure compensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    /// Lower bound.
    pub min: i32,
    /// Upper bound.
    pub max: i32,
}

impl Range {
    /// Create a new range.
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

/// Table of supported output formats and their sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamConfiguration {
    outputs: Vec<(FourCC, Vec<Size>)>,
}

impl StreamConfiguration {
    /// Create an empty configuration table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            outputs: Vec::new(),
        }
    }

    /// Add the sizes supported for one output format.
    #[must_use]
    pub fn with_output(mut self, fourcc: FourCC, sizes: Vec<Size>) -> Self {
        self.push_output(fourcc, sizes);
        self
    }

    /// Add the sizes supported for one output format in place.
    pub fn push_output(&mut self, fourcc: FourCC, sizes: Vec<Size>) {
        self.outputs.push((fourcc, sizes));
    }

    /// Sizes supported for `fourcc`, in platform order.
    pub fn output_sizes(&self, fourcc: FourCC) -> impl Iterator<Item = Size> + '_ {
        self.outputs
            .iter()
            .filter(move |(fmt, _)| *fmt == fourcc)
            .flat_map(|(_, sizes)| sizes.iter().copied())
    }

    /// Sizes usable for JPEG capture: `JPEG` outputs first, then `MJPG`.
    #[must_use]
    pub fn jpeg_output_sizes(&self) -> Vec<Size> {
        self.output_sizes(FourCC::JPEG)
            .chain(self.output_sizes(FourCC::MJPG))
            .collect()
    }
}

/// Static characteristics of one camera. Every field is optional; a missing
/// value means the platform does not report it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Characteristics {
    /// Lens facing code (see [`codes`]).
    pub lens_facing: Option<i32>,
    /// Supported output formats and sizes.
    pub stream_configuration: Option<StreamConfiguration>,
    /// Maximum digital zoom factor.
    pub max_digital_zoom: Option<f32>,
    /// Available lens focal lengths in millimetres.
    pub focal_lengths: Option<Vec<f32>>,
    /// Physical sensor size.
    pub sensor_physical_size: Option<SizeF>,
    /// Available autofocus mode codes, in platform order.
    pub af_available_modes: Option<Vec<i32>>,
    /// Supported ISO sensitivity range.
    pub sensitivity_range: Option<Range>,
    /// Supported exposure compensation range, in compensation steps.
    pub ae_compensation_range: Option<Range>,
}

/// Error type for camera characteristics queries.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    /// No camera matches the requested facing.
    #[error("Camera not found")]
    CameraNotFound,
    /// The camera exposes no output-size table.
    #[error("No stream configuration map available")]
    NoStreamConfiguration,
    /// The platform denied or failed the read.
    #[error("Camera access error: {0}")]
    PlatformAccess(String),
}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        Self::PlatformAccess(err.to_string())
    }
}

/// Result type for camera operations.
pub type Result<T> = std::result::Result<T, CameraError>;

/// Read-only access to the platform's camera characteristics.
pub trait CharacteristicsProvider {
    /// List every camera identifier, in platform enumeration order.
    fn camera_ids(&self) -> Result<Vec<String>>;

    /// Read the static characteristics of one camera.
    fn characteristics(&self, camera_id: &str) -> Result<Characteristics>;
}

impl<P: CharacteristicsProvider + ?Sized> CharacteristicsProvider for &P {
    fn camera_ids(&self) -> Result<Vec<String>> {
        (**self).camera_ids()
    }

    fn characteristics(&self, camera_id: &str) -> Result<Characteristics> {
        (**self).characteristics(camera_id)
    }
}
