//! Camera-info: camera capability reporting behind a plugin-style bridge
//!
//! This library reads static camera characteristics through a narrow
//! provider trait, derives resolutions, zoom/focus capabilities and exposure
//! ranges from them, and serves the results as JSON responses. A V4L2
//! provider covers real hardware; a mock provider covers tests.

pub mod bridge;
pub mod capability;
pub mod device;
pub mod reporter;
pub mod resolution;
pub mod traits;

#[cfg(test)]
pub mod mock;

pub use bridge::{Bridge, BridgeError, Method, RequestOptions};
pub use capability::{CameraDescriptor, CameraInfo, Facing, FocusMode, ZoomCapability, ZoomType};
pub use device::{FacingOverride, V4L2Provider};
pub use reporter::{CameraList, CameraReporter, ResolutionList};
pub use resolution::{aspect_ratio, filter_by_aspect, max_resolution, Resolution};
pub use traits::{
    CameraError, Characteristics, CharacteristicsProvider, FourCC, Range, Size, SizeF,
    StreamConfiguration,
};
