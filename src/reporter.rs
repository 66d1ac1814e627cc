//! Capability reporter: resolves cameras by facing and assembles responses
//! from a [`CharacteristicsProvider`].

use serde::Serialize;
use tracing::debug;

use crate::capability::{CameraDescriptor, CameraInfo, Facing};
use crate::resolution::{resolutions_from_sizes, Resolution};
use crate::traits::{CameraError, CharacteristicsProvider, Result};

/// Response of [`CameraReporter::list_resolutions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionList {
    /// JPEG output resolutions in platform order.
    pub resolutions: Vec<Resolution>,
}

/// Response of [`CameraReporter::list_available_cameras`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CameraList {
    /// Every camera the platform enumerates.
    pub cameras: Vec<CameraDescriptor>,
}

/// Reads characteristics from a provider and turns them into responses.
///
/// Nothing is cached: every call re-enumerates cameras and re-reads their
/// characteristics.
#[derive(Debug, Clone)]
pub struct CameraReporter<P> {
    provider: P,
}

impl<P: CharacteristicsProvider> CameraReporter<P> {
    /// Create a reporter over `provider`.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Id of the first camera facing `requested` (`"back"` or `"front"`).
    ///
    /// Any other requested value, `"external"` included, never matches.
    pub fn camera_id(&self, requested: &str) -> Result<String> {
        let wanted = Facing::selectable(requested);

        for id in self.provider.camera_ids()? {
            let chars = self.provider.characteristics(&id)?;
            let facing = Facing::from_code(chars.lens_facing);
            if wanted == Some(facing) {
                debug!(camera = %id, facing = requested, "resolved camera");
                return Ok(id);
            }
        }

        debug!(facing = requested, "no camera with requested facing");
        Err(CameraError::CameraNotFound)
    }

    /// JPEG output resolutions of the camera facing `requested`.
    pub fn list_resolutions(&self, requested: &str) -> Result<ResolutionList> {
        let id = self.camera_id(requested)?;
        let chars = self.provider.characteristics(&id)?;
        let config = chars
            .stream_configuration
            .ok_or(CameraError::NoStreamConfiguration)?;

        let resolutions = resolutions_from_sizes(&config.jpeg_output_sizes());
        debug!(camera = %id, count = resolutions.len(), "listed resolutions");
        Ok(ResolutionList { resolutions })
    }

    /// Full capability report of the camera facing `requested`.
    pub fn camera_info(&self, requested: &str) -> Result<CameraInfo> {
        let id = self.camera_id(requested)?;
        let chars = self.provider.characteristics(&id)?;
        let facing = Facing::from_code(chars.lens_facing);
        Ok(CameraInfo::from_characteristics(id, facing, &chars))
    }

    /// Every camera the platform knows about, unfiltered.
    pub fn list_available_cameras(&self) -> Result<CameraList> {
        let cameras = self
            .provider
            .camera_ids()?
            .into_iter()
            .map(|id| {
                let chars = self.provider.characteristics(&id)?;
                Ok(CameraDescriptor::new(id, chars.lens_facing))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(count = cameras.len(), "listed cameras");
        Ok(CameraList { cameras })
    }
}
