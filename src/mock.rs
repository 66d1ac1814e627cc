//! Mock characteristics provider for testing without hardware.

use crate::traits::{
    codes, CameraError, Characteristics, CharacteristicsProvider, FourCC, Range, Result, Size,
    SizeF, StreamConfiguration,
};

/// Mock provider serving synthetic characteristic sets.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    cameras: Vec<(String, Characteristics)>,
    failure: Option<String>,
    failing_camera: Option<String>,
}

impl MockProvider {
    /// Create a provider with no cameras.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A typical phone: a back camera with two lenses and a front camera.
    #[must_use]
    pub fn phone() -> Self {
        Self::new()
            .with_camera("0", back_camera())
            .with_camera("1", front_camera())
    }

    /// Add a camera. Cameras are enumerated in insertion order.
    #[must_use]
    pub fn with_camera(mut self, id: &str, characteristics: Characteristics) -> Self {
        self.cameras.push((id.to_owned(), characteristics));
        self
    }

    /// Fail every query with a platform access error.
    #[must_use]
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_owned());
        self
    }

    /// Fail characteristics reads for one camera only.
    #[must_use]
    pub fn failing_camera(mut self, id: &str, message: &str) -> Self {
        self.failing_camera = Some(id.to_owned());
        self.failure = Some(message.to_owned());
        self
    }

    fn check_failure(&self, camera_id: Option<&str>) -> Result<()> {
        let Some(message) = &self.failure else {
            return Ok(());
        };
        match (&self.failing_camera, camera_id) {
            (Some(failing), Some(id)) if failing != id => Ok(()),
            (Some(_), None) => Ok(()),
            _ => Err(CameraError::PlatformAccess(message.clone())),
        }
    }
}

impl CharacteristicsProvider for MockProvider {
    fn camera_ids(&self) -> Result<Vec<String>> {
        self.check_failure(None)?;
        Ok(self.cameras.iter().map(|(id, _)| id.clone()).collect())
    }

    fn characteristics(&self, camera_id: &str) -> Result<Characteristics> {
        self.check_failure(Some(camera_id))?;
        self.cameras
            .iter()
            .find(|(id, _)| id == camera_id)
            .map(|(_, chars)| chars.clone())
            .ok_or_else(|| CameraError::PlatformAccess(format!("unknown camera id {camera_id}")))
    }
}

/// Back camera with wide and tele lenses and a full set of characteristics.
pub fn back_camera() -> Characteristics {
    Characteristics {
        lens_facing: Some(codes::LENS_FACING_BACK),
        stream_configuration: Some(StreamConfiguration::new().with_output(
            FourCC::JPEG,
            vec![Size::new(4000, 3000), Size::new(1920, 1080), Size::new(640, 480)],
        )),
        max_digital_zoom: Some(8.0),
        focal_lengths: Some(vec![4.7, 12.0]),
        sensor_physical_size: Some(SizeF {
            width: 6.4,
            height: 4.8,
        }),
        af_available_modes: Some(vec![
            codes::AF_MODE_OFF,
            codes::AF_MODE_AUTO,
            codes::AF_MODE_CONTINUOUS_PICTURE,
        ]),
        sensitivity_range: Some(Range::new(50, 6400)),
        ae_compensation_range: Some(Range::new(-24, 24)),
    }
}

/// Fixed-focus front camera with a single lens.
pub fn front_camera() -> Characteristics {
    Characteristics {
        lens_facing: Some(codes::LENS_FACING_FRONT),
        stream_configuration: Some(
            StreamConfiguration::new().with_output(FourCC::JPEG, vec![Size::new(2592, 1944)]),
        ),
        max_digital_zoom: Some(4.0),
        focal_lengths: Some(vec![2.2]),
        sensor_physical_size: Some(SizeF {
            width: 3.6,
            height: 2.7,
        }),
        af_available_modes: Some(vec![codes::AF_MODE_OFF]),
        sensitivity_range: Some(Range::new(100, 1600)),
        ae_compensation_range: Some(Range::new(-12, 12)),
    }
}

/// Camera that reports a facing and nothing else.
pub fn bare_camera(lens_facing: i32) -> Characteristics {
    Characteristics {
        lens_facing: Some(lens_facing),
        ..Characteristics::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_enumeration_order() {
        let provider = MockProvider::phone();
        let ids = provider.camera_ids().expect("camera_ids should succeed");
        assert_eq!(ids, vec!["0".to_owned(), "1".to_owned()]);
    }

    #[test]
    fn test_mock_characteristics() {
        let provider = MockProvider::phone();
        let chars = provider
            .characteristics("1")
            .expect("characteristics should succeed");
        assert_eq!(chars.lens_facing, Some(codes::LENS_FACING_FRONT));
    }

    #[test]
    fn test_mock_unknown_id() {
        let provider = MockProvider::phone();
        assert!(matches!(
            provider.characteristics("9"),
            Err(CameraError::PlatformAccess(_))
        ));
    }

    #[test]
    fn test_mock_failing() {
        let provider = MockProvider::phone().failing("service unavailable");
        assert!(provider.camera_ids().is_err());
        assert!(provider.characteristics("0").is_err());
    }

    #[test]
    fn test_mock_failing_camera() {
        let provider = MockProvider::phone().failing_camera("1", "camera disabled");
        assert!(provider.camera_ids().is_ok());
        assert!(provider.characteristics("0").is_ok());
        assert!(provider.characteristics("1").is_err());
    }
}
