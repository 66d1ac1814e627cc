//! V4L2 characteristics provider using the v4l crate.

use std::collections::HashMap;
use std::str::FromStr;

use tracing::{debug, warn};
use v4l::control::{Description, Flags, MenuItem};
use v4l::framesize::FrameSizeEnum;
use v4l::video::Capture;
use v4l::Device;

use crate::capability::Facing;
use crate::traits::{
    codes, CameraError, Characteristics, CharacteristicsProvider, FourCC, Range, Result, Size,
    StreamConfiguration,
};

/// V4L2 camera class control ids (`linux/v4l2-controls.h`).
mod cid {
    const CAMERA_CLASS_BASE: u32 = 0x009a_0900;

    pub const FOCUS_ABSOLUTE: u32 = CAMERA_CLASS_BASE + 10;
    pub const FOCUS_AUTO: u32 = CAMERA_CLASS_BASE + 12;
    pub const ZOOM_ABSOLUTE: u32 = CAMERA_CLASS_BASE + 13;
    pub const AUTO_EXPOSURE_BIAS: u32 = CAMERA_CLASS_BASE + 19;
    pub const ISO_SENSITIVITY: u32 = CAMERA_CLASS_BASE + 23;
    pub const AUTO_FOCUS_START: u32 = CAMERA_CLASS_BASE + 28;
    pub const AUTO_FOCUS_RANGE: u32 = CAMERA_CLASS_BASE + 31;
}

/// Output formats whose sizes count as JPEG capture sizes.
const JPEG_FORMATS: [FourCC; 2] = [FourCC::JPEG, FourCC::MJPG];

/// Facing assignment for one V4L2 device, parsed from `ID=FACING`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacingOverride {
    /// Camera id (device index).
    pub camera_id: String,
    /// Facing to report for it.
    pub facing: Facing,
}

impl FromStr for FacingOverride {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (id, facing) = s
            .split_once('=')
            .ok_or_else(|| format!("expected ID=FACING, got {s:?}"))?;
        let id = id.trim();
        if id.parse::<usize>().is_err() {
            return Err(format!("camera id must be a device index, got {id:?}"));
        }
        Ok(Self {
            camera_id: id.to_owned(),
            facing: facing.trim().parse()?,
        })
    }
}

/// Characteristics provider backed by `/dev/video*` nodes.
///
/// V4L2 has no notion of lens facing, so USB devices report `external`,
/// everything else `unknown`, unless overridden.
#[derive(Debug, Clone, Default)]
pub struct V4L2Provider {
    facing_overrides: HashMap<String, Facing>,
}

impl V4L2Provider {
    /// Create a provider without facing overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the overridden facing for one camera.
    #[must_use]
    pub fn with_facing(mut self, facing_override: FacingOverride) -> Self {
        self.facing_overrides
            .insert(facing_override.camera_id, facing_override.facing);
        self
    }

    /// Apply several facing overrides.
    #[must_use]
    pub fn with_facings<I: IntoIterator<Item = FacingOverride>>(self, overrides: I) -> Self {
        overrides.into_iter().fold(self, Self::with_facing)
    }

    fn open(camera_id: &str) -> Result<Device> {
        let index: usize = camera_id
            .parse()
            .map_err(|_| CameraError::PlatformAccess(format!("invalid camera id {camera_id:?}")))?;
        Device::new(index).map_err(|err| CameraError::PlatformAccess(err.to_string()))
    }

    fn lens_facing(&self, camera_id: &str, device: &Device) -> Result<Option<i32>> {
        if let Some(facing) = self.facing_overrides.get(camera_id) {
            return Ok(facing.code());
        }

        let caps = device
            .query_caps()
            .map_err(|err| CameraError::PlatformAccess(err.to_string()))?;
        Ok(default_facing(&caps.bus).code())
    }
}

impl CharacteristicsProvider for V4L2Provider {
    fn camera_ids(&self) -> Result<Vec<String>> {
        let mut indices: Vec<usize> = v4l::context::enum_devices()
            .iter()
            .map(v4l::context::Node::index)
            .collect();
        indices.sort_unstable();
        Ok(indices.into_iter().map(|index| index.to_string()).collect())
    }

    fn characteristics(&self, camera_id: &str) -> Result<Characteristics> {
        let device = Self::open(camera_id)?;
        let lens_facing = self.lens_facing(camera_id, &device)?;
        let stream_configuration = stream_configuration(&device);

        let controls = device.query_controls().unwrap_or_else(|err| {
            debug!(camera = camera_id, error = %err, "controls not queryable");
            Vec::new()
        });
        let controls = ControlSet::new(controls);

        debug!(
            camera = camera_id,
            controls = controls.len(),
            "read v4l2 characteristics"
        );

        Ok(Characteristics {
            lens_facing,
            stream_configuration,
            max_digital_zoom: controls.max_zoom(),
            focal_lengths: None,
            sensor_physical_size: None,
            af_available_modes: controls.focus_modes(),
            sensitivity_range: controls.range(cid::ISO_SENSITIVITY),
            ae_compensation_range: controls.range(cid::AUTO_EXPOSURE_BIAS),
        })
    }
}

/// Facing guess from the V4L2 bus info.
fn default_facing(bus_info: &str) -> Facing {
    if bus_info.starts_with("usb-") {
        Facing::External
    } else {
        Facing::Unknown
    }
}

/// Frame sizes of the JPEG-like formats. `None` when formats cannot be enumerated.
fn stream_configuration(device: &Device) -> Option<StreamConfiguration> {
    let formats = match device.enum_formats() {
        Ok(formats) => formats,
        Err(err) => {
            warn!(error = %err, "format enumeration failed");
            return None;
        }
    };

    let mut config = StreamConfiguration::new();
    for desc in formats {
        let fourcc = FourCC::from(desc.fourcc);
        if !JPEG_FORMATS.contains(&fourcc) {
            continue;
        }
        let sizes: Vec<Size> = match device.enum_framesizes(desc.fourcc) {
            Ok(sizes) => sizes.into_iter().flat_map(|size| frame_sizes(size.size)).collect(),
            Err(err) => {
                warn!(fourcc = ?fourcc, error = %err, "frame size enumeration failed");
                Vec::new()
            }
        };
        config.push_output(fourcc, sizes);
    }
    Some(config)
}

/// Discrete sizes pass through; a stepwise range contributes its max then min.
fn frame_sizes(size: FrameSizeEnum) -> Vec<Size> {
    match size {
        FrameSizeEnum::Discrete(discrete) => vec![Size::new(discrete.width, discrete.height)],
        FrameSizeEnum::Stepwise(step) => {
            let max = Size::new(step.max_width, step.max_height);
            let min = Size::new(step.min_width, step.min_height);
            if max == min {
                vec![max]
            } else {
                vec![max, min]
            }
        }
    }
}

/// Enabled controls of one device, looked up by id.
struct ControlSet {
    controls: Vec<Description>,
}

impl ControlSet {
    fn new(controls: Vec<Description>) -> Self {
        Self {
            controls: controls
                .into_iter()
                .filter(|desc| !desc.flags.contains(Flags::DISABLED))
                .collect(),
        }
    }

    fn len(&self) -> usize {
        self.controls.len()
    }

    fn get(&self, id: u32) -> Option<&Description> {
        self.controls.iter().find(|desc| desc.id == id)
    }

    /// `ZOOM_ABSOLUTE` max over min, the closest V4L2 gets to a zoom factor.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn max_zoom(&self) -> Option<f32> {
        let zoom = self.get(cid::ZOOM_ABSOLUTE)?;
        (zoom.minimum > 0 && zoom.maximum >= zoom.minimum)
            .then(|| (zoom.maximum as f64 / zoom.minimum as f64) as f32)
    }

    fn focus_modes(&self) -> Option<Vec<i32>> {
        let mut modes = Vec::new();
        if self.get(cid::FOCUS_AUTO).is_some() {
            modes.push(codes::AF_MODE_CONTINUOUS_PICTURE);
        }
        if self.get(cid::AUTO_FOCUS_START).is_some() {
            modes.push(codes::AF_MODE_AUTO);
        }
        if self
            .get(cid::AUTO_FOCUS_RANGE)
            .is_some_and(|range| menu_names(range).any(|name| name.eq_ignore_ascii_case("macro")))
        {
            modes.push(codes::AF_MODE_MACRO);
        }
        if self.get(cid::FOCUS_ABSOLUTE).is_some() {
            modes.push(codes::AF_MODE_OFF);
        }
        (!modes.is_empty()).then_some(modes)
    }

    /// Integer-menu values when the control has them, otherwise min/max.
    fn range(&self, id: u32) -> Option<Range> {
        let desc = self.get(id)?;
        let values: Vec<i64> = desc
            .items
            .iter()
            .flatten()
            .filter_map(|(_, item)| match item {
                MenuItem::Value(value) => Some(*value),
                MenuItem::Name(_) => None,
            })
            .collect();

        let (min, max) = match (values.iter().min(), values.iter().max()) {
            (Some(min), Some(max)) => (*min, *max),
            _ => (desc.minimum, desc.maximum),
        };
        Some(Range::new(clamp_i32(min), clamp_i32(max)))
    }
}

fn menu_names(desc: &Description) -> impl Iterator<Item = &str> {
    desc.items.iter().flatten().filter_map(|(_, item)| match item {
        MenuItem::Name(name) => Some(name.as_str()),
        MenuItem::Value(_) => None,
    })
}

fn clamp_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}
