//! Output resolutions and aspect-ratio helpers.

use serde::Serialize;

use crate::traits::Size;

/// A supported capture resolution with its formatted aspect ratio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Aspect ratio formatted as `"W/H:1"`, e.g. `"1.78:1"`.
    pub aspect_ratio: String,
}

impl From<Size> for Resolution {
    fn from(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            aspect_ratio: aspect_ratio(size.width, size.height),
        }
    }
}

impl Resolution {
    /// Pixel area.
    #[must_use]
    pub const fn area(&self) -> u64 {
        Size::new(self.width, self.height).area()
    }
}

/// Format `width / height` with two decimals followed by `:1`.
///
/// Rounds half up on the exact ratio, so `9/8` renders as `"1.13:1"`.
/// A zero height renders as `"inf:1"`.
#[must_use]
pub fn aspect_ratio(width: u32, height: u32) -> String {
    format!("{}:1", two_decimals(u64::from(width), u64::from(height)))
}

/// `num / den` rounded half up to hundredths, rendered with two decimals.
fn two_decimals(num: u64, den: u64) -> String {
    hundredths(num, den).map_or_else(
        || "inf".to_owned(),
        |hundredths| format!("{}.{:02}", hundredths / 100, hundredths % 100),
    )
}

/// `round(100 * num / den)` in integer arithmetic. `None` for a zero `den`.
fn hundredths(num: u64, den: u64) -> Option<u128> {
    (den != 0).then(|| (200 * u128::from(num) + u128::from(den)) / (2 * u128::from(den)))
}

/// Map platform sizes to resolutions, preserving order.
#[must_use]
pub fn resolutions_from_sizes(sizes: &[Size]) -> Vec<Resolution> {
    sizes.iter().copied().map(Resolution::from).collect()
}

/// The resolution with the largest pixel area. The first one wins on ties.
#[must_use]
pub fn max_resolution(resolutions: &[Resolution]) -> Option<&Resolution> {
    resolutions
        .iter()
        .reduce(|max, current| if current.area() > max.area() { current } else { max })
}

/// Keep the resolutions whose ratio matches `target` (e.g. `"16:9"` or
/// `"2.35:1"`) to two decimals. An unparseable target matches nothing.
#[must_use]
pub fn filter_by_aspect(resolutions: &[Resolution], target: &str) -> Vec<Resolution> {
    let Some(target) = parse_ratio(target) else {
        return Vec::new();
    };

    resolutions
        .iter()
        .filter(|res| hundredths(u64::from(res.width), u64::from(res.height)) == Some(target))
        .cloned()
        .collect()
}

/// Parse `"W:H"`, decimal sides allowed, into its ratio in hundredths.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_ratio(ratio: &str) -> Option<u128> {
    let (width, height) = ratio.split_once(':')?;
    let width: f64 = width.trim().parse().ok()?;
    let height: f64 = height.trim().parse().ok()?;
    if !width.is_finite() || !height.is_finite() || width < 0.0 || height <= 0.0 {
        return None;
    }
    let hundredths = (width / height * 100.0).round();
    hundredths.is_finite().then_some(hundredths as u128)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn res(width: u32, height: u32) -> Resolution {
        Resolution::from(Size::new(width, height))
    }

    #[test]
    fn test_aspect_ratio_common_sizes() {
        assert_eq!(aspect_ratio(1920, 1080), "1.78:1");
        assert_eq!(aspect_ratio(4000, 3000), "1.33:1");
        assert_eq!(aspect_ratio(1080, 1080), "1.00:1");
        assert_eq!(aspect_ratio(640, 480), "1.33:1");
        assert_eq!(aspect_ratio(3000, 4000), "0.75:1");
    }

    #[test]
    fn test_aspect_ratio_rounds_half_up() {
        assert_eq!(aspect_ratio(9, 8), "1.13:1");
        assert_eq!(aspect_ratio(201, 200), "1.01:1");
    }

    #[test]
    fn test_aspect_ratio_zero_height() {
        assert_eq!(aspect_ratio(640, 0), "inf:1");
    }

    #[test]
    fn test_resolutions_preserve_order() {
        let sizes = [Size::new(640, 480), Size::new(1920, 1080)];
        let resolutions = resolutions_from_sizes(&sizes);
        assert_eq!(resolutions, vec![res(640, 480), res(1920, 1080)]);
    }

    #[test]
    fn test_max_resolution() {
        let resolutions = vec![res(1280, 720), res(4000, 3000), res(1920, 1080)];
        assert_eq!(max_resolution(&resolutions), Some(&res(4000, 3000)));
        assert_eq!(max_resolution(&[]), None);
    }

    #[test]
    fn test_max_resolution_first_wins_on_tie() {
        let resolutions = vec![res(1600, 900), res(900, 1600)];
        assert_eq!(max_resolution(&resolutions), Some(&res(1600, 900)));
    }

    #[test]
    fn test_filter_by_aspect() {
        let resolutions = vec![res(1920, 1080), res(640, 480), res(1280, 720)];
        assert_eq!(
            filter_by_aspect(&resolutions, "16:9"),
            vec![res(1920, 1080), res(1280, 720)]
        );
        assert_eq!(filter_by_aspect(&resolutions, "4:3"), vec![res(640, 480)]);
    }

    #[test]
    fn test_filter_by_aspect_invalid_target() {
        let resolutions = vec![res(1920, 1080)];
        assert!(filter_by_aspect(&resolutions, "16x9").is_empty());
        assert!(filter_by_aspect(&resolutions, "a:b").is_empty());
        assert!(filter_by_aspect(&resolutions, "16:0").is_empty());
        assert!(filter_by_aspect(&resolutions, "-16:9").is_empty());
        assert!(filter_by_aspect(&resolutions, "16:-9").is_empty());
        assert!(filter_by_aspect(&resolutions, "inf:1").is_empty());
        assert!(filter_by_aspect(&resolutions, "NaN:1").is_empty());
        assert!(filter_by_aspect(&resolutions, "1:inf").is_empty());
    }

    #[test]
    fn test_filter_by_aspect_decimal_target() {
        let resolutions = vec![res(2350, 1000), res(1850, 1000), res(1920, 1080), res(640, 0)];
        assert_eq!(
            filter_by_aspect(&resolutions, "2.35:1"),
            vec![res(2350, 1000)]
        );
        assert_eq!(
            filter_by_aspect(&resolutions, "1.85 : 1"),
            vec![res(1850, 1000)]
        );
        assert_eq!(
            filter_by_aspect(&resolutions, "1.78:1"),
            vec![res(1920, 1080)]
        );
    }

    #[test]
    fn test_resolution_serializes_camel_case() {
        let value = serde_json::to_value(res(1920, 1080)).expect("serialize failed");
        assert_eq!(
            value,
            serde_json::json!({ "width": 1920, "height": 1080, "aspectRatio": "1.78:1" })
        );
    }

    proptest! {
        #[test]
        fn prop_aspect_ratio_is_two_decimal_ratio(width in 1u32..20_000, height in 1u32..20_000) {
            let formatted = aspect_ratio(width, height);
            let value = formatted.strip_suffix(":1").expect("missing :1 suffix");
            let (_, decimals) = value.split_once('.').expect("missing decimal point");
            prop_assert_eq!(decimals.len(), 2);

            let parsed: f64 = value.parse().expect("not a number");
            let exact = f64::from(width) / f64::from(height);
            prop_assert!((parsed - exact).abs() <= 0.005 + 1e-9);
        }
    }
}
