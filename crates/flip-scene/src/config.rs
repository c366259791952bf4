//! Per-element and per-cycle flip configuration.
//!
//! The component layer describes each tracked element with an
//! [`ElementConfig`]: which axes to animate, an optional transform origin,
//! duration and easing overrides, and an optional component filter. Values
//! are validated when the config is built, so the driver never has to deal
//! with an unknown easing name mid-animation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::animation::easing::EasingFunction;
use crate::animation::transform_origin::TransformOrigin;
use crate::animation::tween::TweenSettings;
use crate::error::{FlipError, Result};

/// Attribute names understood by [`ElementConfig::from_attributes`].
pub mod attributes {
    pub const TRANSLATE_X: &str = "translateX";
    pub const TRANSLATE_Y: &str = "translateY";
    pub const SCALE_X: &str = "scaleX";
    pub const SCALE_Y: &str = "scaleY";
    pub const OPACITY: &str = "opacity";
    pub const TRANSFORM_ORIGIN: &str = "transformOrigin";
    pub const DURATION: &str = "flipDuration";
    pub const EASE: &str = "flipEase";
    pub const COMPONENT_FILTER: &str = "flipComponentIdFilter";
}

/// Which components of the transition an element animates.
///
/// Components left out are frozen at the element's current value, so the
/// element does not jump on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationOptIns {
    pub translate_x: bool,
    pub translate_y: bool,
    pub scale_x: bool,
    pub scale_y: bool,
    pub opacity: bool,
}

impl AnimationOptIns {
    pub fn none() -> Self {
        Self::default()
    }

    /// Translate, scale and opacity on both axes.
    pub fn all() -> Self {
        Self {
            translate_x: true,
            translate_y: true,
            scale_x: true,
            scale_y: true,
            opacity: true,
        }
    }

    pub fn position() -> Self {
        Self {
            translate_x: true,
            translate_y: true,
            ..Self::default()
        }
    }

    pub fn size() -> Self {
        Self {
            scale_x: true,
            scale_y: true,
            ..Self::default()
        }
    }

    /// True when any transform axis is animated.
    pub fn animates_transform(&self) -> bool {
        self.translate_x || self.translate_y || self.scale_x || self.scale_y
    }
}

/// Allow-list of component group identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentFilter(Vec<String>);

impl ComponentFilter {
    pub fn new<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(groups.into_iter().map(Into::into).collect())
    }

    /// Parse a comma-separated list. Returns `None` for an empty string,
    /// which means "no filter". Empty segments are dropped, so `","` yields a
    /// filter that allows nothing.
    pub fn parse(value: &str) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        Some(Self(
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        ))
    }

    /// A missing group id never passes.
    pub fn allows(&self, group_id: Option<&str>) -> bool {
        group_id.is_some_and(|id| self.0.iter().any(|g| g == id))
    }

    pub fn groups(&self) -> &[String] {
        &self.0
    }
}

/// Validated configuration for one tracked (or compensated) element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementConfig {
    pub opt_ins: AnimationOptIns,
    pub transform_origin: Option<TransformOrigin>,
    pub duration_ms: Option<f32>,
    pub easing: Option<EasingFunction>,
    pub component_filter: Option<ComponentFilter>,
}

impl ElementConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from string attributes (`translateX`, `flipEase`, ...).
    ///
    /// Boolean flags are set by any non-empty value. Empty override values
    /// count as absent.
    pub fn from_attributes(attrs: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| attrs.get(key).map(String::as_str).filter(|v| !v.is_empty());

        let mut config = Self::new().with_opt_ins(AnimationOptIns {
            translate_x: get(attributes::TRANSLATE_X).is_some(),
            translate_y: get(attributes::TRANSLATE_Y).is_some(),
            scale_x: get(attributes::SCALE_X).is_some(),
            scale_y: get(attributes::SCALE_Y).is_some(),
            opacity: get(attributes::OPACITY).is_some(),
        });

        if let Some(origin) = get(attributes::TRANSFORM_ORIGIN) {
            config.transform_origin = Some(origin.parse()?);
        }
        if let Some(duration) = get(attributes::DURATION) {
            let ms = duration
                .trim()
                .parse::<f32>()
                .map_err(|_| FlipError::InvalidDuration(duration.to_string()))?;
            config = config.with_duration(ms)?;
        }
        if let Some(ease) = get(attributes::EASE) {
            config = config.with_ease(ease)?;
        }
        if let Some(filter) = get(attributes::COMPONENT_FILTER) {
            config.component_filter = ComponentFilter::parse(filter);
        }

        Ok(config)
    }

    pub fn with_opt_ins(mut self, opt_ins: AnimationOptIns) -> Self {
        self.opt_ins = opt_ins;
        self
    }

    pub fn with_transform_origin(mut self, origin: TransformOrigin) -> Self {
        self.transform_origin = Some(origin);
        self
    }

    /// Override the cycle duration for this element.
    pub fn with_duration(mut self, duration_ms: f32) -> Result<Self> {
        self.duration_ms = Some(validate_duration(duration_ms)?);
        Ok(self)
    }

    /// Override the cycle easing by name.
    pub fn with_ease(self, name: &str) -> Result<Self> {
        Ok(self.with_easing(name.parse()?))
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn with_component_filter(mut self, filter: ComponentFilter) -> Self {
        self.component_filter = Some(filter);
        self
    }
}

/// Cycle-level duration and easing, used when an element has no override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationDefaults {
    pub duration_ms: f32,
    pub easing: EasingFunction,
}

impl Default for AnimationDefaults {
    fn default() -> Self {
        Self {
            duration_ms: 250.0,
            easing: EasingFunction::QuadOut,
        }
    }
}

impl AnimationDefaults {
    pub fn new(duration_ms: f32, easing: EasingFunction) -> Result<Self> {
        Ok(Self {
            duration_ms: validate_duration(duration_ms)?,
            easing,
        })
    }

    /// Validate the animation section of a loaded [`flip_config::FlipConfig`].
    pub fn from_config(config: &flip_config::AnimationConfig) -> Result<Self> {
        Self::new(config.duration_ms, config.ease.parse()?)
    }

    /// Element override wins over the cycle default, per setting.
    pub fn resolve(&self, element: &ElementConfig) -> TweenSettings {
        TweenSettings::new(
            element.duration_ms.unwrap_or(self.duration_ms),
            element.easing.unwrap_or(self.easing),
        )
    }
}

fn validate_duration(duration_ms: f32) -> Result<f32> {
    if duration_ms.is_finite() && duration_ms >= 0.0 {
        Ok(duration_ms)
    } else {
        Err(FlipError::InvalidDuration(duration_ms.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_attributes_flags() {
        let config = ElementConfig::from_attributes(&attrs(&[
            ("translateX", "true"),
            ("scaleY", "1"),
            ("opacity", ""),
        ]))
        .unwrap();

        assert!(config.opt_ins.translate_x);
        assert!(!config.opt_ins.translate_y);
        assert!(!config.opt_ins.scale_x);
        assert!(config.opt_ins.scale_y);
        assert!(!config.opt_ins.opacity);
        assert_eq!(config.duration_ms, None);
        assert_eq!(config.easing, None);
        assert_eq!(config.component_filter, None);
    }

    #[test]
    fn test_from_attributes_overrides() {
        let config = ElementConfig::from_attributes(&attrs(&[
            ("flipDuration", "600"),
            ("flipEase", "backOut"),
            ("transformOrigin", "top left"),
            ("flipComponentIdFilter", "a, b"),
        ]))
        .unwrap();

        assert_eq!(config.duration_ms, Some(600.0));
        assert_eq!(config.easing, Some(EasingFunction::BackOut));
        assert_eq!(config.transform_origin, Some(TransformOrigin::top_left()));
        assert_eq!(config.component_filter, Some(ComponentFilter::new(["a", "b"])));
    }

    #[test]
    fn test_from_attributes_accepts_any_css_origin() {
        for origin in ["0 0", "left 10px"] {
            let config = ElementConfig::from_attributes(&attrs(&[
                ("translateX", "true"),
                ("transformOrigin", origin),
            ]))
            .unwrap();
            assert!(config.opt_ins.translate_x);
            assert_eq!(
                config.transform_origin.map(|o| o.to_css()),
                Some(origin.to_string())
            );
        }
    }

    #[test]
    fn test_from_attributes_rejects_bad_values() {
        assert_eq!(
            ElementConfig::from_attributes(&attrs(&[("flipEase", "wobble")])),
            Err(FlipError::UnknownEasing("wobble".to_string()))
        );
        assert!(matches!(
            ElementConfig::from_attributes(&attrs(&[("flipDuration", "soon")])),
            Err(FlipError::InvalidDuration(_))
        ));
        assert!(matches!(
            ElementConfig::new().with_duration(-1.0),
            Err(FlipError::InvalidDuration(_))
        ));
        assert!(matches!(
            ElementConfig::from_attributes(&attrs(&[("transformOrigin", "middle")])),
            Err(FlipError::InvalidTransformOrigin(_))
        ));
    }

    #[test]
    fn test_component_filter() {
        assert_eq!(ComponentFilter::parse(""), None);

        let filter = ComponentFilter::parse("a,b").unwrap();
        assert!(filter.allows(Some("a")));
        assert!(filter.allows(Some("b")));
        assert!(!filter.allows(Some("c")));
        assert!(!filter.allows(None));

        let nothing = ComponentFilter::parse(",").unwrap();
        assert!(nothing.groups().is_empty());
        assert!(!nothing.allows(Some("")));
    }

    #[test]
    fn test_defaults_resolve_with_precedence() {
        let defaults = AnimationDefaults::new(300.0, EasingFunction::Linear).unwrap();

        let plain = ElementConfig::new();
        assert_eq!(
            defaults.resolve(&plain),
            TweenSettings::new(300.0, EasingFunction::Linear)
        );

        let custom = ElementConfig::new()
            .with_duration(900.0)
            .unwrap()
            .with_easing(EasingFunction::CircIn);
        assert_eq!(
            defaults.resolve(&custom),
            TweenSettings::new(900.0, EasingFunction::CircIn)
        );
    }

    #[test]
    fn test_defaults_from_config() {
        let config = flip_config::AnimationConfig {
            duration_ms: 400.0,
            ease: "anticipate".to_string(),
        };
        let defaults = AnimationDefaults::from_config(&config).unwrap();
        assert_eq!(defaults.duration_ms, 400.0);
        assert_eq!(defaults.easing, EasingFunction::Anticipate);

        let bad = flip_config::AnimationConfig {
            duration_ms: 400.0,
            ease: "nope".to_string(),
        };
        assert!(AnimationDefaults::from_config(&bad).is_err());
    }

    #[test]
    fn test_opt_in_presets() {
        assert!(AnimationOptIns::all().animates_transform());
        assert!(AnimationOptIns::position().translate_y);
        assert!(!AnimationOptIns::position().scale_x);
        assert!(!AnimationOptIns::none().animates_transform());
    }
}
