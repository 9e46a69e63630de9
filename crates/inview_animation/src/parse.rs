//! Declarative attribute parsing
//!
//! Reads an element's `data-animate-*` attributes into an [`AnimateConfig`]
//! and a container's stagger attributes into a [`StaggerConfig`].
//!
//! Parsing never fails. The only rejection is a missing or unknown animation
//! type, which means "not animated". Every other field silently falls back
//! to its default when absent or invalid.
//!
//! Numeric attributes use falsy coalescing: a value that coerces to zero is
//! indistinguishable from an absent one, so `data-animate-delay="0"` and no
//! delay attribute both yield the default delay.

use inview_dom::{ElementId, Host};

use crate::config::StaggerDefaults;
use crate::easing::Easing;
use crate::model::{
    AnimateConfig, AnimateDefaults, AnimationType, Direction, Intensity, IntensityPreset, Repeat,
};
use crate::stagger::{StaggerConfig, StaggerFrom};

/// Attribute names of the declarative surface
pub mod attrs {
    /// Animation marker and type
    pub const ANIMATE: &str = "data-animate";
    pub const DIRECTION: &str = "data-animate-direction";
    pub const DURATION: &str = "data-animate-duration";
    pub const DELAY: &str = "data-animate-delay";
    pub const EASING: &str = "data-animate-easing";
    pub const INTENSITY: &str = "data-animate-intensity";
    pub const OPACITY: &str = "data-animate-opacity";
    pub const REPEAT: &str = "data-animate-repeat";
    pub const THRESHOLD: &str = "data-animate-threshold";
    pub const REVERSE: &str = "data-animate-reverse";
    /// Stagger group marker and per-child increment
    pub const STAGGER: &str = "data-animate-stagger";
    pub const STAGGER_FROM: &str = "data-animate-stagger-from";
}

/// Parse an element's animation config
///
/// Returns `None` when the element is not animated.
pub fn parse_animate_config<H: Host + ?Sized>(
    host: &H,
    element: ElementId,
    defaults: &AnimateDefaults,
) -> Option<AnimateConfig> {
    let kind_name = host.attribute(element, attrs::ANIMATE)?;
    let kind = AnimationType::from_name(&kind_name)?;
    let attr = |name: &str| host.attribute(element, name);

    let direction = attr(attrs::DIRECTION)
        .and_then(|value| Direction::from_name(&value))
        .unwrap_or(defaults.direction);

    let easing = attr(attrs::EASING)
        .and_then(|value| Easing::from_name(&value))
        .unwrap_or(defaults.easing);

    let intensity = attr(attrs::INTENSITY)
        .filter(|value| !value.is_empty())
        .and_then(|value| parse_intensity(&value))
        .unwrap_or(defaults.intensity);

    let start_opacity = match attr(attrs::OPACITY) {
        Some(value) => coerce_number(&value).unwrap_or(defaults.start_opacity),
        None => defaults.start_opacity,
    };

    let repeat = attr(attrs::REPEAT)
        .map(|value| Repeat::from_name(&value))
        .unwrap_or_default();

    let threshold = attr(attrs::THRESHOLD)
        .and_then(|value| coerce_number(&value))
        .filter(|&value| value > 0.0 && value <= 1.0)
        .unwrap_or(defaults.threshold);

    Some(AnimateConfig {
        kind,
        direction,
        duration: coerce_millis(attr(attrs::DURATION).as_deref()).unwrap_or(defaults.duration),
        delay: coerce_millis(attr(attrs::DELAY).as_deref()).unwrap_or(defaults.delay),
        easing,
        intensity,
        start_opacity,
        repeat,
        threshold,
        reverse: host.has_attribute(element, attrs::REVERSE),
    })
}

/// Parse a container's stagger config
///
/// Returns `None` only when the stagger attribute is absent. A present but
/// empty or non-numeric value uses the default increment.
pub fn parse_stagger_config<H: Host + ?Sized>(
    host: &H,
    element: ElementId,
    defaults: &StaggerDefaults,
) -> Option<StaggerConfig> {
    let value = host.attribute(element, attrs::STAGGER)?;
    let duration = coerce_millis(Some(&*value)).unwrap_or(defaults.default_duration);
    let from = host
        .attribute(element, attrs::STAGGER_FROM)
        .map(|value| StaggerFrom::from_name(&value))
        .unwrap_or_default();

    Some(StaggerConfig::new(duration, from))
}

/// A preset name, or a numeric fraction within 0–1
///
/// Out-of-range numbers are rejected rather than clamped.
fn parse_intensity(value: &str) -> Option<Intensity> {
    if let Some(preset) = IntensityPreset::from_name(value) {
        return Some(Intensity::Preset(preset));
    }
    coerce_number(value)
        .filter(|n| (0.0..=1.0).contains(n))
        .map(Intensity::Fraction)
}

/// Host string-to-number coercion
///
/// Surrounding whitespace is ignored and a blank string is zero. Unsigned
/// `0x`/`0o`/`0b` integer literals are accepted alongside decimals. Anything
/// else, or a non-finite result, is `None`.
fn coerce_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    if let Some(n) = radix_literal(trimmed) {
        return n;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `Some(result)` when the value carries a radix prefix, `None` otherwise
fn radix_literal(value: &str) -> Option<Option<f64>> {
    let bytes = value.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1].to_ascii_lowercase() {
        b'x' => 16,
        b'o' => 8,
        b'b' => 2,
        _ => return None,
    };
    let digits = &value[2..];
    if digits.is_empty() {
        return Some(None);
    }
    let parsed = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc * f64::from(radix) + f64::from(digit))
    });
    Some(parsed.filter(|n| n.is_finite()))
}

/// Positive whole milliseconds; zero, negative and invalid values are `None`
fn coerce_millis(value: Option<&str>) -> Option<u32> {
    let millis = coerce_number(value?)?.round();
    if millis >= 1.0 {
        Some(millis.min(f64::from(u32::MAX)) as u32)
    } else {
        None
    }
}
