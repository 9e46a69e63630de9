//! Animation config model
//!
//! The closed vocabulary of the declarative attribute surface and the preset
//! tables that turn it into numbers:
//!
//! - [`AnimationType`], [`Direction`], [`Repeat`] and [`IntensityPreset`]
//! - [`Intensity`]: a named preset or a raw 0–1 fraction
//! - [`resolve_intensity`] and [`intensity_to_rotate`], which read two
//!   independent preset tables. A preset's rotation is not derived from its
//!   fraction; only `normal` happens to line up with the numeric scale.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;

/// The seven animation kinds understood by the styling layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationType {
    Fade,
    Slide,
    Bounce,
    Zoom,
    Flip,
    Fold,
    Roll,
}

impl AnimationType {
    pub const ALL: [AnimationType; 7] = [
        AnimationType::Fade,
        AnimationType::Slide,
        AnimationType::Bounce,
        AnimationType::Zoom,
        AnimationType::Flip,
        AnimationType::Fold,
        AnimationType::Roll,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fade" => Some(AnimationType::Fade),
            "slide" => Some(AnimationType::Slide),
            "bounce" => Some(AnimationType::Bounce),
            "zoom" => Some(AnimationType::Zoom),
            "flip" => Some(AnimationType::Flip),
            "fold" => Some(AnimationType::Fold),
            "roll" => Some(AnimationType::Roll),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnimationType::Fade => "fade",
            AnimationType::Slide => "slide",
            AnimationType::Bounce => "bounce",
            AnimationType::Zoom => "zoom",
            AnimationType::Flip => "flip",
            AnimationType::Fold => "fold",
            AnimationType::Roll => "roll",
        }
    }
}

/// Direction for directional animations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Whether an element animates on first entry only or on every entry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repeat {
    #[default]
    Once,
    Every,
}

impl Repeat {
    /// Only the literal `every` enables repetition
    pub fn from_name(name: &str) -> Self {
        if name == "every" {
            Repeat::Every
        } else {
            Repeat::Once
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Repeat::Once => "once",
            Repeat::Every => "every",
        }
    }
}

/// Named transform intensity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityPreset {
    Subtle,
    #[default]
    Normal,
    Strong,
}

impl IntensityPreset {
    pub const ALL: [IntensityPreset; 3] = [
        IntensityPreset::Subtle,
        IntensityPreset::Normal,
        IntensityPreset::Strong,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "subtle" => Some(IntensityPreset::Subtle),
            "normal" => Some(IntensityPreset::Normal),
            "strong" => Some(IntensityPreset::Strong),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IntensityPreset::Subtle => "subtle",
            IntensityPreset::Normal => "normal",
            IntensityPreset::Strong => "strong",
        }
    }

    /// Fraction of the viewport used for translate and scale
    pub fn fraction(self) -> f64 {
        match self {
            IntensityPreset::Subtle => 0.05,
            IntensityPreset::Normal => 0.15,
            IntensityPreset::Strong => 0.3,
        }
    }

    /// Rotation in degrees for flip/fold/roll
    pub fn rotation(self) -> f64 {
        match self {
            IntensityPreset::Subtle => 45.0,
            IntensityPreset::Normal => 90.0,
            IntensityPreset::Strong => 180.0,
        }
    }
}

/// Transform intensity: a named preset or a 0–1 fraction
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Intensity {
    Preset(IntensityPreset),
    Fraction(f64),
}

impl Default for Intensity {
    fn default() -> Self {
        Intensity::Preset(IntensityPreset::default())
    }
}

impl From<IntensityPreset> for Intensity {
    fn from(preset: IntensityPreset) -> Self {
        Intensity::Preset(preset)
    }
}

impl From<f64> for Intensity {
    fn from(value: f64) -> Self {
        Intensity::Fraction(value)
    }
}

/// Resolve an intensity to a 0–1 fraction
///
/// Presets map to their fixed fraction; raw fractions are clamped.
pub fn resolve_intensity(intensity: impl Into<Intensity>) -> f64 {
    match intensity.into() {
        Intensity::Preset(preset) => preset.fraction(),
        Intensity::Fraction(value) => value.clamp(0.0, 1.0),
    }
}

/// Resolve a preset name to its fraction, falling back to `normal`
pub fn resolve_intensity_name(name: &str) -> f64 {
    IntensityPreset::from_name(name)
        .unwrap_or_default()
        .fraction()
}

/// Rotation in degrees for an intensity
///
/// Presets use the rotation table; raw fractions scale linearly across
/// 0°–180° after clamping to 0–1.
pub fn intensity_to_rotate(intensity: impl Into<Intensity>) -> f64 {
    match intensity.into() {
        Intensity::Preset(preset) => preset.rotation(),
        Intensity::Fraction(value) => value.clamp(0.0, 1.0) * 180.0,
    }
}

/// Rotation for a preset name, falling back to `normal`
pub fn intensity_to_rotate_name(name: &str) -> f64 {
    IntensityPreset::from_name(name)
        .unwrap_or_default()
        .rotation()
}

/// Global defaults substituted for absent or invalid attributes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimateDefaults {
    pub direction: Direction,
    /// Duration in milliseconds
    pub duration: u32,
    /// Delay in milliseconds
    pub delay: u32,
    pub easing: Easing,
    pub intensity: Intensity,
    pub start_opacity: f64,
    /// Visible fraction that triggers the animation
    pub threshold: f64,
}

impl Default for AnimateDefaults {
    fn default() -> Self {
        Self {
            direction: Direction::Up,
            duration: 700,
            delay: 0,
            easing: Easing::EaseOut3,
            intensity: Intensity::Preset(IntensityPreset::Normal),
            start_opacity: 0.0,
            threshold: 0.2,
        }
    }
}

/// Validated per-element animation configuration
#[derive(Clone, Debug, PartialEq)]
pub struct AnimateConfig {
    pub kind: AnimationType,
    pub direction: Direction,
    /// Duration in milliseconds
    pub duration: u32,
    /// Delay in milliseconds
    pub delay: u32,
    pub easing: Easing,
    pub intensity: Intensity,
    pub start_opacity: f64,
    pub repeat: Repeat,
    pub threshold: f64,
    /// Play the animation in reverse (read by the styling layer)
    pub reverse: bool,
}

impl AnimateConfig {
    /// A config of the given kind with every other field defaulted
    pub fn new(kind: AnimationType, defaults: &AnimateDefaults) -> Self {
        Self {
            kind,
            direction: defaults.direction,
            duration: defaults.duration,
            delay: defaults.delay,
            easing: defaults.easing,
            intensity: defaults.intensity,
            start_opacity: defaults.start_opacity,
            repeat: Repeat::Once,
            threshold: defaults.threshold,
            reverse: false,
        }
    }

    pub fn repeats(&self) -> bool {
        self.repeat == Repeat::Every
    }
}
