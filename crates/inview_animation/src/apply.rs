//! Presentation parameters
//!
//! Projects an [`AnimateConfig`] onto the seven CSS custom properties the
//! styling layer reads, and manages the `will-change` compositor hint around
//! each animation run.

use inview_dom::{ElementId, Host, Result};
use rustc_hash::FxHashSet;

use crate::model::{intensity_to_rotate, resolve_intensity, AnimateConfig};

pub const DURATION: &str = "--animate-duration";
pub const DELAY: &str = "--animate-delay";
pub const EASING: &str = "--animate-easing";
pub const START_OPACITY: &str = "--animate-start-opacity";
pub const TRANSLATE: &str = "--animate-translate";
pub const SCALE: &str = "--animate-scale";
pub const ROTATE: &str = "--animate-rotate";
pub const WILL_CHANGE: &str = "will-change";

/// Every inline property the engine may set, cleared on teardown
pub const ANIMATION_PROPS: [&str; 8] = [
    DURATION,
    DELAY,
    EASING,
    START_OPACITY,
    TRANSLATE,
    SCALE,
    ROTATE,
    WILL_CHANGE,
];

/// Set the custom properties that configure an element's animation
///
/// `extra_delay` (ms) is added on top of the configured delay; stagger groups
/// use it to fan children out. A `None` config leaves the element untouched.
pub fn apply_animation_properties<H: Host + ?Sized>(
    host: &mut H,
    element: ElementId,
    config: Option<&AnimateConfig>,
    extra_delay: f64,
) -> Result<()> {
    let Some(config) = config else {
        return Ok(());
    };

    let total_delay = f64::from(config.delay) + extra_delay;
    let n = resolve_intensity(config.intensity);

    host.set_style_property(element, DURATION, &format!("{}ms", config.duration))?;
    host.set_style_property(element, DELAY, &format!("{}ms", css_number(total_delay)))?;
    host.set_style_property(element, EASING, config.easing.curve())?;
    host.set_style_property(element, START_OPACITY, &css_number(config.start_opacity))?;
    host.set_style_property(element, TRANSLATE, &format!("{}vh", css_number(n * 100.0)))?;
    host.set_style_property(element, SCALE, &css_number(1.0 - n))?;
    host.set_style_property(
        element,
        ROTATE,
        &format!("{}deg", css_number(intensity_to_rotate(config.intensity))),
    )?;
    Ok(())
}

/// Remove every property [`apply_animation_properties`] and
/// [`promote_element`] can set
///
/// Safe on elements that never had any.
pub fn clear_animation_properties<H: Host + ?Sized>(host: &mut H, element: ElementId) -> Result<()> {
    for prop in ANIMATION_PROPS {
        host.remove_style_property(element, prop)?;
    }
    Ok(())
}

/// Ask the renderer to prepare a compositor layer just before the animation
/// starts
pub fn promote_element<H: Host + ?Sized>(host: &mut H, element: ElementId) -> Result<()> {
    host.set_style_property(element, WILL_CHANGE, "opacity, transform")
}

/// Single-fire animation completion listeners
///
/// An armed element releases its compositor hint on the next completion
/// notification and is disarmed. Arming an already armed element does not
/// add a second listener, so repeat elements never accumulate them.
#[derive(Debug, Default)]
pub struct AnimationEndListeners {
    armed: FxHashSet<ElementId>,
}

impl AnimationEndListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the listener for `element`. Returns `false` if it was already armed.
    pub fn listen_for_animation_end(&mut self, element: ElementId) -> bool {
        self.armed.insert(element)
    }

    /// Deliver a completion notification
    ///
    /// Returns `true` if an armed listener fired.
    pub fn dispatch<H: Host + ?Sized>(&mut self, host: &mut H, element: ElementId) -> bool {
        if !self.armed.remove(&element) {
            return false;
        }
        if let Err(err) = host.remove_style_property(element, WILL_CHANGE) {
            tracing::trace!(?element, %err, "animation end for detached element");
        }
        true
    }

    pub fn is_armed(&self, element: ElementId) -> bool {
        self.armed.contains(&element)
    }

    pub fn len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }

    /// Drop every pending listener without firing it
    pub fn clear(&mut self) {
        self.armed.clear();
    }
}

/// Render a number the way the styling layer expects: shortest round-trip
/// decimal, no trailing `.0`, no negative zero
fn css_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}
