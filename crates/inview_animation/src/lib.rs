//! Inview Animation Engine
//!
//! Declarative scroll-triggered animations for documents exposed through
//! [`inview_dom::Host`]. The engine never animates anything itself: it turns
//! `data-animate-*` attributes into CSS custom properties and toggles an
//! animating class as elements enter and leave the viewport. Keyframes live
//! in the styling layer.
//!
//! # Features
//!
//! - **Attribute Parsing**: forgiving parsing with per-field defaults
//! - **Presentation Parameters**: duration, delay, easing curve, start opacity,
//!   translate, scale and rotate as custom properties
//! - **Shared Watchers**: one intersection observer per distinct threshold
//! - **Stagger Groups**: children of a container fanned out from the first,
//!   last or center child
//! - **Repeat**: elements that re-animate on every entry
//! - **Page Lifecycle**: idempotent init, complete teardown on navigation,
//!   and reduced-motion support
//!
//! # Example
//!
//! ```rust
//! use inview_animation::{AnimationController, AnimationEvent, InitOutcome};
//! use inview_dom::{Document, Host};
//!
//! let mut doc = Document::new();
//! let card = doc.create_element("div");
//! doc.append_child(doc.root(), card).unwrap();
//! doc.set_attribute(card, "data-animate", "slide").unwrap();
//!
//! let mut controller = AnimationController::default();
//! let outcome = controller.init(&mut doc).unwrap();
//! assert_eq!(outcome, InitOutcome::Initialized { groups: 0, elements: 1 });
//!
//! doc.set_visible_ratio(card, 0.6).unwrap();
//! for batch in doc.take_intersections() {
//!     controller.handle_event(&mut doc, AnimationEvent::Intersection(batch)).unwrap();
//! }
//! assert!(doc.has_class(card, "is-animating"));
//! ```

pub mod apply;
pub mod config;
pub mod easing;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod model;
pub mod parse;
pub mod pool;
pub mod stagger;

pub use apply::{
    apply_animation_properties, clear_animation_properties, promote_element,
    AnimationEndListeners,
};
pub use config::{EngineConfig, StaggerDefaults};
pub use easing::Easing;
pub use error::{AnimationError, ConfigError, Result};
pub use events::AnimationEvent;
pub use lifecycle::{AnimationController, InitOutcome};
pub use model::{
    intensity_to_rotate, resolve_intensity, AnimateConfig, AnimateDefaults, AnimationType,
    Direction, Intensity, IntensityPreset, Repeat,
};
pub use parse::{parse_animate_config, parse_stagger_config};
pub use pool::{WatchState, WatcherPool};
pub use stagger::{stagger_rank, StaggerConfig, StaggerFrom};
