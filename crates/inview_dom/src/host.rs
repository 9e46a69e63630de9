//! Host document abstraction
//!
//! The animation engine never touches a concrete DOM. Everything it needs is
//! expressed by [`Host`]: attribute lookup, inline style and class mutation,
//! the reduced-motion preference, and intersection observers.
//!
//! Observers are owned by the host. The engine creates them, subscribes
//! targets, and later receives [`IntersectionBatch`](crate::IntersectionBatch)
//! deliveries addressed by [`ObserverId`].

use std::borrow::Cow;

use crate::{ElementId, ObserverId, Result};

/// Document primitives consumed by the animation engine
pub trait Host {
    /// The document root that carries the initialization marker (`<body>`)
    fn root(&self) -> ElementId;

    /// Every element carrying `attribute`, in document order
    fn query_all(&self, attribute: &str) -> Vec<ElementId>;

    /// Direct children of `parent` carrying `attribute`, in document order
    fn children_with_attribute(&self, parent: ElementId, attribute: &str) -> Vec<ElementId>;

    /// Attribute value, or `None` when the attribute is absent
    fn attribute(&self, element: ElementId, name: &str) -> Option<Cow<'_, str>>;

    fn has_attribute(&self, element: ElementId, name: &str) -> bool {
        self.attribute(element, name).is_some()
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) -> Result<()>;

    /// Remove an attribute. Removing an absent attribute is not an error.
    fn remove_attribute(&mut self, element: ElementId, name: &str) -> Result<()>;

    /// Inline style property value, or `None` when unset
    fn style_property(&self, element: ElementId, name: &str) -> Option<Cow<'_, str>>;

    fn set_style_property(&mut self, element: ElementId, name: &str, value: &str) -> Result<()>;

    /// Remove an inline style property. Removing an unset property is not an error.
    fn remove_style_property(&mut self, element: ElementId, name: &str) -> Result<()>;

    fn has_class(&self, element: ElementId, class: &str) -> bool;

    fn add_class(&mut self, element: ElementId, class: &str) -> Result<()>;

    /// Remove a class. Removing an absent class is not an error.
    fn remove_class(&mut self, element: ElementId, class: &str) -> Result<()>;

    /// Whether the user asked for reduced motion
    fn prefers_reduced_motion(&self) -> bool;

    /// Create an intersection observer firing when targets cross `threshold`
    fn create_observer(&mut self, threshold: f64) -> ObserverId;

    /// Start watching `element`. The host delivers an initial entry for it.
    fn observe(&mut self, observer: ObserverId, element: ElementId) -> Result<()>;

    /// Stop watching `element`. A no-op for unknown observers or targets.
    fn unobserve(&mut self, observer: ObserverId, element: ElementId);

    /// Stop watching every target and release the observer.
    /// A no-op for unknown observers.
    fn disconnect(&mut self, observer: ObserverId);
}
