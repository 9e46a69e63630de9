//! Intersection notifications
//!
//! Mirrors what a browser `IntersectionObserver` hands to its callback: a
//! batch of entries per observer, in delivery order.

use crate::{ElementId, ObserverId};

/// A single visibility change for one observed target
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    /// The observed element
    pub target: ElementId,
    /// Whether the target currently satisfies the observer's threshold
    pub is_intersecting: bool,
    /// Fraction of the target's area inside the viewport (0.0 to 1.0)
    pub intersection_ratio: f64,
}

impl IntersectionEntry {
    pub fn new(target: ElementId, is_intersecting: bool, intersection_ratio: f64) -> Self {
        Self {
            target,
            is_intersecting,
            intersection_ratio,
        }
    }

    /// Entry for a target that crossed into the viewport
    pub fn enter(target: ElementId, intersection_ratio: f64) -> Self {
        Self::new(target, true, intersection_ratio)
    }

    /// Entry for a target that left the viewport
    pub fn exit(target: ElementId) -> Self {
        Self::new(target, false, 0.0)
    }
}

/// All entries delivered to one observer in one callback invocation
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionBatch {
    pub observer: ObserverId,
    pub entries: Vec<IntersectionEntry>,
}

impl IntersectionBatch {
    pub fn new(observer: ObserverId, entries: Vec<IntersectionEntry>) -> Self {
        Self { observer, entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether a target with the given visible ratio satisfies a threshold
///
/// A zero threshold is satisfied by any visible area; a target with no
/// visible area never intersects.
pub fn satisfies_threshold(ratio: f64, threshold: f64) -> bool {
    ratio > 0.0 && ratio >= threshold
}
