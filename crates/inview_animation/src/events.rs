//! Lifecycle events
//!
//! Everything the host delivers to an [`AnimationController`](crate::AnimationController):
//! page transitions, intersection batches and animation completions.

use inview_dom::{ElementId, IntersectionBatch};

/// Events driving the animation engine
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationEvent {
    /// A page finished loading or navigating in; initializes the engine
    PageLoad,
    /// The page is about to be swapped out; tears the engine down
    BeforeSwap,
    /// An observer reported visibility changes
    Intersection(IntersectionBatch),
    /// A CSS animation on the element completed
    AnimationEnd(ElementId),
}

impl From<IntersectionBatch> for AnimationEvent {
    fn from(batch: IntersectionBatch) -> Self {
        AnimationEvent::Intersection(batch)
    }
}
