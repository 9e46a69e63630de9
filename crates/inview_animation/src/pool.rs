//! Visibility watcher pool
//!
//! Owns every intersection observer the engine creates and the tracking sets
//! that decide what an intersection means for an element.
//!
//! - **Shared observers**: one per distinct threshold value, serving every
//!   solo element with that threshold
//! - **Group observers**: one per stagger parent, never shared and never
//!   stored in the threshold cache
//!
//! Per-element lifecycle:
//!
//! ```text
//! Unobserved → Observing → Triggered            (once)
//!                  ↑            │
//!                  └────────────┘               (repeat: exit re-arms)
//! ```
//!
//! Teardown disconnects every observer before any table is cleared. Batches
//! that arrive afterwards address unknown observers and are dropped.

use inview_dom::{ElementId, Host, IntersectionBatch, IntersectionEntry, ObserverId, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::apply::{promote_element, AnimationEndListeners};
use crate::model::AnimateConfig;

/// Where an element is in its visibility lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchState {
    /// Not known to the pool
    Unobserved,
    /// Waiting for its (next) entry into the viewport
    Observing,
    /// Animated in; terminal unless the element repeats
    Triggered,
}

/// A stagger parent and the children it triggers together
#[derive(Clone, Debug)]
struct StaggerGroup {
    parent: ElementId,
    children: SmallVec<[ElementId; 8]>,
    fired: bool,
}

/// Pool of intersection observers and per-element tracking state
#[derive(Debug)]
pub struct WatcherPool {
    animating_class: String,
    group_threshold: f64,
    /// Shared observers keyed by the threshold's bit pattern
    threshold_cache: FxHashMap<u64, ObserverId>,
    shared: FxHashSet<ObserverId>,
    groups: FxHashMap<ObserverId, StaggerGroup>,
    /// Elements waiting for an entry, directly or through their group
    watched: FxHashSet<ElementId>,
    /// Elements that have animated at least once
    animated: FxHashSet<ElementId>,
    /// Elements with `repeat="every"`
    repeat: FxHashSet<ElementId>,
    end_listeners: AnimationEndListeners,
}

impl WatcherPool {
    pub fn new(animating_class: impl Into<String>, group_threshold: f64) -> Self {
        Self {
            animating_class: animating_class.into(),
            group_threshold,
            threshold_cache: FxHashMap::default(),
            shared: FxHashSet::default(),
            groups: FxHashMap::default(),
            watched: FxHashSet::default(),
            animated: FxHashSet::default(),
            repeat: FxHashSet::default(),
            end_listeners: AnimationEndListeners::new(),
        }
    }

    /// The shared observer for `threshold`, created on first use
    pub fn get_or_create_observer<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        threshold: f64,
    ) -> ObserverId {
        if let Some(&observer) = self.threshold_cache.get(&threshold.to_bits()) {
            return observer;
        }

        let observer = host.create_observer(threshold);
        self.threshold_cache.insert(threshold.to_bits(), observer);
        self.shared.insert(observer);
        observer
    }

    /// Start watching a solo element with its own config
    pub fn observe<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        element: ElementId,
        config: &AnimateConfig,
    ) -> Result<ObserverId> {
        if config.repeats() {
            self.repeat.insert(element);
        }

        let observer = self.get_or_create_observer(host, config.threshold);
        host.observe(observer, element)?;
        self.watched.insert(element);
        Ok(observer)
    }

    /// Watch a stagger parent on a dedicated observer
    ///
    /// When the parent first enters the viewport every child is triggered at
    /// once; their staggered delays were applied up front. Returns `None` for
    /// a group without children, which gets no observer.
    pub fn register_stagger_group<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        parent: ElementId,
        children: impl IntoIterator<Item = ElementId>,
    ) -> Result<Option<ObserverId>> {
        let children: SmallVec<[ElementId; 8]> = children.into_iter().collect();
        if children.is_empty() {
            return Ok(None);
        }

        let observer = host.create_observer(self.group_threshold);
        // Track before observing so teardown still reaches the observer if
        // the host rejects the parent
        self.groups.insert(
            observer,
            StaggerGroup {
                parent,
                children: children.clone(),
                fired: false,
            },
        );
        host.observe(observer, parent)?;
        self.watched.extend(children);
        Ok(Some(observer))
    }

    /// Process one intersection delivery
    ///
    /// Entries are handled in delivery order. Batches for observers this pool
    /// no longer owns are ignored.
    pub fn handle_intersection<H: Host + ?Sized>(&mut self, host: &mut H, batch: &IntersectionBatch) {
        if self.shared.contains(&batch.observer) {
            for entry in &batch.entries {
                self.handle_shared_entry(host, batch.observer, entry);
            }
        } else if self.groups.contains_key(&batch.observer) {
            for entry in &batch.entries {
                self.handle_group_entry(host, batch.observer, entry);
            }
        } else {
            tracing::trace!(observer = ?batch.observer, "delivery for released observer ignored");
        }
    }

    /// Route an animation completion to the element's listener
    pub fn handle_animation_end<H: Host + ?Sized>(&mut self, host: &mut H, element: ElementId) -> bool {
        self.end_listeners.dispatch(host, element)
    }

    fn handle_shared_entry<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        observer: ObserverId,
        entry: &IntersectionEntry,
    ) {
        let element = entry.target;
        let repeats = self.repeat.contains(&element);

        if entry.is_intersecting {
            if self.animated.contains(&element) && !repeats {
                return;
            }
            if let Err(err) = self.trigger(host, element) {
                tracing::trace!(?element, %err, "stale intersection target skipped");
                return;
            }
            if !repeats {
                host.unobserve(observer, element);
                self.watched.remove(&element);
            }
        } else if repeats {
            match host.remove_class(element, &self.animating_class) {
                Ok(()) => tracing::trace!(?element, "repeat element left viewport"),
                Err(err) => tracing::trace!(?element, %err, "stale intersection target skipped"),
            }
        }
    }

    fn handle_group_entry<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        observer: ObserverId,
        entry: &IntersectionEntry,
    ) {
        if !entry.is_intersecting {
            return;
        }
        let Some(group) = self.groups.get_mut(&observer) else {
            return;
        };
        if group.fired {
            return;
        }
        group.fired = true;
        let parent = group.parent;
        let children = group.children.clone();

        for &child in &children {
            if let Err(err) = self.trigger(host, child) {
                tracing::trace!(element = ?child, %err, "stale stagger child skipped");
            }
            self.watched.remove(&child);
        }
        host.unobserve(observer, parent);
        tracing::trace!(?parent, children = children.len(), "stagger group triggered");
    }

    /// Promote, flag and arm the completion listener for one element
    fn trigger<H: Host + ?Sized>(&mut self, host: &mut H, element: ElementId) -> Result<()> {
        promote_element(host, element)?;
        host.add_class(element, &self.animating_class)?;
        self.end_listeners.listen_for_animation_end(element);
        self.animated.insert(element);
        tracing::trace!(?element, "animation triggered");
        Ok(())
    }

    /// Disconnect every observer, then release all tracking state
    ///
    /// Safe to call on an empty pool.
    pub fn disconnect_all<H: Host + ?Sized>(&mut self, host: &mut H) {
        for &observer in self.shared.iter().chain(self.groups.keys()) {
            host.disconnect(observer);
        }

        self.threshold_cache.clear();
        self.shared.clear();
        self.groups.clear();
        self.watched.clear();
        self.animated.clear();
        self.repeat.clear();
        self.end_listeners.clear();
    }

    /// Lifecycle state of an element
    pub fn state<H: Host + ?Sized>(&self, host: &H, element: ElementId) -> WatchState {
        if self.animated.contains(&element) {
            if self.repeat.contains(&element) && !host.has_class(element, &self.animating_class) {
                WatchState::Observing
            } else {
                WatchState::Triggered
            }
        } else if self.watched.contains(&element) {
            WatchState::Observing
        } else {
            WatchState::Unobserved
        }
    }

    /// Number of live observers (shared and group)
    pub fn observer_count(&self) -> usize {
        self.shared.len() + self.groups.len()
    }

    pub fn shared_observer_count(&self) -> usize {
        self.shared.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_animated(&self, element: ElementId) -> bool {
        self.animated.contains(&element)
    }

    pub fn is_repeat(&self, element: ElementId) -> bool {
        self.repeat.contains(&element)
    }

    pub fn animated_count(&self) -> usize {
        self.animated.len()
    }

    pub fn repeat_count(&self) -> usize {
        self.repeat.len()
    }

    pub fn pending_animation_ends(&self) -> usize {
        self.end_listeners.len()
    }

    /// True when no observer or tracking state remains
    pub fn is_empty(&self) -> bool {
        self.threshold_cache.is_empty()
            && self.shared.is_empty()
            && self.groups.is_empty()
            && self.watched.is_empty()
            && self.animated.is_empty()
            && self.repeat.is_empty()
            && self.end_listeners.is_empty()
    }
}
