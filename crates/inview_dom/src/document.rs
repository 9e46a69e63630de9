//! In-memory host document
//!
//! An arena element tree with attributes, class lists, inline styles and a
//! simulated viewport. Tests set each element's visible ratio, then call
//! [`Document::take_intersections`] to collect the batches a browser would
//! deliver to its intersection observers:
//!
//! - a newly observed target always produces one initial entry
//! - afterwards, an entry is produced only when the target crosses the
//!   observer's threshold in either direction

use std::borrow::Cow;

use indexmap::{IndexMap, IndexSet};
use slotmap::SlotMap;

use crate::intersection::satisfies_threshold;
use crate::{DomError, ElementId, Host, IntersectionBatch, IntersectionEntry, ObserverId, Result};

/// A single element node
#[derive(Clone, Debug, Default)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attributes: IndexMap<String, String>,
    classes: IndexSet<String>,
    style: IndexMap<String, String>,
    /// Fraction of the element's area inside the simulated viewport
    visible_ratio: f64,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }
}

/// Host-side observer state
#[derive(Clone, Debug)]
struct Observer {
    threshold: f64,
    /// Observed targets with the last delivered intersecting state
    /// (`None` until the initial entry has been delivered)
    targets: IndexMap<ElementId, Option<bool>>,
}

/// In-memory document implementing [`Host`]
#[derive(Debug)]
pub struct Document {
    nodes: SlotMap<ElementId, Node>,
    observers: SlotMap<ObserverId, Observer>,
    /// Observers in creation order, which is also delivery order
    observer_order: Vec<ObserverId>,
    root: ElementId,
    reduced_motion: bool,
}

impl Document {
    /// Create an empty document with a `<body>` root
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("body"));
        Self {
            nodes,
            observers: SlotMap::with_key(),
            observer_order: Vec::new(),
            root,
            reduced_motion: false,
        }
    }

    /// Set the user's reduced-motion preference
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.insert(Node::new(tag))
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        self.node(parent)?;
        self.node(child)?;

        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == child {
                return Err(DomError::Cycle { parent, child });
            }
            ancestor = self.nodes[current].parent;
        }

        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Remove an element and its subtree from the document
    ///
    /// Removed elements stop being observed and their ids go stale.
    pub fn remove(&mut self, element: ElementId) -> Result<()> {
        if element == self.root {
            return Err(DomError::UnknownElement(element));
        }
        self.node(element)?;
        self.detach(element);

        let mut stack = vec![element];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
            }
            for observer in self.observers.values_mut() {
                observer.targets.shift_remove(&current);
            }
        }
        Ok(())
    }

    /// Whether the element still belongs to this document
    pub fn contains(&self, element: ElementId) -> bool {
        self.nodes.contains_key(element)
    }

    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(element).map(|node| node.tag.as_str())
    }

    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(element).and_then(|node| node.parent)
    }

    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.nodes
            .get(element)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Class list in insertion order
    pub fn classes(&self, element: ElementId) -> Vec<&str> {
        self.nodes
            .get(element)
            .map(|node| node.classes.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Names of every inline style property currently set
    pub fn style_properties(&self, element: ElementId) -> Vec<&str> {
        self.nodes
            .get(element)
            .map(|node| node.style.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Move an element within the simulated viewport
    pub fn set_visible_ratio(&mut self, element: ElementId, ratio: f64) -> Result<()> {
        self.node_mut(element)?.visible_ratio = ratio.clamp(0.0, 1.0);
        Ok(())
    }

    pub fn visible_ratio(&self, element: ElementId) -> f64 {
        self.nodes
            .get(element)
            .map(|node| node.visible_ratio)
            .unwrap_or(0.0)
    }

    /// Scroll every element out of the viewport
    pub fn hide_all(&mut self) {
        for node in self.nodes.values_mut() {
            node.visible_ratio = 0.0;
        }
    }

    /// Number of live (connected) observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Threshold of a live observer
    pub fn observer_threshold(&self, observer: ObserverId) -> Option<f64> {
        self.observers.get(observer).map(|o| o.threshold)
    }

    /// Targets currently watched by an observer
    pub fn observed_targets(&self, observer: ObserverId) -> Vec<ElementId> {
        self.observers
            .get(observer)
            .map(|o| o.targets.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Whether any live observer is watching the element
    pub fn is_observed(&self, element: ElementId) -> bool {
        self.observers
            .values()
            .any(|observer| observer.targets.contains_key(&element))
    }

    /// Collect pending intersection notifications
    ///
    /// Batches come out in observer creation order, entries in the order the
    /// targets were observed. Each delivered state is remembered, so calling
    /// this twice without moving anything yields nothing the second time.
    pub fn take_intersections(&mut self) -> Vec<IntersectionBatch> {
        let mut batches = Vec::new();

        for &observer_id in &self.observer_order {
            let Some(observer) = self.observers.get_mut(observer_id) else {
                continue;
            };

            let mut entries = Vec::new();
            for (&target, delivered) in observer.targets.iter_mut() {
                let ratio = self
                    .nodes
                    .get(target)
                    .map(|node| node.visible_ratio)
                    .unwrap_or(0.0);
                let intersecting = satisfies_threshold(ratio, observer.threshold);

                if *delivered != Some(intersecting) {
                    *delivered = Some(intersecting);
                    entries.push(IntersectionEntry::new(target, intersecting, ratio));
                }
            }

            if !entries.is_empty() {
                batches.push(IntersectionBatch::new(observer_id, entries));
            }
        }

        batches
    }

    fn node(&self, element: ElementId) -> Result<&Node> {
        self.nodes
            .get(element)
            .ok_or(DomError::UnknownElement(element))
    }

    fn node_mut(&mut self, element: ElementId) -> Result<&mut Node> {
        self.nodes
            .get_mut(element)
            .ok_or(DomError::UnknownElement(element))
    }

    fn detach(&mut self, element: ElementId) {
        if let Some(parent) = self.nodes[element].parent.take() {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.retain(|&c| c != element);
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for Document {
    fn root(&self) -> ElementId {
        self.root
    }

    fn query_all(&self, attribute: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack = vec![self.root];

        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            if node.attributes.contains_key(attribute) {
                found.push(current);
            }
            // Reverse so the first child is visited first (pre-order)
            stack.extend(node.children.iter().rev().copied());
        }

        found
    }

    fn children_with_attribute(&self, parent: ElementId, attribute: &str) -> Vec<ElementId> {
        self.children(parent)
            .iter()
            .copied()
            .filter(|&child| self.has_attribute(child, attribute))
            .collect()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<Cow<'_, str>> {
        self.nodes
            .get(element)?
            .attributes
            .get(name)
            .map(|value| Cow::Borrowed(value.as_str()))
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) -> Result<()> {
        self.node_mut(element)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) -> Result<()> {
        self.node_mut(element)?.attributes.shift_remove(name);
        Ok(())
    }

    fn style_property(&self, element: ElementId, name: &str) -> Option<Cow<'_, str>> {
        self.nodes
            .get(element)?
            .style
            .get(name)
            .map(|value| Cow::Borrowed(value.as_str()))
    }

    fn set_style_property(&mut self, element: ElementId, name: &str, value: &str) -> Result<()> {
        let style = &mut self.node_mut(element)?.style;
        // Assigning an empty value removes the declaration, as in CSSOM
        if value.is_empty() {
            style.shift_remove(name);
        } else {
            style.insert(name.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove_style_property(&mut self, element: ElementId, name: &str) -> Result<()> {
        self.node_mut(element)?.style.shift_remove(name);
        Ok(())
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes
            .get(element)
            .is_some_and(|node| node.classes.contains(class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) -> Result<()> {
        self.node_mut(element)?.classes.insert(class.to_string());
        Ok(())
    }

    fn remove_class(&mut self, element: ElementId, class: &str) -> Result<()> {
        self.node_mut(element)?.classes.shift_remove(class);
        Ok(())
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn create_observer(&mut self, threshold: f64) -> ObserverId {
        let id = self.observers.insert(Observer {
            threshold,
            targets: IndexMap::new(),
        });
        self.observer_order.push(id);
        tracing::trace!(?id, threshold, "observer created");
        id
    }

    fn observe(&mut self, observer: ObserverId, element: ElementId) -> Result<()> {
        self.node(element)?;
        let observer_state = self
            .observers
            .get_mut(observer)
            .ok_or(DomError::UnknownObserver(observer))?;
        // Re-observing a watched target keeps its delivered state
        observer_state.targets.entry(element).or_insert(None);
        Ok(())
    }

    fn unobserve(&mut self, observer: ObserverId, element: ElementId) {
        if let Some(observer) = self.observers.get_mut(observer) {
            observer.targets.shift_remove(&element);
        }
    }

    fn disconnect(&mut self, observer: ObserverId) {
        if self.observers.remove(observer).is_some() {
            self.observer_order.retain(|&id| id != observer);
            tracing::trace!(id = ?observer, "observer disconnected");
        }
    }
}
