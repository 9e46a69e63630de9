//! Inview Host Document
//!
//! The document primitives the Inview animation engine consumes:
//!
//! - **Host trait**: attribute queries, inline style, class list and
//!   intersection observers, as a browser exposes them
//! - **Element & observer handles**: generational ids that go stale safely
//!   once an element is removed or an observer disconnected
//! - **In-memory Document**: an arena element tree with a simulated viewport,
//!   used to drive the engine deterministically in tests and demos
//!
//! # Example
//!
//! ```rust
//! use inview_dom::{Document, Host};
//!
//! let mut doc = Document::new();
//! let card = doc.create_element("div");
//! doc.append_child(doc.root(), card).unwrap();
//! doc.set_attribute(card, "data-animate", "fade").unwrap();
//!
//! let observer = doc.create_observer(0.2);
//! doc.observe(observer, card).unwrap();
//! doc.set_visible_ratio(card, 0.5).unwrap();
//!
//! let batches = doc.take_intersections();
//! assert_eq!(batches.len(), 1);
//! assert!(batches[0].entries[0].is_intersecting);
//! ```

pub mod document;
pub mod error;
pub mod host;
pub mod intersection;

use slotmap::new_key_type;

pub use document::Document;
pub use error::{DomError, Result};
pub use host::Host;
pub use intersection::{IntersectionBatch, IntersectionEntry};

new_key_type! {
    /// Handle to an element in a host document
    pub struct ElementId;
    /// Handle to an intersection observer owned by a host document
    pub struct ObserverId;
}
