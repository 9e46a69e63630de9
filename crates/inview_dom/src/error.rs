//! Host document error types

use thiserror::Error;

use crate::{ElementId, ObserverId};

/// Errors raised by host document operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// The element was removed from the document (or never belonged to it)
    #[error("Unknown element: {0:?}")]
    UnknownElement(ElementId),

    /// The observer was disconnected (or never created by this host)
    #[error("Unknown observer: {0:?}")]
    UnknownObserver(ObserverId),

    /// An element cannot be appended below itself or one of its descendants
    #[error("Cannot append {child:?} below {parent:?}: would create a cycle")]
    Cycle { parent: ElementId, child: ElementId },
}

/// Result type for host document operations
pub type Result<T> = std::result::Result<T, DomError>;
